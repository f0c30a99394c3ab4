//! HTTP-level tests for reference data and model management.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

fn custom_body(name: &str) -> serde_json::Value {
    json!({
        "display_name": name,
        "family": "custom",
        "category": "custom",
        "parameters_billion": 8.0,
        "energy_per_million_tokens_kwh": 0.06,
        "default_gpu": "nvidia-a10g",
        "tokens_per_second_per_gpu": 180,
        "quality_score": 58
    })
}

// ---------------------------------------------------------------------------
// Reference data
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn reference_endpoints_list_seeded_data(pool: PgPool) {
    let app = common::seeded_app(pool.clone()).await;
    let json = body_json(get(app, "/api/v1/reference/regions").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 18);

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/api/v1/reference/gpus").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 7);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/reference/settings-defaults").await).await;
    assert_eq!(json["data"]["default_pue"], 1.2);
    assert_eq!(json["data"]["default_wue"], 1.1);
    assert_eq!(json["data"]["ecoscore_weights"]["energyEfficiency"], 0.3);
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_models_reports_counts(pool: PgPool) {
    let app = common::seeded_app(pool.clone()).await;
    let response = post_json(app, "/api/v1/models", custom_body("Support Bot")).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/api/v1/models").await).await;
    assert_eq!(json["data"]["total"], 21);
    assert_eq!(json["data"]["predefined_count"], 20);
    assert_eq!(json["data"]["custom_count"], 1);
    assert_eq!(json["data"]["models"][0]["is_predefined"], true);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/models?include_predefined=false").await).await;
    assert_eq!(json["data"]["total"], 1);
    assert_eq!(json["data"]["models"][0]["display_name"], "Support Bot");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_model_by_slug_and_unknown(pool: PgPool) {
    let app = common::seeded_app(pool.clone()).await;
    let response = get(app, "/api/v1/models/gpt35").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["slug"], "gpt35");
    assert_eq!(json["data"]["default_gpu"], "nvidia-a100-40gb");

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/models/gpt-9").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Model with id gpt-9 not found");
}

// ---------------------------------------------------------------------------
// Custom model lifecycle
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_custom_model_generates_slug(pool: PgPool) {
    let app = common::seeded_app(pool).await;
    let response = post_json(app, "/api/v1/models", custom_body("  Support Bot  ")).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let slug = json["data"]["slug"].as_str().unwrap();
    assert!(slug.starts_with("custom-"));
    assert_eq!(slug.len(), "custom-".len() + 12);
    assert_eq!(json["data"]["display_name"], "Support Bot");
    assert_eq!(json["data"]["is_predefined"], false);
    assert_eq!(json["data"]["gpu_count_inference"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_rejects_out_of_range_fields(pool: PgPool) {
    let mut body = custom_body("Support Bot");
    body["quality_score"] = json!(120);

    let app = common::seeded_app(pool).await;
    let response = post_json(app, "/api/v1/models", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_rejects_unknown_gpu(pool: PgPool) {
    let mut body = custom_body("Support Bot");
    body["default_gpu"] = json!("nvidia-b200");

    let app = common::seeded_app(pool).await;
    let response = post_json(app, "/api/v1/models", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Unknown GPU: nvidia-b200");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn predefined_models_are_read_only(pool: PgPool) {
    let app = common::seeded_app(pool.clone()).await;
    let response = put_json(app, "/api/v1/models/gpt35", json!({"quality_score": 1})).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool.clone());
    let response = delete(app, "/api/v1/models/gpt35").await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/models/gpt35").await).await;
    assert_eq!(json["data"]["quality_score"], 78);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_then_delete_custom_model(pool: PgPool) {
    let app = common::seeded_app(pool.clone()).await;
    let created = body_json(post_json(app, "/api/v1/models", custom_body("Support Bot")).await).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/models/{id}"),
        json!({"quality_score": 70, "default_gpu": "nvidia-t4"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["quality_score"], 70);
    assert_eq!(json["data"]["default_gpu"], "nvidia-t4");
    assert_eq!(json["data"]["display_name"], "Support Bot");

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/models/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/models/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool);
    let response = delete(app, &format!("/api/v1/models/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
