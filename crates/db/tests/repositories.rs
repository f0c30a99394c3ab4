use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use ecoscore_core::catalog::ReferenceCatalog;
use ecoscore_core::profile::ModelCategory;
use ecoscore_core::reference;
use ecoscore_db::models::ai_model::{CreateCustomModel, ModelListFilter, UpdateCustomModel};
use ecoscore_db::models::calculation_log::NewCalculationLog;
use ecoscore_db::repositories::{
    AiModelRepo, CalculationLogRepo, CatalogRepo, GpuProfileRepo, GridIntensityRepo,
    OrganizationRepo,
};
use ecoscore_db::seed::seed_reference_data;
use sqlx::PgPool;

fn custom_model(name: &str) -> CreateCustomModel {
    CreateCustomModel {
        display_name: name.to_string(),
        family: "custom".to_string(),
        category: ModelCategory::Custom,
        parameters_billion: 3.0,
        energy_per_million_tokens_kwh: 0.03,
        default_gpu: "nvidia-t4".to_string(),
        gpu_count_inference: 1,
        tokens_per_second_per_gpu: 250,
        quality_score: 45,
        description: Some("Fine-tuned support bot".to_string()),
    }
}

fn log_entry(organization_id: i64, model_id: i64, co2e_grams: f64) -> NewCalculationLog {
    NewCalculationLog {
        organization_id,
        model_id,
        region_id: "us-west-2".to_string(),
        request_count: 100,
        avg_tokens_per_request: 500,
        total_tokens: 50_000,
        energy_kwh: 0.03,
        co2e_grams,
        water_liters: 0.03,
        hardware_amortized_grams: 0.2,
        eco_score: Some(80.0),
        eco_grade: Some("A".to_string()),
        pue_factor: None,
        wue_factor: None,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn seeding_is_idempotent(pool: PgPool) {
    let first = seed_reference_data(&pool, "default").await.unwrap();
    let second = seed_reference_data(&pool, "default").await.unwrap();

    assert_eq!(first.organization.id, second.organization.id);
    assert_eq!(
        GpuProfileRepo::list(&pool).await.unwrap().len(),
        reference::predefined_gpus().len()
    );
    assert_eq!(
        GridIntensityRepo::list(&pool).await.unwrap().len(),
        reference::predefined_grids().len()
    );
    let models = AiModelRepo::list(&pool, &ModelListFilter::default()).await.unwrap();
    assert_eq!(models.len(), reference::predefined_models().len());
    assert!(models.iter().all(|m| m.is_predefined));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn seeded_rows_round_trip_to_profiles(pool: PgPool) {
    seed_reference_data(&pool, "default").await.unwrap();

    let gpu = GpuProfileRepo::find_by_sku(&pool, "nvidia-a100-40gb").await.unwrap().unwrap();
    let expected = reference::predefined_catalog().lookup_gpu("nvidia-a100-40gb").unwrap();
    assert_eq!(gpu.to_profile().unwrap(), expected);

    let grid = GridIntensityRepo::find_by_region(&pool, "us-west-2").await.unwrap().unwrap();
    assert_eq!(grid.to_profile().unwrap().gco2e_per_kwh, 78.0);
    assert_eq!(grid.renewable_percentage, 68);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_orders_predefined_first_then_by_size(pool: PgPool) {
    let seeded = seed_reference_data(&pool, "default").await.unwrap();
    let custom = AiModelRepo::create_custom(
        &pool,
        seeded.organization.id,
        "custom-0123456789ab",
        &custom_model("Support Bot"),
    )
    .await
    .unwrap();

    let all = AiModelRepo::list(&pool, &ModelListFilter::default()).await.unwrap();
    assert_eq!(all.last().map(|m| m.id), Some(custom.id));
    let predefined: Vec<_> = all.iter().filter(|m| m.is_predefined).collect();
    assert!(predefined
        .windows(2)
        .all(|w| w[0].parameters_billion >= w[1].parameters_billion));

    let only_custom = ModelListFilter {
        include_predefined: false,
        ..Default::default()
    };
    let rows = AiModelRepo::list(&pool, &only_custom).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].slug, "custom-0123456789ab");

    let frontier = ModelListFilter {
        category: Some(ModelCategory::FrontierLlm),
        ..Default::default()
    };
    let rows = AiModelRepo::list(&pool, &frontier).await.unwrap();
    assert!(!rows.is_empty());
    assert!(rows.iter().all(|m| m.category == "frontier-llm"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn find_active_by_id_or_slug(pool: PgPool) {
    seed_reference_data(&pool, "default").await.unwrap();

    let by_slug = AiModelRepo::find_active(&pool, "gpt35").await.unwrap().unwrap();
    let by_id = AiModelRepo::find_active(&pool, &by_slug.id.to_string())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_slug.id, by_id.id);
    assert!(AiModelRepo::find_active(&pool, "gpt-9").await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_and_soft_delete_skip_predefined(pool: PgPool) {
    let seeded = seed_reference_data(&pool, "default").await.unwrap();
    let gpt35 = AiModelRepo::find_active(&pool, "gpt35").await.unwrap().unwrap();
    let patch = UpdateCustomModel {
        quality_score: Some(10),
        ..Default::default()
    };

    assert!(AiModelRepo::update_custom(&pool, gpt35.id, &patch).await.unwrap().is_none());
    assert!(!AiModelRepo::soft_delete(&pool, gpt35.id).await.unwrap());

    let custom = AiModelRepo::create_custom(
        &pool,
        seeded.organization.id,
        "custom-aaaaaaaaaaaa",
        &custom_model("Support Bot"),
    )
    .await
    .unwrap();
    let updated = AiModelRepo::update_custom(&pool, custom.id, &patch)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.quality_score, 10);
    assert_eq!(updated.display_name, "Support Bot");

    assert!(AiModelRepo::soft_delete(&pool, custom.id).await.unwrap());
    assert!(!AiModelRepo::soft_delete(&pool, custom.id).await.unwrap());
    assert!(AiModelRepo::find_active(&pool, "custom-aaaaaaaaaaaa").await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_slug_violates_unique_constraint(pool: PgPool) {
    let seeded = seed_reference_data(&pool, "default").await.unwrap();
    let org = seeded.organization.id;
    AiModelRepo::create_custom(&pool, org, "custom-dup", &custom_model("One")).await.unwrap();

    let err = AiModelRepo::create_custom(&pool, org, "custom-dup", &custom_model("Two"))
        .await
        .unwrap_err();
    assert_matches!(err, sqlx::Error::Database(db) if db.constraint() == Some("uq_ai_models_slug"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn snapshot_hides_deleted_models(pool: PgPool) {
    let seeded = seed_reference_data(&pool, "default").await.unwrap();
    let custom = AiModelRepo::create_custom(
        &pool,
        seeded.organization.id,
        "custom-bbbbbbbbbbbb",
        &custom_model("Support Bot"),
    )
    .await
    .unwrap();

    let catalog = CatalogRepo::load_snapshot(&pool).await.unwrap();
    assert!(catalog.lookup_model("custom-bbbbbbbbbbbb").is_some());
    assert!(catalog.lookup_model(&custom.id.to_string()).is_some());
    assert!(catalog.lookup_grid("eu-north-1").is_some());
    assert!(catalog.lookup_gpu("nvidia-h100").is_some());

    AiModelRepo::soft_delete(&pool, custom.id).await.unwrap();
    let catalog = CatalogRepo::load_snapshot(&pool).await.unwrap();
    assert!(catalog.lookup_model("custom-bbbbbbbbbbbb").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn usage_window_is_half_open_and_scoped_to_org(pool: PgPool) {
    let seeded = seed_reference_data(&pool, "default").await.unwrap();
    let other = OrganizationRepo::ensure(&pool, "other", "Other").await.unwrap();
    let model = AiModelRepo::find_active(&pool, "llama7b").await.unwrap().unwrap();

    let ours = CalculationLogRepo::create(&pool, &log_entry(seeded.organization.id, model.id, 3.0))
        .await
        .unwrap();
    CalculationLogRepo::create(&pool, &log_entry(other.id, model.id, 9.0))
        .await
        .unwrap();

    let start = ours.calculated_at - Duration::minutes(1);
    let rows = CalculationLogRepo::list_usage(&pool, seeded.organization.id, start, Utc::now() + Duration::minutes(1))
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].display_name, model.display_name);
    let record = rows[0].clone().into_record().unwrap();
    assert_eq!(record.model_id, model.id.to_string());
    assert_eq!(record.request_count, 100);

    let rows = CalculationLogRepo::list_usage(&pool, seeded.organization.id, start, ours.calculated_at)
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn ensure_organization_keeps_existing_name(pool: PgPool) {
    let first = OrganizationRepo::ensure(&pool, "acme", "Acme Corp").await.unwrap();
    let second = OrganizationRepo::ensure(&pool, "acme", "Renamed").await.unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(second.name, "Acme Corp");
    assert!(OrganizationRepo::find_by_slug(&pool, "acme").await.unwrap().is_some());
}
