//! Repository for the `organizations` table.

use sqlx::PgPool;

use crate::models::organization::Organization;

const COLUMNS: &str = "id, name, slug, created_at, updated_at";

/// Provides lookup and get-or-create for organizations.
pub struct OrganizationRepo;

impl OrganizationRepo {
    /// Find an organization by its slug.
    pub async fn find_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<Organization>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM organizations WHERE slug = $1");
        sqlx::query_as::<_, Organization>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Return the organization with `slug`, creating it if absent. The name
    /// of an existing organization is left unchanged.
    pub async fn ensure(pool: &PgPool, slug: &str, name: &str) -> Result<Organization, sqlx::Error> {
        let query = format!(
            "INSERT INTO organizations (name, slug)
             VALUES ($1, $2)
             ON CONFLICT (slug) DO UPDATE SET slug = EXCLUDED.slug
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Organization>(&query)
            .bind(name)
            .bind(slug)
            .fetch_one(pool)
            .await
    }
}
