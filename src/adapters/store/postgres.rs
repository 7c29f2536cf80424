//! PostgreSQL adapter for ProfileStore
//!
//! One row per profile. The category tree is stored as a JSONB document
//! since it is always read and written whole.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::types::Json;
use sqlx::Row;

use crate::domain::decision::{Category, Profile, Theme};
use crate::domain::foundation::{ProfileId, Timestamp};
use crate::ports::{ProfilePatch, ProfileStore, StoreError};

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS decision_profiles (
        id            TEXT PRIMARY KEY,
        name          TEXT NOT NULL,
        categories    JSONB NOT NULL DEFAULT '[]'::jsonb,
        last_modified BIGINT NOT NULL,
        starred       BOOLEAN NOT NULL DEFAULT FALSE,
        theme         TEXT
    )
"#;

const SELECT_COLUMNS: &str = "id, name, categories, last_modified, starred, theme";

/// PostgreSQL implementation of ProfileStore
#[derive(Debug, Clone)]
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a pool and make sure the table exists.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        let store = Self::new(pool);
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Create the profiles table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    /// Build profile from database row
    fn from_db_row(row: &PgRow) -> Result<Profile, StoreError> {
        let id: String = row.try_get("id").map_err(map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(map_sqlx_error)?;
        let Json(categories): Json<Vec<Category>> =
            row.try_get("categories").map_err(map_sqlx_error)?;
        let last_modified: i64 = row.try_get("last_modified").map_err(map_sqlx_error)?;
        let starred: bool = row.try_get("starred").map_err(map_sqlx_error)?;
        let theme: Option<String> = row.try_get("theme").map_err(map_sqlx_error)?;

        let theme = theme
            .map(|t| {
                serde_json::from_value::<Theme>(serde_json::Value::String(t.clone()))
                    .map_err(|_| StoreError::internal(format!("Invalid theme in database: {}", t)))
            })
            .transpose()?;

        Ok(Profile {
            id: ProfileId::parse(id)?,
            name,
            categories,
            last_modified: Timestamp::from_millis(last_modified),
            starred,
            theme,
        })
    }
}

fn theme_column(theme: Option<Theme>) -> Option<String> {
    theme.and_then(|t| match serde_json::to_value(t) {
        Ok(serde_json::Value::String(s)) => Some(s),
        _ => None,
    })
}

/// Connectivity failures become `Unavailable`; everything else is internal.
fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => StoreError::unavailable(err.to_string()),
        other => StoreError::internal(format!("Database error: {}", other)),
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn list(&self) -> Result<Vec<Profile>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM decision_profiles ORDER BY starred DESC, last_modified DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(Self::from_db_row).collect()
    }

    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, StoreError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM decision_profiles WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(Self::from_db_row).transpose()
    }

    async fn create(&self, profile: &Profile) -> Result<Profile, StoreError> {
        profile.validate()?;

        let result = sqlx::query(
            r#"
            INSERT INTO decision_profiles (id, name, categories, last_modified, starred, theme)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(profile.id.as_str())
        .bind(&profile.name)
        .bind(Json(&profile.categories))
        .bind(profile.last_modified.as_millis())
        .bind(profile.starred)
        .bind(theme_column(profile.theme))
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Conflict(profile.id.clone()));
        }
        Ok(profile.clone())
    }

    async fn update(&self, id: &ProfileId, patch: &ProfilePatch) -> Result<Profile, StoreError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        let row = sqlx::query(&format!(
            "SELECT {} FROM decision_profiles WHERE id = $1 FOR UPDATE",
            SELECT_COLUMNS
        ))
        .bind(id.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx_error)?
        .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        let merged = patch.apply_to(&Self::from_db_row(&row)?);
        merged.validate()?;

        sqlx::query(
            r#"
            UPDATE decision_profiles
            SET name = $2,
                categories = $3,
                last_modified = $4,
                starred = $5,
                theme = $6
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .bind(&merged.name)
        .bind(Json(&merged.categories))
        .bind(merged.last_modified.as_millis())
        .bind(merged.starred)
        .bind(theme_column(merged.theme))
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(merged)
    }

    async fn delete(&self, id: &ProfileId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM decision_profiles WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id.clone()));
        }
        Ok(())
    }
}
