//! MySQL implementation of the ProfileRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use cm_core::domain::entities::profile::Profile;
use cm_core::errors::DomainError;
use cm_core::repositories::ProfileRepository;

use super::map_sqlx_error;

/// MySQL implementation of ProfileRepository
pub struct MySqlProfileRepository {
    pool: MySqlPool,
}

impl MySqlProfileRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_profile(row: &sqlx::mysql::MySqlRow) -> Result<Profile, DomainError> {
        let column = |name: &str, e: sqlx::Error| DomainError::Internal {
            message: format!("Failed to get {}: {}", name, e),
        };

        let account_id: String = row.try_get("account_id").map_err(|e| column("account_id", e))?;

        Ok(Profile {
            account_id: Uuid::parse_str(&account_id).map_err(|e| DomainError::Internal {
                message: format!("Invalid UUID: {}", e),
            })?,
            avatar_path: row.try_get("avatar_path").map_err(|e| column("avatar_path", e))?,
            first_name: row.try_get("first_name").map_err(|e| column("first_name", e))?,
            last_name: row.try_get("last_name").map_err(|e| column("last_name", e))?,
            phone_number: row.try_get("phone_number").map_err(|e| column("phone_number", e))?,
            birth_date: row
                .try_get::<Option<NaiveDate>, _>("birth_date")
                .map_err(|e| column("birth_date", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column("created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| column("updated_at", e))?,
        })
    }
}

#[async_trait]
impl ProfileRepository for MySqlProfileRepository {
    async fn create(&self, profile: Profile) -> Result<Profile, DomainError> {
        let query = r#"
            INSERT INTO profiles (
                account_id, avatar_path, first_name, last_name,
                phone_number, birth_date, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(profile.account_id.to_string())
            .bind(&profile.avatar_path)
            .bind(&profile.first_name)
            .bind(&profile.last_name)
            .bind(&profile.phone_number)
            .bind(profile.birth_date)
            .bind(profile.created_at)
            .bind(profile.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("create profile", e))?;

        Ok(profile)
    }

    async fn find_by_account(&self, account_id: Uuid) -> Result<Option<Profile>, DomainError> {
        let query = r#"
            SELECT account_id, avatar_path, first_name, last_name,
                   phone_number, birth_date, created_at, updated_at
            FROM profiles
            WHERE account_id = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(account_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("find profile", e))?;

        row.as_ref().map(Self::row_to_profile).transpose()
    }

    async fn update(&self, profile: Profile) -> Result<Profile, DomainError> {
        let query = r#"
            UPDATE profiles SET
                avatar_path = ?,
                first_name = ?,
                last_name = ?,
                phone_number = ?,
                birth_date = ?,
                updated_at = ?
            WHERE account_id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&profile.avatar_path)
            .bind(&profile.first_name)
            .bind(&profile.last_name)
            .bind(&profile.phone_number)
            .bind(profile.birth_date)
            .bind(profile.updated_at)
            .bind(profile.account_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("update profile", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "profile".to_string(),
            });
        }

        Ok(profile)
    }
}
