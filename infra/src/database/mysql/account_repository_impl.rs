//! MySQL implementation of the AccountRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use cm_core::domain::entities::account::Account;
use cm_core::errors::DomainError;
use cm_core::repositories::AccountRepository;
use cm_shared::utils::validation::normalize_email;

use super::map_sqlx_error;

const ACCOUNT_COLUMNS: &str = "id, username, email, password_hash, refresh_token, \
                               is_verified, avatar, created_at, updated_at";

/// MySQL implementation of AccountRepository
pub struct MySqlAccountRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlAccountRepository {
    /// Create a new MySQL account repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Account entity
    fn row_to_account(row: &sqlx::mysql::MySqlRow) -> Result<Account, DomainError> {
        let column = |name: &str, e: sqlx::Error| DomainError::Internal {
            message: format!("Failed to get {}: {}", name, e),
        };

        let id: String = row.try_get("id").map_err(|e| column("id", e))?;

        Ok(Account {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid UUID: {}", e),
            })?,
            username: row.try_get("username").map_err(|e| column("username", e))?,
            email: row.try_get("email").map_err(|e| column("email", e))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| column("password_hash", e))?,
            refresh_token: row
                .try_get("refresh_token")
                .map_err(|e| column("refresh_token", e))?,
            is_verified: row
                .try_get("is_verified")
                .map_err(|e| column("is_verified", e))?,
            avatar: row.try_get("avatar").map_err(|e| column("avatar", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column("created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| column("updated_at", e))?,
        })
    }

    async fn fetch_one_where(&self, clause: &str, value: String) -> Result<Option<Account>, DomainError> {
        let query = format!("SELECT {} FROM accounts WHERE {} LIMIT 1", ACCOUNT_COLUMNS, clause);

        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("find account", e))?;

        row.as_ref().map(Self::row_to_account).transpose()
    }

    fn not_found_if_untouched(rows_affected: u64) -> Result<(), DomainError> {
        if rows_affected == 0 {
            return Err(DomainError::NotFound {
                resource: "account".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        self.fetch_one_where("email = ?", normalize_email(email)).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        self.fetch_one_where("id = ?", id.to_string()).await
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let query = r#"
            INSERT INTO accounts (
                id, username, email, password_hash, refresh_token,
                is_verified, avatar, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(account.id.to_string())
            .bind(&account.username)
            .bind(&account.email)
            .bind(&account.password_hash)
            .bind(&account.refresh_token)
            .bind(account.is_verified)
            .bind(&account.avatar)
            .bind(account.created_at)
            .bind(account.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("create account", e))?;

        Ok(account)
    }

    async fn update_refresh_token(&self, id: Uuid, token: Option<String>) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE accounts SET refresh_token = ?, updated_at = ? WHERE id = ?")
            .bind(token)
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("update refresh token", e))?;

        Self::not_found_if_untouched(result.rows_affected())
    }

    async fn mark_verified(&self, email: &str) -> Result<Account, DomainError> {
        let email = normalize_email(email);

        sqlx::query("UPDATE accounts SET is_verified = TRUE, updated_at = ? WHERE email = ? AND is_verified = FALSE")
            .bind(Utc::now())
            .bind(&email)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("mark account verified", e))?;

        // MySQL reports zero affected rows for an already verified account,
        // so existence is checked with a read.
        self.find_by_email(&email).await?.ok_or_else(|| DomainError::NotFound {
            resource: "account".to_string(),
        })
    }

    async fn update_avatar(&self, id: Uuid, avatar: Option<String>) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE accounts SET avatar = ?, updated_at = ? WHERE id = ?")
            .bind(avatar)
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("update avatar", e))?;

        Self::not_found_if_untouched(result.rows_affected())
    }
}
