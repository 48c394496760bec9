//! MySQL repository implementations

mod account_repository_impl;
mod profile_repository_impl;

pub use account_repository_impl::MySqlAccountRepository;
pub use profile_repository_impl::MySqlProfileRepository;

use cm_core::errors::DomainError;

/// Maps a SQLx failure to a domain error, turning unique-key violations into `Conflict`
pub(crate) fn map_sqlx_error(context: &str, error: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_error) = &error {
        if db_error.is_unique_violation() {
            return DomainError::Conflict {
                message: format!("{}: already exists", context),
            };
        }
    }
    tracing::error!(error = %error, context, "Database query failed");
    DomainError::Internal {
        message: format!("{}: {}", context, error),
    }
}
