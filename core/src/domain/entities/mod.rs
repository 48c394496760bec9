//! Domain entities representing core business objects.

pub mod account;
pub mod profile;
pub mod token;

#[cfg(test)]
mod tests;

pub use account::Account;
pub use profile::{Profile, ProfileUpdate, MAX_PHONE_NUMBER_LENGTH};
pub use token::{Claims, TokenKind, TokenPair, TOKEN_TYPE_BEARER};
