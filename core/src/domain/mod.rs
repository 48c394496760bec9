//! Domain layer containing the account, profile and token entities.

pub mod entities;

pub use entities::{
    Account, Claims, Profile, ProfileUpdate, TokenKind, TokenPair, MAX_PHONE_NUMBER_LENGTH,
    TOKEN_TYPE_BEARER,
};
