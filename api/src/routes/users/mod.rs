//! Handlers for the authenticated account's own resources

pub mod avatar;
pub mod me;
pub mod profile;

pub use avatar::{get_avatar, upload_avatar};
pub use me::me;
pub use profile::{get_profile, update_profile};
