//! Authentication route handlers
//!
//! Registration with email confirmation and resend, password login, refresh token rotation
//! and logout.

pub mod confirm_email;
pub mod login;
pub mod logout;
pub mod refresh;
pub mod request_email;
pub mod signup;

pub use confirm_email::confirm_email;
pub use login::login;
pub use logout::logout;
pub use refresh::refresh_token;
pub use request_email::request_email;
pub use signup::signup;
