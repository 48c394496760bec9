//! Business services containing domain logic and use cases.

pub mod account;
pub mod avatar;
pub mod profile;
pub mod token;
pub mod verification;

pub use account::{AccountService, AccountServiceConfig, AvatarLocator, NewAccount, ResendOutcome};
pub use avatar::{
    fit_within, AvatarImage, AvatarService, AvatarServiceConfig, AvatarStore, StoredAvatar,
};
pub use profile::ProfileService;
pub use token::{TokenService, TokenServiceConfig};
pub use verification::{
    ConfirmOutcome, MailTransport, OutboundMail, VerificationService, VerificationServiceConfig,
};
