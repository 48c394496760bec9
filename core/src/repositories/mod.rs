pub mod account;
pub mod profile;

pub use account::AccountRepository;
pub use profile::ProfileRepository;

#[cfg(test)]
pub use account::MockAccountRepository;
#[cfg(test)]
pub use profile::MockProfileRepository;
