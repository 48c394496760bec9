//! Configuration for the account service

/// Configuration for the account service
#[derive(Debug, Clone)]
pub struct AccountServiceConfig {
    /// bcrypt work factor
    pub bcrypt_cost: u32,
    /// Avatar path given to newly created profiles
    pub default_avatar: String,
}

impl Default for AccountServiceConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: bcrypt::DEFAULT_COST,
            default_avatar: "default_avatar.png".to_string(),
        }
    }
}
