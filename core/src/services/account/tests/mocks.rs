//! Mock avatar locator for testing the account service

use async_trait::async_trait;

use crate::services::account::AvatarLocator;

pub struct MockAvatarLocator {
    pub should_fail: bool,
}

impl MockAvatarLocator {
    pub fn new(should_fail: bool) -> Self {
        Self { should_fail }
    }
}

#[async_trait]
impl AvatarLocator for MockAvatarLocator {
    async fn locate(&self, email: &str) -> Result<String, String> {
        if self.should_fail {
            return Err("avatar service unreachable".to_string());
        }
        Ok(format!("https://avatars.test/{}", email))
    }
}
