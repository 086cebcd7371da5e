use async_trait::async_trait;

use super::users_model::{NewUser, User};
use crate::errors::Result;

/// Trait for user repository operations
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn get_by_id(&self, user_id: &str) -> Result<User>;
    fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn insert(&self, new_user: NewUser) -> Result<User>;
    async fn touch_last_login(&self, user_id: &str) -> Result<User>;
}

/// Trait for user service operations
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    fn get_user(&self, user_id: &str) -> Result<User>;
    fn find_by_email(&self, email: &str) -> Result<Option<User>>;
}
