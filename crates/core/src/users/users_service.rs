use std::sync::Arc;

use super::users_model::User;
use super::users_traits::{UserRepositoryTrait, UserServiceTrait};
use crate::errors::Result;

/// Service for reading user records. Creation happens exclusively through
/// signup verification in `auth::VerificationService`.
pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl UserServiceTrait for UserService {
    fn get_user(&self, user_id: &str) -> Result<User> {
        self.repository.get_by_id(user_id)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.repository.find_by_email(email)
    }
}
