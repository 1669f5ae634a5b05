use giftwise_result::Result;

use crate::models::users::{FieldsUser, PartialUser, User};

#[cfg(feature = "mongodb")]
mod mongodb;
mod reference;

#[async_trait]
pub trait AbstractUsers: Sync + Send {
    /// Fetch a user from the database
    async fn fetch_user(&self, id: &str) -> Result<User>;

    /// Insert a new user into the database
    async fn insert_user(&self, user: &User) -> Result<()>;

    /// Update an existing user
    async fn update_user(
        &self,
        id: &str,
        partial: &PartialUser,
        remove: Vec<FieldsUser>,
    ) -> Result<()>;

    /// Delete a user from the database
    async fn delete_user(&self, id: &str) -> Result<()>;
}
