use giftwise_result::Result;

use crate::ReferenceDb;
use crate::{FieldsUser, PartialUser, User};

use super::AbstractUsers;

#[async_trait]
impl AbstractUsers for ReferenceDb {
    async fn fetch_user(&self, id: &str) -> Result<User> {
        let users = self.users.lock().await;
        users.get(id).cloned().ok_or_else(|| create_error!(NotFound))
    }

    async fn insert_user(&self, user: &User) -> Result<()> {
        let mut users = self.users.lock().await;
        if users.contains_key(&user.id) {
            Err(create_database_error!("insert", "users"))
        } else {
            users.insert(user.id.to_string(), user.clone());
            Ok(())
        }
    }

    async fn update_user(
        &self,
        id: &str,
        partial: &PartialUser,
        remove: Vec<FieldsUser>,
    ) -> Result<()> {
        let mut users = self.users.lock().await;
        if let Some(user) = users.get_mut(id) {
            for field in &remove {
                user.remove_field(field);
            }

            user.apply_options(partial.clone());
            Ok(())
        } else {
            Err(create_error!(NotFound))
        }
    }

    async fn delete_user(&self, id: &str) -> Result<()> {
        let mut users = self.users.lock().await;
        if users.remove(id).is_some() {
            Ok(())
        } else {
            Err(create_error!(NotFound))
        }
    }
}
