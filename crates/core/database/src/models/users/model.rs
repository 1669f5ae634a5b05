use giftwise_result::Result;

use crate::{Database, IntoDocumentPath};

auto_derived!(
    /// User profile
    pub struct User {
        /// User Id
        #[serde(rename = "_id")]
        pub id: String,

        /// Email address
        pub email: String,

        /// Preferred display name
        #[serde(skip_serializing_if = "Option::is_none")]
        pub display_name: Option<String>,

        /// Whether this user may use the admin console
        #[serde(skip_serializing_if = "crate::if_false", default)]
        pub admin: bool,
    }

    /// Subset of user fields for updates
    #[derive(Default)]
    pub struct PartialUser {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub email: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub display_name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub admin: Option<bool>,
    }

    /// Optional fields on user object
    pub enum FieldsUser {
        DisplayName,
    }
);

impl IntoDocumentPath for FieldsUser {
    fn as_path(&self) -> Option<&'static str> {
        match self {
            FieldsUser::DisplayName => "display_name".into(),
        }
    }
}

impl User {
    pub async fn create(
        db: &Database,
        email: String,
        display_name: Option<String>,
    ) -> Result<User> {
        let user = User {
            id: ulid::Ulid::new().to_string(),
            email,
            display_name,
            admin: false,
        };

        db.insert_user(&user).await?;
        Ok(user)
    }

    /// Update this user
    pub async fn update(
        &mut self,
        db: &Database,
        partial: PartialUser,
        remove: Vec<FieldsUser>,
    ) -> Result<()> {
        for field in &remove {
            self.remove_field(field);
        }

        db.update_user(&self.id, &partial, remove).await?;
        self.apply_options(partial);
        Ok(())
    }

    /// Delete this user
    pub async fn delete(&self, db: &Database) -> Result<()> {
        db.delete_user(&self.id).await
    }

    pub fn remove_field(&mut self, field: &FieldsUser) {
        match field {
            FieldsUser::DisplayName => self.display_name = None,
        }
    }

    pub fn apply_options(&mut self, partial: PartialUser) {
        if let Some(email) = partial.email {
            self.email = email;
        }

        if let Some(display_name) = partial.display_name {
            self.display_name = Some(display_name);
        }

        if let Some(admin) = partial.admin {
            self.admin = admin;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{FieldsUser, PartialUser, User};

    #[async_std::test]
    async fn crud() {
        database_test!(|db| async move {
            let user = User::create(&db, "jo@example.com".to_string(), Some("Jo".to_string()))
                .await
                .unwrap();

            assert!(!user.admin);

            let mut updated_user = user.clone();
            updated_user
                .update(
                    &db,
                    PartialUser {
                        admin: Some(true),
                        ..Default::default()
                    },
                    vec![FieldsUser::DisplayName],
                )
                .await
                .unwrap();

            let fetched_user = db.fetch_user(&user.id).await.unwrap();
            assert!(fetched_user.admin);
            assert_eq!(None, fetched_user.display_name);
            assert_eq!(updated_user, fetched_user);

            user.delete(&db).await.unwrap();
            assert!(db.fetch_user(&user.id).await.is_err());
        });
    }
}
