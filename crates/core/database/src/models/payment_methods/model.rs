use chrono::{DateTime, Utc};
use giftwise_result::Result;

use crate::Database;

auto_derived!(
    /// Payment instrument detail
    #[serde(tag = "type")]
    pub enum PaymentDetail {
        CreditCard {
            card_number: String,
            expiry: String,
            cardholder: String,
        },
        BankAccount {
            account_number: String,
            routing_number: String,
        },
    }

    /// Stored payment method
    pub struct PaymentMethod {
        /// Payment method Id
        #[serde(rename = "_id")]
        pub id: String,

        /// Id of the owning user
        pub user_id: String,

        /// Card or bank account information
        pub detail: PaymentDetail,

        /// When this payment method was stored
        #[serde(with = "crate::util::bson_datetime")]
        pub created_at: DateTime<Utc>,
    }
);

impl PaymentMethod {
    pub async fn create(
        db: &Database,
        user_id: String,
        detail: PaymentDetail,
    ) -> Result<PaymentMethod> {
        let payment_method = PaymentMethod {
            id: ulid::Ulid::new().to_string(),
            user_id,
            detail,
            created_at: Utc::now(),
        };

        db.insert_payment_method(&payment_method).await?;
        Ok(payment_method)
    }

    /// Delete this payment method
    pub async fn delete(&self, db: &Database) -> Result<()> {
        db.delete_payment_method(&self.id).await
    }
}
