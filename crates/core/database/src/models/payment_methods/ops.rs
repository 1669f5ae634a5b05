use giftwise_result::Result;

use crate::models::payment_methods::PaymentMethod;

#[cfg(feature = "mongodb")]
mod mongodb;
mod reference;

#[async_trait]
pub trait AbstractPaymentMethods: Sync + Send {
    /// Fetch a payment method by its id
    async fn fetch_payment_method(&self, id: &str) -> Result<PaymentMethod>;

    /// Fetch all payment methods stored by a user
    async fn fetch_payment_methods_by_user(&self, user_id: &str) -> Result<Vec<PaymentMethod>>;

    /// Insert a new payment method into the database
    async fn insert_payment_method(&self, payment_method: &PaymentMethod) -> Result<()>;

    /// Delete a payment method from the database
    async fn delete_payment_method(&self, id: &str) -> Result<()>;
}
