use giftwise_result::Result;

use crate::PaymentMethod;
use crate::ReferenceDb;

use super::AbstractPaymentMethods;

#[async_trait]
impl AbstractPaymentMethods for ReferenceDb {
    async fn fetch_payment_method(&self, id: &str) -> Result<PaymentMethod> {
        let payment_methods = self.payment_methods.lock().await;
        payment_methods
            .get(id)
            .cloned()
            .ok_or_else(|| create_error!(NotFound))
    }

    async fn fetch_payment_methods_by_user(&self, user_id: &str) -> Result<Vec<PaymentMethod>> {
        let payment_methods = self.payment_methods.lock().await;
        Ok(payment_methods
            .values()
            .filter(|payment_method| payment_method.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert_payment_method(&self, payment_method: &PaymentMethod) -> Result<()> {
        let mut payment_methods = self.payment_methods.lock().await;
        if payment_methods.contains_key(&payment_method.id) {
            Err(create_database_error!("insert", "payment_methods"))
        } else {
            payment_methods.insert(payment_method.id.to_string(), payment_method.clone());
            Ok(())
        }
    }

    async fn delete_payment_method(&self, id: &str) -> Result<()> {
        let mut payment_methods = self.payment_methods.lock().await;
        if payment_methods.remove(id).is_some() {
            Ok(())
        } else {
            Err(create_error!(NotFound))
        }
    }
}
