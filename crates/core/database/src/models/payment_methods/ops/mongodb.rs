use giftwise_result::Result;
use mongodb::bson::doc;

use crate::MongoDb;
use crate::PaymentMethod;

use super::AbstractPaymentMethods;

static COL: &str = "payment_methods";

#[async_trait]
impl AbstractPaymentMethods for MongoDb {
    async fn fetch_payment_method(&self, id: &str) -> Result<PaymentMethod> {
        query!(self, find_one_by_id, COL, id)?.ok_or_else(|| create_error!(NotFound))
    }

    async fn fetch_payment_methods_by_user(&self, user_id: &str) -> Result<Vec<PaymentMethod>> {
        query!(
            self,
            find,
            COL,
            doc! {
                "user_id": user_id
            }
        )
    }

    async fn insert_payment_method(&self, payment_method: &PaymentMethod) -> Result<()> {
        query!(self, insert_one, COL, payment_method).map(|_| ())
    }

    async fn delete_payment_method(&self, id: &str) -> Result<()> {
        query!(self, delete_one_by_id, COL, id).map(|_| ())
    }
}
