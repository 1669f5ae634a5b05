use giftwise_result::Result;
use mongodb::bson::doc;

use crate::MongoDb;
use crate::{Event, PartialEvent};

use super::AbstractEvents;

static COL: &str = "events";

#[async_trait]
impl AbstractEvents for MongoDb {
    async fn fetch_event(&self, id: &str) -> Result<Event> {
        query!(self, find_one_by_id, COL, id)?.ok_or_else(|| create_error!(NotFound))
    }

    async fn fetch_all_events(&self) -> Result<Vec<Event>> {
        query!(self, find, COL, doc! {})
    }

    async fn fetch_events_by_user(&self, user_id: &str) -> Result<Vec<Event>> {
        query!(
            self,
            find,
            COL,
            doc! {
                "user_id": user_id
            }
        )
    }

    async fn insert_event(&self, event: &Event) -> Result<()> {
        query!(self, insert_one, COL, event).map(|_| ())
    }

    async fn update_event(&self, id: &str, partial: &PartialEvent) -> Result<()> {
        query!(self, update_one_by_id, COL, id, partial, vec![]).map(|_| ())
    }

    async fn delete_event(&self, id: &str) -> Result<()> {
        query!(self, delete_one_by_id, COL, id).map(|_| ())
    }
}
