use chrono::{DateTime, Utc};
use giftwise_result::Result;
use mongodb::bson::doc;
use mongodb::options::FindOptions;

use crate::MongoDb;
use crate::ServedEvent;

use super::AbstractServedEvents;

static COL: &str = "events_served";

fn most_recent_first() -> FindOptions {
    FindOptions::builder().sort(doc! { "served_at": -1 }).build()
}

#[async_trait]
impl AbstractServedEvents for MongoDb {
    async fn insert_served_event(&self, served: &ServedEvent) -> Result<()> {
        query!(self, insert_one, COL, served).map(|_| ())
    }

    async fn fetch_recently_served_events(
        &self,
        after: DateTime<Utc>,
    ) -> Result<Vec<ServedEvent>> {
        query!(
            self,
            find_with_options,
            COL,
            doc! {
                "served_at": {
                    "$gte": bson::DateTime::from_chrono(after)
                }
            },
            most_recent_first()
        )
    }

    async fn fetch_served_events_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ServedEvent>> {
        query!(
            self,
            find_with_options,
            COL,
            doc! {
                "served_at": {
                    "$gte": bson::DateTime::from_chrono(start),
                    "$lte": bson::DateTime::from_chrono(end)
                }
            },
            most_recent_first()
        )
    }

    async fn fetch_all_served_events(&self, limit: i64) -> Result<Vec<ServedEvent>> {
        query!(
            self,
            find_with_options,
            COL,
            doc! {},
            FindOptions::builder()
                .sort(doc! { "served_at": -1 })
                .limit(limit)
                .build()
        )
    }
}
