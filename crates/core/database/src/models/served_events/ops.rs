use chrono::{DateTime, Utc};
use giftwise_result::Result;

use crate::models::served_events::ServedEvent;

#[cfg(feature = "mongodb")]
mod mongodb;
mod reference;

#[async_trait]
pub trait AbstractServedEvents: Sync + Send {
    /// Insert a new entry into the serving history
    async fn insert_served_event(&self, served: &ServedEvent) -> Result<()>;

    /// Fetch entries served at or after the given instant, most recent first
    async fn fetch_recently_served_events(
        &self,
        after: DateTime<Utc>,
    ) -> Result<Vec<ServedEvent>>;

    /// Fetch entries served within `[start, end]`, most recent first
    async fn fetch_served_events_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ServedEvent>>;

    /// Fetch up to `limit` entries across the whole history, most recent first
    async fn fetch_all_served_events(&self, limit: i64) -> Result<Vec<ServedEvent>>;
}
