use giftwise_result::Result;

use crate::models::events::{Event, PartialEvent};

#[cfg(feature = "mongodb")]
mod mongodb;
mod reference;

#[async_trait]
pub trait AbstractEvents: Sync + Send {
    /// Fetch an event by its id
    async fn fetch_event(&self, id: &str) -> Result<Event>;

    /// Fetch every event record; the recurrence processor scans the whole
    /// collection and filters in memory
    async fn fetch_all_events(&self) -> Result<Vec<Event>>;

    /// Fetch all events belonging to a user
    async fn fetch_events_by_user(&self, user_id: &str) -> Result<Vec<Event>>;

    /// Insert a new event into the database
    async fn insert_event(&self, event: &Event) -> Result<()>;

    /// Update an existing event
    async fn update_event(&self, id: &str, partial: &PartialEvent) -> Result<()>;

    /// Delete an event from the database
    async fn delete_event(&self, id: &str) -> Result<()>;
}
