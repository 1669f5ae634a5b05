use giftwise_result::Result;

use crate::ReferenceDb;
use crate::{Event, PartialEvent};

use super::AbstractEvents;

#[async_trait]
impl AbstractEvents for ReferenceDb {
    async fn fetch_event(&self, id: &str) -> Result<Event> {
        let events = self.events.lock().await;
        events.get(id).cloned().ok_or_else(|| create_error!(NotFound))
    }

    async fn fetch_all_events(&self) -> Result<Vec<Event>> {
        let events = self.events.lock().await;
        Ok(events.values().cloned().collect())
    }

    async fn fetch_events_by_user(&self, user_id: &str) -> Result<Vec<Event>> {
        let events = self.events.lock().await;
        Ok(events
            .values()
            .filter(|event| event.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert_event(&self, event: &Event) -> Result<()> {
        let mut events = self.events.lock().await;
        if events.contains_key(&event.id) {
            Err(create_database_error!("insert", "events"))
        } else {
            events.insert(event.id.to_string(), event.clone());
            Ok(())
        }
    }

    async fn update_event(&self, id: &str, partial: &PartialEvent) -> Result<()> {
        let mut events = self.events.lock().await;
        if let Some(event) = events.get_mut(id) {
            event.apply_options(partial.clone());
            Ok(())
        } else {
            Err(create_error!(NotFound))
        }
    }

    async fn delete_event(&self, id: &str) -> Result<()> {
        let mut events = self.events.lock().await;
        if events.remove(id).is_some() {
            Ok(())
        } else {
            Err(create_error!(NotFound))
        }
    }
}
