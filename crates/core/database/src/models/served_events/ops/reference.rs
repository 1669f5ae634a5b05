use chrono::{DateTime, Utc};
use giftwise_result::Result;

use crate::ReferenceDb;
use crate::ServedEvent;

use super::AbstractServedEvents;

fn most_recent_first(mut served: Vec<ServedEvent>) -> Vec<ServedEvent> {
    served.sort_by(|a, b| b.served_at.cmp(&a.served_at));
    served
}

#[async_trait]
impl AbstractServedEvents for ReferenceDb {
    async fn insert_served_event(&self, served: &ServedEvent) -> Result<()> {
        let mut served_events = self.served_events.lock().await;
        if served_events.contains_key(&served.id) {
            Err(create_database_error!("insert", "events_served"))
        } else {
            served_events.insert(served.id.to_string(), served.clone());
            Ok(())
        }
    }

    async fn fetch_recently_served_events(
        &self,
        after: DateTime<Utc>,
    ) -> Result<Vec<ServedEvent>> {
        let served_events = self.served_events.lock().await;
        Ok(most_recent_first(
            served_events
                .values()
                .filter(|served| served.served_at >= after)
                .cloned()
                .collect(),
        ))
    }

    async fn fetch_served_events_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ServedEvent>> {
        let served_events = self.served_events.lock().await;
        Ok(most_recent_first(
            served_events
                .values()
                .filter(|served| served.served_at >= start && served.served_at <= end)
                .cloned()
                .collect(),
        ))
    }

    async fn fetch_all_served_events(&self, limit: i64) -> Result<Vec<ServedEvent>> {
        let served_events = self.served_events.lock().await;
        let mut served = most_recent_first(served_events.values().cloned().collect());
        served.truncate(limit as usize);
        Ok(served)
    }
}
