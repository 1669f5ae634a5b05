use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use giftwise_result::Result;

use crate::{Database, Event};

/// Upper bound on history entries considered for analytics
const ANALYTICS_FETCH_LIMIT: i64 = 5000;

auto_derived!(
    /// History-collection entry marking that an event was copied into the
    /// serving history for one of its occurrences.
    ///
    /// Append-only: entries are never updated or deleted here, pruning is an
    /// external concern.
    pub struct ServedEvent {
        /// Served entry Id
        #[serde(rename = "_id")]
        pub id: String,

        /// Id of the source event (non-owning back-reference)
        pub original_event_id: String,

        /// Id of the user the source event belongs to
        pub user_id: String,

        /// Copied event payload
        pub name: String,
        pub gift_option: String,
        pub subscription: String,

        /// When this copy was created; the sole field windowing queries use
        #[serde(with = "crate::util::bson_datetime")]
        pub served_at: DateTime<Utc>,

        /// `YYYY-MM-DD` date the copy was generated for
        pub served_for_date: String,

        /// The source event's date value, kept for reference
        pub date_served_as: String,
    }
);

impl ServedEvent {
    /// Build the serving-history copy of an event, stamped with provenance
    /// metadata for the given reference instant.
    pub fn copy_of(event: &Event, now: DateTime<Utc>) -> ServedEvent {
        ServedEvent {
            id: ulid::Ulid::new().to_string(),
            original_event_id: event.id.to_string(),
            user_id: event.user_id.to_string(),
            name: event.name.to_string(),
            gift_option: event.gift_option.to_string(),
            subscription: event.subscription.to_string(),
            served_at: now,
            served_for_date: now.format("%Y-%m-%d").to_string(),
            date_served_as: event.date.to_string(),
        }
    }

    /// Count served entries grouped by the `YYYY-MM` month they were served in
    pub async fn monthly_analytics(db: &Database) -> Result<BTreeMap<String, usize>> {
        let served = db.fetch_all_served_events(ANALYTICS_FETCH_LIMIT).await?;

        let mut stats = BTreeMap::new();
        for entry in served {
            *stats
                .entry(entry.served_at.format("%Y-%m").to_string())
                .or_insert(0) += 1;
        }

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use crate::{Event, ServedEvent};

    fn event(id: &str, date: &str) -> Event {
        Event {
            id: id.to_string(),
            user_id: "user".to_string(),
            name: "Grandpa".to_string(),
            date: date.to_string(),
            gift_option: "Flowers".to_string(),
            subscription: "None".to_string(),
        }
    }

    #[async_std::test]
    async fn trailing_window_fetch() {
        database_test!(|db| async move {
            let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();

            let recent = ServedEvent::copy_of(&event("a", "2024-06-05"), now - Duration::days(2));
            let stale = ServedEvent::copy_of(&event("b", "2024-06-07"), now - Duration::days(15));
            db.insert_served_event(&recent).await.unwrap();
            db.insert_served_event(&stale).await.unwrap();

            let within = db
                .fetch_recently_served_events(now - Duration::days(10))
                .await
                .unwrap();
            assert_eq!(vec![recent.clone()], within);

            let ranged = db
                .fetch_served_events_in_range(now - Duration::days(20), now)
                .await
                .unwrap();
            assert_eq!(2, ranged.len());
            // Descending by served_at
            assert_eq!(recent, ranged[0]);
            assert_eq!(stale, ranged[1]);

            let limited = db.fetch_all_served_events(1).await.unwrap();
            assert_eq!(vec![recent], limited);
        });
    }

    #[async_std::test]
    async fn monthly_analytics() {
        database_test!(|db| async move {
            let may = Utc.with_ymd_and_hms(2024, 5, 30, 9, 0, 0).unwrap();
            let june = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();

            for (id, at) in [("a", may), ("b", june), ("c", june)] {
                db.insert_served_event(&ServedEvent::copy_of(&event(id, "2024-06-05"), at))
                    .await
                    .unwrap();
            }

            let stats = ServedEvent::monthly_analytics(&db).await.unwrap();
            assert_eq!(Some(&1), stats.get("2024-05"));
            assert_eq!(Some(&2), stats.get("2024-06"));
        });
    }
}
