use chrono::NaiveDate;
use giftwise_result::Result;

use crate::Database;

auto_derived!(
    /// Gift-giving reminder event
    pub struct Event {
        /// Event Id
        #[serde(rename = "_id")]
        pub id: String,

        /// Id of the user this reminder belongs to
        pub user_id: String,

        /// Who or what the reminder is for
        pub name: String,

        /// Calendar date in `YYYY-MM-DD` form; only the month and day are
        /// matched on, the year is a recurrence anchor
        pub date: String,

        /// Chosen gift option
        pub gift_option: String,

        /// Chosen subscription option
        pub subscription: String,
    }

    /// Subset of event fields for updates
    #[derive(Default)]
    pub struct PartialEvent {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub date: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub gift_option: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub subscription: Option<String>,
    }
);

impl Event {
    pub async fn create(
        db: &Database,
        user_id: String,
        name: String,
        date: String,
        gift_option: String,
        subscription: String,
    ) -> Result<Event> {
        if NaiveDate::parse_from_str(&date, "%Y-%m-%d").is_err() {
            return Err(create_error!(InvalidEventDate { date }));
        }

        let event = Event {
            id: ulid::Ulid::new().to_string(),
            user_id,
            name,
            date,
            gift_option,
            subscription,
        };

        db.insert_event(&event).await?;
        Ok(event)
    }

    /// Update this event
    pub async fn update(&mut self, db: &Database, partial: PartialEvent) -> Result<()> {
        if let Some(date) = &partial.date {
            if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
                return Err(create_error!(InvalidEventDate {
                    date: date.to_string()
                }));
            }
        }

        db.update_event(&self.id, &partial).await?;
        self.apply_options(partial);
        Ok(())
    }

    /// Delete this event
    pub async fn delete(&self, db: &Database) -> Result<()> {
        db.delete_event(&self.id).await
    }

    pub fn apply_options(&mut self, partial: PartialEvent) {
        if let Some(name) = partial.name {
            self.name = name;
        }

        if let Some(date) = partial.date {
            self.date = date;
        }

        if let Some(gift_option) = partial.gift_option {
            self.gift_option = gift_option;
        }

        if let Some(subscription) = partial.subscription {
            self.subscription = subscription;
        }
    }
}

#[cfg(test)]
mod tests {
    use giftwise_result::ErrorType;

    use crate::{Event, PartialEvent};

    #[async_std::test]
    async fn crud() {
        database_test!(|db| async move {
            let event = Event::create(
                &db,
                "user".to_string(),
                "Mum's birthday".to_string(),
                "2024-06-05".to_string(),
                "Flowers".to_string(),
                "None".to_string(),
            )
            .await
            .unwrap();

            let mut updated_event = event.clone();
            updated_event
                .update(
                    &db,
                    PartialEvent {
                        gift_option: Some("Chocolates".to_string()),
                        ..Default::default()
                    },
                )
                .await
                .unwrap();

            let fetched_event = db.fetch_event(&event.id).await.unwrap();
            let by_user = db.fetch_events_by_user("user").await.unwrap();
            let all = db.fetch_all_events().await.unwrap();

            assert_eq!("Flowers", event.gift_option);
            assert_eq!("Chocolates", fetched_event.gift_option);
            assert_eq!(updated_event, fetched_event);
            assert_eq!(vec![fetched_event.clone()], by_user);
            assert_eq!(vec![fetched_event], all);

            event.delete(&db).await.unwrap();
            assert!(db.fetch_event(&event.id).await.is_err());
        });
    }

    #[async_std::test]
    async fn rejects_malformed_date() {
        database_test!(|db| async move {
            let error = Event::create(
                &db,
                "user".to_string(),
                "Anniversary".to_string(),
                "not-a-date".to_string(),
                "Flowers".to_string(),
                "None".to_string(),
            )
            .await
            .unwrap_err();

            assert!(matches!(
                error.error_type,
                ErrorType::InvalidEventDate { .. }
            ));
            assert!(db.fetch_all_events().await.unwrap().is_empty());
        });
    }
}
