//! Event Recurrence Processor
//!
//! Copies events whose annual recurrence is coming up into the serving
//! history, without duplicating entries already served within the trailing
//! window. Invoked from the admin console's "process" action; there is no
//! background scheduler.

use std::collections::HashSet;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use futures::future::try_join_all;
use futures::lock::Mutex;
use once_cell::sync::Lazy;

use giftwise_result::Result;

use crate::{Database, Event, ServedEvent};

/// Size of both the forward (upcoming) and trailing (de-duplication) windows,
/// in days, inclusive on both ends
pub const WINDOW_DAYS: i64 = 10;

// Two overlapping runs could both select the same upcoming event before
// either has written its served copy; serialise runs instead.
static PROCESS_GUARD: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

auto_derived!(
    /// Outcome of a processor run, rendered directly by the console
    pub struct ProcessSummary {
        /// Serving-history entries created by this run
        pub copied_events: Vec<ServedEvent>,

        /// How many events were considered upcoming
        pub total_upcoming: usize,

        /// How many serving-history entries were found inside the trailing
        /// window; zero when the lookup degraded
        pub recently_served: usize,
    }
);

/// Result of the recently-served lookup.
///
/// A failed lookup degrades to the empty set rather than aborting the run:
/// the processor prefers risking a duplicate copy over serving nothing.
#[derive(Debug)]
pub enum RecentlyServed {
    Fetched(Vec<ServedEvent>),
    Unavailable,
}

impl RecentlyServed {
    pub fn from_query(result: Result<Vec<ServedEvent>>) -> Self {
        match result {
            Ok(served) => RecentlyServed::Fetched(served),
            Err(error) => {
                warn!(
                    "Recently-served lookup failed, continuing without de-duplication: {error}"
                );
                RecentlyServed::Unavailable
            }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            RecentlyServed::Fetched(served) => served.len(),
            RecentlyServed::Unavailable => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// De-duplication index keyed by original event id and month-day
    fn dedupe_index(&self) -> HashSet<String> {
        let RecentlyServed::Fetched(served) = self else {
            return HashSet::new();
        };

        served
            .iter()
            .filter_map(|entry| {
                parse_event_date(&entry.date_served_as)
                    .map(|date| recurrence_key(&entry.original_event_id, date))
            })
            .collect()
    }
}

fn parse_event_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

fn recurrence_key(id: &str, date: NaiveDate) -> String {
    format!("{}-{}-{}", id, date.month(), date.day())
}

/// Select the events whose annual recurrence lands within `[0, WINDOW_DAYS]`
/// days ahead of `now`, re-anchoring each event's month-day into the current
/// year.
///
/// A recurrence crossing the year boundary (`now` in late December, event in
/// early January) re-anchors to a date before `now` and is excluded; see
/// `excludes_recurrence_across_year_boundary`.
pub fn select_upcoming(now: DateTime<Utc>, events: Vec<Event>) -> Vec<Event> {
    let today = now.date_naive();

    events
        .into_iter()
        .filter(|event| {
            let Some(date) = parse_event_date(&event.date) else {
                warn!("Invalid date for event {}: {}", event.id, event.date);
                return false;
            };

            let Some(this_year) = NaiveDate::from_ymd_opt(today.year(), date.month(), date.day())
            else {
                // Feb 29 in a non-leap year
                warn!(
                    "Date {} for event {} does not exist in {}",
                    event.date,
                    event.id,
                    today.year()
                );
                return false;
            };

            let days_diff = (this_year - today).num_days();
            (0..=WINDOW_DAYS).contains(&days_diff)
        })
        .collect()
}

/// Copy upcoming events into the serving history, skipping events already
/// served for the same month-day within the trailing window.
///
/// Writes fan out concurrently and any failure aborts the run without rolling
/// back entries already written; the next run's lookup treats those as served,
/// so retrying is safe.
pub async fn process_events(db: &Database, now: DateTime<Utc>) -> Result<ProcessSummary> {
    let _guard = PROCESS_GUARD.lock().await;

    let upcoming = select_upcoming(now, db.fetch_all_events().await?);

    let recently_served = RecentlyServed::from_query(
        db.fetch_recently_served_events(now - Duration::days(WINDOW_DAYS))
            .await,
    );
    let index = recently_served.dedupe_index();

    let copies: Vec<ServedEvent> = upcoming
        .iter()
        .filter(|event| {
            parse_event_date(&event.date)
                .map(|date| !index.contains(&recurrence_key(&event.id, date)))
                .unwrap_or(false)
        })
        .map(|event| ServedEvent::copy_of(event, now))
        .collect();

    try_join_all(copies.iter().map(|served| db.insert_served_event(served))).await?;

    info!(
        "Copied {} new events to the serving history ({} upcoming, {} served recently).",
        copies.len(),
        upcoming.len(),
        recently_served.len()
    );

    Ok(ProcessSummary {
        total_upcoming: upcoming.len(),
        recently_served: recently_served.len(),
        copied_events: copies,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::{DateTime, Duration, TimeZone, Utc};

    use crate::processor::{process_events, select_upcoming, RecentlyServed};
    use crate::{Event, ServedEvent};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn event(id: &str, date: &str) -> Event {
        Event {
            id: id.to_string(),
            user_id: "user".to_string(),
            name: format!("Reminder {id}"),
            date: date.to_string(),
            gift_option: "Flowers".to_string(),
            subscription: "None".to_string(),
        }
    }

    fn selected_ids(events: Vec<Event>) -> Vec<String> {
        events.into_iter().map(|event| event.id).collect()
    }

    #[test]
    fn window_is_inclusive_on_both_ends() {
        let events = vec![
            event("today", "2024-06-01"),
            event("tenth", "2024-06-11"),
            event("eleventh", "2024-06-12"),
            event("yesterday", "2024-05-31"),
        ];

        assert_eq!(
            vec!["today".to_string(), "tenth".to_string()],
            selected_ids(select_upcoming(now(), events))
        );
    }

    #[test]
    fn reanchors_stored_year_to_current_year() {
        let events = vec![event("c", "2023-06-10"), event("old", "1998-06-20")];

        // 2023-06-10 is 9 days ahead once re-anchored to 2024
        assert_eq!(
            vec!["c".to_string()],
            selected_ids(select_upcoming(now(), events))
        );
    }

    #[test]
    fn skips_unparsable_dates() {
        let events = vec![
            event("bad", "not-a-date"),
            event("worse", "2024-13-40"),
            event("good", "2024-06-05"),
        ];

        assert_eq!(
            vec!["good".to_string()],
            selected_ids(select_upcoming(now(), events))
        );
    }

    #[test]
    fn excludes_recurrence_across_year_boundary() {
        // Re-anchoring 01-03 into the current year puts it before "now", so a
        // genuinely upcoming January recurrence is not selected. Faithful to
        // the original behaviour; changing it needs signoff.
        let december = Utc.with_ymd_and_hms(2024, 12, 28, 12, 0, 0).unwrap();
        let events = vec![event("jan", "2024-01-03")];

        assert!(select_upcoming(december, events).is_empty());
    }

    #[test]
    fn failed_lookup_degrades_to_empty_set() {
        let lookup = RecentlyServed::from_query(Err(create_error!(InternalError)));

        assert!(lookup.is_empty());
        assert_eq!(0, lookup.len());
        assert!(matches!(lookup, RecentlyServed::Unavailable));

        // An empty index suppresses nothing, so every upcoming event is copied
        assert!(lookup.dedupe_index().is_empty());
    }

    #[async_std::test]
    async fn copies_upcoming_events() {
        database_test!(|db| async move {
            for event in [
                event("a", "2024-06-05"),
                event("b", "2024-06-15"),
                event("c", "2023-06-10"),
            ] {
                db.insert_event(&event).await.unwrap();
            }

            let summary = process_events(&db, now()).await.unwrap();

            assert_eq!(2, summary.total_upcoming);
            assert_eq!(0, summary.recently_served);

            let copied = summary
                .copied_events
                .iter()
                .map(|served| served.original_event_id.to_string())
                .collect::<HashSet<String>>();
            assert_eq!(
                HashSet::from(["a".to_string(), "c".to_string()]),
                copied
            );

            let history = db.fetch_all_served_events(100).await.unwrap();
            assert_eq!(2, history.len());
            for served in history {
                assert_eq!(now(), served.served_at);
                assert_eq!("2024-06-01", served.served_for_date);
                assert_eq!(
                    db.fetch_event(&served.original_event_id)
                        .await
                        .unwrap()
                        .date,
                    served.date_served_as
                );
            }
        });
    }

    #[async_std::test]
    async fn skips_events_served_within_trailing_window() {
        database_test!(|db| async move {
            for event in [
                event("a", "2024-06-05"),
                event("b", "2024-06-15"),
                event("c", "2023-06-10"),
            ] {
                db.insert_event(&event).await.unwrap();
            }

            let prior = ServedEvent::copy_of(
                &event("a", "2024-06-05"),
                now() - Duration::days(2),
            );
            db.insert_served_event(&prior).await.unwrap();

            let summary = process_events(&db, now()).await.unwrap();

            assert_eq!(2, summary.total_upcoming);
            assert_eq!(1, summary.recently_served);
            assert_eq!(1, summary.copied_events.len());
            assert_eq!("c", summary.copied_events[0].original_event_id);
        });
    }

    #[async_std::test]
    async fn second_run_copies_nothing() {
        database_test!(|db| async move {
            db.insert_event(&event("a", "2024-06-05")).await.unwrap();
            db.insert_event(&event("c", "2023-06-10")).await.unwrap();

            let first = process_events(&db, now()).await.unwrap();
            assert_eq!(2, first.copied_events.len());

            let second = process_events(&db, now()).await.unwrap();
            assert!(second.copied_events.is_empty());
            assert_eq!(2, second.total_upcoming);
            assert_eq!(2, second.recently_served);

            assert_eq!(2, db.fetch_all_served_events(100).await.unwrap().len());
        });
    }

    #[async_std::test]
    async fn same_month_day_on_distinct_events_does_not_collide() {
        database_test!(|db| async move {
            db.insert_event(&event("x", "2024-06-05")).await.unwrap();
            db.insert_event(&event("y", "2025-06-05")).await.unwrap();

            let prior = ServedEvent::copy_of(
                &event("x", "2024-06-05"),
                now() - Duration::days(3),
            );
            db.insert_served_event(&prior).await.unwrap();

            let summary = process_events(&db, now()).await.unwrap();

            // Only x is suppressed; y shares the month-day but not the id
            assert_eq!(1, summary.copied_events.len());
            assert_eq!("y", summary.copied_events[0].original_event_id);
        });
    }

    #[async_std::test]
    async fn served_entries_outside_window_do_not_suppress() {
        database_test!(|db| async move {
            db.insert_event(&event("a", "2024-06-05")).await.unwrap();

            let stale = ServedEvent::copy_of(
                &event("a", "2024-06-05"),
                now() - Duration::days(15),
            );
            db.insert_served_event(&stale).await.unwrap();

            let summary = process_events(&db, now()).await.unwrap();

            assert_eq!(0, summary.recently_served);
            assert_eq!(1, summary.copied_events.len());
            assert_eq!("a", summary.copied_events[0].original_event_id);
        });
    }
}
