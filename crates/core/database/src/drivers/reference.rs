use std::{collections::HashMap, sync::Arc};

use futures::lock::Mutex;

use crate::{Event, PaymentMethod, ServedEvent, User};

database_derived!(
    /// Reference implementation
    #[derive(Default)]
    pub struct ReferenceDb {
        pub events: Arc<Mutex<HashMap<String, Event>>>,
        pub served_events: Arc<Mutex<HashMap<String, ServedEvent>>>,
        pub users: Arc<Mutex<HashMap<String, User>>>,
        pub payment_methods: Arc<Mutex<HashMap<String, PaymentMethod>>>,
    }
);
