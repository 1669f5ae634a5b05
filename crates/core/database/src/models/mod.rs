mod events;
mod migrations;
mod payment_methods;
mod served_events;
mod users;

pub use events::*;
pub use migrations::*;
pub use payment_methods::*;
pub use served_events::*;
pub use users::*;

#[cfg(feature = "mongodb")]
use crate::MongoDb;
use crate::{Database, ReferenceDb};

pub trait AbstractDatabase:
    Sync
    + Send
    + events::AbstractEvents
    + migrations::AbstractMigrations
    + payment_methods::AbstractPaymentMethods
    + served_events::AbstractServedEvents
    + users::AbstractUsers
{
}

impl AbstractDatabase for ReferenceDb {}
#[cfg(feature = "mongodb")]
impl AbstractDatabase for MongoDb {}

impl std::ops::Deref for Database {
    type Target = dyn AbstractDatabase;

    fn deref(&self) -> &Self::Target {
        match &self {
            Database::Reference(dummy) => dummy,
            #[cfg(feature = "mongodb")]
            Database::MongoDb(mongo) => mongo,
        }
    }
}
