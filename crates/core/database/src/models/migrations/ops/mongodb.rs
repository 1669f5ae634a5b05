use mongodb::bson::doc;
use mongodb::IndexModel;

use crate::MongoDb;

use super::AbstractMigrations;

#[async_trait]
impl AbstractMigrations for MongoDb {
    #[cfg(test)]
    /// Drop the database
    async fn drop_database(&self) {
        self.db().drop().await.ok();
    }

    /// Migrate the database
    async fn migrate_database(&self) -> Result<(), ()> {
        info!("Migrating the database.");

        // The trailing-window lookup ranges and sorts on served_at.
        self.col::<bson::Document>("events_served")
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "served_at": -1 })
                    .build(),
            )
            .await
            .map_err(|_| ())?;

        self.col::<bson::Document>("events")
            .create_index(IndexModel::builder().keys(doc! { "user_id": 1 }).build())
            .await
            .map_err(|_| ())?;

        self.col::<bson::Document>("payment_methods")
            .create_index(IndexModel::builder().keys(doc! { "user_id": 1 }).build())
            .await
            .map_err(|_| ())?;

        Ok(())
    }
}
