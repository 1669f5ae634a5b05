pub mod bson_datetime;
