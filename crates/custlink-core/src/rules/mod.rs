pub mod activity;
pub mod city;

pub use activity::{validate_recency_days, ActivityPolicy, ActivityStatus, MAX_RECENCY_DAYS};
pub use city::{primary_city, CityRule};
