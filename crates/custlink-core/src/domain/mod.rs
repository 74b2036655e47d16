pub mod contact;
pub mod order;
pub mod phone;
pub mod profile;

pub use contact::ContactRecord;
pub use order::OrderRecord;
pub use phone::{normalize_phone, PhoneKey, PhoneRule};
pub use profile::{CustomerProfile, SummaryMetrics};
