pub mod aggregate;
pub mod catalog;
pub mod domain;
pub mod error;
pub mod index;
pub mod matcher;
pub mod row;
pub mod rules;
pub mod time;

pub use aggregate::{aggregate, AggregatePolicy};
pub use catalog::{BuildStats, Catalog, CatalogOptions, SharedCatalog};
pub use domain::*;
pub use error::{CoreError, MissingSide};
pub use index::{build_index, PhoneField, PhoneIndex};
pub use matcher::{matched_keys, MatchOrder};
pub use row::{OrderColumns, RawRow, SdrColumns};
pub use rules::*;
