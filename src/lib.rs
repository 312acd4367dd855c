pub mod architecture;
pub mod config;
pub mod entity;
pub mod error;
pub mod index;
pub mod parse;
pub mod query;
pub mod read;
pub mod record;

pub use architecture::Architecture;
pub use config::IndexOptions;
pub use entity::Entity;
pub use error::{Error, Result};
pub use index::{index, Indexer};
pub use query::{Criteria, Criterion};
pub use record::{Entities, EntityRecord, ErrorRecord, ParseFailure};
