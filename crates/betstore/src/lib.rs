//! Versioned bet records over a DynamoDB-style key-value table.
//!
//! [`BetStore`] implements [`BetRepository`] on top of any [`KeyValueTable`].
//! Every write is conditional, so concurrent callers coordinate through the
//! table alone: creates never overwrite, updates apply only at the expected
//! version, and deletes report the record they removed.

pub mod backend;
pub mod config;
pub mod store;

pub use backend::{DynamoDbTable, InMemoryTable, KeyValueTable};
pub use betstore_core::bet::{Bet, BetPage, CreateBetRequest, UpdateBetRequest};
pub use betstore_core::storage::{BetRepository, ErrorMessage, RepositoryError};
pub use config::Config;
pub use store::BetStore;
