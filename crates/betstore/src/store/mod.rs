//! Bet record store.
//!
//! Turns bet operations into conditional, versioned writes against a
//! [`KeyValueTable`](crate::backend::KeyValueTable).

mod conversions;
mod keys;
mod repository;

pub use conversions::{bet_to_item, item_to_bet};
pub use keys::{BET_ID, CUSTOMER_ID, POST_TAX_AMOUNT, PRE_TAX_AMOUNT, VERSION};
pub use repository::{BetStore, DEFAULT_MAX_CREATE_ATTEMPTS, DEFAULT_PAGE_SIZE};
