mod error;
mod requests;
mod types;
mod validation;

pub use error::BetError;
pub use requests::{CreateBetRequest, UpdateBetRequest};
pub use types::{Bet, BetPage, NewBet};
pub use validation::{validate_create_request, validate_update_request};
