//! Text utilities shared by every extraction strategy.

pub mod locale;
pub mod position;

pub use locale::{normalize_amount, round_amount, DEFAULT_AMOUNT};
pub use position::{first_match, first_match_or, monetary_match, value_below};
