//! Short, human-readable record identifiers.
//!
//! An id is a type prefix followed by a random integer in
//! `[10_000, 910_000)`. Ids are only probably unique; nothing checks for
//! collisions.

use rand::Rng;

pub const USER_PREFIX: &str = "U";
pub const WISHLIST_PREFIX: &str = "W";
pub const ORDER_PREFIX: &str = "O";
pub const REVIEW_PREFIX: &str = "R";
pub const REPORT_PREFIX: &str = "RPT";

const ID_RANGE: std::ops::Range<u32> = 10_000..910_000;

pub fn create_id(prefix: &str) -> String {
    let number: u32 = rand::rng().random_range(ID_RANGE);
    format!("{prefix}{number}")
}
