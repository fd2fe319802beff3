//! Local-time stamps in the `en-US` style the storefront pages display.

use chrono::Local;

/// Date and time, e.g. `3/14/2024, 2:05:09 PM`. Used for orders and reports.
pub fn timestamp() -> String {
    Local::now().format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

/// Date only, e.g. `3/14/2024`. Used for reviews.
pub fn datestamp() -> String {
    Local::now().format("%-m/%-d/%Y").to_string()
}
