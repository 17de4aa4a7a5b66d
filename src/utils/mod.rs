pub mod format;
pub mod table;

pub use format::{format_amount, parse_amount};
pub use table::Table;
