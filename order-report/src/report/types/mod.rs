//! Core types for the order report pipeline

pub mod table;
pub mod value;

pub use table::{Row, Table};
pub use value::{DISPLAY_DATE_FORMAT, Value};
