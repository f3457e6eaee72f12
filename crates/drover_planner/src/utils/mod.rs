pub mod newtype_index;
pub mod occurrences;
pub mod time;
