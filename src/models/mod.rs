pub mod config;
pub mod habit;
pub mod record;

pub use habit::{HabitConfig, HabitType};
pub use record::{DateKey, FieldValue, Fields, Record};
