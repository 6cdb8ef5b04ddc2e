pub mod catalog;
pub mod demo;
pub mod progress;
pub mod quick;
pub mod stats;
pub mod store;
pub mod tracker;
pub mod validate;
pub mod weekly;
