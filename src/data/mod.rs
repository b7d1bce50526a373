pub mod catalog;
pub mod loader;
pub mod tables;

pub use catalog::Catalog;
pub use tables::{BookTable, RatingTable};
