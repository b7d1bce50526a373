pub mod aggregator;
pub mod charts;
pub mod normalizer;
pub mod popularity;
pub mod recommender;

pub use aggregator::aggregate;
pub use normalizer::{clean_rating_isbn, Normalizer};
pub use popularity::sample_popular;
pub use recommender::recommend;
