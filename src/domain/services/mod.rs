pub mod aggregator;
pub mod builder;
pub mod classifier;
pub mod summary;
