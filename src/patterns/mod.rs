pub mod error;
pub mod extract;
pub mod miner;
pub mod ranking;

pub use error::PatternError;
pub use miner::{PatternMiner, SeriesMap};
