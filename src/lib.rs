pub mod analyzer;
pub mod api;
pub mod classifier;
pub mod engine;
pub mod scrubber;
pub mod table;
pub mod types;

pub use engine::analyze_and_clean;
pub use types::{
    Analysis, Category, Confidence, DetectedWatermark, ScrubResult, ScrubStats,
};
