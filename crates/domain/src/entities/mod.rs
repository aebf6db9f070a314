//! Domain entities - Core business objects with identity

mod corruption_tracker;

pub use corruption_tracker::{
    CorruptionTracker, THRESHOLD_25, THRESHOLD_50, THRESHOLD_75,
};
