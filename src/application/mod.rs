pub mod rollout;

pub use rollout::{
    DimensionSummary, RolloutConfig, RolloutError, RolloutReport, RolloutRunner, StepRecord,
};
