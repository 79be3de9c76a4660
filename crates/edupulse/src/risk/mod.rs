//! Deterministic risk scoring: assessment, recommendations and cohort distribution.

pub mod diversity;
pub mod domain;
mod engine;
pub mod recommendations;

pub use diversity::{diversity, RiskDistribution, TierShare};
pub use domain::{
    FactorKind, FactorStatus, MetricsError, MetricsRecord, RiskAssessment, RiskFactor, RiskTier,
    RiskTrend, StudentId, DEFAULT_TEST_SCORE,
};
pub use engine::assess;
pub use recommendations::recommend;
