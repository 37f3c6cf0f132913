pub mod engine;
pub mod indicators;

pub use engine::{
    account_status_summary, aggregate, analyze, credit_age, debt_to_income, dpd_flag,
    inquiry_pressure, score_category, utilization_band,
};
pub use indicators::{AnalysisResult, FacilityAggregate, ScoreCategory};
