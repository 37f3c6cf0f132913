use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bucketed bureau-score category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreCategory {
    /// 750..=900 — high chance of approval.
    Good,
    /// 600..750 — medium chance, further analysis required.
    Average,
    /// 300..600 — high-risk category.
    Low,
    /// "NA"/"NH" sentinel — no credit history or no recent activity.
    NoHistory,
    /// Out-of-range or non-numeric score.
    Invalid,
}

impl fmt::Display for ScoreCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreCategory::Good => write!(f, "good"),
            ScoreCategory::Average => write!(f, "average"),
            ScoreCategory::Low => write!(f, "low"),
            ScoreCategory::NoHistory => write!(f, "no credit history"),
            ScoreCategory::Invalid => write!(f, "invalid"),
        }
    }
}

/// Utilization level relative to the 30% threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UtilizationBand {
    High,
    Normal,
    NotAvailable,
}

impl fmt::Display for UtilizationBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UtilizationBand::High => write!(f, "high"),
            UtilizationBand::Normal => write!(f, "normal"),
            UtilizationBand::NotAvailable => write!(f, "not available"),
        }
    }
}

/// Utilization of a single facility: percentage plus band. The
/// percentage is absent when the limit is zero or missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilizationReport {
    pub percent: Option<Decimal>,
    pub band: UtilizationBand,
}

/// Inquiry-frequency assessment over the trailing twelve months.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InquiryReport {
    pub recent_count: usize,
    pub pressure: InquiryPressure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InquiryPressure {
    HighCreditHunger,
    Normal,
}

impl fmt::Display for InquiryPressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InquiryPressure::HighCreditHunger => write!(f, "high credit hunger"),
            InquiryPressure::Normal => write!(f, "normal"),
        }
    }
}

/// Per-facility payment-history flag on the 90-day boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DpdFlag {
    Critical,
    Standard,
}

impl fmt::Display for DpdFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DpdFlag::Critical => write!(f, "critical"),
            DpdFlag::Standard => write!(f, "standard"),
        }
    }
}

/// Counts of written-off, settled and disputed facilities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountStatusSummary {
    pub written_off: usize,
    pub settled: usize,
    pub disputed: usize,
}

/// Numeric aggregates over the facility set. Ratios are absent rather
/// than divided-by-zero when their denominator is missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityAggregate {
    pub total_facilities: usize,
    pub overdue_facilities: usize,
    pub closed_facilities: usize,
    pub high_risk_facilities: usize,
    pub total_sanctioned: Decimal,
    pub total_current_balance: Decimal,
    pub total_overdue: Decimal,
    pub mean_days_past_due: Option<Decimal>,
    pub utilization_percent: Option<Decimal>,
}

/// The full derived indicator set for one document run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(flatten)]
    pub aggregate: FacilityAggregate,
    pub score_category: Option<ScoreCategory>,
    pub status_summary: AccountStatusSummary,
    pub mean_credit_age_years: Option<Decimal>,
}
