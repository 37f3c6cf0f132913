use crate::analysis::indicators::{
    AccountStatusSummary, AnalysisResult, DpdFlag, FacilityAggregate, InquiryPressure,
    InquiryReport, ScoreCategory, UtilizationBand, UtilizationReport,
};
use crate::model::{BureauScore, CreditFacility, SubjectProfile};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// DPD above which a facility counts toward the high-risk aggregate.
pub const HIGH_RISK_DPD: u32 = 30;

/// DPD above which the per-facility payment flag turns critical.
pub const CRITICAL_DPD: u32 = 90;

/// Utilization percentage above which the band is High.
pub const HIGH_UTILIZATION_PCT: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

/// Recent-inquiry count above which the subject shows credit hunger.
pub const INQUIRY_PRESSURE_LIMIT: usize = 3;

/// Bucket a bureau score. Sentinels map to NoHistory; anything outside
/// the 300..=900 score range reports Invalid rather than panicking.
pub fn score_category(score: &BureauScore) -> ScoreCategory {
    match score {
        BureauScore::NoHistory => ScoreCategory::NoHistory,
        BureauScore::Value(v) => match v {
            750..=900 => ScoreCategory::Good,
            600..=749 => ScoreCategory::Average,
            300..=599 => ScoreCategory::Low,
            _ => ScoreCategory::Invalid,
        },
    }
}

/// Aggregate indicators over the facility set.
///
/// Tolerant of partial input: facilities missing a numeric field simply
/// do not contribute to that sum, and ratios with a zero denominator
/// are reported absent. Never fails, including on an empty set.
pub fn aggregate(facilities: &[CreditFacility]) -> FacilityAggregate {
    let total_facilities = facilities.len();

    let overdue_facilities = facilities
        .iter()
        .filter(|f| f.overdue_amount.map(|a| a > Decimal::ZERO).unwrap_or(false))
        .count();

    let closed_facilities = facilities.iter().filter(|f| f.is_closed()).count();

    let high_risk_facilities = facilities
        .iter()
        .filter(|f| f.days_past_due.map(|d| d > HIGH_RISK_DPD).unwrap_or(false))
        .count();

    let total_sanctioned: Decimal = facilities
        .iter()
        .filter_map(|f| f.sanctioned_amount)
        .sum();
    let total_current_balance: Decimal =
        facilities.iter().filter_map(|f| f.current_balance).sum();
    let total_overdue: Decimal = facilities.iter().filter_map(|f| f.overdue_amount).sum();

    let dpd_values: Vec<u32> = facilities.iter().filter_map(|f| f.days_past_due).collect();
    let mean_days_past_due = if dpd_values.is_empty() {
        None
    } else {
        let sum: u64 = dpd_values.iter().map(|&d| u64::from(d)).sum();
        Some((Decimal::from(sum) / Decimal::from(dpd_values.len())).round_dp(2))
    };

    let utilization_percent = if total_sanctioned > Decimal::ZERO {
        Some(
            (total_current_balance / total_sanctioned * Decimal::ONE_HUNDRED).round_dp(2),
        )
    } else {
        None
    };

    FacilityAggregate {
        total_facilities,
        overdue_facilities,
        closed_facilities,
        high_risk_facilities,
        total_sanctioned,
        total_current_balance,
        total_overdue,
        mean_days_past_due,
        utilization_percent,
    }
}

/// Utilization of one facility against its sanctioned limit. A zero or
/// negative limit reports NotAvailable instead of dividing.
pub fn utilization_band(balance: Decimal, limit: Decimal) -> UtilizationReport {
    if limit <= Decimal::ZERO {
        return UtilizationReport {
            percent: None,
            band: UtilizationBand::NotAvailable,
        };
    }
    let percent = (balance / limit * Decimal::ONE_HUNDRED).round_dp(2);
    let band = if percent > HIGH_UTILIZATION_PCT {
        UtilizationBand::High
    } else {
        UtilizationBand::Normal
    };
    UtilizationReport {
        percent: Some(percent),
        band,
    }
}

/// Count inquiries within the trailing twelve months of `as_of`. More
/// than three recent inquiries signals credit hunger.
pub fn inquiry_pressure(inquiry_dates: &[NaiveDate], as_of: NaiveDate) -> InquiryReport {
    let cutoff = as_of - chrono::Months::new(12);
    let recent_count = inquiry_dates
        .iter()
        .filter(|&&d| d > cutoff && d <= as_of)
        .count();
    let pressure = if recent_count > INQUIRY_PRESSURE_LIMIT {
        InquiryPressure::HighCreditHunger
    } else {
        InquiryPressure::Normal
    };
    InquiryReport {
        recent_count,
        pressure,
    }
}

/// Mean account age in years across the provided opening dates,
/// relative to `as_of`. Empty input reports absence.
pub fn credit_age(open_dates: &[NaiveDate], as_of: NaiveDate) -> Option<Decimal> {
    if open_dates.is_empty() {
        return None;
    }
    let total_days: i64 = open_dates
        .iter()
        .map(|d| (as_of - *d).num_days())
        .sum();
    let mean_days = Decimal::from(total_days) / Decimal::from(open_dates.len());
    Some((mean_days / Decimal::from(365)).round_dp(2))
}

/// Debt-to-income ratio. Zero or missing income reports absence rather
/// than dividing by zero.
pub fn debt_to_income(income: Decimal, liabilities: Decimal) -> Option<Decimal> {
    if income <= Decimal::ZERO {
        return None;
    }
    Some((liabilities / income).round_dp(2))
}

/// Per-facility payment-history flag.
pub fn dpd_flag(days_past_due: u32) -> DpdFlag {
    if days_past_due > CRITICAL_DPD {
        DpdFlag::Critical
    } else {
        DpdFlag::Standard
    }
}

/// Count written-off, settled and disputed facilities from status and
/// dispute markers.
pub fn account_status_summary(facilities: &[CreditFacility]) -> AccountStatusSummary {
    let mut summary = AccountStatusSummary::default();
    for f in facilities {
        if let Some(status) = f.status.as_deref() {
            let upper = status.to_uppercase();
            if upper.contains("WRITTEN-OFF") || upper.contains("WRITTEN OFF") {
                summary.written_off += 1;
            }
            if upper.contains("SETTLED") {
                summary.settled += 1;
            }
        }
        if f.dispute
            .as_deref()
            .map(|d| d.to_uppercase().contains("DISPUTE"))
            .unwrap_or(false)
        {
            summary.disputed += 1;
        }
    }
    summary
}

/// Derive the full indicator set for one document run.
pub fn analyze(
    profile: &SubjectProfile,
    facilities: &[CreditFacility],
    as_of: NaiveDate,
) -> AnalysisResult {
    let open_dates: Vec<NaiveDate> = facilities.iter().filter_map(|f| f.opened()).collect();

    AnalysisResult {
        aggregate: aggregate(facilities),
        score_category: profile.score.as_ref().map(score_category),
        status_summary: account_status_summary(facilities),
        mean_credit_age_years: credit_age(&open_dates, as_of),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn facility(
        sanctioned: Option<Decimal>,
        balance: Option<Decimal>,
        overdue: Option<Decimal>,
        dpd: Option<u32>,
    ) -> CreditFacility {
        CreditFacility {
            sanctioned_amount: sanctioned,
            current_balance: balance,
            overdue_amount: overdue,
            days_past_due: dpd,
            ..Default::default()
        }
    }

    #[test]
    fn score_buckets() {
        assert_eq!(
            score_category(&BureauScore::NoHistory),
            ScoreCategory::NoHistory
        );
        assert_eq!(score_category(&BureauScore::Value(800)), ScoreCategory::Good);
        assert_eq!(
            score_category(&BureauScore::Value(750)),
            ScoreCategory::Good
        );
        assert_eq!(
            score_category(&BureauScore::Value(650)),
            ScoreCategory::Average
        );
        assert_eq!(score_category(&BureauScore::Value(400)), ScoreCategory::Low);
        assert_eq!(
            score_category(&BureauScore::Value(999)),
            ScoreCategory::Invalid
        );
        assert_eq!(
            score_category(&BureauScore::Value(299)),
            ScoreCategory::Invalid
        );
    }

    #[test]
    fn aggregate_empty_set_never_fails() {
        let agg = aggregate(&[]);
        assert_eq!(agg.total_facilities, 0);
        assert_eq!(agg.overdue_facilities, 0);
        assert_eq!(agg.closed_facilities, 0);
        assert_eq!(agg.total_sanctioned, Decimal::ZERO);
        assert_eq!(agg.utilization_percent, None);
        assert_eq!(agg.mean_days_past_due, None);
    }

    #[test]
    fn aggregate_sums_and_utilization() {
        let facilities = vec![
            facility(Some(dec!(10000)), Some(dec!(5000)), Some(dec!(0)), Some(0)),
            facility(Some(dec!(20000)), Some(dec!(5000)), Some(dec!(1200)), Some(45)),
        ];
        let agg = aggregate(&facilities);
        assert_eq!(agg.total_facilities, 2);
        assert_eq!(agg.overdue_facilities, 1);
        assert_eq!(agg.high_risk_facilities, 1);
        assert_eq!(agg.total_sanctioned, dec!(30000));
        assert_eq!(agg.total_current_balance, dec!(10000));
        assert_eq!(agg.total_overdue, dec!(1200));
        assert_eq!(agg.utilization_percent, Some(dec!(33.33)));
        assert_eq!(agg.mean_days_past_due, Some(dec!(22.50)));
    }

    #[test]
    fn aggregate_partial_fields_degrade() {
        let facilities = vec![
            facility(None, Some(dec!(5000)), None, None),
            facility(None, None, None, Some(10)),
        ];
        let agg = aggregate(&facilities);
        assert_eq!(agg.total_sanctioned, Decimal::ZERO);
        assert_eq!(agg.utilization_percent, None);
        assert_eq!(agg.mean_days_past_due, Some(dec!(10)));
    }

    #[test]
    fn utilization_bands() {
        let r = utilization_band(dec!(30000), dec!(100000));
        assert_eq!(r.percent, Some(dec!(30.00)));
        assert_eq!(r.band, UtilizationBand::Normal);

        let r = utilization_band(dec!(40000), dec!(100000));
        assert_eq!(r.percent, Some(dec!(40.00)));
        assert_eq!(r.band, UtilizationBand::High);

        let r = utilization_band(dec!(40000), Decimal::ZERO);
        assert_eq!(r.percent, None);
        assert_eq!(r.band, UtilizationBand::NotAvailable);
    }

    #[test]
    fn inquiry_pressure_boundary() {
        let as_of = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let recent = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let old = NaiveDate::from_ymd_opt(2022, 1, 15).unwrap();

        let r = inquiry_pressure(&[recent, recent, recent, old], as_of);
        assert_eq!(r.recent_count, 3);
        assert_eq!(r.pressure, InquiryPressure::Normal);

        let r = inquiry_pressure(&[recent, recent, recent, recent], as_of);
        assert_eq!(r.recent_count, 4);
        assert_eq!(r.pressure, InquiryPressure::HighCreditHunger);
    }

    #[test]
    fn credit_age_mean_years() {
        let as_of = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let d1 = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
        let age = credit_age(&[d1, d2], as_of).unwrap();
        assert!(age > dec!(2.9) && age < dec!(3.1));

        assert_eq!(credit_age(&[], as_of), None);
    }

    #[test]
    fn debt_to_income_zero_income_absent() {
        assert_eq!(debt_to_income(Decimal::ZERO, dec!(5000)), None);
        assert_eq!(debt_to_income(dec!(10000), dec!(2500)), Some(dec!(0.25)));
    }

    #[test]
    fn dpd_flag_boundary() {
        assert_eq!(dpd_flag(90), DpdFlag::Standard);
        assert_eq!(dpd_flag(91), DpdFlag::Critical);
        assert_eq!(dpd_flag(0), DpdFlag::Standard);
    }

    #[test]
    fn status_summary_counts() {
        let facilities = vec![
            CreditFacility {
                status: Some("Written-Off".into()),
                ..Default::default()
            },
            CreditFacility {
                status: Some("Settled".into()),
                dispute: Some("Dispute".into()),
                ..Default::default()
            },
        ];
        let s = account_status_summary(&facilities);
        assert_eq!(s.written_off, 1);
        assert_eq!(s.settled, 1);
        assert_eq!(s.disputed, 1);
    }

    #[test]
    fn analyze_composes_profile_and_facilities() {
        let profile = SubjectProfile {
            score: Some(BureauScore::Value(782)),
            ..Default::default()
        };
        let facilities = vec![CreditFacility {
            opened_date: Some("01-01-2020".into()),
            sanctioned_amount: Some(dec!(10000)),
            current_balance: Some(dec!(2000)),
            ..Default::default()
        }];
        let as_of = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let result = analyze(&profile, &facilities, as_of);
        assert_eq!(result.score_category, Some(ScoreCategory::Good));
        assert_eq!(result.aggregate.utilization_percent, Some(dec!(20.00)));
        assert!(result.mean_credit_age_years.is_some());
    }
}
