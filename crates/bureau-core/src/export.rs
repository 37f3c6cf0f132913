use crate::analysis::indicators::AnalysisResult;
use crate::error::BureauError;
use crate::model::{CreditFacility, SubjectProfile};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One flat logical sheet of the exported workbook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// The spreadsheet-serialization boundary. The workbook layout is fixed
/// here; turning sheets into file bytes (xlsx, ods, ...) is the
/// collaborator's concern.
pub trait SpreadsheetWriter {
    fn write(&self, sheets: &[Sheet]) -> Result<Vec<u8>, BureauError>;

    /// Name of the produced format (for diagnostics and file naming).
    fn format_name(&self) -> &str;
}

/// Build the three fixed logical sheets: profile, facilities, analysis.
/// Absent fields render as empty cells, never placeholder data.
pub fn workbook_sheets(
    profile: &SubjectProfile,
    facilities: &[CreditFacility],
    analysis: &AnalysisResult,
) -> Vec<Sheet> {
    vec![
        profile_sheet(profile),
        facilities_sheet(facilities),
        analysis_sheet(analysis),
    ]
}

fn profile_sheet(profile: &SubjectProfile) -> Sheet {
    let rows = vec![
        kv("name", opt(&profile.name)),
        kv("date_of_birth", opt(&profile.date_of_birth)),
        kv("gender", opt(&profile.gender)),
        kv(
            "score",
            profile
                .score
                .as_ref()
                .map(|s| s.to_string())
                .unwrap_or_default(),
        ),
        kv("tax_id", opt(&profile.tax_id)),
        kv("phones", profile.phones.join("; ")),
        kv("addresses", profile.addresses.join("; ")),
        kv("email", opt(&profile.email)),
        kv("total_accounts", opt_num(&profile.summary.total_accounts)),
        kv(
            "overdue_accounts",
            opt_num(&profile.summary.overdue_accounts),
        ),
        kv(
            "high_credit_total",
            opt_dec(&profile.summary.high_credit_total),
        ),
        kv(
            "current_balance_total",
            opt_dec(&profile.summary.current_balance_total),
        ),
        kv(
            "oldest_account_date",
            opt(&profile.summary.oldest_account_date),
        ),
        kv(
            "recent_account_date",
            opt(&profile.summary.recent_account_date),
        ),
    ];
    Sheet {
        name: "profile".into(),
        headers: vec!["field".into(), "value".into()],
        rows,
    }
}

fn facilities_sheet(facilities: &[CreditFacility]) -> Sheet {
    let headers = vec![
        "holder_name",
        "account_number",
        "facility_type",
        "ownership",
        "opened_date",
        "last_payment_date",
        "closed_date",
        "sanctioned_amount",
        "current_balance",
        "overdue_amount",
        "days_past_due",
        "emi_amount",
        "status",
        "dispute_status",
    ]
    .into_iter()
    .map(String::from)
    .collect();

    let rows = facilities
        .iter()
        .map(|f| {
            vec![
                opt(&f.holder_name),
                opt(&f.account_number),
                opt(&f.facility_type),
                opt(&f.ownership),
                opt(&f.opened_date),
                opt(&f.last_payment_date),
                opt(&f.closed_date),
                opt_dec(&f.sanctioned_amount),
                opt_dec(&f.current_balance),
                opt_dec(&f.overdue_amount),
                opt_num(&f.days_past_due),
                opt_dec(&f.emi_amount),
                opt(&f.status),
                opt(&f.dispute),
            ]
        })
        .collect();

    Sheet {
        name: "facilities".into(),
        headers,
        rows,
    }
}

fn analysis_sheet(analysis: &AnalysisResult) -> Sheet {
    let agg = &analysis.aggregate;
    let rows = vec![
        kv("total_facilities", agg.total_facilities.to_string()),
        kv("overdue_facilities", agg.overdue_facilities.to_string()),
        kv("closed_facilities", agg.closed_facilities.to_string()),
        kv("high_risk_facilities", agg.high_risk_facilities.to_string()),
        kv("total_sanctioned", agg.total_sanctioned.to_string()),
        kv(
            "total_current_balance",
            agg.total_current_balance.to_string(),
        ),
        kv("total_overdue", agg.total_overdue.to_string()),
        kv("mean_days_past_due", opt_dec(&agg.mean_days_past_due)),
        kv("utilization_percent", opt_dec(&agg.utilization_percent)),
        kv(
            "score_category",
            analysis
                .score_category
                .map(|c| c.to_string())
                .unwrap_or_default(),
        ),
        kv("written_off", analysis.status_summary.written_off.to_string()),
        kv("settled", analysis.status_summary.settled.to_string()),
        kv("disputed", analysis.status_summary.disputed.to_string()),
        kv(
            "mean_credit_age_years",
            opt_dec(&analysis.mean_credit_age_years),
        ),
    ];
    Sheet {
        name: "analysis".into(),
        headers: vec!["indicator".into(), "value".into()],
        rows,
    }
}

fn kv(key: &str, value: String) -> Vec<String> {
    vec![key.to_string(), value]
}

fn opt(v: &Option<String>) -> String {
    v.clone().unwrap_or_default()
}

fn opt_dec(v: &Option<Decimal>) -> String {
    v.map(|d| d.to_string()).unwrap_or_default()
}

fn opt_num<T: ToString + Copy>(v: &Option<T>) -> String {
    v.map(|n| n.to_string()).unwrap_or_default()
}
