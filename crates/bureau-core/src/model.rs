use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A subject-level bureau score: either a numeric score or a sentinel
/// meaning the subject has no credit history ("NA" / "NH" in reports).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BureauScore {
    Value(i64),
    NoHistory,
}

impl BureauScore {
    /// Parse a raw score capture. Empty input is absence, "NA"/"NH" is the
    /// no-history sentinel, anything else must be an integer.
    pub fn from_str_loose(s: &str) -> Option<BureauScore> {
        let t = s.trim().to_uppercase();
        if t.is_empty() {
            return None;
        }
        if t == "NA" || t == "NH" {
            return Some(BureauScore::NoHistory);
        }
        t.parse::<i64>().ok().map(BureauScore::Value)
    }
}

impl fmt::Display for BureauScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BureauScore::Value(v) => write!(f, "{v}"),
            BureauScore::NoHistory => write!(f, "NH"),
        }
    }
}

/// Portfolio-level counters summarizing the subject's accounts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total_accounts: Option<u32>,
    pub overdue_accounts: Option<u32>,
    pub high_credit_total: Option<Decimal>,
    pub current_balance_total: Option<Decimal>,
    pub oldest_account_date: Option<String>,
    pub recent_account_date: Option<String>,
}

impl PortfolioSummary {
    pub fn is_empty(&self) -> bool {
        self.total_accounts.is_none()
            && self.overdue_accounts.is_none()
            && self.high_credit_total.is_none()
            && self.current_balance_total.is_none()
            && self.oldest_account_date.is_none()
            && self.recent_account_date.is_none()
    }
}

/// The single subject-level record for a document.
///
/// Every field is optional: absence means the report did not carry the
/// field, and is never papered over with placeholder data. Multi-valued
/// fields (phones, addresses) accumulate in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubjectProfile {
    pub name: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub score: Option<BureauScore>,
    pub tax_id: Option<String>,
    pub phones: Vec<String>,
    pub addresses: Vec<String>,
    pub email: Option<String>,
    pub summary: PortfolioSummary,
}

/// One credit account / loan line reported for the subject.
///
/// Numeric fields are either a parsed non-negative number or absent;
/// an unparseable capture never survives into this type. Dates keep the
/// raw report string (formats vary across revisions); `opened()` gives
/// the coerced date where the string is parseable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreditFacility {
    pub holder_name: Option<String>,
    pub account_number: Option<String>,
    pub facility_type: Option<String>,
    pub ownership: Option<String>,
    pub opened_date: Option<String>,
    pub last_payment_date: Option<String>,
    pub closed_date: Option<String>,
    pub sanctioned_amount: Option<Decimal>,
    pub current_balance: Option<Decimal>,
    pub overdue_amount: Option<Decimal>,
    pub days_past_due: Option<u32>,
    pub emi_amount: Option<Decimal>,
    pub status: Option<String>,
    pub dispute: Option<String>,
}

impl CreditFacility {
    pub fn is_empty(&self) -> bool {
        self.holder_name.is_none()
            && self.account_number.is_none()
            && self.facility_type.is_none()
            && self.ownership.is_none()
            && self.opened_date.is_none()
            && self.last_payment_date.is_none()
            && self.closed_date.is_none()
            && self.sanctioned_amount.is_none()
            && self.current_balance.is_none()
            && self.overdue_amount.is_none()
            && self.days_past_due.is_none()
            && self.emi_amount.is_none()
            && self.status.is_none()
            && self.dispute.is_none()
    }

    /// A facility counts as closed when the report carries a closure date
    /// or the status text says so.
    pub fn is_closed(&self) -> bool {
        if self.closed_date.is_some() {
            return true;
        }
        self.status
            .as_deref()
            .map(|s| s.to_uppercase().contains("CLOSED"))
            .unwrap_or(false)
    }

    /// Opened date coerced to a calendar date, where the raw string parses.
    pub fn opened(&self) -> Option<NaiveDate> {
        self.opened_date
            .as_deref()
            .and_then(crate::parsing::normalize::parse_report_date)
    }
}
