use crate::model::{BureauScore, CreditFacility, SubjectProfile};
use crate::parsing::{FacilityCandidate, ParseWarning, ProfileObservation};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Coerce an amount capture to a non-negative decimal.
///
/// Strips currency markers and both western (1,234,567) and Indian
/// (12,34,567) digit grouping. Parse failure is absence, never an error:
/// downstream aggregation must degrade gracefully.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let mut s = raw.trim().to_uppercase();
    for marker in ["₹", "RS.", "RS", "INR", "/-"] {
        s = s.replace(marker, "");
    }
    let cleaned: String = s
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    let value = Decimal::from_str(&cleaned).ok()?;
    if value.is_sign_negative() {
        None
    } else {
        Some(value)
    }
}

/// Coerce a days-past-due capture.
///
/// Reports use payment-grid codes alongside plain day counts: "STD"
/// (standard, paid on time) reads as 0, "XXX" (not reported) as absent.
pub fn parse_days(raw: &str) -> Option<u32> {
    let s = raw.trim().to_uppercase();
    if s.is_empty() || s == "XXX" || s == "NA" || s == "-" {
        return None;
    }
    if s == "STD" {
        return Some(0);
    }
    let s = s.trim_end_matches("DAYS").trim();
    s.replace(',', "").parse::<u32>().ok()
}

/// Coerce an account-count capture.
pub fn parse_count(raw: &str) -> Option<u32> {
    raw.trim().replace(',', "").parse::<u32>().ok()
}

/// Parse a report date string in the formats seen across revisions.
pub fn parse_report_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    for fmt in ["%d-%m-%Y", "%d/%m/%Y", "%Y-%m-%d", "%d-%b-%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    None
}

fn clean(raw: &str) -> Option<String> {
    let t = raw.trim();
    if t.is_empty() {
        None
    } else {
        Some(t.to_string())
    }
}

/// Merge profile observations from all pages and strategies into one
/// SubjectProfile. Scalar fields are first-write-wins; phones and
/// addresses accumulate in first-seen order, skipping empties and
/// exact duplicates.
pub fn merge_profiles(observations: &[ProfileObservation]) -> SubjectProfile {
    let mut profile = SubjectProfile::default();

    for obs in observations {
        merge_scalar(&mut profile.name, &obs.name);
        merge_scalar(&mut profile.date_of_birth, &obs.date_of_birth);
        merge_scalar(&mut profile.gender, &obs.gender);
        merge_scalar(&mut profile.tax_id, &obs.tax_id);
        merge_scalar(&mut profile.email, &obs.email);

        if profile.score.is_none() {
            profile.score = obs
                .score
                .as_deref()
                .and_then(BureauScore::from_str_loose);
        }

        if profile.summary.total_accounts.is_none() {
            profile.summary.total_accounts =
                obs.total_accounts.as_deref().and_then(parse_count);
        }
        if profile.summary.overdue_accounts.is_none() {
            profile.summary.overdue_accounts =
                obs.overdue_accounts.as_deref().and_then(parse_count);
        }
        if profile.summary.high_credit_total.is_none() {
            profile.summary.high_credit_total =
                obs.high_credit_total.as_deref().and_then(parse_amount);
        }
        if profile.summary.current_balance_total.is_none() {
            profile.summary.current_balance_total =
                obs.current_balance_total.as_deref().and_then(parse_amount);
        }
        merge_scalar(
            &mut profile.summary.oldest_account_date,
            &obs.oldest_account_date,
        );
        merge_scalar(
            &mut profile.summary.recent_account_date,
            &obs.recent_account_date,
        );

        for phone in &obs.phones {
            accumulate(&mut profile.phones, phone);
        }
        for addr in &obs.addresses {
            accumulate(&mut profile.addresses, addr);
        }
    }

    profile
}

fn merge_scalar(slot: &mut Option<String>, observed: &Option<String>) {
    if slot.is_none() {
        if let Some(v) = observed.as_deref().and_then(clean) {
            *slot = Some(v);
        }
    }
}

fn accumulate(values: &mut Vec<String>, raw: &str) {
    if let Some(v) = clean(raw) {
        if !values.contains(&v) {
            values.push(v);
        }
    }
}

/// Normalize one facility candidate: coerce numerics, drop the record
/// when every field is absent. Numeric coercion failures become
/// warnings, not errors.
pub fn normalize_facility(
    cand: &FacilityCandidate,
    warnings: &mut Vec<ParseWarning>,
) -> Option<CreditFacility> {
    let context = cand
        .account_number
        .as_deref()
        .and_then(clean)
        .unwrap_or_else(|| "facility".to_string());

    let mut coerce_amount = |raw: &Option<String>, field: &str| -> Option<Decimal> {
        let raw = raw.as_deref().and_then(clean)?;
        match parse_amount(&raw) {
            Some(v) => Some(v),
            None => {
                warnings.push(ParseWarning {
                    context: context.clone(),
                    message: format!("could not parse {field} '{raw}' as an amount"),
                });
                None
            }
        }
    };

    let sanctioned_amount = coerce_amount(&cand.sanctioned_amount, "sanctioned amount");
    let current_balance = coerce_amount(&cand.current_balance, "current balance");
    let overdue_amount = coerce_amount(&cand.overdue_amount, "overdue amount");
    let emi_amount = coerce_amount(&cand.emi_amount, "EMI amount");

    let days_past_due = cand.days_past_due.as_deref().and_then(parse_days);

    let facility = CreditFacility {
        holder_name: cand.holder_name.as_deref().and_then(clean),
        account_number: cand.account_number.as_deref().and_then(clean),
        facility_type: cand.facility_type.as_deref().and_then(clean),
        ownership: cand.ownership.as_deref().and_then(clean),
        opened_date: cand.opened_date.as_deref().and_then(clean),
        last_payment_date: cand.last_payment_date.as_deref().and_then(clean),
        closed_date: cand.closed_date.as_deref().and_then(clean),
        sanctioned_amount,
        current_balance,
        overdue_amount,
        days_past_due,
        emi_amount,
        status: cand.status.as_deref().and_then(clean),
        dispute: cand.dispute.as_deref().and_then(clean),
    };

    if facility.is_empty() {
        None
    } else {
        Some(facility)
    }
}

/// Normalize and deduplicate the full candidate set. Table and text
/// strategies may both surface the same account; exact duplicates are
/// collapsed, first occurrence kept.
pub fn normalize_facilities(
    candidates: &[FacilityCandidate],
) -> (Vec<CreditFacility>, Vec<ParseWarning>) {
    let mut warnings = Vec::new();
    let facilities = candidates
        .iter()
        .filter_map(|c| normalize_facility(c, &mut warnings))
        .collect();
    (dedup_facilities(facilities), warnings)
}

/// Drop exact-duplicate facility rows, preserving first-seen order.
/// Idempotent: applying this to its own output changes nothing.
pub fn dedup_facilities(facilities: Vec<CreditFacility>) -> Vec<CreditFacility> {
    let mut out: Vec<CreditFacility> = Vec::with_capacity(facilities.len());
    for f in facilities {
        if !out.contains(&f) {
            out.push(f);
        }
    }
    out
}
