use bureau_core::model::{CreditFacility, SubjectProfile};
use bureau_core::parsing::ParsedDocument;
use bureau_core::ReportBundle;
use std::fmt::Write;

pub fn format_parsed(parsed: &ParsedDocument) -> String {
    let mut out = String::new();
    format_profile(&mut out, &parsed.profile);
    format_facilities(&mut out, &parsed.facilities);
    out
}

pub fn format_bundle(bundle: &ReportBundle) -> String {
    let mut out = String::new();
    format_profile(&mut out, &bundle.profile);
    format_facilities(&mut out, &bundle.facilities);

    let agg = &bundle.analysis.aggregate;
    let _ = writeln!(out, "=== Analysis ===\n");
    let _ = writeln!(out, "  Facilities:        {}", agg.total_facilities);
    let _ = writeln!(out, "  Overdue:           {}", agg.overdue_facilities);
    let _ = writeln!(out, "  Closed:            {}", agg.closed_facilities);
    let _ = writeln!(out, "  High risk:         {}", agg.high_risk_facilities);
    let _ = writeln!(out, "  Total sanctioned:  {}", agg.total_sanctioned);
    let _ = writeln!(out, "  Total balance:     {}", agg.total_current_balance);
    let _ = writeln!(out, "  Total overdue:     {}", agg.total_overdue);
    let _ = writeln!(
        out,
        "  Mean DPD:          {}",
        opt_str(&agg.mean_days_past_due)
    );
    let _ = writeln!(
        out,
        "  Utilization:       {}",
        agg.utilization_percent
            .map(|p| format!("{p}%"))
            .unwrap_or_else(|| "not available".into())
    );
    let _ = writeln!(
        out,
        "  Score category:    {}",
        bundle
            .analysis
            .score_category
            .map(|c| c.to_string())
            .unwrap_or_else(|| "not available".into())
    );
    let _ = writeln!(
        out,
        "  Credit age (yrs):  {}",
        opt_str(&bundle.analysis.mean_credit_age_years)
    );
    let s = &bundle.analysis.status_summary;
    let _ = writeln!(
        out,
        "  Written-off / settled / disputed: {} / {} / {}",
        s.written_off, s.settled, s.disputed
    );
    out
}

fn format_profile(out: &mut String, profile: &SubjectProfile) {
    let _ = writeln!(out, "=== Subject ===\n");
    let _ = writeln!(out, "  Name:       {}", opt(&profile.name));
    let _ = writeln!(out, "  DOB:        {}", opt(&profile.date_of_birth));
    let _ = writeln!(out, "  Gender:     {}", opt(&profile.gender));
    let _ = writeln!(
        out,
        "  Score:      {}",
        profile
            .score
            .as_ref()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".into())
    );
    let _ = writeln!(out, "  Tax ID:     {}", opt(&profile.tax_id));
    let _ = writeln!(out, "  Email:      {}", opt(&profile.email));
    if !profile.phones.is_empty() {
        let _ = writeln!(out, "  Phones:     {}", profile.phones.join(", "));
    }
    if !profile.addresses.is_empty() {
        let _ = writeln!(out, "  Addresses:  {}", profile.addresses.join(" | "));
    }
    let _ = writeln!(out);
}

fn format_facilities(out: &mut String, facilities: &[CreditFacility]) {
    let _ = writeln!(out, "=== Facilities ({}) ===\n", facilities.len());
    for f in facilities {
        let _ = writeln!(
            out,
            "  {}  {}  sanctioned: {}  balance: {}  overdue: {}  dpd: {}",
            f.facility_type.as_deref().unwrap_or("-"),
            f.account_number.as_deref().unwrap_or("-"),
            opt_str(&f.sanctioned_amount),
            opt_str(&f.current_balance),
            opt_str(&f.overdue_amount),
            f.days_past_due
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".into()),
        );
    }
    let _ = writeln!(out);
}

fn opt(v: &Option<String>) -> &str {
    v.as_deref().unwrap_or("-")
}

fn opt_str<T: ToString + Copy>(v: &Option<T>) -> String {
    v.map(|x| x.to_string()).unwrap_or_else(|| "-".into())
}
