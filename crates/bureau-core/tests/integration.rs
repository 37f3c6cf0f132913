//! Integration tests for the analyze_pdf() end-to-end pipeline.
//!
//! Uses a MockSource that returns pre-built pages without invoking
//! pdftotext, so these tests run without poppler-utils.

use bureau_core::analysis::indicators::ScoreCategory;
use bureau_core::error::BureauError;
use bureau_core::export::workbook_sheets;
use bureau_core::extraction::{Page, PageSource, TableGrid};
use bureau_core::model::BureauScore;
use bureau_core::{analyze_pdf, parse_pdf};
use chrono::NaiveDate;
use rust_decimal_macros::dec;

struct MockSource {
    pages: Vec<Page>,
}

impl PageSource for MockSource {
    fn pages(&self, _pdf_bytes: &[u8]) -> Result<Vec<Page>, BureauError> {
        Ok(self.pages.clone())
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

fn text_page(number: usize, text: &str) -> Page {
    Page {
        page_number: number,
        tables: vec![],
        text: text.to_string(),
    }
}

fn grid(headers: &[&str], rows: &[&[&str]]) -> TableGrid {
    TableGrid {
        headers: headers.iter().map(|s| s.to_string()).collect(),
        rows: rows
            .iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect(),
    }
}

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

// ---------------------------------------------------------------------------
// Structural failure: empty page stream
// ---------------------------------------------------------------------------
#[test]
fn zero_pages_is_structural_failure() {
    let source = MockSource { pages: vec![] };
    let err = analyze_pdf(&[], &source, as_of()).unwrap_err();
    assert!(matches!(err, BureauError::NoContent(_)));
}

// ---------------------------------------------------------------------------
// Table-only document: one grid feeding profile and facility records
// ---------------------------------------------------------------------------
#[test]
fn table_grid_to_profile_and_facility() {
    let source = MockSource {
        pages: vec![Page {
            page_number: 1,
            tables: vec![grid(
                &["NAME", "OVERDUE", "SANCTIONED"],
                &[&["Jane Doe", "0", "10000"]],
            )],
            text: String::new(),
        }],
    };

    let bundle = analyze_pdf(&[], &source, as_of()).unwrap();
    assert_eq!(bundle.profile.name.as_deref(), Some("Jane Doe"));
    assert_eq!(bundle.facilities.len(), 1);
    assert_eq!(bundle.facilities[0].overdue_amount, Some(dec!(0)));
    assert_eq!(bundle.facilities[0].sanctioned_amount, Some(dec!(10000)));
    assert_eq!(bundle.analysis.aggregate.overdue_facilities, 0);
}

// ---------------------------------------------------------------------------
// Text-only document: two facility blocks, aggregate totals
// ---------------------------------------------------------------------------
#[test]
fn text_blocks_aggregate_utilization() {
    let text = "\
CONSUMER CREDIT REPORT
CONSUMER NAME: JANE DOE
CIBIL TRANSUNION SCORE: 782
ACCOUNT INFORMATION
ACCOUNT TYPE: PERSONAL LOAN
SANCTIONED AMOUNT: 10,000
CURRENT BALANCE: 5,000
ACCOUNT TYPE: CREDIT CARD
SANCTIONED AMOUNT: 20,000
CURRENT BALANCE: 5,000
";
    let source = MockSource {
        pages: vec![text_page(1, text)],
    };

    let bundle = analyze_pdf(&[], &source, as_of()).unwrap();
    assert_eq!(bundle.profile.score, Some(BureauScore::Value(782)));
    assert_eq!(bundle.analysis.score_category, Some(ScoreCategory::Good));
    assert_eq!(bundle.facilities.len(), 2);
    assert_eq!(bundle.analysis.aggregate.total_sanctioned, dec!(30000));
    assert_eq!(
        bundle.analysis.aggregate.utilization_percent,
        Some(dec!(33.33))
    );
}

// ---------------------------------------------------------------------------
// Mixed strategies across pages, first-write-wins and accumulation
// ---------------------------------------------------------------------------
#[test]
fn multi_page_merge_and_accumulation() {
    let page1 = Page {
        page_number: 1,
        tables: vec![grid(
            &["CONSUMER NAME", "DATE OF BIRTH", "GENDER"],
            &[&["Jane Doe", "01-01-1990", "Female"]],
        )],
        text: "TELEPHONE: 9876543210\nINCOME TAX ID NUMBER (PAN): ABCDE1234F\n".into(),
    };
    let page2 = text_page(
        2,
        "CONSUMER NAME: SOMEONE ELSE\nTELEPHONE: 0402223344\nEMAIL: jane@example.com\n",
    );
    let source = MockSource {
        pages: vec![page1, page2],
    };

    let bundle = analyze_pdf(&[], &source, as_of()).unwrap();
    // first-seen name wins across pages
    assert_eq!(bundle.profile.name.as_deref(), Some("Jane Doe"));
    assert_eq!(bundle.profile.tax_id.as_deref(), Some("ABCDE1234F"));
    assert_eq!(bundle.profile.email.as_deref(), Some("jane@example.com"));
    // phones accumulate in first-seen order
    assert_eq!(bundle.profile.phones, vec!["9876543210", "0402223344"]);
}

// ---------------------------------------------------------------------------
// Malformed numerics degrade to absence with a warning
// ---------------------------------------------------------------------------
#[test]
fn malformed_amounts_become_absent() {
    let text = "\
ACCOUNT INFORMATION
ACCOUNT TYPE: AUTO LOAN
ACCOUNT NUMBER: XX999
SANCTIONED AMOUNT: see annexure
CURRENT BALANCE: 4,500
";
    let source = MockSource {
        pages: vec![text_page(1, text)],
    };

    let bundle = analyze_pdf(&[], &source, as_of()).unwrap();
    assert_eq!(bundle.facilities.len(), 1);
    assert_eq!(bundle.facilities[0].sanctioned_amount, None);
    assert_eq!(bundle.facilities[0].current_balance, Some(dec!(4500)));
    // zero sanctioned total -> utilization reported absent, not an error
    assert_eq!(bundle.analysis.aggregate.utilization_percent, None);
    assert!(!bundle.warnings.is_empty());
}

// ---------------------------------------------------------------------------
// DPD, closed accounts and risk counting
// ---------------------------------------------------------------------------
#[test]
fn risk_counting_and_closed_facilities() {
    let text = "\
ACCOUNT INFORMATION
ACCOUNT TYPE: PERSONAL LOAN
DPD: 45
AMOUNT OVERDUE: 1,200
ACCOUNT TYPE: CREDIT CARD
DPD: STD
DATE CLOSED: 01-02-2023
ACCOUNT TYPE: HOME LOAN
DPD: XXX
";
    let source = MockSource {
        pages: vec![text_page(1, text)],
    };

    let bundle = analyze_pdf(&[], &source, as_of()).unwrap();
    assert_eq!(bundle.facilities.len(), 3);
    let agg = &bundle.analysis.aggregate;
    assert_eq!(agg.overdue_facilities, 1);
    assert_eq!(agg.high_risk_facilities, 1); // only the 45-day account
    assert_eq!(agg.closed_facilities, 1);
    assert_eq!(agg.mean_days_past_due, Some(dec!(22.50))); // (45 + 0) / 2
}

// ---------------------------------------------------------------------------
// Same account surfaced by both strategies collapses to one record
// ---------------------------------------------------------------------------
#[test]
fn duplicate_across_strategies_dedups() {
    let text = "\
ACCOUNT INFORMATION
ACCOUNT TYPE: PERSONAL LOAN
ACCOUNT NUMBER: XX123
CURRENT BALANCE: 5,000
";
    let source = MockSource {
        pages: vec![text_page(1, text), text_page(2, text)],
    };

    let bundle = analyze_pdf(&[], &source, as_of()).unwrap();
    assert_eq!(bundle.facilities.len(), 1);
}

// ---------------------------------------------------------------------------
// No-history sentinel flows through to the score category
// ---------------------------------------------------------------------------
#[test]
fn no_history_sentinel() {
    let source = MockSource {
        pages: vec![text_page(1, "CIBIL SCORE: NH\nCONSUMER NAME: JANE DOE\n")],
    };
    let bundle = analyze_pdf(&[], &source, as_of()).unwrap();
    assert_eq!(bundle.profile.score, Some(BureauScore::NoHistory));
    assert_eq!(
        bundle.analysis.score_category,
        Some(ScoreCategory::NoHistory)
    );
}

// ---------------------------------------------------------------------------
// Export: three sheets, facilities row per record
// ---------------------------------------------------------------------------
#[test]
fn export_workbook_shape() {
    let text = "\
CONSUMER NAME: JANE DOE
ACCOUNT INFORMATION
ACCOUNT TYPE: PERSONAL LOAN
SANCTIONED AMOUNT: 10,000
ACCOUNT TYPE: CREDIT CARD
SANCTIONED AMOUNT: 20,000
";
    let source = MockSource {
        pages: vec![text_page(1, text)],
    };
    let bundle = analyze_pdf(&[], &source, as_of()).unwrap();
    let sheets = workbook_sheets(&bundle.profile, &bundle.facilities, &bundle.analysis);

    assert_eq!(sheets.len(), 3);
    assert_eq!(sheets[1].rows.len(), 2);
    let names: Vec<&str> = sheets.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["profile", "facilities", "analysis"]);
}

// ---------------------------------------------------------------------------
// Normalizer idempotence at the pipeline level
// ---------------------------------------------------------------------------
#[test]
fn reparse_of_parsed_output_is_stable() {
    let text = "\
CONSUMER NAME: JANE DOE
ACCOUNT INFORMATION
ACCOUNT TYPE: PERSONAL LOAN
SANCTIONED AMOUNT: 10,000
";
    let source = MockSource {
        pages: vec![text_page(1, text)],
    };
    let parsed = parse_pdf(&[], &source).unwrap();
    let deduped =
        bureau_core::parsing::normalize::dedup_facilities(parsed.facilities.clone());
    assert_eq!(parsed.facilities, deduped);
}
