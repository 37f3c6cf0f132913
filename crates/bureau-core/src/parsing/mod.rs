pub mod fields;
pub mod normalize;
pub mod table;
pub mod text;

use crate::error::BureauError;
use crate::extraction::Page;
use crate::model::{CreditFacility, SubjectProfile};
use fields::CanonicalField;
use serde::{Deserialize, Serialize};

/// Raw field captures for one credit facility, before numeric coercion.
/// Values are kept verbatim; the normalizer owns coercion and dropping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FacilityCandidate {
    pub holder_name: Option<String>,
    pub account_number: Option<String>,
    pub facility_type: Option<String>,
    pub ownership: Option<String>,
    pub opened_date: Option<String>,
    pub last_payment_date: Option<String>,
    pub closed_date: Option<String>,
    pub sanctioned_amount: Option<String>,
    pub current_balance: Option<String>,
    pub overdue_amount: Option<String>,
    pub days_past_due: Option<String>,
    pub emi_amount: Option<String>,
    pub status: Option<String>,
    pub dispute: Option<String>,
}

impl FacilityCandidate {
    /// Record a capture. First write wins within a candidate; repeated
    /// labels inside one block or row do not overwrite.
    pub fn set(&mut self, field: CanonicalField, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            return;
        }
        let slot = match field {
            CanonicalField::Name => &mut self.holder_name,
            CanonicalField::AccountNumber => &mut self.account_number,
            CanonicalField::FacilityType => &mut self.facility_type,
            CanonicalField::Ownership => &mut self.ownership,
            CanonicalField::OpenedDate => &mut self.opened_date,
            CanonicalField::LastPaymentDate => &mut self.last_payment_date,
            CanonicalField::ClosedDate => &mut self.closed_date,
            CanonicalField::SanctionedAmount => &mut self.sanctioned_amount,
            CanonicalField::CurrentBalance => &mut self.current_balance,
            CanonicalField::OverdueAmount => &mut self.overdue_amount,
            CanonicalField::DaysPastDue => &mut self.days_past_due,
            CanonicalField::EmiAmount => &mut self.emi_amount,
            CanonicalField::Status => &mut self.status,
            CanonicalField::DisputeStatus => &mut self.dispute,
            _ => return,
        };
        if slot.is_none() {
            *slot = Some(value.to_string());
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == FacilityCandidate::default()
    }
}

/// Raw profile captures from one page or grid, before merging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileObservation {
    pub name: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub score: Option<String>,
    pub tax_id: Option<String>,
    pub email: Option<String>,
    pub total_accounts: Option<String>,
    pub overdue_accounts: Option<String>,
    pub high_credit_total: Option<String>,
    pub current_balance_total: Option<String>,
    pub oldest_account_date: Option<String>,
    pub recent_account_date: Option<String>,
    pub phones: Vec<String>,
    pub addresses: Vec<String>,
}

impl ProfileObservation {
    /// Record a capture. Scalar fields are first-write-wins; phones and
    /// addresses accumulate, skipping exact repeats.
    pub fn set(&mut self, field: CanonicalField, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            return;
        }
        match field {
            CanonicalField::Phone => {
                if !self.phones.iter().any(|p| p == value) {
                    self.phones.push(value.to_string());
                }
                return;
            }
            CanonicalField::Address => {
                if !self.addresses.iter().any(|a| a == value) {
                    self.addresses.push(value.to_string());
                }
                return;
            }
            _ => {}
        }
        let slot = match field {
            CanonicalField::Name => &mut self.name,
            CanonicalField::DateOfBirth => &mut self.date_of_birth,
            CanonicalField::Gender => &mut self.gender,
            CanonicalField::Score => &mut self.score,
            CanonicalField::TaxId => &mut self.tax_id,
            CanonicalField::Email => &mut self.email,
            CanonicalField::TotalAccounts => &mut self.total_accounts,
            CanonicalField::OverdueAccounts => &mut self.overdue_accounts,
            CanonicalField::HighCreditTotal => &mut self.high_credit_total,
            CanonicalField::CurrentBalanceTotal => &mut self.current_balance_total,
            CanonicalField::OldestAccountDate => &mut self.oldest_account_date,
            CanonicalField::RecentAccountDate => &mut self.recent_account_date,
            _ => return,
        };
        if slot.is_none() {
            *slot = Some(value.to_string());
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == ProfileObservation::default()
    }
}

/// A structured parsing diagnostic. These replace console prints: the
/// library never logs, it reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseWarning {
    pub context: String,
    pub message: String,
}

/// The normalized output of one document-processing run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedDocument {
    pub profile: SubjectProfile,
    pub facilities: Vec<CreditFacility>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ParseWarning>,
}

/// Run both extraction strategies over the page stream and normalize
/// the result into one profile and one deduplicated facility set.
///
/// The one hard failure here is structural: an empty page stream, or
/// pages with neither tables nor text. Everything below that level
/// degrades to field absence.
pub fn parse_document(pages: &[Page]) -> Result<ParsedDocument, BureauError> {
    if pages.is_empty() {
        return Err(BureauError::NoContent("page stream is empty".into()));
    }
    if pages.iter().all(|p| p.is_blank()) {
        return Err(BureauError::NoContent(
            "no tables or text found on any page".into(),
        ));
    }

    let mut observations: Vec<ProfileObservation> = Vec::new();
    let mut candidates: Vec<FacilityCandidate> = Vec::new();

    for page in pages {
        for grid in &page.tables {
            if let Some(ext) = table::extract_grid(grid) {
                if let Some(obs) = ext.profile {
                    observations.push(obs);
                }
                candidates.extend(ext.facilities);
            }
        }

        if !page.text.trim().is_empty() {
            let ext = text::extract_text(&page.text);
            if !ext.profile.is_empty() {
                observations.push(ext.profile);
            }
            candidates.extend(ext.facilities);
        }
    }

    let profile = normalize::merge_profiles(&observations);
    let (facilities, warnings) = normalize::normalize_facilities(&candidates);

    Ok(ParsedDocument {
        profile,
        facilities,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::TableGrid;
    use rust_decimal_macros::dec;

    fn page(number: usize, tables: Vec<TableGrid>, text: &str) -> Page {
        Page {
            page_number: number,
            tables,
            text: text.to_string(),
        }
    }

    #[test]
    fn empty_page_stream_is_structural_failure() {
        let err = parse_document(&[]).unwrap_err();
        assert!(matches!(err, BureauError::NoContent(_)));
    }

    #[test]
    fn blank_pages_are_structural_failure() {
        let pages = vec![page(1, vec![], "   \n \n"), page(2, vec![], "")];
        let err = parse_document(&pages).unwrap_err();
        assert!(matches!(err, BureauError::NoContent(_)));
    }

    #[test]
    fn grid_and_text_strategies_merge() {
        let grid = TableGrid {
            headers: vec!["NAME".into(), "OVERDUE".into(), "SANCTIONED".into()],
            rows: vec![vec!["Jane Doe".into(), "0".into(), "10000".into()]],
        };
        let text = "CONSUMER NAME: J. DOE\nTELEPHONE: 9876543210\n";
        let doc = parse_document(&[page(1, vec![grid], text)]).unwrap();

        // Grid came first on the page, so the grid's name wins.
        assert_eq!(doc.profile.name.as_deref(), Some("Jane Doe"));
        assert_eq!(doc.profile.phones, vec!["9876543210"]);
        assert_eq!(doc.facilities.len(), 1);
        assert_eq!(doc.facilities[0].overdue_amount, Some(dec!(0)));
        assert_eq!(doc.facilities[0].sanctioned_amount, Some(dec!(10000)));
    }

    #[test]
    fn same_account_from_both_strategies_dedups() {
        let grid = TableGrid {
            headers: vec!["ACCOUNT NUMBER".into(), "CURRENT BALANCE".into()],
            rows: vec![vec!["XX123".into(), "5,000".into()]],
        };
        let text = "ACCOUNT INFORMATION\n\
                    ACCOUNT TYPE: PERSONAL LOAN\n\
                    ACCOUNT NUMBER: XX123\n\
                    CURRENT BALANCE: 5,000\n";
        let doc = parse_document(&[page(1, vec![grid], text)]).unwrap();
        // Not an exact duplicate (text block carries the facility type),
        // so both survive dedup; exact duplicates collapse.
        assert_eq!(doc.facilities.len(), 2);

        let text_only = "ACCOUNT INFORMATION\n\
                         ACCOUNT TYPE: PERSONAL LOAN\n\
                         ACCOUNT NUMBER: XX123\n";
        let doc = parse_document(&[
            page(1, vec![], text_only),
            page(2, vec![], text_only),
        ])
        .unwrap();
        assert_eq!(doc.facilities.len(), 1);
    }
}
