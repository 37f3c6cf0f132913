use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Canonical field identifiers that raw report labels are mapped to.
///
/// `Name` is shared: it is the subject name on profile tables and the
/// holder name inside a facility block, depending on where it appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    // Profile
    Name,
    DateOfBirth,
    Gender,
    Score,
    TaxId,
    Phone,
    Address,
    Email,
    TotalAccounts,
    OverdueAccounts,
    HighCreditTotal,
    CurrentBalanceTotal,
    OldestAccountDate,
    RecentAccountDate,
    // Facility
    AccountNumber,
    FacilityType,
    Ownership,
    OpenedDate,
    LastPaymentDate,
    ClosedDate,
    SanctionedAmount,
    CurrentBalance,
    OverdueAmount,
    DaysPastDue,
    EmiAmount,
    Status,
    DisputeStatus,
}

impl CanonicalField {
    pub const ALL: &'static [CanonicalField] = &[
        CanonicalField::Name,
        CanonicalField::DateOfBirth,
        CanonicalField::Gender,
        CanonicalField::Score,
        CanonicalField::TaxId,
        CanonicalField::Phone,
        CanonicalField::Address,
        CanonicalField::Email,
        CanonicalField::TotalAccounts,
        CanonicalField::OverdueAccounts,
        CanonicalField::HighCreditTotal,
        CanonicalField::CurrentBalanceTotal,
        CanonicalField::OldestAccountDate,
        CanonicalField::RecentAccountDate,
        CanonicalField::AccountNumber,
        CanonicalField::FacilityType,
        CanonicalField::Ownership,
        CanonicalField::OpenedDate,
        CanonicalField::LastPaymentDate,
        CanonicalField::ClosedDate,
        CanonicalField::SanctionedAmount,
        CanonicalField::CurrentBalance,
        CanonicalField::OverdueAmount,
        CanonicalField::DaysPastDue,
        CanonicalField::EmiAmount,
        CanonicalField::Status,
        CanonicalField::DisputeStatus,
    ];

    /// Whether the field belongs to the subject profile record.
    pub fn is_profile(self) -> bool {
        matches!(
            self,
            CanonicalField::Name
                | CanonicalField::DateOfBirth
                | CanonicalField::Gender
                | CanonicalField::Score
                | CanonicalField::TaxId
                | CanonicalField::Phone
                | CanonicalField::Address
                | CanonicalField::Email
                | CanonicalField::TotalAccounts
                | CanonicalField::OverdueAccounts
                | CanonicalField::HighCreditTotal
                | CanonicalField::CurrentBalanceTotal
                | CanonicalField::OldestAccountDate
                | CanonicalField::RecentAccountDate
        )
    }

    /// Whether the field belongs to a credit facility record.
    pub fn is_facility(self) -> bool {
        matches!(
            self,
            CanonicalField::Name
                | CanonicalField::AccountNumber
                | CanonicalField::FacilityType
                | CanonicalField::Ownership
                | CanonicalField::OpenedDate
                | CanonicalField::LastPaymentDate
                | CanonicalField::ClosedDate
                | CanonicalField::SanctionedAmount
                | CanonicalField::CurrentBalance
                | CanonicalField::OverdueAmount
                | CanonicalField::DaysPastDue
                | CanonicalField::EmiAmount
                | CanonicalField::Status
                | CanonicalField::DisputeStatus
        )
    }

    /// Stable snake_case key, used for sheet headers and diagnostics.
    pub fn key(self) -> &'static str {
        match self {
            CanonicalField::Name => "name",
            CanonicalField::DateOfBirth => "date_of_birth",
            CanonicalField::Gender => "gender",
            CanonicalField::Score => "score",
            CanonicalField::TaxId => "tax_id",
            CanonicalField::Phone => "phone",
            CanonicalField::Address => "address",
            CanonicalField::Email => "email",
            CanonicalField::TotalAccounts => "total_accounts",
            CanonicalField::OverdueAccounts => "overdue_accounts",
            CanonicalField::HighCreditTotal => "high_credit_total",
            CanonicalField::CurrentBalanceTotal => "current_balance_total",
            CanonicalField::OldestAccountDate => "oldest_account_date",
            CanonicalField::RecentAccountDate => "recent_account_date",
            CanonicalField::AccountNumber => "account_number",
            CanonicalField::FacilityType => "facility_type",
            CanonicalField::Ownership => "ownership",
            CanonicalField::OpenedDate => "opened_date",
            CanonicalField::LastPaymentDate => "last_payment_date",
            CanonicalField::ClosedDate => "closed_date",
            CanonicalField::SanctionedAmount => "sanctioned_amount",
            CanonicalField::CurrentBalance => "current_balance",
            CanonicalField::OverdueAmount => "overdue_amount",
            CanonicalField::DaysPastDue => "days_past_due",
            CanonicalField::EmiAmount => "emi_amount",
            CanonicalField::Status => "status",
            CanonicalField::DisputeStatus => "dispute_status",
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Known label synonyms per canonical field, uppercase.
///
/// Report revisions disagree on labeling; adding a layout variant is a
/// data change here, not a code change. Matching is by substring
/// containment, longest synonym first, so a specific synonym like
/// "INCOME TAX ID NUMBER (PAN)" wins over a shorter generic one.
pub const SYNONYMS: &[(&str, CanonicalField)] = &[
    ("CONSUMER NAME", CanonicalField::Name),
    ("MEMBER NAME", CanonicalField::Name),
    ("HOLDER NAME", CanonicalField::Name),
    ("NAME", CanonicalField::Name),
    ("DATE OF BIRTH", CanonicalField::DateOfBirth),
    ("DOB", CanonicalField::DateOfBirth),
    ("GENDER", CanonicalField::Gender),
    ("CIBIL TRANSUNION SCORE", CanonicalField::Score),
    ("CIBIL SCORE", CanonicalField::Score),
    ("BUREAU SCORE", CanonicalField::Score),
    ("SCORE", CanonicalField::Score),
    ("INCOME TAX ID NUMBER (PAN)", CanonicalField::TaxId),
    ("INCOME TAX ID NUMBER", CanonicalField::TaxId),
    ("INCOME TAX ID", CanonicalField::TaxId),
    ("PAN", CanonicalField::TaxId),
    ("TELEPHONE", CanonicalField::Phone),
    ("MOBILE", CanonicalField::Phone),
    ("CONTACT NUMBER", CanonicalField::Phone),
    ("PHONE", CanonicalField::Phone),
    ("ADDRESS", CanonicalField::Address),
    ("EMAIL ID", CanonicalField::Email),
    ("E-MAIL", CanonicalField::Email),
    ("EMAIL", CanonicalField::Email),
    ("TOTAL ACCOUNTS", CanonicalField::TotalAccounts),
    ("NO. OF ACCOUNTS", CanonicalField::TotalAccounts),
    ("OVERDUE ACCOUNTS", CanonicalField::OverdueAccounts),
    ("ACCOUNTS OVERDUE", CanonicalField::OverdueAccounts),
    ("TOTAL HIGH CREDIT", CanonicalField::HighCreditTotal),
    ("HIGH CR/SANC. AMT", CanonicalField::HighCreditTotal),
    ("TOTAL CURRENT BALANCE", CanonicalField::CurrentBalanceTotal),
    ("OLDEST ACCOUNT", CanonicalField::OldestAccountDate),
    ("MOST RECENT ACCOUNT", CanonicalField::RecentAccountDate),
    ("RECENT ACCOUNT", CanonicalField::RecentAccountDate),
    ("ACCOUNT NUMBER", CanonicalField::AccountNumber),
    ("ACCOUNT NO", CanonicalField::AccountNumber),
    ("A/C NUMBER", CanonicalField::AccountNumber),
    ("TYPE OF CREDIT FACILITY", CanonicalField::FacilityType),
    ("ACCOUNT TYPE", CanonicalField::FacilityType),
    ("FACILITY TYPE", CanonicalField::FacilityType),
    ("LOAN TYPE", CanonicalField::FacilityType),
    ("OWNERSHIP", CanonicalField::Ownership),
    ("DATE OPENED/DISBURSED", CanonicalField::OpenedDate),
    ("DATE OPENED", CanonicalField::OpenedDate),
    ("OPENED DATE", CanonicalField::OpenedDate),
    ("OPEN DATE", CanonicalField::OpenedDate),
    ("DATE OF LAST PAYMENT", CanonicalField::LastPaymentDate),
    ("LAST PAYMENT DATE", CanonicalField::LastPaymentDate),
    ("DATE CLOSED", CanonicalField::ClosedDate),
    ("CLOSED DATE", CanonicalField::ClosedDate),
    ("CLOSURE DATE", CanonicalField::ClosedDate),
    ("HIGH CREDIT/SANCTIONED AMOUNT", CanonicalField::SanctionedAmount),
    ("SANCTIONED AMOUNT", CanonicalField::SanctionedAmount),
    ("SANCTIONED", CanonicalField::SanctionedAmount),
    ("CREDIT LIMIT", CanonicalField::SanctionedAmount),
    ("HIGH CREDIT", CanonicalField::SanctionedAmount),
    ("CURRENT BALANCE", CanonicalField::CurrentBalance),
    ("OUTSTANDING BALANCE", CanonicalField::CurrentBalance),
    ("BALANCE", CanonicalField::CurrentBalance),
    ("AMOUNT OVERDUE", CanonicalField::OverdueAmount),
    ("OVERDUE AMOUNT", CanonicalField::OverdueAmount),
    ("OVERDUE", CanonicalField::OverdueAmount),
    ("DAYS PAST DUE", CanonicalField::DaysPastDue),
    ("DPD", CanonicalField::DaysPastDue),
    ("EMI AMOUNT", CanonicalField::EmiAmount),
    ("EMI", CanonicalField::EmiAmount),
    ("DISPUTE STATUS", CanonicalField::DisputeStatus),
    ("DISPUTE", CanonicalField::DisputeStatus),
    ("ACCOUNT STATUS", CanonicalField::Status),
    ("STATUS", CanonicalField::Status),
];

/// Synonyms sorted longest-first so specific labels win over generic ones.
static ORDERED: LazyLock<Vec<(&'static str, CanonicalField)>> = LazyLock::new(|| {
    let mut v: Vec<_> = SYNONYMS.to_vec();
    v.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    v
});

/// Synonyms in matching order (longest first), for anchored text scans.
pub fn ordered_synonyms() -> &'static [(&'static str, CanonicalField)] {
    &ORDERED
}

/// Map a raw header label or text anchor to a canonical field.
///
/// Comparison is case-insensitive and whitespace-normalized. `None`
/// means the label is unrecognized, which is common (disclaimer columns,
/// formatting artifacts) and not an error.
pub fn match_label(label: &str) -> Option<CanonicalField> {
    let norm = normalize_label(label);
    if norm.is_empty() {
        return None;
    }
    ORDERED
        .iter()
        .find(|(syn, _)| norm.contains(syn))
        .map(|(_, field)| *field)
}

/// Uppercase and collapse internal whitespace.
pub fn normalize_label(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// All synonyms for one field, in table order.
pub fn synonyms_for(field: CanonicalField) -> Vec<&'static str> {
    SYNONYMS
        .iter()
        .filter(|(_, f)| *f == field)
        .map(|(s, _)| *s)
        .collect()
}
