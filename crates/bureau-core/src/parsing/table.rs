use crate::extraction::TableGrid;
use crate::parsing::fields::{self, CanonicalField};
use crate::parsing::{FacilityCandidate, ProfileObservation};
use std::collections::HashSet;

/// What one table grid contributed.
#[derive(Debug, Clone, Default)]
pub struct GridExtraction {
    pub profile: Option<ProfileObservation>,
    pub facilities: Vec<FacilityCandidate>,
}

/// Extract records from a single table grid.
///
/// Headers are trimmed, duplicate header columns dropped (first kept),
/// and each column resolved through the field matcher. Profile fields
/// are document-level and read from the first data row only; facility
/// fields are read from every data row. A grid resolving zero fields
/// returns `None` — grids are often disclaimers or formatting
/// artifacts, so this is normal.
pub fn extract_grid(grid: &TableGrid) -> Option<GridExtraction> {
    let mut seen = HashSet::new();
    let mut columns: Vec<(usize, CanonicalField)> = Vec::new();

    for (idx, header) in grid.headers.iter().enumerate() {
        let norm = fields::normalize_label(header);
        if norm.is_empty() || !seen.insert(norm) {
            continue;
        }
        if let Some(field) = fields::match_label(header) {
            columns.push((idx, field));
        }
    }

    if columns.is_empty() {
        return None;
    }

    let mut out = GridExtraction::default();

    if columns.iter().any(|(_, f)| f.is_profile()) {
        if let Some(row) = grid.rows.first() {
            let mut obs = ProfileObservation::default();
            for &(idx, field) in &columns {
                if !field.is_profile() {
                    continue;
                }
                if let Some(cell) = row.get(idx) {
                    obs.set(field, cell);
                }
            }
            if !obs.is_empty() {
                out.profile = Some(obs);
            }
        }
    }

    if columns.iter().any(|(_, f)| f.is_facility()) {
        for row in &grid.rows {
            let mut cand = FacilityCandidate::default();
            for &(idx, field) in &columns {
                if !field.is_facility() {
                    continue;
                }
                if let Some(cell) = row.get(idx) {
                    cand.set(field, cell);
                }
            }
            if !cand.is_empty() {
                out.facilities.push(cand);
            }
        }
    }

    if out.profile.is_none() && out.facilities.is_empty() {
        None
    } else {
        Some(out)
    }
}
