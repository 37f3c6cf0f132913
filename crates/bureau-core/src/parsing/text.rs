use crate::parsing::fields::{self, CanonicalField};
use crate::parsing::{FacilityCandidate, ProfileObservation};

/// Markers that open the accounts section of a report. Profile fields
/// are only read before this boundary.
const ACCOUNTS_SECTION_MARKERS: &[&str] =
    &["ACCOUNT INFORMATION", "ACCOUNT DETAILS", "ACCOUNT(S)"];

/// Labels whose appearance starts a new facility block.
const BLOCK_MARKERS: &[&str] = &["ACCOUNT TYPE", "TYPE OF CREDIT FACILITY"];

/// What the text strategy extracted from one page's raw text.
#[derive(Debug, Clone, Default)]
pub struct TextExtraction {
    pub profile: ProfileObservation,
    pub facilities: Vec<FacilityCandidate>,
}

/// Run both text passes over a raw text blob: the profile pass against
/// the sub-section before the accounts boundary, and the facility pass
/// over repeated account blocks after it.
pub fn extract_text(text: &str) -> TextExtraction {
    let lines: Vec<&str> = text.lines().collect();
    let boundary = accounts_section_start(&lines);

    let mut profile = ProfileObservation::default();
    for line in &lines[..boundary] {
        for (field, value) in captures_on_line(line) {
            if field.is_profile() {
                profile.set(field, &value);
            }
        }
    }

    let facilities = extract_facility_blocks(&lines[boundary..]);

    TextExtraction {
        profile,
        facilities,
    }
}

/// Index of the first accounts-section line, or the end of the document
/// when the report has no accounts section.
fn accounts_section_start(lines: &[&str]) -> usize {
    lines
        .iter()
        .position(|l| {
            let norm = fields::normalize_label(l);
            ACCOUNTS_SECTION_MARKERS.iter().any(|m| norm.contains(m))
                || is_block_start(l)
        })
        .unwrap_or(lines.len())
}

fn is_block_start(line: &str) -> bool {
    let norm = fields::normalize_label(line);
    BLOCK_MARKERS.iter().any(|m| norm.contains(m))
}

/// Segment the accounts section into facility blocks. A block starts at
/// a block marker and ends at the next marker or end of document.
/// Blocks resolving zero fields are discarded.
fn extract_facility_blocks(lines: &[&str]) -> Vec<FacilityCandidate> {
    let mut blocks: Vec<Vec<&str>> = Vec::new();
    let mut current: Option<Vec<&str>> = None;

    for &line in lines {
        if is_block_start(line) {
            if let Some(block) = current.take() {
                blocks.push(block);
            }
            current = Some(vec![line]);
        } else if let Some(ref mut block) = current {
            block.push(line);
        }
        // Lines before the first marker (section heading, summary prose)
        // carry no facility fields and are skipped.
    }
    if let Some(block) = current.take() {
        blocks.push(block);
    }

    let mut candidates = Vec::new();
    for block in &blocks {
        let mut cand = FacilityCandidate::default();
        for line in block {
            for (field, value) in captures_on_line(line) {
                if field.is_facility() {
                    cand.set(field, &value);
                }
            }
        }
        if !cand.is_empty() {
            candidates.push(cand);
        }
    }
    candidates
}

/// Apply the anchored field rules to one line.
///
/// Every known synonym is searched case-insensitively; overlapping
/// matches are claimed longest-first. Each capture runs from the end of
/// its label to the next label on the line, then is cut at the first
/// 2+ space column gap. Empty captures are dropped: pattern non-match
/// is absence, not failure.
pub fn captures_on_line(line: &str) -> Vec<(CanonicalField, String)> {
    // Per-char ASCII uppercasing keeps byte offsets aligned with `line`.
    let upper: String = line.chars().map(|c| c.to_ascii_uppercase()).collect();

    let mut anchors: Vec<(usize, usize, CanonicalField)> = Vec::new();
    for &(syn, field) in fields::ordered_synonyms() {
        for (pos, _) in upper.match_indices(syn) {
            let end = pos + syn.len();
            let overlaps = anchors
                .iter()
                .any(|&(s, e, _)| pos < e && end > s);
            if !overlaps {
                anchors.push((pos, end, field));
            }
        }
    }
    anchors.sort_by_key(|&(start, _, _)| start);

    let mut captures = Vec::new();
    for (i, &(_, label_end, field)) in anchors.iter().enumerate() {
        let value_end = anchors
            .get(i + 1)
            .map(|&(next_start, _, _)| next_start)
            .unwrap_or(line.len());
        if label_end >= value_end {
            continue;
        }
        let raw = &line[label_end..value_end];
        let value = trim_capture(raw);
        if !value.is_empty() {
            captures.push((field, value));
        }
    }
    captures
}

/// Trim label separators, then cut the capture at the first column gap.
fn trim_capture(raw: &str) -> String {
    let trimmed = raw.trim_start_matches(|c: char| c == ':' || c == '-' || c.is_whitespace());
    let cut = match find_gap(trimmed) {
        Some(pos) => &trimmed[..pos],
        None => trimmed,
    };
    cut.trim().to_string()
}

/// Byte position of the first run of 2+ whitespace characters.
fn find_gap(s: &str) -> Option<usize> {
    let mut space_start = None;
    let mut count = 0;
    for (i, c) in s.char_indices() {
        if c.is_whitespace() {
            if count == 0 {
                space_start = Some(i);
            }
            count += 1;
            if count == 2 {
                return space_start;
            }
        } else {
            count = 0;
        }
    }
    None
}
