use crate::extraction::TableGrid;
use crate::parsing::fields;

/// Reconstruct table grids from `pdftotext -layout` output.
///
/// Layout mode preserves column alignment with runs of spaces. A line
/// whose cells resolve to at least two canonical fields is treated as a
/// header row; following non-blank lines are data rows until a blank
/// line, a footer marker, or the next header.
pub fn detect_grids(lines: &[&str]) -> Vec<TableGrid> {
    let mut grids = Vec::new();
    let mut current: Option<TableGrid> = None;

    for line in lines {
        let trimmed = line.trim();

        if trimmed.is_empty() || is_footer(trimmed) {
            if let Some(g) = current.take() {
                grids.push(g);
            }
            continue;
        }

        if is_header_line(line) {
            if let Some(g) = current.take() {
                grids.push(g);
            }
            current = Some(TableGrid {
                headers: split_cells(line),
                rows: Vec::new(),
            });
            continue;
        }

        if let Some(ref mut g) = current {
            let cells = split_cells(line);
            if !cells.is_empty() {
                g.rows.push(cells);
            }
        }
    }

    if let Some(g) = current.take() {
        grids.push(g);
    }

    grids
}

/// A header row is one where at least two cells map to canonical fields.
/// A single recognized token is more likely a labeled prose line.
pub fn is_header_line(line: &str) -> bool {
    let cells = split_cells(line);
    if cells.len() < 2 {
        return false;
    }
    cells
        .iter()
        .filter(|c| fields::match_label(c).is_some())
        .count()
        >= 2
}

/// Split a layout line into cells on gaps of 2+ whitespace characters.
pub fn split_cells(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut start: Option<usize> = None;
    let mut space_count = 0;
    let mut gap_from = 0;

    for (i, c) in line.char_indices() {
        if c.is_whitespace() {
            if space_count == 0 {
                gap_from = i;
            }
            space_count += 1;
            if space_count == 2 {
                if let Some(s) = start.take() {
                    cells.push(line[s..gap_from].to_string());
                }
            }
        } else {
            if start.is_none() {
                start = Some(i);
            }
            space_count = 0;
        }
    }

    if let Some(s) = start {
        cells.push(line[s..].trim_end().to_string());
    }

    cells
}

fn is_footer(trimmed: &str) -> bool {
    let upper = trimmed.to_uppercase();
    upper.starts_with("PAGE ")
        || upper.starts_with("---")
        || upper.contains("END OF REPORT")
}
