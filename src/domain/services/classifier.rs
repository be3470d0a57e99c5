use std::sync::OnceLock;

use regex::Regex;

use crate::domain::entities::outline::{Depth, OutlineNode, Scalar, NO_DESCRIPTION};
use crate::domain::entities::row::{
    Cell, RawRow, COL_DAYS, COL_HOURS, COL_MONTHS, COL_PRIMARY, COL_QTY, COL_SECONDARY,
    COL_TOTAL_PRICE, COL_UNIT, COL_UNIT_PRICE, COL_VOLUME,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Every cell is blank.
    Blank,
    /// No numbering, and nothing priced to keep as a leaf.
    Unlabeled,
    /// A subtotal row carried over from the sheet.
    SummaryRow,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            SkipReason::Blank => "blank",
            SkipReason::Unlabeled => "unlabeled",
            SkipReason::SummaryRow => "summary row",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Structural {
        depth: Depth,
        numbering: String,
        description: String,
    },
    /// Priced row without numbering, kept at leaf depth.
    Leaf { description: String },
    Skip(SkipReason),
}

impl Classification {
    #[cfg(test)]
    pub fn depth(&self) -> Option<Depth> {
        match self {
            Classification::Structural { depth, .. } => Some(*depth),
            Classification::Leaf { .. } => Some(Depth::Leaf),
            Classification::Skip(_) => None,
        }
    }
}

/// A row accepted into the outline, ready for the tree builder.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedRow {
    pub depth: Depth,
    pub node: OutlineNode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LabelColumn {
    /// Numbering sits in the primary column.
    Primary,
    /// Primary column is empty, numbering leads the secondary column.
    Secondary,
}

struct LabelRule {
    depth: Depth,
    column: LabelColumn,
    patterns: &'static [&'static str],
    extract: fn(&str, &str) -> (String, String),
}

// Evaluated top to bottom, first match wins.
const LABEL_RULES: &[LabelRule] = &[
    LabelRule {
        depth: Depth::Phase,
        column: LabelColumn::Primary,
        patterns: &[r"^[A-Z]\)"],
        extract: extract_phase,
    },
    LabelRule {
        depth: Depth::Section,
        column: LabelColumn::Primary,
        patterns: &[r"^[IVX]+\."],
        extract: extract_section,
    },
    LabelRule {
        depth: Depth::Subsection,
        column: LabelColumn::Primary,
        patterns: &[r"^[A-Z][.)]?$", r"^[A-Z][.)]\s"],
        extract: extract_primary_label,
    },
    LabelRule {
        depth: Depth::Item,
        column: LabelColumn::Primary,
        patterns: &[r"^[0-9]+$", r"^[0-9]+\."],
        extract: extract_primary_label,
    },
    LabelRule {
        depth: Depth::Leaf,
        column: LabelColumn::Secondary,
        patterns: &[r"^[a-z]\."],
        extract: extract_leaf,
    },
];

fn extract_phase(primary: &str, secondary: &str) -> (String, String) {
    let letter = primary.split(')').next().unwrap_or_default();
    let numbering = format!("{letter})");
    let rest = primary.get(numbering.len()..).unwrap_or_default().trim();
    let description = if rest.is_empty() { secondary } else { rest };
    (numbering, description.to_string())
}

fn extract_section(primary: &str, secondary: &str) -> (String, String) {
    let description = if secondary.is_empty() {
        roman_prefix_regex().replace(primary, "").trim().to_string()
    } else {
        secondary.to_string()
    };
    (primary.to_string(), description)
}

fn extract_primary_label(primary: &str, secondary: &str) -> (String, String) {
    (primary.to_string(), secondary.to_string())
}

fn extract_leaf(_primary: &str, secondary: &str) -> (String, String) {
    let numbering = secondary.split_whitespace().next().unwrap_or_default();
    let description = secondary.get(numbering.len()..).unwrap_or_default().trim();
    (numbering.to_string(), description.to_string())
}

static RULE_REGEXES: OnceLock<Vec<Vec<Regex>>> = OnceLock::new();
static ROMAN_PREFIX_REGEX: OnceLock<Regex> = OnceLock::new();
static TOTAL_PREFIX_REGEX: OnceLock<Regex> = OnceLock::new();
static SUMMARY_LABEL_REGEX: OnceLock<Regex> = OnceLock::new();

fn rule_regexes() -> &'static [Vec<Regex>] {
    RULE_REGEXES.get_or_init(|| {
        LABEL_RULES
            .iter()
            .map(|rule| {
                rule.patterns
                    .iter()
                    .map(|pattern| Regex::new(pattern).expect("valid label regex"))
                    .collect()
            })
            .collect()
    })
}

fn roman_prefix_regex() -> &'static Regex {
    ROMAN_PREFIX_REGEX.get_or_init(|| Regex::new(r"^[IVX]+\.").expect("valid roman regex"))
}

fn total_prefix_regex() -> &'static Regex {
    TOTAL_PREFIX_REGEX.get_or_init(|| Regex::new(r"(?i)^Total").expect("valid total regex"))
}

fn summary_label_regex() -> &'static Regex {
    SUMMARY_LABEL_REGEX
        .get_or_init(|| Regex::new(r"(?i)^Total(\s|$)").expect("valid summary regex"))
}

/// True for descriptions of sheet subtotal rows (`Total`, `TOTAL Phase I`).
pub fn is_summary_label(description: &str) -> bool {
    summary_label_regex().is_match(description)
}

/// Parses a price cell such as `Rp1,700,000`. Numbers pass through, text keeps
/// only digits and minus signs, anything unparseable is 0.
pub fn parse_currency(cell: &Cell) -> i64 {
    match cell {
        Cell::Empty => 0,
        Cell::Number(v) if v.is_finite() => v.round() as i64,
        Cell::Number(_) => 0,
        Cell::Text(v) => {
            let filtered: String = v
                .chars()
                .filter(|ch| ch.is_ascii_digit() || *ch == '-')
                .collect();
            parse_leading_int(&filtered).unwrap_or(0)
        }
    }
}

fn parse_leading_int(text: &str) -> Option<i64> {
    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let end = rest
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(rest.len());
    let value = rest[..end].parse::<i64>().ok()?;
    Some(if negative { -value } else { value })
}

fn match_label(primary: &str, secondary: &str) -> Option<(Depth, String, String)> {
    let regexes = rule_regexes();
    LABEL_RULES
        .iter()
        .zip(regexes)
        .find(|(rule, patterns)| {
            let subject = match rule.column {
                LabelColumn::Primary if !primary.is_empty() => primary,
                LabelColumn::Secondary if primary.is_empty() => secondary,
                _ => return false,
            };
            patterns.iter().any(|re| re.is_match(subject))
        })
        .map(|(rule, _)| {
            let (numbering, description) = (rule.extract)(primary, secondary);
            (rule.depth, numbering, description)
        })
}

pub fn classify(row: &RawRow) -> Classification {
    let primary = row.text(COL_PRIMARY);
    let secondary = row.text(COL_SECONDARY);

    if let Some((depth, numbering, description)) = match_label(&primary, &secondary) {
        if is_summary_label(&description) {
            return Classification::Skip(SkipReason::SummaryRow);
        }
        let description = if description.is_empty() {
            NO_DESCRIPTION.to_string()
        } else {
            description
        };
        return Classification::Structural {
            depth,
            numbering,
            description,
        };
    }

    if secondary.is_empty() {
        return Classification::Skip(if row.is_empty() {
            SkipReason::Blank
        } else {
            SkipReason::Unlabeled
        });
    }
    if total_prefix_regex().is_match(&secondary) {
        return Classification::Skip(SkipReason::SummaryRow);
    }

    let priced =
        parse_currency(row.cell(COL_UNIT_PRICE)) != 0 || parse_currency(row.cell(COL_TOTAL_PRICE)) != 0;
    if priced {
        Classification::Leaf {
            description: secondary,
        }
    } else {
        Classification::Skip(SkipReason::Unlabeled)
    }
}

/// Classifies a row and, when it belongs in the outline, builds its node.
pub fn classify_row(row: &RawRow) -> Result<ClassifiedRow, SkipReason> {
    let (depth, numbering, description) = match classify(row) {
        Classification::Structural {
            depth,
            numbering,
            description,
        } => (depth, numbering, description),
        Classification::Leaf { description } => (Depth::Leaf, String::new(), description),
        Classification::Skip(reason) => return Err(reason),
    };

    let node = OutlineNode {
        id: format!("row-{}", row.index),
        depth,
        numbering,
        description,
        qty: Scalar::from_cell(row.cell(COL_QTY)),
        hours: Scalar::from_cell(row.cell(COL_HOURS)),
        days: Scalar::from_cell(row.cell(COL_DAYS)),
        months: Scalar::from_cell(row.cell(COL_MONTHS)),
        volume: Scalar::from_cell(row.cell(COL_VOLUME)),
        unit: Scalar::from_cell(row.cell(COL_UNIT)),
        unit_price: parse_currency(row.cell(COL_UNIT_PRICE)),
        total_price: parse_currency(row.cell(COL_TOTAL_PRICE)),
        children: Vec::new(),
    };
    Ok(ClassifiedRow { depth, node })
}
