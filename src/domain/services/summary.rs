use serde::Serialize;

use crate::domain::entities::outline::OutlineNode;
use crate::domain::services::aggregator::add_totals;

/// DPP markup and the VAT on top of it are both 11%.
pub const DEFAULT_MARKUP_MULTIPLIER: f64 = 1.11;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseTotal {
    pub numbering: String,
    pub description: String,
    pub total_price: i64,
}

/// Totals shown in the viewer's summary panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    pub phases: Vec<PhaseTotal>,
    pub base_total: i64,
    pub dpp: i64,
    pub grand_total: i64,
}

impl BudgetSummary {
    pub fn from_forest(roots: &[OutlineNode], multiplier: f64) -> Self {
        let phases: Vec<PhaseTotal> = roots
            .iter()
            .map(|root| PhaseTotal {
                numbering: root.numbering.clone(),
                description: root.description.clone(),
                total_price: root.total_price,
            })
            .collect();
        let totals: Vec<i64> = phases.iter().map(|phase| phase.total_price).collect();
        let (base_total, dpp, grand_total) = display_totals(&totals, multiplier);
        Self {
            phases,
            base_total,
            dpp,
            grand_total,
        }
    }
}

/// Returns `(base, dpp, grand_total)` where each markup step is rounded
/// before the next one is applied.
pub fn display_totals(root_totals: &[i64], multiplier: f64) -> (i64, i64, i64) {
    let base = root_totals.iter().copied().fold(0, add_totals);
    let dpp = round_half_up(base as f64 * multiplier);
    let grand_total = round_half_up(dpp as f64 * multiplier);
    (base, dpp, grand_total)
}

// Halves round toward positive infinity, matching the browser.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Formats an amount as Indonesian rupiah, e.g. `Rp 1.700.000`.
pub fn format_idr(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-Rp {grouped}")
    } else {
        format!("Rp {grouped}")
    }
}
