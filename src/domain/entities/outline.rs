use serde::{Deserialize, Serialize};

use crate::domain::entities::row::Cell;

pub const NO_DESCRIPTION: &str = "No Description";

/// Outline level inferred from a row's numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Depth {
    /// `A)`
    Phase,
    /// `I.`
    Section,
    /// `A.`
    Subsection,
    /// `1.`
    Item,
    /// `a.`
    Leaf,
}

impl Depth {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Depth::Phase),
            1 => Some(Depth::Section),
            2 => Some(Depth::Subsection),
            3 => Some(Depth::Item),
            4 => Some(Depth::Leaf),
            _ => None,
        }
    }
}

impl From<Depth> for u8 {
    fn from(value: Depth) -> Self {
        value as u8
    }
}

impl TryFrom<u8> for Depth {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Depth::from_index(value as usize).ok_or_else(|| format!("depth out of range: {value}"))
    }
}

/// Passthrough value of a quantity-like column, type kept from the sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    pub fn from_cell(cell: &Cell) -> Option<Self> {
        match cell {
            Cell::Empty => None,
            Cell::Text(v) if v.is_empty() => None,
            Cell::Text(v) => Some(Scalar::Text(v.clone())),
            Cell::Number(v) if !v.is_finite() => None,
            Cell::Number(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => {
                Some(Scalar::Int(*v as i64))
            }
            Cell::Number(v) => Some(Scalar::Float(*v)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineNode {
    pub id: String,
    pub depth: Depth,
    pub numbering: String,
    pub description: String,
    #[serde(default, alias = "quantity", skip_serializing_if = "Option::is_none")]
    pub qty: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub months: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<Scalar>,
    #[serde(default)]
    pub unit_price: i64,
    #[serde(default)]
    pub total_price: i64,
    #[serde(default)]
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, the node itself included.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(OutlineNode::node_count).sum::<usize>()
    }
}
