use crate::model::{Question, Row};
use serde::Serialize;
use std::fmt;

/// Identity of a piece within one row render: value plus a per-row serial,
/// so two pieces showing the same value stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PieceId {
    pub value: String,
    pub serial: usize,
}

impl PieceId {
    pub fn new(value: impl Into<String>, serial: usize) -> Self {
        Self {
            value: value.into(),
            serial,
        }
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.value, self.serial)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Piece {
    pub id: PieceId,
    /// The variable whose candidate list produced this piece.
    pub variable: String,
}

impl Piece {
    pub fn value(&self) -> &str {
        &self.id.value
    }
}

/// Builds the full pool for a row: one piece per candidate, variables in
/// declared order, candidates in listed order. The serial counter runs across
/// the whole row, so rebuilding the same row yields the same ids.
pub fn build_pool(question: &Question, row: &Row) -> Vec<Piece> {
    let mut pool = Vec::new();
    let mut serial = 0;
    for var in &question.variables {
        let Some(candidates) = row.pieces.get(var) else {
            continue;
        };
        for value in candidates {
            pool.push(Piece {
                id: PieceId::new(value.clone(), serial),
                variable: var.clone(),
            });
            serial += 1;
        }
    }
    pool
}
