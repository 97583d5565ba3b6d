use super::pieces::PieceId;
use std::collections::BTreeMap;

/// Which piece currently sits in which variable slot.
///
/// A slot holds at most one piece and a piece sits in at most one slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlacementTracker {
    slots: BTreeMap<String, PieceId>,
}

impl PlacementTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `piece` to `variable` and returns the piece it displaced, if any.
    /// If the piece was sitting in another slot, that slot is emptied.
    pub fn place(&mut self, variable: &str, piece: PieceId) -> Option<PieceId> {
        self.slots.retain(|var, id| var == variable || *id != piece);
        let previous = self.slots.insert(variable.to_string(), piece.clone());
        previous.filter(|old| *old != piece)
    }

    pub fn remove(&mut self, variable: &str) -> Option<PieceId> {
        self.slots.remove(variable)
    }

    pub fn get(&self, variable: &str) -> Option<&PieceId> {
        self.slots.get(variable)
    }

    pub fn is_placed(&self, piece: &PieceId) -> bool {
        self.slots.values().any(|id| id == piece)
    }

    pub fn is_complete<S: AsRef<str>>(&self, required: &[S]) -> bool {
        required.iter().all(|v| self.slots.contains_key(v.as_ref()))
    }

    /// Required variables that are still empty, in the order given.
    pub fn missing<S: AsRef<str>>(&self, required: &[S]) -> Vec<String> {
        required
            .iter()
            .map(AsRef::as_ref)
            .filter(|v| !self.slots.contains_key(*v))
            .map(str::to_string)
            .collect()
    }

    pub fn snapshot(&self) -> &BTreeMap<String, PieceId> {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}
