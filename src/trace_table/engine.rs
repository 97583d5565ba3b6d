use super::pieces::{build_pool, Piece, PieceId};
use super::placement::PlacementTracker;
use super::render::{render_row, RenderModel};
use crate::error::{QuizError, QuizResult};
use crate::gesture::{DropHandler, DropOutcome};
use crate::model::{QuizMode, Question, Row};
use crate::view::Action;
use fastrand::Rng;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotResult {
    pub variable: String,
    pub placed: String,
    pub expected: String,
    pub correct: bool,
}

/// Outcome of confirming a row. Correctness is decided per variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowVerdict {
    pub row_index: usize,
    pub slots: Vec<SlotResult>,
    pub all_correct: bool,
    pub explanation: String,
    pub is_last_row: bool,
}

impl RowVerdict {
    pub fn slot(&self, variable: &str) -> Option<&SlotResult> {
        self.slots.iter().find(|s| s.variable == variable)
    }

    pub fn next_action(&self) -> Action {
        if self.is_last_row {
            Action::CompleteQuestion
        } else {
            Action::NextRow
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    RowInProgress,
    RowValidated(RowVerdict),
    QuestionComplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    NextRow(usize),
    QuestionComplete,
}

/// Walks one trace-table question row by row.
pub struct TraceTableEngine {
    question: Arc<Question>,
    row_index: usize,
    tracker: PlacementTracker,
    pool: Vec<Piece>,
    phase: Phase,
    rng: Rng,
}

impl TraceTableEngine {
    pub fn new(question: Arc<Question>, rng: Rng) -> QuizResult<Self> {
        if question.kind != QuizMode::TraceTable {
            return Err(QuizError::WrongKind {
                question: question.label(),
                expected: QuizMode::TraceTable,
                actual: question.kind,
            });
        }
        question.validate()?;

        let pool = build_pool(&question, &question.rows[0]);
        info!(
            "trace table '{}': {} rows, variables [{}]",
            question.label(),
            question.rows.len(),
            question.variables.join(", ")
        );
        Ok(Self {
            question,
            row_index: 0,
            tracker: PlacementTracker::new(),
            pool,
            phase: Phase::RowInProgress,
            rng,
        })
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn row_index(&self) -> usize {
        self.row_index
    }

    pub fn row(&self) -> Option<&Row> {
        self.question.rows.get(self.row_index)
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn placements(&self) -> &PlacementTracker {
        &self.tracker
    }

    /// Every piece of the current row, placed or not, in generation order.
    pub fn pool(&self) -> &[Piece] {
        &self.pool
    }

    pub fn available(&self) -> Vec<&Piece> {
        self.pool
            .iter()
            .filter(|p| !self.tracker.is_placed(&p.id))
            .collect()
    }

    pub fn is_locked(&self) -> bool {
        !matches!(self.phase, Phase::RowInProgress)
    }

    pub fn is_row_complete(&self) -> bool {
        self.tracker.is_complete(&self.question.variables)
    }

    pub fn piece(&self, id: &PieceId) -> Option<&Piece> {
        self.pool.iter().find(|p| &p.id == id)
    }

    /// Puts `piece` into `variable`'s slot, returning whatever was there before.
    pub fn place(&mut self, variable: &str, piece: &PieceId) -> QuizResult<Option<PieceId>> {
        if self.is_locked() {
            return Err(QuizError::Locked);
        }
        if !self.question.variables.iter().any(|v| v == variable) {
            return Err(QuizError::UnknownVariable(variable.to_string()));
        }
        if self.piece(piece).is_none() {
            return Err(QuizError::UnknownPiece(piece.to_string()));
        }
        let displaced = self.tracker.place(variable, piece.clone());
        debug!("placed '{}' in '{}' (displaced {:?})", piece, variable, displaced);
        Ok(displaced)
    }

    pub fn remove(&mut self, variable: &str) -> QuizResult<Option<PieceId>> {
        if self.is_locked() {
            return Err(QuizError::Locked);
        }
        if !self.question.variables.iter().any(|v| v == variable) {
            return Err(QuizError::UnknownVariable(variable.to_string()));
        }
        Ok(self.tracker.remove(variable))
    }

    /// Checks the filled row and locks it. Fails without side effects when a
    /// slot is still empty or the row was already checked.
    pub fn confirm(&mut self) -> QuizResult<&RowVerdict> {
        if self.is_locked() {
            return Err(QuizError::Locked);
        }
        let missing = self.tracker.missing(&self.question.variables);
        if !missing.is_empty() {
            return Err(QuizError::IncompleteRow { missing });
        }
        let row = &self.question.rows[self.row_index];

        let slots: Vec<SlotResult> = self
            .question
            .variables
            .iter()
            .map(|var| {
                let placed = self
                    .tracker
                    .get(var)
                    .map(|id| id.value.clone())
                    .unwrap_or_default();
                let expected = row.correct_values.get(var).cloned().unwrap_or_default();
                SlotResult {
                    variable: var.clone(),
                    correct: placed == expected,
                    placed,
                    expected,
                }
            })
            .collect();

        let verdict = RowVerdict {
            row_index: self.row_index,
            all_correct: slots.iter().all(|s| s.correct),
            slots,
            explanation: row.explanation.clone(),
            is_last_row: self.row_index + 1 == self.question.rows.len(),
        };
        info!(
            "row {}/{} checked: all_correct={}",
            self.row_index + 1,
            self.question.rows.len(),
            verdict.all_correct
        );

        self.phase = Phase::RowValidated(verdict);
        self.verdict().ok_or(QuizError::NotValidated)
    }

    pub fn verdict(&self) -> Option<&RowVerdict> {
        match &self.phase {
            Phase::RowValidated(v) => Some(v),
            _ => None,
        }
    }

    /// Moves past a validated row.
    pub fn advance(&mut self) -> QuizResult<Advance> {
        let is_last = match &self.phase {
            Phase::RowValidated(v) => v.is_last_row,
            Phase::RowInProgress => return Err(QuizError::NotValidated),
            Phase::QuestionComplete => return Ok(Advance::QuestionComplete),
        };

        self.tracker.clear();
        if is_last {
            self.row_index = self.question.rows.len();
            self.pool.clear();
            self.phase = Phase::QuestionComplete;
            info!("trace table '{}' complete", self.question.label());
            return Ok(Advance::QuestionComplete);
        }

        self.row_index += 1;
        self.pool = build_pool(&self.question, &self.question.rows[self.row_index]);
        self.phase = Phase::RowInProgress;
        Ok(Advance::NextRow(self.row_index))
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::QuestionComplete
    }

    /// Fresh view of the current state; piece order is reshuffled every time.
    pub fn render(&mut self) -> RenderModel {
        let verdict = match &self.phase {
            Phase::RowValidated(v) => Some(v),
            _ => None,
        };
        render_row(
            &self.question,
            self.row_index,
            &self.tracker,
            verdict,
            &mut self.rng,
        )
    }
}

impl DropHandler for TraceTableEngine {
    fn on_piece_dropped(&mut self, piece: &PieceId, slot: Option<&str>) -> QuizResult<DropOutcome> {
        match slot {
            Some(variable) => {
                let displaced = self.place(variable, piece)?;
                Ok(DropOutcome::Placed { displaced })
            }
            None => Ok(DropOutcome::Cancelled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Row;
    use std::collections::BTreeMap;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn row(line: usize, x: (&[&str], &str), y: (&[&str], &str), explanation: &str) -> Row {
        Row {
            line,
            pieces: BTreeMap::from([("x".into(), strings(x.0)), ("y".into(), strings(y.0))]),
            correct_values: BTreeMap::from([("x".into(), x.1.into()), ("y".into(), y.1.into())]),
            explanation: explanation.into(),
        }
    }

    fn question() -> Arc<Question> {
        Arc::new(Question {
            id: "t1".into(),
            kind: QuizMode::TraceTable,
            title: "two rows".into(),
            code: "x = 1\ny = \"a\"".into(),
            question: String::new(),
            variables: strings(&["x", "y"]),
            rows: vec![
                row(1, (&["1", "2"], "1"), (&["a", "b"], "a"), "x gets 1"),
                row(2, (&["1", "3"], "1"), (&["a", "c"], "a"), "y gets a"),
            ],
            steps: vec![],
            options: vec![],
            explanation: String::new(),
        })
    }

    fn engine() -> TraceTableEngine {
        TraceTableEngine::new(question(), Rng::with_seed(3)).unwrap()
    }

    fn id_of(e: &TraceTableEngine, variable: &str, value: &str) -> PieceId {
        e.pool()
            .iter()
            .find(|p| p.variable == variable && p.value() == value)
            .map(|p| p.id.clone())
            .unwrap()
    }

    #[test]
    fn test_confirm_incomplete_row_changes_nothing() {
        let mut e = engine();
        let x1 = id_of(&e, "x", "1");
        e.place("x", &x1).unwrap();
        let err = e.confirm().unwrap_err();
        assert!(matches!(err, QuizError::IncompleteRow { ref missing } if missing == &["y"]));
        assert_eq!(e.phase(), &Phase::RowInProgress);
        assert_eq!(e.placements().len(), 1);
    }

    #[test]
    fn test_inputs_lock_after_confirm() {
        let mut e = engine();
        let (x1, ya) = (id_of(&e, "x", "1"), id_of(&e, "y", "a"));
        e.place("x", &x1).unwrap();
        e.place("y", &ya).unwrap();
        e.confirm().unwrap();

        let x2 = id_of(&e, "x", "2");
        assert!(matches!(e.place("x", &x2), Err(QuizError::Locked)));
        assert!(matches!(e.remove("x"), Err(QuizError::Locked)));
        assert!(matches!(e.confirm(), Err(QuizError::Locked)));
        assert!(matches!(
            e.on_piece_dropped(&x2, Some("x")),
            Err(QuizError::Locked)
        ));
    }

    #[test]
    fn test_render_after_confirm_carries_verdict() {
        let mut e = engine();
        let (x2, ya) = (id_of(&e, "x", "2"), id_of(&e, "y", "a"));
        e.place("x", &x2).unwrap();
        e.place("y", &ya).unwrap();
        assert!(!e.render().locked);
        e.confirm().unwrap();

        let model = e.render();
        assert!(model.locked);
        assert!(!model.confirm_enabled);
        assert_eq!(model.slots[0].correct, Some(false));
        assert_eq!(model.slots[0].hint.as_deref(), Some("1"));
        assert_eq!(model.slots[1].correct, Some(true));
        assert_eq!(model.feedback.map(|f| f.action), Some(Action::NextRow));
    }

    #[test]
    fn test_advance_requires_validation() {
        let mut e = engine();
        assert!(matches!(e.advance(), Err(QuizError::NotValidated)));
    }

    #[test]
    fn test_advance_resets_placements_and_regenerates_pool() {
        let mut e = engine();
        let (x2, yb) = (id_of(&e, "x", "2"), id_of(&e, "y", "b"));
        e.place("x", &x2).unwrap();
        e.place("y", &yb).unwrap();
        assert!(!e.confirm().unwrap().all_correct);

        assert_eq!(e.advance().unwrap(), Advance::NextRow(1));
        assert!(e.placements().is_empty());
        assert!(e.pool().iter().any(|p| p.value() == "3"));
        assert_eq!(e.phase(), &Phase::RowInProgress);
    }

    #[test]
    fn test_unknown_slot_and_piece() {
        let mut e = engine();
        let x1 = id_of(&e, "x", "1");
        assert!(matches!(e.place("z", &x1), Err(QuizError::UnknownVariable(_))));
        assert!(matches!(
            e.place("x", &PieceId::new("9", 40)),
            Err(QuizError::UnknownPiece(_))
        ));
    }

    #[test]
    fn test_drop_on_nothing_cancels() {
        let mut e = engine();
        let x1 = id_of(&e, "x", "1");
        assert_eq!(e.on_piece_dropped(&x1, None).unwrap(), DropOutcome::Cancelled);
        assert!(e.placements().is_empty());
    }

    #[test]
    fn test_wrong_kind_is_rejected() {
        let mut q = (*question()).clone();
        q.kind = QuizMode::Result;
        assert!(matches!(
            TraceTableEngine::new(Arc::new(q), Rng::new()),
            Err(QuizError::WrongKind { .. })
        ));
    }
}
