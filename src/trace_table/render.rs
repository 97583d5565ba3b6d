use super::engine::RowVerdict;
use super::pieces::{build_pool, Piece};
use super::placement::PlacementTracker;
use crate::model::Question;
use crate::shuffle;
use crate::view::{code_view, Action, CodeLine, Feedback};
use fastrand::Rng;
use serde::Serialize;

/// A row that has already been walked through, shown with its correct values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletedRow {
    pub line: usize,
    /// `(variable, value)` in declared variable order.
    pub values: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotView {
    pub variable: String,
    pub piece: Option<Piece>,
    /// Set once the row is validated.
    pub correct: Option<bool>,
    /// Expected value, shown inline next to an incorrect slot.
    pub hint: Option<String>,
}

impl SlotView {
    pub fn display_value(&self) -> &str {
        self.piece.as_ref().map(Piece::value).unwrap_or("?")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderModel {
    pub title: String,
    pub variables: Vec<String>,
    pub row_index: usize,
    pub row_count: usize,
    pub code: Vec<CodeLine>,
    pub history: Vec<CompletedRow>,
    pub slots: Vec<SlotView>,
    pub available: Vec<Piece>,
    pub confirm_enabled: bool,
    /// Pieces may not be dragged and slots accept no drops.
    pub locked: bool,
    pub feedback: Option<Feedback>,
}

impl RenderModel {
    pub fn is_question_complete(&self) -> bool {
        self.row_index >= self.row_count
    }

    pub fn action(&self) -> Option<Action> {
        match &self.feedback {
            Some(fb) => Some(fb.action),
            None if self.is_question_complete() => None,
            None => Some(Action::ConfirmRow),
        }
    }
}

/// Builds the view of row `row_index`. The pool is regenerated and reshuffled
/// on every call; pieces already sitting in a slot are left out of
/// `available`. A `row_index` past the last row yields the finished table.
pub fn render_row(
    question: &Question,
    row_index: usize,
    placements: &PlacementTracker,
    verdict: Option<&RowVerdict>,
    rng: &mut Rng,
) -> RenderModel {
    let history = question
        .rows
        .iter()
        .take(row_index)
        .map(|row| CompletedRow {
            line: row.line,
            values: question
                .variables
                .iter()
                .map(|v| {
                    let value = row.correct_values.get(v).cloned().unwrap_or_default();
                    (v.clone(), value)
                })
                .collect(),
        })
        .collect();

    let mut model = RenderModel {
        title: question.title.clone(),
        variables: question.variables.clone(),
        row_index,
        row_count: question.rows.len(),
        code: code_view(question, None),
        history,
        slots: Vec::new(),
        available: Vec::new(),
        confirm_enabled: false,
        locked: true,
        feedback: None,
    };

    let Some(row) = question.rows.get(row_index) else {
        return model;
    };

    model.code = code_view(question, Some(row.line));

    let mut pool = build_pool(question, row);
    shuffle::shuffle(rng, &mut pool);

    model.slots = question
        .variables
        .iter()
        .map(|var| {
            let piece = placements
                .get(var)
                .and_then(|id| pool.iter().find(|p| &p.id == id))
                .cloned();
            let result = verdict.and_then(|vd| vd.slot(var));
            SlotView {
                variable: var.clone(),
                piece,
                correct: result.map(|r| r.correct),
                hint: result.filter(|r| !r.correct).map(|r| r.expected.clone()),
            }
        })
        .collect();

    pool.retain(|p| !placements.is_placed(&p.id));
    model.available = pool;

    model.locked = verdict.is_some();
    model.confirm_enabled = !model.locked && placements.is_complete(&question.variables);
    model.feedback = verdict.map(|vd| Feedback {
        correct: vd.all_correct,
        explanation: vd.explanation.clone(),
        action: vd.next_action(),
    });

    model
}
