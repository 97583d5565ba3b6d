//! Question progression shared by all quiz flavours.

pub mod result;
pub mod step_trace;

use crate::error::{QuizError, QuizResult};
use crate::model::{QuizMode, Question};
use crate::store::QuestionStore;
use crate::trace_table::{Advance, RenderModel, TraceTableEngine};
use crate::view::Action;
use fastrand::Rng;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

pub use result::{ResultQuiz, ResultView};
pub use step_trace::{StepAdvance, StepTrace, StepView};

/// The runner for the question on screen.
pub enum Stage {
    Result(ResultQuiz),
    StepTrace(StepTrace),
    TraceTable(TraceTableEngine),
    Complete,
}

impl Stage {
    fn is_finished(&self) -> bool {
        match self {
            Stage::Result(r) => r.is_answered(),
            Stage::StepTrace(s) => s.is_complete(),
            Stage::TraceTable(e) => e.is_complete(),
            Stage::Complete => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum QuizView {
    Result { number: usize, view: ResultView },
    StepTrace { number: usize, view: StepView },
    TraceTable { number: usize, view: RenderModel },
    Complete { answered: usize, action: Action },
}

/// One run through a mode's bank. Owns all session state.
pub struct QuizSession {
    store: QuestionStore,
    index: usize,
    stage: Stage,
    rng: Rng,
}

impl QuizSession {
    pub fn start(store: QuestionStore, rng: Rng) -> QuizResult<Self> {
        if store.is_empty() {
            return Err(QuizError::EmptyBank(store.mode()));
        }
        let mut session = Self {
            store,
            index: 0,
            stage: Stage::Complete,
            rng,
        };
        session.stage = session.dispatch(0)?;
        info!(
            "started {} quiz with {} questions",
            session.store.mode(),
            session.store.len()
        );
        Ok(session)
    }

    // The question's own type tag picks the runner, not the bank it came from.
    fn dispatch(&mut self, index: usize) -> QuizResult<Stage> {
        let Some(question) = self.store.get(index) else {
            return Ok(Stage::Complete);
        };
        let question: Arc<Question> = Arc::clone(question);
        Ok(match question.kind {
            QuizMode::Result => Stage::Result(ResultQuiz::new(question)?),
            QuizMode::StepTrace => Stage::StepTrace(StepTrace::new(question)?),
            QuizMode::TraceTable => {
                Stage::TraceTable(TraceTableEngine::new(question, self.rng.fork())?)
            }
        })
    }

    pub fn mode(&self) -> QuizMode {
        self.store.mode()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.stage, Stage::Complete)
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }

    /// Question on screen, if any remain.
    pub fn question(&self) -> Option<&Arc<Question>> {
        if self.is_complete() {
            return None;
        }
        self.store.get(self.index)
    }

    /// The trace-table engine of the question on screen. Slot commands on
    /// any other kind of question are a `WrongKind` error.
    pub fn table_mut(&mut self) -> QuizResult<&mut TraceTableEngine> {
        let (label, actual) = match &mut self.stage {
            Stage::TraceTable(engine) => return Ok(engine),
            Stage::Complete => return Err(QuizError::QuizComplete),
            Stage::Result(r) => (r.question().label(), QuizMode::Result),
            Stage::StepTrace(_) => (
                self.store
                    .get(self.index)
                    .map(|q| q.label())
                    .unwrap_or_default(),
                QuizMode::StepTrace,
            ),
        };
        Err(QuizError::WrongKind {
            question: label,
            expected: QuizMode::TraceTable,
            actual,
        })
    }

    /// Moves to the next question once the current one is finished.
    pub fn advance_question(&mut self) -> QuizResult<()> {
        if self.is_complete() {
            return Err(QuizError::QuizComplete);
        }
        if !self.stage.is_finished() {
            return Err(QuizError::NotValidated);
        }
        self.index += 1;
        self.stage = self.dispatch(self.index)?;
        if self.is_complete() {
            info!("quiz complete after {} questions", self.store.len());
        } else {
            info!("question {}/{}", self.index + 1, self.store.len());
        }
        Ok(())
    }

    /// Follows the "next" action of whatever feedback is showing: next row,
    /// next step, or next question when the current one is done.
    pub fn next(&mut self) -> QuizResult<()> {
        let question_done = match &mut self.stage {
            Stage::Complete => return Err(QuizError::QuizComplete),
            Stage::Result(r) => {
                if !r.is_answered() {
                    return Err(QuizError::NotValidated);
                }
                true
            }
            Stage::StepTrace(s) => s.advance()? == StepAdvance::QuestionComplete,
            Stage::TraceTable(e) => e.advance()? == Advance::QuestionComplete,
        };
        if question_done {
            self.advance_question()?;
        }
        Ok(())
    }

    /// Answers a multiple-choice option in result or step-trace mode.
    pub fn answer(&mut self, option: usize) -> QuizResult<crate::view::Feedback> {
        match &mut self.stage {
            Stage::Result(r) => r.answer(option),
            Stage::StepTrace(s) => s.answer(option),
            Stage::TraceTable(e) => Err(QuizError::WrongKind {
                question: e.question().label(),
                expected: QuizMode::Result,
                actual: QuizMode::TraceTable,
            }),
            Stage::Complete => Err(QuizError::QuizComplete),
        }
    }

    pub fn view(&mut self) -> QuizView {
        let number = self.index + 1;
        match &mut self.stage {
            Stage::Result(r) => QuizView::Result {
                number,
                view: r.view(),
            },
            Stage::StepTrace(s) => QuizView::StepTrace {
                number,
                view: s.view(),
            },
            Stage::TraceTable(e) => QuizView::TraceTable {
                number,
                view: e.render(),
            },
            Stage::Complete => QuizView::Complete {
                answered: self.store.len(),
                action: Action::Restart,
            },
        }
    }
}
