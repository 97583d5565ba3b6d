use crate::error::{QuizError, QuizResult};
use crate::model::{QuizMode, Question, Step};
use crate::view::{code_view, option_views, Action, CodeLine, Feedback, OptionView};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAdvance {
    NextStep(usize),
    QuestionComplete,
}

/// One multiple-choice question per executed step, with the step's line lit.
pub struct StepTrace {
    question: Arc<Question>,
    step_index: usize,
    chosen: Option<usize>,
    complete: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepView {
    pub title: String,
    pub badge: &'static str,
    pub step_index: usize,
    pub step_count: usize,
    pub code: Vec<CodeLine>,
    pub prompt: String,
    pub options: Vec<OptionView>,
    pub locked: bool,
    pub feedback: Option<Feedback>,
}

impl StepTrace {
    pub fn new(question: Arc<Question>) -> QuizResult<Self> {
        if question.kind != QuizMode::StepTrace {
            return Err(QuizError::WrongKind {
                question: question.label(),
                expected: QuizMode::StepTrace,
                actual: question.kind,
            });
        }
        question.validate()?;
        Ok(Self {
            question,
            step_index: 0,
            chosen: None,
            complete: false,
        })
    }

    pub fn step(&self) -> &Step {
        &self.question.steps[self.step_index]
    }

    pub fn is_last_step(&self) -> bool {
        self.step_index + 1 == self.question.steps.len()
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn answer(&mut self, index: usize) -> QuizResult<Feedback> {
        if self.complete {
            return Err(QuizError::Locked);
        }
        if self.chosen.is_some() {
            return Err(QuizError::AlreadyAnswered);
        }
        let count = self.step().options.len();
        if index >= count {
            return Err(QuizError::UnknownOption { index, count });
        }
        self.chosen = Some(index);
        debug!(
            "step {}/{} of '{}': chose option {}",
            self.step_index + 1,
            self.question.steps.len(),
            self.question.label(),
            index
        );
        self.feedback().ok_or(QuizError::NotValidated)
    }

    fn feedback(&self) -> Option<Feedback> {
        let chosen = self.chosen?;
        let step = self.step();
        Some(Feedback {
            correct: step.options[chosen].is_correct,
            explanation: step.explanation.clone(),
            action: if self.is_last_step() {
                Action::CompleteQuestion
            } else {
                Action::NextStep
            },
        })
    }

    pub fn advance(&mut self) -> QuizResult<StepAdvance> {
        if self.complete {
            return Ok(StepAdvance::QuestionComplete);
        }
        if self.chosen.is_none() {
            return Err(QuizError::NotValidated);
        }
        if self.is_last_step() {
            self.complete = true;
            return Ok(StepAdvance::QuestionComplete);
        }
        self.step_index += 1;
        self.chosen = None;
        Ok(StepAdvance::NextStep(self.step_index))
    }

    pub fn view(&self) -> StepView {
        let step = self.step();
        StepView {
            title: self.question.title.clone(),
            badge: QuizMode::StepTrace.badge(),
            step_index: self.step_index,
            step_count: self.question.steps.len(),
            code: code_view(&self.question, Some(step.line)),
            prompt: step.question.clone(),
            options: option_views(&step.options, self.chosen),
            locked: self.chosen.is_some(),
            feedback: self.feedback(),
        }
    }
}
