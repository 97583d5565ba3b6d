use crate::error::{QuizError, QuizResult};
use crate::model::{QuizMode, Question};
use crate::view::{code_view, option_views, Action, CodeLine, Feedback, OptionView};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// "What does this program print?" style multiple choice.
pub struct ResultQuiz {
    question: Arc<Question>,
    chosen: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultView {
    pub title: String,
    pub badge: &'static str,
    pub code: Vec<CodeLine>,
    pub prompt: String,
    pub options: Vec<OptionView>,
    pub locked: bool,
    pub feedback: Option<Feedback>,
}

impl ResultQuiz {
    pub fn new(question: Arc<Question>) -> QuizResult<Self> {
        if question.kind != QuizMode::Result {
            return Err(QuizError::WrongKind {
                question: question.label(),
                expected: QuizMode::Result,
                actual: question.kind,
            });
        }
        question.validate()?;
        Ok(Self {
            question,
            chosen: None,
        })
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn is_answered(&self) -> bool {
        self.chosen.is_some()
    }

    pub fn answer(&mut self, index: usize) -> QuizResult<Feedback> {
        if self.chosen.is_some() {
            return Err(QuizError::AlreadyAnswered);
        }
        let count = self.question.options.len();
        if index >= count {
            return Err(QuizError::UnknownOption { index, count });
        }
        self.chosen = Some(index);
        debug!("answered option {} of '{}'", index, self.question.label());
        self.feedback().ok_or(QuizError::NotValidated)
    }

    fn feedback(&self) -> Option<Feedback> {
        let chosen = self.chosen?;
        Some(Feedback {
            correct: self.question.options[chosen].is_correct,
            explanation: self.question.explanation.clone(),
            action: Action::NextQuestion,
        })
    }

    pub fn view(&self) -> ResultView {
        ResultView {
            title: self.question.title.clone(),
            badge: QuizMode::Result.badge(),
            code: code_view(&self.question, None),
            prompt: self.question.question.clone(),
            options: option_views(&self.question.options, self.chosen),
            locked: self.is_answered(),
            feedback: self.feedback(),
        }
    }
}
