use crate::error::QuizError;
use crate::model::{correct_option, option_label, AnswerOption, Question};
use serde::Serialize;

/// What the primary button of a view does when pressed. The presentation
/// layer maps this to its own callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Action {
    ConfirmRow,
    NextRow,
    NextStep,
    CompleteQuestion,
    NextQuestion,
    Restart,
}

impl Action {
    pub fn label(&self) -> &'static str {
        match self {
            Action::ConfirmRow => "confirm",
            Action::NextRow => "next row",
            Action::NextStep => "next step",
            Action::CompleteQuestion => "complete this question",
            Action::NextQuestion => "next question",
            Action::Restart => "back to mode selection",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeLine {
    /// 1-based, matching the `line` fields of rows and steps.
    pub number: usize,
    pub text: String,
    pub highlighted: bool,
}

pub fn code_view(question: &Question, highlight: Option<usize>) -> Vec<CodeLine> {
    question
        .code_lines()
        .into_iter()
        .enumerate()
        .map(|(i, text)| CodeLine {
            number: i + 1,
            text: text.to_string(),
            highlighted: highlight == Some(i + 1),
        })
        .collect()
}

/// One multiple-choice option as shown after (or before) answering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub label: char,
    pub text: String,
    pub mark: Option<Mark>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mark {
    Correct,
    Incorrect,
}

/// Feedback shown once an answer or a row is locked in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub correct: bool,
    pub explanation: String,
    pub action: Action,
}

impl Feedback {
    pub fn headline(&self) -> &'static str {
        if self.correct {
            "Correct!"
        } else {
            "Not quite..."
        }
    }
}

/// Builds option views. Before answering nothing is marked; afterwards the
/// chosen option is marked, and a wrong choice also reveals the right one.
pub fn option_views(options: &[AnswerOption], chosen: Option<usize>) -> Vec<OptionView> {
    let correct = correct_option(options);
    options
        .iter()
        .enumerate()
        .map(|(i, opt)| {
            let mark = match chosen {
                None => None,
                Some(c) if c == i && opt.is_correct => Some(Mark::Correct),
                Some(c) if c == i => Some(Mark::Incorrect),
                Some(_) if correct == Some(i) => Some(Mark::Correct),
                Some(_) => None,
            };
            OptionView {
                label: option_label(i),
                text: opt.text.clone(),
                mark,
            }
        })
        .collect()
}

/// Static panel shown in place of the quiz when a bank cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPanel {
    pub title: String,
    pub message: String,
    pub action: Action,
}

pub fn error_panel(err: &QuizError) -> ErrorPanel {
    let title = match err {
        QuizError::Fetch(_) => "Failed to load the question data.",
        QuizError::EmptyBank(_) => "There are no questions for this mode yet.",
        QuizError::Integrity { .. } => "The question data is malformed.",
        _ => "Something went wrong.",
    };
    ErrorPanel {
        title: title.to_string(),
        message: err.to_string(),
        action: Action::Restart,
    }
}
