use crate::model::QuizMode;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to obtain a question bank. Shown to the learner as an error panel.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error! status: {status} ({url})")]
    Status { url: String, status: u16 },

    #[error("could not read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON Parsing Error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum QuizError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("no questions available for mode '{0}'")]
    EmptyBank(QuizMode),

    #[error("Data Integrity Error in question '{question}': {detail}")]
    Integrity { question: String, detail: String },

    #[error("row is incomplete, still missing: {}", missing.join(", "))]
    IncompleteRow { missing: Vec<String> },

    #[error("inputs are locked until the learner advances")]
    Locked,

    #[error("this question has already been answered")]
    AlreadyAnswered,

    #[error("nothing to advance: the current row or step has not been answered")]
    NotValidated,

    #[error("unknown piece '{0}'")]
    UnknownPiece(String),

    #[error("unknown variable '{0}'")]
    UnknownVariable(String),

    #[error("option {index} is out of range ({count} options)")]
    UnknownOption { index: usize, count: usize },

    #[error("question '{question}' is a {actual} question, expected {expected}")]
    WrongKind {
        question: String,
        expected: QuizMode,
        actual: QuizMode,
    },

    #[error("the quiz is already complete")]
    QuizComplete,
}

pub type QuizResult<T> = Result<T, QuizError>;
