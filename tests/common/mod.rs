#![allow(dead_code)]

use std::sync::Arc;
use tracequiz::model::{QuizMode, Question};
use tracequiz::store::QuestionStore;
use tracequiz::trace_table::{PieceId, TraceTableEngine};

/// Two-row table over `x` and `y`. Row 1 is the classic
/// `{x:["1","2"], y:["a","b"]}` / `{x:"1", y:"a"}` case.
pub const TWO_ROW_TABLE: &str = r#"{
    "id": "xy",
    "type": "trace-table",
    "title": "x and y",
    "code": "x ← 1\ny ← \"a\"\nx ← x + 1",
    "variables": ["x", "y"],
    "rows": [
        {
            "line": 2,
            "pieces": {"x": ["1", "2"], "y": ["a", "b"]},
            "correctValues": {"x": "1", "y": "a"},
            "explanation": "x holds 1 and y holds a."
        },
        {
            "line": 3,
            "pieces": {"x": ["2", "1", "2"], "y": ["a", "c"]},
            "correctValues": {"x": "2", "y": "a"},
            "explanation": "x is incremented; y is untouched."
        }
    ]
}"#;

pub const RESULT_QUESTION: &str = r#"{
    "id": "r1",
    "title": "print",
    "code": "print 4",
    "question": "What is printed?",
    "options": [{"text": "4", "isCorrect": true}, {"text": "5"}]
}"#;

pub fn table_question() -> Arc<Question> {
    Arc::new(serde_json::from_str(TWO_ROW_TABLE).unwrap())
}

pub fn engine(seed: u64) -> TraceTableEngine {
    TraceTableEngine::new(table_question(), fastrand::Rng::with_seed(seed)).unwrap()
}

/// First unplaced piece of `variable` showing `value`.
pub fn piece(e: &TraceTableEngine, variable: &str, value: &str) -> PieceId {
    e.available()
        .into_iter()
        .find(|p| p.variable == variable && p.value() == value)
        .map(|p| p.id.clone())
        .unwrap_or_else(|| panic!("no free piece {}={}", variable, value))
}

pub fn bank(questions: &[&str]) -> String {
    format!("[{}]", questions.join(","))
}

pub fn store(mode: QuizMode, questions: &[&str]) -> QuestionStore {
    QuestionStore::parse(mode, &bank(questions)).unwrap()
}
