use crate::error::{QuizError, QuizResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashSet};
use strum_macros::{Display, EnumIter, EnumString};

/// The three quiz flavours. Doubles as the `type` tag of a question.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum QuizMode {
    #[default]
    Result,
    StepTrace,
    TraceTable,
}

impl QuizMode {
    /// Name of the static bank file serving this mode.
    pub fn resource(&self) -> &'static str {
        match self {
            QuizMode::Result => "questions_qa.json",
            QuizMode::StepTrace => "questions_trace.json",
            QuizMode::TraceTable => "questions_table.json",
        }
    }

    pub fn badge(&self) -> &'static str {
        match self {
            QuizMode::Result => "Predict the result",
            QuizMode::StepTrace => "Tracing",
            QuizMode::TraceTable => "Trace table",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOption {
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub line: usize,
    pub question: String,
    pub options: Vec<AnswerOption>,
    #[serde(default)]
    pub explanation: String,
}

/// One execution row of a trace table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub line: usize,
    /// Candidate values per variable: the correct one plus decoys.
    pub pieces: BTreeMap<String, Vec<String>>,
    pub correct_values: BTreeMap<String, String>,
    #[serde(default)]
    pub explanation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(default, deserialize_with = "id_from_any")]
    pub id: String,
    #[serde(default, rename = "type")]
    pub kind: QuizMode,
    pub title: String,
    pub code: String,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub variables: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Row>,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default)]
    pub options: Vec<AnswerOption>,
    #[serde(default)]
    pub explanation: String,
}

// Banks in the wild use both `"id": 3` and `"id": "q3"`.
fn id_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Num(i64),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Num(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}

impl Question {
    pub fn code_lines(&self) -> Vec<&str> {
        self.code.split('\n').collect()
    }

    fn integrity(&self, detail: impl Into<String>) -> QuizError {
        QuizError::Integrity {
            question: self.label(),
            detail: detail.into(),
        }
    }

    /// Identifier used in messages; falls back to the title for id-less banks.
    pub fn label(&self) -> String {
        if self.id.is_empty() {
            self.title.clone()
        } else {
            self.id.clone()
        }
    }

    /// Load-time integrity check. A question that passes can always be finished.
    pub fn validate(&self) -> QuizResult<()> {
        self.check_foreign_fields()?;
        match self.kind {
            QuizMode::Result => {
                check_options(&self.options).map_err(|d| self.integrity(d))?;
            }
            QuizMode::StepTrace => {
                if self.steps.is_empty() {
                    return Err(self.integrity("step-trace question has no steps"));
                }
                let line_count = self.code_lines().len();
                for (i, step) in self.steps.iter().enumerate() {
                    if step.line == 0 || step.line > line_count {
                        return Err(self.integrity(format!(
                            "step {} highlights line {} but the code has {} lines",
                            i + 1,
                            step.line,
                            line_count
                        )));
                    }
                    check_options(&step.options)
                        .map_err(|d| self.integrity(format!("step {}: {}", i + 1, d)))?;
                }
            }
            QuizMode::TraceTable => self.validate_trace_table()?,
        }
        Ok(())
    }

    /// Fields filled in that only another question type uses.
    fn foreign_fields(&self) -> Vec<&'static str> {
        let present = [
            ("options", !self.options.is_empty()),
            ("steps", !self.steps.is_empty()),
            ("variables", !self.variables.is_empty()),
            ("rows", !self.rows.is_empty()),
        ];
        let allowed: &[&str] = match self.kind {
            QuizMode::Result => &["options"],
            QuizMode::StepTrace => &["steps"],
            QuizMode::TraceTable => &["variables", "rows"],
        };
        present
            .into_iter()
            .filter(|(name, set)| *set && !allowed.contains(name))
            .map(|(name, _)| name)
            .collect()
    }

    fn check_foreign_fields(&self) -> QuizResult<()> {
        let foreign = self.foreign_fields();
        if foreign.is_empty() {
            return Ok(());
        }
        let owner = if foreign.iter().any(|f| *f == "variables" || *f == "rows") {
            "trace-table"
        } else if foreign.contains(&"steps") {
            "step-trace"
        } else {
            "result"
        };
        Err(self.integrity(format!(
            "declared as {} but carries {} fields ({})",
            self.kind,
            owner,
            foreign.join(", ")
        )))
    }

    fn validate_trace_table(&self) -> QuizResult<()> {
        if self.variables.is_empty() {
            return Err(self.integrity("trace-table question declares no variables"));
        }
        let mut seen = HashSet::new();
        for var in &self.variables {
            if !seen.insert(var.as_str()) {
                return Err(self.integrity(format!("variable '{}' is declared twice", var)));
            }
        }
        if self.rows.is_empty() {
            return Err(self.integrity("trace-table question has no rows"));
        }

        let line_count = self.code_lines().len();
        for (i, row) in self.rows.iter().enumerate() {
            let row_no = i + 1;
            if row.line == 0 || row.line > line_count {
                return Err(self.integrity(format!(
                    "row {} highlights line {} but the code has {} lines",
                    row_no, row.line, line_count
                )));
            }
            for var in &self.variables {
                let correct = row.correct_values.get(var).ok_or_else(|| {
                    self.integrity(format!("row {} has no correct value for '{}'", row_no, var))
                })?;
                let candidates = row.pieces.get(var).ok_or_else(|| {
                    self.integrity(format!("row {} has no pieces for '{}'", row_no, var))
                })?;
                if !candidates.contains(correct) {
                    return Err(self.integrity(format!(
                        "row {}: correct value '{}' for '{}' is not among its pieces",
                        row_no, correct, var
                    )));
                }
            }
            if let Some(stray) = row.pieces.keys().find(|k| !seen.contains(k.as_str())) {
                return Err(self.integrity(format!(
                    "row {} has pieces for undeclared variable '{}'",
                    row_no, stray
                )));
            }
        }
        Ok(())
    }
}

fn check_options(options: &[AnswerOption]) -> Result<(), String> {
    if options.is_empty() {
        return Err("no answer options".to_string());
    }
    if !options.iter().any(|o| o.is_correct) {
        return Err("no option is marked correct".to_string());
    }
    Ok(())
}

/// Index of the first option flagged correct.
pub fn correct_option(options: &[AnswerOption]) -> Option<usize> {
    options.iter().position(|o| o.is_correct)
}

/// `a.`, `b.`, ... labels used next to options.
pub fn option_label(index: usize) -> char {
    (b'a' + (index % 26) as u8) as char
}
