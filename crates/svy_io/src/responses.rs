//! Response-batch wire types and loader.
//!
//! A response batch is the per-question list of collected answer strings plus
//! the question's defined option set, as exported by whatever collected the
//! interviews. The engine only needs strings; interview metadata stays with
//! the collaborator that owns persistence.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::canonical::read_local_file;
use crate::{IoError, IoResult};

/// A batch of collected responses for one survey.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResponsesFile {
    /// Confidence level in percent used for the interval computations.
    pub confidence_level: u8,
    pub questions: Vec<QuestionResponses>,
}

/// One question's option set and collected answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuestionResponses {
    pub id: String,
    #[serde(default)]
    pub prompt: Option<String>,
    pub options: Vec<String>,
    /// Raw answer strings, one per interview. May legitimately be empty.
    #[serde(default)]
    pub answers: Vec<String>,
}

/// Parse a response batch from raw JSON bytes.
pub fn parse_responses(bytes: &[u8]) -> IoResult<ResponsesFile> {
    let file: ResponsesFile = serde_json::from_slice(bytes)?;
    check_responses_basics(&file)?;
    Ok(file)
}

/// Load a response batch from a local path (offline only).
pub fn load_responses(path: &Path) -> IoResult<ResponsesFile> {
    parse_responses(&read_local_file(path)?)
}

fn check_responses_basics(file: &ResponsesFile) -> IoResult<()> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    for q in &file.questions {
        if q.id.trim().is_empty() {
            return Err(IoError::Responses("question id must not be empty".into()));
        }
        if !seen.insert(q.id.as_str()) {
            return Err(IoError::Responses(format!("duplicate question id: {}", q.id)));
        }
        if q.options.is_empty() {
            return Err(IoError::Responses(format!(
                "question {} has no options",
                q.id
            )));
        }
    }
    Ok(())
}
