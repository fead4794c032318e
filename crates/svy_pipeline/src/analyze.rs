//! Analysis stage: response batch → per-question, per-option statistics.
//!
//! Intervals are computed against the realized response count of each
//! question, never the planned sample size.

use serde::{Deserialize, Serialize};

use svy_algo::sampling::{analyze_question_results, OptionStats};
use svy_io::responses::ResponsesFile;
use svy_io::IoError;

use crate::{PipelineError, ENGINE_VERSION};

/// Analysis artifact for one response batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyAnalysisDoc {
    pub engine_version: String,
    pub confidence_level: u8,
    pub questions: Vec<QuestionAnalysis>,
}

/// Per-question statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionAnalysis {
    pub id: String,
    pub prompt: Option<String>,
    /// Responses actually collected for this question.
    pub realized_n: u64,
    pub options: Vec<OptionStats>,
}

/// Analyze every question in a response batch.
pub fn analyze_responses(file: &ResponsesFile) -> Result<SurveyAnalysisDoc, PipelineError> {
    let confidence = svy_core::ConfidenceLevel::from_percent(file.confidence_level)
        .map_err(|_| {
            PipelineError::Io(IoError::Responses(format!(
                "confidence_level must be 90, 95 or 99 (got {})",
                file.confidence_level
            )))
        })?;

    let questions = file
        .questions
        .iter()
        .map(|q| QuestionAnalysis {
            id: q.id.clone(),
            prompt: q.prompt.clone(),
            realized_n: q.answers.len() as u64,
            options: analyze_question_results(&q.answers, &q.options, confidence),
        })
        .collect();

    Ok(SurveyAnalysisDoc {
        engine_version: ENGINE_VERSION.to_string(),
        confidence_level: file.confidence_level,
        questions,
    })
}
