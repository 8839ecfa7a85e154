//! Meeting transcript summarization.
//!
//! A [`SummarizeRequest`] is normalized into one prompt, sent to Gemini, and the
//! response is reduced to a single summary string. Input problems are reported
//! before configuration is consulted and before any network call.

use crate::error::Error;
use crate::gateway::gemini::{GeminiClient, GenerateContentResponse};
use log::*;
use serde::{Deserialize, Serialize};
use service::config::Config;
use utoipa::ToSchema;

/// Instruction used when the caller supplies a transcript but no prompt.
pub const DEFAULT_INSTRUCTION: &str = "Summarize this meeting:";

/// Summary returned when Gemini's response contains no usable text.
pub const NO_SUMMARY_FALLBACK: &str = "No summary generated.";

pub const MISSING_TEXT_MESSAGE: &str =
    "Missing required text input: provide a transcript or text";

/// Text to summarize. `transcript` and `text` are interchangeable names for the
/// meeting content; `prompt` optionally steers the summary.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub transcript: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SummarizeResult {
    pub summary: String,
}

impl SummarizeRequest {
    /// The meeting content: `transcript`, else `text`, ignoring blank values.
    /// Returned verbatim; whitespace is only trimmed for the emptiness check.
    fn primary_text(&self) -> Option<&str> {
        non_blank(&self.transcript).or_else(|| non_blank(&self.text))
    }

    fn instruction(&self) -> Option<&str> {
        non_blank(&self.prompt)
    }
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.trim().is_empty())
}

/// Combine the request fields into the single prompt sent to Gemini.
///
/// With both a transcript and a prompt the prompt leads and the transcript follows
/// under a `Transcript:` heading. A transcript alone gets [`DEFAULT_INSTRUCTION`].
/// A prompt alone is taken as already-combined text and sent as is.
pub fn assemble_prompt(request: &SummarizeRequest) -> Result<String, Error> {
    match (request.instruction(), request.primary_text()) {
        (Some(instruction), Some(transcript)) => {
            Ok(format!("{instruction}\n\nTranscript:\n{transcript}"))
        }
        (None, Some(transcript)) => Ok(format!(
            "{DEFAULT_INSTRUCTION}\n\nTranscript:\n{transcript}"
        )),
        (Some(combined), None) => Ok(combined.to_string()),
        (None, None) => {
            warn!("Rejecting summarize request without any text input");
            Err(Error::validation(MISSING_TEXT_MESSAGE))
        }
    }
}

/// Reduce a Gemini response to display text. Never fails: an absent, mistyped or
/// blank `candidates[0].content.parts[0].text` yields [`NO_SUMMARY_FALLBACK`].
pub fn extract_summary(response: &GenerateContentResponse) -> String {
    response
        .first_candidate_text()
        .filter(|text| !text.trim().is_empty())
        .unwrap_or(NO_SUMMARY_FALLBACK)
        .to_string()
}

/// Summarize a meeting transcript with Gemini, reusing the process-wide `http_client`.
pub async fn summarize(
    config: &Config,
    http_client: &reqwest::Client,
    request: &SummarizeRequest,
) -> Result<SummarizeResult, Error> {
    let prompt = assemble_prompt(request)?;
    let client = GeminiClient::new(config, http_client.clone())?;

    let response = client.generate_content(&prompt).await?;
    let summary = extract_summary(&response);
    if summary == NO_SUMMARY_FALLBACK {
        warn!("Gemini response contained no summary text");
    } else {
        debug!("Extracted summary of {} bytes", summary.len());
    }

    Ok(SummarizeResult { summary })
}
