use crate::error::Result;
use crate::llm::{ChatMessage, CompletionRequest, CompletionService};
use crate::prompt::ANSWER_KEY;
use tracing::{info, warn};

pub const SYSTEM_INSTRUCTION: &str =
    "You are a helpful assistant that analyzes data and answers questions.";

/// Returned when the reply parses but carries no answer.
pub const FALLBACK_ANSWER: &str = "No answer found.";

/// Sends one prompt + question pair per call. Nothing is cached: asking the
/// same question twice makes two calls.
pub struct QueryDispatcher<C> {
    service: C,
}

impl<C: CompletionService> QueryDispatcher<C> {
    pub fn new(service: C) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &C {
        &self.service
    }

    pub fn build_request(prompt: &str, question: &str) -> CompletionRequest {
        CompletionRequest {
            messages: vec![
                ChatMessage::system(SYSTEM_INSTRUCTION),
                ChatMessage::user(prompt),
                ChatMessage::user(question),
            ],
            json_output: true,
        }
    }

    /// Transport failures and non-JSON replies are errors; a reply without
    /// an answer is not.
    pub async fn dispatch(&self, prompt: &str, question: &str) -> Result<String> {
        let request = Self::build_request(prompt, question);
        info!("Dispatching question ({} prompt bytes)", prompt.len());
        let body = self.service.complete(&request).await?;
        extract_answer(&body)
    }
}

/// Read the `"question"` value from a JSON reply body.
pub fn extract_answer(body: &str) -> Result<String> {
    let reply: serde_json::Value = serde_json::from_str(strip_code_fences(body))?;

    match reply.get(ANSWER_KEY) {
        Some(serde_json::Value::String(answer)) => Ok(answer.clone()),
        Some(serde_json::Value::Null) | None => {
            warn!("Reply has no \"{}\" key, using fallback answer", ANSWER_KEY);
            Ok(FALLBACK_ANSWER.to_string())
        }
        Some(other) => Ok(other.to_string()),
    }
}

fn strip_code_fences(body: &str) -> &str {
    body.trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}
