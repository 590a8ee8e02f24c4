use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Hosted assistant client (chat completions)
// ---------------------------------------------------------------------------

const ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
const MODEL: &str = "gpt-4o-mini";
const MAX_TOKENS: u32 = 900; // bounded answer budget
const TEMPERATURE: f32 = 0.3;
const API_KEY_VAR: &str = "OPENAI_API_KEY";

const SYSTEM_PROMPT: &str = "You are a senior data analyst writing for an executive audience. \
Answer using exactly these three sections, each as a plain-text heading followed by short bullet points: \
Key Insights, Risks / Anomalies, Recommended Actions. Be concrete and reference the statistics you are given.";

/// Errors from one question/answer exchange with the hosted service.
#[derive(Debug, Error)]
pub enum InsightError {
    #[error("{API_KEY_VAR} is not set; the assistant is unavailable")]
    MissingApiKey,

    #[error("assistant request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("assistant returned an unusable response: {0}")]
    BadResponse(String),
}

#[derive(Serialize, Deserialize, Clone, Debug)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

/// Blocking client for the hosted assistant.
///
/// Interactions are serialized by the UI (one question at a time), so a
/// blocking call is the whole concurrency story: no streaming, no retry,
/// no timeout. A failed call stores nothing in the session.
pub struct InsightClient {
    http: reqwest::blocking::Client,
    api_key: String,
}

impl InsightClient {
    /// Build a client from the environment. Fails when the API key is absent.
    pub fn from_env() -> Result<Self, InsightError> {
        let api_key = std::env::var(API_KEY_VAR).map_err(|_| InsightError::MissingApiKey)?;
        Ok(InsightClient {
            http: reqwest::blocking::Client::new(),
            api_key,
        })
    }

    /// Ask one free-text question about the loaded dataset.
    ///
    /// The request always carries the dataset shape and the complete
    /// statistics dump as context. The dump is never truncated, so a very
    /// wide table can exceed the model's input budget; that surfaces here
    /// as an error for this question, not as a crash.
    pub fn ask(
        &self,
        shape: (usize, usize),
        stats_dump: &str,
        question: &str,
    ) -> Result<String, InsightError> {
        let request = ChatRequest {
            model: MODEL.to_string(),
            messages: build_messages(shape, stats_dump, question),
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let response: ChatCompletionResponse = self
            .http
            .post(ENDPOINT)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()?
            .error_for_status()?
            .json()
            .map_err(|e| InsightError::BadResponse(e.to_string()))?;

        let answer = response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| InsightError::BadResponse("no choices in response".into()))?;

        if answer.trim().is_empty() {
            return Err(InsightError::BadResponse("empty answer".into()));
        }
        Ok(answer)
    }
}

/// Assemble the fixed-shape prompt: system instructions, dataset context,
/// then the user's question.
fn build_messages(
    (rows, cols): (usize, usize),
    stats_dump: &str,
    question: &str,
) -> Vec<ChatMessage> {
    vec![
        ChatMessage {
            role: "system".to_string(),
            content: SYSTEM_PROMPT.to_string(),
        },
        ChatMessage {
            role: "user".to_string(),
            content: format!(
                "Dataset shape: {rows} rows x {cols} columns.\nDescriptive statistics:\n{stats_dump}"
            ),
        },
        ChatMessage {
            role: "user".to_string(),
            content: question.to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_shape_stats_and_question_in_order() {
        let msgs = build_messages((120, 5), "units: mean=25.0\n", "What drives sales?");
        assert_eq!(msgs.len(), 3);
        assert_eq!(msgs[0].role, "system");
        assert!(msgs[0].content.contains("Key Insights"));
        assert!(msgs[1].content.contains("120 rows x 5 columns"));
        assert!(msgs[1].content.contains("units: mean=25.0"));
        assert_eq!(msgs[2].content, "What drives sales?");
    }

    #[test]
    fn stats_dump_is_sent_untruncated() {
        let wide_dump = "c: mean=1\n".repeat(10_000);
        let msgs = build_messages((1, 10_000), &wide_dump, "q");
        assert!(msgs[1].content.len() > wide_dump.len());
    }

    #[test]
    fn request_serializes_to_chat_completion_shape() {
        let request = ChatRequest {
            model: MODEL.to_string(),
            messages: build_messages((2, 2), "", "q"),
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], MODEL);
        assert_eq!(json["messages"].as_array().unwrap().len(), 3);
        assert_eq!(json["max_tokens"], MAX_TOKENS);
    }
}
