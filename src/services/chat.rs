//! Course-advisor chat relay
//!
//! One request per visitor message against an OpenAI-compatible
//! chat-completions endpoint (a local Ollama by default). Failures never
//! reach the visitor; they get the fallback line instead.

use serde_json::{json, Value};
use tracing::{debug, warn};

/// Shown whenever the model call fails or returns nothing usable.
pub const FALLBACK_REPLY: &str =
    "The academy is currently busy processing requests! Please try again in a moment or visit our campus.";

const SYSTEM_INSTRUCTION: &str = "\
You are the Elite Academy AI Advisor. \
Our current promotion is the Jackpot Offer: 150 hours of intensive learning at a steep discount. \
We offer courses in Data Science, AI, Web Development, and Digital Marketing. \
Be professional, encouraging, and informative. Use short, helpful responses. \
Always emphasize the limited-time nature of the jackpot offer.";

pub struct ChatRelay {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

impl ChatRelay {
    pub fn new(endpoint: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            model,
        }
    }

    /// Relay one visitor message. Always returns something presentable.
    pub async fn advise(&self, user_query: &str) -> String {
        match self.request(user_query).await {
            Ok(reply) if !reply.trim().is_empty() => reply,
            Ok(_) => {
                warn!("Chat model returned an empty reply");
                FALLBACK_REPLY.to_string()
            }
            Err(e) => {
                warn!("Chat relay failed: {}", e);
                FALLBACK_REPLY.to_string()
            }
        }
    }

    async fn request(&self, user_query: &str) -> anyhow::Result<String> {
        debug!("Relaying chat message to {}", self.endpoint);

        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_INSTRUCTION },
                { "role": "user", "content": user_query },
            ],
            "temperature": 0.7,
            "top_p": 0.9,
            "stream": false,
        });

        let response: Value = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| anyhow::anyhow!("completion response missing message content"))
    }
}
