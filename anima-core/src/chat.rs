//! Outbound chat-completion client.
//!
//! One request per student message: the ANIMA system instruction plus the
//! running message list. The provider is an opaque collaborator — any
//! failure (network, auth, quota, response shape) is logged and replaced by
//! a fixed apology string, never surfaced raw. Without an API key the client
//! runs disabled and only the chat path is affected.

use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{AnimaError, AnimaResult};

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Instruction sent as the system message on every request.
pub const SYSTEM_PROMPT: &str = "Eres ANIMA, una IA empática creada para acompañar \
    emocionalmente a estudiantes de la UDD. Tu tono es cercano, profesional y cálido. \
    Clasifica la necesidad del estudiante como Emocional, Académica o Social, \
    y luego entrega una respuesta breve y útil.";

/// Shown when the provider call fails for any reason.
pub const FALLBACK_REPLY: &str =
    "No pude procesar tu mensaje en este momento. Intenta de nuevo más tarde.";

/// Shown when no API key is configured.
pub const OFFLINE_REPLY: &str = "El chat de ANIMA no está disponible por ahora, \
    pero el resto de la aplicación sigue funcionando.";

/// One exchange in a session's chat history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub at: DateTime<Utc>,
    pub user: String,
    pub message: String,
    pub reply: String,
}

pub struct ChatClient {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
}

impl ChatClient {
    pub fn new(
        api_key: Option<String>,
        model: impl Into<String>,
        timeout: std::time::Duration,
    ) -> AnimaResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AnimaError::Chat(e.to_string()))?;

        Ok(ChatClient {
            http,
            api_key,
            model: model.into(),
        })
    }

    /// Whether a key is configured; when false, `reply` returns the offline
    /// notice without touching the network.
    pub fn enabled(&self) -> bool {
        self.api_key.is_some()
    }

    /// Answer one student message. Infallible by design: every failure path
    /// degrades to a fixed string.
    pub async fn reply(&self, history: &[ChatTurn], message: &str) -> String {
        let Some(api_key) = self.api_key.as_deref() else {
            return OFFLINE_REPLY.to_string();
        };

        match self.request_reply(api_key, history, message).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Chat completion failed: {}", e);
                FALLBACK_REPLY.to_string()
            }
        }
    }

    async fn request_reply(
        &self,
        api_key: &str,
        history: &[ChatTurn],
        message: &str,
    ) -> AnimaResult<String> {
        let body = json!({
            "model": self.model,
            "messages": build_messages(history, message),
        });

        debug!("Requesting completion ({} history turns)", history.len());

        let response = self
            .http
            .post(CHAT_COMPLETIONS_URL)
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| AnimaError::Chat(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let err_text = response.text().await.unwrap_or_default();
            return Err(AnimaError::Chat(format!(
                "HTTP {}: {}",
                status, err_text
            )));
        }

        let response_json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AnimaError::Chat(e.to_string()))?;

        response_json["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| AnimaError::Chat("Unexpected response shape".to_string()))
    }
}

/// System instruction, then the running history as user/assistant pairs,
/// then the new message.
fn build_messages(history: &[ChatTurn], message: &str) -> Vec<serde_json::Value> {
    let mut messages = vec![json!({"role": "system", "content": SYSTEM_PROMPT})];

    for turn in history {
        messages.push(json!({"role": "user", "content": turn.message}));
        messages.push(json!({"role": "assistant", "content": turn.reply}));
    }

    messages.push(json!({"role": "user", "content": message}));
    messages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_turn(message: &str, reply: &str) -> ChatTurn {
        ChatTurn {
            at: Utc::now(),
            user: "alumna@udd.cl".to_string(),
            message: message.to_string(),
            reply: reply.to_string(),
        }
    }

    #[test]
    fn test_messages_carry_history_in_order() {
        let history = vec![make_turn("hola", "¡Hola! ¿Cómo estás?")];
        let messages = build_messages(&history, "bien, gracias");

        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[1]["content"], "hola");
        assert_eq!(messages[2]["role"], "assistant");
        assert_eq!(messages[3]["content"], "bien, gracias");
    }

    #[tokio::test]
    async fn test_missing_key_returns_offline_notice() {
        let client = ChatClient::new(
            None,
            "gpt-4o-mini",
            std::time::Duration::from_secs(30),
        )
        .unwrap();

        assert!(!client.enabled());
        assert_eq!(client.reply(&[], "hola").await, OFFLINE_REPLY);
    }
}
