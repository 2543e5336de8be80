//! Telegram Bot API long-poll transport.
//!
//! # Design
//! - `getUpdates` long polling with a tracked offset; no webhook surface.
//! - Replies go through `sendMessage` with an optional reply keyboard whose
//!   single button opens the configured web app.
//! - Disconnect acknowledges the final offset with a zero-timeout poll so
//!   processed updates are not redelivered to the next process.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use vortex_config::BotToken;

use crate::error::{NotifyError, NotifyResult};
use crate::transport::{BotTransport, ChatEvent, ReplyKeyboard};

const API_BASE: &str = "https://api.telegram.org";
const POLL_TIMEOUT_SECS: u64 = 30;

/// Long-poll client for the Telegram Bot API.
pub struct TelegramTransport {
    http: Client,
    base_url: String,
    offset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    result: Option<T>,
}

#[derive(Debug, Deserialize)]
struct Update {
    update_id: i64,
    #[serde(default)]
    message: Option<Message>,
}

#[derive(Debug, Deserialize)]
struct Message {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    from: Option<User>,
    chat: Chat,
}

#[derive(Debug, Deserialize)]
struct User {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct Chat {
    id: i64,
}

impl TelegramTransport {
    /// Construct a transport against the public Telegram API.
    #[must_use]
    pub fn new(token: &BotToken) -> Self {
        Self::with_base_url(API_BASE, token)
    }

    /// Construct a transport against an alternate API host.
    #[must_use]
    pub fn with_base_url(base: &str, token: &BotToken) -> Self {
        Self {
            http: Client::new(),
            base_url: format!("{base}/bot{}", token.expose()),
            offset: None,
        }
    }

    async fn get_updates(&self, timeout_secs: u64) -> NotifyResult<Vec<Update>> {
        let mut body = json!({
            "timeout": timeout_secs,
            "allowed_updates": ["message"],
        });
        if let Some(offset) = self.offset {
            body["offset"] = json!(offset);
        }

        let response = self
            .http
            .post(format!("{}/getUpdates", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|source| NotifyError::Transport {
                operation: "get_updates",
                source,
            })?;
        let envelope: ApiEnvelope<Vec<Update>> =
            response
                .json()
                .await
                .map_err(|source| NotifyError::Transport {
                    operation: "get_updates",
                    source,
                })?;
        unwrap_envelope("get_updates", envelope)
    }
}

#[async_trait]
impl BotTransport for TelegramTransport {
    async fn poll(&mut self) -> NotifyResult<Vec<ChatEvent>> {
        let updates = self.get_updates(POLL_TIMEOUT_SECS).await?;
        let mut events = Vec::new();
        for update in updates {
            let next_offset = update.update_id + 1;
            self.offset = Some(self.offset.map_or(next_offset, |current| {
                current.max(next_offset)
            }));
            if let Some(event) = chat_event(update.message) {
                events.push(event);
            }
        }
        Ok(events)
    }

    async fn send(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<ReplyKeyboard>,
    ) -> NotifyResult<()> {
        let mut body = json!({
            "chat_id": chat_id,
            "text": text,
        });
        if let Some(keyboard) = keyboard {
            body["reply_markup"] =
                serde_json::to_value(keyboard).map_err(|err| NotifyError::Platform {
                    operation: "send_message",
                    description: err.to_string(),
                })?;
        }

        let response = self
            .http
            .post(format!("{}/sendMessage", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|source| NotifyError::Transport {
                operation: "send_message",
                source,
            })?;
        let envelope: ApiEnvelope<serde_json::Value> =
            response
                .json()
                .await
                .map_err(|source| NotifyError::Transport {
                    operation: "send_message",
                    source,
                })?;
        unwrap_envelope("send_message", envelope)?;
        Ok(())
    }

    async fn disconnect(&mut self) -> NotifyResult<()> {
        if self.offset.is_some() {
            self.get_updates(0).await?;
        }
        Ok(())
    }
}

fn unwrap_envelope<T>(operation: &'static str, envelope: ApiEnvelope<T>) -> NotifyResult<T> {
    if envelope.ok {
        envelope.result.ok_or_else(|| NotifyError::Platform {
            operation,
            description: "missing result payload".to_string(),
        })
    } else {
        Err(NotifyError::Platform {
            operation,
            description: envelope
                .description
                .unwrap_or_else(|| "unknown platform error".to_string()),
        })
    }
}

fn chat_event(message: Option<Message>) -> Option<ChatEvent> {
    let message = message?;
    let text = message.text?;
    let from = message.from?;
    Some(ChatEvent {
        chat_id: message.chat.id,
        sender_id: from.id,
        text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn updates_deserialize_from_platform_payload() -> Result<()> {
        let envelope: ApiEnvelope<Vec<Update>> = serde_json::from_str(
            r#"{
                "ok": true,
                "result": [{
                    "update_id": 7,
                    "message": {
                        "text": "/start",
                        "from": {"id": 100},
                        "chat": {"id": 555}
                    }
                }]
            }"#,
        )?;
        let updates = unwrap_envelope("get_updates", envelope)?;
        assert_eq!(updates.len(), 1);
        let event = chat_event(updates.into_iter().next().and_then(|u| u.message))
            .ok_or_else(|| anyhow::anyhow!("expected chat event"))?;
        assert_eq!(event.chat_id, 555);
        assert_eq!(event.sender_id, 100);
        assert_eq!(event.text, "/start");
        Ok(())
    }

    #[test]
    fn textless_updates_produce_no_event() {
        assert!(chat_event(None).is_none());
        assert!(
            chat_event(Some(Message {
                text: None,
                from: Some(User { id: 1 }),
                chat: Chat { id: 2 },
            }))
            .is_none()
        );
    }

    #[test]
    fn error_envelope_carries_platform_description() {
        let envelope: ApiEnvelope<Vec<Update>> = ApiEnvelope {
            ok: false,
            description: Some("Unauthorized".to_string()),
            result: None,
        };
        let err = unwrap_envelope("get_updates", envelope).unwrap_err();
        assert!(matches!(
            err,
            NotifyError::Platform { operation: "get_updates", ref description }
                if description == "Unauthorized"
        ));
    }
}
