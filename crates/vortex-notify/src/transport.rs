//! Messaging platform boundary used by the listener.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::NotifyResult;

/// One inbound chat event delivered by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEvent {
    /// Chat the event originated from; replies target this identifier.
    pub chat_id: i64,
    /// Identity of the sending user, checked against the allow-list.
    pub sender_id: i64,
    /// Raw message text.
    pub text: String,
}

/// Web-app target opened by a keyboard button.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WebAppInfo {
    /// URL the platform opens inside its embedded browser.
    pub url: String,
}

/// Single reply keyboard button.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct KeyboardButton {
    /// Button label.
    pub text: String,
    /// Optional web-app target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_app: Option<WebAppInfo>,
}

/// Keyboard attached to an outbound reply.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReplyKeyboard {
    /// Button rows.
    pub keyboard: Vec<Vec<KeyboardButton>>,
    /// Ask the client to shrink the keyboard to its content.
    pub resize_keyboard: bool,
}

impl ReplyKeyboard {
    /// Single-button keyboard opening the given web app.
    #[must_use]
    pub fn web_app(label: &str, url: &str) -> Self {
        Self {
            keyboard: vec![vec![KeyboardButton {
                text: label.to_string(),
                web_app: Some(WebAppInfo {
                    url: url.to_string(),
                }),
            }]],
            resize_keyboard: true,
        }
    }
}

/// Long-poll transport to the messaging platform.
#[async_trait]
pub trait BotTransport: Send {
    /// Wait for the next batch of inbound events.
    async fn poll(&mut self) -> NotifyResult<Vec<ChatEvent>>;

    /// Send a reply, optionally with a keyboard.
    async fn send(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<ReplyKeyboard>,
    ) -> NotifyResult<()>;

    /// Release the platform connection before shutdown completes.
    async fn disconnect(&mut self) -> NotifyResult<()>;
}
