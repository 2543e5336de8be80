//! Auxiliary listener event loop.
//!
//! # Design
//! - Long-polls the transport until cancelled; cancellation is the only way
//!   the loop ends.
//! - Per-event handling errors are isolated: a failed reply is logged and
//!   the loop keeps serving subsequent events.
//! - The transport connection is released after the loop exits, before the
//!   task reports as finished.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::allow::AllowList;
use crate::transport::{BotTransport, ChatEvent, ReplyKeyboard};

const START_COMMAND: &str = "/start";
const REJECTION_REPLY: &str = "🚫 You are not on the guest list.";
const OPEN_APP_LABEL: &str = "📱 Open App";
const WELCOME_REPLY: &str = "👋 Welcome to Vortex!\n\nI can help you download videos privately from your favorite sites.\nTap the button below to open the app!";
const POLL_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Long-running listener reacting to inbound chat commands.
pub struct Listener<T> {
    transport: T,
    allow_list: AllowList,
    app_url: String,
}

impl<T: BotTransport> Listener<T> {
    /// Construct a listener over the given transport and allow-list.
    pub fn new(transport: T, allow_list: AllowList, app_url: impl Into<String>) -> Self {
        Self {
            transport,
            allow_list,
            app_url: app_url.into(),
        }
    }

    /// Poll until cancelled, then release the transport connection.
    pub async fn run(mut self, cancel: CancellationToken) {
        info!("auxiliary listener started");
        loop {
            tokio::select! {
                () = cancel.cancelled() => break,
                batch = self.transport.poll() => match batch {
                    Ok(events) => {
                        for event in events {
                            self.handle_event(&event).await;
                        }
                    }
                    Err(err) => {
                        warn!(error = %err, "listener poll failed; backing off");
                        tokio::select! {
                            () = cancel.cancelled() => break,
                            () = tokio::time::sleep(POLL_RETRY_DELAY) => {}
                        }
                    }
                }
            }
        }

        if let Err(err) = self.transport.disconnect().await {
            warn!(error = %err, "listener disconnect failed");
        }
        info!("auxiliary listener stopped");
    }

    async fn handle_event(&mut self, event: &ChatEvent) {
        if !is_start_command(&event.text) {
            return;
        }

        if !self.allow_list.allows(event.sender_id) {
            info!(user_id = event.sender_id, "rejecting user outside the allow-list");
            if let Err(err) = self.transport.send(event.chat_id, REJECTION_REPLY, None).await {
                warn!(error = %err, "failed to send rejection reply");
            }
            return;
        }

        info!(user_id = event.sender_id, app_url = %self.app_url, "serving app link");
        let keyboard = ReplyKeyboard::web_app(OPEN_APP_LABEL, &self.app_url);
        if let Err(err) = self
            .transport
            .send(event.chat_id, WELCOME_REPLY, Some(keyboard))
            .await
        {
            warn!(error = %err, "failed to send welcome reply");
        }
    }
}

fn is_start_command(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed == START_COMMAND
        || trimmed.starts_with("/start ")
        || trimmed.starts_with("/start@")
}
