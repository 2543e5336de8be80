#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Auxiliary messaging listener bound to the service lifetime.
//!
//! Layout: `transport.rs` (platform boundary and DTOs), `telegram.rs` (the
//! Telegram long-poll client), `allow.rs` (identity filtering),
//! `listener.rs` (event loop), `supervisor.rs` (task lifecycle).

pub mod allow;
pub mod error;
pub mod listener;
pub mod supervisor;
pub mod telegram;
pub mod transport;

pub use allow::AllowList;
pub use error::{NotifyError, NotifyResult};
pub use listener::Listener;
pub use supervisor::{ListenerSupervisor, SupervisorState};
pub use telegram::TelegramTransport;
pub use transport::{BotTransport, ChatEvent, KeyboardButton, ReplyKeyboard, WebAppInfo};
