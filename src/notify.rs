//! User-facing notices

use async_trait::async_trait;
use serde::Serialize;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
    Warning,
    Info,
    Question,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, text)
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, text)
    }
}

/// How the user answered a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acknowledgement {
    Confirmed,
    Dismissed,
}

impl Acknowledgement {
    pub fn is_confirmed(self) -> bool {
        self == Acknowledgement::Confirmed
    }
}

/// Presentation layer that shows notices and reports the user's answer
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notice: Notice) -> Acknowledgement;
}

/// Writes notices to the log and confirms every one of them
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, notice: Notice) -> Acknowledgement {
        match notice.level {
            NoticeLevel::Error => error!("{}", notice.text),
            NoticeLevel::Warning => warn!("{}", notice.text),
            _ => info!("{}", notice.text),
        }
        Acknowledgement::Confirmed
    }
}
