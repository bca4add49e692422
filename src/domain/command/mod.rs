//! Command domain: control instructions queued for the backend executor.
//!
//! A command is accepted, not executed, by `POST /commands`. The outcome of
//! a command only becomes visible on the next poll of the view it affects.

pub mod client;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::shared::{Pair, TradingMode};

/// Command types the backend accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandType {
    PausePair,
    ResumePair,
    PauseAll,
    ResumeAll,
    ClosePair,
    CloseAll,
    ReloadParams,
}

impl CommandType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandType::PausePair => "PAUSE_PAIR",
            CommandType::ResumePair => "RESUME_PAIR",
            CommandType::PauseAll => "PAUSE_ALL",
            CommandType::ResumeAll => "RESUME_ALL",
            CommandType::ClosePair => "CLOSE_PAIR",
            CommandType::CloseAll => "CLOSE_ALL",
            CommandType::ReloadParams => "RELOAD_PARAMS",
        }
    }
}

impl std::fmt::Display for CommandType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A control command with its type-specific payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    PausePair { pair: Pair },
    ResumePair { pair: Pair },
    PauseAll,
    ResumeAll,
    ClosePair { pair: Pair, mode: TradingMode },
    CloseAll,
    ReloadParams,
}

impl Command {
    /// Close a pair in paper mode, as the dashboard does.
    pub fn close_pair(pair: impl Into<Pair>) -> Self {
        Command::ClosePair {
            pair: pair.into(),
            mode: TradingMode::Paper,
        }
    }

    pub fn command_type(&self) -> CommandType {
        match self {
            Command::PausePair { .. } => CommandType::PausePair,
            Command::ResumePair { .. } => CommandType::ResumePair,
            Command::PauseAll => CommandType::PauseAll,
            Command::ResumeAll => CommandType::ResumeAll,
            Command::ClosePair { .. } => CommandType::ClosePair,
            Command::CloseAll => CommandType::CloseAll,
            Command::ReloadParams => CommandType::ReloadParams,
        }
    }

    pub fn pair(&self) -> Option<&Pair> {
        match self {
            Command::PausePair { pair }
            | Command::ResumePair { pair }
            | Command::ClosePair { pair, .. } => Some(pair),
            _ => None,
        }
    }

    /// Commands that act on every pair at once need explicit confirmation.
    pub fn is_destructive(&self) -> bool {
        matches!(self, Command::CloseAll | Command::PauseAll)
    }

    pub fn payload(&self) -> Value {
        match self {
            Command::PausePair { pair } | Command::ResumePair { pair } => json!({ "pair": pair }),
            Command::ClosePair { pair, mode } => json!({ "pair": pair, "mode": mode }),
            Command::PauseAll | Command::ResumeAll | Command::CloseAll | Command::ReloadParams => {
                json!({})
            }
        }
    }

    pub fn to_request(&self) -> CommandRequest {
        CommandRequest {
            command_type: self.command_type(),
            payload: self.payload(),
            idempotency_key: None,
        }
    }
}

/// Body of `POST /commands`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandRequest {
    #[serde(rename = "type")]
    pub command_type: CommandType,
    pub payload: Value,
    /// Resubmitting with the same key returns the originally queued command.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
}

impl CommandRequest {
    pub fn with_idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = Some(key.into());
        self
    }
}

/// Acceptance response. `status` is the queue status (`PENDING` on submit).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandAck {
    pub id: i64,
    pub status: String,
    #[serde(default, rename = "type")]
    pub command_type: Option<String>,
    #[serde(default)]
    pub created_ts_utc: Option<String>,
}

/// Result of a submission attempt that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Accepted {
        command_type: CommandType,
        ack: CommandAck,
    },
    /// The operator did not confirm a destructive command; nothing was sent.
    Declined { command_type: CommandType },
}

impl CommandOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, CommandOutcome::Accepted { .. })
    }

    pub fn ack(&self) -> Option<&CommandAck> {
        match self {
            CommandOutcome::Accepted { ack, .. } => Some(ack),
            CommandOutcome::Declined { .. } => None,
        }
    }

    /// Operator-facing message.
    pub fn message(&self) -> String {
        match self {
            CommandOutcome::Accepted {
                command_type: CommandType::CloseAll,
                ..
            } => "CLOSE_ALL queued".to_string(),
            CommandOutcome::Accepted { .. } => "Command queued".to_string(),
            CommandOutcome::Declined { command_type } => format!("{} cancelled", command_type),
        }
    }
}
