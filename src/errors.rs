// ============================================================================
// src/errors.rs – invocation error taxonomy
// ============================================================================

use thiserror::Error;

/// Errors that abort an invocation before (or instead of) a handler running
/// its protocol to completion. Upstream API failures are NOT here: the
/// command recovers those into its terminal error block and reports them to
/// the SSH client verbatim.
#[derive(Debug, Error)]
pub enum ShellError {
    /// The forced command named an operation this shell does not register.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// The process was started outside an SSH session (no SSH_CONNECTION).
    #[error("only SSH sessions are accepted")]
    NotSsh,

    /// SSH_ORIGINAL_COMMAND was missing or empty.
    #[error("no command supplied by the SSH layer")]
    MissingCommand,

    /// The session's stdin/stdout broke mid-protocol (client disconnect).
    #[error("session i/o failed: {0}")]
    Io(#[from] std::io::Error),
}
