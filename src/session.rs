// ============================================================================
// src/session.rs – SSH invocation context
// ============================================================================

use crate::errors::ShellError;
use std::env;
use std::fmt;

/// Key identifier the SSH layer resolved for this connection, passed on the
/// command line as `key-<id>` by the authorized_keys entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyId(pub u64);

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl KeyId {
    /// Parse a `key-<id>` descriptor. Anything else yields None; the command
    /// itself reports the missing id after an affirmative confirmation, so
    /// a malformed descriptor must not abort startup.
    pub fn from_descriptor(descriptor: &str) -> Option<Self> {
        let id = descriptor.strip_prefix("key-")?;
        id.parse::<u64>().ok().map(KeyId)
    }
}

/// The single command this SSH session is restricted to, as handed over by
/// sshd in SSH_ORIGINAL_COMMAND. Immutable for the invocation's lifetime.
#[derive(Debug, Clone)]
pub struct ForcedCommand {
    tokens: Vec<String>,
}

impl ForcedCommand {
    pub fn parse(raw: &str) -> Result<Self, ShellError> {
        let tokens: Vec<String> = raw.split_whitespace().map(str::to_string).collect();
        if tokens.is_empty() {
            return Err(ShellError::MissingCommand);
        }
        Ok(Self { tokens })
    }

    pub fn operation(&self) -> &str {
        &self.tokens[0]
    }

    pub fn arguments(&self) -> &[String] {
        &self.tokens[1..]
    }
}

/// Everything the dispatcher needs from one SSH connection.
#[derive(Debug)]
pub struct Session {
    pub key_id: Option<KeyId>,
    pub command: ForcedCommand,
}

impl Session {
    /// Build the context from the process environment. Refuses to run
    /// outside an SSH session; sshd always exports SSH_CONNECTION.
    pub fn from_env(key_descriptor: Option<&str>) -> Result<Self, ShellError> {
        if env::var_os("SSH_CONNECTION").is_none() {
            return Err(ShellError::NotSsh);
        }

        let raw = env::var("SSH_ORIGINAL_COMMAND").map_err(|_| ShellError::MissingCommand)?;
        let command = ForcedCommand::parse(&raw)?;
        let key_id = key_descriptor.and_then(KeyId::from_descriptor);

        Ok(Self { key_id, command })
    }
}
