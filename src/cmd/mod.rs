// ============================================================================
// src/cmd/mod.rs – command subsystem root
// ============================================================================
pub mod legacy; // pre-rewrite engine, serves operations not yet migrated
pub mod twofactor_recovery; // rewritten 2fa_recovery_codes handler

use crate::api::Client;
use crate::errors::ShellError;
use crate::router::{ImplPath, Operation, Route};
use crate::session::KeyId;
use crate::term::ReadWriter;

/// How the process reports the invocation to the SSH layer. `Failure` means
/// the protocol ran to completion and a terminal error block was written;
/// an aborted invocation surfaces as `Err(ShellError)` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
}

impl ExitStatus {
    pub fn code(self) -> i32 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
        }
    }
}

/// One command serving one SSH invocation over its ReadWriter. Legacy and
/// migrated implementations honor the same contract: same prompt bytes,
/// same result blocks, same exit status for the same inputs.
pub trait Handler {
    fn execute(&self, rw: &mut ReadWriter<'_>) -> Result<ExitStatus, ShellError>;
}

/// Turn a resolved route into the implementation that serves it.
pub fn build(route: Route, client: Client, key_id: Option<KeyId>) -> Box<dyn Handler> {
    match route.path {
        ImplPath::Migrated => match route.op {
            Operation::TwoFactorRecoveryCodes => Box::new(
                twofactor_recovery::TwoFactorRecovery::new(client, key_id),
            ),
        },
        ImplPath::Legacy => Box::new(legacy::LegacyShell::new(route.op, client, key_id)),
    }
}
