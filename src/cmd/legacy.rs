// ============================================================================
// src/cmd/legacy.rs – pre-rewrite command engine
// ============================================================================
//
// Frozen implementation kept for operations the migration switch has not
// moved over yet. Its observable protocol must stay byte-identical to the
// rewritten handlers; tests/cli.rs holds the equivalence checks. Do not
// refactor this against the new handlers — it goes away operation by
// operation as migration.features fills up.

use crate::api::{twofactor, Client};
use crate::cmd::{ExitStatus, Handler};
use crate::errors::ShellError;
use crate::router::Operation;
use crate::session::KeyId;
use crate::term::{self, Decision, ReadWriter};
use std::io::Write;

pub struct LegacyShell {
    op: Operation,
    client: Client,
    key_id: Option<KeyId>,
}

impl LegacyShell {
    pub fn new(op: Operation, client: Client, key_id: Option<KeyId>) -> Self {
        Self { op, client, key_id }
    }
}

impl Handler for LegacyShell {
    fn execute(&self, rw: &mut ReadWriter<'_>) -> Result<ExitStatus, ShellError> {
        tracing::debug!(operation = self.op.token(), "serving via legacy engine");
        match self.op {
            Operation::TwoFactorRecoveryCodes => {
                two_factor_recovery(&self.client, self.key_id, rw)
            }
        }
    }
}

fn two_factor_recovery(
    client: &Client,
    key_id: Option<KeyId>,
    rw: &mut ReadWriter<'_>,
) -> Result<ExitStatus, ShellError> {
    let decision = term::confirm(
        rw,
        &[
            "Are you sure you want to generate new two-factor recovery codes?",
            "Any existing recovery codes you saved will be invalidated. (yes/no)",
        ],
    )?;

    if decision != Decision::Yes {
        writeln!(
            rw.output,
            "\nNew recovery codes have *not* been generated. Existing codes will remain valid."
        )?;
        return Ok(ExitStatus::Success);
    }

    let outcome = match key_id {
        Some(id) => twofactor::recovery_codes(client, id).map_err(|err| err.to_string()),
        None => Err("Failed to get key id".to_string()),
    };

    match outcome {
        Ok(codes) => {
            write!(
                rw.output,
                "\nYour two-factor authentication recovery codes are:\n\n"
            )?;
            if !codes.is_empty() {
                writeln!(rw.output, "{}", codes.join("\n"))?;
            }
            writeln!(
                rw.output,
                "\nDuring sign in, use one of the codes above when prompted for"
            )?;
            writeln!(
                rw.output,
                "your two-factor code. Then, visit your Profile Settings and add"
            )?;
            writeln!(
                rw.output,
                "a new device so you do not lose access to your account again."
            )?;
            Ok(ExitStatus::Success)
        }
        Err(message) => {
            writeln!(
                rw.output,
                "\nAn error occurred while trying to generate new recovery codes.\n{message}"
            )?;
            Ok(ExitStatus::Failure)
        }
    }
}
