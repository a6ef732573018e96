// ============================================================================
// src/cmd/twofactor_recovery.rs – regenerate two-factor recovery codes
// ============================================================================

use crate::api::{twofactor, Client};
use crate::cmd::{ExitStatus, Handler};
use crate::errors::ShellError;
use crate::session::KeyId;
use crate::term::{self, Decision, ReadWriter};
use std::io::Write;

// The prompt and result blocks below are wire protocol: the SSH client's
// tooling matches them byte for byte. Do not reword.
const PROMPT: [&str; 2] = [
    "Are you sure you want to generate new two-factor recovery codes?",
    "Any existing recovery codes you saved will be invalidated. (yes/no)",
];

pub struct TwoFactorRecovery {
    client: Client,
    key_id: Option<KeyId>,
}

impl TwoFactorRecovery {
    pub fn new(client: Client, key_id: Option<KeyId>) -> Self {
        Self { client, key_id }
    }

    /// Only an affirmative decision reaches the API, and exactly once.
    fn fetch_codes(&self) -> Result<Vec<String>, String> {
        let key_id = self.key_id.ok_or_else(|| "Failed to get key id".to_string())?;
        twofactor::recovery_codes(&self.client, key_id).map_err(|err| err.to_string())
    }

    fn regenerate(&self, rw: &mut ReadWriter<'_>) -> Result<ExitStatus, ShellError> {
        match self.fetch_codes() {
            Ok(codes) => {
                write!(
                    rw.output,
                    "\nYour two-factor authentication recovery codes are:\n\n"
                )?;
                for code in &codes {
                    writeln!(rw.output, "{code}")?;
                }
                write!(
                    rw.output,
                    "\nDuring sign in, use one of the codes above when prompted for\n\
                     your two-factor code. Then, visit your Profile Settings and add\n\
                     a new device so you do not lose access to your account again.\n"
                )?;
                Ok(ExitStatus::Success)
            }
            Err(message) => {
                tracing::warn!(%message, "recovery code regeneration failed");
                write!(
                    rw.output,
                    "\nAn error occurred while trying to generate new recovery codes.\n{message}\n"
                )?;
                Ok(ExitStatus::Failure)
            }
        }
    }
}

impl Handler for TwoFactorRecovery {
    fn execute(&self, rw: &mut ReadWriter<'_>) -> Result<ExitStatus, ShellError> {
        match term::confirm(rw, &PROMPT)? {
            Decision::Yes => self.regenerate(rw),
            // Declining is not an error; Invalid counts as a decline.
            Decision::No | Decision::Invalid => {
                write!(
                    rw.output,
                    "\nNew recovery codes have *not* been generated. Existing codes will remain valid.\n"
                )?;
                Ok(ExitStatus::Success)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiCfg, Config};
    use std::io::Cursor;

    // A client pointed at nothing: any test that would touch the API while
    // declining is a test bug, and an affirmative run reports the transport
    // failure block.
    fn dead_client() -> Client {
        let cfg = Config {
            api: ApiCfg {
                url: "http+unix:///nonexistent/gateshell-test.sock".into(),
                secret: None,
                user: None,
                password: None,
                timeout_secs: 1,
            },
            migration: Default::default(),
            log: Default::default(),
        };
        Client::from_config(&cfg).unwrap()
    }

    fn run(input: &str, key_id: Option<KeyId>) -> (ExitStatus, String) {
        let handler = TwoFactorRecovery::new(dead_client(), key_id);
        let mut reader = Cursor::new(input.as_bytes().to_vec());
        let mut out = Vec::new();
        let mut rw = ReadWriter::new(&mut reader, &mut out);
        let status = handler.execute(&mut rw).unwrap();
        (status, String::from_utf8(out).unwrap())
    }

    #[test]
    fn declining_makes_no_api_call() {
        let (status, out) = run("no\n", Some(KeyId(100)));
        assert_eq!(status, ExitStatus::Success);
        assert_eq!(
            out,
            "Are you sure you want to generate new two-factor recovery codes?\n\
             Any existing recovery codes you saved will be invalidated. (yes/no)\n\
             \nNew recovery codes have *not* been generated. Existing codes will remain valid.\n"
        );
    }

    #[test]
    fn case_variants_decline() {
        for input in ["Yes\n", "YES\n", "y\n", "\n", ""] {
            let (status, out) = run(input, Some(KeyId(100)));
            assert_eq!(status, ExitStatus::Success, "input {input:?}");
            assert!(
                out.ends_with("Existing codes will remain valid.\n"),
                "input {input:?}"
            );
        }
    }

    #[test]
    fn missing_key_id_fails_after_yes() {
        let (status, out) = run("yes\n", None);
        assert_eq!(status, ExitStatus::Failure);
        assert!(out.ends_with(
            "\nAn error occurred while trying to generate new recovery codes.\nFailed to get key id\n"
        ));
    }

    #[test]
    fn unreachable_api_fails_with_transport_message() {
        let (status, out) = run("yes\n", Some(KeyId(100)));
        assert_eq!(status, ExitStatus::Failure);
        assert!(out.ends_with(
            "\nAn error occurred while trying to generate new recovery codes.\ninternal API unreachable\n"
        ));
    }
}
