// ============================================================================
// src/term.rs – session streams and yes/no confirmation
// ============================================================================

use std::io::{self, BufRead, Write};

/// The pair of streams one SSH session speaks through. Handlers never touch
/// the process stdio directly; tests substitute in-memory buffers.
pub struct ReadWriter<'a> {
    pub input: &'a mut dyn BufRead,
    pub output: &'a mut dyn Write,
}

impl<'a> ReadWriter<'a> {
    pub fn new(input: &'a mut dyn BufRead, output: &'a mut dyn Write) -> Self {
        Self { input, output }
    }
}

/// Outcome of one confirmation round trip. Matching is exact and
/// case-sensitive: anything that is not the literal token `yes` or `no`
/// (including `YES`, `y`, an empty line, or a closed stdin) is Invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Yes,
    No,
    Invalid,
}

/// Write each prompt line terminated by a single newline, then block on one
/// line of input. The read is the invocation's only wait on the remote user;
/// no timeout is imposed. Invalid input is terminal, there is no re-prompt.
pub fn confirm(rw: &mut ReadWriter<'_>, prompt_lines: &[&str]) -> io::Result<Decision> {
    for line in prompt_lines {
        writeln!(rw.output, "{line}")?;
    }
    rw.output.flush()?;

    let mut answer = String::new();
    let n = rw.input.read_line(&mut answer)?;
    if n == 0 {
        // Client disconnected while we were blocked. Never reaches the API.
        return Ok(Decision::Invalid);
    }

    Ok(match answer.trim_end_matches(['\r', '\n']) {
        "yes" => Decision::Yes,
        "no" => Decision::No,
        _ => Decision::Invalid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(input: &str) -> (Decision, Vec<u8>) {
        let mut reader = Cursor::new(input.as_bytes().to_vec());
        let mut out = Vec::new();
        let mut rw = ReadWriter::new(&mut reader, &mut out);
        let decision = confirm(&mut rw, &["First line?", "Second line. (yes/no)"]).unwrap();
        (decision, out)
    }

    #[test]
    fn prompt_lines_are_written_in_order() {
        let (_, out) = run("yes\n");
        assert_eq!(out, b"First line?\nSecond line. (yes/no)\n");
    }

    #[test]
    fn exact_tokens_only() {
        assert_eq!(run("yes\n").0, Decision::Yes);
        assert_eq!(run("no\n").0, Decision::No);
        assert_eq!(run("yes\r\n").0, Decision::Yes);
    }

    #[test]
    fn anything_else_is_invalid() {
        for input in ["Yes\n", "YES\n", "y\n", "\n", " yes\n", "yes \n", "maybe\n"] {
            assert_eq!(run(input).0, Decision::Invalid, "input {input:?}");
        }
    }

    #[test]
    fn eof_is_invalid_not_no() {
        assert_eq!(run("").0, Decision::Invalid);
    }
}
