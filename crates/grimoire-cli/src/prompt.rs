use std::io::{BufRead, Write};

use anyhow::{Context, Result};

/// Write `prompt`, then read the next non-blank line from `input`, trimmed.
///
/// Returns `Ok(None)` once `input` is exhausted.
pub fn ask<R, W>(input: &mut R, out: &mut W, prompt: &str) -> Result<Option<String>>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    write!(out, "{prompt}").context("failed to write prompt")?;
    out.flush().context("failed to flush prompt")?;

    let mut line = String::new();
    loop {
        line.clear();
        let read = input.read_line(&mut line).context("failed to read input")?;
        if read == 0 {
            return Ok(None);
        }
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            return Ok(Some(trimmed.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn ask_skips_blank_lines_and_trims() {
        let mut input = Cursor::new("\n   \n  fire  \nnext\n");
        let mut out = Vec::new();

        let answer = match ask(&mut input, &mut out, "Enter the spell effect: ") {
            Ok(answer) => answer,
            Err(err) => panic!("ask should succeed: {err}"),
        };
        assert_eq!(answer.as_deref(), Some("fire"));
        assert_eq!(String::from_utf8_lossy(&out), "Enter the spell effect: ");
    }

    #[test]
    fn ask_reports_exhausted_input() {
        let mut input = Cursor::new("\n");
        let mut out = Vec::new();

        match ask(&mut input, &mut out, "Your Choice: ") {
            Ok(None) => {}
            other => panic!("expected exhausted input, got {other:?}"),
        }
    }
}
