//! Line-oriented terminal implementation of the prompt, confirm and notify capabilities.

use std::io::{BufRead, ErrorKind, Write};

use desktop_integration::{Confirm, Notify, Prompt};
use tracing::warn;

/// Typing this alone at a prompt cancels it, same as closing the input stream.
pub const CANCEL_INPUT: &str = ":q";

pub const INVALID_TEXT_NOTICE: &str = "That input was not valid text; please type it again.";

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    pub fn emit(&mut self, text: &str) {
        if let Err(err) = writeln!(self.output, "{text}").and_then(|()| self.output.flush()) {
            warn!(error = %err, "failed to write to terminal");
        }
    }

    fn emit_inline(&mut self, text: &str) {
        if let Err(err) = write!(self.output, "{text}").and_then(|()| self.output.flush()) {
            warn!(error = %err, "failed to write to terminal");
        }
    }

    /// One line without its terminator. `None` at end of input or when the input stream
    /// fails; a line that is not valid UTF-8 is reported and read again.
    pub fn read_line(&mut self) -> Option<String> {
        loop {
            let mut raw = Vec::new();
            match self.input.read_until(b'\n', &mut raw) {
                Ok(0) => return None,
                Ok(_) => match String::from_utf8(raw) {
                    Ok(line) => return Some(line.trim_end_matches(['\r', '\n']).to_string()),
                    Err(err) => {
                        warn!(error = %err, "discarded input line that is not valid UTF-8");
                        self.show(INVALID_TEXT_NOTICE);
                    }
                },
                Err(err) if err.kind() == ErrorKind::Interrupted => {}
                Err(err) => {
                    warn!(error = %err, "failed to read from terminal");
                    return None;
                }
            }
        }
    }

    /// Shows a numbered menu and returns the zero-based choice. Re-asks on bad input;
    /// `None` at end of input.
    pub fn choose(&mut self, title: &str, options: &[&str]) -> Option<usize> {
        loop {
            self.emit("");
            self.emit(&format!("== {title} =="));
            for (i, option) in options.iter().enumerate() {
                self.emit(&format!("  {}) {option}", i + 1));
            }
            self.emit_inline("> ");
            let line = self.read_line()?;
            match line.trim().parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => return Some(n - 1),
                _ => self.emit("Please pick one of the listed numbers."),
            }
        }
    }
}

impl<R: BufRead, W: Write> Prompt for Console<R, W> {
    fn ask_text(&mut self, label: &str, default: Option<&str>) -> Option<String> {
        match default {
            Some(default) => self.emit_inline(&format!("{label} [{default}] ")),
            None => self.emit_inline(&format!("{label} ")),
        }
        let line = self.read_line()?;
        if line == CANCEL_INPUT {
            return None;
        }
        match default {
            Some(default) if line.is_empty() => Some(default.to_string()),
            _ => Some(line),
        }
    }
}

impl<R: BufRead, W: Write> Confirm for Console<R, W> {
    fn ask_yes_no(&mut self, label: &str) -> bool {
        self.emit_inline(&format!("{label} (y/n) "));
        self.read_line()
            .map(|answer| matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
            .unwrap_or(false)
    }
}

impl<R: BufRead, W: Write> Notify for Console<R, W> {
    fn show(&mut self, message: &str) {
        self.emit(&format!("! {message}"));
    }
}

#[cfg(test)]
pub(crate) fn scripted(lines: &[&str]) -> Console<std::io::Cursor<Vec<u8>>, Vec<u8>> {
    let mut input = lines.join("\n");
    if !lines.is_empty() {
        input.push('\n');
    }
    scripted_bytes(input.into_bytes())
}

#[cfg(test)]
pub(crate) fn scripted_bytes(input: Vec<u8>) -> Console<std::io::Cursor<Vec<u8>>, Vec<u8>> {
    Console::new(std::io::Cursor::new(input), Vec::new())
}
