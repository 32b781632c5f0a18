use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("Input stream closed")]
    InputClosed,
}

/// Line-oriented terminal interaction used by the extract and merge flows.
pub trait Console {
    /// Show `message` and block until the user enters a line.
    ///
    /// The returned line has its terminator stripped but is otherwise
    /// untouched. Fails with [`ConsoleError::InputClosed`] at end of input.
    fn prompt_line(&mut self, message: &str) -> Result<String>;

    fn print(&mut self, message: &str);
}

/// Console on the process' stdin/stdout.
pub struct StdConsole {
    stdin: io::Stdin,
    stdout: io::Stdout,
}

impl StdConsole {
    pub fn new() -> Self {
        StdConsole {
            stdin: io::stdin(),
            stdout: io::stdout(),
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for StdConsole {
    fn prompt_line(&mut self, message: &str) -> Result<String> {
        let mut out = self.stdout.lock();
        write!(out, "{}", message).context("Failed to write prompt")?;
        out.flush().context("Failed to flush stdout")?;

        let mut line = String::new();
        let read = self
            .stdin
            .lock()
            .read_line(&mut line)
            .context("Failed to read from stdin")?;
        if read == 0 {
            return Err(ConsoleError::InputClosed.into());
        }

        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(line)
    }

    fn print(&mut self, message: &str) {
        println!("{}", message);
    }
}

/// Strip surrounding whitespace, then surrounding quotes, from a pasted path.
pub fn clean_path(raw: &str) -> &str {
    raw.trim().trim_matches(['"', '\''])
}
