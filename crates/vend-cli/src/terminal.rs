//! # Terminal
//!
//! The line-oriented text channel between the kiosk and the buyer.
//! Everything above this trait is pure request/response logic, so tests run
//! whole sessions against in-memory buffers.

use crate::error::{KioskError, KioskResult};
use std::io::{self, BufRead, Write};

/// Line I/O used by the kiosk
pub trait Terminal {
    /// Read one line without its trailing newline; `None` at end of input
    fn read_line(&mut self) -> io::Result<Option<String>>;

    /// Write text without a newline (prompts)
    fn write(&mut self, text: &str) -> io::Result<()>;

    /// Write a full line
    fn write_line(&mut self, line: &str) -> io::Result<()>;

    /// Show `prompt` and wait for the answer
    fn ask(&mut self, prompt: &str) -> KioskResult<String> {
        self.write(prompt)?;
        self.read_line()?.ok_or(KioskError::InputClosed)
    }
}

/// Terminal over any buffered reader and writer
#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the console and hand back the writer
    pub fn into_output(self) -> W {
        self.output
    }
}

impl Console<io::StdinLock<'static>, io::Stdout> {
    /// Console on the process's stdin/stdout
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Terminal for Console<R, W> {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{}", line)?;
        self.output.flush()
    }
}
