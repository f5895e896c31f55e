//! Terminal implementation of `ConsolePort` (stdin/stdout, hidden password input).

use crate::domain::errors::Result;
use crate::infrastructure::terminal::spinner::Spinner;
use crate::ports::console_port::ConsolePort;
use std::io::{self, BufRead, Write};

#[derive(Default)]
pub struct TerminalConsole {
    spinner: Option<Spinner>,
}

impl TerminalConsole {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConsolePort for TerminalConsole {
    fn read_line(&mut self, label: &str) -> Result<Option<String>> {
        let mut stdout = io::stdout();
        write!(stdout, "{}", label)?;
        stdout.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(|c| c == '\n' || c == '\r').to_string()))
    }

    fn read_secret(&mut self, label: &str) -> Result<Option<String>> {
        match rpassword::prompt_password(label) {
            Ok(secret) => Ok(Some(secret)),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn say(&mut self, message: &str) {
        println!("{}", message);
    }

    fn begin_wait(&mut self, message: &str) {
        if let Some(previous) = self.spinner.replace(Spinner::start(message)) {
            previous.stop();
        }
    }

    fn end_wait(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.stop();
        }
    }
}
