//! Port for the interactive side of the tool: prompts in, messages out.

use crate::domain::errors::Result;

pub trait ConsolePort {
    /// Shows `label` and reads one line. `Ok(None)` means input was closed.
    fn read_line(&mut self, label: &str) -> Result<Option<String>>;

    /// Like `read_line` but without echoing what is typed.
    fn read_secret(&mut self, label: &str) -> Result<Option<String>>;

    /// Prints one message line.
    fn say(&mut self, message: &str);

    /// Shows a busy indicator labelled `message` until `end_wait` is called.
    fn begin_wait(&mut self, message: &str);

    fn end_wait(&mut self);
}
