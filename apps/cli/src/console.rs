//! Standard input/output console.

use std::io::{self, BufRead, IsTerminal, Write};
use vocab_core::console::trim_line_ending;
use vocab_core::Console;

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";

/// Console over the process's stdin and stdout.
pub struct Terminal<R, W> {
    input: R,
    output: W,
    clear_screen: bool,
}

impl Terminal<io::StdinLock<'static>, io::Stdout> {
    /// Screen clearing is skipped when stdout is not a terminal.
    pub fn stdio() -> Self {
        let clear_screen = io::stdout().is_terminal();
        Self::new(io::stdin().lock(), io::stdout(), clear_screen)
    }
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W, clear_screen: bool) -> Self {
        Self {
            input,
            output,
            clear_screen,
        }
    }
}

impl<R: BufRead, W: Write> Console for Terminal<R, W> {
    fn clear(&mut self) -> io::Result<()> {
        if self.clear_screen {
            write!(self.output, "{CLEAR_SCREEN}")?;
            self.output.flush()?;
        }
        Ok(())
    }

    fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")?;
        self.output.flush()
    }

    fn ask(&mut self) -> io::Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "end of input",
            ));
        }
        Ok(trim_line_ending(&line).to_string())
    }
}
