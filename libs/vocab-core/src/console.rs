//! Line-based console used by drill sessions and menus.

use std::io;

/// A line-oriented text console.
///
/// `ask` returns one line without its line terminator. Implementations report
/// end of input as [`io::ErrorKind::UnexpectedEof`].
pub trait Console {
    fn clear(&mut self) -> io::Result<()>;

    fn say(&mut self, text: &str) -> io::Result<()>;

    fn ask(&mut self) -> io::Result<String>;

    /// Wait until the user acknowledges what is on screen.
    fn pause(&mut self) -> io::Result<()> {
        self.ask().map(|_| ())
    }
}

impl<C: Console + ?Sized> Console for &mut C {
    fn clear(&mut self) -> io::Result<()> {
        (**self).clear()
    }

    fn say(&mut self, text: &str) -> io::Result<()> {
        (**self).say(text)
    }

    fn ask(&mut self) -> io::Result<String> {
        (**self).ask()
    }

    fn pause(&mut self) -> io::Result<()> {
        (**self).pause()
    }
}

/// Strip a trailing `\n` or `\r\n` from a line read from input.
pub fn trim_line_ending(line: &str) -> &str {
    line.strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_only_the_line_ending() {
        assert_eq!(trim_line_ending("kot\n"), "kot");
        assert_eq!(trim_line_ending("kot \r\n"), "kot ");
        assert_eq!(trim_line_ending(" kot"), " kot");
    }
}
