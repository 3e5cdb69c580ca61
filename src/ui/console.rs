//! Terminal implementation of `Interface` on stdin/stdout via crossterm.

use super::{Interface, Tone};
use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Stylize};
use crossterm::terminal::{Clear, ClearType};
use crossterm::ExecutableCommand;
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

pub struct ConsoleInterface {
    color: bool,
    message_delay: Duration,
}

impl ConsoleInterface {
    pub fn new(color: bool, message_delay_ms: u64) -> Self {
        Self {
            color,
            message_delay: Duration::from_millis(message_delay_ms),
        }
    }

    fn color_for(tone: Tone) -> Option<Color> {
        match tone {
            Tone::Plain => None,
            Tone::Info => Some(Color::Cyan),
            Tone::Success => Some(Color::Green),
            Tone::Warning => Some(Color::Yellow),
            Tone::Error => Some(Color::Red),
            Tone::Highlight => Some(Color::Magenta),
        }
    }

    fn styled(&self, tone: Tone, text: &str) -> String {
        match Self::color_for(tone) {
            Some(color) if self.color => text.with(color).to_string(),
            _ => text.to_string(),
        }
    }
}

impl Interface for ConsoleInterface {
    fn write_line(&mut self, tone: Tone, text: &str) {
        println!("{}", self.styled(tone, text));
    }

    fn write_prompt(&mut self, text: &str) {
        print!("{}", self.styled(Tone::Info, text));
        // Prompt text is cosmetic; a failed flush only delays it.
        let _ = io::stdout().flush();
    }

    fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn timed_pause(&mut self) {
        if !self.message_delay.is_zero() {
            thread::sleep(self.message_delay);
        }
    }

    fn clear(&mut self) {
        let mut stdout = io::stdout();
        let cleared = stdout
            .execute(Clear(ClearType::All))
            .and_then(|out| out.execute(MoveTo(0, 0)))
            .map(|_| ());
        if let Err(e) = cleared {
            log::warn!("could not clear the screen: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_output_without_color() {
        let console = ConsoleInterface::new(false, 0);
        assert_eq!(console.styled(Tone::Error, "oops"), "oops");
    }

    #[test]
    fn test_colored_output_has_escape_codes() {
        let console = ConsoleInterface::new(true, 0);
        let text = console.styled(Tone::Success, "yay");
        assert!(text.contains("yay"));
        // crossterm honors NO_COLOR on its own
        if std::env::var_os("NO_COLOR").is_none() {
            assert!(text.starts_with('\u{1b}'));
        }
        assert_eq!(console.styled(Tone::Plain, "x"), "x");
    }
}
