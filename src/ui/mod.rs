//! Presentation and input.
//!
//! Game logic talks to the player only through [`Interface`]. Implementors
//! provide line output, line input and pacing; prompting and re-prompting
//! on bad input are shared default methods.

pub mod console;
pub mod input;
pub mod screens;
pub mod scripted;

pub use console::ConsoleInterface;
pub use scripted::ScriptedInterface;

use input::{parse_char, parse_choice, parse_text, parse_yes_no};
use std::io;

/// How a line should stand out. Coloring is up to the implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Info,
    Success,
    Warning,
    Error,
    Highlight,
}

const DIVIDER_WIDTH: usize = 50;
const BAR_WIDTH: usize = 20;

pub trait Interface {
    /// Writes one line of output.
    fn write_line(&mut self, tone: Tone, text: &str);

    /// Reads one line of input without the line terminator.
    /// Running out of input is `ErrorKind::UnexpectedEof`.
    fn read_line(&mut self) -> io::Result<String>;

    /// Cosmetic delay after a message.
    fn timed_pause(&mut self);

    fn clear(&mut self);

    /// Shows a prompt right before input is read.
    fn write_prompt(&mut self, text: &str) {
        self.write_line(Tone::Info, text);
    }

    fn message(&mut self, tone: Tone, text: &str) {
        self.write_line(tone, text);
    }

    fn divider(&mut self) {
        self.write_line(Tone::Plain, &"=".repeat(DIVIDER_WIDTH));
    }

    fn header(&mut self, title: &str) {
        self.divider();
        self.write_line(Tone::Highlight, &format!("{:^width$}", title, width = DIVIDER_WIDTH));
        self.divider();
    }

    fn bar(&mut self, label: &str, current: u32, max: u32, tone: Tone) {
        self.write_line(tone, &render_bar(label, current, max, BAR_WIDTH));
    }

    /// A message followed by the cosmetic delay.
    fn timed_message(&mut self, tone: Tone, text: &str) {
        self.write_line(tone, text);
        self.timed_pause();
    }

    /// A message the player has to acknowledge with Enter.
    fn blocking_message(&mut self, tone: Tone, text: &str) -> io::Result<()> {
        self.write_line(tone, text);
        self.write_prompt("Press Enter to continue...");
        self.read_line().map(|_| ())
    }

    /// Asks until a number in `[min, max]` is entered.
    fn prompt_choice(&mut self, prompt: &str, min: u32, max: u32) -> io::Result<u32> {
        loop {
            self.write_prompt(&format!("{} [{}-{}]: ", prompt, min, max));
            match parse_choice(&self.read_line()?, min, max) {
                Ok(choice) => return Ok(choice),
                Err(e) => self.write_line(Tone::Warning, &e.to_string()),
            }
        }
    }

    fn prompt_char(&mut self, prompt: &str) -> io::Result<char> {
        loop {
            self.write_prompt(&format!("{}: ", prompt));
            match parse_char(&self.read_line()?) {
                Ok(c) => return Ok(c),
                Err(e) => self.write_line(Tone::Warning, &e.to_string()),
            }
        }
    }

    /// Asks until non-blank text is entered; longer input is cut to `max_len`.
    fn prompt_string(&mut self, prompt: &str, max_len: usize) -> io::Result<String> {
        loop {
            self.write_prompt(&format!("{}: ", prompt));
            match parse_text(&self.read_line()?, max_len) {
                Ok(text) => return Ok(text),
                Err(e) => self.write_line(Tone::Warning, &e.to_string()),
            }
        }
    }

    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        loop {
            self.write_prompt(&format!("{} (y/n): ", prompt));
            match parse_yes_no(&self.read_line()?) {
                Ok(answer) => return Ok(answer),
                Err(e) => self.write_line(Tone::Warning, &e.to_string()),
            }
        }
    }
}

/// `Label [#########-----------] 45/100`
pub fn render_bar(label: &str, current: u32, max: u32, width: usize) -> String {
    let filled = if max == 0 {
        0
    } else {
        ((current.min(max) as u64 * width as u64) / max as u64) as usize
    };
    format!(
        "{:<8} [{}{}] {}/{}",
        label,
        "#".repeat(filled),
        "-".repeat(width - filled),
        current,
        max
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_bar() {
        assert_eq!(render_bar("HP", 50, 100, 10), "HP       [#####-----] 50/100");
        assert_eq!(render_bar("HP", 0, 0, 4), "HP       [----] 0/0");
        assert_eq!(render_bar("HP", 120, 100, 4), "HP       [####] 120/100");
    }

    #[test]
    fn test_prompt_choice_reprompts() {
        let mut ui = ScriptedInterface::new(["x", "9", "2"]);
        assert_eq!(ui.prompt_choice("Pick", 1, 3).unwrap(), 2);
        assert!(ui.contains("please enter a number"));
        assert!(ui.contains("please choose between 1 and 3"));
    }

    #[test]
    fn test_confirm_reprompts() {
        let mut ui = ScriptedInterface::new(["perhaps", "n"]);
        assert!(!ui.confirm("Sure?").unwrap());
    }

    #[test]
    fn test_prompt_on_empty_script_is_eof() {
        let mut ui = ScriptedInterface::new(Vec::<String>::new());
        let err = ui.prompt_string("Name", 10).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
