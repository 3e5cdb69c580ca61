//! An `Interface` fed from a list of input lines, recording all output.
//! Used by tests and for replaying a session from a file.

use super::{Interface, Tone};
use std::collections::VecDeque;
use std::io;

#[derive(Debug, Default)]
pub struct ScriptedInterface {
    input: VecDeque<String>,
    output: Vec<(Tone, String)>,
}

impl ScriptedInterface {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            output: Vec::new(),
        }
    }

    pub fn remaining_input(&self) -> usize {
        self.input.len()
    }

    pub fn output(&self) -> &[(Tone, String)] {
        &self.output
    }

    /// All output joined by newlines.
    pub fn transcript(&self) -> String {
        self.output
            .iter()
            .map(|(_, line)| line.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.output.iter().any(|(_, line)| line.contains(needle))
    }

    /// Lines written with the given tone.
    pub fn lines_with(&self, tone: Tone) -> impl Iterator<Item = &str> {
        self.output
            .iter()
            .filter(move |(t, _)| *t == tone)
            .map(|(_, line)| line.as_str())
    }
}

impl Interface for ScriptedInterface {
    fn write_line(&mut self, tone: Tone, text: &str) {
        self.output.push((tone, text.to_string()));
    }

    fn read_line(&mut self) -> io::Result<String> {
        self.input.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "input script exhausted")
        })
    }

    fn timed_pause(&mut self) {}

    fn clear(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_output_and_consumes_input() {
        let mut ui = ScriptedInterface::new(["first", "second"]);
        ui.message(Tone::Success, "hello");
        assert_eq!(ui.read_line().unwrap(), "first");
        assert_eq!(ui.remaining_input(), 1);
        assert!(ui.contains("hello"));
        assert_eq!(ui.lines_with(Tone::Success).count(), 1);
    }

    #[test]
    fn test_header_layout() {
        let mut ui = ScriptedInterface::default();
        ui.header("TITLE");
        assert_eq!(ui.output().len(), 3);
        assert_eq!(ui.output()[1].0, Tone::Highlight);
        assert!(ui.output()[1].1.contains("TITLE"));
    }
}
