//! Prompt backends.

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};
use std::io::{BufRead, Write};

/// Source of operator answers.
pub trait Prompter {
    /// Ask one question and return the raw answer.
    fn ask(&mut self, prompt: &str) -> Result<String>;

    /// Show a message (validation errors, reference tables).
    fn say(&mut self, message: &str) -> Result<()>;
}

/// Interactive terminal prompts.
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self { theme: ColorfulTheme::default() }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn ask(&mut self, prompt: &str) -> Result<String> {
        let answer: String =
            Input::with_theme(&self.theme).with_prompt(prompt).allow_empty(true).interact_text()?;
        Ok(answer)
    }

    fn say(&mut self, message: &str) -> Result<()> {
        println!("{message}");
        Ok(())
    }
}

/// Line-oriented prompts for piped input. End of input answers `quit`.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt}: ")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(super::QUIT.to_string());
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }
}
