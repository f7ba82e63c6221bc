//! Interactive questions, behind a trait so commands can run unattended.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crate::errors::AppResult;

pub trait Prompter {
    /// Ask a free-form question; the trimmed answer is returned.
    fn ask(&mut self, question: &str) -> AppResult<String>;

    /// Yes/no question. An empty answer picks `default`.
    fn confirm(&mut self, question: &str, default: bool) -> AppResult<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        let answer = self.ask(&format!("{question} {hint}"))?;
        Ok(match answer.to_lowercase().as_str() {
            "" => default,
            "y" | "yes" => true,
            _ => false,
        })
    }
}

/// Reads answers from the terminal.
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn ask(&mut self, question: &str) -> AppResult<String> {
        print!("{question} ");
        io::stdout().flush()?;

        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        Ok(answer.trim().to_string())
    }
}

/// Answers every confirmation with a fixed value and every question with an
/// empty string (`--yes` on the command line).
pub struct AutoConfirm(pub bool);

impl Prompter for AutoConfirm {
    fn ask(&mut self, _question: &str) -> AppResult<String> {
        Ok(String::new())
    }

    fn confirm(&mut self, _question: &str, _default: bool) -> AppResult<bool> {
        Ok(self.0)
    }
}

/// Replays canned answers and remembers what was asked.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    pub asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, question: &str) -> AppResult<String> {
        self.asked.push(question.to_string());
        Ok(self.answers.pop_front().unwrap_or_default())
    }
}
