use std::collections::VecDeque;

use anyhow::{anyhow, Result};
use healthrec_cli::prompt::Prompter;

/// Answers prompts from a fixed script. Select answers are matched against
/// item labels, so scripts read like what a user would pick.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    pub rejections: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        ScriptedPrompter {
            answers: answers.iter().map(|s| s.to_string()).collect(),
            rejections: Vec::new(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.answers.is_empty()
    }

    fn next(&mut self, prompt: &str) -> Result<String> {
        self.answers
            .pop_front()
            .ok_or_else(|| anyhow!("No scripted answer left for {prompt:?}"))
    }
}

impl Prompter for ScriptedPrompter {
    fn text(&mut self, prompt: &str) -> Result<String> {
        self.next(prompt)
    }

    fn secret(&mut self, prompt: &str) -> Result<String> {
        self.next(prompt)
    }

    fn select(&mut self, prompt: &str, items: &[&str]) -> Result<usize> {
        let answer = self.next(prompt)?;
        items
            .iter()
            .position(|i| *i == answer)
            .ok_or_else(|| anyhow!("{answer:?} is not one of {items:?}"))
    }

    fn reject(&mut self, message: &str) {
        self.rejections.push(message.to_string());
    }
}

/// Answers for a complete signup, starting at the name prompt.
pub fn signup_answers<'a>(username: &'a str, password: &'a str, role: &'a str) -> Vec<&'a str> {
    vec![
        "Alice Example",
        "2.1.2006",
        "8 St James Avenue",
        "Nelson",
        "",
        "",
        username,
        password,
        role,
    ]
}
