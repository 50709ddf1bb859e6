// Prompt boundary between the record core and whatever collects answers.
//
// The core only needs three kinds of question: free text, masked secret and
// single choice. A `Prompter` answers them; the `ask_*` helpers own the
// re-prompt loop, feeding each answer to a field validator until it passes.

use anyhow::Result;
use std::fmt::Display;

pub trait Prompter {
    fn text(&mut self, prompt: &str) -> Result<String>;

    /// Like `text` but the answer must not be echoed.
    fn secret(&mut self, prompt: &str) -> Result<String>;

    /// Returns the index of the chosen item.
    fn select(&mut self, prompt: &str, items: &[&str]) -> Result<usize>;

    /// Show why the previous answer was rejected.
    fn reject(&mut self, message: &str);
}

/// Ask a text question until `validate` accepts the answer.
pub fn ask_text<T, E, F>(prompter: &mut dyn Prompter, prompt: &str, validate: F) -> Result<T>
where
    E: Display,
    F: Fn(&str) -> std::result::Result<T, E>,
{
    loop {
        let answer = prompter.text(prompt)?;
        match validate(&answer) {
            Ok(value) => return Ok(value),
            Err(e) => prompter.reject(&e.to_string()),
        }
    }
}

/// Ask a masked question until `validate` accepts the answer.
pub fn ask_secret<T, E, F>(prompter: &mut dyn Prompter, prompt: &str, validate: F) -> Result<T>
where
    E: Display,
    F: Fn(&str) -> std::result::Result<T, E>,
{
    loop {
        let answer = prompter.secret(prompt)?;
        match validate(&answer) {
            Ok(value) => return Ok(value),
            Err(e) => prompter.reject(&e.to_string()),
        }
    }
}

/// Ask a single-choice question over `options`, labelled by `label`.
pub fn ask_choice<T: Copy>(
    prompter: &mut dyn Prompter,
    prompt: &str,
    options: &[T],
    label: impl Fn(&T) -> &'static str,
) -> Result<T> {
    let items: Vec<&str> = options.iter().map(&label).collect();
    let index = prompter.select(prompt, &items)?;
    options
        .get(index)
        .copied()
        .ok_or_else(|| anyhow::anyhow!("Choice {} out of range for {:?}", index, prompt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct Script {
        answers: VecDeque<String>,
        rejections: Vec<String>,
    }

    impl Prompter for Script {
        fn text(&mut self, _prompt: &str) -> Result<String> {
            self.answers
                .pop_front()
                .ok_or_else(|| anyhow::anyhow!("script exhausted"))
        }

        fn secret(&mut self, prompt: &str) -> Result<String> {
            self.text(prompt)
        }

        fn select(&mut self, prompt: &str, _items: &[&str]) -> Result<usize> {
            Ok(self.text(prompt)?.parse()?)
        }

        fn reject(&mut self, message: &str) {
            self.rejections.push(message.to_string());
        }
    }

    fn script(answers: &[&str]) -> Script {
        Script {
            answers: answers.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn text_is_asked_again_until_valid() {
        let mut p = script(&["", "  ", "ok"]);
        let value: String = ask_text(&mut p, "Name", |s: &str| {
            if s.trim().is_empty() {
                Err("Please enter a name")
            } else {
                Ok(s.to_string())
            }
        })
        .unwrap();
        assert_eq!(value, "ok");
        assert_eq!(p.rejections.len(), 2);
    }

    #[test]
    fn exhausted_answers_propagate_as_errors() {
        let mut p = script(&["bad"]);
        let res = ask_secret(&mut p, "Password", |_: &str| Err::<(), _>("no"));
        assert!(res.is_err());
    }

    #[test]
    fn choice_maps_back_to_option() {
        let mut p = script(&["1"]);
        let picked = ask_choice(&mut p, "Pick", &[10u8, 20, 30], |_| "n").unwrap();
        assert_eq!(picked, 20);

        let mut p = script(&["7"]);
        assert!(ask_choice(&mut p, "Pick", &[10u8], |_| "n").is_err());
    }
}
