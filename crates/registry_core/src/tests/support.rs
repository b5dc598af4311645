use std::{cell::RefCell, collections::VecDeque};

use desktop_integration::{BrowserOpener, Confirm, FormRenderer, OpenError, Prompt};

/// Answers prompts from a script and records what was asked.
#[derive(Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<Option<String>>,
    pub asked: Vec<(String, Option<String>)>,
}

impl ScriptedPrompt {
    pub fn answering<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(|a| a.map(Into::into)).collect(),
            asked: Vec::new(),
        }
    }
}

impl Prompt for ScriptedPrompt {
    fn ask_text(&mut self, label: &str, default: Option<&str>) -> Option<String> {
        self.asked
            .push((label.to_string(), default.map(str::to_string)));
        self.answers.pop_front().flatten()
    }
}

pub struct FixedConfirm {
    answer: bool,
    pub asked: usize,
}

impl FixedConfirm {
    pub fn yes() -> Self {
        Self {
            answer: true,
            asked: 0,
        }
    }

    pub fn no() -> Self {
        Self {
            answer: false,
            asked: 0,
        }
    }
}

impl Confirm for FixedConfirm {
    fn ask_yes_no(&mut self, _label: &str) -> bool {
        self.asked += 1;
        self.answer
    }
}

/// Validates like the real opener but records instead of launching.
#[derive(Default)]
pub struct RecordingOpener {
    pub opened: RefCell<Vec<String>>,
}

impl BrowserOpener for RecordingOpener {
    fn open(&self, url: &str) -> Result<(), OpenError> {
        desktop_integration::parse_uri(url)?;
        self.opened.borrow_mut().push(url.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct CountingForm {
    pub rendered: usize,
}

impl FormRenderer for CountingForm {
    fn render(&mut self) {
        self.rendered += 1;
    }
}
