//! Numeric prompts asked during a placement, and the dialog seam that answers them

use crate::domain::ShapeKind;
use crate::fl;
use crate::session::state::SessionConfig;

/// Which parameter a prompt asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Shape,
    Height,
    XRadius,
    YRadius,
}

impl Field {
    /// Inclusive bounds and spinner step for this field
    pub fn range(self) -> (i32, i32, i32) {
        match self {
            Field::Shape => (ShapeKind::MIN_CODE, ShapeKind::MAX_CODE, 1),
            Field::Height => (1, 15, 1),
            Field::XRadius | Field::YRadius => (10, 50, 2),
        }
    }

    pub fn accepts(self, value: i32) -> bool {
        let (min, max, _) = self.range();
        (min..=max).contains(&value)
    }

    pub fn label(self) -> String {
        match self {
            Field::Shape => fl!("prompt-shape"),
            Field::Height => fl!("prompt-height"),
            Field::XRadius => fl!("prompt-x-radius"),
            Field::YRadius => fl!("prompt-y-radius"),
        }
    }

    /// Session value offered as the default answer
    pub fn default_from(self, session: &SessionConfig) -> i32 {
        match self {
            Field::Shape => i32::from(session.shape.code()),
            Field::Height => session.height,
            Field::XRadius => session.x_radius,
            Field::YRadius => session.y_radius,
        }
    }
}

/// A single question with its default and bounds
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub field: Field,
    pub label: String,
    pub default: i32,
    pub min: i32,
    pub max: i32,
    pub step: i32,
}

impl Prompt {
    pub fn new(field: Field, session: &SessionConfig) -> Self {
        let (min, max, step) = field.range();
        Self {
            field,
            label: field.label(),
            default: field.default_from(session).clamp(min, max),
            min,
            max,
            step,
        }
    }
}

/// Answers placement prompts. Returning `None` cancels the placement.
pub trait Prompter {
    fn ask(&mut self, prompt: &Prompt) -> Option<i32>;

    /// Called when an answer was refused; the same prompt is asked again
    fn reject(&mut self, _prompt: &Prompt, _reason: &str) {}
}

/// Prompter fed from a fixed list of answers
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: std::collections::VecDeque<Option<i32>>,
    pub asked: Vec<Field>,
    pub rejected: Vec<Field>,
}

#[cfg(test)]
impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Option<i32>>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
impl Prompter for ScriptedPrompter {
    fn ask(&mut self, prompt: &Prompt) -> Option<i32> {
        self.asked.push(prompt.field);
        self.answers.pop_front().flatten()
    }

    fn reject(&mut self, prompt: &Prompt, _reason: &str) {
        self.rejected.push(prompt.field);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges() {
        assert_eq!(Field::Shape.range(), (1, 2, 1));
        assert_eq!(Field::Height.range(), (1, 15, 1));
        assert_eq!(Field::XRadius.range(), (10, 50, 2));
        assert_eq!(Field::YRadius.range(), (10, 50, 2));
    }

    #[test]
    fn test_prompt_defaults_from_session() {
        let mut session = SessionConfig::default();
        session.x_radius = 34;

        let prompt = Prompt::new(Field::XRadius, &session);
        assert_eq!(prompt.default, 34);
        assert!(Field::XRadius.accepts(10));
        assert!(Field::XRadius.accepts(50));
        assert!(!Field::XRadius.accepts(9));
        assert!(!Field::XRadius.accepts(51));
    }

    #[test]
    fn test_prompt_default_is_clamped() {
        let mut session = SessionConfig::default();
        session.height = 99;
        assert_eq!(Prompt::new(Field::Height, &session).default, 15);
    }

    #[test]
    fn test_labels_are_localized() {
        assert!(!Field::Shape.label().is_empty());
        assert!(Field::XRadius.label().contains("10-50"));
    }

    #[test]
    fn test_scripted_prompter_runs_dry() {
        let session = SessionConfig::default();
        let prompt = Prompt::new(Field::Shape, &session);
        let mut prompter = ScriptedPrompter::new([Some(2)]);

        assert_eq!(prompter.ask(&prompt), Some(2));
        assert_eq!(prompter.ask(&prompt), None);
        assert_eq!(prompter.asked, vec![Field::Shape, Field::Shape]);
    }
}
