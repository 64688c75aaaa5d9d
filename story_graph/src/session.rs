//! The seam between the play loop and whatever reads and writes for the reader.

use std::num::IntErrorKind;

use crate::error::StoryError;
use crate::node::StoryNode;

/// What the reader answered at a choice prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceInput {
    /// A parsed integer. Range checking is the node's job.
    Number(i64),
    /// Anything that did not parse, kept verbatim for the error report.
    NotANumber(String),
}

impl ChoiceInput {
    /// Interpret one line of reader input.
    ///
    /// Integers too large for `i64` saturate, so they are still numbers and
    /// get rejected as out-of-range choices.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<i64>() {
            Ok(n) => ChoiceInput::Number(n),
            Err(err) => match err.kind() {
                IntErrorKind::PosOverflow => ChoiceInput::Number(i64::MAX),
                IntErrorKind::NegOverflow => ChoiceInput::Number(i64::MIN),
                _ => ChoiceInput::NotANumber(trimmed.to_owned()),
            },
        }
    }
}

/// Surrounding I/O for a play session.
///
/// Any I/O failure aborts the play loop with [`StoryError::Input`].
/// Implementations must render a node's options in stored order using the
/// numbers from [`StoryNode::options`].
pub trait SessionIo {
    /// Show the node text and its numbered options.
    fn present(&mut self, node: &StoryNode) -> std::io::Result<()>;

    /// Block until the reader answers the prompt for `node`.
    fn read_choice(&mut self, node: &StoryNode) -> std::io::Result<ChoiceInput>;

    /// Tell the reader about a recoverable mistake before re-presenting the node.
    fn report(&mut self, error: &StoryError) -> std::io::Result<()>;

    /// The session reached an ending node.
    fn announce_end(&mut self, node: &StoryNode) -> std::io::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choice_input() {
        assert_eq!(ChoiceInput::parse("2\n"), ChoiceInput::Number(2));
        assert_eq!(ChoiceInput::parse("  -1 "), ChoiceInput::Number(-1));
        assert_eq!(
            ChoiceInput::parse("left"),
            ChoiceInput::NotANumber("left".to_owned())
        );
        assert_eq!(ChoiceInput::parse(""), ChoiceInput::NotANumber(String::new()));
    }

    #[test]
    fn test_parse_oversized_numbers() {
        assert_eq!(
            ChoiceInput::parse("99999999999999999999"),
            ChoiceInput::Number(i64::MAX)
        );
        assert_eq!(
            ChoiceInput::parse("-99999999999999999999"),
            ChoiceInput::Number(i64::MIN)
        );
        assert_eq!(
            ChoiceInput::parse("9e99"),
            ChoiceInput::NotANumber("9e99".to_owned())
        );
    }
}
