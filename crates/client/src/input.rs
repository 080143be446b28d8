//! Parsing of typed player input.

use quiz_core::LifelineKind;

/// What the player typed while a question is on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayInput {
    /// Zero-based option index.
    Answer(usize),
    Lifeline(LifelineKind),
    Quit,
    Unknown,
}

impl PlayInput {
    /// Accepts option letters (`a`..) or numbers (`1`..), and lifeline
    /// shortcuts `50`, `skip`, `time`.
    pub fn parse(line: &str, options: usize) -> Self {
        let line = line.trim().to_ascii_lowercase();
        match line.as_str() {
            "50" | "5050" | "50/50" | "fifty" => return Self::Lifeline(LifelineKind::FiftyFifty),
            "s" | "skip" => return Self::Lifeline(LifelineKind::Skip),
            "t" | "time" | "+" => return Self::Lifeline(LifelineKind::ExtraTime),
            "q" | "quit" | "exit" => return Self::Quit,
            _ => {}
        }

        option_index(&line, options).map_or(Self::Unknown, Self::Answer)
    }
}

/// Letter `a` or number `1` both mean the first option.
pub fn option_index(line: &str, options: usize) -> Option<usize> {
    let index = match line.as_bytes() {
        [letter @ b'a'..=b'z'] => usize::from(letter - b'a'),
        _ => line.parse::<usize>().ok()?.checked_sub(1)?,
    };
    (index < options).then_some(index)
}

/// Letter shown next to option `index`.
pub fn option_label(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .and_then(|index| b'A'.checked_add(index))
        .filter(u8::is_ascii_uppercase)
        .map_or('?', char::from)
}

/// One-based menu choice in `1..=len`, returned zero-based.
pub fn menu_choice(line: &str, len: usize) -> Option<usize> {
    let choice = line.trim().parse::<usize>().ok()?.checked_sub(1)?;
    (choice < len).then_some(choice)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_and_numbers_select_options() {
        assert_eq!(PlayInput::parse("b", 4), PlayInput::Answer(1));
        assert_eq!(PlayInput::parse(" C ", 4), PlayInput::Answer(2));
        assert_eq!(PlayInput::parse("4", 4), PlayInput::Answer(3));
        assert_eq!(PlayInput::parse("e", 4), PlayInput::Unknown);
        assert_eq!(PlayInput::parse("0", 4), PlayInput::Unknown);
    }

    #[test]
    fn lifeline_shortcuts() {
        assert_eq!(PlayInput::parse("50", 4), PlayInput::Lifeline(LifelineKind::FiftyFifty));
        assert_eq!(PlayInput::parse("skip", 4), PlayInput::Lifeline(LifelineKind::Skip));
        assert_eq!(PlayInput::parse("T", 4), PlayInput::Lifeline(LifelineKind::ExtraTime));
        assert_eq!(PlayInput::parse("q", 4), PlayInput::Quit);
    }

    #[test]
    fn labels_follow_the_alphabet() {
        assert_eq!(option_label(0), 'A');
        assert_eq!(option_label(3), 'D');
        assert_eq!(option_label(40), '?');
    }

    #[test]
    fn menu_choices_are_one_based() {
        assert_eq!(menu_choice("1", 3), Some(0));
        assert_eq!(menu_choice("3", 3), Some(2));
        assert_eq!(menu_choice("4", 3), None);
        assert_eq!(menu_choice("x", 3), None);
    }
}
