//! Session-scoped transcript store.

use crate::core::constants::GREETING;
use crate::core::message::Turn;

/// Ordered history of turns for one session.
///
/// A conversation is never empty: it starts with, and resets to, a single
/// assistant greeting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            turns: vec![Turn::assistant(GREETING)],
        }
    }

    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn reset(&mut self) {
        self.turns.clear();
        self.turns.push(Turn::assistant(GREETING));
    }

    pub fn all(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Turn> {
        self.turns.iter()
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a Conversation {
    type Item = &'a Turn;
    type IntoIter = std::slice::Iter<'a, Turn>;

    fn into_iter(self) -> Self::IntoIter {
        self.turns.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Role;

    #[test]
    fn starts_with_greeting_only() {
        let conversation = Conversation::new();
        assert_eq!(conversation.len(), 1);
        let greeting = &conversation.all()[0];
        assert_eq!(greeting.role(), Role::Assistant);
        assert_eq!(greeting.content(), GREETING);
    }

    #[test]
    fn append_preserves_submission_order() {
        let mut conversation = Conversation::new();
        let turns = [
            Turn::user("first"),
            Turn::assistant("second"),
            Turn::user("third"),
            Turn::assistant("fourth"),
        ];
        for turn in turns.iter().cloned() {
            conversation.append(turn);
        }

        assert_eq!(conversation.len(), turns.len() + 1);
        assert_eq!(&conversation.all()[1..], &turns[..]);
        assert_eq!(conversation.last().map(Turn::content), Some("fourth"));
    }

    #[test]
    fn reset_always_leaves_one_greeting() {
        for prior in [0usize, 1, 7, 40] {
            let mut conversation = Conversation::new();
            for i in 0..prior {
                conversation.append(Turn::user(format!("message {i}")));
            }
            conversation.reset();
            assert_eq!(conversation, Conversation::new());
        }
    }
}
