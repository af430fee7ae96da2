//! Bounded conversation window

use std::collections::VecDeque;

/// Default number of turns kept (three user/assistant exchanges)
pub const DEFAULT_HISTORY_TURNS: usize = 6;

/// Who spoke a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One role-tagged utterance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    role: Role,
    text: String,
}

impl Turn {
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }

    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Fixed-capacity FIFO of turns, oldest first
#[derive(Debug, Clone)]
pub struct ConversationHistory {
    turns: VecDeque<Turn>,
    capacity: usize,
}

impl Default for ConversationHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_TURNS)
    }
}

impl ConversationHistory {
    /// Create an empty history holding at most `capacity` turns
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            turns: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a turn, evicting the oldest when full
    pub fn push(&mut self, turn: Turn) {
        if self.capacity == 0 {
            return;
        }
        while self.turns.len() >= self.capacity {
            self.turns.pop_front();
        }
        self.turns.push_back(turn);
    }

    /// Append a user utterance and the assistant's reply
    pub fn record_exchange(&mut self, user: impl Into<String>, assistant: impl Into<String>) {
        self.push(Turn::user(user));
        self.push(Turn::assistant(assistant));
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Iterate turns oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_within_capacity() {
        let mut history = ConversationHistory::with_capacity(4);
        history.record_exchange("hi", "hello");

        assert_eq!(history.len(), 2);
        let turns: Vec<_> = history.iter().collect();
        assert_eq!(turns[0], &Turn::user("hi"));
        assert_eq!(turns[1], &Turn::assistant("hello"));
    }

    #[test]
    fn test_evicts_oldest_first() {
        let mut history = ConversationHistory::with_capacity(3);
        for i in 0..4 {
            history.push(Turn::user(format!("turn {i}")));
        }

        let texts: Vec<_> = history.iter().map(Turn::text).collect();
        assert_eq!(texts, vec!["turn 1", "turn 2", "turn 3"]);
    }

    #[test]
    fn test_four_exchanges_keep_last_three() {
        let mut history = ConversationHistory::default();
        for i in 1..=4 {
            history.record_exchange(format!("q{i}"), format!("a{i}"));
            assert!(history.len() <= history.capacity());
        }

        let texts: Vec<_> = history.iter().map(Turn::text).collect();
        assert_eq!(texts, vec!["q2", "a2", "q3", "a3", "q4", "a4"]);
        assert_eq!(history.iter().next().map(Turn::role), Some(Role::User));
    }

    #[test]
    fn test_clear() {
        let mut history = ConversationHistory::default();
        history.record_exchange("a", "b");
        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn test_zero_capacity_stores_nothing() {
        let mut history = ConversationHistory::with_capacity(0);
        history.record_exchange("a", "b");
        assert!(history.is_empty());
    }
}
