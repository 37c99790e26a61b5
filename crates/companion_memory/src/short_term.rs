use crate::interaction::Interaction;
use std::collections::VecDeque;

/// Bounded, oldest-first interaction buffer.
///
/// Pushing onto a full buffer evicts the oldest interaction.
#[derive(Debug, Clone)]
pub struct ShortTermHistory {
    items: VecDeque<Interaction>,
    capacity: usize,
}

impl ShortTermHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, interaction: Interaction) {
        if self.capacity == 0 {
            return;
        }
        while self.items.len() >= self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(interaction);
    }

    /// Replace the contents, keeping only the newest `capacity` interactions.
    pub fn replace(&mut self, interactions: Vec<Interaction>) {
        self.items.clear();
        let skip = interactions.len().saturating_sub(self.capacity);
        self.items.extend(interactions.into_iter().skip(skip));
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Interaction> + ExactSizeIterator {
        self.items.iter()
    }

    /// The last `n` interactions, oldest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &Interaction> {
        self.items.iter().skip(self.items.len().saturating_sub(n))
    }

    pub fn first(&self) -> Option<&Interaction> {
        self.items.front()
    }

    pub fn last(&self) -> Option<&Interaction> {
        self.items.back()
    }

    pub fn to_vec(&self) -> Vec<Interaction> {
        self.items.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::InteractionContext;

    fn numbered(i: usize) -> Interaction {
        Interaction::new(&format!("q{}", i), &format!("a{}", i), InteractionContext::new())
    }

    #[test]
    fn test_fifo_eviction() {
        let mut history = ShortTermHistory::new(3);
        for i in 0..5 {
            history.push(numbered(i));
        }
        assert_eq!(history.len(), 3);
        let inputs: Vec<&str> = history.iter().map(|i| i.user_input()).collect();
        assert_eq!(inputs, vec!["q2", "q3", "q4"]);
    }

    #[test]
    fn test_recent_window() {
        let mut history = ShortTermHistory::new(10);
        for i in 0..4 {
            history.push(numbered(i));
        }
        let last_two: Vec<&str> = history.recent(2).map(|i| i.user_input()).collect();
        assert_eq!(last_two, vec!["q2", "q3"]);
        assert_eq!(history.recent(10).count(), 4);
        assert_eq!(history.recent(0).count(), 0);
    }

    #[test]
    fn test_replace_caps_to_capacity() {
        let mut history = ShortTermHistory::new(2);
        history.replace((0..5).map(numbered).collect());
        let inputs: Vec<&str> = history.iter().map(|i| i.user_input()).collect();
        assert_eq!(inputs, vec!["q3", "q4"]);
    }

    #[test]
    fn test_zero_capacity_holds_nothing() {
        let mut history = ShortTermHistory::new(0);
        history.push(numbered(0));
        assert!(history.is_empty());
        history.replace(vec![numbered(1)]);
        assert!(history.is_empty());
    }
}
