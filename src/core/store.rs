//! # Habit Store
//!
//! The ordered list of habits for the day plus the cursor into it.
//! Order is whatever the journal returned; nothing is inserted, removed,
//! or re-sorted after a fetch.

use crate::core::habit::Habit;

#[derive(Debug, Default, Clone)]
pub struct HabitStore {
    habits: Vec<Habit>,
    cursor: usize,
}

impl HabitStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swaps the list wholesale and clamps the cursor into the new bounds.
    pub fn replace(&mut self, habits: Vec<Habit>) {
        self.habits = habits;
        self.cursor = self.cursor.min(self.habits.len().saturating_sub(1));
    }

    pub fn get(&self, index: usize) -> Option<&Habit> {
        self.habits.get(index)
    }

    /// Applies `mutator` to the habit at `index` in place.
    /// Returns false if the index is out of range.
    pub fn update_at<F>(&mut self, index: usize, mutator: F) -> bool
    where
        F: FnOnce(&mut Habit),
    {
        match self.habits.get_mut(index) {
            Some(habit) => {
                mutator(habit);
                true
            }
            None => false,
        }
    }

    /// Moves the cursor by `delta`, clamped to `[0, len - 1]`. No wraparound.
    pub fn move_cursor(&mut self, delta: isize) {
        if self.habits.is_empty() {
            self.cursor = 0;
            return;
        }
        let last = self.habits.len() - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
    }

    pub fn cursor_first(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_last(&mut self) {
        self.cursor = self.habits.len().saturating_sub(1);
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> Option<&Habit> {
        self.habits.get(self.cursor)
    }

    pub fn find(&self, habit_id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == habit_id)
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }
}
