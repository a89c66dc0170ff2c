//! Search bar with local autocomplete over the loaded doctor list.

use crate::domain::model::{Doctor, Suggestion};

pub const DEFAULT_SUGGESTION_LIMIT: usize = 3;
pub const DEFAULT_MIN_QUERY_LENGTH: usize = 2;

/// First `limit` doctors, in list order, whose name contains `query`
/// case-insensitively. Queries shorter than `min_len` characters yield nothing.
pub fn suggest(doctors: &[Doctor], query: &str, limit: usize, min_len: usize) -> Vec<Suggestion> {
    if query.chars().count() < min_len {
        return Vec::new();
    }

    let lower_query = query.to_lowercase();
    doctors
        .iter()
        .filter(|doctor| doctor.name.to_lowercase().contains(&lower_query))
        .take(limit)
        .map(Suggestion::from)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Down,
    Up,
    Enter,
    Escape,
}

#[derive(Debug, Clone)]
pub struct SearchBox {
    input: String,
    suggestions: Vec<Suggestion>,
    open: bool,
    active: Option<usize>,
    limit: usize,
    min_len: usize,
}

impl Default for SearchBox {
    fn default() -> Self {
        Self::new(DEFAULT_SUGGESTION_LIMIT, DEFAULT_MIN_QUERY_LENGTH)
    }
}

impl SearchBox {
    pub fn new(limit: usize, min_len: usize) -> Self {
        Self {
            input: String::new(),
            suggestions: Vec::new(),
            open: false,
            active: None,
            limit,
            min_len,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    fn recompute(&mut self, doctors: &[Doctor]) {
        self.suggestions = suggest(doctors, &self.input, self.limit, self.min_len);
        self.open = !self.suggestions.is_empty();
    }

    /// Replaces the input text. Returns the new search term.
    pub fn type_text(&mut self, doctors: &[Doctor], value: &str) -> String {
        self.input = value.to_string();
        self.active = None;
        self.recompute(doctors);
        self.input.clone()
    }

    /// Recomputes suggestions after the doctor list itself changed.
    pub fn refresh(&mut self, doctors: &[Doctor]) {
        self.recompute(doctors);
        if self.active.is_some_and(|i| i >= self.suggestions.len()) {
            self.active = None;
        }
    }

    /// Handles a navigation key. Returns a new search term when a suggestion
    /// gets selected.
    pub fn key(&mut self, key: Key) -> Option<String> {
        let len = self.suggestions.len();
        if !self.open || len == 0 {
            if key == Key::Enter {
                self.open = false;
            }
            return None;
        }

        match key {
            Key::Down => {
                self.active = Some(self.active.map_or(0, |i| (i + 1) % len));
                None
            }
            Key::Up => {
                self.active = Some(self.active.map_or(len - 1, |i| (i + len - 1) % len));
                None
            }
            Key::Enter => match self.active {
                Some(index) if index < len => self.select(index),
                _ => {
                    self.open = false;
                    None
                }
            },
            Key::Escape => {
                self.open = false;
                self.active = None;
                None
            }
        }
    }

    /// Picks the suggestion at `index`. Returns the new search term.
    pub fn select(&mut self, index: usize) -> Option<String> {
        let name = self.suggestions.get(index)?.name.clone();
        self.input = name.clone();
        self.open = false;
        self.active = None;
        Some(name)
    }

    pub fn hover(&mut self, index: usize) {
        if index < self.suggestions.len() {
            self.active = Some(index);
        }
    }

    pub fn focus(&mut self) {
        if self.input.chars().count() >= self.min_len && !self.suggestions.is_empty() {
            self.open = true;
        }
    }

    /// Click outside the search bar.
    pub fn blur(&mut self) {
        self.open = false;
    }

    pub fn submit(&mut self) {
        self.open = false;
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.suggestions.clear();
        self.open = false;
        self.active = None;
    }
}
