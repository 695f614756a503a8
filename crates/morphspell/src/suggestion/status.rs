// Suggestion status tracking: abort conditions, cost budget, deduplication

use hashbrown::HashSet;
use morphspell_core::enums::MAX_SUGGESTION_DISTANCE;

/// A suggestion candidate with its edit distance from the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub word: String,
    /// Optimal-string-alignment distance on characters.
    pub distance: usize,
}

/// Edit distance used for filtering and ranking. A changed letter case is
/// one substitution like any other.
pub fn suggestion_distance(a: &str, b: &str) -> usize {
    strsim::osa_distance(a, b)
}

/// Tracks the state of suggestion generation: found suggestions, cost
/// budget and abort conditions.
///
/// Every spell check made on behalf of a candidate costs one unit via
/// `charge()`.
pub struct SuggestionStatus<'a> {
    word: &'a [char],
    input: String,
    max_suggestions: usize,
    max_cost: usize,
    current_cost: usize,
    suggestions: Vec<Suggestion>,
    /// Every candidate already examined, accepted or not.
    seen: HashSet<String>,
}

impl<'a> SuggestionStatus<'a> {
    pub fn new(word: &'a [char], max_suggestions: usize) -> Self {
        let input: String = word.iter().collect();
        let mut seen = HashSet::new();
        seen.insert(input.clone());
        Self {
            word,
            input,
            max_suggestions,
            max_cost: 0,
            current_cost: 0,
            suggestions: Vec::new(),
            seen,
        }
    }

    /// Returns `true` if no more suggestions should be generated.
    ///
    /// The cost budget is doubled while nothing has been found.
    pub fn should_abort(&self) -> bool {
        if self.is_full() {
            return true;
        }
        if self.current_cost < self.max_cost {
            return false;
        }
        !(self.suggestions.is_empty() && self.current_cost < self.max_cost.saturating_mul(2))
    }

    /// Maximum suggestion count reached.
    pub fn is_full(&self) -> bool {
        self.suggestions.len() >= self.max_suggestions
    }

    pub fn charge(&mut self) {
        self.current_cost += 1;
    }

    pub fn cost(&self) -> usize {
        self.current_cost
    }

    pub fn set_max_cost(&mut self, max_cost: usize) {
        self.max_cost = max_cost;
    }

    /// First look at `candidate`: returns its distance if it is new and
    /// close enough to be worth a spell check, and marks it as seen.
    pub fn consider(&mut self, candidate: &str) -> Option<usize> {
        if candidate.is_empty() || self.seen.contains(candidate) {
            return None;
        }
        self.seen.insert(candidate.to_string());
        let distance = suggestion_distance(&self.input, candidate);
        (distance <= MAX_SUGGESTION_DISTANCE).then_some(distance)
    }

    /// Record an accepted suggestion.
    pub fn add_suggestion(&mut self, word: String, distance: usize) {
        if self.is_full() || word == self.input || self.suggestions.iter().any(|s| s.word == word)
        {
            return;
        }
        self.suggestions.push(Suggestion { word, distance });
    }

    /// Stable sort by distance: ties keep their discovery order.
    pub fn sort_suggestions(&mut self) {
        self.suggestions.sort_by_key(|s| s.distance);
    }

    pub fn suggestion_count(&self) -> usize {
        self.suggestions.len()
    }

    pub fn max_suggestion_count(&self) -> usize {
        self.max_suggestions
    }

    pub fn word(&self) -> &[char] {
        self.word
    }

    /// The input as a string.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn word_len(&self) -> usize {
        self.word.len()
    }

    pub fn into_suggestions(self) -> Vec<Suggestion> {
        self.suggestions
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }
}
