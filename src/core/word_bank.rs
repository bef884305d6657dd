//! Word bank accumulator
//!
//! Keeps per-group occurrence counts for every word handed to it, along with
//! the ordered list of group labels those counts are indexed by.

use std::collections::{BTreeMap, HashMap};

use log::{debug, warn};

/// Occurrence counts of a single word, keyed by group index.
///
/// A group index with no entry means the word was never seen in that group.
pub type GroupCounts = BTreeMap<usize, usize>;

/// Accumulator mapping words to per-group occurrence counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordBank {
    /// Group labels in registration order
    groups: Vec<String>,

    /// Index into `groups` that new counts accrue to
    current_group_index: usize,

    /// Words in first-insertion order
    words: Vec<String>,

    /// Counts of each word
    counts: HashMap<String, GroupCounts>,
}

impl WordBank {
    /// Create a word bank whose only group is `initial_group`
    ///
    /// # Arguments
    ///
    /// * `initial_group` - Label of the first group; new words count towards it
    ///
    /// # Returns
    ///
    /// An empty word bank positioned on group 0
    pub fn new(initial_group: impl Into<String>) -> Self {
        Self {
            groups: vec![initial_group.into()],
            current_group_index: 0,
            words: Vec::new(),
            counts: HashMap::new(),
        }
    }

    /// Record one occurrence of `word` in the current group.
    ///
    /// The word is stored exactly as given; callers are expected to normalize
    /// case beforehand.
    pub fn add_word(&mut self, word: &str) {
        let group = self.current_group_index;

        match self.counts.get_mut(word) {
            Some(group_counts) => {
                *group_counts.entry(group).or_insert(0) += 1;
            }
            None => {
                let mut group_counts = GroupCounts::new();
                group_counts.insert(group, 1);
                self.counts.insert(word.to_string(), group_counts);
                self.words.push(word.to_string());
            }
        }
    }

    /// Register a new group and make it the current one
    ///
    /// The label is always appended. The current group then becomes the first
    /// group carrying `label`, so reusing an earlier label sends further counts
    /// to that earlier group and leaves the appended column empty.
    ///
    /// # Arguments
    ///
    /// * `label` - Label of the group to register
    ///
    /// # Returns
    ///
    /// The index counts will now accrue to
    pub fn start_new_group(&mut self, label: impl Into<String>) -> usize {
        let label = label.into();
        self.groups.push(label);

        let appended = self.groups.len() - 1;
        let label = &self.groups[appended];
        self.current_group_index = self
            .groups
            .iter()
            .position(|existing| existing == label)
            .unwrap_or(appended);

        if self.current_group_index != appended {
            warn!(
                "Group label '{}' already registered at index {}; counts will merge into it",
                label, self.current_group_index
            );
        }
        debug!("Current group is now {} ({})", self.current_group_index, label);

        self.current_group_index
    }

    /// Group labels in registration order
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// Index of the group new counts accrue to
    pub fn current_group_index(&self) -> usize {
        self.current_group_index
    }

    /// Label of the group new counts accrue to
    pub fn current_group(&self) -> &str {
        &self.groups[self.current_group_index]
    }

    /// Count of `word` in the group at `group_index`, `None` when it never occurred there
    pub fn count(&self, word: &str, group_index: usize) -> Option<usize> {
        self.group_counts(word)
            .and_then(|group_counts| group_counts.get(&group_index).copied())
    }

    /// All recorded counts for `word`
    pub fn group_counts(&self, word: &str) -> Option<&GroupCounts> {
        self.counts.get(word)
    }

    /// Iterate over words and their counts in first-insertion order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &GroupCounts)> + '_ {
        self.words
            .iter()
            .map(move |word| (word.as_str(), &self.counts[word]))
    }

    /// Sum of all occurrences recorded in the group at `group_index`
    pub fn total_in_group(&self, group_index: usize) -> usize {
        self.counts
            .values()
            .filter_map(|group_counts| group_counts.get(&group_index))
            .sum()
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
