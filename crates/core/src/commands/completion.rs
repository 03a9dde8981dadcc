use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

/// One suggestion offered at a fixed argument position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    argument_index: usize,
    text: String,
    permission: Option<String>,
    preceding_words: Option<FxHashSet<String>>,
}

impl Completion {
    fn new(
        argument_index: usize,
        text: &str,
        permission: Option<&str>,
        preceding_words: &[&str],
    ) -> Self {
        let preceding_words = if preceding_words.is_empty() {
            None
        } else {
            Some(preceding_words.iter().map(|s| s.to_string()).collect())
        };
        Self {
            argument_index,
            text: text.to_owned(),
            permission: permission.filter(|p| !p.is_empty()).map(str::to_owned),
            preceding_words,
        }
    }

    pub fn argument_index(&self) -> usize {
        self.argument_index
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn permission(&self) -> Option<&str> {
        self.permission.as_deref()
    }

    pub fn preceding_words(&self) -> Option<&FxHashSet<String>> {
        self.preceding_words.as_ref()
    }

    /// Nothing precedes the first argument, so a preceding-word constraint
    /// there can never be satisfied.
    pub fn is_reachable(&self) -> bool {
        self.argument_index > 0 || self.preceding_words.is_none()
    }

    fn matches<S: AsRef<str>>(&self, args: &[S], has_permission: &impl Fn(&str) -> bool) -> bool {
        let current = self.argument_index;
        let Some(typed) = args.get(current) else {
            return false;
        };

        if let Some(words) = &self.preceding_words {
            let previous = current.checked_sub(1).and_then(|i| args.get(i));
            match previous {
                Some(previous) if words.contains(previous.as_ref()) => {}
                _ => return false,
            }
        }

        if let Some(permission) = &self.permission {
            if !has_permission(permission) {
                return false;
            }
        }

        self.text.starts_with(typed.as_ref())
    }
}

/// Candidates grouped by argument index. Each bucket keeps insertion order
/// and may hold duplicates.
#[derive(Debug, Default, Clone)]
pub struct CompletionIndex {
    buckets: FxHashMap<usize, Vec<Completion>>,
}

impl CompletionIndex {
    pub fn new() -> Self {
        Default::default()
    }

    pub(super) fn add_one(
        &mut self,
        index: usize,
        permission: Option<&str>,
        text: &str,
        preceding_words: &[&str],
    ) {
        if text.is_empty() {
            return;
        }
        self.buckets
            .entry(index)
            .or_default()
            .push(Completion::new(index, text, permission, preceding_words));
    }

    pub(super) fn add_list(
        &mut self,
        index: usize,
        permission: Option<&str>,
        preceding_words: &[&str],
        texts: &[&str],
    ) {
        for text in texts {
            self.add_one(index, permission, text, preceding_words);
        }
    }

    pub fn get(&self, index: usize) -> Option<&[Completion]> {
        self.buckets.get(&index).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total number of candidates across every index.
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Every candidate, ordered by argument index and then insertion.
    pub fn iter(&self) -> impl Iterator<Item = &Completion> {
        let mut indices: Vec<_> = self.buckets.keys().copied().collect();
        indices.sort_unstable();
        indices
            .into_iter()
            .flat_map(move |index| self.buckets[&index].iter())
    }

    pub(super) fn first_unreachable(&self) -> Option<&Completion> {
        self.get(0)?.iter().find(|completion| !completion.is_reachable())
    }

    /// Suggestions for the word currently being typed, which is the last one
    /// in `args`. Returns `None` when the caller should fall back to the
    /// host's default suggestions: nothing is registered at that position
    /// or no candidate survived filtering.
    pub fn resolve<S: AsRef<str>>(
        &self,
        args: &[S],
        has_permission: impl Fn(&str) -> bool,
    ) -> Option<Vec<String>> {
        let current = args.len().checked_sub(1)?;
        let bucket = self.buckets.get(&current)?;

        let suggestions: Vec<String> = bucket
            .iter()
            .filter(|completion| completion.matches(args, &has_permission))
            .map(|completion| completion.text.clone())
            .collect();

        trace!(
            "{} of {} candidates at index {} matched",
            suggestions.len(),
            bucket.len(),
            current
        );

        if suggestions.is_empty() {
            None
        } else {
            Some(suggestions)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allow_all(_: &str) -> bool {
        true
    }

    #[test]
    fn filters_by_typed_prefix() {
        let mut index = CompletionIndex::new();
        index.add_list(0, None, &[], &["spin", "launch", "spawn"]);

        assert_eq!(
            index.resolve(&["sp"], allow_all),
            Some(vec!["spin".to_string(), "spawn".to_string()])
        );
        assert_eq!(index.resolve(&["Sp"], allow_all), None);
    }

    #[test]
    fn empty_prefix_offers_whole_bucket_in_insertion_order() {
        let mut index = CompletionIndex::new();
        index.add_list(2, None, &[], &["c", "a", "b", "a"]);

        assert_eq!(
            index.resolve(&["x", "y", ""], allow_all),
            Some(vec!["c".into(), "a".into(), "b".into(), "a".into()])
        );
    }

    #[test]
    fn permission_gated_candidates_are_hidden() {
        let mut index = CompletionIndex::new();
        index.add_one(1, None, "build", &[]);
        index.add_one(1, Some("admin"), "ban", &[]);

        let lacks_admin = |permission: &str| permission != "admin";
        assert_eq!(
            index.resolve(&["x", "b"], lacks_admin),
            Some(vec!["build".to_string()])
        );
        assert_eq!(
            index.resolve(&["x", "b"], allow_all),
            Some(vec!["build".to_string(), "ban".to_string()])
        );
    }

    #[test]
    fn preceding_word_must_match() {
        let mut index = CompletionIndex::new();
        index.add_one(1, None, "confirm", &["remove", "clear"]);

        assert_eq!(index.resolve(&["add", "c"], allow_all), None);
        assert_eq!(
            index.resolve(&["clear", "c"], allow_all),
            Some(vec!["confirm".to_string()])
        );
    }

    #[test]
    fn missing_bucket_or_empty_args_declines() {
        let mut index = CompletionIndex::new();
        index.add_one(0, None, "a", &[]);

        assert_eq!(index.resolve(&["a", ""], allow_all), None);
        assert_eq!(index.resolve::<&str>(&[], allow_all), None);
    }

    #[test]
    fn empty_text_is_ignored() {
        let mut index = CompletionIndex::new();
        index.add_one(0, None, "", &[]);
        index.add_list(1, None, &[], &[]);

        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
    }

    #[test]
    fn empty_permission_means_unrestricted() {
        let mut index = CompletionIndex::new();
        index.add_one(0, Some(""), "open", &[]);

        assert_eq!(index.get(0).unwrap()[0].permission(), None);
        assert_eq!(
            index.resolve(&["o"], |_: &str| false),
            Some(vec!["open".to_string()])
        );
    }

    #[test]
    fn index_zero_preceding_word_is_unreachable() {
        let mut index = CompletionIndex::new();
        index.add_one(0, None, "never", &["anything"]);
        index.add_one(0, None, "always", &[]);

        assert_eq!(index.first_unreachable().map(Completion::text), Some("never"));
        assert_eq!(
            index.resolve(&[""], allow_all),
            Some(vec!["always".to_string()])
        );
    }

    #[test]
    fn iter_orders_by_index() {
        let mut index = CompletionIndex::new();
        index.add_one(3, None, "d", &[]);
        index.add_one(0, None, "a", &[]);
        index.add_one(3, None, "e", &[]);

        let texts: Vec<_> = index.iter().map(Completion::text).collect();
        assert_eq!(texts, ["a", "d", "e"]);
        assert_eq!(index.len(), 3);
    }
}
