//! Inverted token index over the base collection.
//!
//! The index is built once per loaded collection and is immutable afterwards
//! (build-then-publish: a reload constructs a fresh value and swaps it in, so
//! no reader ever observes a partially built index). Record ids are positions
//! in the base collection, stored in roaring bitmaps per token.

use crate::types::{ControllerConfig, RecordId, TextFn};
use crate::utils::{TokenSet, extract_tokens, tokenize_query};
use rayon::prelude::*;
use roaring::RoaringBitmap;
use std::collections::BTreeMap;
use std::ops::Bound;

/// Inverted index mapping normalized tokens to the records containing them.
///
/// The term dictionary is sorted so a query token can be expanded to every
/// indexed token sharing its prefix (`"john"` matches both `john` and
/// `johnny`).
pub struct TextIndex {
    postings: BTreeMap<String, RoaringBitmap>,
    record_count: u32,
    min_token_len: usize,
    max_token_len: usize,
}

impl TextIndex {
    /// Build an index over `records`, tokenizing every field produced by
    /// `extractors`. Tokenization runs in parallel; postings are merged
    /// sequentially into the sorted dictionary.
    pub fn build<T: Sync>(records: &[T], extractors: &[TextFn<T>], config: &ControllerConfig) -> Self {
        let min_len = config.min_token_len;
        let max_len = config.max_token_len;

        let per_record: Vec<TokenSet> = records
            .par_iter()
            .map(|record| {
                let mut tokens = TokenSet::default();
                for extract in extractors {
                    tokens.extend(extract_tokens(&extract(record), min_len, max_len));
                }
                tokens
            })
            .collect();

        let mut postings: BTreeMap<String, RoaringBitmap> = BTreeMap::new();
        for (pos, tokens) in per_record.into_iter().enumerate() {
            for token in tokens {
                postings.entry(token).or_default().insert(pos as RecordId);
            }
        }

        Self {
            postings,
            record_count: records.len() as u32,
            min_token_len: min_len,
            max_token_len: max_len,
        }
    }

    /// Look up the records matching a query string.
    ///
    /// Returns `None` for blank text ("no constraint" - the caller treats it
    /// as all-pass). For non-blank text, every query token must prefix-match
    /// some indexed token of the record (conjunctive AND across tokens).
    /// Unknown tokens yield empty postings, never an error; a non-blank query
    /// with no usable tokens matches nothing.
    pub fn query(&self, text: &str) -> Option<RoaringBitmap> {
        if text.trim().is_empty() {
            return None;
        }

        let tokens = tokenize_query(text, self.min_token_len, self.max_token_len);
        let mut result: Option<RoaringBitmap> = None;

        for token in &tokens {
            let docs = self.prefix_docs(token);
            let narrowed = match result {
                Some(existing) => existing & docs,
                None => docs,
            };
            if narrowed.is_empty() {
                return Some(narrowed);
            }
            result = Some(narrowed);
        }

        Some(result.unwrap_or_default())
    }

    /// Union the postings of every indexed token starting with `token`.
    fn prefix_docs(&self, token: &str) -> RoaringBitmap {
        let mut docs = RoaringBitmap::new();
        for (term, postings) in self
            .postings
            .range::<str, _>((Bound::Included(token), Bound::Unbounded))
        {
            if !term.starts_with(token) {
                break;
            }
            docs |= postings;
        }
        docs
    }

    /// Number of distinct tokens in the dictionary
    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    /// Number of records the index was built over
    pub fn record_count(&self) -> u32 {
        self.record_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name_index(names: &[&str]) -> TextIndex {
        let records: Vec<String> = names.iter().map(|n| n.to_string()).collect();
        let extractors: Vec<TextFn<String>> = vec![Box::new(|s: &String| s.clone())];
        TextIndex::build(&records, &extractors, &ControllerConfig::default())
    }

    #[test]
    fn test_blank_query_is_no_constraint() {
        let index = name_index(&["John", "Jane"]);
        assert!(index.query("").is_none());
        assert!(index.query("   ").is_none());
    }

    #[test]
    fn test_prefix_match() {
        let index = name_index(&["John", "Jane", "Johnny", "Alice", "Bob"]);
        let ids = index.query("john").unwrap();
        assert_eq!(ids.iter().collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn test_unknown_token_yields_empty() {
        let index = name_index(&["John", "Jane"]);
        assert!(index.query("zebra").unwrap().is_empty());
    }

    #[test]
    fn test_conjunctive_across_tokens() {
        let index = name_index(&["John Smith", "John Doe", "Jane Smith"]);
        let ids = index.query("john smith").unwrap();
        assert_eq!(ids.iter().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn test_unusable_tokens_match_nothing() {
        // Non-blank, but nothing survives tokenization
        let index = name_index(&["John"]);
        assert!(index.query("!!!").unwrap().is_empty());
        assert!(index.query("a").unwrap().is_empty());
    }

    #[test]
    fn test_multiple_fields() {
        let records = vec![("Ada", "Lovelace"), ("Alan", "Turing")];
        let extractors: Vec<TextFn<(&str, &str)>> = vec![
            Box::new(|r: &(&str, &str)| r.0.to_string()),
            Box::new(|r: &(&str, &str)| r.1.to_string()),
        ];
        let index = TextIndex::build(&records, &extractors, &ControllerConfig::default());
        assert_eq!(index.query("turing").unwrap().iter().collect::<Vec<_>>(), vec![1]);
        assert_eq!(index.query("ada lovelace").unwrap().iter().collect::<Vec<_>>(), vec![0]);
        assert_eq!(index.record_count(), 2);
    }
}
