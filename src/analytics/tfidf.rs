//! Term-importance ranking with TF-IDF
//!
//! This module provides functionality for:
//! - Tokenizing text into lowercase word tokens of two or more characters
//! - Building a bounded vocabulary from the most frequent terms
//! - Computing smoothed, L2-normalized TF-IDF document vectors
//! - Ranking terms by their weight summed over all documents
//!
//! The weighting follows the common vectorizer defaults: raw term counts,
//! `idf = ln((1 + n) / (1 + df)) + 1`, and unit-length rows.

use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use crate::models::{RankedTerm, TextItem};

/// Word tokens of at least two Unicode word characters
static TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w\w+\b").unwrap());

/// Split text into lowercase tokens
///
/// # Examples
///
/// ```
/// use shoplens::analytics::tfidf::tokenize;
///
/// assert_eq!(tokenize("Omega-3 오메가3 a"), vec!["omega", "오메가3"]);
/// ```
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_REGEX
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Fitted TF-IDF document-term matrix
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TfidfMatrix {
    /// Terms in column order (alphabetical)
    vocabulary: Vec<String>,

    /// Inverse document frequency per column
    idf: Vec<f64>,

    /// One unit-length (or all-zero) row per document
    rows: Vec<Vec<f64>>,
}

impl TfidfMatrix {
    /// Terms in column order
    #[must_use]
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Inverse document frequency per column
    #[must_use]
    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    /// Document rows
    #[must_use]
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Number of documents the matrix was fitted on
    #[must_use]
    pub fn n_documents(&self) -> usize {
        self.rows.len()
    }

    /// Sum of each column over all documents
    #[must_use]
    pub fn column_sums(&self) -> Vec<f64> {
        let mut sums = vec![0.0; self.vocabulary.len()];
        for row in &self.rows {
            for (sum, value) in sums.iter_mut().zip(row) {
                *sum += value;
            }
        }
        sums
    }

    /// Terms ranked by summed weight, highest first
    ///
    /// The sort is stable, so equal weights keep column (alphabetical) order.
    #[must_use]
    pub fn ranked_terms(&self) -> Vec<RankedTerm> {
        let mut ranking: Vec<RankedTerm> = self
            .vocabulary
            .iter()
            .zip(self.column_sums())
            .map(|(term, weight)| RankedTerm {
                term: term.clone(),
                weight,
            })
            .collect();

        ranking.sort_by(|a, b| b.weight.total_cmp(&a.weight));
        ranking
    }
}

/// TF-IDF vectorizer with an optional vocabulary bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TfidfVectorizer {
    max_features: Option<usize>,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new(None)
    }
}

impl TfidfVectorizer {
    /// Create a vectorizer
    ///
    /// # Arguments
    /// * `max_features` - Keep only this many terms, chosen by corpus-wide
    ///   frequency (ties broken alphabetically). `None` keeps every term.
    #[must_use]
    pub fn new(max_features: Option<usize>) -> Self {
        Self { max_features }
    }

    /// Fit the vocabulary and IDF weights, and transform the same documents
    ///
    /// An empty corpus, or one without any token, yields an empty
    /// vocabulary.
    #[must_use]
    pub fn fit_transform<S: AsRef<str>>(&self, documents: &[S]) -> TfidfMatrix {
        let counts: Vec<HashMap<String, usize>> = documents
            .iter()
            .map(|doc| {
                let mut counts = HashMap::new();
                for token in tokenize(doc.as_ref()) {
                    *counts.entry(token).or_insert(0) += 1;
                }
                counts
            })
            .collect();

        // term -> (total count, document frequency), alphabetical
        let mut stats: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
        for doc in &counts {
            for (term, &count) in doc {
                let entry = stats.entry(term.as_str()).or_insert((0, 0));
                entry.0 += count;
                entry.1 += 1;
            }
        }

        let mut selected: Vec<(&str, usize, usize)> = stats
            .into_iter()
            .map(|(term, (total, df))| (term, total, df))
            .collect();

        if let Some(limit) = self.max_features {
            if selected.len() > limit {
                selected.sort_by(|a, b| b.1.cmp(&a.1));
                selected.truncate(limit);
                selected.sort_by(|a, b| a.0.cmp(b.0));
            }
        }

        let n = documents.len() as f64;
        let vocabulary: Vec<String> = selected.iter().map(|(t, _, _)| t.to_string()).collect();
        let idf: Vec<f64> = selected
            .iter()
            .map(|&(_, _, df)| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let rows = counts
            .iter()
            .map(|doc| {
                let mut row: Vec<f64> = vocabulary
                    .iter()
                    .zip(&idf)
                    .map(|(term, idf)| doc.get(term).map_or(0.0, |&c| c as f64 * idf))
                    .collect();

                let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
                if norm > 0.0 {
                    row.iter_mut().for_each(|v| *v /= norm);
                }
                row
            })
            .collect();

        TfidfMatrix {
            vocabulary,
            idf,
            rows,
        }
    }
}

/// Rank the corpus vocabulary by summed TF-IDF weight
///
/// Each item contributes one document, its title and description joined by
/// a space. The result holds at most `max_vocabulary` terms.
#[must_use]
pub fn rank_terms(corpus: &[TextItem], max_vocabulary: usize) -> Vec<RankedTerm> {
    if corpus.is_empty() || max_vocabulary == 0 {
        return Vec::new();
    }

    let documents: Vec<String> = corpus.iter().map(TextItem::document).collect();
    TfidfVectorizer::new(Some(max_vocabulary))
        .fit_transform(&documents)
        .ranked_terms()
}
