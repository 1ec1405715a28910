// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::collections::HashSet;

/// Whether the query and the options are compared as typed, or lowercased first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display)]
pub enum CaseSensitivity {
    #[default]
    Insensitive,
    Sensitive,
}

/// How duplicate options are collapsed in a filtered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DedupKey {
    /// Every option index is its own entry, even if two labels are identical. Used by
    /// multiselect, where each row is toggled independently.
    #[default]
    ByIndex,
    /// Options with the same label show up once, at the first occurrence.
    ByValue,
}

/// Which rank an option matched a query at. Lower ranks come first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchTier {
    Exact,
    Prefix,
    Substring,
}

#[must_use]
pub fn match_tier(option: &str, query: &str, case: CaseSensitivity) -> Option<MatchTier> {
    let (option, query) = match case {
        CaseSensitivity::Sensitive => (option.to_string(), query.to_string()),
        CaseSensitivity::Insensitive => (option.to_lowercase(), query.to_lowercase()),
    };

    if option == query {
        Some(MatchTier::Exact)
    } else if option.starts_with(&query) {
        Some(MatchTier::Prefix)
    } else if option.contains(&query) {
        Some(MatchTier::Substring)
    } else {
        None
    }
}

/// Rank `options` against `query` and return the original indices of the matches:
/// exact matches first, then prefix matches, then substring matches. Within a tier
/// options keep their original order. An empty query returns every index in order.
///
/// ```
/// use r3bl_termx::{CaseSensitivity, DedupKey, filter_options};
///
/// let options = ["Go", "Python", "JavaScript"];
/// let it = filter_options(&options, "Go", CaseSensitivity::Insensitive, DedupKey::ByValue);
/// assert_eq!(it, vec![0]);
/// ```
#[must_use]
pub fn filter_options<T: AsRef<str>>(
    options: &[T],
    query: &str,
    case: CaseSensitivity,
    dedup_key: DedupKey,
) -> Vec<usize> {
    if query.is_empty() {
        return (0..options.len()).collect();
    }

    let mut tiers: [Vec<usize>; 3] = Default::default();
    for (index, option) in options.iter().enumerate() {
        match match_tier(option.as_ref(), query, case) {
            Some(MatchTier::Exact) => tiers[0].push(index),
            Some(MatchTier::Prefix) => tiers[1].push(index),
            Some(MatchTier::Substring) => tiers[2].push(index),
            None => {}
        }
    }

    let ranked = tiers.into_iter().flatten();
    match dedup_key {
        DedupKey::ByIndex => ranked.collect(),
        DedupKey::ByValue => {
            let mut seen_labels = HashSet::new();
            ranked
                .filter(|&index| seen_labels.insert(options[index].as_ref()))
                .collect()
        }
    }
}
