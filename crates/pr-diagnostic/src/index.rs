//! Whole-word phrase occurrence counts.
//!
//! Word boundaries follow the regex crate's Unicode `\b`, so the fast paths
//! here count exactly what `\bphrase\b` finds.

use regex::Regex;
use regex_syntax::is_word_character;
use std::collections::HashMap;
use std::ops::Range;
use std::sync::LazyLock;

static RE_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S+").unwrap());

/// A trigram split into its three tokens. The middle token must be a whole
/// token of the document; the outer ones may be a suffix and a prefix.
struct Trigram<'p> {
    head: &'p str,
    tail: &'p str,
}

fn split_trigram(phrase: &str) -> Option<(&str, &str, &str)> {
    let mut parts = phrase.split(' ');
    let (head, middle, tail) = (parts.next()?, parts.next()?, parts.next()?);
    let well_formed = parts.next().is_none()
        && [head, middle, tail]
            .iter()
            .all(|t| !t.is_empty() && !t.chars().any(char::is_whitespace));
    well_formed.then_some((head, middle, tail))
}

#[derive(Default)]
struct Tally {
    count: usize,
    last_end: usize,
}

/// Occurrence counts for every distinct trigram of a document, built from a
/// single tokenization of the document.
#[derive(Debug, Default)]
pub struct TrigramIndex {
    counts: HashMap<String, usize>,
}

impl TrigramIndex {
    pub fn build<'p>(haystack: &str, phrases: impl IntoIterator<Item = &'p str>) -> Self {
        let mut counts = HashMap::new();
        let mut by_middle: HashMap<&str, Vec<(&'p str, Trigram<'p>)>> = HashMap::new();
        for phrase in phrases {
            if counts.contains_key(phrase) {
                continue;
            }
            match split_trigram(phrase) {
                Some((head, middle, tail)) => {
                    counts.insert(phrase.to_string(), 0);
                    by_middle.entry(middle).or_default().push((phrase, Trigram { head, tail }));
                }
                None => {
                    counts.insert(phrase.to_string(), count_whole_word(haystack, phrase));
                }
            }
        }
        if by_middle.is_empty() {
            return Self { counts };
        }

        let tokens: Vec<Range<usize>> = RE_TOKEN.find_iter(haystack).map(|m| m.range()).collect();
        let mut tallies: HashMap<&str, Tally> = HashMap::new();
        for w in tokens.windows(3) {
            let (prev, mid, next) = (&w[0], &w[1], &w[2]);
            let Some(candidates) = by_middle.get(&haystack[mid.clone()]) else { continue };
            if &haystack[prev.end..mid.start] != " " || &haystack[mid.end..next.start] != " " {
                continue;
            }
            for &(phrase, ref gram) in candidates {
                let prev_token = &haystack[prev.clone()];
                let next_token = &haystack[next.clone()];
                if !prev_token.ends_with(gram.head) || !next_token.starts_with(gram.tail) {
                    continue;
                }
                let start = prev.end - gram.head.len();
                let end = next.start + gram.tail.len();
                if !bounded(haystack, start, end) {
                    continue;
                }
                // matches of one phrase never overlap, leftmost wins
                let tally = tallies.entry(phrase).or_default();
                if start >= tally.last_end {
                    tally.count += 1;
                    tally.last_end = end;
                }
            }
        }
        for (phrase, tally) in tallies {
            counts.insert(phrase.to_string(), tally.count);
        }
        Self { counts }
    }

    /// Zero for phrases that were not indexed.
    pub fn get(&self, phrase: &str) -> usize {
        self.counts.get(phrase).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// `\b` holds at both ends of `haystack[start..end]`.
fn bounded(haystack: &str, start: usize, end: usize) -> bool {
    let is_word = |c: Option<char>| c.is_some_and(is_word_character);
    let inner = &haystack[start..end];
    is_word(haystack[..start].chars().next_back()) != is_word(inner.chars().next())
        && is_word(inner.chars().next_back()) != is_word(haystack[end..].chars().next())
}

/// Non-overlapping occurrences of `needle` bounded by word boundaries at both
/// ends, with the same semantics as the regex `\bneedle\b`.
pub fn count_whole_word(haystack: &str, needle: &str) -> usize {
    let Some(first) = needle.chars().next() else {
        return 0;
    };

    let mut count = 0;
    let mut pos = 0;
    while let Some(found) = haystack[pos..].find(needle) {
        let start = pos + found;
        let end = start + needle.len();
        if bounded(haystack, start, end) {
            count += 1;
            pos = end;
        } else {
            pos = start + first.len_utf8();
        }
    }
    count
}

/// Regex-based count used as the reference for [`count_whole_word`]. The
/// phrase is escaped, so metacharacters match literally.
pub fn count_occurrences(haystack: &str, phrase: &str) -> usize {
    if phrase.is_empty() {
        return 0;
    }
    let pattern = format!(r"\b{}\b", regex::escape(phrase));
    match Regex::new(&pattern) {
        Ok(re) => re.find_iter(haystack).count(),
        Err(_) => 0,
    }
}
