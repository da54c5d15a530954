//! Removal log and preserve-keyword guard shared by every stage.

use pr_core::RemovedSegment;
use regex::{Regex, RegexBuilder};
use std::ops::Range;
use tracing::trace;

/// Append-only record of deleted text for one refinement run.
///
/// Also carries the preserve keywords and every match that was kept because
/// it contained one. Kept matches stay protected for the rest of the run, so
/// later stages cannot cut into them.
#[derive(Debug, Default)]
pub struct RemovalLog {
    segments: Vec<RemovedSegment>,
    keywords: Vec<String>,
    protected: Vec<String>,
}

impl RemovalLog {
    pub fn new<S: AsRef<str>>(preserve_keywords: &[S]) -> Self {
        Self {
            segments: Vec::new(),
            keywords: preserve_keywords
                .iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
            protected: Vec::new(),
        }
    }

    pub fn record(&mut self, text: &str, reason: &str) {
        trace!(text, reason, "segment removed");
        self.segments.push(RemovedSegment::new(text, reason));
    }

    pub fn segments(&self) -> &[RemovedSegment] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<RemovedSegment> {
        self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Case-insensitive substring check against the preserve keywords.
    pub fn is_preserved(&self, segment: &str) -> bool {
        if self.keywords.is_empty() {
            return false;
        }
        let lower = segment.to_lowercase();
        self.keywords.iter().any(|k| lower.contains(k.as_str()))
    }

    fn protect(&mut self, segment: &str) {
        let lower = segment.trim().to_lowercase();
        if !lower.is_empty() && !self.protected.contains(&lower) {
            self.protected.push(lower);
        }
    }

    /// Byte ranges of `text` covered by a keyword or a previously kept match.
    pub fn protected_spans(&self, text: &str) -> Vec<Range<usize>> {
        let mut spans = Vec::new();
        for phrase in self.keywords.iter().chain(&self.protected) {
            let re = RegexBuilder::new(&regex::escape(phrase))
                .case_insensitive(true)
                .build();
            if let Ok(re) = re {
                spans.extend(re.find_iter(text).map(|m| m.range()));
            }
        }
        spans
    }
}

fn overlaps(spans: &[Range<usize>], range: &Range<usize>) -> bool {
    spans.iter().any(|s| s.start < range.end && range.start < s.end)
}

/// Expand `replacement` for each match of `re` that does not touch protected
/// text. With a `reason`, every replaced match is logged as a removal.
fn apply_rule(
    text: &str,
    re: &Regex,
    replacement: &str,
    reason: Option<&str>,
    log: &mut RemovalLog,
) -> String {
    if !re.is_match(text) {
        return text.to_string();
    }
    let spans = log.protected_spans(text);
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in re.captures_iter(text) {
        let Some(m) = caps.get(0) else { continue };
        out.push_str(&text[last..m.start()]);
        if log.is_preserved(m.as_str()) {
            log.protect(m.as_str());
            out.push_str(m.as_str());
        } else if overlaps(&spans, &m.range()) {
            out.push_str(m.as_str());
        } else {
            if let Some(reason) = reason {
                log.record(m.as_str().trim(), reason);
            }
            caps.expand(replacement, &mut out);
        }
        last = m.end();
    }
    out.push_str(&text[last..]);
    out
}

/// Delete every unprotected match, logging each under `reason`.
pub fn remove_matches(text: &str, re: &Regex, reason: &str, log: &mut RemovalLog) -> String {
    apply_rule(text, re, "", Some(reason), log)
}

/// Replace every unprotected match with `replacement` (supports `${n}`).
/// Rewrites are not logged.
pub fn rewrite_matches(text: &str, re: &Regex, replacement: &str, log: &mut RemovalLog) -> String {
    apply_rule(text, re, replacement, None, log)
}

/// Build a case-insensitive, word-bounded pattern for a phrase alternation.
pub(crate) fn phrase_regex(alternation: &str) -> Regex {
    Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).unwrap()
}
