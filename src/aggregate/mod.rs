//! Response aggregation: accumulate stream fragments, finalize for display.

use std::sync::OnceLock;

use regex::Regex;

use crate::persona::RESPONSE_PREFIX;

/// Notice rendered when a completion yields no content at all.
pub const NO_RESPONSE_NOTICE: &str = "No response received from the API.";

fn prefix_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        let marker = regex::escape(RESPONSE_PREFIX.trim_end());
        Regex::new(&format!(r"^{marker}\s*")).expect("invalid prefix pattern")
    })
}

/// Accumulates streamed fragments for one turn.
///
/// `raw()` is what goes into history; `finalize()` is what gets shown:
/// the persona's leading `[NullBot]: ` marker stripped once, whitespace
/// trimmed.
#[derive(Debug, Default)]
pub struct ResponseAggregator {
    buf: String,
}

impl ResponseAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one fragment.
    pub fn push(&mut self, fragment: &str) {
        self.buf.push_str(fragment);
    }

    /// The unstripped concatenation of all fragments so far.
    pub fn raw(&self) -> &str {
        &self.buf
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Finalize the turn into its display form.
    pub fn finalize(&self) -> FinalResponse {
        if self.buf.is_empty() {
            return FinalResponse::Empty;
        }
        let stripped = prefix_pattern().replace(&self.buf, "");
        FinalResponse::Reply(stripped.trim().to_string())
    }
}

/// The finalized outcome of one completion turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinalResponse {
    /// Display-ready reply text.
    Reply(String),
    /// The stream yielded no content; render [`NO_RESPONSE_NOTICE`].
    Empty,
}

impl FinalResponse {
    /// The text to render, substituting the notice for empty turns.
    pub fn display_text(&self) -> &str {
        match self {
            Self::Reply(text) => text,
            Self::Empty => NO_RESPONSE_NOTICE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn finalize(fragments: &[&str]) -> FinalResponse {
        let mut agg = ResponseAggregator::new();
        for fragment in fragments {
            agg.push(fragment);
        }
        agg.finalize()
    }

    #[test]
    fn strips_single_leading_prefix() {
        assert_eq!(
            finalize(&["[NullBot]: Hello"]),
            FinalResponse::Reply("Hello".into())
        );
    }

    #[test]
    fn prefix_split_across_fragments_is_still_stripped() {
        assert_eq!(
            finalize(&["[Null", "Bot]: ", "Hello"]),
            FinalResponse::Reply("Hello".into())
        );
    }

    #[test]
    fn text_without_prefix_is_unchanged() {
        assert_eq!(finalize(&["Hello"]), FinalResponse::Reply("Hello".into()));
    }

    #[test]
    fn prefix_is_stripped_only_once() {
        assert_eq!(
            finalize(&["[NullBot]: [NullBot]: twice"]),
            FinalResponse::Reply("[NullBot]: twice".into())
        );
    }

    #[test]
    fn prefix_in_the_middle_is_kept() {
        assert_eq!(
            finalize(&["Hello [NullBot]: world"]),
            FinalResponse::Reply("Hello [NullBot]: world".into())
        );
    }

    #[test]
    fn empty_stream_finalizes_to_empty() {
        assert_eq!(finalize(&[]), FinalResponse::Empty);
        assert_eq!(FinalResponse::Empty.display_text(), NO_RESPONSE_NOTICE);
    }

    #[test]
    fn raw_keeps_the_prefix() {
        let mut agg = ResponseAggregator::new();
        agg.push("[NullBot]: Hi");
        assert_eq!(agg.raw(), "[NullBot]: Hi");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(
            finalize(&["[NullBot]:   \n Hello \n"]),
            FinalResponse::Reply("Hello".into())
        );
    }
}
