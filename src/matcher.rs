use crate::{Answer, Error, Query, Result, SegmentIndex};
use regex::Regex;
use serde_json::Value;
use smartcow::SmartCow;
use std::{
    fmt::{self, Debug, Formatter},
    ops::Range,
};

/// Answers questions about a single request uri
///
/// The uri is split on `/` once, at construction, and never changes
/// afterwards. A uri that starts with a slash has an empty first
/// segment, so for `/a/b/c` the segments are `["", "a", "b", "c"]`.
#[derive(Clone)]
pub struct UriMatcher<'uri> {
    uri: SmartCow<'uri>,
    segments: Vec<Range<usize>>,
}

impl Debug for UriMatcher<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("UriMatcher")
            .field("uri", &self.uri())
            .field("segments", &self.segments().collect::<Vec<_>>())
            .finish()
    }
}

/// byte ranges of `uri.split('/')`
fn split(uri: &str) -> Vec<Range<usize>> {
    #[cfg(feature = "memchr")]
    let slashes = memchr::memchr_iter(b'/', uri.as_bytes());
    #[cfg(not(feature = "memchr"))]
    let slashes = uri.match_indices('/').map(|(index, _)| index);

    let mut start = 0;
    let mut segments: Vec<_> = slashes
        .map(|index| {
            let segment = start..index;
            start = index + 1;
            segment
        })
        .collect();
    segments.push(start..uri.len());
    segments
}

impl<'uri> UriMatcher<'uri> {
    pub fn new(uri: impl Into<SmartCow<'uri>>) -> Self {
        let uri = uri.into();
        let segments = split(&uri);
        Self { uri, segments }
    }

    /// Copies a borrowed uri so that this matcher no longer depends
    /// on the request it was built from
    pub fn into_owned(self) -> UriMatcher<'static> {
        UriMatcher {
            uri: SmartCow::from(String::from(self.uri())),
            segments: self.segments,
        }
    }

    /// the full request uri
    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> + '_ {
        self.segments
            .iter()
            .map(move |range| &self.uri()[range.clone()])
    }

    /// This is never zero, even the empty uri has one (empty) segment.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn segment(&self, index: usize) -> Result<&str> {
        self.segment_at(&SegmentIndex::At(index))
    }

    pub fn segment_matches(&self, index: usize, expected: &str) -> Result<bool> {
        Ok(self.segment(index)? == expected)
    }

    /// Tests the whole uri against `^{pattern}$`.
    ///
    /// The pattern is spliced in verbatim. Nothing is escaped and no
    /// group is added, so `a|b` becomes `^a|b$`. Patterns are expected
    /// to come from template authors, not from request data.
    pub fn is_match(&self, pattern: &str) -> Result<bool> {
        let anchored = format!("^{pattern}$");
        #[cfg(feature = "log")]
        log::trace!("matching {} against {anchored}", self.uri());

        let regex = Regex::new(&anchored).map_err(|source| Error::InvalidPattern {
            pattern: pattern.into(),
            source,
        })?;

        Ok(regex.is_match(self.uri()))
    }

    /// Answers a [`Query`]
    pub fn query<'a>(&'a self, query: &Query<'a>) -> Result<Answer<'a>> {
        #[cfg(feature = "log")]
        log::trace!("{query:?} on {}", self.uri());

        match query {
            Query::Uri => Ok(Answer::Text(self.uri())),

            Query::Segment(index) => self.segment_at(index).map(Answer::Text),

            Query::SegmentMatch {
                index,
                expected,
                on_true,
                on_false,
            } => {
                let matched = self.segment_at(index)? == *expected;
                Ok(Answer::branch(matched, *on_true, *on_false))
            }

            Query::RegexMatch {
                pattern,
                on_true,
                on_false,
            } => {
                let matched = self.is_match(pattern)?;
                Ok(Answer::branch(matched, *on_true, *on_false))
            }
        }
    }

    /// Answers a query given as up to four positional values, see
    /// [`Query::from_args`] for the accepted shapes
    pub fn call<'a>(&'a self, args: &'a [Value]) -> Result<Answer<'a>> {
        self.query(&Query::from_args(args)?)
    }

    fn segment_at(&self, index: &SegmentIndex) -> Result<&str> {
        index
            .get()
            .and_then(|index| self.segments.get(index))
            .map(|range| &self.uri()[range.clone()])
            .ok_or_else(|| Error::IndexOutOfRange {
                index: index.clone(),
                len: self.segments.len(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_are_split_on_slash() {
        for uri in [
            "/a/b/c",
            "",
            "/",
            "//",
            "a",
            "a/",
            "/users/42?tab=profile",
            "/ünïcödé/🦀/",
        ] {
            let matcher = UriMatcher::new(uri);
            assert_eq!(
                matcher.segments().collect::<Vec<_>>(),
                uri.split('/').collect::<Vec<_>>(),
                "{uri:?}"
            );
            assert_eq!(matcher.segment_count(), uri.split('/').count());
        }
    }

    #[test]
    fn segment_lookup() {
        let matcher = UriMatcher::new("/a/b/c");
        assert_eq!(matcher.segment(0).unwrap(), "");
        assert_eq!(matcher.segment(1).unwrap(), "a");
        assert_eq!(matcher.segment(3).unwrap(), "c");
        assert!(matches!(
            matcher.segment(4),
            Err(Error::IndexOutOfRange {
                index: SegmentIndex::At(4),
                len: 4
            })
        ));
    }

    #[test]
    fn segment_comparison_is_exact() {
        let matcher = UriMatcher::new("/Users/42");
        assert!(matcher.segment_matches(1, "Users").unwrap());
        assert!(!matcher.segment_matches(1, "users").unwrap());
        assert!(!matcher.segment_matches(1, "Users ").unwrap());
        assert!(matcher.segment_matches(9, "Users").is_err());
    }

    #[test]
    fn regex_is_anchored() {
        let matcher = UriMatcher::new("/users/42");
        assert!(matcher.is_match("/users/[0-9]+").unwrap());
        assert!(!matcher.is_match("/users").unwrap());
        assert!(!matcher.is_match("users/42").unwrap());
        assert!(matcher.is_match(".*").unwrap());
    }

    #[test]
    fn regex_is_not_escaped_or_grouped() {
        let matcher = UriMatcher::new("/a.b");
        assert!(matcher.is_match("/a.b").unwrap());
        assert!(UriMatcher::new("/axb").is_match("/a.b").unwrap());

        // ^/x|/a.*$ : the left branch is only anchored at the start
        assert!(UriMatcher::new("/xyz").is_match("/x|/a.*").unwrap());
    }

    #[test]
    fn invalid_regex() {
        let matcher = UriMatcher::new("/a");
        let error = matcher.is_match("/(").unwrap_err();
        assert!(matches!(&error, Error::InvalidPattern { pattern, .. } if pattern == "/("));
    }

    #[test]
    fn owned_matcher_outlives_source() {
        let matcher = {
            let source = String::from("/a/b");
            UriMatcher::new(source.as_str()).into_owned()
        };
        assert_eq!(matcher.uri(), "/a/b");
        assert_eq!(matcher.segment(2).unwrap(), "b");
    }

    #[test]
    fn debug() {
        assert_eq!(
            format!("{:?}", UriMatcher::new("/a")),
            r#"UriMatcher { uri: "/a", segments: ["", "a"] }"#
        );
    }
}
