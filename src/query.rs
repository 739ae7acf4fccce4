use serde_json::Value;
use smartstring::alias::String as SmartString;
use std::fmt::{self, Display, Formatter};

/// A position in the `/`-separated segment list of a uri
///
/// Dynamic callers can hand us any number, so besides a plain index
/// this also carries numbers that cannot name a segment at all
/// (negative, fractional, or non-finite). Those are still segment
/// lookups, they just never succeed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SegmentIndex {
    At(usize),
    NotAnIndex(SmartString),
}

impl SegmentIndex {
    /// the usable index, if this is one
    pub fn get(&self) -> Option<usize> {
        match self {
            SegmentIndex::At(index) => Some(*index),
            SegmentIndex::NotAnIndex(_) => None,
        }
    }
}

impl Display for SegmentIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SegmentIndex::At(index) => write!(f, "{index}"),
            SegmentIndex::NotAnIndex(number) => f.write_str(number),
        }
    }
}

impl From<usize> for SegmentIndex {
    fn from(index: usize) -> Self {
        Self::At(index)
    }
}

/// The closed set of questions a [`UriMatcher`](crate::UriMatcher)
/// can answer.
///
/// `on_true` and `on_false` replace the boolean answer of a match when
/// present. A match that supplies only `on_true` still answers
/// `false` when it fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query<'q> {
    /// the full request uri
    Uri,

    /// a single segment
    Segment(SegmentIndex),

    /// exact comparison of a single segment
    SegmentMatch {
        index: SegmentIndex,
        expected: &'q str,
        on_true: Option<&'q str>,
        on_false: Option<&'q str>,
    },

    /// `^pattern$` against the full request uri
    RegexMatch {
        pattern: &'q str,
        on_true: Option<&'q str>,
        on_false: Option<&'q str>,
    },
}

impl<'q> Query<'q> {
    pub fn uri() -> Self {
        Self::Uri
    }

    pub fn segment(index: usize) -> Self {
        Self::Segment(SegmentIndex::At(index))
    }

    pub fn segment_match(index: usize, expected: &'q str) -> Self {
        Self::SegmentMatch {
            index: SegmentIndex::At(index),
            expected,
            on_true: None,
            on_false: None,
        }
    }

    pub fn regex_match(pattern: &'q str) -> Self {
        Self::RegexMatch {
            pattern,
            on_true: None,
            on_false: None,
        }
    }

    /// Text to answer with when a match succeeds. Has no effect on
    /// [`Query::Uri`] and [`Query::Segment`].
    pub fn on_true(mut self, text: &'q str) -> Self {
        if let Self::SegmentMatch { on_true, .. } | Self::RegexMatch { on_true, .. } = &mut self {
            *on_true = Some(text);
        }
        self
    }

    /// Text to answer with when a match fails. Has no effect on
    /// [`Query::Uri`] and [`Query::Segment`].
    pub fn on_false(mut self, text: &'q str) -> Self {
        if let Self::SegmentMatch { on_false, .. } | Self::RegexMatch { on_false, .. } = &mut self
        {
            *on_false = Some(text);
        }
        self
    }
}

/// The result of a [`Query`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer<'a> {
    Text(&'a str),
    Bool(bool),
}

impl<'a> Answer<'a> {
    pub(crate) fn branch(matched: bool, on_true: Option<&'a str>, on_false: Option<&'a str>) -> Self {
        match (matched, on_true, on_false) {
            (true, Some(text), _) | (false, _, Some(text)) => Answer::Text(text),
            (matched, _, _) => Answer::Bool(matched),
        }
    }

    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Answer::Text(text) => Some(*text),
            Answer::Bool(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Answer::Bool(b) => Some(*b),
            Answer::Text(_) => None,
        }
    }
}

/// Prints the way a template prints it: text verbatim, `true` as
/// `1`, `false` as nothing.
impl Display for Answer<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Text(text) => f.write_str(text),
            Answer::Bool(true) => f.write_str("1"),
            Answer::Bool(false) => Ok(()),
        }
    }
}

impl From<Answer<'_>> for Value {
    fn from(answer: Answer<'_>) -> Self {
        match answer {
            Answer::Text(text) => Value::String(text.into()),
            Answer::Bool(b) => Value::Bool(b),
        }
    }
}
