//! Overload resolution for callers that only have untyped positional
//! arguments, such as template engines.

use crate::{Error, Query, Result, SegmentIndex};
use serde_json::{Number, Value};
use smartstring::alias::String as SmartString;
use std::{convert::TryFrom, fmt::Display};

impl<'q> Query<'q> {
    /// Resolves up to four positional arguments into a [`Query`]
    ///
    /// | arguments                         | query                      |
    /// |-----------------------------------|----------------------------|
    /// | `()`                              | [`Query::Uri`]             |
    /// | `(index)`                         | [`Query::Segment`]         |
    /// | `(index, str[, str[, str]])`      | [`Query::SegmentMatch`]    |
    /// | `(str[, str[, str]])`             | [`Query::RegexMatch`]      |
    ///
    /// `index` is any number or numeric string, and is tested for
    /// first: `"2"` is a segment lookup, never a pattern. Trailing nulls
    /// are treated as absent. Every other shape is an
    /// [`Error::InvalidUsage`].
    pub fn from_args(args: &'q [Value]) -> Result<Self> {
        let args = without_trailing_nulls(args);

        let query = match args {
            [] => Some(Query::Uri),
            [first, rest @ ..] => match (segment_index(first), first.as_str()) {
                (Some(index), _) => segment_query(index, rest),
                (None, Some(pattern)) => regex_query(pattern, rest),
                (None, None) => None,
            },
        };

        match query {
            Some(query) => {
                #[cfg(feature = "log")]
                log::trace!("resolved {} arguments to {query:?}", args.len());
                Ok(query)
            }

            None => {
                let received = shape(args);
                #[cfg(feature = "log")]
                log::debug!("rejected uri arguments {received}");
                Err(Error::InvalidUsage(format!("unsupported arguments {received}")))
            }
        }
    }
}

fn without_trailing_nulls(args: &[Value]) -> &[Value] {
    let len = args
        .iter()
        .rposition(|arg| !arg.is_null())
        .map_or(0, |last| last + 1);
    &args[..len]
}

fn segment_query(index: SegmentIndex, rest: &[Value]) -> Option<Query<'_>> {
    match rest {
        [] => Some(Query::Segment(index)),
        [expected, rest @ ..] => {
            let (on_true, on_false) = branches(rest)?;
            Some(Query::SegmentMatch {
                index,
                expected: expected.as_str()?,
                on_true,
                on_false,
            })
        }
    }
}

fn regex_query<'q>(pattern: &'q str, rest: &'q [Value]) -> Option<Query<'q>> {
    let (on_true, on_false) = branches(rest)?;
    Some(Query::RegexMatch {
        pattern,
        on_true,
        on_false,
    })
}

type Branches<'q> = (Option<&'q str>, Option<&'q str>);

fn branches(values: &[Value]) -> Option<Branches<'_>> {
    match values {
        [] => Some((None, None)),
        [on_true] => Some((Some(on_true.as_str()?), None)),
        [on_true, on_false] => Some((Some(on_true.as_str()?), Some(on_false.as_str()?))),
        _ => None,
    }
}

/// `Some` for anything numeric, whether or not it is a usable index
pub(crate) fn segment_index(value: &Value) -> Option<SegmentIndex> {
    match value {
        Value::Number(number) => Some(number_index(number)),
        Value::String(string) => numeric_str_index(string),
        _ => None,
    }
}

fn number_index(number: &Number) -> SegmentIndex {
    match number.as_u64().map(usize::try_from) {
        Some(Ok(index)) => SegmentIndex::At(index),
        _ => float_index(number.as_f64().unwrap_or(f64::NAN), number),
    }
}

fn numeric_str_index(string: &str) -> Option<SegmentIndex> {
    let trimmed = string.trim();
    let looks_numeric = !trimmed.is_empty()
        && trimmed
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));

    if !looks_numeric {
        return None;
    }

    if let Ok(index) = trimmed.parse::<usize>() {
        return Some(SegmentIndex::At(index));
    }

    trimmed
        .parse::<f64>()
        .ok()
        .map(|float| float_index(float, trimmed))
}

fn float_index(float: f64, source: impl Display) -> SegmentIndex {
    if float.is_finite() && float >= 0.0 && float.fract() == 0.0 && float <= usize::MAX as f64 {
        SegmentIndex::At(float as usize)
    } else {
        SegmentIndex::NotAnIndex(SmartString::from(source.to_string()))
    }
}

fn shape(args: &[Value]) -> String {
    let kinds: Vec<_> = args
        .iter()
        .map(|arg| match arg {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(s) if numeric_str_index(s).is_some() => "numeric string",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        })
        .collect();
    format!("({})", kinds.join(", "))
}
