//! Exposes a [`UriMatcher`] to [Tera](https://keats.github.io/tera/)
//! templates as the `uri` function.
//!
//! Tera only passes named arguments, so the call shapes are spelled
//! out with keywords:
//!
//! ```text
//! {{ uri() }}
//! {{ uri(segment=1) }}
//! {{ uri(segment=1, equals="users", on_true="active", on_false="") }}
//! {% if uri(pattern="/users/[0-9]+") %}...{% endif %}
//! ```

use crate::{args::segment_index, Error, Query, Result, UriMatcher};
use std::collections::HashMap;
use tera::{Function, Tera, Value};

/// the name templates call the matcher by
pub const FUNCTION_NAME: &str = "uri";

const ARGUMENTS: [&str; 5] = ["segment", "equals", "pattern", "on_true", "on_false"];

impl UriMatcher<'static> {
    /// registers this matcher as [`FUNCTION_NAME`], replacing any
    /// matcher registered before it
    pub fn register(self, tera: &mut Tera) {
        tera.register_function(FUNCTION_NAME, self);
    }
}

impl Function for UriMatcher<'static> {
    fn call(&self, args: &HashMap<String, Value>) -> tera::Result<Value> {
        query_from_keywords(args)
            .and_then(|query| self.query(&query).map(Value::from))
            .map_err(|error| tera::Error::msg(error.to_string()))
    }
}

fn query_from_keywords(args: &HashMap<String, Value>) -> Result<Query<'_>> {
    if let Some(unknown) = args.keys().find(|name| !ARGUMENTS.contains(&name.as_str())) {
        return Err(Error::InvalidUsage(format!("unknown argument `{unknown}`")));
    }

    let present = |name: &str| args.get(name).filter(|value| !value.is_null());

    let text = |name: &str| match present(name) {
        None => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.as_str())),
        Some(_) => Err(Error::InvalidUsage(format!("`{name}` must be a string"))),
    };

    let on_true = text("on_true")?;
    let on_false = text("on_false")?;
    let has_branches = on_true.is_some() || on_false.is_some();

    let index = present("segment")
        .map(|value| {
            segment_index(value)
                .ok_or_else(|| Error::InvalidUsage(String::from("`segment` must be a number")))
        })
        .transpose()?;

    match (index, text("equals")?, text("pattern")?) {
        (None, None, None) if !has_branches => Ok(Query::Uri),

        (Some(index), None, None) if !has_branches => Ok(Query::Segment(index)),

        (Some(index), Some(expected), None) => Ok(Query::SegmentMatch {
            index,
            expected,
            on_true,
            on_false,
        }),

        (None, None, Some(pattern)) => Ok(Query::RegexMatch {
            pattern,
            on_true,
            on_false,
        }),

        _ => {
            let mut names: Vec<_> = args
                .iter()
                .filter(|(_, value)| !value.is_null())
                .map(|(name, _)| name.as_str())
                .collect();
            names.sort_unstable();
            Err(Error::InvalidUsage(format!(
                "unsupported combination of arguments ({})",
                names.join(", ")
            )))
        }
    }
}
