//! Answers questions about the current request uri from inside
//! templates.
//!
//! ```
//! use uri_matcher::{Answer, Query, UriMatcher};
//!
//! let matcher = UriMatcher::new("/users/42");
//! assert_eq!(matcher.segment(1)?, "users");
//! assert!(matcher.segment_matches(2, "42")?);
//! assert!(matcher.is_match("/users/[0-9]+")?);
//!
//! let query = Query::regex_match("/users/[0-9]+")
//!     .on_true("profile")
//!     .on_false("elsewhere");
//! assert_eq!(matcher.query(&query)?, Answer::Text("profile"));
//! # Ok::<(), uri_matcher::Error>(())
//! ```
//!
//! Template engines that pass untyped positional arguments can go
//! through [`UriMatcher::call`], which resolves the overloaded
//! argument list into a [`Query`] first. With the `tera` feature, a
//! matcher can be registered with a `tera::Tera` instance directly.

mod args;
mod error;
mod matcher;
mod query;
#[cfg(feature = "tera")]
mod template;

pub use error::{Error, Result};
pub use matcher::UriMatcher;
pub use query::{Answer, Query, SegmentIndex};
#[cfg(feature = "tera")]
pub use template::FUNCTION_NAME;
