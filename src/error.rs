use crate::SegmentIndex;
use smartstring::alias::String as SmartString;

/// Everything that can go wrong while answering a uri query
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// the arguments did not match any of the recognized call shapes
    #[error("invalid use of the uri function: {0}")]
    InvalidUsage(String),

    /// a numeric segment index that does not name a segment of this uri
    #[error("uri segment {index} is out of range, this uri has {len} segments")]
    IndexOutOfRange { index: SegmentIndex, len: usize },

    /// the anchored pattern could not be compiled
    #[error("`{pattern}` is not a valid uri pattern")]
    InvalidPattern {
        pattern: SmartString,
        #[source]
        source: regex::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
