//! Null-safe JSON deserialization.
//!
//! Every record produced here has all of its fields populated: strings
//! default to `""`, integers to [`MISSING_NUMBER`], booleans to `false`,
//! sequences to empty containers and nested records to their empty
//! instance. Only a top-level document that is not JSON at all is an error.

mod extract;
mod record;

pub use extract::{FromJson, MISSING_NUMBER};
pub use record::Record;
pub(crate) use record::record;

use serde_json::Value;
use tracing::trace;

use crate::error::MalformedInputError;
use crate::Result;

/// Parse an optional document into `T`.
///
/// `None` yields the empty instance without parsing anything.
///
/// # Errors
///
/// Returns [`Error::MalformedInput`](crate::Error::MalformedInput) if the
/// document is not valid JSON.
pub fn parse<T: FromJson>(input: Option<&str>) -> Result<T> {
    let Some(input) = input else {
        trace!("absent document, using empty instance");
        return Ok(T::absent());
    };
    let value: Value = serde_json::from_str(input).map_err(MalformedInputError::from)?;
    Ok(T::extract(Some(&value)))
}

/// Parse a raw response body into `T`.
pub fn parse_slice<T: FromJson>(input: &[u8]) -> Result<T> {
    let value: Value = serde_json::from_slice(input).map_err(MalformedInputError::from)?;
    Ok(T::extract(Some(&value)))
}

/// Convert an already parsed node into `T`.
pub fn from_value<T: FromJson>(value: Option<&Value>) -> T {
    T::extract(value)
}
