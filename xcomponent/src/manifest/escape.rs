//! Space escaping used by manifest path fields.
//!
//! Paths such as `Earth\ nav\ data/+40-080.dsf` escape embedded spaces with a
//! backslash. No other escape sequence exists: a backslash followed by
//! anything other than a space, or a trailing backslash, is kept as is.

use std::borrow::Cow;

/// Replace every `\ ` with a plain space.
///
/// # Example
///
/// ```
/// use xcomponent::manifest::unescape_spaces;
///
/// assert_eq!(unescape_spaces(r"Earth\ nav\ data"), "Earth nav data");
/// assert_eq!(unescape_spaces(r"C:\tmp\"), r"C:\tmp\");
/// ```
pub fn unescape_spaces(s: &str) -> Cow<'_, str> {
    if s.contains("\\ ") {
        Cow::Owned(s.replace("\\ ", " "))
    } else {
        Cow::Borrowed(s)
    }
}
