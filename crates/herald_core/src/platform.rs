//! Publishing platform identifiers.

use serde::{Deserialize, Serialize};

/// A publishing target.
///
/// # Examples
///
/// ```
/// use herald_core::Platform;
/// use std::str::FromStr;
///
/// assert_eq!(Platform::from_str("Reddit").unwrap(), Platform::Reddit);
/// assert_eq!(Platform::Blogger.to_string(), "blogger");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Platform {
    /// Twitter / X threads
    Twitter,
    /// Reddit self posts
    Reddit,
    /// Blogger articles
    Blogger,
}
