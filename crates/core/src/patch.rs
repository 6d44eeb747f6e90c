//! Helpers for partial-update payloads.

use serde::{Deserialize, Deserializer};

/// Deserialize a clearable patch field.
///
/// Use with `#[serde(default, deserialize_with = "...")]`: an absent key stays
/// `None` (leave as is), `null` becomes `Some(None)` (clear) and a value
/// becomes `Some(Some(v))` (set).
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
