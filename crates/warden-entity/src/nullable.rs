//! Serde support for patch fields where `null` differs from absent.

use serde::{Deserialize, Deserializer};

/// Deserializes a present field, `null` included, as `Some(..)`.
///
/// Use together with `#[serde(default)]` so an absent field stays `None`.
pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
