//! Deserialization helpers for lenient platform payloads.

use serde::{Deserialize, Deserializer};

/// Decode an explicit `null` as the type's default.
///
/// `#[serde(default)]` only covers missing keys. The platform also sends
/// `null` for empty lists, maps and nested objects.
pub(crate) fn null_as_default<'de, D, V>(deserializer: D) -> Result<V, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de> + Default,
{
    Ok(Option::<V>::deserialize(deserializer)?.unwrap_or_default())
}
