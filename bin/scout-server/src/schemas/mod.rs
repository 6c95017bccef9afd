//! HTTP request / response types.
//!
//! Field names are camelCase on the wire. Required string fields default to
//! empty when absent so that a missing field and an empty one fail the same
//! validation rule and produce the same 400 message. An explicit `null` is
//! read the same way as an absent field.

pub mod chat;
pub mod conversation;
pub mod plan;
pub mod research;
pub mod system;

use serde::{Deserialize, Deserializer};

/// Deserialize `null` as `T::default()`. Pair with `#[serde(default)]` so an
/// absent field lands on the same value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
