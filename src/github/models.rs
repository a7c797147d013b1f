//! Wire records as returned by the GitHub REST API.
//!
//! Every field is defaulted: unknown fields are ignored, and both missing
//! fields and explicit `null`s fall back to the type's default so a sparse
//! payload never fails to decode.

use fake::Dummy;
use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit `null` the same as a missing field.
///
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `GET /users/{id}`
///
#[derive(Clone, Debug, Default, Deserialize, Serialize, Dummy, PartialEq, Eq)]
#[serde(default)]
pub struct UserWire {
    pub avatar_url: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub id: u64,
    pub login: Option<String>,
    pub updated_at: Option<String>,
    pub url: Option<String>,
    pub name: Option<String>,
}

/// Owner block nested in a repository record.
///
#[derive(Clone, Debug, Default, Deserialize, Serialize, Dummy, PartialEq, Eq)]
#[serde(default)]
pub struct OwnerWire {
    #[serde(deserialize_with = "null_as_default")]
    pub avatar_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
}

/// One element of `GET /users/{id}/repos`.
///
#[derive(Clone, Debug, Default, Deserialize, Serialize, Dummy, PartialEq, Eq)]
#[serde(default)]
pub struct RepoWire {
    pub description: Option<String>,
    pub forks: Option<u64>,
    pub forks_count: Option<u64>,
    #[serde(deserialize_with = "null_as_default")]
    pub full_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub owner: OwnerWire,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub private: bool,
    pub watchers_count: Option<u64>,
    pub stargazers_count: Option<u64>,
}
