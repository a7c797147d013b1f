use super::models::{RepoWire, UserWire};
use crate::utils::format_count;
use fake::Dummy;
use std::fmt;

/// Repositories forked more often than this are emphasized.
pub const HIGH_EMPHASIS_FORKS: u64 = 5000;

/// Defines user profile data structure.
///
#[derive(Clone, Debug, Default, Dummy, PartialEq, Eq)]
pub struct UserProfile {
    pub id: u64,
    pub avatar_url: String,
    pub display_name: String,
}

impl From<UserWire> for UserProfile {
    fn from(wire: UserWire) -> Self {
        UserProfile {
            id: wire.id,
            avatar_url: wire.avatar_url.unwrap_or_default(),
            display_name: wire.name.unwrap_or_default(),
        }
    }
}

/// Defines repository visibility.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => write!(f, "Public"),
            Visibility::Private => write!(f, "Private"),
        }
    }
}

/// How prominently a repository is presented, derived from its fork count.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Emphasis {
    /// Fork count unknown
    Muted,
    Normal,
    /// More than `HIGH_EMPHASIS_FORKS` forks
    High,
}

impl Emphasis {
    fn from_forks(forks: Option<u64>) -> Self {
        match forks {
            None => Emphasis::Muted,
            Some(count) if count > HIGH_EMPHASIS_FORKS => Emphasis::High,
            Some(_) => Emphasis::Normal,
        }
    }
}

/// Defines repository summary data structure.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepositorySummary {
    pub id: u64,
    pub name: String,
    pub owner_avatar_url: String,
    pub fork_count: String,
    pub watch_count: String,
    pub star_count: String,
    pub description: Option<String>,
    pub visibility: Visibility,
    pub emphasis: Emphasis,
}

impl From<RepoWire> for RepositorySummary {
    fn from(wire: RepoWire) -> Self {
        let format = |count: Option<u64>| count.map(format_count).unwrap_or_else(|| "0".into());
        RepositorySummary {
            id: wire.id,
            name: wire.name,
            owner_avatar_url: wire.owner.avatar_url,
            fork_count: format(wire.forks_count),
            watch_count: format(wire.watchers_count),
            star_count: format(wire.stargazers_count),
            description: wire.description,
            visibility: if wire.private {
                Visibility::Private
            } else {
                Visibility::Public
            },
            emphasis: Emphasis::from_forks(wire.forks_count),
        }
    }
}
