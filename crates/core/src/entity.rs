//! Resource kinds managed by the federation database.
//!
//! Scoped permission grants refer to exactly one of these kinds. The set is
//! closed: a grant naming anything else is rejected when the grant row is
//! read, not silently accepted at authorization time.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A resource kind the API serves.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Club,
    Team,
    Player,
    Match,
    Season,
    Badge,
    Referee,
}

impl EntityKind {
    /// All known kinds, in route-mount order.
    pub const ALL: [EntityKind; 7] = [
        EntityKind::Club,
        EntityKind::Team,
        EntityKind::Player,
        EntityKind::Match,
        EntityKind::Season,
        EntityKind::Badge,
        EntityKind::Referee,
    ];

    /// Canonical name as stored in grant rows.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Club => "Club",
            EntityKind::Team => "Team",
            EntityKind::Player => "Player",
            EntityKind::Match => "Match",
            EntityKind::Season => "Season",
            EntityKind::Badge => "Badge",
            EntityKind::Referee => "Referee",
        }
    }

    /// URL path segment the kind's resource router is mounted under.
    pub fn path_segment(&self) -> &'static str {
        match self {
            EntityKind::Club => "clubs",
            EntityKind::Team => "teams",
            EntityKind::Player => "players",
            EntityKind::Match => "matches",
            EntityKind::Season => "seasons",
            EntityKind::Badge => "badges",
            EntityKind::Referee => "referees",
        }
    }
}

impl core::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Case-insensitive: grant rows historically carried both "Team" and "team".
        match s.to_ascii_lowercase().as_str() {
            "club" => Ok(EntityKind::Club),
            "team" => Ok(EntityKind::Team),
            "player" => Ok(EntityKind::Player),
            "match" => Ok(EntityKind::Match),
            "season" => Ok(EntityKind::Season),
            "badge" => Ok(EntityKind::Badge),
            "referee" => Ok(EntityKind::Referee),
            other => Err(DomainError::validation(format!(
                "unknown entity kind: {other}"
            ))),
        }
    }
}
