//! Membership relations a user can toggle.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of many-to-many membership a user can add or remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    /// user ↔ recipe, stored in `favorites`.
    Favorite,
    /// user ↔ recipe, stored in `carts`.
    Cart,
    /// subscriber ↔ author, stored in `subscriptions`.
    Subscription,
}

/// What a relation points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationTarget {
    Recipe,
    Author,
}

impl RelationKind {
    pub fn target(self) -> RelationTarget {
        match self {
            Self::Favorite | Self::Cart => RelationTarget::Recipe,
            Self::Subscription => RelationTarget::Author,
        }
    }

    /// Message returned when deleting a membership that was never created.
    pub fn missing_message(self) -> &'static str {
        match self {
            Self::Favorite => "recipe is not in favorites",
            Self::Cart => "recipe is not in shopping cart",
            Self::Subscription => "not subscribed to this author",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Favorite => "favorite",
            Self::Cart => "cart",
            Self::Subscription => "subscription",
        };
        f.write_str(s)
    }
}

/// Error returned when a string cannot be parsed as a [`RelationKind`].
#[derive(Debug, Error)]
#[error("unknown relation kind: {0:?}")]
pub struct UnknownRelationKind(pub String);

impl FromStr for RelationKind {
    type Err = UnknownRelationKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "favorite" => Ok(Self::Favorite),
            "cart" => Ok(Self::Cart),
            "subscription" => Ok(Self::Subscription),
            other => Err(UnknownRelationKind(other.to_owned())),
        }
    }
}
