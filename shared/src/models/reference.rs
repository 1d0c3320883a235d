//! Association references
//!
//! An employee write names its department and job either by id, by an
//! attached record, or not at all. Resolution against the store result is a
//! pure function so the create/update asymmetry can be tested in isolation.
//!
//! | Submitted          | Create                    | Update                     |
//! |--------------------|---------------------------|----------------------------|
//! | `ById(id)`         | must resolve              | must resolve, then set     |
//! | `Embedded` with id | accepted                  | kept                       |
//! | `Embedded` w/o id  | rejected (`Missing`)      | cleared                    |
//! | `Absent`           | rejected (`Missing`)      | cleared                    |

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Records that may carry a store-assigned id
pub trait Identified {
    fn record_id(&self) -> Option<i64>;
}

/// Submitted association
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reference<T> {
    /// Foreign-key id typed by the user
    ById(i64),
    /// A full record attached to the payload
    Embedded(T),
    /// Nothing submitted
    Absent,
}

// No `T: Default` bound, unlike the derive
impl<T> Default for Reference<T> {
    fn default() -> Self {
        Self::Absent
    }
}

/// Field deserializer that reads JSON `null` as [`Reference::Absent`].
/// Pair with `#[serde(default)]` so an omitted field is absent too.
pub fn null_as_absent<'de, D, T>(deserializer: D) -> Result<Reference<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Reference<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// What the store should do with a foreign key on update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceChange {
    /// Leave the stored value untouched
    Keep,
    Set(i64),
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReferenceError {
    #[error("referenced id {0} does not exist")]
    Unresolved(i64),
    #[error("reference is required")]
    Missing,
}

impl<T: Identified> Reference<T> {
    /// Id that has to be looked up before resolving, if any
    pub fn id_to_fetch(&self) -> Option<i64> {
        match self {
            Self::ById(id) => Some(*id),
            _ => None,
        }
    }

    /// Resolve for a create. `fetched` is the store lookup for [`Self::id_to_fetch`].
    pub fn resolve_for_create(self, fetched: Option<T>) -> Result<T, ReferenceError> {
        match self {
            Self::ById(id) => fetched.ok_or(ReferenceError::Unresolved(id)),
            Self::Embedded(record) if record.record_id().is_some() => Ok(record),
            Self::Embedded(_) | Self::Absent => Err(ReferenceError::Missing),
        }
    }

    /// Resolve for an update. Anything that does not name an existing
    /// record by id clears the association.
    pub fn resolve_for_update(self, fetched: Option<T>) -> Result<ReferenceChange, ReferenceError> {
        match self {
            Self::ById(id) => match fetched.and_then(|r| r.record_id()) {
                Some(found) => Ok(ReferenceChange::Set(found)),
                None => Err(ReferenceError::Unresolved(id)),
            },
            Self::Embedded(record) => Ok(record
                .record_id()
                .map_or(ReferenceChange::Clear, ReferenceChange::Set)),
            Self::Absent => Ok(ReferenceChange::Clear),
        }
    }
}
