//! Identity and timestamp header embedded in every aggregate.

use super::{TimestampOrderError, timestamp};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;

/// Identity plus creation and modification timestamps.
///
/// The identifier and creation timestamp are fixed once the header exists.
/// The modification timestamp only ever moves forward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordHeader<I> {
    id: I,
    #[serde(with = "timestamp")]
    created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    updated_at: DateTime<Utc>,
}

impl<I> RecordHeader<I> {
    /// Creates a header stamped with the current clock time.
    #[must_use]
    pub fn new(id: I, clock: &impl Clock) -> Self {
        let stamped = timestamp::now(clock);
        Self {
            id,
            created_at: stamped,
            updated_at: stamped,
        }
    }

    /// Reconstructs a header from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns [`TimestampOrderError`] when `updated_at` precedes
    /// `created_at`.
    pub fn from_persisted(
        id: I,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, TimestampOrderError> {
        if updated_at < created_at {
            return Err(TimestampOrderError {
                created_at,
                updated_at,
            });
        }
        Ok(Self {
            id,
            created_at,
            updated_at,
        })
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> &I {
        &self.id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Advances `updated_at` to the current clock time.
    ///
    /// A clock reading earlier than the stored value leaves it unchanged.
    pub fn touch(&mut self, clock: &impl Clock) {
        let now = timestamp::now(clock);
        if now > self.updated_at {
            self.updated_at = now;
        }
    }
}
