//! Clock-in records: an owner checking in at a location.

use chrono::{DateTime, Utc};

use super::RecordId;

/// A stored clock-in record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockIn {
    pub id: RecordId,
    pub email: String,
    pub location: String,
    pub insert_datetime: DateTime<Utc>,
}

/// Client-supplied fields for a new clock-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClockIn {
    pub email: String,
    pub location: String,
}

/// Clock-in ready for insertion, stamped by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockInDraft {
    pub email: String,
    pub location: String,
    pub insert_datetime: DateTime<Utc>,
}

impl NewClockIn {
    /// Stamp the record with the server clock.
    pub fn into_draft(self, inserted_at: DateTime<Utc>) -> ClockInDraft {
        ClockInDraft {
            email: self.email,
            location: self.location,
            insert_datetime: inserted_at,
        }
    }
}

impl ClockInDraft {
    /// Attach the identifier the store assigned.
    pub fn into_clock_in(self, id: RecordId) -> ClockIn {
        ClockIn {
            id,
            email: self.email,
            location: self.location,
            insert_datetime: self.insert_datetime,
        }
    }
}

/// Partial update of a clock-in record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClockInPatch {
    pub email: Option<String>,
    pub location: Option<String>,
}

impl ClockInPatch {
    /// True when the patch would not change any field.
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.location.is_none()
    }

    /// Apply the patch to an in-memory record.
    pub fn apply_to(&self, record: &mut ClockIn) {
        if let Some(email) = &self.email {
            record.email.clone_from(email);
        }
        if let Some(location) = &self.location {
            record.location.clone_from(location);
        }
    }
}

/// Conjunctive filter for listing clock-ins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClockInFilter {
    /// Exact owner match.
    pub email: Option<String>,
    /// Exact location match.
    pub location: Option<String>,
    /// Clocked in at or after this instant.
    pub insert_datetime: Option<DateTime<Utc>>,
}

impl ClockInFilter {
    /// Evaluate the filter against a record.
    pub fn matches(&self, record: &ClockIn) -> bool {
        self.email.as_deref().is_none_or(|email| record.email == email)
            && self
                .location
                .as_deref()
                .is_none_or(|location| record.location == location)
            && self
                .insert_datetime
                .is_none_or(|bound| record.insert_datetime >= bound)
    }
}
