//! Access grants: time-bounded delegation of a patient's record.
//!
//! A grant lets its `grantee` read (or read and write) the record of
//! `patient` while the reference date lies inside the grant's window.
//! Grants arrive over the wire as [`GrantDraft`] / [`GrantUpdate`] with
//! free-form level and date strings; validation normalizes them into the
//! typed [`GrantAttributes`] shape before anything is persisted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use clinrec_core::{CalendarDate, GrantId, Operation, PatientId, UserId};

// =============================================================================
// Access Level
// =============================================================================

/// The level of access a grant delegates.
///
/// Ordered: `Write > Read`. A write grant covers read requests as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    Read,
    Write,
}

impl AccessLevel {
    /// Whether this level covers the requested operation.
    #[must_use]
    pub fn covers(&self, operation: Operation) -> bool {
        match operation {
            Operation::Read => true,
            Operation::Write => *self == Self::Write,
        }
    }

    /// Canonical snake_case name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read" => Ok(Self::Read),
            "write" => Ok(Self::Write),
            other => Err(ValidationError::InvalidLevel {
                value: other.to_string(),
            }),
        }
    }
}

// =============================================================================
// Access Grant
// =============================================================================

/// A stored access grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessGrant {
    /// Store-assigned identifier.
    pub id: GrantId,

    /// The patient whose record is covered.
    pub patient: PatientId,

    /// The user receiving delegated access.
    pub grantee: UserId,

    /// Delegated access level.
    pub level: AccessLevel,

    /// First day the grant is valid, inclusive.
    pub effective: CalendarDate,

    /// Last day the grant is valid, inclusive.
    pub expires: CalendarDate,
}

impl AccessGrant {
    /// Whether the grant's validity window contains the given date.
    ///
    /// Both boundary days are inclusive: a grant expiring on `2024-01-31`
    /// is still active for the whole of that day.
    #[must_use]
    pub fn is_active(&self, on: CalendarDate) -> bool {
        self.effective <= on && on <= self.expires
    }

    /// The grant's validated attributes, without the store-assigned id.
    #[must_use]
    pub fn attributes(&self) -> GrantAttributes {
        GrantAttributes {
            patient: self.patient,
            grantee: self.grantee,
            level: self.level,
            effective: self.effective,
            expires: self.expires,
        }
    }
}

/// Validated grant attributes, ready for the store to persist.
///
/// Only produced by draft validation; the date-ordering invariant
/// (`effective <= expires`) always holds here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GrantAttributes {
    /// The patient whose record is covered.
    pub patient: PatientId,

    /// The user receiving delegated access.
    pub grantee: UserId,

    /// Delegated access level.
    pub level: AccessLevel,

    /// First day the grant is valid, inclusive.
    pub effective: CalendarDate,

    /// Last day the grant is valid, inclusive.
    pub expires: CalendarDate,
}

impl GrantAttributes {
    /// Attaches a store-assigned id, producing the full grant.
    #[must_use]
    pub fn with_id(self, id: GrantId) -> AccessGrant {
        AccessGrant {
            id,
            patient: self.patient,
            grantee: self.grantee,
            level: self.level,
            effective: self.effective,
            expires: self.expires,
        }
    }
}

// =============================================================================
// Wire Drafts
// =============================================================================

/// Unvalidated grant-creation request, as read off the wire.
///
/// Level and dates are plain strings here; [`GrantDraft::validate`] is the
/// only path from a draft to something the store will accept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrantDraft {
    /// The patient whose record is delegated.
    pub patient_id: i64,

    /// The user receiving access.
    pub grantee_id: i64,

    /// Requested access level: `"read"` or `"write"`.
    pub access_level: String,

    /// First valid day, `YYYY-MM-DD`.
    pub effective_date: String,

    /// Last valid day, `YYYY-MM-DD`.
    pub expiration_date: String,
}

impl GrantDraft {
    /// Validates and normalizes the draft.
    ///
    /// Enforces that the level is one of the closed set, both dates parse
    /// as calendar dates, and `effective <= expires`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered, naming the
    /// violated field.
    pub fn validate(&self) -> Result<GrantAttributes, ValidationError> {
        let level = AccessLevel::from_str(&self.access_level)?;
        let (effective, expires) =
            parse_window(&self.effective_date, &self.expiration_date)?;

        Ok(GrantAttributes {
            patient: PatientId::new(self.patient_id),
            grantee: UserId::new(self.grantee_id),
            level,
            effective,
            expires,
        })
    }
}

/// Unvalidated grant-update request.
///
/// Only the access level and validity window are mutable; the covered
/// patient and the grantee are fixed at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrantUpdate {
    /// New access level: `"read"` or `"write"`.
    pub access_level: String,

    /// New first valid day, `YYYY-MM-DD`.
    pub effective_date: String,

    /// New last valid day, `YYYY-MM-DD`.
    pub expiration_date: String,
}

impl GrantUpdate {
    /// Validates the update against the stored grant it replaces.
    ///
    /// The patient and grantee are carried over from `current`; the update
    /// replaces the level and window atomically, so a draft that fails here
    /// leaves the stored grant untouched.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered.
    pub fn validate_for(&self, current: &AccessGrant) -> Result<GrantAttributes, ValidationError> {
        let level = AccessLevel::from_str(&self.access_level)?;
        let (effective, expires) =
            parse_window(&self.effective_date, &self.expiration_date)?;

        Ok(GrantAttributes {
            patient: current.patient,
            grantee: current.grantee,
            level,
            effective,
            expires,
        })
    }
}

fn parse_window(
    effective: &str,
    expiration: &str,
) -> Result<(CalendarDate, CalendarDate), ValidationError> {
    let effective_date =
        CalendarDate::from_str(effective).map_err(|_| ValidationError::InvalidDate {
            field: "effective_date",
            value: effective.to_string(),
        })?;
    let expiration_date =
        CalendarDate::from_str(expiration).map_err(|_| ValidationError::InvalidDate {
            field: "expiration_date",
            value: expiration.to_string(),
        })?;

    if effective_date > expiration_date {
        return Err(ValidationError::DateOrder {
            effective: effective_date,
            expires: expiration_date,
        });
    }

    Ok((effective_date, expiration_date))
}

// =============================================================================
// Validation Error
// =============================================================================

/// A grant draft violated the level or date-window invariants.
///
/// Each variant names the violated field so callers can surface a
/// field-specific rejection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The access level is not one of `read`/`write`.
    #[error("access_level '{value}' is not one of 'read', 'write'")]
    InvalidLevel {
        /// The rejected value.
        value: String,
    },

    /// A date field did not parse as a calendar date.
    #[error("{field} '{value}' is not a valid calendar date (YYYY-MM-DD)")]
    InvalidDate {
        /// The violated field name.
        field: &'static str,
        /// The rejected value.
        value: String,
    },

    /// The effective date falls after the expiration date.
    #[error("effective_date {effective} is after expiration_date {expires}")]
    DateOrder {
        /// The parsed effective date.
        effective: CalendarDate,
        /// The parsed expiration date.
        expires: CalendarDate,
    },
}

impl ValidationError {
    /// The name of the violated field.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidLevel { .. } => "access_level",
            Self::InvalidDate { field, .. } => field,
            Self::DateOrder { .. } => "effective_date",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn draft() -> GrantDraft {
        GrantDraft {
            patient_id: 7,
            grantee_id: 12,
            access_level: "read".to_string(),
            effective_date: "2024-03-01".to_string(),
            expiration_date: "2024-03-31".to_string(),
        }
    }

    fn grant(level: AccessLevel, effective: CalendarDate, expires: CalendarDate) -> AccessGrant {
        AccessGrant {
            id: GrantId::new(1),
            patient: PatientId::new(7),
            grantee: UserId::new(12),
            level,
            effective,
            expires,
        }
    }

    #[test]
    fn test_level_covers() {
        assert!(AccessLevel::Read.covers(Operation::Read));
        assert!(!AccessLevel::Read.covers(Operation::Write));
        assert!(AccessLevel::Write.covers(Operation::Read));
        assert!(AccessLevel::Write.covers(Operation::Write));
    }

    #[test]
    fn test_level_ordering() {
        assert!(AccessLevel::Write > AccessLevel::Read);
        assert_eq!(
            [AccessLevel::Read, AccessLevel::Write].iter().max(),
            Some(&AccessLevel::Write)
        );
    }

    #[test]
    fn test_level_parse() {
        assert_eq!(AccessLevel::from_str("read").unwrap(), AccessLevel::Read);
        assert_eq!(AccessLevel::from_str("write").unwrap(), AccessLevel::Write);

        let err = AccessLevel::from_str("owner").unwrap_err();
        assert_eq!(err.field(), "access_level");
    }

    #[test]
    fn test_grant_activity_boundaries_inclusive() {
        let g = grant(
            AccessLevel::Read,
            CalendarDate::new(date!(2024 - 01 - 01)),
            CalendarDate::new(date!(2024 - 01 - 31)),
        );

        assert!(g.is_active(CalendarDate::new(date!(2024 - 01 - 01))));
        assert!(g.is_active(CalendarDate::new(date!(2024 - 01 - 15))));
        assert!(g.is_active(CalendarDate::new(date!(2024 - 01 - 31))));
        assert!(!g.is_active(CalendarDate::new(date!(2023 - 12 - 31))));
        assert!(!g.is_active(CalendarDate::new(date!(2024 - 02 - 01))));
    }

    #[test]
    fn test_single_day_grant() {
        let day = CalendarDate::new(date!(2024 - 06 - 01));
        let g = grant(AccessLevel::Write, day, day);
        assert!(g.is_active(day));
        assert!(!g.is_active(CalendarDate::new(date!(2024 - 06 - 02))));
    }

    #[test]
    fn test_draft_validates() {
        let attrs = draft().validate().unwrap();
        assert_eq!(attrs.patient, PatientId::new(7));
        assert_eq!(attrs.grantee, UserId::new(12));
        assert_eq!(attrs.level, AccessLevel::Read);
        assert_eq!(attrs.effective, CalendarDate::new(date!(2024 - 03 - 01)));
        assert_eq!(attrs.expires, CalendarDate::new(date!(2024 - 03 - 31)));
    }

    #[test]
    fn test_draft_rejects_unknown_level() {
        let mut d = draft();
        d.access_level = "full".to_string();
        let err = d.validate().unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidLevel {
                value: "full".to_string()
            }
        );
    }

    #[test]
    fn test_draft_rejects_bad_dates_naming_field() {
        let mut d = draft();
        d.effective_date = "March 1".to_string();
        assert_eq!(d.validate().unwrap_err().field(), "effective_date");

        let mut d = draft();
        d.expiration_date = "2024-02-30".to_string();
        assert_eq!(d.validate().unwrap_err().field(), "expiration_date");
    }

    #[test]
    fn test_draft_rejects_inverted_window() {
        let mut d = draft();
        d.effective_date = "2024-04-01".to_string();
        d.expiration_date = "2024-03-01".to_string();
        match d.validate().unwrap_err() {
            ValidationError::DateOrder { effective, expires } => {
                assert_eq!(effective, CalendarDate::new(date!(2024 - 04 - 01)));
                assert_eq!(expires, CalendarDate::new(date!(2024 - 03 - 01)));
            }
            other => panic!("expected DateOrder, got {other:?}"),
        }
    }

    #[test]
    fn test_draft_accepts_single_day_window() {
        let mut d = draft();
        d.effective_date = "2024-03-01".to_string();
        d.expiration_date = "2024-03-01".to_string();
        assert!(d.validate().is_ok());
    }

    #[test]
    fn test_update_keeps_patient_and_grantee() {
        let current = grant(
            AccessLevel::Read,
            CalendarDate::new(date!(2024 - 03 - 01)),
            CalendarDate::new(date!(2024 - 03 - 31)),
        );
        let update = GrantUpdate {
            access_level: "write".to_string(),
            effective_date: "2024-04-01".to_string(),
            expiration_date: "2024-06-30".to_string(),
        };

        let attrs = update.validate_for(&current).unwrap();
        assert_eq!(attrs.patient, current.patient);
        assert_eq!(attrs.grantee, current.grantee);
        assert_eq!(attrs.level, AccessLevel::Write);
    }

    #[test]
    fn test_update_rejects_inverted_window() {
        let current = grant(
            AccessLevel::Read,
            CalendarDate::new(date!(2024 - 03 - 01)),
            CalendarDate::new(date!(2024 - 03 - 31)),
        );
        let update = GrantUpdate {
            access_level: "read".to_string(),
            effective_date: "2024-07-01".to_string(),
            expiration_date: "2024-06-01".to_string(),
        };

        assert!(matches!(
            update.validate_for(&current).unwrap_err(),
            ValidationError::DateOrder { .. }
        ));
    }

    #[test]
    fn test_attributes_with_id_roundtrip() {
        let attrs = draft().validate().unwrap();
        let g = attrs.with_id(GrantId::new(9));
        assert_eq!(g.id, GrantId::new(9));
        assert_eq!(g.attributes(), attrs);
    }

    #[test]
    fn test_grant_serde() {
        let g = grant(
            AccessLevel::Write,
            CalendarDate::new(date!(2024 - 03 - 01)),
            CalendarDate::new(date!(2024 - 03 - 31)),
        );
        let json = serde_json::to_value(&g).unwrap();
        assert_eq!(json["level"], "write");
        assert_eq!(json["effective"], "2024-03-01");
        assert_eq!(json["patient"], 7);
    }
}
