//! Resource references and operation kinds.
//!
//! Every resource this server stores — patient records, appointments,
//! medical records — belongs to exactly one patient. Authorization is
//! decided per `(resource kind, owning patient)` pair, so a
//! [`ResourceRef`] is all the decision engine needs to know about a target.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::error::CoreError;
use crate::id::PatientId;

// =============================================================================
// Resource Kind
// =============================================================================

/// The kinds of patient-scoped resources the server stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// A patient's demographic record.
    PatientRecord,
    /// A scheduled appointment.
    Appointment,
    /// A clinical visit record (diagnosis, treatment, notes).
    MedicalRecord,
}

impl ResourceKind {
    /// All resource kinds.
    pub const ALL: &'static [ResourceKind] = &[
        ResourceKind::PatientRecord,
        ResourceKind::Appointment,
        ResourceKind::MedicalRecord,
    ];

    /// Canonical snake_case name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PatientRecord => "patient_record",
            Self::Appointment => "appointment",
            Self::MedicalRecord => "medical_record",
        }
    }

    /// Whether a patient may edit this kind of resource on their own record.
    ///
    /// Patients maintain their own demographics; appointments and medical
    /// records are written by staff.
    #[must_use]
    pub fn patient_editable(&self) -> bool {
        matches!(self, Self::PatientRecord)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "patient_record" => Ok(Self::PatientRecord),
            "appointment" => Ok(Self::Appointment),
            "medical_record" => Ok(Self::MedicalRecord),
            other => Err(CoreError::InvalidResourceKind(other.to_string())),
        }
    }
}

// =============================================================================
// Operation
// =============================================================================

/// The operation being requested against a resource.
///
/// Create, update, and delete all require `Write`; fetches require `Read`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Read,
    Write,
}

impl Operation {
    /// Canonical snake_case name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "read" => Ok(Self::Read),
            "write" => Ok(Self::Write),
            other => Err(CoreError::InvalidOperation(other.to_string())),
        }
    }
}

// =============================================================================
// Resource Reference
// =============================================================================

/// A reference to one patient-scoped resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceRef {
    /// The kind of resource.
    pub kind: ResourceKind,

    /// The patient the resource belongs to.
    pub patient: PatientId,
}

impl ResourceRef {
    /// Builds a reference to a resource owned by the given patient.
    #[must_use]
    pub const fn new(kind: ResourceKind, patient: PatientId) -> Self {
        Self { kind, patient }
    }

    /// Builds a reference from boundary input, where the owning patient may
    /// be missing.
    ///
    /// Every resource kind is patient-scoped, so a missing patient id is a
    /// malformed reference and must be rejected before it can reach the
    /// decision engine.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidResource` if `patient` is `None`.
    pub fn from_parts(kind: ResourceKind, patient: Option<PatientId>) -> Result<Self> {
        match patient {
            Some(patient) => Ok(Self { kind, patient }),
            None => Err(CoreError::invalid_resource(format!(
                "{kind} reference is missing the owning patient id"
            ))),
        }
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.patient)
    }
}
