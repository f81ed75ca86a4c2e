// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Submission data model.
//!
//! `ContactRequest` is the raw wire shape: everything optional and
//! stringly so the validator can report every violation in one pass
//! instead of failing at deserialization. `Submission` is the typed,
//! sanitized record the rest of the pipeline works with.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Raw contact form payload as received over the wire.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub organization_type: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub urgency: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub consent: Option<bool>,
}

/// Organization category, closed enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrganizationType {
    NhsTrust,
    PrivateHospital,
    CareHome,
    Clinic,
    Other,
}

impl OrganizationType {
    /// Human-readable label used in email bodies.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NhsTrust => "NHS Trust",
            Self::PrivateHospital => "Private Hospital",
            Self::CareHome => "Care Home",
            Self::Clinic => "Medical Clinic",
            Self::Other => "Other",
        }
    }

    /// Wire value, as accepted on the form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NhsTrust => "nhs-trust",
            Self::PrivateHospital => "private-hospital",
            Self::CareHome => "care-home",
            Self::Clinic => "clinic",
            Self::Other => "other",
        }
    }
}

impl FromStr for OrganizationType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nhs-trust" => Ok(Self::NhsTrust),
            "private-hospital" => Ok(Self::PrivateHospital),
            "care-home" => Ok(Self::CareHome),
            "clinic" => Ok(Self::Clinic),
            "other" => Ok(Self::Other),
            _ => Err(()),
        }
    }
}

impl fmt::Display for OrganizationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested service, closed enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceKind {
    WaterTesting,
    LegionellaAssessment,
    HtmCompliance,
    EmergencyResponse,
    Training,
    Consultation,
}

impl ServiceKind {
    /// Human-readable label used in email bodies.
    pub fn label(&self) -> &'static str {
        match self {
            Self::WaterTesting => "Water Quality Testing",
            Self::LegionellaAssessment => "Legionella Risk Assessment",
            Self::HtmCompliance => "HTM 04-01 Compliance",
            Self::EmergencyResponse => "Emergency Response",
            Self::Training => "Staff Training",
            Self::Consultation => "Expert Consultation",
        }
    }

    /// Wire value, as accepted on the form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WaterTesting => "water-testing",
            Self::LegionellaAssessment => "legionella-assessment",
            Self::HtmCompliance => "htm-compliance",
            Self::EmergencyResponse => "emergency-response",
            Self::Training => "training",
            Self::Consultation => "consultation",
        }
    }
}

impl FromStr for ServiceKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "water-testing" => Ok(Self::WaterTesting),
            "legionella-assessment" => Ok(Self::LegionellaAssessment),
            "htm-compliance" => Ok(Self::HtmCompliance),
            "emergency-response" => Ok(Self::EmergencyResponse),
            "training" => Ok(Self::Training),
            "consultation" => Ok(Self::Consultation),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response-time priority, closed enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Urgency {
    Routine,
    Urgent,
    Emergency,
}

impl Urgency {
    /// Human-readable label with the committed response window.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Routine => "Routine (5-7 days)",
            Self::Urgent => "Urgent (24-48 hours)",
            Self::Emergency => "EMERGENCY (Same day)",
        }
    }

    /// Wire value, as accepted on the form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Routine => "routine",
            Self::Urgent => "urgent",
            Self::Emergency => "emergency",
        }
    }

    /// Banner color for the operator notification email.
    pub fn banner_color(&self) -> &'static str {
        match self {
            Self::Routine => "#16a34a",
            Self::Urgent => "#ea580c",
            Self::Emergency => "#dc2626",
        }
    }
}

impl FromStr for Urgency {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "routine" => Ok(Self::Routine),
            "urgent" => Ok(Self::Urgent),
            "emergency" => Ok(Self::Emergency),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully validated, sanitized contact form submission.
///
/// Exists only for the lifetime of the request; nothing persists it.
#[derive(Debug, Clone)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub organization: String,
    pub organization_type: OrganizationType,
    pub service: ServiceKind,
    pub urgency: Urgency,
    pub message: String,
}

impl Submission {
    /// Apply free-text sanitization to every user-supplied field.
    pub fn sanitized(self) -> Self {
        Self {
            name: crate::sanitize::sanitize(&self.name),
            email: crate::sanitize::sanitize(&self.email),
            phone: self.phone.as_deref().map(crate::sanitize::sanitize),
            organization: crate::sanitize::sanitize(&self.organization),
            message: crate::sanitize::sanitize(&self.message),
            organization_type: self.organization_type,
            service: self.service,
            urgency: self.urgency,
        }
    }
}
