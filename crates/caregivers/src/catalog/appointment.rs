use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::caregiver::CaregiverSummary;
use super::embedded::Embedded;
use super::family::FamilySummary;
use super::ids::{AppointmentId, CaregiverId, FamilyId};
use super::validation::{check_positive, PayloadViolation, Validate};
use super::wire::{deserialize_nullable, deserialize_optional_time, deserialize_time};

/// Status recorded when a create payload leaves it out.
pub const DEFAULT_APPOINTMENT_STATUS: &str = "pending";

/// A booked visit between a caregiver and a family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub caregiver_id: CaregiverId,
    pub family_id: FamilyId,
    pub appointment_date: NaiveDate,
    #[serde(deserialize_with = "deserialize_time")]
    pub start_time: NaiveTime,
    pub duration_hours: f64,
    pub status: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub caregiver: Embedded<CaregiverSummary>,
    #[serde(default)]
    pub family: Embedded<FamilySummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentCreatePayload {
    pub caregiver_id: CaregiverId,
    pub family_id: FamilyId,
    pub appointment_date: NaiveDate,
    #[serde(deserialize_with = "deserialize_time")]
    pub start_time: NaiveTime,
    pub duration_hours: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl AppointmentCreatePayload {
    pub fn status_or_default(&self) -> String {
        self.status
            .clone()
            .unwrap_or_else(|| DEFAULT_APPOINTMENT_STATUS.to_string())
    }
}

impl Validate for AppointmentCreatePayload {
    fn validate(&self) -> Result<(), PayloadViolation> {
        check_positive("duration_hours", self.duration_hours)
    }
}

/// Partial edit of an appointment. The caregiver and family are fixed at booking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppointmentUpdatePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointment_date: Option<NaiveDate>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_time",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<Option<String>>,
}

impl Validate for AppointmentUpdatePayload {
    fn validate(&self) -> Result<(), PayloadViolation> {
        match self.duration_hours {
            Some(hours) => check_positive("duration_hours", hours),
            None => Ok(()),
        }
    }
}

impl AppointmentUpdatePayload {
    pub fn apply_to(&self, record: &mut Appointment) {
        if let Some(value) = self.appointment_date {
            record.appointment_date = value;
        }
        if let Some(value) = self.start_time {
            record.start_time = value;
        }
        if let Some(value) = self.duration_hours {
            record.duration_hours = value;
        }
        if let Some(value) = &self.status {
            record.status = value.clone();
        }
        if let Some(value) = &self.notes {
            record.notes = value.clone();
        }
    }
}
