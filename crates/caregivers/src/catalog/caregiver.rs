use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::CaregiverId;
use super::validation::{check_email, check_password, check_positive, PayloadViolation, Validate};
use super::wire::deserialize_nullable;

/// Caregiver profile as served by the API. Credentials never leave the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Caregiver {
    pub id: CaregiverId,
    pub first_name: String,
    pub last_name: String,
    pub caregiver_type: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub hourly_rate: f64,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Caregiver {
    pub fn summary(&self) -> CaregiverSummary {
        CaregiverSummary {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            caregiver_type: self.caregiver_type.clone(),
            city: self.city.clone(),
        }
    }
}

/// Reduced caregiver record embedded in applications and appointments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaregiverSummary {
    pub id: CaregiverId,
    pub first_name: String,
    pub last_name: String,
    pub caregiver_type: String,
    pub city: String,
}

/// Registration payload for a caregiver.
///
/// Every non-optional field must be supplied, so a registration without a password is not
/// representable:
///
/// ```compile_fail
/// use caregivers::catalog::CaregiverCreatePayload;
///
/// let payload = CaregiverCreatePayload {
///     first_name: "Dana".to_string(),
///     last_name: "Zhan".to_string(),
///     caregiver_type: "Elderly Care".to_string(),
///     gender: None,
///     photo_url: None,
///     email: "dana@example.com".to_string(),
///     phone: "+77772345678".to_string(),
///     city: "Astana".to_string(),
///     hourly_rate: 12.0,
///     bio: None,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaregiverCreatePayload {
    pub first_name: String,
    pub last_name: String,
    pub caregiver_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub hourly_rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub password: String,
}

impl Validate for CaregiverCreatePayload {
    fn validate(&self) -> Result<(), PayloadViolation> {
        check_email(&self.email)?;
        check_positive("hourly_rate", self.hourly_rate)?;
        check_password(&self.password)
    }
}

/// Partial edit of a caregiver profile. Absent fields are left untouched and an explicit
/// `null` clears a nullable column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaregiverUpdatePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caregiver_type: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub gender: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "deserialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub photo_url: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<f64>,
    #[serde(
        default,
        deserialize_with = "deserialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub bio: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl Validate for CaregiverUpdatePayload {
    fn validate(&self) -> Result<(), PayloadViolation> {
        if let Some(email) = &self.email {
            check_email(email)?;
        }
        if let Some(rate) = self.hourly_rate {
            check_positive("hourly_rate", rate)?;
        }
        if let Some(password) = &self.password {
            check_password(password)?;
        }
        Ok(())
    }
}

impl CaregiverUpdatePayload {
    /// Applies the profile fields onto `record`. The password is handled by the caller.
    pub fn apply_to(&self, record: &mut Caregiver) {
        if let Some(value) = &self.first_name {
            record.first_name = value.clone();
        }
        if let Some(value) = &self.last_name {
            record.last_name = value.clone();
        }
        if let Some(value) = &self.caregiver_type {
            record.caregiver_type = value.clone();
        }
        if let Some(value) = &self.gender {
            record.gender = value.clone();
        }
        if let Some(value) = &self.photo_url {
            record.photo_url = value.clone();
        }
        if let Some(value) = &self.email {
            record.email = value.clone();
        }
        if let Some(value) = &self.phone {
            record.phone = value.clone();
        }
        if let Some(value) = &self.city {
            record.city = value.clone();
        }
        if let Some(value) = self.hourly_rate {
            record.hourly_rate = value;
        }
        if let Some(value) = &self.bio {
            record.bio = value.clone();
        }
    }
}
