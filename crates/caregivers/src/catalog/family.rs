use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::FamilyId;
use super::validation::{check_email, check_password, PayloadViolation, Validate};
use super::wire::deserialize_nullable;

/// Family member account looking for care.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyMember {
    pub id: FamilyId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub care_recipient_info: Option<String>,
    #[serde(default)]
    pub house_rules: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl FamilyMember {
    pub fn summary(&self) -> FamilySummary {
        FamilySummary {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            city: self.city.clone(),
        }
    }
}

/// Reduced family record embedded in job posts and appointments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilySummary {
    pub id: FamilyId,
    pub first_name: String,
    pub last_name: String,
    pub city: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyMemberCreatePayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub care_recipient_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_rules: Option<String>,
    pub password: String,
}

impl Validate for FamilyMemberCreatePayload {
    fn validate(&self) -> Result<(), PayloadViolation> {
        check_email(&self.email)?;
        check_password(&self.password)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyMemberUpdatePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub address: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "deserialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub care_recipient_info: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "deserialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub house_rules: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl Validate for FamilyMemberUpdatePayload {
    fn validate(&self) -> Result<(), PayloadViolation> {
        if let Some(email) = &self.email {
            check_email(email)?;
        }
        if let Some(password) = &self.password {
            check_password(password)?;
        }
        Ok(())
    }
}

impl FamilyMemberUpdatePayload {
    /// Applies the profile fields onto `record`. The password is handled by the caller.
    pub fn apply_to(&self, record: &mut FamilyMember) {
        if let Some(value) = &self.first_name {
            record.first_name = value.clone();
        }
        if let Some(value) = &self.last_name {
            record.last_name = value.clone();
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
        if let Some(value) = &self.address {
            record.address = value.clone();
        }
        if let Some(value) = &self.care_recipient_info {
            record.care_recipient_info = value.clone();
        }
        if let Some(value) = &self.house_rules {
            record.house_rules = value.clone();
        }
    }
}
