use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::embedded::Embedded;
use super::family::FamilySummary;
use super::ids::{FamilyId, JobPostId};
use super::validation::{PayloadViolation, Validate};
use super::wire::deserialize_nullable;

/// Job advertised by a family on the job board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPost {
    pub id: JobPostId,
    pub family_id: FamilyId,
    pub title: String,
    pub caregiver_type: String,
    pub city: String,
    #[serde(default)]
    pub care_recipient_age: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub preferred_time_slots: Vec<String>,
    #[serde(default)]
    pub frequency: Option<String>,
    #[serde(default)]
    pub requirements: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub family: Embedded<FamilySummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPostCreatePayload {
    pub family_id: FamilyId,
    pub title: String,
    pub caregiver_type: String,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub care_recipient_age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub preferred_time_slots: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
}

impl Validate for JobPostCreatePayload {
    fn validate(&self) -> Result<(), PayloadViolation> {
        Ok(())
    }
}

/// Partial edit of a job post. The owning family cannot be reassigned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPostUpdatePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caregiver_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub care_recipient_age: Option<Option<u32>>,
    #[serde(
        default,
        deserialize_with = "deserialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_time_slots: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "deserialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub frequency: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "deserialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub requirements: Option<Option<String>>,
}

impl Validate for JobPostUpdatePayload {
    fn validate(&self) -> Result<(), PayloadViolation> {
        Ok(())
    }
}

impl JobPostUpdatePayload {
    pub fn apply_to(&self, record: &mut JobPost) {
        if let Some(value) = &self.title {
            record.title = value.clone();
        }
        if let Some(value) = &self.caregiver_type {
            record.caregiver_type = value.clone();
        }
        if let Some(value) = &self.city {
            record.city = value.clone();
        }
        if let Some(value) = self.care_recipient_age {
            record.care_recipient_age = value;
        }
        if let Some(value) = &self.description {
            record.description = value.clone();
        }
        if let Some(value) = &self.preferred_time_slots {
            record.preferred_time_slots = value.clone();
        }
        if let Some(value) = &self.frequency {
            record.frequency = value.clone();
        }
        if let Some(value) = &self.requirements {
            record.requirements = value.clone();
        }
    }
}
