use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::caregiver::CaregiverSummary;
use super::embedded::Embedded;
use super::ids::{ApplicationId, CaregiverId, JobPostId};
use super::validation::{PayloadViolation, Validate};
use super::wire::deserialize_nullable;

/// Status recorded when a create payload leaves it out.
pub const DEFAULT_APPLICATION_STATUS: &str = "applied";

/// A caregiver's application to a job post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobApplication {
    pub id: ApplicationId,
    pub job_post_id: JobPostId,
    pub caregiver_id: CaregiverId,
    #[serde(default)]
    pub cover_message: Option<String>,
    pub status: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub caregiver: Embedded<CaregiverSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobApplicationCreatePayload {
    pub job_post_id: JobPostId,
    pub caregiver_id: CaregiverId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl JobApplicationCreatePayload {
    pub fn status_or_default(&self) -> String {
        self.status
            .clone()
            .unwrap_or_else(|| DEFAULT_APPLICATION_STATUS.to_string())
    }
}

impl Validate for JobApplicationCreatePayload {
    fn validate(&self) -> Result<(), PayloadViolation> {
        Ok(())
    }
}

/// Partial edit of an application. The job post and caregiver are fixed at creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobApplicationUpdatePayload {
    #[serde(
        default,
        deserialize_with = "deserialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub cover_message: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Validate for JobApplicationUpdatePayload {
    fn validate(&self) -> Result<(), PayloadViolation> {
        Ok(())
    }
}

impl JobApplicationUpdatePayload {
    pub fn apply_to(&self, record: &mut JobApplication) {
        if let Some(value) = &self.cover_message {
            record.cover_message = value.clone();
        }
        if let Some(value) = &self.status {
            record.status = value.clone();
        }
    }
}
