use serde::{Deserialize, Serialize};

use crate::catalog::validation::check_non_negative;
use crate::catalog::{
    Appointment, Caregiver, CaregiverId, FamilyId, JobApplication, JobPost, JobPostId, Message,
    Participant, PayloadViolation, Validate,
};

/// Filters accepted by the caregiver directory. Blank strings are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaregiverQuery {
    pub caregiver_type: Option<String>,
    pub city: Option<String>,
    pub min_rate: Option<f64>,
    pub max_rate: Option<f64>,
}

impl CaregiverQuery {
    pub fn matches(&self, caregiver: &Caregiver) -> bool {
        exact(&self.caregiver_type, &caregiver.caregiver_type)
            && contains_ignore_case(&self.city, &caregiver.city)
            && self.min_rate.map_or(true, |min| caregiver.hourly_rate >= min)
            && self.max_rate.map_or(true, |max| caregiver.hourly_rate <= max)
    }
}

impl Validate for CaregiverQuery {
    fn validate(&self) -> Result<(), PayloadViolation> {
        if let Some(min) = self.min_rate {
            check_non_negative("min_rate", min)?;
        }
        if let Some(max) = self.max_rate {
            check_non_negative("max_rate", max)?;
        }
        Ok(())
    }
}

/// Filters accepted by the job board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPostQuery {
    pub caregiver_type: Option<String>,
    pub city: Option<String>,
}

impl JobPostQuery {
    pub fn matches(&self, post: &JobPost) -> bool {
        exact(&self.caregiver_type, &post.caregiver_type)
            && contains_ignore_case(&self.city, &post.city)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationQuery {
    pub job_post_id: Option<JobPostId>,
    pub caregiver_id: Option<CaregiverId>,
}

impl ApplicationQuery {
    pub fn matches(&self, application: &JobApplication) -> bool {
        self.job_post_id
            .map_or(true, |id| application.job_post_id == id)
            && self
                .caregiver_id
                .map_or(true, |id| application.caregiver_id == id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentQuery {
    pub caregiver_id: Option<CaregiverId>,
    pub family_id: Option<FamilyId>,
    pub status_filter: Option<String>,
}

impl AppointmentQuery {
    pub fn matches(&self, appointment: &Appointment) -> bool {
        self.caregiver_id
            .map_or(true, |id| appointment.caregiver_id == id)
            && self.family_id.map_or(true, |id| appointment.family_id == id)
            && exact(&self.status_filter, &appointment.status)
    }
}

/// Conversation filter; each id matches either side of a message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageQuery {
    pub family_id: Option<FamilyId>,
    pub caregiver_id: Option<CaregiverId>,
}

impl MessageQuery {
    pub fn matches(&self, message: &Message) -> bool {
        self.family_id
            .map_or(true, |id| message.involves(Participant::Family(id)))
            && self
                .caregiver_id
                .map_or(true, |id| message.involves(Participant::Caregiver(id)))
    }
}

fn exact(filter: &Option<String>, value: &str) -> bool {
    match filter.as_deref() {
        Some(wanted) if !wanted.is_empty() => wanted == value,
        _ => true,
    }
}

fn contains_ignore_case(filter: &Option<String>, value: &str) -> bool {
    match filter.as_deref() {
        Some(wanted) if !wanted.is_empty() => value.to_lowercase().contains(&wanted.to_lowercase()),
        _ => true,
    }
}
