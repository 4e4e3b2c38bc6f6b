use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::catalog::{
    Appointment, ApplicationId, AppointmentId, Caregiver, CaregiverId, FamilyId, FamilyMember,
    JobApplication, JobPost, JobPostId, Message, MessageId, Participant,
};

/// Stored caregiver profile together with its credential hash.
#[derive(Debug, Clone)]
pub struct CaregiverRow {
    pub record: Caregiver,
    pub password_hash: String,
}

/// Stored family account together with its credential hash.
#[derive(Debug, Clone)]
pub struct FamilyRow {
    pub record: FamilyMember,
    pub password_hash: String,
}

#[derive(Debug, Default, Clone)]
struct Sequences {
    caregivers: u64,
    families: u64,
    job_posts: u64,
    applications: u64,
    appointments: u64,
    messages: u64,
}

/// Every table of the marketplace. Records are stored without embedded summaries; the service
/// joins those in when it answers.
#[derive(Debug, Default, Clone)]
pub struct MarketplaceTables {
    pub caregivers: BTreeMap<CaregiverId, CaregiverRow>,
    pub families: BTreeMap<FamilyId, FamilyRow>,
    pub job_posts: BTreeMap<JobPostId, JobPost>,
    pub applications: BTreeMap<ApplicationId, JobApplication>,
    pub appointments: BTreeMap<AppointmentId, Appointment>,
    pub messages: BTreeMap<MessageId, Message>,
    sequences: Sequences,
}

impl MarketplaceTables {
    pub fn next_caregiver_id(&mut self) -> CaregiverId {
        self.sequences.caregivers += 1;
        CaregiverId(self.sequences.caregivers)
    }

    pub fn next_family_id(&mut self) -> FamilyId {
        self.sequences.families += 1;
        FamilyId(self.sequences.families)
    }

    pub fn next_job_post_id(&mut self) -> JobPostId {
        self.sequences.job_posts += 1;
        JobPostId(self.sequences.job_posts)
    }

    pub fn next_application_id(&mut self) -> ApplicationId {
        self.sequences.applications += 1;
        ApplicationId(self.sequences.applications)
    }

    pub fn next_appointment_id(&mut self) -> AppointmentId {
        self.sequences.appointments += 1;
        AppointmentId(self.sequences.appointments)
    }

    pub fn next_message_id(&mut self) -> MessageId {
        self.sequences.messages += 1;
        MessageId(self.sequences.messages)
    }

    pub fn caregiver_email_taken(&self, email: &str, except: Option<CaregiverId>) -> bool {
        self.caregivers
            .values()
            .any(|row| row.record.email == email && Some(row.record.id) != except)
    }

    pub fn family_email_taken(&self, email: &str, except: Option<FamilyId>) -> bool {
        self.families
            .values()
            .any(|row| row.record.email == email && Some(row.record.id) != except)
    }

    pub fn application_exists(&self, job_post_id: JobPostId, caregiver_id: CaregiverId) -> bool {
        self.applications.values().any(|application| {
            application.job_post_id == job_post_id && application.caregiver_id == caregiver_id
        })
    }

    pub fn participant_exists(&self, participant: Participant) -> bool {
        match participant {
            Participant::Family(id) => self.families.contains_key(&id),
            Participant::Caregiver(id) => self.caregivers.contains_key(&id),
        }
    }

    /// Removes a caregiver with its applications, appointments, and messages.
    pub fn remove_caregiver(&mut self, id: CaregiverId) -> Option<CaregiverRow> {
        let row = self.caregivers.remove(&id)?;
        self.applications
            .retain(|_, application| application.caregiver_id != id);
        self.appointments
            .retain(|_, appointment| appointment.caregiver_id != id);
        self.messages
            .retain(|_, message| !message.involves(Participant::Caregiver(id)));
        Some(row)
    }

    /// Removes a family with its job posts (and their applications), appointments, and
    /// messages.
    pub fn remove_family(&mut self, id: FamilyId) -> Option<FamilyRow> {
        let row = self.families.remove(&id)?;
        let owned_posts: Vec<JobPostId> = self
            .job_posts
            .values()
            .filter(|post| post.family_id == id)
            .map(|post| post.id)
            .collect();
        for post_id in owned_posts {
            self.remove_job_post(post_id);
        }
        self.appointments
            .retain(|_, appointment| appointment.family_id != id);
        self.messages
            .retain(|_, message| !message.involves(Participant::Family(id)));
        Some(row)
    }

    /// Removes a job post with the applications filed against it.
    pub fn remove_job_post(&mut self, id: JobPostId) -> Option<JobPost> {
        let post = self.job_posts.remove(&id)?;
        self.applications
            .retain(|_, application| application.job_post_id != id);
        Some(post)
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
///
/// Each closure runs against a consistent view of the tables; a `write` closure is applied
/// atomically, so existence checks and cascades inside it cannot interleave with other writers.
pub trait MarketplaceRepository: Send + Sync {
    fn read<T>(&self, op: impl FnOnce(&MarketplaceTables) -> T) -> Result<T, RepositoryError>;
    fn write<T>(&self, op: impl FnOnce(&mut MarketplaceTables) -> T)
        -> Result<T, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Process-local repository backing the service and the demo.
#[derive(Debug, Default, Clone)]
pub struct InMemoryMarketplace {
    tables: Arc<RwLock<MarketplaceTables>>,
}

impl MarketplaceRepository for InMemoryMarketplace {
    fn read<T>(&self, op: impl FnOnce(&MarketplaceTables) -> T) -> Result<T, RepositoryError> {
        let guard = self
            .tables
            .read()
            .map_err(|_| RepositoryError::Unavailable("marketplace lock poisoned".to_string()))?;
        Ok(op(&guard))
    }

    fn write<T>(
        &self,
        op: impl FnOnce(&mut MarketplaceTables) -> T,
    ) -> Result<T, RepositoryError> {
        let mut guard = self
            .tables
            .write()
            .map_err(|_| RepositoryError::Unavailable("marketplace lock poisoned".to_string()))?;
        Ok(op(&mut guard))
    }
}
