use std::cmp::Ordering;
use std::sync::Arc;

use axum::http::StatusCode;
use chrono::Utc;
use tracing::{debug, info, warn};

use super::filters::{
    AppointmentQuery, ApplicationQuery, CaregiverQuery, JobPostQuery, MessageQuery,
};
use super::repository::{
    CaregiverRow, FamilyRow, MarketplaceRepository, MarketplaceTables, RepositoryError,
};
use crate::catalog::{
    ApplicationId, Appointment, AppointmentCreatePayload, AppointmentId,
    AppointmentUpdatePayload, Caregiver, CaregiverCreatePayload, CaregiverId,
    CaregiverUpdatePayload, FamilyId, FamilyMember, FamilyMemberCreatePayload,
    FamilyMemberUpdatePayload, JobApplication, JobApplicationCreatePayload,
    JobApplicationUpdatePayload, JobPost, JobPostCreatePayload, JobPostId, JobPostUpdatePayload,
    Message, MessageCreatePayload, Participant, PayloadViolation, Validate,
};
use crate::security::{hash_password, PasswordError};

const CAREGIVER_NOT_FOUND: &str = "Caregiver not found";
const FAMILY_NOT_FOUND: &str = "Family member not found";
const JOB_POST_NOT_FOUND: &str = "Job post not found";
const APPLICATION_NOT_FOUND: &str = "Application not found";
const APPOINTMENT_NOT_FOUND: &str = "Appointment not found";
const EMAIL_REGISTERED: &str = "Email already registered";
const EMAIL_IN_USE: &str = "Email already in use";
const APPLICATION_EXISTS: &str = "Application already exists";

/// Marketplace facade: validates payloads, enforces references, and joins embedded summaries
/// into every record it returns.
pub struct MarketplaceService<R> {
    repository: Arc<R>,
}

impl<R> MarketplaceService<R>
where
    R: MarketplaceRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn create_caregiver(
        &self,
        payload: CaregiverCreatePayload,
    ) -> Result<Caregiver, MarketplaceError> {
        payload
            .validate()
            .inspect_err(|err| warn!(%err, "caregiver registration rejected"))?;
        if self
            .repository
            .read(|tables| tables.caregiver_email_taken(&payload.email, None))?
        {
            return Err(MarketplaceError::Conflict(EMAIL_REGISTERED));
        }
        let password_hash = hash_password(&payload.password)?;
        let created_at = Some(Utc::now());

        let caregiver = self.repository.write(|tables| -> Result<Caregiver, MarketplaceError> {
            if tables.caregiver_email_taken(&payload.email, None) {
                return Err(MarketplaceError::Conflict(EMAIL_REGISTERED));
            }

            let record = Caregiver {
                id: tables.next_caregiver_id(),
                first_name: payload.first_name,
                last_name: payload.last_name,
                caregiver_type: payload.caregiver_type,
                gender: payload.gender,
                photo_url: payload.photo_url,
                email: payload.email,
                phone: payload.phone,
                city: payload.city,
                hourly_rate: payload.hourly_rate,
                bio: payload.bio,
                created_at,
                updated_at: None,
            };
            tables.caregivers.insert(
                record.id,
                CaregiverRow {
                    record: record.clone(),
                    password_hash,
                },
            );
            Ok(record)
        })??;

        info!(caregiver_id = %caregiver.id, "caregiver registered");
        Ok(caregiver)
    }

    /// Directory listing ordered by last then first name.
    pub fn list_caregivers(
        &self,
        query: &CaregiverQuery,
    ) -> Result<Vec<Caregiver>, MarketplaceError> {
        query
            .validate()
            .inspect_err(|err| warn!(%err, "caregiver filters rejected"))?;
        let mut caregivers: Vec<Caregiver> = self.repository.read(|tables| {
            tables
                .caregivers
                .values()
                .map(|row| &row.record)
                .filter(|caregiver| query.matches(caregiver))
                .cloned()
                .collect()
        })?;

        caregivers.sort_by(|a, b| {
            a.last_name
                .cmp(&b.last_name)
                .then_with(|| a.first_name.cmp(&b.first_name))
                .then_with(|| a.id.cmp(&b.id))
        });
        debug!(count = caregivers.len(), "listed caregivers");
        Ok(caregivers)
    }

    pub fn get_caregiver(&self, id: CaregiverId) -> Result<Caregiver, MarketplaceError> {
        self.repository
            .read(|tables| tables.caregivers.get(&id).map(|row| row.record.clone()))?
            .ok_or(MarketplaceError::NotFound(CAREGIVER_NOT_FOUND))
    }

    pub fn update_caregiver(
        &self,
        id: CaregiverId,
        payload: CaregiverUpdatePayload,
    ) -> Result<Caregiver, MarketplaceError> {
        payload
            .validate()
            .inspect_err(|err| warn!(%err, caregiver_id = %id, "caregiver update rejected"))?;
        self.repository
            .read(|tables| check_caregiver_update(tables, id, payload.email.as_deref()))??;
        let password_hash = payload.password.as_deref().map(hash_password).transpose()?;
        let updated_at = Some(Utc::now());

        let caregiver = self.repository.write(|tables| -> Result<Caregiver, MarketplaceError> {
            check_caregiver_update(tables, id, payload.email.as_deref())?;

            let row = tables
                .caregivers
                .get_mut(&id)
                .ok_or(MarketplaceError::NotFound(CAREGIVER_NOT_FOUND))?;
            payload.apply_to(&mut row.record);
            if let Some(hash) = password_hash {
                row.password_hash = hash;
            }
            row.record.updated_at = updated_at;
            Ok(row.record.clone())
        })??;

        info!(caregiver_id = %id, "caregiver updated");
        Ok(caregiver)
    }

    pub fn delete_caregiver(&self, id: CaregiverId) -> Result<(), MarketplaceError> {
        self.repository
            .write(|tables| tables.remove_caregiver(id))?
            .ok_or(MarketplaceError::NotFound(CAREGIVER_NOT_FOUND))?;
        info!(caregiver_id = %id, "caregiver removed");
        Ok(())
    }

    pub fn create_family(
        &self,
        payload: FamilyMemberCreatePayload,
    ) -> Result<FamilyMember, MarketplaceError> {
        payload
            .validate()
            .inspect_err(|err| warn!(%err, "family registration rejected"))?;
        if self
            .repository
            .read(|tables| tables.family_email_taken(&payload.email, None))?
        {
            return Err(MarketplaceError::Conflict(EMAIL_REGISTERED));
        }
        let password_hash = hash_password(&payload.password)?;
        let created_at = Some(Utc::now());

        let family = self.repository.write(|tables| -> Result<FamilyMember, MarketplaceError> {
            if tables.family_email_taken(&payload.email, None) {
                return Err(MarketplaceError::Conflict(EMAIL_REGISTERED));
            }

            let record = FamilyMember {
                id: tables.next_family_id(),
                first_name: payload.first_name,
                last_name: payload.last_name,
                email: payload.email,
                phone: payload.phone,
                city: payload.city,
                address: payload.address,
                care_recipient_info: payload.care_recipient_info,
                house_rules: payload.house_rules,
                created_at,
                updated_at: None,
            };
            tables.families.insert(
                record.id,
                FamilyRow {
                    record: record.clone(),
                    password_hash,
                },
            );
            Ok(record)
        })??;

        info!(family_id = %family.id, "family registered");
        Ok(family)
    }

    pub fn list_families(&self) -> Result<Vec<FamilyMember>, MarketplaceError> {
        let mut families: Vec<FamilyMember> = self.repository.read(|tables| {
            tables
                .families
                .values()
                .map(|row| row.record.clone())
                .collect()
        })?;

        families.sort_by(|a, b| a.last_name.cmp(&b.last_name).then_with(|| a.id.cmp(&b.id)));
        debug!(count = families.len(), "listed families");
        Ok(families)
    }

    pub fn get_family(&self, id: FamilyId) -> Result<FamilyMember, MarketplaceError> {
        self.repository
            .read(|tables| tables.families.get(&id).map(|row| row.record.clone()))?
            .ok_or(MarketplaceError::NotFound(FAMILY_NOT_FOUND))
    }

    pub fn update_family(
        &self,
        id: FamilyId,
        payload: FamilyMemberUpdatePayload,
    ) -> Result<FamilyMember, MarketplaceError> {
        payload
            .validate()
            .inspect_err(|err| warn!(%err, family_id = %id, "family update rejected"))?;
        self.repository
            .read(|tables| check_family_update(tables, id, payload.email.as_deref()))??;
        let password_hash = payload.password.as_deref().map(hash_password).transpose()?;
        let updated_at = Some(Utc::now());

        let family = self.repository.write(|tables| -> Result<FamilyMember, MarketplaceError> {
            check_family_update(tables, id, payload.email.as_deref())?;

            let row = tables
                .families
                .get_mut(&id)
                .ok_or(MarketplaceError::NotFound(FAMILY_NOT_FOUND))?;
            payload.apply_to(&mut row.record);
            if let Some(hash) = password_hash {
                row.password_hash = hash;
            }
            row.record.updated_at = updated_at;
            Ok(row.record.clone())
        })??;

        info!(family_id = %id, "family updated");
        Ok(family)
    }

    pub fn delete_family(&self, id: FamilyId) -> Result<(), MarketplaceError> {
        self.repository
            .write(|tables| tables.remove_family(id))?
            .ok_or(MarketplaceError::NotFound(FAMILY_NOT_FOUND))?;
        info!(family_id = %id, "family removed");
        Ok(())
    }

    pub fn create_job_post(&self, payload: JobPostCreatePayload) -> Result<JobPost, MarketplaceError> {
        payload.validate()?;
        let created_at = Some(Utc::now());

        let post = self.repository.write(|tables| -> Result<JobPost, MarketplaceError> {
            if !tables.families.contains_key(&payload.family_id) {
                return Err(MarketplaceError::NotFound(FAMILY_NOT_FOUND));
            }

            let record = JobPost {
                id: tables.next_job_post_id(),
                family_id: payload.family_id,
                title: payload.title,
                caregiver_type: payload.caregiver_type,
                city: payload.city,
                care_recipient_age: payload.care_recipient_age,
                description: payload.description,
                preferred_time_slots: payload.preferred_time_slots,
                frequency: payload.frequency,
                requirements: payload.requirements,
                created_at,
                updated_at: None,
                family: Default::default(),
            };
            tables.job_posts.insert(record.id, record.clone());
            Ok(hydrate_job_post(tables, record))
        })??;

        info!(job_post_id = %post.id, family_id = %post.family_id, "job post published");
        Ok(post)
    }

    /// Job board listing, newest first.
    pub fn list_job_posts(&self, query: &JobPostQuery) -> Result<Vec<JobPost>, MarketplaceError> {
        let mut posts: Vec<JobPost> = self.repository.read(|tables| {
            tables
                .job_posts
                .values()
                .filter(|post| query.matches(post))
                .map(|post| hydrate_job_post(tables, post.clone()))
                .collect()
        })?;

        posts.sort_by(|a, b| newest_first((a.created_at, a.id), (b.created_at, b.id)));
        debug!(count = posts.len(), "listed job posts");
        Ok(posts)
    }

    pub fn get_job_post(&self, id: JobPostId) -> Result<JobPost, MarketplaceError> {
        self.repository
            .read(|tables| {
                tables
                    .job_posts
                    .get(&id)
                    .map(|post| hydrate_job_post(tables, post.clone()))
            })?
            .ok_or(MarketplaceError::NotFound(JOB_POST_NOT_FOUND))
    }

    pub fn update_job_post(
        &self,
        id: JobPostId,
        payload: JobPostUpdatePayload,
    ) -> Result<JobPost, MarketplaceError> {
        payload.validate()?;
        let updated_at = Some(Utc::now());

        let post = self.repository.write(|tables| -> Result<JobPost, MarketplaceError> {
            let post = tables
                .job_posts
                .get_mut(&id)
                .ok_or(MarketplaceError::NotFound(JOB_POST_NOT_FOUND))?;
            payload.apply_to(post);
            post.updated_at = updated_at;
            let post = post.clone();
            Ok(hydrate_job_post(tables, post))
        })??;

        info!(job_post_id = %id, "job post updated");
        Ok(post)
    }

    pub fn delete_job_post(&self, id: JobPostId) -> Result<(), MarketplaceError> {
        self.repository
            .write(|tables| tables.remove_job_post(id))?
            .ok_or(MarketplaceError::NotFound(JOB_POST_NOT_FOUND))?;
        info!(job_post_id = %id, "job post removed");
        Ok(())
    }

    /// Files an application; a caregiver applies to a given post at most once.
    pub fn create_application(
        &self,
        payload: JobApplicationCreatePayload,
    ) -> Result<JobApplication, MarketplaceError> {
        payload.validate()?;
        let created_at = Some(Utc::now());

        let application = self
            .repository
            .write(|tables| -> Result<JobApplication, MarketplaceError> {
                if !tables.job_posts.contains_key(&payload.job_post_id) {
                    return Err(MarketplaceError::NotFound(JOB_POST_NOT_FOUND));
                }
                if !tables.caregivers.contains_key(&payload.caregiver_id) {
                    return Err(MarketplaceError::NotFound(CAREGIVER_NOT_FOUND));
                }
                if tables.application_exists(payload.job_post_id, payload.caregiver_id) {
                    return Err(MarketplaceError::Conflict(APPLICATION_EXISTS));
                }

                let record = JobApplication {
                    id: tables.next_application_id(),
                    job_post_id: payload.job_post_id,
                    caregiver_id: payload.caregiver_id,
                    status: payload.status_or_default(),
                    cover_message: payload.cover_message,
                    created_at,
                    updated_at: None,
                    caregiver: Default::default(),
                };
                tables.applications.insert(record.id, record.clone());
                Ok(hydrate_application(tables, record))
            })?
            .inspect_err(|err| warn!(%err, "application rejected"))?;

        info!(
            application_id = %application.id,
            job_post_id = %application.job_post_id,
            caregiver_id = %application.caregiver_id,
            "application filed"
        );
        Ok(application)
    }

    /// Applications, newest first.
    pub fn list_applications(
        &self,
        query: &ApplicationQuery,
    ) -> Result<Vec<JobApplication>, MarketplaceError> {
        let mut applications: Vec<JobApplication> = self.repository.read(|tables| {
            tables
                .applications
                .values()
                .filter(|application| query.matches(application))
                .map(|application| hydrate_application(tables, application.clone()))
                .collect()
        })?;

        applications.sort_by(|a, b| newest_first((a.created_at, a.id), (b.created_at, b.id)));
        debug!(count = applications.len(), "listed applications");
        Ok(applications)
    }

    pub fn get_application(&self, id: ApplicationId) -> Result<JobApplication, MarketplaceError> {
        self.repository
            .read(|tables| {
                tables
                    .applications
                    .get(&id)
                    .map(|application| hydrate_application(tables, application.clone()))
            })?
            .ok_or(MarketplaceError::NotFound(APPLICATION_NOT_FOUND))
    }

    pub fn update_application(
        &self,
        id: ApplicationId,
        payload: JobApplicationUpdatePayload,
    ) -> Result<JobApplication, MarketplaceError> {
        payload.validate()?;
        let updated_at = Some(Utc::now());

        let application = self.repository.write(|tables| -> Result<JobApplication, MarketplaceError> {
            let application = tables
                .applications
                .get_mut(&id)
                .ok_or(MarketplaceError::NotFound(APPLICATION_NOT_FOUND))?;
            payload.apply_to(application);
            application.updated_at = updated_at;
            let application = application.clone();
            Ok(hydrate_application(tables, application))
        })??;

        info!(application_id = %id, status = %application.status, "application updated");
        Ok(application)
    }

    pub fn delete_application(&self, id: ApplicationId) -> Result<(), MarketplaceError> {
        self.repository
            .write(|tables| tables.applications.remove(&id))?
            .ok_or(MarketplaceError::NotFound(APPLICATION_NOT_FOUND))?;
        info!(application_id = %id, "application withdrawn");
        Ok(())
    }

    pub fn create_appointment(
        &self,
        payload: AppointmentCreatePayload,
    ) -> Result<Appointment, MarketplaceError> {
        payload
            .validate()
            .inspect_err(|err| warn!(%err, "appointment rejected"))?;
        let created_at = Some(Utc::now());

        let appointment = self.repository.write(|tables| -> Result<Appointment, MarketplaceError> {
            if !tables.caregivers.contains_key(&payload.caregiver_id) {
                return Err(MarketplaceError::NotFound(CAREGIVER_NOT_FOUND));
            }
            if !tables.families.contains_key(&payload.family_id) {
                return Err(MarketplaceError::NotFound(FAMILY_NOT_FOUND));
            }

            let record = Appointment {
                id: tables.next_appointment_id(),
                caregiver_id: payload.caregiver_id,
                family_id: payload.family_id,
                appointment_date: payload.appointment_date,
                start_time: payload.start_time,
                duration_hours: payload.duration_hours,
                status: payload.status_or_default(),
                notes: payload.notes,
                created_at,
                updated_at: None,
                caregiver: Default::default(),
                family: Default::default(),
            };
            tables.appointments.insert(record.id, record.clone());
            Ok(hydrate_appointment(tables, record))
        })??;

        info!(
            appointment_id = %appointment.id,
            date = %appointment.appointment_date,
            "appointment booked"
        );
        Ok(appointment)
    }

    /// Appointments, latest date first.
    pub fn list_appointments(
        &self,
        query: &AppointmentQuery,
    ) -> Result<Vec<Appointment>, MarketplaceError> {
        let mut appointments: Vec<Appointment> = self.repository.read(|tables| {
            tables
                .appointments
                .values()
                .filter(|appointment| query.matches(appointment))
                .map(|appointment| hydrate_appointment(tables, appointment.clone()))
                .collect()
        })?;

        appointments.sort_by(|a, b| {
            b.appointment_date
                .cmp(&a.appointment_date)
                .then_with(|| b.start_time.cmp(&a.start_time))
                .then_with(|| b.id.cmp(&a.id))
        });
        debug!(count = appointments.len(), "listed appointments");
        Ok(appointments)
    }

    pub fn get_appointment(&self, id: AppointmentId) -> Result<Appointment, MarketplaceError> {
        self.repository
            .read(|tables| {
                tables
                    .appointments
                    .get(&id)
                    .map(|appointment| hydrate_appointment(tables, appointment.clone()))
            })?
            .ok_or(MarketplaceError::NotFound(APPOINTMENT_NOT_FOUND))
    }

    pub fn update_appointment(
        &self,
        id: AppointmentId,
        payload: AppointmentUpdatePayload,
    ) -> Result<Appointment, MarketplaceError> {
        payload
            .validate()
            .inspect_err(|err| warn!(%err, appointment_id = %id, "appointment update rejected"))?;
        let updated_at = Some(Utc::now());

        let appointment = self.repository.write(|tables| -> Result<Appointment, MarketplaceError> {
            let appointment = tables
                .appointments
                .get_mut(&id)
                .ok_or(MarketplaceError::NotFound(APPOINTMENT_NOT_FOUND))?;
            payload.apply_to(appointment);
            appointment.updated_at = updated_at;
            let appointment = appointment.clone();
            Ok(hydrate_appointment(tables, appointment))
        })??;

        info!(appointment_id = %id, status = %appointment.status, "appointment updated");
        Ok(appointment)
    }

    pub fn delete_appointment(&self, id: AppointmentId) -> Result<(), MarketplaceError> {
        self.repository
            .write(|tables| tables.appointments.remove(&id))?
            .ok_or(MarketplaceError::NotFound(APPOINTMENT_NOT_FOUND))?;
        info!(appointment_id = %id, "appointment cancelled");
        Ok(())
    }

    pub fn send_message(&self, payload: MessageCreatePayload) -> Result<Message, MarketplaceError> {
        let (sender, receiver) = payload
            .participants()
            .inspect_err(|err| warn!(%err, "message rejected"))?;
        let created_at = Some(Utc::now());

        let message = self.repository.write(|tables| -> Result<Message, MarketplaceError> {
            if !tables.participant_exists(sender) {
                return Err(MarketplaceError::NotFound(match sender {
                    Participant::Family(_) => "Sender family not found",
                    Participant::Caregiver(_) => "Sender caregiver not found",
                }));
            }
            if !tables.participant_exists(receiver) {
                return Err(MarketplaceError::NotFound(match receiver {
                    Participant::Family(_) => "Receiver family not found",
                    Participant::Caregiver(_) => "Receiver caregiver not found",
                }));
            }

            let record = Message {
                id: tables.next_message_id(),
                sender_family_id: payload.sender_family_id,
                sender_caregiver_id: payload.sender_caregiver_id,
                receiver_family_id: payload.receiver_family_id,
                receiver_caregiver_id: payload.receiver_caregiver_id,
                content: payload.content,
                created_at,
            };
            tables.messages.insert(record.id, record.clone());
            Ok(record)
        })??;

        info!(message_id = %message.id, "message sent");
        Ok(message)
    }

    /// Conversation history, oldest first.
    pub fn list_messages(&self, query: &MessageQuery) -> Result<Vec<Message>, MarketplaceError> {
        let mut messages: Vec<Message> = self.repository.read(|tables| {
            tables
                .messages
                .values()
                .filter(|message| query.matches(message))
                .cloned()
                .collect()
        })?;

        messages.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
        debug!(count = messages.len(), "listed messages");
        Ok(messages)
    }
}

/// Runs before hashing a new password and again under the write lock.
fn check_caregiver_update(
    tables: &MarketplaceTables,
    id: CaregiverId,
    email: Option<&str>,
) -> Result<(), MarketplaceError> {
    if !tables.caregivers.contains_key(&id) {
        return Err(MarketplaceError::NotFound(CAREGIVER_NOT_FOUND));
    }
    match email {
        Some(email) if tables.caregiver_email_taken(email, Some(id)) => {
            Err(MarketplaceError::Conflict(EMAIL_IN_USE))
        }
        _ => Ok(()),
    }
}

fn check_family_update(
    tables: &MarketplaceTables,
    id: FamilyId,
    email: Option<&str>,
) -> Result<(), MarketplaceError> {
    if !tables.families.contains_key(&id) {
        return Err(MarketplaceError::NotFound(FAMILY_NOT_FOUND));
    }
    match email {
        Some(email) if tables.family_email_taken(email, Some(id)) => {
            Err(MarketplaceError::Conflict(EMAIL_IN_USE))
        }
        _ => Ok(()),
    }
}

fn newest_first<K: Ord>(a: K, b: K) -> Ordering {
    b.cmp(&a)
}

fn hydrate_job_post(tables: &MarketplaceTables, mut post: JobPost) -> JobPost {
    post.family = tables
        .families
        .get(&post.family_id)
        .map(|row| row.record.summary())
        .into();
    post
}

fn hydrate_application(
    tables: &MarketplaceTables,
    mut application: JobApplication,
) -> JobApplication {
    application.caregiver = tables
        .caregivers
        .get(&application.caregiver_id)
        .map(|row| row.record.summary())
        .into();
    application
}

fn hydrate_appointment(tables: &MarketplaceTables, mut appointment: Appointment) -> Appointment {
    appointment.caregiver = tables
        .caregivers
        .get(&appointment.caregiver_id)
        .map(|row| row.record.summary())
        .into();
    appointment.family = tables
        .families
        .get(&appointment.family_id)
        .map(|row| row.record.summary())
        .into();
    appointment
}

/// Error raised by the marketplace service.
#[derive(Debug, thiserror::Error)]
pub enum MarketplaceError {
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{0}")]
    Conflict(&'static str),
    #[error(transparent)]
    Invalid(#[from] PayloadViolation),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Credential(#[from] PasswordError),
}

impl MarketplaceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            MarketplaceError::NotFound(_) => StatusCode::NOT_FOUND,
            MarketplaceError::Conflict(_) => StatusCode::BAD_REQUEST,
            MarketplaceError::Invalid(violation) if violation.concerns_participants() => {
                StatusCode::BAD_REQUEST
            }
            MarketplaceError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
            MarketplaceError::Repository(_) | MarketplaceError::Credential(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
