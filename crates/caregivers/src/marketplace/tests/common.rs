use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::response::Response;
use chrono::{NaiveDate, NaiveTime};
use serde_json::Value;

use crate::catalog::{
    AppointmentCreatePayload, CaregiverCreatePayload, CaregiverId, FamilyId,
    FamilyMemberCreatePayload, JobApplicationCreatePayload, JobPostCreatePayload, JobPostId,
};
use crate::marketplace::repository::{
    InMemoryMarketplace, MarketplaceRepository, MarketplaceTables, RepositoryError,
};
use crate::marketplace::{marketplace_router, MarketplaceService};

pub(super) fn caregiver_payload(first_name: &str, email: &str) -> CaregiverCreatePayload {
    CaregiverCreatePayload {
        first_name: first_name.to_string(),
        last_name: "Zhan".to_string(),
        caregiver_type: "Elderly Care".to_string(),
        gender: Some("Female".to_string()),
        photo_url: None,
        email: email.to_string(),
        phone: "+77772345678".to_string(),
        city: "Astana".to_string(),
        hourly_rate: 12.0,
        bio: Some("Experienced nurse specialized in elder care".to_string()),
        password: "hashed_pw_dana".to_string(),
    }
}

pub(super) fn family_payload(last_name: &str, email: &str) -> FamilyMemberCreatePayload {
    FamilyMemberCreatePayload {
        first_name: "Amina".to_string(),
        last_name: last_name.to_string(),
        email: email.to_string(),
        phone: "+77770000001".to_string(),
        city: "Astana".to_string(),
        address: Some("45 Kabanbay Batyr Street".to_string()),
        care_recipient_info: Some("Daughter, 4 years old".to_string()),
        house_rules: Some("No pets, quiet after 21:00".to_string()),
        password: "hashed_pw_amina".to_string(),
    }
}

pub(super) fn job_post_payload(family_id: FamilyId, title: &str) -> JobPostCreatePayload {
    JobPostCreatePayload {
        family_id,
        title: title.to_string(),
        caregiver_type: "Babysitter".to_string(),
        city: "Astana".to_string(),
        care_recipient_age: Some(4),
        description: Some("Need help with evening routine for preschooler".to_string()),
        preferred_time_slots: vec!["Weekdays 18:00-21:00".to_string()],
        frequency: Some("Weekdays".to_string()),
        requirements: Some("Energetic, soft-spoken, patient".to_string()),
    }
}

pub(super) fn application_payload(
    job_post_id: JobPostId,
    caregiver_id: CaregiverId,
) -> JobApplicationCreatePayload {
    JobApplicationCreatePayload {
        job_post_id,
        caregiver_id,
        cover_message: Some("Weekend availability and Montessori training.".to_string()),
        status: None,
    }
}

pub(super) fn appointment_payload(
    caregiver_id: CaregiverId,
    family_id: FamilyId,
    day: u32,
) -> AppointmentCreatePayload {
    AppointmentCreatePayload {
        caregiver_id,
        family_id,
        appointment_date: NaiveDate::from_ymd_opt(2025, 11, day).expect("valid date"),
        start_time: NaiveTime::from_hms_opt(9, 0, 0).expect("valid time"),
        duration_hours: 3.0,
        status: None,
        notes: None,
    }
}

pub(super) fn build_service() -> (
    MarketplaceService<InMemoryMarketplace>,
    Arc<InMemoryMarketplace>,
) {
    let repository = Arc::new(InMemoryMarketplace::default());
    let service = MarketplaceService::new(repository.clone());
    (service, repository)
}

pub(super) fn router_with_service(service: MarketplaceService<InMemoryMarketplace>) -> axum::Router {
    marketplace_router(Arc::new(service))
}

pub(super) struct UnavailableRepository;

impl MarketplaceRepository for UnavailableRepository {
    fn read<T>(&self, _op: impl FnOnce(&MarketplaceTables) -> T) -> Result<T, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn write<T>(
        &self,
        _op: impl FnOnce(&mut MarketplaceTables) -> T,
    ) -> Result<T, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// In-memory tables that count how many write locks were taken.
#[derive(Default)]
pub(super) struct WriteCountingRepository {
    inner: InMemoryMarketplace,
    writes: AtomicUsize,
}

impl WriteCountingRepository {
    pub(super) fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl MarketplaceRepository for WriteCountingRepository {
    fn read<T>(&self, op: impl FnOnce(&MarketplaceTables) -> T) -> Result<T, RepositoryError> {
        self.inner.read(op)
    }

    fn write<T>(
        &self,
        op: impl FnOnce(&mut MarketplaceTables) -> T,
    ) -> Result<T, RepositoryError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.write(op)
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
