use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;

use super::extract::{Filters, Payload, RecordId};
use super::filters::{
    AppointmentQuery, ApplicationQuery, CaregiverQuery, JobPostQuery, MessageQuery,
};
use super::repository::MarketplaceRepository;
use super::service::{MarketplaceError, MarketplaceService};
use crate::catalog::{
    ApplicationId, AppointmentCreatePayload, AppointmentId, AppointmentUpdatePayload,
    CaregiverCreatePayload, CaregiverId, CaregiverUpdatePayload, FamilyId,
    FamilyMemberCreatePayload, FamilyMemberUpdatePayload, JobApplicationCreatePayload,
    JobApplicationUpdatePayload, JobPostCreatePayload, JobPostId, JobPostUpdatePayload,
    MessageCreatePayload,
};

type Shared<R> = State<Arc<MarketplaceService<R>>>;

/// Router builder exposing the marketplace resources.
pub fn marketplace_router<R>(service: Arc<MarketplaceService<R>>) -> Router
where
    R: MarketplaceRepository + 'static,
{
    Router::new()
        .route(
            "/caregivers",
            post(create_caregiver_handler::<R>).get(list_caregivers_handler::<R>),
        )
        .route(
            "/caregivers/:caregiver_id",
            get(get_caregiver_handler::<R>)
                .patch(update_caregiver_handler::<R>)
                .delete(delete_caregiver_handler::<R>),
        )
        .route(
            "/families",
            post(create_family_handler::<R>).get(list_families_handler::<R>),
        )
        .route(
            "/families/:family_id",
            get(get_family_handler::<R>)
                .patch(update_family_handler::<R>)
                .delete(delete_family_handler::<R>),
        )
        .route(
            "/job-posts",
            post(create_job_post_handler::<R>).get(list_job_posts_handler::<R>),
        )
        .route(
            "/job-posts/:job_post_id",
            get(get_job_post_handler::<R>)
                .patch(update_job_post_handler::<R>)
                .delete(delete_job_post_handler::<R>),
        )
        .route(
            "/applications",
            post(create_application_handler::<R>).get(list_applications_handler::<R>),
        )
        .route(
            "/applications/:application_id",
            get(get_application_handler::<R>)
                .patch(update_application_handler::<R>)
                .delete(delete_application_handler::<R>),
        )
        .route(
            "/appointments",
            post(create_appointment_handler::<R>).get(list_appointments_handler::<R>),
        )
        .route(
            "/appointments/:appointment_id",
            get(get_appointment_handler::<R>)
                .patch(update_appointment_handler::<R>)
                .delete(delete_appointment_handler::<R>),
        )
        .route(
            "/messages",
            post(send_message_handler::<R>).get(list_messages_handler::<R>),
        )
        .with_state(service)
}

fn respond<T: Serialize>(status: StatusCode, result: Result<T, MarketplaceError>) -> Response {
    match result {
        Ok(body) => (status, Json(body)).into_response(),
        Err(err) => error_response(err),
    }
}

fn respond_empty(result: Result<(), MarketplaceError>) -> Response {
    match result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) fn error_response(err: MarketplaceError) -> Response {
    detail_response(err.status_code(), err.to_string())
}

pub(crate) fn detail_response(status: StatusCode, detail: String) -> Response {
    (status, Json(json!({ "detail": detail }))).into_response()
}

pub(crate) async fn create_caregiver_handler<R>(
    State(service): Shared<R>,
    Payload(payload): Payload<CaregiverCreatePayload>,
) -> Response
where
    R: MarketplaceRepository + 'static,
{
    respond(StatusCode::CREATED, service.create_caregiver(payload))
}

pub(crate) async fn list_caregivers_handler<R>(
    State(service): Shared<R>,
    Filters(query): Filters<CaregiverQuery>,
) -> Response
where
    R: MarketplaceRepository + 'static,
{
    respond(StatusCode::OK, service.list_caregivers(&query))
}

pub(crate) async fn get_caregiver_handler<R>(
    State(service): Shared<R>,
    RecordId(caregiver_id): RecordId<u64>,
) -> Response
where
    R: MarketplaceRepository + 'static,
{
    respond(StatusCode::OK, service.get_caregiver(CaregiverId(caregiver_id)))
}

pub(crate) async fn update_caregiver_handler<R>(
    State(service): Shared<R>,
    RecordId(caregiver_id): RecordId<u64>,
    Payload(payload): Payload<CaregiverUpdatePayload>,
) -> Response
where
    R: MarketplaceRepository + 'static,
{
    respond(
        StatusCode::OK,
        service.update_caregiver(CaregiverId(caregiver_id), payload),
    )
}

pub(crate) async fn delete_caregiver_handler<R>(
    State(service): Shared<R>,
    RecordId(caregiver_id): RecordId<u64>,
) -> Response
where
    R: MarketplaceRepository + 'static,
{
    respond_empty(service.delete_caregiver(CaregiverId(caregiver_id)))
}

pub(crate) async fn create_family_handler<R>(
    State(service): Shared<R>,
    Payload(payload): Payload<FamilyMemberCreatePayload>,
) -> Response
where
    R: MarketplaceRepository + 'static,
{
    respond(StatusCode::CREATED, service.create_family(payload))
}

pub(crate) async fn list_families_handler<R>(State(service): Shared<R>) -> Response
where
    R: MarketplaceRepository + 'static,
{
    respond(StatusCode::OK, service.list_families())
}

pub(crate) async fn get_family_handler<R>(
    State(service): Shared<R>,
    RecordId(family_id): RecordId<u64>,
) -> Response
where
    R: MarketplaceRepository + 'static,
{
    respond(StatusCode::OK, service.get_family(FamilyId(family_id)))
}

pub(crate) async fn update_family_handler<R>(
    State(service): Shared<R>,
    RecordId(family_id): RecordId<u64>,
    Payload(payload): Payload<FamilyMemberUpdatePayload>,
) -> Response
where
    R: MarketplaceRepository + 'static,
{
    respond(
        StatusCode::OK,
        service.update_family(FamilyId(family_id), payload),
    )
}

pub(crate) async fn delete_family_handler<R>(
    State(service): Shared<R>,
    RecordId(family_id): RecordId<u64>,
) -> Response
where
    R: MarketplaceRepository + 'static,
{
    respond_empty(service.delete_family(FamilyId(family_id)))
}

pub(crate) async fn create_job_post_handler<R>(
    State(service): Shared<R>,
    Payload(payload): Payload<JobPostCreatePayload>,
) -> Response
where
    R: MarketplaceRepository + 'static,
{
    respond(StatusCode::CREATED, service.create_job_post(payload))
}

pub(crate) async fn list_job_posts_handler<R>(
    State(service): Shared<R>,
    Filters(query): Filters<JobPostQuery>,
) -> Response
where
    R: MarketplaceRepository + 'static,
{
    respond(StatusCode::OK, service.list_job_posts(&query))
}

pub(crate) async fn get_job_post_handler<R>(
    State(service): Shared<R>,
    RecordId(job_post_id): RecordId<u64>,
) -> Response
where
    R: MarketplaceRepository + 'static,
{
    respond(StatusCode::OK, service.get_job_post(JobPostId(job_post_id)))
}

pub(crate) async fn update_job_post_handler<R>(
    State(service): Shared<R>,
    RecordId(job_post_id): RecordId<u64>,
    Payload(payload): Payload<JobPostUpdatePayload>,
) -> Response
where
    R: MarketplaceRepository + 'static,
{
    respond(
        StatusCode::OK,
        service.update_job_post(JobPostId(job_post_id), payload),
    )
}

pub(crate) async fn delete_job_post_handler<R>(
    State(service): Shared<R>,
    RecordId(job_post_id): RecordId<u64>,
) -> Response
where
    R: MarketplaceRepository + 'static,
{
    respond_empty(service.delete_job_post(JobPostId(job_post_id)))
}

pub(crate) async fn create_application_handler<R>(
    State(service): Shared<R>,
    Payload(payload): Payload<JobApplicationCreatePayload>,
) -> Response
where
    R: MarketplaceRepository + 'static,
{
    respond(StatusCode::CREATED, service.create_application(payload))
}

pub(crate) async fn list_applications_handler<R>(
    State(service): Shared<R>,
    Filters(query): Filters<ApplicationQuery>,
) -> Response
where
    R: MarketplaceRepository + 'static,
{
    respond(StatusCode::OK, service.list_applications(&query))
}

pub(crate) async fn get_application_handler<R>(
    State(service): Shared<R>,
    RecordId(application_id): RecordId<u64>,
) -> Response
where
    R: MarketplaceRepository + 'static,
{
    respond(
        StatusCode::OK,
        service.get_application(ApplicationId(application_id)),
    )
}

pub(crate) async fn update_application_handler<R>(
    State(service): Shared<R>,
    RecordId(application_id): RecordId<u64>,
    Payload(payload): Payload<JobApplicationUpdatePayload>,
) -> Response
where
    R: MarketplaceRepository + 'static,
{
    respond(
        StatusCode::OK,
        service.update_application(ApplicationId(application_id), payload),
    )
}

pub(crate) async fn delete_application_handler<R>(
    State(service): Shared<R>,
    RecordId(application_id): RecordId<u64>,
) -> Response
where
    R: MarketplaceRepository + 'static,
{
    respond_empty(service.delete_application(ApplicationId(application_id)))
}

pub(crate) async fn create_appointment_handler<R>(
    State(service): Shared<R>,
    Payload(payload): Payload<AppointmentCreatePayload>,
) -> Response
where
    R: MarketplaceRepository + 'static,
{
    respond(StatusCode::CREATED, service.create_appointment(payload))
}

pub(crate) async fn list_appointments_handler<R>(
    State(service): Shared<R>,
    Filters(query): Filters<AppointmentQuery>,
) -> Response
where
    R: MarketplaceRepository + 'static,
{
    respond(StatusCode::OK, service.list_appointments(&query))
}

pub(crate) async fn get_appointment_handler<R>(
    State(service): Shared<R>,
    RecordId(appointment_id): RecordId<u64>,
) -> Response
where
    R: MarketplaceRepository + 'static,
{
    respond(
        StatusCode::OK,
        service.get_appointment(AppointmentId(appointment_id)),
    )
}

pub(crate) async fn update_appointment_handler<R>(
    State(service): Shared<R>,
    RecordId(appointment_id): RecordId<u64>,
    Payload(payload): Payload<AppointmentUpdatePayload>,
) -> Response
where
    R: MarketplaceRepository + 'static,
{
    respond(
        StatusCode::OK,
        service.update_appointment(AppointmentId(appointment_id), payload),
    )
}

pub(crate) async fn delete_appointment_handler<R>(
    State(service): Shared<R>,
    RecordId(appointment_id): RecordId<u64>,
) -> Response
where
    R: MarketplaceRepository + 'static,
{
    respond_empty(service.delete_appointment(AppointmentId(appointment_id)))
}

pub(crate) async fn send_message_handler<R>(
    State(service): Shared<R>,
    Payload(payload): Payload<MessageCreatePayload>,
) -> Response
where
    R: MarketplaceRepository + 'static,
{
    respond(StatusCode::CREATED, service.send_message(payload))
}

pub(crate) async fn list_messages_handler<R>(
    State(service): Shared<R>,
    Filters(query): Filters<MessageQuery>,
) -> Response
where
    R: MarketplaceRepository + 'static,
{
    respond(StatusCode::OK, service.list_messages(&query))
}
