//! Wire catalog shared by the client and the marketplace API.
//!
//! Each entity has a full record as served by the API, a create payload, and (where the API
//! accepts partial edits) an update payload. The payloads are spelled out as their own types
//! rather than derived from the record, so the contract reads directly from the definitions.

pub mod application;
pub mod appointment;
pub mod caregiver;
pub mod embedded;
pub mod family;
pub mod ids;
pub mod job_post;
pub mod message;
pub mod validation;
mod wire;

pub use application::{
    JobApplication, JobApplicationCreatePayload, JobApplicationUpdatePayload,
    DEFAULT_APPLICATION_STATUS,
};
pub use appointment::{
    Appointment, AppointmentCreatePayload, AppointmentUpdatePayload, DEFAULT_APPOINTMENT_STATUS,
};
pub use caregiver::{Caregiver, CaregiverCreatePayload, CaregiverSummary, CaregiverUpdatePayload};
pub use embedded::Embedded;
pub use family::{FamilyMember, FamilyMemberCreatePayload, FamilyMemberUpdatePayload, FamilySummary};
pub use ids::{ApplicationId, AppointmentId, CaregiverId, FamilyId, JobPostId, MessageId};
pub use job_post::{JobPost, JobPostCreatePayload, JobPostUpdatePayload};
pub use message::{Message, MessageCreatePayload, Participant};
pub use validation::{PayloadViolation, Validate};
