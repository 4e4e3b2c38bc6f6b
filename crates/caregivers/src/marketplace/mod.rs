//! Marketplace API: caregivers, families, the job board, applications, appointments, and
//! messages, served over the catalog's wire shapes.

mod extract;
pub mod filters;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use filters::{AppointmentQuery, ApplicationQuery, CaregiverQuery, JobPostQuery, MessageQuery};
pub use repository::{
    CaregiverRow, FamilyRow, InMemoryMarketplace, MarketplaceRepository, MarketplaceTables,
    RepositoryError,
};
pub use router::marketplace_router;
pub use service::{MarketplaceError, MarketplaceService};
