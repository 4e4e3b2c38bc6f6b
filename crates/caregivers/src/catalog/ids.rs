use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }
    };
}

entity_id!(
    /// Identifier of a caregiver profile.
    CaregiverId
);
entity_id!(
    /// Identifier of a family member account.
    FamilyId
);
entity_id!(
    /// Identifier of a job post.
    JobPostId
);
entity_id!(
    /// Identifier of a caregiver's application to a job post.
    ApplicationId
);
entity_id!(
    /// Identifier of a scheduled appointment.
    AppointmentId
);
entity_id!(
    /// Identifier of a message.
    MessageId
);
