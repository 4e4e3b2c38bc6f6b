use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{CaregiverId, FamilyId, MessageId};
use super::validation::{PayloadViolation, Validate};

/// One side of a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Participant {
    Family(FamilyId),
    Caregiver(CaregiverId),
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Sender,
    Receiver,
}

impl Side {
    fn missing(self) -> PayloadViolation {
        match self {
            Side::Sender => PayloadViolation::MissingSender,
            Side::Receiver => PayloadViolation::MissingReceiver,
        }
    }

    fn ambiguous(self) -> PayloadViolation {
        match self {
            Side::Sender => PayloadViolation::AmbiguousSender,
            Side::Receiver => PayloadViolation::AmbiguousReceiver,
        }
    }
}

impl Participant {
    /// Reads one side of a message from its family and caregiver columns.
    fn from_columns(
        side: Side,
        family: Option<FamilyId>,
        caregiver: Option<CaregiverId>,
    ) -> Result<Self, PayloadViolation> {
        match (family, caregiver) {
            (Some(id), None) => Ok(Participant::Family(id)),
            (None, Some(id)) => Ok(Participant::Caregiver(id)),
            (None, None) => Err(side.missing()),
            (Some(_), Some(_)) => Err(side.ambiguous()),
        }
    }

    fn into_sides(self) -> (Option<FamilyId>, Option<CaregiverId>) {
        match self {
            Participant::Family(id) => (Some(id), None),
            Participant::Caregiver(id) => (None, Some(id)),
        }
    }
}

/// A direct message between a family and a caregiver (or two of either).
///
/// The wire keeps four nullable columns; [`Message::sender`] and [`Message::receiver`] read them
/// as participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    #[serde(default)]
    pub sender_family_id: Option<FamilyId>,
    #[serde(default)]
    pub sender_caregiver_id: Option<CaregiverId>,
    #[serde(default)]
    pub receiver_family_id: Option<FamilyId>,
    #[serde(default)]
    pub receiver_caregiver_id: Option<CaregiverId>,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Message {
    /// `None` when the record does not name exactly one sender.
    pub fn sender(&self) -> Option<Participant> {
        Participant::from_columns(Side::Sender, self.sender_family_id, self.sender_caregiver_id)
            .ok()
    }

    /// `None` when the record does not name exactly one receiver.
    pub fn receiver(&self) -> Option<Participant> {
        Participant::from_columns(
            Side::Receiver,
            self.receiver_family_id,
            self.receiver_caregiver_id,
        )
        .ok()
    }

    pub fn involves(&self, participant: Participant) -> bool {
        self.sender() == Some(participant) || self.receiver() == Some(participant)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageCreatePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_family_id: Option<FamilyId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_caregiver_id: Option<CaregiverId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver_family_id: Option<FamilyId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver_caregiver_id: Option<CaregiverId>,
    pub content: String,
}

impl MessageCreatePayload {
    pub fn new(sender: Participant, receiver: Participant, content: impl Into<String>) -> Self {
        let (sender_family_id, sender_caregiver_id) = sender.into_sides();
        let (receiver_family_id, receiver_caregiver_id) = receiver.into_sides();
        Self {
            sender_family_id,
            sender_caregiver_id,
            receiver_family_id,
            receiver_caregiver_id,
            content: content.into(),
        }
    }

    /// Both participants, once the payload names exactly one of each.
    pub fn participants(&self) -> Result<(Participant, Participant), PayloadViolation> {
        let sender =
            Participant::from_columns(Side::Sender, self.sender_family_id, self.sender_caregiver_id)?;
        let receiver = Participant::from_columns(
            Side::Receiver,
            self.receiver_family_id,
            self.receiver_caregiver_id,
        )?;
        Ok((sender, receiver))
    }
}

impl Validate for MessageCreatePayload {
    fn validate(&self) -> Result<(), PayloadViolation> {
        self.participants().map(|_| ())
    }
}
