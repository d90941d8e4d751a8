//! Note domain models.

use cmio_db::queries::notes::{CaseNoteRow, EncounterNoteRow};
use serde::{Deserialize, Serialize};

/// A draft record of an encounter with a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncounterNote {
    pub id: i64,
    pub client_id: i64,
    pub client_name: String,
    pub source_message_id: Option<i64>,
    pub author_id: i64,
    pub author_name: String,
    pub summary: String,
    pub details: String,
    pub note_type: String,
    pub status: NoteStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl EncounterNote {
    /// Create an EncounterNote from a database row.
    pub fn from_row(row: EncounterNoteRow) -> Self {
        Self {
            id: row.id,
            client_id: row.client_id,
            client_name: row.client_name,
            source_message_id: row.source_message_id,
            author_id: row.author_id,
            author_name: row.author_name,
            summary: row.summary,
            details: row.details,
            note_type: row.note_type,
            status: NoteStatus::from_str(&row.status),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// The finalized note produced when an encounter note is approved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseNote {
    pub id: i64,
    pub encounter_note_id: i64,
    pub client_id: i64,
    pub client_name: String,
    pub author_id: i64,
    pub body: String,
    pub finalized_at: String,
}

impl CaseNote {
    pub fn from_row(row: CaseNoteRow) -> Self {
        Self {
            id: row.id,
            encounter_note_id: row.encounter_note_id,
            client_id: row.client_id,
            client_name: row.client_name,
            author_id: row.author_id,
            body: row.body,
            finalized_at: row.finalized_at,
        }
    }
}

/// Encounter note status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteStatus {
    Draft,
    ReadyForApproval,
    Approved,
    Rejected,
}

impl NoteStatus {
    /// Parse from string.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "ready_for_approval" => Self::ReadyForApproval,
            "approved" => Self::Approved,
            "rejected" => Self::Rejected,
            _ => Self::Draft,
        }
    }

    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::ReadyForApproval => "ready_for_approval",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Draft and ready-for-approval notes can still change.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Draft | Self::ReadyForApproval)
    }

    /// Check if transition to another status is valid.
    pub fn can_transition_to(&self, to: &Self) -> bool {
        match (self, to) {
            (Self::Draft, Self::ReadyForApproval) => true,
            // Promotion straight from draft is allowed
            (Self::Draft, Self::Approved) => true,
            (Self::ReadyForApproval, Self::Approved) => true,
            (from, Self::Rejected) => from.is_active(),
            _ => false,
        }
    }

    /// Statuses a note may be in to move to `to`.
    pub fn sources_for(to: &Self) -> Vec<&'static str> {
        [Self::Draft, Self::ReadyForApproval, Self::Approved, Self::Rejected]
            .iter()
            .filter(|from| from.can_transition_to(to))
            .map(|from| from.as_str())
            .collect()
    }
}
