//! Fact domain models.

use cmio_db::queries::facts::{ClientFactRow, PendingFactRow};
use serde::{Deserialize, Serialize};

/// A fact extracted from a message, waiting for staff review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingFact {
    pub id: i64,
    pub client_id: i64,
    pub client_name: String,
    pub source_message_id: i64,
    pub fact_type: String,
    pub value: String,
    pub security: SecurityRating,
    pub status: FactStatus,
    pub created_at: String,
    pub reviewed_at: Option<String>,
    pub reviewer_id: Option<i64>,
}

impl PendingFact {
    /// Create a PendingFact from a database row.
    pub fn from_row(row: PendingFactRow) -> Self {
        Self {
            id: row.id,
            client_id: row.client_id,
            client_name: row.client_name,
            source_message_id: row.source_message_id,
            fact_type: row.fact_type,
            value: row.fact_value,
            security: SecurityRating::from_str(&row.security_rating),
            status: FactStatus::from_str(&row.status),
            created_at: row.created_at,
            reviewed_at: row.reviewed_at,
            reviewer_id: row.reviewer_id,
        }
    }
}

/// A reviewed fact recorded against a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientFact {
    pub id: i64,
    pub client_id: i64,
    pub pending_fact_id: Option<i64>,
    pub fact_type: String,
    pub value: String,
    pub security: SecurityRating,
    pub approved_at: String,
    pub approved_by_id: i64,
}

impl ClientFact {
    pub fn from_row(row: ClientFactRow) -> Self {
        Self {
            id: row.id,
            client_id: row.client_id,
            pending_fact_id: row.pending_fact_id,
            fact_type: row.fact_type,
            value: row.fact_value,
            security: SecurityRating::from_str(&row.security_rating),
            approved_at: row.approved_at,
            approved_by_id: row.approved_by_id,
        }
    }
}

/// Who may see a fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityRating {
    Shared,
    Sensitive,
    Private,
}

impl SecurityRating {
    /// Parse from string. Anything unrecognized is treated as private.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "shared" => Self::Shared,
            "sensitive" => Self::Sensitive,
            _ => Self::Private,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shared => "shared",
            Self::Sensitive => "sensitive",
            Self::Private => "private",
        }
    }
}

/// Review status of a pending fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactStatus {
    Pending,
    Approved,
    Rejected,
}

impl FactStatus {
    /// Parse from string.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "approved" => Self::Approved,
            "rejected" => Self::Rejected,
            _ => Self::Pending,
        }
    }

    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Approved and rejected are final.
    pub fn can_transition_to(&self, to: &Self) -> bool {
        matches!(
            (self, to),
            (Self::Pending, Self::Approved) | (Self::Pending, Self::Rejected)
        )
    }
}

/// Action a reviewer takes on a pending fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewAction {
    Approve,
    Reject,
}

impl ReviewAction {
    /// Parse the action token from a review URL. Unknown tokens yield `None`.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "approve" => Some(Self::Approve),
            "reject" => Some(Self::Reject),
            _ => None,
        }
    }

    /// Status the fact ends up in.
    pub fn target_status(&self) -> FactStatus {
        match self {
            Self::Approve => FactStatus::Approved,
            Self::Reject => FactStatus::Rejected,
        }
    }
}
