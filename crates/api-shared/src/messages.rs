//! Request and response bodies for the consultation endpoints.
//!
//! Field names carry serde renames where the established wire contract uses
//! form-derived names (`nameInput`, `IdInput`, `symptomsInput`) or camelCase.
//! Changing them would break every deployed client, so they are preserved
//! verbatim.

use clinic_chat::ChatMessage;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `POST /api/submit-consultation`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmitConsultationReq {
    #[serde(rename = "nameInput")]
    pub name_input: String,
    #[serde(rename = "IdInput")]
    pub id_input: String,
    #[serde(rename = "symptomsInput")]
    pub symptoms_input: String,
}

/// Body of `POST /api/respond/:id`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RespondReq {
    pub diagnosis: String,
    pub medicine: String,
    pub price: f64,
}

/// Body of `POST /api/confirm-payment/:id`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmPaymentReq {
    pub hostel_type: String,
    pub hostel_block: String,
    pub room_number: String,
}

/// Body of `POST /api/chat`: the client-held conversation transcript.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatReq {
    #[serde(rename = "conversationHistory")]
    pub conversation_history: Vec<ChatMessage>,
}

/// Generic outcome message returned by the mutating endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageRes {
    pub message: String,
}

impl MessageRes {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
