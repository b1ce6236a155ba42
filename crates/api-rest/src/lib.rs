//! # API REST
//!
//! REST API for the campus medical consultation portal.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI documentation
//! - REST-specific concerns (JSON serialization, CORS, error mapping)
//!
//! Uses `api-shared` for wire types and `clinic-core` for data operations.

#![warn(rust_2018_idioms)]

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;

use api_shared::{
    ChatReq, ConfirmPaymentReq, HealthRes, HealthService, MessageRes, RespondReq,
    SubmitConsultationReq,
};
use clinic_chat::{ChatMessage, CompletionClient};
use clinic_core::{
    Consultation, ConsultationError, ConsultationService, ConsultationStatus, DeliveryDetails,
    DoctorResponse, PaymentStatus,
};

/// Application state shared across REST API handlers
///
/// Holds the consultation service for data operations and, when an upstream
/// API key is configured, the completion client for the AI chat endpoint.
#[derive(Clone)]
pub struct AppState {
    pub consultations: ConsultationService,
    pub chat: Option<CompletionClient>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        get_consultations,
        submit_consultation,
        respond,
        confirm_payment,
        chat
    ),
    components(schemas(
        HealthRes,
        MessageRes,
        SubmitConsultationReq,
        RespondReq,
        ConfirmPaymentReq,
        ChatReq,
        ChatMessage,
        Consultation,
        ConsultationStatus,
        PaymentStatus,
        DoctorResponse,
        DeliveryDetails
    ))
)]
pub struct ApiDoc;

/// Builds the portal router over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/get-consultations", get(get_consultations))
        .route("/api/submit-consultation", post(submit_consultation))
        .route("/api/respond/:id", post(respond))
        .route("/api/confirm-payment/:id", post(confirm_payment))
        .route("/api/chat", post(chat))
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

type ApiError = (StatusCode, Json<MessageRes>);

/// Maps a core failure onto the portal's two-message error contract: unknown
/// ids are 404 "Not found", everything else is 500 "Server error". The
/// underlying cause goes to the log only.
fn store_error(err: ConsultationError) -> ApiError {
    match err {
        ConsultationError::NotFound(id) => {
            tracing::warn!(id, "consultation not found");
            (StatusCode::NOT_FOUND, Json(MessageRes::new("Not found")))
        }
        other => {
            tracing::error!(error = %other, "consultation store failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MessageRes::new("Server error")),
            )
        }
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/api/get-consultations",
    responses(
        (status = 200, description = "Full consultation record set, newest first", body = [Consultation]),
        (status = 500, description = "Store unreadable", body = MessageRes)
    )
)]
/// Returns every consultation on record, newest first.
async fn get_consultations(
    State(state): State<AppState>,
) -> Result<Json<Vec<Consultation>>, ApiError> {
    let consultations = state.consultations.list().map_err(store_error)?;
    Ok(Json(consultations))
}

#[utoipa::path(
    post,
    path = "/api/submit-consultation",
    request_body = SubmitConsultationReq,
    responses(
        (status = 201, description = "Consultation recorded", body = MessageRes),
        (status = 500, description = "Store unwritable", body = MessageRes)
    )
)]
/// Accepts a student's symptom report and stores it as a pending record.
///
/// Free-text fields are stored as submitted; no validation is performed.
async fn submit_consultation(
    State(state): State<AppState>,
    Json(req): Json<SubmitConsultationReq>,
) -> Result<(StatusCode, Json<MessageRes>), ApiError> {
    state
        .consultations
        .submit(req.name_input, req.id_input, req.symptoms_input)
        .map_err(store_error)?;

    Ok((
        StatusCode::CREATED,
        Json(MessageRes::new("Consultation received")),
    ))
}

#[utoipa::path(
    post,
    path = "/api/respond/{id}",
    request_body = RespondReq,
    params(("id" = i64, Path, description = "Consultation id")),
    responses(
        (status = 200, description = "Response recorded", body = MessageRes),
        (status = 404, description = "Unknown consultation id", body = MessageRes),
        (status = 500, description = "Store failure", body = MessageRes)
    )
)]
/// Records a doctor's diagnosis, medicine, and fee against a consultation.
async fn respond(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<RespondReq>,
) -> Result<Json<MessageRes>, ApiError> {
    state
        .consultations
        .respond(id, req.diagnosis, req.medicine, req.price)
        .map_err(store_error)?;

    Ok(Json(MessageRes::new("Response submitted")))
}

#[utoipa::path(
    post,
    path = "/api/confirm-payment/{id}",
    request_body = ConfirmPaymentReq,
    params(("id" = i64, Path, description = "Consultation id")),
    responses(
        (status = 200, description = "Payment confirmed", body = MessageRes),
        (status = 404, description = "Unknown consultation id", body = MessageRes),
        (status = 500, description = "Store failure", body = MessageRes)
    )
)]
/// Marks a consultation paid and records where to deliver the medicine.
async fn confirm_payment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<ConfirmPaymentReq>,
) -> Result<Json<MessageRes>, ApiError> {
    let delivery = DeliveryDetails {
        hostel_type: req.hostel_type,
        hostel_block: req.hostel_block,
        room_number: req.room_number,
    };
    state
        .consultations
        .confirm_payment(id, delivery)
        .map_err(store_error)?;

    Ok(Json(MessageRes::new("Payment confirmed")))
}

#[utoipa::path(
    post,
    path = "/api/chat",
    request_body = ChatReq,
    responses(
        (status = 200, description = "Upstream completion payload, relayed verbatim"),
        (status = 500, description = "API key unset or upstream failure", body = MessageRes)
    )
)]
/// Relays the client-held conversation transcript to the upstream completion
/// service, keeping the credential server-side.
async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatReq>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Some(client) = state.chat.as_ref() else {
        tracing::error!("chat request received but no upstream API key is configured");
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(MessageRes::new("Server is not configured with an API key.")),
        ));
    };

    match client.complete(&req.conversation_history).await {
        Ok(payload) => Ok(Json(payload)),
        Err(e) => {
            tracing::error!(error = %e, "upstream chat completion failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MessageRes::new("Error from upstream completion service")),
            ))
        }
    }
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
