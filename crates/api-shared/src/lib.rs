//! # API Shared
//!
//! Shared wire types and utilities for the clinic portal APIs.
//!
//! Contains:
//! - Request/response bodies for the REST endpoints (`messages` module)
//! - The shared `HealthService`
//!
//! Used by `api-rest` (deserializing requests) and `clinic-cli` (serializing
//! them), so the implicit wire contract lives in exactly one place.

pub mod health;
pub mod messages;

pub use health::{HealthRes, HealthService};
pub use messages::{
    ChatReq, ConfirmPaymentReq, MessageRes, RespondReq, SubmitConsultationReq,
};
