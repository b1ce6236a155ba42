//! # Clinic Core
//!
//! Core business logic for the campus medical consultation portal.
//!
//! This crate contains pure data operations over the flat-file record store:
//! - The [`Consultation`] lifecycle: pending → completed → paid
//! - Whole-file JSON persistence with atomic replacement
//! - The [`ConsultationService`] operations exposed to the API layer
//!
//! **No API concerns**: HTTP servers, wire request types, and the upstream
//! chat proxy belong in `api-rest`, `api-shared`, and `clinic-chat`.

pub mod config;
pub mod consultation;
pub mod error;
pub mod service;
pub mod store;

pub use config::CoreConfig;
pub use consultation::{
    Consultation, ConsultationStatus, DeliveryDetails, DoctorResponse, PaymentStatus,
};
pub use error::{ConsultationError, ConsultationResult};
pub use service::ConsultationService;
pub use store::ConsultationStore;
