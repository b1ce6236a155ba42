//! Consultation service and lifecycle operations.
//!
//! Every mutating operation is one load → mutate → save cycle over the whole
//! record set. The cycles are serialized through a process-wide lock so that
//! overlapping requests cannot interleave their read-modify-write windows and
//! silently drop each other's updates.

use crate::config::CoreConfig;
use crate::consultation::{Consultation, DeliveryDetails};
use crate::error::{ConsultationError, ConsultationResult};
use crate::store::ConsultationStore;
use std::sync::{Arc, Mutex, MutexGuard};

/// Pure consultation data operations - no API concerns
#[derive(Clone)]
pub struct ConsultationService {
    store: Arc<ConsultationStore>,
    lock: Arc<Mutex<()>>,
}

impl ConsultationService {
    /// Creates a service over the store configured in `cfg`.
    pub fn new(cfg: &CoreConfig) -> Self {
        Self::with_store(ConsultationStore::new(cfg.data_file()))
    }

    /// Creates a service over an explicit store, mainly for tests.
    pub fn with_store(store: ConsultationStore) -> Self {
        Self {
            store: Arc::new(store),
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Appends a new pending consultation at the head of the record set.
    ///
    /// Free-text fields are stored exactly as submitted; empty strings are
    /// accepted.
    pub fn submit(
        &self,
        student_name: String,
        student_id: String,
        symptoms: String,
    ) -> ConsultationResult<Consultation> {
        let _guard = self.acquire()?;

        let consultation = Consultation::new(student_name, student_id, symptoms);
        tracing::info!(id = consultation.id, "consultation submitted");

        let mut records = self.store.load()?;
        records.insert(0, consultation.clone());
        self.store.save(&records)?;

        Ok(consultation)
    }

    /// Returns the full record set verbatim, newest first.
    pub fn list(&self) -> ConsultationResult<Vec<Consultation>> {
        let _guard = self.acquire()?;
        self.store.load()
    }

    /// Records a doctor's response against the consultation with `id`.
    ///
    /// Fails with [`ConsultationError::NotFound`] when the id is unknown, in
    /// which case the store is left untouched.
    pub fn respond(
        &self,
        id: i64,
        diagnosis: String,
        medicine: String,
        price: f64,
    ) -> ConsultationResult<Consultation> {
        let _guard = self.acquire()?;

        let mut records = self.store.load()?;
        let consultation = records
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(ConsultationError::NotFound(id))?;

        consultation.record_response(diagnosis, medicine, price);
        let updated = consultation.clone();
        tracing::info!(id, "doctor response recorded");

        self.store.save(&records)?;
        Ok(updated)
    }

    /// Confirms payment for the consultation with `id` and attaches the
    /// delivery details.
    ///
    /// Fails with [`ConsultationError::NotFound`] when the id is unknown, in
    /// which case the store is left untouched.
    pub fn confirm_payment(
        &self,
        id: i64,
        delivery_details: DeliveryDetails,
    ) -> ConsultationResult<Consultation> {
        let _guard = self.acquire()?;

        let mut records = self.store.load()?;
        let consultation = records
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(ConsultationError::NotFound(id))?;

        consultation.record_payment(delivery_details);
        let updated = consultation.clone();
        tracing::info!(id, "payment confirmed");

        self.store.save(&records)?;
        Ok(updated)
    }

    fn acquire(&self) -> ConsultationResult<MutexGuard<'_, ()>> {
        self.lock.lock().map_err(|_| ConsultationError::LockPoisoned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consultation::{ConsultationStatus, PaymentStatus};
    use std::fs;
    use tempfile::TempDir;

    fn service_in(dir: &TempDir) -> ConsultationService {
        ConsultationService::with_store(ConsultationStore::new(
            dir.path().join("consultations.json"),
        ))
    }

    fn delivery() -> DeliveryDetails {
        DeliveryDetails {
            hostel_type: "boys".into(),
            hostel_block: "B2".into(),
            room_number: "101".into(),
        }
    }

    #[test]
    fn submit_adds_exactly_one_pending_record() {
        let dir = TempDir::new().unwrap();
        let service = service_in(&dir);

        service
            .submit("A".into(), "1".into(), "fever".into())
            .unwrap();

        let records = service.list().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, ConsultationStatus::Pending);
        assert_eq!(records[0].student_name, "A");
        assert_eq!(records[0].student_id, "1");
        assert_eq!(records[0].symptoms, "fever");
    }

    #[test]
    fn newest_submission_is_listed_first() {
        let dir = TempDir::new().unwrap();
        let service = service_in(&dir);

        let first = service
            .submit("A".into(), "1".into(), "fever".into())
            .unwrap();
        let second = service
            .submit("B".into(), "2".into(), "cough".into())
            .unwrap();

        let records = service.list().unwrap();
        assert_eq!(records[0].id, second.id);
        assert_eq!(records[1].id, first.id);
    }

    #[test]
    fn empty_free_text_is_accepted_verbatim() {
        let dir = TempDir::new().unwrap();
        let service = service_in(&dir);

        service.submit(String::new(), String::new(), String::new()).unwrap();

        assert_eq!(service.list().unwrap()[0].student_name, "");
    }

    #[test]
    fn respond_transitions_a_pending_record() {
        let dir = TempDir::new().unwrap();
        let service = service_in(&dir);
        let submitted = service
            .submit("A".into(), "1".into(), "fever".into())
            .unwrap();

        let updated = service
            .respond(submitted.id, "flu".into(), "paracetamol".into(), 50.0)
            .unwrap();

        assert_eq!(updated.status, ConsultationStatus::Completed);
        assert_eq!(updated.payment_status, PaymentStatus::Pending);
        assert!(updated.response.is_some());

        // The transition is durable, not just in the returned copy.
        let listed = service.list().unwrap();
        assert_eq!(listed[0].status, ConsultationStatus::Completed);
    }

    #[test]
    fn respond_overwrites_an_existing_response() {
        let dir = TempDir::new().unwrap();
        let service = service_in(&dir);
        let submitted = service
            .submit("A".into(), "1".into(), "fever".into())
            .unwrap();

        service
            .respond(submitted.id, "flu".into(), "paracetamol".into(), 50.0)
            .unwrap();
        let updated = service
            .respond(submitted.id, "sinusitis".into(), "cetirizine".into(), 80.0)
            .unwrap();

        let response = updated.response.unwrap();
        assert_eq!(response.diagnosis, "sinusitis");
        assert_eq!(response.price, 80.0);
    }

    #[test]
    fn confirm_payment_marks_record_paid_with_delivery_details() {
        let dir = TempDir::new().unwrap();
        let service = service_in(&dir);
        let submitted = service
            .submit("A".into(), "1".into(), "fever".into())
            .unwrap();
        service
            .respond(submitted.id, "flu".into(), "paracetamol".into(), 50.0)
            .unwrap();

        let updated = service.confirm_payment(submitted.id, delivery()).unwrap();

        assert_eq!(updated.payment_status, PaymentStatus::Paid);
        assert_eq!(
            updated.delivery_details.unwrap().hostel_block,
            "B2"
        );
    }

    #[test]
    fn unknown_id_fails_and_leaves_the_store_unchanged() {
        let dir = TempDir::new().unwrap();
        let service = service_in(&dir);
        service
            .submit("A".into(), "1".into(), "fever".into())
            .unwrap();

        let before = fs::read_to_string(dir.path().join("consultations.json")).unwrap();

        assert!(matches!(
            service.respond(42, "flu".into(), "paracetamol".into(), 50.0),
            Err(ConsultationError::NotFound(42))
        ));
        assert!(matches!(
            service.confirm_payment(42, delivery()),
            Err(ConsultationError::NotFound(42))
        ));

        let after = fs::read_to_string(dir.path().join("consultations.json")).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn full_lifecycle_is_reflected_by_listing_after_each_step() {
        let dir = TempDir::new().unwrap();
        let service = service_in(&dir);

        let submitted = service
            .submit("A".into(), "1".into(), "fever".into())
            .unwrap();
        assert_eq!(service.list().unwrap()[0].status, ConsultationStatus::Pending);

        service
            .respond(submitted.id, "flu".into(), "paracetamol".into(), 50.0)
            .unwrap();
        let listed = service.list().unwrap();
        assert_eq!(listed[0].payment_status, PaymentStatus::Pending);
        assert_eq!(listed[0].response.as_ref().unwrap().diagnosis, "flu");

        service.confirm_payment(submitted.id, delivery()).unwrap();
        let listed = service.list().unwrap();
        assert_eq!(listed[0].payment_status, PaymentStatus::Paid);
        assert_eq!(
            listed[0].delivery_details.as_ref().unwrap().room_number,
            "101"
        );
    }
}
