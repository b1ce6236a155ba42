//! Consultation record and its lifecycle.
//!
//! A [`Consultation`] moves strictly forward through three stages: it is
//! submitted by a student (`pending`), answered by a doctor (`completed`,
//! payment `pending`), and finally paid for with delivery details attached
//! (`paid`). There is no deletion, update, or rollback path.
//!
//! Records serialize in camelCase so the on-disk file and the wire payloads
//! keep the shape clients already understand.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Review state of a consultation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ConsultationStatus {
    /// Submitted, awaiting a doctor's response.
    Pending,
    /// A doctor has responded with a diagnosis.
    Completed,
}

/// Payment state of a consultation.
///
/// `NotApplicable` serializes as `"n/a"` and is the state of every record
/// that has not yet received a doctor's response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[serde(rename = "n/a")]
    NotApplicable,
    Pending,
    Paid,
}

/// A doctor's answer to a consultation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DoctorResponse {
    pub diagnosis: String,
    pub medicine: String,
    /// Consultation fee quoted by the doctor.
    pub price: f64,
    /// Server timestamp taken when the response was recorded.
    pub responded_at: DateTime<Utc>,
}

/// Where the prescribed medicine should be delivered once paid for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryDetails {
    pub hostel_type: String,
    pub hostel_block: String,
    pub room_number: String,
}

/// One student-submitted medical request and its full lifecycle record.
///
/// Student fields are free text and are stored exactly as submitted; the
/// portal deliberately performs no validation on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Consultation {
    /// Milliseconds since the Unix epoch at creation time; doubles as the
    /// record's primary key.
    pub id: i64,
    pub received_at: DateTime<Utc>,
    pub student_name: String,
    pub student_id: String,
    pub symptoms: String,
    pub status: ConsultationStatus,
    pub payment_status: PaymentStatus,
    /// Present once a doctor has responded.
    pub response: Option<DoctorResponse>,
    /// Present once payment is confirmed.
    pub delivery_details: Option<DeliveryDetails>,
}

impl Consultation {
    /// Creates a fresh pending record, stamped with the current time.
    pub fn new(student_name: String, student_id: String, symptoms: String) -> Self {
        let now = Utc::now();
        Self {
            id: now.timestamp_millis(),
            received_at: now,
            student_name,
            student_id,
            symptoms,
            status: ConsultationStatus::Pending,
            payment_status: PaymentStatus::NotApplicable,
            response: None,
            delivery_details: None,
        }
    }

    /// Records a doctor's response, moving the record to
    /// `completed`/payment-`pending`.
    ///
    /// Intentionally does not check the prior status: submitting a second
    /// response overwrites the first, matching the portal's established
    /// behavior.
    pub fn record_response(&mut self, diagnosis: String, medicine: String, price: f64) {
        self.status = ConsultationStatus::Completed;
        self.payment_status = PaymentStatus::Pending;
        self.response = Some(DoctorResponse {
            diagnosis,
            medicine,
            price,
            responded_at: Utc::now(),
        });
    }

    /// Marks the consultation paid and attaches the delivery details,
    /// unconditionally.
    pub fn record_payment(&mut self, delivery_details: DeliveryDetails) {
        self.payment_status = PaymentStatus::Paid;
        self.delivery_details = Some(delivery_details);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_consultation_is_pending_with_nothing_attached() {
        let c = Consultation::new("A".into(), "1".into(), "fever".into());

        assert_eq!(c.status, ConsultationStatus::Pending);
        assert_eq!(c.payment_status, PaymentStatus::NotApplicable);
        assert!(c.response.is_none());
        assert!(c.delivery_details.is_none());
        assert_eq!(c.id, c.received_at.timestamp_millis());
    }

    #[test]
    fn response_moves_record_to_completed_payment_pending() {
        let mut c = Consultation::new("A".into(), "1".into(), "fever".into());
        c.record_response("flu".into(), "paracetamol".into(), 50.0);

        assert_eq!(c.status, ConsultationStatus::Completed);
        assert_eq!(c.payment_status, PaymentStatus::Pending);
        let response = c.response.expect("response attached");
        assert_eq!(response.diagnosis, "flu");
        assert_eq!(response.medicine, "paracetamol");
        assert_eq!(response.price, 50.0);
    }

    #[test]
    fn payment_attaches_delivery_details() {
        let mut c = Consultation::new("A".into(), "1".into(), "fever".into());
        c.record_response("flu".into(), "paracetamol".into(), 50.0);
        c.record_payment(DeliveryDetails {
            hostel_type: "boys".into(),
            hostel_block: "B2".into(),
            room_number: "101".into(),
        });

        assert_eq!(c.payment_status, PaymentStatus::Paid);
        assert_eq!(
            c.delivery_details.expect("details attached").room_number,
            "101"
        );
    }

    #[test]
    fn serializes_in_the_established_wire_shape() {
        let mut c = Consultation::new("A".into(), "1".into(), "fever".into());
        let json = serde_json::to_value(&c).unwrap();

        assert_eq!(json["studentName"], "A");
        assert_eq!(json["studentId"], "1");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["paymentStatus"], "n/a");
        assert!(json["response"].is_null());
        assert!(json["deliveryDetails"].is_null());
        assert!(json.get("receivedAt").is_some());

        c.record_response("flu".into(), "paracetamol".into(), 50.0);
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["status"], "completed");
        assert_eq!(json["paymentStatus"], "pending");
        assert!(json["response"]["respondedAt"].is_string());
    }

    #[test]
    fn deserializes_records_written_by_earlier_deployments() {
        let raw = r#"{
            "id": 1719500000000,
            "receivedAt": "2024-06-27T14:53:20Z",
            "studentName": "A",
            "studentId": "1",
            "symptoms": "fever",
            "status": "completed",
            "paymentStatus": "paid",
            "response": {
                "diagnosis": "flu",
                "medicine": "paracetamol",
                "price": 50,
                "respondedAt": "2024-06-27T15:00:00Z"
            },
            "deliveryDetails": {
                "hostelType": "boys",
                "hostelBlock": "B2",
                "roomNumber": "101"
            }
        }"#;

        let c: Consultation = serde_json::from_str(raw).unwrap();
        assert_eq!(c.id, 1719500000000);
        assert_eq!(c.payment_status, PaymentStatus::Paid);
        assert_eq!(c.response.unwrap().price, 50.0);
    }
}
