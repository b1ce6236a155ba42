//! Text rendering for the doctor dashboard and student history views.

use chrono::{DateTime, Utc};
use clinic_core::{Consultation, ConsultationStatus, PaymentStatus};
use std::fmt::Write;

fn format_time(time: &DateTime<Utc>) -> String {
    time.format("%d/%m/%Y %H:%M").to_string()
}

/// Renders the doctor's view: pending requests and completed responses, with
/// counts and empty-state placeholders.
pub fn dashboard(consultations: &[Consultation]) -> String {
    let (pending, completed): (Vec<_>, Vec<_>) = consultations
        .iter()
        .partition(|c| c.status == ConsultationStatus::Pending);

    let mut out = String::new();
    let _ = writeln!(out, "Pending requests ({})", pending.len());
    if pending.is_empty() {
        out.push_str("  No pending issues\n");
    }
    for c in &pending {
        let _ = writeln!(out, "  [{}] {} (ID: {})", c.id, c.student_name, c.student_id);
        let _ = writeln!(out, "      {}", c.symptoms);
        let _ = writeln!(out, "      received {}", format_time(&c.received_at));
    }

    let _ = writeln!(out, "Responses ({})", completed.len());
    if completed.is_empty() {
        out.push_str("  No responses yet\n");
    }
    for c in &completed {
        let _ = writeln!(out, "  [{}] {} (ID: {})", c.id, c.student_name, c.student_id);
        let _ = writeln!(out, "      {}", c.symptoms);
        if let Some(response) = &c.response {
            let _ = writeln!(
                out,
                "      Diagnosis: {} | Medicine: {} | Fee: ₹{}",
                response.diagnosis, response.medicine, response.price
            );
            let _ = writeln!(out, "      responded {}", format_time(&response.responded_at));
        }
    }

    out
}

/// Renders the student's consultation history, newest first.
pub fn history(consultations: &[Consultation]) -> String {
    if consultations.is_empty() {
        return "No consultations yet.\n".into();
    }

    let mut out = String::new();
    for c in consultations {
        let _ = writeln!(
            out,
            "[{}] {} ({})",
            c.id,
            c.symptoms,
            format_time(&c.received_at)
        );

        match (&c.response, c.payment_status) {
            (None, _) => {
                out.push_str("    Status: Pending doctor's response\n");
            }
            (Some(response), PaymentStatus::Paid) => {
                let _ = writeln!(out, "    Diagnosis: {}", response.diagnosis);
                let _ = writeln!(out, "    Medicine: {}", response.medicine);
                let _ = writeln!(out, "    Fee: ₹{}", response.price);
                out.push_str("    Payment successful. Your medicine is being prepared for delivery.\n");
            }
            (Some(response), _) => {
                let _ = writeln!(out, "    Diagnosis: {}", response.diagnosis);
                let _ = writeln!(out, "    Medicine: {}", response.medicine);
                let _ = writeln!(out, "    Fee: ₹{}", response.price);
                let _ = writeln!(
                    out,
                    "    Awaiting payment: run `clinic student pay {}` to proceed",
                    c.id
                );
            }
        }
    }

    out
}
