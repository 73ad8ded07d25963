use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::{find_therapy, Booking, BookingStatus, Role};
use crate::services::bookings::parse_clock_time;

pub const PLACEHOLDER_PRACTITIONER: &str = "TBD Practitioner";
pub const PLACEHOLDER_PATIENT: &str = "TBD Patient";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub therapy_id: String,
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub role: Role,
}

#[derive(Debug, PartialEq)]
pub enum SchedulingError {
    UnknownTherapy(String),
    InvalidDate(String),
    InvalidTime(String),
}

impl std::fmt::Display for SchedulingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchedulingError::UnknownTherapy(id) => write!(f, "unknown therapy: {id}"),
            SchedulingError::InvalidDate(date) => {
                write!(f, "invalid date '{date}', expected YYYY-MM-DD")
            }
            SchedulingError::InvalidTime(time) => {
                write!(f, "invalid time '{time}', expected e.g. 2:00 PM")
            }
        }
    }
}

impl std::error::Error for SchedulingError {}

/// Turns a scheduling-form submission into a new pending booking with a
/// fresh id. Practitioners book on behalf of a placeholder patient.
pub fn build_booking(request: BookingRequest) -> Result<Booking, SchedulingError> {
    let therapy = find_therapy(&request.therapy_id)
        .ok_or_else(|| SchedulingError::UnknownTherapy(request.therapy_id.clone()))?;

    let date = request.date.trim();
    if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
        return Err(SchedulingError::InvalidDate(request.date));
    }

    let time = request.time.trim();
    if parse_clock_time(time).is_none() {
        return Err(SchedulingError::InvalidTime(request.time));
    }

    let patient = match request.role {
        Role::Practitioner => Some(PLACEHOLDER_PATIENT.to_string()),
        Role::Patient | Role::Admin => None,
    };

    let notes = request
        .notes
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    Ok(Booking {
        id: uuid::Uuid::new_v4().to_string(),
        date: date.to_string(),
        time: time.to_string(),
        therapy_id: therapy.id.to_string(),
        therapy_name: therapy.name.to_string(),
        practitioner: PLACEHOLDER_PRACTITIONER.to_string(),
        status: BookingStatus::Pending,
        patient,
        notes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(therapy_id: &str, date: &str, time: &str) -> BookingRequest {
        BookingRequest {
            therapy_id: therapy_id.to_string(),
            date: date.to_string(),
            time: time.to_string(),
            notes: None,
            role: Role::Patient,
        }
    }

    #[test]
    fn test_builds_pending_booking() {
        let booking = build_booking(request("shirodhara", "2025-03-15", "10:30 AM")).unwrap();
        assert_eq!(booking.therapy_name, "Shirodhara");
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.practitioner, PLACEHOLDER_PRACTITIONER);
        assert_eq!(booking.patient, None);
        assert!(uuid::Uuid::parse_str(&booking.id).is_ok());
    }

    #[test]
    fn test_ids_are_fresh() {
        let a = build_booking(request("nasya", "2025-03-15", "9:00 AM")).unwrap();
        let b = build_booking(request("nasya", "2025-03-15", "9:00 AM")).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_practitioner_gets_placeholder_patient() {
        let mut req = request("basti", "2025-03-15", "3:00 PM");
        req.role = Role::Practitioner;
        let booking = build_booking(req).unwrap();
        assert_eq!(booking.patient.as_deref(), Some(PLACEHOLDER_PATIENT));
    }

    #[test]
    fn test_blank_notes_dropped() {
        let mut req = request("basti", "2025-03-15", "3:00 PM");
        req.notes = Some("   ".to_string());
        assert_eq!(build_booking(req).unwrap().notes, None);

        let mut req = request("basti", "2025-03-15", "3:00 PM");
        req.notes = Some(" knee pain ".to_string());
        assert_eq!(build_booking(req).unwrap().notes.as_deref(), Some("knee pain"));
    }

    #[test]
    fn test_unknown_therapy() {
        let err = build_booking(request("reiki", "2025-03-15", "3:00 PM")).unwrap_err();
        assert_eq!(err, SchedulingError::UnknownTherapy("reiki".to_string()));
    }

    #[test]
    fn test_invalid_date() {
        let err = build_booking(request("basti", "15/03/2025", "3:00 PM")).unwrap_err();
        assert!(matches!(err, SchedulingError::InvalidDate(_)));
    }

    #[test]
    fn test_invalid_time() {
        let err = build_booking(request("basti", "2025-03-15", "15:00")).unwrap_err();
        assert!(matches!(err, SchedulingError::InvalidTime(_)));
    }

    #[test]
    fn test_time_out_of_clock_range() {
        for time in ["13:00 PM", "0:30 AM", "9:60 AM", "99:99 PM"] {
            let err = build_booking(request("basti", "2025-03-15", time)).unwrap_err();
            assert_eq!(err, SchedulingError::InvalidTime(time.to_string()));
        }
    }
}
