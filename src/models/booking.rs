use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    /// ISO date, e.g. `2025-01-10`.
    pub date: String,
    /// 12-hour clock, e.g. `2:00 PM`.
    pub time: String,
    pub therapy_id: String,
    pub therapy_name: String,
    pub practitioner: String,
    pub status: BookingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(BookingStatus::Pending),
            "confirmed" => Some(BookingStatus::Confirmed),
            "cancelled" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_json_field_names() {
        let booking = Booking {
            id: "a".to_string(),
            date: "2025-02-01".to_string(),
            time: "3:00 PM".to_string(),
            therapy_id: "basti".to_string(),
            therapy_name: "Basti Treatment".to_string(),
            practitioner: "Dr. X".to_string(),
            status: BookingStatus::Pending,
            patient: None,
            notes: None,
        };

        let value = serde_json::to_value(&booking).unwrap();
        assert_eq!(value["therapyId"], "basti");
        assert_eq!(value["therapyName"], "Basti Treatment");
        assert_eq!(value["status"], "pending");
        assert!(value.get("patient").is_none());
        assert!(value.get("notes").is_none());
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let json = r#"{"id":"a","date":"2025-02-01","time":"3:00 PM","therapyId":"basti",
            "therapyName":"Basti Treatment","practitioner":"Dr. X","status":"done"}"#;
        assert!(serde_json::from_str::<Booking>(json).is_err());
        assert_eq!(BookingStatus::parse("done"), None);
        assert_eq!(BookingStatus::parse("confirmed"), Some(BookingStatus::Confirmed));
    }
}
