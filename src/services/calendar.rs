use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::models::{find_therapy, Booking, BookingStatus};
use crate::services::bookings::parse_clock_time;

const DEFAULT_DURATION_MINUTES: i64 = 60;

fn start_of(booking: &Booking) -> Option<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(&booking.date, "%Y-%m-%d").ok()?;
    let minutes = parse_clock_time(&booking.time)?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(midnight + Duration::minutes(minutes as i64))
}

/// `None` when the booking's date or time can't be placed on a calendar.
pub fn generate_ics(booking: &Booking) -> Option<String> {
    let start = start_of(booking)?;
    let duration = find_therapy(&booking.therapy_id)
        .map(|t| t.duration_minutes)
        .unwrap_or(DEFAULT_DURATION_MINUTES);
    let end = start + Duration::minutes(duration);

    let dtstart = start.format("%Y%m%dT%H%M%S").to_string();
    let dtend = end.format("%Y%m%dT%H%M%S").to_string();
    let dtstamp = chrono::Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
    let uid = escape_text(&format!("{}@ayursutra", booking.id));

    let summary = escape_text(&format!(
        "{} with {}",
        booking.therapy_name, booking.practitioner
    ));
    let description = escape_text(
        booking
            .notes
            .as_deref()
            .unwrap_or("No special requirements"),
    );

    Some(format!(
        "BEGIN:VCALENDAR\r\n\
         VERSION:2.0\r\n\
         PRODID:-//AyurSutra//Therapy Scheduling//EN\r\n\
         BEGIN:VEVENT\r\n\
         UID:{uid}\r\n\
         DTSTAMP:{dtstamp}\r\n\
         DTSTART:{dtstart}\r\n\
         DTEND:{dtend}\r\n\
         SUMMARY:{summary}\r\n\
         DESCRIPTION:{description}\r\n\
         STATUS:{status}\r\n\
         END:VEVENT\r\n\
         END:VCALENDAR\r\n",
        status = ics_status(booking),
    ))
}

/// TEXT value escaping per RFC 5545 section 3.3.11.
fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str("\\n");
            }
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}

fn ics_status(booking: &Booking) -> &'static str {
    match booking.status {
        BookingStatus::Pending => "TENTATIVE",
        BookingStatus::Confirmed => "CONFIRMED",
        BookingStatus::Cancelled => "CANCELLED",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(date: &str, time: &str, therapy_id: &str) -> Booking {
        Booking {
            id: "test-123".to_string(),
            date: date.to_string(),
            time: time.to_string(),
            therapy_id: therapy_id.to_string(),
            therapy_name: "Abhyanga Massage".to_string(),
            practitioner: "Dr. Sharma".to_string(),
            status: BookingStatus::Confirmed,
            patient: None,
            notes: Some("Sensitive skin".to_string()),
        }
    }

    #[test]
    fn test_generate_ics() {
        let ics = generate_ics(&booking("2025-03-15", "2:00 PM", "abhyanga")).unwrap();
        assert!(ics.contains("BEGIN:VCALENDAR"));
        assert!(ics.contains("BEGIN:VEVENT"));
        assert!(ics.contains("UID:test-123@ayursutra"));
        assert!(ics.contains("DTSTART:20250315T140000"));
        // abhyanga runs 90 minutes
        assert!(ics.contains("DTEND:20250315T153000"));
        assert!(ics.contains("SUMMARY:Abhyanga Massage with Dr. Sharma"));
        assert!(ics.contains("DESCRIPTION:Sensitive skin"));
        assert!(ics.contains("STATUS:CONFIRMED"));
    }

    #[test]
    fn test_unknown_therapy_uses_default_duration() {
        let ics = generate_ics(&booking("2025-03-15", "11:30 PM", "mystery")).unwrap();
        assert!(ics.contains("DTSTART:20250315T233000"));
        assert!(ics.contains("DTEND:20250316T003000"));
    }

    #[test]
    fn test_text_values_are_escaped() {
        let mut b = booking("2025-03-15", "2:00 PM", "abhyanga");
        b.notes = Some("oil; warm, please\\\r\nEND:VEVENT\r\nBEGIN:VEVENT\nSUMMARY:extra".to_string());
        b.practitioner = "Sharma, Dr.".to_string();

        let ics = generate_ics(&b).unwrap();
        let lines: Vec<&str> = ics.split("\r\n").collect();
        assert_eq!(lines.iter().filter(|l| **l == "BEGIN:VEVENT").count(), 1);
        assert_eq!(lines.iter().filter(|l| **l == "END:VEVENT").count(), 1);
        assert!(!lines.iter().any(|l| l.starts_with("SUMMARY:extra")));
        assert!(ics.contains(
            "DESCRIPTION:oil\\; warm\\, please\\\\\\nEND:VEVENT\\nBEGIN:VEVENT\\nSUMMARY:extra\r\n"
        ));
        assert!(ics.contains("SUMMARY:Abhyanga Massage with Sharma\\, Dr.\r\n"));
        // every line ends in CRLF, so no bare newline leaked through
        assert!(!ics.replace("\r\n", "").contains('\n'));
    }

    #[test]
    fn test_out_of_range_time_is_unplaceable() {
        assert!(generate_ics(&booking("2025-03-15", "99:99 PM", "abhyanga")).is_none());
        assert!(generate_ics(&booking("2025-03-15", "13:00 PM", "abhyanga")).is_none());
    }

    #[test]
    fn test_unplaceable_booking() {
        assert!(generate_ics(&booking("2025-03-15", "noon", "abhyanga")).is_none());
        assert!(generate_ics(&booking("soon", "2:00 PM", "abhyanga")).is_none());
    }
}
