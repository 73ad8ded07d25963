//! Durable booking list.
//!
//! Every mutation is a full read-modify-write of one JSON array. The store
//! does no locking of its own: two processes sharing a medium can overwrite
//! each other's writes.

use std::cmp::Ordering;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::models::{Booking, BookingStatus};
use crate::storage::Storage;

/// Bump the suffix, with a migration, whenever the stored shape changes.
pub const BOOKINGS_KEY: &str = "app.bookings.v1";

pub struct BookingStore {
    storage: Storage,
}

impl BookingStore {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    fn load(&self) -> Vec<Booking> {
        self.storage.get(BOOKINGS_KEY, Vec::new())
    }

    fn save(&self, items: &[Booking]) {
        self.storage.set(BOOKINGS_KEY, items);
    }

    /// All bookings in display order: date, then time of day.
    pub fn get_all(&self) -> Vec<Booking> {
        let mut items = self.load();
        // sort_by is stable, so exact ties keep insertion order
        items.sort_by(compare_bookings);
        items
    }

    pub fn find(&self, id: &str) -> Option<Booking> {
        self.load().into_iter().find(|b| b.id == id)
    }

    pub fn add(&self, booking: Booking) {
        let mut items = self.load();
        items.push(booking);
        self.save(&items);
    }

    pub fn remove(&self, id: &str) {
        let mut items = self.load();
        items.retain(|b| b.id != id);
        self.save(&items);
    }

    pub fn update_status(&self, id: &str, status: BookingStatus) {
        let mut items = self.load();
        for booking in items.iter_mut().filter(|b| b.id == id) {
            booking.status = status;
        }
        self.save(&items);
    }

    pub fn clear_all(&self) {
        self.save(&[]);
    }
}

fn compare_bookings(a: &Booking, b: &Booking) -> Ordering {
    parse_date(&a.date)
        .cmp(&parse_date(&b.date))
        .then_with(|| time_to_minutes(&a.time).cmp(&time_to_minutes(&b.time)))
}

// Unparseable dates compare as None, ahead of every real date.
fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

fn time_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^(\d{1,2}):(\d{2})\s*(AM|PM)$").expect("time pattern is valid")
    })
}

fn time_parts(s: &str) -> Option<(u32, u32, bool)> {
    let caps = time_pattern().captures(s)?;
    let hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = caps[2].parse().ok()?;
    Some((hour, minute, caps[3].eq_ignore_ascii_case("PM")))
}

fn to_minutes(mut hour: u32, minute: u32, pm: bool) -> u32 {
    if pm && hour != 12 {
        hour += 12;
    }
    if !pm && hour == 12 {
        hour = 0;
    }
    hour * 60 + minute
}

/// Parses `H:MM AM|PM` into minutes since midnight. Only the shape is
/// checked, so `13:00 PM` yields 1500.
pub fn parse_time(s: &str) -> Option<u32> {
    let (hour, minute, pm) = time_parts(s)?;
    Some(to_minutes(hour, minute, pm))
}

/// Like [`parse_time`], but the hour must be 1-12 and the minute 0-59.
pub fn parse_clock_time(s: &str) -> Option<u32> {
    let (hour, minute, pm) = time_parts(s)?;
    if !(1..=12).contains(&hour) || minute > 59 {
        return None;
    }
    Some(to_minutes(hour, minute, pm))
}

/// Sort key for a booking time; anything that doesn't parse sorts first.
pub fn time_to_minutes(s: &str) -> u32 {
    parse_time(s).unwrap_or(0)
}
