use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Therapy {
    pub id: &'static str,
    pub name: &'static str,
    pub duration_minutes: i64,
    pub price_inr: u32,
}

pub const THERAPIES: &[Therapy] = &[
    Therapy {
        id: "abhyanga",
        name: "Abhyanga Massage",
        duration_minutes: 90,
        price_inr: 3500,
    },
    Therapy {
        id: "shirodhara",
        name: "Shirodhara",
        duration_minutes: 60,
        price_inr: 4000,
    },
    Therapy {
        id: "nasya",
        name: "Nasya Therapy",
        duration_minutes: 45,
        price_inr: 2800,
    },
    Therapy {
        id: "basti",
        name: "Basti Treatment",
        duration_minutes: 120,
        price_inr: 5500,
    },
    Therapy {
        id: "udvartana",
        name: "Udvartana",
        duration_minutes: 75,
        price_inr: 3200,
    },
];

/// Slots offered by the scheduling form.
pub const TIME_SLOTS: &[&str] = &[
    "9:00 AM", "10:30 AM", "12:00 PM", "1:30 PM", "3:00 PM", "4:30 PM", "6:00 PM",
];

pub fn find_therapy(id: &str) -> Option<&'static Therapy> {
    THERAPIES.iter().find(|t| t.id == id)
}
