pub mod audit;
pub mod booking;
pub mod role;
pub mod therapy;

pub use audit::AuditEntry;
pub use booking::{Booking, BookingStatus};
pub use role::Role;
pub use therapy::{find_therapy, Therapy, THERAPIES, TIME_SLOTS};
