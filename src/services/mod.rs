pub mod audit;
pub mod bookings;
pub mod calendar;
pub mod scheduling;
