pub mod bookings;
pub mod calendar;
pub mod overview;
