//! Virtual assistant bookings

mod entity;
mod repository;

pub use entity::VaBooking;
pub use repository::BookingRepository;
