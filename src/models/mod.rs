pub mod availability;
pub mod booking;
pub mod calendar;
pub mod event;
pub mod trainer;

pub use availability::{AvailabilityRecord, AvailabilityStatus};
pub use booking::{Booking, BookingStatus};
pub use calendar::{CalendarBooking, CalendarDay, DayStatus};
pub use event::{Event, EventStatus};
pub use trainer::Trainer;
