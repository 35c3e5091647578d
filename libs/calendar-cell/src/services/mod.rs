pub mod appointment;
pub mod calendar;
pub mod events;
pub mod filter;
pub mod layout;
pub mod range;
pub mod state;
pub mod status;
pub mod store;

pub use appointment::AppointmentService;
pub use calendar::CalendarService;
pub use store::{FileFilterStore, FilterStore, MemoryFilterStore};
