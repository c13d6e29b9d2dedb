pub mod models;

pub use models::booking::{BookingRecord, BookingSchedule, BookingStatus, ContactInfo};
pub use models::package::ServicePackage;
