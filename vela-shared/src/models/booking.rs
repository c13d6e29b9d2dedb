use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingSchedule {
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub duration_hours: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum BookingStatus {
    PENDING,
    CONFIRMED,
    CANCELLED,
}

impl ToString for BookingStatus {
    fn to_string(&self) -> String {
        match self {
            BookingStatus::PENDING => "PENDING".to_string(),
            BookingStatus::CONFIRMED => "CONFIRMED".to_string(),
            BookingStatus::CANCELLED => "CANCELLED".to_string(),
        }
    }
}

/// Booking as returned by the booking-creation collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRecord {
    pub id: Uuid,
    pub package_id: Uuid,
    pub venue_id: Option<Uuid>,
    pub status: BookingStatus,
    pub schedule: BookingSchedule,
    pub guest_count: u32,
    pub total_amount: f64,
    pub currency: String,
    pub created_at: DateTime<Utc>,
}
