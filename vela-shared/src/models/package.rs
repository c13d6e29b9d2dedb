use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A vendor-offered bookable service bundle with pricing, guest bounds,
/// and availability rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicePackage {
    pub id: Uuid,
    pub vendor_id: Uuid,
    pub name: String,
    pub base_price: f64,
    pub discounted_price: Option<f64>,
    pub currency: String,
    pub min_guests: u32,
    pub max_guests: u32,
    /// Latest day offset from "today" a booking may target.
    pub advance_booking_days: u32,
    /// Calendar dates on which the package cannot be booked.
    pub blackout_dates: Vec<NaiveDate>,
}

impl ServicePackage {
    /// Discounted price when set, base price otherwise.
    pub fn effective_price(&self) -> f64 {
        self.discounted_price.unwrap_or(self.base_price)
    }

    /// Blackout comparison is by calendar day, not time-of-day.
    pub fn is_blackout(&self, date: NaiveDate) -> bool {
        self.blackout_dates.contains(&date)
    }

    pub fn accepts_guest_count(&self, guest_count: u32) -> bool {
        guest_count >= self.min_guests && guest_count <= self.max_guests
    }
}
