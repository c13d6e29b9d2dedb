use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;
use vela_shared::{BookingRecord, BookingSchedule, BookingStatus, ServicePackage};

/// Payload sent to the booking-creation collaborator on final confirmation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingSubmission {
    pub package_id: Uuid,
    pub schedule: BookingSchedule,
    pub venue_id: Option<Uuid>,
    pub guest_count: u32,
    pub customizations: serde_json::Value,
    pub notes: Option<String>,
    pub payment_method: String,
    pub total_amount: f64,
    pub currency: String,
}

/// Seam to the external booking-creation collaborator.
#[async_trait]
pub trait BookingGateway: Send + Sync {
    async fn create_booking(
        &self,
        submission: &BookingSubmission,
    ) -> Result<BookingRecord, Box<dyn std::error::Error + Send + Sync>>;
}

/// Seam to the external package-loading collaborator.
#[async_trait]
pub trait PackageStore: Send + Sync {
    async fn get_package(
        &self,
        id: Uuid,
    ) -> Result<Option<ServicePackage>, Box<dyn std::error::Error + Send + Sync>>;
}

/// In-memory booking gateway (stands in for the real marketplace backend).
pub struct MemoryBookingGateway {
    bookings: Mutex<HashMap<Uuid, BookingRecord>>,
}

impl MemoryBookingGateway {
    pub fn new() -> Self {
        Self {
            bookings: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, id: &Uuid) -> Option<BookingRecord> {
        self.bookings.lock().expect("booking map poisoned").get(id).cloned()
    }

    pub fn count(&self) -> usize {
        self.bookings.lock().expect("booking map poisoned").len()
    }
}

impl Default for MemoryBookingGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingGateway for MemoryBookingGateway {
    async fn create_booking(
        &self,
        submission: &BookingSubmission,
    ) -> Result<BookingRecord, Box<dyn std::error::Error + Send + Sync>> {
        let record = BookingRecord {
            id: Uuid::new_v4(),
            package_id: submission.package_id,
            venue_id: submission.venue_id,
            status: BookingStatus::PENDING,
            schedule: submission.schedule.clone(),
            guest_count: submission.guest_count,
            total_amount: submission.total_amount,
            currency: submission.currency.clone(),
            created_at: Utc::now(),
        };

        self.bookings
            .lock()
            .expect("booking map poisoned")
            .insert(record.id, record.clone());

        Ok(record)
    }
}

/// In-memory package directory keyed by package id.
pub struct MemoryPackageStore {
    packages: Mutex<HashMap<Uuid, ServicePackage>>,
}

impl MemoryPackageStore {
    pub fn new() -> Self {
        Self {
            packages: Mutex::new(HashMap::new()),
        }
    }

    pub fn insert(&self, package: ServicePackage) {
        self.packages
            .lock()
            .expect("package map poisoned")
            .insert(package.id, package);
    }
}

impl Default for MemoryPackageStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PackageStore for MemoryPackageStore {
    async fn get_package(
        &self,
        id: Uuid,
    ) -> Result<Option<ServicePackage>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.packages.lock().expect("package map poisoned").get(&id).cloned())
    }
}
