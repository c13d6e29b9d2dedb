pub mod availability;
pub mod flow;
pub mod gateway;
pub mod pricing;

pub use availability::is_date_available;
pub use flow::{BookingDraft, BookingFlow, BookingStep, FieldError, FlowError};
pub use gateway::{BookingGateway, BookingSubmission, MemoryBookingGateway, MemoryPackageStore, PackageStore};
pub use pricing::{PriceBreakdown, PricingConfig, PricingEngine};
