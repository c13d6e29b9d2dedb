use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vela_shared::{BookingRecord, BookingSchedule, ContactInfo, ServicePackage};

use crate::availability::is_date_available;
use crate::gateway::{BookingGateway, BookingSubmission};
use crate::pricing::PricingEngine;

/// Wizard steps, linear. Forward moves are guarded; backward moves never
/// validate. `Submitted` is terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BookingStep {
    PackageDetails,
    Schedule,
    Customize,
    Review,
    Payment,
    Submitted,
}

/// Field-level validation failure reported back to the caller.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    #[error("booking submission failed: {0}")]
    Submission(String),

    #[error("cannot advance from {0:?}")]
    InvalidTransition(BookingStep),
}

/// Draft state owned by the wizard session. Exists only for the lifetime
/// of the flow; dropped on submission or abandonment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingDraft {
    pub schedule: Option<BookingSchedule>,
    pub guest_count: Option<u32>,
    pub venue_id: Option<Uuid>,
    pub contact: ContactInfo,
    pub customizations: serde_json::Value,
    pub notes: Option<String>,
    pub payment_method: Option<String>,
}

/// Linear booking wizard over a single service package.
///
/// Validation failures are returned as structured field errors and leave
/// the step unchanged; only the final submission call can fail remotely,
/// and that failure is surfaced without being retried.
pub struct BookingFlow {
    package: ServicePackage,
    draft: BookingDraft,
    step: BookingStep,
}

impl BookingFlow {
    pub fn new(package: ServicePackage) -> Self {
        Self {
            package,
            draft: BookingDraft::default(),
            step: BookingStep::PackageDetails,
        }
    }

    pub fn step(&self) -> BookingStep {
        self.step
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn package(&self) -> &ServicePackage {
        &self.package
    }

    pub fn set_schedule(&mut self, schedule: BookingSchedule) {
        self.draft.schedule = Some(schedule);
    }

    /// Guest count is enforced at the input boundary, not just at review.
    pub fn set_guest_count(&mut self, guest_count: u32) -> Result<(), FieldError> {
        if !self.package.accepts_guest_count(guest_count) {
            return Err(FieldError::new(
                "guest_count",
                &format!(
                    "guest count must be between {} and {}",
                    self.package.min_guests, self.package.max_guests
                ),
            ));
        }
        self.draft.guest_count = Some(guest_count);
        Ok(())
    }

    pub fn set_venue(&mut self, venue_id: Option<Uuid>) {
        self.draft.venue_id = venue_id;
    }

    pub fn set_contact(&mut self, contact: ContactInfo) {
        self.draft.contact = contact;
    }

    pub fn set_customizations(&mut self, customizations: serde_json::Value) {
        self.draft.customizations = customizations;
    }

    pub fn set_notes(&mut self, notes: Option<String>) {
        self.draft.notes = notes;
    }

    pub fn set_payment_method(&mut self, payment_method: &str) {
        self.draft.payment_method = Some(payment_method.to_string());
    }

    /// Guarded forward transition, evaluated against the current date.
    pub fn advance(&mut self) -> Result<BookingStep, FlowError> {
        self.advance_at(Utc::now().date_naive())
    }

    pub fn advance_at(&mut self, today: NaiveDate) -> Result<BookingStep, FlowError> {
        let next = match self.step {
            BookingStep::PackageDetails => BookingStep::Schedule,
            BookingStep::Schedule => {
                self.check_schedule(today)?;
                BookingStep::Customize
            }
            BookingStep::Customize => {
                self.check_contact()?;
                BookingStep::Review
            }
            BookingStep::Review => BookingStep::Payment,
            // Payment -> Submitted only happens through submit()
            BookingStep::Payment | BookingStep::Submitted => {
                return Err(FlowError::InvalidTransition(self.step));
            }
        };

        self.step = next;
        Ok(next)
    }

    /// Backward transition. Always allowed from any non-initial wizard
    /// step, never validates. No-op at the initial and terminal steps.
    pub fn retreat(&mut self) -> BookingStep {
        self.step = match self.step {
            BookingStep::PackageDetails | BookingStep::Submitted => self.step,
            BookingStep::Schedule => BookingStep::PackageDetails,
            BookingStep::Customize => BookingStep::Schedule,
            BookingStep::Review => BookingStep::Customize,
            BookingStep::Payment => BookingStep::Review,
        };
        self.step
    }

    /// Final confirmation. Delegates to the booking-creation collaborator;
    /// on failure the step stays at `Payment` and the draft is untouched,
    /// so the caller may retry. The flow itself never retries and does not
    /// track an in-flight submission; preventing double-submits while a
    /// call is awaited is the caller's job.
    pub async fn submit(
        &mut self,
        pricing: &PricingEngine,
        gateway: &dyn BookingGateway,
    ) -> Result<BookingRecord, FlowError> {
        self.submit_at(Utc::now().date_naive(), pricing, gateway).await
    }

    pub async fn submit_at(
        &mut self,
        today: NaiveDate,
        pricing: &PricingEngine,
        gateway: &dyn BookingGateway,
    ) -> Result<BookingRecord, FlowError> {
        if self.step != BookingStep::Payment {
            return Err(FlowError::InvalidTransition(self.step));
        }

        // Full re-validation at the submission boundary.
        let mut errors = Vec::new();
        if let Err(e) = self.check_schedule(today) {
            if let FlowError::Validation(mut v) = e {
                errors.append(&mut v);
            }
        }
        if let Err(e) = self.check_contact() {
            if let FlowError::Validation(mut v) = e {
                errors.append(&mut v);
            }
        }
        let guest_count = match self.draft.guest_count {
            Some(n) if self.package.accepts_guest_count(n) => n,
            Some(_) => {
                errors.push(FieldError::new("guest_count", "guest count out of range"));
                0
            }
            None => {
                errors.push(FieldError::new("guest_count", "guest count is required"));
                0
            }
        };
        let payment_method = match &self.draft.payment_method {
            Some(m) if !m.is_empty() => m.clone(),
            _ => {
                errors.push(FieldError::new("payment_method", "payment method is required"));
                String::new()
            }
        };
        if !errors.is_empty() {
            return Err(FlowError::Validation(errors));
        }

        let schedule = self
            .draft
            .schedule
            .clone()
            .expect("schedule checked above");
        let breakdown = pricing.quote(&self.package);

        let submission = BookingSubmission {
            package_id: self.package.id,
            schedule,
            venue_id: self.draft.venue_id,
            guest_count,
            customizations: self.draft.customizations.clone(),
            notes: self.draft.notes.clone(),
            payment_method,
            total_amount: breakdown.total,
            currency: breakdown.currency,
        };

        match gateway.create_booking(&submission).await {
            Ok(record) => {
                self.step = BookingStep::Submitted;
                Ok(record)
            }
            Err(e) => Err(FlowError::Submission(e.to_string())),
        }
    }

    fn check_schedule(&self, today: NaiveDate) -> Result<(), FlowError> {
        let Some(schedule) = &self.draft.schedule else {
            return Err(FlowError::Validation(vec![FieldError::new(
                "schedule.date",
                "a booking date is required",
            )]));
        };

        if !is_date_available(schedule.date, today, &self.package) {
            return Err(FlowError::Validation(vec![FieldError::new(
                "schedule.date",
                "the selected date is not available for this package",
            )]));
        }

        Ok(())
    }

    fn check_contact(&self) -> Result<(), FlowError> {
        let mut errors = Vec::new();
        if self.draft.contact.name.trim().is_empty() {
            errors.push(FieldError::new("contact.name", "contact name is required"));
        }
        if self.draft.contact.email.trim().is_empty() {
            errors.push(FieldError::new("contact.email", "contact email is required"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(FlowError::Validation(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::MemoryBookingGateway;
    use async_trait::async_trait;

    struct FailingGateway;

    #[async_trait]
    impl BookingGateway for FailingGateway {
        async fn create_booking(
            &self,
            _submission: &BookingSubmission,
        ) -> Result<BookingRecord, Box<dyn std::error::Error + Send + Sync>> {
            Err("payment processor unavailable".into())
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn package() -> ServicePackage {
        ServicePackage {
            id: Uuid::new_v4(),
            vendor_id: Uuid::new_v4(),
            name: "Lakeside Estate".to_string(),
            base_price: 45000.0,
            discounted_price: None,
            currency: "USD".to_string(),
            min_guests: 50,
            max_guests: 500,
            advance_booking_days: 30,
            blackout_dates: vec![day(2024, 1, 15)],
        }
    }

    fn schedule(date: NaiveDate) -> BookingSchedule {
        BookingSchedule {
            date,
            start_time: "14:00".to_string(),
            end_time: "22:00".to_string(),
            duration_hours: 8,
        }
    }

    fn contact() -> ContactInfo {
        ContactInfo {
            name: "Avery Lane".to_string(),
            email: "avery@example.com".to_string(),
            phone: "555-0100".to_string(),
        }
    }

    fn flow_at_payment(today: NaiveDate) -> BookingFlow {
        let mut flow = BookingFlow::new(package());
        flow.set_schedule(schedule(day(2024, 1, 20)));
        flow.set_guest_count(120).unwrap();
        flow.set_contact(contact());
        flow.set_payment_method("card");
        for _ in 0..4 {
            flow.advance_at(today).unwrap();
        }
        assert_eq!(flow.step(), BookingStep::Payment);
        flow
    }

    #[test]
    fn test_guest_count_bounds() {
        let mut flow = BookingFlow::new(package());

        assert!(flow.set_guest_count(49).is_err());
        assert!(flow.set_guest_count(50).is_ok());
        assert!(flow.set_guest_count(500).is_ok());
        assert!(flow.set_guest_count(501).is_err());
    }

    #[test]
    fn test_advance_parks_at_first_unmet_guard() {
        let today = day(2024, 1, 1);
        let mut flow = BookingFlow::new(package());

        // First advance is unconditional
        assert_eq!(flow.advance_at(today).unwrap(), BookingStep::Schedule);

        // No date set: repeated advances leave the step unchanged
        for _ in 0..5 {
            assert!(flow.advance_at(today).is_err());
            assert_eq!(flow.step(), BookingStep::Schedule);
        }
    }

    #[test]
    fn test_advance_blocked_on_unavailable_date() {
        let today = day(2024, 1, 1);
        let mut flow = BookingFlow::new(package());
        flow.set_schedule(schedule(day(2024, 1, 15))); // blackout

        flow.advance_at(today).unwrap();
        let err = flow.advance_at(today).unwrap_err();
        assert!(matches!(err, FlowError::Validation(_)));
        assert_eq!(flow.step(), BookingStep::Schedule);
    }

    #[test]
    fn test_advance_blocked_on_missing_contact() {
        let today = day(2024, 1, 1);
        let mut flow = BookingFlow::new(package());
        flow.set_schedule(schedule(day(2024, 1, 20)));

        flow.advance_at(today).unwrap();
        flow.advance_at(today).unwrap();
        assert_eq!(flow.step(), BookingStep::Customize);

        let err = flow.advance_at(today).unwrap_err();
        match err {
            FlowError::Validation(errors) => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0].field, "contact.name");
                assert_eq!(errors[1].field, "contact.email");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(flow.step(), BookingStep::Customize);
    }

    #[test]
    fn test_retreat_never_validates() {
        let today = day(2024, 1, 1);
        let mut flow = BookingFlow::new(package());
        flow.set_schedule(schedule(day(2024, 1, 20)));
        flow.advance_at(today).unwrap();
        flow.advance_at(today).unwrap();

        // Clear the date, then walk all the way back
        flow.draft.schedule = None;
        assert_eq!(flow.retreat(), BookingStep::Schedule);
        assert_eq!(flow.retreat(), BookingStep::PackageDetails);
        // Retreat at the initial step is a no-op
        assert_eq!(flow.retreat(), BookingStep::PackageDetails);
    }

    #[tokio::test]
    async fn test_submit_success_reaches_terminal_step() {
        let today = day(2024, 1, 1);
        let mut flow = flow_at_payment(today);
        let gateway = MemoryBookingGateway::new();
        let pricing = PricingEngine::default();

        let record = flow.submit_at(today, &pricing, &gateway).await.unwrap();
        assert_eq!(flow.step(), BookingStep::Submitted);
        assert_eq!(record.guest_count, 120);
        assert_eq!(record.total_amount, 51750.0);
        assert_eq!(gateway.count(), 1);

        // Terminal: no further advance
        assert!(flow.advance_at(today).is_err());
    }

    #[tokio::test]
    async fn test_submit_failure_preserves_draft_and_step() {
        let today = day(2024, 1, 1);
        let mut flow = flow_at_payment(today);
        let pricing = PricingEngine::default();

        let err = flow.submit_at(today, &pricing, &FailingGateway).await.unwrap_err();
        match err {
            FlowError::Submission(msg) => assert!(msg.contains("payment processor")),
            other => panic!("expected submission error, got {:?}", other),
        }

        // Step and draft unchanged, retry is possible
        assert_eq!(flow.step(), BookingStep::Payment);
        assert_eq!(flow.draft().guest_count, Some(120));

        let gateway = MemoryBookingGateway::new();
        flow.submit_at(today, &pricing, &gateway).await.unwrap();
        assert_eq!(flow.step(), BookingStep::Submitted);
    }

    #[tokio::test]
    async fn test_submit_requires_payment_step() {
        let today = day(2024, 1, 1);
        let mut flow = BookingFlow::new(package());
        let gateway = MemoryBookingGateway::new();
        let pricing = PricingEngine::default();

        let err = flow.submit_at(today, &pricing, &gateway).await.unwrap_err();
        assert!(matches!(err, FlowError::InvalidTransition(BookingStep::PackageDetails)));
    }

    #[tokio::test]
    async fn test_submit_revalidates_guest_count() {
        let today = day(2024, 1, 1);
        let mut flow = flow_at_payment(today);
        // Shrink the package bounds underneath the draft
        flow.package.max_guests = 100;

        let gateway = MemoryBookingGateway::new();
        let pricing = PricingEngine::default();
        let err = flow.submit_at(today, &pricing, &gateway).await.unwrap_err();
        assert!(matches!(err, FlowError::Validation(_)));
        assert_eq!(gateway.count(), 0);
    }
}
