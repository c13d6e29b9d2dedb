use serde::{Deserialize, Serialize};
use vela_shared::ServicePackage;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Flat platform-wide tax rate applied to the effective package price.
    pub tax_rate: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self { tax_rate: 0.15 }
    }
}

/// Displayed price breakdown. All three lines are rounded to 2 decimals
/// and must re-sum exactly: `total == base + tax`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceBreakdown {
    pub base: f64,
    pub tax: f64,
    pub total: f64,
    pub currency: String,
}

/// Quote engine for package pricing
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    pub fn tax_rate(&self) -> f64 {
        self.config.tax_rate
    }

    /// Compute the displayed breakdown: effective base, then tax, then sum.
    /// Order matters for the displayed lines to re-sum after rounding.
    pub fn quote(&self, package: &ServicePackage) -> PriceBreakdown {
        let effective = package.effective_price();
        let base = round2(effective);
        let tax = round2(effective * self.config.tax_rate);
        let total = round2(effective + tax);

        PriceBreakdown {
            base,
            tax,
            total,
            currency: package.currency.clone(),
        }
    }
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self::new(PricingConfig::default())
    }
}

/// Round to display precision (2 decimals).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn package(base: f64, discounted: Option<f64>) -> ServicePackage {
        ServicePackage {
            id: Uuid::new_v4(),
            vendor_id: Uuid::new_v4(),
            name: "Grand Ballroom".to_string(),
            base_price: base,
            discounted_price: discounted,
            currency: "USD".to_string(),
            min_guests: 50,
            max_guests: 500,
            advance_booking_days: 365,
            blackout_dates: vec![],
        }
    }

    #[test]
    fn test_quote_without_discount() {
        let engine = PricingEngine::default();
        let breakdown = engine.quote(&package(45000.0, None));

        assert_eq!(breakdown.base, 45000.0);
        assert_eq!(breakdown.tax, 6750.0);
        assert_eq!(breakdown.total, 51750.0);
    }

    #[test]
    fn test_quote_uses_discounted_price() {
        let engine = PricingEngine::default();
        let breakdown = engine.quote(&package(45000.0, Some(40000.0)));

        assert_eq!(breakdown.base, 40000.0);
        assert_eq!(breakdown.tax, 6000.0);
        assert_eq!(breakdown.total, 46000.0);
    }

    #[test]
    fn test_breakdown_resums_after_rounding() {
        let engine = PricingEngine::default();

        // Prices with cents that produce fractional tax amounts
        for base in [19.99, 1234.56, 99999.99, 0.01, 7.77] {
            let breakdown = engine.quote(&package(base, None));
            let resummed = round2(breakdown.base + breakdown.tax);
            assert_eq!(
                breakdown.total, resummed,
                "breakdown for base {} drifted: {:?}",
                base, breakdown
            );
        }
    }

    #[test]
    fn test_zero_price_package() {
        let engine = PricingEngine::default();
        let breakdown = engine.quote(&package(0.0, None));

        assert_eq!(breakdown.base, 0.0);
        assert_eq!(breakdown.tax, 0.0);
        assert_eq!(breakdown.total, 0.0);
    }

    #[test]
    fn test_configurable_tax_rate() {
        let engine = PricingEngine::new(PricingConfig { tax_rate: 0.08 });
        let breakdown = engine.quote(&package(1000.0, None));

        assert_eq!(breakdown.tax, 80.0);
        assert_eq!(breakdown.total, 1080.0);
    }
}
