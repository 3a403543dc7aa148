use crate::models::UsageRecord;

/// Platform price per gigabyte-second of compute, in US dollars.
pub const COST_PER_GB_SECOND: f64 = 0.00001667;

/// Cost of one invocation at the default GB-second price.
///
/// `(memory_size_mb / 1024) * (billed_duration_ms / 1000) * COST_PER_GB_SECOND`,
/// unrounded.
pub fn invocation_cost(billed_duration_ms: u64, memory_size_mb: u64) -> f64 {
    CostCalculator::default().calculate_cost(billed_duration_ms, memory_size_mb)
}

/// Calculator holding the GB-second rate used to price an invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostCalculator {
    price_per_gb_second: f64,
}

impl Default for CostCalculator {
    fn default() -> Self {
        Self {
            price_per_gb_second: COST_PER_GB_SECOND,
        }
    }
}

impl CostCalculator {
    /// Create a calculator.
    ///
    /// Pass `Some(rate)` to override the default [`COST_PER_GB_SECOND`].
    pub fn new(price_per_gb_second: Option<f64>) -> Self {
        Self {
            price_per_gb_second: price_per_gb_second.unwrap_or(COST_PER_GB_SECOND),
        }
    }

    pub fn price_per_gb_second(&self) -> f64 {
        self.price_per_gb_second
    }

    /// Calculate the cost (USD) of one invocation. No rounding is applied.
    pub fn calculate_cost(&self, billed_duration_ms: u64, memory_size_mb: u64) -> f64 {
        let gigabytes = memory_size_mb as f64 / 1024.0;
        let seconds = billed_duration_ms as f64 / 1000.0;
        gigabytes * seconds * self.price_per_gb_second
    }

    /// Cost for a usage record, or `None` when either input is absent.
    pub fn cost_for_usage(&self, usage: &UsageRecord) -> Option<f64> {
        let billed = usage.billed_duration_ms?;
        let memory = usage.memory_size_mb?;
        Some(self.calculate_cost(billed, memory))
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
