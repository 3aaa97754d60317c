/// Reasons a configuration cannot be evaluated.
///
/// This is the only error the engine produces. Physically odd but
/// computable inputs (negative water temperature, zero yeast) are not errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidConfiguration {
    #[error("invalid configuration: pizza count must be at least 1")]
    ZeroPizzaCount,

    #[error("invalid configuration: ball weight must be > 0 g (got {0})")]
    NonPositiveBallWeight(f64),

    /// A numeric field is NaN or infinite.
    #[error("invalid configuration: `{field}` must be a finite number")]
    NonFinite { field: &'static str },

    #[error("invalid configuration: fermentation hours must be >= 0 (got {0})")]
    NegativeFermentation(f64),

    /// Sum of baker's fractions (flour = 1) is zero or negative.
    #[error("invalid configuration: scale factor must be > 0 (got {0})")]
    NonPositiveScaleFactor(f64),

    #[error("invalid configuration: schedule falls outside the supported date range")]
    ScheduleOutOfRange,
}
