//! Token and cost estimation for a split description.

pub mod cost;
pub mod pricing;

pub use cost::{
    count_tokens, estimate_cost, CostEstimate, EstimateOptions, DEFAULT_AVERAGE_OUTPUT_TOKENS,
    DEFAULT_MODEL,
};
pub use pricing::{ModelPrice, PriceTier};
