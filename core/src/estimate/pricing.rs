//! Static per-token price table.
//!
//! Prices are JPY per token, converted from USD list prices at 146.5 JPY/USD.

use serde::Serialize;

use crate::error::EstimateError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelPrice {
    /// JPY per input token.
    pub input: f64,
    /// JPY per output token.
    pub output: f64,
}

impl ModelPrice {
    const fn new(input: f64, output: f64) -> Self {
        Self { input, output }
    }

    pub fn input_cost(&self, tokens: u64) -> f64 {
        tokens as f64 * self.input
    }

    pub fn output_cost(&self, tokens: u64) -> f64 {
        tokens as f64 * self.output
    }

    pub fn cost(&self, input_tokens: u64, output_tokens: u64) -> f64 {
        self.input_cost(input_tokens) + self.output_cost(output_tokens)
    }
}

// economy: $0.075 / 1M input, $0.30 / 1M output
const ECONOMY: ModelPrice = ModelPrice::new(0.0000109875, 0.00004395);
// premium: $1.25 / 1M input, $5.00 / 1M output
const PREMIUM: ModelPrice = ModelPrice::new(0.000183125, 0.0007325);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceTier {
    Economy,
    Premium,
}

impl PriceTier {
    /// Accepts the tier name or the model family alias (`flash`, `pro`).
    pub fn from_model(model: &str) -> Result<Self, EstimateError> {
        match model.trim().to_ascii_lowercase().as_str() {
            "economy" | "flash" => Ok(Self::Economy),
            "premium" | "pro" => Ok(Self::Premium),
            _ => Err(EstimateError::UnknownModel(model.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Economy => "economy",
            Self::Premium => "premium",
        }
    }

    pub fn price(self) -> ModelPrice {
        match self {
            Self::Economy => ECONOMY,
            Self::Premium => PREMIUM,
        }
    }
}

impl std::str::FromStr for PriceTier {
    type Err = EstimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_model(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_name_and_alias() {
        assert_eq!(PriceTier::from_model("economy").unwrap(), PriceTier::Economy);
        assert_eq!(PriceTier::from_model("Flash").unwrap(), PriceTier::Economy);
        assert_eq!("premium".parse::<PriceTier>().unwrap(), PriceTier::Premium);
        assert_eq!(PriceTier::from_model("pro").unwrap(), PriceTier::Premium);
    }

    #[test]
    fn unknown_model_is_rejected() {
        assert_eq!(
            PriceTier::from_model("ultra"),
            Err(EstimateError::UnknownModel("ultra".to_string()))
        );
    }

    #[test]
    fn premium_costs_more_than_economy() {
        let economy = PriceTier::Economy.price();
        let premium = PriceTier::Premium.price();
        assert!(premium.input > economy.input);
        assert!(premium.output > economy.output);
        assert_eq!(economy.cost(0, 0), 0.0);
    }
}
