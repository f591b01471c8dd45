use serde::Serialize;

use crate::error::EstimateError;
use crate::task::splitter;

use super::pricing::PriceTier;

pub const DEFAULT_MODEL: &str = "economy";
pub const DEFAULT_AVERAGE_OUTPUT_TOKENS: u64 = 1000;

/// Coarse token approximation: `ceil(chars / 2)`. Not a tokenizer.
pub fn count_tokens(text: &str) -> u64 {
    (text.chars().count() as u64).div_ceil(2)
}

#[derive(Debug, Clone)]
pub struct EstimateOptions {
    pub target_files: Vec<String>,
    pub model: String,
    pub average_output_tokens: u64,
}

impl Default for EstimateOptions {
    fn default() -> Self {
        Self {
            target_files: Vec::new(),
            model: DEFAULT_MODEL.to_string(),
            average_output_tokens: DEFAULT_AVERAGE_OUTPUT_TOKENS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimate {
    pub model: PriceTier,
    pub total_input_tokens: u64,
    pub total_output_tokens: u64,
    pub average_output_tokens: u64,
    pub input_cost: f64,
    pub output_cost: f64,
    pub total_cost: f64,
    pub sub_task_count: usize,
    pub estimated_time: String,
}

impl CostEstimate {
    /// Markdown breakdown for humans.
    pub fn details(&self) -> String {
        format!(
            "## Cost estimate ({model})\n\n\
             - **Sub-tasks**: {tasks}\n\
             - **Input tokens**: {input}\n\
             - **Output tokens (projected)**: {output}\n  \
             - ({avg} tokens per task)\n\n\
             ---\n\
             - **Input cost**: {input_cost:.3} JPY\n\
             - **Output cost**: {output_cost:.3} JPY\n\
             - **Total projected cost**: **{total:.3} JPY**\n\
             ---\n\
             - **Estimated time**: {time}\n",
            model = self.model.as_str(),
            tasks = self.sub_task_count,
            input = self.total_input_tokens,
            output = self.total_output_tokens,
            avg = self.average_output_tokens,
            input_cost = self.input_cost,
            output_cost = self.output_cost,
            total = self.total_cost,
            time = self.estimated_time,
        )
    }
}

/// Estimate the API cost of dispatching `description` with the same split the
/// executor would use.
pub fn estimate_cost(
    description: &str,
    options: &EstimateOptions,
) -> Result<CostEstimate, EstimateError> {
    let tier = PriceTier::from_model(&options.model)?;
    let price = tier.price();

    let instructions = splitter::split_instructions(description, &options.target_files);
    let sub_task_count = instructions.len();

    let total_input_tokens = instructions
        .iter()
        .try_fold(0u64, |acc, text| acc.checked_add(count_tokens(text)))
        .ok_or(EstimateError::TokenOverflow)?;
    let total_output_tokens = (sub_task_count as u64)
        .checked_mul(options.average_output_tokens)
        .ok_or(EstimateError::TokenOverflow)?;

    let input_cost = price.input_cost(total_input_tokens);
    let output_cost = price.output_cost(total_output_tokens);

    tracing::debug!(
        model = tier.as_str(),
        sub_task_count,
        total_input_tokens,
        total_output_tokens,
        "cost estimated"
    );

    Ok(CostEstimate {
        model: tier,
        total_input_tokens,
        total_output_tokens,
        average_output_tokens: options.average_output_tokens,
        input_cost,
        output_cost,
        total_cost: price.cost(total_input_tokens, total_output_tokens),
        sub_task_count,
        estimated_time: splitter::format_estimated_time(sub_task_count),
    })
}
