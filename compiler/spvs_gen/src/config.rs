//! Generator configuration.
//!
//! Every field has a default, so an empty JSON object is a valid
//! configuration. [`GeneratorConfig::validate`] runs before a session
//! starts; the generator assumes a validated configuration afterwards.

use serde::{Deserialize, Serialize};
use spvs_ir::{Capability, Category, OpKind};

/// How the root statement table is weighted at the start of a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightingPolicy {
    /// Every statement variant weighs 1.
    Uniform,
    /// Discretized Gaussian over the ordered variant list.
    Gaussian,
    /// Beta-Binomial pmf over the ordered variant list.
    #[default]
    BetaBinomial,
}

/// Closed interval a session parameter is drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParamRange {
    pub min: f64,
    pub max: f64,
}

impl ParamRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    fn is_valid(self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

/// Gaussian parameters, as fractions of the variant count.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaussianParams {
    pub mean: ParamRange,
    pub std_dev: ParamRange,
}

impl Default for GaussianParams {
    fn default() -> Self {
        Self {
            mean: ParamRange::new(0.0, 1.0),
            std_dev: ParamRange::new(0.1, 0.5),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BetaBinomialParams {
    pub alpha: ParamRange,
    pub beta: ParamRange,
}

impl Default for BetaBinomialParams {
    fn default() -> Self {
        Self {
            alpha: ParamRange::new(0.5, 5.0),
            beta: ParamRange::new(0.5, 5.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Session seed. The same seed and configuration give the same shader.
    pub seed: u64,
    pub max_types: usize,
    pub max_constants: usize,
    /// Including `main`.
    pub max_functions: usize,
    /// Scope depth at which selection constructs stop nesting. Function
    /// bodies sit at depth 1.
    pub max_depth: usize,
    /// Probability of generating one more statement in a block.
    pub statement_probability: f64,
    /// Probability, rolled once per statement dispatch, of re-drawing the
    /// statement weights mid-session. Type and constant dispatches do not
    /// roll it.
    pub mutation_probability: f64,
    /// Statements one session may produce before it is abandoned.
    pub instruction_budget: usize,
    pub weighting: WeightingPolicy,
    pub gaussian: GaussianParams,
    pub beta_binomial: BetaBinomialParams,
    /// Type opcodes never sampled, e.g. `"OpTypeMatrix"`.
    pub excluded_types: Vec<String>,
    /// Enables `OpExtInst` over `GLSL.std.450`.
    pub extended_instructions: bool,
    /// Width capabilities types may use. `Shader` is always declared.
    pub capabilities: Vec<Capability>,
    pub storage_buffers: usize,
    pub private_variables: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            max_types: 20,
            max_constants: 30,
            max_functions: 3,
            max_depth: 3,
            statement_probability: 0.95,
            mutation_probability: 0.02,
            instruction_budget: 3000,
            weighting: WeightingPolicy::default(),
            gaussian: GaussianParams::default(),
            beta_binomial: BetaBinomialParams::default(),
            excluded_types: Vec::new(),
            extended_instructions: true,
            capabilities: vec![Capability::Int64, Capability::Float64],
            storage_buffers: 2,
            private_variables: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("`{field}` must be within [0, 1], got {value}")]
    ProbabilityOutOfRange { field: &'static str, value: f64 },
    #[error("`{field}` range is empty or not finite ({min}..={max})")]
    EmptyRange {
        field: &'static str,
        min: f64,
        max: f64,
    },
    #[error("`{field}` must be at least 1")]
    ZeroMaximum { field: &'static str },
    #[error("unknown excluded type `{0}`")]
    UnknownExcludedType(String),
    #[error("excluded types leave no numeric scalar type")]
    NoNumericType,
}

impl GeneratorConfig {
    /// A default configuration with the given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("statement_probability", self.statement_probability),
            ("mutation_probability", self.mutation_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ProbabilityOutOfRange { field, value });
            }
        }

        for (field, range) in [
            ("gaussian.mean", self.gaussian.mean),
            ("gaussian.std_dev", self.gaussian.std_dev),
            ("beta_binomial.alpha", self.beta_binomial.alpha),
            ("beta_binomial.beta", self.beta_binomial.beta),
        ] {
            if !range.is_valid() {
                return Err(ConfigError::EmptyRange {
                    field,
                    min: range.min,
                    max: range.max,
                });
            }
        }
        if self.gaussian.std_dev.min <= 0.0 {
            return Err(ConfigError::EmptyRange {
                field: "gaussian.std_dev",
                min: self.gaussian.std_dev.min,
                max: self.gaussian.std_dev.max,
            });
        }
        for (field, range) in [
            ("beta_binomial.alpha", self.beta_binomial.alpha),
            ("beta_binomial.beta", self.beta_binomial.beta),
        ] {
            if range.min <= 0.0 {
                return Err(ConfigError::EmptyRange {
                    field,
                    min: range.min,
                    max: range.max,
                });
            }
        }

        for (field, value) in [
            ("max_types", self.max_types),
            ("max_constants", self.max_constants),
            ("max_functions", self.max_functions),
            ("max_depth", self.max_depth),
            ("instruction_budget", self.instruction_budget),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroMaximum { field });
            }
        }

        let excluded = self.excluded_kinds()?;
        if excluded.contains(&OpKind::TypeInt) && excluded.contains(&OpKind::TypeFloat) {
            return Err(ConfigError::NoNumericType);
        }
        Ok(())
    }

    /// Excluded type names resolved to sampled type opcodes.
    pub fn excluded_kinds(&self) -> Result<Vec<OpKind>, ConfigError> {
        self.excluded_types
            .iter()
            .map(|name| {
                Category::Type
                    .members()
                    .iter()
                    .copied()
                    .find(|kind| kind.name() == name)
                    .ok_or_else(|| ConfigError::UnknownExcludedType(name.clone()))
            })
            .collect()
    }

    pub fn is_enabled(&self, capability: Capability) -> bool {
        capability == Capability::Shader || self.capabilities.contains(&capability)
    }

    /// Integer widths types may use. 32 is always available.
    pub fn int_widths(&self) -> Vec<u32> {
        [8, 16, 32, 64]
            .into_iter()
            .filter(|&w| Capability::for_int_width(w).map_or(true, |c| self.is_enabled(c)))
            .collect()
    }

    /// Float widths types may use. 32 is always available.
    pub fn float_widths(&self) -> Vec<u32> {
        [16, 32, 64]
            .into_iter()
            .filter(|&w| Capability::for_float_width(w).map_or(true, |c| self.is_enabled(c)))
            .collect()
    }
}

#[cfg(test)]
mod tests;
