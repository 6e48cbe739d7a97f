//! Randomized generator of valid SPIR-V compute shaders.
//!
//! A shader is grown top-down from an abstract root statement. At every
//! step a weighted delegator picks one concrete variant of the requested
//! category, and the variant's routine searches the current scope for
//! operands that fit its typing rules. When nothing fits, the variant is
//! excluded and the delegator draws again.
//!
//! # Usage
//!
//! ```text
//! let config = GeneratorConfig::with_seed(7);
//! let shader = generate_shader(&config)?;
//! let text = shader.to_text()?;
//! ```
//!
//! # Modules
//!
//! - [`config`]: configuration and its validation
//! - [`session`]: per-shader weights, random source and budget
//! - [`context`]: scope tree and operand search
//! - [`generate`]: the delegator and one routine per variant
//! - [`recondition`]: rewrites that remove undefined behavior

pub mod config;
pub mod context;
mod error;
pub mod generate;
pub mod predicates;
mod program;
pub mod recondition;
pub mod session;
pub mod weights;

pub use config::{
    BetaBinomialParams, ConfigError, GaussianParams, GeneratorConfig, ParamRange, WeightingPolicy,
};
pub use context::{Context, NumericKind};
pub use error::{GenError, GenResult, Outcome};
pub use generate::{Block, Emitted, Generator};
pub use program::generate_shader;
pub use recondition::recondition;
pub use session::Session;
pub use weights::WeightTable;
