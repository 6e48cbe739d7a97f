//! Generation session.
//!
//! Everything that used to be process-wide in a generator of this kind
//! (the weight tables, the statement counter, the random source) is a
//! field here. A session is created per shader and never shared, so
//! sessions on different threads cannot disturb each other's weights.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHashSet;
use spvs_ir::{Category, OpKind};
use tracing::debug;

use crate::config::{GeneratorConfig, WeightingPolicy};
use crate::error::GenError;
use crate::weights::{self, WeightTable};

pub struct Session {
    config: GeneratorConfig,
    rng: ChaCha8Rng,
    weights: WeightTable,
    statements: usize,
    excluded_types: Vec<OpKind>,
    /// Categories that lost a variant to infeasibility.
    pruned: FxHashSet<Category>,
}

impl Session {
    /// Start a session. Unknown excluded type names are ignored here;
    /// [`GeneratorConfig::validate`] reports them.
    pub fn new(config: GeneratorConfig) -> Self {
        let excluded_types = config.excluded_kinds().unwrap_or_default();
        debug!(
            seed = config.seed,
            policy = ?config.weighting,
            budget = config.instruction_budget,
            "session start"
        );
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            weights: WeightTable::new(),
            statements: 0,
            excluded_types,
            pruned: FxHashSet::default(),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    pub fn excluded_types(&self) -> &[OpKind] {
        &self.excluded_types
    }

    /// Statements produced so far.
    pub fn statements(&self) -> usize {
        self.statements
    }

    /// Bernoulli draw.
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Draw fresh weights for `category`.
    ///
    /// Only the statement table follows the configured policy; every other
    /// table is uniform. `OpExtInst` weighs 0 unless the extended
    /// instruction set is enabled.
    pub fn parametrize(&mut self, category: Category) {
        let n = category.members().len();
        let mut table = if category == Category::Statement {
            self.policy_weights(n)
        } else {
            weights::uniform(n)
        };
        if !self.config.extended_instructions {
            for (w, &kind) in table.iter_mut().zip(category.members()) {
                if kind == OpKind::ExtInst {
                    *w = 0.0;
                }
            }
        }
        self.weights.install(category, table);
    }

    fn policy_weights(&mut self, n: usize) -> Vec<f64> {
        match self.config.weighting {
            WeightingPolicy::Uniform => {
                debug!(variants = n, "uniform statement weights");
                weights::uniform(n)
            }
            WeightingPolicy::Gaussian => {
                let params = self.config.gaussian;
                let mean_frac = self.draw(params.mean.min, params.mean.max);
                let std_frac = self.draw(params.std_dev.min, params.std_dev.max);
                #[expect(
                    clippy::cast_precision_loss,
                    reason = "variant counts are tiny compared to f64 precision"
                )]
                let len = n as f64;
                let mean = mean_frac * (len - 1.0).max(0.0);
                let std_dev = (std_frac * len).max(f64::MIN_POSITIVE);
                debug!(mean, std_dev, "gaussian statement weights");
                weights::gaussian(n, mean, std_dev)
            }
            WeightingPolicy::BetaBinomial => {
                let params = self.config.beta_binomial;
                let alpha = self.draw(params.alpha.min, params.alpha.max);
                let beta = self.draw(params.beta.min, params.beta.max);
                debug!(alpha, beta, "beta-binomial statement weights");
                weights::beta_binomial(n, alpha, beta)
            }
        }
    }

    fn draw(&mut self, min: f64, max: f64) -> f64 {
        if min >= max {
            min
        } else {
            self.rng.gen_range(min..=max)
        }
    }

    pub fn ensure_parametrized(&mut self, category: Category) {
        if !self.weights.is_parametrized(category) {
            self.parametrize(category);
        }
    }

    /// Pin a variant to weight 0, parametrizing the table first if needed.
    pub fn set_zero_probability(&mut self, category: Category, kind: OpKind) {
        self.ensure_parametrized(category);
        if self.weights.weight(category, kind) != Some(0.0) {
            debug!(%category, %kind, "variant disabled for the session");
        }
        self.weights.set_zero_probability(category, kind);
    }

    /// Zero a variant that could not be completed, for the rest of the
    /// session.
    pub fn prune(&mut self, category: Category, kind: OpKind) {
        self.pruned.insert(category);
        self.set_zero_probability(category, kind);
    }

    /// `true` once some variant of `category` was pruned as infeasible.
    pub fn has_pruned(&self, category: Category) -> bool {
        self.pruned.contains(&category)
    }

    /// Re-draw the statement table with probability `mutation_probability`.
    /// Rolled once per statement dispatch; type and constant dispatches
    /// never re-draw.
    pub fn maybe_mutate(&mut self) {
        if self.chance(self.config.mutation_probability) {
            debug!(
                statements = self.statements,
                "re-parametrizing statement weights"
            );
            self.parametrize(Category::Statement);
        }
    }

    pub fn sample(&mut self, category: Category) -> Option<OpKind> {
        self.weights.sample(category, &mut self.rng)
    }

    /// Fails once the session has produced more statements than allowed.
    pub fn check_budget(&self) -> Result<(), GenError> {
        if self.statements > self.config.instruction_budget {
            return Err(GenError::BudgetExceeded {
                limit: self.config.instruction_budget,
            });
        }
        Ok(())
    }

    pub fn count_statement(&mut self) {
        self.statements += 1;
    }
}
