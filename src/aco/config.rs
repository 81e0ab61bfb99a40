//! ACO configuration.

use crate::error::AcoError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Exponents of the ant movement rule.
///
/// An ant at node `i` scores each unvisited neighbor `j` as
///
/// ```text
/// tau(i,j)^alpha * (1 / d(i,j))^beta * attr(j)^gamma * (1 / d_origin(i))^delta
/// ```
///
/// A zero exponent disables its factor.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Exponents {
    /// Pheromone influence.
    pub alpha: f64,
    /// Inverse-distance influence.
    pub beta: f64,
    /// Node attractiveness influence.
    pub gamma: f64,
    /// Inverse distance-to-origin influence.
    pub delta: f64,
}

impl Default for Exponents {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            beta: 5.0,
            gamma: 1.0,
            delta: 0.2,
        }
    }
}

impl Exponents {
    /// The two-factor rule: pheromone and inverse distance only.
    pub fn classic(alpha: f64, beta: f64) -> Self {
        Self {
            alpha,
            beta,
            gamma: 0.0,
            delta: 0.0,
        }
    }
}

/// Configuration for the ACO path search.
///
/// # Pheromone update
///
/// After every round, all edges decay by `(1 - evaporation_rate)` and each
/// successful ant adds `q / cost` to every edge it walked. Levels never
/// fall below `min_pheromone`.
///
/// # References
///
/// Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a
/// Colony of Cooperating Agents"
///
/// # Examples
///
/// ```
/// use u_aco::aco::AcoConfig;
///
/// let config = AcoConfig::default()
///     .with_num_ants(20)
///     .with_iterations(50)
///     .with_evaporation_rate(0.3)
///     .with_exponents(1.0, 5.0, 0.0, 0.0)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AcoConfig {
    /// Ants released per round. Must be positive.
    pub num_ants: usize,

    /// Number of rounds. Must be positive.
    pub iterations: usize,

    /// Fraction of pheromone lost per round, in `[0, 1)`.
    pub evaporation_rate: f64,

    /// Movement rule exponents.
    pub exponents: Exponents,

    /// Deposit constant `Q`; each ant adds `Q / cost` per edge.
    pub q: f64,

    /// Level assigned to every edge at the start of a search.
    pub initial_pheromone: f64,

    /// Lower bound applied after evaporation.
    pub min_pheromone: f64,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,

    /// Walk the ants of a round on the rayon thread pool.
    ///
    /// Only honored with the `parallel` feature. Results are identical
    /// either way for a given seed.
    pub parallel: bool,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            num_ants: 10,
            iterations: 10,
            evaporation_rate: 0.2,
            exponents: Exponents::default(),
            q: 1.0,
            initial_pheromone: 1.0,
            min_pheromone: 1e-12,
            seed: None,
            parallel: false,
        }
    }
}

impl AcoConfig {
    /// Pheromone and distance only (`gamma = delta = 0`), `beta = 5`.
    pub fn classic() -> Self {
        Self::default().with_exponents(1.0, 5.0, 0.0, 0.0)
    }

    pub fn with_num_ants(mut self, n: usize) -> Self {
        self.num_ants = n;
        self
    }

    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    pub fn with_evaporation_rate(mut self, rate: f64) -> Self {
        self.evaporation_rate = rate;
        self
    }

    pub fn with_exponents(mut self, alpha: f64, beta: f64, gamma: f64, delta: f64) -> Self {
        self.exponents = Exponents {
            alpha,
            beta,
            gamma,
            delta,
        };
        self
    }

    pub fn with_q(mut self, q: f64) -> Self {
        self.q = q;
        self
    }

    pub fn with_initial_pheromone(mut self, level: f64) -> Self {
        self.initial_pheromone = level;
        self
    }

    pub fn with_min_pheromone(mut self, level: f64) -> Self {
        self.min_pheromone = level;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), AcoError> {
        if self.num_ants == 0 {
            return Err(AcoError::invalid("num_ants must be positive"));
        }
        if self.iterations == 0 {
            return Err(AcoError::invalid("iterations must be positive"));
        }
        if !(0.0..1.0).contains(&self.evaporation_rate) {
            return Err(AcoError::invalid(format!(
                "evaporation_rate must be in [0, 1), got {}",
                self.evaporation_rate
            )));
        }
        let Exponents {
            alpha,
            beta,
            gamma,
            delta,
        } = self.exponents;
        for (name, value) in [
            ("alpha", alpha),
            ("beta", beta),
            ("gamma", gamma),
            ("delta", delta),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(AcoError::invalid(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        if !self.q.is_finite() || self.q <= 0.0 {
            return Err(AcoError::invalid(format!("q must be positive, got {}", self.q)));
        }
        if !self.min_pheromone.is_finite() || self.min_pheromone <= 0.0 {
            return Err(AcoError::invalid(format!(
                "min_pheromone must be positive, got {}",
                self.min_pheromone
            )));
        }
        if !self.initial_pheromone.is_finite() || self.initial_pheromone < self.min_pheromone {
            return Err(AcoError::invalid(format!(
                "initial_pheromone must be finite and at least min_pheromone, got {}",
                self.initial_pheromone
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AcoConfig::default();
        assert_eq!(config.num_ants, 10);
        assert_eq!(config.iterations, 10);
        assert!((config.evaporation_rate - 0.2).abs() < 1e-12);
        assert_eq!(config.exponents.alpha, 1.0);
        assert_eq!(config.exponents.beta, 5.0);
        assert_eq!(config.exponents.gamma, 1.0);
        assert!((config.exponents.delta - 0.2).abs() < 1e-12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_classic_disables_extra_factors() {
        let config = AcoConfig::classic();
        assert_eq!(config.exponents, Exponents::classic(1.0, 5.0));
    }

    #[test]
    fn test_validate_zero_ants() {
        let config = AcoConfig::default().with_num_ants(0);
        assert!(matches!(config.validate(), Err(AcoError::InvalidParameter(_))));
    }

    #[test]
    fn test_validate_zero_iterations() {
        let config = AcoConfig::default().with_iterations(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_evaporation_range() {
        assert!(AcoConfig::default().with_evaporation_rate(0.0).validate().is_ok());
        assert!(AcoConfig::default().with_evaporation_rate(1.0).validate().is_err());
        assert!(AcoConfig::default().with_evaporation_rate(-0.1).validate().is_err());
        assert!(AcoConfig::default()
            .with_evaporation_rate(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_negative_exponent() {
        let config = AcoConfig::default().with_exponents(1.0, -2.0, 0.0, 0.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_pheromone_bounds() {
        assert!(AcoConfig::default().with_q(0.0).validate().is_err());
        assert!(AcoConfig::default().with_min_pheromone(0.0).validate().is_err());
        assert!(AcoConfig::default()
            .with_initial_pheromone(1e-20)
            .validate()
            .is_err());
    }
}
