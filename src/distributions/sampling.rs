//! Seeded sampling streams
//!
//! Each stream owns its own generator so drawing from one never shifts the sequence
//! seen by another.

use rand::distributions::WeightedIndex;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Exp, LogNormal};
use thiserror::Error;

use crate::parameters::PROBABILITY_TOLERANCE;

/// Errors raised when a stream is built from invalid parameters
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistributionError {
    /// A parameter is outside the distribution's domain
    #[error("Invalid {distribution} parameters: {reason}")]
    InvalidParameters {
        /// Distribution family
        distribution: &'static str,
        /// What was wrong
        reason: String,
    },
}

impl DistributionError {
    fn invalid(distribution: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameters { distribution, reason: reason.into() }
    }
}

/// A stream of random draws
pub trait Sampler {
    /// Type of a single draw
    type Output;

    /// Draw one value
    fn sample(&mut self) -> Self::Output;

    /// Draw `n` values, identical to calling [`Sampler::sample`] `n` times
    fn sample_n(&mut self, n: usize) -> Vec<Self::Output> {
        (0..n).map(|_| self.sample()).collect()
    }

    /// Seed the stream was created with
    fn seed(&self) -> u64;
}

/// Exponential distribution parameterised by its mean
#[derive(Debug, Clone)]
pub struct Exponential {
    mean: f64,
    seed: u64,
    dist: Exp<f64>,
    rng: ChaCha8Rng,
}

impl Exponential {
    /// Create a stream with the given mean
    pub fn new(mean: f64, seed: u64) -> Result<Self, DistributionError> {
        if !mean.is_finite() || mean <= 0.0 {
            return Err(DistributionError::invalid("exponential", format!("mean {} must be positive", mean)));
        }
        let dist = Exp::new(1.0 / mean)
            .map_err(|e| DistributionError::invalid("exponential", e.to_string()))?;
        Ok(Self { mean, seed, dist, rng: ChaCha8Rng::seed_from_u64(seed) })
    }

    /// Mean of the distribution
    pub fn mean(&self) -> f64 {
        self.mean
    }
}

impl Sampler for Exponential {
    type Output = f64;

    fn sample(&mut self) -> f64 {
        self.dist.sample(&mut self.rng)
    }

    fn seed(&self) -> u64 {
        self.seed
    }
}

/// Lognormal distribution parameterised by the mean and standard deviation of the
/// lognormal itself rather than of the underlying normal
#[derive(Debug, Clone)]
pub struct Lognormal {
    mean: f64,
    sd: f64,
    seed: u64,
    dist: LogNormal<f64>,
    rng: ChaCha8Rng,
}

impl Lognormal {
    /// Create a stream with the given mean and standard deviation
    pub fn new(mean: f64, sd: f64, seed: u64) -> Result<Self, DistributionError> {
        if !mean.is_finite() || mean <= 0.0 {
            return Err(DistributionError::invalid("lognormal", format!("mean {} must be positive", mean)));
        }
        if !sd.is_finite() || sd < 0.0 {
            return Err(DistributionError::invalid("lognormal", format!("sd {} must not be negative", sd)));
        }
        let (mu, sigma) = Self::normal_moments(mean, sd);
        let dist = LogNormal::new(mu, sigma)
            .map_err(|e| DistributionError::invalid("lognormal", e.to_string()))?;
        Ok(Self { mean, sd, seed, dist, rng: ChaCha8Rng::seed_from_u64(seed) })
    }

    /// Mean and standard deviation of the underlying normal distribution
    pub fn normal_moments(mean: f64, sd: f64) -> (f64, f64) {
        let variance = sd * sd;
        let sigma_sq = (1.0 + variance / (mean * mean)).ln();
        let mu = mean.ln() - sigma_sq / 2.0;
        (mu, sigma_sq.sqrt())
    }

    /// Mean of the distribution
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Standard deviation of the distribution
    pub fn sd(&self) -> f64 {
        self.sd
    }
}

impl Sampler for Lognormal {
    type Output = f64;

    fn sample(&mut self) -> f64 {
        self.dist.sample(&mut self.rng)
    }

    fn seed(&self) -> u64 {
        self.seed
    }
}

/// Discrete distribution over a fixed set of outcomes
#[derive(Debug, Clone)]
pub struct DiscreteEmpirical<T> {
    values: Vec<T>,
    probabilities: Vec<f64>,
    seed: u64,
    dist: WeightedIndex<f64>,
    rng: ChaCha8Rng,
}

impl<T: Clone> DiscreteEmpirical<T> {
    /// Create a stream choosing `values[i]` with probability `probabilities[i]`
    ///
    /// The probabilities must be non-negative and sum to one.
    pub fn new(values: Vec<T>, probabilities: Vec<f64>, seed: u64) -> Result<Self, DistributionError> {
        if values.is_empty() || values.len() != probabilities.len() {
            return Err(DistributionError::invalid(
                "discrete",
                format!("{} values for {} probabilities", values.len(), probabilities.len()),
            ));
        }
        if probabilities.iter().any(|p| !p.is_finite() || *p < 0.0) {
            return Err(DistributionError::invalid("discrete", "probabilities must not be negative"));
        }
        let sum: f64 = probabilities.iter().sum();
        if (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(DistributionError::invalid("discrete", format!("probabilities sum to {}", sum)));
        }
        let dist = WeightedIndex::new(&probabilities)
            .map_err(|e| DistributionError::invalid("discrete", e.to_string()))?;
        Ok(Self { values, probabilities, seed, dist, rng: ChaCha8Rng::seed_from_u64(seed) })
    }

    /// Possible outcomes
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Probability of each outcome
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }
}

impl<T: Clone> Sampler for DiscreteEmpirical<T> {
    type Output = T;

    fn sample(&mut self) -> T {
        let index = self.dist.sample(&mut self.rng);
        self.values[index].clone()
    }

    fn seed(&self) -> u64 {
        self.seed
    }
}
