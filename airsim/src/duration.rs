use crate::{Error, Result, Time};

use rand::Rng;
use rand_distr::{Distribution, Normal, Uniform};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// Source of stage durations, such as turnaround or taxi-out times.
///
/// Sampled values are whole seconds. Use [`DurationModel::constant`] for deterministic runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "DurationSpec", into = "DurationSpec")]
pub struct DurationModel {
    spec: DurationSpec,
    sampler: Sampler,
}

/// Serialized form of a duration model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationSpec {
    /// Always the same value.
    Constant(Time),
    /// Uniformly distributed integers in `min..=max`.
    Uniform {
        /// Lowest value, inclusive.
        min: Time,
        /// Highest value, inclusive.
        max: Time,
    },
    /// Normally distributed, rounded to the nearest second.
    Normal {
        /// Mean duration.
        mean: f64,
        /// Standard deviation.
        std: f64,
    },
}

#[derive(Debug, Clone, Copy)]
enum Sampler {
    Constant(Time),
    Uniform(Uniform<Time>),
    Normal(Normal<f64>),
}

impl DurationModel {
    /// Model always returning `value`.
    #[must_use]
    pub fn constant(value: Time) -> Self {
        Self {
            spec: DurationSpec::Constant(value),
            sampler: Sampler::Constant(value),
        }
    }

    /// Model uniformly sampling integers in `min..=max`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDistribution`] if `min > max`.
    pub fn uniform(min: Time, max: Time) -> Result<Self> {
        if min > max {
            return Err(Error::InvalidDistribution(format!(
                "uniform range {}..={} is empty",
                min, max
            )));
        }
        Ok(Self {
            spec: DurationSpec::Uniform { min, max },
            sampler: Sampler::Uniform(Uniform::new_inclusive(min, max)),
        })
    }

    /// Model sampling a normal distribution, rounded to whole seconds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDistribution`] if `std` is negative or either parameter is not
    /// finite.
    pub fn normal(mean: f64, std: f64) -> Result<Self> {
        if !mean.is_finite() {
            return Err(Error::InvalidDistribution(format!(
                "normal mean {} is not finite",
                mean
            )));
        }
        if !std.is_finite() || std < 0.0 {
            return Err(Error::InvalidDistribution(format!(
                "normal std {} is negative or not finite",
                std
            )));
        }
        let normal = Normal::new(mean, std)
            .map_err(|e| Error::InvalidDistribution(format!("normal({}, {}): {}", mean, std, e)))?;
        Ok(Self {
            spec: DurationSpec::Normal { mean, std },
            sampler: Sampler::Normal(normal),
        })
    }

    /// Draws a duration.
    #[allow(clippy::cast_possible_truncation)]
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Time {
        match &self.sampler {
            Sampler::Constant(value) => *value,
            Sampler::Uniform(uniform) => uniform.sample(rng),
            Sampler::Normal(normal) => normal.sample(rng).round() as Time,
        }
    }
}

impl TryFrom<DurationSpec> for DurationModel {
    type Error = Error;
    fn try_from(spec: DurationSpec) -> Result<Self> {
        match spec {
            DurationSpec::Constant(value) => Ok(Self::constant(value)),
            DurationSpec::Uniform { min, max } => Self::uniform(min, max),
            DurationSpec::Normal { mean, std } => Self::normal(mean, std),
        }
    }
}

impl From<DurationModel> for DurationSpec {
    fn from(model: DurationModel) -> Self {
        model.spec
    }
}

impl Default for DurationModel {
    fn default() -> Self {
        Self::constant(0)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_constant() {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let model = DurationModel::constant(300);
        assert!((0..10).all(|_| model.sample(&mut rng) == 300));
    }

    #[test]
    fn test_uniform_stays_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let model = DurationModel::uniform(-60, 120).unwrap();
        for _ in 0..1000 {
            let value = model.sample(&mut rng);
            assert!((-60..=120).contains(&value));
        }
        assert!(DurationModel::uniform(5, 4).is_err());
    }

    #[test]
    fn test_normal_validation() {
        assert!(DurationModel::normal(600.0, 60.0).is_ok());
        assert!(DurationModel::normal(600.0, -1.0).is_err());
        assert!(DurationModel::normal(f64::NAN, 1.0).is_err());
        assert!(DurationModel::normal(600.0, 0.0).is_ok());
        assert!(matches!(
            DurationModel::normal(600.0, -0.5),
            Err(Error::InvalidDistribution(_))
        ));
        assert!(DurationModel::normal(600.0, f64::NAN).is_err());
        assert!(DurationModel::normal(600.0, f64::INFINITY).is_err());
        assert!(serde_json::from_str::<DurationModel>(
            r#"{"normal": {"mean": 600.0, "std": -60.0}}"#
        )
        .is_err());
    }

    #[test]
    fn test_same_seed_same_samples() {
        let model = DurationModel::normal(600.0, 60.0).unwrap();
        let mut a = ChaCha8Rng::seed_from_u64(3);
        let mut b = ChaCha8Rng::seed_from_u64(3);
        let lhs: Vec<_> = (0..20).map(|_| model.sample(&mut a)).collect();
        let rhs: Vec<_> = (0..20).map(|_| model.sample(&mut b)).collect();
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn test_deserialize() {
        let model: DurationModel = serde_json::from_str(r#"{"constant": 42}"#).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(model.sample(&mut rng), 42);
        let model: DurationModel =
            serde_json::from_str(r#"{"uniform": {"min": 10, "max": 10}}"#).unwrap();
        assert_eq!(model.sample(&mut rng), 10);
        assert!(serde_json::from_str::<DurationModel>(r#"{"uniform": {"min": 10, "max": 9}}"#)
            .is_err());
    }
}
