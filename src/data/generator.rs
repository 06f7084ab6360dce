//! Pseudo-random dataset generation

use super::{DataKind, TypedDataset};
use crate::core::{BenchError, Result};

/// Value ranges and seeding for [`DatasetGenerator`]
///
/// # Example
///
/// ```rust
/// use parallel_sort_bench::data::GeneratorConfig;
///
/// let config = GeneratorConfig::new()
///     .with_int_range(-100, 100)
///     .with_string_len(2, 4)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratorConfig {
    /// Smallest generated integer (inclusive)
    pub int_min: i64,
    /// Largest generated integer (inclusive)
    pub int_max: i64,
    /// Lower bound for generated reals (inclusive)
    pub float_min: f64,
    /// Upper bound for generated reals (exclusive)
    pub float_max: f64,
    /// Shortest generated string
    pub string_min_len: usize,
    /// Longest generated string
    pub string_max_len: usize,
    /// Fixed seed for reproducible datasets (None = random seed)
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            // millions to billions, wide enough to need 64-bit comparisons
            int_min: 1_000_000,
            int_max: 10_000_000_000,
            float_min: 1.0,
            float_max: 1_000_000.0,
            string_min_len: 3,
            string_max_len: 12,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Create a configuration with the default ranges
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the inclusive integer range
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_int_range(mut self, min: i64, max: i64) -> Self {
        self.int_min = min;
        self.int_max = max;
        self
    }

    /// Set the half-open real range
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_float_range(mut self, min: f64, max: f64) -> Self {
        self.float_min = min;
        self.float_max = max;
        self
    }

    /// Set the inclusive string length range
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_string_len(mut self, min: usize, max: usize) -> Self {
        self.string_min_len = min;
        self.string_max_len = max;
        self
    }

    /// Use a fixed seed
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.int_min > self.int_max {
            return Err(BenchError::invalid_config(
                "int_range",
                format!("min {} is greater than max {}", self.int_min, self.int_max),
            ));
        }
        if !self.float_min.is_finite() || !self.float_max.is_finite() {
            return Err(BenchError::invalid_config(
                "float_range",
                "bounds must be finite",
            ));
        }
        if self.float_min >= self.float_max {
            return Err(BenchError::invalid_config(
                "float_range",
                format!("min {} must be below max {}", self.float_min, self.float_max),
            ));
        }
        if !(self.float_max - self.float_min).is_finite() {
            return Err(BenchError::invalid_config(
                "float_range",
                "span between bounds overflows",
            ));
        }
        if self.string_min_len == 0 || self.string_min_len > self.string_max_len {
            return Err(BenchError::invalid_config(
                "string_len",
                format!(
                    "need 1 <= min <= max, got {}..={}",
                    self.string_min_len, self.string_max_len
                ),
            ));
        }
        Ok(())
    }
}

/// Fills new datasets with pseudo-random values
///
/// Integers come from the configured range, reals from the configured
/// range, characters from `A..=Z` and strings are lowercase `a..=z` words.
#[derive(Debug)]
pub struct DatasetGenerator {
    config: GeneratorConfig,
    rng: fastrand::Rng,
}

impl DatasetGenerator {
    /// Create a generator with the default ranges and a random seed
    pub fn new() -> Self {
        Self {
            config: GeneratorConfig::default(),
            rng: fastrand::Rng::new(),
        }
    }

    /// Create a generator with a custom configuration
    pub fn with_config(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Ok(Self { config, rng })
    }

    /// Get the generator configuration
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate `size` random elements of `kind`
    ///
    /// # Errors
    ///
    /// - [`BenchError::InvalidSize`] if `size` is 0
    /// - [`BenchError::AllocationFailure`] if the dataset cannot be allocated
    pub fn generate(&mut self, size: usize, kind: DataKind) -> Result<TypedDataset> {
        if size == 0 {
            return Err(BenchError::invalid_size(size));
        }

        let mut dataset = TypedDataset::with_capacity(kind, size)?;
        let rng = &mut self.rng;
        let config = &self.config;

        match &mut dataset {
            TypedDataset::Int64(values) => {
                values.extend((0..size).map(|_| rng.i64(config.int_min..=config.int_max)));
            }
            TypedDataset::Float64(values) => {
                let span = config.float_max - config.float_min;
                values.extend((0..size).map(|_| config.float_min + rng.f64() * span));
            }
            TypedDataset::Char(values) => {
                values.extend((0..size).map(|_| rng.uppercase()));
            }
            TypedDataset::String(values) => {
                for _ in 0..size {
                    let len = rng.usize(config.string_min_len..=config.string_max_len);
                    let mut word = String::new();
                    word.try_reserve_exact(len)
                        .map_err(|_| BenchError::allocation(size, kind.display_name()))?;
                    word.extend((0..len).map(|_| rng.lowercase()));
                    values.push(word);
                }
            }
        }

        log::debug!("generated {} {} elements", size, kind);
        Ok(dataset)
    }
}

impl Default for DatasetGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate a dataset with the default ranges
///
/// ```rust
/// use parallel_sort_bench::{generate_dataset, DataKind};
///
/// let data = generate_dataset(10, DataKind::Int64).unwrap();
/// assert_eq!(data.len(), 10);
/// assert!(generate_dataset(0, DataKind::String).is_err());
/// ```
pub fn generate_dataset(size: usize, kind: DataKind) -> Result<TypedDataset> {
    DatasetGenerator::new().generate(size, kind)
}
