//! Builder utilities for configuring label-space clustering.

use crate::{Result, detect::DetectionMethod, error::KumiwakeError, kumiwake::Kumiwake};

/// Configures and constructs [`Kumiwake`] instances.
///
/// # Examples
/// ```
/// use kumiwake_core::{DetectionMethod, KumiwakeBuilder};
///
/// let kumiwake = KumiwakeBuilder::new()
///     .with_method(DetectionMethod::LabelPropagation)
///     .with_seed(7)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(kumiwake.method(), DetectionMethod::LabelPropagation);
/// ```
#[derive(Debug, Clone)]
pub struct KumiwakeBuilder {
    method: DetectionMethod,
    resolution: f64,
    max_iter: usize,
    seed: Option<u64>,
}

impl Default for KumiwakeBuilder {
    fn default() -> Self {
        Self {
            method: DetectionMethod::Louvain,
            resolution: 1.0,
            max_iter: 100,
            seed: None,
        }
    }
}

impl KumiwakeBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use kumiwake_core::{DetectionMethod, KumiwakeBuilder};
    ///
    /// let builder = KumiwakeBuilder::new();
    /// assert_eq!(builder.method(), DetectionMethod::Louvain);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the community-detection method.
    #[must_use]
    pub const fn with_method(mut self, method: DetectionMethod) -> Self {
        self.method = method;
        self
    }

    /// Returns the configured detection method.
    #[must_use]
    pub const fn method(&self) -> DetectionMethod {
        self.method
    }

    /// Overrides the modularity resolution parameter.
    ///
    /// Only meaningful for [`DetectionMethod::Louvain`]; higher values favour
    /// smaller communities.
    #[must_use]
    pub const fn with_resolution(mut self, resolution: f64) -> Self {
        self.resolution = resolution;
        self
    }

    /// Returns the configured resolution.
    #[must_use]
    pub const fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Overrides the iteration budget of the detection algorithm.
    #[must_use]
    pub const fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Seeds label propagation's sweep order for reproducible runs.
    ///
    /// Ignored by [`DetectionMethod::Louvain`], which is deterministic.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration and constructs a [`Kumiwake`] instance.
    ///
    /// # Errors
    /// Returns [`KumiwakeError::InvalidResolution`] when the resolution is
    /// not a finite, strictly positive number.
    ///
    /// # Examples
    /// ```
    /// use kumiwake_core::{KumiwakeBuilder, KumiwakeError};
    ///
    /// let err = KumiwakeBuilder::new().with_resolution(f64::NAN).build();
    /// assert!(matches!(err, Err(KumiwakeError::InvalidResolution { .. })));
    /// ```
    pub fn build(self) -> Result<Kumiwake> {
        if !self.resolution.is_finite() || self.resolution <= 0.0 {
            return Err(KumiwakeError::InvalidResolution {
                got: self.resolution,
            });
        }
        Ok(Kumiwake::new(
            self.method,
            self.resolution,
            self.max_iter,
            self.seed,
        ))
    }
}
