// kernels/transit_light_curve/src/lib.rs

// Exoplanet Transit Light-Curve Kernel
//
// This library synthesizes mock flux-vs-time light curves (periodic transit
// dips with correlated noise) and renders any time-ordered series of flux
// samples as an SVG line chart. All computations use f64.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod chart;
pub mod series_stats;
pub mod synthetic;
pub mod transit_model;

pub use chart::{build_scales, path_data, render_svg, ChartConfig, Domain, Scales};
pub use series_stats::SeriesStats;
pub use synthetic::{generate, generate_with, RedNoise};
pub use transit_model::transit_profile;

// ============================================================================
// DATA MODEL
// ============================================================================

// One observation of the target star
//
// Astronomy: photometry pipelines report brightness as "relative flux",
// normalized so the out-of-transit baseline sits near 1.0. A planet crossing
// the stellar disc blocks a fraction of the light, so flux dips by the
// planet-to-star area ratio (e.g. ~0.0065 for a hot Jupiter around a
// Sun-like star).
//
// A light curve is an ordered Vec<Sample>; callers are responsible for
// supplying time-sorted data to the chart (the path builder preserves input
// order and never sorts).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    // Observation time in days since the start of the window
    pub time: f64,

    // Relative brightness, dimensionless, ~1.0 outside of transit
    pub flux: f64,
}

// ============================================================================
// PARAMETER VALIDATION
// ============================================================================

// Rejected generator parameters
//
// Every field of TransitParams / NoiseParams feeds a division or a
// probability draw somewhere in the sampling loop, so invalid values are
// refused up front instead of surfacing later as NaN/Infinity flux.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParamError {
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    #[error("sample count must be at least 1")]
    NoSamples,

    #[error("transit depth must lie in (0, 1), got {0}")]
    DepthOutOfRange(f64),

    #[error("ingress width must lie in (0, duration/2], got {value} for duration {duration}")]
    IngressOutOfRange { value: f64, duration: f64 },

    #[error("noise correlation alpha must lie in [0, 1), got {0}")]
    AlphaOutOfRange(f64),

    #[error("{name} must be non-negative, got {value}")]
    NegativeAmplitude { name: &'static str, value: f64 },

    #[error("outlier probability must lie in [0, 1], got {0}")]
    ProbabilityOutOfRange(f64),
}

fn require_positive(name: &'static str, value: f64) -> Result<(), ParamError> {
    if !value.is_finite() {
        // Catches NaN and the infinities before the sign check
        return Err(ParamError::NonFinite { name, value });
    }
    if value > 0.0 {
        Ok(())
    } else {
        Err(ParamError::NonPositive { name, value })
    }
}

// ============================================================================
// TRANSIT GEOMETRY PARAMETERS
// ============================================================================

// Geometry of the observation window and the recurring transit event
//
// Astronomy concepts:
// - period: how often the planet crosses the stellar disc. One dip per
//   period.
// - t0: phase offset of the ephemeris. Dips are centered half a period
//   after t0 (at t0 + period/2 + k*period), so t0 itself marks the point
//   of maximum separation. Downstream consumers rely on this indexing;
//   do not "fix" it to center dips at t0.
// - depth: fractional flux lost at full transit, (planet radius / star
//   radius)^2 for a central crossing.
// - duration: total width of the dip, ingress + flat bottom + egress.
// - ingress_width: width of one smoothed ramp. At most duration/2; when it
//   equals duration/2 the flat bottom vanishes (grazing transit).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitParams {
    // Total time span of the observation window (days)
    pub total_days: f64,

    // Number of sampling intervals across total_days.
    // The generator emits samples + 1 points (both endpoints included).
    pub samples: usize,

    // Transit recurrence interval (days)
    pub period: f64,

    // Phase offset of the ephemeris (days)
    pub t0: f64,

    // Fractional flux drop at full transit, in (0, 1)
    pub depth: f64,

    // Total transit width (days)
    pub duration: f64,

    // Width of the smoothed ingress/egress ramp (days)
    pub ingress_width: f64,
}

impl TransitParams {
    // Create a validated parameter set
    //
    // Rejects anything that would feed a divide-by-zero in the sampling or
    // phase-folding math (dt = total_days / samples, phase = t mod period).
    pub fn new(
        total_days: f64,
        samples: usize,
        period: f64,
        t0: f64,
        depth: f64,
        duration: f64,
        ingress_width: f64,
    ) -> Result<Self, ParamError> {
        require_positive("total_days", total_days)?;
        if samples == 0 {
            return Err(ParamError::NoSamples);
        }
        require_positive("period", period)?;
        if !t0.is_finite() {
            return Err(ParamError::NonFinite {
                name: "t0",
                value: t0,
            });
        }
        if !(depth > 0.0 && depth < 1.0) {
            return Err(ParamError::DepthOutOfRange(depth));
        }
        require_positive("duration", duration)?;
        if !(ingress_width > 0.0 && ingress_width <= duration / 2.0) {
            return Err(ParamError::IngressOutOfRange {
                value: ingress_width,
                duration,
            });
        }
        Ok(Self {
            total_days,
            samples,
            period,
            t0,
            depth,
            duration,
            ingress_width,
        })
    }

    // Sampling interval in days
    #[inline]
    pub fn dt(&self) -> f64 {
        self.total_days / self.samples as f64
    }

    // Effective in-transit fraction of one period
    //
    // Math: the flat bottom contributes its full width (duration - 2w) and
    // each cosine ramp of width w contributes half its width (the mean of
    // 0.5*(1 + cos(pi*x)) over x in [0,1] is 0.5), so the mean attenuation
    // over a period is (duration - w) / period.
    //
    // The noise-free mean flux over a whole number of periods is therefore
    // 1 - depth * duty_fraction().
    pub fn duty_fraction(&self) -> f64 {
        (self.duration - self.ingress_width) / self.period
    }

    // Mid-transit instants falling inside [0, total_days], ascending
    //
    // Dips sit at t0 + period/2 + k*period for every integer k; this folds
    // that lattice into the observation window.
    pub fn mid_transit_times(&self) -> Vec<f64> {
        let first = (self.t0 + self.period / 2.0).rem_euclid(self.period);
        let mut times = Vec::new();
        let mut t = first;
        while t <= self.total_days {
            times.push(t);
            t += self.period;
        }
        times
    }
}

// ============================================================================
// NOISE PARAMETERS
// ============================================================================

// Configuration of the stochastic part of the generator
//
// Three independent contributions are summed onto the clean transit curve:
// - correlated ("red") noise: first-order exponential smoothing of the
//   white draws, giving the slow wander real photometry shows (stellar
//   granulation, pointing drift)
// - white noise: a fresh uniform draw per sample, centered at 0
// - outliers: rare, larger perturbations (cosmic-ray hits, bad pixels)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseParams {
    // Red-noise correlation strength in [0, 1). Higher = slower wander.
    pub alpha: f64,

    // Amplification applied to the smoothed input of the red-noise state
    pub gain: f64,

    // Half-width of the uniform white-noise draw
    pub white_amp: f64,

    // Per-sample probability of an outlier perturbation, in [0, 1]
    pub outlier_prob: f64,

    // Half-width of the uniform outlier perturbation
    pub outlier_amp: f64,
}

impl NoiseParams {
    // Create a validated noise configuration
    pub fn new(
        alpha: f64,
        gain: f64,
        white_amp: f64,
        outlier_prob: f64,
        outlier_amp: f64,
    ) -> Result<Self, ParamError> {
        if !(alpha >= 0.0 && alpha < 1.0) {
            return Err(ParamError::AlphaOutOfRange(alpha));
        }
        for (name, value) in [
            ("gain", gain),
            ("white_amp", white_amp),
            ("outlier_amp", outlier_amp),
        ] {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(ParamError::NegativeAmplitude { name, value });
            }
        }
        if !(outlier_prob >= 0.0 && outlier_prob <= 1.0) {
            return Err(ParamError::ProbabilityOutOfRange(outlier_prob));
        }
        Ok(Self {
            alpha,
            gain,
            white_amp,
            outlier_prob,
            outlier_amp,
        })
    }

    // All noise sources disabled; the generator output is then the exact
    // transit curve (useful for shape checks and calibration)
    pub fn quiet() -> Self {
        Self {
            alpha: 0.92,
            gain: 8.0,
            white_amp: 0.0,
            outlier_prob: 0.0,
            outlier_amp: 0.0,
        }
    }
}

impl Default for NoiseParams {
    // Production constants: alpha 0.92 / gain 8 keep the red component a
    // factor of a few above the white floor; 1% outliers at ~half the
    // typical hot-Jupiter depth stay visible without dominating the frame
    fn default() -> Self {
        Self {
            alpha: 0.92,
            gain: 8.0,
            white_amp: 0.0004,
            outlier_prob: 0.01,
            outlier_amp: 0.003,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_params() -> TransitParams {
        TransitParams::new(7.0, 700, 2.0, 1.1, 0.0065, 0.14, 0.06).unwrap()
    }

    #[test]
    fn test_valid_params_accepted() {
        let p = reference_params();
        assert_eq!(p.samples, 700);
        assert!((p.dt() - 0.01).abs() < 1e-12, "dt should be 7/700 = 0.01");
    }

    #[test]
    fn test_non_positive_span_rejected() {
        let err = TransitParams::new(0.0, 700, 2.0, 1.1, 0.0065, 0.14, 0.06).unwrap_err();
        assert_eq!(
            err,
            ParamError::NonPositive {
                name: "total_days",
                value: 0.0
            }
        );
    }

    #[test]
    fn test_zero_samples_rejected() {
        let err = TransitParams::new(7.0, 0, 2.0, 1.1, 0.0065, 0.14, 0.06).unwrap_err();
        assert_eq!(err, ParamError::NoSamples);
    }

    #[test]
    fn test_non_positive_period_rejected() {
        assert!(TransitParams::new(7.0, 700, 0.0, 1.1, 0.0065, 0.14, 0.06).is_err());
        assert!(TransitParams::new(7.0, 700, -2.0, 1.1, 0.0065, 0.14, 0.06).is_err());
    }

    #[test]
    fn test_nan_period_rejected() {
        assert!(TransitParams::new(7.0, 700, f64::NAN, 1.1, 0.0065, 0.14, 0.06).is_err());
    }

    #[test]
    fn test_depth_bounds() {
        assert!(TransitParams::new(7.0, 700, 2.0, 1.1, 0.0, 0.14, 0.06).is_err());
        assert!(TransitParams::new(7.0, 700, 2.0, 1.1, 1.0, 0.14, 0.06).is_err());
        assert!(TransitParams::new(7.0, 700, 2.0, 1.1, 0.999, 0.14, 0.06).is_ok());
    }

    #[test]
    fn test_ingress_wider_than_half_duration_rejected() {
        let err = TransitParams::new(7.0, 700, 2.0, 1.1, 0.0065, 0.14, 0.08).unwrap_err();
        assert!(matches!(err, ParamError::IngressOutOfRange { .. }));

        // Exactly duration/2 is the grazing-transit limit and is allowed
        assert!(TransitParams::new(7.0, 700, 2.0, 1.1, 0.0065, 0.14, 0.07).is_ok());
    }

    #[test]
    fn test_duty_fraction_reference() {
        let p = reference_params();
        // (0.14 - 0.06) / 2.0 = 0.04
        assert!((p.duty_fraction() - 0.04).abs() < 1e-12);
    }

    #[test]
    fn test_mid_transit_times_reference() {
        let p = reference_params();
        let times = p.mid_transit_times();
        // t0 + period/2 + k*period folded into [0, 7]
        let expected = [0.1, 2.1, 4.1, 6.1];
        assert_eq!(times.len(), expected.len());
        for (t, e) in times.iter().zip(expected.iter()) {
            assert!((t - e).abs() < 1e-9, "expected mid-transit near {}, got {}", e, t);
        }
    }

    #[test]
    fn test_noise_alpha_bounds() {
        assert!(NoiseParams::new(1.0, 8.0, 0.0004, 0.01, 0.003).is_err());
        assert!(NoiseParams::new(-0.1, 8.0, 0.0004, 0.01, 0.003).is_err());
        assert!(NoiseParams::new(0.0, 8.0, 0.0004, 0.01, 0.003).is_ok());
    }

    #[test]
    fn test_noise_probability_bounds() {
        assert!(NoiseParams::new(0.92, 8.0, 0.0004, 1.5, 0.003).is_err());
        assert!(NoiseParams::new(0.92, 8.0, 0.0004, -0.01, 0.003).is_err());
    }

    #[test]
    fn test_quiet_noise_has_no_amplitudes() {
        let q = NoiseParams::quiet();
        assert_eq!(q.white_amp, 0.0);
        assert_eq!(q.outlier_prob, 0.0);
        assert_eq!(q.outlier_amp, 0.0);
    }
}
