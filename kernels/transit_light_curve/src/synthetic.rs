// Synthetic light-curve generator
//
// Produces a deterministic transit shape with randomized noise on top. The
// randomness is injected by the caller, so a seeded StdRng gives fully
// reproducible series (same seed, same curve).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::transit_model::transit_profile;
use crate::{NoiseParams, Sample, TransitParams};

// ============================================================================
// RED NOISE ACCUMULATOR
// ============================================================================

// First-order exponential smoothing state for correlated noise
//
// Each step mixes a fresh white draw into the running state:
//
//   state = alpha * state + (1 - alpha) * wn * gain
//
// With alpha near 1 the state wanders slowly, which is what gives real
// photometry its low-frequency "red" component. The state is explicit here
// rather than hidden in a closure so a generation run is a plain fold over
// sample indices.
#[derive(Debug, Clone, Copy)]
pub struct RedNoise {
    state: f64,
    alpha: f64,
    gain: f64,
}

impl RedNoise {
    pub fn new(alpha: f64, gain: f64) -> Self {
        Self {
            state: 0.0,
            alpha,
            gain,
        }
    }

    // Advance the smoothing state by one sample and return it
    pub fn advance(&mut self, wn: f64) -> f64 {
        self.state = self.alpha * self.state + (1.0 - self.alpha) * wn * self.gain;
        self.state
    }

    // Current state without advancing
    #[inline]
    pub fn value(&self) -> f64 {
        self.state
    }
}

// ============================================================================
// SERIES GENERATION
// ============================================================================

// Generate a light curve with a seeded random source
//
// Convenience wrapper around generate_with; the same seed always produces
// the same series for a given parameter set.
pub fn generate(params: &TransitParams, noise: &NoiseParams, seed: u64) -> Vec<Sample> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate_with(params, noise, &mut rng)
}

// Generate a light curve using the supplied random source
//
// Emits samples + 1 points at t = i * dt for i in 0..=samples, covering
// [0, total_days] with both endpoints included. The result is collected
// eagerly; chart rendering needs random access to the whole series anyway.
//
// Per sample:
// - wn: uniform white draw in [-white_amp, white_amp]
// - red-noise state advanced with wn; contribution is state + wn
// - with probability outlier_prob, an independent uniform perturbation in
//   [-outlier_amp, outlier_amp]
// - flux = 1 - depth * transit_profile(t) + noise + outlier
pub fn generate_with<R: Rng>(
    params: &TransitParams,
    noise: &NoiseParams,
    rng: &mut R,
) -> Vec<Sample> {
    let dt = params.dt();
    let mut red = RedNoise::new(noise.alpha, noise.gain);
    let mut series = Vec::with_capacity(params.samples + 1);

    for i in 0..=params.samples {
        let t = i as f64 * dt;

        // gen_range panics on an empty range, so zero amplitudes skip the
        // draw entirely
        let wn = if noise.white_amp > 0.0 {
            rng.gen_range(-noise.white_amp..noise.white_amp)
        } else {
            0.0
        };
        let rn = red.advance(wn);

        let outlier = if noise.outlier_prob > 0.0
            && noise.outlier_amp > 0.0
            && rng.gen::<f64>() < noise.outlier_prob
        {
            rng.gen_range(-noise.outlier_amp..noise.outlier_amp)
        } else {
            0.0
        };

        let flux = 1.0 - params.depth * transit_profile(t, params) + rn + wn + outlier;
        series.push(Sample { time: t, flux });
    }

    series
}
