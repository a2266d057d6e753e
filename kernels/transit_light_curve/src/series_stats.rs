// Light-curve summary statistics

use crate::Sample;

// ============================================================================
// SERIES STATISTICS
// ============================================================================

// Aggregate statistics over one series, plus detected flux minima
//
// The minima finder is a windowed scan: a sample counts as a dip bottom if
// nothing within +/- window samples is brighter-than-it-is-deep (it is the
// minimum of its window) and it sits in the lower half of the series' flux
// range. The second condition keeps the flat out-of-transit baseline from
// producing spurious "minima" out of noise wiggles.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesStats {
    pub count: usize,
    pub t_start: f64,
    pub t_end: f64,
    pub flux_min: f64,
    pub flux_max: f64,
    pub flux_mean: f64,

    // (time, flux) of each detected local minimum, ascending in time
    pub minima: Vec<(f64, f64)>,
}

impl SeriesStats {
    // Compute statistics over a time-ordered series
    //
    // window is the half-width (in samples) of the minima scan; it should
    // comfortably exceed the transit duration in samples so each dip yields
    // one detection, while staying below the period so neighboring dips
    // stay separate.
    pub fn from_samples(data: &[Sample], window: usize) -> Self {
        if data.is_empty() {
            return Self {
                count: 0,
                t_start: 0.0,
                t_end: 0.0,
                flux_min: 0.0,
                flux_max: 0.0,
                flux_mean: 0.0,
                minima: Vec::new(),
            };
        }

        let count = data.len();
        let flux_min = data.iter().map(|s| s.flux).fold(f64::INFINITY, f64::min);
        let flux_max = data.iter().map(|s| s.flux).fold(f64::NEG_INFINITY, f64::max);
        let flux_mean = data.iter().map(|s| s.flux).sum::<f64>() / count as f64;

        // Only flux below this line can count as a dip bottom
        let dip_threshold = flux_mean - 0.5 * (flux_mean - flux_min);

        let mut minima = Vec::new();
        for i in 0..count {
            let flux = data[i].flux;
            if flux > dip_threshold {
                continue;
            }

            let lo = i.saturating_sub(window);
            let hi = (i + window).min(count - 1);

            // Minimum of the window; ties resolve to the earliest index so
            // a flat dip bottom yields exactly one detection
            let is_min = (lo..=hi).all(|j| data[j].flux >= flux)
                && (lo..i).all(|j| data[j].flux > flux);
            if is_min {
                minima.push((data[i].time, flux));
            }
        }

        Self {
            count,
            t_start: data[0].time,
            t_end: data[count - 1].time,
            flux_min,
            flux_max,
            flux_mean,
            minima,
        }
    }

    pub fn report(&self) -> String {
        format!(
            "Series Stats: n={}, span=[{:.3}, {:.3}] d, flux=[{:.6}, {:.6}], mean={:.6}, minima={}",
            self.count,
            self.t_start,
            self.t_end,
            self.flux_min,
            self.flux_max,
            self.flux_mean,
            self.minima.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{synthetic::generate, NoiseParams, TransitParams};

    #[test]
    fn test_empty_series() {
        let stats = SeriesStats::from_samples(&[], 10);
        assert_eq!(stats.count, 0);
        assert!(stats.minima.is_empty());
    }

    #[test]
    fn test_basic_aggregates() {
        let data = vec![
            Sample { time: 0.0, flux: 1.0 },
            Sample { time: 1.0, flux: 0.8 },
            Sample { time: 2.0, flux: 1.2 },
        ];
        let stats = SeriesStats::from_samples(&data, 1);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.t_start, 0.0);
        assert_eq!(stats.t_end, 2.0);
        assert_eq!(stats.flux_min, 0.8);
        assert_eq!(stats.flux_max, 1.2);
        assert!((stats.flux_mean - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_detects_reference_transits() {
        let p = TransitParams::new(7.0, 700, 2.0, 1.1, 0.0065, 0.14, 0.06).unwrap();
        let series = generate(&p, &NoiseParams::quiet(), 42);
        let stats = SeriesStats::from_samples(&series, 20);

        // One dip per mid-transit inside the window: 0.1, 2.1, 4.1, 6.1
        assert_eq!(stats.minima.len(), 4, "got minima at {:?}", stats.minima);
        for ((t, flux), expected) in stats.minima.iter().zip([0.1, 2.1, 4.1, 6.1]) {
            assert!(
                (t - expected).abs() < 0.05,
                "minimum at {} should sit near {}",
                t,
                expected
            );
            assert!(
                (flux - 0.9935).abs() < 1e-9,
                "dip bottom should be 1 - depth, got {}",
                flux
            );
        }
    }

    #[test]
    fn test_flat_dip_bottom_yields_single_detection() {
        // Three consecutive samples share the exact minimum value
        let mut data: Vec<Sample> = (0..50)
            .map(|i| Sample {
                time: i as f64,
                flux: 1.0,
            })
            .collect();
        for i in 20..23 {
            data[i].flux = 0.99;
        }
        let stats = SeriesStats::from_samples(&data, 5);
        assert_eq!(stats.minima.len(), 1);
        assert_eq!(stats.minima[0], (20.0, 0.99), "earliest index of the plateau wins");
    }

    #[test]
    fn test_correlated_noise_does_not_fake_minima() {
        // Red + white noise an order of magnitude below the depth: the
        // baseline wiggle must stay above the dip threshold, so every
        // detection lands on a real transit
        let p = TransitParams::new(7.0, 700, 2.0, 1.1, 0.0065, 0.14, 0.06).unwrap();
        let n = NoiseParams::new(0.92, 8.0, 0.0002, 0.0, 0.0).unwrap();
        let series = generate(&p, &n, 3);
        let stats = SeriesStats::from_samples(&series, 20);
        assert!(!stats.minima.is_empty());
        for (t, _) in &stats.minima {
            let near_dip = [0.1, 2.1, 4.1, 6.1]
                .iter()
                .any(|expected| (t - expected).abs() < 0.3);
            assert!(near_dip, "spurious minimum detected at t={}", t);
        }
    }

    #[test]
    fn test_report_mentions_count() {
        let data = vec![Sample { time: 0.0, flux: 1.0 }];
        let stats = SeriesStats::from_samples(&data, 1);
        assert!(stats.report().contains("n=1"));
    }
}
