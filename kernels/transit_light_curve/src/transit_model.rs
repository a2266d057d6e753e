// Transit attenuation profile

use std::f64::consts::PI;

use crate::TransitParams;

// ============================================================================
// BOX-WITH-SMOOTHED-EDGES TRANSIT MODEL
// ============================================================================

// Calculate the transit attenuation at time t
//
// Astronomy: while the planet crosses the stellar disc the star loses a
// fixed fraction of its light. The crossing has three phases:
//
// - ingress: the planet slides onto the disc, flux ramps down
// - flat bottom: the planet is fully inside the disc, flux is constant
// - egress: the planet slides off, flux ramps back up
//
// The ramps are modeled with a raised cosine, which is smooth at both ends
// and close to the shape a uniform stellar disc actually produces.
//
// Returns the attenuation factor in [0, 1]:
// - 0 out of transit (no light blocked)
// - 1 at full depth (flat bottom)
// - the cosine ramp value in between
//
// The caller turns this into flux as 1 - depth * transit_profile(t).
//
// Indexing: dips are centered at phase == period/2, i.e. at
// t = t0 + period/2 + k*period. The half-period offset from t0 is part of
// the ephemeris convention used throughout this crate.
pub fn transit_profile(t: f64, params: &TransitParams) -> f64 {
    // Fold t into [0, period). rem_euclid keeps the phase non-negative for
    // times before t0.
    let phase = (t - params.t0).rem_euclid(params.period);

    // Distance from the nearest mid-transit
    let d = (phase - params.period / 2.0).abs();

    let half = params.duration / 2.0;
    if d >= half {
        // Out of transit
        return 0.0;
    }

    let flat_edge = half - params.ingress_width;
    if d <= flat_edge {
        // Flat bottom
        return 1.0;
    }

    // Ramp region: x runs 0 -> 1 from the flat-bottom edge to the contact
    // point, attenuation runs 1 -> 0
    let x = (d - flat_edge) / params.ingress_width;
    0.5 * (1.0 + (PI * x).cos())
}
