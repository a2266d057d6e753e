// SVG light-curve chart rendering
//
// Pure string assembly: a series of samples plus display configuration in,
// one SVG document out. No retained state, no I/O.

use crate::Sample;

// ============================================================================
// DISPLAY CONFIGURATION
// ============================================================================

/// Display configuration for one render call
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    /// Total SVG width in pixels
    pub width: f64,

    /// Total SVG height in pixels
    pub height: f64,

    /// Frame inset on all four sides; the plot area is the rectangle
    /// [padding, width - padding] x [padding, height - padding]
    pub padding: f64,

    /// Draw a small circle at every sample on top of the line
    pub show_points: bool,

    /// Chart title, centered above the plot area
    pub title: String,

    /// Fixed x-axis range; falls back to the data's time min/max when None.
    /// Useful to force a consistent display window across renders.
    pub x_domain: Option<[f64; 2]>,

    /// Fixed y-axis range; falls back to the data's flux min/max when None
    pub y_domain: Option<[f64; 2]>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 300.0,
            padding: 65.0,
            show_points: false,
            title: "Transit Light Curve".to_string(),
            x_domain: None,
            y_domain: None,
        }
    }
}

// ============================================================================
// AXIS SCALING
// ============================================================================

/// The numeric ranges mapped to pixel space, after applying any overrides.
/// Recomputed on every render, never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

/// Linear domain-to-pixel maps for one render call
#[derive(Debug, Clone, Copy)]
pub struct Scales {
    pub domain: Domain,
    width: f64,
    height: f64,
    padding: f64,
}

impl Scales {
    /// Map a time value to a pixel x coordinate.
    ///
    /// [min_x, max_x] maps linearly onto [padding, width - padding]. A
    /// collapsed domain (max_x == min_x) pins every input to the padding
    /// offset instead of dividing by zero.
    pub fn x(&self, v: f64) -> f64 {
        let Domain { min_x, max_x, .. } = self.domain;
        if max_x == min_x {
            return self.padding;
        }
        self.padding + (v - min_x) / (max_x - min_x) * (self.width - self.padding * 2.0)
    }

    /// Map a flux value to a pixel y coordinate.
    ///
    /// Inverted relative to x: [min_y, max_y] maps onto
    /// [height - padding, padding], so brighter flux sits higher on screen.
    /// A collapsed domain pins every input to the bottom of the plot area.
    pub fn y(&self, v: f64) -> f64 {
        let Domain { min_y, max_y, .. } = self.domain;
        if max_y == min_y {
            return self.height - self.padding;
        }
        self.height - self.padding - (v - min_y) / (max_y - min_y) * (self.height - self.padding * 2.0)
    }
}

/// Build the pixel-space scale functions for a series.
///
/// Domain bounds come from the overrides when supplied, otherwise from the
/// data's time/flux extremes.
pub fn build_scales(
    data: &[Sample],
    width: f64,
    height: f64,
    padding: f64,
    x_domain: Option<[f64; 2]>,
    y_domain: Option<[f64; 2]>,
) -> Scales {
    let (min_x, max_x) = match x_domain {
        Some([lo, hi]) => (lo, hi),
        None => data.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| {
            (lo.min(s.time), hi.max(s.time))
        }),
    };
    let (min_y, max_y) = match y_domain {
        Some([lo, hi]) => (lo, hi),
        None => data.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| {
            (lo.min(s.flux), hi.max(s.flux))
        }),
    };

    Scales {
        domain: Domain {
            min_x,
            max_x,
            min_y,
            max_y,
        },
        width,
        height,
        padding,
    }
}

// ============================================================================
// PATH & TICKS
// ============================================================================

/// Build the SVG path description connecting all samples in input order:
/// `M x y` for the first point, `L x y` for each one after.
///
/// The series is not sorted here; unsorted input draws a scrambled path and
/// that is the caller's problem, matching the rest of the pipeline which
/// assumes time-ordered data.
pub fn path_data(data: &[Sample], scales: &Scales) -> String {
    let mut d = String::new();
    for (i, s) in data.iter().enumerate() {
        let x = scales.x(s.time);
        let y = scales.y(s.flux);
        if i == 0 {
            d.push_str(&format!("M {:.2} {:.2}", x, y));
        } else {
            d.push_str(&format!(" L {:.2} {:.2}", x, y));
        }
    }
    d
}

/// X-axis tick values: every integer between ceil(min_x) and floor(max_x)
pub fn x_tick_values(domain: &Domain) -> Vec<f64> {
    let start = domain.min_x.ceil() as i64;
    let end = domain.max_x.floor() as i64;
    (start..=end).map(|t| t as f64).collect()
}

/// Label for an x tick.
///
/// Non-zero ticks are shown multiplied by 100 ("1" renders as "100"); zero
/// stays "0". This reproduces the labeling of the reference figure the
/// chart was built to match. It reads like a unit conversion but is only a
/// display convention; treat with suspicion before reusing elsewhere.
pub fn x_tick_label(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{}00", value as i64)
    }
}

/// Y-axis tick values: fixed 0.002 flux steps from ceil(min_y/step)*step,
/// deliberately running one step past floor(max_y/step)*step so the frame
/// looks slightly taller than the data. The count is computed with integer
/// arithmetic so the overshoot does not depend on float rounding.
pub fn y_tick_values(domain: &Domain) -> Vec<f64> {
    const STEP: f64 = 0.002;
    let start = (domain.min_y / STEP).ceil() * STEP;
    let end = (domain.max_y / STEP).floor() * STEP;
    let count = ((end - start) / STEP).round() as i64 + 2;
    (0..count)
        .map(|i| round6(start + i as f64 * STEP))
        .collect()
}

// Round to 6 decimal places to keep accumulated step error out of labels
fn round6(v: f64) -> f64 {
    (v * 1e6).round() / 1e6
}

// ============================================================================
// SVG ASSEMBLY
// ============================================================================

/// Render a complete SVG document for the series.
///
/// Empty input renders a placeholder message and skips all scale and tick
/// computation.
pub fn render_svg(data: &[Sample], config: &ChartConfig) -> String {
    if data.is_empty() {
        return format!(
            r##"<svg width="{w}" height="{h}" xmlns="http://www.w3.org/2000/svg">
  <rect x="0" y="0" width="{w}" height="{h}" fill="rgb(15,23,42)"/>
  <text x="{cx}" y="{cy}" text-anchor="middle" fill="#94a3b8" font-size="13">No light curve data to display.</text>
</svg>"##,
            w = config.width,
            h = config.height,
            cx = config.width / 2.0,
            cy = config.height / 2.0,
        );
    }

    let scales = build_scales(
        data,
        config.width,
        config.height,
        config.padding,
        config.x_domain,
        config.y_domain,
    );
    let domain = scales.domain;

    let left_axis_x = config.padding;
    let bottom_axis_y = config.height - config.padding;
    let right_edge_x = config.width - config.padding;

    // Tick marks, grid lines and labels
    let mut ticks = String::new();
    for t in x_tick_values(&domain) {
        let x = scales.x(t);
        ticks.push_str(&format!(
            r##"  <line x1="{x:.2}" y1="{ay:.2}" x2="{x:.2}" y2="{tick_end:.2}" stroke="#64748b"/>
  <line x1="{x:.2}" y1="{top:.2}" x2="{x:.2}" y2="{ay:.2}" stroke="#1f2937" opacity="0.4"/>
  <text x="{x:.2}" y="{label_y:.2}" text-anchor="middle" fill="#94a3b8" font-size="10">{label}</text>
"##,
            x = x,
            ay = bottom_axis_y,
            tick_end = bottom_axis_y + 5.0,
            top = config.padding,
            label_y = bottom_axis_y + 18.0,
            label = x_tick_label(t),
        ));
    }
    for v in y_tick_values(&domain) {
        let y = scales.y(v);
        ticks.push_str(&format!(
            r##"  <line x1="{tick_start:.2}" y1="{y:.2}" x2="{ax:.2}" y2="{y:.2}" stroke="#64748b"/>
  <line x1="{ax:.2}" y1="{y:.2}" x2="{right:.2}" y2="{y:.2}" stroke="#1f2937" opacity="0.4"/>
  <text x="{label_x:.2}" y="{label_y:.2}" text-anchor="end" fill="#94a3b8" font-size="10">{label:.3}</text>
"##,
            tick_start = left_axis_x - 5.0,
            ax = left_axis_x,
            y = y,
            right = right_edge_x,
            label_x = left_axis_x - 8.0,
            label_y = y + 3.0,
            label = v,
        ));
    }

    // Optional sample markers
    let mut points = String::new();
    if config.show_points {
        for s in data {
            points.push_str(&format!(
                r##"  <circle cx="{:.2}" cy="{:.2}" r="1" fill="#60a5fa"/>
"##,
                scales.x(s.time),
                scales.y(s.flux)
            ));
        }
    }

    let path = path_data(data, &scales);

    format!(
        r##"<svg width="{w}" height="{h}" xmlns="http://www.w3.org/2000/svg">
  <rect x="0" y="0" width="{w}" height="{h}" fill="rgb(15,23,42)"/>
  <text x="{title_x}" y="{title_y:.2}" text-anchor="middle" fill="#cbd5e1" font-size="14">{title}</text>
  <line x1="{ax:.2}" y1="{pad:.2}" x2="{ax:.2}" y2="{ay:.2}" stroke="#475569" stroke-width="1"/>
  <line x1="{ax:.2}" y1="{ay:.2}" x2="{right:.2}" y2="{ay:.2}" stroke="#475569" stroke-width="1"/>
{ticks}  <text x="{xcap_x}" y="{xcap_y:.2}" text-anchor="middle" fill="#94a3b8" font-size="12">Time (Days)</text>
  <text x="{ycap_x:.2}" y="{ycap_y}" text-anchor="middle" fill="#94a3b8" font-size="12" transform="rotate(-90, {ycap_x:.2}, {ycap_y})">Relative Brightness</text>
  <path d="{path}" fill="none" stroke="#60a5fa" stroke-width="2"/>
{points}</svg>"##,
        w = config.width,
        h = config.height,
        title_x = config.width / 2.0,
        title_y = config.padding / 1.5,
        title = config.title,
        ax = left_axis_x,
        pad = config.padding,
        ay = bottom_axis_y,
        right = right_edge_x,
        ticks = ticks,
        xcap_x = config.width / 2.0,
        xcap_y = config.height - config.padding / 3.0,
        ycap_x = config.padding / 3.0,
        ycap_y = config.height / 2.0,
        path = path,
        points = points,
    )
}
