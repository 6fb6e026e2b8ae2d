/// Pixels per em at size 1: font metrics in this pipeline are authored
/// against a 24px em square.
pub const ONE_EM: f32 = 24.0;

/// Text size specification for a bucket, resolved against zoom. Only
/// uniform (zoom-driven) sizing feeds the placement engine.
#[derive(Clone, Debug, PartialEq)]
pub enum SizeSpec {
    Constant(f32),
    /// `(zoom, size)` stops in ascending zoom order, linearly
    /// interpolated and clamped at the ends.
    ZoomInterpolated { stops: Vec<(f32, f32)> },
}

impl SizeSpec {
    pub fn evaluate_for_zoom(&self, zoom: f32) -> f32 {
        match self {
            Self::Constant(size) => *size,
            Self::ZoomInterpolated { stops } => {
                debug_assert!(!stops.is_empty(), "size stops may not be empty");
                if stops.is_empty() {
                    return 16.0;
                }
                let first = stops[0];
                if zoom <= first.0 {
                    return first.1;
                }
                for pair in stops.windows(2) {
                    let (z0, s0) = pair[0];
                    let (z1, s1) = pair[1];
                    if zoom <= z1 {
                        let t = if z1 > z0 { (zoom - z0) / (z1 - z0) } else { 1.0 };
                        return s0 + (s1 - s0) * t;
                    }
                }
                stops[stops.len() - 1].1
            }
        }
    }

    /// Per-feature size. Data-driven sizing is resolved upstream during
    /// layout; by placement time every feature shares the zoom-evaluated
    /// size.
    pub fn evaluate_for_feature(&self, zoom: f32) -> f32 {
        self.evaluate_for_zoom(zoom)
    }
}

/// Conversion factor from ems to tile units: one em spans
/// `layout_text_size` pixels, and `text_pixel_ratio` pixels make one tile
/// unit.
pub fn text_box_scale(text_pixel_ratio: f32, layout_text_size: f32) -> f32 {
    layout_text_size / text_pixel_ratio
}
