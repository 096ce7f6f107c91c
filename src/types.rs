use serde::Serialize;

/// Estimated eye centre in integer pixel coordinates.
///
/// `x` counts columns, `y` counts rows, both from the top-left corner of the
/// analysed crop. The sentinel `(-1, -1)` means the image was too small to
/// analyse (fewer than 4 rows and 4 columns); callers must check
/// [`EyeCenter::is_valid`] before using the coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct EyeCenter {
    pub x: i32,
    pub y: i32,
}

impl EyeCenter {
    /// Sentinel returned for images the estimator cannot analyse.
    pub const INVALID: EyeCenter = EyeCenter { x: -1, y: -1 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// True unless this is the too-small-image sentinel.
    pub fn is_valid(&self) -> bool {
        self.x >= 0 && self.y >= 0
    }
}

/// Compact per-frame result with the latency of the estimation call.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct CenterResult {
    pub center: EyeCenter,
    /// Best objective value found by the search (0 for degenerate inputs).
    pub score: f32,
    pub latency_ms: f64,
}
