use pm_core::Error;

/// Smallest island that can produce a landmark.
pub const MIN_LANDMARK_ISLAND: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct AcuteParams {
    /// Maximum chordal distance (pixels) for the neighbor search. Half of it is
    /// the gap-bridging distance used when grouping acute points.
    pub win: u32,
    /// Vertices whose angle is `<= threshold_deg` are acute.
    pub threshold_deg: f64,
}

impl Default for AcuteParams {
    fn default() -> Self {
        Self {
            win: 20,
            threshold_deg: 60.0,
        }
    }
}

impl AcuteParams {
    pub fn new(win: u32, threshold_deg: f64) -> Self {
        Self { win, threshold_deg }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.win == 0 {
            return Err(Error::InvalidWindow);
        }
        if !(0.0..=180.0).contains(&self.threshold_deg) {
            return Err(Error::InvalidThreshold);
        }
        Ok(())
    }

    pub fn min_contour_len(&self) -> usize {
        min_contour_len(self.win)
    }

    /// Chordal distance below which a gap between acute points is bridged.
    pub fn bridge_dist(&self) -> f64 {
        f64::from(self.win) / 2.0
    }
}

/// Minimum number of contour points for a window of `win` pixels.
pub fn min_contour_len(win: u32) -> usize {
    (2 * win as usize + 1).max(3)
}
