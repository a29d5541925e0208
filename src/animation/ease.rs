use std::f64::consts::FRAC_PI_2;

/// Easing curves mapping normalized time to normalized progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    Linear,
    #[default]
    InSine,
    OutSine,
    InOutSine,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
}

impl Ease {
    pub const ALL: [Ease; 10] = [
        Ease::Linear,
        Ease::InSine,
        Ease::OutSine,
        Ease::InOutSine,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
    ];

    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InSine => {
                if t == 1.0 {
                    1.0
                } else {
                    1.0 - (t * FRAC_PI_2).cos()
                }
            }
            Self::OutSine => (t * FRAC_PI_2).sin(),
            Self::InOutSine => {
                if t == 1.0 {
                    1.0
                } else {
                    -((std::f64::consts::PI * t).cos() - 1.0) / 2.0
                }
            }
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
        }
    }

    /// Eased value at `elapsed` of a `duration`-long change from `start` by `delta`.
    ///
    /// A non-positive duration jumps straight to `start + delta`.
    pub fn interpolate(self, elapsed: f64, start: f64, delta: f64, duration: f64) -> f64 {
        if duration <= 0.0 {
            return start + delta;
        }
        start + delta * self.apply(elapsed / duration)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
