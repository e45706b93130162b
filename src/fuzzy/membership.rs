//! Membership Function Library
//!
//! Pure shaping functions mapping a crisp value onto the unit interval.
//! Each family carries its parameters explicitly so a configured set can be
//! inspected, compared and serialized.

use serde::{Deserialize, Serialize};

/// Default plateau width for triangular functions
pub const DEFAULT_PLATEAU_WIDTH: f64 = 0.1;

/// Membership function families
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MembershipFunction {
    /// Bell curve around `center`
    Gaussian { center: f64, sigma: f64 },
    /// Logistic step at `center`
    Sigmoid { center: f64, slope: f64 },
    /// Triangle `a..c` with a flat top of `plateau_width` centered at `b`
    Triangular {
        a: f64,
        b: f64,
        c: f64,
        plateau_width: f64,
    },
    /// Trapezoid, zero outside `a..d` and one on `b..=c`
    Trapezoidal { a: f64, b: f64, c: f64, d: f64 },
}

impl MembershipFunction {
    /// Gaussian with the given standard deviation
    pub fn gaussian(center: f64, sigma: f64) -> crate::Result<Self> {
        if !center.is_finite() || !sigma.is_finite() || sigma == 0.0 {
            return Err(crate::Error::Configuration(format!(
                "gaussian requires finite center and non-zero sigma, got center={center}, sigma={sigma}"
            )));
        }
        Ok(Self::Gaussian { center, sigma })
    }

    /// Gaussian with unit standard deviation
    pub fn gaussian_unit(center: f64) -> crate::Result<Self> {
        Self::gaussian(center, 1.0)
    }

    /// Sigmoid with the given slope
    pub fn sigmoid(center: f64, slope: f64) -> crate::Result<Self> {
        if !center.is_finite() || !slope.is_finite() {
            return Err(crate::Error::Configuration(format!(
                "sigmoid requires finite parameters, got center={center}, slope={slope}"
            )));
        }
        Ok(Self::Sigmoid { center, slope })
    }

    /// Sigmoid with unit slope
    pub fn sigmoid_unit(center: f64) -> crate::Result<Self> {
        Self::sigmoid(center, 1.0)
    }

    /// Triangular with the default plateau width
    pub fn triangular(a: f64, b: f64, c: f64) -> crate::Result<Self> {
        Self::triangular_with_plateau(a, b, c, DEFAULT_PLATEAU_WIDTH)
    }

    /// Triangular with an explicit plateau width
    pub fn triangular_with_plateau(a: f64, b: f64, c: f64, plateau_width: f64) -> crate::Result<Self> {
        if ![a, b, c, plateau_width].iter().all(|v| v.is_finite()) {
            return Err(crate::Error::Configuration(format!(
                "triangular parameters must be finite, got ({a}, {b}, {c}, plateau {plateau_width})"
            )));
        }
        if !(a <= b && b <= c && a < c) {
            return Err(crate::Error::Configuration(format!(
                "triangular requires a <= b <= c and a < c, got ({a}, {b}, {c})"
            )));
        }
        if plateau_width < 0.0 {
            return Err(crate::Error::Configuration(format!(
                "plateau width must be >= 0, got {plateau_width}"
            )));
        }
        Ok(Self::Triangular {
            a,
            b,
            c,
            plateau_width,
        })
    }

    /// Trapezoidal; parameters must be monotonically non-decreasing
    pub fn trapezoidal(a: f64, b: f64, c: f64, d: f64) -> crate::Result<Self> {
        if ![a, b, c, d].iter().all(|v| v.is_finite()) {
            return Err(crate::Error::Configuration(format!(
                "trapezoidal parameters must be finite, got ({a}, {b}, {c}, {d})"
            )));
        }
        if !(a <= b && b <= c && c <= d) {
            return Err(crate::Error::Configuration(format!(
                "trapezoidal requires a <= b <= c <= d, got ({a}, {b}, {c}, {d})"
            )));
        }
        Ok(Self::Trapezoidal { a, b, c, d })
    }

    /// Re-check parameters, e.g. after deserializing a profile
    pub fn validate(&self) -> crate::Result<()> {
        match *self {
            Self::Gaussian { center, sigma } => Self::gaussian(center, sigma).map(|_| ()),
            Self::Sigmoid { center, slope } => Self::sigmoid(center, slope).map(|_| ()),
            Self::Triangular {
                a,
                b,
                c,
                plateau_width,
            } => Self::triangular_with_plateau(a, b, c, plateau_width).map(|_| ()),
            Self::Trapezoidal { a, b, c, d } => Self::trapezoidal(a, b, c, d).map(|_| ()),
        }
    }

    /// Evaluate membership for a crisp value
    pub fn evaluate(&self, x: f64) -> f64 {
        match *self {
            Self::Gaussian { center, sigma } => (-((x - center) / sigma).powi(2) / 2.0).exp(),
            Self::Sigmoid { center, slope } => 1.0 / (1.0 + (-slope * (x - center)).exp()),
            Self::Triangular {
                a,
                b,
                c,
                plateau_width,
            } => {
                let (plateau_start, plateau_end) = triangular_plateau(a, b, c, plateau_width);
                if x <= a || x >= c {
                    0.0
                } else if x >= plateau_start && x <= plateau_end {
                    1.0
                } else if x < plateau_start {
                    (x - a) / (plateau_start - a)
                } else {
                    (c - x) / (c - plateau_end)
                }
            }
            Self::Trapezoidal { a, b, c, d } => {
                if x <= a || x >= d {
                    0.0
                } else if x >= b && x <= c {
                    1.0
                } else if x < b {
                    (x - a) / (b - a)
                } else {
                    (d - x) / (d - c)
                }
            }
        }
    }

    /// Interval outside of which membership is zero, if bounded
    pub fn support(&self) -> Option<(f64, f64)> {
        match *self {
            Self::Triangular { a, c, .. } => Some((a, c)),
            Self::Trapezoidal { a, d, .. } => Some((a, d)),
            Self::Gaussian { .. } | Self::Sigmoid { .. } => None,
        }
    }

    /// Interval where membership is exactly one, if any
    pub fn core(&self) -> Option<(f64, f64)> {
        match *self {
            Self::Triangular {
                a,
                b,
                c,
                plateau_width,
            } => Some(triangular_plateau(a, b, c, plateau_width)),
            Self::Trapezoidal { b, c, .. } => Some((b, c)),
            Self::Gaussian { center, .. } => Some((center, center)),
            Self::Sigmoid { .. } => None,
        }
    }
}

/// Plateau bounds of a triangular function, clipped to its feet
fn triangular_plateau(a: f64, b: f64, c: f64, plateau_width: f64) -> (f64, f64) {
    let half = plateau_width / 2.0;
    ((b - half).max(a), (b + half).min(c))
}
