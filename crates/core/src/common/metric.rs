//! Derived ratio values.
//!
//! Every ratio in the reports (IPC, CPI, hit rate, accuracy, mispredictions
//! per instruction) is a [`Metric`]. A zero denominator yields the explicit
//! undefined value instead of `NaN`, infinity, or a placeholder number.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A derived ratio that may be undefined.
///
/// Serializes as a JSON number, or `null` when undefined. Displays as the
/// number (honouring the formatter precision) or `undefined`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metric(Option<f64>);

impl Metric {
    /// The undefined value.
    pub const UNDEFINED: Self = Self(None);

    /// Wraps a known value.
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self(Some(value))
    }

    /// Computes `num / den`, undefined when `den == 0`.
    #[inline]
    pub fn ratio(num: u64, den: u64) -> Self {
        if den == 0 {
            Self::UNDEFINED
        } else {
            Self::new(num as f64 / den as f64)
        }
    }

    /// Returns the value if defined.
    #[inline]
    pub const fn value(self) -> Option<f64> {
        self.0
    }

    /// Returns `true` when the ratio has no defined value.
    #[inline]
    pub const fn is_undefined(self) -> bool {
        self.0.is_none()
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.0, f.precision()) {
            (Some(v), Some(p)) => write!(f, "{v:.p$}"),
            (Some(v), None) => write!(f, "{v}"),
            (None, _) => f.write_str("undefined"),
        }
    }
}
