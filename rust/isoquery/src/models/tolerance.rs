use serde::{
    Deserialize,
    Serialize,
};

use crate::errors::Result;
use crate::utils::TupleRange;

/// Mass tolerance used to build m/z windows around a target mass.
///
/// Example:
/// ```
/// use isoquery::MassCutoff;
///
/// let cutoff = MassCutoff::default();
/// assert_eq!(cutoff, MassCutoff::Ppm(10.0));
/// ```
///
/// Convention:
/// The cutoff is a symmetric, positive half-width. A cutoff of 5 mDa on a
/// mass of 100 means the window (99.995, 100.005).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum MassCutoff {
    #[serde(rename = "ppm")]
    Ppm(f64),
    #[serde(rename = "mda")]
    MilliDalton(f64),
}

impl Default for MassCutoff {
    fn default() -> Self {
        MassCutoff::Ppm(10.0)
    }
}

impl MassCutoff {
    /// Half-width of the window, in daltons, at the given mass.
    ///
    /// ```
    /// use isoquery::MassCutoff;
    ///
    /// assert!((MassCutoff::Ppm(20.0).value_at(500.0) - 0.01).abs() < 1e-12);
    /// assert!((MassCutoff::MilliDalton(5.0).value_at(500.0) - 0.005).abs() < 1e-12);
    /// ```
    pub fn value_at(&self, mz: f64) -> f64 {
        match self {
            MassCutoff::Ppm(ppm) => mz.abs() * ppm.abs() / 1e6,
            MassCutoff::MilliDalton(mda) => mda.abs() / 1e3,
        }
    }

    /// Calculate the m/z window `[mz - cutoff, mz + cutoff]`.
    ///
    /// The window is always restricted, m/z must have bounds.
    ///
    /// ```
    /// use isoquery::MassCutoff;
    ///
    /// let range = MassCutoff::Ppm(20.0).mz_range(500.0);
    /// assert!((range.start() - 499.99).abs() < 0.001);
    /// assert!((range.end() - 500.01).abs() < 0.001);
    /// ```
    pub fn mz_range(&self, mz: f64) -> TupleRange<f64> {
        self.try_mz_range(mz).expect(
            "mass cutoff should never result in an invalid range, since the half width is positive",
        )
    }

    /// Same as [`MassCutoff::mz_range`], but errors on a NaN m/z instead of
    /// panicking.
    pub fn try_mz_range(&self, mz: f64) -> Result<TupleRange<f64>> {
        let half_width = self.value_at(mz);
        let range = TupleRange::try_new(mz - half_width, mz + half_width)?;
        Ok(range)
    }
}
