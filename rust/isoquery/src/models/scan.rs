use serde::{
    Deserialize,
    Serialize,
};

use crate::errors::{
    DataProcessingError,
    Result,
};
use crate::utils::{
    binary_search_range_by_key,
    TupleRange,
};

/// A single centroided scan.
///
/// `mz` is sorted ascending and aligned with `intensity`. The `scan_num` is the
/// position of the scan inside its [`crate::Sample`], it gets assigned when
/// the sample is built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scan {
    pub scan_num: usize,
    pub rt: f32,
    pub ms_level: u8,
    pub mz: Vec<f64>,
    pub intensity: Vec<f32>,
}

impl Scan {
    pub fn try_new(rt: f32, ms_level: u8, mz: Vec<f64>, intensity: Vec<f32>) -> Result<Self> {
        if mz.len() != intensity.len() {
            return Err(DataProcessingError::ExpectedSlicesSameLength {
                expected: mz.len(),
                other: intensity.len(),
                context: "Scan::try_new",
            }
            .into());
        }
        if !mz.windows(2).all(|w| w[0] <= w[1]) {
            return Err(DataProcessingError::ExpectedSortedData {
                context: "Scan::try_new (mz)",
            }
            .into());
        }
        Ok(Self {
            scan_num: 0,
            rt,
            ms_level,
            mz,
            intensity,
        })
    }

    /// Index range of the data points whose m/z falls inside `mz_range`.
    pub fn find_matching_mzs(&self, mz_range: TupleRange<f64>) -> std::ops::Range<usize> {
        binary_search_range_by_key(&self.mz, mz_range, |x| *x)
    }

    /// Most intense point inside `mz_range` as `(mz, intensity)`.
    pub fn max_in_range(&self, mz_range: TupleRange<f64>) -> Option<(f64, f32)> {
        let range = self.find_matching_mzs(mz_range);
        self.mz[range.clone()]
            .iter()
            .zip(self.intensity[range].iter())
            .fold(None, |acc: Option<(f64, f32)>, (&mz, &inten)| match acc {
                Some((_, best)) if best >= inten => acc,
                _ => Some((mz, inten)),
            })
    }

    pub fn sum_in_range(&self, mz_range: TupleRange<f64>) -> f32 {
        let range = self.find_matching_mzs(mz_range);
        self.intensity[range].iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan() -> Scan {
        Scan::try_new(
            1.0,
            1,
            vec![100.0, 181.0707, 181.0712, 182.0741, 300.0],
            vec![5.0, 100.0, 300.0, 20.0, 7.0],
        )
        .unwrap()
    }

    #[test]
    fn test_matching_mzs() {
        let scan = scan();
        let range = TupleRange::try_new(181.07, 181.08).unwrap();
        assert_eq!(scan.find_matching_mzs(range), 1..3);
        assert_eq!(scan.max_in_range(range), Some((181.0712, 300.0)));
        assert_eq!(scan.sum_in_range(range), 400.0);
    }

    #[test]
    fn test_no_match() {
        let scan = scan();
        let range = TupleRange::try_new(400.0, 401.0).unwrap();
        assert_eq!(scan.max_in_range(range), None);
        assert_eq!(scan.sum_in_range(range), 0.0);
    }

    #[test]
    fn test_rejects_bad_arrays() {
        assert!(Scan::try_new(1.0, 1, vec![1.0, 2.0], vec![1.0]).is_err());
        assert!(Scan::try_new(1.0, 1, vec![2.0, 1.0], vec![1.0, 1.0]).is_err());
    }
}
