use isoquery::{
    Sample,
    TupleRange,
};

/// Scans visited on each side of the parent peak scan.
pub const SCAN_NEIGHBORHOOD: usize = 2;

/// Highest intensity inside `mz_range` over the scans around `scan_num`.
///
/// Returns `(intensity, rt)`, `(0, 0)` when nothing matched. The rt is the
/// one of the *last* scan with a matching point, it is not tracked together
/// with the maximum, so it can belong to a different scan than the returned
/// intensity.
pub fn sample_intensity(sample: &Sample, scan_num: usize, mz_range: TupleRange<f64>) -> (f32, f32) {
    let mut highest_intensity = 0.0_f32;
    let mut rt = 0.0_f32;

    let first = scan_num.saturating_sub(SCAN_NEIGHBORHOOD);
    for i in first..=scan_num + SCAN_NEIGHBORHOOD {
        let Some(scan) = sample.get_scan(i) else {
            continue;
        };
        for pos in scan.find_matching_mzs(mz_range) {
            if scan.intensity[pos] > highest_intensity {
                highest_intensity = scan.intensity[pos];
            }
            rt = scan.rt;
        }
    }
    (highest_intensity, rt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use isoquery::Scan;

    fn sample(intensities: &[f32]) -> Sample {
        let scans = intensities
            .iter()
            .enumerate()
            .map(|(i, &inten)| {
                let (mz, int) = if inten > 0.0 {
                    (vec![100.0, 182.074], vec![1.0, inten])
                } else {
                    (vec![100.0], vec![1.0])
                };
                Scan::try_new(i as f32, 1, mz, int).unwrap()
            })
            .collect();
        Sample::try_new(0, "s", scans).unwrap()
    }

    fn window() -> TupleRange<f64> {
        TupleRange::try_new(182.07, 182.08).unwrap()
    }

    #[test]
    fn test_max_over_neighborhood() {
        // scans 3..=7 are visited around scan 5, scan 9 is out of reach
        let s = sample(&[0.0, 0.0, 900.0, 10.0, 20.0, 50.0, 40.0, 30.0, 0.0, 1000.0]);
        let (intensity, _) = sample_intensity(&s, 5, window());
        assert_eq!(intensity, 50.0);
    }

    #[test]
    fn test_rt_is_last_match_not_max() {
        let s = sample(&[0.0, 0.0, 0.0, 10.0, 80.0, 20.0, 5.0, 0.0, 0.0]);
        let (intensity, rt) = sample_intensity(&s, 4, window());
        assert_eq!(intensity, 80.0);
        // the max lives in scan 4, the last matching scan is 6
        assert_eq!(rt, 6.0);
    }

    #[test]
    fn test_neighborhood_clipped_at_edges() {
        let s = sample(&[30.0, 10.0, 0.0]);
        let (intensity, rt) = sample_intensity(&s, 0, window());
        assert_eq!((intensity, rt), (30.0, 1.0));
    }

    #[test]
    fn test_no_match() {
        let s = sample(&[0.0, 0.0, 0.0, 0.0]);
        assert_eq!(sample_intensity(&s, 1, window()), (0.0, 0.0));
    }
}
