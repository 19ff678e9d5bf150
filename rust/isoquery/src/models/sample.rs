use tracing::trace;

use super::eic::{
    Eic,
    EicType,
};
use super::scan::Scan;
use super::tolerance::MassCutoff;
use crate::errors::{
    DataProcessingError,
    Result,
};
use crate::utils::correlation::pearson_correlation;
use crate::utils::TupleRange;

pub type SampleId = usize;

/// Raw data of one acquisition.
///
/// Scans are kept in acquisition order and their `scan_num` is their index,
/// so [`Sample::get_scan`] is a plain lookup.
#[derive(Debug, Clone)]
pub struct Sample {
    pub id: SampleId,
    pub name: String,
    scans: Vec<Scan>,
    min_rt: f32,
    max_rt: f32,
}

impl Sample {
    pub fn try_new(id: SampleId, name: impl Into<String>, mut scans: Vec<Scan>) -> Result<Self> {
        if !scans.windows(2).all(|w| w[0].rt <= w[1].rt) {
            return Err(DataProcessingError::ExpectedSortedData {
                context: "Sample::try_new (scan rt)",
            }
            .into());
        }
        for (i, scan) in scans.iter_mut().enumerate() {
            scan.scan_num = i;
        }
        let min_rt = scans.first().map(|s| s.rt).unwrap_or(0.0);
        let max_rt = scans.last().map(|s| s.rt).unwrap_or(0.0);
        Ok(Self {
            id,
            name: name.into(),
            scans,
            min_rt,
            max_rt,
        })
    }

    pub fn get_scan(&self, scan_num: usize) -> Option<&Scan> {
        self.scans.get(scan_num)
    }

    pub fn min_rt(&self) -> f32 {
        self.min_rt
    }

    pub fn max_rt(&self) -> f32 {
        self.max_rt
    }

    pub fn rt_range(&self) -> TupleRange<f32> {
        TupleRange::try_new(self.min_rt, self.max_rt)
            .expect("scans are sorted by rt on construction")
    }

    /// Mean time between consecutive MS1 scans, `None` with fewer than two.
    pub fn avg_scan_time(&self) -> Option<f32> {
        let ms1_rts: Vec<f32> = self
            .scans
            .iter()
            .filter(|s| s.ms_level == 1)
            .map(|s| s.rt)
            .collect();
        if ms1_rts.len() < 2 {
            return None;
        }
        let total: f32 = ms1_rts.windows(2).map(|w| w[1] - w[0]).sum();
        Some(total / (ms1_rts.len() - 1) as f32)
    }

    /// Builds the chromatogram of `mz_range` over the scans of `ms_level`
    /// whose rt falls in `rt_range`.
    ///
    /// Every scan in the window contributes a point, scans without signal in
    /// the m/z window contribute a zero.
    pub fn eic(
        &self,
        mz_range: TupleRange<f64>,
        rt_range: TupleRange<f32>,
        ms_level: u8,
        eic_type: EicType,
    ) -> Eic {
        let mut eic = Eic::new(self.id);
        let first = self.scans.partition_point(|s| s.rt < rt_range.start());
        for scan in self.scans[first..]
            .iter()
            .take_while(|s| s.rt <= rt_range.end())
            .filter(|s| s.ms_level == ms_level)
        {
            let (mz, intensity) = match eic_type {
                EicType::Max => scan.max_in_range(mz_range).unwrap_or((0.0, 0.0)),
                EicType::Sum => {
                    let mz = scan.max_in_range(mz_range).map(|x| x.0).unwrap_or(0.0);
                    (mz, scan.sum_in_range(mz_range))
                }
            };
            eic.push(scan.scan_num, scan.rt, mz, intensity);
        }
        eic
    }

    /// Chromatographic shape similarity between the traces of two masses.
    ///
    /// Both traces are MS1 chromatograms over `rt_range`, each with its own
    /// `mass_cutoff` window. Undefined correlations (empty window, flat trace)
    /// are reported as 0.
    pub fn correlation(
        &self,
        mz1: f64,
        mz2: f64,
        mass_cutoff: &MassCutoff,
        rt_range: TupleRange<f32>,
        eic_type: EicType,
    ) -> f32 {
        let (w1, w2) = match (mass_cutoff.try_mz_range(mz1), mass_cutoff.try_mz_range(mz2)) {
            (Ok(w1), Ok(w2)) => (w1, w2),
            (Err(e), _) | (_, Err(e)) => {
                trace!("No correlation for {} and {}: {}", mz1, mz2, e);
                return 0.0;
            }
        };
        let e1 = self.eic(w1, rt_range, 1, eic_type);
        let e2 = self.eic(w2, rt_range, 1, eic_type);
        match pearson_correlation(&e1.intensity, &e2.intensity) {
            Ok(c) if c.is_finite() => c,
            Ok(_) => {
                trace!(
                    "Flat trace correlating {} and {} in sample {}",
                    mz1,
                    mz2,
                    self.name
                );
                0.0
            }
            Err(e) => {
                trace!(
                    "No correlation for {} and {} in sample {}: {}",
                    mz1,
                    mz2,
                    self.name,
                    e
                );
                0.0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gaussian(rt: f32, apex: f32, height: f32) -> f32 {
        height * (-((rt - apex).powi(2)) / (2.0 * 0.1_f32.powi(2))).exp()
    }

    fn sample() -> Sample {
        let scans = (0..50)
            .map(|i| {
                let rt = 9.0 + i as f32 * 0.04;
                Scan::try_new(
                    rt,
                    1,
                    vec![181.0707, 182.0741, 250.0],
                    vec![
                        gaussian(rt, 10.0, 1000.0),
                        gaussian(rt, 10.0, 60.0),
                        if i % 2 == 0 { 100.0 } else { 5.0 },
                    ],
                )
                .unwrap()
            })
            .collect();
        Sample::try_new(0, "s1", scans).unwrap()
    }

    #[test]
    fn test_scan_numbers_and_bounds() {
        let s = sample();
        assert_eq!(s.get_scan(7).unwrap().scan_num, 7);
        assert!(s.get_scan(50).is_none());
        assert!((s.min_rt() - 9.0).abs() < 1e-6);
        assert!((s.max_rt() - 10.96).abs() < 1e-4);
        assert!((s.avg_scan_time().unwrap() - 0.04).abs() < 1e-4);
    }

    #[test]
    fn test_eic_window() {
        let s = sample();
        let mz = MassCutoff::Ppm(10.0).mz_range(181.0707);
        let rt = TupleRange::try_new(9.5, 10.5).unwrap();
        let eic = s.eic(mz, rt, 1, EicType::Max);
        assert!(eic.rt.iter().all(|x| (9.5..=10.5).contains(x)));
        assert!((eic.max_intensity() - 1000.0).abs() < 1.0);
    }

    #[test]
    fn test_correlation() {
        let s = sample();
        let cutoff = MassCutoff::Ppm(10.0);
        let rt = TupleRange::try_new(9.5, 10.5).unwrap();
        let coeluting = s.correlation(182.0741, 181.0707, &cutoff, rt, EicType::Max);
        assert!(coeluting > 0.99, "{}", coeluting);
        let noise = s.correlation(250.0, 181.0707, &cutoff, rt, EicType::Max);
        assert!(noise < 0.5, "{}", noise);
        let missing = s.correlation(400.0, 181.0707, &cutoff, rt, EicType::Max);
        assert_eq!(missing, 0.0);
        let nan = s.correlation(f64::NAN, 181.0707, &cutoff, rt, EicType::Max);
        assert_eq!(nan, 0.0);
    }

    #[test]
    fn test_unsorted_scans() {
        let scans = vec![
            Scan::try_new(2.0, 1, vec![], vec![]).unwrap(),
            Scan::try_new(1.0, 1, vec![], vec![]).unwrap(),
        ];
        assert!(Sample::try_new(0, "bad", scans).is_err());
    }
}
