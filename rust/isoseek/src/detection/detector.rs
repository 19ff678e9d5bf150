use std::sync::atomic::{
    AtomicBool,
    Ordering,
};
use std::sync::Arc;
use std::time::Instant;

use isoquery::{
    Sample,
    SignalExtractor,
};
use rayon::prelude::*;
use tracing::{
    debug,
    info,
};

use super::accumulator::IsotopeAccumulator;
use super::filters::CandidateFilter;
use crate::config::IsotopeParameters;
use crate::errors::Result;
use crate::isotopes::ElementFlags;
use crate::models::{
    AttachmentView,
    PeakGroup,
};
use crate::traits::{
    Classifier,
    IsotopeGenerator,
    PeakFilter,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoCompound,
    EmptyFormula,
    NoSamples,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionOutcome {
    /// Nothing to look for, the parent was left untouched.
    Skipped(SkipReason),
    /// The stop flag fired mid-run, partial results were dropped.
    Cancelled,
    /// `found` features were built, `attached` of them made it into the view.
    Completed { found: usize, attached: usize },
}

/// Counts over the outcomes of a batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DetectionSummary {
    pub completed: usize,
    pub skipped: usize,
    pub cancelled: usize,
    pub found: usize,
    pub attached: usize,
}

impl DetectionSummary {
    fn fold(mut self, outcome: &DetectionOutcome) -> Self {
        match outcome {
            DetectionOutcome::Skipped(_) => self.skipped += 1,
            DetectionOutcome::Cancelled => self.cancelled += 1,
            DetectionOutcome::Completed { found, attached } => {
                self.completed += 1;
                self.found += found;
                self.attached += attached;
            }
        }
        self
    }
}

impl<'a> FromIterator<&'a DetectionOutcome> for DetectionSummary {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = &'a DetectionOutcome>,
    {
        iter.into_iter()
            .fold(DetectionSummary::default(), DetectionSummary::fold)
    }
}

/// Finds the isotopologues of parent groups across a set of samples.
///
/// A detector only borrows its configuration and collaborators, every call to
/// [`IsotopeDetector::detect`] keeps its own state, so the same detector can
/// process many parents at once (see [`IsotopeDetector::detect_all`]).
///
/// For every sample and every theoretical isotope of the parent formula the
/// detector:
/// 1. samples the isotope signal around the parent peak,
/// 2. runs the abundance and coelution gates,
/// 3. extracts the isotope chromatogram and keeps the peak closest to the
///    parent.
///
/// Features found this way are labeled, scored and attached to the parent
/// in the [`AttachmentView`] the detector was built for.
pub struct IsotopeDetector<'a> {
    pub(super) params: &'a IsotopeParameters,
    pub(super) samples: &'a [Sample],
    pub(super) flags: ElementFlags,
    pub(super) view: AttachmentView,
    pub(super) generator: &'a dyn IsotopeGenerator,
    pub(super) extractor: &'a dyn SignalExtractor,
    pub(super) peak_filter: &'a dyn PeakFilter,
    pub(super) classifier: Option<&'a dyn Classifier>,
    stop: Option<Arc<AtomicBool>>,
}

impl<'a> IsotopeDetector<'a> {
    pub fn new(
        params: &'a IsotopeParameters,
        samples: &'a [Sample],
        flags: ElementFlags,
        view: AttachmentView,
        generator: &'a dyn IsotopeGenerator,
        extractor: &'a dyn SignalExtractor,
        peak_filter: &'a dyn PeakFilter,
    ) -> Self {
        Self {
            params,
            samples,
            flags,
            view,
            generator,
            extractor,
            peak_filter,
            classifier: None,
            stop: None,
        }
    }

    pub fn with_classifier(self, classifier: &'a dyn Classifier) -> Self {
        Self {
            classifier: Some(classifier),
            ..self
        }
    }

    /// Flag polled before each sample; setting it aborts the running calls.
    pub fn with_stop_flag(self, stop: Arc<AtomicBool>) -> Self {
        Self {
            stop: Some(stop),
            ..self
        }
    }

    fn is_stopped(&self) -> bool {
        self.stop
            .as_ref()
            .is_some_and(|x| x.load(Ordering::Relaxed))
    }

    /// Searches the isotopes of `parent` and attaches them as children.
    ///
    /// Parents without a formula, or runs without samples, are left as they
    /// are. Errors only come from the collaborators (isotope generation or
    /// signal extraction).
    #[cfg_attr(
        feature = "instrumentation",
        tracing::instrument(skip_all, fields(group_id = parent.group_id), level = "trace")
    )]
    pub fn detect(&self, parent: &mut PeakGroup) -> Result<DetectionOutcome> {
        let Some(compound) = parent.compound.clone() else {
            debug!("Group {} has no compound, skipping", parent.group_id);
            return Ok(DetectionOutcome::Skipped(SkipReason::NoCompound));
        };
        if compound.formula.is_empty() {
            debug!(
                "Compound {} of group {} has no formula, skipping",
                compound.name, parent.group_id
            );
            return Ok(DetectionOutcome::Skipped(SkipReason::EmptyFormula));
        }
        if self.samples.is_empty() {
            debug!("No samples loaded, skipping group {}", parent.group_id);
            return Ok(DetectionOutcome::Skipped(SkipReason::NoSamples));
        }

        let charge = self.params.charge_for(&compound);
        let candidates = self
            .generator
            .isotopes(&compound.formula, charge, self.flags)?;

        let filter = CandidateFilter::new(self.params, self.flags);
        let mut acc = IsotopeAccumulator::new();
        for sample in self.samples {
            if self.is_stopped() {
                info!(
                    "Isotope detection for group {} cancelled, dropping {} features",
                    parent.group_id,
                    acc.len()
                );
                return Ok(DetectionOutcome::Cancelled);
            }
            self.search_sample(sample, parent, &candidates, &filter, &mut acc)?;
        }

        let found = acc.len();
        let attached = self.add_isotopes(parent, acc);
        debug!(
            "Group {} ({}): {} candidates, {} isotopes found, {} attached",
            parent.group_id,
            compound.formula,
            candidates.len(),
            found,
            attached
        );
        Ok(DetectionOutcome::Completed { found, attached })
    }

    /// Runs [`IsotopeDetector::detect`] over many parents in parallel.
    ///
    /// Outcomes are returned in the order of `parents`. The first error
    /// aborts the batch.
    #[cfg_attr(
        feature = "instrumentation",
        tracing::instrument(skip_all, level = "trace")
    )]
    pub fn detect_all(&self, parents: &mut [PeakGroup]) -> Result<Vec<DetectionOutcome>> {
        let num_parents = parents.len();
        let start = Instant::now();

        #[cfg(not(feature = "serial_detection"))]
        let outcomes: Vec<DetectionOutcome> = parents
            .par_iter_mut()
            .map(|parent| self.detect(parent))
            .collect::<Result<_>>()?;

        #[cfg(feature = "serial_detection")]
        let outcomes: Vec<DetectionOutcome> = parents
            .iter_mut()
            .map(|parent| self.detect(parent))
            .collect::<Result<_>>()?;

        let summary: DetectionSummary = outcomes.iter().collect();
        info!(
            "Isotope detection over {} groups took {:?}: {:?}",
            num_parents,
            start.elapsed(),
            summary
        );
        Ok(outcomes)
    }
}
