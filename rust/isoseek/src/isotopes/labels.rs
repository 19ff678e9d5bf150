use serde::{
    Deserialize,
    Serialize,
};

pub const C12_PARENT_LABEL: &str = "C12 PARENT";
pub const C13_LABEL: &str = "C13-label-";
pub const N15_LABEL: &str = "N15-label-";
pub const S34_LABEL: &str = "S34-label-";
pub const H2_LABEL: &str = "D-label-";
pub const C13N15_LABEL: &str = "C13N15-label-";
pub const C13S34_LABEL: &str = "C13S34-label-";

/// Which heavy-isotope substitutions a run looks for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ElementFlags {
    pub c13: bool,
    pub n15: bool,
    pub s34: bool,
    pub d2: bool,
}

impl Default for ElementFlags {
    fn default() -> Self {
        Self {
            c13: true,
            n15: false,
            s34: false,
            d2: false,
        }
    }
}

impl ElementFlags {
    pub const NONE: ElementFlags = ElementFlags {
        c13: false,
        n15: false,
        s34: false,
        d2: false,
    };

    pub const ALL: ElementFlags = ElementFlags {
        c13: true,
        n15: true,
        s34: true,
        d2: true,
    };

    pub fn any(&self) -> bool {
        self.c13 || self.n15 || self.s34 || self.d2
    }
}

/// Whether an isotope label may be attached under the given element flags.
///
/// Works on the label alone, so it also catches candidates a generator
/// produced for elements that are switched off. Combination labels are
/// rejected as soon as either of their elements is off. With every element
/// off there is no labeling experiment at all and nothing is allowed, the
/// parent label included.
///
/// ```
/// use isoseek::isotopes::{label_allowed, ElementFlags};
///
/// let c13_only = ElementFlags::default();
/// assert!(label_allowed("C12 PARENT", c13_only));
/// assert!(label_allowed("C13-label-2", c13_only));
/// assert!(!label_allowed("C13N15-label-1-1", c13_only));
/// assert!(!label_allowed("D-label-1", c13_only));
/// ```
pub fn label_allowed(label: &str, flags: ElementFlags) -> bool {
    if !flags.any() {
        return false;
    }
    if !flags.c13
        && (label.contains(C13_LABEL) || label.contains(C13N15_LABEL) || label.contains(C13S34_LABEL))
    {
        return false;
    }
    if !flags.n15 && (label.contains(N15_LABEL) || label.contains(C13N15_LABEL)) {
        return false;
    }
    if !flags.s34 && (label.contains(S34_LABEL) || label.contains(C13S34_LABEL)) {
        return false;
    }
    if !flags.d2 && label.contains(H2_LABEL) {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABELS: [&str; 7] = [
        "C12 PARENT",
        "C13-label-1",
        "N15-label-1",
        "S34-label-1",
        "D-label-1",
        "C13N15-label-1-1",
        "C13S34-label-1-1",
    ];

    #[test]
    fn test_everything_enabled() {
        assert!(LABELS.iter().all(|l| label_allowed(l, ElementFlags::ALL)));
    }

    #[test]
    fn test_nothing_enabled_rejects_everything() {
        assert!(LABELS.iter().all(|l| !label_allowed(l, ElementFlags::NONE)));
    }

    #[test]
    fn test_parent_survives_any_single_flag() {
        let s34_only = ElementFlags {
            s34: true,
            ..ElementFlags::NONE
        };
        assert!(label_allowed(C12_PARENT_LABEL, s34_only));
        assert!(!label_allowed("C13-label-1", s34_only));
    }

    #[test]
    fn test_combination_needs_both() {
        let c13_n15 = ElementFlags {
            c13: true,
            n15: true,
            ..ElementFlags::NONE
        };
        assert!(label_allowed("C13N15-label-2-1", c13_n15));
        assert!(!label_allowed("C13S34-label-2-1", c13_n15));

        let n15_only = ElementFlags {
            n15: true,
            ..ElementFlags::NONE
        };
        assert!(label_allowed("N15-label-3", n15_only));
        assert!(!label_allowed("C13N15-label-2-1", n15_only));
    }

    #[test]
    fn test_deuterium_off() {
        let no_d = ElementFlags {
            d2: false,
            ..ElementFlags::ALL
        };
        assert!(!label_allowed("D-label-4", no_d));
        assert!(label_allowed("C13-label-4", no_d));
    }
}
