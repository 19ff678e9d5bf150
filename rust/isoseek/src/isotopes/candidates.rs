use serde::{
    Deserialize,
    Serialize,
};
use statrs::function::factorial::binomial;

use super::formula::{
    adjust_mass,
    SumFormula,
};
use super::labels::{
    ElementFlags,
    C12_PARENT_LABEL,
    C13N15_LABEL,
    C13S34_LABEL,
    C13_LABEL,
    H2_LABEL,
    N15_LABEL,
    S34_LABEL,
};
use crate::errors::Result;
use crate::traits::IsotopeGenerator;

pub const C13_MASS_SHIFT: f64 = 1.003354835;
pub const N15_MASS_SHIFT: f64 = 0.997034893;
pub const S34_MASS_SHIFT: f64 = 1.9957959;
pub const H2_MASS_SHIFT: f64 = 1.0062767;

pub const C13_NATURAL_ABUNDANCE: f64 = 0.0107;
pub const N15_NATURAL_ABUNDANCE: f64 = 0.00364;
pub const S34_NATURAL_ABUNDANCE: f64 = 0.0421;
pub const H2_NATURAL_ABUNDANCE: f64 = 0.000115;

/// One theoretical isotopologue of a parent formula.
///
/// `mass` is already adjusted to the ion charge. `name` is unique within the
/// candidates of a formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsotopeCandidate {
    pub name: String,
    pub mass: f64,
    pub abundance: f64,
    pub c13: u32,
    pub n15: u32,
    pub s34: u32,
    pub h2: u32,
}

impl IsotopeCandidate {
    /// True when the candidate carries a substitution of an element the
    /// run is not tracking.
    pub fn uses_disabled_element(&self, flags: ElementFlags) -> bool {
        (self.c13 > 0 && !flags.c13)
            || (self.n15 > 0 && !flags.n15)
            || (self.s34 > 0 && !flags.s34)
            || (self.h2 > 0 && !flags.d2)
    }
}

fn binomial_probability(n: u32, k: u32, p: f64) -> f64 {
    if k > n {
        return 0.0;
    }
    binomial(n as u64, k as u64) * p.powi(k as i32) * (1.0 - p).powi((n - k) as i32)
}

/// Builds isotopologues straight from the elemental composition.
///
/// Each substitution shifts the neutral mass by a fixed delta and the
/// expected abundance is the product of the per-element binomial
/// probabilities at natural abundance.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormulaIsotopeGenerator;

struct Composition {
    neutral_mass: f64,
    n_c: u32,
    n_n: u32,
    n_s: u32,
    n_h: u32,
    charge: i32,
}

impl Composition {
    fn candidate(&self, name: String, c13: u32, n15: u32, s34: u32, h2: u32) -> IsotopeCandidate {
        let neutral = self.neutral_mass
            + c13 as f64 * C13_MASS_SHIFT
            + n15 as f64 * N15_MASS_SHIFT
            + s34 as f64 * S34_MASS_SHIFT
            + h2 as f64 * H2_MASS_SHIFT;
        let abundance = binomial_probability(self.n_c, c13, C13_NATURAL_ABUNDANCE)
            * binomial_probability(self.n_n, n15, N15_NATURAL_ABUNDANCE)
            * binomial_probability(self.n_s, s34, S34_NATURAL_ABUNDANCE)
            * binomial_probability(self.n_h, h2, H2_NATURAL_ABUNDANCE);
        IsotopeCandidate {
            name,
            mass: adjust_mass(neutral, self.charge),
            abundance,
            c13,
            n15,
            s34,
            h2,
        }
    }
}

impl IsotopeGenerator for FormulaIsotopeGenerator {
    fn isotopes(
        &self,
        formula: &str,
        charge: i32,
        flags: ElementFlags,
    ) -> Result<Vec<IsotopeCandidate>> {
        let parsed = SumFormula::parse(formula)?;
        if parsed.is_empty() {
            return Ok(Vec::new());
        }
        let comp = Composition {
            neutral_mass: parsed.monoisotopic_mass(),
            n_c: parsed.count("C"),
            n_n: parsed.count("N"),
            n_s: parsed.count("S"),
            n_h: parsed.count("H"),
            charge,
        };

        let mut out = vec![comp.candidate(C12_PARENT_LABEL.to_string(), 0, 0, 0, 0)];
        if flags.c13 {
            out.extend((1..=comp.n_c).map(|i| comp.candidate(format!("{C13_LABEL}{i}"), i, 0, 0, 0)));
        }
        if flags.n15 {
            out.extend((1..=comp.n_n).map(|i| comp.candidate(format!("{N15_LABEL}{i}"), 0, i, 0, 0)));
        }
        if flags.s34 {
            out.extend((1..=comp.n_s).map(|i| comp.candidate(format!("{S34_LABEL}{i}"), 0, 0, i, 0)));
        }
        if flags.d2 {
            out.extend((1..=comp.n_h).map(|i| comp.candidate(format!("{H2_LABEL}{i}"), 0, 0, 0, i)));
        }
        if flags.c13 && flags.n15 {
            for i in 1..=comp.n_c {
                for j in 1..=comp.n_n {
                    out.push(comp.candidate(format!("{C13N15_LABEL}{i}-{j}"), i, j, 0, 0));
                }
            }
        }
        if flags.c13 && flags.s34 {
            for i in 1..=comp.n_c {
                for j in 1..=comp.n_s {
                    out.push(comp.candidate(format!("{C13S34_LABEL}{i}-{j}"), i, 0, j, 0));
                }
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glucose_c13() {
        let isotopes = FormulaIsotopeGenerator
            .isotopes("C6H12O6", 1, ElementFlags::default())
            .unwrap();
        assert_eq!(isotopes.len(), 7);
        assert_eq!(isotopes[0].name, "C12 PARENT");
        assert_eq!(isotopes[1].name, "C13-label-1");
        assert_eq!(isotopes[6].name, "C13-label-6");
        assert_eq!(isotopes[6].c13, 6);

        let parent = &isotopes[0];
        assert!((parent.mass - 181.0706646).abs() < 1e-5);
        assert!((isotopes[1].mass - parent.mass - C13_MASS_SHIFT).abs() < 1e-9);

        // (1 - p)^6 and 6 p (1 - p)^5 for the carbons, hydrogens stay light
        let light_h = (1.0 - H2_NATURAL_ABUNDANCE).powi(12);
        let p = C13_NATURAL_ABUNDANCE;
        assert!((parent.abundance - (1.0 - p).powi(6) * light_h).abs() < 1e-12);
        assert!((isotopes[1].abundance - 6.0 * p * (1.0 - p).powi(5) * light_h).abs() < 1e-12);
    }

    #[test]
    fn test_combinations() {
        let flags = ElementFlags {
            c13: true,
            n15: true,
            s34: true,
            d2: false,
        };
        // cysteine, 3 C, 1 N, 1 S
        let isotopes = FormulaIsotopeGenerator
            .isotopes("C3H7NO2S", 1, flags)
            .unwrap();
        let names: Vec<&str> = isotopes.iter().map(|x| x.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "C12 PARENT",
                "C13-label-1",
                "C13-label-2",
                "C13-label-3",
                "N15-label-1",
                "S34-label-1",
                "C13N15-label-1-1",
                "C13N15-label-2-1",
                "C13N15-label-3-1",
                "C13S34-label-1-1",
                "C13S34-label-2-1",
                "C13S34-label-3-1",
            ]
        );
        let c13n15 = &isotopes[6];
        assert_eq!((c13n15.c13, c13n15.n15, c13n15.s34, c13n15.h2), (1, 1, 0, 0));
    }

    #[test]
    fn test_deterministic() {
        let a = FormulaIsotopeGenerator
            .isotopes("C10H16N5O13P3", -1, ElementFlags::ALL)
            .unwrap();
        let b = FormulaIsotopeGenerator
            .isotopes("C10H16N5O13P3", -1, ElementFlags::ALL)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_formula_is_empty() {
        let isotopes = FormulaIsotopeGenerator
            .isotopes("", 1, ElementFlags::ALL)
            .unwrap();
        assert!(isotopes.is_empty());
    }

    #[test]
    fn test_bad_formula_is_error() {
        assert!(FormulaIsotopeGenerator
            .isotopes("C6Qq", 1, ElementFlags::ALL)
            .is_err());
    }

    #[test]
    fn test_disabled_element_detection() {
        let candidate = IsotopeCandidate {
            name: "N15-label-1".to_string(),
            mass: 100.0,
            abundance: 0.01,
            c13: 0,
            n15: 1,
            s34: 0,
            h2: 0,
        };
        assert!(candidate.uses_disabled_element(ElementFlags::default()));
        assert!(!candidate.uses_disabled_element(ElementFlags::ALL));
    }
}
