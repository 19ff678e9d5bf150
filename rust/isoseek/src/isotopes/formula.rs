use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::errors::FormulaError;

pub const PROTON_MASS: f64 = 1.007276466;

static ELEMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z][a-z]?)(\d*)").expect("static regex is valid"));

/// Monoisotopic mass of the most abundant isotope of each supported element.
pub fn monoisotopic_mass(element: &str) -> Option<f64> {
    let mass = match element {
        "H" => 1.00782503207,
        "C" => 12.0,
        "N" => 14.0030740048,
        "O" => 15.99491461956,
        "P" => 30.97376163,
        "S" => 31.97207100,
        "Na" => 22.9897692809,
        "K" => 38.96370668,
        "Cl" => 34.96885268,
        "F" => 18.99840322,
        "Br" => 78.9183371,
        "I" => 126.904473,
        "Si" => 27.9769265325,
        "Se" => 79.9165213,
        "Fe" => 55.9349375,
        "Mg" => 23.9850417,
        "Ca" => 39.96259098,
        "Cu" => 62.9295975,
        "Zn" => 63.9291422,
        "Co" => 58.933195,
        "Mn" => 54.9380451,
        "B" => 11.0093054,
        "Li" => 7.01600455,
        _ => return None,
    };
    Some(mass)
}

/// Elemental composition of a molecular formula.
///
/// ```
/// use isoseek::isotopes::SumFormula;
///
/// let glucose = SumFormula::parse("C6H12O6").unwrap();
/// assert_eq!(glucose.count("C"), 6);
/// assert_eq!(glucose.count("N"), 0);
/// assert!((glucose.monoisotopic_mass() - 180.0633881).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SumFormula {
    pub formula: String,
    elements: BTreeMap<String, u32>,
}

impl SumFormula {
    pub fn parse(formula: &str) -> Result<Self, FormulaError> {
        let mut elements: BTreeMap<String, u32> = BTreeMap::new();
        let mut expected_start = 0;
        for caps in ELEMENT_RE.captures_iter(formula) {
            let whole = caps.get(0).expect("group 0 always matches");
            if whole.start() != expected_start {
                return Err(FormulaError::UnexpectedCharacters {
                    formula: formula.to_string(),
                    position: expected_start,
                });
            }
            expected_start = whole.end();

            let element = &caps[1];
            if monoisotopic_mass(element).is_none() {
                return Err(FormulaError::UnknownElement {
                    element: element.to_string(),
                    formula: formula.to_string(),
                });
            }
            let count = match &caps[2] {
                "" => 1,
                digits => digits.parse::<u32>().map_err(|_| FormulaError::CountOverflow {
                    element: element.to_string(),
                    formula: formula.to_string(),
                })?,
            };
            let entry = elements.entry(element.to_string()).or_insert(0);
            *entry = entry
                .checked_add(count)
                .ok_or_else(|| FormulaError::CountOverflow {
                    element: element.to_string(),
                    formula: formula.to_string(),
                })?;
        }
        if expected_start != formula.len() {
            return Err(FormulaError::UnexpectedCharacters {
                formula: formula.to_string(),
                position: expected_start,
            });
        }

        Ok(Self {
            formula: formula.to_string(),
            elements,
        })
    }

    pub fn count(&self, element: &str) -> u32 {
        self.elements.get(element).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn monoisotopic_mass(&self) -> f64 {
        self.elements
            .iter()
            .map(|(element, count)| {
                monoisotopic_mass(element).expect("elements are validated on parse") * *count as f64
            })
            .sum()
    }
}

/// Converts a neutral mass into the m/z observed at `charge`.
///
/// A charge of zero keeps the neutral mass.
pub fn adjust_mass(neutral_mass: f64, charge: i32) -> f64 {
    if charge == 0 {
        return neutral_mass;
    }
    (neutral_mass + charge as f64 * PROTON_MASS) / charge.unsigned_abs() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_elements_sum() {
        let f = SumFormula::parse("CH3CH2OH").unwrap();
        assert_eq!(f.count("C"), 2);
        assert_eq!(f.count("H"), 6);
        assert_eq!(f.count("O"), 1);
    }

    #[test]
    fn test_two_letter_elements() {
        let f = SumFormula::parse("NaCl").unwrap();
        assert_eq!(f.count("Na"), 1);
        assert_eq!(f.count("Cl"), 1);
        assert_eq!(f.count("C"), 0);
    }

    #[test]
    fn test_unknown_element() {
        let err = SumFormula::parse("C6Xx2").unwrap_err();
        assert!(matches!(err, FormulaError::UnknownElement { .. }), "{}", err);
    }

    #[test]
    fn test_garbage() {
        let err = SumFormula::parse("C6 H12").unwrap_err();
        assert!(matches!(
            err,
            FormulaError::UnexpectedCharacters { position: 2, .. }
        ));
        assert!(SumFormula::parse("c6").is_err());
    }

    #[test]
    fn test_empty_formula() {
        let f = SumFormula::parse("").unwrap();
        assert!(f.is_empty());
        assert_eq!(f.monoisotopic_mass(), 0.0);
    }

    #[test]
    fn test_adjust_mass() {
        let m = 180.0633881;
        assert_eq!(adjust_mass(m, 0), m);
        assert!((adjust_mass(m, 1) - 181.0706646).abs() < 1e-6);
        assert!((adjust_mass(m, -1) - 179.0561116).abs() < 1e-6);
        assert!((adjust_mass(m, 2) - 91.0389705).abs() < 1e-6);
    }
}
