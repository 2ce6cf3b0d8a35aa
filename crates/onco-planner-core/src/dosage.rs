//! Body-surface-area and per-patient dose computation.
//!
//! BSA uses the Stevenson formula common in Chinese clinical practice:
//! `0.0061·H + 0.0128·W − 0.1529` (H in cm, W in kg), floored at zero.
//! "Not computable" is an ordinary `None`, never a sentinel value.

use crate::models::{DoseUnit, DrugDetail, RegimenCategory, RegimenOption};

/// Body surface area in m², rounded to two decimals.
///
/// `None` for missing or non-positive input; never negative.
pub fn body_surface_area(height_cm: f64, weight_kg: f64) -> Option<f64> {
    if !(height_cm > 0.0) || !(weight_kg > 0.0) {
        return None;
    }
    let raw = 0.0061 * height_cm + 0.0128 * weight_kg - 0.1529;
    Some(round2(raw.max(0.0)))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Patient-specific dose for one drug, rounded to a whole unit.
///
/// Per-surface doses need a non-zero BSA, per-weight doses a positive
/// weight; fixed doses pass through unchanged.
pub fn drug_dose(drug: &DrugDetail, bsa: Option<f64>, weight_kg: Option<f64>) -> Option<f64> {
    match &drug.unit {
        DoseUnit::PerSquareMeter => {
            let bsa = bsa.filter(|b| *b > 0.0)?;
            Some((drug.standard_dose * bsa).round())
        }
        DoseUnit::PerKilogram => {
            let weight = weight_kg.filter(|w| *w > 0.0)?;
            Some((drug.standard_dose * weight).round())
        }
        DoseUnit::Fixed(_) => Some(drug.standard_dose),
    }
}

/// One row of the calculator output.
#[derive(Debug, Clone, PartialEq)]
pub struct DoseLine {
    /// Owning regimen id
    pub regimen_id: String,
    /// Owning regimen shorthand
    pub regimen_name: String,
    /// Owning regimen category
    pub category: RegimenCategory,
    /// Drug name
    pub drug: String,
    /// Standard dose magnitude
    pub standard_dose: f64,
    /// Dosing basis
    pub unit: DoseUnit,
    /// Patient-specific amount, `None` when not computable
    pub computed: Option<f64>,
}

/// Dose sheet for the given regimens and anthropometrics.
///
/// One line per drug; lines whose dose cannot be computed still appear so
/// the caller can show "awaiting input" per drug.
pub fn dose_sheet(
    regimens: &[&RegimenOption],
    height_cm: Option<f64>,
    weight_kg: Option<f64>,
) -> Vec<DoseLine> {
    let bsa = match (height_cm, weight_kg) {
        (Some(h), Some(w)) => body_surface_area(h, w),
        _ => None,
    };

    regimens
        .iter()
        .flat_map(|regimen| {
            regimen.drugs.iter().map(move |drug| DoseLine {
                regimen_id: regimen.id.clone(),
                regimen_name: regimen.name.clone(),
                category: regimen.category,
                drug: drug.name.clone(),
                standard_dose: drug.standard_dose,
                unit: drug.unit.clone(),
                computed: drug_dose(drug, bsa, weight_kg),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn drug(standard_dose: f64, unit: DoseUnit) -> DrugDetail {
        DrugDetail {
            name: "测试药物".into(),
            standard_dose,
            unit,
        }
    }

    #[test]
    fn test_bsa_reference_case() {
        // 0.976 + 0.7424 - 0.1529 = 1.5655 -> 1.57
        assert_eq!(body_surface_area(160.0, 58.0), Some(1.57));
    }

    #[test]
    fn test_bsa_rejects_non_positive_input() {
        assert_eq!(body_surface_area(0.0, 58.0), None);
        assert_eq!(body_surface_area(160.0, 0.0), None);
        assert_eq!(body_surface_area(-160.0, 58.0), None);
        assert_eq!(body_surface_area(f64::NAN, 58.0), None);
    }

    #[test]
    fn test_bsa_floored_at_zero() {
        // Pathologically small inputs must not go negative
        assert_eq!(body_surface_area(0.1, 0.1), Some(0.0));
    }

    #[test]
    fn test_dose_per_surface_area() {
        let drug = drug(600.0, DoseUnit::PerSquareMeter);
        assert_eq!(drug_dose(&drug, Some(1.57), Some(58.0)), Some(942.0));
        assert_eq!(drug_dose(&drug, None, Some(58.0)), None);
        assert_eq!(drug_dose(&drug, Some(0.0), Some(58.0)), None);
    }

    #[test]
    fn test_dose_per_weight() {
        let drug = drug(2.0, DoseUnit::PerKilogram);
        assert_eq!(drug_dose(&drug, Some(1.57), Some(58.0)), Some(116.0));
        assert_eq!(drug_dose(&drug, Some(1.57), None), None);
    }

    #[test]
    fn test_fixed_dose_ignores_anthropometrics() {
        let drug = drug(440.0, DoseUnit::Fixed("mg".into()));
        assert_eq!(drug_dose(&drug, None, None), Some(440.0));
        assert_eq!(drug_dose(&drug, Some(1.57), Some(58.0)), Some(440.0));
    }

    #[test]
    fn test_dose_sheet_mixed_units() {
        let regimen = RegimenOption {
            id: "c1".into(),
            name: "TCbH".into(),
            description: "多西他赛 + 卡铂 + 曲妥珠单抗".into(),
            cycle_text: "q3w x 6".into(),
            category: RegimenCategory::Chemo,
            recommended: true,
            drugs: vec![
                drug(75.0, DoseUnit::PerSquareMeter),
                drug(6.0, DoseUnit::PerKilogram),
                drug(5.0, DoseUnit::Fixed("AUC".into())),
            ],
            total_cycles: Some(6),
            frequency_days: Some(21),
        };

        let sheet = dose_sheet(&[&regimen], Some(160.0), Some(58.0));
        assert_eq!(sheet.len(), 3);
        assert_eq!(sheet[0].computed, Some(118.0)); // 75 * 1.57 = 117.75
        assert_eq!(sheet[1].computed, Some(348.0)); // 6 * 58
        assert_eq!(sheet[2].computed, Some(5.0));

        // Without anthropometrics only the fixed dose resolves
        let sheet = dose_sheet(&[&regimen], None, None);
        assert_eq!(sheet[0].computed, None);
        assert_eq!(sheet[1].computed, None);
        assert_eq!(sheet[2].computed, Some(5.0));
    }

    proptest! {
        #[test]
        fn bsa_is_never_negative(h in 0.1f64..260.0, w in 0.1f64..400.0) {
            let bsa = body_surface_area(h, w).unwrap();
            prop_assert!(bsa >= 0.0);
        }

        #[test]
        fn per_weight_dose_matches_formula(standard in 0.1f64..100.0, w in 1.0f64..200.0) {
            let d = drug(standard, DoseUnit::PerKilogram);
            prop_assert_eq!(drug_dose(&d, None, Some(w)), Some((standard * w).round()));
        }

        #[test]
        fn non_positive_input_is_not_computable(h in -200.0f64..=0.0, w in 1.0f64..200.0) {
            prop_assert_eq!(body_surface_area(h, w), None);
        }
    }
}
