//! Plan-selection transitions.
//!
//! These functions are the only writers of a patient's plan state, and
//! every error path leaves the record exactly as it was. A selected id
//! therefore always references an option that is actually present.

use thiserror::Error;
use tracing::debug;

use crate::models::{
    DetailedRegimenPlan, Patient, RegimenCategory, RegimenOption, SelectedRegimens,
    TreatmentOption,
};

/// Plan-state transition errors.
#[derive(Error, Debug, PartialEq)]
pub enum PlanError {
    #[error("generation returned no pathway options")]
    EmptyOptions,

    #[error("unknown pathway option: {0}")]
    UnknownOption(String),

    #[error("no pathway has been selected")]
    NoPathwaySelected,

    #[error("generation returned no regimens in any category")]
    EmptyPlan,

    #[error("no detailed plan has been generated")]
    NoDetailedPlan,

    #[error("unknown {category} regimen: {id}")]
    UnknownRegimen { category: RegimenCategory, id: String },
}

pub type PlanResult<T> = Result<T, PlanError>;

impl Patient {
    /// Replace the high-level pathway options with a new generation.
    ///
    /// Any previously generated detailed plan and per-category selections
    /// are discarded. The recommended-flagged option is auto-selected,
    /// falling back to the first option when none (or more than one) is
    /// flagged. An empty generation is rejected and changes nothing.
    pub fn apply_treatment_options(&mut self, options: Vec<TreatmentOption>) -> PlanResult<()> {
        if options.is_empty() {
            return Err(PlanError::EmptyOptions);
        }
        let selected = options
            .iter()
            .find(|o| o.recommended)
            .unwrap_or(&options[0])
            .id
            .clone();
        debug!(patient = %self.id, options = options.len(), selected = %selected, "pathway options applied");

        self.treatment_options = options;
        self.selected_plan_id = Some(selected);
        self.detailed_plan = None;
        self.selected_regimens.clear();
        Ok(())
    }

    /// Select a different high-level pathway.
    pub fn select_pathway(&mut self, id: &str) -> PlanResult<()> {
        if !self.treatment_options.iter().any(|o| o.id == id) {
            return Err(PlanError::UnknownOption(id.to_string()));
        }
        self.selected_plan_id = Some(id.to_string());
        Ok(())
    }

    /// The currently selected pathway, if any.
    pub fn selected_pathway(&self) -> Option<&TreatmentOption> {
        let id = self.selected_plan_id.as_deref()?;
        self.treatment_options.iter().find(|o| o.id == id)
    }

    /// Replace the detailed regimen plan with a new generation.
    ///
    /// Each category independently auto-selects its recommended regimen,
    /// or else its first entry; empty categories stay unselected. A plan
    /// that is empty in every category is rejected and changes nothing.
    pub fn apply_detailed_plan(&mut self, plan: DetailedRegimenPlan) -> PlanResult<()> {
        if plan.is_empty() {
            return Err(PlanError::EmptyPlan);
        }

        let mut selection = SelectedRegimens::default();
        for category in RegimenCategory::ALL {
            let options = plan.options_for(category);
            if let Some(choice) = options.iter().find(|r| r.recommended).or_else(|| options.first()) {
                selection.set(category, choice.id.clone());
            }
        }
        debug!(patient = %self.id, "detailed plan applied");

        self.detailed_plan = Some(plan);
        self.selected_regimens = selection;
        Ok(())
    }

    /// Override the regimen selection in one category, leaving the others
    /// untouched.
    pub fn select_regimen(&mut self, category: RegimenCategory, id: &str) -> PlanResult<()> {
        let plan = self.detailed_plan.as_ref().ok_or(PlanError::NoDetailedPlan)?;
        if plan.find(category, id).is_none() {
            return Err(PlanError::UnknownRegimen {
                category,
                id: id.to_string(),
            });
        }
        self.selected_regimens.set(category, id.to_string());
        Ok(())
    }

    /// Resolve the per-category selections to their regimen options.
    pub fn selected_regimen_options(&self) -> Vec<&RegimenOption> {
        let Some(plan) = &self.detailed_plan else {
            return Vec::new();
        };
        RegimenCategory::ALL
            .iter()
            .filter_map(|&category| {
                self.selected_regimens
                    .get(category)
                    .and_then(|id| plan.find(category, id))
            })
            .collect()
    }

    /// Selected regimens that drive the cycle calendar and the dose
    /// calculator (endocrine therapy is continuous and excluded).
    pub fn cycled_regimens(&self) -> Vec<&RegimenOption> {
        self.selected_regimen_options()
            .into_iter()
            .filter(|r| r.category.is_cycled())
            .collect()
    }
}
