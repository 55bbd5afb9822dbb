//! Decision engine: a validated credal set plus configured tolerances.

use super::acts::ActSet;
use super::check_tolerance;
use super::expectation::ExpectationMatrix;
use super::pmf_set::PmfSet;
use super::prevision::{Prevision, RowReducer};
use super::report::{CriterionSets, DecisionReport};
use super::robust_bayes::RobustBayes;
use ip_common::{Error, Result};
use ip_config::{Settings, Tolerances};
use tracing::{debug, info_span};

/// Holds one credal set and evaluates act sets against it.
///
/// The engine is immutable; every method recomputes from its inputs.
#[derive(Debug, Clone)]
pub struct DecisionEngine {
    pmfs: PmfSet,
    tolerances: Tolerances,
    optimism: f64,
}

impl DecisionEngine {
    /// Build an engine around `pmfs`. The normalization tolerance is taken
    /// from the credal set itself; the others are checked here.
    pub fn new(pmfs: PmfSet, tolerances: Tolerances) -> Result<Self> {
        check_tolerance("optimality_tolerance", tolerances.optimality)?;
        check_tolerance("dominance_tolerance", tolerances.dominance)?;
        check_tolerance("robust_bayes_tolerance", tolerances.robust_bayes)?;
        let tolerances = Tolerances {
            normalization: pmfs.tolerance(),
            ..tolerances
        };
        Ok(Self {
            pmfs,
            tolerances,
            optimism: ip_config::HurwiczDefaults::default().optimism,
        })
    }

    /// Validate `pmfs` and build an engine using every value in `settings`.
    pub fn from_settings<P: AsRef<[f64]>>(pmfs: &[P], settings: &Settings) -> Result<Self> {
        let pmfs = PmfSet::with_tolerance(pmfs, settings.tolerances.normalization)?;
        Self::new(pmfs, settings.tolerances)?.with_optimism(settings.hurwicz.optimism)
    }

    /// Replace the Hurwicz optimism coefficient.
    pub fn with_optimism(mut self, optimism: f64) -> Result<Self> {
        Prevision::Hurwicz { optimism }.validate()?;
        self.optimism = optimism;
        Ok(self)
    }

    pub fn pmfs(&self) -> &PmfSet {
        &self.pmfs
    }

    pub fn tolerances(&self) -> &Tolerances {
        &self.tolerances
    }

    pub fn optimism(&self) -> f64 {
        self.optimism
    }

    pub fn expectations(&self, acts: &ActSet) -> Result<ExpectationMatrix> {
        self.pmfs.expectations(acts)
    }

    pub fn lower_previsions(&self, acts: &ActSet) -> Result<Vec<f64>> {
        Ok(self.expectations(acts)?.lower_previsions())
    }

    pub fn upper_previsions(&self, acts: &ActSet) -> Result<Vec<f64>> {
        Ok(self.expectations(acts)?.upper_previsions())
    }

    pub fn hurwicz_previsions(&self, acts: &ActSet) -> Result<Vec<f64>> {
        self.expectations(acts)?.hurwicz_previsions(self.optimism)
    }

    pub fn gamma_maximin(&self, acts: &ActSet) -> Result<Vec<bool>> {
        self.expectations(acts)?
            .gamma_maximin(self.tolerances.optimality)
    }

    pub fn gamma_maximax(&self, acts: &ActSet) -> Result<Vec<bool>> {
        self.expectations(acts)?
            .gamma_maximax(self.tolerances.optimality)
    }

    pub fn gamma_maxi_hurwicz(&self, acts: &ActSet) -> Result<Vec<bool>> {
        self.expectations(acts)?
            .gamma_maxi_hurwicz(self.optimism, self.tolerances.optimality)
    }

    pub fn bayes_maximal(&self, acts: &ActSet) -> Result<Vec<bool>> {
        self.expectations(acts)?
            .bayes_maximal(self.tolerances.dominance)
    }

    pub fn interval_maximal(&self, acts: &ActSet) -> Result<Vec<bool>> {
        self.expectations(acts)?
            .interval_maximal(self.tolerances.dominance)
    }

    pub fn robust_bayes(&self, acts: &ActSet) -> Result<RobustBayes> {
        self.expectations(acts)?
            .robust_bayes(self.tolerances.robust_bayes)
    }

    /// Evaluate every prevision and criterion for `acts`.
    ///
    /// `labels`, when given, must name every act.
    pub fn report(&self, acts: &ActSet, labels: Option<Vec<String>>) -> Result<DecisionReport> {
        let _span = info_span!("decision_report", acts = acts.len(), pmfs = self.pmfs.len()).entered();

        if let Some(labels) = &labels {
            if labels.len() != acts.len() {
                return Err(Error::dimension_mismatch("act labels", acts.len(), labels.len()));
            }
        }

        let exp = self.expectations(acts)?;
        let tol = &self.tolerances;
        let robust = exp.robust_bayes(tol.robust_bayes)?;

        let criteria = CriterionSets {
            gamma_maximin: exp.gamma_maximin(tol.optimality)?,
            gamma_maximax: exp.gamma_maximax(tol.optimality)?,
            gamma_maxi_hurwicz: exp.gamma_maxi_hurwicz(self.optimism, tol.optimality)?,
            interval_maximal: exp.interval_maximal(tol.dominance)?,
            bayes_maximal: exp.bayes_maximal(tol.dominance)?,
            e_admissible: robust.admissible,
        };

        debug!(
            acts = exp.acts(),
            pmfs = exp.pmfs(),
            outcomes = self.pmfs.outcomes(),
            "decision report assembled"
        );

        Ok(DecisionReport {
            schema_version: ip_common::SCHEMA_VERSION.to_string(),
            acts: exp.acts(),
            pmfs: exp.pmfs(),
            outcomes: self.pmfs.outcomes(),
            labels,
            tolerances: self.tolerances,
            optimism: self.optimism,
            expectations: exp.to_rows(),
            lower: exp.lower_previsions(),
            upper: exp.upper_previsions(),
            hurwicz: exp.hurwicz_previsions(self.optimism)?,
            criteria,
            witnesses: robust.witnesses,
        })
    }
}
