//! Full decision report: every prevision and every criterion for one
//! credal set and act set.

use clap::ValueEnum;
use ip_config::Tolerances;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// The decision criteria a report carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Criterion {
    GammaMaximin,
    GammaMaximax,
    GammaMaxiHurwicz,
    IntervalMaximal,
    BayesMaximal,
    EAdmissible,
}

impl Criterion {
    pub const ALL: [Criterion; 6] = [
        Criterion::GammaMaximin,
        Criterion::GammaMaximax,
        Criterion::GammaMaxiHurwicz,
        Criterion::IntervalMaximal,
        Criterion::BayesMaximal,
        Criterion::EAdmissible,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Criterion::GammaMaximin => "gamma-maximin",
            Criterion::GammaMaximax => "gamma-maximax",
            Criterion::GammaMaxiHurwicz => "gamma-maxi-hurwicz",
            Criterion::IntervalMaximal => "interval-maximal",
            Criterion::BayesMaximal => "bayes-maximal",
            Criterion::EAdmissible => "e-admissible",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Criterion::GammaMaximin => "best worst-case expectation",
            Criterion::GammaMaximax => "best best-case expectation",
            Criterion::GammaMaxiHurwicz => "best optimism-weighted expectation",
            Criterion::IntervalMaximal => "not interval-dominated by any act",
            Criterion::BayesMaximal => "not dominated under every pmf by any act",
            Criterion::EAdmissible => "optimal under at least one pmf",
        }
    }
}

impl std::fmt::Display for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Boolean selection per criterion, one entry per act.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionSets {
    pub gamma_maximin: Vec<bool>,
    pub gamma_maximax: Vec<bool>,
    pub gamma_maxi_hurwicz: Vec<bool>,
    pub interval_maximal: Vec<bool>,
    pub bayes_maximal: Vec<bool>,
    pub e_admissible: Vec<bool>,
}

impl CriterionSets {
    pub fn get(&self, criterion: Criterion) -> &[bool] {
        match criterion {
            Criterion::GammaMaximin => &self.gamma_maximin,
            Criterion::GammaMaximax => &self.gamma_maximax,
            Criterion::GammaMaxiHurwicz => &self.gamma_maxi_hurwicz,
            Criterion::IntervalMaximal => &self.interval_maximal,
            Criterion::BayesMaximal => &self.bayes_maximal,
            Criterion::EAdmissible => &self.e_admissible,
        }
    }
}

/// Everything the engine derives for one act set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionReport {
    pub schema_version: String,
    pub acts: usize,
    pub pmfs: usize,
    pub outcomes: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    pub tolerances: Tolerances,
    pub optimism: f64,
    /// Expectation rows, one per act.
    pub expectations: Vec<Vec<f64>>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
    pub hurwicz: Vec<f64>,
    pub criteria: CriterionSets,
    /// Per act, the pmfs under which it is a maximizer.
    pub witnesses: Vec<Vec<usize>>,
}

/// One criterion's selection, resolved to indices and labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub criterion: Criterion,
    pub selected: Vec<bool>,
    pub indices: Vec<usize>,
    pub labels: Vec<String>,
}

impl DecisionReport {
    /// Display label of act `i`: the supplied label, or `act<i>`.
    pub fn label(&self, i: usize) -> String {
        self.labels
            .as_ref()
            .and_then(|l| l.get(i).cloned())
            .unwrap_or_else(|| format!("act{}", i))
    }

    pub fn selected(&self, criterion: Criterion) -> &[bool] {
        self.criteria.get(criterion)
    }

    pub fn selected_indices(&self, criterion: Criterion) -> Vec<usize> {
        self.selected(criterion)
            .iter()
            .enumerate()
            .filter_map(|(i, &s)| s.then_some(i))
            .collect()
    }

    pub fn selection(&self, criterion: Criterion) -> Selection {
        let indices = self.selected_indices(criterion);
        Selection {
            criterion,
            selected: self.selected(criterion).to_vec(),
            labels: indices.iter().map(|&i| self.label(i)).collect(),
            indices,
        }
    }

    /// Markdown tables: previsions per act, then criteria membership.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# Decision report\n");
        let _ = writeln!(
            out,
            "{} acts, {} pmfs, {} outcomes, Hurwicz optimism {}\n",
            self.acts, self.pmfs, self.outcomes, self.optimism
        );

        let _ = writeln!(out, "## Previsions\n");
        let _ = writeln!(out, "| Act | Lower | Upper | Hurwicz |");
        let _ = writeln!(out, "|-----|-------|-------|---------|");
        for i in 0..self.acts {
            let _ = writeln!(
                out,
                "| {} | {:.4} | {:.4} | {:.4} |",
                self.label(i),
                self.lower[i],
                self.upper[i],
                self.hurwicz[i]
            );
        }

        let _ = writeln!(out, "\n## Criteria\n");
        let _ = writeln!(out, "| Criterion | Selected |");
        let _ = writeln!(out, "|-----------|----------|");
        for criterion in Criterion::ALL {
            let names: Vec<String> = self
                .selected_indices(criterion)
                .into_iter()
                .map(|i| self.label(i))
                .collect();
            let _ = writeln!(out, "| {} | {} |", criterion, names.join(", "));
        }
        out
    }

    /// One line per criterion.
    pub fn to_summary(&self) -> String {
        let mut out = format!(
            "{} acts x {} pmfs ({} outcomes)\n",
            self.acts, self.pmfs, self.outcomes
        );
        for criterion in Criterion::ALL {
            let names: Vec<String> = self
                .selected_indices(criterion)
                .into_iter()
                .map(|i| self.label(i))
                .collect();
            let _ = writeln!(out, "{:<20} {}", criterion.as_str(), names.join(" "));
        }
        out
    }
}
