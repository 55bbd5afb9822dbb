//! Problem files: a credal set and the acts to evaluate against it.
//!
//! JSON or TOML, chosen by file extension:
//!
//! ```json
//! {
//!   "pmfs":   [[0.4, 0.5, 0.1], [0.1, 0.8, 0.1]],
//!   "acts":   [[3, 9, 2], [4, 4, 4]],
//!   "labels": ["gamble", "safe"]
//! }
//! ```

use crate::credal::{ActSet, DecisionEngine, DecisionReport};
use ip_common::{Error, Result};
use ip_config::Settings;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// On-disk problem definition. Shapes are checked when the problem is
/// turned into a [`DecisionEngine`] and [`ActSet`], not at parse time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Problem {
    /// One pmf per entry, each over the same outcomes.
    pub pmfs: Vec<Vec<f64>>,

    /// One payoff vector per act.
    #[serde(default)]
    pub acts: Vec<Vec<f64>>,

    /// Optional names, one per act.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}

impl Problem {
    /// Load from a `.json` or `.toml` file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let is_toml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("toml"));

        let problem = if is_toml {
            Self::parse_toml(&content)
        } else {
            Self::parse_json(&content)
        }
        .map_err(|e| match e {
            Error::InvalidProblem(msg) => Error::InvalidProblem(format!("{}: {}", path.display(), msg)),
            other => other,
        })?;

        debug!(
            path = %path.display(),
            pmfs = problem.pmfs.len(),
            acts = problem.acts.len(),
            "problem file parsed"
        );
        Ok(problem)
    }

    pub fn parse_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| Error::InvalidProblem(e.to_string()))
    }

    pub fn parse_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::InvalidProblem(e.to_string()))
    }

    /// The acts as a validated set; labels are checked against it.
    pub fn act_set(&self) -> Result<ActSet> {
        let acts = ActSet::new(&self.acts)?;
        if let Some(labels) = &self.labels {
            if labels.len() != acts.len() {
                return Err(Error::dimension_mismatch("act labels", acts.len(), labels.len()));
            }
        }
        Ok(acts)
    }

    /// Engine over this problem's credal set, configured by `settings`.
    pub fn engine(&self, settings: &Settings) -> Result<DecisionEngine> {
        DecisionEngine::from_settings(&self.pmfs, settings)
    }

    /// Validate everything and return the engine with its act set.
    pub fn check(&self, settings: &Settings) -> Result<(DecisionEngine, ActSet)> {
        let engine = self.engine(settings)?;
        let acts = self.act_set()?;
        if !acts.is_empty() && acts.outcomes() != engine.pmfs().outcomes() {
            return Err(Error::dimension_mismatch(
                "act payoffs vs credal set outcomes",
                engine.pmfs().outcomes(),
                acts.outcomes(),
            ));
        }
        Ok((engine, acts))
    }

    /// Full decision report.
    pub fn evaluate(&self, settings: &Settings) -> Result<DecisionReport> {
        let (engine, acts) = self.check(settings)?;
        engine.report(&acts, self.labels.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credal::Criterion;
    use std::io::Write;

    const WORKED_JSON: &str = r#"{
        "pmfs": [[0.4, 0.5, 0.1], [0.1, 0.8, 0.1], [0.6, 0.2, 0.2]],
        "acts": [[3, 9, 2], [4, 4, 4], [0, 3, 6], [6, 2, 1]],
        "labels": ["a", "b", "c", "d"]
    }"#;

    #[test]
    fn parses_json_with_integer_payoffs() {
        let p = Problem::parse_json(WORKED_JSON).unwrap();
        assert_eq!(p.pmfs.len(), 3);
        assert_eq!(p.acts[0], vec![3.0, 9.0, 2.0]);
        assert_eq!(p.labels.as_ref().map(Vec::len), Some(4));
    }

    #[test]
    fn parses_toml() {
        let p = Problem::parse_toml(
            r#"
            pmfs = [[0.4, 0.6]]
            acts = [[3.0, 9.0], [4.0, 4.0]]
            "#,
        )
        .unwrap();
        assert_eq!(p.acts.len(), 2);
        assert!(p.labels.is_none());
    }

    #[test]
    fn parse_errors_are_invalid_problem() {
        assert!(matches!(
            Problem::parse_json("{ not json").unwrap_err(),
            Error::InvalidProblem(_)
        ));
        assert!(matches!(
            Problem::parse_json(r#"{"acts": [[1.0]]}"#).unwrap_err(),
            Error::InvalidProblem(_)
        ));
        assert!(matches!(
            Problem::parse_json(r#"{"pmfs": [[1.0]], "extra": 1}"#).unwrap_err(),
            Error::InvalidProblem(_)
        ));
    }

    #[test]
    fn evaluate_worked_example() {
        let p = Problem::parse_json(WORKED_JSON).unwrap();
        let report = p.evaluate(&Settings::default()).unwrap();
        assert_eq!(report.selection(Criterion::GammaMaximin).labels, vec!["a", "b"]);
        assert_eq!(report.selection(Criterion::GammaMaximax).labels, vec!["a"]);
    }

    #[test]
    fn label_count_must_match() {
        let mut p = Problem::parse_json(WORKED_JSON).unwrap();
        p.labels = Some(vec!["only".into()]);
        assert!(matches!(
            p.act_set().unwrap_err(),
            Error::DimensionMismatch { .. }
        ));
    }

    #[test]
    fn check_reports_outcome_mismatch() {
        let p = Problem {
            pmfs: vec![vec![0.5, 0.5]],
            acts: vec![vec![1.0, 2.0, 3.0]],
            labels: None,
        };
        assert!(matches!(
            p.check(&Settings::default()).unwrap_err(),
            Error::DimensionMismatch {
                expected: 2,
                actual: 3,
                ..
            }
        ));
    }

    #[test]
    fn check_surfaces_credal_errors() {
        let p = Problem::parse_json(r#"{"pmfs": [[0.5, 0.6]], "acts": []}"#).unwrap();
        assert!(matches!(
            p.check(&Settings::default()).unwrap_err(),
            Error::MalformedDistribution { pmf: 0, .. }
        ));
        let empty = Problem::parse_json(r#"{"pmfs": []}"#).unwrap();
        assert!(matches!(
            empty.check(&Settings::default()).unwrap_err(),
            Error::EmptyCredalSet
        ));
    }

    #[test]
    fn from_file_picks_format_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("p.json");
        std::fs::write(&json_path, WORKED_JSON).unwrap();
        assert_eq!(Problem::from_file(&json_path).unwrap().acts.len(), 4);

        let toml_path = dir.path().join("p.toml");
        let mut f = std::fs::File::create(&toml_path).unwrap();
        writeln!(f, "pmfs = [[1.0]]\nacts = [[2.0]]").unwrap();
        assert_eq!(Problem::from_file(&toml_path).unwrap().pmfs, vec![vec![1.0]]);

        let err = Problem::from_file(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
