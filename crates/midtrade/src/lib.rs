//! midtrade - trade ties and joining behaviour in militarized interstate disputes
//!
//! Looks up a dispute in the MIDB participant data, gathers every country that
//! traded with either side in the year before it began, and models whether a
//! country's trade share with a side's instigator predicts that it joined.
//!
//! # Library Usage
//!
//! ```rust,no_run
//! use midtrade::models::MidtradeConfig;
//! use midtrade::Session;
//!
//! let session = Session::open(MidtradeConfig::default())?;
//! if let Some(report) = session.analyze(258)? {
//!     println!("{}", midtrade::summary::format_report(&report));
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub use midtrade_analysis as analysis;
pub use midtrade_data as data;
pub use midtrade_models as models;

pub mod repl;
pub mod summary;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use midtrade_analysis::{render_report, AnalysisError, Analyzer, LinfaRegressor, Regressor};
use midtrade_data::Datasets;
use midtrade_models::{ConflictReport, MidtradeConfig};
use tracing::{info, warn};

/// Read a TOML config. A missing file yields the defaults.
pub fn load_config(path: &Path) -> anyhow::Result<MidtradeConfig> {
    if !path.exists() {
        info!(path = %path.display(), "Config file not found, using defaults");
        return Ok(MidtradeConfig::default());
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("Failed to parse config: {}", path.display()))
}

/// Build an Analyzer from configuration.
pub fn build_analyzer(config: &MidtradeConfig, regressor: Arc<dyn Regressor>) -> Analyzer {
    Analyzer::new(config.filters, regressor)
}

/// Datasets plus the analyzer that reads them, held for one run of the tool.
pub struct Session {
    config: MidtradeConfig,
    datasets: Datasets,
    analyzer: Analyzer,
}

impl Session {
    /// Load both datasets named in the config and fit with linfa.
    pub fn open(config: MidtradeConfig) -> anyhow::Result<Self> {
        let datasets = Datasets::load(&config.data).context("Failed to load datasets")?;
        Ok(Self::new(
            config,
            datasets,
            Arc::new(LinfaRegressor::default()),
        ))
    }

    pub fn new(config: MidtradeConfig, datasets: Datasets, regressor: Arc<dyn Regressor>) -> Self {
        let analyzer = build_analyzer(&config, regressor);
        Self {
            config,
            datasets,
            analyzer,
        }
    }

    pub fn config(&self) -> &MidtradeConfig {
        &self.config
    }

    /// Analyze one conflict and, when rendering is enabled, write its networks.
    ///
    /// A rendering failure is logged and leaves the affected sides without
    /// rendered files; the report itself is still returned.
    pub fn analyze(&self, conflict_id: i64) -> Result<Option<ConflictReport>, AnalysisError> {
        let Some(mut report) = self.analyzer.analyze(&self.datasets, conflict_id)? else {
            return Ok(None);
        };
        if self.config.render.enabled {
            if let Err(e) = render_report(&mut report, &self.config.render) {
                warn!(
                    conflict_id,
                    output_dir = %self.config.render.output_dir,
                    error = %e,
                    "Rendering failed, returning report without network files"
                );
            }
        }
        Ok(Some(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use midtrade_analysis::test_support::{july_crisis, MockRegressor};
    use midtrade_models::Side;

    #[test]
    fn missing_config_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, MidtradeConfig::default());
    }

    #[test]
    fn config_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("midtrade.toml");
        std::fs::write(
            &path,
            "[filters]\nrequire_nonzero_flows = true\n\n[render]\nenabled = false\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert!(config.filters.require_nonzero_flows);
        assert!(config.filters.ignore_unknown);
        assert!(!config.render.enabled);
    }

    #[test]
    fn malformed_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("midtrade.toml");
        std::fs::write(&path, "[render\nenabled = ").unwrap();
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn session_renders_when_enabled() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = MidtradeConfig::default();
        config.render.output_dir = dir.path().to_string_lossy().into_owned();
        config.render.export_dot = false;

        let session = Session::new(config, july_crisis(), Arc::new(MockRegressor::default()));
        let report = session.analyze(12).unwrap().unwrap();

        let a = report.side(Side::A).unwrap();
        assert_eq!(a.rendered.len(), 2);
        assert!(a.rendered.iter().all(|p| p.exists()));
    }

    #[test]
    fn render_failure_keeps_the_report() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-directory");
        std::fs::write(&blocker, "occupied").unwrap();

        let mut config = MidtradeConfig::default();
        config.render.output_dir = blocker.to_string_lossy().into_owned();

        let session = Session::new(config, july_crisis(), Arc::new(MockRegressor::default()));
        let report = session.analyze(12).unwrap().unwrap();

        assert_eq!(report.sides.len(), 2);
        assert!(report.sides.iter().all(|s| s.rendered.is_empty()));
        let a = report.side(Side::A).unwrap();
        assert_eq!(a.instigators, vec!["AUH"]);
        assert!(a.models.linear.is_available());
    }

    #[test]
    fn session_skips_rendering_when_disabled() {
        let mut config = MidtradeConfig::default();
        config.render.enabled = false;
        config.render.output_dir = "/nonexistent/should/not/be/created".to_string();

        let session = Session::new(config, july_crisis(), Arc::new(MockRegressor::default()));
        let report = session.analyze(12).unwrap().unwrap();
        assert!(report.sides.iter().all(|s| s.rendered.is_empty()));
        assert!(session.analyze(404).unwrap().is_none());
    }
}
