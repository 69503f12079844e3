use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;

use midtrade_data::Datasets;
use midtrade_models::{
    Conflict, ConflictReport, JoinModels, Side, SideNetworks, SideReport, TradeFilters,
    UnavailableReason,
};
use tracing::{info, warn};

use crate::error::AnalysisError;
use crate::expander::expand_trade_partners;
use crate::matrix::{build_trade_matrix, normalize_trade_shares};
use crate::modeler::{assemble_join_samples, fit_join_models, Regressor};
use crate::network::TradeNetwork;
use crate::roster::find_conflict;

/// Runs the dispute/trade pipeline for one conflict at a time.
pub struct Analyzer {
    filters: TradeFilters,
    regressor: Arc<dyn Regressor>,
}

impl Analyzer {
    pub fn new(filters: TradeFilters, regressor: Arc<dyn Regressor>) -> Self {
        Self { filters, regressor }
    }

    /// Analyze both sides of a dispute. `Ok(None)` means the dispute number
    /// does not occur in the dataset.
    pub fn analyze(
        &self,
        datasets: &Datasets,
        conflict_id: i64,
    ) -> Result<Option<ConflictReport>, AnalysisError> {
        let start = Instant::now();

        let Some(conflict) =
            find_conflict(datasets.disputes(), conflict_id, datasets.disputes_sorted())
        else {
            info!(conflict_id, "Conflict not found");
            return Ok(None);
        };

        info!(
            conflict_id,
            start_year = conflict.start_year,
            combatants_a = conflict.roster.combatants_a.len(),
            combatants_b = conflict.roster.combatants_b.len(),
            "Resolved conflict"
        );

        let (partners_a, partners_b) = expand_trade_partners(
            datasets.trades(),
            &conflict.roster.combatants_a,
            &conflict.roster.combatants_b,
            conflict.start_year,
            &self.filters,
        );

        let sides = vec![
            self.analyze_side(datasets, &conflict, Side::A, partners_a)?,
            self.analyze_side(datasets, &conflict, Side::B, partners_b)?,
        ];

        info!(
            conflict_id,
            elapsed_ms = start.elapsed().as_millis(),
            "Conflict analysis complete"
        );

        Ok(Some(ConflictReport {
            conflict_id,
            start_year: conflict.start_year,
            trade_year: conflict.trade_year(),
            sides,
        }))
    }

    fn analyze_side(
        &self,
        datasets: &Datasets,
        conflict: &Conflict,
        side: Side,
        trade_partners: BTreeSet<String>,
    ) -> Result<SideReport, AnalysisError> {
        let instigators = conflict.roster.instigators(side).to_vec();
        let combatants = conflict.roster.combatants(side).to_vec();

        let Some(matrix) = build_trade_matrix(
            datasets.trades(),
            &trade_partners,
            conflict.start_year,
            &self.filters,
        ) else {
            info!(conflict_id = conflict.id, %side, "Too few countries for a trade matrix");
            return Ok(SideReport {
                side,
                instigators,
                combatants,
                trade_partners,
                trade_matrix: None,
                trade_shares: None,
                samples: Vec::new(),
                models: JoinModels::unavailable(UnavailableReason::NoTradeMatrix),
                networks: None,
                rendered: Vec::new(),
            });
        };

        let shares = normalize_trade_shares(&matrix);

        let (samples, models) = match assemble_join_samples(&shares, &combatants, &instigators) {
            Some(samples) => {
                let models = fit_join_models(self.regressor.as_ref(), &samples)?;
                (samples, models)
            }
            None => {
                warn!(conflict_id = conflict.id, %side, "No instigator recorded, skipping models");
                (
                    Vec::new(),
                    JoinModels::unavailable(UnavailableReason::NoInstigator),
                )
            }
        };

        let network = TradeNetwork::from_matrix(&matrix, &instigators, &combatants);
        let networks = SideNetworks {
            trade: network.view(),
            combatants: network.combatants_only().view(),
        };

        info!(
            conflict_id = conflict.id,
            %side,
            countries = matrix.len(),
            samples = samples.len(),
            linear = models.linear.is_available(),
            logistic = models.logistic.is_available(),
            "Side analysis complete"
        );

        Ok(SideReport {
            side,
            instigators,
            combatants,
            trade_partners,
            trade_matrix: Some(matrix),
            trade_shares: Some(shares),
            samples,
            models,
            networks: Some(networks),
            rendered: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{july_crisis, MockRegressor};
    use midtrade_models::ModelOutcome;

    fn analyzer(regressor: Arc<MockRegressor>) -> Analyzer {
        Analyzer::new(TradeFilters::default(), regressor)
    }

    #[test]
    fn unknown_conflict_is_none() {
        let analyzer = analyzer(Arc::new(MockRegressor::default()));
        assert!(analyzer.analyze(&july_crisis(), 999).unwrap().is_none());
    }

    #[test]
    fn both_sides_are_reported() {
        let regressor = Arc::new(MockRegressor::default());
        let report = analyzer(regressor.clone())
            .analyze(&july_crisis(), 12)
            .unwrap()
            .unwrap();

        assert_eq!(report.start_year, 1914);
        assert_eq!(report.trade_year, 1913);
        assert_eq!(report.sides.len(), 2);

        let a = report.side(Side::A).unwrap();
        assert_eq!(a.instigators, vec!["AUH"]);
        assert_eq!(a.combatants, vec!["AUH", "GMY"]);
        assert!(a.trade_matrix.is_some());
        assert!(a.models.linear.is_available());
        assert!(a.models.logistic.is_available());

        let b = report.side(Side::B).unwrap();
        assert_eq!(b.instigators, vec!["SER"]);
        assert!(b.networks.is_some());

        assert_eq!(regressor.linear_calls(), 2);
        assert_eq!(regressor.logistic_calls(), 2);
    }

    #[test]
    fn lone_country_has_no_matrix() {
        let report = analyzer(Arc::new(MockRegressor::default()))
            .analyze(&july_crisis(), 5)
            .unwrap()
            .unwrap();

        let a = report.side(Side::A).unwrap();
        assert!(a.trade_matrix.is_none());
        assert!(a.networks.is_none());
        assert_eq!(
            a.models.linear,
            ModelOutcome::unavailable(UnavailableReason::NoTradeMatrix)
        );

        let b = report.side(Side::B).unwrap();
        assert!(b.instigators.is_empty());
        assert!(b.combatants.is_empty());
        assert!(b.trade_matrix.is_none());
    }

    #[test]
    fn regression_failure_is_an_error() {
        let result = analyzer(Arc::new(MockRegressor::failing())).analyze(&july_crisis(), 12);
        assert!(matches!(result, Err(AnalysisError::Regression(_))));
    }
}
