//! The closed set of competing models.

use crate::features::FeatureColumn;
use crate::models::{BoxedForecaster, LinearAutoregression, NaiveLag};

/// One of the four models compared in the backtest.
///
/// Each variant carries its predictor-column list, so the evaluation loop
/// stays generic over fit-then-predict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModelKind {
    /// Last month's value, no fitting.
    Naive,
    /// OLS of y on y_lag1.
    Ar1,
    /// OLS of y on y_lag1 and the lagged log regressor level.
    ArxLevel,
    /// OLS of y on y_lag1 and the lagged year-over-year log change.
    ArxYoy,
}

impl ModelKind {
    /// All models in reporting order.
    pub const ALL: [ModelKind; 4] = [
        ModelKind::Naive,
        ModelKind::Ar1,
        ModelKind::ArxLevel,
        ModelKind::ArxYoy,
    ];

    /// Short name used in column suffixes and the metrics table.
    pub fn name(self) -> &'static str {
        match self {
            ModelKind::Naive => "naive",
            ModelKind::Ar1 => "ar1",
            ModelKind::ArxLevel => "arx_level",
            ModelKind::ArxYoy => "arx_yoy",
        }
    }

    /// Position of this model in [`ModelKind::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Columns the model regresses `y` on. The naive model reads `y_lag1`
    /// directly instead of fitting it.
    pub fn predictors(self) -> &'static [FeatureColumn] {
        match self {
            ModelKind::Naive | ModelKind::Ar1 => &[FeatureColumn::YLag1],
            ModelKind::ArxLevel => &[FeatureColumn::YLag1, FeatureColumn::LogRegressorLag1],
            ModelKind::ArxYoy => &[FeatureColumn::YLag1, FeatureColumn::YoyLogRegressorLag1],
        }
    }

    /// Fresh, unfitted forecaster of this kind.
    pub fn create(self) -> BoxedForecaster {
        match self {
            ModelKind::Naive => Box::new(NaiveLag::new()),
            kind => Box::new(LinearAutoregression::new(kind)),
        }
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_reporting_order() {
        for (i, kind) in ModelKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn predictor_lists() {
        assert_eq!(ModelKind::ArxLevel.predictors().len(), 2);
        assert_eq!(
            ModelKind::ArxYoy.predictors()[1],
            FeatureColumn::YoyLogRegressorLag1
        );
    }

    #[test]
    fn display_uses_short_name() {
        let names: Vec<String> = ModelKind::ALL.iter().map(|k| k.to_string()).collect();
        assert_eq!(names, vec!["naive", "ar1", "arx_level", "arx_yoy"]);
    }

    #[test]
    fn created_models_carry_their_names() {
        for kind in ModelKind::ALL {
            assert_eq!(kind.create().name(), kind.name());
        }
    }
}
