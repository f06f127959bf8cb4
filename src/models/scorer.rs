//! Scoring collected customer profiles with the session's trained model.

use crate::features;
use crate::state::SessionState;
use crate::types::{CustomerProfile, ScoreReport};
use anyhow::Result;
use tracing::{debug, warn};

/// Scores customer profiles against the cached model and encoder.
///
/// The engine never trains or loads anything itself; it only reads what the
/// session state already holds.
pub struct ScoringEngine<'a> {
    state: &'a SessionState,
}

impl<'a> ScoringEngine<'a> {
    pub fn new(state: &'a SessionState) -> Self {
        Self { state }
    }

    /// Predict the score band for one profile.
    ///
    /// Returns `Ok(None)` with a warning when no trained model is present in
    /// the session state. The occupation is re-encoded with the encoder fitted
    /// at load time; an occupation outside that vocabulary is an error.
    pub fn predict(&self, profile: &CustomerProfile) -> Result<Option<ScoreReport>> {
        let Some(model) = self.state.trained_model() else {
            warn!("No trained model in session state; train the model first");
            return Ok(None);
        };
        let Some(dataset) = self.state.loaded_dataset() else {
            warn!("No dataset in session state; train the model first");
            return Ok(None);
        };

        let row = features::feature_row(profile, &dataset.occupations)?;
        let band = model.predict_band(&row)?;

        debug!(
            occupation = %profile.occupation,
            band = %band,
            gauge_position = band.gauge_position(),
            "Profile scored"
        );

        Ok(Some(
            ScoreReport::new(band).with_occupation(&profile.occupation),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::types::ScoreBand;
    use std::io::Write;

    fn scenario_config(dir: &tempfile::TempDir) -> AppConfig {
        let path = dir.path().join("credit_data.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            concat!(
                "Occupation,Age,Annual_Income,Monthly_Inhand_Salary,Interest_Rate,",
                "Delay_from_due_date,Num_of_Delayed_Payment,Num_Credit_Inquiries,",
                "Num_of_Loan,Outstanding_Debt,Credit_Utilization_Ratio,",
                "Total_EMI_per_month,Amount_invested_monthly,Monthly_Balance,",
                "Credit_History_Age_in_Months,Payment_of_Min_Amount,Payment_Behaviour,",
                "Credit_Mix,Credit_Score"
            )
        )
        .unwrap();
        let occupations = ["Developer", "Teacher", "Doctor", "Lawyer"];
        for i in 0..12 {
            let occupation = occupations[i % occupations.len()];
            let (income, delay, label) = match i % 3 {
                0 => (15_000.0, 40, "Poor"),
                1 => (60_000.0, 8, "Standard"),
                _ => (140_000.0, 0, "Good"),
            };
            writeln!(
                file,
                "{},30,{},{},5.0,{},0,2,1,1000,50.0,200,500,1000,24,Yes,Low_spent_Small_value_payments,Good,{}",
                occupation,
                income + i as f64 * 10.0,
                income / 12.0,
                delay,
                label
            )
            .unwrap();
        }

        let mut config = AppConfig::default();
        config.data.dataset_path = path.to_string_lossy().into_owned();
        config.training.ensemble_size = 10;
        config
    }

    #[test]
    fn test_untrained_session_yields_no_prediction() {
        let state = SessionState::new();
        let engine = ScoringEngine::new(&state);

        let profile = CustomerProfile::with_defaults("Developer");
        let report = engine.predict(&profile).unwrap();
        assert!(report.is_none());
    }

    #[test]
    fn test_scenario_row_yields_a_valid_band_and_position() {
        let dir = tempfile::tempdir().unwrap();
        let config = scenario_config(&dir);
        let state = SessionState::new();
        state.model(&config).unwrap();

        let engine = ScoringEngine::new(&state);
        let profile = CustomerProfile {
            occupation: "Developer".into(),
            annual_income: 75_000.0,
            monthly_inhand_salary: 5_000.0,
            interest_rate: 12.5,
            delay_from_due_date: 10,
            num_of_delayed_payment: 3,
            outstanding_debt: 2_500.0,
            credit_utilization_ratio: 45.0,
            total_emi_per_month: 300.0,
            amount_invested_monthly: 200.0,
            monthly_balance: 1_500.0,
            credit_history_age_in_months: 36,
        };

        let report = engine.predict(&profile).unwrap().unwrap();
        assert!(ScoreBand::ALL.contains(&report.band));
        assert!([25.0, 75.0, 125.0].contains(&report.gauge_position));
        assert_eq!(report.occupation, "Developer");
    }

    #[test]
    fn test_unseen_occupation_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = scenario_config(&dir);
        let state = SessionState::new();
        state.model(&config).unwrap();

        let engine = ScoringEngine::new(&state);
        let profile = CustomerProfile::with_defaults("Astronaut");
        assert!(engine.predict(&profile).is_err());
    }

    #[test]
    fn test_repeated_predictions_reuse_the_cached_model() {
        let dir = tempfile::tempdir().unwrap();
        let config = scenario_config(&dir);
        let state = SessionState::new();
        state.model(&config).unwrap();
        let trained_at = state.trained_model().unwrap().trained_at;

        let engine = ScoringEngine::new(&state);
        let profile = CustomerProfile::with_defaults("Teacher");
        let first = engine.predict(&profile).unwrap().unwrap();
        let second = engine.predict(&profile).unwrap().unwrap();

        assert_eq!(first.band, second.band);
        assert_eq!(state.trained_model().unwrap().trained_at, trained_at);
    }
}
