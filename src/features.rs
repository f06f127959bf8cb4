//! Feature schema and encoding for the credit scoring model.
//!
//! The feature vector layout here is the single source of truth: the dataset
//! loader builds the training matrix in this column order and the scorer
//! builds the single-row inference matrix the same way. Any divergence between
//! the two makes the model call undefined, so both go through [`feature_row`].

use crate::types::CustomerProfile;
use anyhow::{bail, Result};
use std::collections::BTreeMap;

/// Retained feature columns, in training matrix order.
pub const FEATURE_NAMES: [&str; 12] = [
    "Occupation",
    "Annual_Income",
    "Monthly_Inhand_Salary",
    "Interest_Rate",
    "Delay_from_due_date",
    "Num_of_Delayed_Payment",
    "Outstanding_Debt",
    "Credit_Utilization_Ratio",
    "Total_EMI_per_month",
    "Amount_invested_monthly",
    "Monthly_Balance",
    "Credit_History_Age_in_Months",
];

/// Number of model input features.
pub const FEATURE_COUNT: usize = FEATURE_NAMES.len();

/// Ordinal encoder for the occupation column.
///
/// Fit once on the training data: unique values are collected, sorted, and
/// assigned codes 0..n. The fitted encoder is reused unchanged for user input;
/// it is never refit, so a value unseen at fit time is an error rather than a
/// silently invented code.
#[derive(Debug, Clone)]
pub struct OccupationEncoder {
    classes: Vec<String>,
    codes: BTreeMap<String, usize>,
}

impl OccupationEncoder {
    /// Fit the encoder on the occupation column of the training set
    pub fn fit<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut classes: Vec<String> = values
            .into_iter()
            .map(|v| v.as_ref().to_string())
            .collect();
        classes.sort();
        classes.dedup();

        let codes = classes
            .iter()
            .enumerate()
            .map(|(code, class)| (class.clone(), code))
            .collect();

        Self { classes, codes }
    }

    /// Encode an occupation into its fit-time code
    pub fn encode(&self, value: &str) -> Result<usize> {
        match self.codes.get(value) {
            Some(&code) => Ok(code),
            None => bail!("occupation '{}' was not seen during training", value),
        }
    }

    /// Decode a code back into the occupation string
    pub fn decode(&self, code: usize) -> Result<&str> {
        match self.classes.get(code) {
            Some(class) => Ok(class.as_str()),
            None => bail!("occupation code {} is out of range", code),
        }
    }

    /// Number of distinct occupations seen at fit time
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// True when the encoder was fit on an empty column
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Fit-time vocabulary, in code order
    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}

/// Encode a customer profile into a feature row matching [`FEATURE_NAMES`].
pub fn feature_row(profile: &CustomerProfile, occupations: &OccupationEncoder) -> Result<Vec<f64>> {
    let occupation_code = occupations.encode(&profile.occupation)?;

    Ok(vec![
        occupation_code as f64,
        profile.annual_income,
        profile.monthly_inhand_salary,
        profile.interest_rate,
        profile.delay_from_due_date as f64,
        profile.num_of_delayed_payment as f64,
        profile.outstanding_debt,
        profile.credit_utilization_ratio,
        profile.total_emi_per_month,
        profile.amount_invested_monthly,
        profile.monthly_balance,
        profile.credit_history_age_in_months as f64,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fitted_encoder() -> OccupationEncoder {
        OccupationEncoder::fit(["Teacher", "Doctor", "Teacher", "Architect"])
    }

    #[test]
    fn test_encoder_assigns_sorted_codes() {
        let encoder = fitted_encoder();
        assert_eq!(encoder.len(), 3);
        assert_eq!(encoder.encode("Architect").unwrap(), 0);
        assert_eq!(encoder.encode("Doctor").unwrap(), 1);
        assert_eq!(encoder.encode("Teacher").unwrap(), 2);
    }

    #[test]
    fn test_encoder_round_trip() {
        let encoder = fitted_encoder();
        for class in encoder.classes() {
            let code = encoder.encode(class).unwrap();
            assert_eq!(encoder.decode(code).unwrap(), class);
        }
    }

    #[test]
    fn test_encoder_rejects_unseen_values() {
        let encoder = fitted_encoder();
        assert!(encoder.encode("Astronaut").is_err());
        assert!(encoder.decode(3).is_err());
    }

    #[test]
    fn test_feature_row_order_and_length() {
        let encoder = fitted_encoder();
        let mut profile = CustomerProfile::with_defaults("Doctor");
        profile.interest_rate = 12.5;
        profile.credit_history_age_in_months = 36;

        let row = feature_row(&profile, &encoder).unwrap();
        assert_eq!(row.len(), FEATURE_COUNT);
        assert_eq!(row[0], 1.0); // Doctor
        assert_eq!(row[1], 50_000.0); // Annual_Income default
        assert_eq!(row[3], 12.5); // Interest_Rate
        assert_eq!(row[11], 36.0); // Credit_History_Age_in_Months
    }

    #[test]
    fn test_feature_row_rejects_unseen_occupation() {
        let encoder = fitted_encoder();
        let profile = CustomerProfile::with_defaults("Astronaut");
        assert!(feature_row(&profile, &encoder).is_err());
    }

    #[test]
    fn test_dropped_columns_are_not_in_schema() {
        for dropped in crate::dataset::DROPPED_COLUMNS {
            assert!(!FEATURE_NAMES.contains(&dropped));
        }
    }
}
