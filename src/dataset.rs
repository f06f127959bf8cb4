//! Training dataset loading and encoding.
//!
//! Reads the credit records CSV, validates the expected schema, encodes the
//! occupation and label columns, and drops the columns excluded from both
//! training and inference.

use crate::features::{OccupationEncoder, FEATURE_COUNT, FEATURE_NAMES};
use crate::types::ScoreBand;
use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;
use ndarray::{Array1, Array2};
use serde::Deserialize;
use std::fs::File;
use std::path::Path;
use tracing::{info, warn};

/// Columns the CSV must provide, whether retained or dropped.
pub const REQUIRED_COLUMNS: [&str; 19] = [
    "Occupation",
    "Age",
    "Annual_Income",
    "Monthly_Inhand_Salary",
    "Interest_Rate",
    "Delay_from_due_date",
    "Num_of_Delayed_Payment",
    "Num_Credit_Inquiries",
    "Num_of_Loan",
    "Outstanding_Debt",
    "Credit_Utilization_Ratio",
    "Total_EMI_per_month",
    "Amount_invested_monthly",
    "Monthly_Balance",
    "Credit_History_Age_in_Months",
    "Payment_of_Min_Amount",
    "Payment_Behaviour",
    "Credit_Mix",
    "Credit_Score",
];

/// Columns parsed but excluded from training and inference.
pub const DROPPED_COLUMNS: [&str; 6] = [
    "Age",
    "Num_Credit_Inquiries",
    "Num_of_Loan",
    "Payment_of_Min_Amount",
    "Payment_Behaviour",
    "Credit_Mix",
];

/// One raw CSV row, before encoding and column dropping. The dropped
/// columns are parsed for schema validation and discarded.
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct RawRecord {
    #[serde(rename = "Occupation")]
    occupation: String,
    #[serde(rename = "Age")]
    age: f64,
    #[serde(rename = "Annual_Income")]
    annual_income: f64,
    #[serde(rename = "Monthly_Inhand_Salary")]
    monthly_inhand_salary: f64,
    #[serde(rename = "Interest_Rate")]
    interest_rate: f64,
    #[serde(rename = "Delay_from_due_date")]
    delay_from_due_date: i64,
    #[serde(rename = "Num_of_Delayed_Payment")]
    num_of_delayed_payment: i64,
    #[serde(rename = "Num_Credit_Inquiries")]
    num_credit_inquiries: f64,
    #[serde(rename = "Num_of_Loan")]
    num_of_loan: f64,
    #[serde(rename = "Outstanding_Debt")]
    outstanding_debt: f64,
    #[serde(rename = "Credit_Utilization_Ratio")]
    credit_utilization_ratio: f64,
    #[serde(rename = "Total_EMI_per_month")]
    total_emi_per_month: f64,
    #[serde(rename = "Amount_invested_monthly")]
    amount_invested_monthly: f64,
    #[serde(rename = "Monthly_Balance")]
    monthly_balance: f64,
    #[serde(rename = "Credit_History_Age_in_Months")]
    credit_history_age_in_months: i64,
    #[serde(rename = "Payment_of_Min_Amount")]
    payment_of_min_amount: String,
    #[serde(rename = "Payment_Behaviour")]
    payment_behaviour: String,
    #[serde(rename = "Credit_Mix")]
    credit_mix: String,
    #[serde(rename = "Credit_Score")]
    credit_score: String,
}

/// Encoded training data plus the fitted occupation encoder.
///
/// Loaded once per process; the encoder must be reused unchanged for input
/// encoding and prediction decoding.
#[derive(Debug)]
pub struct EncodedDataset {
    /// Feature matrix in [`FEATURE_NAMES`] column order
    pub features: Array2<f64>,
    /// Label vector with the fixed Poor/Standard/Good codes 0/1/2
    pub labels: Array1<usize>,
    /// Occupation encoder fitted on this dataset
    pub occupations: OccupationEncoder,
}

impl EncodedDataset {
    /// Number of usable rows
    pub fn n_rows(&self) -> usize {
        self.features.nrows()
    }

    /// Number of model input features
    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    /// Load and encode the dataset from a CSV file.
    ///
    /// Fails when the file is missing, a required column is absent, or no
    /// usable rows remain after filtering. Malformed rows and rows whose
    /// label is outside {Poor, Standard, Good} are skipped with a warning.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path)
            .with_context(|| format!("The dataset '{}' was not found", path.display()))?;

        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .has_headers(true)
            .from_reader(file);

        let headers = reader.headers()?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                bail!("Column '{}' not found in the dataset", column);
            }
        }
        let expected_len = headers.len();

        let mut records = Vec::new();
        for result in reader.records() {
            let raw = result?;

            if raw.iter().all(|f| f.trim().is_empty()) {
                continue;
            }

            if raw.len() != expected_len {
                warn!(
                    line = raw.position().map(|p| p.line()).unwrap_or(0),
                    expected = expected_len,
                    found = raw.len(),
                    "Skipping row with wrong field count"
                );
                continue;
            }

            match raw.deserialize::<RawRecord>(Some(&headers)) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!(
                        line = raw.position().map(|p| p.line()).unwrap_or(0),
                        error = %e,
                        "Skipping malformed row"
                    );
                }
            }
        }

        // Fit the occupation vocabulary on everything parsed, then encode.
        let occupations = OccupationEncoder::fit(records.iter().map(|r| r.occupation.as_str()));

        let mut rows = Vec::new();
        let mut labels = Vec::new();
        let mut band_counts = [0usize; 3];

        for record in &records {
            let band = match ScoreBand::from_label(&record.credit_score) {
                Some(band) => band,
                None => {
                    warn!(
                        label = %record.credit_score,
                        "Skipping row with unknown credit score label"
                    );
                    continue;
                }
            };

            let occupation_code = occupations.encode(&record.occupation)?;
            rows.extend_from_slice(&[
                occupation_code as f64,
                record.annual_income,
                record.monthly_inhand_salary,
                record.interest_rate,
                record.delay_from_due_date as f64,
                record.num_of_delayed_payment as f64,
                record.outstanding_debt,
                record.credit_utilization_ratio,
                record.total_emi_per_month,
                record.amount_invested_monthly,
                record.monthly_balance,
                record.credit_history_age_in_months as f64,
            ]);
            band_counts[band.code()] += 1;
            labels.push(band.code());
        }

        if labels.is_empty() {
            bail!("No usable rows in dataset '{}'", path.display());
        }

        let features = Array2::from_shape_vec((labels.len(), FEATURE_COUNT), rows)
            .context("Failed to assemble feature matrix")?;
        let labels = Array1::from_vec(labels);

        info!(
            rows = labels.len(),
            features = FEATURE_NAMES.len(),
            occupations = occupations.len(),
            poor = band_counts[0],
            standard = band_counts[1],
            good = band_counts[2],
            "Dataset loaded and encoded"
        );

        Ok(Self {
            features,
            labels,
            occupations,
        })
    }
}
