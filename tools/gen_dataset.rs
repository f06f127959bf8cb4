//! Synthetic Dataset Generator
//!
//! Writes a synthetic credit records CSV in the training schema, with feature
//! values drawn from band-correlated ranges so a model trained on the output
//! separates the three categories. Occupations cycle through the full
//! vocabulary so every form choice is seen at fit time.

use anyhow::{Context, Result};
use credit_scoring::dataset::REQUIRED_COLUMNS;
use credit_scoring::form::OCCUPATION_CHOICES;
use credit_scoring::types::ScoreBand;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::env;
use tracing::info;

const DEFAULT_ROWS: usize = 500;
const DEFAULT_PATH: &str = "data/credit_data.csv";
const SEED: u64 = 42;

const PAYMENT_BEHAVIOURS: [&str; 6] = [
    "High_spent_Small_value_payments",
    "High_spent_Medium_value_payments",
    "High_spent_Large_value_payments",
    "Low_spent_Small_value_payments",
    "Low_spent_Medium_value_payments",
    "Low_spent_Large_value_payments",
];

/// Record generator with band-correlated value ranges
struct RecordGenerator {
    rng: StdRng,
    row_counter: usize,
}

impl RecordGenerator {
    fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            row_counter: 0,
        }
    }

    fn random_choice<'a>(&mut self, options: &[&'a str]) -> &'a str {
        options[self.rng.gen_range(0..options.len())]
    }

    /// Imbalanced band mix, so the oversampling stage has work to do
    fn next_band(&mut self) -> ScoreBand {
        match self.rng.gen_range(0..100) {
            0..=29 => ScoreBand::Poor,
            30..=74 => ScoreBand::Standard,
            _ => ScoreBand::Good,
        }
    }

    /// One CSV record in [`REQUIRED_COLUMNS`] order
    fn generate(&mut self) -> Vec<String> {
        let band = self.next_band();
        let occupation = OCCUPATION_CHOICES[self.row_counter % OCCUPATION_CHOICES.len()].1;
        self.row_counter += 1;

        let (income, interest, delay, delayed, debt, utilization, invested, balance, history) =
            match band {
                ScoreBand::Poor => (
                    self.rng.gen_range(8_000.0..35_000.0),
                    self.rng.gen_range(18.0..34.0),
                    self.rng.gen_range(15..60),
                    self.rng.gen_range(10..28),
                    self.rng.gen_range(3_000.0..10_000.0),
                    self.rng.gen_range(55.0..95.0),
                    self.rng.gen_range(0.0..100.0),
                    self.rng.gen_range(0.0..300.0),
                    self.rng.gen_range(3..60),
                ),
                ScoreBand::Standard => (
                    self.rng.gen_range(30_000.0..80_000.0),
                    self.rng.gen_range(8.0..20.0),
                    self.rng.gen_range(3..20),
                    self.rng.gen_range(3..12),
                    self.rng.gen_range(800.0..4_000.0),
                    self.rng.gen_range(30.0..60.0),
                    self.rng.gen_range(50.0..400.0),
                    self.rng.gen_range(200.0..1_500.0),
                    self.rng.gen_range(36..180),
                ),
                ScoreBand::Good => (
                    self.rng.gen_range(70_000.0..180_000.0),
                    self.rng.gen_range(1.0..10.0),
                    self.rng.gen_range(0..5),
                    self.rng.gen_range(0..3),
                    self.rng.gen_range(0.0..1_500.0),
                    self.rng.gen_range(5.0..35.0),
                    self.rng.gen_range(300.0..2_000.0),
                    self.rng.gen_range(1_000.0..8_000.0),
                    self.rng.gen_range(120..400),
                ),
            };

        let salary = income / 12.0 * self.rng.gen_range(0.7..0.95);
        let emi = debt / 24.0 + self.rng.gen_range(20.0..120.0);
        let credit_mix = match band {
            ScoreBand::Poor => "Bad",
            ScoreBand::Standard => "Standard",
            ScoreBand::Good => "Good",
        };

        vec![
            occupation.to_string(),
            self.rng.gen_range(21..65).to_string(),
            format!("{:.2}", income),
            format!("{:.2}", salary),
            format!("{:.1}", interest),
            delay.to_string(),
            delayed.to_string(),
            self.rng.gen_range(0..13).to_string(),
            self.rng.gen_range(0..10).to_string(),
            format!("{:.2}", debt),
            format!("{:.1}", utilization),
            format!("{:.2}", emi),
            format!("{:.2}", invested),
            format!("{:.2}", balance),
            history.to_string(),
            self.random_choice(&["Yes", "No", "NM"]).to_string(),
            self.random_choice(&PAYMENT_BEHAVIOURS).to_string(),
            credit_mix.to_string(),
            band.label().to_string(),
        ]
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let rows: usize = env::args()
        .nth(1)
        .map(|arg| arg.parse())
        .transpose()
        .context("row count must be a number")?
        .unwrap_or(DEFAULT_ROWS);
    let path = env::args().nth(2).unwrap_or_else(|| DEFAULT_PATH.into());

    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("cannot create '{}'", path))?;
    writer.write_record(REQUIRED_COLUMNS)?;

    let mut generator = RecordGenerator::new(SEED);
    for _ in 0..rows {
        writer.write_record(generator.generate())?;
    }
    writer.flush()?;

    info!(rows, path = %path, "Synthetic dataset written");
    Ok(())
}
