//! Customer input record collected by the form

use serde::{Deserialize, Serialize};

/// One customer's financial attributes, as collected by the input form.
///
/// The field set and order match the training feature schema exactly; the
/// occupation holds the English training-vocabulary token, not the display
/// label shown in the form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerProfile {
    /// Occupation (training-vocabulary token, e.g. "Developer")
    #[serde(alias = "Occupation")]
    pub occupation: String,

    /// Total yearly income
    #[serde(alias = "Annual_Income")]
    pub annual_income: f64,

    /// Monthly take-home salary after deductions
    #[serde(alias = "Monthly_Inhand_Salary")]
    pub monthly_inhand_salary: f64,

    /// Annual interest rate in percent
    #[serde(alias = "Interest_Rate")]
    pub interest_rate: f64,

    /// Days the latest payment was late past the due date
    #[serde(alias = "Delay_from_due_date")]
    pub delay_from_due_date: i64,

    /// Total number of delayed payments
    #[serde(alias = "Num_of_Delayed_Payment")]
    pub num_of_delayed_payment: i64,

    /// Total debt still to be paid
    #[serde(alias = "Outstanding_Debt")]
    pub outstanding_debt: f64,

    /// Percentage of available credit in use
    #[serde(alias = "Credit_Utilization_Ratio")]
    pub credit_utilization_ratio: f64,

    /// Total EMI amount payable per month
    #[serde(alias = "Total_EMI_per_month")]
    pub total_emi_per_month: f64,

    /// Amount invested each month
    #[serde(alias = "Amount_invested_monthly")]
    pub amount_invested_monthly: f64,

    /// Balance remaining at the end of the month
    #[serde(alias = "Monthly_Balance")]
    pub monthly_balance: f64,

    /// Length of credit history in months
    #[serde(alias = "Credit_History_Age_in_Months")]
    pub credit_history_age_in_months: i64,
}

impl CustomerProfile {
    /// Create a profile with the form's default values for every numeric field
    pub fn with_defaults(occupation: impl Into<String>) -> Self {
        Self {
            occupation: occupation.into(),
            annual_income: 50_000.0,
            monthly_inhand_salary: 3_000.0,
            interest_rate: 5.0,
            delay_from_due_date: 0,
            num_of_delayed_payment: 0,
            outstanding_debt: 1_000.0,
            credit_utilization_ratio: 50.0,
            total_emi_per_month: 200.0,
            amount_invested_monthly: 500.0,
            monthly_balance: 1_000.0,
            credit_history_age_in_months: 12,
        }
    }
}
