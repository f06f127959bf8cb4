//! Interactive collection of customer details.
//!
//! One prompt per retained feature, in training column order. Empty input
//! accepts the field default, values outside the bounds are re-prompted, and
//! `q` (or end of input) at any prompt ends the session. The occupation menu
//! shows the Vietnamese display labels and translates the choice into the
//! English vocabulary token the encoder was fitted on.

use crate::types::CustomerProfile;
use anyhow::Result;
use std::io::{BufRead, Write};

/// Occupation menu: display label and the training-vocabulary token it maps to.
pub const OCCUPATION_CHOICES: [(&str, &str); 16] = [
    ("Nhà khoa học", "Scientist"),
    ("Kỹ sư", "Engineer"),
    ("Kiến trúc sư", "Architect"),
    ("Nghề khác", "Other"),
    ("Luật sư", "Lawyer"),
    ("Thợ cơ khí", "Mechanic"),
    ("Doanh nhân", "Entrepreneur"),
    ("Giáo viên", "Teacher"),
    ("Kế toán", "Accountant"),
    ("Bác sĩ", "Doctor"),
    ("Quản lý truyền thông", "Media_Manager"),
    ("Lập trình viên", "Developer"),
    ("Nhạc sĩ", "Musician"),
    ("Nhà báo", "Journalist"),
    ("Nhà văn", "Writer"),
    ("Quản lý", "Manager"),
];

/// A bounded numeric input control
struct NumberField {
    label: &'static str,
    min: f64,
    max: f64,
    step: f64,
    default: f64,
    integer: bool,
}

impl NumberField {
    const fn float(label: &'static str, step: f64, default: f64) -> Self {
        Self {
            label,
            min: 0.0,
            max: f64::INFINITY,
            step,
            default,
            integer: false,
        }
    }

    const fn int(label: &'static str, default: f64) -> Self {
        Self {
            label,
            min: 0.0,
            max: f64::INFINITY,
            step: 1.0,
            default,
            integer: true,
        }
    }

    fn prompt(&self) -> String {
        if self.max.is_finite() {
            format!(
                "{} [{}-{}, step {}, default {}]: ",
                self.label, self.min, self.max, self.step, self.default
            )
        } else {
            format!(
                "{} [min {}, step {}, default {}]: ",
                self.label, self.min, self.step, self.default
            )
        }
    }
}

const ANNUAL_INCOME: NumberField = NumberField::float("Annual Income", 500.0, 50_000.0);
const MONTHLY_SALARY: NumberField = NumberField::float("Monthly In-hand Salary", 50.0, 3_000.0);
const INTEREST_RATE: NumberField = NumberField::float("Interest Rate (%)", 0.1, 5.0);
const DELAY_FROM_DUE_DATE: NumberField = NumberField::int("Delay from Due Date (days)", 0.0);
const DELAYED_PAYMENTS: NumberField = NumberField::int("Number of Delayed Payments", 0.0);
const OUTSTANDING_DEBT: NumberField = NumberField::float("Outstanding Debt", 100.0, 1_000.0);
const CREDIT_UTILIZATION: NumberField = NumberField {
    label: "Credit Utilization Ratio (%)",
    min: 0.0,
    max: 100.0,
    step: 0.1,
    default: 50.0,
    integer: false,
};
const EMI_PER_MONTH: NumberField = NumberField::float("Total EMI per Month", 10.0, 200.0);
const AMOUNT_INVESTED: NumberField = NumberField::float("Amount Invested Monthly", 10.0, 500.0);
const MONTHLY_BALANCE: NumberField = NumberField::float("Monthly Balance", 10.0, 1_000.0);
const CREDIT_HISTORY_AGE: NumberField = NumberField::int("Credit History Age (months)", 12.0);

/// Collect one customer profile from the form.
///
/// Returns `Ok(None)` when the user quits or the input ends.
pub fn read_profile(
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<Option<CustomerProfile>> {
    let Some(occupation) = read_occupation(input, output)? else {
        return Ok(None);
    };

    macro_rules! number {
        ($field:expr) => {
            match read_number(input, output, &$field)? {
                Some(value) => value,
                None => return Ok(None),
            }
        };
    }

    let annual_income = number!(ANNUAL_INCOME);
    let monthly_inhand_salary = number!(MONTHLY_SALARY);
    let interest_rate = number!(INTEREST_RATE);
    let delay_from_due_date = number!(DELAY_FROM_DUE_DATE) as i64;
    let num_of_delayed_payment = number!(DELAYED_PAYMENTS) as i64;
    let outstanding_debt = number!(OUTSTANDING_DEBT);
    let credit_utilization_ratio = number!(CREDIT_UTILIZATION);
    let total_emi_per_month = number!(EMI_PER_MONTH);
    let amount_invested_monthly = number!(AMOUNT_INVESTED);
    let monthly_balance = number!(MONTHLY_BALANCE);
    let credit_history_age_in_months = number!(CREDIT_HISTORY_AGE) as i64;

    Ok(Some(CustomerProfile {
        occupation,
        annual_income,
        monthly_inhand_salary,
        interest_rate,
        delay_from_due_date,
        num_of_delayed_payment,
        outstanding_debt,
        credit_utilization_ratio,
        total_emi_per_month,
        amount_invested_monthly,
        monthly_balance,
        credit_history_age_in_months,
    }))
}

/// Show the occupation menu and return the chosen vocabulary token
fn read_occupation(input: &mut impl BufRead, output: &mut impl Write) -> Result<Option<String>> {
    writeln!(output, "\nNghề nghiệp:")?;
    for (i, (label, _)) in OCCUPATION_CHOICES.iter().enumerate() {
        writeln!(output, "  {:2}. {}", i + 1, label)?;
    }

    loop {
        write!(
            output,
            "Occupation [1-{}, default 1]: ",
            OCCUPATION_CHOICES.len()
        )?;
        output.flush()?;

        let Some(text) = read_line(input)? else {
            return Ok(None);
        };
        if text.is_empty() {
            return Ok(Some(OCCUPATION_CHOICES[0].1.to_string()));
        }

        match text.parse::<usize>() {
            Ok(choice) if (1..=OCCUPATION_CHOICES.len()).contains(&choice) => {
                return Ok(Some(OCCUPATION_CHOICES[choice - 1].1.to_string()));
            }
            _ => {
                writeln!(
                    output,
                    "Please enter a number between 1 and {}.",
                    OCCUPATION_CHOICES.len()
                )?;
            }
        }
    }
}

/// Prompt for one bounded numeric value
fn read_number(
    input: &mut impl BufRead,
    output: &mut impl Write,
    field: &NumberField,
) -> Result<Option<f64>> {
    loop {
        write!(output, "{}", field.prompt())?;
        output.flush()?;

        let Some(text) = read_line(input)? else {
            return Ok(None);
        };
        if text.is_empty() {
            return Ok(Some(field.default));
        }

        match text.parse::<f64>() {
            Ok(value) if field.integer && value.fract() != 0.0 => {
                writeln!(output, "{} must be a whole number.", field.label)?;
            }
            Ok(value) if value < field.min || value > field.max => {
                if field.max.is_finite() {
                    writeln!(
                        output,
                        "{} must be between {} and {}.",
                        field.label, field.min, field.max
                    )?;
                } else {
                    writeln!(output, "{} must be at least {}.", field.label, field.min)?;
                }
            }
            Ok(value) => return Ok(Some(value)),
            Err(_) => {
                writeln!(output, "Please enter a number.")?;
            }
        }
    }
}

/// Read one trimmed line; `None` on end of input or an explicit quit
fn read_line(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    let text = line.trim().to_string();
    if text.eq_ignore_ascii_case("q")
        || text.eq_ignore_ascii_case("quit")
        || text.eq_ignore_ascii_case("exit")
    {
        return Ok(None);
    }

    Ok(Some(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn collect(script: &str) -> Option<CustomerProfile> {
        let mut input = Cursor::new(script.to_string());
        let mut output = Vec::new();
        read_profile(&mut input, &mut output).unwrap()
    }

    #[test]
    fn test_empty_inputs_accept_all_defaults() {
        let profile = collect(&"\n".repeat(12)).unwrap();

        assert_eq!(profile.occupation, "Scientist");
        assert_eq!(profile.annual_income, 50_000.0);
        assert_eq!(profile.monthly_inhand_salary, 3_000.0);
        assert_eq!(profile.interest_rate, 5.0);
        assert_eq!(profile.delay_from_due_date, 0);
        assert_eq!(profile.num_of_delayed_payment, 0);
        assert_eq!(profile.outstanding_debt, 1_000.0);
        assert_eq!(profile.credit_utilization_ratio, 50.0);
        assert_eq!(profile.total_emi_per_month, 200.0);
        assert_eq!(profile.amount_invested_monthly, 500.0);
        assert_eq!(profile.monthly_balance, 1_000.0);
        assert_eq!(profile.credit_history_age_in_months, 12);
    }

    #[test]
    fn test_full_entry_builds_the_profile() {
        let script = "12\n75000\n5000\n12.5\n10\n3\n2500\n45\n300\n200\n1500\n36\n";
        let profile = collect(script).unwrap();

        assert_eq!(profile.occupation, "Developer");
        assert_eq!(profile.annual_income, 75_000.0);
        assert_eq!(profile.interest_rate, 12.5);
        assert_eq!(profile.delay_from_due_date, 10);
        assert_eq!(profile.num_of_delayed_payment, 3);
        assert_eq!(profile.credit_history_age_in_months, 36);
    }

    #[test]
    fn test_every_display_label_has_a_token() {
        assert_eq!(OCCUPATION_CHOICES.len(), 16);
        for (label, token) in OCCUPATION_CHOICES {
            assert!(!label.is_empty());
            assert!(token.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
        }
    }

    #[test]
    fn test_invalid_occupation_choices_are_reprompted() {
        let script = format!("17\nabc\n4\n{}", "\n".repeat(11));
        let profile = collect(&script).unwrap();
        assert_eq!(profile.occupation, "Other");
    }

    #[test]
    fn test_out_of_range_values_are_reprompted() {
        // income below minimum, utilization above maximum
        let script = "1\n-10\n60000\n\n\n\n\n\n150\n99.5\n\n\n\n\n";
        let profile = collect(script).unwrap();
        assert_eq!(profile.annual_income, 60_000.0);
        assert_eq!(profile.credit_utilization_ratio, 99.5);
    }

    #[test]
    fn test_integer_fields_reject_fractions() {
        let script = "1\n\n\n\n2.5\n3\n\n\n\n\n\n\n\n";
        let profile = collect(script).unwrap();
        assert_eq!(profile.delay_from_due_date, 3);
    }

    #[test]
    fn test_quit_and_end_of_input_return_none() {
        assert!(collect("q\n").is_none());
        assert!(collect("").is_none());
        // quitting midway through the numeric fields
        assert!(collect("1\n60000\nexit\n").is_none());
    }
}
