//! # Reckon CLI Application
//!
//! Terminal front-end for the Reckon calculation engine. Prompts for loan
//! parameters, validates the raw strings through the shared field schema,
//! prints the payment breakdown and the first schedule rows, records the
//! run in an in-memory history, and dumps JSON for API use.

use std::collections::HashMap;
use std::io::{self, BufRead, Write};

use chrono::{Datelike, NaiveDate, Utc};

use reckon_core::calculations::loan::{LoanInput, LoanKind};
use reckon_core::calculations::{run, CalculationInput};
use reckon_core::errors::CalcResult;
use reckon_core::export::schedule_to_csv;
use reckon_core::formatter::format_currency;
use reckon_core::history::{HistoryEntry, HistoryStore, MemoryHistory};
use reckon_core::validate::{FieldSpec, Schema};
use reckon_core::CalculationOutput;

/// Read one line; an empty line keeps the default shown in the prompt.
fn prompt(label: &str, default: &str) -> String {
    print!("{}", label);
    if io::stdout().flush().is_err() {
        return default.to_string();
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default.to_string();
    }

    let trimmed = input.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

fn loan_schema() -> Schema {
    Schema::new(vec![
        FieldSpec::number("amount").at_least(100.0),
        FieldSpec::number("rate").range(0.1, 30.0),
        FieldSpec::integer("term").range(1.0, 360.0),
        FieldSpec::number("extra").at_least(0.0),
    ])
}

/// Validate the raw prompt strings and build the typed loan input.
fn loan_input_from(raw: &HashMap<String, String>) -> CalcResult<LoanInput> {
    let validated = loan_schema().validate(raw)?;

    let today = Utc::now().date_naive();
    let start_date = NaiveDate::from_ymd_opt(today.year(), today.month(), 1)
        .unwrap_or(today);

    Ok(LoanInput {
        label: "CLI demo".to_string(),
        amount: validated.get("amount")?,
        annual_rate_pct: validated.get("rate")?,
        term_months: validated.get_usize("term")? as u32,
        extra_monthly: validated.get("extra")?,
        start_date,
        kind: LoanKind::Personal,
    })
}

fn main() {
    println!("Reckon CLI - Everyday Calculators");
    println!("=================================");
    println!();
    println!("Running loan amortization demo...");
    println!();

    let mut raw = HashMap::new();
    raw.insert(
        "amount".to_string(),
        prompt("Enter loan amount ($) [25000]: ", "25000"),
    );
    raw.insert(
        "rate".to_string(),
        prompt("Enter annual rate (%) [6.5]: ", "6.5"),
    );
    raw.insert(
        "term".to_string(),
        prompt("Enter term (months) [60]: ", "60"),
    );
    raw.insert(
        "extra".to_string(),
        prompt("Enter extra monthly payment ($) [0]: ", "0"),
    );

    println!();
    let outcome = loan_input_from(&raw).and_then(|loan| {
        let input = CalculationInput::Loan(loan);
        run(&input).map(|output| (input, output))
    });

    match outcome {
        Ok((input, output)) => {
            let mut history = MemoryHistory::new();
            let _ = history.append(HistoryEntry::new(
                input.calc_type(),
                input.params_summary(),
                output.summary(),
            ));

            if let CalculationOutput::Loan(result) = &output {
                println!("═══════════════════════════════════════");
                println!("  LOAN CALCULATION RESULTS");
                println!("═══════════════════════════════════════");
                println!();
                println!("Input:");
                println!("  {}", input.params_summary());
                println!();
                println!("Payment:");
                println!("  Monthly:        {}", format_currency(result.monthly_payment));
                println!("  Months to zero: {}", result.months_to_payoff);
                println!("  Total interest: {}", format_currency(result.total_interest));
                println!("  Total paid:     {}", format_currency(result.total_paid));
                println!();
                println!("Schedule (first 3 periods):");
                for row in result.schedule.iter().take(3) {
                    println!(
                        "  {:>3}  {}  principal {}  interest {}  balance {}",
                        row.period,
                        row.date,
                        format_currency(row.principal),
                        format_currency(row.interest),
                        format_currency(row.balance),
                    );
                }
                println!();
                println!("═══════════════════════════════════════");

                if let Ok(csv) = schedule_to_csv(&result.schedule) {
                    println!();
                    println!("CSV export preview:");
                    for line in csv.lines().take(4) {
                        println!("  {}", line);
                    }
                }
            }

            println!();
            println!("JSON Output (for LLM/API use):");
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                println!("{}", json);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_build_a_valid_input() {
        let input = loan_input_from(&raw(&[
            ("amount", "25000"),
            ("rate", "6.5"),
            ("term", "60"),
            ("extra", "0"),
        ]))
        .unwrap();
        assert_eq!(input.amount, 25_000.0);
        assert_eq!(input.term_months, 60);
        assert_eq!(input.kind, LoanKind::Personal);
    }

    #[test]
    fn test_garbage_is_rejected_not_defaulted() {
        let err = loan_input_from(&raw(&[
            ("amount", "lots"),
            ("rate", "6.5"),
            ("term", "60"),
            ("extra", "0"),
        ]))
        .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_out_of_range_term_is_rejected() {
        let err = loan_input_from(&raw(&[
            ("amount", "25000"),
            ("rate", "6.5"),
            ("term", "400"),
            ("extra", "0"),
        ]))
        .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }
}
