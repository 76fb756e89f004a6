//! # CSV Export
//!
//! Serialize amortization schedules and calculation history into CSV text
//! for download or clipboard use. Builds the document in memory; callers
//! decide where the bytes go.

use csv::WriterBuilder;

use crate::calculations::loan::ScheduleRow;
use crate::errors::{CalcError, CalcResult};
use crate::formatter::format_number;
use crate::history::HistoryEntry;

fn finish(writer: csv::Writer<Vec<u8>>) -> CalcResult<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| CalcError::SerializationError {
            reason: e.to_string(),
        })?;
    String::from_utf8(bytes).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })
}

/// Render an amortization schedule as CSV.
///
/// Columns: `Month,Date,Balance,Principal,Interest`. Amounts are written
/// as plain numbers with two decimals so spreadsheets parse them.
pub fn schedule_to_csv(rows: &[ScheduleRow]) -> CalcResult<String> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());

    writer
        .write_record(["Month", "Date", "Balance", "Principal", "Interest"])
        .map_err(|e| CalcError::SerializationError {
            reason: e.to_string(),
        })?;

    for row in rows {
        writer
            .write_record([
                row.period.to_string(),
                row.date.format("%Y-%m-%d").to_string(),
                format_number(row.balance, 2),
                format_number(row.principal, 2),
                format_number(row.interest, 2),
            ])
            .map_err(|e| CalcError::SerializationError {
                reason: e.to_string(),
            })?;
    }

    finish(writer)
}

/// Render calculation history as CSV.
///
/// Columns: `Date,Type,Parameters,Result`.
pub fn history_to_csv(entries: &[HistoryEntry]) -> CalcResult<String> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());

    writer
        .write_record(["Date", "Type", "Parameters", "Result"])
        .map_err(|e| CalcError::SerializationError {
            reason: e.to_string(),
        })?;

    for entry in entries {
        writer
            .write_record([
                entry.date.format("%Y-%m-%d %H:%M:%S").to_string(),
                entry.calc_type.clone(),
                entry.params.clone(),
                entry.result.clone(),
            ])
            .map_err(|e| CalcError::SerializationError {
                reason: e.to_string(),
            })?;
    }

    finish(writer)
}
