//! CSV export of transaction history

use thiserror::Error;

use super::models::Transaction;

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV output is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

pub const CSV_HEADERS: [&str; 6] = ["Date", "Type", "Amount", "Description", "From/To", "Status"];

/// Render transactions as CSV text, one row per transaction in the given order.
pub fn export_csv(txs: &[Transaction]) -> Result<String, HistoryError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADERS)?;

    for tx in txs {
        writer.write_record([
            tx.date.to_string(),
            tx.kind.as_str().to_string(),
            tx.amount.to_string(),
            tx.description.clone(),
            tx.counterparty.clone().unwrap_or_default(),
            tx.status.as_str().to_string(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}
