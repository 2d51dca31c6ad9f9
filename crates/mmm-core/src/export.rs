//! CSV projection of a filtered transaction view.

use chrono::NaiveDate;

use mmm_domain::{Group, Transaction};

use crate::CoreError;

/// Column order of the exported report.
pub const EXPORT_HEADERS: [&str; 7] = [
    "Date",
    "Merchant",
    "Amount",
    "Type",
    "Category",
    "Ownership",
    "Group Name",
];

/// Spreadsheet apps sniff the encoding from a leading byte-order mark.
const UTF8_BOM: &str = "\u{feff}";

/// Export filename for a given day, e.g. `mmm_report_2024-06-15.csv`.
pub fn report_filename(today: NaiveDate) -> String {
    format!("mmm_report_{}.csv", today.format("%Y-%m-%d"))
}

/// Renders one CSV row per transaction in the given (already filtered and
/// sorted) view. Fields containing the delimiter or a quote are wrapped in
/// quotes with inner quotes doubled; output is UTF-8 with a leading BOM.
pub fn export_csv(transactions: &[Transaction], groups: &[Group]) -> Result<String, CoreError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(EXPORT_HEADERS)
        .map_err(|err| CoreError::Export(err.to_string()))?;
    for txn in transactions {
        let group_name = match txn.group_id {
            Some(id) => groups
                .iter()
                .find(|g| g.id == id)
                .map(|g| g.name.clone())
                .unwrap_or_default(),
            None => "-".into(),
        };
        writer
            .write_record([
                txn.date.format("%Y-%m-%d").to_string(),
                txn.merchant.clone(),
                txn.amount.to_string(),
                txn.kind.to_string(),
                txn.category.clone().unwrap_or_else(|| "-".into()),
                txn.ownership.to_string(),
                group_name,
            ])
            .map_err(|err| CoreError::Export(err.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| CoreError::Export(err.to_string()))?;
    let body = String::from_utf8(bytes).map_err(|err| CoreError::Export(err.to_string()))?;
    Ok(format!("{UTF8_BOM}{body}"))
}
