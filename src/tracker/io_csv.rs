// Primitives for reading CSV files.

use crate::tracker::{io_common::non_empty, *};

/// Reads a CSV file with a header row. Empty fields are missing values and
/// lines may have fewer fields than the header.
pub fn read_csv_table(path: &str, bytes: &[u8]) -> BTrackerResult<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);
    let headers: Vec<String> = rdr
        .headers()
        .context(CsvParseSnafu { path })?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();
    debug!("read_csv_table: {:?}: header: {:?}", path, headers);

    let mut rows: Vec<Vec<Option<String>>> = Vec::new();
    for (idx, line_r) in rdr.records().enumerate() {
        let line = line_r.context(CsvParseSnafu { path })?;
        debug!("read_csv_table: lineno: {:?} row: {:?}", idx + 2, line);
        rows.push(line.iter().map(non_empty).collect());
    }
    info!("read_csv_table: {:?}: {} rows", path, rows.len());
    Ok(Table::new(headers, rows))
}
