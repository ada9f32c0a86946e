// Primitives for reading spreadsheets (xlsx, xls, xlsb, ods).

use calamine::{open_workbook_auto, DataType, Range, Reader};

use crate::tracker::{
    io_common::{format_number, non_empty},
    *,
};

/// Reads the given worksheet, or the first one. The first row is the header.
pub fn read_excel_table(path: &str, worksheet: Option<&str>) -> BTrackerResult<Table> {
    let wrange = get_range(path, worksheet)?;
    let mut iter = wrange.rows();
    let header = iter.next().context(EmptyExcelSnafu { path })?;
    let headers: Vec<String> = header
        .iter()
        .map(|c| cell_text(c).unwrap_or_default())
        .collect();
    debug!("read_excel_table: {:?}: header: {:?}", path, headers);

    let rows: Vec<Vec<Option<String>>> = iter
        .map(|row| row.iter().map(cell_text).collect())
        .collect();
    info!("read_excel_table: {:?}: {} rows", path, rows.len());
    Ok(Table::new(headers, rows))
}

fn get_range(path: &str, worksheet: Option<&str>) -> BTrackerResult<Range<DataType>> {
    debug!("get_range: path: {:?} worksheet: {:?}", path, worksheet);
    let mut workbook = open_workbook_auto(path).context(OpeningExcelSnafu { path })?;

    // A worksheet name was provided, use it.
    let wrange = if let Some(worksheet_name) = worksheet {
        workbook
            .worksheet_range(worksheet_name)
            .context(MissingWorksheetSnafu {
                path,
                worksheet: worksheet_name,
            })?
            .context(OpeningExcelSnafu { path })?
    } else {
        workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu { path })?
            .context(OpeningExcelSnafu { path })?
    };
    Ok(wrange)
}

fn cell_text(cell: &DataType) -> Option<String> {
    match cell {
        DataType::Empty => None,
        DataType::String(s) => non_empty(s),
        DataType::Float(f) => Some(format_number(*f)),
        DataType::Int(i) => Some(i.to_string()),
        DataType::Bool(b) => Some(b.to_string()),
        DataType::Error(e) => {
            warn!("cell_text: error cell {:?} read as empty", e);
            None
        }
        other => non_empty(&other.to_string()),
    }
}
