// Writes the report sheets as xlsx workbooks.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, XlsxError};
use team_matching::{Cell, Sheet};

use crate::tracker::*;

pub fn write_workbook(path: &Path, sheets: &[Sheet]) -> BTrackerResult<()> {
    let path_s = path.display().to_string();
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    for sheet in sheets.iter() {
        debug!(
            "write_workbook: {:?}: sheet {:?} with {} rows",
            path_s,
            sheet.name,
            sheet.rows.len()
        );
        add_sheet(&mut workbook, sheet, &header_format)
            .context(WritingWorkbookSnafu { path: path_s.clone() })?;
    }
    workbook
        .save(path)
        .context(WritingWorkbookSnafu { path: path_s.clone() })?;
    info!("write_workbook: wrote {:?}", path_s);
    Ok(())
}

fn add_sheet(workbook: &mut Workbook, sheet: &Sheet, header_format: &Format) -> Result<(), XlsxError> {
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&sheet.name)?;
    for (col, h) in sheet.headers.iter().enumerate() {
        worksheet.write_string_with_format(0, column_index(col)?, h, header_format)?;
    }
    for (idx, row) in sheet.rows.iter().enumerate() {
        let r = row_index(idx + 1)?;
        for (col, cell) in row.iter().enumerate() {
            match cell {
                Cell::Empty => {}
                Cell::Text(s) => {
                    worksheet.write_string(r, column_index(col)?, s)?;
                }
                Cell::Count(n) => {
                    worksheet.write_number(r, column_index(col)?, *n as f64)?;
                }
            }
        }
    }
    Ok(())
}

fn column_index(col: usize) -> Result<u16, XlsxError> {
    u16::try_from(col).map_err(|_| XlsxError::RowColumnLimitError)
}

fn row_index(row: usize) -> Result<u32, XlsxError> {
    u32::try_from(row).map_err(|_| XlsxError::RowColumnLimitError)
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{open_workbook, DataType, Reader, Xlsx};

    #[test]
    fn sheets_are_written_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("report.xlsx");
        let sheets = vec![
            Sheet {
                name: "Summary".to_string(),
                headers: vec!["Status".to_string(), "Count".to_string()],
                rows: vec![vec![Cell::from("Total"), Cell::Count(3)]],
            },
            Sheet {
                name: "Goa_Participants".to_string(),
                headers: vec!["Full Name".to_string()],
                rows: vec![vec![Cell::Empty], vec![Cell::from("Ann")]],
            },
        ];
        write_workbook(&p, &sheets).unwrap();

        let mut wb: Xlsx<_> = open_workbook(&p).unwrap();
        assert_eq!(wb.sheet_names().to_vec(), vec!["Summary", "Goa_Participants"]);
        let summary = wb.worksheet_range("Summary").unwrap().unwrap();
        assert_eq!(
            summary.get_value((1, 0)),
            Some(&DataType::String("Total".to_string()))
        );
        assert_eq!(summary.get_value((1, 1)), Some(&DataType::Float(3.0)));
        let goa = wb.worksheet_range("Goa_Participants").unwrap().unwrap();
        assert_eq!(goa.get_value((2, 0)), Some(&DataType::String("Ann".to_string())));
    }

    #[test]
    fn unwritable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("missing").join("report.xlsx");
        let res = write_workbook(&p, &[]).map_err(|e| *e);
        assert!(matches!(res, Err(TrackerError::WritingWorkbook { .. })));
    }

    #[test]
    fn indices_beyond_the_sheet_limits_are_errors() {
        assert_eq!(column_index(3).unwrap(), 3);
        assert!(matches!(
            column_index(70_000),
            Err(XlsxError::RowColumnLimitError)
        ));
        assert!(matches!(
            row_index(u32::MAX as usize + 1),
            Err(XlsxError::RowColumnLimitError)
        ));
    }

    #[test]
    fn too_wide_sheet_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("wide.xlsx");
        let sheets = vec![Sheet {
            name: "Wide".to_string(),
            headers: (0..70_000).map(|i| format!("C{}", i)).collect(),
            rows: vec![],
        }];
        let res = write_workbook(&p, &sheets).map_err(|e| *e);
        assert!(matches!(res, Err(TrackerError::WritingWorkbook { .. })));
        assert!(!p.exists());
    }
}
