// Reads the first table of an HTML document. Several registration platforms
// export their data this way, with an `.xls` extension.

use scraper::{ElementRef, Html, Selector};

use crate::tracker::{io_common::non_empty, *};

pub fn read_html_table(path: &str, bytes: &[u8]) -> BTrackerResult<Table> {
    let text = String::from_utf8_lossy(bytes);
    let document = Html::parse_document(&text);
    let table_sel = selector("table")?;
    let row_sel = selector("tr")?;
    let cell_sel = selector("th, td")?;

    let table = document
        .select(&table_sel)
        .next()
        .context(HtmlNoTableSnafu { path })?;
    let mut iter = table
        .select(&row_sel)
        .map(|tr| tr.select(&cell_sel).map(cell_text).collect::<Vec<Option<String>>>());
    let headers: Vec<String> = iter
        .next()
        .context(HtmlNoTableSnafu { path })?
        .into_iter()
        .map(|h| h.unwrap_or_default())
        .collect();
    debug!("read_html_table: {:?}: header: {:?}", path, headers);

    let rows: Vec<Vec<Option<String>>> = iter.collect();
    info!("read_html_table: {:?}: {} rows", path, rows.len());
    Ok(Table::new(headers, rows))
}

fn selector(s: &str) -> TrackerResult<Selector> {
    Selector::parse(s)
        .ok()
        .context(HtmlSelectorSnafu { selector: s })
}

// The layout whitespace of the document is collapsed.
fn cell_text(cell: ElementRef) -> Option<String> {
    let text: String = cell.text().collect();
    non_empty(&text.split_whitespace().collect::<Vec<&str>>().join(" "))
}
