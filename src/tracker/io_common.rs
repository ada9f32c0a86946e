use std::path::Path;

/// How many bytes of a file are inspected to recognize an HTML document.
pub const SNIFF_LEN: usize = 2048;

pub const STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Some registration platforms export HTML pages with a spreadsheet extension.
pub fn looks_like_html(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(SNIFF_LEN)];
    let text = String::from_utf8_lossy(head).to_lowercase();
    text.trim_start_matches('\u{feff}').trim_start().starts_with('<') || text.contains("<html")
}

pub fn is_csv_path(path: &str) -> bool {
    simplify_file_name(path).to_lowercase().ends_with(".csv")
}

/// The text of a numeric cell. Integral values are written without a
/// fractional part: phone numbers read from spreadsheets are floats.
pub fn format_number(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

/// Empty text is a missing value.
pub fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

pub fn timestamp() -> String {
    chrono::Local::now().format(STAMP_FORMAT).to_string()
}

pub fn team_report_file_name(stamp: &str) -> String {
    format!("team_registration_report_{}.xlsx", stamp)
}

pub fn signup_report_file_name(stamp: &str) -> String {
    format!("signup_report_{}.xlsx", stamp)
}

pub fn registration_overview_file_name(stamp: &str) -> String {
    format!("registration_overview_{}.xlsx", stamp)
}

pub fn region_report_file_name(region_stem: &str, stamp: &str) -> String {
    format!("{}_participants_{}.xlsx", region_stem, stamp)
}
