use log::{debug, info, warn};

use snafu::prelude::*;
use team_matching::*;

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::tracker::config_reader::*;
use crate::tracker::io_common::*;

pub mod config_reader;
mod io_common;
mod io_csv;
mod io_excel;
mod io_html;
mod io_xlsx;

/// The value of the summary option that sends the summary to the standard output.
const STDOUT_TARGET: &str = "stdout";

#[derive(Debug, Snafu)]
pub enum TrackerError {
    #[snafu(display("Error opening file {path}: {source}"))]
    OpeningFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing the CSV file {path}: {source}"))]
    CsvParse { source: csv::Error, path: String },
    #[snafu(display("Error opening the workbook {path}: {source}"))]
    OpeningExcel {
        source: calamine::Error,
        path: String,
    },
    #[snafu(display("The workbook {path} has no data"))]
    EmptyExcel { path: String },
    #[snafu(display("The workbook {path} has no worksheet named {worksheet:?}"))]
    MissingWorksheet { path: String, worksheet: String },
    #[snafu(display("No table found in the HTML file {path}"))]
    HtmlNoTable { path: String },
    #[snafu(display("Invalid HTML selector {selector:?}"))]
    HtmlSelector { selector: String },
    #[snafu(display("Unable to read '{file}'. Make sure it's a valid Excel or CSV file."))]
    UnreadableInput { file: String },
    #[snafu(display("Error opening the JSON file {path}: {source}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON: {source}"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing the workbook {path}: {source}"))]
    WritingWorkbook {
        source: rust_xlsxwriter::XlsxError,
        path: String,
    },
    #[snafu(display("Error writing {path}: {source}"))]
    WritingFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("No signup file was provided (use --signups or the configuration file)"))]
    MissingSignups {},
    #[snafu(display("{source}"))]
    Matching { source: MatchingErrors },
    #[snafu(display("Difference detected between the computed summary and the reference summary {path}"))]
    ReferenceMismatch { path: String },
}

pub type TrackerResult<T> = Result<T, TrackerError>;
pub type BTrackerResult<T> = Result<T, Box<TrackerError>>;

/// A file to read, with the worksheet to use for spreadsheets.
#[derive(Eq, PartialEq, Debug, Clone)]
struct InputFile {
    path: String,
    worksheet: Option<String>,
}

/// Everything an analysis needs, once the command line and the configuration file are merged.
#[derive(PartialEq, Debug, Clone)]
struct RunSettings {
    signups: InputFile,
    registrations: Option<InputFile>,
    output_directory: PathBuf,
    region_exports: bool,
    summary: Option<String>,
    reference: Option<String>,
    analysis: AnalysisSettings,
}

/// Reads a table from a CSV file, a spreadsheet or an HTML page.
///
/// HTML content is recognized from the first bytes of the file, whatever the
/// extension. Other files are read as CSV when their name ends with `.csv`
/// and as spreadsheets otherwise. If this fails, the file is read as an HTML
/// page as a last resort.
pub fn read_table(path: &str, worksheet: Option<&str>) -> BTrackerResult<Table> {
    info!("read_table: attempting to read {:?}", path);
    let bytes = fs::read(path).context(OpeningFileSnafu { path })?;
    if looks_like_html(&bytes) {
        debug!("read_table: {:?} looks like HTML", path);
        return io_html::read_html_table(path, &bytes);
    }
    let first_attempt = if is_csv_path(path) {
        io_csv::read_csv_table(path, &bytes)
    } else {
        io_excel::read_excel_table(path, worksheet)
    };
    match first_attempt {
        Ok(table) => Ok(table),
        Err(e) if matches!(*e, TrackerError::MissingWorksheet { .. }) => Err(e),
        Err(e) => {
            warn!("read_table: {}, trying to read an HTML table", e);
            io_html::read_html_table(path, &bytes).map_err(|e2| {
                debug!("read_table: {:?}: {}", path, e2);
                Box::new(TrackerError::UnreadableInput {
                    file: simplify_file_name(path),
                })
            })
        }
    }
}

fn relative_to(root: &Path, path: &str) -> String {
    root.join(path).display().to_string()
}

// The command line takes precedence over the configuration file.
fn input_file(
    cli_path: &Option<String>,
    source: &Option<FileSource>,
    root: &Path,
    cli_worksheet: &Option<String>,
) -> Option<InputFile> {
    let (path, worksheet) = match (cli_path, source) {
        (Some(p), _) => (p.clone(), None),
        (None, Some(src)) => (
            relative_to(root, &src.file_path),
            src.excel_worksheet_name.clone(),
        ),
        (None, None) => return None,
    };
    Some(InputFile {
        path,
        worksheet: cli_worksheet.clone().or(worksheet),
    })
}

fn run_settings(args: &Args) -> BTrackerResult<RunSettings> {
    let (config, root) = match &args.config {
        Some(config_path) => {
            let config = read_config(config_path)?;
            let root = Path::new(config_path)
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_default();
            (config, root)
        }
        None => (TrackerConfig::default(), PathBuf::new()),
    };
    info!("run_settings: config: {:?}", config);
    let output = config.output_settings.clone().unwrap_or_default();

    let signups = input_file(
        &args.signups,
        &config.signup_source,
        &root,
        &args.excel_worksheet_name,
    )
    .context(MissingSignupsSnafu {})?;
    let registrations = input_file(
        &args.registrations,
        &config.registration_source,
        &root,
        &args.excel_worksheet_name,
    );

    let output_directory = match (&args.out, &output.output_directory) {
        (Some(dir), _) => PathBuf::from(dir),
        (None, Some(dir)) => root.join(dir),
        (None, None) => PathBuf::from("."),
    };
    let summary = match (&args.summary, &output.summary_path) {
        (Some(p), _) => Some(p.clone()),
        (None, Some(p)) if p == STDOUT_TARGET => Some(p.clone()),
        (None, Some(p)) => Some(relative_to(&root, p)),
        (None, None) => None,
    };

    Ok(RunSettings {
        signups,
        registrations,
        output_directory,
        region_exports: args.region_exports || output.region_exports.unwrap_or(false),
        summary,
        reference: args.reference.clone(),
        analysis: config.analysis_settings(),
    })
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn team_js(t: &TeamCount) -> JSValue {
    let members: Vec<JSValue> = t
        .members
        .iter()
        .map(|m| {
            json!({
                "name": m.name,
                "email": m.email,
                "phone": m.phone,
                "role": m.role,
            })
        })
        .collect();
    json!({
        "teamName": t.team_name,
        "membersCount": t.members_count,
        "members": members,
    })
}

fn overview_js(table: &Table, overview: &RegistrationOverview) -> JSValue {
    let missing = overview.missing_presentation.as_ref().map(|m| {
        m.iter()
            .map(|r| json!(r.team_name))
            .collect::<Vec<JSValue>>()
    });
    let themes = overview.themes.as_ref().map(|ts| {
        ts.iter()
            .map(|t| json!({"theme": t.theme, "teams": t.teams}))
            .collect::<Vec<JSValue>>()
    });
    json!({
        "rows": table.len(),
        "teams": overview.teams(),
        "duplicatesRemoved": overview.duplicates_removed,
        "missingPresentation": missing,
        "themes": themes,
        "uniqueUniversities": overview.unique_universities,
        "averageTeamSize": overview.average_team_size.map(round2),
    })
}

fn build_summary_js(
    analysis: &Analysis,
    registrations: Option<&(Table, RegistrationOverview)>,
) -> JSValue {
    let report = &analysis.report;
    let s = &report.summary;
    let teams: Vec<JSValue> = report.teams.iter().map(team_js).collect();
    let regions: Vec<JSValue> = report
        .regions
        .with_records
        .iter()
        .map(|r| {
            json!({
                "region": r.region,
                "total": r.total,
                "inTeams": r.in_teams,
                "notInTeams": r.not_in_teams(),
                "latitude": r.coordinates.map(|c| c.0),
                "longitude": r.coordinates.map(|c| c.1),
                "markerRadius": round2(r.marker_radius()),
            })
        })
        .collect();
    let roster = analysis.roster.as_ref().map(|rs| {
        json!({
            "teams": rs.teams,
            "entries": rs.entries,
            "averageTeamSize": rs.average_team_size.map(round2),
        })
    });
    let mode = if analysis.result.has_match_data {
        "team"
    } else {
        "signups"
    };
    json!({
        "mode": mode,
        "summary": {
            "total": s.total,
            "registeredInTeam": s.matched,
            "notRegisteredInTeam": s.unmatched,
            "registeredPercentage": s.matched_percentage().map(round2),
            "notRegisteredPercentage": s.unmatched_percentage().map(round2),
        },
        "uniqueTeams": report.unique_teams,
        "topRegion": report.top_region,
        "teams": teams,
        "regions": regions,
        "regionsWithoutSignups": report.regions.without_records,
        "roster": roster,
        "registrations": registrations.map(|(t, o)| overview_js(t, o)),
    })
}

fn log_report(analysis: &Analysis) {
    let report = &analysis.report;
    let s = &report.summary;
    info!("Total signups: {}", s.total);
    if analysis.result.has_match_data {
        info!(
            "Registered in a team: {} ({:.1}%)",
            s.matched,
            s.matched_percentage().unwrap_or(0.0)
        );
        info!(
            "Not registered in a team: {} ({:.1}%)",
            s.unmatched,
            s.unmatched_percentage().unwrap_or(0.0)
        );
        info!("Teams with signups: {}", report.unique_teams);
    }
    if let Some(rs) = &analysis.roster {
        info!(
            "Registered teams: {}, registered people: {}",
            rs.teams, rs.entries
        );
    }
    for t in report.teams.iter() {
        debug!("  team {}: {} signups", t.team_name, t.members_count);
    }
    if let Some(top) = &report.top_region {
        info!("Top region: {}", top);
    }
    for r in report.regions.with_records.iter() {
        match r.in_teams {
            Some(m) => debug!("  {}: {} ({} in teams)", r.region, r.total, m),
            None => debug!("  {}: {}", r.region, r.total),
        }
    }
    if !report.regions.without_records.is_empty() {
        info!(
            "Regions without signups: {}",
            report.regions.without_records.join(", ")
        );
    }
}

/// Writes the workbooks of the analysis and returns their paths.
fn write_reports(
    analysis: &Analysis,
    registrations: Option<&(Table, RegistrationOverview)>,
    output_directory: &Path,
    stamp: &str,
    region_exports: bool,
) -> BTrackerResult<Vec<PathBuf>> {
    let result = &analysis.result;
    let mut written: Vec<PathBuf> = Vec::new();
    let (file_name, sheets) = if result.has_match_data {
        (
            team_report_file_name(stamp),
            status_workbook(result, &analysis.report),
        )
    } else {
        (signup_report_file_name(stamp), vec![signup_sheet(result)])
    };
    let p = output_directory.join(file_name);
    io_xlsx::write_workbook(&p, &sheets)?;
    written.push(p);

    if let Some((table, overview)) = registrations {
        let p = output_directory.join(registration_overview_file_name(stamp));
        io_xlsx::write_workbook(&p, &overview_workbook(table, overview))?;
        written.push(p);
    }

    if region_exports {
        let regions = &analysis.report.regions.with_records;
        let names: Vec<&str> = regions.iter().map(|r| r.region.as_str()).collect();
        for (stats, stem) in regions.iter().zip(region_file_stems(&names)) {
            let p = output_directory.join(region_report_file_name(&stem, stamp));
            io_xlsx::write_workbook(&p, &[region_sheet(result, &stats.region)])?;
            written.push(p);
        }
    }
    Ok(written)
}

fn write_summary(target: &str, pretty_js: &str) -> BTrackerResult<()> {
    if target == STDOUT_TARGET {
        println!("{}", pretty_js);
    } else {
        fs::write(target, pretty_js).context(WritingFileSnafu { path: target })?;
        info!("write_summary: wrote {:?}", target);
    }
    Ok(())
}

fn check_reference(reference_path: &str, pretty_js_stats: &str) -> BTrackerResult<()> {
    let summary_ref = read_summary(reference_path)?;
    debug!("check_reference: reference: {:?}", summary_ref);
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
    if pretty_js_summary_ref != pretty_js_stats {
        warn!("Found differences with the reference summary");
        print_diff(pretty_js_summary_ref.as_str(), pretty_js_stats, "\n");
        return ReferenceMismatchSnafu {
            path: reference_path,
        }
        .fail()
        .map_err(Box::new);
    }
    Ok(())
}

/// Runs a complete analysis: reads the inputs, matches, writes the reports
/// and the summary, and compares the summary with the reference if any.
pub fn run_analysis(args: &Args) -> BTrackerResult<()> {
    let settings = run_settings(args)?;
    debug!("run_analysis: settings: {:?}", settings);

    let signups = read_table(&settings.signups.path, settings.signups.worksheet.as_deref())?;
    let (analysis, registrations) = match &settings.registrations {
        Some(input) => {
            let registrations = read_table(&input.path, input.worksheet.as_deref())?;
            let analysis = run_team_analysis(signups, &registrations, &settings.analysis)
                .context(MatchingSnafu {})?;
            let overview =
                registration_overview(&registrations, &settings.analysis.registration_schema);
            (analysis, Some((registrations, overview)))
        }
        None => {
            info!("run_analysis: no registration file, only reporting the signups");
            (run_signup_analysis(signups, &settings.analysis), None)
        }
    };
    log_report(&analysis);

    fs::create_dir_all(&settings.output_directory).context(WritingFileSnafu {
        path: settings.output_directory.display().to_string(),
    })?;
    let written = write_reports(
        &analysis,
        registrations.as_ref(),
        &settings.output_directory,
        &timestamp(),
        settings.region_exports,
    )?;
    info!("run_analysis: {} workbooks written", written.len());

    let result_js = build_summary_js(&analysis, registrations.as_ref());
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;
    if let Some(target) = &settings.summary {
        write_summary(target, &pretty_js_stats)?;
    }

    // The reference summary, if provided for comparison
    if let Some(reference_path) = &settings.reference {
        check_reference(reference_path, &pretty_js_stats)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{open_workbook, DataType, Reader, Xlsx};
    use tempfile::TempDir;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn write(dir: &TempDir, name: &str, content: &str) -> String {
        let p = dir.path().join(name);
        fs::write(&p, content).unwrap();
        p.display().to_string()
    }

    fn find_file(dir: &Path, prefix: &str) -> PathBuf {
        fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().path())
            .find(|p| simplify_file_name(&p.display().to_string()).starts_with(prefix))
            .unwrap()
    }

    const SIGNUPS: &str = "Full Name,Email ID,Phone Number,Aadhaar Last 4 Digits,State
Ann,ann@x.com,9999999999,1234,Goa
Bob,,+91 98765 43210,,Kerala
Cid,cid@x.com,,,Goa
";

    const TEAMS: &str = "Team Name,Team Leader Name,Team Leader Email,Team Leader Phone Number,Member 1 Name,Member 1 Phone Number,Member 1 Role
Rockets,Ann,ANN@x.com ,(999) 999-9999,Bob,9876543210,Designer
";

    #[test]
    fn team_analysis_end_to_end() {
        init();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let args = Args {
            signups: Some(write(&dir, "signups.csv", SIGNUPS)),
            registrations: Some(write(&dir, "teams.csv", TEAMS)),
            out: Some(out.display().to_string()),
            summary: Some(dir.path().join("summary.json").display().to_string()),
            region_exports: true,
            ..Args::default()
        };
        run_analysis(&args).unwrap();

        let summary = read_summary(&dir.path().join("summary.json").display().to_string()).unwrap();
        assert_eq!(summary["mode"], json!("team"));
        assert_eq!(summary["summary"]["total"], json!(3));
        assert_eq!(summary["summary"]["registeredInTeam"], json!(2));
        assert_eq!(summary["summary"]["notRegisteredInTeam"], json!(1));
        assert_eq!(summary["summary"]["registeredPercentage"], json!(66.67));
        assert_eq!(
            summary["teams"],
            json!([{
                "teamName": "Rockets",
                "membersCount": 2,
                "members": [
                    {"name": "Ann", "email": "ann@x.com", "phone": "9999999999", "role": "Team Leader"},
                    {"name": "Bob", "email": null, "phone": "+91 98765 43210", "role": "Designer"},
                ],
            }])
        );
        assert_eq!(summary["registrations"]["rows"], json!(1));
        assert_eq!(summary["registrations"]["teams"], json!(1));
        assert_eq!(summary["registrations"]["duplicatesRemoved"], json!(0));
        assert_eq!(summary["registrations"]["averageTeamSize"], json!(2.0));
        assert_eq!(summary["registrations"]["missingPresentation"], JSValue::Null);
        assert_eq!(summary["topRegion"], json!("Goa"));
        assert_eq!(summary["roster"]["entries"], json!(2));

        let report = find_file(&out, "team_registration_report_");
        let mut wb: Xlsx<_> = open_workbook(&report).unwrap();
        assert_eq!(
            wb.sheet_names().to_vec(),
            vec!["Registration Status", "Summary", "Team Summary"]
        );
        let status = wb.worksheet_range("Registration Status").unwrap().unwrap();
        let headers: Vec<String> = status
            .rows()
            .next()
            .unwrap()
            .iter()
            .map(|c| c.to_string())
            .collect();
        let col = headers.iter().position(|h| h == "Team_Role").unwrap();
        assert_eq!(
            status.get_value((2, col as u32)),
            Some(&DataType::String("Designer".to_string()))
        );

        let goa = find_file(&out, "Goa_participants_");
        let mut wb: Xlsx<_> = open_workbook(&goa).unwrap();
        let range = wb.worksheet_range("Goa_Participants").unwrap().unwrap();
        assert_eq!(range.height(), 3);
        assert!(find_file(&out, "Kerala_participants_").exists());

        let overview = find_file(&out, "registration_overview_");
        let mut wb: Xlsx<_> = open_workbook(&overview).unwrap();
        assert_eq!(wb.sheet_names().to_vec(), vec!["Registrations"]);
        let range = wb.worksheet_range("Registrations").unwrap().unwrap();
        assert_eq!(range.height(), 2);
    }

    #[test]
    fn similar_region_names_get_distinct_exports() {
        init();
        let dir = tempfile::tempdir().unwrap();
        let signups = "Full Name,State
Ann,Tamil Nadu
Bob,Tamil_Nadu
Cid,Tamil Nadu
";
        let args = Args {
            signups: Some(write(&dir, "signups.csv", signups)),
            out: Some(dir.path().display().to_string()),
            region_exports: true,
            ..Args::default()
        };
        run_analysis(&args).unwrap();
        let exports: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| simplify_file_name(&e.unwrap().path().display().to_string()))
            .filter(|n| n.contains("_participants_"))
            .collect();
        assert_eq!(exports.len(), 2);
        assert!(exports.iter().any(|n| n.starts_with("Tamil_Nadu_participants_")));
        assert!(exports.iter().any(|n| n.starts_with("Tamil_Nadu_2_participants_")));
    }

    #[test]
    fn long_region_names_make_short_file_names() {
        init();
        let dir = tempfile::tempdir().unwrap();
        let address = format!("{}: Main Road", "Plot 12, Sector 4 ".repeat(12));
        let signups = format!("Full Name,Address\nAnn,\"{}\"\n", address);
        let args = Args {
            signups: Some(write(&dir, "signups.csv", &signups)),
            out: Some(dir.path().display().to_string()),
            region_exports: true,
            ..Args::default()
        };
        run_analysis(&args).unwrap();
        let export = find_file(dir.path(), "Plot_12,_Sector_4_Plot_12,_Se");
        let name = simplify_file_name(&export.display().to_string());
        assert!(name.starts_with(&format!("{}_participants_", region_file_stem(&address))));
    }

    #[test]
    fn signup_analysis_reads_html_disguised_as_xls() {
        init();
        let dir = tempfile::tempdir().unwrap();
        let page = "<html><body><table>
            <tr><th>Full Name</th><th>State/UT</th></tr>
            <tr><td>Ann</td><td>Goa</td></tr>
            <tr><td>Bob</td><td></td></tr>
            </table></body></html>";
        let args = Args {
            signups: Some(write(&dir, "export.xls", page)),
            out: Some(dir.path().display().to_string()),
            summary: Some(dir.path().join("s.json").display().to_string()),
            ..Args::default()
        };
        run_analysis(&args).unwrap();
        let summary = read_summary(&dir.path().join("s.json").display().to_string()).unwrap();
        assert_eq!(summary["mode"], json!("signups"));
        assert_eq!(summary["summary"]["total"], json!(2));
        assert_eq!(summary["roster"], JSValue::Null);
        assert_eq!(summary["regions"][0]["inTeams"], JSValue::Null);

        assert_eq!(summary["registrations"], JSValue::Null);

        let report = find_file(dir.path(), "signup_report_");
        let wb: Xlsx<_> = open_workbook(&report).unwrap();
        assert_eq!(wb.sheet_names().to_vec(), vec!["All_Participants_Participants"]);
    }

    #[test]
    fn unreadable_input_message() {
        init();
        let dir = tempfile::tempdir().unwrap();
        let p = write(&dir, "signups.xlsx", "this is not a spreadsheet");
        let err = read_table(&p, None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unable to read 'signups.xlsx'. Make sure it's a valid Excel or CSV file."
        );
    }

    #[test]
    fn missing_file_names_the_file() {
        init();
        let err = read_table("/nonexistent/signups.csv", None).unwrap_err();
        assert!(matches!(*err, TrackerError::OpeningFile { .. }));
        assert!(err.to_string().contains("/nonexistent/signups.csv"));
    }

    #[test]
    fn missing_columns_are_reported() {
        init();
        let dir = tempfile::tempdir().unwrap();
        let args = Args {
            signups: Some(write(&dir, "signups.csv", "Full Name\nAnn\n")),
            registrations: Some(write(&dir, "teams.csv", TEAMS)),
            out: Some(dir.path().display().to_string()),
            ..Args::default()
        };
        let err = run_analysis(&args).unwrap_err();
        assert!(matches!(*err, TrackerError::Matching { .. }));
    }

    #[test]
    fn no_signup_file() {
        init();
        let err = run_analysis(&Args::default()).unwrap_err();
        assert!(matches!(*err, TrackerError::MissingSignups {}));
    }

    #[test]
    fn config_paths_are_relative_to_the_config_file() {
        init();
        let dir = tempfile::tempdir().unwrap();
        write(&dir, "people.csv", "Name,Mail\nAnn,ann@x.com\n");
        write(&dir, "teams.csv", TEAMS);
        let config = write(
            &dir,
            "config.json",
            r#"{
                "outputSettings": { "outputDirectory": "reports", "summaryPath": "summary.json" },
                "signupSource": { "filePath": "people.csv" },
                "registrationSource": { "filePath": "teams.csv" },
                "signupColumns": { "fullName": ["Name"], "email": ["Mail"] }
            }"#,
        );
        let args = Args {
            config: Some(config),
            ..Args::default()
        };
        run_analysis(&args).unwrap();
        let summary = read_summary(&dir.path().join("summary.json").display().to_string()).unwrap();
        assert_eq!(summary["summary"]["registeredInTeam"], json!(1));
        assert!(find_file(&dir.path().join("reports"), "team_registration_report_").exists());
    }

    #[test]
    fn reference_comparison() {
        init();
        let dir = tempfile::tempdir().unwrap();
        let signups = write(&dir, "signups.csv", SIGNUPS);
        let summary_path = dir.path().join("summary.json").display().to_string();
        let args = Args {
            signups: Some(signups.clone()),
            out: Some(dir.path().display().to_string()),
            summary: Some(summary_path.clone()),
            ..Args::default()
        };
        run_analysis(&args).unwrap();

        // The summary is its own reference.
        let same = Args {
            reference: Some(summary_path),
            ..args.clone()
        };
        assert!(run_analysis(&same).is_ok());

        let other = write(&dir, "other.json", r#"{"mode": "team"}"#);
        let different = Args {
            reference: Some(other),
            summary: None,
            ..args
        };
        let err = run_analysis(&different).unwrap_err();
        assert!(matches!(*err, TrackerError::ReferenceMismatch { .. }));
    }
}
