use clap::Parser;

/// Checks which of the people who signed up individually are also registered in a team.
#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON configuration file. The file paths it contains are relative
    /// to the directory of the configuration file. The other options override its content.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) The file with the individual signups (CSV, Excel or HTML table).
    #[clap(short, long, value_parser)]
    pub signups: Option<String>,

    /// (file path or empty) The file with the team registrations. If it is not provided, only the
    /// signup statistics are reported.
    #[clap(short, long, value_parser)]
    pub registrations: Option<String>,

    /// (directory, default: current directory) Where to write the workbooks.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the analysis will be written in
    /// JSON format to the given location.
    #[clap(long, value_parser)]
    pub summary: Option<String>,

    /// (file path) A reference summary in JSON format. If provided, teamtrack will check that the
    /// computed summary matches the reference.
    #[clap(long, value_parser)]
    pub reference: Option<String>,

    /// If passed as an argument, one workbook is also written for each region with signups.
    #[clap(long, takes_value = false)]
    pub region_exports: bool,

    /// When using an Excel file, indicates the name of the worksheet to use (default: the first one).
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
