//! Aggregation of the matched signups and the layout of the exported sheets.

use std::collections::{BTreeMap, HashMap, HashSet};

use log::{debug, warn};

use crate::config::*;
use crate::region::CanonicalRegion;

pub const STATUS_SHEET: &str = "Registration Status";
pub const SUMMARY_SHEET: &str = "Summary";
pub const TEAM_SUMMARY_SHEET: &str = "Team Summary";
pub const REGION_SHEET_SUFFIX: &str = "_Participants";
/// The pseudo-region under which the complete signup report is written.
pub const ALL_PARTICIPANTS: &str = "All_Participants";
/// The region column added to the exported tables.
pub const REGION_COLUMN: &str = "State";

/// The longest sheet name accepted by spreadsheet programs.
pub const MAX_SHEET_NAME_LEN: usize = 31;
/// The longest region fragment put in a file name.
pub const MAX_FILE_STEM_LEN: usize = 31;

// ********* Counts ***********

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct StatusSummary {
    pub total: usize,
    pub matched: usize,
    pub unmatched: usize,
}

fn percentage(part: usize, total: usize) -> Option<f64> {
    if total == 0 {
        None
    } else {
        Some(part as f64 * 100.0 / total as f64)
    }
}

impl StatusSummary {
    pub fn from_records(records: &[SignupRecord]) -> StatusSummary {
        let matched = records.iter().filter(|r| r.is_matched()).count();
        StatusSummary {
            total: records.len(),
            matched,
            unmatched: records.len() - matched,
        }
    }

    /// The share of matched signups, in percent. `None` for an empty table.
    pub fn matched_percentage(&self) -> Option<f64> {
        percentage(self.matched, self.total)
    }

    pub fn unmatched_percentage(&self) -> Option<f64> {
        percentage(self.unmatched, self.total)
    }
}

/// A matched signup, as listed under its team.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TeamMember {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: String,
}

impl TeamMember {
    fn from_record(r: &SignupRecord) -> TeamMember {
        TeamMember {
            name: r.person.name.clone(),
            email: r.person.email.clone(),
            phone: r.person.phone.clone(),
            role: r.role.clone(),
        }
    }
}

/// The matched signups under a team name.
///
/// This is not the size of the team in the roster: members who did not sign up
/// are not counted.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TeamCount {
    pub team_name: String,
    pub members_count: usize,
    /// In signup order.
    pub members: Vec<TeamMember>,
}

/// The matched signups grouped by team name, ordered by team name.
pub fn team_summary(records: &[SignupRecord]) -> Vec<TeamCount> {
    let mut teams: BTreeMap<&str, Vec<TeamMember>> = BTreeMap::new();
    for r in records.iter().filter(|r| r.is_matched()) {
        teams
            .entry(r.team_name.as_str())
            .or_default()
            .push(TeamMember::from_record(r));
    }
    teams
        .into_iter()
        .map(|(team_name, members)| TeamCount {
            team_name: team_name.to_string(),
            members_count: members.len(),
            members,
        })
        .collect()
}

#[derive(PartialEq, Debug, Clone)]
pub struct RegionStats {
    pub region: String,
    pub total: usize,
    /// The matched records of the region. `None` when the analysis has no match data.
    pub in_teams: Option<usize>,
    pub coordinates: Option<(f64, f64)>,
}

impl RegionStats {
    pub fn not_in_teams(&self) -> Option<usize> {
        self.in_teams.map(|m| self.total - m)
    }

    /// The radius of the map marker for this region, on a log scale.
    pub fn marker_radius(&self) -> f64 {
        ((self.total + 1) as f64).ln() * 2.0
    }
}

#[derive(PartialEq, Debug, Clone, Default)]
pub struct RegionBreakdown {
    /// The regions with at least one record, by decreasing number of records.
    pub with_records: Vec<RegionStats>,
    /// The canonical regions without any record, in canonical order.
    pub without_records: Vec<String>,
}

/// Counts the records per region.
///
/// All the canonical regions are considered, followed by the regions that
/// appear in the records but not in the canonical list (in order of first
/// appearance). The comparison of region names is exact.
pub fn region_breakdown(
    records: &[SignupRecord],
    canonical: &[CanonicalRegion],
    with_status: bool,
) -> RegionBreakdown {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();
    for r in records.iter() {
        let e = counts.entry(r.region.as_str()).or_insert_with(|| {
            first_seen.push(r.region.as_str());
            (0, 0)
        });
        e.0 += 1;
        if r.is_matched() {
            e.1 += 1;
        }
    }

    let mut all_stats: Vec<RegionStats> = Vec::new();
    for c in canonical.iter() {
        let (total, matched) = counts.get(c.name.as_str()).cloned().unwrap_or((0, 0));
        all_stats.push(RegionStats {
            region: c.name.clone(),
            total,
            in_teams: if with_status { Some(matched) } else { None },
            coordinates: c.coordinates,
        });
    }
    for name in first_seen {
        if canonical.iter().any(|c| c.name == name) {
            continue;
        }
        let (total, matched) = counts[name];
        all_stats.push(RegionStats {
            region: name.to_string(),
            total,
            in_teams: if with_status { Some(matched) } else { None },
            coordinates: None,
        });
    }

    // Stable: equal totals keep the canonical order.
    all_stats.sort_by(|a, b| b.total.cmp(&a.total));
    let (with_records, without): (Vec<RegionStats>, Vec<RegionStats>) =
        all_stats.into_iter().partition(|s| s.total > 0);
    let mut without_records: Vec<String> = without.into_iter().map(|s| s.region).collect();
    // Back to the canonical order.
    without_records.sort_by_key(|name| canonical.iter().position(|c| &c.name == name));
    debug!(
        "region_breakdown: {} regions with records, {} without",
        with_records.len(),
        without_records.len()
    );
    RegionBreakdown {
        with_records,
        without_records,
    }
}

/// The most frequent region. Ties go to the first name in alphabetical order.
pub fn top_region(records: &[SignupRecord]) -> Option<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for r in records.iter() {
        *counts.entry(r.region.as_str()).or_insert(0) += 1;
    }
    let mut best: Option<(&str, usize)> = None;
    for (name, count) in counts {
        match best {
            Some((_, c)) if c >= count => {}
            _ => best = Some((name, count)),
        }
    }
    best.map(|(name, _)| name.to_string())
}

/// All the aggregates of an analysis.
#[derive(PartialEq, Debug, Clone)]
pub struct Report {
    pub summary: StatusSummary,
    pub teams: Vec<TeamCount>,
    pub unique_teams: usize,
    pub regions: RegionBreakdown,
    pub top_region: Option<String>,
}

pub fn build_report(result: &MatchResult, canonical: &[CanonicalRegion]) -> Report {
    let teams = team_summary(&result.records);
    Report {
        summary: StatusSummary::from_records(&result.records),
        unique_teams: teams.len(),
        teams,
        regions: region_breakdown(&result.records, canonical, result.has_match_data),
        top_region: top_region(&result.records),
    }
}

// ********* Sheets ***********

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Cell {
    Empty,
    Text(String),
    Count(usize),
}

impl From<Option<String>> for Cell {
    fn from(v: Option<String>) -> Self {
        match v {
            Some(s) => Cell::Text(s),
            None => Cell::Empty,
        }
    }
}

impl From<&str> for Cell {
    fn from(v: &str) -> Self {
        Cell::Text(v.to_string())
    }
}

/// One sheet of an exported workbook.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    /// The name is made acceptable for spreadsheet programs, see [sheet_name].
    pub fn from_table(name: &str, table: &Table) -> Sheet {
        Sheet {
            name: sheet_name(name),
            headers: table.headers.clone(),
            rows: table
                .rows
                .iter()
                .map(|row| {
                    (0..table.headers.len())
                        .map(|col| Cell::from(row.get(col).cloned().flatten()))
                        .collect()
                })
                .collect(),
        }
    }
}

/// Replaces the characters forbidden in sheet names by `_` and truncates to
/// [MAX_SHEET_NAME_LEN] characters.
///
/// A sheet name may not start or end with an apostrophe: such an apostrophe
/// is also replaced, after truncation.
pub fn sheet_name(raw: &str) -> String {
    let mut name: Vec<char> = raw
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            c => c,
        })
        .take(MAX_SHEET_NAME_LEN)
        .collect();
    if let Some(first) = name.first_mut() {
        if *first == '\'' {
            *first = '_';
        }
    }
    if let Some(last) = name.last_mut() {
        if *last == '\'' {
            *last = '_';
        }
    }
    name.into_iter().collect()
}

/// The name of the sheet holding the records of a region.
pub fn region_sheet_name(region: &str) -> String {
    sheet_name(&format!("{}{}", region, REGION_SHEET_SUFFIX))
}

/// The signup table followed by the derived columns.
///
/// With match data, the normalized keys and the match outcome are added. The
/// region column always comes last.
pub fn enriched_table(result: &MatchResult) -> Table {
    let rs = &result.records;
    let mut table = result.table.clone();
    if result.has_match_data {
        table.set_column("Email_Clean", derived(rs, |r| r.keys.email.clone()));
        table.set_column("Phone_Clean", derived(rs, |r| r.keys.phone.clone()));
        table.set_column("Aadhaar_Clean", derived(rs, |r| r.keys.partial_id.clone()));
        table.set_column("Registered_Team", derived(rs, |r| r.status.label().to_string()));
        table.set_column("Team_Name", derived(rs, |r| r.team_name.clone()));
        table.set_column("Team_Role", derived(rs, |r| r.role.clone()));
    }
    table.set_column(REGION_COLUMN, derived(rs, |r| r.region.clone()));
    table
}

fn derived(records: &[SignupRecord], f: impl Fn(&SignupRecord) -> String) -> Vec<Option<String>> {
    records.iter().map(|r| Some(f(r))).collect()
}

/// The sheets of the complete team analysis report.
///
/// The team summary sheet is only present when at least one signup matched.
pub fn status_workbook(result: &MatchResult, report: &Report) -> Vec<Sheet> {
    let mut sheets = vec![Sheet::from_table(STATUS_SHEET, &enriched_table(result))];
    let s = &report.summary;
    sheets.push(Sheet {
        name: SUMMARY_SHEET.to_string(),
        headers: vec!["Status".to_string(), "Count".to_string()],
        rows: vec![
            vec![Cell::from("Registered in Team"), Cell::Count(s.matched)],
            vec![Cell::from("Not Registered in Team"), Cell::Count(s.unmatched)],
            vec![Cell::from("Total"), Cell::Count(s.total)],
        ],
    });
    if s.matched > 0 {
        sheets.push(Sheet {
            name: TEAM_SUMMARY_SHEET.to_string(),
            headers: vec!["Team_Name".to_string(), "Members_Count".to_string()],
            rows: report
                .teams
                .iter()
                .map(|t| vec![Cell::from(t.team_name.as_str()), Cell::Count(t.members_count)])
                .collect(),
        });
    }
    sheets
}

/// The single sheet with the records of one region.
pub fn region_sheet(result: &MatchResult, region: &str) -> Sheet {
    let indices: Vec<usize> = result
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.region == region)
        .map(|(idx, _)| idx)
        .collect();
    let table = enriched_table(result).select_rows(&indices);
    Sheet::from_table(&format!("{}{}", region, REGION_SHEET_SUFFIX), &table)
}

/// The single sheet of the signup-only report, with every record.
pub fn signup_sheet(result: &MatchResult) -> Sheet {
    Sheet::from_table(
        &format!("{}{}", ALL_PARTICIPANTS, REGION_SHEET_SUFFIX),
        &enriched_table(result),
    )
}

/// The file name fragment for a region.
///
/// Whitespace and the characters that file systems reject become underscores,
/// and the result is cut to [MAX_FILE_STEM_LEN] characters.
pub fn region_file_stem(region: &str) -> String {
    region
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_whitespace() || c.is_control() => '_',
            c => c,
        })
        .take(MAX_FILE_STEM_LEN)
        .collect()
}

/// The file name fragments of several regions, in the same order.
///
/// Regions that would share a fragment (case ignored) get a numeric suffix
/// from the second one on.
pub fn region_file_stems<S: AsRef<str>>(regions: &[S]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    regions
        .iter()
        .map(|region| {
            let base = region_file_stem(region.as_ref());
            let mut stem = base.clone();
            let mut n = 2;
            while !seen.insert(stem.to_lowercase()) {
                stem = format!("{}_{}", base, n);
                n += 1;
            }
            if stem != base {
                warn!(
                    "region_file_stems: region {:?} exported as {:?} to avoid a file name collision",
                    region.as_ref(),
                    stem
                );
            }
            stem
        })
        .collect()
}
