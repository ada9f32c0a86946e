mod config;
mod normalize;
mod overview;
mod region;
mod report;
mod roster;
mod schema;

pub mod builder;
pub mod manual;

use log::{debug, info};

use std::collections::HashMap;

pub use crate::config::*;
pub use crate::normalize::*;
pub use crate::overview::*;
pub use crate::region::*;
pub use crate::report::*;
pub use crate::roster::*;
pub use crate::schema::*;

// **** Private structures ****

// For each key, the first roster entry (in roster order) carrying a given value.
// Empty values are never indexed.
struct RosterIndex<'a> {
    by_email: HashMap<&'a str, &'a RosterEntry>,
    by_phone: HashMap<&'a str, &'a RosterEntry>,
    by_partial_id: HashMap<&'a str, &'a RosterEntry>,
}

impl<'a> RosterIndex<'a> {
    fn new(roster: &'a [RosterEntry]) -> RosterIndex<'a> {
        let mut index = RosterIndex {
            by_email: HashMap::new(),
            by_phone: HashMap::new(),
            by_partial_id: HashMap::new(),
        };
        for entry in roster.iter() {
            for key in MatchKey::PRIORITY.iter() {
                let value = key_value(&entry.keys, *key);
                if !value.is_empty() {
                    index.table_mut(*key).entry(value).or_insert(entry);
                }
            }
        }
        index
    }

    fn table_mut(&mut self, key: MatchKey) -> &mut HashMap<&'a str, &'a RosterEntry> {
        match key {
            MatchKey::Email => &mut self.by_email,
            MatchKey::Phone => &mut self.by_phone,
            MatchKey::PartialId => &mut self.by_partial_id,
        }
    }

    fn lookup(&self, key: MatchKey, value: &str) -> Option<&'a RosterEntry> {
        let table = match key {
            MatchKey::Email => &self.by_email,
            MatchKey::Phone => &self.by_phone,
            MatchKey::PartialId => &self.by_partial_id,
        };
        table.get(value).copied()
    }
}

fn key_value(keys: &NormalizedKeys, key: MatchKey) -> &str {
    match key {
        MatchKey::Email => keys.email.as_str(),
        MatchKey::Phone => keys.phone.as_str(),
        MatchKey::PartialId => keys.partial_id.as_str(),
    }
}

// Tries the keys by priority. The first key with a hit decides; empty keys are skipped.
fn find_match<'a>(
    keys: &NormalizedKeys,
    index: &RosterIndex<'a>,
) -> Option<(MatchKey, &'a RosterEntry)> {
    MatchKey::PRIORITY.iter().find_map(|key| {
        let value = key_value(keys, *key);
        if value.is_empty() {
            None
        } else {
            index.lookup(*key, value).map(|entry| (*key, entry))
        }
    })
}

/// Links each signup to the roster.
///
/// The keys are tried in the order email, phone, partial ID. The first key that
/// finds an entry decides the match, and the first entry in roster order wins
/// among the entries sharing that key. Records without a match are left
/// unmatched. The output has the same records in the same order.
///
/// Partial IDs are short: two different people sharing them will be matched
/// to the same roster entry.
pub fn match_signups(signups: Vec<SignupRecord>, roster: &[RosterEntry]) -> Vec<SignupRecord> {
    info!(
        "match_signups: matching {} signups against {} roster entries",
        signups.len(),
        roster.len()
    );
    let index = RosterIndex::new(roster);
    let mut per_key: HashMap<MatchKey, usize> = HashMap::new();
    let res: Vec<SignupRecord> = signups
        .into_iter()
        .map(|mut record| {
            record.keys = NormalizedKeys::from_person(&record.person);
            if let Some((key, entry)) = find_match(&record.keys, &index) {
                debug!(
                    "match_signups: row {}: {:?} -> team {:?} as {:?} (by {})",
                    record.row,
                    record.person.name,
                    entry.team_name,
                    entry.role,
                    key.label()
                );
                *per_key.entry(key).or_insert(0) += 1;
                record.status = MatchStatus::Matched;
                record.team_name = entry.team_name.clone();
                record.role = entry.role.clone();
                record.matched_by = Some(key);
            } else {
                debug!("match_signups: row {}: no match", record.row);
            }
            record
        })
        .collect();
    for key in MatchKey::PRIORITY.iter() {
        info!(
            "match_signups: {} signups matched by {}",
            per_key.get(key).cloned().unwrap_or(0),
            key.label()
        );
    }
    res
}

/// The settings of an analysis: how to read the tables and which regions to report on.
#[derive(PartialEq, Debug, Clone)]
pub struct AnalysisSettings {
    pub signup_schema: SignupSchema,
    pub registration_schema: RegistrationSchema,
    pub regions: Vec<CanonicalRegion>,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        AnalysisSettings {
            signup_schema: SignupSchema::default(),
            registration_schema: RegistrationSchema::default(),
            regions: default_regions(),
        }
    }
}

/// The outcome of an analysis.
#[derive(PartialEq, Debug, Clone)]
pub struct Analysis {
    pub result: MatchResult,
    pub report: Report,
    /// Only present in a team analysis.
    pub roster: Option<RosterStats>,
}

/// Statistics over the signups alone, without registration data.
pub fn run_signup_analysis(signups: Table, settings: &AnalysisSettings) -> Analysis {
    info!("run_signup_analysis: {} signup rows", signups.len());
    let records = signups_from_table(&signups, &settings.signup_schema);
    let result = MatchResult {
        table: signups,
        records,
        has_match_data: false,
    };
    let report = build_report(&result, &settings.regions);
    Analysis {
        result,
        report,
        roster: None,
    }
}

/// Matches the signups against the team registrations and aggregates the outcome.
///
/// Fails only if one of the tables has none of the columns needed to match.
pub fn run_team_analysis(
    signups: Table,
    registrations: &Table,
    settings: &AnalysisSettings,
) -> Result<Analysis, MatchingErrors> {
    info!(
        "run_team_analysis: {} signup rows, {} registration rows",
        signups.len(),
        registrations.len()
    );
    settings.signup_schema.check_matchable(&signups)?;
    settings
        .registration_schema
        .check_matchable(registrations)?;

    let rows = registrations_from_table(registrations, &settings.registration_schema);
    let roster = flatten_registrations(&rows);
    let records = signups_from_table(&signups, &settings.signup_schema);
    Ok(analyze_records(signups, records, &rows, &roster, &settings.regions))
}

fn analyze_records(
    table: Table,
    records: Vec<SignupRecord>,
    rows: &[RegistrationRow],
    roster: &[RosterEntry],
    regions: &[CanonicalRegion],
) -> Analysis {
    let result = MatchResult {
        table,
        records: match_signups(records, roster),
        has_match_data: true,
    };
    let report = build_report(&result, regions);
    info!(
        "run_team_analysis: {} signups, {} in teams, {} not in teams, {} teams",
        report.summary.total, report.summary.matched, report.summary.unmatched, report.unique_teams
    );
    Analysis {
        result,
        report,
        roster: Some(roster_stats(rows, roster)),
    }
}
