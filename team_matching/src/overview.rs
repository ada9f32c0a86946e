//! An overview of the registration table on its own: repeated registrations,
//! teams without a presentation, themes and universities.

use std::collections::{BTreeMap, HashSet};

use log::{debug, info};

use crate::config::*;
use crate::report::{Cell, Sheet};
use crate::roster::{flatten_registrations, roster_stats};
use crate::schema::{first_present, registrations_from_table, RegistrationSchema};

pub const REGISTRATIONS_SHEET: &str = "Registrations";
pub const MISSING_PRESENTATION_SHEET: &str = "Missing PPT";
pub const THEMES_SHEET: &str = "Themes";

/// A row of the registration table, with its team name for display.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RegistrationRef {
    pub row: usize,
    pub team_name: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ThemeCount {
    pub theme: String,
    pub teams: usize,
}

#[derive(PartialEq, Debug, Clone)]
pub struct RegistrationOverview {
    /// The rows kept after removing repeated registrations, in table order.
    pub kept_rows: Vec<usize>,
    pub duplicates_removed: usize,
    /// The kept rows without a presentation. `None` when the table has no presentation column.
    pub missing_presentation: Option<Vec<RegistrationRef>>,
    /// By decreasing number of teams, then by theme. `None` when the table has no theme column.
    pub themes: Option<Vec<ThemeCount>>,
    pub unique_universities: Option<usize>,
    pub average_team_size: Option<f64>,
}

impl RegistrationOverview {
    pub fn teams(&self) -> usize {
        self.kept_rows.len()
    }
}

/// The first row of every (team name, leader name) pair.
///
/// Missing values compare equal to each other. Without any of the two
/// columns, all the rows are kept.
pub fn distinct_registrations(table: &Table, schema: &RegistrationSchema) -> Vec<usize> {
    let team_col = first_present(table, &schema.team_name);
    let leader_col = first_present(table, &schema.leader_name);
    if team_col.is_none() && leader_col.is_none() {
        return (0..table.len()).collect();
    }
    let mut seen: HashSet<(Option<&str>, Option<&str>)> = HashSet::new();
    (0..table.len())
        .filter(|row| {
            let key = (
                team_col.and_then(|c| table.cell(*row, c)),
                leader_col.and_then(|c| table.cell(*row, c)),
            );
            let fresh = seen.insert(key);
            if !fresh {
                debug!("distinct_registrations: row {} repeats {:?}", row, key);
            }
            fresh
        })
        .collect()
}

pub fn registration_overview(table: &Table, schema: &RegistrationSchema) -> RegistrationOverview {
    let kept_rows = distinct_registrations(table, schema);
    let team_col = first_present(table, &schema.team_name);

    let missing_presentation = first_present(table, &schema.presentation_link).map(|c| {
        kept_rows
            .iter()
            .filter(|row| table.cell(**row, c).is_none())
            .map(|row| RegistrationRef {
                row: *row,
                team_name: team_col
                    .and_then(|tc| table.cell(*row, tc))
                    .map(|s| s.to_string()),
            })
            .collect::<Vec<RegistrationRef>>()
    });

    let themes = first_present(table, &schema.theme).map(|c| {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for row in kept_rows.iter() {
            if let Some(theme) = table.cell(*row, c) {
                *counts.entry(theme).or_insert(0) += 1;
            }
        }
        let mut res: Vec<ThemeCount> = counts
            .into_iter()
            .map(|(theme, teams)| ThemeCount {
                theme: theme.to_string(),
                teams,
            })
            .collect();
        // Stable: equal counts stay in alphabetical order.
        res.sort_by(|a, b| b.teams.cmp(&a.teams));
        res
    });

    let unique_universities = first_present(table, &schema.university).map(|c| {
        kept_rows
            .iter()
            .filter_map(|row| table.cell(*row, c))
            .collect::<HashSet<&str>>()
            .len()
    });

    let rows = registrations_from_table(&table.select_rows(&kept_rows), schema);
    let average_team_size = roster_stats(&rows, &flatten_registrations(&rows)).average_team_size;

    let res = RegistrationOverview {
        duplicates_removed: table.len() - kept_rows.len(),
        kept_rows,
        missing_presentation,
        themes,
        unique_universities,
        average_team_size,
    };
    info!(
        "registration_overview: {} teams, {} repeated registrations removed, {:?} without presentation",
        res.teams(),
        res.duplicates_removed,
        res.missing_presentation.as_ref().map(|m| m.len())
    );
    res
}

/// The sheets of the registration overview: the registrations without
/// repetitions, then the teams without a presentation and the theme counts
/// when the table has these columns.
pub fn overview_workbook(table: &Table, overview: &RegistrationOverview) -> Vec<Sheet> {
    let mut sheets = vec![Sheet::from_table(
        REGISTRATIONS_SHEET,
        &table.select_rows(&overview.kept_rows),
    )];
    if let Some(missing) = &overview.missing_presentation {
        let rows: Vec<usize> = missing.iter().map(|m| m.row).collect();
        sheets.push(Sheet::from_table(
            MISSING_PRESENTATION_SHEET,
            &table.select_rows(&rows),
        ));
    }
    if let Some(themes) = &overview.themes {
        sheets.push(Sheet {
            name: THEMES_SHEET.to_string(),
            headers: vec!["Theme".to_string(), "Teams".to_string()],
            rows: themes
                .iter()
                .map(|t| vec![Cell::from(t.theme.as_str()), Cell::Count(t.teams)])
                .collect(),
        });
    }
    sheets
}
