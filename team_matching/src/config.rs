// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// The role given to the person named in the team leader columns.
pub const TEAM_LEADER_ROLE: &str = "Team Leader";
/// The role given to a team member when the registration does not provide one.
pub const DEFAULT_MEMBER_ROLE: &str = "Member";
/// The number of member slots in a registration row, in addition to the leader.
pub const MAX_TEAM_MEMBERS: usize = 3;
/// The region label used when a record has no region information.
pub const UNKNOWN_REGION: &str = "Unknown";

/// A table with named columns, as handed over by the ingestion layer.
///
/// Cells are kept as text. A `None` cell is a missing value (an empty CSV field,
/// an empty spreadsheet cell, ...). Rows may be shorter than the header: the
/// missing trailing cells are treated as missing values.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Table {
        Table { headers, rows }
    }

    /// The number of data rows (the header is not counted).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The position of the first column with exactly this name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col)?.as_deref()
    }

    /// Adds a column at the end of the table, or replaces the content of the
    /// existing column with the same name.
    ///
    /// Rows without a corresponding value get a missing cell.
    pub fn set_column(&mut self, name: &str, values: Vec<Option<String>>) {
        let col = match self.column_index(name) {
            Some(col) => col,
            None => {
                self.headers.push(name.to_string());
                self.headers.len() - 1
            }
        };
        let mut values = values.into_iter();
        for row in self.rows.iter_mut() {
            if row.len() <= col {
                row.resize(col + 1, None);
            }
            row[col] = values.next().flatten();
        }
    }

    /// A new table with the same header and only the given rows, in the given order.
    pub fn select_rows(&self, indices: &[usize]) -> Table {
        Table {
            headers: self.headers.clone(),
            rows: indices
                .iter()
                .filter_map(|idx| self.rows.get(*idx).cloned())
                .collect(),
        }
    }
}

/// The identifying fields of a person, as written in the input.
///
/// All the fields are raw values: they have not been normalized.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct PersonFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub partial_id: Option<String>,
}

impl PersonFields {
    pub fn named(name: &str) -> PersonFields {
        PersonFields {
            name: Some(name.to_string()),
            ..PersonFields::default()
        }
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.email = Some(email.to_string());
        self
    }

    pub fn with_phone(mut self, phone: &str) -> Self {
        self.phone = Some(phone.to_string());
        self
    }

    pub fn with_partial_id(mut self, partial_id: &str) -> Self {
        self.partial_id = Some(partial_id.to_string());
        self
    }
}

/// One of the member positions of a team registration.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct MemberSlot {
    pub person: PersonFields,
    pub role: Option<String>,
}

/// One row of the team registration dataset: a team, its leader and up to
/// [MAX_TEAM_MEMBERS] other members.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct RegistrationRow {
    pub team_name: Option<String>,
    pub leader: PersonFields,
    pub members: Vec<MemberSlot>,
}

/// The comparable forms of the identifying fields of a person.
///
/// An empty string means that the field is not usable for matching.
#[derive(Eq, PartialEq, Debug, Clone, Default, Hash)]
pub struct NormalizedKeys {
    pub email: String,
    pub phone: String,
    pub partial_id: String,
}

// ******** Output data structures *********

/// The key that linked a signup to a roster entry.
///
/// The keys are tried in the order of declaration.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum MatchKey {
    Email,
    Phone,
    PartialId,
}

impl MatchKey {
    pub const PRIORITY: [MatchKey; 3] = [MatchKey::Email, MatchKey::Phone, MatchKey::PartialId];

    pub fn label(&self) -> &'static str {
        match self {
            MatchKey::Email => "email",
            MatchKey::Phone => "phone",
            MatchKey::PartialId => "partial ID",
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Default)]
pub enum MatchStatus {
    Matched,
    #[default]
    Unmatched,
}

impl MatchStatus {
    /// The value written in the `Registered_Team` column of the reports.
    pub fn label(&self) -> &'static str {
        match self {
            MatchStatus::Matched => "Yes",
            MatchStatus::Unmatched => "No",
        }
    }
}

/// One person of the signup dataset.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SignupRecord {
    /// The index of the source row in the signup table.
    pub row: usize,
    pub person: PersonFields,
    pub region: String,
    pub keys: NormalizedKeys,
    pub status: MatchStatus,
    pub team_name: String,
    pub role: String,
    pub matched_by: Option<MatchKey>,
}

impl SignupRecord {
    /// A new, unmatched record. The normalized keys are computed from the person fields.
    pub fn new(row: usize, person: PersonFields, region: String) -> SignupRecord {
        let keys = NormalizedKeys::from_person(&person);
        SignupRecord {
            row,
            person,
            region,
            keys,
            status: MatchStatus::Unmatched,
            team_name: String::new(),
            role: String::new(),
            matched_by: None,
        }
    }

    pub fn is_matched(&self) -> bool {
        self.status == MatchStatus::Matched
    }
}

/// One person of a team, extracted from a registration row.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RosterEntry {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub partial_id: Option<String>,
    pub team_name: String,
    pub role: String,
    pub keys: NormalizedKeys,
}

/// The signups after matching against a roster.
///
/// There is exactly one record per row of `table`, in the same order.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct MatchResult {
    /// The signup table as it was read.
    pub table: Table,
    pub records: Vec<SignupRecord>,
    /// False when no registration data took part in the analysis.
    pub has_match_data: bool,
}

/// Errors that prevent an analysis from completing.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum MatchingErrors {
    /// None of the columns needed for the analysis could be found in a table.
    MissingColumns { table: String, fields: Vec<String> },
}

impl Error for MatchingErrors {}

impl Display for MatchingErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchingErrors::MissingColumns { table, fields } => write!(
                f,
                "The {} data has none of the expected columns: {}",
                table,
                fields.join(", ")
            ),
        }
    }
}
