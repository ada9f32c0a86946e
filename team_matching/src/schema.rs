//! The mapping between the logical fields and the column names of the input tables.
//!
//! Every logical field accepts a list of column names, tried in order. The
//! mapping is resolved once per table. A field without a column is read as a
//! missing value for every row.

use log::{debug, warn};

use crate::config::*;
use crate::region::{extract_regions, REGION_COLUMN_CANDIDATES};

/// The placeholder replaced by the slot number (1, 2, 3) in member column names.
pub const SLOT_PLACEHOLDER: &str = "{n}";

fn names(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

pub(crate) fn first_present(table: &Table, aliases: &[String]) -> Option<usize> {
    aliases.iter().find_map(|a| table.column_index(a))
}

/// Accepted column names for the signup table.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SignupSchema {
    pub full_name: Vec<String>,
    pub email: Vec<String>,
    pub phone: Vec<String>,
    pub partial_id: Vec<String>,
    pub region: Vec<String>,
}

impl Default for SignupSchema {
    fn default() -> Self {
        SignupSchema {
            full_name: names(&["Full Name"]),
            email: names(&["Email ID"]),
            phone: names(&["Phone Number"]),
            partial_id: names(&["Aadhaar Last 4 Digits"]),
            region: names(&REGION_COLUMN_CANDIDATES),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub struct PersonColumns {
    pub name: Option<usize>,
    pub email: Option<usize>,
    pub phone: Option<usize>,
    pub partial_id: Option<usize>,
}

impl PersonColumns {
    pub fn read(&self, table: &Table, row: usize) -> PersonFields {
        let get = |col: Option<usize>| col.and_then(|c| table.cell(row, c)).map(|s| s.to_string());
        PersonFields {
            name: get(self.name),
            email: get(self.email),
            phone: get(self.phone),
            partial_id: get(self.partial_id),
        }
    }

    fn has_key_column(&self) -> bool {
        self.email.is_some() || self.phone.is_some() || self.partial_id.is_some()
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub struct ResolvedSignupColumns {
    pub person: PersonColumns,
    pub region: Option<usize>,
}

impl SignupSchema {
    pub fn resolve(&self, table: &Table) -> ResolvedSignupColumns {
        let res = ResolvedSignupColumns {
            person: PersonColumns {
                name: first_present(table, &self.full_name),
                email: first_present(table, &self.email),
                phone: first_present(table, &self.phone),
                partial_id: first_present(table, &self.partial_id),
            },
            region: first_present(table, &self.region),
        };
        let checks = [
            ("full name", res.person.name, &self.full_name),
            ("email", res.person.email, &self.email),
            ("phone", res.person.phone, &self.phone),
            ("partial ID", res.person.partial_id, &self.partial_id),
            ("region", res.region, &self.region),
        ];
        for (field, col, aliases) in checks.iter() {
            if col.is_none() {
                warn!(
                    "signup data: no column for the {} field (accepted names: {:?})",
                    field, aliases
                );
            }
        }
        debug!("signup data: resolved columns {:?}", res);
        res
    }

    /// Checks that the signup table can take part in a matching.
    pub fn check_matchable(&self, table: &Table) -> Result<(), MatchingErrors> {
        if self.resolve(table).person.has_key_column() {
            Ok(())
        } else {
            Err(MatchingErrors::MissingColumns {
                table: "signup".to_string(),
                fields: [&self.email, &self.phone, &self.partial_id]
                    .iter()
                    .flat_map(|v| v.iter().cloned())
                    .collect(),
            })
        }
    }
}

/// Reads the signup records of a table, one per row, in order.
///
/// The region of each record is taken from the region columns of the schema,
/// with the [UNKNOWN_REGION] label when absent.
pub fn signups_from_table(table: &Table, schema: &SignupSchema) -> Vec<SignupRecord> {
    let cols = schema.resolve(table);
    let regions = extract_regions(table, &schema.region);
    regions
        .into_iter()
        .enumerate()
        .map(|(row, region)| SignupRecord::new(row, cols.person.read(table, row), region))
        .collect()
}

/// Accepted column names for the team registration table.
///
/// The member names are templates in which [SLOT_PLACEHOLDER] stands for the
/// slot number.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RegistrationSchema {
    pub team_name: Vec<String>,
    pub leader_name: Vec<String>,
    pub leader_email: Vec<String>,
    pub leader_phone: Vec<String>,
    pub leader_partial_id: Vec<String>,
    pub member_name: Vec<String>,
    pub member_email: Vec<String>,
    pub member_phone: Vec<String>,
    pub member_partial_id: Vec<String>,
    pub member_role: Vec<String>,
    /// Only used by the registration overview.
    pub presentation_link: Vec<String>,
    pub theme: Vec<String>,
    pub university: Vec<String>,
}

impl Default for RegistrationSchema {
    fn default() -> Self {
        RegistrationSchema {
            team_name: names(&["Team Name"]),
            leader_name: names(&["Team Leader Name"]),
            leader_email: names(&["Team Leader Email"]),
            leader_phone: names(&["Team Leader Phone Number"]),
            leader_partial_id: names(&["Team Leader Aadhaar Last 4 Digits"]),
            member_name: names(&["Member {n} Name"]),
            member_email: names(&["Member {n} Email"]),
            member_phone: names(&["Member {n} Phone Number"]),
            member_partial_id: names(&["Member {n} Aadhaar Last 4 Digits"]),
            member_role: names(&["Member {n} Role"]),
            presentation_link: names(&["PPT Link / File Name"]),
            theme: names(&["Theme"]),
            university: names(&["Team Leader University Name with address"]),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub struct MemberColumns {
    pub person: PersonColumns,
    pub role: Option<usize>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ResolvedRegistrationColumns {
    pub team_name: Option<usize>,
    pub leader: PersonColumns,
    pub members: Vec<MemberColumns>,
}

impl ResolvedRegistrationColumns {
    fn has_name_column(&self) -> bool {
        self.leader.name.is_some() || self.members.iter().any(|m| m.person.name.is_some())
    }
}

fn slot_names(templates: &[String], slot: usize) -> Vec<String> {
    templates
        .iter()
        .map(|t| t.replace(SLOT_PLACEHOLDER, &slot.to_string()))
        .collect()
}

impl RegistrationSchema {
    pub fn resolve(&self, table: &Table) -> ResolvedRegistrationColumns {
        let members: Vec<MemberColumns> = (1..=MAX_TEAM_MEMBERS)
            .map(|slot| MemberColumns {
                person: PersonColumns {
                    name: first_present(table, &slot_names(&self.member_name, slot)),
                    email: first_present(table, &slot_names(&self.member_email, slot)),
                    phone: first_present(table, &slot_names(&self.member_phone, slot)),
                    partial_id: first_present(table, &slot_names(&self.member_partial_id, slot)),
                },
                role: first_present(table, &slot_names(&self.member_role, slot)),
            })
            .collect();
        let res = ResolvedRegistrationColumns {
            team_name: first_present(table, &self.team_name),
            leader: PersonColumns {
                name: first_present(table, &self.leader_name),
                email: first_present(table, &self.leader_email),
                phone: first_present(table, &self.leader_phone),
                partial_id: first_present(table, &self.leader_partial_id),
            },
            members,
        };
        if res.team_name.is_none() {
            warn!(
                "registration data: no column for the team name (accepted names: {:?})",
                self.team_name
            );
        }
        if res.leader.name.is_none() {
            warn!(
                "registration data: no column for the team leader name (accepted names: {:?})",
                self.leader_name
            );
        }
        for (idx, m) in res.members.iter().enumerate() {
            if m.person.name.is_none() {
                debug!("registration data: no name column for member slot {}", idx + 1);
            }
        }
        debug!("registration data: resolved columns {:?}", res);
        res
    }

    /// Checks that at least one person can be read from the registration table.
    pub fn check_matchable(&self, table: &Table) -> Result<(), MatchingErrors> {
        if self.resolve(table).has_name_column() {
            Ok(())
        } else {
            let mut fields = self.leader_name.clone();
            fields.extend(slot_names(&self.member_name, 1));
            Err(MatchingErrors::MissingColumns {
                table: "registration".to_string(),
                fields,
            })
        }
    }
}

/// Reads the registration rows of a table, in order.
pub fn registrations_from_table(table: &Table, schema: &RegistrationSchema) -> Vec<RegistrationRow> {
    let cols = schema.resolve(table);
    (0..table.len())
        .map(|row| RegistrationRow {
            team_name: cols
                .team_name
                .and_then(|c| table.cell(row, c))
                .map(|s| s.to_string()),
            leader: cols.leader.read(table, row),
            members: cols
                .members
                .iter()
                .map(|m| MemberSlot {
                    person: m.person.read(table, row),
                    role: m.role.and_then(|c| table.cell(row, c)).map(|s| s.to_string()),
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
        Table::new(
            names(headers),
            rows.iter()
                .map(|r| {
                    r.iter()
                        .map(|c| if c.is_empty() { None } else { Some(c.to_string()) })
                        .collect()
                })
                .collect(),
        )
    }

    #[test]
    fn signup_columns_follow_alias_order() {
        let schema = SignupSchema {
            email: names(&["E-mail", "Email ID"]),
            ..SignupSchema::default()
        };
        let t = table(&["Email ID", "E-mail"], &[&["second", "first"]]);
        let records = signups_from_table(&t, &schema);
        assert_eq!(records[0].person.email.as_deref(), Some("first"));
    }

    #[test]
    fn missing_signup_columns_degrade_to_empty() {
        let t = table(&["Full Name", "Email ID"], &[&["A", "A@x.com"], &["B", ""]]);
        let records = signups_from_table(&t, &SignupSchema::default());
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].keys.email, "a@x.com");
        assert_eq!(records[0].keys.phone, "");
        assert_eq!(records[1].person.email, None);
        assert_eq!(records[1].region, UNKNOWN_REGION);
        assert_eq!(records[1].row, 1);
    }

    #[test]
    fn signup_table_without_keys_is_rejected() {
        let t = table(&["Full Name", "State"], &[&["A", "Goa"]]);
        let err = SignupSchema::default().check_matchable(&t).unwrap_err();
        assert!(err.to_string().contains("signup"));
        let t = table(&["Phone Number"], &[&["1"]]);
        assert!(SignupSchema::default().check_matchable(&t).is_ok());
    }

    #[test]
    fn registration_rows_read_member_slots() {
        let t = table(
            &[
                "Team Name",
                "Team Leader Name",
                "Team Leader Email",
                "Member 1 Name",
                "Member 1 Role",
                "Member 3 Name",
            ],
            &[&["T1", "Lead", "l@x.com", "Ann", "Designer", "Cid"]],
        );
        let rows = registrations_from_table(&t, &RegistrationSchema::default());
        assert_eq!(rows.len(), 1);
        let r = &rows[0];
        assert_eq!(r.team_name.as_deref(), Some("T1"));
        assert_eq!(r.leader.email.as_deref(), Some("l@x.com"));
        assert_eq!(r.members.len(), MAX_TEAM_MEMBERS);
        assert_eq!(r.members[0].role.as_deref(), Some("Designer"));
        assert_eq!(r.members[1].person.name, None);
        assert_eq!(r.members[2].person.name.as_deref(), Some("Cid"));
    }

    #[test]
    fn registration_table_without_names_is_rejected() {
        let t = table(&["Team Name"], &[&["T1"]]);
        assert!(RegistrationSchema::default().check_matchable(&t).is_err());
        let t = table(&["Member 2 Name"], &[&["X"]]);
        assert!(RegistrationSchema::default().check_matchable(&t).is_ok());
    }
}
