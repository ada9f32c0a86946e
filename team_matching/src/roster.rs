use log::{debug, info};

use crate::config::*;

fn roster_entry(person: &PersonFields, team_name: &str, role: &str) -> RosterEntry {
    RosterEntry {
        name: person.name.clone().unwrap_or_default(),
        email: person.email.clone(),
        phone: person.phone.clone(),
        partial_id: person.partial_id.clone(),
        team_name: team_name.to_string(),
        role: role.to_string(),
        keys: NormalizedKeys::from_person(person),
    }
}

/// Expands the registration rows into one entry per person.
///
/// The leader comes first whenever a leader name is present, then the members
/// whose name is not blank, in slot order. Only the first [MAX_TEAM_MEMBERS]
/// slots of a row are considered.
pub fn flatten_registrations(rows: &[RegistrationRow]) -> Vec<RosterEntry> {
    let mut res: Vec<RosterEntry> = Vec::new();
    for (idx, row) in rows.iter().enumerate() {
        let team_name = row.team_name.as_deref().unwrap_or_default();
        let before = res.len();
        if row.leader.name.is_some() {
            res.push(roster_entry(&row.leader, team_name, TEAM_LEADER_ROLE));
        }
        for slot in row.members.iter().take(MAX_TEAM_MEMBERS) {
            let has_name = slot
                .person
                .name
                .as_deref()
                .map(|n| !n.trim().is_empty())
                .unwrap_or(false);
            if has_name {
                let role = slot.role.as_deref().unwrap_or(DEFAULT_MEMBER_ROLE);
                res.push(roster_entry(&slot.person, team_name, role));
            }
        }
        debug!(
            "flatten_registrations: row {}: team {:?}: {} entries",
            idx,
            team_name,
            res.len() - before
        );
    }
    info!(
        "flatten_registrations: {} registration rows -> {} roster entries",
        rows.len(),
        res.len()
    );
    res
}

/// Statistics over the roster itself, independently of the signups.
#[derive(PartialEq, Debug, Clone)]
pub struct RosterStats {
    pub teams: usize,
    pub entries: usize,
    /// The average number of roster entries per registration row. `None` without registrations.
    pub average_team_size: Option<f64>,
}

pub fn roster_stats(rows: &[RegistrationRow], roster: &[RosterEntry]) -> RosterStats {
    let teams = rows.len();
    let entries = roster.len();
    RosterStats {
        teams,
        entries,
        average_team_size: if teams > 0 {
            Some(entries as f64 / teams as f64)
        } else {
            None
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(name: Option<&str>, email: &str) -> PersonFields {
        PersonFields {
            name: name.map(|s| s.to_string()),
            email: Some(email.to_string()),
            phone: None,
            partial_id: None,
        }
    }

    fn member(name: Option<&str>, role: Option<&str>) -> MemberSlot {
        MemberSlot {
            person: person(name, "m@x.com"),
            role: role.map(|s| s.to_string()),
        }
    }

    #[test]
    fn full_team_yields_four_entries() {
        let row = RegistrationRow {
            team_name: Some("T1".to_string()),
            leader: person(Some("Lead"), "L@X.com"),
            members: vec![
                member(Some("A"), None),
                member(Some("B"), Some("Designer")),
                member(Some("C"), None),
            ],
        };
        let roster = flatten_registrations(&[row]);
        let roles: Vec<&str> = roster.iter().map(|e| e.role.as_str()).collect();
        assert_eq!(roles, vec![TEAM_LEADER_ROLE, "Member", "Designer", "Member"]);
        assert!(roster.iter().all(|e| e.team_name == "T1"));
        assert_eq!(roster[0].keys.email, "l@x.com");
    }

    #[test]
    fn blank_members_are_skipped() {
        let row = RegistrationRow {
            team_name: Some("T1".to_string()),
            leader: person(Some("Lead"), "l@x.com"),
            members: vec![
                member(Some("   "), None),
                member(None, Some("Designer")),
                member(Some(""), None),
            ],
        };
        assert_eq!(flatten_registrations(&[row]).len(), 1);
    }

    #[test]
    fn missing_leader_name_skips_leader_only() {
        let row = RegistrationRow {
            team_name: None,
            leader: person(None, "l@x.com"),
            members: vec![member(Some("A"), None)],
        };
        let roster = flatten_registrations(&[row]);
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].name, "A");
        assert_eq!(roster[0].team_name, "");
    }

    #[test]
    fn blank_leader_name_is_still_present() {
        let row = RegistrationRow {
            team_name: Some("T".to_string()),
            leader: person(Some(" "), "l@x.com"),
            members: vec![],
        };
        assert_eq!(flatten_registrations(&[row]).len(), 1);
    }

    #[test]
    fn rows_keep_input_order() {
        let rows: Vec<RegistrationRow> = ["T1", "T2"]
            .iter()
            .map(|t| RegistrationRow {
                team_name: Some(t.to_string()),
                leader: person(Some(t), "x@x.com"),
                members: vec![member(Some("M"), None)],
            })
            .collect();
        let roster = flatten_registrations(&rows);
        let teams: Vec<&str> = roster.iter().map(|e| e.team_name.as_str()).collect();
        assert_eq!(teams, vec!["T1", "T1", "T2", "T2"]);
        let stats = roster_stats(&rows, &roster);
        assert_eq!(stats.teams, 2);
        assert_eq!(stats.average_team_size, Some(2.0));
        assert_eq!(roster_stats(&[], &[]).average_team_size, None);
    }
}
