pub use crate::config::*;

use crate::schema::signups_from_table;
use crate::{
    analyze_records, build_report, flatten_registrations, Analysis, AnalysisSettings,
};

/// A builder for running an analysis on data that is not in tabular form.
///
/// ```
/// use team_matching::builder::Builder;
/// use team_matching::{AnalysisSettings, MatchStatus, PersonFields};
///
/// let mut builder = Builder::new(&AnalysisSettings::default());
/// builder.add_signup(PersonFields::named("Ann").with_email("ann@x.com"), Some("Goa"));
/// builder.add_signup(PersonFields::named("Bob").with_phone("98765 43210"), None);
/// builder.add_team(
///     "Rockets",
///     PersonFields::named("Ann").with_email("ANN@x.com"),
///     &[(PersonFields::named("Cid"), Some("Designer"))],
/// );
///
/// let analysis = builder.run();
/// assert_eq!(analysis.result.records[0].status, MatchStatus::Matched);
/// assert_eq!(analysis.report.summary.matched, 1);
/// ```
pub struct Builder {
    pub(crate) _settings: AnalysisSettings,
    pub(crate) _signups: Vec<(PersonFields, Option<String>)>,
    pub(crate) _registrations: Vec<RegistrationRow>,
}

impl Builder {
    pub fn new(settings: &AnalysisSettings) -> Builder {
        Builder {
            _settings: settings.clone(),
            _signups: Vec::new(),
            _registrations: Vec::new(),
        }
    }

    /// Adds a signup. A missing region is reported under the unknown region.
    pub fn add_signup(&mut self, person: PersonFields, region: Option<&str>) {
        self._signups.push((person, region.map(|s| s.to_string())));
    }

    /// Adds a team with its leader and the other members with their optional role.
    ///
    /// Members beyond the number of slots of a registration are ignored.
    pub fn add_team(
        &mut self,
        team_name: &str,
        leader: PersonFields,
        members: &[(PersonFields, Option<&str>)],
    ) {
        self.add_registration(RegistrationRow {
            team_name: Some(team_name.to_string()),
            leader,
            members: members
                .iter()
                .map(|(person, role)| MemberSlot {
                    person: person.clone(),
                    role: role.map(|s| s.to_string()),
                })
                .collect(),
        })
    }

    pub fn add_registration(&mut self, row: RegistrationRow) {
        self._registrations.push(row);
    }

    /// Runs the analysis. Without any registration, only the signup statistics are computed.
    pub fn run(self) -> Analysis {
        let table = self.signup_table();
        let records = signups_from_table(&table, &self._settings.signup_schema);
        if self._registrations.is_empty() {
            let result = MatchResult {
                table,
                records,
                has_match_data: false,
            };
            let report = build_report(&result, &self._settings.regions);
            return Analysis {
                result,
                report,
                roster: None,
            };
        }
        let roster = flatten_registrations(&self._registrations);
        analyze_records(
            table,
            records,
            &self._registrations,
            &roster,
            &self._settings.regions,
        )
    }

    // The signups laid out under the first accepted name of each column.
    fn signup_table(&self) -> Table {
        let schema = &self._settings.signup_schema;
        let headers = vec![
            first_alias(&schema.full_name, "Full Name"),
            first_alias(&schema.email, "Email ID"),
            first_alias(&schema.phone, "Phone Number"),
            first_alias(&schema.partial_id, "Aadhaar Last 4 Digits"),
            first_alias(&schema.region, "State"),
        ];
        let rows = self
            ._signups
            .iter()
            .map(|(p, region)| {
                vec![
                    p.name.clone(),
                    p.email.clone(),
                    p.phone.clone(),
                    p.partial_id.clone(),
                    region.clone(),
                ]
            })
            .collect();
        Table::new(headers, rows)
    }
}

fn first_alias(aliases: &[String], default: &str) -> String {
    aliases
        .first()
        .cloned()
        .unwrap_or_else(|| default.to_string())
}
