use crate::tracker::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

use team_matching::{CanonicalRegion, RegistrationSchema, SignupSchema};

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputSettings {
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
    #[serde(rename = "regionExports")]
    pub region_exports: Option<bool>,
    #[serde(rename = "summaryPath")]
    pub summary_path: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct FileSource {
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

/// Alternative column names for the signup fields. An absent list keeps the defaults.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct SignupColumns {
    #[serde(rename = "fullName")]
    pub full_name: Option<Vec<String>>,
    pub email: Option<Vec<String>>,
    pub phone: Option<Vec<String>>,
    #[serde(rename = "partialId")]
    pub partial_id: Option<Vec<String>>,
    pub region: Option<Vec<String>>,
}

/// Alternative column names for the registration fields.
///
/// The member names are templates where `{n}` is replaced by the slot number.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct RegistrationColumns {
    #[serde(rename = "teamName")]
    pub team_name: Option<Vec<String>>,
    #[serde(rename = "leaderName")]
    pub leader_name: Option<Vec<String>>,
    #[serde(rename = "leaderEmail")]
    pub leader_email: Option<Vec<String>>,
    #[serde(rename = "leaderPhone")]
    pub leader_phone: Option<Vec<String>>,
    #[serde(rename = "leaderPartialId")]
    pub leader_partial_id: Option<Vec<String>>,
    #[serde(rename = "memberName")]
    pub member_name: Option<Vec<String>>,
    #[serde(rename = "memberEmail")]
    pub member_email: Option<Vec<String>>,
    #[serde(rename = "memberPhone")]
    pub member_phone: Option<Vec<String>>,
    #[serde(rename = "memberPartialId")]
    pub member_partial_id: Option<Vec<String>>,
    #[serde(rename = "memberRole")]
    pub member_role: Option<Vec<String>>,
    #[serde(rename = "presentationLink")]
    pub presentation_link: Option<Vec<String>>,
    pub theme: Option<Vec<String>>,
    pub university: Option<Vec<String>>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct TrackerConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: Option<OutputSettings>,
    #[serde(rename = "signupSource")]
    pub signup_source: Option<FileSource>,
    #[serde(rename = "registrationSource")]
    pub registration_source: Option<FileSource>,
    #[serde(rename = "signupColumns")]
    pub signup_columns: Option<SignupColumns>,
    #[serde(rename = "registrationColumns")]
    pub registration_columns: Option<RegistrationColumns>,
    pub regions: Option<Vec<String>>,
}

fn override_with(target: &mut Vec<String>, names: &Option<Vec<String>>) {
    if let Some(names) = names {
        *target = names.clone();
    }
}

impl SignupColumns {
    pub fn apply(&self, schema: &mut SignupSchema) {
        override_with(&mut schema.full_name, &self.full_name);
        override_with(&mut schema.email, &self.email);
        override_with(&mut schema.phone, &self.phone);
        override_with(&mut schema.partial_id, &self.partial_id);
        override_with(&mut schema.region, &self.region);
    }
}

impl RegistrationColumns {
    pub fn apply(&self, schema: &mut RegistrationSchema) {
        override_with(&mut schema.team_name, &self.team_name);
        override_with(&mut schema.leader_name, &self.leader_name);
        override_with(&mut schema.leader_email, &self.leader_email);
        override_with(&mut schema.leader_phone, &self.leader_phone);
        override_with(&mut schema.leader_partial_id, &self.leader_partial_id);
        override_with(&mut schema.member_name, &self.member_name);
        override_with(&mut schema.member_email, &self.member_email);
        override_with(&mut schema.member_phone, &self.member_phone);
        override_with(&mut schema.member_partial_id, &self.member_partial_id);
        override_with(&mut schema.member_role, &self.member_role);
        override_with(&mut schema.presentation_link, &self.presentation_link);
        override_with(&mut schema.theme, &self.theme);
        override_with(&mut schema.university, &self.university);
    }
}

impl TrackerConfig {
    /// The analysis settings: the defaults, updated with the column names and
    /// regions of this configuration.
    pub fn analysis_settings(&self) -> AnalysisSettings {
        let mut settings = AnalysisSettings::default();
        if let Some(cols) = &self.signup_columns {
            cols.apply(&mut settings.signup_schema);
        }
        if let Some(cols) = &self.registration_columns {
            cols.apply(&mut settings.registration_schema);
        }
        if let Some(regions) = &self.regions {
            settings.regions = regions.iter().map(|n| CanonicalRegion::named(n)).collect();
        }
        settings
    }
}

pub fn read_config(path: &str) -> BTrackerResult<TrackerConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read_config: content: {:?}", contents);
    let config: TrackerConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(config)
}

pub fn read_summary(path: &str) -> BTrackerResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read_summary: content: {:?}", contents);
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_keeps_defaults() {
        let config: TrackerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, TrackerConfig::default());
        assert_eq!(config.analysis_settings(), AnalysisSettings::default());
    }

    #[test]
    fn column_names_and_regions_are_overridden() {
        let config: TrackerConfig = serde_json::from_str(
            r#"{
                "outputSettings": { "regionExports": true },
                "signupSource": { "filePath": "signups.csv" },
                "signupColumns": { "email": ["Email", "E-mail"] },
                "registrationColumns": { "memberRole": ["Role {n}"], "theme": ["Track"] },
                "regions": ["Goa", "Atlantis"]
            }"#,
        )
        .unwrap();
        assert_eq!(
            config.signup_source.as_ref().map(|s| s.file_path.as_str()),
            Some("signups.csv")
        );
        let settings = config.analysis_settings();
        assert_eq!(settings.signup_schema.email, vec!["Email", "E-mail"]);
        assert_eq!(
            settings.signup_schema.full_name,
            SignupSchema::default().full_name
        );
        assert_eq!(settings.registration_schema.member_role, vec!["Role {n}"]);
        assert_eq!(settings.registration_schema.theme, vec!["Track"]);
        assert_eq!(
            settings.registration_schema.presentation_link,
            RegistrationSchema::default().presentation_link
        );
        assert_eq!(settings.regions.len(), 2);
        assert!(settings.regions[0].coordinates.is_some());
        assert_eq!(settings.regions[1].coordinates, None);
    }
}
