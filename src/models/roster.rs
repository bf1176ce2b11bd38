// src/models/roster.rs

use serde::{Deserialize, Serialize};

/// One student's submission for an assignment, as listed to authors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionEntry {
    pub username: String,
    pub roll_number: String,
}

/// Response body of the platform's submission roster.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterResponse {
    /// The platform omits the field when nobody has submitted.
    #[serde(default)]
    pub sub_details: Option<Vec<SubmissionEntry>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RosterKey {
    #[serde(rename = "username")]
    Username,
    #[default]
    #[serde(rename = "rollNumber")]
    RollNumber,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Sort configuration for the roster, defaulting to roll number ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterSort {
    #[serde(default, rename = "sort")]
    pub key: RosterKey,
    #[serde(default)]
    pub direction: SortDirection,
}

impl RosterSort {
    pub fn apply(&self, entries: &mut [SubmissionEntry]) {
        entries.sort_by(|a, b| {
            let ordering = match self.key {
                RosterKey::Username => a.username.cmp(&b.username),
                RosterKey::RollNumber => a.roll_number.cmp(&b.roll_number),
            };
            match self.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }
}
