//! Acrolinx platform wire types.
//!
//! Field names follow the platform's camelCase JSON exactly. Every type
//! derives `Default` so partially populated payloads still decode; nested
//! objects the platform may send as `null` are `Option`s.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::de::null_as_default;

/// Relation name → URL map attached to most responses.
pub type Links = HashMap<String, String>;

// ============================================================================
// Envelope members
// ============================================================================

/// Progress of a check that is still running.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Progress {
    /// Completion estimate, 0–100.
    pub percent: i32,
    /// Human-readable processing state.
    pub message: String,
    /// Suggested minimum wait in seconds before polling again.
    pub retry_after: i32,
}

impl Progress {
    /// `retry_after` as a [`Duration`]. Negative hints clamp to zero.
    pub fn retry_after(&self) -> Duration {
        Duration::from_secs(u64::try_from(self.retry_after).unwrap_or(0))
    }
}

/// Error object reported by the platform.
///
/// An object whose fields are all empty/zero means "no error"; see
/// [`crate::envelope`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestError {
    /// Error type URI.
    #[serde(rename = "type")]
    pub error_type: String,
    /// Short summary.
    pub title: String,
    /// Full description; this is the text callers see.
    pub detail: String,
    /// HTTP-like status code.
    pub status: i32,
}

impl std::fmt::Display for RequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.detail)
    }
}

impl std::error::Error for RequestError {}

// ============================================================================
// Authentication
// ============================================================================

/// Username/password pair posted to the sign-in endpoint.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Access token payload returned by the sign-in endpoint.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccessToken {
    pub access_token: String,
}

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            access_token: token.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.access_token
    }

    pub fn is_empty(&self) -> bool {
        self.access_token.is_empty()
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

// ============================================================================
// Capabilities
// ============================================================================

/// Options for [`crate::client::CheckingService::get_capabilities`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetCapabilitiesOptions {
    /// Sent as `X-Acrolinx-Client-Locale` when non-empty.
    pub locale: String,
}

impl GetCapabilitiesOptions {
    pub fn with_locale(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
        }
    }
}

/// Server-advertised checking configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Capabilities {
    pub default_guidance_profile_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub guidance_profiles: Vec<GuidanceProfile>,
    #[serde(deserialize_with = "null_as_default")]
    pub content_formats: Vec<ContentFormat>,
    #[serde(deserialize_with = "null_as_default")]
    pub content_encodings: Vec<String>,
    pub reference_pattern: String,
    #[serde(deserialize_with = "null_as_default")]
    pub check_types: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub report_types: Vec<String>,
}

impl Capabilities {
    /// Look up a guidance profile by id.
    pub fn guidance_profile(&self, id: &str) -> Option<&GuidanceProfile> {
        self.guidance_profiles.iter().find(|p| p.id == id)
    }

    /// The profile named by `default_guidance_profile_id`, if advertised.
    pub fn default_guidance_profile(&self) -> Option<&GuidanceProfile> {
        self.guidance_profile(&self.default_guidance_profile_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GuidanceProfile {
    pub id: String,
    pub display_name: String,
    pub language: Option<Language>,
    #[serde(deserialize_with = "null_as_default")]
    pub goals: Vec<Goal>,
    #[serde(deserialize_with = "null_as_default")]
    pub term_sets: Vec<TermSet>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Language {
    pub id: String,
    pub display_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Goal {
    pub id: String,
    pub display_name: String,
    pub color: String,
    pub scoring: String,
    /// Issue count; only present on goals inside a check result.
    #[serde(skip_serializing_if = "is_zero")]
    pub issues: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TermSet {
    pub display_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentFormat {
    pub id: String,
    pub display_name: String,
}

// ============================================================================
// Check submission
// ============================================================================

/// Opaque handle for a submitted check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Check {
    pub id: String,
}

impl Check {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl From<&str> for Check {
    fn from(id: &str) -> Self {
        Check::new(id)
    }
}

impl From<String> for Check {
    fn from(id: String) -> Self {
        Check { id }
    }
}

/// Acknowledgement of a cancelled check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CancelledCheck {
    pub id: String,
}

/// How `content` is encoded in a submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentEncoding {
    #[default]
    None,
    Base64,
}

/// Body of a check submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmitCheckOptions {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_encoding: Option<ContentEncoding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_options: Option<CheckOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<Document>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub language: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckOptions {
    pub guidance_profile_id: String,
    pub content_format: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub report_types: Vec<String>,
    pub check_type: String,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub partial_check_ranges: Vec<PartialCheckRange>,
    pub batch_id: String,
}

/// Half-open character range `[begin, end)` for partial checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialCheckRange {
    pub begin: i32,
    pub end: i32,
}

/// Document metadata sent with a submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    pub reference: String,
    #[serde(deserialize_with = "null_as_default")]
    pub custom_fields: Vec<CustomField>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomField {
    pub key: String,
    pub value: String,
}

// ============================================================================
// Check result
// ============================================================================

/// Completed check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckResult {
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub check_options: AppliedCheckOptions,
    pub document: Option<ResponseDocument>,
    pub quality: Option<Quality>,
    pub counts: Option<Counts>,
    #[serde(deserialize_with = "null_as_default")]
    pub goals: Vec<Goal>,
    #[serde(deserialize_with = "null_as_default")]
    pub issues: Vec<Issue>,
    pub keywords: Option<Keywords>,
    #[serde(deserialize_with = "null_as_default")]
    pub embed: Vec<EmbedItem>,
    #[serde(deserialize_with = "null_as_default")]
    pub reports: HashMap<String, Report>,
    pub runtime_statistics: Option<RuntimeStatistics>,
    #[serde(deserialize_with = "null_as_default")]
    pub dictionary_scopes: Vec<String>,
}

impl CheckResult {
    /// Every issue in the result, parents before their sub-issues.
    pub fn all_issues(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().flat_map(Issue::walk)
    }

    /// Look up a report link by report type (e.g. `scorecard`).
    pub fn report(&self, report_type: &str) -> Option<&Report> {
        self.reports.get(report_type)
    }
}

/// Options the platform actually applied to a check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppliedCheckOptions {
    pub guidance_profile_id: String,
    pub guidance_profile_name: String,
    pub language_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub report_types: Vec<String>,
    pub content_format: String,
    pub check_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub term_sets: Vec<TermSet>,
    #[serde(deserialize_with = "null_as_default")]
    pub partial_check_ranges: Vec<PartialCheckRange>,
    pub confidential: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResponseDocument {
    pub id: String,
    pub display_info: Option<DisplayInfo>,
    #[serde(deserialize_with = "null_as_default")]
    pub custom_fields: Vec<CustomField>,
    pub custom_fields_complete: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayInfo {
    pub reference: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Quality {
    pub score: i32,
    /// Traffic-light status: `red`, `yellow` or `green`.
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub scores_by_strategy: Vec<Score>,
    #[serde(deserialize_with = "null_as_default")]
    pub scores_by_goal: Vec<Score>,
    #[serde(deserialize_with = "null_as_default")]
    pub metrics: Vec<Score>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Score {
    pub id: String,
    pub score: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Counts {
    pub sentences: i32,
    pub words: i32,
    pub issues: i32,
    pub scored_issues: i32,
}

/// A flagged content problem.
///
/// Issues nest: a parent exclusively owns its `sub_issues`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Issue {
    pub goal_id: String,
    pub internal_name: String,
    pub display_name_html: String,
    pub guidance_html: String,
    pub display_surface: String,
    pub issue_type: String,
    pub scoring: String,
    pub positional_information: Option<PositionalInformation>,
    pub read_only: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub issue_locations: Vec<Location>,
    #[serde(deserialize_with = "null_as_default")]
    pub suggestions: Vec<Suggestion>,
    #[serde(deserialize_with = "null_as_default")]
    pub sub_issues: Vec<Issue>,
    pub debug: Option<IssueDebug>,
    pub can_add_to_dictionary: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub links: Links,
}

impl Issue {
    /// Depth-first walk over this issue and all of its descendants.
    pub fn walk(&self) -> IssueWalk<'_> {
        IssueWalk { stack: vec![self] }
    }

    /// Number of issues in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        self.walk().count()
    }
}

/// Pre-order iterator returned by [`Issue::walk`].
#[derive(Debug, Clone)]
pub struct IssueWalk<'a> {
    stack: Vec<&'a Issue>,
}

impl<'a> Iterator for IssueWalk<'a> {
    type Item = &'a Issue;

    fn next(&mut self) -> Option<Self::Item> {
        let issue = self.stack.pop()?;
        self.stack.extend(issue.sub_issues.iter().rev());
        Some(issue)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionalInformation {
    pub hashes: Option<Hashes>,
    #[serde(deserialize_with = "null_as_default")]
    pub matches: Vec<Match>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hashes {
    pub issue: String,
    pub environment: String,
    pub index: String,
}

/// Span of an issue in both the extracted text and the original document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Match {
    pub extracted_part: String,
    pub extracted_begin: i32,
    pub extracted_end: i32,
    pub original_part: String,
    pub original_begin: i32,
    pub original_end: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Location {
    pub location_id: String,
    pub display_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub values: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Suggestion {
    pub surface: String,
    pub group_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub replacements: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub icon_id: String,
}

/// Scoring debug data attached to an issue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueDebug {
    pub penalty: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Keywords {
    #[serde(deserialize_with = "null_as_default")]
    pub discovered: Vec<Keyword>,
    #[serde(deserialize_with = "null_as_default")]
    pub proposed: Vec<Keyword>,
    #[serde(deserialize_with = "null_as_default")]
    pub target: Vec<Keyword>,
    #[serde(deserialize_with = "null_as_default")]
    pub links: Links,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Keyword {
    pub keyword: String,
    pub sort_key: String,
    pub density: f64,
    pub count: i32,
    pub prominence: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub occurrences: Vec<PositionalInformation>,
    #[serde(deserialize_with = "null_as_default")]
    pub warnings: Vec<KeywordWarning>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordWarning {
    #[serde(rename = "type")]
    pub warning_type: String,
    pub severity: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedItem {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Report {
    pub display_name: String,
    pub link: String,
    pub link_authenticated: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuntimeStatistics {
    /// Start time as sent by the platform, usually RFC 3339.
    pub started_at: String,
}

impl RuntimeStatistics {
    /// `started_at` parsed as a UTC timestamp.
    ///
    /// Accepts RFC 3339 and offset-less ISO 8601 (read as UTC). Returns
    /// `None` for an empty or unrecognized value.
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.started_at.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| Utc.from_utc_datetime(&naive))
    }
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}
