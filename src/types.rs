//! Buildkite resource records referenced by webhook payloads.
//!
//! These are plain data schemas: every field is optional and decoding is
//! purely structural. Webhook payloads embed partial views of the same
//! resources the REST API serves, so absent fields are the norm, not an
//! error. Timestamps are ISO-8601 strings on the wire (e.g.
//! `2021-02-03T20:34:10.486Z`) and decode to [`chrono::DateTime<Utc>`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A Buildkite user, as it appears in `sender` and `creator` fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Option<String>,
    pub graphql_id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}

/// An organization that owns the pipeline or agent the event refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: Option<String>,
    pub graphql_id: Option<String>,
    pub url: Option<String>,
    pub web_url: Option<String>,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub agents_url: Option<String>,
    pub emojis_url: Option<String>,
    pub pipelines_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// The notification service delivering the webhook (present on `ping`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: Option<String>,
    pub provider: Option<String>,
    pub settings: Option<ServiceSettings>,
}

/// Settings of a webhook notification service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSettings {
    /// The URL deliveries are sent to.
    pub url: Option<String>,
}

/// A Buildkite agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub id: Option<String>,
    pub graphql_id: Option<String>,
    pub url: Option<String>,
    pub web_url: Option<String>,
    pub name: Option<String>,
    /// Connection state reported by the platform, e.g. `connected`,
    /// `disconnected`, `lost`, `stopping`, `stopped`.
    pub connection_state: Option<String>,
    pub hostname: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub version: Option<String>,
    pub creator: Option<User>,
    pub created_at: Option<DateTime<Utc>>,
}

/// A build within a pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Build {
    pub id: Option<String>,
    pub graphql_id: Option<String>,
    pub url: Option<String>,
    pub web_url: Option<String>,
    pub number: Option<i64>,
    /// Build state, e.g. `scheduled`, `running`, `passed`, `failed`,
    /// `canceled`, `blocked`.
    pub state: Option<String>,
    pub blocked: Option<bool>,
    pub message: Option<String>,
    pub commit: Option<String>,
    pub branch: Option<String>,
    pub tag: Option<String>,
    /// What triggered the build, e.g. `webhook`, `ui`, `api`, `schedule`.
    pub source: Option<String>,
    pub creator: Option<User>,
    pub created_at: Option<DateTime<Utc>>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

/// A pipeline a build belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pipeline {
    pub id: Option<String>,
    pub graphql_id: Option<String>,
    pub url: Option<String>,
    pub web_url: Option<String>,
    pub name: Option<String>,
    pub slug: Option<String>,
    /// Clone URL of the repository the pipeline builds.
    pub repository: Option<String>,
    pub default_branch: Option<String>,
    pub description: Option<String>,
    pub provider: Option<PipelineProvider>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Source-control provider of a pipeline's repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineProvider {
    pub id: Option<String>,
    pub webhook_url: Option<String>,
}

/// A job within a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: Option<String>,
    pub graphql_id: Option<String>,
    /// Job type, e.g. `script`, `waiter`, `manual`.
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    pub name: Option<String>,
    pub step_key: Option<String>,
    /// Job state, e.g. `scheduled`, `assigned`, `running`, `finished`.
    pub state: Option<String>,
    pub web_url: Option<String>,
    pub log_url: Option<String>,
    pub raw_log_url: Option<String>,
    pub command: Option<String>,
    pub exit_status: Option<i64>,
    pub artifact_paths: Option<String>,
    pub soft_failed: Option<bool>,
    pub agent: Option<Agent>,
    pub created_at: Option<DateTime<Utc>>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub runnable_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn organization_decodes_ping_fixture_shape() {
        let json = r#"{
            "id": "49801950-1df0-474f-bb56-ad6a930c5cb9",
            "graphql_id": "T3JnYW5pemF0aW9uLS0tZTBmMzk3MgsTksGkxOWYtZTZjNzczZTJiYjEy",
            "url": "https://api.buildkite.com/v2/organizations/acme-inc",
            "web_url": "https://buildkite.com/acme-inc",
            "name": "ACME Inc",
            "slug": "acme-inc",
            "agents_url": "https://api.buildkite.com/v2/organizations/acme-inc/agents",
            "emojis_url": "https://api.buildkite.com/v2/organizations/acme-inc/emojis",
            "created_at": "2021-02-03T20:34:10.486Z",
            "pipelines_url": "https://api.buildkite.com/v2/organizations/acme-inc/pipelines"
        }"#;

        let org: Organization = serde_json::from_str(json).unwrap();
        assert_eq!(org.slug.as_deref(), Some("acme-inc"));
        assert_eq!(org.name.as_deref(), Some("ACME Inc"));
        assert!(org.created_at.is_some());
    }

    #[test]
    fn absent_fields_decode_to_none() {
        let user: User = serde_json::from_str(r#"{"id": "abc", "name": "ACME Man"}"#).unwrap();
        assert_eq!(user.id.as_deref(), Some("abc"));
        assert_eq!(user.name.as_deref(), Some("ACME Man"));
        assert_eq!(user.graphql_id, None);
        assert_eq!(user.email, None);
    }

    #[test]
    fn job_type_uses_wire_name() {
        let job: Job = serde_json::from_str(r#"{"type": "script", "state": "scheduled"}"#).unwrap();
        assert_eq!(job.job_type.as_deref(), Some("script"));

        let json = serde_json::to_value(&job).unwrap();
        assert_eq!(json["type"], "script");
    }

    #[test]
    fn build_roundtrips_through_json() {
        let build = Build {
            id: Some("f62a1b4d-10f9-4790-bc1c-e2c3a0c80983".to_string()),
            graphql_id: None,
            url: None,
            web_url: Some("https://buildkite.com/acme-inc/pipeline/builds/1".to_string()),
            number: Some(1),
            state: Some("passed".to_string()),
            blocked: Some(false),
            message: Some("Bump version".to_string()),
            commit: Some("HEAD".to_string()),
            branch: Some("main".to_string()),
            tag: None,
            source: Some("webhook".to_string()),
            creator: None,
            created_at: "2021-02-03T20:34:10.486Z".parse().ok(),
            scheduled_at: None,
            started_at: None,
            finished_at: None,
        };

        let json = serde_json::to_string(&build).unwrap();
        let parsed: Build = serde_json::from_str(&json).unwrap();
        assert_eq!(build, parsed);
    }

    #[test]
    fn malformed_timestamp_is_a_decode_error() {
        let result: Result<Organization, _> =
            serde_json::from_str(r#"{"created_at": "not-a-date"}"#);
        assert!(result.is_err());
    }
}
