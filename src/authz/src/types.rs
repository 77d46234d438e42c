//! Core authorization types

use crate::error::{AuthzError, Result};
use crate::scope::ActionToken;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Privilege tier assigned to an actor. Exactly one per actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    ProjectManager,
    ScrumMaster,
    Employee,
    Client,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Admin,
        Role::ProjectManager,
        Role::ScrumMaster,
        Role::Employee,
        Role::Client,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::ProjectManager => "PROJECT_MANAGER",
            Role::ScrumMaster => "SCRUM_MASTER",
            Role::Employee => "EMPLOYEE",
            Role::Client => "CLIENT",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthzError;

    /// Case-insensitive: `ADMIN`, `admin` and `Admin` all parse.
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_uppercase();
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == normalized)
            .ok_or_else(|| AuthzError::UnknownRole(s.to_string()))
    }
}

/// Category of domain object subject to access control
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Users,
    Projects,
    Sprints,
    Issues,
    Comments,
    TimeEntries,
    Reports,
    Settings,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 8] = [
        ResourceKind::Users,
        ResourceKind::Projects,
        ResourceKind::Sprints,
        ResourceKind::Issues,
        ResourceKind::Comments,
        ResourceKind::TimeEntries,
        ResourceKind::Reports,
        ResourceKind::Settings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Users => "users",
            ResourceKind::Projects => "projects",
            ResourceKind::Sprints => "sprints",
            ResourceKind::Issues => "issues",
            ResourceKind::Comments => "comments",
            ResourceKind::TimeEntries => "time_entries",
            ResourceKind::Reports => "reports",
            ResourceKind::Settings => "settings",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = AuthzError;

    fn from_str(s: &str) -> Result<Self> {
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| AuthzError::UnknownResource(s.to_string()))
    }
}

impl From<ResourceKind> for String {
    fn from(kind: ResourceKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Base verb of an action token
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verb {
    Create,
    Read,
    Update,
    Delete,
    Start,
    Complete,
}

impl Verb {
    pub const ALL: [Verb; 6] = [
        Verb::Create,
        Verb::Read,
        Verb::Update,
        Verb::Delete,
        Verb::Start,
        Verb::Complete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Create => "create",
            Verb::Read => "read",
            Verb::Update => "update",
            Verb::Delete => "delete",
            Verb::Start => "start",
            Verb::Complete => "complete",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verb {
    type Err = AuthzError;

    fn from_str(s: &str) -> Result<Self> {
        Verb::ALL
            .into_iter()
            .find(|verb| verb.as_str() == s)
            .ok_or_else(|| AuthzError::UnknownAction(s.to_string()))
    }
}

/// A single authorization check, built by the caller per request and never stored.
///
/// Resource and action are kept as the raw strings the handler supplied so that
/// unknown values can be denied instead of rejected. Ownership facts are
/// optional; an absent fact never satisfies a scoped grant.
///
/// ```rust
/// use tracker_authz::{AccessQuery, Role};
///
/// let query = AccessQuery::builder()
///     .role(Role::Employee)
///     .user_id("u1")
///     .resource("issues")
///     .action("update_assigned")
///     .resource_assignee_id("u1")
///     .build()
///     .unwrap();
///
/// assert!(tracker_authz::is_allowed(&query));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AccessQueryBuilder")]
pub struct AccessQuery {
    role: Role,
    user_id: String,
    resource: String,
    action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    resource_owner_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    resource_assignee_id: Option<String>,
}

impl AccessQuery {
    pub fn builder() -> AccessQueryBuilder {
        AccessQueryBuilder::default()
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Raw resource kind as supplied by the caller
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Raw action as supplied by the caller
    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn resource_owner_id(&self) -> Option<&str> {
        self.resource_owner_id.as_deref()
    }

    pub fn resource_assignee_id(&self) -> Option<&str> {
        self.resource_assignee_id.as_deref()
    }

    /// Parsed resource kind, `None` if the string is outside the closed set
    pub fn resource_kind(&self) -> Option<ResourceKind> {
        self.resource.parse().ok()
    }

    /// Parsed action token, `None` if the string is not `verb[_scope]`
    pub fn action_token(&self) -> Option<ActionToken> {
        self.action.parse().ok()
    }
}

/// Builder for [`AccessQuery`]; `build` rejects missing required fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccessQueryBuilder {
    role: Option<Role>,
    user_id: Option<String>,
    resource: Option<String>,
    action: Option<String>,
    resource_owner_id: Option<String>,
    resource_assignee_id: Option<String>,
}

impl AccessQueryBuilder {
    pub fn role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn resource_owner_id(mut self, owner_id: impl Into<String>) -> Self {
        self.resource_owner_id = Some(owner_id.into());
        self
    }

    pub fn resource_assignee_id(mut self, assignee_id: impl Into<String>) -> Self {
        self.resource_assignee_id = Some(assignee_id.into());
        self
    }

    /// Set the owner fact from a possibly-unloaded resource
    pub fn maybe_resource_owner_id(mut self, owner_id: Option<String>) -> Self {
        self.resource_owner_id = owner_id;
        self
    }

    /// Set the assignee fact from a possibly-unloaded resource
    pub fn maybe_resource_assignee_id(mut self, assignee_id: Option<String>) -> Self {
        self.resource_assignee_id = assignee_id;
        self
    }

    pub fn build(self) -> Result<AccessQuery> {
        let role = self
            .role
            .ok_or_else(|| AuthzError::InvalidQuery("missing required field `role`".to_string()))?;

        Ok(AccessQuery {
            role,
            user_id: required(self.user_id, "user_id")?,
            resource: required(self.resource, "resource")?,
            action: required(self.action, "action")?,
            resource_owner_id: optional(self.resource_owner_id),
            resource_assignee_id: optional(self.resource_assignee_id),
        })
    }
}

impl TryFrom<AccessQueryBuilder> for AccessQuery {
    type Error = AuthzError;

    fn try_from(builder: AccessQueryBuilder) -> Result<Self> {
        builder.build()
    }
}

fn required(value: Option<String>, field: &str) -> Result<String> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        Some(_) => Err(AuthzError::InvalidQuery(format!("blank required field `{}`", field))),
        None => Err(AuthzError::InvalidQuery(format!("missing required field `{}`", field))),
    }
}

// Blank facts are treated the same as absent ones.
fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("project_manager".parse::<Role>().unwrap(), Role::ProjectManager);
        assert_eq!(" Scrum_Master ".parse::<Role>().unwrap(), Role::ScrumMaster);
        assert!(matches!("owner".parse::<Role>(), Err(AuthzError::UnknownRole(_))));
    }

    #[test]
    fn test_role_display_round_trip() {
        for role in Role::ALL {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_resource_kind_parsing() {
        assert_eq!("time_entries".parse::<ResourceKind>().unwrap(), ResourceKind::TimeEntries);
        assert!(matches!(
            "timeEntries".parse::<ResourceKind>(),
            Err(AuthzError::UnknownResource(_))
        ));
        assert!("".parse::<ResourceKind>().is_err());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Role::ScrumMaster).unwrap(), "\"SCRUM_MASTER\"");
        assert_eq!(
            serde_json::to_string(&ResourceKind::TimeEntries).unwrap(),
            "\"time_entries\""
        );
    }

    #[test]
    fn test_query_builder() {
        let query = AccessQuery::builder()
            .role(Role::Client)
            .user_id("u1")
            .resource("issues")
            .action("update_own")
            .resource_owner_id("u2")
            .build()
            .unwrap();

        assert_eq!(query.role(), Role::Client);
        assert_eq!(query.resource_kind(), Some(ResourceKind::Issues));
        assert_eq!(query.resource_owner_id(), Some("u2"));
        assert_eq!(query.resource_assignee_id(), None);
        assert!(query.action_token().is_some());
    }

    #[test]
    fn test_query_missing_fields() {
        let err = AccessQuery::builder()
            .user_id("u1")
            .resource("issues")
            .action("read")
            .build()
            .unwrap_err();
        assert!(matches!(err, AuthzError::InvalidQuery(_)));

        let err = AccessQuery::builder()
            .role(Role::Employee)
            .user_id("u1")
            .action("read")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("resource"));

        let err = AccessQuery::builder()
            .role(Role::Employee)
            .user_id("u1")
            .resource("issues")
            .action("   ")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("action"));
    }

    #[test]
    fn test_unknown_strings_are_not_misuse() {
        let query = AccessQuery::builder()
            .role(Role::Employee)
            .user_id("u1")
            .resource("invoices")
            .action("archive")
            .build()
            .unwrap();

        assert_eq!(query.resource_kind(), None);
        assert_eq!(query.action_token(), None);
    }

    #[test]
    fn test_blank_facts_are_absent() {
        let query = AccessQuery::builder()
            .role(Role::Employee)
            .user_id("u1")
            .resource("issues")
            .action("update")
            .resource_assignee_id("")
            .maybe_resource_owner_id(None)
            .build()
            .unwrap();

        assert_eq!(query.resource_assignee_id(), None);
        assert_eq!(query.resource_owner_id(), None);
    }

    #[test]
    fn test_query_deserialization_validates() {
        let query: AccessQuery = serde_json::from_str(
            r#"{"role":"EMPLOYEE","user_id":"u1","resource":"time_entries","action":"delete_own","resource_owner_id":"u1"}"#,
        )
        .unwrap();
        assert_eq!(query.resource_owner_id(), Some("u1"));

        let missing = serde_json::from_str::<AccessQuery>(r#"{"role":"EMPLOYEE","user_id":"u1"}"#);
        assert!(missing.is_err());

        let bad_role = serde_json::from_str::<AccessQuery>(
            r#"{"role":"OWNER","user_id":"u1","resource":"issues","action":"read"}"#,
        );
        assert!(bad_role.is_err());
    }
}
