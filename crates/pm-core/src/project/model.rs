//! Project domain models.

use pm_store::{ProjectPatch, ProjectRow};

/// A project owned by a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: String,
    pub client_id: String,
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl Project {
    /// Create from a store row. An unrecognised stored status reads as
    /// [`ProjectStatus::NotStarted`]; the stored label itself is left alone.
    pub fn from_row(row: ProjectRow) -> Self {
        let status = ProjectStatus::parse(&row.status).unwrap_or_else(|| {
            tracing::warn!(project_id = %row.id, status = %row.status, "Unknown stored status");
            ProjectStatus::default()
        });

        Self {
            id: row.id,
            client_id: row.client_id,
            name: row.name,
            description: row.description,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Project lifecycle label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ProjectStatus {
    #[default]
    NotStarted,
    Active,
    InProgress,
    Completed,
}

impl ProjectStatus {
    /// Parse a stored label.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "not started" => Some(Self::NotStarted),
            "active" => Some(Self::Active),
            "in progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    /// The label written to the store.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not started",
            Self::Active => "active",
            Self::InProgress => "in progress",
            Self::Completed => "completed",
        }
    }
}

/// Fields of a partial project update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectUpdate<'a> {
    pub name: Option<&'a str>,
    pub description: Option<&'a str>,
    pub status: Option<ProjectStatus>,
}

impl ProjectUpdate<'_> {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.status.is_none()
    }

    /// The store-side patch carrying only the supplied fields.
    pub(crate) fn to_patch(self) -> ProjectPatch {
        ProjectPatch {
            name: self.name.map(str::to_string),
            description: self.description.map(str::to_string),
            status: self.status.map(|s| s.as_str().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels() {
        for status in [
            ProjectStatus::NotStarted,
            ProjectStatus::Active,
            ProjectStatus::InProgress,
            ProjectStatus::Completed,
        ] {
            assert_eq!(ProjectStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ProjectStatus::parse("In Progress"), Some(ProjectStatus::InProgress));
        assert_eq!(ProjectStatus::parse("archived"), None);
        assert_eq!(ProjectStatus::default(), ProjectStatus::NotStarted);
    }

    #[test]
    fn test_unknown_stored_status_falls_back() {
        let row = ProjectRow::new("p1", "c1", "Engine", "Analytical", "archived");
        assert_eq!(Project::from_row(row).status, ProjectStatus::NotStarted);
    }

    #[test]
    fn test_patch_only_carries_supplied_fields() {
        let patch = ProjectUpdate {
            status: Some(ProjectStatus::InProgress),
            ..Default::default()
        }
        .to_patch();
        assert_eq!(patch.status.as_deref(), Some("in progress"));
        assert!(patch.name.is_none());
        assert!(patch.description.is_none());
    }
}
