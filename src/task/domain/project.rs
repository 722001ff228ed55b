//! Project reference data that tasks may link to.
//!
//! Projects are owned elsewhere; the task core only needs enough of them
//! to validate a link: the owning company, an optional area, and whether
//! the project still accepts work.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::org::domain::{AreaId, CompanyId};

use super::ids::ProjectId;

/// Lifecycle state of a project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Open for new tasks.
    #[default]
    Active,
    /// Temporarily on hold; no new tasks.
    Paused,
    /// Finished; no new tasks.
    Completed,
}

impl ProjectStatus {
    /// Whether new tasks may be filed under a project in this state.
    #[must_use]
    pub const fn accepts_tasks(self) -> bool {
        matches!(self, Self::Active)
    }
}

/// A lightweight view of a project, sufficient for link validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRef {
    id: ProjectId,
    company_id: CompanyId,
    area_id: Option<AreaId>,
    name: String,
    status: ProjectStatus,
    starts_on: Option<NaiveDate>,
    ends_on: Option<NaiveDate>,
}

impl ProjectRef {
    /// Creates an active project reference without an area or schedule.
    #[must_use]
    pub fn new(id: ProjectId, company_id: CompanyId, name: impl Into<String>) -> Self {
        Self {
            id,
            company_id,
            area_id: None,
            name: name.into(),
            status: ProjectStatus::Active,
            starts_on: None,
            ends_on: None,
        }
    }

    /// Scopes the project to an area.
    #[must_use]
    pub const fn with_area(mut self, area_id: AreaId) -> Self {
        self.area_id = Some(area_id);
        self
    }

    /// Sets the lifecycle state.
    #[must_use]
    pub const fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the planned schedule window.
    #[must_use]
    pub const fn with_window(mut self, starts_on: NaiveDate, ends_on: NaiveDate) -> Self {
        self.starts_on = Some(starts_on);
        self.ends_on = Some(ends_on);
        self
    }

    /// Unique identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Owning company.
    #[must_use]
    pub const fn company_id(&self) -> CompanyId {
        self.company_id
    }

    /// Area the project is scoped to, if any.
    #[must_use]
    pub const fn area_id(&self) -> Option<AreaId> {
        self.area_id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lifecycle state.
    #[must_use]
    pub const fn status(&self) -> ProjectStatus {
        self.status
    }

    /// First planned day, if scheduled.
    #[must_use]
    pub const fn starts_on(&self) -> Option<NaiveDate> {
        self.starts_on
    }

    /// Last planned day, if scheduled.
    #[must_use]
    pub const fn ends_on(&self) -> Option<NaiveDate> {
        self.ends_on
    }
}
