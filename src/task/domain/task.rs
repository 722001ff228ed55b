//! Task aggregate and its value enums.
//!
//! A [`Task`] belongs to exactly one company and carries an assignment set
//! plus a visibility scope that governs who may read it. All mutation goes
//! through methods that validate domain rules and refresh `updated_at`;
//! persistence layers rehydrate instances via [`Task::from_persisted`]
//! without re-running validation.

use std::fmt;

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use crate::org::domain::{CompanyId, ScopeSet, UserId};

use super::changes::ChangeSet;
use super::error::{
    ParseTaskPriorityError, ParseTaskStatusError, ParseVisibilityScopeError, TaskDomainError,
};
use super::ids::{ProjectId, TaskId};
use super::patch::{FieldUpdate, TaskPatch};
use super::snapshot::TaskSnapshot;

/// Workflow state of a task on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Queued and not yet started.
    Pending,
    /// Actively being worked on.
    InProgress,
    /// Finished by the assignee, awaiting sign-off.
    Review,
    /// Signed off and closed.
    Done,
}

impl TaskStatus {
    /// Canonical label used in payloads and storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Review => "review",
            Self::Done => "done",
        }
    }

    /// Reads a stored label leniently. Unknown values degrade to
    /// [`TaskStatus::Pending`] so that one bad row cannot poison a board
    /// projection.
    #[must_use]
    pub fn from_stored(value: &str) -> Self {
        Self::try_from(value).unwrap_or(Self::Pending)
    }

    /// Whether the task still counts toward open workload.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Pending | Self::InProgress)
    }

    /// Whether a deadline on a task in this status can still be missed.
    #[must_use]
    pub const fn awaits_completion(self) -> bool {
        !matches!(self, Self::Done)
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "review" => Ok(Self::Review),
            "done" => Ok(Self::Done),
            other => Err(ParseTaskStatusError(other.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scheduling priority of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Can slip without consequence.
    Low,
    /// Everyday work.
    #[default]
    Normal,
    /// Should be picked up before normal work.
    High,
    /// Drop everything.
    Urgent,
}

impl TaskPriority {
    /// Canonical label used in payloads and storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParseTaskPriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "normal" => Ok(Self::Normal),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            other => Err(ParseTaskPriorityError(other.to_owned())),
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who may read a task beyond its creator and assignees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityScope {
    /// Creator and assignees only.
    #[default]
    Private,
    /// Additionally readable by supervisors of the assignees' area.
    Supervisor,
    /// Readable across the assignees' area.
    Area,
    /// Readable across the whole company, subject to viewer scope.
    Org,
}

impl VisibilityScope {
    /// Canonical label used in payloads and storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Supervisor => "supervisor",
            Self::Area => "area",
            Self::Org => "org",
        }
    }

    /// Personal tasks may only be private or shared with the supervisor.
    #[must_use]
    pub const fn allowed_for_personal(self) -> bool {
        matches!(self, Self::Private | Self::Supervisor)
    }
}

impl TryFrom<&str> for VisibilityScope {
    type Error = ParseVisibilityScopeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "private" => Ok(Self::Private),
            "supervisor" => Ok(Self::Supervisor),
            "area" => Ok(Self::Area),
            "org" => Ok(Self::Org),
            other => Err(ParseVisibilityScopeError(other.to_owned())),
        }
    }
}

impl fmt::Display for VisibilityScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated input for [`Task::create`].
#[derive(Debug, Clone)]
pub struct NewTaskData {
    /// Identifier assigned by the caller, usually fresh.
    pub id: TaskId,
    /// Company the task belongs to.
    pub company_id: CompanyId,
    /// Optional project the task is tracked under.
    pub project_id: Option<ProjectId>,
    /// Raw title; trimmed and checked for emptiness.
    pub title: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Scheduling priority.
    pub priority: TaskPriority,
    /// Optional due instant.
    pub deadline: Option<DateTime<Utc>>,
    /// User the task is recorded against as author.
    pub creator_id: UserId,
    /// Whether this is a personal task.
    pub is_personal: bool,
    /// Read visibility beyond creator and assignees.
    pub visibility_scope: VisibilityScope,
    /// Users the task is assigned to.
    pub assignees: ScopeSet,
}

/// A unit of work owned by a company and assigned to one or more users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    company_id: CompanyId,
    project_id: Option<ProjectId>,
    title: String,
    description: Option<String>,
    status: TaskStatus,
    priority: TaskPriority,
    deadline: Option<DateTime<Utc>>,
    creator_id: UserId,
    is_personal: bool,
    visibility_scope: VisibilityScope,
    assignees: ScopeSet,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task in [`TaskStatus::Pending`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the trimmed title is
    /// empty and [`TaskDomainError::PersonalVisibilityTooWide`] when a
    /// personal task asks for `area` or `org` visibility.
    pub fn create(data: NewTaskData, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        let title = normalized_title(&data.title)?;
        if data.is_personal && !data.visibility_scope.allowed_for_personal() {
            return Err(TaskDomainError::PersonalVisibilityTooWide(
                data.visibility_scope,
            ));
        }
        let now = clock.utc();
        Ok(Self {
            id: data.id,
            company_id: data.company_id,
            project_id: data.project_id,
            title,
            description: data.description,
            status: TaskStatus::Pending,
            priority: data.priority,
            deadline: data.deadline,
            creator_id: data.creator_id,
            is_personal: data.is_personal,
            visibility_scope: data.visibility_scope,
            assignees: data.assignees,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rehydrates a task from storage without validation.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            company_id: data.company_id,
            project_id: data.project_id,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            deadline: data.deadline,
            creator_id: data.creator_id,
            is_personal: data.is_personal,
            visibility_scope: data.visibility_scope,
            assignees: data.assignees,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Unique identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Owning company.
    #[must_use]
    pub const fn company_id(&self) -> CompanyId {
        self.company_id
    }

    /// Project the task is tracked under, if any.
    #[must_use]
    pub const fn project_id(&self) -> Option<ProjectId> {
        self.project_id
    }

    /// Current title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Free-form description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Current workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Scheduling priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Due instant, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// User who created the task.
    #[must_use]
    pub const fn creator_id(&self) -> UserId {
        self.creator_id
    }

    /// Whether the task is personal rather than directed.
    #[must_use]
    pub const fn is_personal(&self) -> bool {
        self.is_personal
    }

    /// Read visibility beyond creator and assignees.
    #[must_use]
    pub const fn visibility_scope(&self) -> VisibilityScope {
        self.visibility_scope
    }

    /// Users the task is assigned to.
    #[must_use]
    pub const fn assignees(&self) -> &ScopeSet {
        &self.assignees
    }

    /// Whether `user_id` is in the assignment set.
    #[must_use]
    pub fn is_assigned_to(&self, user_id: UserId) -> bool {
        self.assignees.contains(user_id)
    }

    /// Creation instant.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last mutation instant.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Whether the deadline has passed without the task reaching done.
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status.awaits_completion() && self.deadline.is_some_and(|due| due < now)
    }

    /// Applies a field patch and reports the fields that were supplied.
    ///
    /// Cleared nullable fields (`description`, `deadline`) drop their
    /// value; clearing `priority` resets it to [`TaskPriority::Normal`].
    /// Status is not patchable here; see [`Task::set_status`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is set to or
    /// cleared to emptiness, [`TaskDomainError::VisibilityCleared`] when
    /// the patch tries to null out visibility, and
    /// [`TaskDomainError::PersonalVisibilityTooWide`] when a personal task
    /// would end up wider than `supervisor`.
    pub fn apply_patch(
        &mut self,
        patch: &TaskPatch,
        clock: &impl Clock,
    ) -> Result<ChangeSet, TaskDomainError> {
        let mut changes = ChangeSet::default();
        match &patch.title {
            FieldUpdate::Keep => {}
            FieldUpdate::Clear => return Err(TaskDomainError::EmptyTitle),
            FieldUpdate::Set(title) => {
                let replacement = normalized_title(title)?;
                changes.title = Some(replacement.clone());
                self.title = replacement;
            }
        }
        match &patch.description {
            FieldUpdate::Keep => {}
            FieldUpdate::Clear => {
                changes.description = FieldUpdate::Clear;
                self.description = None;
            }
            FieldUpdate::Set(description) => {
                changes.description = FieldUpdate::Set(description.clone());
                self.description = Some(description.clone());
            }
        }
        match patch.priority {
            FieldUpdate::Keep => {}
            FieldUpdate::Clear => {
                changes.priority = Some(TaskPriority::default());
                self.priority = TaskPriority::default();
            }
            FieldUpdate::Set(priority) => {
                changes.priority = Some(priority);
                self.priority = priority;
            }
        }
        match patch.visibility_scope {
            FieldUpdate::Keep => {}
            FieldUpdate::Clear => return Err(TaskDomainError::VisibilityCleared),
            FieldUpdate::Set(scope) => {
                if self.is_personal && !scope.allowed_for_personal() {
                    return Err(TaskDomainError::PersonalVisibilityTooWide(scope));
                }
                changes.visibility_scope = Some(scope);
                self.visibility_scope = scope;
            }
        }
        match patch.deadline {
            FieldUpdate::Keep => {}
            FieldUpdate::Clear => {
                changes.deadline = FieldUpdate::Clear;
                self.deadline = None;
            }
            FieldUpdate::Set(deadline) => {
                changes.deadline = FieldUpdate::Set(deadline);
                self.deadline = Some(deadline);
            }
        }
        self.touch(clock);
        Ok(changes)
    }

    /// Moves the task to `status` and returns the status it held before.
    pub fn set_status(&mut self, status: TaskStatus, clock: &impl Clock) -> TaskStatus {
        let from = self.status;
        self.status = status;
        self.touch(clock);
        from
    }

    /// Restores the fields captured in `snapshot` and returns the status
    /// the task held before the revert. Priority, assignees and the
    /// personal flag are left untouched.
    pub fn apply_revert(&mut self, snapshot: &TaskSnapshot, clock: &impl Clock) -> TaskStatus {
        let from = self.status;
        self.title = snapshot.title.clone();
        self.description = snapshot.description.clone();
        self.status = snapshot.status;
        self.visibility_scope = snapshot.visibility_scope;
        self.deadline = snapshot.deadline;
        self.touch(clock);
        from
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

/// Raw task fields loaded from storage.
#[derive(Debug, Clone)]
pub struct PersistedTaskData {
    /// Unique identifier.
    pub id: TaskId,
    /// Owning company.
    pub company_id: CompanyId,
    /// Project the task is tracked under, if any.
    pub project_id: Option<ProjectId>,
    /// Current title.
    pub title: String,
    /// Free-form description, if any.
    pub description: Option<String>,
    /// Current workflow status.
    pub status: TaskStatus,
    /// Scheduling priority.
    pub priority: TaskPriority,
    /// Due instant, if any.
    pub deadline: Option<DateTime<Utc>>,
    /// User who created the task.
    pub creator_id: UserId,
    /// Whether the task is personal rather than directed.
    pub is_personal: bool,
    /// Read visibility beyond creator and assignees.
    pub visibility_scope: VisibilityScope,
    /// Users the task is assigned to.
    pub assignees: ScopeSet,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Last mutation instant.
    pub updated_at: DateTime<Utc>,
}

fn normalized_title(raw: &str) -> Result<String, TaskDomainError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(TaskDomainError::EmptyTitle);
    }
    Ok(title.to_owned())
}
