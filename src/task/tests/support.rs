//! Shared fixtures and helpers for task tests.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;

use crate::org::{
    adapters::memory::InMemoryUserDirectory,
    domain::{AreaId, CompanyId, OrgUser, PersistedUserData, Role, ScopeSet, TeamId, UserId, UserStatus},
    ports::DirectoryResult,
};
use crate::task::domain::{
    PersistedTaskData, Task, TaskId, TaskPriority, TaskStatus, VisibilityScope,
};

/// Fixed instant every deterministic test hangs its times off.
pub fn base_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0)
        .single()
        .expect("fixture instant should be unambiguous")
}

/// Clock frozen at one instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Clock that advances one millisecond per reading, so consecutive
/// commits never share a timestamp.
pub struct SteppingClock {
    base: DateTime<Utc>,
    ticks: AtomicI64,
}

impl SteppingClock {
    pub fn starting_at(base: DateTime<Utc>) -> Self {
        Self {
            base,
            ticks: AtomicI64::new(0),
        }
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        self.base + Duration::milliseconds(tick)
    }
}

/// Raw material for tasks built below the service layer, where tests
/// need full control over status, assignment, and visibility.
pub struct TaskSeed {
    pub company_id: CompanyId,
    pub creator_id: UserId,
    pub assignees: ScopeSet,
    pub is_personal: bool,
    pub visibility_scope: VisibilityScope,
    pub status: TaskStatus,
    pub deadline: Option<DateTime<Utc>>,
}

impl TaskSeed {
    /// A directed, org-visible, pending task created and held by
    /// `creator_id`.
    pub fn directed(company_id: CompanyId, creator_id: UserId) -> Self {
        Self {
            company_id,
            creator_id,
            assignees: ScopeSet::single(creator_id),
            is_personal: false,
            visibility_scope: VisibilityScope::Org,
            status: TaskStatus::Pending,
            deadline: None,
        }
    }

    /// A personal, private, pending task self-assigned to `creator_id`.
    pub fn personal(company_id: CompanyId, creator_id: UserId) -> Self {
        Self {
            is_personal: true,
            visibility_scope: VisibilityScope::Private,
            ..Self::directed(company_id, creator_id)
        }
    }

    pub fn assigned_to(mut self, assignees: impl IntoIterator<Item = UserId>) -> Self {
        self.assignees = assignees.into_iter().collect();
        self
    }

    pub fn shared_at(mut self, scope: VisibilityScope) -> Self {
        self.visibility_scope = scope;
        self
    }

    pub fn in_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn due(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Builds the task, bypassing creation validation.
    pub fn build(self) -> Task {
        let now = base_instant();
        Task::from_persisted(PersistedTaskData {
            id: TaskId::new(),
            company_id: self.company_id,
            project_id: None,
            title: "fixture task".to_owned(),
            description: None,
            status: self.status,
            priority: TaskPriority::default(),
            deadline: self.deadline,
            creator_id: self.creator_id,
            is_personal: self.is_personal,
            visibility_scope: self.visibility_scope,
            assignees: self.assignees,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Org placement of one seeded directory user.
pub struct SeedUser {
    pub id: UserId,
    pub name: &'static str,
    pub role: Role,
    pub status: UserStatus,
    pub area_id: Option<AreaId>,
    pub team_id: Option<TeamId>,
    pub manager_id: Option<UserId>,
}

/// Inserts a directory row for `user` under `company_id`.
pub fn seed_user(
    directory: &InMemoryUserDirectory,
    company_id: CompanyId,
    user: SeedUser,
) -> DirectoryResult<()> {
    directory.insert(OrgUser::from_persisted(PersistedUserData {
        id: user.id,
        display_name: user.name.to_owned(),
        role: user.role,
        status: user.status,
        company_id,
        area_id: user.area_id,
        team_id: user.team_id,
        manager_id: user.manager_id,
    }))
}
