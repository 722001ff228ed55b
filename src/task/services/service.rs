//! Task mutation and query service.
//!
//! Every mutation follows the same shape: authorize, validate, apply the
//! change to the aggregate, then persist the new task state together
//! with exactly one sealed commit. The store's conditional append makes
//! concurrent writers lose cleanly with a conflict instead of forking a
//! task's history; the service never retries on the caller's behalf.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use tracing::{debug, warn};

use crate::org::domain::{Actor, AssignmentScope, Role, ScopeSet, ViewerScope};
use crate::org::ports::UserDirectory;
use crate::org::services::{ScopeResolver, TargetSelection};
use crate::task::domain::{
    ChangeSet, CommitDraft, CommitHash, NewTaskData, ProjectId, Task, TaskCommit, TaskId,
    TaskPatch, TaskPriority, TaskStatus, VisibilityScope, task_visible, verify_chain,
    verify_commit,
};
use crate::task::ports::{AuditAction, AuditEvent, AuditSink, ProjectCatalog, TaskStore};

use super::error::{TaskServiceError, TaskServiceResult};
use super::insights::{
    TaskSummary, TeamMetrics, TeamOverview, completion_window, deadline_horizon, team_load,
    upcoming_deadlines,
};
use super::kanban::{KanbanBoard, project_board};
use super::policy::TaskPolicy;

const DEFAULT_INIT_MESSAGE: &str = "init";
const DEFAULT_UPDATE_MESSAGE: &str = "update";
const DEFAULT_STATUS_MESSAGE: &str = "status change";
const DEFAULT_REVERT_MESSAGE: &str = "revert";

/// Days of commit activity considered by the completion metric.
const COMPLETION_WINDOW_DAYS: i64 = 7;

/// Most tasks listed in the upcoming-deadline section of an overview.
const UPCOMING_LIMIT: usize = 10;

/// Input for creating a task the actor keeps for themselves.
#[derive(Debug, Clone)]
pub struct CreatePersonalTask {
    title: String,
    description: Option<String>,
    priority: TaskPriority,
    visibility_scope: Option<VisibilityScope>,
    deadline: Option<DateTime<Utc>>,
    project_id: Option<ProjectId>,
}

impl CreatePersonalTask {
    /// Starts a request with the given title; everything else defaults.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority: TaskPriority::default(),
            visibility_scope: None,
            deadline: None,
            project_id: None,
        }
    }

    /// Sets a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets a priority other than the default.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Requests a visibility other than private. Personal tasks only
    /// accept `private` and `supervisor`.
    #[must_use]
    pub const fn with_visibility(mut self, scope: VisibilityScope) -> Self {
        self.visibility_scope = Some(scope);
        self
    }

    /// Sets a deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Files the task under a project.
    #[must_use]
    pub const fn in_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }
}

/// Input for creating a task directed at other users.
#[derive(Debug, Clone)]
pub struct CreateDirectedTask {
    title: String,
    description: Option<String>,
    priority: TaskPriority,
    deadline: Option<DateTime<Utc>>,
    project_id: Option<ProjectId>,
    targets: TargetSelection,
}

impl CreateDirectedTask {
    /// Starts a request with a title and the users, area, or team the
    /// task should reach.
    #[must_use]
    pub fn new(title: impl Into<String>, targets: TargetSelection) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority: TaskPriority::default(),
            deadline: None,
            project_id: None,
            targets,
        }
    }

    /// Sets a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets a priority other than the default.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets a deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Files the task under a project.
    #[must_use]
    pub const fn in_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }
}

/// Coordinates task mutations, queries, and projections for one store.
pub struct TaskService<S, D, P, A, C>
where
    S: TaskStore,
    D: UserDirectory,
    P: ProjectCatalog,
    A: AuditSink,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    resolver: ScopeResolver<D>,
    projects: Arc<P>,
    audit: Arc<A>,
    clock: Arc<C>,
    policy: TaskPolicy,
}

impl<S, D, P, A, C> TaskService<S, D, P, A, C>
where
    S: TaskStore,
    D: UserDirectory,
    P: ProjectCatalog,
    A: AuditSink,
    C: Clock + Send + Sync,
{
    /// Creates a service over the given collaborators.
    #[must_use]
    pub const fn new(
        store: Arc<S>,
        resolver: ScopeResolver<D>,
        projects: Arc<P>,
        audit: Arc<A>,
        clock: Arc<C>,
        policy: TaskPolicy,
    ) -> Self {
        Self {
            store,
            resolver,
            projects,
            audit,
            clock,
            policy,
        }
    }

    /// Creates a personal task, self-assigned to the actor.
    ///
    /// The task starts pending and private unless the request narrows
    /// that; its genesis commit records the full initial field state.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] for rejected input and
    /// [`TaskServiceError::Persistence`] when storage fails.
    pub async fn create_personal_task(
        &self,
        actor: &Actor,
        request: CreatePersonalTask,
    ) -> TaskServiceResult<Task> {
        self.policy.check_title(&request.title)?;
        if let Some(description) = &request.description {
            self.policy.check_description(description)?;
        }
        self.validate_project_link(actor, request.project_id)
            .await?;
        let task = Task::create(
            NewTaskData {
                id: TaskId::new(),
                company_id: actor.company_id(),
                project_id: request.project_id,
                title: request.title,
                description: request.description,
                priority: request.priority,
                deadline: request.deadline,
                creator_id: actor.id(),
                is_personal: true,
                visibility_scope: request.visibility_scope.unwrap_or_default(),
                assignees: ScopeSet::single(actor.id()),
            },
            self.clock.as_ref(),
        )?;
        let genesis = CommitDraft::new(task.id(), actor.id(), DEFAULT_INIT_MESSAGE)
            .with_changes(ChangeSet::for_creation(&task))
            .with_transition(None, Some(task.status()))
            .seal(&task, self.clock.as_ref())?;
        self.store.insert(&task, &genesis).await?;
        debug!(task_id = %task.id(), "personal task created");
        self.record_audit(AuditEvent::new(
            actor.id(),
            actor.company_id(),
            AuditAction::PersonalCreated,
            task.id(),
            self.clock.utc(),
        ))
        .await;
        Ok(task)
    }

    /// Creates a directed task assigned to every resolved target.
    ///
    /// Targets are resolved through the actor's assignment scope before
    /// anything is written; directed tasks are always org-visible and
    /// never personal.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Authorization`] when the actor's role
    /// may not direct work, [`TaskServiceError::ScopeConfiguration`] when
    /// the actor's org data cannot produce a scope,
    /// [`TaskServiceError::NoValidTargets`] when no assignable user
    /// remains, [`TaskServiceError::Validation`] for rejected input, and
    /// [`TaskServiceError::Persistence`] when storage fails.
    pub async fn create_directed_task(
        &self,
        actor: &Actor,
        request: CreateDirectedTask,
    ) -> TaskServiceResult<Task> {
        if !actor.role().may_direct_tasks() {
            return Err(TaskServiceError::Authorization(
                "only managing roles may direct tasks to others".to_owned(),
            ));
        }
        self.policy.check_title(&request.title)?;
        if let Some(description) = &request.description {
            self.policy.check_description(description)?;
        }
        self.validate_project_link(actor, request.project_id)
            .await?;
        let targets = self.resolver.resolve_targets(actor, &request.targets).await?;
        if targets.is_empty() {
            return Err(TaskServiceError::NoValidTargets);
        }
        self.policy.check_target_count(targets.len())?;
        let assigned = targets.len();
        let task = Task::create(
            NewTaskData {
                id: TaskId::new(),
                company_id: actor.company_id(),
                project_id: request.project_id,
                title: request.title,
                description: request.description,
                priority: request.priority,
                deadline: request.deadline,
                creator_id: actor.id(),
                is_personal: false,
                visibility_scope: VisibilityScope::Org,
                assignees: targets,
            },
            self.clock.as_ref(),
        )?;
        let genesis = CommitDraft::new(task.id(), actor.id(), DEFAULT_INIT_MESSAGE)
            .with_changes(ChangeSet::for_creation(&task))
            .with_transition(None, Some(task.status()))
            .seal(&task, self.clock.as_ref())?;
        self.store.insert(&task, &genesis).await?;
        debug!(task_id = %task.id(), assigned, "directed task created");
        self.record_audit(
            AuditEvent::new(
                actor.id(),
                actor.company_id(),
                AuditAction::DirectedCreated,
                task.id(),
                self.clock.utc(),
            )
            .with_detail(format!("assigned to {assigned} users")),
        )
        .await;
        Ok(task)
    }

    /// Applies a field patch to a visible task.
    ///
    /// Exactly one commit records the supplied fields; `message` defaults
    /// to a generic update note. Personal tasks may only be patched by
    /// their creator or an elevated role.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task does not
    /// exist or the actor may not read it,
    /// [`TaskServiceError::Authorization`] when the personal-task rule
    /// blocks the patch, [`TaskServiceError::Validation`] for rejected
    /// input, [`TaskServiceError::Conflict`] when another writer got
    /// there first, and [`TaskServiceError::Persistence`] when storage
    /// fails.
    pub async fn patch_task(
        &self,
        actor: &Actor,
        task_id: TaskId,
        patch: TaskPatch,
        message: Option<String>,
    ) -> TaskServiceResult<Task> {
        let mut task = self.fetch_visible(actor, task_id).await?;
        ensure_may_mutate_personal(&task, actor)?;
        if patch.is_empty() {
            return Err(TaskServiceError::Validation(
                "patch touches no fields".to_owned(),
            ));
        }
        if let Some(title) = patch.title.set_value() {
            self.policy.check_title(title)?;
        }
        if let Some(description) = patch.description.set_value() {
            self.policy.check_description(description)?;
        }
        let note = resolve_message(message, DEFAULT_UPDATE_MESSAGE);
        self.policy.check_message(&note)?;
        let changes = task.apply_patch(&patch, self.clock.as_ref())?;
        self.append_commit(actor, &task, changes, (None, None), note)
            .await?;
        debug!(task_id = %task.id(), "task patched");
        self.record_audit(AuditEvent::new(
            actor.id(),
            actor.company_id(),
            AuditAction::TaskUpdated,
            task.id(),
            self.clock.utc(),
        ))
        .await;
        Ok(task)
    }

    /// Moves a visible task to the status named by `status_label`.
    ///
    /// The commit records the from/to pair; `message` defaults to a
    /// generic status note. Any viewer of the task may move it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] for an unknown status
    /// label, [`TaskServiceError::TaskNotFound`] when the task does not
    /// exist or the actor may not read it, [`TaskServiceError::Conflict`]
    /// when another writer got there first, and
    /// [`TaskServiceError::Persistence`] when storage fails.
    pub async fn update_status(
        &self,
        actor: &Actor,
        task_id: TaskId,
        status_label: &str,
        message: Option<String>,
    ) -> TaskServiceResult<Task> {
        let status = TaskStatus::try_from(status_label)
            .map_err(|err| TaskServiceError::Validation(err.to_string()))?;
        let mut task = self.fetch_visible(actor, task_id).await?;
        let note = resolve_message(message, DEFAULT_STATUS_MESSAGE);
        self.policy.check_message(&note)?;
        let from = task.set_status(status, self.clock.as_ref());
        let changes = ChangeSet {
            status: Some(status),
            ..ChangeSet::new()
        };
        self.append_commit(actor, &task, changes, (Some(from), Some(status)), note)
            .await?;
        debug!(task_id = %task.id(), from = %from, to = %status, "task status changed");
        self.record_audit(
            AuditEvent::new(
                actor.id(),
                actor.company_id(),
                AuditAction::StatusChanged,
                task.id(),
                self.clock.utc(),
            )
            .with_detail(format!("{from} -> {status}")),
        )
        .await;
        Ok(task)
    }

    /// Restores a visible task to the snapshot of an earlier commit.
    ///
    /// The referenced commit is re-hashed before its snapshot is trusted.
    /// Reverting moves the chain forward: a new commit records the
    /// restoration, history is never rewritten. Personal tasks may only
    /// be reverted by their creator or an elevated role.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task does not
    /// exist or the actor may not read it,
    /// [`TaskServiceError::CommitNotFound`] when no commit carries
    /// `commit_hash`, [`TaskServiceError::Integrity`] when the stored
    /// commit fails its digest check, [`TaskServiceError::Authorization`]
    /// when the personal-task rule blocks the revert,
    /// [`TaskServiceError::Conflict`] when another writer got there
    /// first, and [`TaskServiceError::Persistence`] when storage fails.
    pub async fn revert_to_commit(
        &self,
        actor: &Actor,
        task_id: TaskId,
        commit_hash: &CommitHash,
        message: Option<String>,
    ) -> TaskServiceResult<Task> {
        let mut task = self.fetch_visible(actor, task_id).await?;
        ensure_may_mutate_personal(&task, actor)?;
        let history = self.store.history(task_id).await?;
        let target = history
            .iter()
            .find(|commit| commit.hash() == commit_hash)
            .ok_or_else(|| TaskServiceError::CommitNotFound(commit_hash.clone()))?;
        verify_commit(target)?;
        let note = resolve_message(message, DEFAULT_REVERT_MESSAGE);
        self.policy.check_message(&note)?;
        let from = task.apply_revert(target.snapshot(), self.clock.as_ref());
        let changes = ChangeSet {
            revert_to: Some(commit_hash.clone()),
            ..ChangeSet::new()
        };
        self.append_commit(
            actor,
            &task,
            changes,
            (Some(from), Some(task.status())),
            note,
        )
        .await?;
        debug!(task_id = %task.id(), commit = %commit_hash, "task reverted");
        self.record_audit(
            AuditEvent::new(
                actor.id(),
                actor.company_id(),
                AuditAction::TaskReverted,
                task.id(),
                self.clock.utc(),
            )
            .with_detail(commit_hash.to_string()),
        )
        .await;
        Ok(task)
    }

    /// Lists every task the actor may read, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::ScopeConfiguration`] when the actor's
    /// org data cannot produce a scope and
    /// [`TaskServiceError::Persistence`] when storage fails.
    pub async fn list_visible_tasks(&self, actor: &Actor) -> TaskServiceResult<Vec<Task>> {
        let scope = self.resolver.viewer_scope(actor).await?;
        let mut tasks = match &scope {
            ViewerScope::Unrestricted => self.store.list_all().await?,
            _ => self.store.list_by_company(actor.company_id()).await?,
        };
        tasks.retain(|task| task_visible(task, &scope));
        tasks.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| a.id().cmp(&b.id()))
        });
        Ok(tasks)
    }

    /// Returns a visible task's commit history, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task does not
    /// exist or the actor may not read it and
    /// [`TaskServiceError::Persistence`] when storage fails.
    pub async fn commit_history(
        &self,
        actor: &Actor,
        task_id: TaskId,
    ) -> TaskServiceResult<Vec<TaskCommit>> {
        self.fetch_visible(actor, task_id).await?;
        Ok(self.store.history(task_id).await?)
    }

    /// Re-hashes a visible task's complete history and checks its links.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task does not
    /// exist or the actor may not read it and
    /// [`TaskServiceError::Integrity`] when any commit fails its digest
    /// or chain check.
    pub async fn verify_history(&self, actor: &Actor, task_id: TaskId) -> TaskServiceResult<()> {
        self.fetch_visible(actor, task_id).await?;
        let history = self.store.history(task_id).await?;
        verify_chain(&history)?;
        Ok(())
    }

    /// Projects the actor's visible tasks onto a kanban board.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`TaskService::list_visible_tasks`].
    pub async fn kanban_board(&self, actor: &Actor) -> TaskServiceResult<KanbanBoard> {
        Ok(project_board(self.list_visible_tasks(actor).await?))
    }

    /// Tallies the actor's visible tasks by status and kind.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`TaskService::list_visible_tasks`].
    pub async fn task_summary(&self, actor: &Actor) -> TaskServiceResult<TaskSummary> {
        Ok(TaskSummary::tally(&self.list_visible_tasks(actor).await?))
    }

    /// Builds the supervisor dashboard numbers over the actor's visible
    /// tasks: summary tallies, workload metrics, per-member load,
    /// deadline pressure, and the next deadlines.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::ScopeConfiguration`] when the actor's
    /// org data cannot produce a scope and
    /// [`TaskServiceError::Persistence`] when storage fails.
    pub async fn team_overview(&self, actor: &Actor) -> TaskServiceResult<TeamOverview> {
        let tasks = self.list_visible_tasks(actor).await?;
        let now = self.clock.utc();
        let members = match self.resolver.assignment_scope(actor).await? {
            AssignmentScope::Members(members) => members,
            AssignmentScope::Unrestricted => tasks
                .iter()
                .flat_map(|task| task.assignees().iter())
                .collect(),
        };
        let mut commits = Vec::new();
        for task in &tasks {
            commits.extend(self.store.history(task.id()).await?);
        }
        let since = now - Duration::days(COMPLETION_WINDOW_DAYS);
        Ok(TeamOverview {
            summary: TaskSummary::tally(&tasks),
            metrics: TeamMetrics {
                open_tasks: tasks.iter().filter(|task| task.status().is_open()).count(),
                overdue_tasks: tasks.iter().filter(|task| task.is_overdue(now)).count(),
                completion: completion_window(&commits, since),
            },
            load: team_load(&tasks, &members, now),
            horizon: deadline_horizon(&tasks, now),
            upcoming: upcoming_deadlines(&tasks, now, UPCOMING_LIMIT),
        })
    }

    /// Resolves the actor's assignment scope.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::ScopeConfiguration`] when the actor's
    /// org data cannot produce a scope and
    /// [`TaskServiceError::Persistence`] when the directory fails.
    pub async fn assignment_scope(&self, actor: &Actor) -> TaskServiceResult<AssignmentScope> {
        Ok(self.resolver.assignment_scope(actor).await?)
    }

    /// Resolves a target selection against the actor's assignment scope
    /// without creating anything, for previewing recipients.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::ScopeConfiguration`] when the actor's
    /// org data cannot produce a scope and
    /// [`TaskServiceError::Persistence`] when the directory fails.
    pub async fn resolve_targets(
        &self,
        actor: &Actor,
        selection: &TargetSelection,
    ) -> TaskServiceResult<ScopeSet> {
        Ok(self.resolver.resolve_targets(actor, selection).await?)
    }

    async fn fetch_visible(&self, actor: &Actor, task_id: TaskId) -> TaskServiceResult<Task> {
        let task = self
            .store
            .find_by_id(task_id)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(task_id))?;
        if actor.role() != Role::Root && task.company_id() != actor.company_id() {
            return Err(TaskServiceError::TaskNotFound(task_id));
        }
        let scope = self.resolver.viewer_scope(actor).await?;
        if !task_visible(&task, &scope) {
            return Err(TaskServiceError::TaskNotFound(task_id));
        }
        Ok(task)
    }

    async fn validate_project_link(
        &self,
        actor: &Actor,
        project_id: Option<ProjectId>,
    ) -> TaskServiceResult<()> {
        let Some(linked) = project_id else {
            return Ok(());
        };
        let project = self
            .projects
            .find_project(linked)
            .await?
            .filter(|project| project.company_id() == actor.company_id())
            .ok_or_else(|| {
                TaskServiceError::Validation("project not found in this company".to_owned())
            })?;
        if !project.status().accepts_tasks() {
            return Err(TaskServiceError::Validation(
                "project is closed to new tasks".to_owned(),
            ));
        }
        Ok(())
    }

    async fn append_commit(
        &self,
        actor: &Actor,
        task: &Task,
        changes: ChangeSet,
        transition: (Option<TaskStatus>, Option<TaskStatus>),
        message: String,
    ) -> TaskServiceResult<TaskCommit> {
        let head = self.current_head(task.id()).await?;
        let commit = CommitDraft::new(task.id(), actor.id(), message)
            .with_changes(changes)
            .with_transition(transition.0, transition.1)
            .with_parent(head)
            .seal(task, self.clock.as_ref())?;
        self.store.append(task, &commit).await?;
        Ok(commit)
    }

    async fn current_head(&self, task_id: TaskId) -> TaskServiceResult<CommitHash> {
        self.store.head(task_id).await?.ok_or_else(|| {
            TaskServiceError::persistence(std::io::Error::other(
                "task chain has no genesis commit",
            ))
        })
    }

    async fn record_audit(&self, event: AuditEvent) {
        if let Err(err) = self.audit.record(event).await {
            warn!(error = %err, "audit record dropped");
        }
    }
}

fn ensure_may_mutate_personal(task: &Task, actor: &Actor) -> TaskServiceResult<()> {
    if task.is_personal() && task.creator_id() != actor.id() && !actor.role().is_elevated() {
        return Err(TaskServiceError::Authorization(
            "personal tasks may only be changed by their creator".to_owned(),
        ));
    }
    Ok(())
}

fn resolve_message(provided: Option<String>, default: &str) -> String {
    provided.unwrap_or_else(|| default.to_owned())
}
