//! Pure reporting functions over task collections.
//!
//! Everything here takes plain slices plus an explicit `now` and returns
//! counts, never ratios; callers decide how to render percentages. The
//! service layer feeds these from the viewer's visible tasks so the
//! numbers never leak work the viewer could not read directly.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::org::domain::{ScopeSet, UserId};
use crate::task::domain::{Task, TaskCommit, TaskStatus};

/// Per-status and per-kind task counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskSummary {
    /// Tasks in [`TaskStatus::Pending`].
    pub pending: usize,
    /// Tasks in [`TaskStatus::InProgress`].
    pub in_progress: usize,
    /// Tasks in [`TaskStatus::Review`].
    pub review: usize,
    /// Tasks in [`TaskStatus::Done`].
    pub done: usize,
    /// Personal tasks, whatever their status.
    pub personal: usize,
    /// Directed tasks, whatever their status.
    pub directed: usize,
}

impl TaskSummary {
    /// Tallies `tasks` by status and kind.
    #[must_use]
    pub fn tally(tasks: &[Task]) -> Self {
        let mut summary = Self::default();
        for task in tasks {
            match task.status() {
                TaskStatus::Pending => summary.pending += 1,
                TaskStatus::InProgress => summary.in_progress += 1,
                TaskStatus::Review => summary.review += 1,
                TaskStatus::Done => summary.done += 1,
            }
            if task.is_personal() {
                summary.personal += 1;
            } else {
                summary.directed += 1;
            }
        }
        summary
    }
}

/// Workload counts for one team member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TeamMemberLoad {
    /// Member the counts belong to.
    pub user_id: UserId,
    /// Assigned tasks still pending or in progress.
    pub open: usize,
    /// Assigned tasks currently in progress.
    pub in_progress: usize,
    /// Assigned tasks past their deadline and not done.
    pub overdue: usize,
}

/// Computes per-member workload over `tasks`.
///
/// Every member of `members` gets an entry, including members with no
/// assigned work, in ascending identifier order.
#[must_use]
pub fn team_load(tasks: &[Task], members: &ScopeSet, now: DateTime<Utc>) -> Vec<TeamMemberLoad> {
    members
        .iter()
        .map(|user_id| {
            let mut load = TeamMemberLoad {
                user_id,
                open: 0,
                in_progress: 0,
                overdue: 0,
            };
            for task in tasks.iter().filter(|task| task.is_assigned_to(user_id)) {
                if task.status().is_open() {
                    load.open += 1;
                }
                if task.status() == TaskStatus::InProgress {
                    load.in_progress += 1;
                }
                if task.is_overdue(now) {
                    load.overdue += 1;
                }
            }
            load
        })
        .collect()
}

/// Distinct-task completion counts over a commit window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CompletionWindow {
    /// Tasks that reached [`TaskStatus::Done`] inside the window.
    pub completed: usize,
    /// Tasks touched by any commit inside the window.
    pub touched: usize,
}

/// Counts distinct tasks completed and touched by `commits` since
/// `since`. A task counts as completed when any windowed commit moved it
/// to done, even if it was reopened later.
#[must_use]
pub fn completion_window(commits: &[TaskCommit], since: DateTime<Utc>) -> CompletionWindow {
    let mut touched = BTreeSet::new();
    let mut completed = BTreeSet::new();
    for commit in commits.iter().filter(|commit| commit.created_at() >= since) {
        touched.insert(commit.task_id());
        if commit.to_status() == Some(TaskStatus::Done) {
            completed.insert(commit.task_id());
        }
    }
    CompletionWindow {
        completed: completed.len(),
        touched: touched.len(),
    }
}

/// Unfinished tasks bucketed by how soon their deadline falls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeadlineHorizon {
    /// Deadline falls on the current calendar day.
    pub due_today: usize,
    /// Deadline falls after today but within the next seven days.
    pub due_this_week: usize,
    /// Deadline falls after the next seven days but within thirty.
    pub due_this_month: usize,
}

/// Buckets unfinished tasks by deadline distance from `now`. Tasks
/// without a deadline, already-done tasks, and deadlines beyond thirty
/// days are ignored.
#[must_use]
pub fn deadline_horizon(tasks: &[Task], now: DateTime<Utc>) -> DeadlineHorizon {
    let today = now.date_naive();
    let week_end = now + Duration::days(7);
    let month_end = now + Duration::days(30);
    let mut horizon = DeadlineHorizon::default();
    for task in tasks.iter().filter(|task| task.status().awaits_completion()) {
        let Some(deadline) = task.deadline() else {
            continue;
        };
        if deadline.date_naive() == today {
            horizon.due_today += 1;
        } else if deadline > now && deadline <= week_end {
            horizon.due_this_week += 1;
        } else if deadline > week_end && deadline <= month_end {
            horizon.due_this_month += 1;
        }
    }
    horizon
}

/// Returns up to `limit` unfinished tasks whose deadline falls within
/// the next seven days, soonest first.
#[must_use]
pub fn upcoming_deadlines(tasks: &[Task], now: DateTime<Utc>, limit: usize) -> Vec<Task> {
    let week_end = now + Duration::days(7);
    let mut upcoming: Vec<Task> = tasks
        .iter()
        .filter(|task| task.status().awaits_completion())
        .filter(|task| {
            task.deadline()
                .is_some_and(|deadline| deadline > now && deadline <= week_end)
        })
        .cloned()
        .collect();
    upcoming.sort_by_key(|task| (task.deadline(), task.id()));
    upcoming.truncate(limit);
    upcoming
}

/// Headline workload counts for a team.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TeamMetrics {
    /// Tasks still pending or in progress.
    pub open_tasks: usize,
    /// Tasks past their deadline and not done.
    pub overdue_tasks: usize,
    /// Completion counts over the reporting window.
    pub completion: CompletionWindow,
}

/// Everything a supervisor dashboard needs in one pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamOverview {
    /// Status and kind tallies over the visible tasks.
    pub summary: TaskSummary,
    /// Headline workload counts.
    pub metrics: TeamMetrics,
    /// Per-member workload, one entry per scope member.
    pub load: Vec<TeamMemberLoad>,
    /// Deadline pressure buckets.
    pub horizon: DeadlineHorizon,
    /// Unfinished tasks due within seven days, soonest first.
    pub upcoming: Vec<Task>,
}
