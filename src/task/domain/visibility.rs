//! Read authorization for tasks.

use crate::org::domain::ViewerScope;

use super::task::{Task, VisibilityScope};

/// Decides whether a viewer may read `task`.
///
/// Callers are expected to have already restricted candidates to the
/// viewer's company; this predicate only applies role rules within it:
///
/// * unrestricted viewers read everything,
/// * admins read what they created, directed tasks assigned inside their
///   chain, and personal tasks of chain members that are shared beyond
///   private,
/// * supervisors read what they created, what they are assigned, and
///   personal tasks of area members shared at `supervisor` visibility,
/// * everyone else reads only what they created or are assigned.
///
/// A private personal task is never readable by anyone but its creator
/// and assignees, whatever the viewer's role.
#[must_use]
pub fn task_visible(task: &Task, scope: &ViewerScope) -> bool {
    match scope {
        ViewerScope::Unrestricted => true,
        ViewerScope::AdminChain { viewer, chain } => {
            task.creator_id() == *viewer
                || (!task.is_personal() && chain.intersects(task.assignees()))
                || (task.is_personal()
                    && task.visibility_scope() != VisibilityScope::Private
                    && chain.intersects(task.assignees()))
        }
        ViewerScope::AreaSupervisor {
            viewer,
            area_members,
        } => {
            task.creator_id() == *viewer
                || task.is_assigned_to(*viewer)
                || (task.is_personal()
                    && task.visibility_scope() == VisibilityScope::Supervisor
                    && area_members.intersects(task.assignees()))
        }
        ViewerScope::SelfOnly { viewer } => {
            task.creator_id() == *viewer || task.is_assigned_to(*viewer)
        }
    }
}
