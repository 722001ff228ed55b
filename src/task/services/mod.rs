//! Application services for the task context.

mod error;
mod insights;
mod kanban;
mod policy;
mod service;

pub use error::{TaskServiceError, TaskServiceResult};
pub use insights::{
    CompletionWindow, DeadlineHorizon, TaskSummary, TeamMemberLoad, TeamMetrics, TeamOverview,
    completion_window, deadline_horizon, team_load, upcoming_deadlines,
};
pub use kanban::{KanbanBoard, project_board};
pub use policy::TaskPolicy;
pub use service::{CreateDirectedTask, CreatePersonalTask, TaskService};
