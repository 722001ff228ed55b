//! Domain model for tasks, their commit history, and read visibility.

mod chain;
mod changes;
mod commit;
mod digest;
mod error;
mod ids;
mod patch;
mod project;
mod snapshot;
mod task;
mod visibility;

pub use chain::{ChainError, verify_chain, verify_commit};
pub use changes::ChangeSet;
pub use commit::{CommitDraft, CommitError, CommitHash, PersistedCommitData, TaskCommit};
pub use digest::{CommitContent, commit_digest};
pub use error::{
    ParseTaskPriorityError, ParseTaskStatusError, ParseVisibilityScopeError, TaskDomainError,
};
pub use ids::{CommitId, ProjectId, TaskId};
pub use patch::{FieldUpdate, TaskPatch};
pub use project::{ProjectRef, ProjectStatus};
pub use snapshot::{SNAPSHOT_VERSION, TaskSnapshot};
pub use task::{NewTaskData, PersistedTaskData, Task, TaskPriority, TaskStatus, VisibilityScope};
pub use visibility::task_visible;
