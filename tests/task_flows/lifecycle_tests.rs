//! Directed and personal tasks moving through the full board.

use eyre::{bail, ensure};
use rstest::rstest;

use gantt::org::ports::DirectoryResult;
use gantt::org::services::TargetSelection;
use gantt::task::domain::{TaskPatch, TaskPriority, TaskStatus, VisibilityScope};
use gantt::task::ports::AuditAction;
use gantt::task::services::{CreateDirectedTask, CreatePersonalTask};

use super::helpers::{FlowRig, rig};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_directed_task_crosses_the_board_commit_by_commit(
    rig: DirectoryResult<FlowRig>,
) -> eyre::Result<()> {
    let rig = rig?;

    let task = rig
        .service
        .create_directed_task(
            &rig.supervisor_actor(),
            CreateDirectedTask::new(
                "Ship the quarterly report",
                TargetSelection::new().with_users([rig.member, rig.teammate]),
            )
            .with_description("Numbers from finance land on Monday.")
            .with_priority(TaskPriority::High),
        )
        .await?;
    ensure!(task.status() == TaskStatus::Pending);
    ensure!(task.visibility_scope() == VisibilityScope::Org);

    rig.service
        .update_status(&rig.member_actor(), task.id(), "in_progress", None)
        .await?;
    rig.service
        .update_status(&rig.teammate_actor(), task.id(), "review", None)
        .await?;
    let finished = rig
        .service
        .update_status(
            &rig.supervisor_actor(),
            task.id(),
            "done",
            Some("numbers confirmed".to_owned()),
        )
        .await?;
    ensure!(finished.status() == TaskStatus::Done);

    let history = rig
        .service
        .commit_history(&rig.supervisor_actor(), task.id())
        .await?;
    let [closed, reviewed, started, genesis] = history.as_slice() else {
        bail!("expected four commits, got {}", history.len());
    };
    ensure!(genesis.parent_hash().is_none());
    ensure!(started.from_status() == Some(TaskStatus::Pending));
    ensure!(reviewed.from_status() == Some(TaskStatus::InProgress));
    ensure!(closed.from_status() == Some(TaskStatus::Review));
    ensure!(closed.to_status() == Some(TaskStatus::Done));
    ensure!(closed.message() == "numbers confirmed");

    rig.service
        .verify_history(&rig.supervisor_actor(), task.id())
        .await?;

    let actions: Vec<AuditAction> = rig
        .audit
        .events()?
        .iter()
        .map(|event| event.action)
        .collect();
    ensure!(
        actions
            == vec![
                AuditAction::DirectedCreated,
                AuditAction::StatusChanged,
                AuditAction::StatusChanged,
                AuditAction::StatusChanged,
            ]
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_personal_journal_survives_edits_and_comes_back_on_revert(
    rig: DirectoryResult<FlowRig>,
) -> eyre::Result<()> {
    let rig = rig?;

    let task = rig
        .service
        .create_personal_task(
            &rig.member_actor(),
            CreatePersonalTask::new("Field notes").with_description("seed ideas"),
        )
        .await?;

    rig.service
        .patch_task(
            &rig.member_actor(),
            task.id(),
            TaskPatch::new()
                .with_title("Field notes, week two")
                .with_priority(TaskPriority::High),
            Some("sharpen title".to_owned()),
        )
        .await?;
    rig.service
        .patch_task(
            &rig.member_actor(),
            task.id(),
            TaskPatch::new().clear_description(),
            None,
        )
        .await?;

    let history = rig
        .service
        .commit_history(&rig.member_actor(), task.id())
        .await?;
    let Some(genesis) = history.last() else {
        bail!("expected a genesis commit");
    };
    let genesis_hash = genesis.hash().clone();

    let restored = rig
        .service
        .revert_to_commit(&rig.member_actor(), task.id(), &genesis_hash, None)
        .await?;
    ensure!(restored.title() == "Field notes");
    ensure!(restored.description() == Some("seed ideas"));
    ensure!(restored.status() == TaskStatus::Pending);
    ensure!(
        restored.priority() == TaskPriority::High,
        "reverting restores content and workflow, not priority"
    );

    let history = rig
        .service
        .commit_history(&rig.member_actor(), task.id())
        .await?;
    ensure!(history.len() == 4);
    rig.service
        .verify_history(&rig.member_actor(), task.id())
        .await?;

    let board = rig.service.kanban_board(&rig.member_actor()).await?;
    ensure!(board.pending.iter().any(|entry| entry.id() == task.id()));

    let events = rig.audit.events()?;
    let updates = events
        .iter()
        .filter(|event| event.action == AuditAction::TaskUpdated)
        .count();
    ensure!(updates == 2);
    ensure!(
        events
            .iter()
            .any(|event| event.action == AuditAction::TaskReverted
                && event.detail.as_deref() == Some(genesis_hash.as_str()))
    );
    Ok(())
}
