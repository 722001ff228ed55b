//! Commit chain linkage, isolation, and verification.

use eyre::{bail, ensure};
use rstest::rstest;

use gantt::org::ports::DirectoryResult;
use gantt::task::domain::{TaskId, TaskPatch, TaskStatus};
use gantt::task::services::{CreatePersonalTask, TaskServiceError};

use super::helpers::{FlowRig, rig};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn revert_appends_while_earlier_commits_stand(
    rig: DirectoryResult<FlowRig>,
) -> eyre::Result<()> {
    let rig = rig?;

    let task = rig
        .service
        .create_personal_task(
            &rig.member_actor(),
            CreatePersonalTask::new("Draft").with_description("first cut"),
        )
        .await?;
    rig.service
        .patch_task(
            &rig.member_actor(),
            task.id(),
            TaskPatch::new().with_title("Draft, revised"),
            None,
        )
        .await?;

    let before = rig
        .service
        .commit_history(&rig.member_actor(), task.id())
        .await?;
    let [second, genesis] = before.as_slice() else {
        bail!("expected two commits, got {}", before.len());
    };
    let genesis_hash = genesis.hash().clone();
    let second_hash = second.hash().clone();
    let genesis_snapshot = genesis.snapshot().clone();

    rig.service
        .revert_to_commit(&rig.member_actor(), task.id(), &genesis_hash, None)
        .await?;

    let after = rig
        .service
        .commit_history(&rig.member_actor(), task.id())
        .await?;
    let [revert, second_after, genesis_after] = after.as_slice() else {
        bail!("expected three commits, got {}", after.len());
    };
    ensure!(
        genesis_after.hash() == &genesis_hash,
        "reverting rewrites nothing that came before"
    );
    ensure!(second_after.hash() == &second_hash);
    ensure!(revert.parent_hash() == Some(&second_hash));
    ensure!(
        revert.snapshot() == &genesis_snapshot,
        "the revert commit snapshots the restored state"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn histories_never_bleed_between_tasks(rig: DirectoryResult<FlowRig>) -> eyre::Result<()> {
    let rig = rig?;

    let first = rig
        .service
        .create_personal_task(&rig.member_actor(), CreatePersonalTask::new("First"))
        .await?;
    let second = rig
        .service
        .create_personal_task(&rig.member_actor(), CreatePersonalTask::new("Second"))
        .await?;
    rig.service
        .patch_task(
            &rig.member_actor(),
            first.id(),
            TaskPatch::new().with_title("First, renamed"),
            None,
        )
        .await?;

    let first_history = rig
        .service
        .commit_history(&rig.member_actor(), first.id())
        .await?;
    let second_history = rig
        .service
        .commit_history(&rig.member_actor(), second.id())
        .await?;
    ensure!(first_history.len() == 2);
    ensure!(second_history.len() == 1);
    ensure!(
        second_history
            .last()
            .is_some_and(|commit| commit.parent_hash().is_none())
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_mixed_flow_stays_linked_and_verifiable(
    rig: DirectoryResult<FlowRig>,
) -> eyre::Result<()> {
    let rig = rig?;

    let task = rig
        .service
        .create_personal_task(&rig.member_actor(), CreatePersonalTask::new("Long haul"))
        .await?;
    rig.service
        .patch_task(
            &rig.member_actor(),
            task.id(),
            TaskPatch::new().with_description("step one"),
            None,
        )
        .await?;
    rig.service
        .update_status(&rig.member_actor(), task.id(), "in_progress", None)
        .await?;

    let history = rig
        .service
        .commit_history(&rig.member_actor(), task.id())
        .await?;
    let Some(genesis) = history.last() else {
        bail!("expected a genesis commit");
    };
    let genesis_hash = genesis.hash().clone();
    rig.service
        .revert_to_commit(&rig.member_actor(), task.id(), &genesis_hash, None)
        .await?;
    let finished = rig
        .service
        .update_status(&rig.member_actor(), task.id(), "done", None)
        .await?;
    ensure!(finished.status() == TaskStatus::Done);

    let history = rig
        .service
        .commit_history(&rig.member_actor(), task.id())
        .await?;
    ensure!(history.len() == 5);
    for pair in history.windows(2) {
        if let [newer, older] = pair {
            ensure!(
                newer.parent_hash() == Some(older.hash()),
                "every commit links to the one before it"
            );
        }
    }
    rig.service
        .verify_history(&rig.member_actor(), task.id())
        .await?;

    let probe = rig
        .service
        .commit_history(&rig.member_actor(), TaskId::new())
        .await;
    ensure!(matches!(probe, Err(TaskServiceError::TaskNotFound(_))));
    Ok(())
}
