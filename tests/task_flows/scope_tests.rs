//! Target resolution and per-role visibility across company boundaries.

use eyre::ensure;
use rstest::rstest;

use gantt::org::domain::{Actor, Role};
use gantt::org::ports::DirectoryResult;
use gantt::org::services::TargetSelection;
use gantt::task::domain::{Task, TaskPatch, VisibilityScope};
use gantt::task::services::{CreateDirectedTask, CreatePersonalTask, TaskServiceError};

use super::helpers::{FlowRig, rig};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn area_selections_resolve_inside_the_callers_scope(
    rig: DirectoryResult<FlowRig>,
) -> eyre::Result<()> {
    let rig = rig?;

    let selection = TargetSelection::new()
        .with_area(rig.area)
        .with_users([rig.outsider]);
    let resolved = rig
        .service
        .resolve_targets(&rig.supervisor_actor(), &selection)
        .await?;
    ensure!(resolved.len() == 3);
    ensure!(resolved.contains(rig.supervisor));
    ensure!(resolved.contains(rig.member));
    ensure!(resolved.contains(rig.teammate));
    ensure!(
        !resolved.contains(rig.outsider),
        "users outside the caller's area never resolve"
    );

    let task = rig
        .service
        .create_directed_task(
            &rig.supervisor_actor(),
            CreateDirectedTask::new("Area sweep", selection),
        )
        .await?;
    ensure!(task.assignees().len() == 3);
    ensure!(!task.is_assigned_to(rig.outsider));

    let result = rig
        .service
        .create_directed_task(
            &rig.supervisor_actor(),
            CreateDirectedTask::new(
                "Unreachable",
                TargetSelection::new().with_users([rig.outsider]),
            ),
        )
        .await;
    ensure!(matches!(result, Err(TaskServiceError::NoValidTargets)));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn personal_visibility_never_widens_past_the_supervisor(
    rig: DirectoryResult<FlowRig>,
) -> eyre::Result<()> {
    let rig = rig?;

    let task = rig
        .service
        .create_personal_task(&rig.member_actor(), CreatePersonalTask::new("Journal"))
        .await?;
    ensure!(task.visibility_scope() == VisibilityScope::Private);

    for too_wide in [VisibilityScope::Area, VisibilityScope::Org] {
        let result = rig
            .service
            .patch_task(
                &rig.member_actor(),
                task.id(),
                TaskPatch::new().with_visibility(too_wide),
                None,
            )
            .await;
        ensure!(
            matches!(result, Err(TaskServiceError::Validation(_))),
            "personal tasks must reject {too_wide} visibility"
        );
    }

    let shared = rig
        .service
        .patch_task(
            &rig.member_actor(),
            task.id(),
            TaskPatch::new().with_visibility(VisibilityScope::Supervisor),
            None,
        )
        .await?;
    ensure!(shared.visibility_scope() == VisibilityScope::Supervisor);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listings_follow_reporting_lines_and_stop_at_company_borders(
    rig: DirectoryResult<FlowRig>,
) -> eyre::Result<()> {
    let rig = rig?;

    let private_journal = rig
        .service
        .create_personal_task(&rig.member_actor(), CreatePersonalTask::new("Private notes"))
        .await?;
    let shared_journal = rig
        .service
        .create_personal_task(
            &rig.member_actor(),
            CreatePersonalTask::new("Shared notes")
                .with_visibility(VisibilityScope::Supervisor),
        )
        .await?;
    let directed = rig
        .service
        .create_directed_task(
            &rig.supervisor_actor(),
            CreateDirectedTask::new(
                "Team push",
                TargetSelection::new().with_users([rig.member, rig.teammate]),
            ),
        )
        .await?;
    let unrelated = rig
        .service
        .create_personal_task(&rig.outsider_actor(), CreatePersonalTask::new("Elsewhere"))
        .await?;

    let admin_ids: Vec<_> = rig
        .service
        .list_visible_tasks(&rig.admin_actor())
        .await?
        .iter()
        .map(Task::id)
        .collect();
    ensure!(admin_ids.contains(&directed.id()));
    ensure!(
        admin_ids.contains(&shared_journal.id()),
        "shared personal work of the reporting chain is admin-visible"
    );
    ensure!(
        !admin_ids.contains(&private_journal.id()),
        "private personal work stays private, reporting lines or not"
    );
    ensure!(!admin_ids.contains(&unrelated.id()));

    let supervisor_ids: Vec<_> = rig
        .service
        .list_visible_tasks(&rig.supervisor_actor())
        .await?
        .iter()
        .map(Task::id)
        .collect();
    ensure!(supervisor_ids.contains(&directed.id()));
    ensure!(supervisor_ids.contains(&shared_journal.id()));
    ensure!(!supervisor_ids.contains(&private_journal.id()));

    let foreign_view = rig
        .service
        .list_visible_tasks(&rig.foreign_admin_actor())
        .await?;
    ensure!(foreign_view.is_empty());
    let probe = rig
        .service
        .commit_history(&rig.foreign_admin_actor(), directed.id())
        .await;
    ensure!(matches!(probe, Err(TaskServiceError::TaskNotFound(_))));

    let root_view = rig.service.list_visible_tasks(&rig.root_actor()).await?;
    ensure!(root_view.len() == 4);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn supervisors_without_an_area_are_refused_members_are_not(
    rig: DirectoryResult<FlowRig>,
) -> eyre::Result<()> {
    let rig = rig?;

    let task = rig
        .service
        .create_personal_task(&rig.member_actor(), CreatePersonalTask::new("Own notes"))
        .await?;

    let unconfigured_supervisor = Actor::new(rig.supervisor, Role::Supervisor, rig.company);
    let result = rig
        .service
        .list_visible_tasks(&unconfigured_supervisor)
        .await;
    ensure!(matches!(
        result,
        Err(TaskServiceError::ScopeConfiguration(_))
    ));

    let unconfigured_member = Actor::new(rig.member, Role::User, rig.company);
    let listed = rig.service.list_visible_tasks(&unconfigured_member).await?;
    ensure!(
        listed.iter().any(|entry| entry.id() == task.id()),
        "members list their own work without any area configured"
    );
    Ok(())
}
