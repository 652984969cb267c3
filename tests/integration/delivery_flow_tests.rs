//! End-to-end task delivery through the lifecycle and staffing services.

use super::helpers::{Workspace, ready_refinement, workspace};
use atelier::{
    employee::{
        domain::{EmployeeDomainError, SeniorityLevel},
        services::{HireEmployeeRequest, StaffingError},
    },
    repository::ports::{Criteria, Repository},
    task::{
        domain::{TaskDomainError, TaskState},
        services::{CreateTaskRequest, TaskLifecycleError},
    },
};
use eyre::{bail, ensure};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_moves_from_open_to_done(workspace: Workspace) -> eyre::Result<()> {
    let created = workspace
        .tasks
        .create_task(CreateTaskRequest::new("# build X"))
        .await?;
    ensure!(created.state() == TaskState::Open);

    workspace
        .tasks
        .refine_task(created.id(), ready_refinement())
        .await?;
    let ready = workspace.tasks.mark_ready(created.id()).await?;
    ensure!(ready.state() == TaskState::Ready);

    let hired = workspace
        .staffing
        .hire(HireEmployeeRequest::new("Ada", "claude"))
        .await?;
    let started = workspace
        .staffing
        .start_task(hired.id(), created.id())
        .await?;
    ensure!(started.task.state() == TaskState::InProgress);
    ensure!(started.task.active_employee_id() == Some(hired.id()));
    ensure!(started.employee.active_task_id() == Some(created.id()));

    let finished = workspace.staffing.finish_task(hired.id()).await?;
    ensure!(finished.task.state() == TaskState::Done);
    ensure!(finished.task.active_employee_id().is_none());
    ensure!(finished.employee.active_task_id().is_none());

    let Some(stored) = workspace.task_store.find_by_id(created.id()).await? else {
        bail!("finished task should be stored");
    };
    ensure!(stored == finished.task);
    ensure!(stored.id() == created.id());
    ensure!(stored.created_at() == created.created_at());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn incomplete_task_stays_open(workspace: Workspace) -> eyre::Result<()> {
    let created = workspace
        .tasks
        .create_task(CreateTaskRequest::new("vague idea"))
        .await?;

    let result = workspace.tasks.mark_ready(created.id()).await;

    ensure!(matches!(
        result,
        Err(TaskLifecycleError::Domain(
            TaskDomainError::MissingReadinessField { .. }
        ))
    ));
    let Some(stored) = workspace.task_store.find_by_id(created.id()).await? else {
        bail!("task should still be stored");
    };
    ensure!(stored.state() == TaskState::Open);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn busy_employee_cannot_start_second_task(workspace: Workspace) -> eyre::Result<()> {
    let hired = workspace
        .staffing
        .hire(HireEmployeeRequest::new("Grace", "letta").with_seniority("senior"))
        .await?;
    let mut task_ids = Vec::new();
    for raw in ["first", "second"] {
        let task = workspace.tasks.create_task(CreateTaskRequest::new(raw)).await?;
        workspace.tasks.refine_task(task.id(), ready_refinement()).await?;
        workspace.tasks.mark_ready(task.id()).await?;
        task_ids.push(task.id().clone());
    }
    let [first, second] = task_ids.as_slice() else {
        bail!("expected two tasks");
    };
    workspace.staffing.start_task(hired.id(), first).await?;

    let result = workspace.staffing.start_task(hired.id(), second).await;

    ensure!(matches!(
        result,
        Err(StaffingError::Employee(
            EmployeeDomainError::ActiveTaskConflict { .. }
        ))
    ));
    let Some(untouched) = workspace.task_store.find_by_id(second).await? else {
        bail!("second task should be stored");
    };
    ensure!(untouched.state() == TaskState::Ready);

    workspace.staffing.finish_task(hired.id()).await?;
    let restarted = workspace.staffing.start_task(hired.id(), second).await?;
    ensure!(restarted.employee.active_task_id() == Some(second));
    ensure!(restarted.employee.seniority() == SeniorityLevel::Senior);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn subtasks_are_listed_under_their_parent(workspace: Workspace) -> eyre::Result<()> {
    let parent = workspace
        .tasks
        .create_task(CreateTaskRequest::new("ship the release"))
        .await?;
    for raw in ["write notes", "tag build"] {
        workspace
            .tasks
            .create_task(CreateTaskRequest::new(raw).with_parent(parent.id().to_string()))
            .await?;
    }

    let subtasks = workspace.tasks.list_subtasks(parent.id()).await?;
    let open = workspace
        .tasks
        .list_tasks(&Criteria::all().with_field("state", "open"))
        .await?;

    ensure!(subtasks.len() == 2);
    ensure!(
        subtasks
            .iter()
            .all(|task| task.parent_task_id() == Some(parent.id()))
    );
    ensure!(open.len() == 3);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn idle_employees_are_available(workspace: Workspace) -> eyre::Result<()> {
    let busy = workspace
        .staffing
        .hire(HireEmployeeRequest::new("Busy", "agno"))
        .await?;
    let idle = workspace
        .staffing
        .hire(HireEmployeeRequest::new("Idle", "custom"))
        .await?;
    let task = workspace.tasks.create_task(CreateTaskRequest::new("job")).await?;
    workspace.tasks.refine_task(task.id(), ready_refinement()).await?;
    workspace.tasks.mark_ready(task.id()).await?;
    workspace.staffing.start_task(busy.id(), task.id()).await?;

    let available = workspace.staffing.list_available().await?;

    ensure!(available.len() == 1);
    ensure!(available.iter().all(|employee| employee.id() == idle.id()));
    ensure!(
        workspace
            .employee_store
            .count(&Criteria::all())
            .await?
            == 2
    );
    Ok(())
}
