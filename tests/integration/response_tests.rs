//! Boundary responses built from service results.

use super::helpers::{Workspace, ready_refinement, workspace};
use atelier::{
    employee::{domain::SeniorityLevel, services::HireEmployeeRequest},
    entity::TaskId,
    service::{ErrorCode, ServiceResponse},
    task::{domain::Task, services::CreateTaskRequest},
};
use eyre::ensure;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn success_wraps_serialised_entity(workspace: Workspace) -> eyre::Result<()> {
    let response: ServiceResponse<Task> = workspace
        .tasks
        .create_task(CreateTaskRequest::new("# build X"))
        .await
        .into();

    let json = serde_json::to_value(&response)?;

    ensure!(response.is_success());
    ensure!(json["success"] == json!(true));
    ensure!(json["data"]["rawTask"] == json!("# build X"));
    ensure!(json["data"]["state"] == json!("open"));
    ensure!(json.get("code").is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_transition_reports_state_code(workspace: Workspace) -> eyre::Result<()> {
    let task = workspace
        .tasks
        .create_task(CreateTaskRequest::new("# build X"))
        .await?;

    let response: ServiceResponse<Task> = workspace.tasks.mark_done(task.id()).await.into();
    let json = serde_json::to_value(&response)?;

    ensure!(response.code() == Some(ErrorCode::InvalidStateTransition));
    ensure!(json["success"] == json!(false));
    ensure!(json["code"] == json!("INVALID_STATE_TRANSITION"));
    ensure!(json.get("data").is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_task_reports_not_found(workspace: Workspace) -> eyre::Result<()> {
    let response: ServiceResponse<Task> = workspace
        .tasks
        .refine_task(&TaskId::new(), ready_refinement())
        .await
        .into();

    ensure!(response.code() == Some(ErrorCode::NotFound));
    ensure!(response.error().is_some_and(|message| message.contains("not found")));
    Ok(())
}

#[rstest]
#[case("Mid", "senior", true)]
#[case("mid", "mid", false)]
#[case("mid", "junior", false)]
#[tokio::test(flavor = "multi_thread")]
async fn promotion_responses_follow_rank(
    workspace: Workspace,
    #[case] from: &str,
    #[case] to: &str,
    #[case] promoted: bool,
) -> eyre::Result<()> {
    let hired = workspace
        .staffing
        .hire(HireEmployeeRequest::new("Ada", "claude").with_seniority(from))
        .await?;
    let level = SeniorityLevel::try_from(to)?;

    let response = ServiceResponse::from(workspace.staffing.promote(hired.id(), level).await);

    ensure!(response.is_success() == promoted);
    if promoted {
        ensure!(response.data().map(|employee| employee.seniority()) == Some(level));
    } else {
        ensure!(response.code() == Some(ErrorCode::ValidationFailed));
        let stored = workspace.staffing.find_by_id(hired.id()).await?;
        ensure!(stored.map(|employee| employee.seniority()) == Some(SeniorityLevel::Mid));
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blank_input_reports_validation_code(workspace: Workspace) -> eyre::Result<()> {
    let response = ServiceResponse::from(
        workspace
            .staffing
            .hire(HireEmployeeRequest::new("  ", "claude"))
            .await,
    );

    ensure!(response.code() == Some(ErrorCode::ValidationFailed));
    Ok(())
}
