//! Then steps for task lifecycle BDD scenarios.

use super::world::{TaskLifecycleWorld, run_async};
use atelier::task::{
    domain::{TaskDomainError, TaskState},
    services::TaskLifecycleError,
};
use rstest_bdd_macros::then;

#[then(r#"the task state is "{state}""#)]
fn task_state_is(world: &TaskLifecycleWorld, state: String) -> Result<(), eyre::Report> {
    let expected = TaskState::try_from(state.as_str())
        .map_err(|err| eyre::eyre!("invalid expected state in scenario: {err}"))?;
    let id = world.task()?.id().clone();
    let stored = run_async(world.service.find_by_id(&id))?
        .ok_or_else(|| eyre::eyre!("task missing from store"))?;

    if stored.state() != expected {
        return Err(eyre::eyre!(
            "expected state {expected}, found {}",
            stored.state()
        ));
    }
    Ok(())
}

#[then("the task has no active worker")]
fn no_active_worker(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let task = world.task()?;
    if let Some(worker) = task.active_employee_id() {
        return Err(eyre::eyre!("expected no active worker, found {worker}"));
    }
    Ok(())
}

#[then(r#"the active worker is "{employee}""#)]
fn active_worker_is(world: &TaskLifecycleWorld, employee: String) -> Result<(), eyre::Report> {
    let task = world.task()?;
    match task.active_employee_id() {
        Some(worker) if worker.as_str() == employee => Ok(()),
        other => Err(eyre::eyre!("expected active worker {employee}, found {other:?}")),
    }
}

#[then(r#"the operation fails naming missing field "{field}""#)]
fn fails_naming_missing_field(
    world: &TaskLifecycleWorld,
    field: String,
) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing operation result"))?;

    match result {
        Err(TaskLifecycleError::Domain(TaskDomainError::MissingReadinessField {
            field: missing,
            ..
        })) if *missing == field => Ok(()),
        other => Err(eyre::eyre!(
            "expected missing field {field}, got {other:?}"
        )),
    }
}

#[then("the operation fails because the task cannot be accepted")]
fn fails_cannot_accept(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing operation result"))?;

    if !matches!(
        result,
        Err(TaskLifecycleError::Domain(TaskDomainError::CannotAccept { .. }))
    ) {
        return Err(eyre::eyre!("expected CannotAccept error, got {result:?}"));
    }
    Ok(())
}
