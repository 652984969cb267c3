//! Then steps for staffing BDD scenarios.

use super::world::{StaffingWorld, run_async};
use atelier::{
    employee::domain::{Employee, SeniorityLevel},
    task::domain::TaskState,
};
use rstest_bdd_macros::then;

fn stored_employee(world: &StaffingWorld) -> Result<Employee, eyre::Report> {
    let id = world.employee_id()?;
    run_async(world.staffing.find_by_id(&id))?
        .ok_or_else(|| eyre::eyre!("employee missing from store"))
}

#[then(r#"the employee level is "{level}""#)]
fn employee_level_is(world: &StaffingWorld, level: String) -> Result<(), eyre::Report> {
    let expected = SeniorityLevel::try_from(level.as_str())?;
    let employee = stored_employee(world)?;
    if employee.seniority() != expected {
        return Err(eyre::eyre!(
            "expected level {expected}, found {}",
            employee.seniority()
        ));
    }
    Ok(())
}

#[then(r#"the operation fails with code "{code}""#)]
fn operation_fails_with_code(world: &StaffingWorld, code: String) -> Result<(), eyre::Report> {
    let response = world
        .last_response
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing operation response"))?;

    match response.code() {
        Some(actual) if actual.as_str() == code => Ok(()),
        other => Err(eyre::eyre!("expected failure code {code}, got {other:?}")),
    }
}

#[then(r#"the employee is working on "{task}""#)]
fn employee_working_on(world: &StaffingWorld, task: String) -> Result<(), eyre::Report> {
    let expected = world.task_id(&task)?;
    let employee = stored_employee(world)?;
    if employee.active_task_id() != Some(&expected) {
        return Err(eyre::eyre!(
            "expected active task {expected}, found {:?}",
            employee.active_task_id()
        ));
    }
    Ok(())
}

#[then(r#"task "{task}" is in state "{state}""#)]
fn task_in_state(world: &StaffingWorld, task: String, state: String) -> Result<(), eyre::Report> {
    let expected = TaskState::try_from(state.as_str())
        .map_err(|err| eyre::eyre!("invalid expected state in scenario: {err}"))?;
    let id = world.task_id(&task)?;
    let stored = run_async(world.tasks.find_by_id(&id))?
        .ok_or_else(|| eyre::eyre!("task {task} missing from store"))?;
    if stored.state() != expected {
        return Err(eyre::eyre!(
            "expected task {task} in {expected}, found {}",
            stored.state()
        ));
    }
    Ok(())
}
