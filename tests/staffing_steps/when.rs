//! When steps for staffing BDD scenarios.

use super::world::{StaffingWorld, run_async};
use atelier::employee::domain::SeniorityLevel;
use rstest_bdd_macros::when;

#[when(r#"the employee is promoted to "{level}""#)]
fn promote(world: &mut StaffingWorld, level: String) -> Result<(), eyre::Report> {
    let id = world.employee_id()?;
    let target = SeniorityLevel::try_from(level.as_str())?;
    let result = run_async(world.staffing.promote(&id, target));
    world.record(result);
    Ok(())
}

#[when(r#"the employee starts task "{task}""#)]
fn start_task(world: &mut StaffingWorld, task: String) -> Result<(), eyre::Report> {
    let employee_id = world.employee_id()?;
    let task_id = world.task_id(&task)?;
    let result = run_async(world.staffing.start_task(&employee_id, &task_id));
    world.record(result);
    Ok(())
}

#[when("the employee finishes the active task")]
fn finish_task(world: &mut StaffingWorld) -> Result<(), eyre::Report> {
    let employee_id = world.employee_id()?;
    let result = run_async(world.staffing.finish_task(&employee_id));
    world.record(result);
    Ok(())
}
