//! When steps for task lifecycle BDD scenarios.

use super::world::{TaskLifecycleWorld, run_async};
use atelier::entity::EmployeeId;
use rstest_bdd_macros::when;

#[when("the task is marked ready")]
fn mark_ready(world: &mut TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let id = world.task()?.id().clone();
    let result = run_async(world.service.mark_ready(&id));
    world.record(result);
    Ok(())
}

#[when(r#"employee "{employee}" accepts the task"#)]
fn accept_task(world: &mut TaskLifecycleWorld, employee: String) -> Result<(), eyre::Report> {
    let id = world.task()?.id().clone();
    let worker = EmployeeId::parse(employee)?;
    let result = run_async(world.service.accept_task(&id, worker));
    world.record(result);
    Ok(())
}

#[when("the task is marked done")]
fn mark_done(world: &mut TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let id = world.task()?.id().clone();
    let result = run_async(world.service.mark_done(&id));
    world.record(result);
    Ok(())
}

#[when("the task is closed")]
fn close_task(world: &mut TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let id = world.task()?.id().clone();
    let result = run_async(world.service.close_task(&id));
    world.record(result);
    Ok(())
}
