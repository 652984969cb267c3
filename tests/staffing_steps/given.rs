//! Given steps for staffing BDD scenarios.

use super::world::{StaffingWorld, run_async};
use atelier::{
    employee::services::HireEmployeeRequest,
    task::services::{CreateTaskRequest, RefineTaskRequest},
};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"an employee "{name}" hired at level "{level}""#)]
fn employee_hired(
    world: &mut StaffingWorld,
    name: String,
    level: String,
) -> Result<(), eyre::Report> {
    let request = HireEmployeeRequest::new(name, "claude").with_seniority(level);
    let hired = run_async(world.staffing.hire(request)).wrap_err("hire employee for scenario")?;
    world.employee_id = Some(hired.id().clone());
    Ok(())
}

#[given(r#"ready tasks "{first}" and "{second}""#)]
fn ready_tasks(
    world: &mut StaffingWorld,
    first: String,
    second: String,
) -> Result<(), eyre::Report> {
    for name in [first, second] {
        let task = run_async(world.tasks.create_task(CreateTaskRequest::new(name.clone())))
            .wrap_err("create task for scenario")?;
        let refinement = RefineTaskRequest::new()
            .with_title(name.clone())
            .with_description("scenario task")
            .with_requirements(["done when green".to_owned()]);
        run_async(world.tasks.refine_task(task.id(), refinement)).wrap_err("refine task")?;
        run_async(world.tasks.mark_ready(task.id())).wrap_err("mark task ready")?;
        world.task_ids.insert(name, task.id().clone());
    }
    Ok(())
}
