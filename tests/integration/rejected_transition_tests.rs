//! Rejected operations leave aggregates and their timestamps untouched.

use atelier::{
    decision::domain::{Decision, DecisionCategory, DecisionImpact, NewDecision},
    employee::domain::{AgentType, Employee, SeniorityLevel},
    entity::{EmployeeId, Entity, TaskId},
    task::domain::Task,
};
use chrono::{DateTime, Duration, Local, Utc};
use eyre::ensure;
use mockable::{Clock, DefaultClock};
use rstest::rstest;

/// Clock pinned an hour ahead, so any touch would move `updated_at`.
struct LaterClock(DateTime<Utc>);

impl LaterClock {
    fn new() -> Self {
        Self(Utc::now() + Duration::hours(1))
    }
}

impl Clock for LaterClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

#[derive(Debug, Clone, Copy)]
enum Rejection {
    MarkReadyIncomplete,
    AcceptOpenTask,
    MarkDoneReadyTask,
    SecondWorkerAccepts,
    ReverseIrreversible,
    ReverseTwice,
    PromoteToSameLevel,
    PromoteToLowerLevel,
    AssignWhileBusy,
    CompleteWithoutTask,
}

fn ensure_untouched<T, E>(before: &T, after: &T, outcome: Result<(), E>) -> eyre::Result<()>
where
    T: Entity + PartialEq,
{
    ensure!(outcome.is_err(), "operation should be rejected");
    ensure!(
        after.header().updated_at() == before.header().updated_at(),
        "updated_at moved on a rejected operation"
    );
    ensure!(after == before, "aggregate changed on a rejected operation");
    Ok(())
}

fn worker(raw: &str) -> eyre::Result<EmployeeId> {
    Ok(EmployeeId::parse(raw)?)
}

fn ready_task() -> eyre::Result<Task> {
    let clock = DefaultClock;
    let mut task = Task::new("# build X", &clock)?;
    task.set_title("Build X", &clock)?;
    task.set_description("desc", &clock)?;
    task.set_requirements(vec!["r1".to_owned()], &clock)?;
    task.mark_ready(&clock)?;
    Ok(task)
}

fn decision(reversible: bool) -> eyre::Result<Decision> {
    let data = NewDecision {
        title: "Adopt event sourcing".to_owned(),
        context: "Audit requirements".to_owned(),
        decision: "Store events".to_owned(),
        rationale: "Replayable history".to_owned(),
        consequences: None,
        alternatives: Vec::new(),
        impact: DecisionImpact::High,
        category: DecisionCategory::Architectural,
        reversible,
        session_id: None,
        repo_id: None,
        project_id: None,
        made_by_id: worker("emp-1")?,
    };
    Ok(Decision::new(data, &DefaultClock)?)
}

fn employee(level: SeniorityLevel) -> eyre::Result<Employee> {
    Ok(Employee::new("Ada", AgentType::Claude, level, &DefaultClock)?)
}

fn attempt_on_task(rejection: Rejection, later: &LaterClock) -> eyre::Result<()> {
    let mut task = match rejection {
        Rejection::MarkReadyIncomplete | Rejection::AcceptOpenTask => {
            Task::new("something vague", &DefaultClock)?
        }
        Rejection::SecondWorkerAccepts => {
            let mut accepted = ready_task()?;
            accepted.accept(worker("emp-1")?, &DefaultClock)?;
            accepted
        }
        _ => ready_task()?,
    };
    let state = task.state();
    let before = task.clone();

    let outcome = match rejection {
        Rejection::MarkReadyIncomplete => task.mark_ready(later),
        Rejection::AcceptOpenTask | Rejection::SecondWorkerAccepts => {
            task.accept(worker("emp-2")?, later)
        }
        _ => task.mark_done(later),
    };

    ensure!(task.state() == state);
    ensure_untouched(&before, &task, outcome)
}

fn attempt_on_decision(rejection: Rejection, later: &LaterClock) -> eyre::Result<()> {
    let mut record = match rejection {
        Rejection::ReverseTwice => {
            let mut reversed = decision(true)?;
            reversed.reverse(worker("emp-1")?, &DefaultClock)?;
            reversed
        }
        _ => decision(false)?,
    };
    let before = record.clone();

    let outcome = record.reverse(worker("emp-2")?, later);

    ensure!(record.reversed_by() == before.reversed_by());
    ensure_untouched(&before, &record, outcome)
}

fn attempt_on_employee(rejection: Rejection, later: &LaterClock) -> eyre::Result<()> {
    let mut hired = employee(SeniorityLevel::Mid)?;
    if matches!(rejection, Rejection::AssignWhileBusy) {
        hired.assign_task(TaskId::parse("t1")?, &DefaultClock)?;
    }
    let before = hired.clone();

    let outcome = match rejection {
        Rejection::PromoteToSameLevel => hired.promote(SeniorityLevel::Mid, later),
        Rejection::PromoteToLowerLevel => hired.promote(SeniorityLevel::Junior, later),
        Rejection::AssignWhileBusy => hired.assign_task(TaskId::parse("t2")?, later),
        _ => hired.complete_task(later).map(|_| ()),
    };

    ensure!(hired.seniority() == SeniorityLevel::Mid);
    ensure_untouched(&before, &hired, outcome)
}

#[rstest]
#[case::mark_ready_incomplete(Rejection::MarkReadyIncomplete)]
#[case::accept_open_task(Rejection::AcceptOpenTask)]
#[case::mark_done_ready_task(Rejection::MarkDoneReadyTask)]
#[case::second_worker_accepts(Rejection::SecondWorkerAccepts)]
#[case::reverse_irreversible(Rejection::ReverseIrreversible)]
#[case::reverse_twice(Rejection::ReverseTwice)]
#[case::promote_to_same_level(Rejection::PromoteToSameLevel)]
#[case::promote_to_lower_level(Rejection::PromoteToLowerLevel)]
#[case::assign_while_busy(Rejection::AssignWhileBusy)]
#[case::complete_without_task(Rejection::CompleteWithoutTask)]
fn rejected_operations_leave_aggregate_untouched(#[case] rejection: Rejection) -> eyre::Result<()> {
    let later = LaterClock::new();
    match rejection {
        Rejection::MarkReadyIncomplete
        | Rejection::AcceptOpenTask
        | Rejection::MarkDoneReadyTask
        | Rejection::SecondWorkerAccepts => attempt_on_task(rejection, &later),
        Rejection::ReverseIrreversible | Rejection::ReverseTwice => {
            attempt_on_decision(rejection, &later)
        }
        Rejection::PromoteToSameLevel
        | Rejection::PromoteToLowerLevel
        | Rejection::AssignWhileBusy
        | Rejection::CompleteWithoutTask => attempt_on_employee(rejection, &later),
    }
}
