//! Project and repo integration tests.

use super::helpers::{Workspace, workspace};
use atelier::{
    employee::services::HireEmployeeRequest,
    entity::{EmployeeId, RepoId},
    project::domain::ProjectStatus,
    project::services::{CreateProjectRequest, PortfolioError},
    repo::{
        domain::RepoDomainError,
        services::{RegisterRepoRequest, RepoServiceError},
    },
    repository::ports::{Criteria, RepositoryError},
};
use eyre::ensure;
use rstest::rstest;

fn register(name: &str) -> RegisterRepoRequest {
    RegisterRepoRequest::new(
        name,
        format!("https://git.example.com/atelier/{name}.git"),
        format!("/srv/repos/{name}"),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn projects_track_registered_repos(workspace: Workspace) -> eyre::Result<()> {
    let project = workspace
        .portfolio
        .create_project(
            CreateProjectRequest::new("Atlas").with_prd("https://docs.example.com/atlas"),
        )
        .await?;
    let api = workspace.repos.register_repo(register("api")).await?;
    let web = workspace
        .repos
        .register_repo(register("web").with_default_branch("trunk"))
        .await?;

    workspace.portfolio.attach_repo(project.id(), api.id()).await?;
    let attached = workspace.portfolio.attach_repo(project.id(), web.id()).await?;
    ensure!(attached.repo_ids().len() == 2);
    ensure!(attached.status() == ProjectStatus::Planning);

    let containing = workspace
        .portfolio
        .list_projects(&Criteria::all().with_field("repoIds", web.id().to_string()))
        .await?;
    ensure!(containing.len() == 1);

    let detached = workspace.portfolio.detach_repo(project.id(), api.id()).await?;
    ensure!(!detached.repo_ids().contains(api.id()));
    let again = workspace.portfolio.detach_repo(project.id(), api.id()).await?;
    ensure!(again.repo_ids().len() == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_repo_cannot_be_attached(workspace: Workspace) -> eyre::Result<()> {
    let project = workspace
        .portfolio
        .create_project(CreateProjectRequest::new("Atlas"))
        .await?;

    let result = workspace
        .portfolio
        .attach_repo(project.id(), &RepoId::new())
        .await;

    ensure!(matches!(
        result,
        Err(PortfolioError::Repository(RepositoryError::NotFound { kind: "repo", .. }))
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn project_status_changes_are_persisted(workspace: Workspace) -> eyre::Result<()> {
    let project = workspace
        .portfolio
        .create_project(CreateProjectRequest::new("Atlas").with_status("active"))
        .await?;
    ensure!(project.is_active());

    workspace
        .portfolio
        .change_status(project.id(), ProjectStatus::OnHold)
        .await?;

    let on_hold = workspace
        .portfolio
        .list_projects(&Criteria::all().with_field("status", "on_hold"))
        .await?;
    ensure!(on_hold.len() == 1);
    ensure!(on_hold.iter().all(|stored| !stored.is_active()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn leads_are_appointed_from_hired_employees(workspace: Workspace) -> eyre::Result<()> {
    let repo = workspace.repos.register_repo(register("core")).await?;
    let architect = workspace
        .staffing
        .hire(HireEmployeeRequest::new("Ken", "claude").with_seniority("principal"))
        .await?;
    let manager = workspace
        .staffing
        .hire(HireEmployeeRequest::new("Mary", "agno"))
        .await?;

    workspace
        .repos
        .appoint_lead_architect(repo.id(), architect.id())
        .await?;
    workspace
        .repos
        .appoint_project_manager(repo.id(), manager.id())
        .await?;
    let appointed = workspace.repos.appoint_qa_lead(repo.id(), manager.id()).await?;

    ensure!(appointed.lead_architect_id() == Some(architect.id()));
    ensure!(appointed.project_manager_id() == Some(manager.id()));
    ensure!(appointed.qa_lead_id() == Some(manager.id()));

    let unknown = workspace
        .repos
        .appoint_qa_lead(repo.id(), &EmployeeId::new())
        .await;
    ensure!(matches!(
        unknown,
        Err(RepoServiceError::Repository(RepositoryError::NotFound { kind: "employee", .. }))
    ));
    Ok(())
}

#[rstest]
#[case("git.example.com/core.git")]
#[case("git@git.example.com:atelier/core.git")]
#[case("   ")]
#[tokio::test(flavor = "multi_thread")]
async fn remotes_without_scheme_are_rejected(
    workspace: Workspace,
    #[case] remote: &str,
) -> eyre::Result<()> {
    let result = workspace
        .repos
        .register_repo(RegisterRepoRequest::new("core", remote, "/srv/repos/core"))
        .await;

    ensure!(matches!(
        result,
        Err(RepoServiceError::Domain(
            RepoDomainError::InvalidRemote(_) | RepoDomainError::EmptyField("remote")
        ))
    ));
    ensure!(workspace.repos.list_repos(&Criteria::all()).await?.is_empty());
    Ok(())
}
