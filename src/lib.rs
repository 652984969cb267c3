//! Atelier: domain core for autonomous engineering teams.
//!
//! This crate models agent "employees" working on software projects. Tasks
//! move through a guarded lifecycle, decisions are recorded and may be
//! reversed once, and employees hold at most one active task while climbing
//! a fixed seniority ladder.
//!
//! # Architecture
//!
//! Atelier follows hexagonal architecture principles:
//!
//! - **Domain**: Aggregates and their transition rules, free of storage
//! - **Ports**: The generic [`repository::ports::Repository`] contract
//! - **Adapters**: [`repository::adapters::memory::InMemoryRepository`]
//! - **Services**: Orchestration that loads, mutates, and persists aggregates
//!
//! # Modules
//!
//! - [`entity`]: Identity, timestamps, and the [`entity::Entity`] trait
//! - [`repository`]: Persistence ports, criteria, and pagination
//! - [`service`]: Coded service results for boundary layers
//! - [`config`]: Repository and radar defaults
//! - [`task`]: Task lifecycle from raw request to completion
//! - [`decision`]: Decision log, reversal, and impact ranking
//! - [`employee`]: Employees, seniority, and task assignment
//! - [`project`]: Projects and their repositories
//! - [`repo`]: Source repositories and their leads

pub mod config;
pub mod decision;
pub mod employee;
pub mod entity;
pub mod project;
pub mod repo;
pub mod repository;
pub mod service;
pub mod task;
