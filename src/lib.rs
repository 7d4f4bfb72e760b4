//! Mentorship: lifecycle core for a mentor-led learning programme.
//!
//! Mentors assign tasks to students, students submit work, mentors review the
//! submissions, and mentors may issue behavioural warnings that students must
//! resolve. Notifications connect these events to the people they concern.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic and lifecycle transition tables
//! - **Ports**: Abstract repository traits for the durable store
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//! - **Services**: Authorization-aware orchestration of each lifecycle
//!
//! # Modules
//!
//! - [`identity`]: Credential resolution and role derivation from user IDs
//! - [`roster`]: Mentor-student links and student profiles
//! - [`catalog`]: Courses and mentor-authored task templates
//! - [`assignment`]: Task assignment, submission and review lifecycle
//! - [`warning`]: Behavioural warning issue and resolution lifecycle
//! - [`notification`]: Notification records and lifecycle fan-out
//! - [`dashboard`]: Read-only mentor and student projections
//! - [`platform`]: Wiring of every service over a single injected store

pub mod assignment;
pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod identity;
mod ids;
pub mod notification;
pub mod platform;
pub mod roster;
pub mod store;
pub mod telemetry;
pub mod warning;
