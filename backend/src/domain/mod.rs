//! # Domain Module
//!
//! Business rules of the chore tracker, independent of HTTP.
//!
//! ## Module Organization
//!
//! - **models**: Kids, chore definitions, extra tasks, ledger records, settings, progress
//! - **progress**: Pure evaluation of a kid's day and week from active sets and ledger rows
//! - **completion_service**: Mark, unmark and toggle with before/after progress bracketing
//! - **progress_service**: Loads inputs for the progress engine and builds status views
//! - **kid_service**, **chore_service**, **extra_task_service**, **setting_service**: Entity CRUD
//! - **kid_locks**: Per-kid mutual exclusion for ledger and point updates
//!
//! ## Business Rules
//!
//! - A task set is complete only when it is non-empty and every active member is done
//! - Completing every active extra task for a day earns one point; undoing it takes the point back
//! - Points change only through those transitions and the manual award
//! - Chores and extra tasks are deactivated, never deleted

pub mod chore_service;
pub mod commands;
pub mod completion_service;
pub mod extra_task_service;
pub mod kid_locks;
pub mod kid_service;
pub mod models;
pub mod progress;
pub mod progress_service;
pub mod setting_service;
pub mod validation;

pub use chore_service::ChoreService;
pub use completion_service::CompletionService;
pub use extra_task_service::ExtraTaskService;
pub use kid_locks::KidLocks;
pub use kid_service::KidService;
pub use progress_service::ProgressService;
pub use setting_service::SettingService;
