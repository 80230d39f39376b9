//! # Dashboard crate: view-controllers for the admin console
//!
//! Each dashboard tab is split into a plain controller (this crate) and a
//! Dioxus view (`ui`). Controllers hold filter, form and list state and
//! express every load and mutation against [`api::AdminBackend`], so they run
//! unchanged against the HTTP client in the browser and against an
//! in-memory backend in tests.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`session`] | [`SessionController`]: login, restore, logout, expiry on `401` |
//! | [`tabs`] | Tab registry and role-based visibility |
//! | [`overview`] | User and system counters, fetched in parallel |
//! | [`users`] | Users table filters, delete, and the user detail modal with subscription changes |
//! | [`admins`] | Admin accounts: list, create (validated), delete |
//! | [`broadcast`] | Notification composer and audience sizing |
//! | [`ai_usage`] | AI usage totals, per-user table, feature breakdowns, per-user detail |
//! | [`feedback`] | Feedback list, summary counters, optimistic status changes |
//! | [`logs`] | Admin audit trail |
//! | [`profile`] | Profile and password forms |
//!
//! ## Conventions
//!
//! - List loads are split into `begin_load` (takes a [`Ticket`]) and
//!   `finish_load` (applies the response only if its ticket is still
//!   current). `load` runs both around a backend call.
//! - Mutations are associated functions that borrow no controller state;
//!   they return a user-facing success message or an [`ActionError`], and
//!   the caller reloads the affected list afterwards.
//! - Destructive actions ask a [`Prompt`] first. A "no" sends nothing.

pub mod admins;
pub mod ai_usage;
pub mod broadcast;
mod error;
pub mod feedback;
mod generation;
pub mod logs;
pub mod overview;
pub mod profile;
mod prompt;
pub mod session;
pub mod tabs;
pub mod users;

#[cfg(test)]
mod testing;

pub use admins::AdminsController;
pub use ai_usage::{AiUsageController, AiUsageData, Section, Sections, UsageDetail};
pub use broadcast::BroadcastController;
pub use error::ActionError;
pub use feedback::{FeedbackController, StatusChange};
pub use generation::{Generation, Ticket};
pub use logs::LogsController;
pub use overview::{OverviewController, OverviewData};
pub use profile::{ProfileController, ProfileOutcome};
pub use prompt::Prompt;
pub use session::SessionController;
pub use tabs::{Capability, TabIcon, TabId, TabSpec};
pub use users::{SubscriptionChange, UserDetailController, UsersController};
