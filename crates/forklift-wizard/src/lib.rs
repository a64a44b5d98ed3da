//! forklift-wizard
//!
//! State derivation for the "create migration plan" wizard. The draft plan is
//! a plain value; every change goes through [`reducer::reduce`], which applies
//! one typed [`action::Action`] and recomputes derived state (validation and
//! network/storage mappings) from the latest availability snapshots.
//!
//! Public API:
//! - `PlanDraft::new()` — initial draft from the wizard entry context
//! - `reduce()` — apply one action, return the next draft
//! - `WizardSession` — serialized dispatch with change notification

pub mod action;
pub mod availability;
pub mod draft;
pub mod error;
pub mod mapping;
pub mod reducer;
pub mod resolve;
pub mod session;
pub mod settings;
pub mod used;
pub mod validation;

pub use crate::action::{Action, ActionEnvelope};
pub use crate::availability::{Availability, SnapshotUpdate};
pub use crate::draft::{InitialParams, PlanDraft};
pub use crate::error::WizardError;
pub use crate::mapping::{Mapping, MappingSource, MappingState};
pub use crate::reducer::reduce;
pub use crate::session::WizardSession;
pub use crate::settings::{DraftSettings, NetworkDefault};
pub use crate::validation::Validation;
