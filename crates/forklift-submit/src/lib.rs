//! forklift-submit
//!
//! Turns a finished plan draft into cluster resources through an abstract
//! [`api::ConsoleApi`]. Two protocols live here:
//!
//! - `submit_plan()` — NetworkMap + StorageMap, then the Plan, then owner
//!   references from both maps to the Plan. No rollback.
//! - `create_provider()` — Secret, then the Provider, then an owner
//!   reference from the Secret to the Provider. The Secret is deleted again
//!   if the Provider cannot be created.
//!
//! `DryRunApi` records the calls instead of talking to a cluster.

pub mod api;
pub mod dry_run;
pub mod error;
pub mod plan;
pub mod provider;
pub mod templates;

pub use crate::api::{ApiError, ConsoleApi};
pub use crate::dry_run::{ApiCall, DryRunApi, Operation};
pub use crate::error::{SubmitError, format_err_chain};
pub use crate::plan::{record_submit_outcome, submit_from_session, submit_plan};
pub use crate::provider::create_provider;
