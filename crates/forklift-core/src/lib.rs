//! forklift-core
//!
//! Pure domain types for the Forklift console: Kubernetes-style object
//! references, the Provider/Plan/NetworkMap/StorageMap resources, and the
//! inventory items the plan wizard consumes. Nothing here talks to a
//! cluster; the wizard, the submission flows and the frontend (through the
//! `ts-rs` bindings) all share these shapes.

pub mod error;
pub mod k8s_name;
pub mod models;
pub mod object_ref;

pub use crate::error::CoreError;
pub use crate::object_ref::ObjectRef;
