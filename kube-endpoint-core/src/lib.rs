//! Crate with the types and traits needed to resolve Kubernetes-style REST endpoints
//!
//! This crate is available as a minimal alternative to `kube-endpoint` where only the
//! vocabulary and the type mapping contract are needed.
//! The same information here is always re-exported from `kube-endpoint` under `kube_endpoint::core`.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod discovery;
pub use discovery::{ApiTypeMapper, Scope, VersionedApiResource};

pub mod dynamic;
pub use dynamic::DynamicObject;

pub mod gvk;
pub use gvk::GroupVersion;

pub mod kind;
pub use kind::{KindVocabulary, ResourceKind};

pub mod metadata;

mod resource;
pub use resource::ResourceDescriptor;

pub mod version;
pub use version::Version;
