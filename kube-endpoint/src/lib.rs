//! Crate for resolving Kubernetes-style resources into REST urls
//!
//! Given a logical description of a remote resource (kind, apiVersion, namespace,
//! name, subresource and query parameters) and an [`ApiTypeMapper`] that knows which
//! group and version serve a kind, [`UrlBuilder`] produces the concrete url to hand
//! to an http or websocket transport.
//!
//! # Example
//!
//! ```rust
//! use kube_endpoint::{core::VersionedApiResource, UrlBuilder};
//!
//! # fn main() -> Result<(), kube_endpoint::Error> {
//! let mapper = vec![VersionedApiResource::new("api", "", "v1", "Pod", "pods")];
//! let url = UrlBuilder::new("https://api.example.com/", &mapper)
//!     .kind("Pod")
//!     .api_version("v1")
//!     .namespace("myproj")
//!     .name("mypod")
//!     .build()?;
//! assert_eq!(url, "https://api.example.com/api/v1/namespaces/myproj/pods/mypod");
//! # Ok(())
//! # }
//! ```
//!
//! For more details, see:
//!
//! - [`UrlBuilder`] for the resolution rules
//! - [`discovery`] for a type mapper backed by api discovery documents
//! - [`config`] for locating the cluster url
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![forbid(unsafe_code)]

pub use kube_endpoint_core as core;
pub use kube_endpoint_core::{ApiTypeMapper, ResourceDescriptor, ResourceKind, VersionedApiResource};

pub mod config;
pub use config::Config;

pub mod discovery;
pub use discovery::ApiTypeMappings;

pub mod error;
pub use error::Error;

mod url_builder;
pub use url_builder::UrlBuilder;

/// Convient alias for `Result<T, Error>`
pub type Result<T, E = Error> = std::result::Result<T, E>;
