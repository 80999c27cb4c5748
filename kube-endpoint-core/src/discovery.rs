//! Type information structs and traits for resolving api endpoints
use std::{rc::Rc, sync::Arc};

use serde::{Deserialize, Serialize};

/// Resource scope
#[derive(Debug, Clone, Copy, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Scope {
    /// Objects are global
    Cluster,
    /// Each object lives in namespace.
    #[default]
    Namespaced,
}

/// An api resource pinned to a particular group version
///
/// Carries everything needed to turn a kind into a REST path:
/// `/{prefix}/{group}/{version}/[namespaces/{ns}/]{plural}`.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct VersionedApiResource {
    /// Path prefix, `api` for the core group and `apis` for named groups
    pub prefix: String,
    /// Resource group, empty for core group.
    pub group: String,
    /// Group version
    pub version: String,
    /// Singular PascalCase name of the resource
    pub kind: String,
    /// Plural name of the resource, used as path segment
    pub plural: String,
    /// Scope of the resource
    #[serde(default)]
    pub scope: Scope,
    /// Names of the subresources served below an instance, e.g. `status` or `log`
    #[serde(default)]
    pub subresources: Vec<String>,
}

impl VersionedApiResource {
    /// Path prefix of the core group
    pub const CORE_PREFIX: &'static str = "api";
    /// Path prefix of named groups
    pub const GROUP_PREFIX: &'static str = "apis";

    /// Create a namespaced resource without subresources
    pub fn new(prefix: &str, group: &str, version: &str, kind: &str, plural: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            group: group.to_string(),
            version: version.to_string(),
            kind: kind.to_string(),
            plural: plural.to_string(),
            scope: Scope::Namespaced,
            subresources: vec![],
        }
    }

    /// Mark the resource as cluster scoped
    #[must_use]
    pub fn cluster_scoped(mut self) -> Self {
        self.scope = Scope::Cluster;
        self
    }

    /// Declare support for a subresource
    #[must_use]
    pub fn with_subresource(mut self, name: &str) -> Self {
        self.subresources.push(name.to_string());
        self
    }

    /// apiVersion of the resource (v1 for core group, group/version for others)
    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }

    /// Whether instances live in a namespace
    pub fn is_namespaced(&self) -> bool {
        self.scope == Scope::Namespaced
    }

    /// Checks that the given subresource is served for this resource
    pub fn supports_subresource(&self, name: &str) -> bool {
        self.subresources.iter().any(|s| s == name)
    }
}

/// Maps kinds to the REST endpoints serving them
///
/// This is the narrow capability the url builder needs from api discovery.
/// `api_version` is the manifest style apiVersion (`v1`, `apps/v1`);
/// `None` lets the mapper choose its preferred version.
pub trait ApiTypeMapper {
    /// Whether some endpoint serves `kind` at `api_version`
    fn is_supported(&self, api_version: Option<&str>, kind: &str) -> bool;

    /// The endpoint serving `kind` at `api_version`
    fn endpoint_for(&self, api_version: Option<&str>, kind: &str) -> Option<&VersionedApiResource>;
}

impl<T: ApiTypeMapper + ?Sized> ApiTypeMapper for &T {
    fn is_supported(&self, api_version: Option<&str>, kind: &str) -> bool {
        (**self).is_supported(api_version, kind)
    }

    fn endpoint_for(&self, api_version: Option<&str>, kind: &str) -> Option<&VersionedApiResource> {
        (**self).endpoint_for(api_version, kind)
    }
}

macro_rules! forward_mapper {
    ($($ptr:ident),+) => {$(
        impl<T: ApiTypeMapper + ?Sized> ApiTypeMapper for $ptr<T> {
            fn is_supported(&self, api_version: Option<&str>, kind: &str) -> bool {
                (**self).is_supported(api_version, kind)
            }

            fn endpoint_for(&self, api_version: Option<&str>, kind: &str) -> Option<&VersionedApiResource> {
                (**self).endpoint_for(api_version, kind)
            }
        }
    )+};
}

forward_mapper!(Box, Rc, Arc);

/// A fixed list of resources is the simplest mapper
///
/// Resolution picks the first entry matching the kind (and apiVersion when given).
impl ApiTypeMapper for [VersionedApiResource] {
    fn is_supported(&self, api_version: Option<&str>, kind: &str) -> bool {
        self.endpoint_for(api_version, kind).is_some()
    }

    fn endpoint_for(&self, api_version: Option<&str>, kind: &str) -> Option<&VersionedApiResource> {
        self.iter()
            .filter(|ar| ar.kind == kind)
            .find(|ar| api_version.map_or(true, |v| ar.api_version() == v))
    }
}

impl ApiTypeMapper for Vec<VersionedApiResource> {
    fn is_supported(&self, api_version: Option<&str>, kind: &str) -> bool {
        self.as_slice().is_supported(api_version, kind)
    }

    fn endpoint_for(&self, api_version: Option<&str>, kind: &str) -> Option<&VersionedApiResource> {
        self.as_slice().endpoint_for(api_version, kind)
    }
}
