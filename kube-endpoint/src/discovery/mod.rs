//! A type mapper backed by api discovery documents.

use crate::{error::DiscoveryError, Result};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::APIResourceList;
pub use kube_endpoint_core::discovery::{ApiTypeMapper, Scope, VersionedApiResource};
use kube_endpoint_core::{gvk::GroupVersion, Version};
use std::collections::BTreeSet;
mod parse;

/// How the mappings decide which api groups to keep
#[derive(Debug, Clone)]
enum DiscoveryMode {
    /// Only allow explicitly listed apigroups
    Allow(Vec<String>),
    /// Allow all apigroups except the ones listed
    Block(Vec<String>),
}

impl DiscoveryMode {
    fn is_queryable(&self, group: &str) -> bool {
        match &self {
            Self::Allow(allowed) => allowed.iter().any(|g| g == group),
            Self::Block(blocked) => !blocked.iter().any(|g| g == group),
        }
    }
}

/// An in-memory [`ApiTypeMapper`] built from discovery documents
///
/// Feed it the `APIResourceList`s returned by `/api/{version}` and
/// `/apis/{group}/{version}` (fetching them is the transport's job), then hand it to a
/// [`UrlBuilder`](crate::UrlBuilder):
///
/// ```rust
/// use kube_endpoint::{ApiTypeMappings, UrlBuilder};
/// # fn main() -> Result<(), kube_endpoint::Error> {
/// let mut mappings = ApiTypeMappings::new();
/// mappings.add_resource_list_json(br#"{
///     "apiVersion": "v1",
///     "kind": "APIResourceList",
///     "groupVersion": "apps/v1",
///     "resources": [
///         {"name": "deployments", "singularName": "deployment", "namespaced": true, "kind": "Deployment", "verbs": ["get"]},
///         {"name": "deployments/scale", "singularName": "", "namespaced": true, "kind": "Scale", "verbs": ["get"]}
///     ]
/// }"#)?;
/// let url = UrlBuilder::new("https://api.example.com", &mappings)
///     .kind("Deployment")
///     .namespace("ns1")
///     .name("web")
///     .subresource("scale")
///     .build()?;
/// assert_eq!(url.path(), "/apis/apps/v1/namespaces/ns1/deployments/web/scale");
/// # Ok(())
/// # }
/// ```
///
/// Lookups with an explicit apiVersion match group and version exactly.
/// Without one, the most stable and most recent version serving the kind wins
/// (see [`Version`]), with ties going to the resource registered first.
#[derive(Debug, Clone)]
pub struct ApiTypeMappings {
    resources: Vec<VersionedApiResource>,
    mode: DiscoveryMode,
}

impl Default for ApiTypeMappings {
    fn default() -> Self {
        Self::new()
    }
}

/// Construction
impl ApiTypeMappings {
    /// Construct empty mappings
    #[must_use]
    pub fn new() -> Self {
        Self {
            resources: vec![],
            mode: DiscoveryMode::Block(vec![]),
        }
    }

    /// Only keep resources from the listed apigroups (`""` is the core group)
    #[must_use]
    pub fn filter(mut self, allow: &[&str]) -> Self {
        self.mode = DiscoveryMode::Allow(allow.iter().map(ToString::to_string).collect());
        self
    }

    /// Keep resources from all apigroups except the listed ones
    #[must_use]
    pub fn exclude(mut self, deny: &[&str]) -> Self {
        self.mode = DiscoveryMode::Block(deny.iter().map(ToString::to_string).collect());
        self
    }

    /// Register the resources of a discovery document
    ///
    /// Core group versions are served under `api`, named groups under `apis`.
    pub fn add_resource_list(&mut self, list: &APIResourceList) -> Result<()> {
        self.add_list(list, None)
    }

    /// Register the resources of a discovery document served under a custom prefix
    ///
    /// Used for legacy endpoints such as OpenShift's `oapi`.
    pub fn add_resource_list_with_prefix(&mut self, prefix: &str, list: &APIResourceList) -> Result<()> {
        self.add_list(list, Some(prefix))
    }

    /// Register the resources of a json encoded discovery document
    pub fn add_resource_list_json(&mut self, data: &[u8]) -> Result<()> {
        let list: APIResourceList = serde_json::from_slice(data).map_err(DiscoveryError::Parse)?;
        self.add_resource_list(&list)
    }

    /// Register a single resource
    pub fn add_resource(&mut self, resource: VersionedApiResource) {
        if self.mode.is_queryable(&resource.group) {
            self.resources.push(resource);
        }
    }

    fn add_list(&mut self, list: &APIResourceList, prefix: Option<&str>) -> Result<()> {
        let (gv, resources) = parse::parse_resource_list(list, prefix)?;
        if !self.mode.is_queryable(&gv.group) {
            tracing::debug!(group_version = list.group_version.as_str(), "Skipping filtered group version");
            return Ok(());
        }
        tracing::debug!(
            group_version = list.group_version.as_str(),
            resources = resources.len(),
            "Registering group version"
        );
        for resource in resources {
            self.add_resource(resource);
        }
        Ok(())
    }
}

/// Interface to the registered resources
impl ApiTypeMappings {
    /// All registered resources in registration order
    pub fn resources(&self) -> impl Iterator<Item = &VersionedApiResource> {
        self.resources.iter()
    }

    /// The distinct kinds served, alphabetically
    pub fn kinds(&self) -> BTreeSet<&str> {
        self.resources.iter().map(|ar| ar.kind.as_str()).collect()
    }

    /// Find the resource serving `kind` at `api_version`, or at the preferred version
    pub fn resolve(&self, api_version: Option<&str>, kind: &str) -> Option<&VersionedApiResource> {
        let mut candidates = self.resources.iter().filter(|ar| ar.kind == kind);
        match api_version {
            Some(api_version) => {
                let gv: GroupVersion = api_version.parse().ok()?;
                candidates.find(|ar| ar.group == gv.group && ar.version == gv.version)
            }
            None => Version::preferred(candidates, |ar| ar.version.as_str()),
        }
    }
}

impl ApiTypeMapper for ApiTypeMappings {
    fn is_supported(&self, api_version: Option<&str>, kind: &str) -> bool {
        self.resolve(api_version, kind).is_some()
    }

    fn endpoint_for(&self, api_version: Option<&str>, kind: &str) -> Option<&VersionedApiResource> {
        self.resolve(api_version, kind)
    }
}
