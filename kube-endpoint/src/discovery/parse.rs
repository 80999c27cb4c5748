//! Abstractions on top of k8s_openapi::apimachinery::pkg::apis::meta::v1
use crate::error::DiscoveryError;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{APIResource, APIResourceList};
use kube_endpoint_core::{
    discovery::{Scope, VersionedApiResource},
    gvk::GroupVersion,
};

/// The path prefix a group version is served under by default
pub(crate) fn default_prefix(gv: &GroupVersion) -> &'static str {
    if gv.is_core() {
        VersionedApiResource::CORE_PREFIX
    } else {
        VersionedApiResource::GROUP_PREFIX
    }
}

/// Creates a `VersionedApiResource` from a `meta::v1::APIResource` instance + its groupversion.
pub(crate) fn parse_apiresource(ar: &APIResource, gv: &GroupVersion, prefix: &str) -> VersionedApiResource {
    // NB: not safe to use this with subresources (they don't have kinds of their own)
    VersionedApiResource {
        prefix: prefix.to_string(),
        group: ar.group.clone().unwrap_or_else(|| gv.group.clone()),
        version: ar.version.clone().unwrap_or_else(|| gv.version.clone()),
        kind: ar.kind.clone(),
        plural: ar.name.clone(),
        scope: if ar.namespaced {
            Scope::Namespaced
        } else {
            Scope::Cluster
        },
        subresources: vec![],
    }
}

/// Scans a `meta::v1::APIResourceList` for subresources of `name`
pub(crate) fn find_subresources(list: &APIResourceList, name: &str) -> Vec<String> {
    let subresource_name_prefix = format!("{}/", name);
    list.resources
        .iter()
        .filter_map(|res| res.name.strip_prefix(&subresource_name_prefix))
        .map(String::from)
        .collect()
}

/// Extract every top level resource of a list, with subresources folded in
pub(crate) fn parse_resource_list(
    list: &APIResourceList,
    prefix: Option<&str>,
) -> Result<(GroupVersion, Vec<VersionedApiResource>), DiscoveryError> {
    let gv: GroupVersion = list
        .group_version
        .parse()
        .map_err(DiscoveryError::InvalidGroupVersion)?;
    let prefix = prefix.unwrap_or_else(|| default_prefix(&gv));
    let resources = list
        .resources
        .iter()
        // skip subresources
        .filter(|res| !res.name.contains('/'))
        .map(|res| {
            let mut ar = parse_apiresource(res, &gv, prefix);
            ar.subresources = find_subresources(list, &res.name);
            ar
        })
        .collect();
    Ok((gv, resources))
}
