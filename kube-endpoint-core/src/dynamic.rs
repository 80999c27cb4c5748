//! Contains types for using resource kinds not known at compile-time.
use crate::{discovery::VersionedApiResource, metadata::TypeMeta, resource::ResourceDescriptor};

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use std::borrow::Cow;

/// A dynamic representation of a kubernetes object
///
/// This will work with any non-list type object.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct DynamicObject {
    /// The type fields, not always present
    #[serde(flatten, default)]
    pub types: Option<TypeMeta>,
    /// Object metadata
    #[serde(default)]
    pub metadata: ObjectMeta,

    /// All other keys
    #[serde(flatten)]
    pub data: serde_json::Value,
}

impl DynamicObject {
    /// Create a DynamicObject with minimal values set from a resource descriptor.
    #[must_use]
    pub fn new(name: &str, resource: &VersionedApiResource) -> Self {
        Self {
            types: Some(TypeMeta::new(&resource.api_version(), &resource.kind)),
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                ..Default::default()
            },
            data: Default::default(),
        }
    }

    /// Attach a namespace to a DynamicObject
    #[must_use]
    pub fn within(mut self, ns: &str) -> Self {
        self.metadata.namespace = Some(ns.into());
        self
    }

    /// The apiVersion of the object, if typed
    pub fn api_version(&self) -> Option<&str> {
        self.types.as_ref().map(|t| t.api_version.as_str())
    }
}

impl ResourceDescriptor for DynamicObject {
    fn name(&self) -> Option<&str> {
        self.metadata.name.as_deref()
    }

    fn kind(&self) -> Option<Cow<'_, str>> {
        self.types.as_ref().map(|t| Cow::Borrowed(t.kind.as_str()))
    }

    fn namespace(&self) -> Option<&str> {
        self.metadata.namespace.as_deref()
    }
}
