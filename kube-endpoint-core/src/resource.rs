use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use std::borrow::Cow;

/// An accessor trait for anything that can locate a Kubernetes object
///
/// Exposes the three pieces of identity a url needs: kind, name and namespace.
/// Implemented for every [`k8s_openapi`] resource, and for
/// [`DynamicObject`](crate::dynamic::DynamicObject) for kinds not known at compile time.
pub trait ResourceDescriptor {
    /// The name of the object
    fn name(&self) -> Option<&str>;

    /// The kind of the object
    ///
    /// Only `None` when an untyped object carries no type information.
    fn kind(&self) -> Option<Cow<'_, str>>;

    /// The namespace the object lives in
    fn namespace(&self) -> Option<&str>;
}

/// Implement accessor trait for any ObjectMeta-using Kubernetes Resource
impl<K> ResourceDescriptor for K
where
    K: k8s_openapi::Metadata<Ty = ObjectMeta>,
    K: k8s_openapi::Resource,
{
    fn name(&self) -> Option<&str> {
        self.metadata().name.as_deref()
    }

    fn kind(&self) -> Option<Cow<'_, str>> {
        Some(K::KIND.into())
    }

    fn namespace(&self) -> Option<&str> {
        self.metadata().namespace.as_deref()
    }
}
