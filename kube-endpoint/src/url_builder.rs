use std::fmt;

use kube_endpoint_core::{
    kind::is_cluster_scoped, ApiTypeMapper, KindVocabulary, ResourceDescriptor, VersionedApiResource,
};

use crate::{error::MalformedUrlError, Error, Result};

/// A url builder for Kubernetes-style REST endpoints
///
/// Collects the description of a remote resource and resolves it into a url
/// through an [`ApiTypeMapper`] on [`UrlBuilder::build`]:
///
/// ```text
/// {base}/{prefix}/[{group}/]{version}[/namespaces/{namespace}]/{plural}[/{name}][/{subresource}][/{sub_context}][?{query}]
/// ```
///
/// All setters consume and return the builder, and can be called in any order and
/// any number of times; the last call wins. `build` only borrows the builder, so a
/// builder can be refined and built again.
///
/// ```rust
/// use kube_endpoint::{core::VersionedApiResource, UrlBuilder};
/// # fn main() -> Result<(), kube_endpoint::Error> {
/// let mapper = vec![
///     VersionedApiResource::new("apis", "apps", "v1", "Deployment", "deployments").with_subresource("scale"),
/// ];
/// let url = UrlBuilder::new("https://api.example.com", &mapper)
///     .kind("Deployment")
///     .namespace("ns1")
///     .name("web")
///     .subresource("scale")
///     .build()?;
/// assert_eq!(url, "https://api.example.com/apis/apps/v1/namespaces/ns1/deployments/web/scale");
/// # Ok(())
/// # }
/// ```
pub struct UrlBuilder<'a, M: ?Sized> {
    base_url: String,
    mapper: &'a M,
    known_kinds: &'a KindVocabulary,
    kind: Option<String>,
    name: Option<String>,
    namespace: Option<String>,
    api_version: Option<String>,
    subresource: Option<String>,
    sub_context: Option<String>,
    params: Vec<(String, String)>,
}

/// Constructors
impl<'a, M: ApiTypeMapper + ?Sized> UrlBuilder<'a, M> {
    /// Create a builder rooted at `base_url`
    ///
    /// Trailing slashes of the base url are stripped.
    pub fn new(base_url: impl AsRef<str>, mapper: &'a M) -> Self {
        Self::with_vocabulary(base_url, mapper, KindVocabulary::builtin())
    }

    /// Create a builder that recognises the kinds of a runtime extended vocabulary
    pub fn with_vocabulary(base_url: impl AsRef<str>, mapper: &'a M, known_kinds: &'a KindVocabulary) -> Self {
        Self {
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
            mapper,
            known_kinds,
            kind: None,
            name: None,
            namespace: None,
            api_version: None,
            subresource: None,
            sub_context: None,
            params: vec![],
        }
    }

    /// Create a builder pointing at an existing object
    ///
    /// Shorthand for [`UrlBuilder::new`] followed by [`UrlBuilder::resource`].
    pub fn for_resource<R: ResourceDescriptor + ?Sized>(
        base_url: impl AsRef<str>,
        mapper: &'a M,
        resource: &R,
    ) -> Self {
        Self::new(base_url, mapper).resource(resource)
    }
}

/// Setters
impl<M: ApiTypeMapper + ?Sized> UrlBuilder<'_, M> {
    /// Select among the api versions serving the kind, e.g. `v1` or `apps/v1`
    #[must_use]
    pub fn api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = Some(api_version.into());
        self
    }

    /// Set the kind of the resource
    ///
    /// Kinds missing from the vocabulary are logged, but still used:
    /// the server may serve api extensions this client was not built with.
    #[must_use]
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        let kind = kind.into();
        if !self.known_kinds.contains(&kind) {
            tracing::warn!(
                kind = kind.as_str(),
                "The kind is not recognized by this client; this operation may fail"
            );
        }
        self.kind = Some(kind);
        self
    }

    /// Set the name of the resource instance
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the namespace, ignored when blank
    #[must_use]
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        if !is_blank(&namespace) {
            self.namespace = Some(namespace);
        }
        self
    }

    /// Address a subresource of the instance, e.g. `status` or `log`
    #[must_use]
    pub fn subresource(mut self, subresource: impl Into<String>) -> Self {
        self.subresource = Some(subresource.into());
        self
    }

    /// Append a path segment after the subresource, e.g. a container name
    ///
    /// Unlike subresources this is not checked against the endpoint.
    #[must_use]
    pub fn sub_context(mut self, sub_context: impl Into<String>) -> Self {
        self.sub_context = Some(sub_context.into());
        self
    }

    /// Take name, kind and namespace from an existing object
    ///
    /// An object without type information clears the kind.
    #[must_use]
    pub fn resource<R: ResourceDescriptor + ?Sized>(mut self, resource: &R) -> Self {
        self.name = resource.name().map(String::from);
        self = match resource.kind() {
            Some(kind) => self.kind(kind.into_owned()),
            None => {
                tracing::warn!("The resource carries no kind; this operation will fail");
                self.kind = None;
                self
            }
        };
        match resource.namespace() {
            Some(ns) => self.namespace(ns),
            None => self,
        }
    }

    /// Append a query parameter
    ///
    /// Parameters keep their insertion order and are never deduplicated.
    /// Parameters with a blank value are dropped when building.
    #[must_use]
    pub fn add_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Append query parameters in the iteration order of `params`
    #[must_use]
    pub fn add_parameters<I, K, V>(self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        params
            .into_iter()
            .fold(self, |builder, (k, v)| builder.add_parameter(k, v))
    }

    /// Request a watch, shorthand for `add_parameter("watch", "true")`
    #[must_use]
    pub fn watch(self) -> Self {
        self.add_parameter("watch", "true")
    }
}

/// Resolution
impl<M: ApiTypeMapper + ?Sized> UrlBuilder<'_, M> {
    /// Resolve the configured resource into a url
    ///
    /// Fails with [`Error::MissingKind`] before the mapper is consulted when no kind is set,
    /// [`Error::UnsupportedEndpoint`] when the mapper knows no endpoint for the kind,
    /// [`Error::UnsupportedSubresource`] when the endpoint does not serve the subresource,
    /// and [`Error::MalformedResult`] when the assembled url does not parse back into the
    /// same url, e.g. because a path segment contains `?` or `#`.
    pub fn build(&self) -> Result<http::Uri> {
        let kind = self
            .kind
            .as_deref()
            .filter(|k| !is_blank(k))
            .ok_or(Error::MissingKind)?;
        let api_version = self.api_version.as_deref();

        let unsupported = || Error::UnsupportedEndpoint {
            kind: kind.to_string(),
            api_version: api_version.map(String::from),
        };
        if !self.mapper.is_supported(api_version, kind) {
            return Err(unsupported());
        }
        let resource = self.mapper.endpoint_for(api_version, kind).ok_or_else(unsupported)?;

        let mut url = self.base_url.clone();
        self.append_path(&mut url, kind, resource)?;
        let path_end = url.len();
        self.append_parameters(&mut url);

        // http::Uri silently cuts a fragment, and a '?' in a segment would start the query early
        let delimiter = url[self.base_url.len()..path_end]
            .find(['?', '#'])
            .map(|idx| self.base_url.len() + idx)
            .or_else(|| url.find('#'));
        if let Some(position) = delimiter {
            return Err(Error::MalformedResult {
                url,
                source: MalformedUrlError::Delimiter { position },
            });
        }

        match url.parse::<http::Uri>() {
            Ok(uri) => {
                tracing::debug!(url = url.as_str(), "Built url");
                Ok(uri)
            }
            Err(source) => Err(Error::MalformedResult {
                url,
                source: source.into(),
            }),
        }
    }

    /// Resolve the configured resource into a websocket url
    ///
    /// Same as [`UrlBuilder::build`] with the scheme replaced by `wss`.
    /// Path and query are untouched, so call [`UrlBuilder::watch`] first to stream changes.
    pub fn websocket(&self) -> Result<String> {
        let url = self.build()?.to_string();
        let url = match url.find(':') {
            Some(idx) => format!("wss{}", &url[idx..]),
            None => url,
        };
        tracing::debug!(url = url.as_str(), "Built websocket url");
        Ok(url)
    }

    fn append_path(&self, url: &mut String, kind: &str, resource: &VersionedApiResource) -> Result<()> {
        url.push('/');
        url.push_str(&resource.prefix);
        url.push('/');
        if !resource.group.is_empty() {
            url.push_str(&resource.group);
            url.push('/');
        }
        url.push_str(&resource.version);

        if let Some(ns) = &self.namespace {
            if resource.is_namespaced() && !is_cluster_scoped(kind) {
                url.push_str("/namespaces/");
                url.push_str(ns);
            }
        }

        url.push('/');
        url.push_str(&resource.plural);
        if let Some(name) = &self.name {
            url.push('/');
            url.push_str(name);
        }

        if let Some(subresource) = non_blank(&self.subresource) {
            if !resource.supports_subresource(subresource) {
                return Err(Error::UnsupportedSubresource {
                    kind: kind.to_string(),
                    subresource: subresource.to_string(),
                });
            }
            url.push('/');
            url.push_str(subresource);
        }
        if let Some(sub_context) = non_blank(&self.sub_context) {
            url.push('/');
            url.push_str(sub_context);
        }
        Ok(())
    }

    fn append_parameters(&self, url: &mut String) {
        if self.params.is_empty() {
            return;
        }
        url.push('?');
        let mut first = true;
        for (key, value) in &self.params {
            if is_blank(value) {
                tracing::warn!(key = key.as_str(), "Unable to append parameter since its value is blank");
                continue;
            }
            if !first {
                url.push('&');
            }
            url.push_str(key);
            url.push('=');
            url.extend(form_urlencoded::byte_serialize(value.as_bytes()));
            first = false;
        }
    }
}

/// Whether `value` is empty or only whitespace
///
/// Non-breaking spaces count as content, the ascii information separators as whitespace.
fn is_blank(value: &str) -> bool {
    value.chars().all(|c| match c {
        '\u{1c}'..='\u{1f}' => true,
        '\u{85}' | '\u{a0}' | '\u{2007}' | '\u{202f}' => false,
        c => c.is_whitespace(),
    })
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !is_blank(v))
}

impl<M: ?Sized> Clone for UrlBuilder<'_, M> {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            mapper: self.mapper,
            known_kinds: self.known_kinds,
            kind: self.kind.clone(),
            name: self.name.clone(),
            namespace: self.namespace.clone(),
            api_version: self.api_version.clone(),
            subresource: self.subresource.clone(),
            sub_context: self.sub_context.clone(),
            params: self.params.clone(),
        }
    }
}

impl<M: ?Sized> fmt::Debug for UrlBuilder<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlBuilder")
            .field("base_url", &self.base_url)
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("namespace", &self.namespace)
            .field("api_version", &self.api_version)
            .field("subresource", &self.subresource)
            .field("sub_context", &self.sub_context)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use k8s_openapi::api::core::v1::Pod;
    use kube_endpoint_core::{DynamicObject, ResourceKind};
    use std::{cell::Cell, collections::BTreeMap};

    const BASE: &str = "https://api.example.com";

    /// Mapper stub that counts how often it is consulted
    #[derive(Default)]
    struct RecordingMapper {
        resources: Vec<VersionedApiResource>,
        calls: Cell<usize>,
        hide_endpoints: bool,
    }

    impl RecordingMapper {
        fn new() -> Self {
            Self {
                resources: vec![
                    VersionedApiResource::new("api", "", "v1", "Pod", "pods")
                        .with_subresource("log")
                        .with_subresource("exec"),
                    VersionedApiResource::new("apis", "apps", "v1", "Deployment", "deployments")
                        .with_subresource("scale")
                        .with_subresource("status"),
                    VersionedApiResource::new("apis", "apps", "v1beta1", "Deployment", "deployments"),
                    VersionedApiResource::new("apis", "project.openshift.io", "v1", "Project", "projects"),
                    VersionedApiResource::new("api", "", "v1", "Node", "nodes").cluster_scoped(),
                    VersionedApiResource::new("apis", "example.com", "v1", "Widget", "widgets"),
                ],
                ..Default::default()
            }
        }
    }

    impl ApiTypeMapper for RecordingMapper {
        fn is_supported(&self, api_version: Option<&str>, kind: &str) -> bool {
            self.calls.set(self.calls.get() + 1);
            self.resources.is_supported(api_version, kind)
        }

        fn endpoint_for(&self, api_version: Option<&str>, kind: &str) -> Option<&VersionedApiResource> {
            self.calls.set(self.calls.get() + 1);
            if self.hide_endpoints {
                return None;
            }
            self.resources.endpoint_for(api_version, kind)
        }
    }

    fn pod_url(mapper: &RecordingMapper) -> UrlBuilder<'_, RecordingMapper> {
        UrlBuilder::new(BASE, mapper).kind("Pod").api_version("v1")
    }

    #[test]
    fn namespaced_pod() {
        let mapper = RecordingMapper::new();
        let url = pod_url(&mapper).namespace("myproj").name("mypod").build().unwrap();
        assert_eq!(url.to_string(), "https://api.example.com/api/v1/namespaces/myproj/pods/mypod");
    }

    #[test]
    fn namespace_sits_between_version_and_plural() {
        let mapper = RecordingMapper::new();
        let url = UrlBuilder::new(BASE, &mapper)
            .kind("Deployment")
            .api_version("apps/v1")
            .namespace("ns1")
            .name("web")
            .build()
            .unwrap();
        let path = url.path();
        assert_eq!(path.matches("/namespaces/").count(), 1);
        assert_eq!(path, "/apis/apps/v1/namespaces/ns1/deployments/web");
    }

    #[test]
    fn collection_without_name() {
        let mapper = RecordingMapper::new();
        let url = pod_url(&mapper).build().unwrap();
        assert_eq!(url.to_string(), "https://api.example.com/api/v1/pods");
    }

    #[test]
    fn supported_subresource_is_appended() {
        let mapper = RecordingMapper::new();
        let url = UrlBuilder::new(BASE, &mapper)
            .kind(ResourceKind::Deployment)
            .api_version("apps/v1")
            .namespace("ns1")
            .name("web")
            .subresource("scale")
            .build()
            .unwrap();
        assert_eq!(
            url.to_string(),
            "https://api.example.com/apis/apps/v1/namespaces/ns1/deployments/web/scale"
        );
    }

    #[test]
    fn unsupported_subresource_fails() {
        let mapper = RecordingMapper::new();
        let err = UrlBuilder::new(BASE, &mapper)
            .kind("Deployment")
            .api_version("apps/v1beta1")
            .namespace("ns1")
            .name("web")
            .subresource("scale")
            .build()
            .unwrap_err();
        match err {
            Error::UnsupportedSubresource { kind, subresource } => {
                assert_eq!(kind, "Deployment");
                assert_eq!(subresource, "scale");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn sub_context_follows_subresource_unchecked() {
        let mapper = RecordingMapper::new();
        let url = pod_url(&mapper)
            .namespace("myproj")
            .name("mypod")
            .subresource("exec")
            .sub_context("sidecar")
            .build()
            .unwrap();
        assert_eq!(url.path(), "/api/v1/namespaces/myproj/pods/mypod/exec/sidecar");
    }

    #[test]
    fn blank_subresource_and_sub_context_are_ignored() {
        let mapper = RecordingMapper::new();
        let url = pod_url(&mapper)
            .name("mypod")
            .subresource(" ")
            .sub_context("")
            .build()
            .unwrap();
        assert_eq!(url.path(), "/api/v1/pods/mypod");
    }

    #[test]
    fn project_never_gets_a_namespace() {
        let mapper = RecordingMapper::new();
        let url = UrlBuilder::new(BASE, &mapper)
            .kind("Project")
            .namespace("myproj")
            .name("myproj")
            .build()
            .unwrap();
        assert_eq!(url.path(), "/apis/project.openshift.io/v1/projects/myproj");
    }

    #[test]
    fn cluster_scoped_endpoint_never_gets_a_namespace() {
        let mapper = RecordingMapper::new();
        let url = UrlBuilder::new(BASE, &mapper)
            .kind("Node")
            .namespace("myproj")
            .name("worker-0")
            .build()
            .unwrap();
        assert_eq!(url.path(), "/api/v1/nodes/worker-0");
    }

    #[test]
    fn missing_kind_fails_before_consulting_the_mapper() {
        let mapper = RecordingMapper::new();
        let err = UrlBuilder::new(BASE, &mapper).name("mypod").build().unwrap_err();
        assert!(matches!(err, Error::MissingKind));
        let err = UrlBuilder::new(BASE, &mapper).kind("  ").build().unwrap_err();
        assert!(matches!(err, Error::MissingKind));
        assert_eq!(mapper.calls.get(), 0);
    }

    #[test]
    fn unknown_endpoint_fails() {
        let mapper = RecordingMapper::new();
        let err = UrlBuilder::new(BASE, &mapper)
            .kind("Pod")
            .api_version("v2")
            .build()
            .unwrap_err();
        match err {
            Error::UnsupportedEndpoint { kind, api_version } => {
                assert_eq!(kind, "Pod");
                assert_eq!(api_version.as_deref(), Some("v2"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn supported_kind_without_endpoint_fails() {
        let mapper = RecordingMapper {
            hide_endpoints: true,
            ..RecordingMapper::new()
        };
        let err = pod_url(&mapper).build().unwrap_err();
        assert!(matches!(err, Error::UnsupportedEndpoint { .. }));
    }

    #[test]
    fn unrecognized_kind_still_builds() {
        let mapper = RecordingMapper::new();
        let url = UrlBuilder::new(BASE, &mapper).kind("Widget").namespace("ns").build().unwrap();
        assert_eq!(url.path(), "/apis/example.com/v1/namespaces/ns/widgets");

        let vocab = KindVocabulary::new().with_kind("Widget");
        let url = UrlBuilder::with_vocabulary(BASE, &mapper, &vocab)
            .kind("Widget")
            .build()
            .unwrap();
        assert_eq!(url.path(), "/apis/example.com/v1/widgets");
    }

    #[test]
    fn blank_parameter_values_are_dropped() {
        let mapper = RecordingMapper::new();
        let url = pod_url(&mapper)
            .add_parameter("a", "1")
            .add_parameter("b", "")
            .build()
            .unwrap();
        assert_eq!(url.query(), Some("a=1"));

        let url = pod_url(&mapper)
            .add_parameter("b", " ")
            .add_parameter("a", "1")
            .add_parameter("c", "2")
            .build()
            .unwrap();
        assert_eq!(url.query(), Some("a=1&c=2"));
    }

    #[test]
    fn only_blank_parameters_leave_an_empty_query() {
        let mapper = RecordingMapper::new();
        let url = pod_url(&mapper).add_parameter("b", "").build().unwrap();
        assert_eq!(url.to_string(), "https://api.example.com/api/v1/pods?");
    }

    #[test]
    fn blank_keys_are_kept() {
        let mapper = RecordingMapper::new();
        let url = pod_url(&mapper).add_parameter("", "x").build().unwrap();
        assert_eq!(url.query(), Some("=x"));
    }

    #[test]
    fn watch_is_not_deduplicated() {
        let mapper = RecordingMapper::new();
        let url = pod_url(&mapper).watch().build().unwrap();
        assert_eq!(url.query(), Some("watch=true"));
        let url = pod_url(&mapper).watch().watch().build().unwrap();
        assert_eq!(url.query(), Some("watch=true&watch=true"));
    }

    #[test]
    fn parameter_values_are_encoded() {
        let mapper = RecordingMapper::new();
        let url = pod_url(&mapper)
            .add_parameter("labelSelector", "app=web,tier in (a b)")
            .build()
            .unwrap();
        assert_eq!(url.query(), Some("labelSelector=app%3Dweb%2Ctier+in+%28a+b%29"));
    }

    #[test]
    fn parameter_keys_are_emitted_verbatim() {
        let mapper = RecordingMapper::new();
        let url = pod_url(&mapper)
            .add_parameter("a&b", "1")
            .add_parameter("c=d", "2")
            .build()
            .unwrap();
        assert_eq!(url.query(), Some("a&b=1&c=d=2"));

        let err = pod_url(&mapper).add_parameter("x#y", "1").build().unwrap_err();
        match err {
            Error::MalformedResult { url, source } => {
                assert_eq!(url, "https://api.example.com/api/v1/pods?x#y=1");
                assert!(matches!(source, MalformedUrlError::Delimiter { position: 37 }));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn non_breaking_spaces_are_not_blank() {
        assert!(is_blank(""));
        assert!(is_blank(" \t\r\n\u{1f}\u{3000}"));
        assert!(!is_blank("\u{a0}"));
        assert!(!is_blank("\u{202f}"));

        let mapper = RecordingMapper::new();
        let url = pod_url(&mapper).add_parameter("a", "\u{a0}").build().unwrap();
        assert_eq!(url.query(), Some("a=%C2%A0"));
        let err = pod_url(&mapper).namespace("\u{a0}").name("p").build().unwrap_err();
        assert!(matches!(err, Error::MalformedResult { .. }));
        let err = UrlBuilder::new(BASE, &mapper).kind("\u{a0}").build().unwrap_err();
        assert!(matches!(err, Error::UnsupportedEndpoint { .. }));
    }

    #[test]
    fn parameters_keep_iteration_order() {
        let mapper = RecordingMapper::new();
        let ordered = BTreeMap::from([("b", "2"), ("a", "1")]);
        let url = pod_url(&mapper)
            .add_parameter("z", "0")
            .add_parameters(ordered)
            .add_parameters(vec![("y".to_string(), "3".to_string())])
            .build()
            .unwrap();
        assert_eq!(url.query(), Some("z=0&a=1&b=2&y=3"));
    }

    #[test]
    fn websocket_swaps_the_scheme_only() {
        let mapper = RecordingMapper::new();
        let builder = pod_url(&mapper).namespace("myproj").add_parameter("x", "1");
        let url = builder.websocket().unwrap();
        assert_eq!(url, "wss://api.example.com/api/v1/namespaces/myproj/pods?x=1");

        let url = UrlBuilder::new("http://localhost:8080", &mapper)
            .kind("Pod")
            .watch()
            .websocket()
            .unwrap();
        assert_eq!(url, "wss://localhost:8080/api/v1/pods?watch=true");
    }

    #[test]
    fn trailing_slashes_are_stripped_from_base() {
        let mapper = RecordingMapper::new();
        let url = UrlBuilder::new("https://api.example.com:8443///", &mapper)
            .kind("Pod")
            .build()
            .unwrap();
        assert_eq!(url.to_string(), "https://api.example.com:8443/api/v1/pods");
    }

    #[test]
    fn later_calls_overwrite_earlier_ones() {
        let mapper = RecordingMapper::new();
        let url = pod_url(&mapper)
            .namespace("first")
            .namespace("")
            .name("a")
            .name("b")
            .namespace("second")
            .build()
            .unwrap();
        assert_eq!(url.path(), "/api/v1/namespaces/second/pods/b");
    }

    #[test]
    fn builder_can_be_built_again() {
        let mapper = RecordingMapper::new();
        let builder = pod_url(&mapper).namespace("myproj");
        let list = builder.build().unwrap();
        let builder = builder.name("mypod").subresource("log");
        let logs = builder.build().unwrap();
        assert_eq!(list.path(), "/api/v1/namespaces/myproj/pods");
        assert_eq!(logs.path(), "/api/v1/namespaces/myproj/pods/mypod/log");
        assert_eq!(builder.clone().build().unwrap(), logs);
    }

    #[test]
    fn malformed_result_is_reported() {
        let mapper = RecordingMapper::new();
        let err = pod_url(&mapper).name("my pod").build().unwrap_err();
        match err {
            Error::MalformedResult { url, source } => {
                assert_eq!(url, "https://api.example.com/api/v1/pods/my pod");
                assert!(matches!(source, MalformedUrlError::InvalidUri(_)));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn fragment_in_segment_is_malformed() {
        let mapper = RecordingMapper::new();
        let err = pod_url(&mapper).name("a#b").subresource("log").build().unwrap_err();
        match err {
            Error::MalformedResult { url, source } => {
                assert_eq!(url, "https://api.example.com/api/v1/pods/a#b/log");
                assert!(matches!(source, MalformedUrlError::Delimiter { position: 37 }));
            }
            other => panic!("unexpected error {other:?}"),
        }

        let err = pod_url(&mapper).namespace("ns#x").name("p").build().unwrap_err();
        assert!(matches!(err, Error::MalformedResult { .. }));
        let err = pod_url(&mapper).name("p").sub_context("c#1").build().unwrap_err();
        assert!(matches!(err, Error::MalformedResult { .. }));
        assert!(pod_url(&mapper).name("p").websocket().is_ok());
        assert!(pod_url(&mapper).name("a#b").websocket().is_err());
    }

    #[test]
    fn query_delimiter_in_segment_is_malformed() {
        let mapper = RecordingMapper::new();
        let err = pod_url(&mapper)
            .name("a?b")
            .add_parameter("x", "1")
            .build()
            .unwrap_err();
        match err {
            Error::MalformedResult { url, .. } => {
                assert_eq!(url, "https://api.example.com/api/v1/pods/a?b?x=1")
            }
            other => panic!("unexpected error {other:?}"),
        }
        // values are encoded, so delimiters there are harmless
        let url = pod_url(&mapper).add_parameter("x", "a?b#c").build().unwrap();
        assert_eq!(url.query(), Some("x=a%3Fb%23c"));
    }

    #[test]
    fn resource_fields_are_taken_from_objects() {
        let mapper = RecordingMapper::new();
        let pod: Pod = serde_json::from_value(serde_json::json!({
            "apiVersion": "v1",
            "kind": "Pod",
            "metadata": { "name": "mypod", "namespace": "myproj" },
        }))
        .unwrap();
        let url = UrlBuilder::for_resource(BASE, &mapper, &pod).build().unwrap();
        assert_eq!(url.path(), "/api/v1/namespaces/myproj/pods/mypod");

        let widget = DynamicObject::new("gizmo", &mapper.resources[5]);
        let url = UrlBuilder::new(BASE, &mapper)
            .namespace("kept")
            .resource(&widget)
            .build()
            .unwrap();
        assert_eq!(url.path(), "/apis/example.com/v1/namespaces/kept/widgets/gizmo");
    }

    #[test]
    fn untyped_resource_clears_the_kind() {
        let mapper = RecordingMapper::new();
        let untyped: DynamicObject = serde_json::from_value(serde_json::json!({
            "metadata": { "name": "orphan" },
        }))
        .unwrap();
        let err = pod_url(&mapper).resource(&untyped).build().unwrap_err();
        assert!(matches!(err, Error::MissingKind));
    }

    #[test]
    fn debug_omits_the_mapper() {
        let mapper = RecordingMapper::new();
        let dbg = format!("{:?}", pod_url(&mapper).name("mypod"));
        assert!(dbg.starts_with("UrlBuilder { base_url: \"https://api.example.com\""));
        assert!(dbg.contains("name: Some(\"mypod\")"));
    }
}
