//! Locating the api server, either explicitly or from the [cluster environment](https://kubernetes.io/docs/tasks/access-application-cluster/access-cluster/#accessing-the-api-from-a-pod).
//!
//! # Usage
//! Construct a [`Config`] and use [`Config::url_builder`] to resolve urls against its cluster.
mod incluster_config;

use crate::{error::ConfigError, ApiTypeMapper, Result, UrlBuilder};

const DEFAULT_NAMESPACE: &str = "default";

/// Configuration object detailing the cluster url and default namespace.
#[derive(Debug, Clone)]
pub struct Config {
    /// The configured cluster url
    pub cluster_url: http::Uri,
    /// The configured default namespace
    pub default_namespace: String,
}

impl Config {
    /// Construct a new config where only the `cluster_url` is set by the user,
    /// and everything else receives a default value.
    pub fn new(cluster_url: http::Uri) -> Self {
        Self {
            cluster_url,
            default_namespace: String::from(DEFAULT_NAMESPACE),
        }
    }

    /// Create configuration from the cluster's environment variables
    ///
    /// Reads `KUBERNETES_SERVICE_HOST` and `KUBERNETES_SERVICE_PORT`, and the namespace of
    /// the mounted service account, falling back to `default` when none is mounted.
    pub fn incluster_env() -> Result<Self> {
        let cluster_url = incluster_config::kube_server()
            .ok_or(ConfigError::MissingInClusterVariables {
                hostenv: incluster_config::SERVICE_HOSTENV,
                portenv: incluster_config::SERVICE_PORTENV,
            })?
            .parse::<http::Uri>()
            .map_err(ConfigError::ParseClusterUrl)?;

        let default_namespace = incluster_config::load_default_ns()
            .map_err(ConfigError::InvalidInClusterNamespace)?
            .unwrap_or_else(|| String::from(DEFAULT_NAMESPACE));
        tracing::debug!(
            cluster_url = %cluster_url,
            namespace = default_namespace.as_str(),
            "Loaded in-cluster config"
        );

        Ok(Self {
            cluster_url,
            default_namespace,
        })
    }

    /// A [`UrlBuilder`] rooted at the cluster url
    pub fn url_builder<'a, M: ApiTypeMapper + ?Sized>(&self, mapper: &'a M) -> UrlBuilder<'a, M> {
        UrlBuilder::new(self.cluster_url.to_string(), mapper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VersionedApiResource;

    #[test]
    fn url_builder_uses_cluster_url() {
        let config = Config::new(http::Uri::from_static("https://kubernetes.default.svc/"));
        assert_eq!(config.default_namespace, "default");

        let mapper = vec![VersionedApiResource::new("api", "", "v1", "Pod", "pods")];
        let url = config
            .url_builder(&mapper)
            .kind("Pod")
            .namespace(&config.default_namespace)
            .build()
            .unwrap();
        assert_eq!(
            url.to_string(),
            "https://kubernetes.default.svc/api/v1/namespaces/default/pods"
        );
    }
}
