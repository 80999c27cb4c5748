//! Error handling in [`kube_endpoint`][crate]
use thiserror::Error;

pub use kube_endpoint_core::gvk::ParseGroupVersionError;

/// Possible errors when resolving urls with [`kube_endpoint`][crate]
#[derive(Error, Debug)]
pub enum Error {
    /// No kind was set before building
    ///
    /// Raised before the type mapper is consulted.
    #[error("Unable to build a url because the resource kind is unknown")]
    MissingKind,

    /// The type mapper knows no endpoint for the kind at the requested version
    #[error("Unable to determine the api endpoint for kind '{kind}'")]
    UnsupportedEndpoint {
        /// The requested kind
        kind: String,
        /// The requested apiVersion, if any
        api_version: Option<String>,
    },

    /// The resolved endpoint does not serve the requested subresource
    #[error("The api endpoint for kind '{kind}' and subresource '{subresource}' is not supported by the cluster")]
    UnsupportedSubresource {
        /// The requested kind
        kind: String,
        /// The requested subresource
        subresource: String,
    },

    /// The assembled url is not a valid url, or would not address the requested resource
    ///
    /// Well formed names and a well formed base url never produce this.
    #[error("Assembled url is malformed: {url}: {source}")]
    MalformedResult {
        /// The assembled url
        url: String,
        /// Why the url was rejected
        #[source]
        source: MalformedUrlError,
    },

    /// A query parameter value could not be encoded into the query string
    ///
    /// Values are utf-8 and percent-encode losslessly, so
    /// [`UrlBuilder`](crate::UrlBuilder) does not currently raise this.
    #[error("Unable to encode query parameter '{key}'")]
    ParameterEncoding {
        /// The offending parameter key
        key: String,
    },

    /// Discovery errors
    #[error("Error from discovery: {0}")]
    Discovery(#[source] DiscoveryError),

    /// Configuration error
    #[error("Error loading config: {0}")]
    Config(#[source] ConfigError),
}

#[derive(Error, Debug)]
// Redundant with the error messages and machine names
#[allow(missing_docs)]
/// Reasons an assembled url is rejected
pub enum MalformedUrlError {
    #[error(transparent)]
    InvalidUri(#[from] http::uri::InvalidUri),
    #[error("a path segment or parameter key contains a delimiter at byte {position}")]
    Delimiter { position: usize },
}

#[derive(Error, Debug)]
// Redundant with the error messages and machine names
#[allow(missing_docs)]
/// Possible errors when loading discovery documents
pub enum DiscoveryError {
    #[error("Invalid GroupVersion: {0}")]
    InvalidGroupVersion(#[source] ParseGroupVersionError),
    #[error("Failed to parse discovery document: {0}")]
    Parse(#[source] serde_json::Error),
}

#[derive(Error, Debug)]
// Redundant with the error messages and machine names
#[allow(missing_docs)]
/// Possible errors when loading config
pub enum ConfigError {
    #[error("Unable to load in cluster config, {hostenv} and {portenv} must be defined")]
    /// One or more required in-cluster config options are missing
    MissingInClusterVariables {
        hostenv: &'static str,
        portenv: &'static str,
    },

    #[error("Failed to parse cluster url: {0}")]
    ParseClusterUrl(#[source] http::uri::InvalidUri),

    #[error("Unable to load incluster default namespace: {0}")]
    InvalidInClusterNamespace(#[source] std::io::Error),
}

impl From<DiscoveryError> for Error {
    fn from(err: DiscoveryError) -> Self {
        Error::Discovery(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Config(err)
    }
}
