//! The resource kind vocabulary known to this client at compile time.
use std::{collections::BTreeSet, fmt, str::FromStr};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown resource kind: {0}")]
/// The kind string is not part of [`ResourceKind`].
pub struct UnknownKind(pub String);

macro_rules! resource_kinds {
    ($($(#[$doc:meta])* $variant:ident,)+) => {
        /// Resource kinds known to this client
        ///
        /// The list is closed at compile time, but the rest of the crate accepts any kind
        /// string so that API extensions unknown to this build can still be addressed.
        /// Use [`KindVocabulary`] to teach the diagnostics about additional kinds.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum ResourceKind {
            $($(#[$doc])* $variant,)+
        }

        impl ResourceKind {
            /// Every known kind, in declaration order
            pub const ALL: &'static [ResourceKind] = &[$(ResourceKind::$variant,)+];

            /// The kind string as it appears in a manifest
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(ResourceKind::$variant => stringify!($variant),)+
                }
            }
        }

        impl FromStr for ResourceKind {
            type Err = UnknownKind;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $(stringify!($variant) => Ok(ResourceKind::$variant),)+
                    _ => Err(UnknownKind(s.to_string())),
                }
            }
        }
    };
}

resource_kinds! {
    /// OpenShift build run
    Build,
    /// OpenShift build definition
    BuildConfig,
    /// Configuration data consumed by pods
    ConfigMap,
    /// Scheduled job
    CronJob,
    /// Node-wide workload
    DaemonSet,
    /// Declarative rollout of replica sets
    Deployment,
    /// OpenShift rollout definition
    DeploymentConfig,
    /// Cluster event
    Event,
    /// OpenShift user group
    Group,
    /// Autoscaler for scalable workloads
    HorizontalPodAutoscaler,
    /// OpenShift identity provider mapping
    Identity,
    /// OpenShift image repository
    ImageStream,
    /// Import request for an image stream
    ImageStreamImport,
    /// Tagged image inside an image stream
    ImageStreamTag,
    /// HTTP ingress rules
    Ingress,
    /// Run-to-completion workload
    Job,
    /// Per-namespace resource limits
    LimitRange,
    /// Generic list
    List,
    /// Namespace
    Namespace,
    /// Network access rules
    NetworkPolicy,
    /// Cluster node
    Node,
    /// OAuth access token
    OAuthAccessToken,
    /// OAuth authorize token
    OAuthAuthorizeToken,
    /// OAuth client
    OAuthClient,
    /// OAuth client authorization
    OAuthClientAuthorization,
    /// Storage volume
    PersistentVolume,
    /// Claim on a storage volume
    PersistentVolumeClaim,
    /// Pod
    Pod,
    /// OpenShift authorization policy
    Policy,
    /// OpenShift authorization policy binding
    PolicyBinding,
    /// Result of processing a template
    ProcessedTemplates,
    /// OpenShift project, the cluster-scoped view of a namespace
    Project,
    /// Request to create a project
    ProjectRequest,
    /// Replicated pod set
    ReplicaSet,
    /// Legacy replicated pod set
    ReplicationController,
    /// Per-namespace quota
    ResourceQuota,
    /// Authorization role
    Role,
    /// Authorization role binding
    RoleBinding,
    /// OpenShift route
    Route,
    /// Secret data
    Secret,
    /// Service
    Service,
    /// Identity for processes in pods
    ServiceAccount,
    /// Stateful workload
    StatefulSet,
    /// API status
    Status,
    /// OpenShift template
    Template,
    /// OpenShift user
    User,
}

impl ResourceKind {
    /// Whether instances of this kind live outside of any namespace
    ///
    /// Namespaces are never rendered into the url path of these kinds.
    pub fn is_cluster_scoped(&self) -> bool {
        matches!(self, ResourceKind::Project)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for ResourceKind {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<ResourceKind> for String {
    fn from(kind: ResourceKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Whether a kind string names a kind that is never namespaced
pub fn is_cluster_scoped(kind: &str) -> bool {
    kind.parse::<ResourceKind>()
        .map(|k| k.is_cluster_scoped())
        .unwrap_or(false)
}

/// The set of kinds a client recognises
///
/// Contains every [`ResourceKind`] plus any kind registered at runtime.
/// Membership is only used for diagnostics; unknown kinds are never rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KindVocabulary {
    extra: BTreeSet<String>,
}

impl KindVocabulary {
    /// A vocabulary containing only the compiled [`ResourceKind`]s
    pub const fn new() -> Self {
        Self { extra: BTreeSet::new() }
    }

    /// Shared instance of [`KindVocabulary::new`]
    pub fn builtin() -> &'static KindVocabulary {
        static BUILTIN: KindVocabulary = KindVocabulary::new();
        &BUILTIN
    }

    /// Register an additional kind
    ///
    /// Returns `false` when the kind was already known.
    pub fn register(&mut self, kind: impl Into<String>) -> bool {
        let kind = kind.into();
        if kind.parse::<ResourceKind>().is_ok() {
            return false;
        }
        self.extra.insert(kind)
    }

    /// Builder style variant of [`KindVocabulary::register`]
    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.register(kind);
        self
    }

    /// Whether the kind is recognised
    pub fn contains(&self, kind: &str) -> bool {
        kind.parse::<ResourceKind>().is_ok() || self.extra.contains(kind)
    }

    /// Kinds registered at runtime
    pub fn registered(&self) -> impl Iterator<Item = &str> {
        self.extra.iter().map(String::as_str)
    }
}
