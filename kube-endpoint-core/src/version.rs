//! Kubernetes version priority.
use std::{cmp::Ordering, convert::Infallible, str::FromStr};

/// A parsed Kubernetes api version such as `v1`, `v2beta1` or `v1alpha`
///
/// Ordered by [Kubernetes version priority](https://kubernetes.io/docs/tasks/extend-kubernetes/custom-resources/custom-resource-definition-versioning/#version-priority):
/// stable before beta before alpha before anything else, newer majors first.
/// The greatest value is the version a client should prefer:
///
/// ```
/// use kube_endpoint_core::Version;
/// let served = ["v1beta1", "oapi1", "v2alpha1", "v1"];
/// assert_eq!(Version::preferred(served, |v| *v), Some("v1"));
/// ```
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum Version {
    /// A major/GA release
    Stable(u32),
    /// A beta release for a specific major version
    Beta(u32, Option<u32>),
    /// An alpha release for a specific major version
    Alpha(u32, Option<u32>),
    /// A non-conformant version string, ordered lexicographically
    Nonconformant(String),
}

impl Version {
    fn try_parse(v: &str) -> Option<Version> {
        let v = v.strip_prefix('v')?;
        let digits = v.chars().take_while(char::is_ascii_digit).count();
        let major: u32 = v[..digits].parse().ok()?;
        let rest = &v[digits..];
        if rest.is_empty() {
            return Some(Version::Stable(major));
        }
        let prerelease = |suffix: &str| -> Option<Option<u32>> {
            if suffix.is_empty() {
                Some(None)
            } else {
                suffix.parse().ok().map(Some)
            }
        };
        if let Some(suffix) = rest.strip_prefix("alpha") {
            return prerelease(suffix).map(|n| Version::Alpha(major, n));
        }
        if let Some(suffix) = rest.strip_prefix("beta") {
            return prerelease(suffix).map(|n| Version::Beta(major, n));
        }
        None
    }

    /// An infallible parse of a Kubernetes version string
    ///
    /// ```
    /// use kube_endpoint_core::Version;
    /// assert_eq!(Version::parse("v10beta12"), Version::Beta(10, Some(12)));
    /// assert_eq!(Version::parse("1.0"), Version::Nonconformant("1.0".into()));
    /// ```
    pub fn parse(v: &str) -> Version {
        Self::try_parse(v).unwrap_or_else(|| Version::Nonconformant(v.to_string()))
    }
}

impl FromStr for Version {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Version::parse(s))
    }
}

impl Version {
    /// Pick the item served at the highest priority version
    ///
    /// Items with equal versions keep their order, so the first one wins.
    ///
    /// ```
    /// use kube_endpoint_core::Version;
    /// let served = [("apps", "v1beta2"), ("extensions", "v1beta1"), ("apps", "v1beta2")];
    /// assert_eq!(Version::preferred(served, |&(_, v)| v), Some(("apps", "v1beta2")));
    /// assert_eq!(Version::preferred(Vec::<&str>::new(), |v| *v), None);
    /// ```
    pub fn preferred<T>(items: impl IntoIterator<Item = T>, version_of: impl Fn(&T) -> &str) -> Option<T> {
        let mut best: Option<(Version, T)> = None;
        for item in items {
            let version = Version::parse(version_of(&item));
            if best.as_ref().map_or(true, |(top, _)| version > *top) {
                best = Some((version, item));
            }
        }
        best.map(|(_, item)| item)
    }

    // stability tier, then major, then prerelease number
    fn rank(&self) -> (u8, u32, Option<u32>) {
        match *self {
            Version::Stable(major) => (3, major, None),
            Version::Beta(major, n) => (2, major, n),
            Version::Alpha(major, n) => (1, major, n),
            Version::Nonconformant(_) => (0, 0, None),
        }
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            // earlier in the alphabet is preferred
            (Version::Nonconformant(a), Version::Nonconformant(b)) => b.cmp(a),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
