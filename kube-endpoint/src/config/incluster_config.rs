use std::{env, io, path::Path};

pub const SERVICE_HOSTENV: &str = "KUBERNETES_SERVICE_HOST";
pub const SERVICE_PORTENV: &str = "KUBERNETES_SERVICE_PORT";
const SERVICE_DEFAULT_NS: &str = "/var/run/secrets/kubernetes.io/serviceaccount/namespace";

/// Returns the api server address from the service environment variables.
pub fn kube_server() -> Option<String> {
    let host = env::var(SERVICE_HOSTENV).ok()?;
    let port = env::var(SERVICE_PORTENV).ok()?;
    Some(server_url(&host, &port))
}

fn server_url(host: &str, port: &str) -> String {
    // ipv6 literals need brackets
    if host.contains(':') && !host.starts_with('[') {
        format!("https://[{host}]:{port}")
    } else {
        format!("https://{host}:{port}")
    }
}

/// Returns the default namespace of the mounted service account.
///
/// `None` when no service account namespace is mounted.
pub fn load_default_ns() -> io::Result<Option<String>> {
    read_namespace(Path::new(SERVICE_DEFAULT_NS))
}

fn read_namespace(path: &Path) -> io::Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(ns) => Ok(Some(ns.trim().to_string()).filter(|ns| !ns.is_empty())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}
