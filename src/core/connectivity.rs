use std::time::Duration;

use url::{Host, Url};

const LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    Online,
    Offline,
}

/// Resolves the host of `request_url` to decide whether a fetch is worth starting.
///
/// A URL that does not parse counts as online: the fetch itself reports it.
/// IP literals need no lookup and count as online.
pub async fn probe(request_url: &str) -> Connectivity {
    let Ok(url) = Url::parse(request_url) else {
        return Connectivity::Online;
    };
    let port = url.port_or_known_default().unwrap_or(80);
    let host = url.host();

    match host {
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => Connectivity::Online,
        Some(Host::Domain(domain)) => resolve_domain(domain, port).await,
        None => {
            tracing::warn!(request_url, "request url has no host");
            Connectivity::Offline
        }
    }
}

async fn resolve_domain(host: &str, port: u16) -> Connectivity {
    let lookup =
        tokio::time::timeout(LOOKUP_TIMEOUT, tokio::net::lookup_host((host, port))).await;
    match lookup {
        Ok(Ok(mut addresses)) => {
            if addresses.next().is_some() {
                Connectivity::Online
            } else {
                tracing::warn!(host, "host resolved to no addresses");
                Connectivity::Offline
            }
        }
        Ok(Err(error)) => {
            tracing::warn!(host, error = %error, "could not resolve host");
            Connectivity::Offline
        }
        Err(_) => {
            tracing::warn!(host, "timed out resolving host");
            Connectivity::Offline
        }
    }
}
