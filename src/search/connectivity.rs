//! Network reachability gate.
//!
//! Consulted once per dispatch, before any request is built into traffic. The
//! answer is best-effort: a reachable probe does not guarantee the fetch
//! itself succeeds, so fetch failures stay a separate outcome.

use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use tracing::debug;

pub trait Connectivity: Send + Sync {
    /// Cheap, synchronous, side-effect-free reachability check.
    fn is_reachable(&self) -> bool;
}

/// Probes a `host:port` with a short connect timeout.
///
/// The default target is the API host itself, so "reachable" means "the
/// endpoint we are about to talk to accepts connections", not just "some
/// interface is up".
pub struct TcpProbe {
    addr: String,
    timeout: Duration,
}

impl TcpProbe {
    pub fn new(addr: &str, timeout: Duration) -> Self {
        Self {
            addr: addr.to_string(),
            timeout,
        }
    }
}

impl Connectivity for TcpProbe {
    fn is_reachable(&self) -> bool {
        let addrs = match self.addr.to_socket_addrs() {
            Ok(addrs) => addrs,
            Err(err) => {
                debug!("probe resolve failed for {}: {err}", self.addr);
                return false;
            }
        };
        for addr in addrs {
            if TcpStream::connect_timeout(&addr, self.timeout).is_ok() {
                return true;
            }
        }
        debug!("probe could not connect to {}", self.addr);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    #[test]
    fn reachable_when_something_listens() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let probe = TcpProbe::new(&addr.to_string(), Duration::from_millis(500));
        assert!(probe.is_reachable());
    }

    #[test]
    fn unreachable_on_unresolvable_host() {
        let probe = TcpProbe::new("nonexistent.invalid:443", Duration::from_millis(200));
        assert!(!probe.is_reachable());
    }
}
