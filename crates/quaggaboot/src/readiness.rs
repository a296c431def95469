//! Waits for zebra's API socket before protocol daemons start.
//!
//! Protocol daemons connect to zebra as soon as they start, so they must not
//! be launched before zebra's socket accepts connections. The probe polls the
//! socket until it answers or the configured bound elapses.

use std::io;
use std::thread;
use std::time::{Duration, Instant};

use camino::Utf8Path;
#[cfg(unix)]
use socket2::{Domain, SockAddr, Socket, Type};

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const CONNECT_TIMEOUT: Duration = Duration::from_millis(500);

/// Result of waiting for the mandatory daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// The socket accepted a connection.
    Ready,
    /// The bound elapsed without a successful connection.
    TimedOut,
}

/// Blocks until the mandatory daemon is ready to serve dependents.
pub trait ReadinessProbe: Send + Sync {
    /// Waits at most `timeout` for `socket` to accept connections.
    fn wait_ready(&self, socket: &Utf8Path, timeout: Duration) -> Readiness;
}

/// Probe that connects to a Unix domain socket.
#[derive(Debug, Clone, Copy)]
pub struct SocketProbe {
    poll_interval: Duration,
}

impl SocketProbe {
    /// Builds a probe using the default poll interval.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            poll_interval: POLL_INTERVAL,
        }
    }
}

impl Default for SocketProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadinessProbe for SocketProbe {
    fn wait_ready(&self, socket: &Utf8Path, timeout: Duration) -> Readiness {
        let deadline = Instant::now() + timeout;
        loop {
            if connect_unix(socket).is_ok() {
                return Readiness::Ready;
            }
            let now = Instant::now();
            if now >= deadline {
                return Readiness::TimedOut;
            }
            thread::sleep(self.poll_interval.min(deadline - now));
        }
    }
}

#[cfg(unix)]
fn connect_unix(path: &Utf8Path) -> io::Result<()> {
    let socket = Socket::new(Domain::UNIX, Type::STREAM, None)?;
    let address = SockAddr::unix(path.as_std_path())?;
    socket.connect_timeout(&address, CONNECT_TIMEOUT)
}

#[cfg(not(unix))]
fn connect_unix(_path: &Utf8Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "unix sockets unsupported on this platform",
    ))
}
