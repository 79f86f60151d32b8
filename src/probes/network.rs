//! Network-egress probe
//!
//! Creates an IPv4 stream socket and tries to reach a public DNS resolver.
//! Socket creation and connection are observed separately: a sandbox that
//! refuses the socket itself is just as contained as one that drops the
//! connect, and the probe then never tries to connect.

use log::debug;
use nix::sys::socket::{
    connect, setsockopt, socket, sockopt, AddressFamily, SockFlag, SockType, SockaddrIn,
};
use nix::sys::time::{TimeVal, TimeValLike};
use std::io::Write;
use std::net::SocketAddrV4;
use std::os::fd::{AsRawFd, OwnedFd};
use std::time::Duration;

use crate::errors::Result;
use crate::policy::{CONNECT_TIMEOUT, EGRESS_TARGET};
use crate::verdict::{attempt, Reporter, Verdict};

/// The two platform steps of an outbound connection
pub trait Dialer {
    type Socket;

    fn open(&mut self) -> Result<Self::Socket>;

    fn connect(&mut self, socket: &Self::Socket, target: SocketAddrV4) -> Result<()>;
}

/// Plain TCP over the host's socket API
#[derive(Debug, Clone)]
pub struct TcpDialer {
    timeout: Duration,
}

impl TcpDialer {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for TcpDialer {
    fn default() -> Self {
        Self::new(CONNECT_TIMEOUT)
    }
}

impl Dialer for TcpDialer {
    type Socket = OwnedFd;

    fn open(&mut self) -> Result<OwnedFd> {
        let fd = socket(
            AddressFamily::Inet,
            SockType::Stream,
            SockFlag::SOCK_CLOEXEC,
            None,
        )?;
        Ok(fd)
    }

    fn connect(&mut self, socket: &OwnedFd, target: SocketAddrV4) -> Result<()> {
        // Linux bounds a blocking connect by the send timeout.
        let millis = i64::try_from(self.timeout.as_millis()).unwrap_or(i64::MAX);
        setsockopt(socket, sockopt::SendTimeout, &TimeVal::milliseconds(millis))?;
        connect(socket.as_raw_fd(), &SockaddrIn::from(target))?;
        Ok(())
    }
}

pub fn run<W: Write>(reporter: &mut Reporter<W>) {
    run_with(reporter, &mut TcpDialer::default(), EGRESS_TARGET);
}

pub fn run_with<W: Write, D: Dialer>(
    reporter: &mut Reporter<W>,
    dialer: &mut D,
    target: SocketAddrV4,
) {
    reporter.line("Attempting to access network...");
    let subject = format!("Could not connect to {}", target);
    attempt(reporter, &subject, |r| r.verdict(&probe(dialer, target)));
}

/// One socket, one connect. The socket is dropped, and so closed, before
/// this returns whatever the outcome.
pub fn probe<D: Dialer>(dialer: &mut D, target: SocketAddrV4) -> Verdict {
    let socket = match dialer.open() {
        Ok(socket) => socket,
        Err(e) => {
            debug!("socket creation refused: {}", e);
            return Verdict::blocked("Could not create socket");
        }
    };

    debug!("connecting to {}", target);
    match dialer.connect(&socket, target) {
        Ok(()) => Verdict::success(format!("Connected to {}", target)),
        Err(e) => {
            debug!("connect to {} failed: {}", target, e);
            Verdict::blocked(format!("Could not connect to {}", target))
        }
    }
}
