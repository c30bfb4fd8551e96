//! Thin UDP collaborators: a lossy send wrapper and a deadline-bounded
//! receive, used identically by both protocol variants. Socket I/O is
//! treated as an interface contract the core consumes, so this stays
//! minimal.

use std::io;
use std::net::{SocketAddr, UdpSocket};
use std::time::Instant;

use super::loss::LossInjector;

/// Sends `bytes` to `peer`, subject to the loss injector's Bernoulli
/// drop and artificial delay. A "dropped" send still pays the delay
/// (it models a packet that left the wire and never arrived).
pub fn send_lossy(
    socket: &UdpSocket,
    peer: SocketAddr,
    bytes: &[u8],
    loss: &LossInjector,
) -> io::Result<()> {
    if loss.should_drop() {
        log::debug!("simulated loss of {} byte datagram to {peer}", bytes.len());
    } else {
        socket.send_to(bytes, peer)?;
    }
    loss.delay();
    Ok(())
}

/// Blocks for at most `deadline - now` waiting for a datagram.
/// Returns `Ok(None)` on timeout, never blocking past `deadline`.
pub fn recv_until(
    socket: &UdpSocket,
    buf: &mut [u8],
    deadline: Instant,
) -> io::Result<Option<(usize, SocketAddr)>> {
    let now = Instant::now();
    if now >= deadline {
        return Ok(None);
    }

    socket.set_read_timeout(Some(deadline - now))?;
    match socket.recv_from(buf) {
        Ok(received) => Ok(Some(received)),
        Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => {
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
