//! Shared test harness: loopback sockets, a lossless default config,
//! and a deterministic forced-drop proxy used instead of the
//! library's own (randomized) loss injector, so single-packet-drop
//! scenarios are reproducible rather than flaky.

use std::net::{SocketAddr, UdpSocket};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rdt::proto::{ReceiverConfig, SenderConfig};

/// A config with loss and artificial delay disabled, so tests run fast
/// and deterministically; a small window keeps ring-buffer wraparound
/// reachable without huge payloads.
pub fn lossless_sender_config() -> SenderConfig {
    SenderConfig {
        window_size: 10,
        timeout: Duration::from_millis(500),
        loss_rate: 0.0,
        send_delay: Duration::ZERO,
    }
}

pub fn lossless_receiver_config() -> ReceiverConfig {
    ReceiverConfig {
        window_size: 10,
        loss_rate: 0.0,
        send_delay: Duration::ZERO,
    }
}

pub fn bind_loopback() -> UdpSocket {
    UdpSocket::bind("127.0.0.1:0").expect("failed to bind loopback socket")
}

/// A one-shot deterministic drop: drops the first datagram matching
/// `matches`, forwards everything else (including later datagrams
/// that also match).
pub fn drop_once(matches: impl Fn(&[u8]) -> bool + Send + Sync + 'static) -> impl Fn(&[u8]) -> bool {
    let fired = Arc::new(AtomicBool::new(false));
    move |bytes: &[u8]| {
        if matches(bytes) && !fired.swap(true, Ordering::SeqCst) {
            return true;
        }
        false
    }
}

/// A UDP middlebox sitting between a sender and `upstream` (the real
/// receiver), forwarding datagrams in both directions while applying
/// independent drop predicates per direction. Models "drop this one
/// packet" scenarios deterministically, without relying on the
/// library's randomized loss injector.
pub fn spawn_proxy(
    upstream: SocketAddr,
    drop_sender_to_receiver: impl Fn(&[u8]) -> bool + Send + 'static,
    drop_receiver_to_sender: impl Fn(&[u8]) -> bool + Send + 'static,
) -> SocketAddr {
    let downstream = bind_loopback();
    let upstream_socket = bind_loopback();
    let proxy_addr = downstream.local_addr().unwrap();

    downstream
        .set_read_timeout(Some(Duration::from_millis(20)))
        .unwrap();
    upstream_socket
        .set_read_timeout(Some(Duration::from_millis(20)))
        .unwrap();

    thread::spawn(move || {
        let mut sender_addr: Option<SocketAddr> = None;
        let mut buf = [0u8; 4096];

        loop {
            if let Ok((n, from)) = downstream.recv_from(&mut buf) {
                sender_addr = Some(from);
                if !drop_sender_to_receiver(&buf[..n]) {
                    let _ = upstream_socket.send_to(&buf[..n], upstream);
                }
            }

            if let Some(sender_addr) = sender_addr {
                if let Ok((n, _)) = upstream_socket.recv_from(&mut buf) {
                    if !drop_receiver_to_sender(&buf[..n]) {
                        let _ = downstream.send_to(&buf[..n], sender_addr);
                    }
                }
            }
        }
    });

    proxy_addr
}

pub type ReceiveHandle = JoinHandle<Vec<u8>>;

pub fn spawn_gbn_receiver(socket: UdpSocket, cfg: ReceiverConfig) -> ReceiveHandle {
    thread::spawn(move || {
        let mut output = Vec::new();
        rdt::gbn::receive(&mut output, &socket, cfg).expect("gbn receive failed");
        output
    })
}

pub fn spawn_sr_receiver(socket: UdpSocket, cfg: ReceiverConfig) -> ReceiveHandle {
    thread::spawn(move || {
        let mut output = Vec::new();
        rdt::sr::receive(&mut output, &socket, cfg).expect("sr receive failed");
        output
    })
}
