use std::env;
use std::fs::File;
use std::net::UdpSocket;

use rdt::proto::config::{GBN_PORT, SenderConfig};

fn main() {
    env_logger::init();

    let mut args = env::args().skip(1);
    let input_path = args.next().expect("usage: gbn-sender <input-file> [peer-addr]");
    let peer_addr = args
        .next()
        .unwrap_or_else(|| format!("127.0.0.1:{GBN_PORT}"));

    let input = File::open(&input_path).expect("failed to open input file");
    let peer = peer_addr.parse().expect("invalid peer address");

    let socket = UdpSocket::bind("0.0.0.0:0").expect("failed to bind local socket");

    rdt::gbn::send(input, &socket, peer, SenderConfig::default()).expect("gbn transfer failed");
}
