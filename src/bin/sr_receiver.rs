use std::env;
use std::fs::File;
use std::net::UdpSocket;

use rdt::proto::config::{ReceiverConfig, SR_PORT};

fn main() {
    env_logger::init();

    let mut args = env::args().skip(1);
    let output_path = args
        .next()
        .expect("usage: sr-receiver <output-file> [bind-addr]");
    let bind_addr = args.next().unwrap_or_else(|| format!("0.0.0.0:{SR_PORT}"));

    let output = File::create(&output_path).expect("failed to create output file");
    let socket = UdpSocket::bind(&bind_addr).expect("failed to bind socket");

    rdt::sr::receive(output, &socket, ReceiverConfig::default()).expect("sr transfer failed");
}
