mod support;

use std::io::Cursor;
use std::net::UdpSocket;
use std::time::Duration;

use rdt::proto::{AckPacket, DataPacket};
use support::*;

#[test]
fn byte_exact_delivery_under_no_loss() {
    let input: Vec<u8> = (0..5000u32).map(|i| ((i * 7) % 256) as u8).collect();

    let receiver_socket = bind_loopback();
    let receiver_addr = receiver_socket.local_addr().unwrap();
    let receiver = spawn_sr_receiver(receiver_socket, lossless_receiver_config());

    let sender_socket = bind_loopback();
    rdt::sr::send(
        Cursor::new(input.clone()),
        &sender_socket,
        receiver_addr,
        lossless_sender_config(),
    )
    .expect("sr send failed");

    let output = receiver.join().expect("receiver thread panicked");
    assert_eq!(output, input);
}

#[test]
fn buffers_out_of_order_arrivals_and_delivers_contiguous_prefix() {
    // Scenario D: drop data seq=2 once; seqs 3, 4 arrive first and get
    // buffered; once 2 is retransmitted, 2/3/4 deliver contiguously.
    let input: Vec<u8> = (0..(2048 * 5 + 100) as u32)
        .map(|i| ((i * 3) % 256) as u8)
        .collect();

    let receiver_socket = bind_loopback();
    let receiver_addr = receiver_socket.local_addr().unwrap();
    let receiver = spawn_sr_receiver(receiver_socket, lossless_receiver_config());

    let drop_seq_2 = drop_once(|bytes| bytes.len() >= 3 && bytes[0] == 2 && bytes[1] == 0);
    let proxy_addr = spawn_proxy(receiver_addr, drop_seq_2, |_| false);

    let sender_socket = bind_loopback();
    rdt::sr::send(
        Cursor::new(input.clone()),
        &sender_socket,
        proxy_addr,
        lossless_sender_config(),
    )
    .expect("sr send failed");

    let output = receiver.join().expect("receiver thread panicked");
    assert_eq!(output, input);
}

#[test]
fn duplicate_data_packet_is_delivered_only_once() {
    // Scenario E: the receiver ACKs seq=0 twice but the sink receives
    // chunk 0 exactly once. Driven directly with a raw UDP client so
    // the duplicate is sent deterministically rather than relying on
    // the sender's own retransmit timing.
    let receiver_socket = bind_loopback();
    let receiver_addr = receiver_socket.local_addr().unwrap();
    let receiver = spawn_sr_receiver(receiver_socket, lossless_receiver_config());

    let client = UdpSocket::bind("127.0.0.1:0").unwrap();
    client
        .set_read_timeout(Some(Duration::from_millis(500)))
        .unwrap();

    let chunk = vec![42u8; 100];
    let pkt = DataPacket::data(0, chunk.clone());

    client.send_to(&pkt.encode(), receiver_addr).unwrap();
    let mut buf = [0u8; 64];
    let (n, _) = client.recv_from(&mut buf).unwrap();
    let ack = AckPacket::decode(&buf[..n]).unwrap();
    assert_eq!(ack.ack_seq, 0);

    // Replay the exact same datagram.
    client.send_to(&pkt.encode(), receiver_addr).unwrap();
    let (n, _) = client.recv_from(&mut buf).unwrap();
    let ack = AckPacket::decode(&buf[..n]).unwrap();
    assert_eq!(ack.ack_seq, 0);

    client
        .send_to(&DataPacket::end_of_stream().encode(), receiver_addr)
        .unwrap();

    let output = receiver.join().expect("receiver thread panicked");
    assert_eq!(output, chunk);
}

#[test]
fn ack_outside_the_window_is_rejected() {
    use rdt::proto::forward_distance;

    let window_size = 10;
    let front = 5u8;

    // Exactly at the edge: accepted.
    assert!(forward_distance(front, front.wrapping_add(9)) < window_size);
    // One past the edge: rejected.
    assert!(!(forward_distance(front, front.wrapping_add(10)) < window_size));
}
