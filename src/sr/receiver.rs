//! Selective Repeat receiver: buffers out-of-order arrivals within the
//! receive window, per-packet ACKs, delivers the longest contiguous
//! prefix to the sink.

use std::io::Write;
use std::net::{SocketAddr, UdpSocket};

use crate::err::Error;
use crate::proto::config::BUFFER_SIZE;
use crate::proto::send_lossy;
use crate::proto::{AckPacket, DataPacket, LossInjector, ReceiverConfig, RingBuffer};
use crate::proto::forward_distance;

/// Reads datagrams from `socket` until the end-of-stream packet
/// arrives, buffering out-of-order payloads and delivering the
/// longest contiguous prefix to `output` as it becomes available.
pub fn receive<W: Write>(
    mut output: W,
    socket: &UdpSocket,
    cfg: ReceiverConfig,
) -> Result<(), Error> {
    let loss = LossInjector::new(cfg.loss_rate, cfg.send_delay);
    let mut window: RingBuffer<Vec<u8>> = RingBuffer::new();
    let mut client_address: Option<SocketAddr> = None;
    let mut buf = [0u8; BUFFER_SIZE];

    loop {
        let (n, from) = socket.recv_from(&mut buf)?;
        let client_address = *client_address.get_or_insert(from);

        let Some(pkt) = DataPacket::decode(&buf[..n]) else {
            continue;
        };

        if pkt.end_flag {
            log::info!("sr receiver: end-of-stream received");
            output.flush()?;
            return Ok(());
        }

        let front = window.front();
        let fwd = forward_distance(front as u8, pkt.seq_num);

        if fwd < cfg.window_size {
            if window.get(pkt.seq_num as usize).is_some() {
                log::debug!("sr receiver: duplicate seq={}", pkt.seq_num);
                ack(socket, client_address, pkt.seq_num, &loss)?;
            } else if pkt.is_intact() {
                log::debug!("sr receiver: buffering seq={}", pkt.seq_num);
                window.set(pkt.seq_num as usize, pkt.payload);

                let new_rear_pos = forward_distance(front as u8, pkt.seq_num.wrapping_add(1));
                let rear_pos = forward_distance(front as u8, window.rear() as u8);
                if new_rear_pos > rear_pos {
                    window.set_rear(pkt.seq_num as usize + 1);
                }

                ack(socket, client_address, pkt.seq_num, &loss)?;
            } else {
                log::debug!("sr receiver: corrupt seq={}, dropped", pkt.seq_num);
            }
        } else if forward_distance(pkt.seq_num, front as u8) <= cfg.window_size {
            log::debug!("sr receiver: re-ack already-delivered seq={}", pkt.seq_num);
            ack(socket, client_address, pkt.seq_num, &loss)?;
        } else {
            log::debug!("sr receiver: seq={} outside both windows, dropped", pkt.seq_num);
        }

        while !window.is_empty() && window.peek().is_some() {
            let payload = window.dequeue().unwrap();
            log::debug!("sr receiver: delivering {} bytes", payload.len());
            output.write_all(&payload)?;
        }
    }
}

fn ack(
    socket: &UdpSocket,
    peer: SocketAddr,
    seq: u8,
    loss: &LossInjector,
) -> Result<(), Error> {
    let pkt = AckPacket::new(seq);
    send_lossy(socket, peer, &pkt.encode(), loss)?;
    Ok(())
}
