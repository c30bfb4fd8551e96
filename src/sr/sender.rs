//! Selective Repeat sender: per-packet ACKs and selective
//! retransmission of only the un-ACKed slots still in the window.

use std::io::Read;
use std::net::{SocketAddr, UdpSocket};
use std::time::Instant;

use crate::err::Error;
use crate::proto::config::{BUFFER_SIZE, END_OF_STREAM_REPEAT};
use crate::proto::{chunk_input, forward_distance, recv_until, send_lossy};
use crate::proto::{AckPacket, DataPacket, LossInjector, RingBuffer, SenderConfig};

#[derive(Debug, Clone)]
struct Slot {
    payload: Vec<u8>,
    sent: bool,
    acked: bool,
}

/// Transmits every chunk of `input` to `peer`, selectively
/// retransmitting only slots the receiver has not yet ACKed, then
/// signals end-of-stream.
pub fn send<R: Read>(
    input: R,
    socket: &UdpSocket,
    peer: SocketAddr,
    cfg: SenderConfig,
) -> Result<(), Error> {
    let chunks = chunk_input(input)?;
    log::info!("sr sender: {} chunks to send to {peer}", chunks.len());

    let loss = LossInjector::new(cfg.loss_rate, cfg.send_delay);
    let mut window: RingBuffer<Slot> = RingBuffer::new();
    let mut enqueued = 0usize;
    let mut deadline: Option<Instant> = None;
    let mut buf = [0u8; BUFFER_SIZE];

    loop {
        if enqueued >= chunks.len() && window.is_empty() {
            for _ in 0..END_OF_STREAM_REPEAT {
                send_lossy(socket, peer, &DataPacket::end_of_stream().encode(), &loss)?;
            }
            log::info!("sr sender: transfer complete");
            return Ok(());
        }

        while enqueued < chunks.len() && window.len() < cfg.window_size {
            window.enqueue(Slot {
                payload: chunks[enqueued].clone(),
                sent: false,
                acked: false,
            });
            enqueued += 1;
        }

        for (seq, slot) in window.snapshot() {
            if slot.sent {
                continue;
            }
            let pkt = DataPacket::data(seq as u8, slot.payload);
            log::debug!("sr sender: send seq={seq}");
            send_lossy(socket, peer, &pkt.encode(), &loss)?;
            window.get_mut(seq).unwrap().sent = true;
            deadline.get_or_insert_with(|| Instant::now() + cfg.timeout);
        }

        let Some(current_deadline) = deadline else {
            continue;
        };

        match recv_until(socket, &mut buf, current_deadline)? {
            Some((n, _)) => {
                let Some(ack) = AckPacket::decode(&buf[..n]) else {
                    continue;
                };
                let in_window = forward_distance(window.front() as u8, ack.ack_seq) < cfg.window_size;
                if !in_window {
                    // Stale ack for a slot already slid past; no-op.
                    continue;
                }

                log::debug!("sr sender: ack seq={}", ack.ack_seq);
                if let Some(slot) = window.get_mut(ack.ack_seq as usize) {
                    slot.acked = true;
                }

                let mut dequeued_any = false;
                while window.peek().is_some_and(|s| s.acked) {
                    window.dequeue();
                    dequeued_any = true;
                }

                if dequeued_any {
                    deadline = if window.is_empty() {
                        None
                    } else {
                        Some(Instant::now() + cfg.timeout)
                    };
                }
                // Window head still un-acked: leave the timer running
                // undisturbed, or a persistently-lost middle slot
                // would never get retransmitted.
            }
            None => {
                if window.is_empty() {
                    deadline = None;
                    continue;
                }
                log::debug!("sr sender: timeout, retransmitting un-acked slots");
                for (seq, slot) in window.snapshot() {
                    if !slot.acked {
                        let pkt = DataPacket::data(seq as u8, slot.payload);
                        send_lossy(socket, peer, &pkt.encode(), &loss)?;
                    }
                }
                deadline = Some(Instant::now() + cfg.timeout);
            }
        }
    }
}
