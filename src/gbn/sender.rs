//! Go-Back-N sender: a sliding window with a single retransmit-all
//! timer, cumulative ACKs.

use std::io::Read;
use std::net::{SocketAddr, UdpSocket};
use std::time::Instant;

use crate::err::Error;
use crate::proto::config::{BUFFER_SIZE, END_OF_STREAM_REPEAT, SEQ_SPACE};
use crate::proto::{chunk_input, forward_distance, recv_until, send_lossy};
use crate::proto::{AckPacket, DataPacket, LossInjector, RingBuffer, SenderConfig};

#[derive(Debug, Clone)]
struct Slot {
    payload: Vec<u8>,
    sent: bool,
}

/// Transmits every chunk of `input` to `peer` such that an in-order
/// GBN receiver can deliver it byte-exact, then signals end-of-stream.
pub fn send<R: Read>(
    input: R,
    socket: &UdpSocket,
    peer: SocketAddr,
    cfg: SenderConfig,
) -> Result<(), Error> {
    let chunks = chunk_input(input)?;
    log::info!("gbn sender: {} chunks to send to {peer}", chunks.len());

    let loss = LossInjector::new(cfg.loss_rate, cfg.send_delay);
    let mut window: RingBuffer<Slot> = RingBuffer::new();
    let mut enqueued = 0usize;
    // First ACK (seq 0) must yield a forward distance of 1 from here.
    let mut last_ack: u8 = (SEQ_SPACE - 1) as u8;
    let mut deadline: Option<Instant> = None;
    let mut buf = [0u8; BUFFER_SIZE];

    loop {
        if enqueued >= chunks.len() && window.is_empty() {
            for _ in 0..END_OF_STREAM_REPEAT {
                send_lossy(socket, peer, &DataPacket::end_of_stream().encode(), &loss)?;
            }
            log::info!("gbn sender: transfer complete");
            return Ok(());
        }

        while enqueued < chunks.len() && window.len() < cfg.window_size {
            window.enqueue(Slot {
                payload: chunks[enqueued].clone(),
                sent: false,
            });
            enqueued += 1;
        }

        for (seq, slot) in window.snapshot() {
            if slot.sent {
                continue;
            }
            let pkt = DataPacket::data(seq as u8, slot.payload);
            log::debug!("gbn sender: send seq={seq}");
            send_lossy(socket, peer, &pkt.encode(), &loss)?;
            window.get_mut(seq).unwrap().sent = true;
            deadline.get_or_insert_with(|| Instant::now() + cfg.timeout);
        }

        let Some(current_deadline) = deadline else {
            // Nothing has ever been sent yet but the window is non-empty:
            // unreachable, since the send pass above always sets a deadline
            // for a non-empty window. Guard defensively by looping.
            continue;
        };

        match recv_until(socket, &mut buf, current_deadline)? {
            Some((n, _)) => {
                let Some(ack) = AckPacket::decode(&buf[..n]) else {
                    continue;
                };
                let delta = forward_distance(last_ack, ack.ack_seq);
                if delta > 0 {
                    log::debug!("gbn sender: new cumulative ack={}", ack.ack_seq);
                    for _ in 0..delta {
                        window.dequeue();
                    }
                    last_ack = ack.ack_seq;
                    deadline = if window.is_empty() {
                        None
                    } else {
                        Some(Instant::now() + cfg.timeout)
                    };
                }
                // delta == 0: duplicate ack, ignored.
            }
            None => {
                if window.is_empty() {
                    deadline = None;
                    continue;
                }
                log::debug!("gbn sender: timeout, retransmitting whole window");
                for (seq, slot) in window.snapshot() {
                    let pkt = DataPacket::data(seq as u8, slot.payload);
                    send_lossy(socket, peer, &pkt.encode(), &loss)?;
                }
                deadline = Some(Instant::now() + cfg.timeout);
            }
        }
    }
}
