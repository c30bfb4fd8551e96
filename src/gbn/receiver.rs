//! Go-Back-N receiver: strictly in-order acceptance, cumulative ACKs.

use std::io::Write;
use std::net::{SocketAddr, UdpSocket};

use crate::err::Error;
use crate::proto::config::{BUFFER_SIZE, SEQ_SPACE};
use crate::proto::send_lossy;
use crate::proto::{AckPacket, DataPacket, LossInjector, ReceiverConfig};

/// Reads datagrams from `socket` until the end-of-stream packet
/// arrives, writing each in-order payload to `output` and cumulatively
/// ACKing. The peer address is learned from the first datagram.
pub fn receive<W: Write>(
    mut output: W,
    socket: &UdpSocket,
    cfg: ReceiverConfig,
) -> Result<(), Error> {
    let loss = LossInjector::new(cfg.loss_rate, cfg.send_delay);
    let mut expect_seq: u8 = 0;
    let mut client_address: Option<SocketAddr> = None;
    let mut buf = [0u8; BUFFER_SIZE];

    loop {
        let (n, from) = socket.recv_from(&mut buf)?;
        let client_address = *client_address.get_or_insert(from);

        let Some(pkt) = DataPacket::decode(&buf[..n]) else {
            continue;
        };

        if pkt.end_flag {
            log::info!("gbn receiver: end-of-stream received");
            output.flush()?;
            return Ok(());
        }

        if pkt.seq_num == expect_seq && pkt.is_intact() {
            log::debug!("gbn receiver: in-order seq={}", pkt.seq_num);
            output.write_all(&pkt.payload)?;
            let ack = AckPacket::new(pkt.seq_num);
            send_lossy(socket, client_address, &ack.encode(), &loss)?;
            expect_seq = ((expect_seq as usize + 1) % SEQ_SPACE) as u8;
        } else {
            let ack_seq = ((expect_seq as usize + SEQ_SPACE - 1) % SEQ_SPACE) as u8;
            log::debug!(
                "gbn receiver: out-of-order or corrupt seq={}, re-ack {ack_seq}",
                pkt.seq_num
            );
            let ack = AckPacket::new(ack_seq);
            send_lossy(socket, client_address, &ack.encode(), &loss)?;
        }
    }
}
