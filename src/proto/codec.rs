//! Wire framing for the two packet shapes: data (3-byte header +
//! payload) and ack (2 bytes, no payload).

use super::checksum::checksum;

/// `[seq_num:u8][end_flag:u8][checksum:u8][payload]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPacket {
    pub seq_num: u8,
    pub end_flag: bool,
    pub checksum: u8,
    pub payload: Vec<u8>,
}

impl DataPacket {
    pub fn data(seq_num: u8, payload: Vec<u8>) -> Self {
        let checksum = checksum(&payload);
        DataPacket {
            seq_num,
            end_flag: false,
            checksum,
            payload,
        }
    }

    /// The distinguished end-of-stream packet: `seq_num=0,
    /// end_flag=1, checksum=0`, empty payload.
    pub fn end_of_stream() -> Self {
        DataPacket {
            seq_num: 0,
            end_flag: true,
            checksum: 0,
            payload: Vec::new(),
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(3 + self.payload.len());
        out.push(self.seq_num);
        out.push(self.end_flag as u8);
        out.push(self.checksum);
        out.extend_from_slice(&self.payload);
        out
    }

    pub fn decode(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 3 {
            return None;
        }
        Some(DataPacket {
            seq_num: bytes[0],
            end_flag: bytes[1] != 0,
            checksum: bytes[2],
            payload: bytes[3..].to_vec(),
        })
    }

    /// Whether the payload's checksum matches the carried one. Always
    /// true for the end-of-stream packet (empty payload, checksum 0).
    pub fn is_intact(&self) -> bool {
        checksum(&self.payload) == self.checksum
    }
}

/// `[ack_seq:u8][0x01]`. Exactly 2 bytes, no payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AckPacket {
    pub ack_seq: u8,
}

const ACK_MARKER: u8 = 0x01;

impl AckPacket {
    pub fn new(ack_seq: u8) -> Self {
        AckPacket { ack_seq }
    }

    pub fn encode(&self) -> [u8; 2] {
        [self.ack_seq, ACK_MARKER]
    }

    pub fn decode(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 2 {
            return None;
        }
        Some(AckPacket { ack_seq: bytes[0] })
    }
}
