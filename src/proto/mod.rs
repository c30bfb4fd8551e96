//! Shared substrate used by both the GBN and SR protocol variants:
//! configuration constants, the packet codec, the checksum, the
//! chunker, sequence-number arithmetic, the circular window buffer,
//! and the loss injector used for testing.

pub mod checksum;
pub mod chunk;
pub mod codec;
pub mod config;
pub mod loss;
pub mod ring;
pub mod seq;
pub mod transport;

pub use checksum::checksum;
pub use chunk::chunk_input;
pub use codec::{AckPacket, DataPacket};
pub use config::{ReceiverConfig, SenderConfig};
pub use loss::LossInjector;
pub use ring::RingBuffer;
pub use seq::forward_distance;
pub use transport::{recv_until, send_lossy};
