//! Constants and per-transfer overrides shared by GBN and SR.

use std::time::Duration;

/// Size of a single UDP recv buffer. Must be large enough for a full
/// data packet (3-byte header + [`CHUNK`] payload bytes).
pub const BUFFER_SIZE: usize = 4096;

/// Payload size of a chunk cut from the input stream; the last chunk
/// of a transfer may be shorter.
pub const CHUNK: usize = 2048;

/// Sequence number space. Also doubles as the ring buffer capacity,
/// since a slot's position in the ring *is* its sequence number modulo
/// this space (see `proto::ring`).
pub const SEQ_SPACE: usize = 32;

/// Ring buffer capacity. Equal to [`SEQ_SPACE`] by construction (see
/// the invariant in the data model: the index space of the queue and
/// the sequence-number space must coincide).
pub const QUEUE_MAX_SIZE: usize = SEQ_SPACE;

/// Default sliding window size. `SEQ_SPACE >= 2 * WINDOW_SIZE` is
/// mandatory so that fresh and stale sequence numbers can be told
/// apart across a window shift.
pub const WINDOW_SIZE: usize = 10;

/// Default retransmission timeout.
pub const TIMEOUT: Duration = Duration::from_secs(10);

/// Default Bernoulli drop probability used by the loss injector.
pub const LOSS_RATE: f64 = 0.3;

/// Artificial per-send delay modelling transfer time.
pub const SEND_DELAY: Duration = Duration::from_millis(300);

/// Number of times the end-of-stream packet is repeated to mask loss.
pub const END_OF_STREAM_REPEAT: usize = 10;

pub const GBN_PORT: u16 = 9690;
pub const SR_PORT: u16 = 9790;

/// Sender-side knobs. Defaults mirror the constants above; tests
/// shrink the window and disable loss to keep runs fast and
/// deterministic.
#[derive(Debug, Clone, Copy)]
pub struct SenderConfig {
    pub window_size: usize,
    pub timeout: Duration,
    pub loss_rate: f64,
    pub send_delay: Duration,
}

impl Default for SenderConfig {
    fn default() -> Self {
        SenderConfig {
            window_size: WINDOW_SIZE,
            timeout: TIMEOUT,
            loss_rate: LOSS_RATE,
            send_delay: SEND_DELAY,
        }
    }
}

/// Receiver-side knobs. The receiver's window size must match the
/// sender's for SR to behave correctly.
#[derive(Debug, Clone, Copy)]
pub struct ReceiverConfig {
    pub window_size: usize,
    pub loss_rate: f64,
    pub send_delay: Duration,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        ReceiverConfig {
            window_size: WINDOW_SIZE,
            loss_rate: LOSS_RATE,
            send_delay: SEND_DELAY,
        }
    }
}
