//! Two reliable data-transfer protocols over unreliable UDP: Go-Back-N
//! (`gbn`) and Selective Repeat (`sr`). Both share the same wire
//! format, checksum, chunker, and circular window buffer, defined in
//! `proto`.

mod err;
pub use err::*;

pub mod gbn;
pub mod proto;
pub mod sr;
