//! Splits an input byte source into fixed-size payload chunks.

use std::io::{self, Read};

use super::config::CHUNK;

/// Reads `input` to completion and returns an ordered sequence of
/// `CHUNK`-byte payloads, the last of which may be shorter (but
/// non-empty). An empty input yields an empty sequence.
pub fn chunk_input<R: Read>(mut input: R) -> io::Result<Vec<Vec<u8>>> {
    let mut chunks = Vec::new();
    let mut buf = vec![0u8; CHUNK];

    loop {
        let mut filled = 0;
        while filled < CHUNK {
            let n = input.read(&mut buf[filled..])?;
            if n == 0 {
                break;
            }
            filled += n;
        }

        if filled == 0 {
            break;
        }

        chunks.push(buf[..filled].to_vec());

        if filled < CHUNK {
            break;
        }
    }

    Ok(chunks)
}
