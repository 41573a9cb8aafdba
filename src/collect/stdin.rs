//! Reading standard input to the end

use crate::collect::{Collected, Source};
use crate::error::{CollectError, CollectResult};
use crate::events::Events;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::debug;

const CHUNK_SIZE: usize = 8 * 1024;

/// Split off the longest prefix of `pending` that decodes as text.
///
/// An incomplete multi-byte sequence at the end stays in `pending` for the
/// next chunk; invalid bytes are replaced.
fn take_decodable(pending: &mut Vec<u8>) -> String {
    let cut = match std::str::from_utf8(pending) {
        Ok(_) => pending.len(),
        Err(e) if e.error_len().is_none() => e.valid_up_to(),
        Err(_) => pending.len(),
    };

    let rest = pending.split_off(cut);
    let text = String::from_utf8_lossy(pending).into_owned();
    *pending = rest;
    text
}

/// Read `reader` to end of stream, emitting `stdin:data` per decoded chunk
/// and `stdin` with the whole text. Failures are emitted as `error`.
pub async fn read_stream<R>(reader: &mut R, events: &mut Events) -> CollectResult<Collected>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let mut contents = String::new();
    let mut pending = Vec::new();
    let mut buf = vec![0u8; CHUNK_SIZE];

    loop {
        let n = match reader.read(&mut buf).await {
            Ok(n) => n,
            Err(e) => {
                let error = CollectError::stdin(e);
                events.emit_error(&error);
                return Err(error);
            }
        };

        if n == 0 {
            break;
        }

        pending.extend_from_slice(&buf[..n]);
        let chunk = take_decodable(&mut pending);
        if !chunk.is_empty() {
            events.emit_stdin_data(&chunk);
            contents.push_str(&chunk);
        }
    }

    if !pending.is_empty() {
        let tail = String::from_utf8_lossy(&pending).into_owned();
        events.emit_stdin_data(&tail);
        contents.push_str(&tail);
    }

    debug!(bytes = contents.len(), "standard input drained");
    events.emit_stdin(&contents);

    Ok(Collected {
        contents,
        source: Source::Stdin,
    })
}
