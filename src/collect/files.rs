//! Reading the files named by positional arguments

use crate::collect::{Collected, Source};
use crate::error::{CollectError, CollectResult};
use crate::events::Events;
use tokio::fs;
use tracing::debug;

/// Read every file in order and concatenate the contents.
///
/// The first failure stops the walk: later files are not opened and no
/// partial contents are returned.
pub async fn read_files(paths: &[String], events: &mut Events) -> CollectResult<Collected> {
    let mut contents = String::new();

    for path in paths {
        let body = match fs::read_to_string(path).await {
            Ok(body) => body,
            Err(e) => {
                let error = CollectError::read_file(path, e);
                events.emit_error(&error);
                return Err(error);
            }
        };

        debug!(file = %path, bytes = body.len(), "read file");
        events.emit_files_data(&body);
        contents.push_str(&body);
    }

    events.emit_files(&contents, paths);

    Ok(Collected {
        contents,
        source: Source::Files(paths.to_vec()),
    })
}
