// src/logging.rs

use flexi_logger::{FileSpec, Logger, LoggerHandle};

use crate::errors::{ParleyError, ParleyResult};

/// Starts file logging. Stdout belongs to the TUI, so everything goes to
/// `parley.log` next to the binary's working directory. The returned handle
/// must stay alive for the duration of the program.
pub fn init(level: &str) -> ParleyResult<LoggerHandle> {
    Logger::try_with_str(level)
        .map_err(|e| ParleyError::Logging(e.to_string()))?
        .log_to_file(FileSpec::default().basename("parley").suppress_timestamp())
        .start()
        .map_err(|e| ParleyError::Logging(e.to_string()))
}
