use std::io::{self, IsTerminal, Read};
use thiserror::Error;

pub const MAX_INPUT_SIZE: usize = 1024 * 1024; // 1MB

#[derive(Debug, Error)]
pub enum InputError {
    #[error("no document provided via stdin\n\nUsage: cat document.md | doc <LANG> [INSTRUCTION]")]
    NotPiped,

    #[error("input document is empty")]
    Empty,

    #[error(
        "input size ({megabytes:.1} MB) exceeds maximum allowed size (1 MB)\n\n\
         Consider splitting the document into smaller parts."
    )]
    TooLarge { megabytes: f64 },

    #[error("input is not valid UTF-8")]
    NotUtf8(#[source] std::string::FromUtf8Error),

    #[error("failed to read from stdin")]
    Io(#[from] io::Error),
}

impl InputError {
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::NotPiped | Self::Empty => exitcode::NOINPUT,
            Self::TooLarge { .. } | Self::NotUtf8(_) => exitcode::DATAERR,
            Self::Io(_) => exitcode::IOERR,
        }
    }
}

pub struct InputReader;

impl InputReader {
    /// Reads the document to translate from stdin.
    ///
    /// An interactive terminal on stdin means nothing was piped in.
    pub fn read_stdin() -> Result<String, InputError> {
        let stdin = io::stdin();
        if stdin.is_terminal() {
            return Err(InputError::NotPiped);
        }
        Self::read_from(stdin.lock())
    }

    /// Reads at most [`MAX_INPUT_SIZE`] bytes of UTF-8 text from `reader`.
    pub fn read_from<R: Read>(mut reader: R) -> Result<String, InputError> {
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 8192];

        loop {
            let bytes_read = reader.read(&mut chunk)?;
            if bytes_read == 0 {
                break;
            }

            buffer.extend_from_slice(&chunk[..bytes_read]);

            if buffer.len() > MAX_INPUT_SIZE {
                return Err(InputError::TooLarge {
                    megabytes: to_megabytes(buffer.len()),
                });
            }
        }

        let content = String::from_utf8(buffer).map_err(InputError::NotUtf8)?;
        if content.trim().is_empty() {
            return Err(InputError::Empty);
        }
        Ok(content)
    }
}

#[allow(clippy::cast_precision_loss)]
fn to_megabytes(bytes: usize) -> f64 {
    bytes as f64 / 1024.0 / 1024.0
}
