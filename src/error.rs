/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::traits::Direction;

/// The errors raised by [`Bitstream`](crate::bitstream::Bitstream) and by
/// the [backends](crate::backends).
///
/// Note that reaching the end of a stream is *not* an error: reads return
/// `Ok(None)` and writes return `Ok(None)` when the backend has no more data
/// or capacity.
#[derive(thiserror::Error, Debug)]
pub enum BitstreamError {
    #[error("Stream can neither input nor output")]
    NoCapability,
    #[error("Stream cannot {0} as requested")]
    UnsupportedDirection(Direction),

    #[error("Not in {expected} mode")]
    WrongMode { expected: Direction },
    #[error("Stream is closed")]
    Closed,
    /// [`reset`](crate::traits::ByteBackend::reset) without a previous
    /// [`mark`](crate::traits::ByteBackend::mark)
    #[error("Mark position not set")]
    NoMark,
    /// More than `read_limit` bytes were read after the mark
    #[error("Mark position invalidated after reading more than {read_limit} bytes")]
    MarkInvalidated { read_limit: usize },

    /// The backend structurally cannot perform the operation
    #[error("Operation {0} not supported by this stream")]
    Unsupported(&'static str),

    #[error("Buffer of size {len} cannot hold offset {offset} + remaining {width}")]
    OutOfBounds {
        len: usize,
        offset: usize,
        width: usize,
    },

    #[error("At most 31 bits can be transferred at once, got {0}")]
    TooManyBits(u32),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Coarse classification of a [`BitstreamError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Constructing or rebinding with a direction the backend cannot satisfy.
    Configuration,
    /// Operation in the wrong direction, on a closed stream, or reset without
    /// a valid mark.
    InvalidState,
    /// The backend cannot support the operation at all.
    Capability,
    /// Offset plus width exceeds a buffer.
    Bounds,
    /// An argument out of its domain, such as more than 31 bits.
    InvalidArgument,
    /// The backend failed.
    Io,
}

impl BitstreamError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoCapability | Self::UnsupportedDirection(_) => ErrorKind::Configuration,
            Self::WrongMode { .. } | Self::Closed | Self::NoMark | Self::MarkInvalidated { .. } => {
                ErrorKind::InvalidState
            }
            Self::Unsupported(_) => ErrorKind::Capability,
            Self::OutOfBounds { .. } => ErrorKind::Bounds,
            Self::TooManyBits(_) => ErrorKind::InvalidArgument,
            Self::Io(_) => ErrorKind::Io,
        }
    }
}

pub type Result<T> = core::result::Result<T, BitstreamError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(BitstreamError::NoCapability.kind(), ErrorKind::Configuration);
        assert_eq!(
            BitstreamError::UnsupportedDirection(Direction::Output).kind(),
            ErrorKind::Configuration
        );
        assert_eq!(BitstreamError::NoMark.kind(), ErrorKind::InvalidState);
        assert_eq!(BitstreamError::Unsupported("mark").kind(), ErrorKind::Capability);
        assert_eq!(BitstreamError::TooManyBits(32).kind(), ErrorKind::InvalidArgument);
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone");
        assert_eq!(BitstreamError::from(io).kind(), ErrorKind::Io);
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            BitstreamError::UnsupportedDirection(Direction::Output).to_string(),
            "Stream cannot output as requested"
        );
        assert_eq!(
            BitstreamError::OutOfBounds {
                len: 3,
                offset: 2,
                width: 2
            }
            .to_string(),
            "Buffer of size 3 cannot hold offset 2 + remaining 2"
        );
    }
}
