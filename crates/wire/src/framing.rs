// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Length-prefixed JSON framing.
//!
//! Each message is a 4-byte big-endian length followed by that many bytes of
//! JSON. The async functions serve tokio streams; [`blocking`] serves pipes
//! read from a dedicated thread, such as a worker's stdin.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Upper bound on a single message body.
pub const MAX_MESSAGE_SIZE: usize = 16 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("message of {0} bytes exceeds the {max} byte limit", max = MAX_MESSAGE_SIZE)]
    TooLarge(usize),

    #[error("connection closed")]
    ConnectionClosed,

    #[error("invalid message: {0}")]
    Invalid(String),
}

/// Serialize to JSON bytes (no length prefix).
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, ProtocolError> {
    Ok(serde_json::to_vec(value)?)
}

/// Deserialize JSON bytes (no length prefix).
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ProtocolError> {
    Ok(serde_json::from_slice(bytes)?)
}

fn prefix(len: usize) -> Result<[u8; 4], ProtocolError> {
    if len > MAX_MESSAGE_SIZE {
        return Err(ProtocolError::TooLarge(len));
    }
    Ok((len as u32).to_be_bytes())
}

fn body_len(prefix: [u8; 4]) -> Result<usize, ProtocolError> {
    let len = u32::from_be_bytes(prefix) as usize;
    if len > MAX_MESSAGE_SIZE {
        return Err(ProtocolError::TooLarge(len));
    }
    Ok(len)
}

/// Write one length-prefixed message.
pub async fn write_message<W: AsyncWrite + Unpin>(
    writer: &mut W,
    data: &[u8],
) -> Result<(), ProtocolError> {
    writer.write_all(&prefix(data.len())?).await?;
    writer.write_all(data).await?;
    writer.flush().await?;
    Ok(())
}

/// Read one length-prefixed message. A clean EOF before the prefix is
/// [`ProtocolError::ConnectionClosed`].
pub async fn read_message<R: AsyncRead + Unpin>(reader: &mut R) -> Result<Vec<u8>, ProtocolError> {
    let mut len_buf = [0u8; 4];
    match reader.read_exact(&mut len_buf).await {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
            return Err(ProtocolError::ConnectionClosed)
        }
        Err(e) => return Err(e.into()),
    }
    let mut body = vec![0u8; body_len(len_buf)?];
    reader.read_exact(&mut body).await?;
    Ok(body)
}

/// Blocking counterparts for `std::io` streams.
pub mod blocking {
    use std::io::{ErrorKind, Read, Write};

    use super::{body_len, prefix, ProtocolError};

    pub fn write_message<W: Write>(writer: &mut W, data: &[u8]) -> Result<(), ProtocolError> {
        writer.write_all(&prefix(data.len())?)?;
        writer.write_all(data)?;
        writer.flush()?;
        Ok(())
    }

    pub fn read_message<R: Read>(reader: &mut R) -> Result<Vec<u8>, ProtocolError> {
        let mut len_buf = [0u8; 4];
        match reader.read_exact(&mut len_buf) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                return Err(ProtocolError::ConnectionClosed)
            }
            Err(e) => return Err(e.into()),
        }
        let mut body = vec![0u8; body_len(len_buf)?];
        reader.read_exact(&mut body)?;
        Ok(body)
    }
}

#[cfg(test)]
#[path = "framing_tests.rs"]
mod tests;
