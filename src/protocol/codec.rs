//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Wire Format
//!
//! Every request and response travels as one frame:
//! ```text
//! ┌──────────┬─────────────────────────────────────┐
//! │ Len (4)  │       JSON payload (Len bytes)      │
//! └──────────┴─────────────────────────────────────┘
//! ```
//! `Len` is big-endian. A frame that is truncated, oversized or not valid
//! JSON for the expected record is a decode failure.

use std::io::{Read, Write};

use bytes::{Buf, BufMut, Bytes, BytesMut};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{KvError, Result};
use super::{Request, Response};

/// Header size: 4 bytes length
pub const HEADER_SIZE: usize = 4;

/// Default maximum payload size (16 MB)
pub const MAX_FRAME_SIZE: usize = 16 * 1024 * 1024;

// =============================================================================
// Generic framing
// =============================================================================

/// Encode a message as a length-prefixed JSON frame
pub fn encode_frame<T: Serialize>(message: &T) -> Result<Bytes> {
    let payload = serde_json::to_vec(message)?;
    let payload_len = u32::try_from(payload.len()).map_err(|_| {
        KvError::Protocol(format!("Payload too large: {} bytes", payload.len()))
    })?;

    let mut frame = BytesMut::with_capacity(HEADER_SIZE + payload.len());
    frame.put_u32(payload_len);
    frame.put_slice(&payload);

    Ok(frame.freeze())
}

/// Decode a complete frame held in memory
pub fn decode_frame<T: DeserializeOwned>(bytes: &[u8], max_size: usize) -> Result<T> {
    if bytes.len() < HEADER_SIZE {
        return Err(KvError::Protocol(format!(
            "Incomplete header: expected {} bytes, got {}",
            HEADER_SIZE,
            bytes.len()
        )));
    }

    let mut buf = bytes;
    let payload_len = buf.get_u32() as usize;
    check_frame_size(payload_len, max_size)?;

    if buf.len() < payload_len {
        return Err(KvError::Protocol(format!(
            "Incomplete payload: expected {} bytes, got {}",
            payload_len,
            buf.len()
        )));
    }

    Ok(serde_json::from_slice(&buf[..payload_len])?)
}

/// Read one frame from a stream
///
/// Blocks until a complete frame is received or an error occurs
pub fn read_frame<R: Read, T: DeserializeOwned>(reader: &mut R, max_size: usize) -> Result<T> {
    let mut header = [0u8; HEADER_SIZE];
    reader.read_exact(&mut header)?;

    let payload_len = u32::from_be_bytes(header) as usize;
    check_frame_size(payload_len, max_size)?;

    let mut payload = vec![0u8; payload_len];
    reader.read_exact(&mut payload)?;

    Ok(serde_json::from_slice(&payload)?)
}

/// Write one frame to a stream
pub fn write_frame<W: Write, T: Serialize>(writer: &mut W, message: &T) -> Result<()> {
    let frame = encode_frame(message)?;
    writer.write_all(&frame)?;
    writer.flush()?;
    Ok(())
}

fn check_frame_size(payload_len: usize, max_size: usize) -> Result<()> {
    if payload_len > max_size {
        return Err(KvError::Protocol(format!(
            "Payload too large: {} bytes (max {})",
            payload_len, max_size
        )));
    }
    Ok(())
}

// =============================================================================
// Request / Response helpers
// =============================================================================

pub fn encode_request(request: &Request) -> Result<Bytes> {
    encode_frame(request)
}

pub fn decode_request(bytes: &[u8]) -> Result<Request> {
    decode_frame(bytes, MAX_FRAME_SIZE)
}

pub fn encode_response(response: &Response) -> Result<Bytes> {
    encode_frame(response)
}

pub fn decode_response(bytes: &[u8]) -> Result<Response> {
    decode_frame(bytes, MAX_FRAME_SIZE)
}

/// Read a complete request from a stream
pub fn read_request<R: Read>(reader: &mut R, max_size: usize) -> Result<Request> {
    read_frame(reader, max_size)
}

/// Write a request to a stream
pub fn write_request<W: Write>(writer: &mut W, request: &Request) -> Result<()> {
    write_frame(writer, request)
}

/// Read a complete response from a stream
pub fn read_response<R: Read>(reader: &mut R, max_size: usize) -> Result<Response> {
    read_frame(reader, max_size)
}

/// Write a response to a stream
pub fn write_response<W: Write>(writer: &mut W, response: &Response) -> Result<()> {
    write_frame(writer, response)
}
