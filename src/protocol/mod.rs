//! Protocol Module
//!
//! Defines the wire protocol for client-server communication.
//!
//! ## Protocol Format
//!
//! One request and one response per frame, each frame a 4-byte big-endian
//! length followed by a JSON object.
//!
//! ### Request Fields
//! - `action`: create_domain, set_string, get_string, increment, decrement,
//!   insert_skiplist, delete_skiplist, delete_range_skiplist,
//!   search_skiplist, rank_skiplist
//! - `domain`, `key`, `slkey` (index name), `value`, `min_key`, `max_key`
//!
//! ### Response Fields
//! - `status`: "success" or "error"
//! - `message`: present on error
//! - `value`: single result
//! - `values`: reserved

mod codec;
mod command;
mod message;

pub use codec::{
    decode_frame, decode_request, decode_response, encode_frame, encode_request,
    encode_response, read_frame, read_request, read_response, write_frame, write_request,
    write_response, HEADER_SIZE, MAX_FRAME_SIZE,
};
pub use command::{action, Command};
pub use message::{Request, Response, Status};
