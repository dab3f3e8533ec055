//! Blocking client
//!
//! Sends one request per frame and waits for its response.

use std::io::{BufReader, BufWriter};
use std::net::{TcpStream, ToSocketAddrs};

use crate::error::Result;
use crate::protocol::{read_response, write_request, Command, Request, Response, MAX_FRAME_SIZE};

/// A single session with a DomainKV server
pub struct Client {
    reader: BufReader<TcpStream>,
    writer: BufWriter<TcpStream>,
}

impl Client {
    /// Connect to a server
    pub fn connect(addr: impl ToSocketAddrs) -> Result<Self> {
        let stream = TcpStream::connect(addr)?;
        stream.set_nodelay(true)?;

        Ok(Self {
            reader: BufReader::new(stream.try_clone()?),
            writer: BufWriter::new(stream),
        })
    }

    /// Send a raw request and wait for the response
    pub fn send(&mut self, request: &Request) -> Result<Response> {
        write_request(&mut self.writer, request)?;
        read_response(&mut self.reader, MAX_FRAME_SIZE)
    }

    /// Send a typed command
    pub fn execute(&mut self, command: Command) -> Result<Response> {
        self.send(&command.into_request())
    }
}
