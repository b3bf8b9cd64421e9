use std::io::{ErrorKind, Read, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;
use tracing::debug;

use crate::command::CommandFrame;
use crate::constants::{RESPONSE_LEN, TCP_PORT};
use crate::error::TransportError;

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(20);

/// One request/response exchange with the controller.
///
/// Implementations return whatever bytes the controller answered with;
/// length checking is left to the decoder.
pub trait Transport {
    fn send_and_receive(&mut self, frame: &CommandFrame) -> Result<Vec<u8>, TransportError>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send_and_receive(&mut self, frame: &CommandFrame) -> Result<Vec<u8>, TransportError> {
        (**self).send_and_receive(frame)
    }
}

/// Opens a fresh TCP connection for every exchange.
#[derive(Debug, Clone)]
pub struct TcpTransport {
    host: String,
    port: u16,
    connect_timeout: Duration,
    read_timeout: Duration,
}

impl TcpTransport {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: TCP_PORT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_timeouts(mut self, connect_timeout: Duration, read_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self.read_timeout = read_timeout;
        self
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn resolve(&self) -> Result<SocketAddr, TransportError> {
        let address = self.address();
        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|source| TransportError::Resolve { address: address.clone(), source })?
            .next()
            .ok_or_else(|| TransportError::Resolve {
                address,
                source: std::io::Error::new(ErrorKind::NotFound, "no addresses found"),
            })
    }
}

impl Transport for TcpTransport {
    fn send_and_receive(&mut self, frame: &CommandFrame) -> Result<Vec<u8>, TransportError> {
        let address = self.address();
        let socket_addr = self.resolve()?;

        let mut stream = TcpStream::connect_timeout(&socket_addr, self.connect_timeout)
            .map_err(|source| TransportError::Connect { address: address.clone(), source })?;

        stream
            .write_all(frame)
            .map_err(|source| TransportError::Send { address: address.clone(), source })?;
        debug!("Sent {} byte command to {}", frame.len(), address);

        stream
            .set_read_timeout(Some(self.read_timeout))
            .map_err(|source| TransportError::Receive { address: address.clone(), source })?;
        let response = read_response(&mut stream)
            .map_err(|source| TransportError::Receive { address: address.clone(), source })?;
        debug!("Received {} bytes from {}", response.len(), address);

        Ok(response)
    }
}

/// Read until a full status frame has arrived or the peer closes.
///
/// The controller may deliver the frame across several segments. A short
/// result is returned as-is for the decoder to reject.
fn read_response<R: Read>(reader: &mut R) -> std::io::Result<Vec<u8>> {
    let mut response = vec![0u8; RESPONSE_LEN];
    let mut filled = 0;
    while filled < RESPONSE_LEN {
        match reader.read(&mut response[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    response.truncate(filled);
    Ok(response)
}
