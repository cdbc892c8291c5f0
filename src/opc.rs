//! Open Pixel Control framing and the transport seam.
//!
//! Only the byte layout needed to build an outgoing frame lives here: a
//! 4-byte header (channel, command, big-endian payload length) followed by
//! the RGB payload. Everything device-side is the server's problem.

use std::{
    io::Write as _,
    net::{SocketAddr, TcpStream, ToSocketAddrs},
};

use crate::error::{OpcfxError, OpcfxResult};

pub const HEADER_LEN: usize = 4;

/// OPC command: set 8-bit pixel colors.
pub const SET_PIXEL_COLORS: u8 = 0;

/// Channel 0 addresses all channels on the server.
pub const BROADCAST_CHANNEL: u8 = 0;

pub const DEFAULT_PORT: u16 = 7890;

/// Write an OPC header into the first [`HEADER_LEN`] bytes of `buf`.
pub fn write_header(buf: &mut [u8], channel: u8, command: u8, payload_len: u16) {
    buf[0] = channel;
    buf[1] = command;
    buf[2..HEADER_LEN].copy_from_slice(&payload_len.to_be_bytes());
}

/// Delivers a finished frame to a pixel controller.
///
/// Fire-and-forget: implementations swallow write failures. A dropped frame
/// is superseded by the next one almost immediately, so freshness beats
/// reliability here.
pub trait Transport {
    /// Resolve and remember the controller address. In-process transports
    /// (tests, simulators) have nothing to resolve.
    fn resolve(&mut self, hostport: &str) -> OpcfxResult<()> {
        let _ = hostport;
        Ok(())
    }

    fn write_frame(&mut self, frame: &[u8]);
}

/// TCP transport for a remote OPC server (e.g. a Fadecandy board's fcserver).
///
/// Connects lazily on first write and silently reconnects on the next frame
/// after any failure.
#[derive(Debug, Default)]
pub struct TcpTransport {
    addr: Option<SocketAddr>,
    stream: Option<TcpStream>,
}

impl TcpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn connect(&mut self) -> Option<&mut TcpStream> {
        let addr = self.addr?;
        if self.stream.is_none() {
            match TcpStream::connect(addr) {
                Ok(stream) => {
                    // Frames are small and latency-sensitive.
                    let _ = stream.set_nodelay(true);
                    self.stream = Some(stream);
                }
                Err(e) => {
                    tracing::debug!(%addr, "connect failed: {e}");
                    return None;
                }
            }
        }
        self.stream.as_mut()
    }
}

impl Transport for TcpTransport {
    /// Resolve `HOST` or `HOST:PORT` (default port 7890) and remember the
    /// address for subsequent writes. Does not connect yet.
    fn resolve(&mut self, hostport: &str) -> OpcfxResult<()> {
        let (host, port) = match hostport.rsplit_once(':') {
            Some((host, port)) if !host.is_empty() => {
                let port = port
                    .parse::<u16>()
                    .map_err(|_| OpcfxError::server(format!("bad port in '{hostport}'")))?;
                (host, port)
            }
            _ => (hostport, DEFAULT_PORT),
        };

        let addr = (host, port)
            .to_socket_addrs()
            .map_err(|e| OpcfxError::server(format!("resolve '{hostport}': {e}")))?
            .next()
            .ok_or_else(|| OpcfxError::server(format!("no addresses for '{hostport}'")))?;

        tracing::debug!(%addr, "resolved OPC server");
        self.addr = Some(addr);
        self.stream = None;
        Ok(())
    }

    fn write_frame(&mut self, frame: &[u8]) {
        let Some(stream) = self.connect() else {
            return;
        };
        if let Err(e) = stream.write_all(frame) {
            tracing::debug!("frame write failed, dropping connection: {e}");
            self.stream = None;
        }
    }
}
