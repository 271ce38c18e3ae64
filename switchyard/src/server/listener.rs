use std::{future::Future, io, net::SocketAddr};

use tokio::net::{TcpListener, TcpStream};

/// A source of connections for [`Server`][super::Server].
///
/// The address of each connection is attached to the requests it carries, so an
/// action can read it back, for `TcpListener` as [`RequestExt::remote_addr`].
///
/// [`RequestExt::remote_addr`]: crate::RequestExt::remote_addr
pub trait Accept {
    /// The connection's byte stream.
    type Stream;
    /// The peer's address.
    type Addr;

    /// Waits for the next connection.
    fn accept(&self) -> impl Future<Output = io::Result<(Self::Stream, Self::Addr)>> + Send;
}

impl Accept for TcpListener {
    type Stream = TcpStream;
    type Addr = SocketAddr;

    fn accept(&self) -> impl Future<Output = io::Result<(TcpStream, SocketAddr)>> + Send {
        Self::accept(self)
    }
}
