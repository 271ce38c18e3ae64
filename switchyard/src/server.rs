use std::{
    fmt::Debug,
    future::{pending, Future, IntoFuture, Pending},
    io,
    pin::Pin,
    sync::Arc,
    time::Duration,
};

use hyper_util::{
    rt::{TokioExecutor, TokioIo},
    server::conn::auto::Builder,
};
use tokio::{
    io::{AsyncRead, AsyncWrite},
    pin, select,
    sync::watch,
};
use tracing::{error, trace};

use crate::{Responder, RouteCollection, Router};

mod listener;
pub use listener::Accept;

/// Serves `router` on the connections accepted by `listener`.
///
/// The returned [`Server`] runs once awaited:
///
/// ```no_run
/// # use switchyard::{serve, Router};
/// # async fn run() -> std::io::Result<()> {
/// let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
/// let (stop, stopped) = tokio::sync::oneshot::channel::<()>();
/// serve(listener, Router::new())
///     .signal(async move {
///         let _ = stopped.await;
///     })
///     .await
/// # }
/// ```
pub fn serve<L>(listener: L, router: Router) -> Server<L>
where
    L: Accept,
{
    Server::new(listener, router)
}

/// An HTTP/1 and HTTP/2 server over a frozen [`RouteCollection`].
///
/// Once the shutdown signal resolves, the server stops accepting, asks every open
/// connection to finish its in-flight requests, and resolves when they have.
#[derive(Debug)]
pub struct Server<L, F = Pending<()>> {
    listener: L,
    routes: RouteCollection,
    builder: Builder<TokioExecutor>,
    signal: F,
}

impl<L> Server<L> {
    /// A server that runs until it fails.
    pub fn new(listener: L, router: Router) -> Self {
        Self {
            listener,
            routes: router.into(),
            builder: Builder::new(TokioExecutor::new()),
            signal: pending(),
        }
    }
}

impl<L, F> Server<L, F> {
    /// Shuts the server down gracefully when `signal` resolves.
    pub fn signal<S>(self, signal: S) -> Server<L, S> {
        Server {
            listener: self.listener,
            routes: self.routes,
            builder: self.builder,
            signal,
        }
    }

    /// The connection builder, to tune HTTP/1 and HTTP/2 settings.
    pub fn builder(&mut self) -> &mut Builder<TokioExecutor> {
        &mut self.builder
    }
}

impl<L, F> IntoFuture for Server<L, F>
where
    L: Accept + Send + Sync + 'static,
    L::Stream: AsyncRead + AsyncWrite + Send + Unpin + 'static,
    L::Addr: Clone + Send + Sync + Debug + 'static,
    F: Future + Send + 'static,
{
    type Output = io::Result<()>;
    type IntoFuture = Pin<Box<dyn Future<Output = io::Result<()>> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.run())
    }
}

impl<L, F> Server<L, F>
where
    L: Accept + Send + Sync + 'static,
    L::Stream: AsyncRead + AsyncWrite + Send + Unpin + 'static,
    L::Addr: Clone + Send + Sync + Debug + 'static,
    F: Future + Send + 'static,
{
    async fn run(self) -> io::Result<()> {
        let Self {
            listener,
            routes,
            builder,
            signal,
        } = self;
        let routes = Arc::new(routes);

        let (stop_tx, stop) = watch::channel(false);
        tokio::spawn(async move {
            signal.await;
            trace!("shutdown signal received");
            let _ = stop_tx.send(true);
        });

        // Every connection holds a receiver; the sender closes once all are gone.
        let (open_tx, open) = watch::channel(());

        let mut accepting = stop.clone();
        loop {
            let (stream, addr) = select! {
                accepted = listener.accept() => match accepted {
                    Ok(conn) => conn,
                    Err(e) if is_connection_error(&e) => continue,
                    Err(e) => {
                        error!("accept failed: {e}");
                        tokio::time::sleep(Duration::from_secs(1)).await;
                        continue;
                    }
                },
                () = stopped(&mut accepting) => break,
            };
            trace!(?addr, "connection accepted");

            let responder = Responder::new(routes.clone(), Some(addr.clone()));
            let conn = Connection {
                builder: builder.clone(),
                stop: stop.clone(),
                _open: open.clone(),
            };
            tokio::spawn(async move {
                conn.serve(stream, responder).await;
                trace!(?addr, "connection closed");
            });
        }

        drop(listener);
        drop(open);
        trace!(open = open_tx.receiver_count(), "draining connections");
        open_tx.closed().await;
        trace!("server stopped");

        Ok(())
    }
}

/// What a connection task needs besides its stream.
struct Connection {
    builder: Builder<TokioExecutor>,
    stop: watch::Receiver<bool>,
    _open: watch::Receiver<()>,
}

impl Connection {
    async fn serve<S, A>(mut self, stream: S, responder: Responder<A>)
    where
        S: AsyncRead + AsyncWrite + Send + Unpin + 'static,
        A: Clone + Send + Sync + 'static,
    {
        let conn = self
            .builder
            .serve_connection_with_upgrades(TokioIo::new(stream), responder);
        pin!(conn);

        let mut draining = false;
        loop {
            select! {
                res = conn.as_mut() => {
                    if let Err(e) = res {
                        error!("connection failed: {e}");
                    }
                    break;
                }
                () = stopped(&mut self.stop), if !draining => {
                    trace!("finishing in-flight requests");
                    conn.as_mut().graceful_shutdown();
                    draining = true;
                }
            }
        }
    }
}

/// Resolves once shutdown was requested, or the signal task is gone.
async fn stopped(stop: &mut watch::Receiver<bool>) {
    let _ = stop.wait_for(|stopped| *stopped).await;
}

fn is_connection_error(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::ConnectionReset
    )
}
