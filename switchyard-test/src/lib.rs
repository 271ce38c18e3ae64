//! A test harness for Switchyard applications.
//!
//! [`TestServer`] serves a [`Router`] on a random local port and hands out a [`reqwest`]
//! client pointed at it.

#![forbid(unsafe_code)]
#![warn(missing_debug_implementations, missing_docs, rust_2018_idioms)]

use std::{net::SocketAddr, sync::Arc};

use hyper::server::conn::http1;
use hyper_util::rt::TokioIo;
use reqwest::{Client, Method, RequestBuilder};
use switchyard::{Error, Responder, Result, RouteCollection, Router};
use tokio::net::TcpListener;

/// A server bound to `127.0.0.1` with a client which does not follow redirects.
#[derive(Debug)]
pub struct TestServer {
    addr: SocketAddr,
    client: Client,
}

impl TestServer {
    /// Serves `router` on an ephemeral local port.
    ///
    /// # Errors
    ///
    /// Fails when the port cannot be bound or the client cannot be built.
    pub async fn new(router: Router) -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let routes = Arc::new(RouteCollection::from(router));
        let addr = listener.local_addr()?;
        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(Error::boxed)?;

        tokio::spawn(run(listener, routes));

        Ok(Self { addr, client })
    }

    fn path(&self, url: impl AsRef<str>) -> String {
        format!("http://{}{}", self.addr, url.as_ref())
    }

    /// The address the server listens on.
    #[must_use]
    pub const fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Starts a request with any method.
    pub fn request(&self, method: Method, url: impl AsRef<str>) -> RequestBuilder {
        self.client.request(method, self.path(url))
    }

    /// Starts a `GET` request.
    pub fn get(&self, url: impl AsRef<str>) -> RequestBuilder {
        self.client.get(self.path(url))
    }

    /// Starts a `HEAD` request.
    pub fn head(&self, url: impl AsRef<str>) -> RequestBuilder {
        self.client.head(self.path(url))
    }

    /// Starts a `POST` request.
    pub fn post(&self, url: impl AsRef<str>) -> RequestBuilder {
        self.client.post(self.path(url))
    }

    /// Starts a `PUT` request.
    pub fn put(&self, url: impl AsRef<str>) -> RequestBuilder {
        self.client.put(self.path(url))
    }

    /// Starts a `PATCH` request.
    pub fn patch(&self, url: impl AsRef<str>) -> RequestBuilder {
        self.client.patch(self.path(url))
    }

    /// Starts a `DELETE` request.
    pub fn delete(&self, url: impl AsRef<str>) -> RequestBuilder {
        self.client.delete(self.path(url))
    }
}

async fn run(listener: TcpListener, routes: Arc<RouteCollection>) -> Result<()> {
    loop {
        let (stream, addr) = listener.accept().await?;
        let routes = routes.clone();
        tokio::task::spawn(async move {
            if let Err(err) = http1::Builder::new()
                .serve_connection(TokioIo::new(stream), Responder::new(routes, Some(addr)))
                .await
            {
                tracing::error!("error while serving HTTP connection: {err}");
            }
        });
    }
}
