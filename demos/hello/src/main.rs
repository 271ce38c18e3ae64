use std::{
    collections::BTreeMap,
    net::SocketAddr,
    sync::{Arc, RwLock},
};

use serde::{Deserialize, Serialize};
use switchyard::{
    action, async_trait, serve,
    types::{Json, Params, State},
    BoxHandler, Controller, Error, Handler, IntoHandler, Next, Request, RequestExt, Resources,
    Response, ResponseExt, Result, Router, StatusCode,
};
use tokio::{net::TcpListener, signal};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Clone, Debug, Deserialize, Serialize)]
struct Note {
    title: String,
    body: String,
}

#[derive(Default)]
struct Notes {
    items: RwLock<BTreeMap<u32, Note>>,
}

#[async_trait]
impl Controller for Notes {
    async fn call_action(
        &self,
        name: &'static str,
        (req, method): Next<Request, BoxHandler>,
    ) -> Result<Response> {
        let writes = matches!(name, "create" | "destroy");
        if writes && req.header::<_, String>("x-api-key").as_deref() != Some("demo") {
            warn!(action = name, "rejected request without api key");
            return Err(Error::responder((StatusCode::UNAUTHORIZED, "missing api key")));
        }
        method.call(req).await
    }
}

impl Notes {
    fn lock_error() -> Error {
        Error::responder(StatusCode::INTERNAL_SERVER_ERROR)
    }

    async fn index(self: Arc<Self>, _: Request) -> Result<Json<BTreeMap<u32, Note>>> {
        let items = self.items.read().map_err(|_| Self::lock_error())?;
        Ok(Json(items.clone()))
    }

    async fn show(self: Arc<Self>, req: Request) -> Result<Json<Note>> {
        let id: u32 = req.param("note_id")?;
        let items = self.items.read().map_err(|_| Self::lock_error())?;
        items
            .get(&id)
            .cloned()
            .map(Json)
            .ok_or_else(|| Error::responder(StatusCode::NOT_FOUND))
    }

    async fn create(self: Arc<Self>, mut req: Request) -> Result<Response> {
        let note = req.json::<Note>().await?;
        let id = {
            let mut items = self.items.write().map_err(|_| Self::lock_error())?;
            let id = items.keys().next_back().map_or(1, |id| id + 1);
            items.insert(id, note);
            id
        };
        Ok(Response::see_other(format!("/notes/{id}")))
    }

    async fn destroy(self: Arc<Self>, req: Request) -> Result<StatusCode> {
        let id: u32 = req.param("note_id")?;
        let mut items = self.items.write().map_err(|_| Self::lock_error())?;
        Ok(items
            .remove(&id)
            .map_or(StatusCode::NOT_FOUND, |_| StatusCode::NO_CONTENT))
    }
}

async fn index(_: Request) -> Result<&'static str> {
    Ok("Hello, World!")
}

async fn greet(
    State(greeting): State<&'static str>,
    name: Option<Params<String>>,
) -> Result<String> {
    let name = name.map_or_else(|| "stranger".to_string(), |Params(name)| name);
    Ok(format!("{greeting}, {name}!"))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hello=debug,switchyard=trace,switchyard_router=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    let listener = TcpListener::bind(addr).await?;
    info!("listening on http://{addr}");

    let notes = Arc::new(Notes::default());
    let resources = Resources::default()
        .named("note")
        .index(action(notes.clone(), "index", Notes::index))
        .create(action(notes.clone(), "create", Notes::create))
        .show(action(notes.clone(), "show", Notes::show))
        .destroy(action(notes, "destroy", Notes::destroy));

    let app = Router::new()
        .get("/", index)
        .get("/greet/:name?", greet.into_handler())
        .with(State::new("Hello"))
        .resources("/notes", resources);

    let server = serve(listener, app).signal(shutdown_signal());

    if let Err(e) = server.await {
        error!("{e}");
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("failed to listen for Ctrl+C: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                error!("failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
