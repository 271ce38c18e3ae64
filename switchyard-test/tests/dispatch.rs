#![allow(clippy::unused_async)]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use serde::{Deserialize, Serialize};
use switchyard::{
    action, async_trait,
    types::{Json, Params, Query, RouteInfo, State},
    BoxHandler, Controller, Error, Handler, IntoHandler, IntoResponse, Next, Request, RequestExt,
    Response, ResponseExt, Result, Router, StatusCode,
};
use switchyard_test::TestServer;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
struct Article {
    id: u32,
    title: String,
}

#[derive(Default)]
struct Articles {
    hooks: AtomicUsize,
}

#[async_trait]
impl Controller for Articles {
    async fn call_action(
        &self,
        name: &'static str,
        (req, method): Next<Request, BoxHandler>,
    ) -> Result<Response> {
        self.hooks.fetch_add(1, Ordering::SeqCst);
        if name == "destroy" && req.header::<_, String>("x-role").as_deref() != Some("admin") {
            return Err(Error::responder(Response::see_other("/login")));
        }
        method.call(req).await
    }
}

impl Articles {
    async fn show(self: Arc<Self>, req: Request) -> Result<Json<Article>> {
        let id = req.param("id")?;
        Ok(Json(Article {
            id,
            title: format!("article {id}"),
        }))
    }

    async fn create(self: Arc<Self>, mut req: Request) -> Result<(StatusCode, Json<Article>)> {
        let article = req.json::<Article>().await?;
        Ok((StatusCode::CREATED, Json(article)))
    }

    async fn destroy(self: Arc<Self>, _: Request) -> Result<StatusCode> {
        Ok(StatusCode::NO_CONTENT)
    }
}

#[tokio::test]
async fn get_answers_head() -> anyhow::Result<()> {
    init_tracing();

    async fn index(_: Request) -> Result<&'static str> {
        Ok("index")
    }

    let server = TestServer::new(Router::new().get("/", index)).await?;

    let resp = server.get("/").send().await?;
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await?, "index");

    let resp = server.head("/").send().await?;
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await?, "");

    Ok(())
}

#[tokio::test]
async fn not_found_and_method_not_allowed() -> anyhow::Result<()> {
    async fn index(_: Request) -> Result<&'static str> {
        Ok("index")
    }

    let server = TestServer::new(
        Router::new()
            .get("/posts", index)
            .post("/posts", index)
            .any("/anything", index),
    )
    .await?;

    let resp = server.get("/missing").send().await?;
    assert_eq!(resp.status(), 404);

    let resp = server.delete("/posts").send().await?;
    assert_eq!(resp.status(), 405);
    assert_eq!(resp.headers()["allow"], "GET, HEAD, POST");

    for method in ["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"] {
        let resp = server
            .request(method.parse()?, "/anything")
            .send()
            .await?;
        assert_eq!(resp.status(), 200, "{method}");
    }

    Ok(())
}

#[tokio::test]
async fn binds_parameters() -> anyhow::Result<()> {
    #[derive(Deserialize)]
    struct Page {
        size: Option<u8>,
    }

    async fn list(
        Params((user,)): Params<(String,)>,
        Query(page): Query<Page>,
        route: Arc<RouteInfo>,
    ) -> Result<String> {
        Ok(format!(
            "{user} {} {}",
            page.size.unwrap_or(10),
            route.pattern
        ))
    }

    async fn optional(req: Request) -> Result<String> {
        let route = req.route_info().ok_or(StatusCode::INTERNAL_SERVER_ERROR.into_error())?;
        let names = route
            .params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>();
        Ok(names.join("&"))
    }

    let server = TestServer::new(
        Router::new()
            .get("/users/:user/posts", list.into_handler())
            .get("/archive/:year/:month?", optional),
    )
    .await?;

    let resp = server.get("/users/ada/posts?size=3").send().await?;
    assert_eq!(resp.text().await?, "ada 3 /users/:user/posts");

    let resp = server.get("/archive/2024/05").send().await?;
    assert_eq!(resp.text().await?, "year=2024&month=05");

    let resp = server.get("/archive/2024/").send().await?;
    assert_eq!(resp.text().await?, "year=2024");

    let resp = server.get("/archive/2024").send().await?;
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await?, "year=2024");

    let resp = server.get("/users/john%20doe/posts").send().await?;
    assert_eq!(resp.text().await?, "john doe 10 /users/:user/posts");

    Ok(())
}

#[tokio::test]
async fn controller_actions() -> anyhow::Result<()> {
    init_tracing();

    let articles = Arc::new(Articles::default());
    let router = Router::new()
        .get("/articles/:id", action(articles.clone(), "show", Articles::show))
        .post("/articles", action(articles.clone(), "create", Articles::create))
        .delete(
            "/articles/:id",
            action(articles.clone(), "destroy", Articles::destroy),
        );
    let server = TestServer::new(router).await?;

    let resp = server.get("/articles/7").send().await?;
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.json::<Article>().await?,
        Article {
            id: 7,
            title: "article 7".to_string()
        }
    );

    let resp = server
        .post("/articles")
        .json(&Article {
            id: 8,
            title: "new".to_string(),
        })
        .send()
        .await?;
    assert_eq!(resp.status(), 201);
    assert_eq!(resp.json::<serde_json::Value>().await?["title"], "new");

    let resp = server.get("/articles/seven").send().await?;
    assert_eq!(resp.status(), 400);

    let resp = server.delete("/articles/7").send().await?;
    assert_eq!(resp.status(), 303);
    assert_eq!(resp.headers()["location"], "/login");

    let resp = server
        .delete("/articles/7")
        .header("x-role", "admin")
        .send()
        .await?;
    assert_eq!(resp.status(), 204);

    assert_eq!(articles.hooks.load(Ordering::SeqCst), 5);

    Ok(())
}

#[tokio::test]
async fn state_and_middleware() -> anyhow::Result<()> {
    #[derive(Clone)]
    struct Config {
        greeting: &'static str,
    }

    async fn hello(State(config): State<Config>, Params(name): Params<String>) -> Result<String> {
        Ok(format!("{}, {name}!", config.greeting))
    }

    async fn timing((req, handler): Next<Request, BoxHandler>) -> Result<Response> {
        let mut resp = handler.call(req).await?;
        resp.headers_mut().insert(
            "x-served-by",
            switchyard::header::HeaderValue::from_static("switchyard"),
        );
        Ok(resp)
    }

    let api = Router::new().get("/hello/:name", hello.into_handler());
    let router = Router::new()
        .nest("/api", api)
        .with(State::new(Config { greeting: "Hello" }))
        .with_handler(timing);
    let server = TestServer::new(router).await?;

    let resp = server.get("/api/hello/ada").send().await?;
    assert_eq!(resp.headers()["x-served-by"], "switchyard");
    assert_eq!(resp.text().await?, "Hello, ada!");

    let resp = server.get("/hello/ada").send().await?;
    assert_eq!(resp.status(), 404);

    Ok(())
}
