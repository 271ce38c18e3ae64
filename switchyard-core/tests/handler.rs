#![allow(clippy::unused_async)]

use std::sync::Arc;

use http_body_util::BodyExt;
use serde::Deserialize;
use switchyard_core::{
    async_trait,
    types::{Params, Query, RouteInfo, State},
    BoxHandler, Error, FromRequest, Handler, HandlerExt, IntoHandler, IntoResponse, Next,
    Request, RequestExt, Response, Result, StatusCode,
};

fn routed(uri: &str, params: Vec<(&str, &str)>) -> anyhow::Result<Request> {
    let mut req = Request::builder().uri(uri).body(Default::default())?;
    req.extensions_mut().insert(Arc::new(RouteInfo {
        id: 0,
        pattern: "/".to_string(),
        params: params.into(),
    }));
    Ok(req)
}

#[tokio::test]
async fn adapters() -> anyhow::Result<()> {
    async fn hello(req: Request) -> Result<String> {
        Ok(format!("hello {}", req.state::<&'static str>().unwrap_or("nobody")))
    }

    async fn guard((req, next): Next<Request, BoxHandler>) -> Result<Response> {
        if req.query_string() == Some("stop") {
            return Err(StatusCode::GONE.into_error());
        }
        let mut resp = next.call(req).await?;
        *resp.status_mut() = StatusCode::ACCEPTED;
        Ok(resp)
    }

    let handler = hello
        .map_into_response()
        .boxed()
        .around(guard)
        .with(State::new("ada"));

    let resp = handler.call(Request::default()).await?;
    assert_eq!(resp.status(), StatusCode::ACCEPTED);
    assert_eq!(resp.into_body().collect().await?.to_bytes(), "hello ada");

    let req = Request::builder().uri("/?stop").body(Default::default())?;
    let err = handler.call(req).await.err();
    assert_eq!(
        err.map(|e| e.into_response().status()),
        Some(StatusCode::GONE)
    );

    let resp = hello.map_into_response().call(Request::default()).await?;
    assert_eq!(resp.into_body().collect().await?.to_bytes(), "hello nobody");

    Ok(())
}

#[tokio::test]
async fn extractors_in_order() -> anyhow::Result<()> {
    #[derive(Deserialize)]
    struct Paging {
        page: u32,
    }

    #[derive(Deserialize)]
    struct Ids {
        user: u32,
        post: u32,
    }

    struct Counter(u8);

    #[async_trait]
    impl FromRequest for Counter {
        type Error = StatusCode;

        async fn extract(req: &mut Request) -> Result<Self, Self::Error> {
            req.header("x-count").map(Counter).ok_or(StatusCode::BAD_REQUEST)
        }
    }

    async fn show(
        Params(ids): Params<Ids>,
        Query(paging): Query<Paging>,
        State(prefix): State<String>,
        counter: Option<Counter>,
    ) -> Result<String> {
        Ok(format!(
            "{prefix} {} {} {} {}",
            ids.user,
            ids.post,
            paging.page,
            counter.map_or(0, |c| c.0)
        ))
    }

    async fn strict(_: Counter) -> Result<&'static str> {
        Ok("counted")
    }

    let handler = show.into_handler().map_into_response();

    let mut req = routed("/?page=2", vec![("user", "1"), ("post", "9")])?;
    req.set_state("posts".to_string());
    req.headers_mut().insert("x-count", "3".parse()?);
    let resp = handler.call(req).await?;
    assert_eq!(resp.into_body().collect().await?.to_bytes(), "posts 1 9 2 3");

    let mut req = routed("/?page=x", vec![("user", "1"), ("post", "9")])?;
    req.set_state("posts".to_string());
    let err = handler.call(req).await.err();
    assert_eq!(
        err.map(|e| e.into_response().status()),
        Some(StatusCode::BAD_REQUEST)
    );

    let err = strict.into_handler().call(Request::default()).await.err();
    assert!(err.as_ref().is_some_and(Error::is_responder));

    Ok(())
}
