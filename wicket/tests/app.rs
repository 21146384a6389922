//! End-to-end tests: boot pipeline, route table and response serialization.

mod common;

use common::{Payload, headers, ok_resource};
use futures::future::join_all;
use serde_json::json;
use std::future::ready;
use wicket::{
    App, AppOptions, Builder, Context, Outcome, PropKey, Resource, Router, Status, handler,
    middleware::{self, inject_header, set_header, set_prop, validate_body},
    testing::{CountingMiddleware, get, post, post_json, request, run_app},
};

#[tokio::test]
async fn test_basic_app() {
    let app = App::new(
        |cx: Builder| async move { cx },
        Router::new().at("/foo", |cx: Builder, _| async move { Some(ok_resource(cx)) }),
    );

    assert_eq!(run_app(&app, get("/foo")).await.status(), Some(200));
    assert_eq!(run_app(&app, get("/bar")).await.status(), Some(404));
    assert_eq!(run_app(&app, post("/foo", "")).await.status(), Some(405));
}

#[tokio::test]
async fn test_synchronous_steps() {
    let app = App::with_routes(Router::new().at("/foo", |cx: Builder, _| {
        ready(Some(Resource::new().get(move || async move {
            cx.with(inject_header("x-test", "ok"))
                .handle(handler::sync(|_: Context| Status::Ok))
                .await
        })))
    }));

    let ok = run_app(&app, get("/foo")).await;
    assert_eq!(ok.status(), Some(200));
    assert_eq!(
        ok.headers().and_then(|h| h.get("x-test")).and_then(|v| v.as_str()),
        Some("ok")
    );

    assert_eq!(run_app(&app, get("/bar")).await.status(), Some(404));
    assert_eq!(run_app(&app, post("/foo", "")).await.status(), Some(405));
}

#[tokio::test]
async fn test_headers_propagate_through_failure() {
    let app = App::new(
        |cx: Builder| async move { cx.with(inject_header("x-test-header-foo", "foo")) },
        Router::new().at("/foo", |cx: Builder, _| async move {
            Some(Resource::new().get(move || async move {
                cx.with(inject_header("x-test-header-bar", "bar"))
                    .with(middleware::sync(|_: Context| {
                        Outcome::Failure(
                            Status::NotFound.response().header("x-test-header-foo", "foobar"),
                        )
                    }))
                    .handle(|_: Context| async {
                        Status::Ok.response().header("x-from-handler", "never")
                    })
                    .await
            }))
        }),
    );

    let res = run_app(&app, get("/foo")).await;
    assert_eq!(res.status(), Some(404));
    assert_eq!(
        res.headers(),
        Some(&headers([
            ("Connection", "keep-alive"),
            ("Content-Type", "application/json"),
            ("x-test-header-foo", "foobar"),
            ("x-test-header-bar", "bar"),
        ]))
    );
}

#[tokio::test]
async fn test_headers_propagate_through_success() {
    let app = App::new(
        |cx: Builder| async move {
            cx.with(|_: Context| async { set_header("x-test-header-foo", "foo") })
        },
        Router::new().at("/foo", |cx: Builder, _| async move {
            Some(Resource::new().get(move || async move {
                cx.with(|_: Context| async { set_header("x-test-header-bar", "bar") })
                    .with(|_: Context| async { set_header("x-test-header-baz", "baz") })
                    .handle(|_: Context| async {
                        Status::Ok
                            .response()
                            .header("x-test-header-foo", "foobar")
                            .header("x-test-header-quux", "quux")
                    })
                    .await
            }))
        }),
    );

    let res = run_app(&app, get("/foo")).await;
    assert_eq!(res.status(), Some(200));
    assert_eq!(
        res.headers(),
        Some(&headers([
            ("Connection", "keep-alive"),
            ("Content-Type", "application/json"),
            ("x-test-header-foo", "foobar"),
            ("x-test-header-bar", "bar"),
            ("x-test-header-baz", "baz"),
            ("x-test-header-quux", "quux"),
        ]))
    );
}

const BODY: PropKey<Payload> = PropKey::new("body");

fn echo_app() -> App {
    App::with_routes(Router::new().at("/", |cx: Builder, _| async move {
        Some(Resource::new().post(move || async move {
            cx.with(validate_body(BODY))
                .handle(|cx: Context| async move {
                    match cx.get(&BODY) {
                        Ok(body) => Status::Ok.response().json(body),
                        Err(_) => Status::InternalServerError.response(),
                    }
                })
                .await
        }))
    }))
}

#[tokio::test]
async fn test_body_validation_echoes_payload() {
    let app = echo_app();

    let res = run_app(&app, post_json("/", json!({"foo": "hello", "bar": true, "baz": 42}))).await;
    assert_eq!(res.status(), Some(200));

    assert_eq!(res.body(), Some(r#"{"foo":"hello","bar":true,"baz":42}"#));

    let res = run_app(&app, post("/", r#"{"foo":"hi","bar":false,"baz":1.5}"#)).await;
    assert_eq!(res.status(), Some(200));
    assert_eq!(res.body(), Some(r#"{"foo":"hi","bar":false,"baz":1.5}"#));
}

#[tokio::test]
async fn test_body_validation_rejects_mismatch() {
    let app = echo_app();

    let wrong_shape = run_app(&app, post_json("/", json!({"foo": 1, "bar": true}))).await;
    assert_eq!(wrong_shape.status(), Some(400));
    assert!(wrong_shape.json().is_some_and(|b| b["error"].is_string()));

    let malformed = run_app(&app, post("/", "{\"foo\":")).await;
    assert_eq!(malformed.status(), Some(400));
    assert!(malformed.json().is_some_and(|b| b["error"].is_string()));
}

#[tokio::test]
async fn test_boot_runs_once_per_request() {
    let counter = CountingMiddleware::new();
    let boot_counter = counter.clone();

    let app = App::new(
        move |cx: Builder| {
            let counter = boot_counter.clone();
            async move { cx.with(counter) }
        },
        Router::new().at("/foo", |cx: Builder, _| async move { Some(ok_resource(cx)) }),
    );

    run_app(&app, get("/foo")).await;
    run_app(&app, get("/foo")).await;
    assert_eq!(counter.count(), 2);
}

#[tokio::test]
async fn test_panic_is_answered_with_server_error() {
    fn explode() -> Status {
        panic!("boom")
    }

    let app = App::with_routes(Router::new().at("/boom", |cx: Builder, _| async move {
        Some(Resource::new().get(move || async move {
            cx.handle(|_: Context| async { explode() }).await
        }))
    }));

    let res = run_app(&app, get("/boom")).await;
    assert_eq!(res.status(), Some(500));
    assert!(res.is_ended());

    // The app keeps serving after a panic.
    assert_eq!(run_app(&app, get("/elsewhere")).await.status(), Some(404));
}

#[tokio::test]
async fn test_request_headers_reach_handlers() {
    let app = App::with_routes(Router::new().at("/ip", |cx: Builder, _| async move {
        Some(Resource::new().get(move || async move {
            cx.handle(|cx: Context| async move {
                let ip = wicket::client_ip(cx.request().headers(), Some("127.0.0.1"));
                Status::Ok.response().json(&ip)
            })
            .await
        }))
    }));

    let res = run_app(
        &app,
        request("GET", "/ip", "", headers([("x-forwarded-for", "10.1.2.3, 10.0.0.1")])),
    )
    .await;
    assert_eq!(res.body(), Some("\"10.1.2.3\""));
}

#[tokio::test]
async fn test_custom_base_headers() {
    let app = App::with_routes(
        Router::new().at("/foo", |cx: Builder, _| async move { Some(ok_resource(cx)) }),
    )
    .options(AppOptions::default().base_header("Server", "wicket"));

    let res = run_app(&app, get("/foo")).await;
    assert_eq!(
        res.headers(),
        Some(&headers([
            ("Connection", "keep-alive"),
            ("Content-Type", "application/json"),
            ("Server", "wicket"),
        ]))
    );
}

#[tokio::test]
async fn test_concurrent_requests_are_independent() {
    const ID: PropKey<String> = PropKey::new("id");

    let app = App::with_routes(Router::new().at("/item/{id}", |cx: Builder, args| async move {
        let id = args.get("id").cloned().unwrap_or_default();
        Some(Resource::new().get(move || async move {
            cx.with(middleware::sync(move |_: Context| {
                set_prop(&ID, id.clone())
            }))
            .handle(|cx: Context| async move {
                let id = cx.get(&ID).cloned().unwrap_or_default();
                Status::Ok.response().text(id)
            })
            .await
        }))
    }));

    let responses = join_all((0..8).map(|i| run_app(&app, get(&format!("/item/{i}"))))).await;
    for (i, res) in responses.iter().enumerate() {
        assert_eq!(res.body(), Some(i.to_string().as_str()));
    }
}
