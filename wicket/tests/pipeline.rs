//! Outcome algebra and context pipeline through the public facade.

mod common;

use common::{FailingMiddleware, OrderRecordingMiddleware, headers};
use std::{
    cell::Cell,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};
use wicket::{
    Builder, Context, Extension, FutureOutcome, Outcome, PropKey, Props, Request, Status,
    middleware::{self, inject_header, inject_props, set_prop},
    testing::CountingMiddleware,
};

fn base() -> Builder {
    Builder::new(
        Context::new(Request::new("GET", "/")).with_headers(headers([("Connection", "keep-alive")])),
    )
}

#[test]
fn test_outcome_laws() {
    let f = |x: i32| -> Outcome<String, i32> { Outcome::Success(x + 1) };
    assert_eq!(Outcome::<String, i32>::Success(1).chain(f), f(1));

    let called = Cell::new(false);
    let failed = Outcome::<String, i32>::Failure("e".into()).chain(|x| {
        called.set(true);
        Outcome::Success(x)
    });
    assert_eq!(failed, Outcome::Failure("e".into()));
    assert!(!called.get());

    let branches = Cell::new(0);
    for value in [Outcome::<i32, i32>::Success(1), Outcome::Failure(2)] {
        value.fold(|_| branches.set(branches.get() + 1), |_| branches.set(branches.get() + 1));
    }
    assert_eq!(branches.get(), 2);
}

#[tokio::test]
async fn test_future_outcome_reruns_its_effect() {
    let counter = Arc::new(AtomicUsize::new(0));
    let probe = counter.clone();
    let deferred = FutureOutcome::<(), usize>::of(move || {
        let probe = probe.clone();
        async move { Outcome::Success(probe.fetch_add(1, Ordering::SeqCst)) }
    });

    assert_eq!(deferred.run().await, Outcome::Success(0));
    assert_eq!(deferred.run().await, Outcome::Success(1));
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_middleware_runs_in_declaration_order() {
    let order = Arc::new(Mutex::new(Vec::new()));
    let step = |id| OrderRecordingMiddleware { id, order: order.clone() };

    let response = base()
        .with(step(1))
        .with(step(2))
        .with(step(3))
        .handle(|_: Context| async { Status::Ok })
        .await;

    assert_eq!(response.status(), 200);
    assert_eq!(*order.lock().unwrap(), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_first_failure_wins() {
    let after = CountingMiddleware::new();

    let response = base()
        .with(FailingMiddleware { status: Status::Unauthorized })
        .with(FailingMiddleware { status: Status::Forbidden })
        .with(after.clone())
        .handle(|_: Context| async { Status::Ok })
        .await;

    assert_eq!(response.status(), 401);
    assert_eq!(after.count(), 0);
    assert_eq!(
        response.headers(),
        &headers([("Connection", "keep-alive"), ("x-failed-by", "FailingMiddleware")])
    );
}

#[tokio::test]
async fn test_failure_response_keeps_its_own_headers() {
    let response = base()
        .with(inject_header("Connection", "close"))
        .with(middleware::sync(|_: Context| {
            Outcome::Failure(Status::ServiceUnavailable.response().header("Connection", "upgrade"))
        }))
        .handle(|_: Context| async { Status::Ok })
        .await;

    assert_eq!(response.status(), 503);
    assert_eq!(response.headers(), &headers([("Connection", "upgrade")]));
}

#[tokio::test]
async fn test_collision_directions() {
    const USER: PropKey<&'static str> = PropKey::new("user");

    let response = base()
        .with(inject_props(Props::new().with(&USER, "first")))
        .with(|_: Context| async { set_prop(&USER, "second") })
        .with(inject_header("x-version", "1"))
        .with(inject_header("x-version", "2"))
        .handle(|cx: Context| async move {
            Status::Ok.response().text(cx.get(&USER).copied().unwrap_or("none"))
        })
        .await;

    // Properties: the older value wins. Headers: the newer value wins.
    assert_eq!(response.body().and_then(|b| b.as_text()), Some("first"));
    assert_eq!(
        response.headers().get("x-version").and_then(|v| v.as_str()),
        Some("2")
    );
}

#[tokio::test]
async fn test_middleware_sees_earlier_contributions() {
    const TOKEN: PropKey<String> = PropKey::new("token");
    const USER: PropKey<String> = PropKey::new("user");

    let response = base()
        .with(|_: Context| async { set_prop(&TOKEN, "abc".to_string()) })
        .with(|cx: Context| async move {
            match cx.get(&TOKEN) {
                Ok(token) if token == "abc" => Outcome::Success(
                    Extension::props(Props::new().with(&USER, "ann".to_string()))
                        .with_header("x-user", "ann"),
                ),
                _ => Outcome::Failure(Status::Unauthorized.response()),
            }
        })
        .handle(|cx: Context| async move {
            Status::Ok.response().text(cx.get(&USER).cloned().unwrap_or_default())
        })
        .await;

    assert_eq!(response.status(), 200);
    assert_eq!(response.body().and_then(|b| b.as_text()), Some("ann"));
    assert!(response.headers().contains("x-user"));
}
