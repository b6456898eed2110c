//! HTTP API tests
//!
//! The router is driven in-process (`oneshot`) over an in-memory database;
//! render jobs are pulled off the queue and run with a stub converter.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use check_render::{PdfConverter, RenderResult};
use check_server::db::DbService;
use check_server::db::repository::{check, printer};
use check_server::rendering::{
    CheckStorage, CheckTemplate, RenderJobs, RenderOutcome, RenderWorker,
};
use check_server::{Config, RenderQueue, ServerState, build_app};
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use shared::models::{CheckStatus, CheckType, PrinterCreate};
use tower::ServiceExt;

const FAKE_PDF: &[u8] = b"%PDF-1.4 test";

struct StubConverter;

#[async_trait]
impl PdfConverter for StubConverter {
    async fn convert(&self, _html: &str) -> RenderResult<Vec<u8>> {
        Ok(FAKE_PDF.to_vec())
    }

    async fn is_available(&self) -> bool {
        true
    }
}

struct TestApp {
    _dir: tempfile::TempDir,
    state: ServerState,
    jobs: RenderJobs,
    app: Router,
}

impl TestApp {
    async fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_overrides(dir.path().to_string_lossy(), 0);
        config.ensure_work_dir_structure().unwrap();

        let pool = DbService::in_memory().await.unwrap().pool;
        let (queue, jobs) = RenderQueue::channel();
        let state = ServerState::new(config, pool, queue);
        let app = build_app().with_state(state.clone());

        Self {
            _dir: dir,
            state,
            jobs,
            app,
        }
    }

    async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    async fn json(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, bytes) = self.request(method, uri, body).await;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn add_printer(&self, name: &str, api_key: &str, check_type: &str, point_id: i64) -> Value {
        let (status, body) = self
            .json(
                Method::POST,
                "/printers/",
                Some(json!({
                    "name": name,
                    "api_key": api_key,
                    "check_type": check_type,
                    "point_id": point_id
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body
    }

    async fn check_count(&self) -> i64 {
        check::count(&self.state.pool).await.unwrap()
    }

    fn drain_jobs(&mut self) -> Vec<i64> {
        let mut ids = Vec::new();
        while let Ok(job) = self.jobs.try_recv() {
            ids.push(job.check_id);
        }
        ids
    }

    /// Run every queued render job to completion
    async fn render_all(&mut self) {
        let worker = RenderWorker::new(
            self.state.pool.clone(),
            CheckStorage::new(&self.state.config.media_root),
            Arc::new(CheckTemplate::new().unwrap()),
            Arc::new(StubConverter),
        );
        for check_id in self.drain_jobs() {
            let outcome = worker
                .process(check_server::RenderJob { check_id })
                .await
                .unwrap();
            assert!(matches!(outcome, RenderOutcome::Rendered { .. }), "{outcome:?}");
        }
    }
}

fn order(order_id: i64, point_id: i64) -> Value {
    json!({
        "order": {
            "order_id": order_id,
            "point_id": point_id,
            "dishes": [
                {"name": "Soup", "quantity": 1, "total_price": 11.4},
                {"name": "Bread", "quantity": 2, "total_price": 9}
            ]
        }
    })
}

// ========== Check creation ==========

#[tokio::test]
async fn missing_order_id_creates_nothing() {
    let mut app = TestApp::new().await;
    app.add_printer("Kitchen", "k1", "kitchen", 1).await;

    let (status, body) = app
        .json(Method::POST, "/checks/", Some(json!({"order": {"point_id": 1}})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Order id is missing.");

    // no order at all
    let (status, body) = app.json(Method::POST, "/checks/", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Order id is missing.");

    assert_eq!(app.check_count().await, 0);
    assert!(app.drain_jobs().is_empty());
}

#[tokio::test]
async fn point_without_printers_is_named() {
    let app = TestApp::new().await;
    app.add_printer("Kitchen", "k1", "kitchen", 1).await;

    let (status, body) = app.json(Method::POST, "/checks/", Some(order(5, 42))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "There are no printers available for point: 42.");
    assert_eq!(app.check_count().await, 0);
}

#[tokio::test]
async fn missing_point_id_is_rejected() {
    let app = TestApp::new().await;
    let (status, body) = app
        .json(Method::POST, "/checks/", Some(json!({"order": {"order_id": 3}})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Point id is missing from the order.");
}

#[tokio::test]
async fn one_check_and_one_job_per_printer() {
    let mut app = TestApp::new().await;
    app.add_printer("Kitchen", "k1", "kitchen", 1).await;
    app.add_printer("Bar", "k2", "kitchen", 1).await;
    app.add_printer("Front", "c1", "client", 1).await;
    app.add_printer("Elsewhere", "c2", "client", 2).await;

    let (status, body) = app.json(Method::POST, "/checks/", Some(order(101, 1))).await;
    assert_eq!(status, StatusCode::CREATED);

    let checks = body["checks"].as_array().unwrap();
    assert_eq!(checks.len(), 3);
    assert!(checks.iter().all(|c| c["status"] == "new"));
    assert!(checks.iter().all(|c| c["order"]["order_id"] == 101));

    let queued = app.drain_jobs();
    let ids: Vec<i64> = checks.iter().map(|c| c["id"].as_i64().unwrap()).collect();
    assert_eq!(queued, ids);
    assert_eq!(app.check_count().await, 3);
}

#[tokio::test]
async fn duplicate_order_rejected_entirely() {
    let mut app = TestApp::new().await;
    app.add_printer("Kitchen", "k1", "kitchen", 1).await;
    app.add_printer("Front", "c1", "client", 1).await;

    let (status, _) = app.json(Method::POST, "/checks/", Some(order(7, 1))).await;
    assert_eq!(status, StatusCode::CREATED);
    app.drain_jobs();

    let (status, body) = app.json(Method::POST, "/checks/", Some(order(7, 1))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Checks for order: 7 already exist.");
    assert_eq!(app.check_count().await, 2);
    assert!(app.drain_jobs().is_empty());
}

// ========== Print polling ==========

#[tokio::test]
async fn poll_without_rendered_checks_changes_nothing() {
    let mut app = TestApp::new().await;
    app.add_printer("Kitchen", "k1", "kitchen", 1).await;
    app.json(Method::POST, "/checks/", Some(order(1, 1))).await;
    app.drain_jobs();

    let (status, body) = app.json(Method::GET, "/checks/print-checks/k1/", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .starts_with("There are no checks available for the printer")
    );

    let (_, list) = app.json(Method::GET, "/checks/", None).await;
    assert_eq!(list[0]["status"], "new");
}

#[tokio::test]
async fn poll_with_unknown_key_is_404() {
    let app = TestApp::new().await;
    let (status, body) = app.json(Method::GET, "/checks/print-checks/nope/", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "There are no available printers.");
}

#[tokio::test]
async fn poll_flips_rendered_to_printed_once() {
    let mut app = TestApp::new().await;
    app.add_printer("Kitchen", "k1", "kitchen", 1).await;
    app.add_printer("Front", "c1", "client", 1).await;
    app.json(Method::POST, "/checks/", Some(order(1, 1))).await;
    app.json(Method::POST, "/checks/", Some(order(2, 1))).await;
    app.render_all().await;

    let (status, body) = app.json(Method::GET, "/checks/print-checks/k1", None).await;
    assert_eq!(status, StatusCode::OK);
    let printed = body.as_array().unwrap();
    assert_eq!(printed.len(), 2);
    assert!(printed.iter().all(|c| c["status"] == "printed"));
    assert!(printed.iter().all(|c| c["check_type"] == "kitchen"));

    let (status, _) = app.json(Method::GET, "/checks/print-checks/k1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // client printer's checks untouched
    let (_, rendered) = app
        .json(Method::GET, "/checks/?status=rendered", None)
        .await;
    assert_eq!(rendered.as_array().unwrap().len(), 2);
}

// ========== Download ==========

#[tokio::test]
async fn download_requires_printed_status() {
    let mut app = TestApp::new().await;
    app.add_printer("Kitchen", "k1", "kitchen", 1).await;
    let (_, body) = app.json(Method::POST, "/checks/", Some(order(1, 1))).await;
    let id = body["checks"][0]["id"].as_i64().unwrap();

    let (status, body) = app.json(Method::GET, &format!("/download-checks/{id}/"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        format!("Check: {id} is not available for download.")
    );

    // file on disk, still not printed
    app.render_all().await;
    let (status, body) = app.json(Method::GET, &format!("/download-checks/{id}/"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("not available for download"));

    let (status, _) = app.json(Method::GET, "/download-checks/999/", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn download_with_missing_file() {
    let app = TestApp::new().await;
    app.add_printer("Kitchen", "k1", "kitchen", 1).await;
    let (_, body) = app.json(Method::POST, "/checks/", Some(order(1, 1))).await;
    let id = body["checks"][0]["id"].as_i64().unwrap();

    // printed by hand, never rendered
    let (status, _) = app
        .json(
            Method::PATCH,
            &format!("/checks/{id}/"),
            Some(json!({"status": "printed"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.json(Method::GET, &format!("/download-checks/{id}"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "There is no available check for download.");
}

#[tokio::test]
async fn end_to_end_order_to_download() {
    let mut app = TestApp::new().await;
    let kitchen = app.add_printer("Kitchen", "kitchen-key", "kitchen", 1).await;
    let client = app.add_printer("Front", "client-key", "client", 1).await;

    let (status, body) = app.json(Method::POST, "/checks/", Some(order(101, 1))).await;
    assert_eq!(status, StatusCode::CREATED);
    let checks = body["checks"].as_array().unwrap().clone();
    assert_eq!(checks.len(), 2);
    assert_eq!(checks[0]["printer_id"], kitchen["id"]);
    assert_eq!(checks[0]["check_type"], "kitchen");
    assert_eq!(checks[1]["printer_id"], client["id"]);
    assert_eq!(checks[1]["check_type"], "client");
    assert!(checks.iter().all(|c| c["status"] == "new"));

    app.render_all().await;
    for c in &checks {
        let (_, stored) = app
            .json(Method::GET, &format!("/checks/{}/", c["id"]), None)
            .await;
        assert_eq!(stored["status"], "rendered");
        let pdf_file = stored["pdf_file"].as_str().unwrap();
        assert!(pdf_file.starts_with("pdf/"));
        assert!(pdf_file.ends_with(".pdf"));
    }

    for key in ["kitchen-key", "client-key"] {
        let (status, body) = app
            .json(Method::GET, &format!("/checks/print-checks/{key}/"), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["status"], "printed");
    }

    for c in &checks {
        let request = Request::builder()
            .uri(format!("/download-checks/{}/", c["id"]))
            .body(Body::empty())
            .unwrap();
        let response = app.app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "application/pdf");
        let disposition = response.headers()["content-disposition"].to_str().unwrap();
        assert!(disposition.starts_with("inline; filename="));
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], FAKE_PDF);
    }
}

// ========== Printer CRUD ==========

#[tokio::test]
async fn printer_validation_and_conflicts() {
    let app = TestApp::new().await;
    app.add_printer("Kitchen", "k1", "kitchen", 1).await;

    let (status, body) = app
        .json(
            Method::POST,
            "/printers",
            Some(json!({"name": "Other", "api_key": "k1", "check_type": "client", "point_id": 2})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Printer with this api key already exists.");

    let (status, _) = app
        .json(
            Method::POST,
            "/printers/",
            Some(json!({"name": "Bad", "api_key": "b", "check_type": "receipt", "point_id": 1})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .json(
            Method::POST,
            "/printers/",
            Some(json!({"name": "x".repeat(71), "api_key": "long", "check_type": "client", "point_id": 1})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.json(Method::GET, "/printers/999/", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn printer_update_and_filters() {
    let app = TestApp::new().await;
    let p = app.add_printer("Main Kitchen", "k1", "kitchen", 1).await;
    app.add_printer("Front", "c1", "client", 1).await;
    let id = p["id"].as_i64().unwrap();

    let (status, body) = app
        .json(
            Method::PATCH,
            &format!("/printers/{id}"),
            Some(json!({"point_id": 3})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["point_id"], 3);
    assert_eq!(body["name"], "Main Kitchen");

    let (status, body) = app
        .json(
            Method::PUT,
            &format!("/printers/{id}/"),
            Some(json!({"name": "Grill", "api_key": "g1", "check_type": "client", "point_id": 4})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["api_key"], "g1");
    assert_eq!(body["check_type"], "client");

    let (_, found) = app.json(Method::GET, "/printers/?search=gri", None).await;
    assert_eq!(found.as_array().unwrap().len(), 1);
    let (_, clients) = app.json(Method::GET, "/printers/?check_type=client", None).await;
    assert_eq!(clients.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn printer_delete_cascades_to_checks() {
    let mut app = TestApp::new().await;
    let p = app.add_printer("Kitchen", "k1", "kitchen", 1).await;
    app.add_printer("Front", "c1", "client", 1).await;
    app.json(Method::POST, "/checks/", Some(order(1, 1))).await;
    assert_eq!(app.check_count().await, 2);

    let (status, _) = app
        .request(Method::DELETE, &format!("/printers/{}/", p["id"]), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(app.check_count().await, 1);

    // the deleted check's job becomes a no-op
    let worker = RenderWorker::new(
        app.state.pool.clone(),
        CheckStorage::new(&app.state.config.media_root),
        Arc::new(CheckTemplate::new().unwrap()),
        Arc::new(StubConverter),
    );
    let jobs = app.drain_jobs();
    assert_eq!(jobs.len(), 2);
    let first = worker
        .process(check_server::RenderJob { check_id: jobs[0] })
        .await
        .unwrap();
    assert!(matches!(first, RenderOutcome::Skipped(_)));

    let (status, _) = app
        .request(Method::DELETE, &format!("/printers/{}/", p["id"]), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ========== Check edits ==========

#[tokio::test]
async fn check_status_only_moves_forward() {
    let app = TestApp::new().await;
    app.add_printer("Kitchen", "k1", "kitchen", 1).await;
    let (_, body) = app.json(Method::POST, "/checks/", Some(order(1, 1))).await;
    let id = body["checks"][0]["id"].as_i64().unwrap();
    let uri = format!("/checks/{id}/");

    let (status, body) = app
        .json(Method::PATCH, &uri, Some(json!({"status": "rendered"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "rendered");

    let (status, body) = app
        .json(Method::PATCH, &uri, Some(json!({"status": "new"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Check status cannot move from rendered to new.");

    let (status, body) = app
        .json(Method::PATCH, &uri, Some(json!({"printer_id": 77})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Printer 77 does not exist.");

    let (status, _) = app.request(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, body) = app.json(Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], format!("Check {id} not found"));
}

// ========== Restart ==========

#[tokio::test]
async fn new_checks_are_rendered_after_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::with_overrides(dir.path().to_string_lossy(), 0);

    // first run: checks created, process stops before the worker gets to them
    let (queue, jobs) = RenderQueue::channel();
    let state = ServerState::initialize(&config, queue).await.unwrap();
    printer::create(
        &state.pool,
        PrinterCreate {
            name: "Kitchen".to_string(),
            api_key: "k1".to_string(),
            check_type: CheckType::Kitchen,
            point_id: 1,
        },
    )
    .await
    .unwrap();
    let created = state
        .check_service()
        .create_checks(json!({"order_id": 7, "point_id": 1, "dishes": []}))
        .await
        .unwrap();
    let check_id = created[0].id;
    drop(jobs);
    state.pool.close().await;
    drop(state);

    // second run on the same work dir
    let (queue, jobs) = RenderQueue::channel();
    let state = ServerState::initialize(&config, queue).await.unwrap();
    let tasks = state
        .start_background_tasks(jobs, Arc::new(StubConverter))
        .unwrap();

    let mut status = None;
    for _ in 0..100 {
        status = check::find_status(&state.pool, check_id).await.unwrap();
        if status == Some(CheckStatus::Rendered) {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    tasks.shutdown().await;

    assert_eq!(status, Some(CheckStatus::Rendered));
    let stored = check::find_by_id(&state.pool, check_id).await.unwrap().unwrap();
    let pdf_file = stored.pdf_file.unwrap();
    let bytes = std::fs::read(std::path::Path::new(&config.media_root).join(pdf_file)).unwrap();
    assert_eq!(bytes, FAKE_PDF);
}

#[tokio::test]
async fn requeue_skips_checks_past_new() {
    let mut app = TestApp::new().await;
    app.add_printer("Kitchen", "k1", "kitchen", 1).await;
    app.json(Method::POST, "/checks/", Some(order(1, 1))).await;
    app.json(Method::POST, "/checks/", Some(order(2, 1))).await;
    let first = app.drain_jobs()[0];
    check::mark_rendered(&app.state.pool, first, "pdf/first.pdf")
        .await
        .unwrap();

    let requeued = app.state.requeue_pending().await.unwrap();
    assert_eq!(requeued, 1);
    let ids = app.drain_jobs();
    assert_eq!(ids.len(), 1);
    assert_ne!(ids[0], first);
}

// ========== Misc ==========

#[tokio::test]
async fn health_reports_database() {
    let app = TestApp::new().await;
    let (status, body) = app.json(Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "check-server");
    assert_eq!(body["database"], "ok");
}

#[tokio::test]
async fn responses_carry_request_id() {
    let app = TestApp::new().await;
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app.app.clone().oneshot(request).await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));

    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "abc-123")
        .body(Body::empty())
        .unwrap();
    let response = app.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "abc-123");
}
