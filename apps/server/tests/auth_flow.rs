//! End-to-end API tests: signup with email OTP, session cookie, workspace
//! membership resolution, role gating, and the target lifecycle over HTTP.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use rand::RngCore;
use tempfile::TempDir;
use tower::ServiceExt;

use teamline_core::auth::VerificationPurpose;
use teamline_core::errors::Result;
use teamline_core::mailer::Mailer;
use teamline_server::api::app_router;
use teamline_server::config::Config;
use teamline_server::main_lib::build_state_with_mailer;

#[derive(Default)]
struct CapturingMailer {
    codes: Mutex<Vec<(String, String)>>,
}

impl CapturingMailer {
    fn last_code(&self, email: &str) -> String {
        self.codes
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == email)
            .map(|(_, code)| code.clone())
            .expect("no verification code captured")
    }
}

#[async_trait]
impl Mailer for CapturingMailer {
    async fn send_verification_code(
        &self,
        email: &str,
        code: &str,
        _purpose: VerificationPurpose,
    ) -> Result<()> {
        self.codes
            .lock()
            .unwrap()
            .push((email.to_string(), code.to_string()));
        Ok(())
    }

    async fn send_welcome(&self, _email: &str, _name: &str) -> Result<()> {
        Ok(())
    }
}

struct TestApp {
    app: Router,
    mailer: Arc<CapturingMailer>,
    _tmp: TempDir,
}

async fn spawn_app() -> TestApp {
    let tmp = tempfile::tempdir().unwrap();
    let mut secret = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut secret);

    let config = Config {
        listen_addr: "127.0.0.1:0".to_string(),
        db_path: tmp.path().join("test.db").to_string_lossy().to_string(),
        uploads_root: tmp.path().join("uploads").to_string_lossy().to_string(),
        static_dir: tmp.path().join("static").to_string_lossy().to_string(),
        session_secret: secret.to_vec(),
        session_cookie: "tl_session".to_string(),
        session_ttl_secs: 3600,
    };

    let mailer = Arc::new(CapturingMailer::default());
    let state = build_state_with_mailer(&config, mailer.clone())
        .await
        .unwrap();
    TestApp {
        app: app_router(state),
        mailer,
        _tmp: tmp,
    }
}

struct RequestSpec<'a> {
    method: Method,
    uri: &'a str,
    body: Option<serde_json::Value>,
    cookie: Option<&'a str>,
    workspace: Option<&'a str>,
}

impl<'a> RequestSpec<'a> {
    fn get(uri: &'a str) -> Self {
        Self {
            method: Method::GET,
            uri,
            body: None,
            cookie: None,
            workspace: None,
        }
    }

    fn post(uri: &'a str, body: serde_json::Value) -> Self {
        Self {
            method: Method::POST,
            uri,
            body: Some(body),
            cookie: None,
            workspace: None,
        }
    }

    fn put(uri: &'a str, body: serde_json::Value) -> Self {
        Self {
            method: Method::PUT,
            uri,
            body: Some(body),
            cookie: None,
            workspace: None,
        }
    }

    fn cookie(mut self, cookie: &'a str) -> Self {
        self.cookie = Some(cookie);
        self
    }

    fn workspace(mut self, workspace_id: &'a str) -> Self {
        self.workspace = Some(workspace_id);
        self
    }
}

async fn send(app: &Router, spec: RequestSpec<'_>) -> (StatusCode, serde_json::Value, Vec<String>) {
    let mut builder = Request::builder().method(spec.method).uri(spec.uri);
    if let Some(cookie) = spec.cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    if let Some(workspace) = spec.workspace {
        builder = builder.header("x-workspace-id", workspace);
    }
    let request = match spec.body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let set_cookies = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok().map(|s| s.to_string()))
        .collect();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, json, set_cookies)
}

/// Signs a user up through the OTP flow and returns their session cookie.
async fn signup_user(test: &TestApp, email: &str, name: &str) -> String {
    let (status, _, _) = send(
        &test.app,
        RequestSpec::post(
            "/api/auth/signup",
            serde_json::json!({ "email": email, "name": name, "password": "password123" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let code = test.mailer.last_code(email);
    let (status, json, cookies) = send(
        &test.app,
        RequestSpec::post(
            "/api/auth/verify-code",
            serde_json::json!({ "email": email, "code": code, "type": "signup" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["user"]["email"], email);

    let session = cookies
        .iter()
        .find(|c| c.starts_with("tl_session="))
        .expect("no session cookie set");
    session.split(';').next().unwrap().to_string()
}

#[tokio::test]
async fn signup_flow_rejects_wrong_code_and_sets_session() {
    let test = spawn_app().await;

    let (status, _, _) = send(
        &test.app,
        RequestSpec::post(
            "/api/auth/signup",
            serde_json::json!({
                "email": "alice@example.com", "name": "Alice", "password": "password123"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // A wrong code is a 400 with the uniform envelope.
    let real_code = test.mailer.last_code("alice@example.com");
    let wrong = if real_code == "000000" { "000001" } else { "000000" };
    let (status, json, _) = send(
        &test.app,
        RequestSpec::post(
            "/api/auth/verify-code",
            serde_json::json!({
                "email": "alice@example.com", "code": wrong, "type": "signup"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("Invalid verification code"));

    // The right code verifies, creates the user, and sets the cookie.
    let (status, json, cookies) = send(
        &test.app,
        RequestSpec::post(
            "/api/auth/verify-code",
            serde_json::json!({
                "email": "alice@example.com", "code": real_code, "type": "signup"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["redirectTo"], "/onboarding");
    assert!(cookies.iter().any(|c| c.starts_with("tl_session=")));
}

#[tokio::test]
async fn protected_routes_require_session_and_workspace() {
    let test = spawn_app().await;

    // No session at all
    let (status, json, _) = send(&test.app, RequestSpec::get("/api/workspaces")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["success"], false);

    let session = signup_user(&test, "bob@example.com", "Bob").await;

    // Session but no workspace header
    let (status, _, _) = send(
        &test.app,
        RequestSpec::get("/api/tasks").cookie(&session),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Session plus a workspace the user is not a member of
    let (status, _, _) = send(
        &test.app,
        RequestSpec::get("/api/tasks")
            .cookie(&session)
            .workspace("nonexistent"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn target_lifecycle_over_http() {
    let test = spawn_app().await;
    let session = signup_user(&test, "carol@example.com", "Carol").await;

    let (status, json, _) = send(
        &test.app,
        RequestSpec::post("/api/workspaces", serde_json::json!({ "name": "Acme" }))
            .cookie(&session),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let workspace_id = json["data"]["id"].as_str().unwrap().to_string();

    let (_, me, _) = send(&test.app, RequestSpec::get("/api/auth/me").cookie(&session)).await;
    let user_id = me["data"]["id"].as_str().unwrap().to_string();

    // Creator is Owner, so target creation passes the policy table.
    let deadline = (chrono::Utc::now() + chrono::Duration::days(7)).naive_utc();
    let (status, json, _) = send(
        &test.app,
        RequestSpec::post(
            "/api/targets",
            serde_json::json!({
                "workspaceId": "ignored",
                "title": "Close deals",
                "assignedTo": user_id,
                "targetValue": 10.0,
                "unit": "deals",
                "deadline": deadline,
            }),
        )
        .cookie(&session)
        .workspace(&workspace_id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "active");
    let target_id = json["data"]["id"].as_str().unwrap().to_string();

    // Assignee progress to the target value resolves to completed.
    let (status, json, _) = send(
        &test.app,
        RequestSpec::put(
            &format!("/api/targets/{target_id}/progress"),
            serde_json::json!({ "currentValue": 10.0 }),
        )
        .cookie(&session)
        .workspace(&workspace_id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "completed");
    assert!(json["data"]["completedAt"].is_string());
    let completed_at = json["data"]["completedAt"].clone();

    // Re-reading does not move the completion stamp.
    let (_, json, _) = send(
        &test.app,
        RequestSpec::get(&format!("/api/targets/{target_id}"))
            .cookie(&session)
            .workspace(&workspace_id),
    )
    .await;
    assert_eq!(json["data"]["completedAt"], completed_at);

    // Targets for the user are reconciled the same way.
    let (_, json, _) = send(
        &test.app,
        RequestSpec::get(&format!("/api/targets/user/{user_id}"))
            .cookie(&session)
            .workspace(&workspace_id),
    )
    .await;
    assert_eq!(json["data"][0]["status"], "completed");
}

#[tokio::test]
async fn invitation_flow_and_member_role_gating() {
    let test = spawn_app().await;
    let owner = signup_user(&test, "dora@example.com", "Dora").await;
    let member = signup_user(&test, "eve@example.com", "Eve").await;

    let (_, json, _) = send(
        &test.app,
        RequestSpec::post("/api/workspaces", serde_json::json!({ "name": "Acme" }))
            .cookie(&owner),
    )
    .await;
    let workspace_id = json["data"]["id"].as_str().unwrap().to_string();

    // Owner invites Eve; she already has an account, so she gets an
    // actionable notification carrying the invite token.
    let (status, _, _) = send(
        &test.app,
        RequestSpec::post(
            "/api/workspace/invitations",
            serde_json::json!({ "email": "eve@example.com", "role": "Member" }),
        )
        .cookie(&owner)
        .workspace(&workspace_id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Eve sees the invitation without being a member yet.
    let (status, json, _) = send(
        &test.app,
        RequestSpec::get("/api/notifications").cookie(&member),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let invitation = &json["data"][0];
    assert_eq!(invitation["kind"], "workspaceInvitation");
    assert_eq!(invitation["requiresAction"], true);
    let notification_id = invitation["id"].as_str().unwrap().to_string();

    // Accepting joins the workspace with the invited role.
    let (status, json, _) = send(
        &test.app,
        RequestSpec::post(
            &format!("/api/notifications/{notification_id}/accept"),
            serde_json::json!({}),
        )
        .cookie(&member),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["role"], "Member");

    // A Member reads targets but cannot create them.
    let (status, _, _) = send(
        &test.app,
        RequestSpec::get("/api/targets")
            .cookie(&member)
            .workspace(&workspace_id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let deadline = (chrono::Utc::now() + chrono::Duration::days(7)).naive_utc();
    let (status, json, _) = send(
        &test.app,
        RequestSpec::post(
            "/api/targets",
            serde_json::json!({
                "workspaceId": "ignored",
                "title": "Nope",
                "assignedTo": "whoever",
                "targetValue": 1.0,
                "unit": "things",
                "deadline": deadline,
            }),
        )
        .cookie(&member)
        .workspace(&workspace_id),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["success"], false);

    // Owner sees the join notification from the accept fan-out.
    let (_, json, _) = send(
        &test.app,
        RequestSpec::get("/api/notifications").cookie(&owner),
    )
    .await;
    let kinds: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|n| n["kind"].as_str())
        .collect();
    assert!(kinds.contains(&"workspaceMemberJoined"));
}

#[tokio::test]
async fn attendance_clock_in_out() {
    let test = spawn_app().await;
    let session = signup_user(&test, "finn@example.com", "Finn").await;
    let (_, json, _) = send(
        &test.app,
        RequestSpec::post("/api/workspaces", serde_json::json!({ "name": "Acme" }))
            .cookie(&session),
    )
    .await;
    let workspace_id = json["data"]["id"].as_str().unwrap().to_string();

    // Clock out before clocking in is rejected.
    let (status, _, _) = send(
        &test.app,
        RequestSpec::post("/api/attendance/clock-out", serde_json::json!({}))
            .cookie(&session)
            .workspace(&workspace_id),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _, _) = send(
        &test.app,
        RequestSpec::post("/api/attendance/clock-in", serde_json::json!({}))
            .cookie(&session)
            .workspace(&workspace_id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Double clock-in is rejected, clock-out closes the record.
    let (status, _, _) = send(
        &test.app,
        RequestSpec::post("/api/attendance/clock-in", serde_json::json!({}))
            .cookie(&session)
            .workspace(&workspace_id),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, json, _) = send(
        &test.app,
        RequestSpec::post("/api/attendance/clock-out", serde_json::json!({}))
            .cookie(&session)
            .workspace(&workspace_id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["data"]["clockOut"].is_string());
}
