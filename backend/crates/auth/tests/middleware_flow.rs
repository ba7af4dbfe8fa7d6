//! End-to-end checks of the auth middleware through the router.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use auth::domain::entity::user_record::UserRecord;
use auth::domain::repository::{StoreError, StoreResult, UserRecordRepository};
use auth::domain::value_object::username::Username;
use auth::{
    BannedTerms, InMemoryUserRecordRepository, Secret, TokenIssuer, UsernamePolicy, auth_router,
};
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

/// In-memory store that counts token lookups and can be switched off
#[derive(Clone, Default)]
struct CountingRepository {
    inner: InMemoryUserRecordRepository,
    lookups: Arc<AtomicUsize>,
    down: Arc<AtomicBool>,
}

impl CountingRepository {
    fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    fn check_up(&self) -> StoreResult<()> {
        if self.down.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("store offline".into()));
        }
        Ok(())
    }
}

impl UserRecordRepository for CountingRepository {
    async fn find_by_token(&self, token: &str) -> StoreResult<Option<UserRecord>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.check_up()?;
        self.inner.find_by_token(token).await
    }

    async fn exists_by_username(&self, username: &Username) -> StoreResult<bool> {
        self.check_up()?;
        self.inner.exists_by_username(username).await
    }

    async fn create(&self, record: &UserRecord) -> StoreResult<()> {
        self.check_up()?;
        self.inner.create(record).await
    }

    async fn delete_by_token(&self, token: &str) -> StoreResult<bool> {
        self.check_up()?;
        self.inner.delete_by_token(token).await
    }
}

struct Harness {
    app: Router,
    repo: CountingRepository,
    issuer: TokenIssuer,
}

fn harness() -> Harness {
    let secret = Secret::new("S1").unwrap();
    let repo = CountingRepository::default();
    let policy = UsernamePolicy::with_banned_terms(BannedTerms::new(["rude"]));
    Harness {
        app: auth_router(repo.clone(), &secret, policy),
        repo,
        issuer: TokenIssuer::new(&secret),
    }
}

impl Harness {
    async fn seed(&self, username: &str, token: &str) {
        self.repo
            .inner
            .create(&UserRecord::new(Username::from_db(username), token.to_string()))
            .await
            .unwrap();
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn me(&self, authorization: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .uri("/me")
                .header(header::AUTHORIZATION, authorization)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }
}

#[tokio::test]
async fn seeded_record_authenticates() {
    let h = harness();
    let token = h.issuer.generate_token("alice").unwrap();
    h.seed("alice", &token).await;

    let (status, body) = h.me(&format!("Bearer {token}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "username": "alice" }));
    assert_eq!(h.repo.lookups(), 1);
}

#[tokio::test]
async fn valid_token_without_record_is_rejected() {
    let h = harness();
    let token = h.issuer.generate_token("alice").unwrap();

    let (status, body) = h.me(&format!("Bearer {token}")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Authentication failed");
    assert_eq!(h.repo.lookups(), 1);
}

#[tokio::test]
async fn malformed_header_never_reaches_store() {
    let h = harness();
    let token = h.issuer.generate_token("alice").unwrap();
    h.seed("alice", &token).await;

    let (status, _) = h.me(&format!("Token {token} extra")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(h.repo.lookups(), 0);
}

#[tokio::test]
async fn foreign_signature_never_reaches_store() {
    let h = harness();
    let forged = TokenIssuer::new(&Secret::new("S2").unwrap())
        .generate_token("alice")
        .unwrap();
    h.seed("alice", &forged).await;

    let (status, _) = h.me(&format!("Bearer {forged}")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(h.repo.lookups(), 0);
}

#[tokio::test]
async fn failures_share_one_response_body() {
    let h = harness();
    let token = h.issuer.generate_token("alice").unwrap();

    let (_, not_found) = h.me(&format!("Bearer {token}")).await;
    let (_, bad_header) = h.me("Bearer").await;
    let (_, bad_token) = h.me("Bearer not.a.token").await;

    h.seed("alice", &token).await;
    h.repo.down.store(true, Ordering::SeqCst);
    let (status, store_down) = h.me(&format!("Bearer {token}")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(not_found, bad_header);
    assert_eq!(bad_header, bad_token);
    assert_eq!(bad_token, store_down);
}

#[tokio::test]
async fn sign_up_then_revoke() {
    let h = harness();

    let (status, body) = h.post_json("/signup", json!({ "username": "Farmer_Joe" })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["username"], "Farmer_Joe");
    let token = body["token"].as_str().unwrap().to_string();
    assert_eq!(token, h.issuer.generate_token("Farmer_Joe").unwrap());

    let authorization = format!("Bearer {token}");
    assert_eq!(h.me(&authorization).await.0, StatusCode::OK);

    let (status, _) = h
        .send(
            Request::builder()
                .method("DELETE")
                .uri("/me")
                .header(header::AUTHORIZATION, &authorization)
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    assert_eq!(h.me(&authorization).await.0, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn sign_up_rejections() {
    let h = harness();

    let (status, body) = h.post_json("/signup", json!({ "username": "npc_Bob" })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "RESERVED_SEQUENCE");
    assert_eq!(body["context"], "NPC");

    assert_eq!(
        h.post_json("/signup", json!({ "username": "alice" })).await.0,
        StatusCode::CREATED
    );
    let (status, _) = h.post_json("/signup", json!({ "username": "ALICE" })).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn username_check_reports_verdict() {
    let h = harness();

    let (status, body) = h
        .post_json("/username/check", json!({ "username": "cool-farmer_1" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));

    let (_, body) = h
        .post_json("/username/check", json!({ "username": "so_RUDE" }))
        .await;
    assert_eq!(
        body,
        json!({ "ok": false, "code": "CONTAINS_TERM", "detail": "RUDE" })
    );
}
