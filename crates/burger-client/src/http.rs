//! # HTTP Implementation
//!
//! [`BurgerApi`] over reqwest.
//!
//! ## Authorized Requests
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  access token stored and unexpired?                                     │
//! │       │ no ──► refresh with refresh token ──► save new session          │
//! │       ▼                                                                 │
//! │  send with `Authorization: Bearer <access>`                             │
//! │       │                                                                 │
//! │       ├── "jwt expired" ──► refresh, save, send ONCE more               │
//! │       └── anything else ──► returned as is                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! No timeouts and no other retries: a request that fails, fails.

use std::sync::Arc;

use async_trait::async_trait;
use burger_core::{
    CreateOrderResponse, FeedResponse, Ingredient, LoginRequest, Order, OrderLookupResponse,
    ProfileUpdate, RegisterRequest, ResetPasswordRequest, User,
};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::api::{
    AuthResponse, BurgerApi, CreateOrderRequest, EmailRequest, Envelope, IngredientsResponse,
    MessageResponse, TokenRequest, TokenResponse, UserOrdersResponse, UserResponse,
};
use crate::config::ClientConfig;
use crate::credentials::{CredentialStore, StoredCredentials};
use crate::error::{ClientError, ClientResult};

pub struct HttpApi {
    http: Client,
    config: ClientConfig,
    credentials: Arc<dyn CredentialStore>,
}

impl HttpApi {
    pub fn new(config: ClientConfig, credentials: Arc<dyn CredentialStore>) -> ClientResult<Self> {
        let http = Client::builder()
            .user_agent(concat!("stellar-burgers/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(HttpApi {
            http,
            config,
            credentials,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        self.config.endpoint(path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        decode_response(status, &body)
    }

    /// Sends with the stored access token, refreshing it when missing or
    /// rejected as expired.
    async fn authorized<T, F>(&self, build: F) -> ClientResult<T>
    where
        T: DeserializeOwned + Send,
        F: Fn(&str) -> RequestBuilder + Send + Sync,
    {
        let token = match self.credentials.access_token() {
            Some(token) => token,
            None => self.refresh_session().await?,
        };

        match self.send(build(&token).bearer_auth(&token)).await {
            Err(err) if err.is_jwt_expired() => {
                info!("Access token expired, refreshing");
                let token = self.refresh_session().await?;
                self.send(build(&token).bearer_auth(&token)).await
            }
            other => other,
        }
    }

    /// Trades the refresh token for a new session and stores it.
    async fn refresh_session(&self) -> ClientResult<String> {
        let refresh = self
            .credentials
            .refresh_token()
            .ok_or(ClientError::NotAuthenticated)?;

        let tokens = match self.refresh_token(&refresh).await {
            Ok(tokens) => tokens,
            Err(err) => {
                warn!(error = %err, "Token refresh failed");
                return Err(err);
            }
        };

        let session = StoredCredentials::issue(
            &tokens.access_token,
            &tokens.refresh_token,
            self.config.access_token_max_age(),
        );
        self.credentials.save(&session)?;
        debug!("Session refreshed");

        session.access_token.ok_or(ClientError::NotAuthenticated)
    }
}

/// Turns a status and body into the expected payload or a readable error.
///
/// Non-2xx bodies are usually `{ "success": false, "message": ... }`; the
/// message is used when present.
pub(crate) fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> ClientResult<T> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<MessageResponse>(body)
            .ok()
            .and_then(|m| m.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("Request failed with status {}", status));
        return Err(ClientError::Status { status, message });
    }
    Ok(serde_json::from_str(body)?)
}

#[async_trait]
impl BurgerApi for HttpApi {
    async fn get_ingredients(&self) -> ClientResult<Vec<Ingredient>> {
        let request = self.http.get(self.url("/ingredients"));
        let response: IngredientsResponse = self.send(request).await?;
        Ok(response.checked()?.data)
    }

    async fn get_feed(&self) -> ClientResult<FeedResponse> {
        self.send(self.http.get(self.url("/orders/all"))).await
    }

    async fn get_user_orders(&self) -> ClientResult<Vec<Order>> {
        let url = self.url("/orders");
        let response: UserOrdersResponse = self.authorized(|_| self.http.get(&url)).await?;
        Ok(response.checked()?.orders)
    }

    async fn create_order(&self, ingredient_ids: &[String]) -> ClientResult<CreateOrderResponse> {
        let url = self.url("/orders");
        let body = CreateOrderRequest {
            ingredients: ingredient_ids,
        };
        self.authorized(|_| self.http.post(&url).json(&body)).await
    }

    async fn get_order_by_number(&self, number: u32) -> ClientResult<OrderLookupResponse> {
        self.send(self.http.get(self.url(&format!("/orders/{}", number))))
            .await
    }

    async fn login(&self, request: &LoginRequest) -> ClientResult<AuthResponse> {
        let builder = self.http.post(self.url("/auth/login")).json(request);
        self.send::<AuthResponse>(builder).await?.checked()
    }

    async fn register(&self, request: &RegisterRequest) -> ClientResult<AuthResponse> {
        let builder = self.http.post(self.url("/auth/register")).json(request);
        self.send::<AuthResponse>(builder).await?.checked()
    }

    async fn logout(&self, refresh_token: &str) -> ClientResult<()> {
        let builder = self
            .http
            .post(self.url("/auth/logout"))
            .json(&TokenRequest {
                token: refresh_token,
            });
        self.send::<MessageResponse>(builder).await?.checked()?;
        Ok(())
    }

    async fn refresh_token(&self, refresh_token: &str) -> ClientResult<TokenResponse> {
        let request = self
            .http
            .post(self.url("/auth/token"))
            .json(&TokenRequest { token: refresh_token });
        self.send::<TokenResponse>(request).await?.checked()
    }

    async fn get_user(&self) -> ClientResult<User> {
        let url = self.url("/auth/user");
        let response: UserResponse = self.authorized(|_| self.http.get(&url)).await?;
        Ok(response.checked()?.user)
    }

    async fn update_user(&self, update: &ProfileUpdate) -> ClientResult<User> {
        let url = self.url("/auth/user");
        let response: UserResponse = self
            .authorized(|_| self.http.patch(&url).json(update))
            .await?;
        Ok(response.checked()?.user)
    }

    async fn forgot_password(&self, email: &str) -> ClientResult<()> {
        let builder = self
            .http
            .post(self.url("/password-reset"))
            .json(&EmailRequest { email });
        self.send::<MessageResponse>(builder).await?.checked()?;
        Ok(())
    }

    async fn reset_password(&self, request: &ResetPasswordRequest) -> ClientResult<()> {
        let builder = self
            .http
            .post(self.url("/password-reset/reset"))
            .json(request);
        self.send::<MessageResponse>(builder).await?.checked()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::MemoryCredentialStore;

    #[test]
    fn test_decode_success_body() {
        let feed: FeedResponse = decode_response(
            200,
            r#"{"success": true, "orders": [], "total": 5, "totalToday": 1}"#,
        )
        .unwrap();
        assert!(feed.success);
        assert_eq!(feed.total, 5);
    }

    #[test]
    fn test_decode_error_body_uses_server_message() {
        let result: ClientResult<UserResponse> = decode_response(
            401,
            r#"{"success": false, "message": "email or password are incorrect"}"#,
        );
        match result {
            Err(ClientError::Status { status, message }) => {
                assert_eq!(status, 401);
                assert_eq!(message, "email or password are incorrect");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_error_without_json_body() {
        let result: ClientResult<UserResponse> = decode_response(502, "<html>Bad gateway</html>");
        assert_eq!(
            result.unwrap_err().to_string(),
            "Request failed with status 502"
        );
    }

    #[test]
    fn test_expired_jwt_is_recognised_from_status_body() {
        let result: ClientResult<UserResponse> =
            decode_response(403, r#"{"success": false, "message": "jwt expired"}"#);
        assert!(result.unwrap_err().is_jwt_expired());
    }

    #[test]
    fn test_malformed_success_body_is_decode_error() {
        let result: ClientResult<UserResponse> = decode_response(200, "{}");
        assert!(matches!(result, Err(ClientError::Decode(_))));
    }

    #[tokio::test]
    async fn test_refresh_without_refresh_token_is_not_authenticated() {
        let api = HttpApi::new(
            ClientConfig::default(),
            Arc::new(MemoryCredentialStore::new()),
        )
        .unwrap();

        let result = api.refresh_session().await;
        assert!(matches!(result, Err(ClientError::NotAuthenticated)));
    }

    // -------------------------------------------------------------------------
    // Token refresh against a stub server
    // -------------------------------------------------------------------------

    use std::sync::Mutex;

    use chrono::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    const USER_BODY: &str = r#"{"success": true, "user": {"email": "test@example.com", "name": "Test"}}"#;
    const TOKEN_BODY: &str = r#"{"success": true, "accessToken": "Bearer fresh", "refreshToken": "refresh-2"}"#;
    const EXPIRED_BODY: &str = r#"{"success": false, "message": "jwt expired"}"#;

    #[derive(Debug, Clone)]
    struct Seen {
        method: String,
        path: String,
        authorization: Option<String>,
        body: String,
    }

    type Responder = Arc<dyn Fn(&Seen) -> (u16, String) + Send + Sync>;

    /// Answers each connection with one canned response and records the
    /// request. Returns the API base URL and the request log.
    async fn stub_server(responder: Responder) -> (String, Arc<Mutex<Vec<Seen>>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}/api", listener.local_addr().unwrap());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = seen.clone();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let Some(request) = read_request(&mut socket).await else {
                    continue;
                };
                let (status, body) = responder(&request);
                log.lock().unwrap().push(request);

                let response = format!(
                    "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        (base_url, seen)
    }

    async fn read_request(socket: &mut TcpStream) -> Option<Seen> {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        let head_len = loop {
            let n = socket.read(&mut chunk).await.ok()?;
            if n == 0 {
                return None;
            }
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&buf[..head_len]).to_string();
        let mut lines = head.lines();
        let mut start = lines.next()?.split_whitespace();
        let method = start.next()?.to_string();
        let path = start.next()?.to_string();

        let mut authorization = None;
        let mut content_length = 0;
        for line in lines {
            if let Some((name, value)) = line.split_once(':') {
                match name.trim().to_ascii_lowercase().as_str() {
                    "authorization" => authorization = Some(value.trim().to_string()),
                    "content-length" => content_length = value.trim().parse().unwrap_or(0),
                    _ => {}
                }
            }
        }

        while buf.len() < head_len + content_length {
            let n = socket.read(&mut chunk).await.ok()?;
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }
        let body = String::from_utf8_lossy(&buf[head_len..]).to_string();

        Some(Seen {
            method,
            path,
            authorization,
            body,
        })
    }

    fn api_for(base_url: String, credentials: Arc<MemoryCredentialStore>) -> HttpApi {
        let config = ClientConfig {
            base_url,
            ..Default::default()
        };
        HttpApi::new(config, credentials).unwrap()
    }

    #[tokio::test]
    async fn test_missing_access_token_is_refreshed_before_request() {
        let (base_url, seen) = stub_server(Arc::new(|request: &Seen| match request.path.as_str() {
            "/api/auth/token" => (200, TOKEN_BODY.to_string()),
            _ => (200, USER_BODY.to_string()),
        }))
        .await;
        let credentials = Arc::new(MemoryCredentialStore::with_credentials(StoredCredentials {
            refresh_token: Some("refresh-1".to_string()),
            ..Default::default()
        }));
        let api = api_for(base_url, credentials.clone());

        let user = api.get_user().await.unwrap();

        assert_eq!(user.name, "Test");
        let seen = seen.lock().unwrap().clone();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].method, "POST");
        assert_eq!(seen[0].path, "/api/auth/token");
        assert!(seen[0].body.contains("refresh-1"));
        assert_eq!(seen[1].path, "/api/auth/user");
        assert_eq!(seen[1].authorization.as_deref(), Some("Bearer fresh"));

        assert_eq!(credentials.access_token().as_deref(), Some("fresh"));
        assert_eq!(credentials.refresh_token().as_deref(), Some("refresh-2"));
    }

    #[tokio::test]
    async fn test_expired_jwt_refreshes_and_retries() {
        let (base_url, seen) = stub_server(Arc::new(|request: &Seen| {
            match (request.path.as_str(), request.authorization.as_deref()) {
                ("/api/auth/token", _) => (200, TOKEN_BODY.to_string()),
                (_, Some("Bearer stale")) => (403, EXPIRED_BODY.to_string()),
                _ => (200, USER_BODY.to_string()),
            }
        }))
        .await;
        let credentials = Arc::new(MemoryCredentialStore::with_credentials(
            StoredCredentials::issue("Bearer stale", "refresh-1", Duration::seconds(1200)),
        ));
        let api = api_for(base_url, credentials.clone());

        let user = api.get_user().await.unwrap();

        assert_eq!(user.email, "test@example.com");
        let seen = seen.lock().unwrap().clone();
        let paths: Vec<&str> = seen.iter().map(|s| s.path.as_str()).collect();
        assert_eq!(paths, vec!["/api/auth/user", "/api/auth/token", "/api/auth/user"]);
        assert_eq!(seen[2].authorization.as_deref(), Some("Bearer fresh"));
        assert_eq!(credentials.access_token().as_deref(), Some("fresh"));
    }

    #[tokio::test]
    async fn test_expired_jwt_is_retried_only_once() {
        let (base_url, seen) = stub_server(Arc::new(|request: &Seen| match request.path.as_str() {
            "/api/auth/token" => (200, TOKEN_BODY.to_string()),
            _ => (403, EXPIRED_BODY.to_string()),
        }))
        .await;
        let credentials = Arc::new(MemoryCredentialStore::with_credentials(
            StoredCredentials::issue("Bearer stale", "refresh-1", Duration::seconds(1200)),
        ));
        let api = api_for(base_url, credentials);

        let result = api.get_user().await;

        assert!(result.unwrap_err().is_jwt_expired());
        assert_eq!(seen.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_stored_session() {
        let (base_url, _) = stub_server(Arc::new(|_: &Seen| {
            (401, r#"{"success": false, "message": "Token is invalid"}"#.to_string())
        }))
        .await;
        let stored = StoredCredentials {
            refresh_token: Some("refresh-1".to_string()),
            ..Default::default()
        };
        let credentials = Arc::new(MemoryCredentialStore::with_credentials(stored.clone()));
        let api = api_for(base_url, credentials.clone());

        let result = api.get_user_orders().await;

        assert_eq!(result.unwrap_err().to_string(), "Token is invalid");
        assert_eq!(credentials.load().unwrap(), stored);
    }
}
