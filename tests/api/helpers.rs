use std::sync::{Arc, Mutex};

use argon2::{password_hash::SaltString, Algorithm, Argon2, Params, PasswordHasher, Version};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{self, header, Request, Response},
    Router,
};
use fake::{
    faker::{internet::en::SafeEmail, name::en::Name},
    Fake,
};
use helpdesk::{
    configuration::{LogFormat, LoggerSettings},
    domain::OperatorRecord,
    errors::Error,
    events::{Event, EventDispatcher, EventListener, OperatorLoginEvent, OPERATOR_LOGIN},
    i18n::Locales,
    repository::OperatorRepository,
    startup::{app, AppState},
    telemetry::init,
    view_engine::TeraView,
    Result,
};
use http_body_util::BodyExt;
use once_cell::sync::Lazy;
use tower::ServiceExt;
use tower_sessions::{MemoryStore, SessionManagerLayer};
use uuid::Uuid;

pub const BASE_URL: &str = "http://127.0.0.1";

static TRACING: Lazy<()> = Lazy::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        let guard = init(&LoggerSettings {
            level: "debug".into(),
            format: LogFormat::Pretty,
            directory: None,
        });
        std::mem::forget(guard);
    }
});

pub struct InMemoryOperators(Vec<OperatorRecord>);

#[async_trait]
impl OperatorRepository for InMemoryOperators {
    async fn operator_by_login(&self, login: &str) -> Result<Option<OperatorRecord>> {
        Ok(self.0.iter().find(|o| o.login == login).cloned())
    }
}

#[derive(Default)]
pub struct RecordingListener {
    events: Mutex<Vec<OperatorLoginEvent>>,
}

impl RecordingListener {
    pub fn logins(&self) -> Vec<OperatorLoginEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl EventListener for RecordingListener {
    fn name(&self) -> &str {
        "recording"
    }

    fn handle(&self, event: &Event) -> Result<()> {
        let Event::OperatorLogin(login) = event;
        self.events.lock().unwrap().push(login.clone());
        Ok(())
    }
}

pub struct FailingListener;

impl EventListener for FailingListener {
    fn name(&self) -> &str {
        "failing"
    }

    fn handle(&self, _event: &Event) -> Result<()> {
        Err(Error::listener(self.name(), "subscriber exploded"))
    }
}

pub struct TestOperator {
    pub login: String,
    pub password: String,
    pub disabled: bool,
}

impl TestOperator {
    pub fn generate(login: &str, disabled: bool) -> Self {
        Self {
            login: login.to_string(),
            password: Uuid::new_v4().to_string(),
            disabled,
        }
    }

    fn record(&self) -> OperatorRecord {
        // Cheap parameters keep the suite fast, verification reads them from
        // the PHC string.
        let salt = SaltString::generate(&mut rand::thread_rng());
        let password_hash = Argon2::new(
            Algorithm::Argon2id,
            Version::V0x13,
            Params::new(1024, 1, 1, None).unwrap(),
        )
        .hash_password(self.password.as_bytes(), &salt)
        .unwrap()
        .to_string();
        OperatorRecord {
            operator_id: Uuid::new_v4(),
            login: self.login.clone(),
            password_hash: Some(password_hash),
            common_name: Name().fake(),
            email: SafeEmail().fake(),
            disabled: self.disabled,
            remember_me: false,
        }
    }
}

pub struct TestApp {
    pub app_state: AppState,
    pub session_store: MemoryStore,
    pub listener: Arc<RecordingListener>,
    pub operator: TestOperator,
    pub disabled_operator: TestOperator,
}

pub struct TestAppBuilder {
    extra_listener: Option<Arc<dyn EventListener>>,
}

impl TestAppBuilder {
    pub fn with_listener(mut self, listener: Arc<dyn EventListener>) -> Self {
        self.extra_listener = Some(listener);
        self
    }

    pub async fn spawn(self) -> TestApp {
        Lazy::force(&TRACING);

        let operator = TestOperator::generate("carol", false);
        let disabled_operator = TestOperator::generate("bob", true);
        let operators = InMemoryOperators(vec![operator.record(), disabled_operator.record()]);

        let listener = Arc::new(RecordingListener::default());
        let mut dispatcher = EventDispatcher::new().subscribe(OPERATOR_LOGIN, listener.clone());
        if let Some(extra) = self.extra_listener {
            dispatcher = dispatcher.subscribe(OPERATOR_LOGIN, extra);
        }

        let tera_engine = TeraView::build()
            .expect("Failed to load views.")
            .with_global("base_url", BASE_URL);

        let app_state = AppState {
            operators: Arc::new(operators),
            tera_engine: Arc::new(tera_engine),
            locales: Arc::new(Locales::new("en")),
            dispatcher: Arc::new(dispatcher),
            base_url: BASE_URL.to_string(),
            version: "9.9.9-test".to_string(),
            remember_days: 30,
        };

        TestApp {
            app_state,
            session_store: MemoryStore::default(),
            listener,
            operator,
            disabled_operator,
        }
    }
}

pub fn test_app() -> TestAppBuilder {
    TestAppBuilder {
        extra_listener: None,
    }
}

pub async fn spawn_app() -> TestApp {
    test_app().spawn().await
}

impl TestApp {
    pub fn app(&self) -> Router {
        let session_layer =
            SessionManagerLayer::new(self.session_store.clone()).with_secure(false);
        app(self.app_state.clone(), session_layer)
    }

    async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.app()
            .oneshot(request)
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut request = Request::builder().method(http::Method::GET).uri(uri);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        self.send(request.body(Body::empty()).unwrap()).await
    }

    pub async fn get_login_form(&self, query: &str) -> Response<Body> {
        self.get(&format!("/operator/login{}", query), None).await
    }

    pub async fn post_login(&self, body: serde_json::Value) -> Response<Body> {
        self.post_login_with(body, "", None, None).await
    }

    pub async fn post_login_with(
        &self,
        body: serde_json::Value,
        query: &str,
        cookie: Option<&str>,
        accept_language: Option<&str>,
    ) -> Response<Body> {
        let mut request = Request::builder()
            .method(http::Method::POST)
            .uri(format!("/operator/login{}", query))
            .header(
                header::CONTENT_TYPE,
                mime::APPLICATION_WWW_FORM_URLENCODED.as_ref(),
            );
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        if let Some(accept_language) = accept_language {
            request = request.header(header::ACCEPT_LANGUAGE, accept_language);
        }
        let body = serde_urlencoded::to_string(&body).expect("Failed to encode login form.");
        self.send(request.body(Body::from(body)).unwrap()).await
    }

    /// Logs the regular test operator in and returns the session cookie.
    pub async fn login_and_get_cookie(&self, remember: bool) -> String {
        let mut body = serde_json::json!({
            "login": self.operator.login,
            "password": self.operator.password,
        });
        if remember {
            body["isRemember"] = "on".into();
        }
        let response = self.post_login(body).await;
        assert_eq!(response.status().as_u16(), 303);
        session_cookie(&response).expect("Login did not set a session cookie.")
    }
}

pub fn assert_response_redirect_to(response: Response<Body>, location: &str) {
    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        location
    );
}

/// `name=value` of the session cookie set by the response, if any.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(str::to_string)
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body.")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
