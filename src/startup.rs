use std::sync::Arc;

use anyhow::Context;
use axum::{
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use secrecy::ExposeSecret;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tower_sessions::{MemoryStore, SessionManagerLayer, SessionStore};
use tower_sessions_redis_store::{fred::prelude::*, RedisStore};

use crate::{
    configuration::{SessionBackend, Settings},
    controller::{health, login_form, operator_home, operator_logout, submit_login},
    events::{AuditLogListener, EventDispatcher, OPERATOR_LOGIN},
    i18n::Locales,
    middleware::auth::{bind_operator, require_operator},
    repository::{OperatorRepository, PgOperatorRepository},
    view_engine::TeraView,
    Result,
};

const REDIS_POOL_SIZE: usize = 6;

#[derive(Clone)]
pub struct AppState {
    pub operators: Arc<dyn OperatorRepository>,
    pub tera_engine: Arc<TeraView>,
    pub locales: Arc<Locales>,
    pub dispatcher: Arc<EventDispatcher>,
    pub base_url: String,
    pub version: String,
    pub remember_days: i64,
}

impl AppState {
    /// Wires the production collaborators described by `configuration`.
    pub fn build(configuration: &Settings, db_pool: PgPool) -> Result<Self> {
        let base_url = configuration.application.base_url.clone();

        let tera_engine = TeraView::from_custom_dir(&configuration.views.directory)?
            .with_global("base_url", &base_url);
        let locales = Locales::new(&configuration.locales.default_locale);
        let dispatcher =
            EventDispatcher::new().subscribe(OPERATOR_LOGIN, Arc::new(AuditLogListener));

        Ok(Self {
            operators: Arc::new(PgOperatorRepository::new(db_pool)),
            tera_engine: Arc::new(tera_engine),
            locales: Arc::new(locales),
            dispatcher: Arc::new(dispatcher),
            base_url,
            version: configuration.application.version(),
            remember_days: configuration.session.remember_days,
        })
    }

    /// Absolute URI of `path` on this application.
    pub fn uri_for_path(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

pub fn app<Store>(state: AppState, session_layer: SessionManagerLayer<Store>) -> Router
where
    Store: SessionStore + Clone,
{
    let operator_area = Router::new()
        .route("/operator", get(operator_home))
        .route_layer(from_fn_with_state(state.clone(), require_operator));

    Router::new()
        .route("/health", get(health))
        .route("/operator/login", get(login_form).post(submit_login))
        .route("/operator/logout", get(operator_logout))
        .merge(operator_area)
        .layer(from_fn_with_state(state.clone(), bind_operator))
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(configuration: Settings) -> anyhow::Result<()> {
    let db_pool = PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_secs(2))
        .connect_lazy_with(configuration.database.with_db());
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .context("Failed to migrate the database")?;
    let state = AppState::build(&configuration, db_pool)?;

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(&address).await?;
    tracing::info!(%address, "listening");

    let secure = configuration.session.secure_cookie;
    let app = match configuration.session.store {
        SessionBackend::Memory => {
            tracing::warn!("sessions are kept in memory and lost on restart");
            app(
                state,
                SessionManagerLayer::new(MemoryStore::default()).with_secure(secure),
            )
        }
        SessionBackend::Redis => {
            let redis_uri = configuration
                .session
                .redis_uri
                .as_ref()
                .context("session.redis_uri is required for the redis session store")?;
            let pool = RedisPool::new(
                RedisConfig::from_url(redis_uri.expose_secret())?,
                None,
                None,
                None,
                REDIS_POOL_SIZE,
            )?;
            let _connection = pool.connect();
            pool.wait_for_connect()
                .await
                .context("Failed to connect to redis")?;
            app(
                state,
                SessionManagerLayer::new(RedisStore::new(pool)).with_secure(secure),
            )
        }
    };

    axum::serve(listener, app).await?;
    Ok(())
}
