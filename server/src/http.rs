use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use anyhow::Context;
use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Form, Json, Router,
    extract::{FromRef, Path, Query, State},
    http::{self, HeaderName, HeaderValue, Method, StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, Key, PrivateCookieJar, SameSite};
use products_hr::{CSV_FILENAME, Dashboard, EmployeeId, ExperienceBand, HrError, Intent, SortKey};
use serde::{Deserialize, Serialize};
use time::Duration as TimeDuration;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    config::AppConfig,
    graphql::SchemaType,
    render::{self, DraftForm},
    session::{SessionId, SessionRegistry},
};

const SESSION_COOKIE: &str = "hr_session";

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<SessionRegistry>,
    pub schema: SchemaType,
    pub config: Arc<AppConfig>,
    pub cookie_key: Key,
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

#[derive(Clone, Debug)]
pub struct ServeConfig {
    addr: SocketAddr,
}

impl ServeConfig {
    pub fn new(host: IpAddr, port: u16) -> Self {
        Self {
            addr: SocketAddr::from((host, port)),
        }
    }
}

pub async fn serve(config: ServeConfig, state: AppState) -> anyhow::Result<()> {
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;

    info!(%config.addr, "hr dashboard listening");
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;
    Ok(())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed = origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect::<Vec<_>>();
    let layer = CorsLayer::new()
        .allow_headers([http::header::CONTENT_TYPE])
        .allow_methods([Method::POST, Method::GET]);
    // Credentials cannot be combined with a wildcard origin.
    if allowed.is_empty() {
        layer.allow_origin(AllowOrigin::any())
    } else {
        layer
            .allow_credentials(true)
            .allow_origin(AllowOrigin::list(allowed))
    }
}

pub fn build_router(state: AppState) -> Router {
    let request_id = MakeRequestUuid;
    let header_name = HeaderName::from_static("x-request-id");
    Router::new()
        .route("/", get(home_handler))
        .route("/dashboard", get(dashboard_handler))
        .route("/dashboard/view", get(view_handler))
        .route("/dashboard/page/{page}", get(page_handler))
        .route("/dashboard/new", get(new_form_handler))
        .route("/dashboard/edit", get(edit_form_handler))
        .route("/dashboard/form", post(submit_form_handler))
        .route("/dashboard/form/cancel", post(cancel_form_handler))
        .route("/charts", get(charts_handler))
        .route("/employees.csv", get(csv_handler))
        .route("/health", get(health_handler))
        .route("/graphql", post(graphql_handler))
        .route("/graphiql", get(graphiql_handler))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(header_name.clone(), request_id))
                .layer(PropagateRequestIdLayer::new(header_name))
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&state.config.cors_allowed_origins)),
        )
        .with_state(state)
}

/// Resolve the caller's session. The cookie is re-issued on every request so its
/// max-age slides with the server-side idle timeout.
fn session_for(
    state: &AppState,
    jar: PrivateCookieJar,
) -> HttpResult<(PrivateCookieJar, SessionId)> {
    let presented = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok());
    let session = state.registry.open(presented).map_err(HttpError::internal)?;
    let cookie = Cookie::build((SESSION_COOKIE, session.0.to_string()))
        .path("/")
        .http_only(true)
        .secure(state.config.secure_cookies)
        .same_site(SameSite::Lax)
        .max_age(TimeDuration::try_from(state.config.session_idle).unwrap_or(TimeDuration::HOUR))
        .build();
    Ok((jar.add(cookie), session))
}

fn with_dashboard<T>(
    state: &AppState,
    session: SessionId,
    f: impl FnOnce(&mut Dashboard) -> T,
) -> HttpResult<T> {
    state.registry.with(session, f).map_err(HttpError::internal)
}

/// Apply one intent and send the browser back to the dashboard.
fn apply_intents(
    state: &AppState,
    jar: PrivateCookieJar,
    intents: Vec<Intent>,
) -> HttpResult<(PrivateCookieJar, Redirect)> {
    let (jar, session) = session_for(state, jar)?;
    with_dashboard(state, session, |dashboard| {
        for intent in intents {
            match dashboard.apply(intent) {
                Ok(_) => {}
                Err(HrError::EmployeeNotFound(id)) => {
                    warn!(employee_id = %id, "intent referenced a missing employee");
                }
                Err(err) => warn!(error = %err, "intent rejected"),
            }
        }
    })?;
    Ok((jar, Redirect::to("/dashboard")))
}

async fn home_handler() -> Html<String> {
    Html(render::home_page())
}

async fn dashboard_handler(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
) -> HttpResult<(PrivateCookieJar, Html<String>)> {
    let (jar, session) = session_for(&state, jar)?;
    let html = with_dashboard(&state, session, |dashboard| render::dashboard_page(dashboard))?;
    Ok((jar, Html(html)))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ViewQuery {
    department: Option<String>,
    experience: Option<String>,
    sort: Option<String>,
    search: Option<String>,
}

impl ViewQuery {
    fn into_intents(self) -> HttpResult<Vec<Intent>> {
        let mut intents = Vec::new();
        if let Some(department) = self.department {
            intents.push(Intent::DepartmentChanged(Some(department)));
        }
        if let Some(raw) = self.experience {
            let band = raw.parse::<ExperienceBand>().map_err(HttpError::bad_request)?;
            intents.push(Intent::ExperienceChanged(band));
        }
        if let Some(raw) = self.sort {
            let key = raw.parse::<SortKey>().map_err(HttpError::bad_request)?;
            intents.push(Intent::SortChanged(key));
        }
        if let Some(search) = self.search {
            intents.push(Intent::SearchChanged(search));
        }
        Ok(intents)
    }
}

async fn view_handler(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Query(query): Query<ViewQuery>,
) -> HttpResult<(PrivateCookieJar, Redirect)> {
    apply_intents(&state, jar, query.into_intents()?)
}

async fn page_handler(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Path(page): Path<u32>,
) -> HttpResult<(PrivateCookieJar, Redirect)> {
    apply_intents(&state, jar, vec![Intent::PageChanged(page)])
}

async fn new_form_handler(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
) -> HttpResult<(PrivateCookieJar, Redirect)> {
    apply_intents(&state, jar, vec![Intent::CreateRequested])
}

#[derive(Debug, Deserialize)]
struct EditQuery {
    id: String,
}

async fn edit_form_handler(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Query(query): Query<EditQuery>,
) -> HttpResult<(PrivateCookieJar, Redirect)> {
    apply_intents(&state, jar, vec![Intent::EditRequested(EmployeeId::new(query.id))])
}

async fn submit_form_handler(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Form(form): Form<DraftForm>,
) -> HttpResult<(PrivateCookieJar, Redirect)> {
    apply_intents(&state, jar, vec![Intent::FormSubmitted(form.into_draft())])
}

async fn cancel_form_handler(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
) -> HttpResult<(PrivateCookieJar, Redirect)> {
    apply_intents(&state, jar, vec![Intent::FormCancelled])
}

async fn charts_handler(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
) -> HttpResult<(PrivateCookieJar, Html<String>)> {
    let (jar, session) = session_for(&state, jar)?;
    let data = with_dashboard(&state, session, |dashboard| dashboard.charts())?;
    Ok((jar, Html(render::charts_page(&data))))
}

async fn csv_handler(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
) -> HttpResult<Response> {
    let (jar, session) = session_for(&state, jar)?;
    let csv = with_dashboard(&state, session, |dashboard| dashboard.export_csv())?;
    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{CSV_FILENAME}\""),
        ),
    ];
    Ok((jar, headers, csv).into_response())
}

async fn graphql_handler(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    request: GraphQLRequest,
) -> HttpResult<(PrivateCookieJar, GraphQLResponse)> {
    let (jar, session) = session_for(&state, jar)?;
    let request = request.into_inner().data(session);
    let response = state.schema.execute(request).await;
    Ok((jar, GraphQLResponse::from(response)))
}

async fn graphiql_handler() -> Html<String> {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

async fn health_handler(State(state): State<AppState>) -> HttpResult<Json<HealthResponse>> {
    let sessions = state.registry.len().map_err(HttpError::internal)?;
    Ok(Json(HealthResponse {
        ok: true,
        version: env!("CARGO_PKG_VERSION"),
        sessions,
    }))
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    version: &'static str,
    sessions: usize,
}

type HttpResult<T> = Result<T, HttpError>;

#[derive(Debug)]
struct HttpError {
    status: StatusCode,
    message: String,
}

impl HttpError {
    fn bad_request(err: HrError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: err.to_string(),
        }
    }

    fn internal(err: anyhow::Error) -> Self {
        tracing::error!(error = %err, "request failed");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "internal server error".to_string(),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        signal(SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    ctrl_c.await;

    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    };
}
