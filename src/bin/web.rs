//! Single binary web server: page shell from templates/, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_web::{
    get, post, put,
    web::{self, Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use team_registration_web::{
    parse_player_count, submit, validate_registration, League, Notification, PlayerField,
    Registration, RegistrationPayload,
};
use uuid::Uuid;

/// Identifier for one form session (client stores it between requests).
type RegistrationId = Uuid;

/// Per-session entry: form state + last activity time (for auto-cleanup).
struct RegistrationEntry {
    form: Registration,
    last_activity: Instant,
}

/// In-memory state: many form sessions by ID. Entries are removed after 12h inactivity.
type AppState = Data<RwLock<HashMap<RegistrationId, RegistrationEntry>>>;

/// Inactivity threshold: sessions not touched for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// A form session as the API returns it: session id + the form state.
#[derive(serde::Serialize)]
struct RegistrationView<'a> {
    id: RegistrationId,
    #[serde(flatten)]
    form: &'a Registration,
}

#[derive(serde::Serialize)]
struct LeagueChoice {
    code: &'static str,
    label: &'static str,
}

#[derive(Deserialize)]
struct SetLeagueBody {
    league: League,
}

#[derive(Deserialize)]
struct SetPlayerCountBody {
    /// Raw text from the count input; normalized server-side (empty/invalid -> 0).
    count: String,
}

#[derive(Deserialize)]
struct UpdatePlayerBody {
    field: PlayerField,
    value: String,
}

/// Path segment: registration id (e.g. /api/registrations/{id})
#[derive(Deserialize)]
struct RegistrationPath {
    id: RegistrationId,
}

/// Path segments: registration id and 0-based player index.
#[derive(Deserialize)]
struct RegistrationPlayerPath {
    id: RegistrationId,
    index: usize,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitResponse {
    notifications: Vec<Notification>,
    payload: Option<RegistrationPayload>,
    payment_url: Option<String>,
    redirect_delay_ms: Option<u64>,
}

#[derive(Deserialize)]
struct PaymentQuery {
    amount: Option<String>,
    league: Option<String>,
    players: Option<String>,
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "team-registration-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// The four fixed league choices for the selector.
#[get("/api/leagues")]
async fn api_leagues() -> impl Responder {
    let leagues: Vec<LeagueChoice> = League::ALL
        .iter()
        .map(|l| LeagueChoice {
            code: l.code(),
            label: l.label(),
        })
        .collect();
    HttpResponse::Ok().json(leagues)
}

/// Create a fresh form session (returns it with id; client stores the id).
#[post("/api/registrations")]
async fn api_create_registration(state: AppState) -> HttpResponse {
    let id = Uuid::new_v4();
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = RegistrationEntry {
        form: Registration::new(),
        last_activity: Instant::now(),
    };
    let response = HttpResponse::Ok().json(RegistrationView {
        id,
        form: &entry.form,
    });
    g.insert(id, entry);
    response
}

/// Get a form session by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/registrations/{id}")]
async fn api_get_registration(state: AppState, path: Path<RegistrationPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(RegistrationView {
                id: path.id,
                form: &entry.form,
            })
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No registration" })),
    }
}

/// Select the league (no validation until submit).
#[put("/api/registrations/{id}/league")]
async fn api_set_league(
    state: AppState,
    path: Path<RegistrationPath>,
    body: Json<SetLeagueBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => {
            return HttpResponse::NotFound().json(serde_json::json!({ "error": "No registration" }))
        }
    };
    entry.last_activity = Instant::now();
    entry.form.set_league(body.league);
    HttpResponse::Ok().json(RegistrationView {
        id: path.id,
        form: &entry.form,
    })
}

/// Set the player count from raw input text; the roster is resized in the same step.
#[put("/api/registrations/{id}/player-count")]
async fn api_set_player_count(
    state: AppState,
    path: Path<RegistrationPath>,
    body: Json<SetPlayerCountBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => {
            return HttpResponse::NotFound().json(serde_json::json!({ "error": "No registration" }))
        }
    };
    entry.last_activity = Instant::now();
    entry.form.set_number_of_players(parse_player_count(&body.count));
    HttpResponse::Ok().json(RegistrationView {
        id: path.id,
        form: &entry.form,
    })
}

/// Edit one contact field of one player. Unlike the in-process API, the HTTP
/// surface cannot trust its caller, so an out-of-range index is a 400.
#[put("/api/registrations/{id}/players/{index}")]
async fn api_update_player(
    state: AppState,
    path: Path<RegistrationPlayerPath>,
    body: Json<UpdatePlayerBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => {
            return HttpResponse::NotFound().json(serde_json::json!({ "error": "No registration" }))
        }
    };
    entry.last_activity = Instant::now();
    if path.index >= entry.form.players.len() {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "Player index out of range" }));
    }
    entry
        .form
        .update_player(path.index, body.field, body.value.clone());
    HttpResponse::Ok().json(RegistrationView {
        id: path.id,
        form: &entry.form,
    })
}

/// Run the submit flow. The lock is not held across the intake delay: the
/// form is snapshotted up front, so edits racing the submission apply to the
/// session but not to the captured payload.
#[post("/api/registrations/{id}/submit")]
async fn api_submit(state: AppState, path: Path<RegistrationPath>) -> HttpResponse {
    let mut form = {
        let mut g = match state.write() {
            Ok(guard) => guard,
            Err(_) => return HttpResponse::InternalServerError().body("lock error"),
        };
        let entry = match g.get_mut(&path.id) {
            Some(e) => e,
            None => {
                return HttpResponse::NotFound()
                    .json(serde_json::json!({ "error": "No registration" }))
            }
        };
        entry.last_activity = Instant::now();
        if validate_registration(&entry.form).is_ok() {
            entry.form.is_submitting = true;
        }
        entry.form.clone()
    };

    let mut notifications: Vec<Notification> = Vec::new();
    let mut sink = |n: Notification| notifications.push(n);
    let outcome = submit(&mut form, &mut sink).await;

    if let Ok(mut g) = state.write() {
        if let Some(entry) = g.get_mut(&path.id) {
            entry.form.is_submitting = false;
            entry.last_activity = Instant::now();
        }
    }

    HttpResponse::Ok().json(SubmitResponse {
        payload: outcome.as_ref().map(|o| o.payload.clone()),
        payment_url: outcome.as_ref().map(|o| o.payment_url.clone()),
        redirect_delay_ms: outcome.as_ref().map(|o| o.redirect_delay.as_millis() as u64),
        notifications,
    })
}

/// Stub payment page: the navigation target of a successful submit. Real
/// payment processing is out of scope; this just echoes the query.
#[get("/api/payment")]
async fn api_payment(query: Query<PaymentQuery>) -> HttpResponse {
    let amount = query.amount.as_deref().unwrap_or("?");
    let league = query.league.as_deref().unwrap_or("?");
    let players = query.players.as_deref().unwrap_or("?");
    let html = format!(
        "<!DOCTYPE html><html><head><title>Payment</title></head><body>\
         <h1>Payment</h1>\
         <p>League: {}</p>\
         <p>Players: {}</p>\
         <p>Amount due per player: ${}</p>\
         <p><em>Payment processing is not implemented in this demo.</em></p>\
         </body></html>",
        league, players, amount
    );
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(
        HashMap::<RegistrationId, RegistrationEntry>::new(),
    ));

    // Background task: every 30 minutes, remove sessions inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!(
                    "Cleaned up {} inactive registration(s) (no activity for 12h)",
                    removed
                );
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_leagues)
            .service(api_create_registration)
            .service(api_get_registration)
            .service(api_set_league)
            .service(api_set_player_count)
            .service(api_update_player)
            .service(api_submit)
            .service(api_payment)
    })
    .bind(bind)?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
