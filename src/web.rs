//! JSON API over the bracket engine. Login is a cookie session holding the user id.
//!
//! Only the tournament admin may start a tournament, record winners or
//! complete it; everyone logged in may create and join.

use crate::engine::BracketEngine;
use crate::logic::{validate_roster_size, BracketView, RecordOutcome};
use crate::models::{
    BracketError, MatchId, RosterEntry, Tournament, TournamentId, TournamentStatus, UserId,
};
use crate::store::MemoryStore;
use actix_session::{storage::CookieSessionStore, Session, SessionMiddleware};
use actix_web::{
    cookie::Key,
    get, post, put,
    web::{self, Data, Json, Path},
    HttpResponse, Responder,
};
use serde::{Deserialize, Serialize};

/// Shared engine handed to every handler.
pub type AppEngine = Data<BracketEngine<MemoryStore>>;

/// Behaviour switches for the API.
#[derive(Clone, Copy, Debug)]
pub struct ApiSettings {
    /// Mark the tournament completed as soon as its final is decided.
    pub auto_complete: bool,
}

/// How many tournaments the listing returns.
const LIST_LIMIT: usize = 50;

const SESSION_USER_KEY: &str = "user_id";

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct DemoLoginBody {
    name: String,
    email: String,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
}

#[derive(Deserialize)]
struct RecordWinnerBody {
    match_id: MatchId,
    winner_id: UserId,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

#[derive(Serialize)]
struct TournamentDetail {
    tournament: Tournament,
    participants: Vec<RosterEntry>,
    bracket: BracketView,
    is_admin: bool,
    can_start: bool,
}

#[derive(Serialize)]
struct RecordWinnerResponse {
    result: RecordOutcome,
    bracket: BracketView,
}

fn session_user(session: &Session) -> Option<UserId> {
    session.get::<UserId>(SESSION_USER_KEY).ok().flatten()
}

fn error_response(e: &BracketError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    if e.is_not_found() {
        HttpResponse::NotFound().json(body)
    } else if matches!(e, BracketError::Store(_)) {
        log::error!("Request failed: {}", e);
        HttpResponse::InternalServerError().json(body)
    } else {
        HttpResponse::BadRequest().json(body)
    }
}

fn not_logged_in() -> HttpResponse {
    HttpResponse::Unauthorized().json(serde_json::json!({ "error": "Log in first" }))
}

/// The tournament, if the session user administers it; otherwise the response to send.
fn require_admin(
    engine: &AppEngine,
    session: &Session,
    tournament_id: TournamentId,
) -> Result<Tournament, HttpResponse> {
    let user_id = session_user(session).ok_or_else(not_logged_in)?;
    let tournament = engine
        .tournament(tournament_id)
        .map_err(|e| error_response(&e))?;
    if tournament.admin_id != user_id {
        return Err(HttpResponse::Forbidden().json(
            serde_json::json!({ "error": "Only the tournament admin can do this" }),
        ));
    }
    Ok(tournament)
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "pickleball-bracket",
    })
}

/// Log in as (or register) the user with this email.
#[post("/api/auth/demo")]
async fn api_demo_login(
    engine: AppEngine,
    session: Session,
    body: Json<DemoLoginBody>,
) -> HttpResponse {
    let user = match engine.register_user(&body.name, &body.email) {
        Ok(u) => u,
        Err(e) => return error_response(&e),
    };
    session.renew();
    if let Err(e) = session.insert(SESSION_USER_KEY, user.id) {
        log::error!("Could not store session: {}", e);
        return HttpResponse::InternalServerError().json(serde_json::json!({ "error": "session error" }));
    }
    HttpResponse::Ok().json(user)
}

#[post("/api/auth/logout")]
async fn api_logout(session: Session) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}

/// Current session user.
#[get("/api/auth/me")]
async fn api_me(engine: AppEngine, session: Session) -> HttpResponse {
    let Some(user_id) = session_user(&session) else {
        return not_logged_in();
    };
    match engine.user(user_id) {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(e) => error_response(&e),
    }
}

#[get("/api/tournaments")]
async fn api_list_tournaments(engine: AppEngine) -> HttpResponse {
    match engine.tournaments(LIST_LIMIT) {
        Ok(list) => HttpResponse::Ok().json(list),
        Err(e) => error_response(&e),
    }
}

/// Create a tournament administered by the session user.
#[post("/api/tournaments")]
async fn api_create_tournament(
    engine: AppEngine,
    session: Session,
    body: Json<CreateTournamentBody>,
) -> HttpResponse {
    let Some(user_id) = session_user(&session) else {
        return not_logged_in();
    };
    match engine.create_tournament(&body.name, user_id) {
        Ok(t) => HttpResponse::Created().json(t),
        Err(e) => error_response(&e),
    }
}

/// Tournament with roster and bracket, plus what the session user may do.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(
    engine: AppEngine,
    session: Session,
    path: Path<TournamentPath>,
) -> HttpResponse {
    let detail = (|| -> Result<TournamentDetail, BracketError> {
        let tournament = engine.tournament(path.id)?;
        let participants = engine.roster(path.id)?;
        let bracket = engine.bracket(path.id)?;
        let is_admin = session_user(&session).is_some_and(|u| u == tournament.admin_id);
        let can_start = is_admin
            && tournament.status == TournamentStatus::Draft
            && validate_roster_size(participants.len()).is_ok();
        Ok(TournamentDetail {
            tournament,
            participants,
            bracket,
            is_admin,
            can_start,
        })
    })();
    match detail {
        Ok(d) => HttpResponse::Ok().json(d),
        Err(e) => error_response(&e),
    }
}

/// Join the roster as the session user (Draft only).
#[post("/api/tournaments/{id}/join")]
async fn api_join_tournament(
    engine: AppEngine,
    session: Session,
    path: Path<TournamentPath>,
) -> HttpResponse {
    let Some(user_id) = session_user(&session) else {
        return not_logged_in();
    };
    match engine.join_tournament(path.id, user_id) {
        Ok(p) => HttpResponse::Ok().json(p),
        Err(e) => error_response(&e),
    }
}

/// Generate the bracket (admin only).
#[post("/api/tournaments/{id}/start")]
async fn api_start_tournament(
    engine: AppEngine,
    session: Session,
    path: Path<TournamentPath>,
) -> HttpResponse {
    if let Err(resp) = require_admin(&engine, &session, path.id) {
        return resp;
    }
    match engine
        .start_tournament(path.id)
        .and_then(|()| engine.bracket(path.id))
    {
        Ok(bracket) => HttpResponse::Ok().json(bracket),
        Err(e) => error_response(&e),
    }
}

/// Record a match winner (admin only). The match must belong to this tournament.
#[put("/api/tournaments/{id}/matches/winner")]
async fn api_record_winner(
    engine: AppEngine,
    settings: Data<ApiSettings>,
    session: Session,
    path: Path<TournamentPath>,
    body: Json<RecordWinnerBody>,
) -> HttpResponse {
    if let Err(resp) = require_admin(&engine, &session, path.id) {
        return resp;
    }
    let result = (|| -> Result<RecordWinnerResponse, BracketError> {
        let m = engine.get_match(body.match_id)?;
        if m.tournament_id != path.id {
            return Err(BracketError::MatchNotFound(body.match_id));
        }
        let outcome = engine.record_winner(body.match_id, body.winner_id)?;
        if let RecordOutcome::BracketDecided { tournament_id, .. } = outcome {
            if settings.auto_complete {
                engine.complete_tournament(tournament_id)?;
            }
        }
        Ok(RecordWinnerResponse {
            result: outcome,
            bracket: engine.bracket(path.id)?,
        })
    })();
    match result {
        Ok(r) => HttpResponse::Ok().json(r),
        Err(e) => error_response(&e),
    }
}

/// Close the tournament once the final is decided (admin only).
#[post("/api/tournaments/{id}/complete")]
async fn api_complete_tournament(
    engine: AppEngine,
    session: Session,
    path: Path<TournamentPath>,
) -> HttpResponse {
    if let Err(resp) = require_admin(&engine, &session, path.id) {
        return resp;
    }
    match engine
        .complete_tournament(path.id)
        .and_then(|()| engine.tournament(path.id))
    {
        Ok(t) => HttpResponse::Ok().json(t),
        Err(e) => error_response(&e),
    }
}

/// Cookie-backed sessions signed with `key`.
pub fn session_middleware(key: Key, secure: bool) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_secure(secure)
        .build()
}

/// Register all API routes. Expects `AppEngine` and `Data<ApiSettings>` as app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(api_health)
        .service(api_demo_login)
        .service(api_logout)
        .service(api_me)
        .service(api_list_tournaments)
        .service(api_create_tournament)
        .service(api_get_tournament)
        .service(api_join_tournament)
        .service(api_start_tournament)
        .service(api_record_winner)
        .service(api_complete_tournament);
}
