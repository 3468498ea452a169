use crate::arena::Arena;
use crate::error::GameError;
use crate::game::ROUNDS_TOTAL;
use crate::leaderboard::Registration;
use actix_cors::Cors;
use actix_files::{Files, NamedFile};
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use serde::Deserialize;
use serde_json::json;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Shared process state: the one arena behind the one lock.
pub struct AppState {
    pub arena: Mutex<Arena>,
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(arena: Arena, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            arena: Mutex::new(arena),
            static_dir: static_dir.into(),
        }
    }
}

// Missing fields deserialize to "" so the arena reports the missing value,
// not the JSON layer.
#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
}

#[derive(Deserialize)]
pub struct StartGameRequest {
    #[serde(default)]
    pub player1: String,
    #[serde(default)]
    pub player2: String,
}

#[derive(Deserialize)]
pub struct PlayRoundRequest {
    #[serde(default)]
    pub player1_choice: String,
}

// The arena holds no invariants a panicking handler could break mid-update,
// so a poisoned lock is recovered rather than propagated.
fn recover_arena<'a>(
    result: Result<MutexGuard<'a, Arena>, PoisonError<MutexGuard<'a, Arena>>>,
) -> MutexGuard<'a, Arena> {
    match result {
        Ok(guard) => guard,
        Err(poisoned) => {
            log::warn!("arena mutex poisoned, recovering");
            poisoned.into_inner()
        }
    }
}

pub async fn register_player(
    data: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, GameError> {
    let mut arena = recover_arena(data.arena.lock());
    let (player, registration) = arena.register_player(&request.name)?;
    log::info!("registered player {} ({:?})", player, registration);

    let response = match registration {
        Registration::Created => HttpResponse::Created().json(json!({
            "message": format!("Player {} registered successfully", player),
            "player": player,
        })),
        Registration::Existing => HttpResponse::Ok().json(json!({
            "message": format!("Player {} already exists", player),
            "player": player,
        })),
    };
    Ok(response)
}

pub async fn start_game(
    data: web::Data<AppState>,
    request: web::Json<StartGameRequest>,
) -> Result<HttpResponse, GameError> {
    let mut arena = recover_arena(data.arena.lock());
    let (player1, player2) = arena.start_game(&request.player1, &request.player2)?;
    log::info!("match started: {} vs {}", player1, player2);

    Ok(HttpResponse::Ok().json(json!({
        "message": "Game started successfully",
        "player1": player1,
        "player2": player2,
        "rounds_total": ROUNDS_TOTAL,
    })))
}

pub async fn play_round(
    data: web::Data<AppState>,
    request: web::Json<PlayRoundRequest>,
) -> Result<HttpResponse, GameError> {
    let mut arena = recover_arena(data.arena.lock());
    let report = arena.play_round(&request.player1_choice)?;
    Ok(HttpResponse::Ok().json(report))
}

pub async fn get_leaderboard(data: web::Data<AppState>) -> impl Responder {
    let arena = recover_arena(data.arena.lock());
    HttpResponse::Ok().json(arena.standings())
}

pub async fn get_game_state(data: web::Data<AppState>) -> impl Responder {
    let arena = recover_arena(data.arena.lock());
    HttpResponse::Ok().json(arena.snapshot())
}

pub async fn index(data: web::Data<AppState>) -> actix_web::Result<NamedFile> {
    Ok(NamedFile::open_async(data.static_dir.join("index.html")).await?)
}

/// API and landing-page routes, shared by the server and the HTTP tests.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/api/player/register", web::post().to(register_player))
        .route("/api/game/start", web::post().to(start_game))
        .route("/api/game/play_round", web::post().to(play_round))
        .route("/api/leaderboard", web::get().to(get_leaderboard))
        .route("/api/game/state", web::get().to(get_game_state));
}

pub struct Server;

impl Server {
    /// Binds and serves until shutdown. Static assets hang off /static and
    /// the landing page off /.
    pub async fn run(host: &str, port: u16, static_dir: PathBuf) -> std::io::Result<()> {
        let state = web::Data::new(AppState::new(Arena::new(), static_dir));
        log::info!("listening on {}:{}", host, port);

        HttpServer::new(move || {
            App::new()
                .wrap(Logger::default())
                .wrap(
                    Cors::default()
                        .allow_any_origin()
                        .allow_any_method()
                        .allow_any_header(),
                )
                .app_data(state.clone())
                .configure(routes)
                .service(Files::new("/static", state.static_dir.clone()))
        })
        .bind((host, port))?
        .run()
        .await
    }
}
