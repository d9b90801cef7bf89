// HTTP handler bindings for Battlesnake API endpoints
//
// Thin wrappers that bind Rocket routes to the Bot's methods. Handlers are
// responsible for:
// - Deserializing incoming JSON requests
// - Extracting the Bot instance from Rocket's managed state
// - Delegating to Bot methods
// - Serializing responses

use log::warn;
use rocket::fairing::AdHoc;
use rocket::http::Status;
use rocket::serde::json::{self, Json};
use rocket::{Build, Rocket, State};
use serde_json::Value;

use crate::bot::Bot;
use crate::types::GameState;

/// GET / endpoint
/// Returns bot metadata and appearance configuration
#[get("/")]
pub fn index(bot: &State<Bot>) -> Json<Value> {
    Json(bot.info())
}

/// POST /start endpoint
/// Game handshake; nothing is kept between games
#[post("/start", format = "json", data = "<start_req>")]
pub fn start(bot: &State<Bot>, start_req: Json<GameState>) -> Status {
    bot.start(
        &start_req.game,
        &start_req.turn,
        &start_req.board,
        &start_req.you,
    );

    Status::Ok
}

/// POST /move endpoint
/// Called each turn to compute and return the next move.
/// An unreadable body still gets a move: the configured default plus a diagnostic shout.
#[post("/move", format = "json", data = "<move_req>")]
pub async fn get_move<'r>(
    bot: &State<Bot>,
    move_req: Result<Json<GameState>, json::Error<'r>>,
) -> Json<Value> {
    let move_req = match move_req {
        Ok(move_req) => move_req,
        Err(e) => {
            warn!("Could not decode move request: {:?}", e);
            return Json(bot.fallback_response());
        }
    };

    let response = bot
        .get_move(
            &move_req.game,
            &move_req.turn,
            &move_req.board,
            &move_req.you,
        )
        .await;

    Json(response)
}

/// POST /end endpoint
/// Called when a game ends - allows cleanup and logging
#[post("/end", format = "json", data = "<end_req>")]
pub fn end(bot: &State<Bot>, end_req: Json<GameState>) -> Status {
    bot.end(&end_req.game, &end_req.turn, &end_req.board, &end_req.you);

    Status::Ok
}

/// Assembles the server around a bot
pub fn build(bot: Bot) -> Rocket<Build> {
    rocket::build()
        .manage(bot)
        .attach(AdHoc::on_response("Server ID Middleware", |_, res| {
            Box::pin(async move {
                res.set_raw_header("Server", "battlesnake/github/pursuit-snake");
            })
        }))
        .mount("/", routes![index, start, get_move, end])
}
