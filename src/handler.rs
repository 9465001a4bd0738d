// HTTP handler bindings for Battlesnake API endpoints
//
// This module provides thin wrapper functions that bind Rocket HTTP routes
// to the Bot's core logic methods. Every configured snake is served under
// its own path segment, and handlers are responsible for:
// - Deserializing incoming JSON requests
// - Finding the Bot mounted at the requested path
// - Delegating to Bot methods
// - Mapping sequencing errors to 400 responses

use std::collections::HashMap;

use rocket::fairing::AdHoc;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{Build, Rocket, State};

use crate::bot::Bot;
use crate::types::{GameState, InfoResponse, MoveResponse};

type Rejection = (Status, &'static str);

/// All bots served by this process, by mount path
pub struct SnakeFarm {
    bots: HashMap<String, Bot>,
}

impl SnakeFarm {
    pub fn new(bots: Vec<Bot>) -> Self {
        SnakeFarm {
            bots: bots
                .into_iter()
                .map(|bot| (bot.name().to_string(), bot))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Bot> {
        self.bots.get(name)
    }

    fn bot(&self, name: &str) -> Result<&Bot, Rejection> {
        self.get(name).ok_or((Status::NotFound, "no such snake"))
    }
}

/// GET /<snake> endpoint
/// Returns bot metadata and appearance configuration
#[get("/<snake>")]
pub fn index(farm: &State<SnakeFarm>, snake: &str) -> Result<Json<InfoResponse>, Rejection> {
    Ok(Json(farm.bot(snake)?.info()))
}

/// POST /<snake>/start endpoint
/// Called when a game starts
#[post("/<snake>/start", format = "json", data = "<start_req>")]
pub fn start(
    farm: &State<SnakeFarm>,
    snake: &str,
    start_req: Json<GameState>,
) -> Result<Status, Rejection> {
    farm.bot(snake)?
        .start(&start_req)
        .map(|_| Status::Ok)
        .map_err(|_| (Status::BadRequest, "snek cannot start game"))
}

/// POST /<snake>/move endpoint
/// Called each turn to compute and return the next move
#[post("/<snake>/move", format = "json", data = "<move_req>")]
pub fn get_move(
    farm: &State<SnakeFarm>,
    snake: &str,
    move_req: Json<GameState>,
) -> Result<Json<MoveResponse>, Rejection> {
    farm.bot(snake)?
        .get_move(&move_req)
        .map(Json)
        .map_err(|_| (Status::BadRequest, "game not started"))
}

/// POST /<snake>/end endpoint
/// Called when a game ends - releases the game's session
#[post("/<snake>/end", format = "json", data = "<end_req>")]
pub fn end(
    farm: &State<SnakeFarm>,
    snake: &str,
    end_req: Json<GameState>,
) -> Result<Status, Rejection> {
    farm.bot(snake)?
        .end(&end_req)
        .map(|_| Status::Ok)
        .map_err(|_| (Status::BadRequest, "game not started"))
}

/// Builds the server for `farm`, with every route mounted at the root
pub fn build(farm: SnakeFarm) -> Rocket<Build> {
    rocket::build()
        .manage(farm)
        .attach(AdHoc::on_response("Server ID Middleware", |_, res| {
            Box::pin(async move {
                res.set_raw_header("Server", "battlesnake/github/lucky-snake");
            })
        }))
        .mount("/", routes![index, start, get_move, end])
}
