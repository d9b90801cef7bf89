// Library exports for the Battlesnake bot
// The server binary, the replay tool and the integration tests all build on these modules

#[macro_use]
extern crate rocket;

pub mod bot;
pub mod config;
pub mod context;
pub mod debug_logger;
pub mod grid;
pub mod handler;
pub mod mode;
pub mod planner;
pub mod replay;
pub mod resolver;
pub mod safety;
pub mod snapshot;
pub mod timing;
pub mod types;
