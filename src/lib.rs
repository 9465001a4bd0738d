// Library exports for the snake farm
// This allows the replay tool and the tests to use the core bot logic

#[macro_use]
extern crate rocket;

pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod decision;
pub mod handler;
pub mod occupancy;
pub mod perception;
pub mod replay;
pub mod session;
pub mod snake;
pub mod types;
