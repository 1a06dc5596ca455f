pub mod arguments;
pub mod auth;
pub mod badges;
pub mod checkins;
pub mod config;
pub mod database;
pub mod errors;
pub mod geo;
pub mod leaderboard;
pub mod logger;
pub mod paths;
pub mod places;
pub mod webserver;
