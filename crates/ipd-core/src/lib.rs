pub mod config;
pub mod logging;

pub mod auth;
pub mod download;
pub mod http;
pub mod playlist;
pub mod storage;
pub mod target;
pub mod transfer;
