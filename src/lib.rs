// lib.rs
pub mod batch;
pub mod board;
pub mod combat;
pub mod error;
pub mod game;
pub mod game_config;
pub mod player;
pub mod strategies;
pub mod strategy;
pub mod territory;
pub mod threat;
pub mod turn_phase;
