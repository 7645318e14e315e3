//! Rules, state and the frame loop of a small arcade shooter with an upgrade
//! shop.  Everything here is backend-independent; the terminal front end
//! lives in the binary.

pub mod arena;
pub mod assets;
pub mod backend;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod game;
pub mod geometry;
pub mod shop;
