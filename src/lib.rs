//! Galaxy King: a vertical arcade shooter simulation.
//!
//! The library is the host-agnostic core.  A host supplies a frame clock, an
//! input snapshot and a [`host::Canvas`], then calls
//! [`compute::GameState::update`] and [`compute::GameState::draw`] once per
//! frame.  The bundled binary is a crossterm terminal host.

pub mod cluster;
pub mod compute;
pub mod config;
pub mod enemy;
pub mod entities;
pub mod host;
pub mod player;
pub mod sprites;
