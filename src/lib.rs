//! `droneway`: time-expanded reservation scheduler for routing a drone fleet
//! through a hub network, start to end, one route per drone.

pub mod config;
pub mod error;
pub mod palette;
pub mod path;
pub mod render;
pub mod scheduler;
pub mod timeline;
pub mod topology;

pub use error::AppError;
pub use topology::model::Network;
