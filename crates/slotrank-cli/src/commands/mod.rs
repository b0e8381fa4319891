pub mod config;
pub mod io;
pub mod preset;
pub mod suggest;
pub mod transform;
