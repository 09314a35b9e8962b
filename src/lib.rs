pub mod cluster;
pub mod error;
pub mod loader;
pub mod observation;
pub mod output;
pub mod profile;
