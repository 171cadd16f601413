pub mod keyvalue;
pub mod manager;
pub mod snapshot;

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
