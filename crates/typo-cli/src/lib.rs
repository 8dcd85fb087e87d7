pub mod commands;
mod trace_init;

pub use trace_init::init_tracing;
