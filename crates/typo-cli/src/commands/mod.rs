pub mod config_ops;
pub mod song_ops;
