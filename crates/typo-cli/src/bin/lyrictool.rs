use clap::{Parser, Subcommand};

use typo_cli::commands::{config_ops, song_ops};

#[derive(Parser)]
#[command(name = "lyrictool", about = "Lyric sheet and romaji input diagnostics")]
struct Cli {
    /// Path to a custom settings TOML (defaults to the embedded settings)
    #[arg(long, global = true)]
    settings: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print each line's kana and the keys expected for it
    Romaji {
        /// Path to the song file
        song: String,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the difficulty level of a song
    Level {
        /// Path to the song file
        song: String,
    },
    /// Type keys against one line and show the outcome
    Replay {
        /// Path to the song file
        song: String,
        /// 1-based line number
        line: usize,
        /// Keys to feed, in order
        keys: String,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the embedded kana table
    KanaExport,
    /// Validate a kana table TOML file
    KanaValidate {
        /// Path to the TOML file
        file: String,
    },
    /// Print the embedded default settings
    SettingsExport,
    /// Validate a settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();
    typo_cli::init_tracing();

    if let Some(file) = cli.settings.as_deref() {
        config_ops::load_settings(file);
    }

    match cli.command {
        Command::Romaji { song, json } => song_ops::romaji(&song, json),
        Command::Level { song } => song_ops::level(&song),
        Command::Replay {
            song,
            line,
            keys,
            json,
        } => song_ops::replay_cmd(&song, line, &keys, json),
        Command::KanaExport => config_ops::kana_export(),
        Command::KanaValidate { file } => config_ops::kana_validate(&file),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
