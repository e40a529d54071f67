use std::path::PathBuf;

use clap::{Parser, Subcommand};

use shuang_cli::commands::practice_ops::PracticeOptions;
use shuang_cli::commands::{config_ops, practice_ops, translate_ops};
use shuang_cli::trace_init::init_tracing;
use shuang_session::PracticeMode;

#[derive(Parser)]
#[command(name = "shuangpin", about = "Shuangpin (double pinyin) typing practice")]
struct Cli {
    /// Write debug traces to this directory instead of warnings to stderr
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    /// Emit traces as JSON
    #[arg(long, global = true)]
    log_json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the available schemes (default marked with *)
    Schemes {
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the keys for each syllable
    Translate {
        /// Tone-less syllables, `ü` written as `v`
        #[arg(required = true)]
        syllables: Vec<String>,
        /// Scheme code (default from settings)
        #[arg(long)]
        scheme: Option<String>,
    },
    /// Show the practice units for a text
    Prepare {
        /// Text to prepare
        text: String,
        /// Scheme code (default from settings)
        #[arg(long)]
        scheme: Option<String>,
        /// Treat Latin letters and digits as punctuation
        #[arg(long)]
        skip_non_chinese: bool,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Practice interactively, one line of keys per character
    Practice {
        /// Scheme code (default from settings)
        #[arg(long)]
        scheme: Option<String>,
        /// sentence or word
        #[arg(long)]
        mode: Option<PracticeMode>,
        /// Sentence file (.txt, one sentence per line)
        #[arg(long)]
        upload: Option<String>,
        /// Treat Latin letters and digits as punctuation
        #[arg(long)]
        skip_non_chinese: bool,
        /// Custom settings TOML
        #[arg(long)]
        settings: Option<String>,
        /// Seed for text selection
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Export or validate configuration files
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
    /// Export the built-in schemes as TOML
    SchemesExport,
    /// Validate a custom schemes TOML file
    SchemesValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();
    let _guard = init_tracing(cli.log_dir.as_deref(), cli.log_json);

    match cli.command {
        Command::Schemes { json } => translate_ops::schemes(json),
        Command::Translate { syllables, scheme } => {
            translate_ops::translate(scheme.as_deref(), &syllables)
        }
        Command::Prepare {
            text,
            scheme,
            skip_non_chinese,
            json,
        } => translate_ops::prepare(&text, scheme.as_deref(), skip_non_chinese, json),
        Command::Practice {
            scheme,
            mode,
            upload,
            skip_non_chinese,
            settings,
            seed,
        } => {
            let opts = PracticeOptions {
                scheme,
                mode,
                upload,
                skip_non_chinese,
                settings_file: settings,
                seed,
            };
            practice_ops::practice(&opts);
        }
        Command::Config { command } => match command {
            ConfigCommand::SettingsExport => config_ops::settings_export(),
            ConfigCommand::SettingsValidate { file } => config_ops::settings_validate(&file),
            ConfigCommand::SchemesExport => config_ops::schemes_export(),
            ConfigCommand::SchemesValidate { file } => config_ops::schemes_validate(&file),
        },
    }
}
