use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use colored::Colorize;
use confedit::configurator::ConfigKind;
use confedit::ini::{Configuration, Notation, OutputMode};
use confedit::io::read_text;
use confedit::settings::{self, Settings};
use similar::{ChangeTag, TextDiff};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "confedit")]
#[command(
    about = "Edit INI configuration files without disturbing comments or layout",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Settings file (defaults to $CONFEDIT_CONFIG, then ~/.config/confedit/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    kind: Kind,
}

#[derive(Subcommand)]
enum Kind {
    /// PHP ini configuration
    Php {
        #[command(subcommand)]
        command: Commands,
    },

    /// INI configuration
    Ini {
        #[command(subcommand)]
        command: Commands,
    },
}

#[derive(Subcommand)]
enum Commands {
    /// Print the value of a parameter
    Get {
        /// Parameter address, e.g. "PHP.engine" or "CLI Server[cli_server.color]"
        key: String,

        file: PathBuf,

        #[command(flatten)]
        notation: NotationArgs,
    },

    /// Set a parameter and print the resulting file
    Set {
        /// Parameter address, e.g. "PHP.engine" or "CLI Server[cli_server.color]"
        key: String,

        value: String,

        file: PathBuf,

        #[command(flatten)]
        notation: NotationArgs,

        /// Output mode: full or key-values
        #[arg(short, long)]
        output: Option<OutputMode>,

        /// Write the result back to the file instead of printing it
        #[arg(short, long)]
        in_place: bool,

        /// Show a diff of the change instead of the whole file
        #[arg(short, long)]
        diff: bool,
    },

    /// Print the parsed file
    Show {
        file: PathBuf,

        /// Output mode: full or key-values
        #[arg(short, long)]
        output: Option<OutputMode>,
    },

    /// List sections and how many keys each holds
    Sections { file: PathBuf },
}

#[derive(Args)]
struct NotationArgs {
    /// Use bracket notation "section[key.with.dots]" instead of dot notation
    #[arg(short, long, conflicts_with = "dot")]
    brackets: bool,

    /// Use dot notation "section.key", overriding the configured default
    #[arg(long)]
    dot: bool,
}

impl NotationArgs {
    /// An explicit flag always wins over the configured default.
    fn resolve(&self, settings: &Settings) -> Notation {
        if self.brackets {
            Notation::Brackets
        } else if self.dot {
            Notation::Dot
        } else {
            settings.defaults.notation
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = settings::resolve(cli.config.as_deref())?;

    let (kind, command) = match cli.kind {
        Kind::Php { command } => (ConfigKind::Php, command),
        Kind::Ini { command } => (ConfigKind::Ini, command),
    };
    tracing::debug!(%kind, "selected configurator");

    match command {
        Commands::Get {
            key,
            file,
            notation,
        } => cmd_get(kind, notation.resolve(&settings), &key, &file),

        Commands::Set {
            key,
            value,
            file,
            notation,
            output,
            in_place,
            diff,
        } => {
            let options = SetOptions {
                notation: notation.resolve(&settings),
                mode: output.unwrap_or(settings.defaults.output),
                in_place,
                diff,
            };
            cmd_set(kind, &key, &value, &file, options)
        }

        Commands::Show { file, output } => {
            cmd_show(&file, output.unwrap_or(settings.defaults.output))
        }

        Commands::Sections { file } => cmd_sections(&file),
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_env("CONFEDIT_LOG")
            .unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

struct SetOptions {
    notation: Notation,
    mode: OutputMode,
    in_place: bool,
    diff: bool,
}

fn cmd_get(kind: ConfigKind, notation: Notation, key: &str, file: &Path) -> Result<()> {
    let value = kind.configurator().get_parameter(notation, file, key)?;
    println!("{value}");
    Ok(())
}

fn cmd_set(
    kind: ConfigKind,
    key: &str,
    value: &str,
    file: &Path,
    options: SetOptions,
) -> Result<()> {
    let document = kind
        .configurator()
        .set_parameter(options.notation, file, key, value)?;
    let rendered = document.render(options.mode);
    let original = if options.diff {
        Some(read_text(file)?)
    } else {
        None
    };

    if options.in_place {
        document.save(options.mode)?;
    }

    match original {
        Some(original) => display_diff(file, &original, &rendered),
        None if options.in_place => {
            println!("{} {}: {} = {}", "✓".green(), file.display(), key, value);
        }
        None => print_document(&rendered),
    }

    Ok(())
}

fn cmd_show(file: &Path, mode: OutputMode) -> Result<()> {
    let config = Configuration::parse(file)?;
    print_document(&config.render(mode));
    Ok(())
}

fn cmd_sections(file: &Path) -> Result<()> {
    let config = Configuration::parse(file)?;

    for section in config.sections() {
        let keys = section.key_values().count();
        let name = section.name.to_string();
        println!("{} ({} keys)", name.bold(), keys);
    }

    Ok(())
}

fn print_document(rendered: &str) {
    print!("{rendered}");
    if !rendered.ends_with('\n') {
        println!();
    }
}

/// Helper: Show unified diff between original and modified content
fn display_diff(file: &Path, original: &str, modified: &str) {
    println!("{}", format!("--- {} (original)", file.display()).dimmed());
    println!("{}", format!("+++ {} (edited)", file.display()).dimmed());

    let diff = TextDiff::from_lines(original, modified);

    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => format!("-{}", change).red(),
            ChangeTag::Insert => format!("+{}", change).green(),
            ChangeTag::Equal => continue,
        };
        print!("{}", sign);
        if change.missing_newline() {
            println!();
        }
    }
}
