//! CLI entry point for `mediaplan`.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use mediaplan::batch::{self, BatchOptions, BatchStats, OutputFormat};
use mediaplan::config::Config;
use mediaplan::i18n;

#[derive(Parser)]
#[command(name = "mediaplan", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Descriptor file to resolve (shortcut for 'resolve' command)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Language (pt, en). Defaults to system locale.
    #[arg(long, value_name = "LANG")]
    lang: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve attachment descriptors into render plans
    Resolve {
        /// Descriptor file, one JSON object per line ('-' or absent = stdin)
        file: Option<PathBuf>,

        /// Output format: json or table
        #[arg(short, long)]
        format: Option<String>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Indented JSON instead of one plan per line
        #[arg(long)]
        pretty: bool,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Generate a man page
    Manpage,
}

/// Detect language early from --lang arg, config, or system env, before
/// clap processes --help.
fn detect_lang_early(config: &Config) -> i18n::Lang {
    // Check --lang flag in raw args
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--lang" {
            if let Some(code) = args.get(i + 1) {
                if let Some(lang) = i18n::Lang::from_code(code) {
                    return lang;
                }
            }
        }
        if let Some(code) = args[i].strip_prefix("--lang=") {
            if let Some(lang) = i18n::Lang::from_code(code) {
                return lang;
            }
        }
    }

    // Config file override
    if let Some(code) = config.general.language.as_deref() {
        if let Some(lang) = i18n::Lang::from_code(code) {
            return lang;
        }
    }

    i18n::detect_system_lang()
}

/// Build a localized clap Command using i18n strings.
fn build_localized_command() -> clap::Command {
    let mut cmd = Cli::command();
    cmd = cmd
        .about(i18n::app_about())
        .long_about(i18n::app_long_about())
        .mut_arg("file", |a| a.help(i18n::help_file_arg()))
        .mut_arg("verbose", |a| a.help(i18n::help_verbose()))
        .mut_arg("lang", |a| a.help(i18n::help_lang()));

    // Localize subcommands (clear and re-add)
    let subcommands: Vec<clap::Command> = cmd
        .get_subcommands()
        .map(|sub| {
            let mut s = sub.clone();
            match s.get_name() {
                "resolve" => {
                    s = s
                        .about(i18n::help_cmd_resolve())
                        .mut_arg("file", |a| a.help(i18n::help_file_arg()))
                        .mut_arg("format", |a| a.help(i18n::help_format()))
                        .mut_arg("output", |a| a.help(i18n::help_output()))
                        .mut_arg("pretty", |a| a.help(i18n::help_pretty()));
                }
                "completions" => {
                    s = s.about(i18n::help_cmd_completions());
                }
                "manpage" => {
                    s = s.about(i18n::help_cmd_manpage());
                }
                _ => {}
            }
            s
        })
        .collect();

    for sub in subcommands {
        cmd = cmd.mut_subcommand(sub.get_name(), |_| sub.clone());
    }

    cmd
}

fn main() -> anyhow::Result<()> {
    // Load configuration and detect language BEFORE clap parsing so --help
    // is localized.
    let config = mediaplan::config::load_config();
    let lang = detect_lang_early(&config);
    i18n::set_lang(lang);

    // Build localized command and parse
    let cmd = build_localized_command();
    let matches = cmd.get_matches();
    let cli = Cli::from_arg_matches(&matches)?;

    // Configure logging: stderr + optional log file
    let log_level = match cli.verbose {
        0 => config.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    setup_logging(log_level, &config);

    match cli.command {
        Some(Commands::Resolve {
            file,
            format,
            output,
            pretty,
        }) => cmd_resolve(
            &config,
            file.as_deref(),
            format.as_deref(),
            output.as_deref(),
            pretty,
        ),
        None => cmd_resolve(&config, cli.file.as_deref(), None, None, false),
        Some(Commands::Completions { shell }) => cmd_completions(shell),
        Some(Commands::Manpage) => cmd_manpage(),
    }
}

/// Set up tracing with stderr output and optional file logging.
fn setup_logging(level: &str, config: &Config) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    // Try to set up file logging
    let log_dir = mediaplan::config::cache_dir(config);
    if std::fs::create_dir_all(&log_dir).is_ok() {
        let file_appender = tracing_appender::rolling::never(&log_dir, "mediaplan.log");
        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file_appender);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .with(file_layer)
            .init();
    } else {
        // Fall back to stderr only
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
    }
}

/// Generate shell completions and print to stdout.
fn cmd_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "mediaplan", &mut std::io::stdout());
    Ok(())
}

/// Generate a man page and print to stdout.
fn cmd_manpage() -> anyhow::Result<()> {
    let cmd = Cli::command();
    let man = clap_mangen::Man::new(cmd);
    let mut buf = Vec::new();
    man.render(&mut buf)?;
    std::io::Write::write_all(&mut std::io::stdout(), &buf)?;
    Ok(())
}

/// Resolve a descriptor file or stdin stream into render plans.
fn cmd_resolve(
    config: &Config,
    file: Option<&Path>,
    format: Option<&str>,
    output: Option<&Path>,
    pretty: bool,
) -> anyhow::Result<()> {
    let format = OutputFormat::from_name(format.unwrap_or(&config.output.default_format))?;
    let options = BatchOptions {
        format,
        pretty: pretty || config.output.pretty,
        detail_width: config.output.table_detail_width,
    };

    match file {
        Some(path) if path != Path::new("-") => {
            if !path.exists() {
                anyhow::bail!("{}: {}", i18n::err_file_not_found(), path.display());
            }

            let pb = ProgressBar::new(std::fs::metadata(path)?.len());
            pb.set_style(
                ProgressStyle::default_bar()
                    .template(&format!(
                        "{{spinner:.green}} {} [{{bar:40.cyan/blue}}] {{bytes}}/{{total_bytes}}",
                        i18n::msg_resolving()
                    ))
                    .expect("valid template")
                    .progress_chars("#>-"),
            );

            let start = Instant::now();
            let stats = batch::resolve_file(path, output, options, &|current, total| {
                pb.set_length(total);
                pb.set_position(current);
            })?;
            pb.finish_and_clear();

            if output.is_some() {
                print_summary(path, &stats, start.elapsed());
            } else {
                tracing::info!(
                    resolved = stats.resolved,
                    skipped = stats.skipped,
                    "Batch resolution finished"
                );
            }
            Ok(())
        }
        _ => {
            let stdin = std::io::stdin();
            let stats = match output {
                Some(out_path) => {
                    let out = std::fs::File::create(out_path)?;
                    let mut writer = std::io::BufWriter::new(out);
                    batch::resolve_lines(stdin.lock(), &mut writer, options, None)?
                }
                None => {
                    let mut writer = std::io::stdout().lock();
                    batch::resolve_lines(stdin.lock(), &mut writer, options, None)?
                }
            };
            tracing::info!(
                resolved = stats.resolved,
                skipped = stats.skipped,
                "Batch resolution finished"
            );
            Ok(())
        }
    }
}

/// Print a resolution summary in a human-readable table.
fn print_summary(path: &Path, stats: &BatchStats, elapsed: std::time::Duration) {
    use humansize::{format_size, BINARY};

    println!();
    println!("  {:<20} {}", i18n::msg_input(), path.display());
    println!(
        "  {:<20} {}",
        i18n::msg_input_size(),
        format_size(stats.input_size, BINARY)
    );
    println!("  {:<20} {}", i18n::msg_resolved(), stats.resolved);
    if stats.skipped > 0 {
        println!("  {:<20} {}", i18n::msg_skipped(), stats.skipped);
    }
    println!("  {:<20} {:.2?}", i18n::msg_elapsed(), elapsed);
    println!();
}
