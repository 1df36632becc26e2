// crates/textlocale-cli/src/main.rs
// ============================================================================
// Module: TextLocale CLI Entry Point
// Description: Command dispatcher for dictionary loading and key resolution.
// Purpose: Provide a localized CLI over the TextLocale resolution engine.
// Dependencies: clap, serde_json, textlocale-config, textlocale-core, tokio,
//               tracing-subscriber.
// ============================================================================

//! ## Overview
//! The `textlocale` binary resolves text keys against configured dictionary
//! sources, dumps merged dictionaries, reports the detected language, and
//! validates configuration files. All user-facing strings are routed through
//! the CLI message catalog. Diagnostics go to stderr through `tracing`,
//! filtered by `RUST_LOG`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use textlocale_cli::i18n::Locale;
use textlocale_cli::i18n::load_catalog;
use textlocale_cli::i18n::set_locale;
use textlocale_cli::setup::build_detector;
use textlocale_cli::setup::build_resolver;
use textlocale_cli::t;
use textlocale_config::TextLocaleConfig;
use textlocale_config::config_toml_example;
use textlocale_core::Domain;
use textlocale_core::FallbackPolicy;
use textlocale_core::LanguageDetector;
use textlocale_core::LanguageTag;
use textlocale_core::TranslationResolver;
use textlocale_sources::UrlLayout;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable for CLI message locale selection.
const LANG_ENV: &str = "TEXTLOCALE_CLI_LANG";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "textlocale", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Language for CLI messages (overrides `TEXTLOCALE_CLI_LANG`).
    #[arg(long, value_enum, value_name = "LANG", global = true)]
    cli_lang: Option<LangArg>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Load a domain and resolve one or more keys.
    Localize(LocalizeCommand),
    /// Print the merged dictionary for a domain as JSON.
    Show(ShowCommand),
    /// Print the detected preferred language.
    Detect(DetectCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a TextLocale configuration file.
    Validate(ConfigValidateCommand),
    /// Print an example configuration file.
    Example,
}

/// Source and resolver overrides shared by loading commands.
#[derive(Args, Debug)]
struct SourceArgs {
    /// Optional config file path (defaults to textlocale.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Override the system dictionary base (URL or directory).
    #[arg(long, value_name = "BASE")]
    system_base: Option<String>,
    /// Override the user dictionary base (URL or directory).
    #[arg(long, value_name = "BASE")]
    user_base: Option<String>,
    /// Override the dictionary layout under each base.
    #[arg(long, value_enum, value_name = "LAYOUT")]
    layout: Option<LayoutArg>,
    /// Override the fallback policy.
    #[arg(long, value_enum, value_name = "POLICY")]
    fallback_policy: Option<PolicyArg>,
}

/// Arguments for key resolution.
#[derive(Args, Debug)]
struct LocalizeCommand {
    /// Source and resolver overrides.
    #[command(flatten)]
    sources: SourceArgs,
    /// Domain to resolve in (defaults to the configured domain).
    #[arg(long, value_name = "DOMAIN")]
    domain: Option<String>,
    /// Language tag to resolve for (defaults to the detected language).
    #[arg(long, value_name = "TAG")]
    lang: Option<String>,
    /// Keys to resolve.
    #[arg(value_name = "KEY", required = true)]
    keys: Vec<String>,
}

/// Arguments for dictionary dumps.
#[derive(Args, Debug)]
struct ShowCommand {
    /// Source and resolver overrides.
    #[command(flatten)]
    sources: SourceArgs,
    /// Language tag to load (defaults to the detected language).
    #[arg(long, value_name = "TAG")]
    lang: Option<String>,
    /// Domain to load.
    #[arg(value_name = "DOMAIN")]
    domain: String,
}

/// Arguments for language detection.
#[derive(Args, Debug)]
struct DetectCommand {
    /// Optional config file path (defaults to textlocale.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Page URL whose `lang` query parameter is consulted.
    #[arg(long, value_name = "URL")]
    page_url: Option<String>,
}

/// Arguments for config validation.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional config file path (defaults to textlocale.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// CLI message languages.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum LangArg {
    /// English.
    En,
    /// Catalan.
    Ca,
}

impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
            LangArg::Ca => Self::Ca,
        }
    }
}

/// Dictionary layout selector.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum LayoutArg {
    /// `<base>/<domain>/<tag>.json`.
    Domain,
    /// `<base>/locales/<tag>/localizable-strings.json`.
    Locales,
}

impl From<LayoutArg> for UrlLayout {
    fn from(value: LayoutArg) -> Self {
        match value {
            LayoutArg::Domain => Self::Domain,
            LayoutArg::Locales => Self::Locales,
        }
    }
}

/// Fallback policy selector.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum PolicyArg {
    /// A non-empty dictionary for a narrower tag hides the fallback language.
    Strict,
    /// Missing keys continue to the fallback language.
    FallThrough,
}

impl From<PolicyArg> for FallbackPolicy {
    fn from(value: PolicyArg) -> Self {
        match value {
            PolicyArg::Strict => Self::Strict,
            PolicyArg::FallThrough => Self::FallThrough,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for localized error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Installs the stderr log subscriber filtered by `RUST_LOG`.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    load_catalog().await;
    let env_lang = std::env::var(LANG_ENV).ok();
    let locale = resolve_locale(cli.cli_lang, env_lang.as_deref())?;
    set_locale(locale);
    if locale != Locale::En {
        write_stderr_line(&t!("i18n.disclaimer.machine_translated"))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Localize(command) => command_localize(command).await,
        Commands::Show(command) => command_show(command).await,
        Commands::Detect(command) => command_detect(command),
        Commands::Config {
            command,
        } => command_config(command),
    }
}

/// Prints top-level help.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Resolution Commands
// ============================================================================

/// Executes the `localize` command.
async fn command_localize(command: LocalizeCommand) -> CliResult<ExitCode> {
    let resolver = resolver_from_args(&command.sources)?;
    let domain = command.domain.map_or_else(|| resolver.default_domain().clone(), Domain::new);
    let tag = command.lang.as_deref().map(parse_language).transpose()?;
    resolver.ensure_loaded(&domain, tag.as_ref()).await;
    for key in &command.keys {
        let value = resolver.localize(key, Some(&domain), tag.as_ref());
        write_stdout_line(&value).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Executes the `show` command.
async fn command_show(command: ShowCommand) -> CliResult<ExitCode> {
    let resolver = resolver_from_args(&command.sources)?;
    let domain = Domain::new(command.domain);
    let tag = match command.lang.as_deref() {
        Some(value) => parse_language(value)?,
        None => resolver.default_language(),
    };
    resolver.ensure_loaded(&domain, Some(&tag)).await;
    let dictionary = tag
        .narrowings()
        .chain(std::iter::once(resolver.fallback_language().clone()))
        .filter_map(|candidate| resolver.store().lookup(&domain, &candidate))
        .find(|dictionary| !dictionary.is_empty())
        .unwrap_or_default();
    if dictionary.is_empty() {
        write_stderr_line(&t!("show.empty", domain = domain, lang = tag))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }
    let rendered = serde_json::to_string_pretty(&*dictionary)
        .map_err(|err| CliError::new(t!("show.encode_failed", domain = domain, error = err)))?;
    write_stdout_line(&rendered).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `detect` command.
fn command_detect(command: DetectCommand) -> CliResult<ExitCode> {
    let mut config = TextLocaleConfig::load_or_default(command.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    if command.page_url.is_some() {
        config.resolver.page_url = command.page_url;
        config.validate().map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    }
    let detector = build_detector(&config.resolver)
        .map_err(|err| CliError::new(t!("setup.failed", error = err)))?;
    write_stdout_line(detector.detect().as_str())
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Loads configuration, applies overrides, and builds a resolver.
fn resolver_from_args(args: &SourceArgs) -> CliResult<TranslationResolver> {
    let mut config = TextLocaleConfig::load_or_default(args.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    apply_overrides(&mut config, args);
    config.validate().map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    build_resolver(&config).map_err(|err| CliError::new(t!("setup.failed", error = err)))
}

/// Applies command-line overrides on top of file configuration.
fn apply_overrides(config: &mut TextLocaleConfig, args: &SourceArgs) {
    if let Some(base) = &args.system_base {
        config.sources.system_base = Some(base.clone());
    }
    if let Some(base) = &args.user_base {
        config.sources.user_base = Some(base.clone());
    }
    if let Some(layout) = args.layout {
        config.sources.layout = layout.into();
    }
    if let Some(policy) = args.fallback_policy {
        config.resolver.fallback_policy = policy.into();
    }
}

/// Parses a user-supplied language tag.
fn parse_language(value: &str) -> CliResult<LanguageTag> {
    LanguageTag::new(value)
        .map_err(|err| CliError::new(t!("language.invalid", value = value, error = err)))
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => command_config_validate(&command),
        ConfigCommand::Example => command_config_example(),
    }
}

/// Executes the config validation command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let _config = TextLocaleConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    write_stdout_line(&t!("config.validate.ok"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Prints the example configuration.
fn command_config_example() -> CliResult<ExitCode> {
    let mut stdout = std::io::stdout();
    stdout
        .write_all(config_toml_example().as_bytes())
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Locale Helpers
// ============================================================================

/// Resolves the CLI message locale from the flag, then the environment.
fn resolve_locale(lang: Option<LangArg>, env_lang: Option<&str>) -> CliResult<Locale> {
    if let Some(lang) = lang {
        return Ok(lang.into());
    }
    if let Some(value) = env_lang {
        return Locale::parse(value).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        });
    }
    Ok(Locale::En)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}

#[cfg(test)]
mod tests {
    //! Unit tests for argument handling.

    #![allow(clippy::unwrap_used, clippy::panic, reason = "Test-only assertions.")]

    use super::*;

    /// Tests the flag wins over the environment and bad values are rejected.
    #[test]
    fn locale_resolution_prefers_flag() {
        assert_eq!(resolve_locale(Some(LangArg::Ca), Some("en")).unwrap(), Locale::Ca);
        assert_eq!(resolve_locale(None, Some("ca_ES.UTF-8")).unwrap(), Locale::Ca);
        assert_eq!(resolve_locale(None, None).unwrap(), Locale::En);
        assert!(resolve_locale(None, Some("xx")).is_err());
    }

    /// Tests command-line overrides replace file values.
    #[test]
    fn overrides_replace_config_values() {
        let cli = Cli::try_parse_from([
            "textlocale",
            "localize",
            "--system-base",
            "https://cdn.test/app",
            "--layout",
            "locales",
            "--fallback-policy",
            "fall-through",
            "greeting",
        ])
        .unwrap();
        let Some(Commands::Localize(command)) = cli.command else {
            panic!("expected localize");
        };
        let mut config = TextLocaleConfig::default();
        apply_overrides(&mut config, &command.sources);
        assert_eq!(config.sources.system_base.as_deref(), Some("https://cdn.test/app"));
        assert_eq!(config.sources.layout, UrlLayout::Locales);
        assert_eq!(config.resolver.fallback_policy, FallbackPolicy::FallThrough);
        assert_eq!(command.keys, vec!["greeting".to_string()]);
    }
}
