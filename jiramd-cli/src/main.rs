// Command-line interface for jiramd
//
// This binary converts documents between Markdown, Jira wiki markup and ADF, and works
// with Story files: the per-issue markdown files the sync tool keeps on disk.
//
// The core capabilities use the jiramd-babel crate; this crate only reads and writes files.
//
// Converting:
//
// The conversion needs a to and from pair. The from can be auto-detected from the file extension, while being overwrittable by an explicit --from flag.
// Usage:
//  jiramd <input> --to <format> [--from <format>] [--output <file>]          - Convert between formats (default)
//  jiramd convert <input> --to <format> [--from <format>] [--output <file>]  - Same as above (explicit)
//  jiramd story parse [<path>] [--require-id]     - Story files → JSON
//  jiramd story render <json> [-o <dir>]          - Story JSON → story files
//  jiramd story check [<path>]                    - Validate story files
//  jiramd issues <issues.json> [-o <dir>] [--dry-run]  - Fetched Jira issues → story files
//  jiramd --list-formats                          - List conversion formats
//
// Story paths default to the configured input directory (sync.input_dir, or MD_INPUT_DIR),
// story output to the configured output directory (sync.output_dir, or MD_OUTPUT_DIR).

mod stories;

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use jiramd_babel::issue::{map_issue_to_story, parse_issues};
use jiramd_babel::story::{parse_markdown_to_stories, validate_stories, ValidationReport};
use jiramd_babel::{FormatRegistry, Story};
use jiramd_config::{JiramdConfig, Loader};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

const SUBCOMMANDS: &[&str] = &["convert", "story", "issues", "help"];

fn build_cli() -> Command {
    Command::new("jiramd")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert between Markdown, Jira wiki markup and ADF, and manage Story files")
        .long_about(
            "jiramd is a command-line tool for moving text between Markdown and Jira.\n\n\
            Commands:\n  \
            - convert: Transform between document formats (markdown, jira, adf)\n  \
            - story:   Parse, render and validate Story markdown files\n  \
            - issues:  Turn fetched Jira issue JSON into Story files\n\n\
            Examples:\n  \
            jiramd notes.md --to jira                 # Markdown to wiki markup (stdout)\n  \
            jiramd desc.json --to markdown -o out.md  # ADF to a markdown file\n  \
            jiramd story parse stories/ > all.json    # Story files to JSON\n  \
            jiramd issues search.json --dry-run       # Preview story files for issues"
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available conversion formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a jiramd.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log debug output to stderr (overrides RUST_LOG)")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats (default command)")
                .long_about(
                    "Convert documents between different formats.\n\n\
                    Supported formats:\n  \
                    - markdown: Markdown (.md, .markdown)\n  \
                    - jira:     Jira wiki markup (.jira, .wiki)\n  \
                    - adf:      Atlassian Document Format JSON (.adf, .json)\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    Examples:\n  \
                    jiramd convert notes.md --to jira            # Markdown to wiki (stdout)\n  \
                    jiramd convert desc.wiki --to adf -o d.json  # Wiki to ADF file\n  \
                    jiramd notes.md --to adf                     # 'convert' is optional"
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .long_help(
                            "Target format to convert to.\n\n\
                            Available formats: markdown, jira, adf\n\
                            Use the format name, not the file extension."
                        )
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("story")
                .about("Work with Story markdown files")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(
                    Command::new("parse")
                        .about("Parse story files and print them as JSON")
                        .arg(
                            Arg::new("path")
                                .help("Story file or directory (defaults to the configured input dir)")
                                .index(1)
                                .value_hint(ValueHint::AnyPath),
                        )
                        .arg(
                            Arg::new("require-id")
                                .long("require-id")
                                .help("Fail on stories without a Story ID")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(
                    Command::new("render")
                        .about("Render story JSON as canonical story markdown")
                        .arg(
                            Arg::new("input")
                                .help("JSON file holding one story or an array of stories")
                                .required(true)
                                .index(1)
                                .value_hint(ValueHint::FilePath),
                        )
                        .arg(
                            Arg::new("output")
                                .long("output")
                                .short('o')
                                .help("Directory to write one file per story (defaults to stdout)")
                                .value_hint(ValueHint::DirPath),
                        ),
                )
                .subcommand(
                    Command::new("check")
                        .about("Validate story files against Jira's field limits")
                        .arg(
                            Arg::new("path")
                                .help("Story file or directory (defaults to the configured input dir)")
                                .index(1)
                                .value_hint(ValueHint::AnyPath),
                        ),
                ),
        )
        .subcommand(
            Command::new("issues")
                .about("Map fetched Jira issue JSON to story files")
                .long_about(
                    "Map already-fetched Jira issues to story files.\n\n\
                    The input may hold a single issue, an array of issues or a search\n\
                    result ({\"issues\": [...]}). One story file is written per issue.\n\n\
                    Examples:\n  \
                    jiramd issues search.json                 # Write to the configured output dir\n  \
                    jiramd issues search.json -o stories/     # Write to stories/\n  \
                    jiramd issues PROJ-12.json --dry-run      # Print instead of writing"
                )
                .arg(
                    Arg::new("input")
                        .help("Issue JSON file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Directory for story files (defaults to the configured output dir)")
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .help("Print the story files instead of writing them")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn main() {
    // Try to parse args. If no subcommand is provided, inject "convert"
    let args: Vec<String> = std::env::args().collect();

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&args) {
        Ok(m) => m,
        Err(e) => {
            // A first argument that isn't a flag or a subcommand is taken as a file to convert
            if args.len() > 1
                && !args[1].starts_with('-')
                && !SUBCOMMANDS.contains(&args[1].as_str())
            {
                let mut new_args = vec![args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    init_tracing(matches.get_flag("verbose"));

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = required_arg(sub_matches, "input");
            let to = required_arg(sub_matches, "to");

            // Auto-detect --from if not provided
            let from = match sub_matches.get_one::<String>("from") {
                Some(f) => f.to_string(),
                None => {
                    let registry = FormatRegistry::default();
                    match registry.detect_format_from_filename(input) {
                        Some(detected) => detected,
                        None => {
                            eprintln!("Error: Could not detect format from filename '{input}'");
                            eprintln!("Please specify --from explicitly");
                            std::process::exit(1);
                        }
                    }
                }
            };

            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, &from, to, output);
        }
        Some(("story", story_matches)) => match story_matches.subcommand() {
            Some(("parse", sub_matches)) => {
                let path = story_path(sub_matches, &config);
                let require_id = sub_matches.get_flag("require-id");
                handle_story_parse_command(&path, require_id, &config);
            }
            Some(("render", sub_matches)) => {
                let input = required_arg(sub_matches, "input");
                let output = sub_matches.get_one::<String>("output").map(Path::new);
                handle_story_render_command(input, output, &config);
            }
            Some(("check", sub_matches)) => {
                let path = story_path(sub_matches, &config);
                handle_story_check_command(&path, &config);
            }
            _ => {
                eprintln!("Unknown story subcommand. Use --help for usage information.");
                std::process::exit(1);
            }
        },
        Some(("issues", sub_matches)) => {
            let input = required_arg(sub_matches, "input");
            let output = sub_matches
                .get_one::<String>("output")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(&config.sync.output_dir));
            let dry_run = sub_matches.get_flag("dry-run");
            handle_issues_command(input, &output, dry_run, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn required_arg<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    match matches.get_one::<String>(name) {
        Some(value) => value.as_str(),
        None => {
            eprintln!("Error: missing required argument '{name}'");
            std::process::exit(1);
        }
    }
}

fn story_path(matches: &ArgMatches, config: &JiramdConfig) -> PathBuf {
    matches
        .get_one::<String>("path")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(&config.sync.input_dir))
}

fn read_file(path: impl AsRef<Path>) -> String {
    let path = path.as_ref();
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {e}", path.display());
        std::process::exit(1);
    })
}

/// Handle the convert command
fn handle_convert_command(input: &str, from: &str, to: &str, output: Option<&str>) {
    let registry = FormatRegistry::default();

    // Validate formats exist
    if let Err(e) = registry.get(from) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    if let Err(e) = registry.get(to) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let source = read_file(input);

    let result = registry.convert(&source, from, to).unwrap_or_else(|e| {
        eprintln!("Conversion error: {e}");
        std::process::exit(1);
    });

    match output {
        Some(path) => {
            fs::write(path, ensure_trailing_newline(result)).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print!("{}", ensure_trailing_newline(result)),
    }
}

fn ensure_trailing_newline(mut text: String) -> String {
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

/// Parse every story file under `path`.
fn load_stories(path: &Path, config: &JiramdConfig, require_id: bool) -> Vec<(PathBuf, Vec<Story>)> {
    let files = stories::collect_markdown_files(path).unwrap_or_else(|e| {
        eprintln!("Error reading '{}': {e}", path.display());
        std::process::exit(1);
    });
    if files.is_empty() {
        warn!(path = %path.display(), "no story files found");
    }

    files
        .into_iter()
        .map(|file| {
            let source = read_file(&file);
            let mut options = config.parse_options(Some(file.display().to_string()));
            options.require_story_id |= require_id;
            let parsed = parse_markdown_to_stories(&source, &options).unwrap_or_else(|e| {
                eprintln!("Error [{}]: {e}", e.code());
                std::process::exit(1);
            });
            debug!(file = %file.display(), stories = parsed.len(), "parsed story file");
            (file, parsed)
        })
        .collect()
}

/// Handle the story parse command
fn handle_story_parse_command(path: &Path, require_id: bool, config: &JiramdConfig) {
    let stories: Vec<Story> = load_stories(path, config, require_id)
        .into_iter()
        .flat_map(|(_, stories)| stories)
        .collect();
    let json = serde_json::to_string_pretty(&stories).unwrap_or_else(|e| {
        eprintln!("Serialization error: {e}");
        std::process::exit(1);
    });
    println!("{json}");
}

/// Handle the story render command
fn handle_story_render_command(input: &str, output: Option<&Path>, config: &JiramdConfig) {
    let stories = stories::stories_from_json(&read_file(input)).unwrap_or_else(|e| {
        eprintln!("Error parsing story JSON '{input}': {e}");
        std::process::exit(1);
    });

    match output {
        Some(dir) => {
            let written = stories::write_stories(&stories, dir, config.sync.max_file_name_length)
                .unwrap_or_else(|e| {
                    eprintln!("Error writing stories to '{}': {e}", dir.display());
                    std::process::exit(1);
                });
            for path in written {
                println!("{}", path.display());
            }
        }
        None => print!("{}", stories::render_all(&stories)),
    }
}

/// Handle the story check command. Exits with 1 when any story has errors.
fn handle_story_check_command(path: &Path, config: &JiramdConfig) {
    let mut report = ValidationReport::default();
    for (file, stories) in load_stories(path, config, false) {
        let file_name = file.display().to_string();
        let file_report = validate_stories(&stories, Some(&file_name));
        if !file_report.errors.is_empty() || !file_report.warnings.is_empty() {
            println!("{file_name}");
            print!("{file_report}");
        }
        report.merge(file_report);
    }

    if report.is_valid() {
        println!(
            "Validation passed ({} warning{})",
            report.warnings.len(),
            if report.warnings.len() == 1 { "" } else { "s" }
        );
    } else {
        eprintln!("Validation failed with {} error(s)", report.errors.len());
        std::process::exit(1);
    }
}

/// Handle the issues command
fn handle_issues_command(input: &str, output: &Path, dry_run: bool, config: &JiramdConfig) {
    let issues = parse_issues(&read_file(input)).unwrap_or_else(|e| {
        eprintln!("Error parsing issue JSON '{input}': {e}");
        std::process::exit(1);
    });
    let stories: Vec<Story> = issues
        .iter()
        .map(|issue| map_issue_to_story(issue, &config.status.map))
        .collect();

    if dry_run {
        for story in &stories {
            let name = jiramd_babel::story::preferred_story_file_name(
                story,
                config.sync.max_file_name_length,
            );
            println!("==> {}", output.join(name).display());
            println!("{}", jiramd_babel::render_single_story_markdown(story));
        }
        return;
    }

    let written = stories::write_stories(&stories, output, config.sync.max_file_name_length)
        .unwrap_or_else(|e| {
            eprintln!("Error writing stories to '{}': {e}", output.display());
            std::process::exit(1);
        });
    for path in written {
        println!("{}", path.display());
    }
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Conversion formats:");
    let registry = FormatRegistry::default();
    for format_name in registry.list_formats() {
        let extensions = registry
            .get(&format_name)
            .map(|format| format.file_extensions().join(", "))
            .unwrap_or_default();
        println!("  {format_name:<10} {extensions}");
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> JiramdConfig {
    let env_overrides: Vec<(&str, Option<String>)> = vec![
        ("sync.input_dir", std::env::var("MD_INPUT_DIR").ok()),
        ("sync.output_dir", std::env::var("MD_OUTPUT_DIR").ok()),
    ];
    build_config(explicit_path, &env_overrides)
}

fn build_config(explicit_path: Option<&str>, env_overrides: &[(&str, Option<String>)]) -> JiramdConfig {
    let loader = Loader::new().with_optional_file("jiramd.toml");
    let mut loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    for (key, value) in env_overrides {
        if let Some(value) = value.as_deref().filter(|value| !value.is_empty()) {
            loader = loader.set_override(key, value).unwrap_or_else(|err| {
                eprintln!("Invalid override for {key}: {err}");
                std::process::exit(1);
            });
        }
    }

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}
