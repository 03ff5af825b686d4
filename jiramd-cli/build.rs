use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the formats registered by FormatRegistry::with_defaults
// We need to duplicate this here since build scripts can't access the library
const AVAILABLE_FORMATS: &[&str] = &["adf", "jira", "markdown"];

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let format_arg = |name: &'static str| {
        Arg::new(name)
            .long(name)
            .value_parser(clap::builder::PossibleValuesParser::new(AVAILABLE_FORMATS))
            .value_hint(ValueHint::Other)
    };

    let mut cmd = Command::new("jiramd")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert between Markdown, Jira wiki markup and ADF, and manage Story files")
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("convert")
                .arg(Arg::new("input").index(1).value_hint(ValueHint::FilePath))
                .arg(format_arg("from"))
                .arg(format_arg("to"))
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("story")
                .subcommand(
                    Command::new("parse")
                        .arg(Arg::new("path").index(1).value_hint(ValueHint::AnyPath))
                        .arg(
                            Arg::new("require-id")
                                .long("require-id")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(
                    Command::new("render")
                        .arg(Arg::new("input").index(1).value_hint(ValueHint::FilePath))
                        .arg(
                            Arg::new("output")
                                .long("output")
                                .short('o')
                                .value_hint(ValueHint::DirPath),
                        ),
                )
                .subcommand(
                    Command::new("check")
                        .arg(Arg::new("path").index(1).value_hint(ValueHint::AnyPath)),
                ),
        )
        .subcommand(
            Command::new("issues")
                .arg(Arg::new("input").index(1).value_hint(ValueHint::FilePath))
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .action(ArgAction::SetTrue),
                ),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "jiramd", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "jiramd", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "jiramd", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
