use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the subcommands in src/main.rs
// Build scripts can't reach src/ modules, so the top-level surface is repeated here
const INSPECT_VIEWS: &[&str] = &["treeviz", "json", "html"];

fn input() -> Arg {
    Arg::new("input")
        .help("Input file path")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("resumark")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Markdown CVs into matching DOCX and PDF documents")
        .arg_required_else_help(true)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Path to a resumark.toml configuration file")
                .value_hint(ValueHint::FilePath),
        )
        .subcommand(
            Command::new("convert")
                .arg(input())
                .arg(Arg::new("to").long("to").required(true))
                .arg(Arg::new("from").long("from"))
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("export")
                .arg(input())
                .arg(
                    Arg::new("out-dir")
                        .long("out-dir")
                        .value_hint(ValueHint::DirPath),
                )
                .arg(Arg::new("formats").long("formats")),
        )
        .subcommand(
            Command::new("inspect").arg(input()).arg(
                Arg::new("view")
                    .index(2)
                    .value_parser(clap::builder::PossibleValuesParser::new(INSPECT_VIEWS)),
            ),
        )
        .subcommand(Command::new("generate-css"));

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "resumark", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "resumark", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "resumark", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
