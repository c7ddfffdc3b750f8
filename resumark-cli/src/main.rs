// Command-line interface for resumark
//
// Turns a Markdown CV into a Word document and a PDF that look the same, and exposes the
// intermediate block model for inspection.
//
// Usage:
//  resumark <input> --to <format> [--from <format>] [-o <file>]           - Convert (default)
//  resumark convert <input> --to <format> [--from <format>] [-o <file>]   - Same as above
//  resumark export <input> [--out-dir <dir>] [--formats docx,pdf]        - Write several artifacts
//  resumark inspect <input> [treeviz|json|html]                          - Show the block model
//  resumark generate-css                                                  - Print the base stylesheet
//  resumark --list-formats                                                - List available formats
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and passes the parameters to the format.
// Example:
//  resumark cv.md --to pdf -o cv.pdf --extra-page-size letter

use clap::{Arg, ArgAction, Command, ValueHint};
use resumark::formats::MarkdownFormat;
use resumark::ir::Document;
use resumark::style::css::stylesheet;
use resumark::style::PageSize;
use resumark::{publish_all, FormatRegistry, SerializedDocument};
use resumark_config::{Loader, ResumarkConfig};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

const SUBCOMMANDS: &[&str] = &["convert", "export", "inspect", "generate-css", "help"];
const INSPECT_VIEWS: &[&str] = &["treeviz", "json", "html"];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = if let Some(key) = arg.strip_prefix("--extra-") {
            Some(key)
        } else {
            arg.strip_prefix("--extras-")
        };

        if let Some(key) = key_opt {
            let has_value = i + 1 < args.len() && !args[i + 1].starts_with('-');
            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn input_arg(name: &'static str) -> Arg {
    Arg::new(name)
        .help("Input file path")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn from_arg() -> Arg {
    Arg::new("from")
        .long("from")
        .help("Source format (auto-detected from file extension if not specified)")
        .value_hint(ValueHint::Other)
}

fn build_cli() -> Command {
    Command::new("resumark")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Markdown CVs into matching DOCX and PDF documents")
        .long_about(
            "resumark renders a Markdown CV as a Word document and a PDF that share one\n\
            style system.\n\n\
            Commands:\n  \
            - convert: Convert one document to one format (default)\n  \
            - export:  Write several artifacts (DOCX and PDF by default)\n  \
            - inspect: View the converted block model\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            resumark cv.md --to docx -o cv.docx          # Word document\n  \
            resumark cv.md --to html                     # Styled HTML page on stdout\n  \
            resumark export cv.md --out-dir build        # build/cv.docx and build/cv.pdf\n  \
            resumark inspect cv.md --extra-show-runs     # Block outline with runs",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a resumark.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log pipeline stages to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a document to another format (default command)")
                .long_about(
                    "Convert a document to one output format.\n\n\
                    Inputs: markdown (.md), html (.html)\n\
                    Outputs: docx, pdf, html, json, treeviz\n\n\
                    Text formats go to stdout unless -o is given. DOCX and PDF\n\
                    always need -o.",
                )
                .arg(input_arg("input"))
                .arg(from_arg())
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
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
            Command::new("export")
                .about("Write several artifacts from one conversion")
                .long_about(
                    "Convert once and write <stem>.<ext> for every requested format.\n\n\
                    The stem is the input file name without its extension. Without\n\
                    --out-dir the files land next to the input.\n\n\
                    Examples:\n  \
                    resumark export cv.md                          # cv.docx and cv.pdf\n  \
                    resumark export cv.md --formats docx,html      # skip the PDF",
                )
                .arg(input_arg("input"))
                .arg(from_arg())
                .arg(
                    Arg::new("out-dir")
                        .long("out-dir")
                        .help("Directory for the artifacts (created when missing)")
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("formats")
                        .long("formats")
                        .help("Comma-separated output formats")
                        .value_delimiter(',')
                        .default_value("docx,pdf"),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Show the block model of a document")
                .arg(input_arg("path"))
                .arg(from_arg())
                .arg(
                    Arg::new("view")
                        .help("What to print. Defaults to 'treeviz'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(INSPECT_VIEWS))
                        .index(2),
                ),
        )
        .subcommand(
            Command::new("generate-css")
                .about("Output the base CSS used for HTML and PDF export")
                .long_about(
                    "Outputs the stylesheet every HTML page starts with.\n\n\
                    Use it as a starting point for custom styling, then pass the edited\n\
                    file with --extra-css-path or convert.html.custom_css.",
                ),
        )
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // A leading file path means the implicit convert command.
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && !SUBCOMMANDS.contains(&cleaned_args[1].as_str())
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);
                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    init_logging(matches.get_flag("verbose"));

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);
    let registry = registry_for(&config);

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let to = sub_matches.get_one::<String>("to").expect("to is required");
            let from = source_format(&registry, input, sub_matches.get_one::<String>("from"));
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(&registry, input, &from, to, output, &extra_params, &config);
        }
        Some(("export", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let from = source_format(&registry, input, sub_matches.get_one::<String>("from"));
            let out_dir = sub_matches.get_one::<String>("out-dir").map(PathBuf::from);
            let formats: Vec<&str> = sub_matches
                .get_many::<String>("formats")
                .map(|values| values.map(|s| s.trim()).filter(|s| !s.is_empty()).collect())
                .unwrap_or_default();
            handle_export_command(
                &registry,
                input,
                &from,
                out_dir,
                &formats,
                &extra_params,
                &config,
            );
        }
        Some(("inspect", sub_matches)) => {
            let path = sub_matches
                .get_one::<String>("path")
                .expect("path is required");
            let from = source_format(&registry, path, sub_matches.get_one::<String>("from"));
            let view = sub_matches
                .get_one::<String>("view")
                .map(|s| s.as_str())
                .unwrap_or("treeviz");
            handle_inspect_command(&registry, path, &from, view, &extra_params, &config);
        }
        Some(("generate-css", _)) => {
            handle_generate_css_command(&config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Default registry with the Markdown reader configured from `config`.
fn registry_for(config: &ResumarkConfig) -> FormatRegistry {
    let mut registry = FormatRegistry::default();
    registry.register(MarkdownFormat::new((&config.markdown).into()));
    registry
}

fn source_format(registry: &FormatRegistry, input: &str, explicit: Option<&String>) -> String {
    if let Some(format) = explicit {
        return format.to_string();
    }
    match registry.detect_format_from_filename(input) {
        Some(detected) => detected,
        None => {
            eprintln!("Error: Could not detect format from filename '{input}'");
            eprintln!("Please specify --from explicitly");
            std::process::exit(1);
        }
    }
}

/// Read and parse `input`. Only readable UTF-8 text reaches the converter.
fn load_document(registry: &FormatRegistry, input: &str, from: &str) -> Document {
    match registry.get(from) {
        Ok(format) if format.supports_parsing() => {}
        Ok(_) => {
            eprintln!("Error: Format '{from}' cannot be used as input");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }

    let bytes = fs::read(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });
    let source = String::from_utf8(bytes).unwrap_or_else(|_| {
        eprintln!("Error reading file '{input}': not valid UTF-8 text");
        std::process::exit(1);
    });

    let doc = registry.parse(&source, from).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
    log::debug!("{input}: {} blocks", doc.blocks.len());
    doc
}

/// Handle the convert command
fn handle_convert_command(
    registry: &FormatRegistry,
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
    config: &ResumarkConfig,
) {
    if let Err(e) = registry.get(to) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let doc = load_document(registry, input, from);
    let options = format_options(config, extra_params);
    let result = registry
        .serialize_with_options(&doc, to, &options)
        .unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            std::process::exit(1);
        });

    match (output, result) {
        (Some(path), data) => {
            fs::write(path, data.into_bytes()).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        (None, SerializedDocument::Text(text)) => {
            print!("{text}");
        }
        (None, SerializedDocument::Binary(_)) => {
            eprintln!("Binary formats (DOCX, PDF) require an output file. Use -o <path>.");
            std::process::exit(1);
        }
    }
}

/// Handle the export command
fn handle_export_command(
    registry: &FormatRegistry,
    input: &str,
    from: &str,
    out_dir: Option<PathBuf>,
    formats: &[&str],
    extra_params: &HashMap<String, String>,
    config: &ResumarkConfig,
) {
    if formats.is_empty() {
        eprintln!("Error: --formats lists no format");
        std::process::exit(1);
    }
    for format in formats {
        if let Err(e) = registry.get(format) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }

    let doc = load_document(registry, input, from);
    let input_path = Path::new(input);
    let stem = input_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("document");
    let out_dir = out_dir.unwrap_or_else(|| match input_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    });

    let options = format_options(config, extra_params);
    let written = publish_all(&doc, &out_dir, stem, formats, &options).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
    for path in written {
        println!("{}", path.display());
    }
}

/// Handle the inspect command
fn handle_inspect_command(
    registry: &FormatRegistry,
    path: &str,
    from: &str,
    view: &str,
    extra_params: &HashMap<String, String>,
    config: &ResumarkConfig,
) {
    let doc = load_document(registry, path, from);
    let params = build_inspect_params(config, extra_params);
    let output = registry
        .serialize_with_options(&doc, view, &params)
        .unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            std::process::exit(1);
        });
    print!("{}", String::from_utf8_lossy(&output.into_bytes()));
}

/// Handle the generate-css command
fn handle_generate_css_command(config: &ResumarkConfig) {
    let page = PageSize::from(config.convert.page.size).setup();
    print!("{}", stylesheet(&page));
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = FormatRegistry::default();
    println!("Available formats:\n");
    for name in registry.list_formats() {
        let Ok(format) = registry.get(&name) else {
            continue;
        };
        let mut modes = Vec::new();
        if format.supports_parsing() {
            modes.push("in");
        }
        if format.supports_serialization() {
            modes.push("out");
        }
        println!(
            "  {:<10} {:<8} {}",
            name,
            modes.join("/"),
            format.description()
        );
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> ResumarkConfig {
    let loader = Loader::new().with_optional_file("resumark.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

/// Fold the extras that shadow configuration keys into `config`.
fn apply_config_overrides(
    config: &mut ResumarkConfig,
    extra_params: &mut HashMap<String, String>,
) {
    if let Some(path) = take_override(extra_params, &["css", "css-path"]) {
        config.convert.html.custom_css = Some(path);
    }
    if let Some(path) = take_override(extra_params, &["chrome", "chrome-bin"]) {
        config.convert.pdf.chrome_bin = Some(path);
    }
    if let Some(raw) = extra_params.remove("show-runs") {
        config.inspect.show_runs = parse_bool_arg("show-runs", &raw);
    }
}

/// Serializer options: configuration first, remaining extras on top.
fn format_options(
    config: &ResumarkConfig,
    extra_params: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut options = config.format_options();
    for (key, value) in extra_params {
        options.insert(key.clone(), value.clone());
    }
    options
}

fn build_inspect_params(
    config: &ResumarkConfig,
    overrides: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut params = format_options(config, overrides);
    params.insert(
        "show-runs".to_string(),
        config.inspect.show_runs.to_string(),
    );
    params
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}

fn parse_bool_arg(flag: &str, raw: &str) -> bool {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => true,
        "false" | "0" | "no" | "n" => false,
        other => {
            eprintln!("Invalid boolean value '{other}' for --extra-{flag}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_extra_args_empty() {
        let input = args(&["resumark", "inspect", "cv.md"]);
        let (cleaned, extra) = parse_extra_args(&input);
        assert_eq!(cleaned, input);
        assert!(extra.is_empty());
    }

    #[test]
    fn test_parse_extra_args_value_and_flag() {
        let input = args(&[
            "resumark",
            "cv.md",
            "--to",
            "pdf",
            "--extra-page-size",
            "letter",
            "--extra-show-runs",
            "-o",
            "cv.pdf",
        ]);
        let (cleaned, extra) = parse_extra_args(&input);
        assert_eq!(cleaned, args(&["resumark", "cv.md", "--to", "pdf", "-o", "cv.pdf"]));
        assert_eq!(extra.get("page-size"), Some(&"letter".to_string()));
        assert_eq!(extra.get("show-runs"), Some(&"true".to_string()));
    }

    #[test]
    fn test_parse_extra_args_allows_extras_alias() {
        let input = args(&["resumark", "cv.md", "--extras-css-path", "cv.css"]);
        let (cleaned, extra) = parse_extra_args(&input);
        assert_eq!(cleaned, args(&["resumark", "cv.md"]));
        assert_eq!(extra.get("css-path"), Some(&"cv.css".to_string()));
    }

    #[test]
    fn apply_config_overrides_consumes_known_keys() {
        let mut config = load_cli_config(None);
        let mut extras = HashMap::new();
        extras.insert("css".to_string(), "custom.css".to_string());
        extras.insert("chrome-bin".to_string(), "/opt/chrome".to_string());
        extras.insert("show-runs".to_string(), "yes".to_string());
        extras.insert("page-size".to_string(), "letter".to_string());

        apply_config_overrides(&mut config, &mut extras);

        assert_eq!(config.convert.html.custom_css.as_deref(), Some("custom.css"));
        assert_eq!(config.convert.pdf.chrome_bin.as_deref(), Some("/opt/chrome"));
        assert!(config.inspect.show_runs);
        assert_eq!(extras.len(), 1);
    }

    #[test]
    fn extras_override_configured_options() {
        let config = load_cli_config(None);
        let mut extras = HashMap::new();
        extras.insert("page-size".to_string(), "letter".to_string());

        let options = format_options(&config, &extras);
        assert_eq!(options.get("page-size"), Some(&"letter".to_string()));
    }

    #[test]
    fn inspect_params_include_configured_defaults() {
        let config = load_cli_config(None);
        let params = build_inspect_params(&config, &HashMap::new());
        assert_eq!(params.get("show-runs"), Some(&"false".to_string()));
        assert_eq!(params.get("page-size"), Some(&"a4".to_string()));
    }

    #[test]
    fn cli_definition_is_consistent() {
        build_cli().debug_assert();
    }
}
