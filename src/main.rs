//! shcompose: render a command tree document into a shell script.
//!
//! Reads a tree document from FILE (or stdin) and prints either the rendered
//! script or its structural description.
//!
//! Usage:
//!   shcompose [--script | --describe] [--verbose] [--dump-config] [FILE]
//!
//! FILE ending in `.toml` is read as TOML, anything else (and stdin) as JSON.

use std::io::Read;

use shcompose::config::{Config, OutputMode};
use shcompose::{Node, document, logging};

const USAGE: &str = "usage: shcompose [--script | --describe] [--verbose] [--dump-config] [FILE]";

struct Args {
    mode: Option<OutputMode>,
    verbose: bool,
    dump_config: bool,
    file: Option<String>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        mode: None,
        verbose: false,
        dump_config: false,
        file: None,
    };
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--script" => args.mode = Some(OutputMode::Script),
            "--describe" => args.mode = Some(OutputMode::Describe),
            "--verbose" | "-v" => args.verbose = true,
            "--dump-config" => args.dump_config = true,
            "--help" | "-h" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            flag if flag.starts_with('-') && flag != "-" => {
                return Err(format!("unknown option: {flag}"));
            }
            path => {
                if args.file.replace(path.to_string()).is_some() {
                    return Err("only one FILE may be given".into());
                }
            }
        }
    }
    Ok(args)
}

fn load_tree(file: Option<&str>) -> Result<Node, String> {
    let (text, is_toml) = match file {
        Some(path) if path != "-" => {
            let text = std::fs::read_to_string(path).map_err(|e| format!("cannot read {path}: {e}"))?;
            (text, path.ends_with(".toml"))
        }
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|e| format!("failed to read stdin: {e}"))?;
            (text, false)
        }
    };

    let loaded = if is_toml {
        document::from_toml(&text)
    } else {
        document::from_json(&text)
    };
    loaded.map_err(|e| e.to_string())
}

fn main() {
    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("shcompose: {e}\n{USAGE}");
            std::process::exit(2);
        }
    };

    let config = Config::load();
    logging::init(&config, args.verbose);

    if args.dump_config {
        match config.to_toml() {
            Ok(text) => print!("{text}"),
            Err(e) => {
                eprintln!("shcompose: cannot serialize config: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    let tree = match load_tree(args.file.as_deref()) {
        Ok(tree) => tree,
        Err(e) => {
            eprintln!("shcompose: {e}");
            std::process::exit(1);
        }
    };

    let mode = args.mode.unwrap_or(config.output.mode);
    log::info!("printing {:?} for {} node", mode, tree.kind());
    let output = match mode {
        OutputMode::Script => tree.render(),
        OutputMode::Describe => tree.describe(),
    };

    if config.output.trailing_newline {
        println!("{output}");
    } else {
        print!("{output}");
    }
}
