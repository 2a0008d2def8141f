//! Validates the catalogue named by a content root.
//!
//! Loads every part listed in `catalogue.json`, runs the validator and prints
//! either a one-line acceptance summary or every violation (one per line, or
//! a JSON array of `{kind, path, message}` records with `--json`). Exits 1 on
//! rejection or when the parts cannot be loaded.

use anyhow::{Result, bail};
use serde_json::json;
use std::env;
use std::path::PathBuf;
use syllabus::{ContentRoot, init_logging, load_catalogue, load_parts};

fn main() {
    init_logging();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse()?;
    let root = ContentRoot::resolve(args.root.as_deref())?;
    let parts = load_parts(&root)?;

    match load_catalogue(parts) {
        Ok(catalogue) => {
            if args.json {
                let summary = json!({
                    "accepted": true,
                    "categories": catalogue.categories().len(),
                    "entries": catalogue.entry_count(),
                });
                println!("{}", serde_json::to_string(&summary)?);
            } else {
                println!(
                    "catalogue accepted: {} categories, {} entries",
                    catalogue.categories().len(),
                    catalogue.entry_count()
                );
            }
            Ok(())
        }
        Err(rejected) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(rejected.violations())?);
            } else {
                for violation in rejected.violations() {
                    println!("{violation}");
                }
            }
            bail!("{rejected} (root {})", root.path().display())
        }
    }
}

struct CliArgs {
    root: Option<PathBuf>,
    json: bool,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args_os().skip(1);
        let mut root = None;
        let mut json = false;

        while let Some(arg_os) = args.next() {
            let arg = arg_os
                .into_string()
                .map_err(|_| anyhow::anyhow!("argument is not valid UTF-8"))?;
            match arg.as_str() {
                "--root" => {
                    let value = args
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("missing value for --root"))?;
                    root = Some(PathBuf::from(value));
                }
                "--json" => json = true,
                "--help" | "-h" => {
                    print!("{}", usage());
                    std::process::exit(0);
                }
                other => bail!("unknown flag: {other}\n{}", usage()),
            }
        }

        Ok(Self { root, json })
    }
}

fn usage() -> &'static str {
    "Usage: syllabus-check [--root DIR] [--json]\n\
Loads the parts listed in DIR/catalogue.json (default: $SYLLABUS_ROOT or the nearest\n\
directory holding catalogue.json), validates the catalogue and reports every violation.\n"
}
