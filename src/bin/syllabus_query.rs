//! Looks entries up in a validated catalogue.
//!
//! Builds the content index and prints matches as NDJSON, one entry (or
//! category summary) per line, in curriculum order. Refuses to answer from a
//! catalogue that fails validation.

use anyhow::{Context, Result, bail};
use serde_json::json;
use std::env;
use std::path::PathBuf;
use syllabus::{ContentRoot, Difficulty, Entry, index, init_logging, load_catalogue_from_root};

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
    let catalogue = load_catalogue_from_root(&root)
        .with_context(|| format!("loading catalogue from {}", root.path().display()))?;
    let index = index(catalogue);

    match args.query {
        Query::Id(id) => match index.by_id(&id) {
            Some(entry) => print_entry(entry)?,
            None => bail!("no entry with id '{id}'"),
        },
        Query::Tag(tag) => {
            for entry in index.by_tag(&tag) {
                print_entry(entry)?;
            }
        }
        Query::Difficulty(level) => {
            for entry in index.by_difficulty(level) {
                print_entry(entry)?;
            }
        }
        Query::Categories => {
            for category in index.categories_in_order() {
                let summary = json!({
                    "id": category.id,
                    "label": category.label,
                    "icon": category.icon,
                    "entries": category
                        .entries
                        .iter()
                        .map(|entry| entry.id.as_str())
                        .collect::<Vec<_>>(),
                });
                println!("{}", serde_json::to_string(&summary)?);
            }
        }
    }
    Ok(())
}

fn print_entry(entry: &Entry) -> Result<()> {
    println!("{}", serde_json::to_string(entry)?);
    Ok(())
}

enum Query {
    Id(String),
    Tag(String),
    Difficulty(Difficulty),
    Categories,
}

struct CliArgs {
    root: Option<PathBuf>,
    query: Query,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args_os().skip(1);
        let mut root = None;
        let mut query = None;

        while let Some(arg_os) = args.next() {
            let arg = arg_os
                .into_string()
                .map_err(|_| anyhow::anyhow!("argument is not valid UTF-8"))?;
            let selected = match arg.as_str() {
                "--root" => {
                    root = Some(PathBuf::from(next_value(&mut args, "--root")?));
                    continue;
                }
                "--id" => Query::Id(next_value(&mut args, "--id")?),
                "--tag" => Query::Tag(next_value(&mut args, "--tag")?),
                "--difficulty" => {
                    let raw = next_value(&mut args, "--difficulty")?;
                    let level = Difficulty::parse(&raw).ok_or_else(|| {
                        anyhow::anyhow!(
                            "unknown difficulty '{raw}' (expected beginner|intermediate|advanced)"
                        )
                    })?;
                    Query::Difficulty(level)
                }
                "--categories" => Query::Categories,
                "--help" | "-h" => {
                    print!("{}", usage());
                    std::process::exit(0);
                }
                other => bail!("unknown flag: {other}\n{}", usage()),
            };
            if query.replace(selected).is_some() {
                bail!("only one of --id/--tag/--difficulty/--categories may be given");
            }
        }

        let Some(query) = query else {
            bail!("no query given\n{}", usage());
        };
        Ok(Self { root, query })
    }
}

fn next_value(args: &mut impl Iterator<Item = std::ffi::OsString>, flag: &str) -> Result<String> {
    args.next()
        .map(|os| {
            os.into_string()
                .map_err(|_| anyhow::anyhow!("value for {flag} is not valid UTF-8"))
        })
        .transpose()?
        .ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))
}

fn usage() -> &'static str {
    "Usage: syllabus-query [--root DIR] (--id ID | --tag TAG | --difficulty LEVEL | --categories)\n\
Prints matching entries (or category summaries) as NDJSON in curriculum order.\n"
}
