use anyhow::{bail, Context};
use colored::Colorize;

use fsrec_spec::Attributes;
use fsrec_store::{ident, Record, SaveOutcome, Selector, Store};

use crate::cli::*;
use crate::config::StoreConfig;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Init(args) => cmd_init(&cli.config, args),
        Command::Ls(args) => cmd_ls(&open(&cli.config)?, args, &cli.format),
        Command::Show(args) => cmd_show(&open(&cli.config)?, args, &cli.format),
        Command::Create(args) => cmd_create(&open(&cli.config)?, args),
        Command::Set(args) => cmd_set(&open(&cli.config)?, args),
        Command::Rm(args) => cmd_rm(&open(&cli.config)?, args),
        Command::Count(_) => cmd_count(&open(&cli.config)?, &cli.format),
    }
}

fn open(config: &str) -> anyhow::Result<Store> {
    StoreConfig::load(config.as_ref())?.open()
}

fn cmd_init(config_path: &str, args: InitArgs) -> anyhow::Result<()> {
    if args.sample {
        if std::path::Path::new(config_path).exists() {
            bail!("refusing to overwrite existing config {config_path}");
        }
        std::fs::write(config_path, StoreConfig::sample())
            .with_context(|| format!("writing {config_path}"))?;
        println!("{} Wrote starter config to {}", "✓".green().bold(), config_path.bold());
        return Ok(());
    }

    let store = open(config_path)?;
    let schema = store.schema();
    println!(
        "{} Registered store at {}",
        "✓".green().bold(),
        schema.base().display().to_string().bold()
    );
    println!("  Glob: {}", schema.location().glob().cyan());
    println!("  Pattern: {}", schema.location().pattern_source().cyan());
    println!(
        "  Attributes: {}",
        schema.attribute_names().join(", ").yellow()
    );
    Ok(())
}

fn cmd_ls(store: &Store, args: LsArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let records = store.find(Selector::All)?;
    match format {
        OutputFormat::Json => {
            let values: Vec<_> = records.iter().map(record_value).collect();
            println!("{}", serde_json::to_string_pretty(&values)?);
        }
        OutputFormat::Text => {
            if args.verbose {
                println!("glob: {}", store.schema().location().glob().cyan());
                println!(
                    "pattern: {}",
                    store.schema().location().pattern_source().cyan()
                );
            }
            for record in &records {
                print_record_line(record);
            }
            println!("{} record(s)", records.len().to_string().bold());
        }
    }
    Ok(())
}

fn cmd_show(store: &Store, args: ShowArgs, format: &OutputFormat) -> anyhow::Result<()> {
    // Accept external identifiers as well as raw paths.
    let key = ident::decode(&args.key);
    let mut records = store.find(Selector::Key(key))?;
    let Some(record) = records.pop() else {
        bail!("no record matches {:?}", args.key);
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record_value(&record))?),
        OutputFormat::Text if args.body => {
            print!("{}", String::from_utf8_lossy(record.body()));
        }
        OutputFormat::Text => {
            print_record_line(&record);
            if let Some(id) = record.external_id() {
                println!("  id: {}", id.cyan());
            }
            println!("  {} byte(s)", record.body().len());
        }
    }
    Ok(())
}

fn cmd_create(store: &Store, args: CreateArgs) -> anyhow::Result<()> {
    let attrs = parse_attrs(&args.attrs)?;
    let mut record = store.create(args.path.as_deref().unwrap_or(""), &attrs)?;
    if let Some(body) = args.body {
        record.set_body(body.into_bytes());
        record = match store.save(record)? {
            SaveOutcome::Saved(record) => record,
            SaveOutcome::Collision(record) => {
                bail!("path already occupied: {:?}", record.path())
            }
        };
    }
    println!(
        "{} Created {}",
        "✓".green().bold(),
        record.path().unwrap_or("<unsaved>").bold()
    );
    Ok(())
}

fn cmd_set(store: &Store, args: SetArgs) -> anyhow::Result<()> {
    let attrs = parse_attrs(&args.attrs)?;
    let record = store.get(&args.path)?;
    let updated = store.update_attributes(record, &attrs)?;
    let new_path = updated.path().unwrap_or("<unsaved>");
    if new_path == args.path {
        println!("{} Updated {}", "✓".green().bold(), new_path.bold());
    } else {
        println!(
            "{} Moved {} → {}",
            "✓".green().bold(),
            args.path.dimmed(),
            new_path.bold()
        );
    }
    Ok(())
}

fn cmd_rm(store: &Store, args: RmArgs) -> anyhow::Result<()> {
    let record = store.delete(&args.path)?;
    println!(
        "{} Deleted {}",
        "✓".green().bold(),
        record.path().unwrap_or(&args.path).bold()
    );
    Ok(())
}

fn cmd_count(store: &Store, format: &OutputFormat) -> anyhow::Result<()> {
    let count = store.count()?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::json!({ "count": count })),
        OutputFormat::Text => println!("{count}"),
    }
    Ok(())
}

fn parse_attrs(pairs: &[String]) -> anyhow::Result<Attributes> {
    let mut attrs = Attributes::new();
    for pair in pairs {
        let Some((name, value)) = pair.split_once('=') else {
            bail!("attribute {:?} is not of the form name=value", pair);
        };
        attrs.insert(name.to_string(), value.to_string());
    }
    Ok(attrs)
}

fn print_record_line(record: &Record) {
    let attrs: Vec<String> = record
        .attributes()
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect();
    println!(
        "{}  {}",
        record.path().unwrap_or("<unsaved>").bold(),
        attrs.join(" ").yellow()
    );
}

fn record_value(record: &Record) -> serde_json::Value {
    serde_json::json!({
        "path": record.path(),
        "id": record.external_id(),
        "attributes": record.attributes(),
        "body": String::from_utf8_lossy(record.body()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_attrs_accepts_pairs() {
        let attrs = parse_attrs(&["a=1".into(), "b=two".into()]).unwrap();
        assert_eq!(attrs["a"], "1");
        assert_eq!(attrs["b"], "two");
    }

    #[test]
    fn parse_attrs_allows_equals_in_value() {
        let attrs = parse_attrs(&["expr=a=b".into()]).unwrap();
        assert_eq!(attrs["expr"], "a=b");
    }

    #[test]
    fn parse_attrs_rejects_bare_name() {
        assert!(parse_attrs(&["nope".into()]).is_err());
    }
}
