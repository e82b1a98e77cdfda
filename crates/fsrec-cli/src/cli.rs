use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "fsrec",
    about = "fsrec — a directory tree as a structured record store",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Store configuration file
    #[arg(short, long, global = true, default_value = "fsrec.toml")]
    pub config: String,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Register the store described by the configuration
    Init(InitArgs),
    /// List all records
    Ls(LsArgs),
    /// Show one record by path, external identifier, or unique fragment
    Show(ShowArgs),
    /// Create a record from a path and/or attributes
    Create(CreateArgs),
    /// Update attributes, relocating the backing file if they identify it
    Set(SetArgs),
    /// Delete a record
    Rm(RmArgs),
    /// Count records
    Count(CountArgs),
}

#[derive(Args)]
pub struct InitArgs {
    /// Write a starter configuration file instead of registering
    #[arg(long)]
    pub sample: bool,
}

#[derive(Args)]
pub struct LsArgs {
    /// Also print the compiled glob and match pattern
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Args)]
pub struct ShowArgs {
    pub key: String,
    /// Print the record body instead of its attributes
    #[arg(long)]
    pub body: bool,
}

#[derive(Args)]
pub struct CreateArgs {
    /// Explicit record path; omit to synthesize one from attributes
    pub path: Option<String>,
    /// Attribute assignment, name=value (repeatable)
    #[arg(short, long = "attr")]
    pub attrs: Vec<String>,
    /// Record body content
    #[arg(long)]
    pub body: Option<String>,
}

#[derive(Args)]
pub struct SetArgs {
    pub path: String,
    /// Attribute assignment, name=value (repeatable)
    #[arg(short, long = "attr")]
    pub attrs: Vec<String>,
}

#[derive(Args)]
pub struct RmArgs {
    pub path: String,
}

#[derive(Args)]
pub struct CountArgs {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_init() {
        let cli = Cli::try_parse_from(["fsrec", "init"]).unwrap();
        assert!(matches!(cli.command, Command::Init(_)));
        assert_eq!(cli.config, "fsrec.toml");
    }

    #[test]
    fn parse_init_sample() {
        let cli = Cli::try_parse_from(["fsrec", "init", "--sample"]).unwrap();
        if let Command::Init(args) = cli.command {
            assert!(args.sample);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_custom_config() {
        let cli = Cli::try_parse_from(["fsrec", "-c", "notes.toml", "ls"]).unwrap();
        assert_eq!(cli.config, "notes.toml");
        assert!(matches!(cli.command, Command::Ls(_)));
    }

    #[test]
    fn parse_show() {
        let cli = Cli::try_parse_from(["fsrec", "show", "p1/t1~txt", "--body"]).unwrap();
        if let Command::Show(args) = cli.command {
            assert_eq!(args.key, "p1/t1~txt");
            assert!(args.body);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_create_with_attrs() {
        let cli = Cli::try_parse_from([
            "fsrec", "create", "-a", "project=p1", "-a", "title=t1", "--body", "hello",
        ])
        .unwrap();
        if let Command::Create(args) = cli.command {
            assert_eq!(args.path, None);
            assert_eq!(args.attrs, vec!["project=p1", "title=t1"]);
            assert_eq!(args.body.as_deref(), Some("hello"));
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_create_with_path() {
        let cli = Cli::try_parse_from(["fsrec", "create", "scripts/util/helper.rb"]).unwrap();
        if let Command::Create(args) = cli.command {
            assert_eq!(args.path.as_deref(), Some("scripts/util/helper.rb"));
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_set() {
        let cli = Cli::try_parse_from(["fsrec", "set", "p1/t1.txt", "-a", "title=t2"]).unwrap();
        if let Command::Set(args) = cli.command {
            assert_eq!(args.path, "p1/t1.txt");
            assert_eq!(args.attrs, vec!["title=t2"]);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_rm() {
        let cli = Cli::try_parse_from(["fsrec", "rm", "p1/t1.txt"]).unwrap();
        assert!(matches!(cli.command, Command::Rm(_)));
    }

    #[test]
    fn parse_json_format() {
        let cli = Cli::try_parse_from(["fsrec", "--format", "json", "count"]).unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
    }
}
