//! Argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Manage the GoMarketplace cart from the terminal.
#[derive(Debug, Parser)]
#[command(name = "marketplace", version, about)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Flags shared by every command.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Config file (defaults to the platform config dir).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// SQLite database file, overriding the config.
    #[arg(long, global = true, value_name = "FILE")]
    pub db: Option<PathBuf>,

    /// More log output (-v, -vv).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the cart.
    Show {
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Add a product, or bump its quantity if already present.
    Add(AddArgs),

    /// Increase a line item's quantity by one.
    Increment { id: String },

    /// Decrease a line item's quantity by one, removing it at zero.
    Decrement { id: String },

    /// Empty the cart.
    Clear,

    /// Print the raw persisted blob.
    Export,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub id: String,

    #[arg(long)]
    pub title: String,

    #[arg(long, value_name = "URL")]
    pub image_url: String,

    #[arg(long)]
    pub price: f64,

    /// Starting quantity for a product not yet in the cart.
    #[arg(long, default_value_t = 1)]
    pub quantity: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add() {
        let cli = Cli::parse_from([
            "marketplace",
            "add",
            "--id",
            "1",
            "--title",
            "Cap",
            "--image-url",
            "https://img/1.png",
            "--price",
            "19.9",
        ]);

        match cli.command {
            Command::Add(args) => {
                assert_eq!(args.id, "1");
                assert_eq!(args.quantity, 1);
                assert_eq!(args.price, 19.9);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["marketplace", "show", "--json", "--db", "/tmp/c.db", "-vv"]);

        assert!(matches!(cli.command, Command::Show { json: true }));
        assert_eq!(cli.global.db, Some(PathBuf::from("/tmp/c.db")));
        assert_eq!(cli.global.verbose, 2);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["marketplace", "clear", "-q", "-v"]).is_err());
    }
}
