//! # Commands
//!
//! ```text
//! tienda [--config PATH] <command>
//!   products [--search TERM]     listing + cart panel
//!   add <NAME> [--quantity N] [--price TEXT]
//!   remove <POSITION>            zero-based
//!   clear
//!   cart                         cart panel
//!   checkout                     checkout summary
//!   badge                        header badge
//! ```

pub mod cart;
pub mod view;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tienda_core::{Catalog, GroupingPolicy, Money};
use tienda_store::{CartStore, Storage};

use crate::render::Renderer;

#[derive(Parser)]
#[command(name = "tienda")]
#[command(about = "Storefront shopping cart.")]
pub struct CommandLine {
    /// Config file (default: tienda.toml in the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// List products, optionally filtered by name
    #[command(alias = "p")]
    Products {
        #[arg(long, short)]
        search: Option<String>,
    },
    /// Add a product to the cart
    #[command(alias = "a")]
    Add {
        name: String,
        #[arg(long, short, default_value = "1")]
        quantity: String,
        /// Price as printed on the card, e.g. "$200.000"
        #[arg(long)]
        price: Option<String>,
    },
    /// Remove the cart line at a zero-based position
    #[command(alias = "rm")]
    Remove { position: usize },
    /// Empty the cart
    Clear,
    /// Show the cart panel
    #[command(alias = "c")]
    Cart,
    /// Show the checkout summary
    Checkout,
    /// Show the header badge count
    Badge,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Everything a command needs: the cart, the catalog and how to print.
pub struct Storefront<S: Storage> {
    pub store: CartStore<S>,
    pub catalog: Catalog,
    pub renderer: Renderer,
    pub policy: GroupingPolicy,
    pub shipping: Money,
}

impl<S: Storage> Storefront<S> {
    /// Runs one command and returns what to print.
    pub fn run(&mut self, command: Commands) -> anyhow::Result<String> {
        match command {
            Commands::Products { search } => view::products(self, search.as_deref()),
            Commands::Add {
                name,
                quantity,
                price,
            } => cart::add(self, &name, &quantity, price.as_deref()),
            Commands::Remove { position } => cart::remove(self, position),
            Commands::Clear => cart::clear(self),
            Commands::Cart => Ok(view::cart(self)),
            Commands::Checkout => Ok(view::checkout(self)),
            Commands::Badge => Ok(view::badge(self)),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use clap::CommandFactory;
    use tienda_store::MemoryStorage;

    pub(crate) fn storefront() -> Storefront<MemoryStorage> {
        Storefront {
            store: CartStore::new(MemoryStorage::new()),
            catalog: Catalog::default(),
            renderer: Renderer::default(),
            policy: GroupingPolicy::ES_CO,
            shipping: Money::from_units(15_000),
        }
    }

    #[test]
    fn test_cli_definition() {
        CommandLine::command().debug_assert();
    }

    #[test]
    fn test_parse_add() {
        let cli = CommandLine::try_parse_from([
            "tienda",
            "add",
            "Kimia Seamless Sport Set",
            "--quantity",
            "2",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Commands::Add {
                name: "Kimia Seamless Sport Set".into(),
                quantity: "2".into(),
                price: None,
            }
        );
    }

    #[test]
    fn test_parse_remove_rejects_negative() {
        assert!(CommandLine::try_parse_from(["tienda", "remove", "-1"]).is_err());
        let cli = CommandLine::try_parse_from(["tienda", "--config", "x.toml", "rm", "0"]).unwrap();
        assert_eq!(cli.command, Commands::Remove { position: 0 });
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
    }

    #[test]
    fn test_run_dispatches() {
        let mut shop = storefront();
        shop.run(Commands::Add {
            name: "Kimia Seamless Sport Set".into(),
            quantity: "1".into(),
            price: None,
        })
        .unwrap();
        assert_eq!(shop.run(Commands::Badge).unwrap(), "Badge: 1\n");
        shop.run(Commands::Clear).unwrap();
        assert_eq!(shop.run(Commands::Badge).unwrap(), "");
    }
}
