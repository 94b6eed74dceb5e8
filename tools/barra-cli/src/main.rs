//! `barra`: terminal front-end for the bar backend.
//!
//! Every command loads what it needs, runs one operation through the shared
//! `Bar` state and prints the resulting notification. Failed operations exit
//! non-zero.

mod image;
mod prompt;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use barra_client::{Bar, GatewayConfig, HttpGateway};
use barra_common::drink::{DrinkId, DrinkInput};
use barra_common::notification::NotificationKind;
use barra_common::order::{LineItemInput, OrderId};
use barra_common::premix::{PremixId, PremixInput};
use barra_common::shortage::{ShortageId, DEFAULT_SHORTAGE_QUANTITY, DEFAULT_SHORTAGE_UNIT};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::prompt::CliConfirm;

type CliBar = Bar<HttpGateway, CliConfirm>;

#[derive(Parser, Debug)]
#[command(name = "barra", version, about = "Bar orders, premixes, drinks and shortages")]
struct Cli {
    /// Backend base URL. Defaults to $BARRA_API_URL, then http://localhost:5000/api.
    #[arg(long)]
    api_url: Option<String>,

    /// Log filter (e.g. "debug", "barra_client=trace"). Defaults to RUST_LOG, then "info".
    #[arg(long)]
    log_level: Option<String>,

    /// Skip confirmation prompts.
    #[arg(short, long)]
    yes: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Shortages, premixes to make and all orders
    Home,

    /// Supplier orders
    #[command(subcommand)]
    Orders(OrderCommand),

    /// Premix bases and their pending/ready status
    #[command(subcommand)]
    Premixes(PremixCommand),

    /// Drink recipes
    #[command(subcommand)]
    Drinks(DrinkCommand),

    /// Restock list
    #[command(subcommand)]
    Shortages(ShortageCommand),
}

#[derive(Subcommand, Debug)]
enum OrderCommand {
    /// List orders, oldest first
    #[command(alias = "ls")]
    List,

    /// Create an order from one or more line items
    Create {
        /// Line item as NAME:QUANTITY:UNIT, e.g. "Limes:3:kilo"
        #[arg(long = "item", required = true)]
        items: Vec<String>,
    },

    /// Mark a pending order as received
    Receive {
        id: String,
        #[arg(long)]
        comment: String,
        #[arg(long = "by")]
        received_by: String,
    },

    Delete {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
enum PremixCommand {
    #[command(alias = "ls")]
    List,

    Add {
        #[command(flatten)]
        recipe: PremixArgs,
    },

    /// Flip between pending and ready
    Toggle {
        id: String,
    },

    Delete {
        id: String,
    },
}

#[derive(Args, Debug)]
struct PremixArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    description: String,
    #[arg(long)]
    instructions: String,
    /// Comma-separated
    #[arg(long)]
    ingredients: String,
    /// PNG, JPEG, GIF, WebP or SVG file
    #[arg(long)]
    image: Option<PathBuf>,
    /// Start as pending instead of ready
    #[arg(long)]
    pending: bool,
}

#[derive(Subcommand, Debug)]
enum DrinkCommand {
    #[command(alias = "ls")]
    List,

    Add {
        #[command(flatten)]
        recipe: DrinkArgs,
    },

    /// Replace a drink's recipe
    Update {
        id: String,
        #[command(flatten)]
        recipe: DrinkArgs,
    },

    Delete {
        id: String,
    },
}

#[derive(Args, Debug)]
struct DrinkArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    instructions: String,
    /// Comma-separated
    #[arg(long, default_value = "")]
    ingredients: String,
    #[arg(long)]
    image: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum ShortageCommand {
    #[command(alias = "ls")]
    List,

    Add {
        name: String,
        #[arg(long, default_value_t = f64::from(DEFAULT_SHORTAGE_QUANTITY))]
        quantity: f64,
        #[arg(long, default_value = DEFAULT_SHORTAGE_UNIT)]
        unit: String,
    },

    Delete {
        id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref())?;

    let config = match cli.api_url.as_deref() {
        Some(url) => GatewayConfig::new(url),
        None => GatewayConfig::from_env(),
    };
    let gateway = HttpGateway::new(config);
    tracing::debug!(base_url = %gateway.config().base_url, "using backend");
    let confirm = if cli.yes {
        CliConfirm::Assume
    } else {
        CliConfirm::Ask
    };
    let mut bar = Bar::new(gateway, confirm);

    let ok = match cli.command {
        Command::Home => {
            let ok = bar.refresh_all().await;
            print!("{}", render::dashboard(&bar.dashboard()));
            ok
        }
        Command::Orders(command) => orders(&mut bar, command).await,
        Command::Premixes(command) => premixes(&mut bar, command).await?,
        Command::Drinks(command) => drinks(&mut bar, command).await?,
        Command::Shortages(command) => shortages(&mut bar, command).await,
    };

    report(&bar);
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn init_logging(level: Option<&str>) -> anyhow::Result<()> {
    let filter = match level {
        Some(level) => EnvFilter::try_new(level)?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
    Ok(())
}

/// Print whatever notification the last operation left behind.
fn report(bar: &CliBar) {
    if let Some(notification) = bar.notification() {
        match notification.kind {
            NotificationKind::Success => println!("{}", notification.message),
            NotificationKind::Error => eprintln!("error: {}", notification.message),
        }
    }
}

async fn orders(bar: &mut CliBar, command: OrderCommand) -> bool {
    match command {
        OrderCommand::List => {
            let ok = bar.load_orders().await;
            print!("{}", render::orders(bar.orders().all()));
            ok
        }
        OrderCommand::Create { items } => {
            for item in &items {
                if !bar.add_line_item(&parse_item(item)) {
                    return false;
                }
            }
            bar.create_order().await.is_some()
        }
        OrderCommand::Receive {
            id,
            comment,
            received_by,
        } => {
            bar.load_orders().await
                && bar
                    .mark_received(&OrderId::from(id.as_str()), &comment, &received_by)
                    .await
                    .is_some()
        }
        OrderCommand::Delete { id } => bar.delete_order(&OrderId::from(id.as_str())).await,
    }
}

async fn premixes(bar: &mut CliBar, command: PremixCommand) -> anyhow::Result<bool> {
    Ok(match command {
        PremixCommand::List => {
            let ok = bar.load_premixes().await;
            print!("{}", render::premixes(bar.premixes().all()));
            ok
        }
        PremixCommand::Add { recipe } => {
            let input = PremixInput {
                name: recipe.name,
                description: recipe.description,
                instructions: recipe.instructions,
                ingredients: recipe.ingredients,
                image: read_image(recipe.image).await?,
                pending: Some(recipe.pending),
            };
            bar.create_premix(&input).await.is_some()
        }
        PremixCommand::Toggle { id } => {
            bar.load_premixes().await
                && bar.toggle_premix(&PremixId::from(id.as_str())).await.is_some()
        }
        PremixCommand::Delete { id } => bar.delete_premix(&PremixId::from(id.as_str())).await,
    })
}

async fn drinks(bar: &mut CliBar, command: DrinkCommand) -> anyhow::Result<bool> {
    Ok(match command {
        DrinkCommand::List => {
            let ok = bar.load_drinks().await;
            print!("{}", render::drinks(bar.drinks().all()));
            ok
        }
        DrinkCommand::Add { recipe } => {
            let input = drink_input(recipe).await?;
            bar.create_drink(&input).await.is_some()
        }
        DrinkCommand::Update { id, recipe } => {
            let input = drink_input(recipe).await?;
            bar.update_drink(&DrinkId::from(id.as_str()), &input)
                .await
                .is_some()
        }
        DrinkCommand::Delete { id } => bar.delete_drink(&DrinkId::from(id.as_str())).await,
    })
}

async fn shortages(bar: &mut CliBar, command: ShortageCommand) -> bool {
    match command {
        ShortageCommand::List => {
            let ok = bar.load_shortages().await;
            print!("{}", render::shortages(bar.shortages().all()));
            ok
        }
        ShortageCommand::Add {
            name,
            quantity,
            unit,
        } => bar.add_shortage_with(&name, quantity, &unit).await.is_some(),
        ShortageCommand::Delete { id } => {
            bar.delete_shortage(&ShortageId::from(id.as_str())).await
        }
    }
}

async fn drink_input(recipe: DrinkArgs) -> anyhow::Result<DrinkInput> {
    Ok(DrinkInput {
        name: recipe.name,
        instructions: recipe.instructions,
        ingredients: recipe.ingredients,
        image: read_image(recipe.image).await?,
    })
}

/// A missing `--image` is left for validation to report.
async fn read_image(path: Option<PathBuf>) -> anyhow::Result<Option<String>> {
    match path {
        Some(path) => Ok(Some(image::data_uri(&path).await?)),
        None => Ok(None),
    }
}

/// `NAME:QUANTITY:UNIT`. Missing or unparsable parts stay empty so the draft
/// rejects the item with the usual message.
fn parse_item(raw: &str) -> LineItemInput {
    let mut parts = raw.splitn(3, ':');
    let name = parts.next().unwrap_or_default().trim().to_string();
    let quantity = parts.next().and_then(|q| q.trim().parse().ok());
    let unit = parts.next().unwrap_or_default().trim().to_string();
    LineItemInput {
        name,
        quantity,
        unit,
    }
}
