use crate::demo::{run_demo, DemoArgs};
use crate::infra::route_table;
use crate::server;
use caregivers::error::AppError;
use caregivers::navigation::{Resolution, RouteTable};
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Caregivers Platform",
    about = "Run and inspect the caregivers platform API from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Inspect the client navigation table
    Routes {
        #[command(subcommand)]
        command: RoutesCommand,
    },
    /// Seed the sample Astana marketplace in memory and print its listings
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum RoutesCommand {
    /// Print every path, route name, and view
    List(RoutesArgs),
    /// Resolve a browser location to the view it mounts
    Resolve(ResolveArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Load the sample marketplace before accepting requests
    #[arg(long)]
    pub(crate) seed: bool,
}

#[derive(Args, Debug, Default)]
struct RoutesArgs {
    /// History base to mount the table under (defaults to APP_BASE_PATH)
    #[arg(long)]
    base: Option<String>,
}

#[derive(Args, Debug)]
struct ResolveArgs {
    /// Location to resolve, e.g. /jobs?page=2
    path: String,
    #[command(flatten)]
    routes: RoutesArgs,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Routes {
            command: RoutesCommand::List(args),
        } => {
            let table = route_table(args.base)?;
            print_route_table(&table);
            Ok(())
        }
        Command::Routes {
            command: RoutesCommand::Resolve(args),
        } => {
            let table = route_table(args.routes.base)?;
            print_resolution(&table, &args.path);
            Ok(())
        }
        Command::Demo(args) => run_demo(args),
    }
}

fn print_route_table(table: &RouteTable) {
    println!("Navigation table (base {})", table.base());
    for entry in table.entries() {
        println!(
            "  {:<14} {:<13} {:<17} {}",
            entry.path,
            entry.name,
            entry.view.component(),
            table.href(entry.view)
        );
    }
}

fn print_resolution(table: &RouteTable, location: &str) {
    match table.resolve(location) {
        Resolution::Matched(entry) => println!(
            "{location} -> {} (route '{}', path {})",
            entry.view.component(),
            entry.name,
            entry.path
        ),
        Resolution::NotFound { path } => println!("{location} -> not found ({path})"),
    }
}
