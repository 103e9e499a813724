use anyhow::Result;
use clap::Parser;
use snake::app::App;
use snake::game::GameConfig;

#[derive(Parser)]
#[command(name = "snake")]
#[command(version, about = "Snake on a toroidal grid, in the terminal")]
struct Cli {
    /// Start with self-collision checks disabled (debug aid)
    #[arg(long)]
    godmode: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config = GameConfig {
        godmode: cli.godmode,
        ..Default::default()
    };

    App::new(config)?.run().await
}
