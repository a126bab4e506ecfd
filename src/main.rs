use std::error::Error;

use clap::Parser;
use simple_logger::SimpleLogger;

use nyc_airbnb_explorer::config::Cli;
use nyc_airbnb_explorer::controls::{Controls, SelectionApplier};
use nyc_airbnb_explorer::csv_reader::read_data;
use nyc_airbnb_explorer::dashboard::Dashboard;
use nyc_airbnb_explorer::fetch::ensure_dataset;

mod ui;

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    SimpleLogger::new().with_level(cli.log_level).init()?;

    ensure_dataset(&cli.data, &cli.url)?;
    let dataset = read_data(&cli.data, &cli.country)?;
    let dashboard = Dashboard::new(&dataset)?;
    let selection = cli.selection(&dashboard)?;

    if cli.json {
        let update = dashboard.update(&selection)?;
        println!("{}", serde_json::to_string_pretty(&update)?);
        return Ok(());
    }

    let controls = Controls::new(&dashboard, selection)?;
    ui::run(controls)
}
