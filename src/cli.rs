use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod commands;

use commands::serve;

#[derive(Parser)]
#[command(name = "storepulse")]
#[command(about = "Store sales analytics API with CLI tools and web server")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    ///
    /// Loads both CSV sources before binding the listener; a missing
    /// source file aborts startup with a descriptive error.
    Serve {
        /// Directory containing train.csv and store.csv
        #[arg(short, long, env = "STOREPULSE_DATA_DIR", default_value = "DataSet")]
        data_dir: String,

        /// Address to bind the HTTP listener to
        #[arg(short, long, env = "BIND_ADDRESS", default_value = "0.0.0.0:3000")]
        bind_address: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve {
                data_dir,
                bind_address,
            } => {
                serve(&data_dir, &bind_address).await?;
            }
        }
        Ok(())
    }
}
