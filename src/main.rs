mod cli;
mod config;
mod error;
mod output;
mod pseudonym;
mod readers;
mod types;
mod writers;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use types::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Clean {
            input,
            out,
            map,
            summary,
            summary_out,
        }) => cli::run_clean(&input, out, &map, summary, summary_out)?,
        None => match cli.input {
            Some(input) => {
                let input = config::resolve_input_path(&input);
                cli::interactive(&input)?;
            }
            None => {
                Cli::command().print_help()?;
                println!();
            }
        },
    }

    Ok(())
}
