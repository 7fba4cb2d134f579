mod cli;
mod cluster;
mod config;
mod consts;
mod dispatch;
mod pipeline;
mod resolve;

use self::cli::Cli;

fn main() {
    match Cli::default().run() {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}
