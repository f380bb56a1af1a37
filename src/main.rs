use clap::{Parser, Subcommand};
use sift_lang::cli::{self, CliError, EvalOptions};
use std::io::{self, Read};

#[derive(Parser)]
#[command(name = "sift")]
#[command(about = "Sift - evaluate filter expressions against JSON documents")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a filter expression
    Eval {
        /// The expression to evaluate, e.g. '@.price < 10 && @.name == "x"'
        expr: String,

        /// JSON input (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,
    },

    /// Print the postfix token order of an expression
    Postfix {
        /// The expression to convert
        expr: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Eval { expr, input } => run_eval(expr, input),
        Commands::Postfix { expr } => match cli::execute_postfix(&expr) {
            Ok(rendered) => {
                println!("{}", rendered);
                Ok(())
            }
            Err(e) => Err(e),
        },
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_eval(expr: String, input: Option<String>) -> Result<(), CliError> {
    let input = match input {
        Some(s) => Some(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map_err(CliError::Io)?;
            Some(buffer)
        }
        None => None,
    };

    let options = EvalOptions { expr, input };

    let value = cli::execute_eval(&options)?;
    println!("{}", value);

    Ok(())
}
