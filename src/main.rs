//! ouroboros entry point.
//! Parses the command line, sets up logging and maps errors to the exit code.

use ouroboros::{
    cli::{get_args, run, Commands},
    error::default_error_handler,
    logger::init_logger,
};

fn main() {
    let cli = get_args();

    let result = match cli.command {
        Commands::Dotnet(args) => {
            init_logger(args.verbose);
            run(args)
        }
    };

    if let Err(err) = result {
        default_error_handler(err);
    }
}
