//! String Hover CLI

use hover_cli::{init_tracing, parse_args, run, CliError, Command, USAGE};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let invocation = match parse_args(&args) {
        Ok(Command::Help) => {
            println!("{USAGE}");
            return;
        }
        Ok(Command::Hover(invocation)) => invocation,
        Err(err) => fail(&err),
    };

    match run(&invocation) {
        Ok(Some(value)) => println!("{value}"),
        Ok(None) => std::process::exit(1),
        Err(err) => fail(&err),
    }
}

fn fail(err: &CliError) -> ! {
    eprintln!("error: {err}");
    if err.is_usage() {
        eprintln!();
        eprintln!("{USAGE}");
    }
    std::process::exit(CliError::EXIT_CODE);
}
