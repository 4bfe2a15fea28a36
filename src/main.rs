use clap::Parser;
use records_service::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    // No subcommand: show help and exit cleanly
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    match runtime.block_on(commands::run(args)) {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

fn show_help_and_commands() {
    println!("Records Service - time-indexed MongoDB records");
    println!("===============================================");
    println!();
    println!("USAGE:");
    println!("    records-service <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    serve    Run the read-only HTTP API (/check, /get, /getexample, /getall)");
    println!("    load     Bulk-import a Parquet file and index it by timestamp");
    println!("    help     Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Import results.parquet into ESA.results:");
    println!("    records-service load --input results.parquet");
    println!();
    println!("    # Serve on port 8000 against a local MongoDB:");
    println!("    records-service serve --mongo-uri mongodb://localhost:27017/ --port 8000");
    println!();
    println!("Settings can also come from RECORDS_MONGO_URI, RECORDS_DATABASE,");
    println!("RECORDS_COLLECTION, RECORDS_HOST, RECORDS_PORT and RECORDS_INPUT.");
}
