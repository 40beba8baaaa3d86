//! # Fatal Error Log Triage CLI
//!

mod report;

use fel_parser::logging;
use fel_parser::pipeline;
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_global_logging()?;

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage(&args[0]);
        std::process::exit(1);
    }

    if args[1] == "--help" || args[1] == "-h" {
        print_help(&args[0]);
        return Ok(());
    }

    let mut json_output = false;
    let mut input: Option<&str> = None;
    for arg in &args[1..] {
        match arg.as_str() {
            "--json" => json_output = true,
            other => input = Some(other),
        }
    }

    let input = match input {
        Some(path) => path,
        None => {
            print_usage(&args[0]);
            std::process::exit(1);
        }
    };

    let input_path = Path::new(input);
    if !input_path.is_file() {
        eprintln!("Error: input must be a crash log file");
        eprintln!("  Path: {}", input_path.display());
        std::process::exit(1);
    }

    let result = match pipeline::process_file(input) {
        Ok(result) => result,
        Err(error) => {
            eprintln!("Error: {}", error);
            std::process::exit(2);
        }
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report::render_json(&result))?);
    } else {
        print!("{}", report::render(&result));
    }

    Ok(())
}

fn print_usage(program_name: &str) {
    eprintln!("Usage: {} <hs_err_pid.log> [--json]", program_name);
    eprintln!("       {} --help", program_name);
}

fn print_help(program_name: &str) {
    println!("Fatal Error Log Triage v{}", env!("CARGO_PKG_VERSION"));
    println!("Parses a JVM fatal error log and reports likely causes\n");
    println!("USAGE:");
    println!(
        "    {} <hs_err_pid.log>          Triage one crash log",
        program_name
    );
    println!(
        "    {} <hs_err_pid.log> --json   Machine-readable output",
        program_name
    );
    println!(
        "    {} --help                    Show this help message\n",
        program_name
    );
    println!("OUTPUT:");
    println!("    Crash summary (version, vendor, OS, signal, crash frame)");
    println!("    Memory and heap tables with usage percentages");
    println!("    Leading stack frames");
    println!("    Findings grouped by severity: error, warning, info\n");
    println!("EXAMPLES:");
    println!("    {} hs_err_pid12345.log", program_name);
    println!("    {} /var/crash/hs_err_pid9.log --json", program_name);
}
