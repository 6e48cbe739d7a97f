//! SPIR-V shader generator CLI.

use spvsc::{init_tracing, parse_generate_options, run_generate};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        "generate" => {
            let options = match parse_generate_options(&args[2..]) {
                Ok(options) => options,
                Err(err) => {
                    eprintln!("error: {err}");
                    eprintln!();
                    print_generate_usage();
                    std::process::exit(1);
                }
            };
            init_tracing(options.verbose);

            match run_generate(&options) {
                Ok(summary) => {
                    println!(
                        "{} written, {} over budget, {} failed",
                        summary.written, summary.over_budget, summary.failed
                    );
                    if summary.failed > 0 {
                        std::process::exit(1);
                    }
                }
                Err(err) => {
                    eprintln!("error: {err}");
                    std::process::exit(1);
                }
            }
        }
        "help" | "--help" | "-h" => print_usage(),
        "--version" | "-V" => println!("spvsc {}", env!("CARGO_PKG_VERSION")),
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("spvsc - random SPIR-V compute shader generator");
    println!();
    println!("Usage: spvsc <command> [options]");
    println!();
    println!("Commands:");
    println!("  generate    Generate shaders, one per seed");
    println!("  help        Show this message");
    println!();
    print_generate_usage();
}

fn print_generate_usage() {
    println!("Usage: spvsc generate [options]");
    println!();
    println!("Options:");
    println!("  --seed <n>        First seed (default: 0)");
    println!("  --count <n>       Number of shaders (default: 1)");
    println!("  --config <file>   JSON generator configuration");
    println!("  -o, --out <dir>   Output directory (default: .)");
    println!("  -v, --verbose     Tree-formatted debug logging");
}
