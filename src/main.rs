// buglang: parser and pretty-printer for the BL robot instruction language

mod parser;
mod printer;

use std::fs;
use std::path::Path;

use parser::parse::Parser;
use printer::Printer;

fn main() {
    // Parse command-line arguments
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        let program_name = args.get(0).map(|s| s.as_str()).unwrap_or("buglang");
        eprintln!("Error: No input file provided");
        eprintln!();
        eprintln!("Usage: {} <file.bl>", program_name);
        eprintln!();
        eprintln!("Parses a BL program and writes the formatted source to stdout.");
        eprintln!();
        eprintln!("Example:");
        eprintln!("  {} demos/guard.bl", program_name);
        std::process::exit(1);
    }

    let input_file = &args[1];

    if !Path::new(input_file).exists() {
        eprintln!("Error: File '{}' not found", input_file);
        eprintln!(
            "Usage: {} <file.bl>",
            args.get(0).map(|s| s.as_str()).unwrap_or("buglang")
        );
        std::process::exit(1);
    }

    // Read source code
    let source = match fs::read_to_string(input_file) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: Failed to read '{}': {}", input_file, e);
            std::process::exit(1);
        }
    };

    // Parse the source code
    let mut parser = match Parser::new(&source) {
        Ok(parser) => parser,
        Err(e) => {
            eprintln!("{}: {}", input_file, e);
            std::process::exit(1);
        }
    };

    let mut program = match parser.parse_program() {
        Ok(program) => program,
        Err(e) => {
            eprintln!("{}: {}", input_file, e);
            std::process::exit(1);
        }
    };

    eprintln!(
        "Parsed program '{}' with {} user instruction{}.",
        program.name,
        program.context.len(),
        if program.context.len() == 1 { "" } else { "s" }
    );

    // Regenerate formatted source
    print!("{}", Printer::new().print_program(&mut program));
}
