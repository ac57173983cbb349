use std::env::args_os;
use std::process;

use bmp2mif::{convert_bmp_to_mif, CLIParser};

fn main() {
    let mut cli_parser = CLIParser::default();
    let arguments = cli_parser.parse(args_os());
    match convert_bmp_to_mif(&arguments) {
        Ok(_) => println!("Conversion successful"),
        Err(e) => {
            eprintln!("Conversion failed because of: {}", e);
            process::exit(1);
        }
    }
}
