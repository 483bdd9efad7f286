use clap::Parser;

fn main() {
    let cli = querycraft_core::runtime::Cli::parse();

    if let Err(error) = querycraft_core::runtime::run(cli) {
        eprintln!("[querycraft] {error}");
        std::process::exit(error.exit_code());
    }
}
