fn main() {
    use include_graph::app::{init_logging, run_cli};
    use include_graph::cli::parse;
    let cli = parse();
    init_logging(cli.quiet, cli.verbose);
    let code = run_cli(cli);
    if code != 0 { std::process::exit(code); }
}
