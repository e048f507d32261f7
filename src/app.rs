use crate::cli::{Cli, Commands, ScanArgs};
use crate::errors::ScanError;
use crate::graph::DependencyGraph;
use crate::report;
use crate::utils::{anchor, config};
use crate::visualization::{DotGenerator, DotOptions};
use clap::CommandFactory;
use clap_complete::generate;
use std::io;

/// Install the stderr logger. `RUST_LOG` wins over the default level.
pub fn init_logging(quiet: bool, verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if quiet {
        builder.filter_level(log::LevelFilter::Error);
    } else if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    // A second init (e.g. from tests) is harmless.
    let _ = builder.target(env_logger::Target::Stderr).try_init();
}

/// Run the CLI logic in-process.
///
/// Returns an exit code (0 = success).
#[must_use]
pub fn run_cli(cli: Cli) -> i32 {
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let bin_name = cmd.get_name().to_string();
            generate(shell, &mut cmd, bin_name, &mut io::stdout());
            0
        }
        None => match run_scan(&cli.scan, cli.quiet) {
            Ok(()) => 0,
            Err(e) => {
                eprintln!("Scan failed: {e}");
                1
            }
        },
    }
}

/// Build the effective configuration: defaults, then the config file, then flags.
///
/// # Errors
/// Returns `ScanError::Config` if an explicit or discovered config file is invalid.
pub fn resolve_config(args: &ScanArgs) -> Result<config::ScanConfig, ScanError> {
    let base_root = args.root.clone().unwrap_or_else(anchor::detect);
    let file = match &args.config {
        Some(p) => Some(config::load_config_at(p)?),
        None => config::load_config_near(&base_root)?,
    };

    let mut cfg = config::ScanConfig::with_root(base_root);
    if let Some(file) = file {
        cfg = cfg.merge_file(file);
    }
    if let Some(root) = &args.root {
        cfg.root.clone_from(root);
    }
    if let Some(output) = &args.output {
        cfg.output.clone_from(output);
    }
    if let Some(mode) = args.mode {
        cfg.mode = mode;
    }
    if let Some(policy) = args.on_malformed {
        cfg.on_malformed = policy;
    }
    if args.dedup_nodes {
        cfg.dedup_nodes = true;
    }
    if args.no_wait {
        cfg.wait_for_ack = false;
    }
    Ok(cfg)
}

/// # Errors
/// Returns the first `ScanError` hit while scanning or writing output.
pub fn run_scan(args: &ScanArgs, quiet: bool) -> Result<(), ScanError> {
    let cfg = resolve_config(args)?;
    if !quiet {
        println!("{}", cfg.root.display());
    }

    let graph = DependencyGraph::build_with(&cfg, |name| {
        if !quiet {
            println!("{name}");
        }
    })?;

    report::save_graph_text(&graph, &cfg.output)?;
    log::info!("Wrote {}", cfg.output.display());

    if let Some(json_path) = &args.json {
        graph.save_json(json_path)?;
    }
    if let Some(dot_path) = &args.dot {
        let opts = DotOptions { rankdir: args.dot_rankdir.unwrap_or_default(), ..DotOptions::default() };
        DotGenerator::new().write_dot(&graph, opts, dot_path)?;
    }

    if !quiet {
        for line in report::summary_lines(&graph.counts) {
            println!("{line}");
        }
    }

    if cfg.wait_for_ack {
        let stdin = io::stdin();
        if let Err(e) = report::wait_for_ack(&mut stdin.lock()) {
            log::warn!("Failed to read acknowledgement: {e}");
        }
    }
    Ok(())
}
