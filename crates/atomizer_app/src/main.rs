use std::process::ExitCode;

use anyhow::Context;
use atomizer_app::cli::Cli;
use atomizer_app::{logging, render, render_exports, Controller, EffectRunner, RenderOptions};
use atomizer_core::SessionState;
use atomizer_engine::{AtomicFileWriter, EngineHandle};
use atomizer_logging::atom_info;
use clap::Parser;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logging::initialize(cli.log, cli.verbose);
    atom_info!("wikiatomizer {} starting", env!("CARGO_PKG_VERSION"));

    let engine = EngineHandle::new(cli.engine_config()).context("failed to start engine")?;
    let writer = AtomicFileWriter::new(cli.output_dir.clone());
    let mut controller = Controller::new(EffectRunner::new(engine, writer));

    controller.submit(&cli.url);
    if controller.session() == SessionState::Idle {
        eprintln!("Please enter a Wikipedia URL.");
        return Ok(ExitCode::from(2));
    }

    let view = controller.wait_until_settled();
    let options = RenderOptions {
        show_debug_log: !cli.hide_debug_log,
    };
    print!("{}", render(&view, options));

    if view.session != SessionState::Success {
        return Ok(ExitCode::FAILURE);
    }

    let outcomes = if cli.export_all {
        controller.export_all()
    } else {
        let mut outcomes = Vec::new();
        for position in cli.export_positions() {
            match controller.export(position) {
                Some(outcome) => outcomes.push(outcome),
                None => eprintln!("No notecard {} to export.", position + 1),
            }
        }
        outcomes
    };
    if !outcomes.is_empty() {
        println!();
        print!("{}", render_exports(&outcomes));
    }

    if outcomes.iter().any(|outcome| outcome.result.is_err()) {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
