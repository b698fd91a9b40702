mod ascii;
mod config;
mod script;

use clap::Parser;
use std::error::Error;
use std::fs::File;
use std::path::PathBuf;

use strata_edit::EditEngine;
use strata_session::Session;

#[derive(Parser, Debug)]
#[command(name = "strata", version, about = "Layered voxel grid editor: scripted replay with text frames")]
struct Cli {
    /// Editor config (TOML). Built-in defaults when omitted.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Tick script (TOML) to replay.
    #[arg(long, value_name = "PATH")]
    script: Option<PathBuf>,
    /// Also write debug-level logs to this file.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
    /// Print the frame every N ticks (0 prints only the final frame).
    #[arg(long, default_value_t = 0)]
    frame_every: u64,
    /// Only warnings and errors on the terminal.
    #[arg(long)]
    quiet: bool,
}

fn init_logging(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let default_level = if cli.quiet { "warn" } else { "info" };
    match &cli.log_file {
        Some(path) => {
            use simplelog::{
                ColorChoice, CombinedLogger, Config, LevelFilter, TermLogger, TerminalMode,
                WriteLogger,
            };
            let term_level = if cli.quiet {
                LevelFilter::Warn
            } else {
                LevelFilter::Info
            };
            CombinedLogger::init(vec![
                TermLogger::new(
                    term_level,
                    Config::default(),
                    TerminalMode::Mixed,
                    ColorChoice::Auto,
                ),
                WriteLogger::new(LevelFilter::Debug, Config::default(), File::create(path)?),
            ])?;
        }
        None => {
            env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(default_level),
            )
            .format_timestamp_millis()
            .init();
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let cfg = match &cli.config {
        Some(p) => config::load_from_path(p)?,
        None => config::EditorConfig::default(),
    };
    let grid = cfg.make_grid();
    log::info!(
        "grid {}x{}x{} min_z={} camera {}..={} commit={:?}",
        grid.width(),
        grid.height(),
        grid.depth(),
        grid.min_z(),
        cfg.camera.min,
        cfg.camera.max,
        cfg.input.commit
    );
    let mut session = Session::new(
        grid,
        &cfg.cursor_config(),
        EditEngine::with_brush(cfg.brush()),
        cfg.commit_trigger(),
    );
    if !cfg.cursor.center {
        session.warp_cursor(0, 0);
    }

    if let Some(p) = &cli.script {
        let script = script::load_from_path(p)?;
        log::info!(
            "replaying {} ({} setup ops, {} ticks)",
            p.display(),
            script.setup.len(),
            script.total_ticks()
        );
        script.apply_setup(&mut session);
        let every = cli.frame_every;
        let summary = script.run(&mut session, |s, report| {
            if every > 0 && (report.tick + 1) % every == 0 {
                println!("tick {}", report.tick);
                print!("{}", ascii::render_session(s));
            }
        });
        let stats = session.engine().stats();
        log::info!(
            "done: ticks={} changed={} commits={} cancels={} paints={} deletes={} unchanged={}",
            summary.ticks,
            summary.cells_changed,
            summary.commits,
            summary.cancels,
            stats.paints,
            stats.deletes,
            stats.unchanged
        );
    }

    print!("{}", ascii::render_session(&session));
    let gs = session.grid().stats();
    log::info!(
        "grid occupied={} solid={} fluid={} checksum={:016x}",
        gs.occupied(),
        gs.solid,
        gs.fluid,
        session.grid().checksum()
    );
    Ok(())
}
