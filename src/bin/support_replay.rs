//! Support Replay
//!
//! Replays a JSON scene of support calls and prints what each call returned
//! and which images it emitted.
//!
//! Usage:
//!   support-replay <scene.json> [--config view.json] [--trace out.bin] [--json]
//!
//! `--trace` writes every recorded image as a packed 48-byte record.
//! `--json` prints the full report as JSON instead of the text summary.

use std::process::ExitCode;

use ride_supports_engine::paint::pack_trace;
use ride_supports_engine::scene::CallResult;
use ride_supports_engine::{Scene, SceneReport, SupportError, ViewConfig, replay_scene};

struct Args {
    scene: String,
    config: Option<String>,
    trace: Option<String>,
    json: bool,
}

fn usage() {
    println!("Usage: support-replay <scene.json> [--config view.json] [--trace out.bin] [--json]");
}

fn parse_args() -> Option<Args> {
    let mut scene = None;
    let mut config = None;
    let mut trace = None;
    let mut json = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => config = Some(args.next()?),
            "--trace" => trace = Some(args.next()?),
            "--json" => json = true,
            "-h" | "--help" => return None,
            _ if arg.starts_with("--") => {
                eprintln!("Unknown option: {arg}");
                return None;
            }
            _ => scene = Some(arg),
        }
    }

    Some(Args {
        scene: scene?,
        config,
        trace,
        json,
    })
}

fn print_summary(report: &SceneReport) {
    for call in &report.calls {
        let result = match call.result {
            CallResult::Outcome(outcome) if outcome.underground => "underground".to_string(),
            CallResult::Outcome(outcome) => format!("drawn={}", outcome.drawn),
            CallResult::Flag(flag) => format!("returned {flag}"),
            CallResult::Painted(Some(handle)) => format!("painted #{}", handle.0),
            CallResult::Painted(None) => "paint structs exhausted".to_string(),
            CallResult::Updated => "ok".to_string(),
        };
        println!(
            "[Tile {}] {:<34} {:<24} {} images",
            call.tile, call.op, result, call.image_count
        );
        for image in report.images_of(call) {
            println!(
                "    image {:>6} (flags {:#010x}) at {:?} box {:?}+{:?}",
                image.image.index(),
                image.image.flags(),
                image.offset.to_array(),
                image.bound_box.offset.to_array(),
                image.bound_box.length.to_array(),
            );
        }
    }
    println!(
        "[Replay] {} calls, {} images",
        report.calls.len(),
        report.images.len()
    );
}

fn run(args: &Args) -> Result<(), SupportError> {
    let config = match &args.config {
        Some(path) => ViewConfig::load(path)?,
        None => ViewConfig::default(),
    };
    let scene = Scene::load(&args.scene)?;
    let report = replay_scene(&scene, &config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }

    if let Some(path) = &args.trace {
        let bytes = pack_trace(&report.images);
        std::fs::write(path, &bytes)?;
        if !args.json {
            println!("[Replay] Wrote {} bytes of trace to {path}", bytes.len());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let Some(args) = parse_args() else {
        usage();
        return ExitCode::FAILURE;
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
