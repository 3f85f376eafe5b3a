mod script;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use trilab_input::InputSnapshot;
use trilab_kernel::{FrameController, FrameInput, RotateController, TintController};
use trilab_render::{DebugTextRenderer, FrameDraw, RenderView, Renderer};
use trilab_tools::{SceneInspector, SceneSummary, notice_text};

#[derive(Parser)]
#[command(name = "trilab-cli", about = "Headless tool for the triangle exercises")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ExerciseKind {
    Rotate,
    Tint,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Parse a vertex file and print its corners
    CheckVertices {
        /// Vertex file, one `x,y,z` per line
        path: PathBuf,
    },
    /// Step an exercise through scripted input and print the final frame
    Simulate {
        #[arg(short, long, value_enum, default_value = "rotate")]
        exercise: ExerciseKind,
        /// Vertex file for the tint exercise
        #[arg(long, default_value = "triangle.txt")]
        vertices: PathBuf,
        /// Steps such as `w*3 rd@10:0 v esc` (see `ScriptStep`)
        #[arg(short, long, default_value = "")]
        script: String,
        /// Viewport width and height used for the projection
        #[arg(long, default_value = "800x600", value_parser = parse_viewport)]
        viewport: (u32, u32),
    },
}

fn parse_viewport(text: &str) -> Result<(u32, u32), String> {
    let (w, h) = text
        .split_once('x')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {text:?}"))?;
    let w = w.parse::<u32>().map_err(|e| format!("bad width: {e}"))?;
    let h = h.parse::<u32>().map_err(|e| format!("bad height: {e}"))?;
    Ok((w, h))
}

fn simulate(
    mut controller: Box<dyn FrameController>,
    script: &str,
    viewport: (u32, u32),
) -> anyhow::Result<SceneSummary> {
    let steps = script::parse_script(script)?;
    tracing::debug!(exercise = controller.name(), steps = steps.len(), "script parsed");
    let mut snapshot = InputSnapshot::new();

    for notice in controller.load(snapshot.cursor()) {
        println!("{}", notice_text(notice));
    }

    'run: for step in &steps {
        for _ in 0..step.repeat {
            step.apply(&mut snapshot);
            let input = FrameInput::sample(&snapshot, controller.bindings());
            let report = controller.step(&input);
            for notice in report.notices {
                println!("{}", notice_text(notice));
            }
            if report.exit {
                tracing::debug!(ticks = controller.ticks(), "script quit");
                break 'run;
            }
        }
    }

    let summary = SceneInspector::summary(controller.as_ref());
    println!("{summary}");
    let aspect = RenderView::aspect_of(viewport.0, viewport.1);
    let frame = FrameDraw::compose(controller.as_ref(), aspect)?;
    print!("{}", DebugTextRenderer::new().render(&frame));
    Ok(summary)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("trilab-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("kernel: ticks={}", RotateController::new().ticks());
            println!("input: {}", trilab_input::crate_info());
            println!("assets: {}", trilab_assets::crate_info());
            println!("render: {}", trilab_render::crate_info());
            println!("tools: {}", trilab_tools::crate_info());
        }
        Commands::CheckVertices { path } => {
            let triangle = trilab_assets::load_triangle(&path)?;
            println!("{}: ok", path.display());
            for (i, v) in triangle.vertices.iter().enumerate() {
                println!("  v{i} = ({}, {}, {})", v.x, v.y, v.z);
            }
        }
        Commands::Simulate {
            exercise,
            vertices,
            script,
            viewport,
        } => {
            let controller: Box<dyn FrameController> = match exercise {
                ExerciseKind::Rotate => Box::new(RotateController::new()),
                ExerciseKind::Tint => Box::new(TintController::new(
                    trilab_assets::load_triangle_or_absent(&vertices),
                )),
            };
            simulate(controller, &script, viewport)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use trilab_common::Triangle;

    #[test]
    fn viewport_parses() {
        assert_eq!(parse_viewport("800x600").unwrap(), (800, 600));
        assert!(parse_viewport("800").is_err());
        assert!(parse_viewport("wide x600").is_err());
    }

    #[test]
    fn simulate_stops_at_quit() {
        let rotate = Box::new(RotateController::new());
        let summary = simulate(rotate, "w*2 esc w*10", (800, 600)).unwrap();
        assert_eq!(summary.ticks, 2);
        assert_eq!(summary.distance, 260.0);
        assert!(summary.finished);
    }

    #[test]
    fn simulate_without_geometry_fails() {
        let tint = Box::new(TintController::new(None));
        let err = simulate(tint, "r*5", (800, 600)).unwrap_err();
        assert!(err.to_string().contains("no triangle geometry"));
    }

    #[test]
    fn simulate_tint_runs_script() {
        let tint = Box::new(TintController::new(Some(Triangle::default())));
        let summary = simulate(tint, "g*10 v x m -*2 m", (640, 480)).unwrap();
        assert_eq!(summary.ticks, 16);
        assert_eq!(summary.target, Some(trilab_common::Rgb::GREEN));
        // Reset snapped to white, then four ticks of drift toward green.
        let current = summary.current.unwrap();
        assert_eq!(current.g, 1.0);
        assert!(current.r < 1.0);
    }

    #[test]
    fn simulate_rejects_bad_script() {
        let rotate = Box::new(RotateController::new());
        assert!(simulate(rotate, "w*x", (800, 600)).is_err());
    }
}
