#![deny(unsafe_code)]
//! CLI binary for the metaballs renderer.
//!
//! Subcommands:
//! - `render`: run the demo scene for N frames, write a PNG or SVG snapshot
//! - `scene`: print the demo scene (with overrides) and its parameter schema

mod error;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use error::CliError;
use glam::DVec2;
use log::info;
use metaballs_core::{Bounds, Metaverse, Rgba, Scene, Surface};
use metaballs_render::{
    snapshot, FpsCounter, FrameDriver, FrameInput, FrameReport, RasterSurface, SvgSurface,
};

#[derive(Parser)]
#[command(name = "metaballs", about = "Animated metaball contour renderer")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the demo scene for N frames and write the last one.
    Render {
        /// Canvas width in pixels.
        #[arg(short = 'W', long, default_value_t = 500)]
        width: usize,

        /// Canvas height in pixels.
        #[arg(short = 'H', long, default_value_t = 500)]
        height: usize,

        /// Number of frames to simulate.
        #[arg(short, long, default_value_t = 60)]
        frames: usize,

        /// Milliseconds per frame.
        #[arg(long, default_value_t = 16.0)]
        dt: f64,

        /// Scene overrides as a JSON string (gap, gravity_x, gravity_y, steering).
        #[arg(long, default_value = "{}")]
        params: String,

        /// Pointer position "x,y" applied to the steerable source every frame.
        #[arg(long)]
        pointer: Option<String>,

        /// Draw every grid sample as a green (inside) or blue (outside) dot.
        #[arg(long)]
        points: bool,

        /// Output file path; the extension selects PNG or SVG.
        #[arg(short, long, default_value = "metaballs.png")]
        output: PathBuf,
    },
    /// Print the demo scene and the parameter schema.
    Scene {
        /// Scene overrides as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Png,
    Svg,
}

fn output_format(path: &Path) -> Result<OutputFormat, CliError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => Ok(OutputFormat::Png),
        Some("svg") => Ok(OutputFormat::Svg),
        _ => Err(CliError::OutputFormat(path.to_path_buf())),
    }
}

fn parse_pointer(text: &str) -> Result<DVec2, CliError> {
    let bad = || CliError::Pointer(text.to_string());
    let (x, y) = text.split_once(',').ok_or_else(bad)?;
    let x: f64 = x.trim().parse().map_err(|_| bad())?;
    let y: f64 = y.trim().parse().map_err(|_| bad())?;
    Ok(DVec2::new(x, y))
}

fn parse_params(text: &str) -> Result<serde_json::Value, CliError> {
    serde_json::from_str(text).map_err(CliError::Params)
}

fn run_frames(
    driver: &mut FrameDriver<FpsCounter>,
    frames: usize,
    input: FrameInput,
    surface: &mut dyn Surface,
) -> Result<Option<FrameReport>, CliError> {
    let mut last = None;
    for _ in 0..frames {
        last = Some(driver.frame(input, surface)?);
    }
    Ok(last)
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Scene { params } => {
            let scene = Scene::demo().with_params(&parse_params(&params)?);
            scene.validate()?;
            let info = serde_json::json!({
                "scene": scene,
                "schema": Metaverse::param_schema(),
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        Command::Render {
            width,
            height,
            frames,
            dt,
            params,
            pointer,
            points,
            output,
        } => {
            let params = parse_params(&params)?;
            let pointer = pointer.as_deref().map(parse_pointer).transpose()?;
            let format = output_format(&output)?;

            let mut scene = Scene::demo().with_params(&params);
            scene.width = width as f64;
            scene.height = height as f64;
            let metaverse = scene.build()?;

            let mut driver =
                FrameDriver::with_metrics(metaverse, FpsCounter::default()).with_points(points);
            let input = FrameInput {
                dt_ms: dt,
                pointer,
            };

            let last = match format {
                OutputFormat::Png => {
                    let mut surface =
                        RasterSurface::new(width, height)?.with_background(Rgba::WHITE);
                    let last = run_frames(&mut driver, frames, input, &mut surface)?;
                    snapshot::write_png(&surface, &output)?;
                    last
                }
                OutputFormat::Svg => {
                    let mut surface = SvgSurface::new(Bounds::new(width as f64, height as f64)?);
                    let last = run_frames(&mut driver, frames, input, &mut surface)?;
                    surface.save(&output)?;
                    last
                }
            };
            info!("simulated {} ms over {frames} frames", driver.clock_ms());

            if cli.json {
                let info = serde_json::json!({
                    "width": width,
                    "height": height,
                    "frames": frames,
                    "dt": dt,
                    "params": driver.metaverse().params(),
                    "last_frame": last,
                    "fps": driver.metrics().fps(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                let segments = last.map(|r| r.segments).unwrap_or(0);
                eprintln!(
                    "rendered {frames} frames ({width}x{height}, dt {dt}ms, {segments} segments) -> {}",
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use metaballs_core::MetaballError;

    fn render_to(output: &Path, extra: &[&str]) -> Result<(), CliError> {
        let mut args = vec!["metaballs", "render", "--frames", "3"];
        args.extend_from_slice(extra);
        args.extend_from_slice(&["-o", output.to_str().unwrap()]);
        run(Cli::parse_from(args))
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_pointer_accepts_pairs() {
        assert_eq!(parse_pointer("12.5, 40").ok(), Some(DVec2::new(12.5, 40.0)));
    }

    #[test]
    fn render_writes_svg_contour() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("frame.svg");
        render_to(&output, &["--params", r#"{"gap": 5}"#, "--pointer", "250,250"]).unwrap();
        let text = std::fs::read_to_string(&output).unwrap();
        assert!(text.contains("<path"));
    }

    #[test]
    fn render_writes_png_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("frame.PNG");
        render_to(&output, &[]).unwrap();
        assert!(output.exists());
    }

    #[test]
    fn malformed_params_fail_before_rendering() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("frame.svg");
        let err = render_to(&output, &["--params", "{gap"]).unwrap_err();
        assert!(matches!(err, CliError::Params(_)));
        assert_eq!(err.exit_code(), 12);
        assert!(!output.exists());
    }

    #[test]
    fn pointer_without_comma_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = render_to(&dir.path().join("f.svg"), &["--pointer", "12"]).unwrap_err();
        assert!(matches!(&err, CliError::Pointer(text) if text == "12"));
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn pointer_with_non_numbers_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = render_to(&dir.path().join("f.svg"), &["--pointer", "a,b"]).unwrap_err();
        assert!(matches!(err, CliError::Pointer(_)));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("frame.gif");
        let err = render_to(&output, &[]).unwrap_err();
        assert!(matches!(&err, CliError::OutputFormat(p) if *p == output));
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn zero_gap_is_a_simulation_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = render_to(&dir.path().join("f.svg"), &["--params", r#"{"gap": 0}"#])
            .unwrap_err();
        assert!(matches!(err, CliError::Simulation(MetaballError::InvalidGrid { .. })));
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn steering_index_past_the_end_is_a_simulation_error() {
        let err = run(Cli::parse_from(["metaballs", "scene", "--params", r#"{"steering": 8}"#]))
            .unwrap_err();
        assert!(matches!(
            err,
            CliError::Simulation(MetaballError::SteeringOutOfRange { index: 8, len: 8 })
        ));
    }

    #[test]
    fn unwritable_output_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("missing").join("frame.svg");
        let err = render_to(&output, &[]).unwrap_err();
        assert!(matches!(err, CliError::Io(_)));
        assert_eq!(err.exit_code(), 11);
    }
}
