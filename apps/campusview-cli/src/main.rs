use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, ensure};
use campusview_camera::{CameraManipulator, ManipulatorConfig, OrbitManipulator, Recorder};
use campusview_common::{Viewpoint, format_triple, parse_triple};
use campusview_input::{GestureEvent, GestureTranslator};
use campusview_render::{DebugTextRenderer, ModelAsset, Renderer, Scene};
use campusview_screen::{ScreenConfig, ViewerScreen};
use campusview_tools::LookAtReadout;
use campusview_viewpoint::{PresetFile, Transition, ViewpointRegistry};
use clap::{Parser, Subcommand, ValueEnum};
use glam::Vec2;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "campusview-cli", about = "CLI tool for campusview viewpoints")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Preset file (YAML or JSON) to use instead of the built-in campus presets
    #[arg(long, global = true)]
    presets: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// List the preset viewpoints
    Presets {
        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: Format,
    },
    /// Sample a transition between two presets
    Transition {
        /// Starting preset key
        #[arg(long)]
        from: String,
        /// Destination preset key
        #[arg(long)]
        to: String,
        /// Transition length in milliseconds
        #[arg(short, long, default_value = "500")]
        duration_ms: u64,
        /// Number of intervals to sample
        #[arg(short, long, default_value = "5")]
        steps: u32,
    },
    /// Parse a comma-separated triple as the entry fields do
    Parse {
        /// Text such as "1.39, 0.3, 0.3"
        #[arg(allow_hyphen_values = true)]
        text: String,
    },
    /// Simulate a one-finger drag (and optional pinch) on a preset
    Drag {
        /// Preset to start from; defaults to the registry default
        #[arg(long)]
        preset: Option<String>,
        /// Drag start point "x,y" in view pixels
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true, default_value = "400,400")]
        start: Vec<f32>,
        /// Drag end point "x,y" in view pixels
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true, default_value = "500,400")]
        end: Vec<f32>,
        /// Number of drag updates
        #[arg(short, long, default_value = "4")]
        steps: u32,
        /// View height used to flip the vertical axis
        #[arg(long, default_value = "800")]
        height: f32,
        /// Cumulative pinch scales applied after the drag, e.g. "1.2,1.5"
        #[arg(long, value_delimiter = ',')]
        pinch: Vec<f32>,
        /// Print the final camera as a preset entry with this name
        #[arg(long)]
        emit_preset: Option<String>,
    },
    /// Describe the frame the viewer would render for a preset
    Render {
        /// Preset to render; defaults to the registry default
        #[arg(long)]
        preset: Option<String>,
        /// Model asset path
        #[arg(long, default_value = "assets/nwssu.glb")]
        model: String,
        #[arg(long, default_value = "1280")]
        width: u32,
        #[arg(long, default_value = "720")]
        height: u32,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Table,
    Yaml,
    Json,
}

fn load_registry(path: Option<&PathBuf>) -> anyhow::Result<ViewpointRegistry> {
    match path {
        Some(path) => ViewpointRegistry::load(path)
            .with_context(|| format!("loading presets from {}", path.display())),
        None => Ok(ViewpointRegistry::campus()),
    }
}

fn point(values: &[f32], name: &str) -> anyhow::Result<Vec2> {
    ensure!(values.len() == 2, "--{name} expects \"x,y\", got {} values", values.len());
    Ok(Vec2::new(values[0], values[1]))
}

fn print_viewpoint(prefix: &str, vp: &Viewpoint) {
    println!(
        "{prefix}eye=({}) target=({}) up=({})",
        format_triple(vp.eye),
        format_triple(vp.target),
        format_triple(vp.up)
    );
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let registry = load_registry(cli.presets.as_ref())?;

    match cli.command {
        Commands::Info => {
            println!("campusview-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("viewpoint: {}", campusview_viewpoint::crate_info());
            println!("render: {}", campusview_render::crate_info());
            println!("tools: {}", campusview_tools::crate_info());
            println!("screen: {}", campusview_screen::crate_info());
            println!(
                "presets: {} (default {})",
                registry.len(),
                registry.default_key()
            );
        }
        Commands::Presets { format } => match format {
            Format::Table => {
                for entry in registry.entries() {
                    let marker = if entry.key == registry.default_key() {
                        "*"
                    } else {
                        " "
                    };
                    println!("{marker} {:<10} {}", entry.key, entry.display_label());
                    print_viewpoint("    ", &entry.viewpoint);
                }
            }
            Format::Yaml => print!("{}", serde_yaml::to_string(&PresetFile::from(&registry))?),
            Format::Json => {
                println!("{}", serde_json::to_string_pretty(&PresetFile::from(&registry))?)
            }
        },
        Commands::Transition {
            from,
            to,
            duration_ms,
            steps,
        } => {
            let a = registry.lookup(&from)?;
            let b = registry.lookup(&to)?;
            let total = Duration::from_millis(duration_ms);
            let transition = Transition::begin(a, b, total);
            let steps = steps.max(1);

            println!("Transition {from} -> {to} over {duration_ms}ms");
            for i in 0..=steps {
                let elapsed = total.mul_f64(f64::from(i) / f64::from(steps));
                let vp = transition.sample(elapsed);
                print_viewpoint(&format!("t={:>5}ms ", elapsed.as_millis()), &vp);
            }
        }
        Commands::Parse { text } => {
            let v = parse_triple(&text)?;
            println!("{}", format_triple(v));
        }
        Commands::Drag {
            preset,
            start,
            end,
            steps,
            height,
            pinch,
            emit_preset,
        } => {
            let key = preset.unwrap_or_else(|| registry.default_key().to_string());
            let vp = registry.lookup(&key)?;
            let start = point(&start, "start")?;
            let end = point(&end, "end")?;
            let steps = steps.max(1);

            let mut manipulator =
                Recorder::new(OrbitManipulator::new(ManipulatorConfig::from_viewpoint(&vp)));
            let mut gestures = GestureTranslator::new(height);

            gestures.handle(
                GestureEvent::PanBegin {
                    x: start.x,
                    y: start.y,
                    pointers: 1,
                },
                Some(&mut manipulator),
            );
            for i in 1..=steps {
                let p = start.lerp(end, i as f32 / steps as f32);
                gestures.handle(
                    GestureEvent::PanUpdate {
                        x: p.x,
                        y: p.y,
                        pointers: 1,
                    },
                    Some(&mut manipulator),
                );
            }
            gestures.handle(GestureEvent::PanEnd, Some(&mut manipulator));

            if !pinch.is_empty() {
                let focal = end;
                gestures.handle(
                    GestureEvent::PinchBegin {
                        scale: 1.0,
                        focal_x: focal.x,
                        focal_y: focal.y,
                    },
                    Some(&mut manipulator),
                );
                for scale in pinch {
                    gestures.handle(
                        GestureEvent::PinchUpdate {
                            scale,
                            focal_x: focal.x,
                            focal_y: focal.y,
                        },
                        Some(&mut manipulator),
                    );
                }
                gestures.handle(GestureEvent::PinchEnd, Some(&mut manipulator));
            }

            println!("Drag on {key}: ({}, {}) -> ({}, {})", start.x, start.y, end.x, end.y);
            for call in manipulator.calls() {
                println!("  {call}");
            }
            let readout = LookAtReadout::from_look_at(manipulator.get_look_at());
            println!("{readout}");
            if let Some(name) = emit_preset {
                print!("{}", readout.to_preset_yaml(&name));
            }
        }
        Commands::Render {
            preset,
            model,
            width,
            height,
        } => {
            let config = ScreenConfig {
                default_key: preset,
                viewport: (width, height),
                ..ScreenConfig::default()
            };
            let mut screen = ViewerScreen::new(registry, Scene::new(ModelAsset::new(model)), config)?;
            screen.mount(OrbitManipulator::default());

            let renderer = DebugTextRenderer::new();
            print!("{}", renderer.render(screen.scene(), &screen.render_view()));
        }
    }

    Ok(())
}
