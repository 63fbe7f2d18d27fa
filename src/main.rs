use anyhow::Context;
use clap::Parser;
use glpaint::cli::CliArgs;
use glpaint::{init_logging, BUILD_DATE, VERSION};
use glpaint_settings::{default_config_path, RenderConfig};
use glpaint_visualizer::items::grid::DEFAULT_GRID_COLOR;
use glpaint_visualizer::items::star::DEFAULT_STAR_COLOR;
use glpaint_visualizer::{
    Drawable, GcodePath, GcodeSource, HostBuffer, Item, ItemSpec, ReplayStart, Scene,
};
use std::path::Path;
use tracing::{info, warn};

/// Grid spacing drawn under the toolpath
const GRID_UNIT: f64 = 10.0;

fn main() -> anyhow::Result<()> {
    init_logging()?;
    let args = CliArgs::parse();
    info!("glpaint {} (built {})", VERSION, BUILD_DATE);

    let mut config = load_config(args.config.as_deref())?;
    if args.no_arcs {
        config.path.fractionize_arcs = false;
    }

    let program = std::fs::read_to_string(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;

    let mut scene = Scene::new(config);
    let toolpath = scene.create(
        "toolpath",
        ItemSpec::GcodePath {
            source: GcodeSource::Text(program),
            start: ReplayStart::new(args.start),
        },
    )?;
    scene.create("origin", ItemSpec::CoordSystem)?;
    scene.add_marker("start", args.start, DEFAULT_STAR_COLOR)?;

    let bounds = scene.toolpath_bounds();
    let size = bounds.size();
    if bounds.is_valid() && size.x > 0.0 && size.y > 0.0 {
        let lower_left = [
            (bounds.min.x / GRID_UNIT).floor() * GRID_UNIT,
            (bounds.min.y / GRID_UNIT).floor() * GRID_UNIT,
        ];
        let upper_right = [
            (bounds.max.x / GRID_UNIT).ceil() * GRID_UNIT,
            (bounds.max.y / GRID_UNIT).ceil() * GRID_UNIT,
        ];
        scene.create(
            "grid",
            ItemSpec::OrthoLineGrid {
                lower_left,
                upper_right,
                unit: GRID_UNIT,
                color: DEFAULT_GRID_COLOR,
            },
        )?;
    }

    let path = match scene.get_mut(toolpath).map(|entry| &mut entry.item) {
        Some(Item::GcodePath(path)) => path,
        _ => anyhow::bail!("toolpath item missing from scene"),
    };

    let mut gpu = HostBuffer::new();
    path.upload(&mut gpu);
    if !args.highlights.is_empty() {
        for line in &args.highlights {
            path.highlight_line(*line);
        }
        let recolored = path.apply_highlights(&mut gpu);
        info!(
            "Highlighted {} lines ({} vertices)",
            args.highlights.len(),
            recolored
        );
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(path.vertices())?);
    } else {
        print_toolpath(path);
        print_scene(&scene);
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<RenderConfig> {
    match path {
        Some(path) => RenderConfig::load_from_file(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => match default_config_path() {
            Ok(path) => Ok(RenderConfig::load_or_default(&path)?),
            Err(e) => {
                warn!("{}; using default render config", e);
                Ok(RenderConfig::default())
            }
        },
    }
}

fn print_toolpath(path: &GcodePath) {
    let bounds = path.bounds();
    let end = path.final_state().position_m;

    println!("Commands:  {}", path.command_count());
    println!("Vertices:  {}", path.vertex_count());
    println!("Arcs:      {}", path.arc_count());
    println!("Lines:     {}", path.line_spans().len());
    println!(
        "Bounds:    ({:.3}, {:.3}, {:.3}) .. ({:.3}, {:.3}, {:.3})",
        bounds.min.x, bounds.min.y, bounds.min.z, bounds.max.x, bounds.max.y, bounds.max.z
    );
    println!("End:       ({:.3}, {:.3}, {:.3})", end.x, end.y, end.z);
}

fn print_scene(scene: &Scene) {
    println!();
    for (id, entry) in scene.iter() {
        println!(
            "{}  {:<16} {:<10} {:>8} vertices",
            id,
            entry.item.kind(),
            entry.label,
            entry.item.vertex_count()
        );
    }
}
