use std::{path::PathBuf, time::Instant};

use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};

use raytracing::{
    geometry::{Parallelogram, AABB},
    renderer::{PreviewRenderer, RenderingBackend},
    scene::{self, Scene},
    settings::{PalettePolicy, SceneSettings},
};
use vox::{ChunkPolicy, ReadOptions};

#[derive(Debug, clap::Parser)]
#[command(about = "Lay out MagicaVoxel models on a grid and render them")]
struct CommandLineArguments {
    #[arg(default_value = "data/scene_parade.vox", help = "Voxel files, placed left to right in rows")]
    files: Vec<PathBuf>,

    #[arg(short, long, help = "Render to this image and exit instead of displaying")]
    file: Option<PathBuf>,
    #[arg(short, long, help = "Disable GL interop for the display buffer")]
    nopbo: bool,

    #[arg(long, help = "Skip chunks the reader does not understand instead of stopping at them")]
    skip_unknown_chunks: bool,
    #[arg(long, help = "Use the first file's palette instead of the last one's")]
    first_palette: bool,

    #[arg(long, help = "Print the assembled scene layout as JSON")]
    summary: bool,
}

#[derive(Serialize)]
struct SceneSummary {
    batches: Vec<BatchSummary>,
    primitives: usize,
    bounds: Option<BoundsSummary>,
    ground_plane: Option<GroundSummary>,
    camera: Option<CameraSummary>,
}

#[derive(Serialize)]
struct GroundSummary {
    bounds: Option<BoundsSummary>,
    // plane equation `(nx, ny, nz, d)` as the intersection program takes it
    plane: [f32; 4],
}

/// Ray generation basis of the default camera
#[derive(Serialize)]
struct CameraSummary {
    eye: [f32; 3],
    u: [f32; 3],
    v: [f32; 3],
    w: [f32; 3],
}

#[derive(Serialize)]
struct BatchSummary {
    dims: [i32; 3],
    boxes: usize,
    anchor: [f32; 3],
}

#[derive(Serialize)]
struct BoundsSummary {
    min: [f32; 3],
    max: [f32; 3],
}

impl BoundsSummary {
    fn from_aabb(aabb: &AABB) -> Option<BoundsSummary> {
        aabb.is_valid().then(|| BoundsSummary {
            min: aabb.minimum.into(),
            max: aabb.maximum.into(),
        })
    }
}

impl GroundSummary {
    fn new(plane: &Parallelogram) -> GroundSummary {
        GroundSummary {
            bounds: BoundsSummary::from_aabb(&plane.bounds()),
            plane: plane.kernel_params().plane,
        }
    }
}

impl SceneSummary {
    fn new(scene: &Scene) -> SceneSummary {
        SceneSummary {
            batches: scene
                .box_batches()
                .map(|batch| BatchSummary {
                    dims: batch.model.dims,
                    boxes: batch.primitive_count(),
                    anchor: batch.anchor.into(),
                })
                .collect(),
            primitives: scene.primitive_count(),
            bounds: BoundsSummary::from_aabb(&scene.aabb),
            ground_plane: scene.ground_plane().map(GroundSummary::new),
            // an empty scene leaves the camera looking at its own eye
            camera: scene.aabb.is_valid().then(|| {
                let frame = scene.camera.frame();
                CameraSummary {
                    eye: frame.eye.into(),
                    u: frame.u.into(),
                    v: frame.v.into(),
                    w: frame.w.into(),
                }
            }),
        }
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli_args = CommandLineArguments::parse();

    if let Err(err) = run(cli_args) {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run(cli_args: CommandLineArguments) -> anyhow::Result<()> {
    // override default settings from the command line
    let mut settings = SceneSettings::default();
    if cli_args.skip_unknown_chunks {
        settings.read_options = ReadOptions {
            chunk_policy: ChunkPolicy::SkipUnknown,
        };
    }
    if cli_args.first_palette {
        settings.palette_policy = PalettePolicy::FirstFileWins;
    }

    let start = Instant::now();
    let scene = scene::scene_from_vox_files(&cli_args.files, &settings)?;
    info!(elapsed = ?start.elapsed(), files = cli_args.files.len(), "scene loaded");

    if cli_args.summary {
        println!("{}", serde_json::to_string_pretty(&SceneSummary::new(&scene))?);
    }

    let Some(output_path) = cli_args.file else {
        if cli_args.nopbo {
            warn!("--nopbo has no effect without a display");
        }
        info!("no display available; pass --file to write a preview image");
        return Ok(());
    };

    let start = Instant::now();
    let output = PreviewRenderer.render(&scene);
    info!(elapsed = ?start.elapsed(), width = output.width, height = output.height, "rendered preview");

    output.save(&output_path)?;
    info!(path = %output_path.display(), "saved image");
    Ok(())
}
