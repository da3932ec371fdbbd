use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use voxelcore::world::{persistence, World};

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate a voxel world and save it as JSON", long_about = None)]
struct Args {
    /// Output path for the world file
    #[arg(short, long, default_value = "world.json")]
    output: PathBuf,

    /// Side length of the chunk grid, centered on the origin
    #[arg(short, long, default_value_t = 16)]
    size: u32,

    /// World seed
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    log::info!(
        "Creating {}x{} chunk world (seed {})",
        args.size,
        args.size,
        args.seed
    );

    let started = Instant::now();
    let world = World::create(args.size, args.seed)?;
    persistence::save_world(&world, &args.output)?;

    log::info!(
        "Wrote {} ({} chunks, {} voxels) in {:?}",
        args.output.display(),
        world.chunk_count(),
        world.voxel_count(),
        started.elapsed()
    );
    Ok(())
}
