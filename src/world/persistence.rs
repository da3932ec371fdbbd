//! JSON save/load for a world's sparse voxel content
//!
//! The on-disk format is an array of chunk records; each record carries the
//! chunk coordinate, the explicit (non-default) voxels, and the chunk's
//! default kind. Voxel kinds travel as their stable integer ids.

use std::path::Path;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use super::chunk::Chunk;
use super::generation::ChunkGenerator;
use super::geometry::{ChunkPos, LocalPos};
use super::voxel::VoxelKind;
use super::world::{World, WorldError};

#[derive(Debug, Serialize, Deserialize)]
struct ChunkRecord {
    position: ChunkCoordRecord,
    chunk: ChunkDataRecord,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChunkCoordRecord {
    x: i32,
    z: i32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChunkDataRecord {
    voxels: Vec<VoxelRecord>,
    default_voxel_kind: u8,
}

#[derive(Debug, Serialize, Deserialize)]
struct VoxelRecord {
    position: LocalCoordRecord,
    voxel_kind: u8,
}

#[derive(Debug, Serialize, Deserialize)]
struct LocalCoordRecord {
    x: i32,
    y: i32,
    z: i32,
}

fn to_records(world: &World) -> Vec<ChunkRecord> {
    world
        .sorted_chunks()
        .into_iter()
        .map(|(position, chunk)| ChunkRecord {
            position: ChunkCoordRecord {
                x: position.x,
                z: position.y,
            },
            chunk: ChunkDataRecord {
                voxels: chunk
                    .iter_occupied()
                    .map(|(local, kind)| VoxelRecord {
                        position: LocalCoordRecord {
                            x: local.x,
                            y: local.y,
                            z: local.z,
                        },
                        voxel_kind: kind.id(),
                    })
                    .collect(),
                default_voxel_kind: chunk.default_kind().id(),
            },
        })
        .collect()
}

fn decode_kind(id: u8) -> Result<VoxelKind> {
    VoxelKind::from_id(id).ok_or_else(|| WorldError::UnknownVoxelKind(id).into())
}

fn from_record(record: &ChunkRecord) -> Result<(ChunkPos, Chunk)> {
    let position = ChunkPos::new(record.position.x, record.position.z);
    let default_kind = decode_kind(record.chunk.default_voxel_kind)?;

    let mut chunk = Chunk::with_default(default_kind);
    for voxel in &record.chunk.voxels {
        let local = LocalPos::new(voxel.position.x, voxel.position.y, voxel.position.z);
        if !Chunk::contains_local(local) {
            bail!("voxel position {local} out of chunk range");
        }
        chunk.set_voxel(local, decode_kind(voxel.voxel_kind)?);
    }
    Ok((position, chunk))
}

/// Write a world's materialized chunks to `path` as pretty-printed JSON.
/// Chunks are ordered by coordinate, so equal worlds produce equal files.
/// The write is atomic: temp file first, then rename over the target.
pub fn save_world(world: &World, path: &Path) -> Result<()> {
    let started = Instant::now();
    let records = to_records(world);

    let json = serde_json::to_string_pretty(&records).context("Failed to serialize world")?;

    let temp_path = path.with_extension("tmp");
    std::fs::write(&temp_path, json)
        .with_context(|| format!("Failed to write {}", temp_path.display()))?;
    std::fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename into {}", path.display()))?;

    log::info!(
        "Saved {} chunks ({} voxels) to {} in {:?}",
        world.chunk_count(),
        world.voxel_count(),
        path.display(),
        started.elapsed()
    );
    Ok(())
}

/// Read a world back from `path`, rebuilding each chunk cell by cell so the
/// sparse contract holds regardless of record order. The given generation
/// policy serves any chunks referenced later that the file did not contain.
pub fn load_world(path: &Path, generator: Box<dyn ChunkGenerator>) -> Result<World> {
    let started = Instant::now();
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let records: Vec<ChunkRecord> =
        serde_json::from_str(&json).context("Failed to parse world file")?;

    let mut world = World::new(generator);
    for record in &records {
        let (position, chunk) = from_record(record).with_context(|| {
            format!(
                "Invalid chunk record at ({}, {})",
                record.position.x, record.position.z
            )
        })?;
        world.insert_chunk(position, chunk);
    }

    log::info!(
        "Loaded {} chunks ({} voxels) from {} in {:?}",
        world.chunk_count(),
        world.voxel_count(),
        path.display(),
        started.elapsed()
    );
    Ok(world)
}
