//! Visible-surface extraction - culls enclosed voxels before rendering

use std::time::Instant;

use glam::Vec3;
use rayon::prelude::*;

use super::chunk::Chunk;
use super::geometry::{self, ChunkPos, LocalPos, NEIGHBOR_OFFSETS};
use super::voxel::VoxelKind;
use super::world::World;

/// One renderable voxel: a unit cube instanced at `position`, colored by
/// its kind's id
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceInstance {
    pub position: Vec3,
    pub voxel_kind: VoxelKind,
}

/// Walk one chunk's occupied cells and keep those with at least one empty
/// neighbor. In-chunk neighbors are direct array reads; only cells on the
/// chunk faces consult `cross_chunk` (which receives the out-of-range local
/// position).
fn chunk_surface<F>(chunk: &Chunk, position: ChunkPos, cross_chunk: F) -> Vec<SurfaceInstance>
where
    F: Fn(LocalPos) -> VoxelKind,
{
    let mut instances = Vec::new();
    for (local, kind) in chunk.iter_occupied() {
        // Explicit empty cells can appear when the chunk default is solid;
        // they are never rendered
        if kind.is_empty() {
            continue;
        }

        let exposed = NEIGHBOR_OFFSETS.iter().any(|&offset| {
            let neighbor = local + offset;
            let neighbor_kind = if Chunk::contains_local(neighbor) {
                chunk.get_voxel(neighbor)
            } else {
                cross_chunk(neighbor)
            };
            neighbor_kind.is_empty()
        });

        if exposed {
            instances.push(SurfaceInstance {
                position: geometry::chunk_to_world(position, local).as_vec3(),
                voxel_kind: kind,
            });
        }
    }
    instances
}

/// Reduce a world to the voxels visible from outside: every non-empty voxel
/// with at least one of its 6 axis-aligned neighbors empty. Neighbors in
/// ungenerated chunks (and beyond the vertical extent) read as empty, so the
/// world boundary is always visible.
///
/// Chunks are processed in sorted coordinate order and cells in storage
/// order, so the output sequence is deterministic for a given world.
pub fn extract_world_surface(world: &World) -> Vec<SurfaceInstance> {
    let started = Instant::now();

    let chunks = world.sorted_chunks();
    let per_chunk: Vec<Vec<SurfaceInstance>> = chunks
        .par_iter()
        .map(|&(position, chunk)| {
            chunk_surface(chunk, position, |neighbor| {
                world.get_voxel(geometry::chunk_to_world(position, neighbor))
            })
        })
        .collect();

    let instances: Vec<SurfaceInstance> = per_chunk.into_iter().flatten().collect();
    log::debug!(
        "Extracted {} visible voxels from {} chunks in {:?}",
        instances.len(),
        world.chunk_count(),
        started.elapsed()
    );
    instances
}

/// Single-chunk variant: everything outside the chunk reads as empty, so
/// cells on the chunk faces are always visible.
pub fn extract_chunk_surface(chunk: &Chunk, position: ChunkPos) -> Vec<SurfaceInstance> {
    chunk_surface(chunk, position, |_| VoxelKind::Empty)
}
