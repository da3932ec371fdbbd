//! Coordinate spaces and the transforms between them
//!
//! Three integer spaces: world-voxel (global grid), world-chunk (which chunk,
//! X/Z only since chunks span the full vertical extent), and chunk-local
//! (offset inside a chunk, every component in `[0, CHUNK_SIZE)`).
//!
//! Convention: +X right, +Y up, +Z forward (left-handed).

use glam::{IVec2, IVec3};

use super::chunk::CHUNK_SIZE;

/// Position of a voxel in the global grid
pub type VoxelPos = IVec3;

/// Position of a chunk in the chunk grid; `x` is chunk X, `y` is chunk Z
pub type ChunkPos = IVec2;

/// Position of a voxel relative to its chunk origin
pub type LocalPos = IVec3;

pub const UP: IVec3 = IVec3::new(0, 1, 0);
pub const DOWN: IVec3 = IVec3::new(0, -1, 0);
pub const LEFT: IVec3 = IVec3::new(-1, 0, 0);
pub const RIGHT: IVec3 = IVec3::new(1, 0, 0);
pub const FORWARD: IVec3 = IVec3::new(0, 0, 1);
pub const BACKWARD: IVec3 = IVec3::new(0, 0, -1);

/// The six axis-aligned neighbor offsets checked by surface extraction
pub const NEIGHBOR_OFFSETS: [IVec3; 6] = [UP, DOWN, LEFT, RIGHT, FORWARD, BACKWARD];

/// Split a world-voxel position into its chunk coordinate and the local
/// offset inside that chunk.
///
/// Uses `div_euclid`/`rem_euclid` so negative coordinates floor instead of
/// truncating toward zero: world x = -1 lands in chunk -1 at local x = 31.
#[inline]
pub fn world_to_chunk(position: VoxelPos) -> (ChunkPos, LocalPos) {
    let chunk = ChunkPos::new(
        position.x.div_euclid(CHUNK_SIZE),
        position.z.div_euclid(CHUNK_SIZE),
    );
    let local = LocalPos::new(
        position.x.rem_euclid(CHUNK_SIZE),
        position.y,
        position.z.rem_euclid(CHUNK_SIZE),
    );
    (chunk, local)
}

/// Inverse of [`world_to_chunk`]: rebuild the world-voxel position from a
/// chunk coordinate and a local offset.
#[inline]
pub fn chunk_to_world(chunk: ChunkPos, local: LocalPos) -> VoxelPos {
    VoxelPos::new(
        chunk.x * CHUNK_SIZE + local.x,
        local.y,
        chunk.y * CHUNK_SIZE + local.z,
    )
}
