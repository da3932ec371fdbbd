//! # Voxelcore - chunked sparse voxel world
//!
//! A spatial data structure mapping 3D integer coordinates to voxel kinds,
//! partitioned into 32-cell cubic chunks generated on demand from seeded
//! coherent noise, with a visible-surface pass that reduces the voxel set to
//! the cells a renderer actually needs to draw.

pub mod world;

/// Common imports for consumers
pub mod prelude {
    pub use crate::world::{
        extract_world_surface, Chunk, ChunkPos, LocalPos, SurfaceInstance, TerrainGenerator,
        VoxelKind, VoxelPos, World, CHUNK_SIZE,
    };
    pub use glam::{IVec2, IVec3, Vec3};
}
