//! The voxel world - chunks, generation, decoration, extraction, persistence

pub mod chunk;
pub mod features;
pub mod generation;
pub mod geometry;
pub mod persistence;
pub mod surface;
pub mod voxel;
#[allow(clippy::module_inception)]
mod world;

pub use chunk::{Chunk, CHUNK_SIZE};
pub use features::plant_trees;
pub use generation::{ChunkGenerator, GeneratorParams, NoiseField, TerrainGenerator};
pub use geometry::{chunk_to_world, world_to_chunk, ChunkPos, LocalPos, VoxelPos};
pub use persistence::{load_world, save_world};
pub use surface::{extract_chunk_surface, extract_world_surface, SurfaceInstance};
pub use voxel::VoxelKind;
pub use world::{World, WorldError};
