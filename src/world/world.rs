//! World - chunk registry and world-space voxel access

use std::collections::HashMap;
use std::hash::BuildHasherDefault;
use std::time::Instant;

use ahash::AHasher;
use rayon::prelude::*;
use thiserror::Error;

use super::chunk::{Chunk, CHUNK_SIZE};
use super::features;
use super::generation::{ChunkGenerator, TerrainGenerator};
use super::geometry::{self, ChunkPos, VoxelPos};
use super::voxel::VoxelKind;

/// Errors surfaced by world-level operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    /// A column with no voxel anywhere in the vertical extent. Generation
    /// always lays at least the water floor, so hitting this means an
    /// invariant broke; the enclosing operation aborts.
    #[error("column at ({x}, {z}) contains no voxels")]
    EmptyColumn { x: i32, z: i32 },

    /// A persisted file referenced a voxel kind id this build doesn't know
    #[error("unknown voxel kind id {0}")]
    UnknownVoxelKind(u8),
}

type ChunkMap = HashMap<ChunkPos, Chunk, BuildHasherDefault<AHasher>>;

/// The voxel world: chunks keyed by chunk coordinate, created on demand by
/// an injected generation policy.
///
/// Chunk coordinates are 2D (X and Z); a chunk spans the whole vertical
/// extent, so world positions with `y` outside `[0, CHUNK_SIZE)` read as
/// empty and are not writable.
pub struct World {
    /// Materialized chunks
    chunks: ChunkMap,

    /// Produces a chunk the first time a coordinate is referenced through a
    /// generating entry point
    generator: Box<dyn ChunkGenerator>,
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("chunks", &self.chunks.len())
            .finish_non_exhaustive()
    }
}

impl World {
    /// An empty world with the given generation policy
    pub fn new(generator: Box<dyn ChunkGenerator>) -> Self {
        Self {
            chunks: ChunkMap::default(),
            generator,
        }
    }

    /// An empty world with the default terrain policy for `seed`
    pub fn with_seed(seed: u64) -> Self {
        Self::new(Box::new(TerrainGenerator::new(seed)))
    }

    /// Generate the `size x size` chunk grid centered on the origin, then
    /// plant trees across the generated surface.
    pub fn create(size: u32, seed: u64) -> Result<Self, WorldError> {
        let started = Instant::now();
        let generator = TerrainGenerator::new(seed);

        let half = size as i32 / 2;
        let coords: Vec<ChunkPos> = (-half..half)
            .flat_map(|x| (-half..half).map(move |z| ChunkPos::new(x, z)))
            .collect();

        // Generation is a pure function of (seed, coordinate): fan the grid
        // out across threads, then insert from a single writer
        let generated: Vec<(ChunkPos, Chunk)> = coords
            .into_par_iter()
            .map(|position| (position, generator.generate_chunk(position)))
            .collect();

        let mut world = Self::new(Box::new(generator));
        for (position, chunk) in generated {
            world.insert_chunk(position, chunk);
        }
        log::debug!(
            "Generated {} chunks in {:?}",
            world.chunk_count(),
            started.elapsed()
        );

        let trees = features::plant_trees(&mut world, seed, size)?;

        log::info!(
            "Created {}x{} world: {} chunks, {} voxels, {} trees in {:?}",
            size,
            size,
            world.chunk_count(),
            world.voxel_count(),
            trees,
            started.elapsed()
        );
        Ok(world)
    }

    fn chunk_entry(&mut self, position: ChunkPos) -> &mut Chunk {
        let generator = &self.generator;
        self.chunks
            .entry(position)
            .or_insert_with(|| generator.generate_chunk(position))
    }

    /// Get the chunk at a coordinate, generating and storing it first if it
    /// does not exist yet. Each coordinate is generated at most once.
    pub fn get_chunk(&mut self, position: ChunkPos) -> &Chunk {
        self.chunk_entry(position)
    }

    /// Look at a chunk without triggering generation
    pub fn chunk_at(&self, position: ChunkPos) -> Option<&Chunk> {
        self.chunks.get(&position)
    }

    /// Store a chunk at a coordinate, replacing any existing one
    pub fn insert_chunk(&mut self, position: ChunkPos, chunk: Chunk) {
        self.chunks.insert(position, chunk);
    }

    pub fn contains_chunk(&self, position: ChunkPos) -> bool {
        self.chunks.contains_key(&position)
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Total non-default voxels across all materialized chunks
    pub fn voxel_count(&self) -> usize {
        self.chunks.values().map(Chunk::occupied_len).sum()
    }

    /// Read a voxel anywhere in the world. Never fails and never generates:
    /// ungenerated chunks and positions outside the vertical extent read as
    /// [`VoxelKind::Empty`].
    pub fn get_voxel(&self, position: VoxelPos) -> VoxelKind {
        if position.y < 0 || position.y >= CHUNK_SIZE {
            return VoxelKind::Empty;
        }
        let (chunk_pos, local) = geometry::world_to_chunk(position);
        match self.chunks.get(&chunk_pos) {
            Some(chunk) => chunk.get_voxel(local),
            None => VoxelKind::Empty,
        }
    }

    /// Write a voxel anywhere in the world, generating the owning chunk
    /// first if needed. `y` must be inside the vertical extent.
    pub fn set_voxel(&mut self, position: VoxelPos, kind: VoxelKind) {
        debug_assert!(
            position.y >= 0 && position.y < CHUNK_SIZE,
            "voxel y {} outside the vertical extent",
            position.y
        );
        let (chunk_pos, local) = geometry::world_to_chunk(position);
        self.chunk_entry(chunk_pos).set_voxel(local, kind);
    }

    /// Iterate over materialized chunks in arbitrary order
    pub fn iter_chunks(&self) -> impl Iterator<Item = (ChunkPos, &Chunk)> {
        self.chunks.iter().map(|(&position, chunk)| (position, chunk))
    }

    /// Materialized chunks in ascending (x, z) order, for stable output
    pub fn sorted_chunks(&self) -> Vec<(ChunkPos, &Chunk)> {
        let mut chunks: Vec<_> = self.iter_chunks().collect();
        chunks.sort_unstable_by_key(|(position, _)| (position.x, position.y));
        chunks
    }

    /// Iterate over every materialized voxel as (world position, kind).
    /// Chunk order is arbitrary; order within a chunk follows
    /// [`Chunk::iter_occupied`].
    pub fn iter_voxels(&self) -> impl Iterator<Item = (VoxelPos, VoxelKind)> + '_ {
        self.iter_chunks().flat_map(|(position, chunk)| {
            chunk
                .iter_occupied()
                .map(move |(local, kind)| (geometry::chunk_to_world(position, local), kind))
        })
    }

    /// The y of the topmost non-empty voxel in a column, scanning down from
    /// the world top. Errors if the whole column is empty.
    pub fn surface_height(&self, x: i32, z: i32) -> Result<i32, WorldError> {
        for y in (0..CHUNK_SIZE).rev() {
            if !self.get_voxel(VoxelPos::new(x, y, z)).is_empty() {
                return Ok(y);
            }
        }
        Err(WorldError::EmptyColumn { x, z })
    }
}
