//! Deterministic terrain generation from seeded 2D coherent noise

use fastnoise_lite::{FastNoiseLite, NoiseType};
use serde::{Deserialize, Serialize};

use super::chunk::{Chunk, CHUNK_SIZE};
use super::geometry::{ChunkPos, LocalPos};
use super::voxel::VoxelKind;

/// A seeded 2D coherent-noise field, nominally in `[-1, 1]`.
///
/// The production sampler is [`FastNoiseLite`]; tests substitute fixed fields
/// to pin generated shapes.
pub trait NoiseField: Send + Sync {
    fn sample(&self, x: f32, z: f32) -> f32;
}

impl NoiseField for FastNoiseLite {
    fn sample(&self, x: f32, z: f32) -> f32 {
        self.get_noise_2d(x, z)
    }
}

/// Tunable terrain parameters. Serializable so presets can be stored;
/// the seed is deliberately not part of the preset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorParams {
    /// Mean terrain height (default: half the chunk height)
    pub base_height: i32,
    /// Height swing applied to the noise value (default: 16.0)
    pub amplitude: f32,
    /// Exclusive top of the water band (default: half of `base_height`)
    pub water_level: i32,
    /// Noise frequency for the height field
    pub frequency: f32,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        let base_height = CHUNK_SIZE / 2;
        Self {
            base_height,
            amplitude: 16.0,
            water_level: base_height / 2,
            frequency: 1.0,
        }
    }
}

impl GeneratorParams {
    /// Build the production noise sampler for a world seed
    pub fn to_noise(&self, seed: u64) -> FastNoiseLite {
        let mut noise = FastNoiseLite::with_seed(seed as i32);
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        noise.set_frequency(Some(self.frequency));
        noise
    }
}

/// Strategy producing a fully generated chunk for a chunk coordinate.
///
/// [`World`](super::World) holds one of these, so read-triggered generation
/// is an explicit, swappable policy rather than a hidden side effect.
pub trait ChunkGenerator: Send + Sync {
    fn generate_chunk(&self, position: ChunkPos) -> Chunk;
}

/// Height-field terrain: water floor, dirt fill, grass cap.
///
/// A pure function of `(seed, chunk coordinate)`: the same inputs always
/// reproduce the same voxel set, which is what makes parallel and
/// out-of-order chunk generation safe.
pub struct TerrainGenerator {
    seed: u64,
    params: GeneratorParams,
    noise: Box<dyn NoiseField>,
}

impl TerrainGenerator {
    pub fn new(seed: u64) -> Self {
        Self::with_params(seed, GeneratorParams::default())
    }

    pub fn with_params(seed: u64, params: GeneratorParams) -> Self {
        let noise = Box::new(params.to_noise(seed));
        Self {
            seed,
            params,
            noise,
        }
    }

    /// Use a custom noise field instead of the seeded default
    pub fn with_noise(seed: u64, params: GeneratorParams, noise: Box<dyn NoiseField>) -> Self {
        Self {
            seed,
            params,
            noise,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn params(&self) -> &GeneratorParams {
        &self.params
    }

    /// Terrain height for a world column: `floor(base + noise * amplitude)`,
    /// clamped into the chunk's vertical range. The noise field is sampled at
    /// the world position divided by the chunk side.
    pub fn column_height(&self, world_x: i32, world_z: i32) -> i32 {
        let value = self.noise.sample(
            world_x as f32 / CHUNK_SIZE as f32,
            world_z as f32 / CHUNK_SIZE as f32,
        );
        let height = (self.params.base_height as f32 + value * self.params.amplitude).floor();
        (height as i32).clamp(0, CHUNK_SIZE - 1)
    }

    /// Fill a chunk's columns in place. Callers wanting a fresh chunk should
    /// use [`generate_chunk`](Self::generate_chunk) or [`Chunk::generate`].
    pub fn fill_chunk(&self, chunk: &mut Chunk, position: ChunkPos) {
        // Water band first; the dirt pass below overwrites it in columns
        // that rise past the water level
        for y in 0..self.params.water_level {
            chunk.fill_layer(y, VoxelKind::Water);
        }

        for local_z in 0..CHUNK_SIZE {
            for local_x in 0..CHUNK_SIZE {
                let world_x = position.x * CHUNK_SIZE + local_x;
                let world_z = position.y * CHUNK_SIZE + local_z;
                let height = self.column_height(world_x, world_z);

                for y in 0..height {
                    chunk.set_voxel(LocalPos::new(local_x, y, local_z), VoxelKind::Dirt);
                }

                // Columns that stay underwater keep their water surface
                if height >= self.params.water_level {
                    chunk.set_voxel(LocalPos::new(local_x, height, local_z), VoxelKind::Grass);
                }
            }
        }
    }

    /// Generate a complete chunk at the given chunk coordinate
    pub fn generate_chunk(&self, position: ChunkPos) -> Chunk {
        let mut chunk = Chunk::new();
        self.fill_chunk(&mut chunk, position);
        chunk
    }
}

impl ChunkGenerator for TerrainGenerator {
    fn generate_chunk(&self, position: ChunkPos) -> Chunk {
        TerrainGenerator::generate_chunk(self, position)
    }
}
