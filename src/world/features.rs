//! Surface decoration - tree placement over a generated world

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use super::chunk::CHUNK_SIZE;
use super::geometry::VoxelPos;
use super::voxel::VoxelKind;
use super::world::{World, WorldError};

/// One placement attempt per this many surface tiles
const TILES_PER_TREE: i64 = 256;

/// Trunk cells above the grass voxel
const TRUNK_HEIGHT: i32 = 5;

/// 5x5 canopy layers stacked above the trunk
const CANOPY_LAYERS: i32 = 3;

/// Plant trees across the generated `size x size` chunk grid.
///
/// Columns are picked uniformly at random with a seeded RNG, so placement is
/// reproducible per world seed. A pick whose surface voxel is not grass is
/// skipped; a pick whose column is entirely empty is an invariant break
/// (generation always lays the water floor) and aborts the pass. Returns the
/// number of trees planted; a stamp clipped away entirely (grass right at
/// the world top) does not count.
pub fn plant_trees(world: &mut World, seed: u64, size: u32) -> Result<u32, WorldError> {
    let half = size as i32 / 2;
    let min = -half * CHUNK_SIZE;
    let max = half * CHUNK_SIZE;
    if min == max {
        return Ok(0);
    }

    let side = (max - min) as i64;
    let attempts = side * side / TILES_PER_TREE;
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut planted = 0;

    for _ in 0..attempts {
        let x = rng.gen_range(min..max);
        let z = rng.gen_range(min..max);

        let height = world.surface_height(x, z)?;
        if world.get_voxel(VoxelPos::new(x, height, z)) != VoxelKind::Grass {
            continue;
        }

        if stamp_tree(world, VoxelPos::new(x, height, z)) {
            planted += 1;
        }
    }

    log::debug!("Planted {planted} trees in {attempts} attempts");
    Ok(planted)
}

/// Stamp the fixed tree footprint above a grass cell: a single-voxel trunk,
/// a block of 5x5 canopy layers, and a 3x3 cap. Cells above the world top
/// are clipped. Returns whether any cell was written.
fn stamp_tree(world: &mut World, base: VoxelPos) -> bool {
    let mut wrote = false;

    for dy in 1..=TRUNK_HEIGHT {
        wrote |= set_clipped(
            world,
            VoxelPos::new(base.x, base.y + dy, base.z),
            VoxelKind::Trunk,
        );
    }

    let canopy_bottom = base.y + TRUNK_HEIGHT + 1;
    for dy in 0..CANOPY_LAYERS {
        for dz in -2..=2 {
            for dx in -2..=2 {
                wrote |= set_clipped(
                    world,
                    VoxelPos::new(base.x + dx, canopy_bottom + dy, base.z + dz),
                    VoxelKind::Leaf,
                );
            }
        }
    }

    let cap_y = canopy_bottom + CANOPY_LAYERS;
    for dz in -1..=1 {
        for dx in -1..=1 {
            wrote |= set_clipped(
                world,
                VoxelPos::new(base.x + dx, cap_y, base.z + dz),
                VoxelKind::Leaf,
            );
        }
    }

    wrote
}

fn set_clipped(world: &mut World, position: VoxelPos, kind: VoxelKind) -> bool {
    if position.y < CHUNK_SIZE {
        world.set_voxel(position, kind);
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::chunk::Chunk;
    use crate::world::generation::ChunkGenerator;
    use crate::world::geometry::ChunkPos;

    /// Chunks with nothing in them
    struct EmptyGenerator;

    impl ChunkGenerator for EmptyGenerator {
        fn generate_chunk(&self, _position: ChunkPos) -> Chunk {
            Chunk::new()
        }
    }

    /// Flat grassland: dirt up to y=15, grass at y=16
    struct FlatGenerator;

    impl ChunkGenerator for FlatGenerator {
        fn generate_chunk(&self, _position: ChunkPos) -> Chunk {
            let mut chunk = Chunk::new();
            for y in 0..16 {
                chunk.fill_layer(y, VoxelKind::Dirt);
            }
            chunk.fill_layer(16, VoxelKind::Grass);
            chunk
        }
    }

    fn flat_world(size: u32) -> World {
        let mut world = World::new(Box::new(FlatGenerator));
        let half = size as i32 / 2;
        for x in -half..half {
            for z in -half..half {
                world.get_chunk(ChunkPos::new(x, z));
            }
        }
        world
    }

    #[test]
    fn test_tree_footprint() {
        let mut world = World::new(Box::new(EmptyGenerator));
        let base = VoxelPos::new(0, 4, 0);
        world.set_voxel(base, VoxelKind::Grass);

        stamp_tree(&mut world, base);

        // Trunk: five cells above the grass
        for y in 5..=9 {
            assert_eq!(world.get_voxel(VoxelPos::new(0, y, 0)), VoxelKind::Trunk);
        }
        // Canopy: 5x5 layers at y=10..=12
        for y in 10..=12 {
            assert_eq!(world.get_voxel(VoxelPos::new(-2, y, 2)), VoxelKind::Leaf);
            assert_eq!(world.get_voxel(VoxelPos::new(2, y, -2)), VoxelKind::Leaf);
            assert_eq!(world.get_voxel(VoxelPos::new(0, y, 0)), VoxelKind::Leaf);
            assert_eq!(world.get_voxel(VoxelPos::new(3, y, 0)), VoxelKind::Empty);
        }
        // Cap: 3x3 at y=13
        assert_eq!(world.get_voxel(VoxelPos::new(0, 13, 0)), VoxelKind::Leaf);
        assert_eq!(world.get_voxel(VoxelPos::new(1, 13, -1)), VoxelKind::Leaf);
        assert_eq!(world.get_voxel(VoxelPos::new(2, 13, 0)), VoxelKind::Empty);
        // Nothing above the cap, grass untouched
        assert_eq!(world.get_voxel(VoxelPos::new(0, 14, 0)), VoxelKind::Empty);
        assert_eq!(world.get_voxel(base), VoxelKind::Grass);
    }

    #[test]
    fn test_tree_clips_at_world_top() {
        let mut world = World::new(Box::new(EmptyGenerator));
        let base = VoxelPos::new(0, 30, 0);
        world.set_voxel(base, VoxelKind::Grass);

        assert!(stamp_tree(&mut world, base));

        // Only the first trunk cell fits below the top
        assert_eq!(world.get_voxel(VoxelPos::new(0, 31, 0)), VoxelKind::Trunk);
        // Everything else was clipped rather than written out of range
        let trunks = world
            .iter_voxels()
            .filter(|&(_, kind)| kind == VoxelKind::Trunk)
            .count();
        let leaves = world
            .iter_voxels()
            .filter(|&(_, kind)| kind == VoxelKind::Leaf)
            .count();
        assert_eq!(trunks, 1);
        assert_eq!(leaves, 0);
    }

    #[test]
    fn test_fully_clipped_stamp_reports_nothing_written() {
        let mut world = World::new(Box::new(EmptyGenerator));
        // Grass right at the world top: every stamp cell lands above it
        let base = VoxelPos::new(0, 31, 0);
        world.set_voxel(base, VoxelKind::Grass);

        assert!(!stamp_tree(&mut world, base));
        assert_eq!(world.iter_voxels().count(), 1);
    }

    #[test]
    fn test_plant_trees_does_not_count_clipped_stamps() {
        /// Grass at the world top, nothing above it to stamp into
        struct TopGrassGenerator;

        impl ChunkGenerator for TopGrassGenerator {
            fn generate_chunk(&self, _position: ChunkPos) -> Chunk {
                let mut chunk = Chunk::new();
                chunk.fill_layer(31, VoxelKind::Grass);
                chunk
            }
        }

        let mut world = World::new(Box::new(TopGrassGenerator));
        let half = 1;
        for x in -half..half {
            for z in -half..half {
                world.get_chunk(ChunkPos::new(x, z));
            }
        }

        let planted = plant_trees(&mut world, 5, 2).unwrap();
        assert_eq!(planted, 0);
        // Nothing but the generated grass layer exists
        assert!(world.iter_voxels().all(|(_, kind)| kind == VoxelKind::Grass));
    }

    #[test]
    fn test_plant_trees_skips_non_grass() {
        let mut world = World::new(Box::new(EmptyGenerator));
        // All-water grid: columns have a surface but never grass
        for x in -1..1 {
            for z in -1..1 {
                let mut chunk = Chunk::new();
                for y in 0..8 {
                    chunk.fill_layer(y, VoxelKind::Water);
                }
                world.insert_chunk(ChunkPos::new(x, z), chunk);
            }
        }

        let planted = plant_trees(&mut world, 3, 2).unwrap();
        assert_eq!(planted, 0);
    }

    #[test]
    fn test_plant_trees_errors_on_empty_columns() {
        let mut world = World::new(Box::new(EmptyGenerator));
        for x in -1..1 {
            for z in -1..1 {
                world.get_chunk(ChunkPos::new(x, z));
            }
        }

        let result = plant_trees(&mut world, 3, 2);
        assert!(matches!(result, Err(WorldError::EmptyColumn { .. })));
    }

    #[test]
    fn test_plant_trees_is_deterministic() {
        let mut world1 = flat_world(2);
        let mut world2 = flat_world(2);

        let planted1 = plant_trees(&mut world1, 77, 2).unwrap();
        let planted2 = plant_trees(&mut world2, 77, 2).unwrap();

        assert!(planted1 >= 1);
        assert_eq!(planted1, planted2);

        let mut voxels1: Vec<_> = world1.iter_voxels().collect();
        let mut voxels2: Vec<_> = world2.iter_voxels().collect();
        voxels1.sort_by_key(|(p, _)| (p.x, p.y, p.z));
        voxels2.sort_by_key(|(p, _)| (p.x, p.y, p.z));
        assert_eq!(voxels1, voxels2);
    }

    #[test]
    fn test_plant_trees_zero_size_grid() {
        let mut world = World::new(Box::new(EmptyGenerator));
        assert_eq!(plant_trees(&mut world, 1, 0), Ok(0));
    }
}
