//! Chunk - 32x32x32 region of voxels

use super::generation::TerrainGenerator;
use super::geometry::{ChunkPos, LocalPos};
use super::voxel::VoxelKind;

/// Side length of a cubic chunk, in voxels
pub const CHUNK_SIZE: i32 = 32;

/// Cells in one horizontal slice of a chunk
pub const CHUNK_LAYER: usize = (CHUNK_SIZE * CHUNK_SIZE) as usize;

/// Cells in a whole chunk
pub const CHUNK_VOLUME: usize = CHUNK_LAYER * CHUNK_SIZE as usize;

/// A cubic region of the world's voxel grid.
///
/// Storage is a flat array indexed `[y][z][x]`, but the observable contract
/// is sparse: a cell "exists" only while its kind differs from the chunk's
/// default, and [`iter_occupied`](Chunk::iter_occupied) visits exactly those
/// cells. Setting a cell back to the default removes it.
#[derive(Clone)]
pub struct Chunk {
    /// Voxel data, `[y][z][x]` order
    voxels: Vec<VoxelKind>,
    /// Kind reported for cells with no explicit entry
    default_kind: VoxelKind,
    /// Number of cells whose kind differs from the default
    occupied: usize,
}

impl Chunk {
    pub fn new() -> Self {
        Self::with_default(VoxelKind::Empty)
    }

    /// Create a chunk whose unset cells report `default_kind`
    pub fn with_default(default_kind: VoxelKind) -> Self {
        Self {
            voxels: vec![default_kind; CHUNK_VOLUME],
            default_kind,
            occupied: 0,
        }
    }

    #[inline]
    fn index(local: LocalPos) -> usize {
        debug_assert!(Self::contains_local(local), "local {local} out of range");
        ((local.y * CHUNK_SIZE + local.z) * CHUNK_SIZE + local.x) as usize
    }

    #[inline]
    fn local_from_index(index: usize) -> LocalPos {
        let index = index as i32;
        LocalPos::new(
            index % CHUNK_SIZE,
            index / (CHUNK_SIZE * CHUNK_SIZE),
            (index / CHUNK_SIZE) % CHUNK_SIZE,
        )
    }

    /// Whether a local position lies inside the chunk
    #[inline]
    pub fn contains_local(local: LocalPos) -> bool {
        local.x >= 0
            && local.x < CHUNK_SIZE
            && local.y >= 0
            && local.y < CHUNK_SIZE
            && local.z >= 0
            && local.z < CHUNK_SIZE
    }

    /// Get the voxel at a local position. Locals must be in `[0, CHUNK_SIZE)`
    /// on every axis; the coordinate transforms in `geometry` guarantee that.
    #[inline]
    pub fn get_voxel(&self, local: LocalPos) -> VoxelKind {
        self.voxels[Self::index(local)]
    }

    /// Set the voxel at a local position. Writing the default kind removes
    /// the entry; anything else inserts or overwrites.
    #[inline]
    pub fn set_voxel(&mut self, local: LocalPos, kind: VoxelKind) {
        let index = Self::index(local);
        let old = self.voxels[index];
        if old == kind {
            return;
        }
        if old == self.default_kind {
            self.occupied += 1;
        } else if kind == self.default_kind {
            self.occupied -= 1;
        }
        self.voxels[index] = kind;
    }

    /// Fill one horizontal slice with a single kind
    pub fn fill_layer(&mut self, y: i32, kind: VoxelKind) {
        debug_assert!((0..CHUNK_SIZE).contains(&y), "layer {y} out of range");
        let start = y as usize * CHUNK_LAYER;
        for cell in &mut self.voxels[start..start + CHUNK_LAYER] {
            if *cell == kind {
                continue;
            }
            if *cell == self.default_kind {
                self.occupied += 1;
            } else if kind == self.default_kind {
                self.occupied -= 1;
            }
            *cell = kind;
        }
    }

    /// Reset every cell to the default kind
    pub fn clear(&mut self) {
        self.voxels.fill(self.default_kind);
        self.occupied = 0;
    }

    /// Drop current contents and refill from the terrain generator
    pub fn generate(&mut self, position: ChunkPos, generator: &TerrainGenerator) {
        self.clear();
        generator.fill_chunk(self, position);
    }

    /// Iterate over exactly the non-default cells, in `[y][z][x]` order.
    /// Each call starts a fresh traversal.
    pub fn iter_occupied(&self) -> impl Iterator<Item = (LocalPos, VoxelKind)> + '_ {
        let default_kind = self.default_kind;
        self.voxels
            .iter()
            .enumerate()
            .filter(move |(_, &kind)| kind != default_kind)
            .map(|(index, &kind)| (Self::local_from_index(index), kind))
    }

    /// Number of non-default cells
    pub fn occupied_len(&self) -> usize {
        self.occupied
    }

    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    pub fn default_kind(&self) -> VoxelKind {
        self.default_kind
    }
}

impl Default for Chunk {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voxel_access() {
        let mut chunk = Chunk::new();

        chunk.set_voxel(LocalPos::new(10, 20, 5), VoxelKind::Dirt);
        assert_eq!(chunk.get_voxel(LocalPos::new(10, 20, 5)), VoxelKind::Dirt);

        chunk.set_voxel(LocalPos::new(0, 0, 0), VoxelKind::Grass);
        chunk.set_voxel(LocalPos::new(31, 31, 31), VoxelKind::Water);
        assert_eq!(chunk.get_voxel(LocalPos::new(0, 0, 0)), VoxelKind::Grass);
        assert_eq!(chunk.get_voxel(LocalPos::new(31, 31, 31)), VoxelKind::Water);
    }

    #[test]
    fn test_unset_cells_read_default() {
        let chunk = Chunk::new();
        assert_eq!(chunk.get_voxel(LocalPos::new(7, 8, 9)), VoxelKind::Empty);

        let watery = Chunk::with_default(VoxelKind::Water);
        assert_eq!(watery.get_voxel(LocalPos::new(7, 8, 9)), VoxelKind::Water);
        assert_eq!(watery.default_kind(), VoxelKind::Water);
    }

    #[test]
    fn test_set_to_default_removes_entry() {
        let mut chunk = Chunk::new();
        let p = LocalPos::new(3, 4, 5);

        chunk.set_voxel(p, VoxelKind::Trunk);
        assert_eq!(chunk.occupied_len(), 1);

        chunk.set_voxel(p, VoxelKind::Empty);
        assert_eq!(chunk.occupied_len(), 0);
        assert!(chunk.is_empty());
        assert_eq!(chunk.get_voxel(p), VoxelKind::Empty);
        assert_eq!(chunk.iter_occupied().count(), 0);
    }

    #[test]
    fn test_occupied_count_tracks_transitions() {
        let mut chunk = Chunk::new();
        let p = LocalPos::new(1, 2, 3);

        chunk.set_voxel(p, VoxelKind::Dirt);
        chunk.set_voxel(p, VoxelKind::Dirt); // no-op
        chunk.set_voxel(p, VoxelKind::Grass); // overwrite, still one entry
        assert_eq!(chunk.occupied_len(), 1);

        chunk.set_voxel(LocalPos::new(1, 2, 4), VoxelKind::Leaf);
        assert_eq!(chunk.occupied_len(), 2);
    }

    #[test]
    fn test_fill_layer() {
        let mut chunk = Chunk::new();
        chunk.fill_layer(0, VoxelKind::Water);

        assert_eq!(chunk.occupied_len(), CHUNK_LAYER);
        assert_eq!(chunk.get_voxel(LocalPos::new(0, 0, 0)), VoxelKind::Water);
        assert_eq!(chunk.get_voxel(LocalPos::new(31, 0, 31)), VoxelKind::Water);
        assert_eq!(chunk.get_voxel(LocalPos::new(0, 1, 0)), VoxelKind::Empty);

        // Refilling with the same kind changes nothing
        chunk.fill_layer(0, VoxelKind::Water);
        assert_eq!(chunk.occupied_len(), CHUNK_LAYER);

        // Filling back to the default empties the layer
        chunk.fill_layer(0, VoxelKind::Empty);
        assert!(chunk.is_empty());
    }

    #[test]
    fn test_iter_occupied_yields_exact_entries() {
        let mut chunk = Chunk::new();
        chunk.set_voxel(LocalPos::new(0, 0, 0), VoxelKind::Grass);
        chunk.set_voxel(LocalPos::new(5, 6, 7), VoxelKind::Dirt);
        chunk.set_voxel(LocalPos::new(31, 31, 31), VoxelKind::Leaf);

        let entries: Vec<_> = chunk.iter_occupied().collect();
        assert_eq!(
            entries,
            vec![
                (LocalPos::new(0, 0, 0), VoxelKind::Grass),
                (LocalPos::new(5, 6, 7), VoxelKind::Dirt),
                (LocalPos::new(31, 31, 31), VoxelKind::Leaf),
            ]
        );

        // Restartable: a second traversal sees the same entries
        assert_eq!(chunk.iter_occupied().count(), 3);
    }

    #[test]
    fn test_iter_occupied_order_is_y_z_x() {
        let mut chunk = Chunk::new();
        chunk.set_voxel(LocalPos::new(1, 0, 0), VoxelKind::Dirt);
        chunk.set_voxel(LocalPos::new(0, 0, 1), VoxelKind::Dirt);
        chunk.set_voxel(LocalPos::new(0, 1, 0), VoxelKind::Dirt);

        let order: Vec<LocalPos> = chunk.iter_occupied().map(|(p, _)| p).collect();
        assert_eq!(
            order,
            vec![
                LocalPos::new(1, 0, 0), // lowest y, lowest z
                LocalPos::new(0, 0, 1), // then z
                LocalPos::new(0, 1, 0), // then y
            ]
        );
    }

    #[test]
    fn test_clear_resets_to_default() {
        let mut chunk = Chunk::with_default(VoxelKind::Water);
        chunk.set_voxel(LocalPos::new(2, 2, 2), VoxelKind::Dirt);
        chunk.clear();

        assert!(chunk.is_empty());
        assert_eq!(chunk.get_voxel(LocalPos::new(2, 2, 2)), VoxelKind::Water);
    }

    #[test]
    fn test_index_round_trip() {
        for &local in &[
            LocalPos::new(0, 0, 0),
            LocalPos::new(31, 0, 0),
            LocalPos::new(0, 31, 0),
            LocalPos::new(0, 0, 31),
            LocalPos::new(13, 17, 23),
            LocalPos::new(31, 31, 31),
        ] {
            assert_eq!(Chunk::local_from_index(Chunk::index(local)), local);
        }
    }
}
