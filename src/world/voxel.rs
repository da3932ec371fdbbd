//! Voxel kinds and their wire ids

/// What a single voxel cell contains
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VoxelKind {
    /// Empty space, the default fill for unset cells
    #[default]
    Empty,
    /// Grass cap on top of a terrain column
    Grass,
    /// Dirt fill below the surface
    Dirt,
    /// Water band at the bottom of the world
    Water,
    /// Tree trunk
    Trunk,
    /// Tree canopy
    Leaf,
}

impl VoxelKind {
    /// Stable integer id used by the persisted format and the render layer's
    /// appearance tables. Never renumber; new kinds append at the end.
    pub const fn id(self) -> u8 {
        match self {
            VoxelKind::Empty => 0,
            VoxelKind::Grass => 1,
            VoxelKind::Dirt => 2,
            VoxelKind::Water => 3,
            VoxelKind::Trunk => 4,
            VoxelKind::Leaf => 5,
        }
    }

    /// Inverse of [`id`](Self::id). Unknown ids return `None` so callers can
    /// reject malformed data instead of panicking.
    pub const fn from_id(id: u8) -> Option<VoxelKind> {
        match id {
            0 => Some(VoxelKind::Empty),
            1 => Some(VoxelKind::Grass),
            2 => Some(VoxelKind::Dirt),
            3 => Some(VoxelKind::Water),
            4 => Some(VoxelKind::Trunk),
            5 => Some(VoxelKind::Leaf),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        matches!(self, VoxelKind::Empty)
    }
}
