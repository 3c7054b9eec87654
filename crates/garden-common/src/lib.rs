//! # Garden Common
//!
//! Common types shared by the Time Gardener crates:
//! - Grid coordinates and orthogonal steps
//! - Pest identifiers
//! - Error types for configuration and file handling
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod coords;
pub mod error;
pub mod ids;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::coords::*;
    pub use crate::error::*;
    pub use crate::ids::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_coord_index_conversion() {
        let coord = GridCoord::new(3, 2);
        let index = coord.to_index(16).expect("in range");

        assert_eq!(index, 35);
        assert_eq!(GridCoord::from_index(index, 16), coord);
    }

    #[test]
    fn test_pest_id_sequence() {
        let mut ids = PestIdAllocator::new();
        let first = ids.allocate();
        let second = ids.allocate();

        assert_eq!(first, PestId::from_raw(1));
        assert_eq!(second, PestId::from_raw(2));
        assert_eq!(second.to_string(), "pest#2");
    }

    #[test]
    fn test_config_error_converts_to_garden_error() {
        let err: GardenError = ConfigError::EmptyGrid {
            width: 0,
            height: 16,
        }
        .into();
        assert!(err.to_string().contains("0x16"));
    }
}
