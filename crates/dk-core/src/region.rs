//! Decal regions and the mesh-name lookup table

use std::collections::BTreeMap;
use std::f32::consts::{FRAC_PI_2, PI};
use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A fixed, addressable decal target area on the garment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Chest,
    Arms,
    Back,
    Front,
}

impl Region {
    /// Every region, in display order
    pub const ALL: [Region; 4] = [Region::Chest, Region::Arms, Region::Back, Region::Front];

    /// Stable string key
    pub fn key(&self) -> &'static str {
        match self {
            Region::Chest => "chest",
            Region::Arms => "arms",
            Region::Back => "back",
            Region::Front => "front",
        }
    }

    /// Parse a region from its string key
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.key() == key)
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            Region::Chest => "Chest",
            Region::Arms => "Arms",
            Region::Back => "Back",
            Region::Front => "Front",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Default placement of a region's decal, in mesh space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionPlacement {
    /// Decal position relative to the mesh origin
    pub position: Vec3,
    /// Base Euler rotation (XYZ, radians); only Z is edited by handles
    pub rotation: Vec3,
    /// Initial uniform scale
    pub scale: f32,
}

impl Default for RegionPlacement {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: 0.15,
        }
    }
}

/// Error loading a region table from configuration
#[derive(Debug, Clone, thiserror::Error)]
pub enum RegionTableError {
    #[error("Failed to parse region table: {0}")]
    Parse(String),
    #[error("Region table has no placement for region '{0}'")]
    MissingPlacement(Region),
}

/// Maps sub-mesh names to regions and holds per-region placement defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionTable {
    meshes: BTreeMap<String, Region>,
    placements: BTreeMap<Region, RegionPlacement>,
}

impl Default for RegionTable {
    fn default() -> Self {
        Self::hoodie()
    }
}

impl RegionTable {
    /// Built-in table for the hoodie model
    pub fn hoodie() -> Self {
        let meshes = [
            ("Hoodie_Chest", Region::Chest),
            ("Hoodie_Front", Region::Front),
            ("Hoodie_Pocket", Region::Front),
            ("Hoodie_Back", Region::Back),
            ("Hoodie_Hood", Region::Back),
            ("Hoodie_Sleeve_L", Region::Arms),
            ("Hoodie_Sleeve_R", Region::Arms),
        ]
        .into_iter()
        .map(|(name, region)| (name.to_string(), region))
        .collect();

        let placements = BTreeMap::from([
            (
                Region::Chest,
                RegionPlacement {
                    position: Vec3::new(0.08, 0.32, 0.16),
                    rotation: Vec3::ZERO,
                    scale: 0.12,
                },
            ),
            (
                Region::Arms,
                RegionPlacement {
                    position: Vec3::new(0.34, 0.12, 0.0),
                    rotation: Vec3::new(0.0, FRAC_PI_2, 0.0),
                    scale: 0.1,
                },
            ),
            (
                Region::Back,
                RegionPlacement {
                    position: Vec3::new(0.0, 0.25, -0.16),
                    rotation: Vec3::new(0.0, PI, 0.0),
                    scale: 0.25,
                },
            ),
            (
                Region::Front,
                RegionPlacement {
                    position: Vec3::new(0.0, 0.05, 0.17),
                    rotation: Vec3::ZERO,
                    scale: 0.2,
                },
            ),
        ]);

        Self { meshes, placements }
    }

    /// Parse a table from RON; every region must have a placement
    pub fn from_ron(source: &str) -> Result<Self, RegionTableError> {
        let table: RegionTable =
            ron::from_str(source).map_err(|e| RegionTableError::Parse(e.to_string()))?;
        for region in Region::ALL {
            if !table.placements.contains_key(&region) {
                return Err(RegionTableError::MissingPlacement(region));
            }
        }
        Ok(table)
    }

    /// Region addressed by a sub-mesh name
    pub fn region_for_mesh(&self, mesh_name: &str) -> Option<Region> {
        self.meshes.get(mesh_name).copied()
    }

    /// Sub-mesh names mapped to `region`
    pub fn meshes_for(&self, region: Region) -> impl Iterator<Item = &str> {
        self.meshes
            .iter()
            .filter(move |(_, r)| **r == region)
            .map(|(name, _)| name.as_str())
    }

    /// Default placement for a region
    pub fn placement(&self, region: Region) -> RegionPlacement {
        self.placements.get(&region).copied().unwrap_or_default()
    }

    /// Map an additional sub-mesh name to a region
    pub fn insert_mesh(&mut self, mesh_name: impl Into<String>, region: Region) {
        self.meshes.insert(mesh_name.into(), region);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_keys_round_trip() {
        for region in Region::ALL {
            assert_eq!(Region::from_key(region.key()), Some(region));
        }
        assert_eq!(Region::from_key("collar"), None);
    }

    #[test]
    fn test_hoodie_lookup() {
        let table = RegionTable::hoodie();
        assert_eq!(table.region_for_mesh("Hoodie_Chest"), Some(Region::Chest));
        assert_eq!(table.region_for_mesh("Hoodie_Sleeve_L"), Some(Region::Arms));
        assert_eq!(table.region_for_mesh("Zipper"), None);
        assert_eq!(table.meshes_for(Region::Arms).count(), 2);
    }

    #[test]
    fn test_from_ron_requires_all_placements() {
        let table = RegionTable::hoodie();
        let text = ron::to_string(&table).unwrap();
        assert_eq!(RegionTable::from_ron(&text).unwrap(), table);

        let partial = r#"(meshes: {"Body": chest}, placements: {chest: (position: (0.0, 0.0, 0.0), rotation: (0.0, 0.0, 0.0), scale: 0.1)})"#;
        assert!(matches!(
            RegionTable::from_ron(partial),
            Err(RegionTableError::MissingPlacement(_))
        ));
    }
}
