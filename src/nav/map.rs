//! Terrain map: hex-keyed tile storage with weighted generation
//!
//! Maps are built once at game start and stay fixed; only bridge state
//! changes afterwards, and that lives in the oracle's snapshot.

use ahash::AHashMap;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::nav::hex::HexCoord;
use crate::nav::terrain::{BridgeSide, TileKind};

/// Weighted terrain distribution used once at map-build time
///
/// Weights are relative, not normalized; selection divides by the total.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TerrainWeights {
    pub farmland: f32,
    pub forest: f32,
    pub hill: f32,
    pub mountain: f32,
}

impl Default for TerrainWeights {
    fn default() -> Self {
        Self {
            farmland: 0.25,
            forest: 0.30,
            hill: 0.15,
            mountain: 0.10,
        }
    }
}

impl TerrainWeights {
    /// Pick a kind by weighted draw
    pub fn select(&self, rng: &mut impl Rng) -> TileKind {
        let entries = [
            (TileKind::Farmland, self.farmland),
            (TileKind::Forest, self.forest),
            (TileKind::Hill, self.hill),
            (TileKind::Mountain, self.mountain),
        ];
        let total: f32 = entries.iter().map(|(_, w)| w).sum();
        let mut roll = rng.gen::<f32>() * total;

        for (kind, weight) in entries {
            roll -= weight;
            if roll <= 0.0 {
                return kind;
            }
        }

        TileKind::Farmland
    }
}

/// A bridge zone: the water hexes one drawbridge spans
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeZone {
    pub side: BridgeSide,
    pub hexes: Vec<HexCoord>,
}

impl BridgeZone {
    pub fn contains(&self, hex: HexCoord) -> bool {
        self.hexes.contains(&hex)
    }
}

/// The full terrain map: a hexagonal region of tiles around the origin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainMap {
    tiles: AHashMap<HexCoord, TileKind>,
    radius: u32,
    bridges: Vec<BridgeZone>,
}

impl TerrainMap {
    /// Create a map of all-farmland tiles
    pub fn new(radius: u32) -> Self {
        Self::uniform(radius, TileKind::Farmland)
    }

    /// Create a map where every tile is the same kind
    pub fn uniform(radius: u32, kind: TileKind) -> Self {
        let center = HexCoord::new(0, 0);
        let tiles = center.range(radius).into_iter().map(|h| (h, kind)).collect();
        Self {
            tiles,
            radius,
            bridges: Vec::new(),
        }
    }

    /// Generate a map using the weighted terrain distribution
    pub fn generate(radius: u32, weights: &TerrainWeights, rng: &mut impl Rng) -> Self {
        let center = HexCoord::new(0, 0);
        let tiles = center
            .range(radius)
            .into_iter()
            .map(|h| (h, weights.select(rng)))
            .collect();
        Self {
            tiles,
            radius,
            bridges: Vec::new(),
        }
    }

    /// Generate a map split by a river along q = 0, with one bridge on
    /// each side of the center
    pub fn with_river(radius: u32, weights: &TerrainWeights, rng: &mut impl Rng) -> Self {
        let mut map = Self::generate(radius, weights, rng);

        let channel: Vec<HexCoord> = map
            .coords()
            .filter(|h| h.q == 0)
            .collect();
        map.carve_channel(&channel);

        let half = (radius / 2) as i32;
        map.add_bridge(BridgeSide::Left, vec![HexCoord::new(0, -half)]);
        map.add_bridge(BridgeSide::Right, vec![HexCoord::new(0, half)]);
        map
    }

    /// Turn the given hexes into water (out-of-bounds hexes are ignored)
    pub fn carve_channel(&mut self, hexes: &[HexCoord]) {
        for hex in hexes {
            if let Some(kind) = self.tiles.get_mut(hex) {
                *kind = TileKind::Water;
            }
        }
    }

    /// Register a bridge zone over existing water hexes
    pub fn add_bridge(&mut self, side: BridgeSide, hexes: Vec<HexCoord>) {
        self.bridges.push(BridgeZone { side, hexes });
    }

    /// Tile kind at a coordinate, None when out of bounds
    pub fn kind(&self, hex: HexCoord) -> Option<TileKind> {
        self.tiles.get(&hex).copied()
    }

    /// Overwrite a tile kind (map setup and tests)
    pub fn set_kind(&mut self, hex: HexCoord, kind: TileKind) {
        if let Some(slot) = self.tiles.get_mut(&hex) {
            *slot = kind;
        }
    }

    /// Which bridge, if any, spans this hex
    pub fn bridge_at(&self, hex: HexCoord) -> Option<BridgeSide> {
        self.bridges
            .iter()
            .find(|zone| zone.contains(hex))
            .map(|zone| zone.side)
    }

    pub fn in_bounds(&self, hex: HexCoord) -> bool {
        self.tiles.contains_key(&hex)
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Iterate all coordinates on the map
    pub fn coords(&self) -> impl Iterator<Item = HexCoord> + '_ {
        self.tiles.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_map_tile_count() {
        let map = TerrainMap::new(8);
        // 3r(r+1)+1 tiles in a hexagonal region
        assert_eq!(map.tile_count(), 217);
    }

    #[test]
    fn test_out_of_bounds_is_none() {
        let map = TerrainMap::new(3);
        assert!(map.kind(HexCoord::new(0, 0)).is_some());
        assert!(map.kind(HexCoord::new(10, 10)).is_none());
    }

    #[test]
    fn test_generated_map_uses_all_in_bounds_tiles() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let map = TerrainMap::generate(5, &TerrainWeights::default(), &mut rng);
        assert_eq!(map.tile_count(), 91);
        for hex in HexCoord::new(0, 0).range(5) {
            assert!(map.kind(hex).is_some());
        }
    }

    #[test]
    fn test_generation_deterministic_for_seed() {
        let weights = TerrainWeights::default();
        let a = TerrainMap::generate(4, &weights, &mut ChaCha8Rng::seed_from_u64(42));
        let b = TerrainMap::generate(4, &weights, &mut ChaCha8Rng::seed_from_u64(42));
        for hex in HexCoord::new(0, 0).range(4) {
            assert_eq!(a.kind(hex), b.kind(hex));
        }
    }

    #[test]
    fn test_skewed_weights_dominate() {
        let weights = TerrainWeights {
            farmland: 1.0,
            forest: 0.0,
            hill: 0.0,
            mountain: 0.0,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let map = TerrainMap::generate(4, &weights, &mut rng);
        for hex in map.coords().collect::<Vec<_>>() {
            assert_eq!(map.kind(hex), Some(TileKind::Farmland));
        }
    }

    #[test]
    fn test_river_map_has_water_column_and_bridges() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let map = TerrainMap::with_river(6, &TerrainWeights::default(), &mut rng);

        for r in -6..=6 {
            let hex = HexCoord::new(0, r);
            if map.in_bounds(hex) {
                assert_eq!(map.kind(hex), Some(TileKind::Water));
            }
        }

        assert_eq!(map.bridge_at(HexCoord::new(0, -3)), Some(BridgeSide::Left));
        assert_eq!(map.bridge_at(HexCoord::new(0, 3)), Some(BridgeSide::Right));
        assert_eq!(map.bridge_at(HexCoord::new(0, 0)), None);
    }

    #[test]
    fn test_carve_ignores_out_of_bounds() {
        let mut map = TerrainMap::new(2);
        map.carve_channel(&[HexCoord::new(50, 50)]);
        assert!(map.kind(HexCoord::new(50, 50)).is_none());
    }
}
