use proptest::prelude::*;
use zfxy::{LngLatAlt, MAX_ZOOM, ZfxyTile, hilbert, projection, tilehash};

/// Any valid address whose `f` has a tilehash: `|f| < 2^z`.
fn tile_strategy() -> impl Strategy<Value = ZfxyTile> {
    (1u8..=MAX_ZOOM).prop_flat_map(|z| {
        let n = 1i64 << z;
        (Just(z), -(n - 1)..n, 0..n, 0..n).prop_map(|(z, f, x, y)| ZfxyTile {
            z,
            f: f as i32,
            x: x as u32,
            y: y as u32,
        })
    })
}

/// Any valid address inside the Hilbert range `-2^(z-1) <= f < 2^(z-1)`.
fn hilbert_tile_strategy() -> impl Strategy<Value = ZfxyTile> {
    (1u8..=MAX_ZOOM).prop_flat_map(|z| {
        let n = 1i64 << z;
        let half = n / 2;
        (Just(z), -half..half, 0..n, 0..n).prop_map(|(z, f, x, y)| ZfxyTile {
            z,
            f: f as i32,
            x: x as u32,
            y: y as u32,
        })
    })
}

proptest! {
    #[test]
    fn test_tilehash_round_trip(tile in tile_strategy()) {
        let hash = tilehash::encode(&tile)?;
        prop_assert_eq!(hash.trim_start_matches('-').len(), tile.z as usize);
        prop_assert_eq!(tilehash::decode(&hash)?, tile);
    }

    #[test]
    fn test_hilbert_round_trip(tile in hilbert_tile_strategy()) {
        let hash = hilbert::encode(&tile)?;
        prop_assert_eq!(hash.len(), tile.z as usize + 1);
        prop_assert_eq!(hilbert::decode(&hash)?, tile);
    }

    #[test]
    fn test_hilbert_curve_round_trip(
        bits in 0u32..=28,
        seed in any::<(u64, u64, u64)>()
    ) {
        let mask = (1u64 << bits) - 1;
        let (x, y, z) = (seed.0 & mask, seed.1 & mask, seed.2 & mask);
        let index = hilbert::encode_3d(x, y, z, bits)?;
        prop_assert_eq!(hilbert::decode_3d(index, bits)?, (x, y, z));
    }

    #[test]
    fn test_parent_of_children(tile in tile_strategy()) {
        prop_assume!(tile.z < MAX_ZOOM);
        for child in tile.children()? {
            prop_assert_eq!(child.parent()?, tile);
        }
    }

    #[test]
    fn test_forward_lands_inside_bbox(
        lng in -179.9..179.9_f64,
        lat in -85.0..85.0_f64,
        zoom in 0u8..=24
    ) {
        let tile = projection::forward(&LngLatAlt::from_lng_lat(lng, lat), zoom)?;
        let (nw, se) = projection::bbox(&tile);
        let slack = 1e-9;
        prop_assert!(nw.x() - slack <= lng && lng <= se.x() + slack);
        prop_assert!(se.y() - slack <= lat && lat <= nw.y() + slack);
    }

    #[test]
    fn test_neighbors_are_distinct_away_from_root(tile in tile_strategy()) {
        prop_assume!(tile.z >= 2 && tile.f.unsigned_abs() < (1u32 << tile.z) - 1);
        let mut neighbors = tile.neighbors_3d();
        prop_assert_eq!(neighbors.len(), 26);
        prop_assert!(!neighbors.contains(&tile));
        neighbors.sort();
        neighbors.dedup();
        prop_assert_eq!(neighbors.len(), 26);
    }
}
