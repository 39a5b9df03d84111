//! Common test fixtures for grid tests.
//!
//! Points and corners are `(lat, lng)` tuples so this crate stays free of
//! the grid crates it is used to test.

/// Bounding box corners as `(from, to)` pairs, meant for orientation 1.
pub mod boxes {
    /// Every cell on the globe.
    pub const GLOBAL: ((f64, f64), (f64, f64)) = ((90.0, -180.0), (-90.0, 180.0));

    /// Continental United States.
    pub const CONUS: ((f64, f64), (f64, f64)) = ((50.0, -130.0), (20.0, -60.0));

    /// Europe.
    pub const EUROPE: ((f64, f64), (f64, f64)) = ((72.0, -15.0), (35.0, 45.0));

    /// A small box around Lawrence, Kansas.
    pub const SMALL: ((f64, f64), (f64, f64)) = ((39.0, -95.5), (38.9, -95.2));

    /// Crosses the antimeridian (Pacific-centric).
    pub const PACIFIC: ((f64, f64), (f64, f64)) = ((50.0, 160.0), (-50.0, -140.0));

    /// Straddles the antimeridian near the equator.
    pub const ANTIMERIDIAN: ((f64, f64), (f64, f64)) = ((10.0, 170.0), (-10.0, -170.0));

    /// Polar cap above the icosahedron vertex latitude.
    pub const ARCTIC: ((f64, f64), (f64, f64)) = ((90.0, -180.0), (70.0, 180.0));

    /// A box containing the south pole.
    pub const ANTARCTIC: ((f64, f64), (f64, f64)) = ((-70.0, 0.0), (-90.0, 60.0));
}

/// Well-known points as `(lat, lng)`.
pub mod points {
    pub const NORTH_POLE: (f64, f64) = (90.0, 0.0);
    pub const SOUTH_POLE: (f64, f64) = (-90.0, 0.0);
    pub const NULL_ISLAND: (f64, f64) = (0.0, 0.0);
    pub const LAWRENCE_KS: (f64, f64) = (38.9717, -95.2353);
    pub const SAO_PAULO: (f64, f64) = (-23.5505, -46.6333);
    pub const TOKYO: (f64, f64) = (35.6762, 139.6503);
    pub const FIJI: (f64, f64) = (-17.7134, 178.065);
    pub const MCMURDO: (f64, f64) = (-77.846, 166.676);
    pub const LONGYEARBYEN: (f64, f64) = (78.2232, 15.6267);

    /// All named points.
    pub const ALL: [(f64, f64); 9] = [
        NORTH_POLE,
        SOUTH_POLE,
        NULL_ISLAND,
        LAWRENCE_KS,
        SAO_PAULO,
        TOKYO,
        FIJI,
        MCMURDO,
        LONGYEARBYEN,
    ];
}

/// Resolutions worth exercising: the default, the degenerate single-cell
/// rhomboid, small even/odd counts, and a finer grid.
pub const RESOLUTIONS: [u32; 6] = [1, 2, 3, 4, 7, 12];
