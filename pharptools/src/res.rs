//! Resolution catalog: the bin widths the instrument can run at
//!
//! The hardware has a single base resolution (ps per bin). Coarser
//! resolutions come from "binning", merging `2^binning` native bins into
//! one, so the valid choices are `base * 2^n` for `n` in `0..STEPS`.

use crate::{Error, Result};

/// Number of binning steps the instrument supports
pub const STEPS: usize = 8;

/// Largest base resolution (ps) whose coarsest step still fits in a `u32`
pub const MAX_BASE: u32 = u32::MAX >> (STEPS - 1);

/// All valid resolutions (ps) for a base resolution, strictly increasing
pub fn enumerate(base: u32) -> Result<[u32; STEPS]> {
    if base == 0 || base > MAX_BASE {
        return Err(Error::UnsupportedBase { base });
    }
    let mut res = [0; STEPS];
    for (n, r) in res.iter_mut().enumerate() {
        *r = base << n;
    }
    Ok(res)
}

/// Binning exponent for a requested resolution, i.e. `log2(resolution / base)`.
///
/// Fails unless `resolution` is exactly one of the catalog entries.
pub fn resolution_to_binning(resolution: u32, base: u32) -> Result<u8> {
    let invalid = Error::InvalidResolution { resolution, base };
    if base == 0 || resolution == 0 || resolution % base != 0 {
        return Err(invalid);
    }
    let ratio = resolution / base;
    if !ratio.is_power_of_two() {
        return Err(invalid);
    }
    let binning = ratio.trailing_zeros() as usize;
    if binning >= STEPS {
        return Err(invalid);
    }
    Ok(binning as u8)
}

/// Resolution (ps) the device runs at for a given binning exponent
pub fn binning_to_resolution(binning: u8, base: u32) -> Result<u32> {
    if binning as usize >= STEPS {
        return Err(Error::InvalidSettings {
            field: "binning",
            value: binning.into(),
        });
    }
    1u32.checked_shl(binning.into())
        .and_then(|m| base.checked_mul(m))
        .ok_or(Error::UnsupportedBase { base })
}

/// The catalog for one device, fixed at startup from its base resolution
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct Catalog {
    base: u32,
    options: [u32; STEPS],
}

impl Catalog {
    pub fn new(base: u32) -> Result<Self> {
        Ok(Catalog {
            base,
            options: enumerate(base)?,
        })
    }

    pub fn base(&self) -> u32 {
        self.base
    }

    pub fn options(&self) -> &[u32] {
        &self.options
    }

    pub fn binning(&self, resolution: u32) -> Result<u8> {
        resolution_to_binning(resolution, self.base)
    }

    /// Step `steps` entries up or down the catalog from `resolution`,
    /// clamping at either end. Unknown resolutions snap to the base.
    pub fn step(&self, resolution: u32, steps: isize) -> u32 {
        let i = self.options.iter().position(|&r| r == resolution).unwrap_or(0) as isize;
        let j = (i + steps).clamp(0, STEPS as isize - 1);
        self.options[j as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picoharp_catalog() {
        assert_eq!([4, 8, 16, 32, 64, 128, 256, 512], enumerate(4).unwrap());
    }

    #[test]
    fn catalog_is_strictly_increasing() {
        for base in [1u32, 3, 4, 25, 1000, 1 << 20] {
            let res = enumerate(base).unwrap();
            assert_eq!(STEPS, res.len());
            for (i, r) in res.iter().enumerate() {
                assert_eq!(base * (1 << i), *r);
            }
            assert!(res.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn binning_roundtrip() {
        for base in [1u32, 4, 7, 250] {
            for r in enumerate(base).unwrap() {
                let b = resolution_to_binning(r, base).unwrap();
                assert_eq!(r, binning_to_resolution(b, base).unwrap());
            }
        }
    }

    #[test]
    fn resolutions_outside_catalog() {
        assert!(matches!(
            resolution_to_binning(12, 4),
            Err(Error::InvalidResolution { resolution: 12, base: 4 })
        ));
        // below base
        assert!(resolution_to_binning(2, 4).is_err());
        assert!(resolution_to_binning(0, 4).is_err());
        // 2^8, one past the last step
        assert!(resolution_to_binning(4 * 256, 4).is_err());
        assert!(resolution_to_binning(4, 0).is_err());
    }

    #[test]
    fn base_too_large_for_catalog() {
        assert!(matches!(enumerate(40_000_000), Err(Error::UnsupportedBase { base: 40_000_000 })));
        assert!(matches!(enumerate(0), Err(Error::UnsupportedBase { base: 0 })));
        assert_eq!(MAX_BASE << 7, enumerate(MAX_BASE).unwrap()[STEPS - 1]);
        assert!(matches!(
            binning_to_resolution(7, MAX_BASE + 1),
            Err(Error::UnsupportedBase { .. })
        ));
    }

    #[test]
    fn binning_past_last_step() {
        assert!(matches!(
            binning_to_resolution(40, 4),
            Err(Error::InvalidSettings { field: "binning", value: 40 })
        ));
        assert!(binning_to_resolution(8, 4).is_err());
        assert_eq!(512, binning_to_resolution(7, 4).unwrap());
    }

    #[test]
    fn stepping_clamps() {
        let c = Catalog::new(4).unwrap();
        assert_eq!(8, c.step(4, 1));
        assert_eq!(4, c.step(4, -1));
        assert_eq!(512, c.step(256, 3));
        assert_eq!(8, c.step(5, 1));
    }
}
