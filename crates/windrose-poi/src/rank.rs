//! Distance sorting and bearing-sector deduplication for category results.

use crate::site::Site;

const SECTOR_COUNT: usize = 12;
const SECTOR_WIDTH_DEG: f64 = 30.0;

/// Apply the full ranking pipeline: sort by ascending distance, then keep at
/// most one site per 30-degree bearing sector. The two stages always run
/// together and in this order; the sector filter keeps the first entry it
/// sees per sector, which after sorting is the nearest one.
pub fn rank_sites(sites: &mut Vec<Site>) {
    sort_by_distance(sites);
    filter_by_bearing(sites);
}

/// Stable sort by ascending distance; equal distances keep their input order.
pub fn sort_by_distance(sites: &mut [Site]) {
    sites.sort_by(|a, b| a.distance.total_cmp(&b.distance));
}

/// Keep at most one site per bearing sector, preserving input order among the
/// survivors. The circle is split into 12 fixed sectors of 30 degrees each;
/// a bearing exactly on a boundary belongs to the sector starting there.
pub fn filter_by_bearing(sites: &mut Vec<Site>) {
    let mut filled = [false; SECTOR_COUNT];

    sites.retain(|site| {
        let sector = sector_index(site.bearing);
        if filled[sector] {
            false
        } else {
            filled[sector] = true;
            true
        }
    });
}

/// Sector index in `0..12`. The mod-12 wrap makes the index independent of
/// whether the bearing was normalized to `[0, 360)` or left in `(-180, 180]`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn sector_index(bearing: f64) -> usize {
    let sector = ((bearing + 180.0) / SECTOR_WIDTH_DEG).floor();
    #[allow(clippy::cast_precision_loss)]
    let wrapped = sector.rem_euclid(SECTOR_COUNT as f64);
    wrapped as usize
}
