// ─────────────────────────────────────────────────────────────────────
// Gravgrad — Post-processing (Mean Removal)
// ─────────────────────────────────────────────────────────────────────
//! Zero-mean normalisation of each output channel.
//!
//! Must run once on the fully superposed grids; the mean of a partial
//! sum is not the mean of the total field.

use crate::grids::{Channel, Grid2, OutputGrids};

/// Subtract the grid's arithmetic mean from every cell. Returns the mean.
pub fn remove_mean(grid: &mut Grid2) -> f64 {
    let mean = grid.mean();
    grid.sub_scalar(mean);
    mean
}

/// Remove the mean of every channel independently.
///
/// Returns the removed means in channel order so a report can restore
/// absolute levels.
pub fn remove_means(grids: &mut OutputGrids) -> Vec<(Channel, f64)> {
    grids
        .iter_mut()
        .map(|(channel, grid)| {
            let mean = remove_mean(grid);
            log::debug!("removed mean {mean:.6e} from {channel}");
            (channel, mean)
        })
        .collect()
}
