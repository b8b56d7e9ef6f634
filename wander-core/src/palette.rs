//! RGB shading of a generated grid for previews.
//!
//! Every function returns one `[r, g, b]` triple per cell in row-major order
//! and performs no I/O.

use crate::worldgen::TerrainGrid;

/// Base colour of lowland terrain before altitude scaling.
const LAND_RGB: [f64; 3] = [224.0, 128.0, 64.0];
/// Red and green of open water; blue comes from depth.
const WATER_RED: f64 = 16.0;
const WATER_MAX_BLUE: f64 = 128.0;

/// Temperature ramp from frozen (white) to scorching (dark red).
const TEMPERATURE_RAMP: [[u8; 3]; 11] = [
    [0xff, 0xff, 0xff],
    [0xd9, 0x6f, 0xeb],
    [0x90, 0x4a, 0xc4],
    [0x30, 0x1c, 0x8d],
    [0x07, 0xbb, 0xe0],
    [0x00, 0xd6, 0x88],
    [0x60, 0xcd, 0x0f],
    [0xfe, 0xff, 0x04],
    [0xf8, 0x79, 0x06],
    [0xd3, 0x25, 0x02],
    [0xa0, 0x09, 0x02],
];

/// Relief-shaded terrain.
///
/// Land is brown scaled by altitude and darkened by half for each higher
/// neighbour to the north or west, so slopes facing away from the north-west
/// light fall into shadow. Cells above the snow line turn pale blue-white.
/// Water is a dark blue that brightens towards sea level.
#[must_use]
pub fn terrain_rgb(grid: &TerrainGrid) -> Vec<[u8; 3]> {
    let width = grid.width() as usize;
    let sealevel = f64::from(grid.sealevel());
    let cells = grid.cells();

    cells
        .iter()
        .enumerate()
        .map(|(idx, cell)| {
            let altitude = cell.altitude;
            if altitude <= grid.sealevel() {
                let blue = WATER_MAX_BLUE * f64::from(altitude) / sealevel;
                return rgb(WATER_RED, 0.0, blue);
            }

            let mut brightness = f64::from(altitude) / (255.0 - sealevel);
            let (x, y) = (idx % width, idx / width);
            if y > 0 && cells[idx - width].altitude > altitude {
                brightness *= 0.5;
            }
            if x > 0 && cells[idx - 1].altitude > altitude {
                brightness *= 0.5;
            }

            let [red, green, blue] = LAND_RGB.map(|c| c * brightness);
            if altitude > grid.snowline() {
                let snow = green * 3.0;
                rgb(snow, snow, snow * 1.25)
            } else {
                rgb(red, green, blue)
            }
        })
        .collect()
}

/// Temperature through an 11-stop colour ramp.
#[must_use]
pub fn temperature_rgb(grid: &TerrainGrid) -> Vec<[u8; 3]> {
    grid.cells()
        .iter()
        .map(|cell| sample_ramp(cell.temperature))
        .collect()
}

/// Rainfall in the blue channel.
#[must_use]
pub fn rainfall_rgb(grid: &TerrainGrid) -> Vec<[u8; 3]> {
    grid.cells().iter().map(|cell| [0, 0, cell.rainfall]).collect()
}

/// Linear blend between the two ramp stops around `temperature`.
fn sample_ramp(temperature: u8) -> [u8; 3] {
    let last = TEMPERATURE_RAMP.len() - 1;
    let position = f64::from(temperature) / 255.0 * last as f64;
    let low = (position.floor() as usize).min(last);
    let high = (low + 1).min(last);
    let t = position - low as f64;

    let [r0, g0, b0] = TEMPERATURE_RAMP[low].map(f64::from);
    let [r1, g1, b1] = TEMPERATURE_RAMP[high].map(f64::from);
    rgb(
        r0 + (r1 - r0) * t,
        g0 + (g1 - g0) * t,
        b0 + (b1 - b0) * t,
    )
}

fn rgb(red: f64, green: f64, blue: f64) -> [u8; 3] {
    [red, green, blue].map(|c| c.round().clamp(0.0, 255.0) as u8)
}
