//! PNG charts for release histories and pronoun counts.
//!
//! Charts are plain raster drawings with axes, tick marks and a polyline
//! or bars. They carry no text: the shell prints the same data as labelled
//! text bars before saving, and the file name says what the chart shows.
//! Charts are saved next to the cached payloads.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{ImageFormat, Rgb, RgbImage};

use cadenza_core::derive::{PronounBuckets, ReleaseHistory};

const WIDTH: u32 = 640;
const HEIGHT: u32 = 400;
const MARGIN: u32 = 40;
const TICK: i64 = 5;
/// Upper bound on value ticks along the vertical axis.
const MAX_VALUE_TICKS: u64 = 10;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([60, 60, 60]);
const LINE: Rgb<u8> = Rgb([31, 119, 180]);
const BARS: [Rgb<u8>; 3] = [Rgb([31, 119, 180]), Rgb([255, 127, 14]), Rgb([44, 160, 44])];

/// Keep a name usable as a file stem.
fn file_stem(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn canvas() -> RgbImage {
    let mut img = RgbImage::from_pixel(WIDTH, HEIGHT, BACKGROUND);
    let bottom = i64::from(HEIGHT - MARGIN);
    let left = i64::from(MARGIN);
    draw_line(&mut img, (left, bottom), (i64::from(WIDTH - MARGIN), bottom), AXIS);
    draw_line(&mut img, (left, i64::from(MARGIN)), (left, bottom), AXIS);
    img
}

fn put(img: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
    if let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) {
        if x < img.width() && y < img.height() {
            img.put_pixel(x, y, color);
        }
    }
}

/// Bresenham line between two points, clipped to the image.
fn draw_line(img: &mut RgbImage, from: (i64, i64), to: (i64, i64), color: Rgb<u8>) {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let sx = if x < to.0 { 1 } else { -1 };
    let sy = if y < to.1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        put(img, x, y, color);
        if x == to.0 && y == to.1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

fn fill_rect(img: &mut RgbImage, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb<u8>) {
    for y in y0.min(y1)..=y0.max(y1) {
        for x in x0.min(x1)..=x0.max(x1) {
            put(img, x, y, color);
        }
    }
}

/// Vertical pixel position of `value` on a 0..=`max` scale.
fn scale_y(value: u64, max: u64) -> i64 {
    let plot_height = f64::from(HEIGHT - 2 * MARGIN);
    let y = f64::from(HEIGHT - MARGIN) - value as f64 * plot_height / max.max(1) as f64;
    y.round() as i64
}

/// Tick marks below the horizontal axis, one per category.
fn x_ticks(img: &mut RgbImage, xs: impl IntoIterator<Item = i64>) {
    let bottom = i64::from(HEIGHT - MARGIN);
    for x in xs {
        draw_line(img, (x, bottom), (x, bottom + TICK), AXIS);
    }
}

/// Tick marks left of the vertical axis at whole values up to `max`.
fn y_ticks(img: &mut RgbImage, max: u64) {
    let left = i64::from(MARGIN);
    let step = max.div_ceil(MAX_VALUE_TICKS).max(1);
    for value in (0..=max).step_by(step as usize) {
        let y = scale_y(value, max);
        draw_line(img, (left - TICK, y), (left, y), AXIS);
    }
}

fn save(img: &RgbImage, dir: &Path, file_name: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    let path = dir.join(file_name);
    img.save_with_format(&path, ImageFormat::Png)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("Saved chart {}", path.display());
    Ok(path)
}

/// Line chart of releases per year, saved as `<name>_release_history.png`.
pub fn release_history_chart(history: &ReleaseHistory, name: &str, dir: &Path) -> Result<PathBuf> {
    let mut img = canvas();
    let points = history.points();
    let max = points.iter().map(|(_, c)| u64::from(*c)).max().unwrap_or(0);
    let plot_width = i64::from(WIDTH - 2 * MARGIN);
    let steps = (points.len() as i64 - 1).max(1);

    let pixels: Vec<(i64, i64)> = points
        .iter()
        .enumerate()
        .map(|(i, (_, count))| {
            let x = i64::from(MARGIN) + i as i64 * plot_width / steps;
            (x, scale_y(u64::from(*count), max))
        })
        .collect();

    for pair in pixels.windows(2) {
        draw_line(&mut img, pair[0], pair[1], LINE);
    }
    for &(x, y) in &pixels {
        fill_rect(&mut img, x - 2, y - 2, x + 2, y + 2, LINE);
    }
    x_ticks(&mut img, pixels.iter().map(|&(x, _)| x));
    y_ticks(&mut img, max);

    let file_name = format!("{}_release_history.png", file_stem(&name.to_lowercase()));
    save(&img, dir, &file_name)
}

/// Bar chart of the I / You / They counts, saved as `<title>_lyrics.png`.
pub fn pronoun_chart(buckets: &PronounBuckets, title: &str, dir: &Path) -> Result<PathBuf> {
    let mut img = canvas();
    let counts = buckets.as_array();
    let max = counts.iter().copied().max().unwrap_or(0) as u64;
    let slot = i64::from(WIDTH - 2 * MARGIN) / counts.len() as i64;
    let bottom = i64::from(HEIGHT - MARGIN) - 1;

    x_ticks(&mut img, (0..counts.len() as i64).map(|i| i64::from(MARGIN) + i * slot + slot / 2));
    y_ticks(&mut img, max);

    for (i, (count, color)) in counts.iter().zip(BARS).enumerate() {
        if *count == 0 {
            continue;
        }
        let left = i64::from(MARGIN) + i as i64 * slot + slot / 5;
        let right = left + slot * 3 / 5;
        fill_rect(&mut img, left, scale_y(*count as u64, max), right, bottom, color);
    }

    save(&img, dir, &format!("{}_lyrics.png", file_stem(title)))
}
