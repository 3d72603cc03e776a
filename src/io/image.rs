//! PNG and GIF export of grid snapshots

use image::{Frame, Rgba, RgbaImage};
use std::fs::File;
use std::path::Path;

use crate::algorithm::connectivity::connected_component;
use crate::algorithm::solver::Move;
use crate::io::configuration::TILE_PIXELS;
use crate::io::error::{PuzzleError, Result};
use crate::spatial::{Direction, Grid, Position, Tile, TileKind};

const BACKGROUND: Rgba<u8> = Rgba([34, 34, 42, 255]);
const WALL: Rgba<u8> = Rgba([90, 90, 100, 255]);
const CRUSHED: Rgba<u8> = Rgba([120, 40, 40, 255]);
const FIXED_TILE: Rgba<u8> = Rgba([52, 52, 64, 255]);
const ROTATABLE_TILE: Rgba<u8> = Rgba([64, 72, 96, 255]);
const PIPE: Rgba<u8> = Rgba([170, 170, 180, 255]);
const FLOWING_PIPE: Rgba<u8> = Rgba([80, 200, 255, 255]);
const GOAL: Rgba<u8> = Rgba([255, 196, 64, 255]);

fn fill_rect(img: &mut RgbaImage, x0: u32, y0: u32, width: u32, height: u32, color: Rgba<u8>) {
    for y in y0..(y0 + height).min(img.height()) {
        for x in x0..(x0 + width).min(img.width()) {
            img.put_pixel(x, y, color);
        }
    }
}

fn draw_tile(img: &mut RgbaImage, position: Position, tile: &Tile, lit: bool) {
    let size = TILE_PIXELS;
    let x0 = position.x as u32 * size;
    let y0 = position.y as u32 * size;

    let background = match tile.kind {
        TileKind::Empty => BACKGROUND,
        TileKind::Wall => WALL,
        TileKind::Crushed => CRUSHED,
        TileKind::Path | TileKind::Node if tile.can_rotate => ROTATABLE_TILE,
        TileKind::Path | TileKind::Node => FIXED_TILE,
    };
    fill_rect(img, x0, y0, size, size, background);
    if !tile.conducts() {
        return;
    }

    // Pipes are a third of a tile wide and run from the centre to each stub edge
    let pipe = size / 3;
    let pipe_color = if lit { FLOWING_PIPE } else { PIPE };
    for direction in tile.connections.directions() {
        match direction {
            Direction::Up => fill_rect(img, x0 + pipe, y0, pipe, 2 * pipe, pipe_color),
            Direction::Down => fill_rect(img, x0 + pipe, y0 + pipe, pipe, size - pipe, pipe_color),
            Direction::Left => fill_rect(img, x0, y0 + pipe, 2 * pipe, pipe, pipe_color),
            Direction::Right => fill_rect(img, x0 + pipe, y0 + pipe, size - pipe, pipe, pipe_color),
        }
    }
    if tile.is_goal {
        let inset = size / 4;
        fill_rect(img, x0 + inset, y0 + inset, size - 2 * inset, size - 2 * inset, GOAL);
    }
}

/// Render a grid as an image, `TILE_PIXELS` square per tile
///
/// Pipes on the network flowing from the first goal are highlighted.
pub fn render_grid_image(grid: &Grid, goals: &[Position]) -> RgbaImage {
    let network = goals
        .first()
        .map(|&goal| connected_component(grid, goal))
        .unwrap_or_default();

    let mut img = RgbaImage::from_pixel(
        grid.cols() as u32 * TILE_PIXELS,
        grid.rows() as u32 * TILE_PIXELS,
        BACKGROUND,
    );
    for (position, tile) in grid.iter() {
        let lit = grid
            .index_of(position)
            .and_then(|index| network.get(index).as_deref().copied())
            .unwrap_or(false);
        draw_tile(&mut img, position, tile, lit);
    }
    img
}

fn ensure_parent(output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| PuzzleError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }
    Ok(())
}

/// Export a grid snapshot as a PNG image
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_grid_as_png(grid: &Grid, goals: &[Position], output_path: &Path) -> Result<()> {
    ensure_parent(output_path)?;
    render_grid_image(grid, goals)
        .save(output_path)
        .map_err(|e| PuzzleError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}

/// Export an animated replay of a move sequence as a GIF
///
/// The first frame shows the starting grid and each move adds one frame. The
/// final frame is held longer.
///
/// # Errors
///
/// Returns an error if:
/// - A move targets a tile that cannot rotate
/// - File system operations fail
/// - GIF encoding fails
pub fn export_solution_gif(
    grid: &Grid,
    goals: &[Position],
    moves: &[Move],
    output_path: &Path,
    frame_delay_ms: u32,
) -> Result<()> {
    let delay = image::Delay::from_numer_denom_ms(frame_delay_ms, 1);
    let mut current = grid.clone();
    let mut frames = vec![Frame::from_parts(
        render_grid_image(&current, goals),
        0,
        0,
        delay,
    )];

    for step in moves {
        current = current.rotated(step.position, step.turns)?;
        frames.push(Frame::from_parts(
            render_grid_image(&current, goals),
            0,
            0,
            delay,
        ));
    }

    // Final frame displays longer for better visibility
    let hold = image::Delay::from_numer_denom_ms(frame_delay_ms.saturating_mul(5), 1);
    frames.push(Frame::from_parts(
        render_grid_image(&current, goals),
        0,
        0,
        hold,
    ));

    ensure_parent(output_path)?;
    let file = File::create(output_path).map_err(|e| PuzzleError::FileSystem {
        path: output_path.to_path_buf(),
        operation: "create file",
        source: e,
    })?;

    let mut encoder = image::codecs::gif::GifEncoder::new(file);
    encoder
        .encode_frames(frames)
        .map_err(|e| PuzzleError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
