//! Text rendering of grids and solutions
//!
//! Each tile is drawn three characters wide with box-drawing glyphs. Tiles on
//! the network flowing from the first goal are drawn with heavy lines.

use std::fmt::Write as _;

use crate::algorithm::connectivity::connected_component;
use crate::algorithm::solver::Move;
use crate::spatial::{Connections, Direction, Grid, Position, Tile, TileKind};

// Indexed by stub mask: up=1, right=2, down=4, left=8
const LIGHT_GLYPHS: [char; 16] = [
    ' ', '╵', '╶', '└', '╷', '│', '┌', '├', '╴', '┘', '─', '┴', '┐', '┤', '┬', '┼',
];
const HEAVY_GLYPHS: [char; 16] = [
    ' ', '╹', '╺', '┗', '╻', '┃', '┏', '┣', '╸', '┛', '━', '┻', '┓', '┫', '┳', '╋',
];

/// Centre glyph for a tile
pub fn tile_glyph(tile: &Tile, lit: bool) -> char {
    match tile.kind {
        TileKind::Empty => '·',
        TileKind::Wall => '█',
        TileKind::Crushed => '▓',
        TileKind::Node if tile.is_goal => {
            if lit {
                '◆'
            } else {
                '◇'
            }
        }
        TileKind::Path | TileKind::Node => connection_glyph(tile.connections, lit),
    }
}

/// Box-drawing glyph for a stub set
pub fn connection_glyph(connections: Connections, heavy: bool) -> char {
    let glyphs = if heavy { &HEAVY_GLYPHS } else { &LIGHT_GLYPHS };
    glyphs
        .get(usize::from(connections.bits()))
        .copied()
        .unwrap_or('?')
}

fn filler(tile: &Tile, direction: Direction, lit: bool) -> char {
    if !tile.conducts() || !tile.connections.contains(direction) {
        return ' ';
    }
    if lit { '━' } else { '─' }
}

/// Render a grid as text, one line per row
pub fn render_grid(grid: &Grid, goals: &[Position]) -> String {
    let network = goals
        .first()
        .map(|&goal| connected_component(grid, goal))
        .unwrap_or_default();

    let mut output = String::with_capacity(grid.len() * 4 + grid.rows());
    for (position, tile) in grid.iter() {
        let lit = grid
            .index_of(position)
            .and_then(|index| network.get(index).as_deref().copied())
            .unwrap_or(false);

        output.push(filler(tile, Direction::Left, lit));
        output.push(tile_glyph(tile, lit));
        output.push(filler(tile, Direction::Right, lit));

        if position.x as usize + 1 == grid.cols() {
            output.push('\n');
        }
    }
    output
}

/// Numbered list of solution moves
pub fn format_solution(moves: &[Move]) -> String {
    let mut output = String::new();
    for (index, step) in moves.iter().enumerate() {
        let plural = if step.turns == 1 { "" } else { "s" };
        let _ = writeln!(
            output,
            "{:>3}. rotate {} by {} quarter-turn{plural}",
            index + 1,
            step.position,
            step.turns
        );
    }
    output
}

/// One-line summary of a grid's composition
pub fn grid_summary(grid: &Grid) -> String {
    format!(
        "{}x{} grid: {} path, {} node, {} wall, {} crushed, {} rotatable",
        grid.cols(),
        grid.rows(),
        grid.count_kind(TileKind::Path),
        grid.count_kind(TileKind::Node),
        grid.count_kind(TileKind::Wall),
        grid.count_kind(TileKind::Crushed),
        grid.rotatable_positions().len()
    )
}
