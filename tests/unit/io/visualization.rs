//! Tests for box-drawing grid rendering and solution listings

#[cfg(test)]
mod tests {
    use tiletwist::algorithm::solver::Move;
    use tiletwist::io::visualization::{
        connection_glyph, format_solution, grid_summary, render_grid, tile_glyph,
    };
    use tiletwist::spatial::{Connections, Direction, Grid, Position, Tile};

    // Goals at both ends of a 3x1 row with one straight between them
    fn row(horizontal: bool) -> (Grid, Vec<Position>) {
        let left = Position::new(0, 0);
        let right = Position::new(2, 0);
        let turns = u8::from(horizontal);
        let grid = Grid::new(3, 1)
            .with_tile(
                left,
                Tile::node(Connections::from_directions(&[Direction::Right])).goal(),
            )
            .unwrap()
            .with_tile(
                Position::new(1, 0),
                Tile::path(Connections::straight().rotated(turns)),
            )
            .unwrap()
            .with_tile(
                right,
                Tile::node(Connections::from_directions(&[Direction::Left])).goal(),
            )
            .unwrap();
        (grid, vec![left, right])
    }

    // Tests the flowing network is drawn with heavy lines
    // Verified by lighting every tile
    #[test]
    fn test_render_connected_row() {
        let (grid, goals) = row(true);
        assert_eq!(render_grid(&grid, &goals), " ◆━━━━━◆ \n");
    }

    #[test]
    fn test_render_broken_row() {
        let (grid, goals) = row(false);
        assert_eq!(render_grid(&grid, &goals), " ◆━ │ ─◇ \n");
    }

    // Tests one line per row
    // Verified by dropping the row terminator
    #[test]
    fn test_render_shape() {
        let grid = Grid::new(4, 3)
            .with_tile(Position::new(1, 1), Tile::wall())
            .unwrap();
        let text = render_grid(&grid, &[]);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|line| line.chars().count() == 12));
        assert_eq!(lines.get(1).copied(), Some(" ·  █  ·  · "));
    }

    #[test]
    fn test_glyph_tables() {
        assert_eq!(connection_glyph(Connections::CROSS, true), '╋');
        assert_eq!(connection_glyph(Connections::CROSS, false), '┼');
        assert_eq!(connection_glyph(Connections::elbow(), false), '└');
        assert_eq!(connection_glyph(Connections::tee(), true), '┣');
        assert_eq!(connection_glyph(Connections::NONE, false), ' ');

        let pipe = Tile::path(Connections::straight());
        assert_eq!(tile_glyph(&pipe, false), '│');
        assert_eq!(tile_glyph(&pipe.crushed(), false), '▓');
        assert_eq!(tile_glyph(&Tile::empty(), true), '·');
    }

    #[test]
    fn test_format_solution() {
        let moves = [
            Move {
                position: Position::new(1, 0),
                turns: 1,
            },
            Move {
                position: Position::new(3, 2),
                turns: 3,
            },
        ];
        assert_eq!(
            format_solution(&moves),
            "  1. rotate (1, 0) by 1 quarter-turn\n  2. rotate (3, 2) by 3 quarter-turns\n"
        );
        assert!(format_solution(&[]).is_empty());
    }

    #[test]
    fn test_grid_summary() {
        let (grid, _) = row(false);
        assert_eq!(
            grid_summary(&grid),
            "3x1 grid: 1 path, 2 node, 0 wall, 0 crushed, 1 rotatable"
        );
    }
}
