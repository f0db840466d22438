use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tile {
    Wall,
    Passage,
}

/// Square grid indexed `grid[y][x]`, dimension `2 * size + 1` per side.
/// Odd/odd coordinates are room cells; anything with an even component
/// is a wall cell that generation may carve into a connector.
pub type Grid = Vec<Vec<Tile>>;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    pub const ALL: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];

    pub fn delta(self) -> (isize, isize) {
        match self {
            Dir::Up => (0, -1),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
        }
    }
}

/// Exit tile: the carved border cell next to the bottom-right room cell.
pub fn exit_pos(size: usize) -> Pos {
    Pos {
        x: size * 2,
        y: size * 2 - 1,
    }
}

/// Carves a perfect maze with an iterative depth-first backtracker.
/// Every room cell ends up connected to (1,1) by exactly one path.
/// `size` counts room cells per side and must be at least 1.
pub fn generate_maze(rng: &mut impl Rng, size: usize) -> Grid {
    assert!(size > 0, "maze size must be at least 1");
    let dim = size * 2 + 1;
    let edge = (size * 2) as isize;
    let mut grid = vec![vec![Tile::Wall; dim]; dim];
    grid[1][1] = Tile::Passage;
    let mut stack = vec![Pos { x: 1, y: 1 }];
    let mut dirs = Dir::ALL;

    while let Some(&top) = stack.last() {
        // Fresh shuffle every pass; a fixed order biases the carve direction.
        dirs.shuffle(rng);
        let mut candidates: Vec<(Pos, Pos)> = Vec::new();
        for dir in dirs {
            let (dx, dy) = dir.delta();
            let nx = top.x as isize + dx * 2;
            let ny = top.y as isize + dy * 2;
            if nx <= 0 || ny <= 0 || nx >= edge || ny >= edge {
                continue;
            }
            if grid[ny as usize][nx as usize] == Tile::Wall {
                let room = Pos {
                    x: nx as usize,
                    y: ny as usize,
                };
                let wall = Pos {
                    x: (top.x as isize + dx) as usize,
                    y: (top.y as isize + dy) as usize,
                };
                candidates.push((room, wall));
            }
        }

        if let Some(&(room, wall)) = candidates.choose(rng) {
            grid[wall.y][wall.x] = Tile::Passage;
            grid[room.y][room.x] = Tile::Passage;
            stack.push(room);
        } else {
            stack.pop();
        }
    }

    // Open the exit tile on the right border. The adjacent room cell is
    // always carved, so this single cell guarantees a way out.
    let exit = exit_pos(size);
    grid[exit.y][exit.x] = Tile::Passage;
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::VecDeque;

    fn reachable_from_start(grid: &Grid) -> Vec<Pos> {
        let dim = grid.len();
        let mut seen = vec![vec![false; dim]; dim];
        let mut out = Vec::new();
        let mut q = VecDeque::new();
        seen[1][1] = true;
        q.push_back(Pos { x: 1, y: 1 });
        while let Some(pos) = q.pop_front() {
            out.push(pos);
            for dir in Dir::ALL {
                let (dx, dy) = dir.delta();
                let nx = pos.x as isize + dx;
                let ny = pos.y as isize + dy;
                if nx < 0 || ny < 0 || nx >= dim as isize || ny >= dim as isize {
                    continue;
                }
                let (nx, ny) = (nx as usize, ny as usize);
                if !seen[ny][nx] && grid[ny][nx] == Tile::Passage {
                    seen[ny][nx] = true;
                    q.push_back(Pos { x: nx, y: ny });
                }
            }
        }
        out
    }

    #[test]
    fn every_room_cell_is_carved_and_reachable() {
        for size in 1..=6 {
            let mut rng = StdRng::seed_from_u64(size as u64);
            let grid = generate_maze(&mut rng, size);
            for y in (1..size * 2).step_by(2) {
                for x in (1..size * 2).step_by(2) {
                    assert_eq!(grid[y][x], Tile::Passage, "room ({x},{y}) size {size}");
                }
            }
            let reached = reachable_from_start(&grid);
            let rooms_reached = reached
                .iter()
                .filter(|p| p.x % 2 == 1 && p.y % 2 == 1)
                .count();
            assert_eq!(rooms_reached, size * size, "size {size}");
        }
    }

    #[test]
    fn carved_walls_form_a_spanning_tree() {
        for size in 2..=6 {
            let mut rng = StdRng::seed_from_u64(100 + size as u64);
            let grid = generate_maze(&mut rng, size);
            // Interior connectors only; the forced exit tile sits on the
            // border and is not an edge between two room cells.
            let mut edges = 0;
            for y in 1..size * 2 {
                for x in 1..size * 2 {
                    if (x % 2 == 1) != (y % 2 == 1) && grid[y][x] == Tile::Passage {
                        edges += 1;
                    }
                }
            }
            assert_eq!(edges, size * size - 1, "size {size}");
        }
    }

    #[test]
    fn exit_is_reachable_from_start() {
        for size in 1..=6 {
            let mut rng = StdRng::seed_from_u64(200 + size as u64);
            let grid = generate_maze(&mut rng, size);
            let exit = exit_pos(size);
            assert!(reachable_from_start(&grid).contains(&exit), "size {size}");
        }
    }

    #[test]
    fn minimal_size_has_expected_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let grid = generate_maze(&mut rng, 1);
        assert_eq!(grid.len(), 3);
        assert!(grid.iter().all(|row| row.len() == 3));
        assert_eq!(grid[1][1], Tile::Passage);
        assert_eq!(exit_pos(1), Pos { x: 2, y: 1 });
        assert_eq!(grid[1][2], Tile::Passage);
    }

    #[test]
    fn same_seed_same_maze() {
        let grid_a = generate_maze(&mut StdRng::seed_from_u64(42), 8);
        let grid_b = generate_maze(&mut StdRng::seed_from_u64(42), 8);
        assert_eq!(grid_a, grid_b);
        let grid_c = generate_maze(&mut StdRng::seed_from_u64(43), 8);
        assert_ne!(grid_a, grid_c);
    }

    #[test]
    #[should_panic(expected = "maze size")]
    fn zero_size_is_rejected() {
        generate_maze(&mut StdRng::seed_from_u64(0), 0);
    }
}
