use crate::maze::{Dir, Grid, Pos, Tile};

fn manhattan(a: Pos, b: Pos) -> usize {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

/// Advances every ghost one step toward the player: of the passage
/// neighbors, take the one with the smallest Manhattan distance to the
/// player. Ties go to the first candidate in up/down/left/right order,
/// so the step is fully deterministic. Greedy and non-lookahead; a ghost
/// can park itself against a wall that happens to face the player.
///
/// A ghost with no passage neighbor stays put.
pub fn move_ghosts(ghosts: &mut [Pos], player: Pos, grid: &Grid) {
    let dim = grid.len() as isize;
    for ghost in ghosts.iter_mut() {
        let mut best: Option<(Pos, usize)> = None;
        for dir in Dir::ALL {
            let (dx, dy) = dir.delta();
            let nx = ghost.x as isize + dx;
            let ny = ghost.y as isize + dy;
            if nx < 0 || ny < 0 || nx >= dim || ny >= dim {
                continue;
            }
            let next = Pos {
                x: nx as usize,
                y: ny as usize,
            };
            if grid[next.y][next.x] != Tile::Passage {
                continue;
            }
            let d = manhattan(next, player);
            if best.map_or(true, |(_, bd)| d < bd) {
                best = Some((next, d));
            }
        }
        if let Some((next, _)) = best {
            *ghost = next;
        }
    }
}
