use rand::Rng;

use crate::ghost::move_ghosts;
use crate::maze::{exit_pos, generate_maze, Dir, Grid, Pos, Tile};

/// Where a session stands after a tick. `Captured` asks the driver for a
/// brand-new session; `Escaped` and `Quit` end the process.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum State {
    Running,
    Captured,
    Escaped,
    Quit,
}

/// Keyboard input drained from the event queue since the previous tick.
#[derive(Default)]
pub struct InputBatch {
    pub moves: Vec<Dir>,
    pub quit: bool,
}

pub struct Session {
    pub grid: Grid,
    pub player: Pos,
    pub ghosts: Vec<Pos>,
    pub checkpoints: [Pos; 3],
    pub exit: Pos,
}

impl Session {
    pub fn new(rng: &mut impl Rng, size: usize) -> Self {
        let grid = generate_maze(rng, size);
        let player = Pos { x: 1, y: 1 };
        let exit = exit_pos(size);
        // Two ghosts near the player/exit midpoint, one shifted right.
        // The shifted one can land on a wall cell; its first step takes
        // it onto a passage neighbor.
        let mid = Pos {
            x: (player.x + exit.x) / 2,
            y: (player.y + exit.y) / 2,
        };
        let ghosts = vec![mid, Pos { x: mid.x + 1, y: mid.y }];
        let near = 2.min(size);
        let far = size.saturating_sub(2);
        let checkpoints = [
            Pos { x: size / 2, y: size / 2 },
            Pos { x: far, y: near },
            Pos { x: near, y: far },
        ];
        Session {
            grid,
            player,
            ghosts,
            checkpoints,
            exit,
        }
    }

    fn open(&self, x: isize, y: isize) -> bool {
        let dim = self.grid.len() as isize;
        if x < 0 || y < 0 || x >= dim || y >= dim {
            return false;
        }
        self.grid[y as usize][x as usize] == Tile::Passage
    }

    /// One game tick: apply the input batch to the player, advance the
    /// ghosts toward the post-move player, then check capture before
    /// escape (a ghost reaching the exit tile with the player still
    /// means capture).
    ///
    /// Each press is validated against the player's position at the
    /// start of the tick and overwrites just its own axis, so two
    /// presses on different axes in one batch combine into a diagonal
    /// step. Inherited quirk, kept on purpose.
    pub fn tick(&mut self, input: &InputBatch) -> State {
        if input.quit {
            return State::Quit;
        }

        let from = self.player;
        let mut new_x = from.x;
        let mut new_y = from.y;
        for &dir in &input.moves {
            let (dx, dy) = dir.delta();
            if !self.open(from.x as isize + dx, from.y as isize + dy) {
                continue;
            }
            match dir {
                Dir::Up | Dir::Down => new_y = (from.y as isize + dy) as usize,
                Dir::Left | Dir::Right => new_x = (from.x as isize + dx) as usize,
            }
        }
        // Ghost check against pre-advancement positions; the capture
        // check below uses the advanced ones.
        let target = Pos { x: new_x, y: new_y };
        if !self.ghosts.contains(&target) {
            self.player = target;
        }

        move_ghosts(&mut self.ghosts, self.player, &self.grid);

        if self.ghosts.contains(&self.player) {
            State::Captured
        } else if self.player == self.exit {
            State::Escaped
        } else {
            State::Running
        }
    }
}
