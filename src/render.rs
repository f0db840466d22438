use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use std::io::{self, Stdout, Write};
use std::time::Duration;
use unicode_width::UnicodeWidthStr;

use crate::game::Session;
use crate::maze::{Pos, Tile};

const CELL_W: usize = 2;
const HUD: &str = "Reach the green exit. Arrows/WASD move, q quits.";

/// What a grid coordinate shows this frame. Overlays follow the
/// original draw order: checkpoint over ghost over exit over player
/// over the bare tile.
#[derive(Clone, Copy, PartialEq)]
pub enum Cell {
    Wall,
    Passage,
    Player,
    Exit,
    Ghost,
    Checkpoint,
}

pub struct Renderer {
    dim: usize,
    last: Vec<Cell>,
    origin_x: u16,
    origin_y: u16,
    pub needs_full: bool,
}

impl Renderer {
    pub fn new(dim: usize) -> Self {
        Renderer {
            dim,
            last: vec![Cell::Passage; dim * dim],
            origin_x: 0,
            origin_y: 0,
            needs_full: true,
        }
    }
}

pub fn cell_for(session: &Session, pos: Pos) -> Cell {
    if session.checkpoints.contains(&pos) {
        return Cell::Checkpoint;
    }
    if session.ghosts.contains(&pos) {
        return Cell::Ghost;
    }
    if pos == session.exit {
        return Cell::Exit;
    }
    if pos == session.player {
        return Cell::Player;
    }
    match session.grid[pos.y][pos.x] {
        Tile::Wall => Cell::Wall,
        Tile::Passage => Cell::Passage,
    }
}

/// Draws the board centered in the terminal, redrawing only cells that
/// changed since the last frame. A too-small terminal gets a hint line
/// instead of a clipped board.
pub fn render(stdout: &mut Stdout, session: &Session, renderer: &mut Renderer) -> io::Result<()> {
    let dim = renderer.dim;
    let needed_h = (dim + 2) as u16;
    let needed_w = (dim * CELL_W) as u16;

    let (term_w, term_h) = terminal::size()?;
    if term_w < needed_w || term_h < needed_h {
        stdout.queue(MoveTo(0, 0))?;
        stdout.queue(Clear(ClearType::All))?;
        let msg = format!(
            "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
            needed_w, needed_h, term_w, term_h
        );
        stdout.queue(Print(msg))?;
        stdout.flush()?;
        renderer.needs_full = true;
        return Ok(());
    }

    let origin_x = (term_w - needed_w) / 2;
    let origin_y = (term_h - needed_h) / 2 + 1;
    if origin_x != renderer.origin_x || origin_y != renderer.origin_y {
        renderer.origin_x = origin_x;
        renderer.origin_y = origin_y;
        renderer.needs_full = true;
    }
    if renderer.needs_full {
        stdout.queue(Clear(ClearType::All))?;
        stdout.queue(MoveTo(renderer.origin_x, renderer.origin_y - 1))?;
        stdout.queue(SetForegroundColor(Color::White))?;
        stdout.queue(Print(HUD))?;
        stdout.queue(ResetColor)?;
    }

    for y in 0..dim {
        for x in 0..dim {
            let cell = cell_for(session, Pos { x, y });
            let idx = y * dim + x;
            if renderer.needs_full || cell != renderer.last[idx] {
                renderer.last[idx] = cell;
                draw_cell(stdout, renderer, x, y, cell)?;
            }
        }
    }
    renderer.needs_full = false;

    stdout.flush()?;
    Ok(())
}

fn draw_cell(stdout: &mut Stdout, renderer: &Renderer, x: usize, y: usize, cell: Cell) -> io::Result<()> {
    let (text, color) = match cell {
        Cell::Wall => ("██", Color::DarkBlue),
        Cell::Passage => ("  ", Color::Reset),
        Cell::Player => ("██", Color::Yellow),
        Cell::Exit => ("██", Color::Green),
        Cell::Ghost => ("██", Color::Red),
        Cell::Checkpoint => ("░░", Color::Cyan),
    };
    let x_pos = renderer.origin_x + (x * CELL_W) as u16;
    let y_pos = renderer.origin_y + y as u16;
    stdout.queue(MoveTo(x_pos, y_pos))?;
    stdout.queue(SetForegroundColor(color))?;
    stdout.queue(Print(text))?;
    let w = UnicodeWidthStr::width(text);
    for _ in w..CELL_W {
        stdout.queue(Print(' '))?;
    }
    stdout.queue(ResetColor)?;
    Ok(())
}

/// Shown once the player escapes; holds the alternate screen until `q`.
pub fn render_escape_banner(stdout: &mut Stdout, renderer: &Renderer) -> io::Result<()> {
    stdout.queue(MoveTo(renderer.origin_x, renderer.origin_y - 1))?;
    stdout.queue(Clear(ClearType::CurrentLine))?;
    stdout.queue(SetForegroundColor(Color::Green))?;
    stdout.queue(Print("You escaped the maze! (press q to quit)"))?;
    stdout.queue(ResetColor)?;
    stdout.flush()?;
    loop {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press
                    && matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
                {
                    return Ok(());
                }
            }
        }
    }
}
