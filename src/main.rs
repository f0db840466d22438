mod game;
mod ghost;
mod maze;
mod render;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, Stdout};
use std::thread;
use std::time::{Duration, Instant};

use game::{InputBatch, Session, State};
use maze::Dir;
use render::{render, render_escape_banner, Renderer};

const MAZE_SIZE: usize = 15;
const DEFAULT_TICK_MS: u64 = 140;
const DEFAULT_RENDER_FPS: u64 = 60;

fn main() -> io::Result<()> {
    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn run(stdout: &mut Stdout) -> io::Result<()> {
    let (tick_ms, render_fps, seed) = read_settings();
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let mut session = Session::new(&mut rng, MAZE_SIZE);
    let mut renderer = Renderer::new(MAZE_SIZE * 2 + 1);
    let mut batch = InputBatch::default();
    let mut last_tick = Instant::now();
    let tick_interval = Duration::from_millis(tick_ms);
    let frame_time = Duration::from_micros(1_000_000 / render_fps.max(1));

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => batch.quit = true,
                        KeyCode::Up | KeyCode::Char('w') => batch.moves.push(Dir::Up),
                        KeyCode::Down | KeyCode::Char('s') => batch.moves.push(Dir::Down),
                        KeyCode::Left | KeyCode::Char('a') => batch.moves.push(Dir::Left),
                        KeyCode::Right | KeyCode::Char('d') => batch.moves.push(Dir::Right),
                        _ => {}
                    },
                    _ => {}
                },
                Event::Resize(_, _) => renderer.needs_full = true,
                _ => {}
            }
        }

        render(stdout, &session, &mut renderer)?;

        if last_tick.elapsed() >= tick_interval {
            last_tick = Instant::now();
            let state = session.tick(&batch);
            batch = InputBatch::default();
            match state {
                State::Running => {}
                State::Captured => {
                    // Capture throws the whole session away; the next
                    // frame renders a freshly generated maze.
                    session = Session::new(&mut rng, MAZE_SIZE);
                    renderer.needs_full = true;
                }
                State::Escaped => {
                    render(stdout, &session, &mut renderer)?;
                    return render_escape_banner(stdout, &renderer);
                }
                State::Quit => return Ok(()),
            }
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

fn read_settings() -> (u64, u64, Option<u64>) {
    let tick_ms = std::env::var("MAZE_TICK_MS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_TICK_MS);
    let render_fps = std::env::var("MAZE_FPS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_RENDER_FPS);
    let seed = std::env::var("MAZE_SEED")
        .ok()
        .and_then(|v| v.parse::<u64>().ok());
    (tick_ms, render_fps, seed)
}
