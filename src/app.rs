use crossterm::{
  event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
  execute,
  terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::ui::main_ui;
use crate::volume_bar::VolumeBar;
use std::{
  error::Error,
  io,
  time::{Duration, Instant},
};
use tui::{
  backend::{Backend, CrosstermBackend},
  Terminal,
};

/// Sets up the terminal, and runs the UI.
pub fn run(bar_width: u16, gap_width: u16, animating: bool) -> Result<(), Box<dyn Error>> {
  // setup terminal
  enable_raw_mode()?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend)?;

  // run application
  let res = run_app(&mut terminal, bar_width, gap_width, animating);

  // restore terminal
  disable_raw_mode()?;
  execute!(
    terminal.backend_mut(),
    LeaveAlternateScreen,
    DisableMouseCapture
  )?;
  terminal.show_cursor()?;

  res
}

/// Runs the frame loop, assuming the terminal has been prepared.
fn run_app<B: Backend>(
  terminal: &mut Terminal<B>,
  bar_width: u16,
  gap_width: u16,
  animating: bool,
) -> Result<(), Box<dyn std::error::Error>> {
  let tick_rate = Duration::from_millis(crate::TICK_RATE);

  let mut bar = VolumeBar::new(animating);
  let mut last_tick = Instant::now();

  loop {
    terminal.draw(|f| main_ui(f, &bar, bar_width, gap_width))?;

    let timeout = tick_rate
      .checked_sub(last_tick.elapsed())
      .unwrap_or_else(|| Duration::from_secs(0));

    if crossterm::event::poll(timeout)? {
      if let Event::Key(key) = event::read()? {
        match key.code {
          KeyCode::Char('q') => return Ok(()),
          KeyCode::Char(' ') | KeyCode::Char('a') => bar.toggle_animating(),
          KeyCode::Char('r') => bar.reseed(),
          _ => (),
        }
      }
    }
    if last_tick.elapsed() >= tick_rate {
      let elapsed = last_tick.elapsed().as_millis();
      last_tick = Instant::now();
      bar.on_tick(elapsed as u32);
    }
  }
}
