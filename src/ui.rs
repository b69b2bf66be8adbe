use tui::{
  backend::Backend,
  buffer::Buffer,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Style},
  symbols,
  widgets::{Block, Borders, Paragraph, Widget},
  Frame,
};

use crate::volume_bar::{self, VolumeBar};

/// Light gray chrome around the widget; the bars themselves carry the
/// gradient.
const CHROME_COLOR: Color = Color::Gray;

/// Bottom-anchored eighth blocks for the top of a bar, indexed by how many
/// eighths of the cell are filled.
const EIGHTHS: [&str; 8] = ["", "\u{2581}", "\u{2582}", "\u{2583}", "\u{2584}", "\u{2585}", "\u{2586}", "\u{2587}"];

/// The main UI that the user sees.
pub fn main_ui<B: Backend>(f: &mut Frame<B>, bar: &VolumeBar, bar_width: u16, gap_width: u16) {
  let chunks = Layout::default()
    .direction(Direction::Vertical)
    .margin(0)
    .constraints([Constraint::Min(5), Constraint::Length(8)].as_ref())
    .split(f.size());

  f.render_widget(
    VolumeLevelBar::new(bar, bar_width, gap_width)
      .block(volume_block()),
    chunks[0],
  );
  f.render_widget(controls(bar), chunks[1]);
}

fn volume_block() -> Block<'static> {
  Block::default()
    .title("tuivol")
    .borders(Borders::ALL)
    .style(Style::default().fg(CHROME_COLOR))
}

/// Displays the controls, and whether the bar is currently animating.
fn controls(bar: &VolumeBar) -> Paragraph {
  let state = if bar.is_animating() { "yes" } else { "no" };
  Paragraph::new(format!(
    "animating: {state}\n\nq: quit\nspace/a: start/stop animating\nr: reshuffle bar timings"
  ))
  .block(Block::default().borders(Borders::ALL))
  .style(Style::default().fg(CHROME_COLOR))
}

/// Renders a [`VolumeBar`]'s columns as gradient-colored bars growing upward
/// from the widget's horizontal centerline.
pub struct VolumeLevelBar<'a> {
  bar: &'a VolumeBar,
  bar_width: u16,
  gap_width: u16,
  block: Option<Block<'a>>,
}

impl<'a> VolumeLevelBar<'a> {
  pub fn new(bar: &'a VolumeBar, bar_width: u16, gap_width: u16) -> VolumeLevelBar<'a> {
    VolumeLevelBar {
      bar,
      bar_width,
      gap_width,
      block: None,
    }
  }

  pub fn block(mut self, block: Block<'a>) -> VolumeLevelBar<'a> {
    self.block = Some(block);
    self
  }
}

impl<'a> Widget for VolumeLevelBar<'a> {
  fn render(mut self, area: Rect, buf: &mut Buffer) {
    let inner = match self.block.take() {
      Some(b) => {
        let inner = b.inner(area);
        b.render(area, buf);
        inner
      }
      None => area,
    };
    if inner.width == 0 || inner.height == 0 || self.bar_width == 0 {
      return;
    }

    let l = volume_bar::layout(
      inner.width as f32,
      self.bar_width as f32,
      self.gap_width as f32,
    );
    let unit = (self.bar_width + self.gap_width) as f32;
    let center_y = inner.y + inner.height / 2;
    // one cell row is 8 height units; bars reach at most half the widget
    // height, shrunk further by the divider
    let max_height = inner.height as f32 * 8.0 / 2.0 / self.bar.divider();

    for i in 0..l.count {
      let x0 = inner.x + (l.start_offset + i as f32 * unit) as u16;
      let height = volume_bar::lerp(0.0, max_height, self.bar.height_fraction(i)).round() as u16;
      let full_cells = height / 8;
      let remainder = height % 8;
      // the gradient spans the whole canvas, so sample it by x position
      let color = gradient_color((x0 - inner.x) as f32 / inner.width as f32);

      for w in 0..self.bar_width {
        let x = x0 + w;
        if x >= inner.x + inner.width {
          break;
        }
        for row in 0..full_cells {
          let y = center_y.saturating_sub(row);
          if y < inner.y {
            break;
          }
          buf.get_mut(x, y).set_symbol(symbols::block::FULL).set_fg(color);
        }
        if remainder > 0 {
          let y = center_y.saturating_sub(full_cells);
          if y >= inner.y {
            buf
              .get_mut(x, y)
              .set_symbol(EIGHTHS[remainder as usize])
              .set_fg(color);
          }
        }
      }
    }
  }
}

/// Samples the blue -> green -> yellow gradient at `t` in [0, 1].
fn gradient_color(t: f32) -> Color {
  const STOPS: [(f32, f32, f32); 3] = [(0.0, 0.0, 255.0), (0.0, 255.0, 0.0), (255.0, 255.0, 0.0)];

  let scaled = t.clamp(0.0, 1.0) * (STOPS.len() - 1) as f32;
  let i = (scaled as usize).min(STOPS.len() - 2);
  let fraction = scaled - i as f32;
  let (r0, g0, b0) = STOPS[i];
  let (r1, g1, b1) = STOPS[i + 1];

  Color::Rgb(
    volume_bar::lerp(r0, r1, fraction).round() as u8,
    volume_bar::lerp(g0, g1, fraction).round() as u8,
    volume_bar::lerp(b0, b1, fraction).round() as u8,
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn gradient_hits_the_three_stops() {
    assert_eq!(gradient_color(0.0), Color::Rgb(0, 0, 255));
    assert_eq!(gradient_color(0.5), Color::Rgb(0, 255, 0));
    assert_eq!(gradient_color(1.0), Color::Rgb(255, 255, 0));
  }

  #[test]
  fn gradient_interpolates_between_stops() {
    assert_eq!(gradient_color(0.25), Color::Rgb(0, 128, 128));
    assert_eq!(gradient_color(0.75), Color::Rgb(128, 255, 0));
  }

  #[test]
  fn gradient_clamps_out_of_range_positions() {
    assert_eq!(gradient_color(-1.0), gradient_color(0.0));
    assert_eq!(gradient_color(2.0), gradient_color(1.0));
  }

  #[test]
  fn eighths_cover_one_to_seven() {
    assert_eq!(EIGHTHS[1], "▁");
    assert_eq!(EIGHTHS[4], "▄");
    assert_eq!(EIGHTHS[7], "▇");
  }
}
