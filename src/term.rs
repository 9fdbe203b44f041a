use std::io::{self, Stdout, Write, stdout};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};

use crate::config::GameConfig;
use crate::error::{Result, SnakeError};
use crate::render::{StatusSink, Surface};
use crate::snake::Cell;

type Coords = (u16, u16);

// Each grid cell is two terminal columns wide so it looks roughly square
const CELL_WIDTH: u16 = 2;
const CELL_CHAR: char = '█';
// Row 0 holds the score, the bordered field starts below it
const FIELD_TOP: u16 = 1;

#[derive(Debug, Copy, Clone, PartialEq)]
struct Glyph {
    ch: char,
    color: Color,
}

const BLANK: Glyph = Glyph { ch: ' ', color: Color::Reset };

/// Crossterm-backed playing field, score line and game-over panel.
pub struct TermManager<W: Write = Stdout> {
    width: u16,
    height: u16,
    grid: (u16, u16),
    out: W,
    screen: Vec<Glyph>,
    current_msg: Option<Message>,
}

struct Message {
    top_left: Coords,
    width: u16,
    height: u16,
}

impl TermManager<Stdout> {
    /// Sizes the field for `config`, failing if the terminal cannot hold it.
    pub fn new(config: &GameConfig) -> Result<Self> {
        let size = terminal::size()?;
        Self::with_writer(config, size, stdout())
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.out, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.out, cursor::Hide, cursor::DisableBlinking, terminal::Clear(ClearType::All))?;
        self.draw_borders()?;
        self.flush()?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.out, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)?;
        Ok(())
    }
}

impl<W: Write> TermManager<W> {
    pub fn with_writer(config: &GameConfig, (width, height): Coords, out: W) -> Result<Self> {
        let grid = (config.width, config.height);
        let needed = Self::needed_size(grid).ok_or_else(|| {
            SnakeError::Config(format!("a {}x{} grid cannot fit on any terminal", grid.0, grid.1))
        })?;

        if width < needed.0 || height < needed.1 {
            return Err(SnakeError::TerminalTooSmall { needed, actual: (width, height) });
        }

        let screen = vec![BLANK; width as usize * height as usize];
        Ok(TermManager { width, height, grid, out, screen, current_msg: None })
    }

    /// Terminal size needed for a `(columns, rows)` grid: the cells, the border and the score line.
    /// `None` when that exceeds what a terminal can address.
    pub fn needed_size((cols, rows): Coords) -> Option<Coords> {
        let width = cols.checked_mul(CELL_WIDTH)?.checked_add(2)?;
        let height = rows.checked_add(FIELD_TOP + 2)?;
        Some((width, height))
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn draw_borders(&mut self) -> io::Result<()> {
        let right = self.grid.0 * CELL_WIDTH + 1;
        let bottom = FIELD_TOP + self.grid.1 + 1;

        for x in 0..=right {
            let ch = if x == 0 || x == right {'+'} else {'-'};
            self.print_at((x, FIELD_TOP), ch, Color::Reset)?;
            self.print_at((x, bottom), ch, Color::Reset)?;
        }

        for y in FIELD_TOP + 1..bottom {
            self.print_at((0, y), '|', Color::Reset)?;
            self.print_at((right, y), '|', Color::Reset)?;
        }

        Ok(())
    }

    pub fn show_message(&mut self, lines: &[&str]) -> io::Result<()> {
        if self.has_message() {
            self.hide_message()?;
        }

        let msg_height = (lines.len() + 2) as u16;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as u16;
        let center = self.field_center();
        let top_left = (
            center.0.saturating_sub(msg_width / 2),
            center.1.saturating_sub(msg_height / 2),
        );

        // Print the top and bottom empty lines
        for y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            for x_diff in 0..msg_width {
                self.print_at_no_save((top_left.0 + x_diff, *y), ' ')?;
            }
        }

        // Print the message lines
        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as u16 + 1;
            for (x_diff, ch) in padded_line.chars().enumerate() {
                self.print_at_no_save((top_left.0 + x_diff as u16, y), ch)?;
            }
        }

        self.current_msg = Some(Message { top_left, width: msg_width, height: msg_height });
        self.flush()
    }

    pub fn hide_message(&mut self) -> io::Result<()> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };

        // Restore the content from the screen buffer
        for y_diff in 0..msg.height {
            for x_diff in 0..msg.width {
                let pos = (msg.top_left.0 + x_diff, msg.top_left.1 + y_diff);
                if let Some(i) = self.index(pos) {
                    let glyph = self.screen[i];
                    self.put(pos, glyph)?;
                }
            }
        }

        self.flush()
    }

    pub fn has_message(&self) -> bool {
        self.current_msg.is_some()
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn field_center(&self) -> Coords {
        (
            (self.grid.0 * CELL_WIDTH + 2) / 2,
            FIELD_TOP + (self.grid.1 + 2) / 2,
        )
    }

    fn cell_origin(&self, cell: Cell) -> Option<Coords> {
        if cell.row < 0
            || cell.col < 0
            || cell.row >= self.grid.1 as i32
            || cell.col >= self.grid.0 as i32
        {
            return None;
        }
        Some((1 + cell.col as u16 * CELL_WIDTH, FIELD_TOP + 1 + cell.row as u16))
    }

    fn index(&self, pos: Coords) -> Option<usize> {
        if pos.0 < self.width && pos.1 < self.height {
            Some(self.width as usize * pos.1 as usize + pos.0 as usize)
        } else {
            None
        }
    }

    fn print_at(&mut self, pos: Coords, ch: char, color: Color) -> io::Result<()> {
        let glyph = Glyph { ch, color };
        if let Some(i) = self.index(pos) {
            self.screen[i] = glyph;
            self.put(pos, glyph)?;
        }
        Ok(())
    }

    fn print_at_no_save(&mut self, pos: Coords, ch: char) -> io::Result<()> {
        // Messages are drawn over the buffer so hiding them can restore what was below
        if self.index(pos).is_some() {
            self.put(pos, Glyph { ch, color: Color::Reset })?;
        }
        Ok(())
    }

    fn put(&mut self, pos: Coords, glyph: Glyph) -> io::Result<()> {
        queue!(
            self.out,
            cursor::MoveTo(pos.0, pos.1),
            style::SetForegroundColor(glyph.color),
            style::Print(glyph.ch),
            style::ResetColor
        )
    }
}

impl<W: Write> Surface for TermManager<W> {
    fn clear(&mut self) -> io::Result<()> {
        for row in 0..self.grid.1 as i32 {
            for col in 0..self.grid.0 as i32 {
                if let Some((x, y)) = self.cell_origin(Cell::new(row, col)) {
                    for dx in 0..CELL_WIDTH {
                        if let Some(i) = self.index((x + dx, y)) {
                            // only touch the terminal where something was drawn
                            if self.screen[i] != BLANK {
                                self.print_at((x + dx, y), BLANK.ch, BLANK.color)?;
                            }
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn fill_cell(&mut self, cell: Cell, color: Color) -> io::Result<()> {
        if let Some((x, y)) = self.cell_origin(cell) {
            for dx in 0..CELL_WIDTH {
                self.print_at((x + dx, y), CELL_CHAR, color)?;
            }
        }
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        self.flush()
    }
}

impl<W: Write> StatusSink for TermManager<W> {
    fn show_score(&mut self, score: u32) -> io::Result<()> {
        let line = format!("Score: {:<10}", score);
        for (x, ch) in line.chars().enumerate() {
            self.print_at((x as u16, 0), ch, Color::Reset)?;
        }
        self.flush()
    }

    fn show_game_over(&mut self, visible: bool, score: u32) -> io::Result<()> {
        if !visible {
            return self.hide_message();
        }

        self.show_message(&[
            "Game over!",
            &*format!("Score: {}", score),
            "",
            "R or Enter to play again,",
            "Q to quit.",
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_WIDTH;

    fn manager(grid: Coords, term: Coords) -> Result<TermManager<Vec<u8>>> {
        TermManager::with_writer(&GameConfig::new(grid.0, grid.1), term, Vec::new())
    }

    fn glyph_at(m: &TermManager<Vec<u8>>, pos: Coords) -> Glyph {
        m.screen[m.index(pos).unwrap()]
    }

    #[test]
    fn test_rejects_small_terminal() {
        assert_eq!(TermManager::<Vec<u8>>::needed_size((20, 20)), Some((42, 23)));
        assert!(matches!(
            manager((20, 20), (41, 40)),
            Err(SnakeError::TerminalTooSmall { needed: (42, 23), actual: (41, 40) })
        ));
        assert!(manager((20, 20), (42, 23)).is_ok());
    }

    #[test]
    fn test_oversized_grid_is_an_error() {
        assert_eq!(TermManager::<Vec<u8>>::needed_size((32768, 20)), None);
        assert_eq!(TermManager::<Vec<u8>>::needed_size((20, u16::MAX - 2)), None);
        assert_eq!(TermManager::<Vec<u8>>::needed_size((MAX_WIDTH, 20)), Some((u16::MAX - 1, 23)));

        let config = GameConfig { origin: Cell::new(0, 0), ..GameConfig::new(32768, 20) };
        let result = TermManager::with_writer(&config, (u16::MAX, u16::MAX), Vec::new());
        assert!(matches!(result, Err(SnakeError::Config(_))));
    }

    #[test]
    fn test_cells_map_inside_border() {
        let m = manager((4, 3), (20, 10)).unwrap();
        assert_eq!(m.cell_origin(Cell::new(0, 0)), Some((1, 2)));
        assert_eq!(m.cell_origin(Cell::new(2, 3)), Some((7, 4)));
        assert_eq!(m.cell_origin(Cell::new(3, 0)), None);
        assert_eq!(m.cell_origin(Cell::new(0, -1)), None);
    }

    #[test]
    fn test_fill_then_clear() {
        let mut m = manager((4, 3), (20, 10)).unwrap();

        m.fill_cell(Cell::new(1, 1), Color::Green).unwrap();
        assert_eq!(glyph_at(&m, (3, 3)), Glyph { ch: CELL_CHAR, color: Color::Green });
        assert_eq!(glyph_at(&m, (4, 3)), Glyph { ch: CELL_CHAR, color: Color::Green });

        m.clear().unwrap();
        assert!(glyph_at(&m, (3, 3)) == BLANK);
        assert!(!m.writer().is_empty());
    }

    #[test]
    fn test_game_over_panel_restores_field() {
        let mut m = manager((20, 20), (42, 23)).unwrap();
        m.fill_cell(Cell::new(10, 10), Color::Red).unwrap();

        m.show_game_over(true, 3).unwrap();
        assert!(m.has_message());
        // the panel is drawn over, not into, the buffer
        assert_eq!(glyph_at(&m, (21, 12)).color, Color::Red);

        m.show_game_over(false, 3).unwrap();
        assert!(!m.has_message());
    }

    #[test]
    fn test_score_line() {
        let mut m = manager((4, 3), (20, 10)).unwrap();
        m.show_score(12).unwrap();
        let line: String = (0..9).map(|x| glyph_at(&m, (x, 0)).ch).collect();
        assert_eq!(line, "Score: 12");
    }
}
