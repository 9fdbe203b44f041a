use std::io;

use crossterm::style::Color;

use crate::game::GameState;
use crate::snake::Cell;

pub const HEAD_COLOR: Color = Color::Rgb { r: 0x00, g: 0xff, b: 0x00 };
pub const BODY_COLOR: Color = Color::Rgb { r: 0x00, g: 0xaa, b: 0x00 };
pub const FOOD_COLOR: Color = Color::Rgb { r: 0xff, g: 0x00, b: 0x00 };

/// A grid of cells that can be painted.
pub trait Surface {
    /// Blanks every cell of the playing field.
    fn clear(&mut self) -> io::Result<()>;

    fn fill_cell(&mut self, cell: Cell, color: Color) -> io::Result<()>;

    /// Makes everything drawn since the last call visible.
    fn present(&mut self) -> io::Result<()>;
}

/// One-way status displays next to the playing field.
pub trait StatusSink {
    fn show_score(&mut self, score: u32) -> io::Result<()>;

    fn show_game_over(&mut self, visible: bool, score: u32) -> io::Result<()>;
}

/// Paints one full frame: body, then head, then food on top.
pub fn draw_frame<S: Surface + ?Sized>(surface: &mut S, state: &GameState) -> io::Result<()> {
    surface.clear()?;

    for cell in state.snake.cells().skip(1) {
        surface.fill_cell(*cell, BODY_COLOR)?;
    }
    surface.fill_cell(state.snake.head(), HEAD_COLOR)?;
    surface.fill_cell(state.food, FOOD_COLOR)?;

    surface.present()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Snake;

    #[derive(Default)]
    struct Canvas {
        ops: Vec<String>,
    }

    impl Surface for Canvas {
        fn clear(&mut self) -> io::Result<()> {
            self.ops.push("clear".into());
            Ok(())
        }

        fn fill_cell(&mut self, cell: Cell, color: Color) -> io::Result<()> {
            self.ops.push(format!("{},{} {:?}", cell.row, cell.col, color));
            Ok(())
        }

        fn present(&mut self) -> io::Result<()> {
            self.ops.push("present".into());
            Ok(())
        }
    }

    #[test]
    fn test_head_is_distinct_from_body() {
        let snake = Snake::from_cells(vec![Cell::new(1, 2), Cell::new(1, 1)]).unwrap();
        let state = GameState::new(snake, None, Cell::new(4, 4));
        let mut canvas = Canvas::default();

        draw_frame(&mut canvas, &state).unwrap();

        assert_eq!(canvas.ops, vec![
            "clear".to_string(),
            format!("1,1 {:?}", BODY_COLOR),
            format!("1,2 {:?}", HEAD_COLOR),
            format!("4,4 {:?}", FOOD_COLOR),
            "present".to_string(),
        ]);
    }
}
