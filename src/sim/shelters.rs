//! Destructible shelters built from bricks

use super::geometry::{Field, Rect, Renderable};
use crate::tuning::Tuning;

/// A single shelter brick; any qualifying hit removes it
#[derive(Debug, Clone, PartialEq)]
pub struct Brick {
    pub rect: Rect,
    pub shelter: usize,
    pub visible: bool,
}

impl Renderable for Brick {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn is_shown(&self) -> bool {
        self.visible
    }
}

/// Lay out every shelter, row-major within each shelter
pub fn build_shelters(field: &Field, tuning: &Tuning) -> Vec<Brick> {
    let width = field.width / 180.0;
    let height = field.height / 80.0;
    let shelter_padding = field.width / 12.0;
    let start_top = field.height * 0.8;

    let mut bricks =
        Vec::with_capacity(tuning.shelters * tuning.shelter_columns * tuning.shelter_rows);
    for shelter in 0..tuning.shelters {
        // Shelters sit one padding apart, starting one padding in
        let shelter_left = shelter_padding * (2 * shelter + 1) as f32;
        for row in 0..tuning.shelter_rows {
            for column in 0..tuning.shelter_columns {
                bricks.push(Brick {
                    rect: Rect::from_origin(
                        shelter_left + column as f32 * width,
                        start_top + row as f32 * height,
                        width,
                        height,
                    ),
                    shelter,
                    visible: true,
                });
            }
        }
    }
    bricks
}
