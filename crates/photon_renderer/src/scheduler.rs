//! Progressive render order.
//!
//! The image is refined in levels. Level `i` splits the image into a
//! `2^i x 2^i` grid of cells. Level 1 draws all four cells; every later level
//! only draws the cells whose top-left corner was not already a corner at a
//! coarser level, so each image pixel is the corner of exactly one drawn cell.

use crate::RenderConfig;

/// A cell of the current refinement level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Grid row and column within the level
    pub row: u32,
    pub col: u32,
    /// Top-left pixel
    pub x: u32,
    pub y: u32,
    /// Edge length in pixels
    pub size: u32,
    /// False if a coarser level already drew this corner
    pub needs_drawing: bool,
}

/// Whether cell (`row`, `col`) of level `iteration` has to be drawn.
///
/// Level 1 draws everything. Later levels skip cells with an even row and
/// an even column: those corners belong to the previous level.
#[inline]
pub fn needs_drawing(iteration: u32, row: u32, col: u32) -> bool {
    iteration == 1 || row % 2 == 1 || col % 2 == 1
}

/// Scheduling state of the frame being rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderCursor {
    image_size: u32,
    row: u32,
    col: u32,
    iteration: u32,
    /// Cells per side at the current level, `2^iteration`
    resolution_step: u32,
    finished: bool,
}

impl RenderCursor {
    /// Cursor at the start of a frame of `image_size x image_size` pixels.
    ///
    /// `image_size` is rounded up to a power of two of at least 2, so every
    /// level's cells stay at least one pixel wide.
    pub fn new(image_size: u32) -> Self {
        let mut cursor = Self {
            image_size: image_size.max(2).next_power_of_two(),
            row: 0,
            col: 0,
            iteration: 1,
            resolution_step: 2,
            finished: false,
        };
        cursor.reset();
        cursor
    }

    /// Restart the frame from the coarsest level.
    pub fn reset(&mut self) {
        self.row = 0;
        self.col = 0;
        self.iteration = 1;
        self.resolution_step = 2;
        self.finished = false;
    }

    pub fn image_size(&self) -> u32 {
        self.image_size
    }

    pub fn row(&self) -> u32 {
        self.row
    }

    pub fn col(&self) -> u32 {
        self.col
    }

    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    /// Cells per side at the current level.
    pub fn resolution_step(&self) -> u32 {
        self.resolution_step
    }

    /// Edge length in pixels of a cell at the current level.
    pub fn cell_size(&self) -> u32 {
        self.image_size / self.resolution_step
    }

    /// True once the full-resolution level is done.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Pixels to draw in one tick.
    ///
    /// A fixed budget while dragging keeps feedback quick; otherwise the
    /// budget grows with the level so finer levels finish in fewer ticks.
    pub fn tick_budget(&self, dragging: bool, config: &RenderConfig) -> usize {
        if dragging {
            config.drag_budget
        } else {
            let step = self.resolution_step as usize;
            (step * step).max(config.idle_budget_floor)
        }
    }

    /// Advance to the next cell in render order.
    ///
    /// Returns `None` once the frame is finished.
    pub fn next_cell(&mut self) -> Option<Cell> {
        if self.finished {
            return None;
        }

        if self.col >= self.resolution_step {
            self.row += 1;
            self.col = 0;
            if self.row >= self.resolution_step {
                if self.resolution_step >= self.image_size {
                    self.finished = true;
                    return None;
                }
                self.iteration += 1;
                self.row = 0;
                self.resolution_step = 1 << self.iteration;
            }
        }

        let size = self.cell_size();
        let cell = Cell {
            row: self.row,
            col: self.col,
            x: self.col * size,
            y: self.row * size,
            size,
            needs_drawing: needs_drawing(self.iteration, self.row, self.col),
        };
        self.col += 1;

        Some(cell)
    }

    /// End-of-tick check: reaching the last pixel row finishes the frame.
    pub fn end_tick(&mut self) {
        if self.row == self.image_size - 1 {
            self.finished = true;
        }
    }
}
