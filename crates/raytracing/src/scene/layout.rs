//! Placement of several voxel files side by side.
//!
//! Files are laid out in rows along +X and rows are stacked toward -Z. The
//! grid is roughly square: `rows = floor(sqrt(n))`, `cols = ceil(n / rows)`.

use crate::geometry::{Vec3, AABB};

#[derive(Debug, Clone)]
pub struct GridLayout {
    num_rows: usize,
    num_cols: usize,
    gap: f32,

    col: usize,
    anchor: Vec3,
    row_aabb: AABB,
}

impl GridLayout {
    /// `gap` scales each placed extent, so 1.1 leaves 10% spacing
    pub fn new(num_files: usize, gap: f32) -> GridLayout {
        let num_files = num_files.max(1);
        let num_rows = ((num_files as f32).sqrt() as usize).max(1);
        let num_cols = num_files.div_ceil(num_rows);

        GridLayout {
            num_rows,
            num_cols,
            gap,
            col: 0,
            anchor: Vec3::zero(),
            row_aabb: AABB::empty(),
        }
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Where the next file's models are placed
    pub fn anchor(&self) -> Vec3 {
        self.anchor
    }

    /// Advances past a file whose models (placed at [`Self::anchor`]) span `file_aabb`.
    ///
    /// The column counter is compared before it is incremented, so a row
    /// only wraps once the counter has gone past `num_cols`.
    pub fn advance(&mut self, file_aabb: &AABB) {
        self.row_aabb.include(file_aabb);
        self.anchor.0 += self.gap * file_aabb.extent(0);

        let col = self.col;
        self.col += 1;
        if col > self.num_cols {
            self.col = 0;
            self.anchor.0 = 0.0;
            self.anchor.2 -= self.gap * self.row_aabb.extent(2);
            self.row_aabb = AABB::empty();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: f32 = 1.1;

    // every file spans a unit cube; only extents drive the cursor
    fn unit_box() -> AABB {
        AABB::new(Vec3::zero(), Vec3(1.0, 1.0, 1.0))
    }

    fn anchors(num_files: usize) -> Vec<Vec3> {
        let mut layout = GridLayout::new(num_files, STEP);
        let mut anchors = Vec::new();
        for _ in 0..num_files {
            anchors.push(layout.anchor());
            layout.advance(&unit_box());
        }
        anchors
    }

    fn along_x(steps: usize) -> Vec3 {
        let mut x = 0.0f32;
        for _ in 0..steps {
            x += STEP;
        }
        Vec3(x, 0.0, 0.0)
    }

    #[test]
    fn grid_dimensions() {
        let dims = |n| {
            let layout = GridLayout::new(n, STEP);
            (layout.num_rows(), layout.num_cols())
        };
        assert_eq!(dims(1), (1, 1));
        assert_eq!(dims(2), (1, 2));
        assert_eq!(dims(3), (1, 3));
        assert_eq!(dims(4), (2, 2));
        assert_eq!(dims(5), (2, 3));
        assert_eq!(dims(10), (3, 4));
    }

    #[test]
    fn anchors_for_up_to_five_files() {
        assert_eq!(anchors(1), vec![along_x(0)]);
        assert_eq!(anchors(2), vec![along_x(0), along_x(1)]);
        assert_eq!(anchors(3), vec![along_x(0), along_x(1), along_x(2)]);
        // cols = 2: the counter passes 2 on the fourth file, so the first row holds four
        assert_eq!(anchors(4), (0..4).map(along_x).collect::<Vec<_>>());
        // cols = 3: the first row holds five
        assert_eq!(anchors(5), (0..5).map(along_x).collect::<Vec<_>>());
    }

    #[test]
    fn row_wrap_steps_back_in_z() {
        let mut layout = GridLayout::new(4, STEP);
        for _ in 0..4 {
            layout.advance(&unit_box());
        }
        assert_eq!(layout.anchor(), Vec3(0.0, 0.0, -STEP));

        // the second row starts from an empty row box
        layout.advance(&AABB::new(Vec3::zero(), Vec3(2.0, 1.0, 3.0)));
        assert_eq!(layout.anchor(), Vec3(STEP * 2.0, 0.0, -STEP));
    }

    #[test]
    fn empty_file_does_not_move_cursor() {
        let mut layout = GridLayout::new(3, STEP);
        layout.advance(&AABB::empty());
        assert_eq!(layout.anchor(), Vec3::zero());
    }
}
