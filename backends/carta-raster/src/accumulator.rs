//! Signed-area coverage accumulation
//!
//! Each edge deposits the signed area it sweeps into the cells it crosses.
//! A running sum along every row then yields exact analytic coverage, with
//! no oversampling. Overlapping contours saturate at full coverage.

use crate::curves::Point;

/// Accumulation buffer for one mask
#[derive(Debug)]
pub struct Accumulator {
    width: usize,
    height: usize,
    cells: Vec<f32>,
}

impl Accumulator {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            // One spare cell so an edge on the far right column stays in bounds
            cells: vec![0.0; width * height + 1],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn add(&mut self, index: usize, value: f32) {
        if let Some(cell) = self.cells.get_mut(index) {
            *cell += value;
        }
    }

    /// Deposit one straight edge
    ///
    /// Points are clamped into the buffer first, so outlines that stray
    /// past the mask only lose the part that is off-canvas.
    pub fn line(&mut self, from: Point, to: Point) {
        let max_x = self.width.saturating_sub(1) as f32;
        let max_y = self.height as f32;
        let p0 = Point::new(from.x.clamp(0.0, max_x), from.y.clamp(0.0, max_y));
        let p1 = Point::new(to.x.clamp(0.0, max_x), to.y.clamp(0.0, max_y));

        if (p0.y - p1.y).abs() <= f32::EPSILON {
            return;
        }

        let (dir, p0, p1) = if p0.y < p1.y {
            (1.0, p0, p1)
        } else {
            (-1.0, p1, p0)
        };
        let dxdy = (p1.x - p0.x) / (p1.y - p0.y);
        let mut x = p0.x;

        let row_start = p0.y as usize;
        let row_end = (p1.y.ceil() as usize).min(self.height);

        for row in row_start..row_end {
            let line_start = row * self.width;
            let dy = ((row + 1) as f32).min(p1.y) - (row as f32).max(p0.y);
            let x_next = x + dxdy * dy;
            let d = dy * dir;

            let (x0, x1) = if x < x_next { (x, x_next) } else { (x_next, x) };
            let x0_floor = x0.floor();
            let x0i = x0_floor as usize;
            let x1_ceil = x1.ceil();
            let x1i = x1_ceil as usize;

            if x1i <= x0i + 1 {
                // Edge stays within one column on this row
                let xmf = 0.5 * (x + x_next) - x0_floor;
                self.add(line_start + x0i, d - d * xmf);
                self.add(line_start + x0i + 1, d * xmf);
            } else {
                let s = (x1 - x0).recip();
                let x0f = x0 - x0_floor;
                let a0 = 0.5 * s * (1.0 - x0f) * (1.0 - x0f);
                let x1f = x1 - x1_ceil + 1.0;
                let am = 0.5 * s * x1f * x1f;

                self.add(line_start + x0i, d * a0);
                if x1i == x0i + 2 {
                    self.add(line_start + x0i + 1, d * (1.0 - a0 - am));
                } else {
                    let a1 = s * (1.5 - x0f);
                    self.add(line_start + x0i + 1, d * (a1 - a0));
                    for xi in x0i + 2..x1i - 1 {
                        self.add(line_start + xi, d * s);
                    }
                    let a2 = a1 + (x1i - x0i - 3) as f32 * s;
                    self.add(line_start + x1i - 1, d * (1.0 - a2 - am));
                }
                self.add(line_start + x1i, d * am);
            }

            x = x_next;
        }
    }

    /// Resolve accumulated area into 8-bit coverage, row-major
    pub fn into_coverage(self) -> Vec<u8> {
        let len = self.width * self.height;
        let mut acc = 0.0f32;
        self.cells
            .iter()
            .take(len)
            .enumerate()
            .map(|(i, cell)| {
                if i % self.width == 0 {
                    acc = 0.0;
                }
                acc += cell;
                (acc.abs().min(1.0) * 255.0 + 0.5) as u8
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(acc: &mut Accumulator, x0: f32, y0: f32, x1: f32, y1: f32) {
        let a = Point::new(x0, y0);
        let b = Point::new(x1, y0);
        let c = Point::new(x1, y1);
        let d = Point::new(x0, y1);
        acc.line(a, b);
        acc.line(b, c);
        acc.line(c, d);
        acc.line(d, a);
    }

    #[test]
    fn test_pixel_aligned_square_is_solid() {
        let mut acc = Accumulator::new(6, 6);
        square(&mut acc, 1.0, 1.0, 4.0, 4.0);
        let coverage = acc.into_coverage();

        for y in 0..6 {
            for x in 0..6 {
                let inside = (1..4).contains(&x) && (1..4).contains(&y);
                let expected = if inside { 255 } else { 0 };
                assert_eq!(coverage[y * 6 + x], expected, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_half_pixel_edge_is_half_covered() {
        let mut acc = Accumulator::new(4, 2);
        square(&mut acc, 0.5, 0.0, 3.0, 2.0);
        let coverage = acc.into_coverage();

        assert_eq!(coverage[0], 128);
        assert_eq!(coverage[1], 255);
        assert_eq!(coverage[3], 0);
    }

    #[test]
    fn test_winding_direction_does_not_matter() {
        let mut cw = Accumulator::new(5, 5);
        square(&mut cw, 1.0, 1.0, 3.0, 3.0);
        let mut ccw = Accumulator::new(5, 5);
        square(&mut ccw, 3.0, 3.0, 1.0, 1.0);
        assert_eq!(cw.into_coverage(), ccw.into_coverage());
    }

    #[test]
    fn test_out_of_bounds_edges_do_not_panic() {
        let mut acc = Accumulator::new(3, 3);
        square(&mut acc, -10.0, -10.0, 50.0, 50.0);
        let coverage = acc.into_coverage();
        assert_eq!(coverage.len(), 9);
    }
}
