use crate::math::{Rect, Vec2};

/// Split `origin`/`size` into `rows` x `cols` equal cells, row-major.
///
/// Zero rows or columns, or a size that is negative or not finite, yields no
/// cells.
pub fn grid(rows: usize, cols: usize, origin: Vec2, size: Vec2) -> Vec<Rect> {
    if rows == 0
        || cols == 0
        || !size.is_finite()
        || !origin.is_finite()
        || size.x < 0.0
        || size.y < 0.0
    {
        return Vec::new();
    }

    let cell = Vec2::new(size.x / cols as f32, size.y / rows as f32);
    let mut cells = Vec::with_capacity(rows * cols);

    for row in 0..rows {
        for col in 0..cols {
            let point = origin + Vec2::new(col as f32 * cell.x, row as f32 * cell.y);
            cells.push(Rect::new(point, cell));
        }
    }

    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_cell() {
        let cells = grid(1, 1, Vec2::new(3.0, 4.0), Vec2::new(10.0, 20.0));
        assert_eq!(cells, vec![Rect::from_xywh(3.0, 4.0, 10.0, 20.0)]);
    }

    #[test]
    fn test_cells_partition_rectangle() {
        let origin = Vec2::new(5.0, 7.0);
        let size = Vec2::new(90.0, 40.0);
        for rows in 1..6 {
            for cols in 1..6 {
                let cells = grid(rows, cols, origin, size);
                assert_eq!(cells.len(), rows * cols);

                let area: f32 = cells.iter().map(|c| c.area()).sum();
                assert!((area - size.x * size.y).abs() < 0.01);

                for (i, cell) in cells.iter().enumerate() {
                    let (row, col) = (i / cols, i % cols);
                    assert!((cell.width() - size.x / cols as f32).abs() < 1e-4);
                    assert!((cell.height() - size.y / rows as f32).abs() < 1e-4);
                    assert!((cell.min_x() - (origin.x + col as f32 * cell.width())).abs() < 1e-3);
                    assert!((cell.min_y() - (origin.y + row as f32 * cell.height())).abs() < 1e-3);
                }

                let last = cells[cells.len() - 1];
                assert!((last.max_x() - (origin.x + size.x)).abs() < 1e-3);
                assert!((last.max_y() - (origin.y + size.y)).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn test_zero_counts_are_empty() {
        assert!(grid(0, 3, Vec2::ZERO, Vec2::new(1.0, 1.0)).is_empty());
        assert!(grid(3, 0, Vec2::ZERO, Vec2::new(1.0, 1.0)).is_empty());
        assert!(grid(2, 2, Vec2::ZERO, Vec2::new(f32::NAN, 1.0)).is_empty());
    }
}
