//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal or CI log
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - curves: `e` (expo), `l` (linear), `q` (quartic), drawn in that order so the
//!   earlier curve wins where they share a cell
//! - grid: dotted rows every few lines

use crate::domain::{CurveKind, EnvelopeTables, Interpolation};
use crate::math::resample;

pub const X_LABEL: &str = "time (s)";
pub const Y_LABEL: &str = "voltage (mV)";
pub const TITLE: &str = "Envelope tables";

const GRID: char = '.';
const GRID_ROW_STEP: usize = 5;

/// Render all three curves of `tables`.
pub fn render_ascii_plot(tables: &EnvelopeTables, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (y_min, y_max) = y_range(tables).unwrap_or((0.0, 1.0));

    let mut grid = vec![vec![' '; width]; height];
    draw_grid(&mut grid);

    for (kind, values) in tables.iter() {
        let column_values = resample(values, width, Interpolation::Linear);
        draw_curve(&mut grid, &column_values, y_min, y_max, kind.glyph());
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{TITLE} | x={X_LABEL} [0, {}] | y={Y_LABEL} [{y_min:.3}, {y_max:.3}]\n",
        tables.size.saturating_sub(1)
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    let legend: Vec<String> = CurveKind::ALL
        .iter()
        .map(|k| format!("{}={}", k.glyph(), k.display_name()))
        .collect();
    out.push_str(&format!("legend: {}\n", legend.join(" ")));

    out
}

fn y_range(tables: &EnvelopeTables) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for (_, values) in tables.iter() {
        for &y in values {
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
    }

    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else {
        None
    }
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn is_blank(ch: char) -> bool {
    ch == ' ' || ch == GRID
}

fn draw_grid(grid: &mut [Vec<char>]) {
    for (row_idx, row) in grid.iter_mut().enumerate() {
        if row_idx % GRID_ROW_STEP != 0 {
            continue;
        }
        for (col, cell) in row.iter_mut().enumerate() {
            if col % 2 == 0 {
                *cell = GRID;
            }
        }
    }
}

/// One value per column; consecutive columns are joined with line segments.
fn draw_curve(grid: &mut [Vec<char>], column_values: &[f64], y_min: f64, y_max: f64, ch: char) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for (x, &y) in column_values.iter().enumerate().take(width) {
        let yy = map_y(y, y_min, y_max, height);
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, x, yy, ch);
        } else if is_blank(grid[yy][x]) {
            grid[yy][x] = ch;
        }
        prev = Some((x, yy));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && is_blank(grid[y0 as usize][x0 as usize])
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TABLE_SIZE;

    fn plot(width: usize, height: usize) -> Vec<String> {
        let tables = EnvelopeTables::generate(TABLE_SIZE).unwrap();
        render_ascii_plot(&tables, width, height)
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn plot_has_header_rows_and_legend() {
        let lines = plot(40, 12);
        assert_eq!(lines.len(), 1 + 12 + 1);
        assert_eq!(
            lines[0],
            "Envelope tables | x=time (s) [0, 255] | y=voltage (mV) [0.000, 1.000]"
        );
        assert_eq!(lines[13], "legend: e=expo l=linear q=quartic");
        for row in &lines[1..13] {
            assert_eq!(row.chars().count(), 40);
        }
    }

    #[test]
    fn curves_share_endpoints() {
        let lines = plot(40, 12);
        // All curves start at 0 and end at 1; expo is drawn first.
        assert!(lines[12].starts_with('e'), "{}", lines[12]);
        assert!(lines[1].ends_with('e'), "{}", lines[1]);
    }

    #[test]
    fn curves_separate_in_the_middle() {
        let lines = plot(40, 12);
        let column = |x: usize| -> String {
            lines[1..13].iter().map(|row| row.chars().nth(x).unwrap()).collect()
        };
        let mid = column(20);
        let e = mid.find('e').expect("expo in middle column");
        let l = mid.find('l').expect("linear in middle column");
        let q = mid.find('q').expect("quartic in middle column");
        // Row 0 is the top: expo above linear above quartic.
        assert!(e < l && l < q, "column 20: {mid:?}");
    }

    #[test]
    fn grid_rows_are_dotted() {
        let lines = plot(40, 12);
        // Rows 0, 5, 10 carry the grid; the left edge of the mid rows is clear of curves.
        assert!(lines[6].starts_with(". . "), "{}", lines[6]);
        assert!(lines[7].starts_with("    "), "{}", lines[7]);
    }

    #[test]
    fn tiny_sizes_are_clamped() {
        let lines = plot(3, 2);
        assert_eq!(lines.len(), 1 + 5 + 1);
        assert_eq!(lines[1].chars().count(), 10);
    }
}
