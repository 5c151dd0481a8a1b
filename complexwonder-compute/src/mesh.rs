//! Triangle mesh generation over the visible part of the complex plane.

use crate::color::complex_to_rgb;
use complexwonder_core::{CanvasSize, ColorSettings, Expr, ViewState};

/// Single mesh vertex: clip-space position and RGBA color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

/// Triangle list, three vertices per triangle, in draw order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    columns: usize,
    rows: usize,
    singular_vertices: usize,
}

impl Mesh {
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Grid cells as (columns, rows).
    pub fn cells(&self) -> (usize, usize) {
        (self.columns, self.rows)
    }

    pub fn quad_count(&self) -> usize {
        self.columns * self.rows
    }

    /// Grid points whose function value was NaN or infinite.
    pub fn singular_vertices(&self) -> usize {
        self.singular_vertices
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Interleaved x, y per vertex.
    pub fn positions(&self) -> Vec<f32> {
        self.vertices.iter().flat_map(|v| v.position).collect()
    }

    /// Interleaved r, g, b, a per vertex.
    pub fn colors(&self) -> Vec<f32> {
        self.vertices.iter().flat_map(|v| v.color).collect()
    }

    /// Barycentric corner weights, one unit vector per triangle corner.
    pub fn barycentrics(&self) -> Vec<f32> {
        const CORNERS: [f32; 9] = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
        CORNERS
            .iter()
            .copied()
            .cycle()
            .take(self.triangle_count() * CORNERS.len())
            .collect()
    }
}

/// Grid line positions along an axis of `extent` pixels spaced `unit` apart.
///
/// Lines sit at 0, unit, 2·unit, … and a last line at exactly `extent`, so an
/// axis has ⌈extent / unit⌉ cells and the final cell may be narrower. A zero
/// extent has no lines at all.
pub fn grid_lines(extent: u32, unit: f64) -> Vec<f64> {
    if extent == 0 || !unit.is_finite() || unit <= 0.0 {
        return Vec::new();
    }
    let extent = extent as f64;
    let cells = (extent / unit).ceil() as usize;
    (0..=cells)
        .map(|i| (i as f64 * unit).min(extent))
        .collect()
}

/// Number of vertices [`generate_mesh`] would emit, without building anything.
/// Saturates instead of overflowing.
pub fn planned_vertex_count(canvas: &CanvasSize, unit_px: f64) -> u64 {
    if canvas.is_empty() || !unit_px.is_finite() || unit_px <= 0.0 {
        return 0;
    }
    let cells = |extent: u32| (extent as f64 / unit_px).ceil() as u64;
    cells(canvas.width)
        .saturating_mul(cells(canvas.height))
        .saturating_mul(6)
}

/// Tessellate the canvas and color every vertex by `f` evaluated under `view`.
///
/// Each grid cell becomes two triangles sharing the diagonal from its
/// top-right to its bottom-left corner. Singular values never abort the
/// build; they are colored with the sentinel.
pub fn generate_mesh(
    f: &Expr,
    view: &ViewState,
    canvas: &CanvasSize,
    unit_px: f64,
    color: &ColorSettings,
) -> Mesh {
    let xs: Vec<f64> = grid_lines(canvas.width, unit_px)
        .into_iter()
        .map(|x| x / canvas.width as f64 * 2.0 - 1.0)
        .collect();
    let ys: Vec<f64> = grid_lines(canvas.height, unit_px)
        .into_iter()
        .map(|y| 1.0 - y / canvas.height as f64 * 2.0)
        .collect();

    let columns = xs.len().saturating_sub(1);
    let rows = ys.len().saturating_sub(1);
    if columns == 0 || rows == 0 {
        return Mesh::default();
    }

    // Evaluate each grid point once; triangles share corners.
    let mut singular_vertices = 0;
    let mut points = Vec::with_capacity(xs.len() * ys.len());
    for &x in &xs {
        for &y in &ys {
            let value = f.eval(view.ndc_to_complex(x, y, canvas));
            let [r, g, b] = complex_to_rgb(value, color);
            if !value.is_finite() {
                singular_vertices += 1;
            }
            points.push(Vertex {
                position: [x as f32, y as f32],
                color: [r, g, b, 1.0],
            });
        }
    }

    let stride = ys.len();
    let at = |i: usize, j: usize| points[i * stride + j];
    let mut vertices = Vec::with_capacity(columns * rows * 6);
    for i in 0..columns {
        for j in 0..rows {
            let (v00, v01, v10, v11) = (at(i, j), at(i, j + 1), at(i + 1, j), at(i + 1, j + 1));
            vertices.extend_from_slice(&[v00, v01, v10, v10, v01, v11]);
        }
    }

    Mesh {
        vertices,
        columns,
        rows,
        singular_vertices,
    }
}
