//! Seam between the session and whatever draws the mesh.

use crate::error::RenderError;
use crate::mesh::Mesh;

/// Consumes a finished mesh once per frame.
///
/// Implementations own all drawing-API state (buffers, programs, context);
/// the session only hands them complete meshes.
pub trait MeshRenderer {
    fn draw(&mut self, mesh: &Mesh) -> Result<(), RenderError>;
}

impl<R: MeshRenderer + ?Sized> MeshRenderer for Box<R> {
    fn draw(&mut self, mesh: &Mesh) -> Result<(), RenderError> {
        (**self).draw(mesh)
    }
}
