pub mod color;
pub mod error;
pub mod mesh;
pub mod messages;
pub mod render_stats;
pub mod renderer;
pub mod scheduler;
pub mod session;
pub mod wasm;

pub use color::{complex_to_rgb, hsv_to_rgb, rgb_to_rgba8, SENTINEL_COLOR};
pub use error::{RenderError, SessionError};
pub use mesh::{generate_mesh, grid_lines, Mesh, Vertex};
pub use messages::InputEvent;
pub use render_stats::RebuildStats;
pub use renderer::MeshRenderer;
pub use scheduler::{MeshState, RebuildScheduler};
pub use session::Session;
pub use wasm::{init_logging, Plotter};

// Re-export core types for convenience
pub use complexwonder_core::*;
