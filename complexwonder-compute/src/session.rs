//! Plotting session: the state a tick loop drives.
//!
//! A `Session` owns the view, the installed expression, the canvas size and
//! the cached mesh. Input mutates the first three and marks the scheduler
//! dirty; `tick` rebuilds the mesh at most once per call. The mesh lives
//! behind an `Rc` and is replaced whole, so a renderer holding the previous
//! one never sees a half-built buffer.

use crate::error::{RenderError, SessionError};
use crate::mesh::{generate_mesh, planned_vertex_count, Mesh};
use crate::messages::InputEvent;
use crate::render_stats::{now, RebuildStats};
use crate::renderer::MeshRenderer;
use crate::scheduler::RebuildScheduler;
use complexwonder_core::{
    compile_with, CanvasSize, ColorSettings, Expr, InputError, PlotConfig, SyntaxError,
    ViewState, DEFAULT_CONFIG,
};
use std::rc::Rc;

pub struct Session {
    config: &'static PlotConfig,
    view: ViewState,
    canvas: CanvasSize,
    expression: Expr,
    source: String,
    color: ColorSettings,
    scheduler: RebuildScheduler,
    mesh: Rc<Mesh>,
    stats: RebuildStats,
    /// Set once the renderer reports its context unavailable.
    render_failure: Option<RenderError>,
}

impl Session {
    /// Start a session from a preset. If the preset's expression does not
    /// compile the identity is installed instead. Fails if `canvas` needs a
    /// mesh larger than the preset's vertex budget.
    pub fn new(config: &'static PlotConfig, canvas: CanvasSize) -> Result<Self, InputError> {
        check_mesh_budget(config, &canvas)?;
        Ok(Self::with_canvas(config, canvas))
    }

    fn with_canvas(config: &'static PlotConfig, canvas: CanvasSize) -> Self {
        let (expression, source) = match compile_with(config.default_expression, &config.compile) {
            Ok(expr) => (expr, config.default_expression.to_string()),
            Err(e) => {
                log::warn!(
                    "Preset '{}' expression failed to compile ({}), using identity",
                    config.id,
                    e
                );
                (Expr::identity(), "z".to_string())
            }
        };

        Self {
            config,
            view: config.default_view(),
            canvas,
            expression,
            source,
            color: config.color,
            scheduler: RebuildScheduler::new(),
            mesh: Rc::new(Mesh::default()),
            stats: RebuildStats::new(),
            render_failure: None,
        }
    }

    pub fn config(&self) -> &'static PlotConfig {
        self.config
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    pub fn expression(&self) -> &Expr {
        &self.expression
    }

    /// Text of the installed expression as last committed.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn color_settings(&self) -> &ColorSettings {
        &self.color
    }

    pub fn stats(&self) -> &RebuildStats {
        &self.stats
    }

    /// The fatal renderer error, once one has been reported.
    pub fn render_failure(&self) -> Option<&RenderError> {
        self.render_failure.as_ref()
    }

    pub fn is_dirty(&self) -> bool {
        self.scheduler.is_dirty()
    }

    /// The most recently built mesh.
    pub fn mesh(&self) -> Rc<Mesh> {
        Rc::clone(&self.mesh)
    }

    /// Compile `text` and install it. On error the current expression stays.
    pub fn commit_expression(&mut self, text: &str) -> Result<(), SyntaxError> {
        match compile_with(text, &self.config.compile) {
            Ok(expr) => {
                log::info!("Installed f(z) = {}", expr);
                self.expression = expr;
                self.source = text.to_string();
                self.scheduler.mark_dirty();
                Ok(())
            }
            Err(e) => {
                log::warn!("Syntax error in '{}': {}; keeping f(z) = {}", text, e, self.source);
                Err(e)
            }
        }
    }

    pub fn pan(&mut self, dx: f64, dy: f64) -> Result<(), InputError> {
        self.view.pan_by(dx, dy)?;
        self.scheduler.mark_dirty();
        Ok(())
    }

    pub fn zoom(&mut self, factor: f64) -> Result<(), InputError> {
        self.view.zoom_by(factor)?;
        self.scheduler.mark_dirty();
        Ok(())
    }

    /// Zoom keeping the point under the pointer at canvas pixel (x, y) fixed.
    pub fn zoom_at(&mut self, factor: f64, x: f64, y: f64) -> Result<(), InputError> {
        let cursor = self.canvas.center_offset(x, y);
        self.view.zoom_at(factor, cursor)?;
        self.scheduler.mark_dirty();
        Ok(())
    }

    /// Wheel zoom by whole or fractional notches of the preset's zoom step.
    /// Positive notches zoom out.
    pub fn zoom_notches(&mut self, notches: f64, x: f64, y: f64) -> Result<(), InputError> {
        self.zoom_at(self.config.zoom_step.powf(notches), x, y)
    }

    /// Change the canvas size. Sizes whose mesh would exceed the preset's
    /// vertex budget are rejected.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), InputError> {
        let canvas = CanvasSize::new(width, height);
        check_mesh_budget(self.config, &canvas)?;
        self.canvas = canvas;
        self.scheduler.mark_dirty();
        Ok(())
    }

    pub fn set_color_settings(&mut self, settings: ColorSettings) {
        self.color = settings;
        self.scheduler.mark_dirty();
    }

    /// Restore the preset view and colors. The expression is kept.
    pub fn reset(&mut self) {
        self.view = self.config.default_view();
        self.color = self.config.color;
        self.scheduler.mark_dirty();
    }

    /// Apply one input event. Rejected events leave the session unchanged.
    pub fn apply(&mut self, event: InputEvent) -> Result<(), SessionError> {
        let result = match event {
            InputEvent::Pan { dx, dy } => self.pan(dx, dy).map_err(SessionError::from),
            InputEvent::Zoom { factor } => self.zoom(factor).map_err(SessionError::from),
            InputEvent::ZoomAt { factor, x, y } => {
                self.zoom_at(factor, x, y).map_err(SessionError::from)
            }
            InputEvent::Resize { width, height } => {
                self.resize(width, height).map_err(SessionError::from)
            }
            InputEvent::Commit { expression } => {
                // Already logged by commit_expression.
                return self.commit_expression(&expression).map_err(SessionError::from);
            }
            InputEvent::SetColorSettings { settings } => {
                self.set_color_settings(settings);
                Ok(())
            }
            InputEvent::Reset => {
                self.reset();
                Ok(())
            }
        };
        if let Err(e) = &result {
            log::warn!("Rejected input event: {}", e);
        }
        result
    }

    /// Parse a JSON [`InputEvent`] and apply it.
    pub fn dispatch(&mut self, json: &str) -> Result<(), SessionError> {
        let event: InputEvent = serde_json::from_str(json).map_err(|e| {
            log::warn!("Malformed input event {}: {}", json, e);
            SessionError::MalformedEvent(e.to_string())
        })?;
        self.apply(event)
    }

    /// Rebuild the mesh if anything changed since the last tick.
    /// Returns true when a rebuild happened.
    pub fn tick(&mut self) -> bool {
        if !self.scheduler.take_dirty() {
            return false;
        }
        self.rebuild();
        true
    }

    /// Tick, then hand the current mesh to `renderer`.
    ///
    /// `ResourceUnavailable` is fatal: it is logged once, and every later
    /// frame returns it again without ticking or drawing. `Draw` errors are
    /// logged and returned per frame.
    pub fn frame<R: MeshRenderer + ?Sized>(&mut self, renderer: &mut R) -> Result<bool, RenderError> {
        if let Some(e) = &self.render_failure {
            return Err(e.clone());
        }
        let rebuilt = self.tick();
        if let Err(e) = renderer.draw(&self.mesh) {
            log::error!("{}", e);
            if matches!(e, RenderError::ResourceUnavailable(_)) {
                self.render_failure = Some(e.clone());
            }
            return Err(e);
        }
        Ok(rebuilt)
    }

    fn rebuild(&mut self) {
        let start = now();
        let mesh = generate_mesh(
            &self.expression,
            &self.view,
            &self.canvas,
            self.config.mesh_unit_px,
            &self.color,
        );
        let elapsed = (now() - start).max(0.0);

        self.stats
            .record(elapsed, mesh.vertex_count(), mesh.singular_vertices());
        log::debug!(
            "Rebuilt mesh: {} vertices ({} singular) in {:.2}ms",
            mesh.vertex_count(),
            mesh.singular_vertices(),
            elapsed
        );
        self.mesh = Rc::new(mesh);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::with_canvas(&DEFAULT_CONFIG, CanvasSize::default())
    }
}

fn check_mesh_budget(config: &PlotConfig, canvas: &CanvasSize) -> Result<(), InputError> {
    let vertices = planned_vertex_count(canvas, config.mesh_unit_px);
    if vertices > config.max_vertices {
        return Err(InputError::MeshTooLarge {
            width: canvas.width,
            height: canvas.height,
            vertices,
            limit: config.max_vertices,
        });
    }
    Ok(())
}
