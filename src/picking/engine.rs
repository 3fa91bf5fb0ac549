use tracing::debug;

use super::backend::{PickBackend, PickPass};
use super::camera::Camera;
use super::viewport::{PickRegion, ViewportSize};
use crate::mesh::Mesh;
use crate::selection::Selection;

/// How a pick changes the current selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionMode {
    /// Union the hits into the selection.
    #[default]
    Add,
    /// Remove the hits from the selection.
    Delete,
}

impl SelectionMode {
    /// Applies `hits` to `selection` according to the mode.
    pub fn apply(self, selection: &mut Selection, hits: &Selection) {
        match self {
            Self::Add => selection.union_with(hits),
            Self::Delete => selection.subtract(hits),
        }
    }
}

/// Brush configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickSettings {
    /// Side of the square pick window in device pixels.
    pub brush_size: u32,
    pub mode: SelectionMode,
}

impl Default for PickSettings {
    fn default() -> Self {
        Self {
            brush_size: 10,
            mode: SelectionMode::Add,
        }
    }
}

/// Resolves screen positions to polygon indices through a [`PickBackend`].
///
/// Every hit in the pick window is returned, front and back, as long as
/// it faces the camera. There is no batching: a brush stroke calls
/// [`PickEngine::brush`] once per cursor move.
#[derive(Debug)]
pub struct PickEngine<B> {
    backend: B,
    settings: PickSettings,
}

impl<B: PickBackend> PickEngine<B> {
    /// Creates an engine with default brush settings.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self::with_settings(backend, PickSettings::default())
    }

    #[must_use]
    pub fn with_settings(backend: B, settings: PickSettings) -> Self {
        Self { backend, settings }
    }

    #[must_use]
    pub fn settings(&self) -> &PickSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut PickSettings {
        &mut self.settings
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Polygons visible in a `window_size` square centered on the cursor.
    ///
    /// The cursor uses widget coordinates with the origin at the top-left.
    /// An empty mesh or a zero-sized window gives an empty selection.
    pub fn pick(
        &mut self,
        cursor_x: f64,
        cursor_y: f64,
        window_size: u32,
        camera: &Camera,
        viewport_size: ViewportSize,
        mesh: &Mesh,
    ) -> Selection {
        if mesh.polygon_count() == 0 {
            return Selection::new();
        }
        let region = PickRegion::around_cursor(cursor_x, cursor_y, window_size, viewport_size);
        let Some(narrow) = region.pick_matrix(&viewport_size.gl_viewport()) else {
            return Selection::new();
        };

        let pass = PickPass {
            projection: narrow * camera.projection(),
            model_view: camera.model_view(),
            cull_back_faces: true,
        };
        self.backend.begin_pick(&pass);
        self.backend.render_tagged(mesh);
        let hits = self.backend.end_pick();

        debug!(
            x = cursor_x,
            y = cursor_y,
            window = window_size,
            hits = hits.len(),
            "pick"
        );
        hits
    }

    /// Picks with the configured brush size and applies the configured mode
    /// to `selection`. Returns the raw hits.
    pub fn brush(
        &mut self,
        selection: &mut Selection,
        cursor_x: f64,
        cursor_y: f64,
        camera: &Camera,
        viewport_size: ViewportSize,
        mesh: &Mesh,
    ) -> Selection {
        let hits = self.pick(
            cursor_x,
            cursor_y,
            self.settings.brush_size,
            camera,
            viewport_size,
            mesh,
        );
        self.settings.mode.apply(selection, &hits);
        hits
    }

    /// Single-pixel pick under the cursor, as used to answer a quiz question.
    pub fn probe(
        &mut self,
        cursor_x: f64,
        cursor_y: f64,
        camera: &Camera,
        viewport_size: ViewportSize,
        mesh: &Mesh,
    ) -> Selection {
        self.pick(cursor_x, cursor_y, 1, camera, viewport_size, mesh)
    }
}
