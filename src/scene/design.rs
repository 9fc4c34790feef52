use crate::foundation::color::Color;
use crate::foundation::core::{Canvas, RasterImage};
use crate::foundation::error::{TypestampError, TypestampResult};
use crate::scene::layer::{LayerId, TextLayer};

/// What the layers are drawn over.
#[derive(Clone, Debug, PartialEq)]
pub enum Background {
    Solid { color: Color, canvas: Canvas },
    Image(RasterImage),
}

impl Background {
    pub fn canvas(&self) -> Canvas {
        match self {
            Self::Solid { canvas, .. } => *canvas,
            Self::Image(img) => img.canvas(),
        }
    }
}

/// Direction of an adjacent z-order swap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reorder {
    Up,
    Down,
}

/// Immutable editor state: layers in z-order (index 0 is the bottom), selection, background.
///
/// Every `with_*` operation returns a new value and leaves `self` untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct DesignState {
    layers: Vec<TextLayer>,
    active: Option<LayerId>,
    selected: Vec<LayerId>,
    background: Background,
    next_id: u64,
}

impl DesignState {
    pub fn new(background: Background) -> Self {
        Self {
            layers: Vec::new(),
            active: None,
            selected: Vec::new(),
            background,
            next_id: 1,
        }
    }

    /// Build a state from externally supplied layers. Ids must be unique; the topmost layer
    /// becomes active and selected.
    pub fn from_layers(background: Background, layers: Vec<TextLayer>) -> TypestampResult<Self> {
        let mut seen = std::collections::HashSet::with_capacity(layers.len());
        for l in &layers {
            if !seen.insert(l.id) {
                return Err(TypestampError::invalid_input(format!("duplicate layer id {}", l.id)));
            }
        }
        let next_id = layers.iter().map(|l| l.id.0).max().map_or(1, |m| m + 1);
        let mut layers = layers;
        for l in &mut layers {
            l.normalize_modes();
        }
        let active = layers.last().map(|l| l.id);
        Ok(Self {
            layers,
            active,
            selected: active.into_iter().collect(),
            background,
            next_id,
        })
    }

    pub fn canvas(&self) -> Canvas {
        self.background.canvas()
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    /// Bottom-to-top.
    pub fn layers(&self) -> &[TextLayer] {
        &self.layers
    }

    pub fn layer(&self, id: LayerId) -> Option<&TextLayer> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn active_layer_id(&self) -> Option<LayerId> {
        self.active
    }

    pub fn active_layer(&self) -> Option<&TextLayer> {
        self.active.and_then(|id| self.layer(id))
    }

    /// Selected ids in the order they were selected.
    pub fn selected_ids(&self) -> &[LayerId] {
        &self.selected
    }

    pub fn is_selected(&self, id: LayerId) -> bool {
        self.selected.contains(&id)
    }

    pub fn selected_layers(&self) -> impl Iterator<Item = &TextLayer> {
        self.layers.iter().filter(|l| self.selected.contains(&l.id))
    }

    pub fn visible_layers(&self) -> impl Iterator<Item = &TextLayer> {
        self.layers.iter().filter(|l| l.visible)
    }

    fn index_of(&self, id: LayerId) -> Option<usize> {
        self.layers.iter().position(|l| l.id == id)
    }

    /// Append `layer` on top with a fresh id; it becomes the only selection.
    pub fn with_layer_added(&self, layer: TextLayer) -> (Self, LayerId) {
        let mut next = self.clone();
        let id = LayerId(next.next_id);
        next.next_id += 1;
        let mut layer = layer;
        layer.id = id;
        layer.normalize_modes();
        next.layers.push(layer);
        next.active = Some(id);
        next.selected = vec![id];
        (next, id)
    }

    /// Copy `id` directly above itself under a new id.
    pub fn with_layer_duplicated(&self, id: LayerId) -> TypestampResult<(Self, LayerId)> {
        let idx = self.require(id)?;
        let mut next = self.clone();
        let new_id = LayerId(next.next_id);
        next.next_id += 1;
        let mut copy = self.layers[idx].clone();
        copy.id = new_id;
        copy.name = format!("{} copy", copy.name);
        next.layers.insert(idx + 1, copy);
        next.active = Some(new_id);
        next.selected = vec![new_id];
        Ok((next, new_id))
    }

    /// Remove `id`, repairing the active layer: last remaining selected, else top layer, else none.
    pub fn with_layer_removed(&self, id: LayerId) -> TypestampResult<Self> {
        let idx = self.require(id)?;
        let mut next = self.clone();
        next.layers.remove(idx);
        next.selected.retain(|s| *s != id);
        next.repair_selection();
        Ok(next)
    }

    pub fn with_layer_moved(&self, id: LayerId, dir: Reorder) -> TypestampResult<Self> {
        let idx = self.require(id)?;
        let target = match dir {
            Reorder::Up => idx + 1,
            Reorder::Down => match idx.checked_sub(1) {
                Some(t) => t,
                None => return Ok(self.clone()),
            },
        };
        let mut next = self.clone();
        if target < next.layers.len() {
            next.layers.swap(idx, target);
        }
        Ok(next)
    }

    /// Apply `edit` to a copy of layer `id`. The id is preserved and path modes stay exclusive.
    pub fn with_layer_updated<F>(&self, id: LayerId, edit: F) -> TypestampResult<Self>
    where
        F: FnOnce(&mut TextLayer),
    {
        let idx = self.require(id)?;
        let mut next = self.clone();
        let layer = &mut next.layers[idx];
        edit(layer);
        layer.id = id;
        layer.normalize_modes();
        Ok(next)
    }

    pub fn with_visibility_toggled(&self, id: LayerId) -> TypestampResult<Self> {
        self.with_layer_updated(id, |l| l.visible = !l.visible)
    }

    pub fn with_lock_toggled(&self, id: LayerId) -> TypestampResult<Self> {
        self.with_layer_updated(id, |l| l.locked = !l.locked)
    }

    /// Make `id` the active layer and sole selection.
    pub fn with_selected(&self, id: LayerId) -> TypestampResult<Self> {
        self.require(id)?;
        let mut next = self.clone();
        next.active = Some(id);
        next.selected = vec![id];
        Ok(next)
    }

    /// Add `id` to the selection (making it active) or remove it.
    pub fn with_selection_toggled(&self, id: LayerId) -> TypestampResult<Self> {
        self.require(id)?;
        let mut next = self.clone();
        if next.selected.contains(&id) {
            next.selected.retain(|s| *s != id);
            if next.active == Some(id) {
                next.active = next.selected.last().copied();
            }
        } else {
            next.selected.push(id);
            next.active = Some(id);
        }
        Ok(next)
    }

    pub fn with_all_selected(&self) -> Self {
        let mut next = self.clone();
        next.selected = next.layers.iter().map(|l| l.id).collect();
        if next.active.is_none() {
            next.active = next.layers.last().map(|l| l.id);
        }
        next
    }

    pub fn with_selection_cleared(&self) -> Self {
        let mut next = self.clone();
        next.selected.clear();
        next.active = None;
        next
    }

    /// Swap the background. Paths reference image pixels, so every layer's path data is cleared.
    pub fn with_background(&self, background: Background) -> Self {
        let mut next = self.clone();
        next.background = background;
        for l in &mut next.layers {
            l.clear_path();
        }
        next
    }

    /// Install a stamped raster as the new background and drop the layers baked into it.
    ///
    /// The raster has the current canvas size, so surviving paths stay valid.
    pub fn with_stamp_applied(
        &self,
        stamped: RasterImage,
        ids: &[LayerId],
    ) -> TypestampResult<Self> {
        if stamped.canvas() != self.canvas() {
            return Err(TypestampError::invalid_input(format!(
                "stamp is {}x{}, canvas is {}x{}",
                stamped.width(),
                stamped.height(),
                self.canvas().width,
                self.canvas().height
            )));
        }
        let mut next = self.clone();
        next.background = Background::Image(stamped);
        next.layers.retain(|l| !ids.contains(&l.id));
        next.selected.retain(|s| !ids.contains(s));
        next.repair_selection();
        Ok(next)
    }

    fn require(&self, id: LayerId) -> TypestampResult<usize> {
        self.index_of(id)
            .ok_or_else(|| TypestampError::invalid_input(format!("unknown {id}")))
    }

    fn repair_selection(&mut self) {
        self.selected.retain(|s| self.layers.iter().any(|l| l.id == *s));
        let active_alive = self
            .active
            .is_some_and(|a| self.layers.iter().any(|l| l.id == a));
        if !active_alive {
            self.active = self
                .selected
                .last()
                .copied()
                .or_else(|| self.layers.last().map(|l| l.id));
        }
        if let Some(a) = self.active {
            if !self.selected.contains(&a) {
                self.selected.push(a);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/design.rs"]
mod tests;
