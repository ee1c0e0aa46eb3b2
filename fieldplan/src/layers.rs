//! Layer selection control model.
//!
//! Entries are kept in the order the layers were added to the map, so an entry index is also the
//! index of the layer in the map layer collection.

/// Kind of a selectable layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerRole {
    /// Basemap. Exactly one base layer is visible at a time.
    Base,
    /// Overlay drawn on top of the basemap, toggled independently.
    Overlay,
}

/// A layer listed in the control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerEntry {
    /// Name shown to the user.
    pub name: String,
    /// Base layer or overlay.
    pub role: LayerRole,
    visible: bool,
}

impl LayerEntry {
    /// Whether the layer is currently shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Togglable list of base layers and overlays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerControl {
    entries: Vec<LayerEntry>,
    collapsed: bool,
}

impl Default for LayerControl {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            collapsed: true,
        }
    }
}

impl LayerControl {
    /// Creates an empty, collapsed control.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a base layer and returns its index. The first base layer is shown, later ones are
    /// hidden until selected.
    pub fn add_base(&mut self, name: impl Into<String>) -> usize {
        let visible = !self.entries.iter().any(|e| e.role == LayerRole::Base);
        self.push(name.into(), LayerRole::Base, visible)
    }

    /// Adds an overlay and returns its index.
    pub fn add_overlay(&mut self, name: impl Into<String>, visible: bool) -> usize {
        self.push(name.into(), LayerRole::Overlay, visible)
    }

    /// All entries in layer order.
    pub fn entries(&self) -> &[LayerEntry] {
        &self.entries
    }

    /// Whether the layer at `index` is shown. Unknown indices are reported as hidden.
    pub fn is_visible(&self, index: usize) -> bool {
        self.entries.get(index).is_some_and(|e| e.visible)
    }

    /// Makes the base layer at `index` the only visible base layer.
    ///
    /// Returns `false` if `index` is not a base layer.
    pub fn select_base(&mut self, index: usize) -> bool {
        if self.entries.get(index).map(|e| e.role) != Some(LayerRole::Base) {
            return false;
        }

        for (i, entry) in self.entries.iter_mut().enumerate() {
            if entry.role == LayerRole::Base {
                entry.visible = i == index;
            }
        }

        true
    }

    /// Shows or hides the overlay at `index`.
    ///
    /// Returns `false` if `index` is not an overlay.
    pub fn set_overlay(&mut self, index: usize, visible: bool) -> bool {
        match self.entries.get_mut(index) {
            Some(entry) if entry.role == LayerRole::Overlay => {
                entry.visible = visible;
                true
            }
            _ => false,
        }
    }

    /// Whether only the control button is shown instead of the full list.
    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Expands a collapsed control and collapses an expanded one.
    pub fn toggle_collapsed(&mut self) {
        self.collapsed = !self.collapsed;
    }

    fn push(&mut self, name: String, role: LayerRole, visible: bool) -> usize {
        self.entries.push(LayerEntry {
            name,
            role,
            visible,
        });
        self.entries.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn control() -> LayerControl {
        let mut control = LayerControl::new();
        control.add_base("Satelital (Esri)");
        control.add_base("OpenStreetMap");
        control.add_overlay("Calles/labels", true);
        control
    }

    #[test]
    fn first_base_is_visible() {
        let control = control();

        assert!(control.is_visible(0));
        assert!(!control.is_visible(1));
        assert!(control.is_visible(2));
        assert!(!control.is_visible(3));
        assert!(control.is_collapsed());
    }

    #[test]
    fn selecting_base_hides_other_bases_only() {
        let mut control = control();

        assert!(control.select_base(1));

        assert!(!control.is_visible(0));
        assert!(control.is_visible(1));
        assert!(control.is_visible(2));
        let visible_bases = control
            .entries()
            .iter()
            .filter(|e| e.role == LayerRole::Base && e.is_visible())
            .count();
        assert_eq!(visible_bases, 1);
    }

    #[test]
    fn wrong_roles_are_rejected() {
        let mut control = control();

        assert!(!control.select_base(2));
        assert!(!control.set_overlay(0, false));
        assert!(!control.set_overlay(7, false));
        assert_eq!(control, self::control());
    }

    #[test]
    fn overlays_toggle_independently() {
        let mut control = control();

        assert!(control.set_overlay(2, false));
        assert!(!control.is_visible(2));
        assert!(control.is_visible(0));

        assert!(control.set_overlay(2, true));
        assert!(control.is_visible(2));
    }

    #[test]
    fn collapse_toggle() {
        let mut control = control();
        control.toggle_collapsed();
        assert!(!control.is_collapsed());
        control.toggle_collapsed();
        assert!(control.is_collapsed());
    }
}
