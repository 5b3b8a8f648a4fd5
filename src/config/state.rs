//! Configuration state machine.
//!
//! The user's current selection is a plain value mutated only through
//! [`reduce`], a pure `(state, action) -> state` transition. Reset cascades
//! (style switch clears style-scoped options, lapel switch clears width) live
//! here and nowhere else.

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// The user's current garment selection. Ephemeral, never persisted.
pub struct Configuration {
    /// Selected style id.
    pub style_id: String,
    /// Selected color/fabric id. Survives style switches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_id: Option<String>,
    /// Selected lapel type id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lapel_id: Option<String>,
    /// Selected lapel width id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lapel_width_id: Option<String>,
    /// Selected pocket style id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pocket_id: Option<String>,
    /// Selected interior lining id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interior_id: Option<String>,
    /// Selected breast pocket id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breast_pocket_id: Option<String>,
    /// Selected trouser cuff id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuff_id: Option<String>,
    /// Selected button finish id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_id: Option<String>,
    /// Selected material/weave id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_id: Option<String>,
    /// Whether the shirt layer is rendered under the jacket.
    #[serde(default)]
    pub show_shirt: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            style_id: "single_2btn".to_string(),
            color_id: Some("blue".to_string()),
            lapel_id: None,
            lapel_width_id: None,
            pocket_id: None,
            interior_id: None,
            breast_pocket_id: None,
            cuff_id: None,
            button_id: None,
            material_id: None,
            show_shirt: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
/// Actions accepted by the configuration reducer.
///
/// The original dispatch treated unknown action strings as a permissive
/// no-op; with a closed enum that case is unrepresentable.
pub enum Action {
    /// Switch garment style. Clears every style-scoped option, keeps color.
    SetStyle(String),
    /// Select a color/fabric.
    SetColor(String),
    /// Select a lapel type. Clears the width selection.
    SetLapel(String),
    /// Select a lapel width.
    SetLapelWidth(String),
    /// Select a pocket style.
    SetPocket(String),
    /// Select an interior lining.
    SetInterior(String),
    /// Select a breast pocket style.
    SetBreastPocket(String),
    /// Select a trouser cuff style.
    SetCuff(String),
    /// Select a button finish.
    SetButton(String),
    /// Select a material/weave.
    SetMaterial(String),
    /// Toggle the shirt layer.
    ToggleShirt,
    /// Restore the initial configuration captured at construction.
    Reset,
}

/// Pure transition function over [`Configuration`].
///
/// `initial` is the configuration the session started with; only
/// [`Action::Reset`] reads it.
pub fn reduce(state: &Configuration, action: &Action, initial: &Configuration) -> Configuration {
    let mut next = state.clone();
    match action {
        Action::SetStyle(id) => {
            next.style_id = id.clone();
            next.button_id = None;
            next.material_id = None;
            next.lapel_id = None;
            next.lapel_width_id = None;
            next.pocket_id = None;
            next.interior_id = None;
            next.breast_pocket_id = None;
            next.cuff_id = None;
        }
        Action::SetColor(id) => next.color_id = Some(id.clone()),
        Action::SetLapel(id) => {
            next.lapel_id = Some(id.clone());
            next.lapel_width_id = None;
        }
        Action::SetLapelWidth(id) => next.lapel_width_id = Some(id.clone()),
        Action::SetPocket(id) => next.pocket_id = Some(id.clone()),
        Action::SetInterior(id) => next.interior_id = Some(id.clone()),
        Action::SetBreastPocket(id) => next.breast_pocket_id = Some(id.clone()),
        Action::SetCuff(id) => next.cuff_id = Some(id.clone()),
        Action::SetButton(id) => next.button_id = Some(id.clone()),
        Action::SetMaterial(id) => next.material_id = Some(id.clone()),
        Action::ToggleShirt => next.show_shirt = !next.show_shirt,
        Action::Reset => next = initial.clone(),
    }
    next
}

/// Convenience wrapper holding the current state and the reset baseline.
#[derive(Clone, Debug)]
pub struct Configurator {
    initial: Configuration,
    current: Configuration,
}

impl Configurator {
    /// Start a session from `initial`.
    pub fn new(initial: Configuration) -> Self {
        Self {
            current: initial.clone(),
            initial,
        }
    }

    /// Current configuration.
    pub fn state(&self) -> &Configuration {
        &self.current
    }

    /// Apply one action and return the new state.
    pub fn dispatch(&mut self, action: &Action) -> &Configuration {
        self.current = reduce(&self.current, action, &self.initial);
        &self.current
    }
}

impl Default for Configurator {
    fn default() -> Self {
        Self::new(Configuration::default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/state.rs"]
mod tests;
