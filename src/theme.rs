//! Theme variables, presets and the style context widgets draw with
//!
//! A [`ThemeRegistry`] applies one preset at a time onto a shared
//! [`StyleContext`]. The context is an explicit, reference-counted handle that
//! render calls receive through their props; nothing is global.
//!
//! Every variable a preset sets on activation is removed exactly once when the
//! preset is deactivated, replaced, or when the registry is dropped.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::str::FromStr;

use ratatui::style::{Color, Modifier, Style};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

// ============================================================================
// Mode
// ============================================================================

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggle(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }
}

// ============================================================================
// Variables
// ============================================================================

/// The closed vocabulary of style variables
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ThemeVar {
    BgPage,
    BgWidget,
    BgPanel,
    BgCard,
    TextPrimary,
    TextSecondary,
    TextTertiary,
    TextMuted,
    TextShadow,
    BorderLight,
    BorderMedium,
    ShadowSubtle,
    ShadowInner,
    ShadowMedium,
    ShadowHeavy,
    Highlight,
    HighlightStrong,
    AccentSuccess,
    InputBg,
    InputText,
    ButtonBg,
    ButtonText,
    SwitchTrack,
    SwitchThumb,
}

impl ThemeVar {
    pub const COUNT: usize = 24;

    pub const ALL: [ThemeVar; Self::COUNT] = [
        ThemeVar::BgPage,
        ThemeVar::BgWidget,
        ThemeVar::BgPanel,
        ThemeVar::BgCard,
        ThemeVar::TextPrimary,
        ThemeVar::TextSecondary,
        ThemeVar::TextTertiary,
        ThemeVar::TextMuted,
        ThemeVar::TextShadow,
        ThemeVar::BorderLight,
        ThemeVar::BorderMedium,
        ThemeVar::ShadowSubtle,
        ThemeVar::ShadowInner,
        ThemeVar::ShadowMedium,
        ThemeVar::ShadowHeavy,
        ThemeVar::Highlight,
        ThemeVar::HighlightStrong,
        ThemeVar::AccentSuccess,
        ThemeVar::InputBg,
        ThemeVar::InputText,
        ThemeVar::ButtonBg,
        ThemeVar::ButtonText,
        ThemeVar::SwitchTrack,
        ThemeVar::SwitchThumb,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ThemeVar::BgPage => "--twx-bg-page",
            ThemeVar::BgWidget => "--twx-bg-widget",
            ThemeVar::BgPanel => "--twx-bg-panel",
            ThemeVar::BgCard => "--twx-bg-card",
            ThemeVar::TextPrimary => "--twx-text-primary",
            ThemeVar::TextSecondary => "--twx-text-secondary",
            ThemeVar::TextTertiary => "--twx-text-tertiary",
            ThemeVar::TextMuted => "--twx-text-muted",
            ThemeVar::TextShadow => "--twx-text-shadow",
            ThemeVar::BorderLight => "--twx-border-light",
            ThemeVar::BorderMedium => "--twx-border-medium",
            ThemeVar::ShadowSubtle => "--twx-shadow-subtle",
            ThemeVar::ShadowInner => "--twx-shadow-inner",
            ThemeVar::ShadowMedium => "--twx-shadow-medium",
            ThemeVar::ShadowHeavy => "--twx-shadow-heavy",
            ThemeVar::Highlight => "--twx-highlight",
            ThemeVar::HighlightStrong => "--twx-highlight-strong",
            ThemeVar::AccentSuccess => "--twx-accent-success",
            ThemeVar::InputBg => "--twx-input-bg",
            ThemeVar::InputText => "--twx-input-text",
            ThemeVar::ButtonBg => "--twx-button-bg",
            ThemeVar::ButtonText => "--twx-button-text",
            ThemeVar::SwitchTrack => "--twx-switch-track",
            ThemeVar::SwitchThumb => "--twx-switch-thumb",
        }
    }

    /// Built-in value for a mode, as `(light, dark)` pairs.
    pub fn default_value(self, mode: ThemeMode) -> &'static str {
        let (light, dark) = match self {
            ThemeVar::BgPage => ("#f2f2f2", "#121214"),
            ThemeVar::BgWidget => ("#f7f7f7", "#1e1e22"),
            ThemeVar::BgPanel => ("#f5f5f5", "#232328"),
            ThemeVar::BgCard => ("#ffffff", "#2a2a30"),
            ThemeVar::TextPrimary => ("#2a2a2a", "#f0f0f2"),
            ThemeVar::TextSecondary => ("#555555", "#c4c4cc"),
            ThemeVar::TextTertiary => ("#777777", "#9a9aa4"),
            ThemeVar::TextMuted => ("#999999", "#6e6e78"),
            ThemeVar::TextShadow => ("#ffffff", "#000000"),
            ThemeVar::BorderLight => ("#e6e6e6", "#34343a"),
            ThemeVar::BorderMedium => ("#d0d0d0", "#44444c"),
            ThemeVar::ShadowSubtle => ("#e4e4e4", "#0c0c0e"),
            ThemeVar::ShadowInner => ("#ececec", "#18181c"),
            ThemeVar::ShadowMedium => ("#d6d6d6", "#0a0a0c"),
            ThemeVar::ShadowHeavy => ("#c4c4c4", "#050506"),
            ThemeVar::Highlight => ("#ffffff", "#3a3a42"),
            ThemeVar::HighlightStrong => ("#ffffff", "#4a4a54"),
            ThemeVar::AccentSuccess => ("#8cc63f", "#7ab83a"),
            ThemeVar::InputBg => ("#f0f0f0", "#2c2c32"),
            ThemeVar::InputText => ("#333333", "#e8e8ec"),
            ThemeVar::ButtonBg => ("#f4f4f4", "#303036"),
            ThemeVar::ButtonText => ("#666666", "#b8b8c0"),
            ThemeVar::SwitchTrack => ("#e0e0e0", "#3a3a40"),
            ThemeVar::SwitchThumb => ("#fafafa", "#d8d8de"),
        };
        match mode {
            ThemeMode::Light => light,
            ThemeMode::Dark => dark,
        }
    }
}

impl fmt::Display for ThemeVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ThemeVar {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ThemeVar::ALL
            .into_iter()
            .find(|var| var.name() == s)
            .ok_or_else(|| ThemeError::UnknownVariable(s.to_string()))
    }
}

impl Serialize for ThemeVar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for ThemeVar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(de::Error::custom)
    }
}

/// Parse a theme value into a terminal color.
///
/// Accepts `#rgb`, `#rrggbb`, `rgb(r, g, b)`, `rgba(r, g, b, a)` (alpha is
/// dropped) and anything ratatui's color parser understands.
pub fn parse_color(value: &str) -> Option<Color> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some(args) = value
        .strip_prefix("rgba(")
        .or_else(|| value.strip_prefix("rgb("))
    {
        let mut parts = args.strip_suffix(')')?.split(',').map(str::trim);
        let r = parts.next()?.parse().ok()?;
        let g = parts.next()?.parse().ok()?;
        let b = parts.next()?.parse().ok()?;
        return Some(Color::Rgb(r, g, b));
    }
    Color::from_str(value).ok()
}

fn parse_hex(hex: &str) -> Option<Color> {
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut digits = hex.chars().map(|c| c.to_digit(16).map(|d| d as u8 * 17));
            Some(Color::Rgb(digits.next()??, digits.next()??, digits.next()??))
        }
        6 => Some(Color::Rgb(
            channel(hex.get(0..2)?)?,
            channel(hex.get(2..4)?)?,
            channel(hex.get(4..6)?)?,
        )),
        _ => None,
    }
}

// ============================================================================
// Variable sets and presets
// ============================================================================

/// Variable overrides supplied by a preset
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeVariableSet(BTreeMap<ThemeVar, String>);

impl ThemeVariableSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, var: ThemeVar, value: impl Into<String>) -> Self {
        self.insert(var, value);
        self
    }

    pub fn insert(&mut self, var: ThemeVar, value: impl Into<String>) {
        self.0.insert(var, value.into());
    }

    pub fn get(&self, var: ThemeVar) -> Option<&str> {
        self.0.get(&var).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ThemeVar, &str)> {
        self.0.iter().map(|(var, value)| (*var, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A named mode plus optional variable overrides
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Preset {
    pub name: String,
    pub mode: ThemeMode,
    #[serde(default)]
    pub variables: Option<ThemeVariableSet>,
}

impl Preset {
    pub fn new(name: impl Into<String>, mode: ThemeMode) -> Self {
        Self {
            name: name.into(),
            mode,
            variables: None,
        }
    }

    pub fn with_variables(mut self, variables: ThemeVariableSet) -> Self {
        self.variables = Some(variables);
        self
    }
}

/// The part of a preset the store needs to cycle through presets
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PresetInfo {
    pub name: String,
    pub mode: ThemeMode,
}

impl From<&Preset> for PresetInfo {
    fn from(preset: &Preset) -> Self {
        Self {
            name: preset.name.clone(),
            mode: preset.mode,
        }
    }
}

/// Presets that ship with the library
pub fn builtin_presets() -> Vec<Preset> {
    vec![
        Preset::new("classic", ThemeMode::Light),
        Preset::new("graphite", ThemeMode::Dark),
        Preset::new("sunrise", ThemeMode::Light).with_variables(
            ThemeVariableSet::new()
                .with(ThemeVar::BgPage, "#fbeee4")
                .with(ThemeVar::BgWidget, "#fff6ee")
                .with(ThemeVar::BgCard, "#fffaf5")
                .with(ThemeVar::TextPrimary, "#4a2c1d")
                .with(ThemeVar::TextSecondary, "#7a4b33")
                .with(ThemeVar::BorderLight, "#f0d9c8")
                .with(ThemeVar::ShadowHeavy, "#e6c3aa")
                .with(ThemeVar::AccentSuccess, "#e07a3f"),
        ),
        Preset::new("midnight", ThemeMode::Dark).with_variables(
            ThemeVariableSet::new()
                .with(ThemeVar::BgPage, "#0b1020")
                .with(ThemeVar::BgWidget, "#121a30")
                .with(ThemeVar::BgCard, "#1a2440")
                .with(ThemeVar::BgPanel, "#16203a")
                .with(ThemeVar::TextPrimary, "#e6ecff")
                .with(ThemeVar::TextSecondary, "#aab6dd")
                .with(ThemeVar::BorderLight, "#26325a")
                .with(ThemeVar::Highlight, "#2c3a66")
                .with(ThemeVar::AccentSuccess, "#4fc3f7"),
        ),
    ]
}

#[derive(thiserror::Error, Debug)]
pub enum ThemeError {
    #[error("unknown theme variable `{0}`")]
    UnknownVariable(String),
    #[error("unknown preset `{0}`")]
    UnknownPreset(String),
    #[error("failed to read preset file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid preset file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Load presets from a JSON array of `{name, mode, variables?}` objects.
pub fn load_presets(path: &Path) -> Result<Vec<Preset>, ThemeError> {
    let json = std::fs::read_to_string(path).map_err(|source| ThemeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_presets(&json)
}

pub fn parse_presets(json: &str) -> Result<Vec<Preset>, ThemeError> {
    Ok(serde_json::from_str(json)?)
}

// ============================================================================
// Style context
// ============================================================================

/// One place a mode flag (and variables) can be attached to.
#[derive(Debug, Default)]
struct Attachment {
    mode: Option<ThemeMode>,
    variables: BTreeMap<ThemeVar, String>,
}

#[derive(Debug, Default)]
struct StyleScope {
    root: Attachment,
    container: Attachment,
}

/// Shared style state handed to render calls
///
/// Cloning yields another handle onto the same state.
#[derive(Clone, Debug, Default)]
pub struct StyleContext {
    inner: Rc<RefCell<StyleScope>>,
}

impl StyleContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable on the root attachment.
    pub fn set_variable(&self, var: ThemeVar, value: impl Into<String>) {
        self.inner
            .borrow_mut()
            .root
            .variables
            .insert(var, value.into());
    }

    pub fn remove_variable(&self, var: ThemeVar) -> Option<String> {
        self.inner.borrow_mut().root.variables.remove(&var)
    }

    /// Explicitly set value, if any.
    pub fn variable(&self, var: ThemeVar) -> Option<String> {
        let scope = self.inner.borrow();
        scope
            .root
            .variables
            .get(&var)
            .or_else(|| scope.container.variables.get(&var))
            .cloned()
    }

    pub fn variable_count(&self) -> usize {
        let scope = self.inner.borrow();
        scope.root.variables.len() + scope.container.variables.len()
    }

    /// Mirror the mode onto both attachment points.
    pub fn set_mode(&self, mode: ThemeMode) {
        let mut scope = self.inner.borrow_mut();
        scope.root.mode = Some(mode);
        scope.container.mode = Some(mode);
    }

    pub fn mode(&self) -> ThemeMode {
        let scope = self.inner.borrow();
        scope
            .root
            .mode
            .or(scope.container.mode)
            .unwrap_or_default()
    }

    pub fn root_mode(&self) -> Option<ThemeMode> {
        self.inner.borrow().root.mode
    }

    pub fn container_mode(&self) -> Option<ThemeMode> {
        self.inner.borrow().container.mode
    }

    /// Effective value: the override if set, else the mode default.
    pub fn value(&self, var: ThemeVar) -> String {
        self.variable(var)
            .unwrap_or_else(|| var.default_value(self.mode()).to_string())
    }

    pub fn color(&self, var: ThemeVar) -> Color {
        let mode = self.mode();
        self.variable(var)
            .and_then(|value| {
                let color = parse_color(&value);
                if color.is_none() {
                    tracing::debug!(
                        variable = %var,
                        value,
                        "unparseable theme value, using default"
                    );
                }
                color
            })
            .or_else(|| parse_color(var.default_value(mode)))
            .unwrap_or(Color::Reset)
    }

    /// Resolve every variable once for a render pass.
    pub fn palette(&self) -> Palette {
        let mut colors = [Color::Reset; ThemeVar::COUNT];
        for var in ThemeVar::ALL {
            colors[var as usize] = self.color(var);
        }
        Palette {
            mode: self.mode(),
            colors,
        }
    }
}

/// Colors resolved from a [`StyleContext`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    pub mode: ThemeMode,
    colors: [Color; ThemeVar::COUNT],
}

impl Palette {
    pub fn get(&self, var: ThemeVar) -> Color {
        self.colors[var as usize]
    }

    pub fn fg(&self, var: ThemeVar) -> Style {
        Style::default().fg(self.get(var))
    }

    pub fn bold(&self, var: ThemeVar) -> Style {
        self.fg(var).add_modifier(Modifier::BOLD)
    }

    pub fn on(&self, fg: ThemeVar, bg: ThemeVar) -> Style {
        Style::default().fg(self.get(fg)).bg(self.get(bg))
    }

    pub fn surface(&self, bg: ThemeVar) -> Style {
        Style::default().bg(self.get(bg))
    }
}

impl Default for Palette {
    fn default() -> Self {
        StyleContext::new().palette()
    }
}

// ============================================================================
// Registry
// ============================================================================

#[derive(Debug)]
struct ActiveTheme {
    name: String,
    applied: Vec<ThemeVar>,
}

/// Owns the preset catalog and applies one preset at a time
#[derive(Debug)]
pub struct ThemeRegistry {
    context: StyleContext,
    presets: Vec<Preset>,
    active: Option<ActiveTheme>,
}

impl ThemeRegistry {
    /// Registry over the built-in presets.
    pub fn new(context: StyleContext) -> Self {
        Self::with_presets(context, builtin_presets())
    }

    pub fn with_presets(context: StyleContext, presets: Vec<Preset>) -> Self {
        Self {
            context,
            presets,
            active: None,
        }
    }

    pub fn context(&self) -> &StyleContext {
        &self.context
    }

    pub fn presets(&self) -> &[Preset] {
        &self.presets
    }

    pub fn preset(&self, name: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.name == name)
    }

    pub fn preset_infos(&self) -> Vec<PresetInfo> {
        self.presets.iter().map(PresetInfo::from).collect()
    }

    /// Add a preset, replacing any preset with the same name.
    pub fn register(&mut self, preset: Preset) {
        match self.presets.iter_mut().find(|p| p.name == preset.name) {
            Some(existing) => *existing = preset,
            None => self.presets.push(preset),
        }
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.name.as_str())
    }

    pub fn mode(&self) -> ThemeMode {
        self.context.mode()
    }

    /// Apply a preset's variables and mode.
    ///
    /// Whatever was active is deactivated first, so two presets never share
    /// the context.
    pub fn activate(&mut self, preset: &Preset) {
        self.deactivate_active();

        let mut applied = Vec::new();
        if let Some(variables) = &preset.variables {
            for (var, value) in variables.iter() {
                self.context.set_variable(var, value);
                applied.push(var);
            }
        }
        self.context.set_mode(preset.mode);
        tracing::debug!(preset = %preset.name, variables = applied.len(), "theme activated");

        self.active = Some(ActiveTheme {
            name: preset.name.clone(),
            applied,
        });
    }

    /// Remove the variables set by the named preset. Returns false when that
    /// preset is not the active one.
    pub fn deactivate(&mut self, name: &str) -> bool {
        if self.active() != Some(name) {
            return false;
        }
        self.deactivate_active();
        true
    }

    fn deactivate_active(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };
        for var in active.applied {
            self.context.remove_variable(var);
        }
        tracing::debug!(preset = %active.name, "theme deactivated");
    }

    /// Deactivate the outgoing preset, then activate `name`.
    pub fn switch_to(&mut self, name: &str) -> Result<(), ThemeError> {
        let preset = self
            .preset(name)
            .cloned()
            .ok_or_else(|| ThemeError::UnknownPreset(name.to_string()))?;
        self.activate(&preset);
        Ok(())
    }

    /// Change the mode flag without touching variables.
    pub fn set_mode(&mut self, mode: ThemeMode) {
        self.context.set_mode(mode);
    }

    /// Bring the context in line with a requested preset and mode.
    pub fn sync(&mut self, name: &str, mode: ThemeMode) {
        if self.active() != Some(name) {
            if let Err(e) = self.switch_to(name) {
                tracing::warn!(error = %e, "keeping current theme");
            }
        }
        if self.context.mode() != mode {
            self.set_mode(mode);
        }
    }
}

impl Drop for ThemeRegistry {
    fn drop(&mut self) {
        self.deactivate_active();
    }
}
