//! Store actions: intents from the UI and results from async tasks

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::{CardView, Location, WeatherSnapshot};
use crate::variant::SizeTag;

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Weather category =====
    /// Intent: fetch weather for the current location
    WeatherFetch,

    /// Result: snapshot for fetch `generation`
    WeatherDidLoad {
        generation: u64,
        snapshot: WeatherSnapshot,
    },

    /// Result: fetch `generation` failed
    WeatherDidError { generation: u64, message: String },

    // ===== Location category =====
    /// Switch to a known location by index
    LocationSelect(usize),

    // ===== Search category =====
    SearchOpen,

    SearchClose,

    /// Typeahead input changed
    SearchQueryChange(String),

    /// Enter pressed in the input
    SearchQuerySubmit(String),

    /// Result: locations found for `query`
    SearchDidLoad {
        query: String,
        results: Vec<Location>,
    },

    SearchSelect(usize),

    /// Adopt the selected result as a location
    SearchConfirm,

    // ===== UI category =====
    UiToggleUnits,

    UiToggleLanguage,

    UiSelectSize(SizeTag),

    UiNextSize,

    UiPrevSize,

    // ===== Card category =====
    CardViewChange(CardView),

    // ===== Theme category =====
    /// Next preset in the catalog
    ThemeCycle,

    /// Flip light/dark without changing preset
    ThemeToggleMode,

    // ===== Uncategorized (global) =====
    /// Force a re-render
    Render,

    /// Periodic tick for the placeholder pulse
    Tick,

    Quit,
}
