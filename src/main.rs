//! Tactile weather showcase

use std::cell::RefCell;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Mutex;
use std::time::Duration;

use chrono::Timelike;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tactile_weather::action::Action;
use tactile_weather::api::{ApiError, WeatherClient};
use tactile_weather::components::search_overlay::{SEARCH_MODAL_HEIGHT, SEARCH_MODAL_WIDTH};
use tactile_weather::components::{
    Component, SearchOverlay, SearchOverlayProps, Showcase, ShowcaseProps,
};
use tactile_weather::effect::{Effect, handle_effect};
use tactile_weather::i18n::Language;
use tactile_weather::reducer::reducer;
use tactile_weather::state::{
    AppState, PULSE_TICK_MS, TempUnit, default_locations, merge_location,
};
use tactile_weather::theme::{
    Palette, PresetInfo, StyleContext, ThemeMode, ThemeRegistry, load_presets,
};
use tactile_weather::variant::SizeTag;
use tracing_subscriber::EnvFilter;
use tui_dispatch::{
    EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext,
};
use tui_dispatch_components::centered_rect;
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

/// Responsive, themeable weather widgets in the terminal
#[derive(Parser, Debug)]
#[command(name = "tactile-weather")]
#[command(about = "Seven weather widget sizes with switchable themes")]
struct Args {
    /// City to look up and show first (Open-Meteo geocoding)
    #[arg(long, short)]
    city: Option<String>,

    /// Initial widget size
    #[arg(long, short, default_value_t = SizeTag::Large)]
    size: SizeTag,

    /// Initial theme preset
    #[arg(long, short)]
    preset: Option<String>,

    /// Light or dark, overriding the preset's mode
    #[arg(long, short, value_enum)]
    mode: Option<ThemeMode>,

    /// Temperature unit
    #[arg(long, short, value_enum, default_value_t = TempUnit::Celsius)]
    unit: TempUnit,

    /// UI language
    #[arg(long, short, value_enum, default_value_t = Language::En)]
    lang: Language,

    /// Refresh interval in seconds (minimum 1)
    #[arg(long, short, default_value = "300", value_parser = clap::value_parser!(u64).range(1..))]
    refresh_interval: u64,

    /// JSON file with extra theme presets
    #[arg(long)]
    theme_file: Option<PathBuf>,

    /// Write logs here (filtered by RUST_LOG, default info)
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum WeatherComponentId {
    Showcase,
    Search,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum WeatherContext {
    Main,
    Search,
}

impl EventRoutingState<WeatherComponentId, WeatherContext> for AppState {
    fn focused(&self) -> Option<WeatherComponentId> {
        if self.search_mode {
            Some(WeatherComponentId::Search)
        } else {
            Some(WeatherComponentId::Showcase)
        }
    }

    fn modal(&self) -> Option<WeatherComponentId> {
        self.search_mode.then_some(WeatherComponentId::Search)
    }

    fn binding_context(&self, id: WeatherComponentId) -> WeatherContext {
        match id {
            WeatherComponentId::Showcase => WeatherContext::Main,
            WeatherComponentId::Search => WeatherContext::Search,
        }
    }

    fn default_context(&self) -> WeatherContext {
        WeatherContext::Main
    }
}

/// Startup options that shape the initial state
struct StartupOptions {
    city: Option<String>,
    size: SizeTag,
    unit: TempUnit,
    lang: Language,
    mode: Option<ThemeMode>,
    presets: Vec<PresetInfo>,
    preset_index: usize,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        city,
        size,
        preset,
        mode,
        unit,
        lang,
        refresh_interval,
        theme_file,
        log_file,
        debug: debug_args,
    } = Args::parse();

    if let Some(path) = &log_file {
        init_logging(path)?;
    }

    let styles = StyleContext::new();
    let mut registry = ThemeRegistry::new(styles);
    if let Some(path) = &theme_file {
        match load_presets(path) {
            Ok(presets) => {
                tracing::info!(
                    count = presets.len(),
                    path = %path.display(),
                    "loaded theme presets"
                );
                presets.into_iter().for_each(|p| registry.register(p));
            }
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }

    let presets = registry.preset_infos();
    let preset_index = match &preset {
        Some(name) => match presets.iter().position(|p| &p.name == name) {
            Some(index) => index,
            None => {
                let known: Vec<_> = presets.iter().map(|p| p.name.as_str()).collect();
                eprintln!("Error: unknown preset '{name}'. Available: {}", known.join(", "));
                std::process::exit(1);
            }
        },
        None => 0,
    };

    let client = WeatherClient::new();
    let options = StartupOptions {
        city,
        size,
        unit,
        lang,
        mode,
        presets,
        preset_index,
    };

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let startup_client = client.clone();
    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(initial_state(&startup_client, options).await)
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(
        &mut terminal,
        &debug,
        store,
        registry,
        client,
        refresh_interval,
        replay_actions,
    )
    .await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| io::Error::other(e.to_string()))
}

async fn initial_state(client: &WeatherClient, options: StartupOptions) -> AppState {
    let mut locations = default_locations();
    let mut current = 0;

    if let Some(city) = &options.city {
        match client.geocode_city(city, options.lang).await {
            Ok(location) => current = merge_location(&mut locations, location),
            Err(ApiError::NotFound(city)) => {
                eprintln!("Error: City '{city}' not found. Please check the spelling.");
                eprintln!("Examples: 'London', 'Tokyo', 'New York'");
                std::process::exit(1);
            }
            Err(e) => {
                eprintln!("Error: Could not connect to geocoding service.");
                eprintln!("Details: {e}");
                std::process::exit(1);
            }
        }
    }

    let mut state = AppState::new(locations);
    state.current = current;
    state.size = options.size;
    state.unit = options.unit;
    state.lang = options.lang;
    state.presets = options.presets;
    state.preset_index = options.preset_index;
    let preset_mode = state.active_preset().map(|p| p.mode).unwrap_or_default();
    state.mode = options.mode.unwrap_or(preset_mode);
    state
}

struct WeatherUi {
    showcase: Showcase,
    search: SearchOverlay,
    registry: ThemeRegistry,
}

impl WeatherUi {
    fn new(registry: ThemeRegistry) -> Self {
        Self {
            showcase: Showcase::new(),
            search: SearchOverlay::new(),
            registry,
        }
    }

    /// Hour used to index the hourly series.
    fn hour(state: &AppState) -> usize {
        state
            .weather
            .data()
            .and_then(|snapshot| snapshot.local_hour())
            .unwrap_or_else(|| chrono::Local::now().hour() as usize)
    }

    fn search_props<'a>(
        state: &'a AppState,
        palette: &'a Palette,
        is_focused: bool,
    ) -> SearchOverlayProps<'a> {
        SearchOverlayProps {
            query: &state.search_query,
            results: &state.search_results,
            selected: state.search_selected,
            is_focused,
            searching: state.searching,
            lang: state.lang,
            palette,
            on_query_change: Action::SearchQueryChange,
            on_query_submit: Action::SearchQuerySubmit,
            on_select: Action::SearchSelect,
            on_location_select: || Action::SearchConfirm,
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<WeatherComponentId>,
    ) {
        self.registry.sync(state.preset_name(), state.mode);
        let styles = self.registry.context().clone();

        event_ctx.set_component_area(WeatherComponentId::Showcase, area);
        let props = ShowcaseProps {
            state,
            styles: &styles,
            hour: Self::hour(state),
            is_focused: render_ctx.is_focused() && !state.search_mode,
        };
        self.showcase.render(frame, area, props);

        self.search.set_open(state.search_mode);
        if state.search_mode {
            let modal_area = centered_rect(SEARCH_MODAL_WIDTH, SEARCH_MODAL_HEIGHT, area);
            event_ctx.set_component_area(WeatherComponentId::Search, modal_area);
            let palette = styles.palette();
            let props = Self::search_props(state, &palette, render_ctx.is_focused());
            self.search.render(frame, area, props);
        } else {
            event_ctx
                .component_areas
                .remove(&WeatherComponentId::Search);
        }
    }

    fn handle_showcase_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let styles = self.registry.context().clone();
        let props = ShowcaseProps {
            state,
            styles: &styles,
            hour: Self::hour(state),
            is_focused: true,
        };
        let actions: Vec<_> = self
            .showcase
            .handle_event(event, props)
            .into_iter()
            .collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }

    fn handle_search_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        self.search.set_open(state.search_mode);
        let palette = self.registry.context().palette();
        let props = Self::search_props(state, &palette, true);
        let actions: Vec<_> = self.search.handle_event(event, props).into_iter().collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    registry: ThemeRegistry,
    client: WeatherClient,
    refresh_interval: u64,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(WeatherUi::new(registry)));
    let mut bus: EventBus<AppState, Action, WeatherComponentId, WeatherContext> = EventBus::new();
    let keybindings: Keybindings<WeatherContext> = Keybindings::new();

    let ui_showcase = Rc::clone(&ui);
    bus.register(WeatherComponentId::Showcase, move |event, state| {
        ui_showcase
            .borrow_mut()
            .handle_showcase_event(&event.kind, state)
    });

    let ui_search = Rc::clone(&ui);
    bus.register(WeatherComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::WeatherFetch),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(PULSE_TICK_MS),
                    || Action::Tick,
                );

                runtime.subscriptions().interval(
                    "refresh",
                    Duration::from_secs(refresh_interval),
                    || Action::WeatherFetch,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(&client, effect, ctx.tasks()),
        )
        .await
}
