use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Modal, ModalBehavior, ModalProps, ModalStyle, Padding, ScrollbarStyle, SelectList,
    SelectListBehavior, SelectListProps, SelectListStyle, SelectionStyle, TextInput,
    TextInputProps, TextInputStyle, centered_rect, highlight_substring,
};

use super::Component;
use crate::action::Action;
use crate::api::is_searchable;
use crate::i18n::Language;
use crate::state::Location;
use crate::theme::{Palette, ThemeVar};

pub const SEARCH_MODAL_WIDTH: u16 = 60;
pub const SEARCH_MODAL_HEIGHT: u16 = 12;

pub struct SearchOverlay {
    input: TextInput,
    list: SelectList,
    modal: Modal,
    was_open: bool,
}

pub struct SearchOverlayProps<'a> {
    pub query: &'a str,
    pub results: &'a [Location],
    pub selected: usize,
    pub is_focused: bool,
    /// A request is in flight.
    pub searching: bool,
    pub lang: Language,
    pub palette: &'a Palette,
    // Action constructors
    pub on_query_change: fn(String) -> Action,
    pub on_query_submit: fn(String) -> Action,
    pub on_select: fn(usize) -> Action,
    pub on_location_select: fn() -> Action,
}

impl Default for SearchOverlay {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
            list: SelectList::new(),
            modal: Modal::new(),
            was_open: false,
        }
    }
}

impl SearchOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_open(&mut self, is_open: bool) {
        if is_open && !self.was_open {
            self.reset();
        }
        self.was_open = is_open;
    }

    fn reset(&mut self) {
        self.input = TextInput::new();
        self.list = SelectList::new();
    }

    /// Name with the query highlighted, then "region, country".
    fn result_items(results: &[Location], query: &str, palette: &Palette) -> Vec<Line<'static>> {
        let base = palette.fg(ThemeVar::InputText);
        let highlight = palette
            .fg(ThemeVar::AccentSuccess)
            .add_modifier(Modifier::BOLD);
        results
            .iter()
            .map(|loc| {
                let mut line = highlight_substring(&loc.name, query.trim(), base, highlight);
                let subtitle = loc.subtitle();
                if !subtitle.is_empty() {
                    line.push_span(Span::styled(
                        format!("  {subtitle}"),
                        palette.fg(ThemeVar::TextMuted),
                    ));
                }
                line
            })
            .collect()
    }

    /// Text shown in place of the list, if any.
    pub fn empty_state(props: &SearchOverlayProps<'_>) -> Option<&'static str> {
        let strings = props.lang.strings();
        if props.searching {
            Some(strings.searching)
        } else if !props.results.is_empty() {
            None
        } else if is_searchable(props.query) {
            Some(strings.no_results)
        } else {
            Some(strings.enter_location)
        }
    }
}

impl Component<Action> for SearchOverlay {
    type Props<'a> = SearchOverlayProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        match key.code {
            KeyCode::Esc => return vec![Action::SearchClose],
            KeyCode::Enter => {
                if !props.results.is_empty() {
                    return vec![(props.on_location_select)()];
                }
                return vec![(props.on_query_submit)(props.query.to_string())];
            }
            KeyCode::Down | KeyCode::Up => {
                if !props.results.is_empty() {
                    let items = Self::result_items(props.results, props.query, props.palette);
                    let list_props = SelectListProps {
                        items: &items,
                        count: items.len(),
                        selected: props.selected,
                        is_focused: true,
                        style: SelectListStyle {
                            base: BaseStyle {
                                border: None,
                                padding: Padding::xy(1, 1),
                                bg: None,
                                fg: None,
                            },
                            selection: SelectionStyle::default(),
                            scrollbar: ScrollbarStyle::default(),
                        },
                        behavior: SelectListBehavior::default(),
                        on_select: props.on_select,
                        render_item: &|item| item.clone(),
                    };
                    return self
                        .list
                        .handle_event(event, list_props)
                        .into_iter()
                        .collect();
                }
                return Vec::new();
            }
            _ => {}
        }

        // Everything else edits the query.
        let input_props = TextInputProps {
            value: props.query,
            placeholder: props.lang.strings().search_placeholder,
            is_focused: true,
            style: TextInputStyle {
                base: BaseStyle {
                    border: None,
                    padding: Padding::new(1, 0, 1, 0),
                    bg: None,
                    fg: None,
                },
                placeholder_style: None,
                cursor_style: None,
            },
            on_change: props.on_query_change,
            on_submit: props.on_query_submit,
            on_cursor_move: Some(|_| Action::Render),
        };

        self.input
            .handle_event(event, input_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if area.width < 20 || area.height < 8 {
            return;
        }

        let palette = props.palette;
        let empty_state = Self::empty_state(&props);
        let SearchOverlay {
            input, list, modal, ..
        } = self;
        let modal_area = centered_rect(SEARCH_MODAL_WIDTH, SEARCH_MODAL_HEIGHT, area);
        let mut render_content = |frame: &mut Frame, content_area: Rect| {
            let chunks = Layout::vertical([
                Constraint::Length(3), // Input
                Constraint::Min(1),    // Results
            ])
            .split(content_area);

            let input_props = TextInputProps {
                value: props.query,
                placeholder: props.lang.strings().search_placeholder,
                is_focused: props.is_focused,
                style: TextInputStyle {
                    base: BaseStyle {
                        border: None,
                        padding: Padding::all(1),
                        bg: Some(palette.get(ThemeVar::InputBg)),
                        fg: Some(palette.get(ThemeVar::InputText)),
                    },
                    placeholder_style: Some(palette.fg(ThemeVar::TextMuted)),
                    cursor_style: None,
                },
                on_change: props.on_query_change,
                on_submit: props.on_query_submit,
                on_cursor_move: Some(|_| Action::Render),
            };
            input.render(frame, chunks[0], input_props);

            if let Some(text) = empty_state {
                let [row] = Layout::vertical([Constraint::Length(1)])
                    .margin(1)
                    .areas(chunks[1]);
                frame.render_widget(
                    Paragraph::new(text)
                        .style(palette.fg(ThemeVar::TextMuted))
                        .alignment(Alignment::Center),
                    row,
                );
                return;
            }

            let items = Self::result_items(props.results, props.query, palette);
            let list_props = SelectListProps {
                items: &items,
                count: items.len(),
                selected: props.selected,
                is_focused: props.is_focused,
                style: SelectListStyle {
                    base: BaseStyle {
                        border: None,
                        padding: Padding::all(1),
                        bg: None,
                        fg: None,
                    },
                    selection: SelectionStyle::style_only(
                        palette
                            .on(ThemeVar::TextPrimary, ThemeVar::Highlight)
                            .add_modifier(Modifier::BOLD),
                    ),
                    scrollbar: ScrollbarStyle::default(),
                },
                behavior: SelectListBehavior::default(),
                on_select: props.on_select,
                render_item: &|item| item.clone(),
            };
            list.render(frame, chunks[1], list_props);
        };

        modal.render(
            frame,
            area,
            ModalProps {
                is_open: true,
                is_focused: props.is_focused,
                area: modal_area,
                style: ModalStyle {
                    base: BaseStyle {
                        bg: Some(palette.get(ThemeVar::BgPanel)),
                        padding: Padding::default(),
                        border: None,
                        fg: None,
                    },
                    ..Default::default()
                },
                behavior: ModalBehavior::default(),
                on_close: || Action::SearchClose,
                render_content: &mut render_content,
            },
        );
    }
}
