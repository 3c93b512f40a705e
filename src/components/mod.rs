pub mod forecast_strip;
pub mod header;
pub mod main_card;
pub mod search_overlay;
pub mod showcase;
pub mod widget;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use forecast_strip::{ForecastCell, ForecastStrip, ForecastStripProps};
pub use header::{Header, HeaderProps};
pub use main_card::{CardContent, MainCard, MainCardProps, Readings};
pub use search_overlay::{SearchOverlay, SearchOverlayProps};
pub use showcase::{Showcase, ShowcaseProps};
pub use widget::{WeatherWidget, WeatherWidgetProps, WidgetComposition, compose};
