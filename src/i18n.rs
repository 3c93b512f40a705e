//! UI strings and WMO weather descriptions in English and Chinese

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Zh,
}

impl Language {
    /// Code passed to the geocoding API.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Language::En => Language::Zh,
            Language::Zh => Language::En,
        }
    }

    pub fn strings(self) -> &'static Strings {
        match self {
            Language::En => &EN,
            Language::Zh => &ZH,
        }
    }
}

/// Fixed UI labels
#[derive(Debug)]
pub struct Strings {
    pub today: &'static str,
    /// Sunday first.
    pub week_days: [&'static str; 7],
    pub details: &'static str,
    pub feels_like: &'static str,
    pub humidity: &'static str,
    pub wind: &'static str,
    pub updated_at: &'static str,
    pub air_quality: &'static str,
    pub excellent: &'static str,
    pub search_placeholder: &'static str,
    pub searching: &'static str,
    pub no_results: &'static str,
    pub enter_location: &'static str,
    pub language_name: &'static str,
}

static EN: Strings = Strings {
    today: "Today",
    week_days: ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
    details: "Details",
    feels_like: "Feels like",
    humidity: "Humidity",
    wind: "Wind",
    updated_at: "Updated",
    air_quality: "Air",
    excellent: "Excellent",
    search_placeholder: "Search city...",
    searching: "Searching...",
    no_results: "No results",
    enter_location: "Enter a location",
    language_name: "English",
};

static ZH: Strings = Strings {
    today: "今天",
    week_days: ["周日", "周一", "周二", "周三", "周四", "周五", "周六"],
    details: "详情",
    feels_like: "体感",
    humidity: "湿度",
    wind: "风速",
    updated_at: "更新于",
    air_quality: "空气",
    excellent: "优",
    search_placeholder: "搜索城市...",
    searching: "搜索中...",
    no_results: "无结果",
    enter_location: "输入地点",
    language_name: "中文",
};

/// Describe a WMO weather code
pub fn weather_description(code: u8, lang: Language) -> &'static str {
    match lang {
        Language::En => match code {
            0 => "Clear",
            1 => "Mainly Clear",
            2 => "Partly Cloudy",
            3 => "Overcast",
            45 => "Fog",
            48 => "Rime Fog",
            51 => "Light Drizzle",
            53 => "Drizzle",
            55 => "Heavy Drizzle",
            61 => "Light Rain",
            63 => "Rain",
            65 => "Heavy Rain",
            66 => "Freezing Rain",
            67 => "Heavy Freezing Rain",
            71 => "Light Snow",
            73 => "Snow",
            75 => "Heavy Snow",
            77 => "Snow Grains",
            80 => "Showers",
            81 => "Heavy Showers",
            82 => "Violent Showers",
            85 => "Snow Showers",
            86 => "Heavy Snow Showers",
            95 => "Thunderstorm",
            96 => "Thunderstorm w/ Hail",
            99 => "Heavy Thunderstorm",
            _ => "Unknown",
        },
        Language::Zh => match code {
            0 => "晴",
            1 => "晴间多云",
            2 => "多云",
            3 => "阴",
            45 => "雾",
            48 => "冻雾",
            51 => "毛毛雨",
            53 | 61 => "小雨",
            55 | 63 => "中雨",
            65 => "大雨",
            66 => "冻雨",
            67 => "强冻雨",
            71 => "小雪",
            73 => "中雪",
            75 => "大雪",
            77 => "雪粒",
            80 => "阵雨",
            81 => "中阵雨",
            82 => "暴雨",
            85 => "阵雪",
            86 => "大阵雪",
            95 => "雷雨",
            96 => "雷雨伴冰雹",
            99 => "强雷雨伴冰雹",
            _ => "未知",
        },
    }
}
