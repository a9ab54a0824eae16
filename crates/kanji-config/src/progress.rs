use kanji_core::ProgressStyle;
use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ProgressConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub bar_width: usize,
    pub decimals: usize,
    pub fill: char,
    pub empty: char,
    pub padding: char,
    pub max_line_width: usize,
    pub line_end: String,
}

impl ProgressConfig {
    pub fn style(&self) -> ProgressStyle {
        ProgressStyle {
            bar_width: self.bar_width,
            decimals: self.decimals,
            fill: self.fill,
            empty: self.empty,
            padding: self.padding,
            max_line_width: self.max_line_width,
            line_end: self.line_end.clone(),
        }
    }
}

impl Default for ProgressConfig {
    fn default() -> Self {
        let style = ProgressStyle::default();
        Self {
            enabled: default_enabled(),
            bar_width: style.bar_width,
            decimals: style.decimals,
            fill: style.fill,
            empty: style.empty,
            padding: style.padding,
            max_line_width: style.max_line_width,
            line_end: style.line_end,
        }
    }
}
