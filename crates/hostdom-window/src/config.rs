//! Window Configuration

/// Window configuration options
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WindowConfig {
    pub navigator: Navigator,
    pub location: Location,
}

/// `navigator` values reported to scripts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    pub user_agent: String,
    pub product: String,
    pub platform: String,
    pub app_version: String,
    pub max_touch_points: u32,
    pub standalone: bool,
}

impl Default for Navigator {
    fn default() -> Self {
        Self {
            user_agent: "chrome".to_string(),
            product: "ReactNative".to_string(),
            platform: String::new(),
            app_version: "OS10".to_string(),
            max_touch_points: 5,
            standalone: true,
        }
    }
}

/// Minimal `window.location`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub href: String,
    pub hostname: String,
    pub pathname: String,
    pub protocol: String,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            href: String::new(),
            hostname: String::new(),
            pathname: String::new(),
            protocol: "https".to_string(),
        }
    }
}
