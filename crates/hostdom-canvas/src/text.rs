//! Text measurement result

/// Text metrics returned by `measure_text`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
}
