//! Performance
//!
//! `performance.now()`, user timing marks/measures and the legacy
//! `timing`/`navigation` records (all unset, reported as -1).

use std::time::Instant;

use hostdom_dom::{DomEvent, EventListener, SubscriptionRegistry};
use serde::Serialize;

use crate::PerformanceError;

/// Performance entry kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Mark,
    Measure,
}

/// A user timing entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceEntry {
    pub name: String,
    pub entry_type: EntryType,
    /// Milliseconds since the time origin
    pub start_time: f64,
    pub duration: f64,
    pub detail: Option<serde_json::Value>,
}

/// Navigation timing; the host has no navigation so every field is -1
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceTiming {
    pub navigation_start: f64,
    pub fetch_start: f64,
    pub domain_lookup_start: f64,
    pub domain_lookup_end: f64,
    pub connect_start: f64,
    pub connect_end: f64,
    pub secure_connection_start: f64,
    pub request_start: f64,
    pub response_start: f64,
    pub response_end: f64,
    pub dom_loading: f64,
    pub dom_interactive: f64,
    pub dom_content_loaded_event_start: f64,
    pub dom_content_loaded_event_end: f64,
    pub dom_complete: f64,
    pub load_event_start: f64,
    pub load_event_end: f64,
    pub redirect_start: f64,
    pub redirect_end: f64,
    pub unload_event_start: f64,
    pub unload_event_end: f64,
}

impl Default for PerformanceTiming {
    fn default() -> Self {
        Self {
            navigation_start: -1.0,
            fetch_start: -1.0,
            domain_lookup_start: -1.0,
            domain_lookup_end: -1.0,
            connect_start: -1.0,
            connect_end: -1.0,
            secure_connection_start: -1.0,
            request_start: -1.0,
            response_start: -1.0,
            response_end: -1.0,
            dom_loading: -1.0,
            dom_interactive: -1.0,
            dom_content_loaded_event_start: -1.0,
            dom_content_loaded_event_end: -1.0,
            dom_complete: -1.0,
            load_event_start: -1.0,
            load_event_end: -1.0,
            redirect_start: -1.0,
            redirect_end: -1.0,
            unload_event_start: -1.0,
            unload_event_end: -1.0,
        }
    }
}

/// Navigation info; unset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceNavigation {
    pub redirect_count: i32,
    #[serde(rename = "type")]
    pub navigation_type: i32,
}

impl PerformanceNavigation {
    pub const TYPE_NAVIGATE: i32 = 0;
    pub const TYPE_RELOAD: i32 = 1;
    pub const TYPE_BACK_FORWARD: i32 = 2;
    pub const TYPE_RESERVED: i32 = 255;
}

impl Default for PerformanceNavigation {
    fn default() -> Self {
        Self {
            redirect_count: -1,
            navigation_type: -1,
        }
    }
}

/// `window.performance`
#[derive(Debug)]
pub struct Performance {
    origin: Instant,
    entries: Vec<PerformanceEntry>,
    pub timing: PerformanceTiming,
    pub navigation: PerformanceNavigation,
    events: SubscriptionRegistry,
}

impl Performance {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            entries: Vec::new(),
            timing: PerformanceTiming::default(),
            navigation: PerformanceNavigation::default(),
            events: SubscriptionRegistry::new(),
        }
    }

    /// Milliseconds since this object was created; monotonic
    pub fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    /// Record a mark at the current time
    pub fn mark(&mut self, name: &str, detail: Option<serde_json::Value>) -> PerformanceEntry {
        let entry = PerformanceEntry {
            name: name.to_string(),
            entry_type: EntryType::Mark,
            start_time: self.now(),
            duration: 0.0,
            detail,
        };
        self.entries.push(entry.clone());
        entry
    }

    /// Record a measure between two marks.
    ///
    /// A missing start measures from the time origin, a missing end measures
    /// up to now. Named marks that were never recorded are an error.
    pub fn measure(
        &mut self,
        name: &str,
        start_mark: Option<&str>,
        end_mark: Option<&str>,
    ) -> Result<PerformanceEntry, PerformanceError> {
        let start = match start_mark {
            Some(mark) => self.mark_time(mark)?,
            None => 0.0,
        };
        let end = match end_mark {
            Some(mark) => self.mark_time(mark)?,
            None => self.now(),
        };

        let entry = PerformanceEntry {
            name: name.to_string(),
            entry_type: EntryType::Measure,
            start_time: start,
            duration: end - start,
            detail: None,
        };
        self.entries.push(entry.clone());
        Ok(entry)
    }

    /// Latest mark with this name
    fn mark_time(&self, name: &str) -> Result<f64, PerformanceError> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.entry_type == EntryType::Mark && e.name == name)
            .map(|e| e.start_time)
            .ok_or_else(|| PerformanceError::UnknownMark(name.to_string()))
    }

    /// All entries in chronological order
    pub fn get_entries(&self) -> Vec<PerformanceEntry> {
        let mut entries = self.entries.clone();
        entries.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
        entries
    }

    pub fn get_entries_by_name(
        &self,
        name: &str,
        entry_type: Option<EntryType>,
    ) -> Vec<PerformanceEntry> {
        self.get_entries()
            .into_iter()
            .filter(|e| e.name == name && entry_type.is_none_or(|t| e.entry_type == t))
            .collect()
    }

    pub fn get_entries_by_type(&self, entry_type: EntryType) -> Vec<PerformanceEntry> {
        self.get_entries()
            .into_iter()
            .filter(|e| e.entry_type == entry_type)
            .collect()
    }

    /// Remove marks, all of them or only those with `name`
    pub fn clear_marks(&mut self, name: Option<&str>) {
        self.clear(EntryType::Mark, name);
    }

    pub fn clear_measures(&mut self, name: Option<&str>) {
        self.clear(EntryType::Measure, name);
    }

    fn clear(&mut self, entry_type: EntryType, name: Option<&str>) {
        self.entries
            .retain(|e| e.entry_type != entry_type || name.is_some_and(|n| n != e.name));
    }

    pub fn add_event_listener(&mut self, event_type: &str, listener: EventListener) {
        self.events.add_event_listener(event_type, listener);
    }

    pub fn remove_event_listener(&mut self, event_type: &str, listener: &EventListener) -> bool {
        self.events.remove_event_listener(event_type, listener)
    }

    pub fn dispatch_event(&self, event: &DomEvent) -> bool {
        self.events.emit(event);
        true
    }

    /// `performance.toJSON()`
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "timing": self.timing,
            "navigation": self.navigation,
            "timeOrigin": -1,
        })
    }
}

impl Default for Performance {
    fn default() -> Self {
        Self::new()
    }
}
