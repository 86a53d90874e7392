// Copyright 2026 the Stitcher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stitching configuration.
//!
//! [`Configuration`] is an explicit value passed into every pass. It is
//! normally read from a [`PreferenceStore`] (the host's persisted key/value
//! settings) and can be overridden per invocation with [`Overrides`], the
//! batch/custom-parameter surface:
//!
//! | key                       | type  | default     |
//! |---------------------------|-------|-------------|
//! | `stitcher.interval`       | float | `100.0`     |
//! | `stitcher.component`      | text  | `"_circle"` |
//! | `stitcher.balance`        | bool  | `false`     |
//! | `stitcher.useBackground`  | bool  | `true`      |
//!
//! The interval is clamped to at least 1.0 before any sampling; non-numeric
//! or non-positive input becomes exactly 1.0.

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::error::StitchError;

/// Default interval between dots, in glyph units.
pub const DEFAULT_INTERVAL: f64 = 100.0;

/// Default motif string.
pub const DEFAULT_COMPONENT: &str = "_circle";

/// Smallest interval ever used for sampling.
pub const MIN_INTERVAL: f64 = 1.0;

/// Preference key for the interval.
pub const KEY_INTERVAL: &str = "stitcher.interval";
/// Preference key for the motif string.
pub const KEY_COMPONENT: &str = "stitcher.component";
/// Preference key for end balancing.
pub const KEY_BALANCE: &str = "stitcher.balance";
/// Preference key for background preservation.
pub const KEY_USE_BACKGROUND: &str = "stitcher.useBackground";

/// Name written at the head of generated custom parameters.
pub const FILTER_NAME: &str = "Stitcher";

/// Clamps an interval to at least [`MIN_INTERVAL`]. NaN also maps to it.
#[must_use]
pub fn clamp_interval(value: f64) -> f64 {
    if value >= MIN_INTERVAL {
        value
    } else {
        MIN_INTERVAL
    }
}

/// Parses and clamps a textual interval; unparseable text yields
/// [`MIN_INTERVAL`].
#[must_use]
pub fn clamp_interval_str(text: &str) -> f64 {
    text.trim()
        .parse::<f64>()
        .map_or(MIN_INTERVAL, clamp_interval)
}

/// One entry of the motif list.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MotifSpec {
    /// Glyph name of the motif.
    pub name: String,
    /// Whether placed instances act as masks rather than visible stamps.
    pub mask: bool,
}

impl MotifSpec {
    /// Parses one entry; a trailing `*` marks a mask motif.
    ///
    /// Returns `None` for entries with an empty name.
    #[must_use]
    pub fn parse(entry: &str) -> Option<Self> {
        let entry = entry.trim();
        let (name, mask) = match entry.strip_suffix('*') {
            Some(name) => (name.trim_end(), true),
            None => (entry, false),
        };
        (!name.is_empty()).then(|| Self {
            name: name.to_string(),
            mask,
        })
    }
}

/// Parses a comma-separated motif string such as `"_dash, _hole*"`.
///
/// Empty entries are ignored. An input with no usable entry is an
/// [`InvalidConfiguration`](StitchError::InvalidConfiguration).
pub fn parse_motif_specs(text: &str) -> Result<Vec<MotifSpec>, StitchError> {
    let specs: Vec<MotifSpec> = text.split(',').filter_map(MotifSpec::parse).collect();
    if specs.is_empty() {
        return Err(StitchError::InvalidConfiguration(format!(
            "no motif names in {text:?}"
        )));
    }
    Ok(specs)
}

/// Formats motifs back into their comma-separated form.
#[must_use]
pub fn format_motif_specs(specs: &[MotifSpec]) -> String {
    let mut out = String::new();
    for (i, spec) in specs.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&spec.name);
        if spec.mask {
            out.push('*');
        }
    }
    out
}

/// Settings for one stitching pass.
#[derive(Clone, Debug, PartialEq)]
pub struct Configuration {
    interval: f64,
    motifs: Vec<MotifSpec>,
    /// Spread leftover slack across both path ends.
    pub balance: bool,
    /// Move source paths into the background before stamping.
    pub use_background: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            motifs: Vec::from([MotifSpec {
                name: DEFAULT_COMPONENT.to_string(),
                mask: false,
            }]),
            balance: false,
            use_background: true,
        }
    }
}

impl Configuration {
    /// Builds a configuration, clamping the interval and parsing the motif
    /// string.
    pub fn new(
        interval: f64,
        component: &str,
        balance: bool,
        use_background: bool,
    ) -> Result<Self, StitchError> {
        Ok(Self {
            interval: clamp_interval(interval),
            motifs: parse_motif_specs(component)?,
            balance,
            use_background,
        })
    }

    /// Effective interval, always at least [`MIN_INTERVAL`].
    #[must_use]
    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Sets the interval, clamping it.
    pub fn set_interval(&mut self, interval: f64) {
        self.interval = clamp_interval(interval);
    }

    /// Parsed motif list; never empty.
    #[must_use]
    pub fn motifs(&self) -> &[MotifSpec] {
        &self.motifs
    }

    /// Replaces the motif list from its textual form.
    pub fn set_component(&mut self, component: &str) -> Result<(), StitchError> {
        self.motifs = parse_motif_specs(component)?;
        Ok(())
    }

    /// Reads a configuration from persisted preferences, falling back to the
    /// defaults for missing keys.
    pub fn load(store: &dyn PreferenceStore) -> Result<Self, StitchError> {
        let interval = match store.get(KEY_INTERVAL) {
            Some(PrefValue::Float(v)) => clamp_interval(v),
            Some(PrefValue::Text(t)) => clamp_interval_str(&t),
            Some(PrefValue::Bool(_)) => MIN_INTERVAL,
            None => DEFAULT_INTERVAL,
        };
        let component = match store.get(KEY_COMPONENT) {
            Some(PrefValue::Text(t)) => t,
            Some(_) => String::new(),
            None => DEFAULT_COMPONENT.to_string(),
        };
        let balance = store
            .get(KEY_BALANCE)
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        let use_background = store
            .get(KEY_USE_BACKGROUND)
            .and_then(|v| v.as_bool())
            .unwrap_or(true);
        Self::new(interval, &component, balance, use_background)
    }

    /// Writes this configuration to persisted preferences.
    pub fn save(&self, store: &mut dyn PreferenceStore) {
        store.set(KEY_INTERVAL, PrefValue::Float(self.interval));
        let motifs = format_motif_specs(&self.motifs);
        store.set(KEY_COMPONENT, PrefValue::Text(motifs));
        store.set(KEY_BALANCE, PrefValue::Bool(self.balance));
        store.set(KEY_USE_BACKGROUND, PrefValue::Bool(self.use_background));
    }

    /// Applies per-invocation overrides on top of this configuration.
    ///
    /// Background preservation is always disabled: override invocations
    /// overlay fresh instances on existing content.
    pub fn with_overrides(&self, overrides: &Overrides) -> Result<Self, StitchError> {
        let mut merged = self.clone();
        if let Some(interval) = overrides.interval {
            merged.set_interval(interval);
        }
        if let Some(component) = &overrides.component {
            merged.set_component(component)?;
        }
        if let Some(balance) = overrides.balance {
            merged.balance = balance;
        }
        merged.use_background = false;
        Ok(merged)
    }

    /// Renders this configuration as a custom parameter string that
    /// [`Overrides::parse`] accepts, e.g.
    /// `"Stitcher; component:_circle; interval:100; balance:0"`.
    #[must_use]
    pub fn custom_parameter(&self) -> String {
        format!(
            "{FILTER_NAME}; component:{}; interval:{}; balance:{}",
            format_motif_specs(&self.motifs),
            self.interval,
            u8::from(self.balance),
        )
    }
}

/// Per-invocation overrides (the batch surface).
///
/// The presence of an override set is what makes an invocation a
/// single-shot overlay; see [`rebuild`](crate::rebuild).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Overrides {
    /// Interval override (clamped when applied).
    pub interval: Option<f64>,
    /// Motif string override.
    pub component: Option<String>,
    /// Balancing override.
    pub balance: Option<bool>,
}

impl Overrides {
    /// Parses a custom parameter string such as
    /// `"Stitcher; component:_dash,_hole*; interval:40; balance:1"`.
    ///
    /// A leading bare filter name is skipped, unknown keys are ignored, and a
    /// non-numeric interval becomes [`MIN_INTERVAL`].
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut out = Self::default();
        for part in text.split(';') {
            let Some((key, value)) = part.split_once(':') else {
                continue;
            };
            let value = value.trim();
            match key.trim() {
                "interval" => out.interval = Some(clamp_interval_str(value)),
                "component" => out.component = Some(value.to_string()),
                "balance" => out.balance = Some(parse_bool(value)),
                _ => {}
            }
        }
        out
    }
}

fn parse_bool(text: &str) -> bool {
    matches!(
        text.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// A persisted preference value.
#[derive(Clone, Debug, PartialEq)]
pub enum PrefValue {
    /// Floating-point value.
    Float(f64),
    /// Text value.
    Text(String),
    /// Boolean value.
    Bool(bool),
}

impl PrefValue {
    /// Interprets the value as a flag. Numbers are true when non-zero.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Float(v) => Some(*v != 0.0),
            Self::Text(t) => Some(parse_bool(t)),
        }
    }
}

/// Persisted key/value settings owned by the host.
pub trait PreferenceStore {
    /// Reads a value.
    fn get(&self, key: &str) -> Option<PrefValue>;

    /// Writes a value.
    fn set(&mut self, key: &str, value: PrefValue);

    /// Writes `value` only if `key` has no value yet.
    fn register_default(&mut self, key: &str, value: PrefValue) {
        if self.get(key).is_none() {
            self.set(key, value);
        }
    }
}

/// In-memory [`PreferenceStore`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryPreferences {
    values: BTreeMap<String, PrefValue>,
}

impl MemoryPreferences {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the documented defaults.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut store = Self::new();
        Configuration::default().save(&mut store);
        store
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<PrefValue> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: PrefValue) {
        self.values.insert(key.to_string(), value);
    }
}
