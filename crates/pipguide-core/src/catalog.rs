//! Static tutorial content: steps, sections, the catalog, and the
//! screen-to-section mapping.
//!
//! Content is immutable for the lifetime of the process. The engine only
//! ever reads it; navigation state lives in
//! [`crate::progress::TutorialProgress`]. Sequence order is meaningful:
//! sections are visited in catalog order and steps in section order.
//!
//! The built-in catalog carries the onboarding flow for the Pipguide forex
//! trading simulator. Custom content can be supplied as JSON via
//! [`TutorialCatalog::from_json_str`] or [`TutorialCatalog::from_json_file`];
//! both run the same validation pass as a guard against malformed content
//! (duplicate identifiers, sections without steps).

use std::collections::BTreeMap;
use std::{fmt, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TutorialError};

/// Placement hint for the overlay rendering a step.
///
/// Opaque to the engine; the presentation layer decides what each variant
/// means geometrically.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
    Center,
}

impl FromStr for Placement {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "top" => Ok(Placement::Top),
            "bottom" => Ok(Placement::Bottom),
            "left" => Ok(Placement::Left),
            "right" => Ok(Placement::Right),
            "center" => Ok(Placement::Center),
            _ => Err(format!("Invalid placement: {s}")),
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Placement {
    /// Convert to the serialized string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Placement::Top => "top",
            Placement::Bottom => "bottom",
            Placement::Left => "left",
            Placement::Right => "right",
            Placement::Center => "center",
        }
    }
}

/// Interaction a step asks of the user before it is considered acted upon.
///
/// Defaults to [`InteractionKind::None`] for purely informational steps.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    #[default]
    None,
    Tap,
    Swipe,
    LongPress,
    Input,
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl InteractionKind {
    /// Convert to the serialized string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionKind::None => "none",
            InteractionKind::Tap => "tap",
            InteractionKind::Swipe => "swipe",
            InteractionKind::LongPress => "longpress",
            InteractionKind::Input => "input",
        }
    }
}

/// Atomic unit of guidance shown to the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TutorialStep {
    /// Stable identifier, unique within the owning section
    pub id: String,

    /// Short display title
    pub title: String,

    /// Body text shown in the overlay
    pub body: String,

    /// Screen the step is anchored to, if any. Opaque to the engine; used
    /// by the presentation layer for positioning and by
    /// `show_for_screen` for contextual jumps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_screen: Option<String>,

    /// Overlay placement hint
    #[serde(default)]
    pub placement: Placement,

    /// Optional icon tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Interaction the step asks for (default: none)
    #[serde(default)]
    pub interaction: InteractionKind,

    /// Optional free-text description of the interaction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interaction_hint: Option<String>,
}

impl TutorialStep {
    /// Creates a purely informational step with default placement.
    pub fn new(id: &str, title: &str, body: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            body: body.to_string(),
            target_screen: None,
            placement: Placement::default(),
            icon: None,
            interaction: InteractionKind::None,
            interaction_hint: None,
        }
    }

    /// Anchors the step to a screen.
    pub fn on_screen(mut self, screen: &str) -> Self {
        self.target_screen = Some(screen.to_string());
        self
    }

    /// Sets the overlay placement hint.
    pub fn placed(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Sets the icon tag.
    pub fn icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_string());
        self
    }

    /// Sets the interaction kind with an optional hint text.
    pub fn interaction(mut self, kind: InteractionKind, hint: Option<&str>) -> Self {
        self.interaction = kind;
        self.interaction_hint = hint.map(String::from);
        self
    }
}

/// A named, ordered group of steps representing one topical unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TutorialSection {
    /// Unique identifier within the catalog
    pub id: String,

    /// Display title
    pub title: String,

    /// Short description shown on the section card
    pub description: String,

    /// Icon tag
    pub icon: String,

    /// Color tag
    pub color: String,

    /// Estimated-duration label (display only, e.g. "2 min")
    pub duration_label: String,

    /// Whether the section must be completed before the tutorial is
    /// considered finished
    #[serde(default)]
    pub required: bool,

    /// Ordered steps; never empty in a valid catalog
    pub steps: Vec<TutorialStep>,
}

impl TutorialSection {
    /// Number of steps in the section.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// The step at `index`, if within bounds.
    pub fn step(&self, index: usize) -> Option<&TutorialStep> {
        self.steps.get(index)
    }

    /// Whether `index` points at the last step of the section.
    pub fn is_last_step(&self, index: usize) -> bool {
        !self.steps.is_empty() && index == self.steps.len() - 1
    }

    /// Finds the first step anchored to `screen`, returning its position.
    pub fn step_for_screen(&self, screen: &str) -> Option<(usize, &TutorialStep)> {
        self.steps
            .iter()
            .enumerate()
            .find(|(_, step)| step.target_screen.as_deref() == Some(screen))
    }
}

/// Ordered, immutable collection of tutorial sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TutorialCatalog {
    sections: Vec<TutorialSection>,
}

impl TutorialCatalog {
    /// Creates a catalog from pre-built sections, validating the content
    /// invariants.
    pub fn new(sections: Vec<TutorialSection>) -> Result<Self> {
        let catalog = Self { sections };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Loads and validates a catalog from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let sections: Vec<TutorialSection> = serde_json::from_str(json)?;
        Self::new(sections)
    }

    /// Loads and validates a catalog from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path.as_ref()).map_err(|e| TutorialError::FileSystem {
                path: path.as_ref().to_path_buf(),
                source: e,
            })?;
        Self::from_json_str(&contents)
    }

    /// All sections in catalog order.
    pub fn sections(&self) -> &[TutorialSection] {
        &self.sections
    }

    /// Looks up a section by identifier.
    pub fn section(&self, id: &str) -> Option<&TutorialSection> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// The entry section: first required section in catalog order, or the
    /// first section overall if none are required.
    pub fn entry_section(&self) -> Option<&TutorialSection> {
        self.sections
            .iter()
            .find(|s| s.required)
            .or_else(|| self.sections.first())
    }

    /// First required section whose id is not in `completed`, in catalog
    /// order. Completion time never reorders the scan.
    pub fn next_required_section<'a>(
        &'a self,
        completed: &std::collections::BTreeSet<String>,
    ) -> Option<&'a TutorialSection> {
        self.sections
            .iter()
            .find(|s| s.required && !completed.contains(&s.id))
    }

    /// Validates the content invariants: unique section ids, at least one
    /// step per section, unique step ids within each section.
    fn validate(&self) -> Result<()> {
        let mut seen_sections = std::collections::BTreeSet::new();
        for section in &self.sections {
            if !seen_sections.insert(section.id.as_str()) {
                return Err(TutorialError::invalid_catalog(
                    "sections",
                    format!("duplicate section id '{}'", section.id),
                ));
            }
            if section.steps.is_empty() {
                return Err(TutorialError::invalid_catalog(
                    "steps",
                    format!("section '{}' has no steps", section.id),
                ));
            }
            let mut seen_steps = std::collections::BTreeSet::new();
            for step in &section.steps {
                if !seen_steps.insert(step.id.as_str()) {
                    return Err(TutorialError::invalid_catalog(
                        "steps",
                        format!(
                            "duplicate step id '{}' in section '{}'",
                            step.id, section.id
                        ),
                    ));
                }
            }
        }
        Ok(())
    }

    /// The built-in onboarding content for the Pipguide forex simulator.
    pub fn builtin() -> Self {
        use InteractionKind::*;

        Self {
            sections: vec![
                TutorialSection {
                    id: "quick-start".to_string(),
                    title: "Quick Start".to_string(),
                    description: "Get your bearings in two minutes".to_string(),
                    icon: "rocket".to_string(),
                    color: "teal".to_string(),
                    duration_label: "2 min".to_string(),
                    required: true,
                    steps: vec![
                        TutorialStep::new(
                            "welcome",
                            "Welcome to Pipguide",
                            "Trade major currency pairs with a practice balance. \
                             Nothing here touches real money.",
                        )
                        .placed(Placement::Center)
                        .icon("wave"),
                        TutorialStep::new(
                            "practice-balance",
                            "Your practice balance",
                            "You start with $10,000 in virtual funds. The balance \
                             updates live as your positions move.",
                        )
                        .on_screen("DashboardScreen")
                        .placed(Placement::Top)
                        .icon("wallet"),
                        TutorialStep::new(
                            "reading-quotes",
                            "Reading a quote",
                            "Each pair shows a bid and an ask. The difference is \
                             the spread, quoted in pips.",
                        )
                        .on_screen("WatchlistScreen")
                        .icon("quote"),
                    ],
                },
                TutorialSection {
                    id: "key-features".to_string(),
                    title: "Key Features".to_string(),
                    description: "The dashboard, watchlist, and portfolio at a glance"
                        .to_string(),
                    icon: "compass".to_string(),
                    color: "blue".to_string(),
                    duration_label: "3 min".to_string(),
                    required: true,
                    steps: vec![
                        TutorialStep::new(
                            "dashboard-overview",
                            "Your trading dashboard",
                            "Equity, margin, and open positions live here. This is \
                             home base between trades.",
                        )
                        .on_screen("DashboardScreen")
                        .placed(Placement::Top)
                        .icon("home"),
                        TutorialStep::new(
                            "watchlist-pairs",
                            "Build a watchlist",
                            "Pin the pairs you follow. Tap a pair to open its \
                             detail view.",
                        )
                        .on_screen("WatchlistScreen")
                        .icon("star")
                        .interaction(Tap, Some("Tap any pair to pin it")),
                        TutorialStep::new(
                            "portfolio-glance",
                            "Portfolio at a glance",
                            "Open positions, realized profit, and trade history are \
                             collected under Portfolio.",
                        )
                        .on_screen("PortfolioScreen")
                        .icon("briefcase"),
                    ],
                },
                TutorialSection {
                    id: "placing-trades".to_string(),
                    title: "Placing Trades".to_string(),
                    description: "From order ticket to open position".to_string(),
                    icon: "bolt".to_string(),
                    color: "green".to_string(),
                    duration_label: "4 min".to_string(),
                    required: true,
                    steps: vec![
                        TutorialStep::new(
                            "order-ticket",
                            "The order ticket",
                            "Pick a pair and a direction. Buy if you expect the \
                             base currency to rise, sell if you expect it to fall.",
                        )
                        .on_screen("TradeScreen")
                        .icon("ticket")
                        .interaction(Tap, Some("Tap Buy or Sell to open the ticket")),
                        TutorialStep::new(
                            "market-vs-limit",
                            "Market vs. limit",
                            "Market orders fill at the current price. Limit orders \
                             wait for the price you name.",
                        )
                        .on_screen("TradeScreen")
                        .icon("scale"),
                        TutorialStep::new(
                            "lot-size",
                            "Choosing a lot size",
                            "Size is quoted in lots: 0.01 is a micro lot of 1,000 \
                             units. Start small.",
                        )
                        .on_screen("TradeScreen")
                        .icon("stack")
                        .interaction(Input, Some("Enter a lot size of 0.01")),
                        TutorialStep::new(
                            "confirm-trade",
                            "Confirm and go",
                            "Review the ticket and confirm. The position appears on \
                             your dashboard immediately.",
                        )
                        .on_screen("TradeScreen")
                        .icon("check")
                        .interaction(Tap, Some("Tap Confirm to place the trade")),
                    ],
                },
                TutorialSection {
                    id: "charts".to_string(),
                    title: "Charts & Analysis".to_string(),
                    description: "Candlesticks, timeframes, and indicators".to_string(),
                    icon: "chart".to_string(),
                    color: "purple".to_string(),
                    duration_label: "3 min".to_string(),
                    required: false,
                    steps: vec![
                        TutorialStep::new(
                            "timeframes",
                            "Switching timeframes",
                            "From one-minute candles to daily bars. Shorter frames \
                             show noise, longer frames show trend.",
                        )
                        .on_screen("ChartScreen")
                        .icon("clock")
                        .interaction(Tap, Some("Tap a timeframe above the chart")),
                        TutorialStep::new(
                            "candlesticks",
                            "Reading candlesticks",
                            "Each candle shows open, high, low, and close for its \
                             interval. Color marks direction.",
                        )
                        .on_screen("ChartScreen")
                        .icon("candle"),
                        TutorialStep::new(
                            "indicators",
                            "Adding indicators",
                            "Overlay moving averages or RSI from the indicator \
                             drawer. Swipe up to open it.",
                        )
                        .on_screen("ChartScreen")
                        .icon("wand")
                        .interaction(Swipe, Some("Swipe up from the chart edge")),
                    ],
                },
                TutorialSection {
                    id: "risk-management".to_string(),
                    title: "Managing Risk".to_string(),
                    description: "Stops, margin, and closing out".to_string(),
                    icon: "shield".to_string(),
                    color: "orange".to_string(),
                    duration_label: "3 min".to_string(),
                    required: false,
                    steps: vec![
                        TutorialStep::new(
                            "stop-loss",
                            "Set a stop loss",
                            "A stop loss closes the position automatically at the \
                             price you choose. Set one on every trade.",
                        )
                        .on_screen("TradeScreen")
                        .icon("stop"),
                        TutorialStep::new(
                            "margin-meter",
                            "Watch your margin",
                            "The margin meter shows how much of your balance is \
                             committed. Keep headroom for drawdowns.",
                        )
                        .on_screen("PortfolioScreen")
                        .placed(Placement::Top)
                        .icon("gauge"),
                        TutorialStep::new(
                            "close-position",
                            "Closing a position",
                            "Long-press any open position to close it at the \
                             current price.",
                        )
                        .on_screen("PortfolioScreen")
                        .icon("exit")
                        .interaction(LongPress, Some("Long-press a position to close it")),
                    ],
                },
            ],
        }
    }
}

/// Static screen-name to section-id mapping used by contextual help.
///
/// Screens absent from the table fall back to the designated default
/// section, so lookups always resolve to a navigable target.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScreenMap {
    entries: BTreeMap<String, String>,
    default_section: String,
}

impl ScreenMap {
    /// Creates a mapping from explicit entries and a default section id.
    pub fn new(entries: BTreeMap<String, String>, default_section: &str) -> Self {
        Self {
            entries,
            default_section: default_section.to_string(),
        }
    }

    /// The section mapped to `screen`, if the table has an entry for it.
    pub fn section_for(&self, screen: &str) -> Option<&str> {
        self.entries.get(screen).map(String::as_str)
    }

    /// The fallback section id for unmapped screens.
    pub fn default_section(&self) -> &str {
        &self.default_section
    }

    /// The built-in mapping for the Pipguide simulator screens.
    pub fn builtin() -> Self {
        let entries = BTreeMap::from([
            ("DashboardScreen".to_string(), "key-features".to_string()),
            ("TradeScreen".to_string(), "placing-trades".to_string()),
            ("ChartScreen".to_string(), "charts".to_string()),
            ("PortfolioScreen".to_string(), "risk-management".to_string()),
        ]);
        Self::new(entries, "quick-start")
    }
}

impl fmt::Display for TutorialStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {}", self.title)?;
        writeln!(f)?;
        writeln!(f, "{}", self.body)?;
        if let Some(screen) = &self.target_screen {
            writeln!(f)?;
            writeln!(f, "- Screen: {screen}")?;
        }
        if self.interaction != InteractionKind::None {
            let hint = self.interaction_hint.as_deref().unwrap_or("");
            writeln!(f, "- Try it ({}): {hint}", self.interaction)?;
        }
        Ok(())
    }
}

impl fmt::Display for TutorialSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.required { " (required)" } else { "" };
        writeln!(f, "## {}{marker}", self.title)?;
        writeln!(f)?;
        writeln!(f, "{}", self.description)?;
        writeln!(f)?;
        writeln!(f, "- Steps: {}", self.steps.len())?;
        writeln!(f, "- Estimated time: {}", self.duration_label)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = TutorialCatalog::builtin();
        assert!(catalog.validate().is_ok());
        assert!(!catalog.sections().is_empty());
    }

    #[test]
    fn test_every_builtin_section_has_steps() {
        for section in TutorialCatalog::builtin().sections() {
            assert!(
                !section.steps.is_empty(),
                "section '{}' has no steps",
                section.id
            );
        }
    }

    #[test]
    fn test_entry_section_prefers_required() {
        let catalog = TutorialCatalog::builtin();
        let entry = catalog.entry_section().expect("catalog is non-empty");
        assert_eq!(entry.id, "quick-start");
        assert!(entry.required);
    }

    #[test]
    fn test_entry_section_falls_back_to_first() {
        let mut sections = TutorialCatalog::builtin().sections.clone();
        for section in &mut sections {
            section.required = false;
        }
        let first_id = sections[0].id.clone();
        let catalog = TutorialCatalog::new(sections).expect("valid content");
        assert_eq!(catalog.entry_section().unwrap().id, first_id);
    }

    #[test]
    fn test_section_lookup_miss_is_none() {
        let catalog = TutorialCatalog::builtin();
        assert!(catalog.section("nonexistent").is_none());
    }

    #[test]
    fn test_next_required_section_scans_catalog_order() {
        let catalog = TutorialCatalog::builtin();
        let mut completed = std::collections::BTreeSet::new();
        assert_eq!(
            catalog.next_required_section(&completed).unwrap().id,
            "quick-start"
        );

        // Completing later sections first never reorders the scan.
        completed.insert("placing-trades".to_string());
        assert_eq!(
            catalog.next_required_section(&completed).unwrap().id,
            "quick-start"
        );

        completed.insert("quick-start".to_string());
        completed.insert("key-features".to_string());
        assert!(catalog.next_required_section(&completed).is_none());
    }

    #[test]
    fn test_step_for_screen() {
        let catalog = TutorialCatalog::builtin();
        let section = catalog.section("placing-trades").unwrap();
        let (index, step) = section.step_for_screen("TradeScreen").unwrap();
        assert_eq!(index, 0);
        assert_eq!(step.id, "order-ticket");
        assert!(section.step_for_screen("NoSuchScreen").is_none());
    }

    #[test]
    fn test_duplicate_section_id_rejected() {
        let mut sections = TutorialCatalog::builtin().sections.clone();
        let dup = sections[0].clone();
        sections.push(dup);
        let err = TutorialCatalog::new(sections).unwrap_err();
        assert!(err.to_string().contains("duplicate section id"));
    }

    #[test]
    fn test_empty_section_rejected() {
        let mut sections = TutorialCatalog::builtin().sections.clone();
        sections[0].steps.clear();
        let err = TutorialCatalog::new(sections).unwrap_err();
        assert!(err.to_string().contains("has no steps"));
    }

    #[test]
    fn test_duplicate_step_id_within_section_rejected() {
        let mut sections = TutorialCatalog::builtin().sections.clone();
        let dup_step = sections[0].steps[0].clone();
        sections[0].steps.push(dup_step);
        let err = TutorialCatalog::new(sections).unwrap_err();
        assert!(err.to_string().contains("duplicate step id"));
    }

    #[test]
    fn test_step_ids_may_repeat_across_sections() {
        let mut sections = TutorialCatalog::builtin().sections.clone();
        let borrowed = sections[0].steps[0].clone();
        sections[1].steps.push(borrowed);
        // Global uniqueness is not required; steps are addressed by
        // (section, index).
        assert!(TutorialCatalog::new(sections).is_ok());
    }

    #[test]
    fn test_catalog_round_trips_through_json() {
        let catalog = TutorialCatalog::builtin();
        let json = serde_json::to_string(catalog.sections()).unwrap();
        let reloaded = TutorialCatalog::from_json_str(&json).unwrap();
        assert_eq!(catalog, reloaded);
    }

    #[test]
    fn test_from_json_str_rejects_garbage() {
        assert!(TutorialCatalog::from_json_str("not json").is_err());
    }

    #[test]
    fn test_screen_map_builtin_lookup() {
        let map = ScreenMap::builtin();
        assert_eq!(map.section_for("DashboardScreen"), Some("key-features"));
        assert_eq!(map.section_for("UnknownScreen"), None);
        assert_eq!(map.default_section(), "quick-start");
    }

    #[test]
    fn test_placement_parse() {
        assert_eq!("top".parse::<Placement>().unwrap(), Placement::Top);
        assert_eq!("CENTER".parse::<Placement>().unwrap(), Placement::Center);
        assert!("sideways".parse::<Placement>().is_err());
    }

    #[test]
    fn test_step_display_includes_interaction_hint() {
        let step = TutorialStep::new("s", "Tap here", "Do the thing")
            .on_screen("TradeScreen")
            .interaction(InteractionKind::Tap, Some("Tap Buy"));
        let output = format!("{step}");
        assert!(output.contains("### Tap here"));
        assert!(output.contains("- Screen: TradeScreen"));
        assert!(output.contains("- Try it (tap): Tap Buy"));
    }

    #[test]
    fn test_section_display_marks_required() {
        let catalog = TutorialCatalog::builtin();
        let required = format!("{}", catalog.section("quick-start").unwrap());
        assert!(required.contains("## Quick Start (required)"));
        let optional = format!("{}", catalog.section("charts").unwrap());
        assert!(optional.contains("## Charts & Analysis\n"));
        assert!(!optional.contains("(required)"));
    }
}
