/*!
 * Per-unit translation decisions.
 *
 * The selector looks at one translatable unit, decides whether it needs a
 * translation, creates the `target` from the `source` when missing and hands
 * back one `Job` per text leaf that has to go through the translator.
 */

use log::debug;
use std::fmt;

use super::placeholders::{PlaceholderFilter, has_plural_marker};
use crate::xliff::{Attributes, Element, Node, text_leaves_mut};

/// Text written into leaves when running in skip mode
pub const BOILERPLATE: &str = "[INFO] Add your translation here";

/// Translation progress marker of a unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitState {
    New,
    Initial,
    Translated,
    Final,
    NeedsTranslation,
    /// Any other value, kept verbatim
    Other(String),
    /// No `state` attribute
    Missing,
}

impl UnitState {
    /// Read a state from an optional attribute value
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None => Self::Missing,
            Some("new") => Self::New,
            Some("initial") => Self::Initial,
            Some("translated") => Self::Translated,
            Some("final") => Self::Final,
            Some("needs-translation") => Self::NeedsTranslation,
            Some(other) => Self::Other(other.to_string()),
        }
    }

    /// Attribute value for this state
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::New => Some("new"),
            Self::Initial => Some("initial"),
            Self::Translated => Some("translated"),
            Self::Final => Some("final"),
            Self::NeedsTranslation => Some("needs-translation"),
            Self::Other(value) => Some(value),
            Self::Missing => None,
        }
    }

    /// Only `new` and `initial` entries may be (re)translated
    pub fn accepts_translation(&self) -> bool {
        matches!(self, Self::New | Self::Initial)
    }
}

impl fmt::Display for UnitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str().unwrap_or("<none>"))
    }
}

/// One text leaf waiting for its translation
///
/// The job holds the only mutable borrow of the leaf until it completes.
#[derive(Debug)]
pub struct Job<'d> {
    leaf: &'d mut String,
    source: String,
}

impl<'d> Job<'d> {
    pub fn new(leaf: &'d mut String) -> Self {
        let source = leaf.clone();
        Self { leaf, source }
    }

    /// Text as it was when the job was created
    pub fn source_text(&self) -> &str {
        &self.source
    }

    /// Replace the leaf text, ending the job
    pub fn complete(self, text: impl Into<String>) {
        *self.leaf = text.into();
    }
}

/// What happened to one unit (or v2 segment)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitDecision {
    /// No `source` to translate from
    MissingSource,
    /// Existing target in a state that must not change
    Locked(UnitState),
    /// ICU plural content, left for a human
    Plural,
    /// Target contains markup only
    NoText,
    /// Every text leaf is a placeholder
    PlaceholdersOnly,
    /// Leaves queued for translation
    Queued(usize),
    /// Leaves overwritten with the skip-mode boilerplate
    Boilerplate(usize),
}

/// Tally of unit decisions over a whole document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionReport {
    pub missing_source: usize,
    pub locked: usize,
    pub plural: usize,
    pub no_text: usize,
    pub placeholders_only: usize,
    pub queued_units: usize,
    pub queued_leaves: usize,
    pub boilerplate_leaves: usize,
    pub targets_created: usize,
    pub approved_marked: usize,
}

impl SelectionReport {
    pub fn record(&mut self, decision: &UnitDecision) {
        match decision {
            UnitDecision::MissingSource => self.missing_source += 1,
            UnitDecision::Locked(_) => self.locked += 1,
            UnitDecision::Plural => self.plural += 1,
            UnitDecision::NoText => self.no_text += 1,
            UnitDecision::PlaceholdersOnly => self.placeholders_only += 1,
            UnitDecision::Queued(leaves) => {
                self.queued_units += 1;
                self.queued_leaves += leaves;
            }
            UnitDecision::Boilerplate(leaves) => {
                self.queued_units += 1;
                self.boilerplate_leaves += leaves;
            }
        }
    }
}

/// Switches that change how units are filled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionOptions {
    /// Write the boilerplate instead of queueing jobs
    pub skip: bool,
    /// Update the state attribute of processed units
    pub clear_state: bool,
    /// Mark v1 units with a `final` target as approved
    pub add_approved_to_state_final: bool,
}

/// Decides, unit by unit, what needs translating
#[derive(Debug, Clone, Default)]
pub struct UnitSelector {
    filter: PlaceholderFilter,
    options: SelectionOptions,
}

impl UnitSelector {
    pub fn new(filter: PlaceholderFilter, options: SelectionOptions) -> Self {
        Self { filter, options }
    }

    pub fn options(&self) -> SelectionOptions {
        self.options
    }

    /// Handle an XLIFF 1.x `<trans-unit>`; state lives on `<target>`
    pub fn select_trans_unit<'d>(
        &self,
        unit: &'d mut Element,
        report: &mut SelectionReport,
    ) -> Vec<Job<'d>> {
        let Some(source_index) = unit.position_of("source") else {
            debug!("Skipping trans-unit {:?}: no source", unit.attribute("id"));
            report.record(&UnitDecision::MissingSource);
            return Vec::new();
        };

        let target_index = match unit.position_of("target") {
            Some(index) => {
                let state = state_of(&unit.children[index]);
                if !state.accepts_translation() {
                    if state == UnitState::Final && self.options.add_approved_to_state_final {
                        unit.attributes.set("approved", "yes");
                        report.approved_marked += 1;
                    }
                    report.record(&UnitDecision::Locked(state));
                    return Vec::new();
                }
                index
            }
            None => {
                report.targets_created += 1;
                attach_target(&mut unit.children, source_index)
            }
        };

        let unit_id = unit.attribute("id").map(str::to_string);
        let Some(Element { attributes, children, .. }) =
            unit.children.get_mut(target_index).and_then(Node::as_element_mut)
        else {
            return Vec::new();
        };

        let (decision, jobs) = self.fill(attributes, children);
        debug!("trans-unit {:?}: {:?}", unit_id, decision);
        report.record(&decision);
        jobs
    }

    /// Handle an XLIFF 2.0 `<unit>`; every `<segment>` is handled on its own
    pub fn select_unit<'d>(&self, unit: &'d mut Element, report: &mut SelectionReport) -> Vec<Job<'d>> {
        let unit_id = unit.attribute("id").map(str::to_string);
        let mut jobs = Vec::new();
        let mut segments = 0;

        for segment in unit.children.iter_mut().filter_map(Node::as_element_mut) {
            if segment.local_name() != "segment" {
                continue;
            }
            segments += 1;
            jobs.extend(self.select_segment(segment, unit_id.as_deref(), report));
        }

        if segments == 0 {
            debug!("Skipping unit {:?}: no segment", unit_id);
            report.record(&UnitDecision::MissingSource);
        }
        jobs
    }

    fn select_segment<'d>(
        &self,
        segment: &'d mut Element,
        unit_id: Option<&str>,
        report: &mut SelectionReport,
    ) -> Vec<Job<'d>> {
        let Some(source_index) = segment.position_of("source") else {
            debug!("Skipping segment of unit {:?}: no source", unit_id);
            report.record(&UnitDecision::MissingSource);
            return Vec::new();
        };

        let target_index = match segment.position_of("target") {
            Some(index) => {
                let state = UnitState::parse(segment.attribute("state"));
                if !state.accepts_translation() {
                    report.record(&UnitDecision::Locked(state));
                    return Vec::new();
                }
                index
            }
            None => {
                report.targets_created += 1;
                attach_target(&mut segment.children, source_index)
            }
        };

        let Element { attributes, children, .. } = segment;
        let Some(target) = children.get_mut(target_index).and_then(Node::as_element_mut) else {
            return Vec::new();
        };

        let (decision, jobs) = self.fill(attributes, &mut target.children);
        debug!("unit {:?} segment: {:?}", unit_id, decision);
        report.record(&decision);
        jobs
    }

    /// Steps shared by both versions once a target exists.
    ///
    /// `state_holder` is the element whose `state` attribute tracks the unit
    /// (v1 target, v2 segment); `content` is the target's children.
    fn fill<'d>(
        &self,
        state_holder: &mut Attributes,
        content: &'d mut [Node],
    ) -> (UnitDecision, Vec<Job<'d>>) {
        let leaves = text_leaves_mut(content);

        if leaves.iter().any(|leaf| has_plural_marker(leaf)) {
            self.flag_for_human(state_holder);
            return (UnitDecision::Plural, Vec::new());
        }
        if leaves.is_empty() {
            self.flag_for_human(state_holder);
            return (UnitDecision::NoText, Vec::new());
        }

        let mut jobs = Vec::new();
        let mut boilerplate = 0;
        for leaf in leaves {
            if self.filter.is_placeholder_only(leaf) {
                continue;
            }
            if self.options.skip {
                *leaf = BOILERPLATE.to_string();
                boilerplate += 1;
            } else {
                jobs.push(Job::new(leaf));
            }
        }

        if jobs.is_empty() && boilerplate == 0 {
            return (UnitDecision::PlaceholdersOnly, jobs);
        }
        if self.options.clear_state {
            state_holder.set("state", "translated");
        }

        let decision = if self.options.skip {
            UnitDecision::Boilerplate(boilerplate)
        } else {
            UnitDecision::Queued(jobs.len())
        };
        (decision, jobs)
    }

    fn flag_for_human(&self, state_holder: &mut Attributes) {
        if self.options.clear_state {
            state_holder.set("state", "needs-translation");
        }
    }
}

fn state_of(node: &Node) -> UnitState {
    UnitState::parse(node.as_element().and_then(|element| element.attribute("state")))
}

/// Deep-copy `children[source_index]` into a new `target` placed right after
/// it, returning the target's index.
///
/// When the source is preceded by indentation, the same indentation is
/// inserted before the target.
fn attach_target(children: &mut Vec<Node>, source_index: usize) -> usize {
    let mut target = children[source_index].clone();
    if let Node::Element(element) = &mut target {
        element.name = match element.name.rsplit_once(':') {
            Some((prefix, _)) => format!("{}:target", prefix),
            None => "target".to_string(),
        };
        element.attributes.remove("state");
    }

    let mut insert_at = source_index + 1;
    let indentation = source_index
        .checked_sub(1)
        .and_then(|previous| children.get(previous))
        .filter(|node| node.is_whitespace())
        .cloned();
    if let Some(indentation) = indentation {
        children.insert(insert_at, indentation);
        insert_at += 1;
    }

    children.insert(insert_at, target);
    insert_at
}
