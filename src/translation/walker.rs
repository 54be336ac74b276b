/*!
 * Breadth-first document walk.
 *
 * The walker visits the tree with an explicit queue, stamps the file-level
 * element with the target language and hands every translatable unit to the
 * `UnitSelector`. The format version is detected once at the root and fixes
 * the handler table for the rest of the walk.
 */

use log::debug;
use std::collections::VecDeque;

use super::selector::{Job, SelectionReport, UnitSelector};
use crate::xliff::{Element, Node, NodeKind, XliffVersion};

/// Unit handler signature shared by both format versions
pub type SelectUnit =
    for<'d> fn(&UnitSelector, &'d mut Element, &mut SelectionReport) -> Vec<Job<'d>>;

/// Per-version behavior of the walk
#[derive(Debug, Clone, Copy)]
pub struct Handlers {
    pub version: XliffVersion,
    pub select_unit: SelectUnit,
}

pub const V1_HANDLERS: Handlers = Handlers {
    version: XliffVersion::V1,
    select_unit: UnitSelector::select_trans_unit,
};

pub const V2_HANDLERS: Handlers = Handlers {
    version: XliffVersion::V2,
    select_unit: UnitSelector::select_unit,
};

impl Handlers {
    pub fn for_version(version: XliffVersion) -> &'static Handlers {
        match version {
            XliffVersion::V1 => &V1_HANDLERS,
            XliffVersion::V2 => &V2_HANDLERS,
        }
    }

    /// Write the target language and generation date on the file element
    fn stamp_file(&self, element: &mut Element, stamp: &FileStamp) {
        element
            .attributes
            .set(self.version.target_language_attribute(), stamp.target_language.as_str());
        element.attributes.set("date", stamp.date.as_str());
    }
}

/// Attributes written on every file-level element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStamp {
    pub target_language: String,
    pub date: String,
}

impl FileStamp {
    /// Stamp dated now, in RFC 3339 UTC with milliseconds
    pub fn now(target_language: impl Into<String>) -> Self {
        Self {
            target_language: target_language.into(),
            date: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        }
    }
}

/// What the walk saw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkReport {
    pub version: XliffVersion,
    pub files_stamped: usize,
    pub units_visited: usize,
    pub selection: SelectionReport,
}

/// Jobs produced by a walk together with its report
#[derive(Debug)]
pub struct Walk<'d> {
    pub jobs: Vec<Job<'d>>,
    pub report: WalkReport,
}

/// Visit the document breadth-first and collect the translation jobs
///
/// Units are handled in breadth-first order, which is document order for
/// units sharing a parent.
pub fn walk<'d>(root: &'d mut Node, selector: &UnitSelector, stamp: &FileStamp) -> Walk<'d> {
    let mut queue: VecDeque<&'d mut Node> = VecDeque::new();
    queue.push_back(root);

    let mut handlers = &V1_HANDLERS;
    let mut jobs = Vec::new();
    let mut report = WalkReport {
        version: XliffVersion::V1,
        files_stamped: 0,
        units_visited: 0,
        selection: SelectionReport::default(),
    };

    while let Some(node) = queue.pop_front() {
        match node {
            Node::Document(children) => {
                handlers = Handlers::for_version(XliffVersion::detect(children));
                report.version = handlers.version;
                debug!("Detected {}", handlers.version);
                queue.extend(children.iter_mut());
            }
            Node::Element(element) => match handlers.version.classify_element(element) {
                NodeKind::File => {
                    handlers.stamp_file(element, stamp);
                    report.files_stamped += 1;
                    queue.extend(element.children.iter_mut());
                }
                NodeKind::Unit => {
                    report.units_visited += 1;
                    jobs.extend((handlers.select_unit)(selector, element, &mut report.selection));
                }
                _ => queue.extend(element.children.iter_mut()),
            },
            _ => {}
        }
    }

    debug!(
        "Walk finished: {} units, {} jobs, {} locked",
        report.units_visited,
        jobs.len(),
        report.selection.locked
    );
    Walk { jobs, report }
}
