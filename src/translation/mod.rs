/*!
 * Translation engine for XLIFF documents.
 *
 * This module contains the document walk and the translation dispatch.
 * It is split into several submodules:
 *
 * - `core`: Translation service that assembles the translated document
 * - `walker`: Breadth-first document walk with per-version handlers
 * - `selector`: Per-unit decisions and state updates
 * - `placeholders`: Detection of text that must not be translated
 * - `dispatcher`: Bounded, rate-limited job scheduling
 * - `invocation`: One translator call with whitespace repair
 */

// Re-export main types for easier usage
pub use self::core::{TranslatedXliff, TranslationOptions, TranslationService, TranslationSummary};
pub use self::dispatcher::{DispatchSettings, Dispatcher};
pub use self::invocation::{FAILURE_MARKER, JobOutcome};
pub use self::placeholders::PlaceholderFilter;
pub use self::selector::{BOILERPLATE, SelectionOptions, SelectionReport, UnitSelector, UnitState};
pub use self::walker::{FileStamp, WalkReport};

// Submodules
pub mod core;
pub mod dispatcher;
pub mod invocation;
pub mod placeholders;
pub mod selector;
pub mod walker;
