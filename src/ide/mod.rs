//! IDE features - high-level APIs for editor integrations.
//!
//! Built on top of the compiler and the type resolver; each entry point takes
//! the text being edited and a byte offset of the cursor.
//!
//! ## Usage
//!
//! The recommended way to use this module is through `AnalysisHost`:
//!
//! ```ignore
//! use relevance::ide::AnalysisHost;
//!
//! let host = AnalysisHost::new(kb);
//! let analysis = host.analysis();
//! let ty = analysis.type_at("name of folder \"c:\" ", 15);
//! ```

mod analysis;
mod completion;
mod predict;

pub use analysis::{Analysis, AnalysisError, AnalysisHost};
pub use completion::{
    CompletionItem, CompletionKind, completion_label, completion_snippet, completions,
    completions_for,
};
pub use predict::{
    CURSOR_MARKER, MarkedNode, PredictOptions, Prediction, predict, predict_with, splice_marker,
};
