//! kerning-core: Backend-independent typesetting types and algorithms.
//!
//! This crate provides font metrics, Liang hyphenation, Knuth-Plass line
//! breaking, line composition and page/column composition with widow and
//! orphan control. Output goes through the [`OutputBackend`] trait; the PDF
//! writer lives in `kerning-pdf`.

pub mod backend;
pub mod compose;
pub mod encoding;
pub mod error;
pub mod font;
pub mod hyphenation;
pub mod linebreak;
pub mod markup;
pub mod options;
pub mod paginate;
pub mod standard_fonts;
pub mod token;
pub mod typesetter;

pub use backend::{DrawCall, OutputBackend, RecordingBackend};
pub use compose::{Line, PlacedRun, compose_paragraph};
pub use error::{TypesetError, TypesetWarning, WarningCode};
pub use font::{Font, FontFace, FontSet, FontSpec, FontStyle};
pub use hyphenation::{Hyphenator, Patterns, Syllables};
pub use linebreak::{Break, BreakOptions, Fitness, LineWidths, break_paragraph};
pub use markup::{Block, Emphasis, ParagraphBuilder, Span, parse_blocks};
pub use options::TypesetOptions;
pub use paginate::{ComposerContext, Compositor, LayoutSummary, State};
pub use token::{Paragraph, ParagraphKind, Token};
pub use typesetter::Typesetter;
