//! Report rendering for sheetcheck.
//!
//! - [`render_summary`] builds a [`ReportView`] for terminal and JSON output.
//! - [`render_message`] builds the subject and HTML/text bodies of a
//!   notification email.

mod message;
mod view;

pub use message::{
    DEFAULT_BODY_LIMIT, DEFAULT_SUBJECT_PREFIX, MessageContext, RenderedMessage, render_message,
};
pub use view::{ColumnBreakdown, ReportView, render_summary};
