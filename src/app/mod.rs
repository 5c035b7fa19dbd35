//! Application layer - slate building and report rendering.

mod builder;
mod report;

pub use builder::{GameRecordBuilder, SlateRequest};
pub use report::{narrative_prompt, render_json, render_markdown, render_table, summary};
