//! Trait definitions for statements.

use crate::context::{RenderContext, RenderOptions, Rendered};
use crate::error::{QbError, QbResult};

/// Statement kind, reported in render events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
}

/// Base trait for all statements.
///
/// Implementors write their clauses into a [`RenderContext`]; the provided
/// methods run a complete render pass.
pub trait SqlStatement {
    fn kind(&self) -> StatementKind;

    /// Write this statement into `ctx`. Each non-empty clause is followed by
    /// one space.
    fn write_sql(&self, ctx: &mut RenderContext) -> QbResult<()>;

    /// Builder misuse recorded while the statement was assembled.
    fn build_error(&self) -> Option<&str> {
        None
    }

    /// Render with `options`.
    fn render(&self, options: RenderOptions) -> QbResult<Rendered> {
        if let Some(err) = self.build_error() {
            return Err(QbError::build(err));
        }
        let mut ctx = RenderContext::new(options);
        self.write_sql(&mut ctx)?;
        let rendered = ctx.into_rendered();
        tracing::debug!(
            target: "pgqb.sql",
            statement = ?self.kind(),
            arg_count = rendered.arg_count(),
            style = ?rendered.style,
            sql = %rendered.sql,
            "rendered statement"
        );
        Ok(rendered)
    }

    /// Render with default options.
    fn to_sql(&self) -> QbResult<String> {
        self.render(RenderOptions::default()).map(|r| r.sql)
    }
}
