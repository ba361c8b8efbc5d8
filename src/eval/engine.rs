use crate::animation::binding::BindingTable;
use crate::eval::diff::StyleFrame;
use crate::foundation::core::Progress;

/// Evaluate every channel of `table` at `progress`.
///
/// Pure: the result depends only on the arguments, never on earlier calls.
pub fn apply(progress: Progress, table: &BindingTable) -> StyleFrame {
    let mut out = StyleFrame::new();
    apply_into(progress, table, &mut out);
    out
}

/// Like [`apply`], writing into an existing frame. Existing entries for the same channels are
/// overwritten.
pub fn apply_into(progress: Progress, table: &BindingTable, out: &mut StyleFrame) {
    for b in table.governing(progress) {
        out.set(b.target.clone(), b.property, b.sample(progress));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/engine.rs"]
mod tests;
