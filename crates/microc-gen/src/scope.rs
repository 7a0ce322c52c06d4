//! The scope table (§4.3): maps identifiers to `[rbp - offset]` stack
//! slots, stacked by lexical block.
//!
//! Each frame owns the names declared directly in it and a base offset
//! 4 bytes past its predecessor's last slot. The 16-byte running
//! reservation (§9: "a convenience, not an ABI alignment requirement")
//! is tracked per frame so that a frame's own `sub rsp, 16` emissions
//! can be exactly undone by its own `add rsp, N` on exit, letting a
//! later sibling block reuse the same stack space a popped frame freed.

use microc_util::error::{ScopeError, ScopeResult};

struct Frame {
    names: Vec<String>,
    base_offset: i32,
    /// Bytes this frame itself caused to be reserved, in 16-byte steps.
    reserved: i32,
}

#[derive(Default)]
pub struct ScopeTable {
    frames: Vec<Frame>,
}

impl ScopeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a new frame. Its base offset is the current top frame's
    /// base plus 4 bytes per name already declared there; the very
    /// first (outermost function) frame starts at offset 4.
    pub fn enter(&mut self) {
        let base_offset = match self.frames.last() {
            Some(top) => top.base_offset + 4 * top.names.len() as i32,
            None => 4,
        };
        self.frames.push(Frame {
            names: Vec::new(),
            base_offset,
            reserved: 0,
        });
    }

    /// Pops the top frame. Returns the `add rsp, N` line to emit when
    /// `clear_stack` is true and this frame actually grew the
    /// reservation; `clear_stack` is false on a path that ends in
    /// `ret`, whose `mov rsp, rbp` already discards these slots.
    pub fn exit(&mut self, clear_stack: bool) -> Option<String> {
        let frame = self.frames.pop().expect("exit with no live scope frame");
        if clear_stack && frame.reserved > 0 {
            Some(format!("\tadd rsp, {}\n", frame.reserved))
        } else {
            None
        }
    }

    /// Declares `name` in the current frame. Returns its stack offset
    /// and, if this slot needed more room than is currently reserved
    /// across all live frames, the `sub rsp, 16` line to emit.
    pub fn declare(&mut self, name: &str) -> ScopeResult<(i32, Option<String>)> {
        {
            let top = self.frames.last().expect("declare with no live scope frame");
            if top.names.iter().any(|n| n == name) {
                return Err(ScopeError::Redeclared(name.to_string()));
            }
        }

        let live_reserved: i32 = self.frames.iter().map(|f| f.reserved).sum();
        let top = self.frames.last_mut().expect("declare with no live scope frame");
        let index = top.names.len() as i32;
        top.names.push(name.to_string());
        let offset = top.base_offset + 4 * index;

        let emit = if offset > live_reserved {
            top.reserved += 16;
            Some("\tsub rsp, 16\n".to_string())
        } else {
            None
        };
        Ok((offset, emit))
    }

    /// Resolves `name` to a stack offset, searching innermost frame
    /// first; `None` if no live frame declares it.
    pub fn resolve(&self, name: &str) -> Option<i32> {
        for frame in self.frames.iter().rev() {
            if let Some(index) = frame.names.iter().position(|n| n == name) {
                return Some(frame.base_offset + 4 * index as i32);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outermost_frame_starts_at_offset_four() {
        let mut scope = ScopeTable::new();
        scope.enter();
        let (offset, emit) = scope.declare("x").unwrap();
        assert_eq!(offset, 4);
        assert_eq!(emit.as_deref(), Some("\tsub rsp, 16\n"));
    }

    #[test]
    fn three_locals_fit_in_one_sixteen_byte_reservation() {
        let mut scope = ScopeTable::new();
        scope.enter();
        let (o1, e1) = scope.declare("a").unwrap();
        let (o2, e2) = scope.declare("b").unwrap();
        let (o3, e3) = scope.declare("c").unwrap();
        assert_eq!((o1, o2, o3), (4, 8, 12));
        assert!(e1.is_some());
        assert!(e2.is_none());
        assert!(e3.is_none());
    }

    #[test]
    fn fifth_local_grows_the_reservation_again() {
        let mut scope = ScopeTable::new();
        scope.enter();
        for name in ["a", "b", "c", "d"] {
            scope.declare(name).unwrap();
        }
        let (offset, emit) = scope.declare("e").unwrap();
        assert_eq!(offset, 20);
        assert_eq!(emit.as_deref(), Some("\tsub rsp, 16\n"));
    }

    #[test]
    fn redeclaration_in_the_same_frame_is_an_error() {
        let mut scope = ScopeTable::new();
        scope.enter();
        scope.declare("x").unwrap();
        assert!(matches!(scope.declare("x"), Err(ScopeError::Redeclared(_))));
    }

    #[test]
    fn inner_frame_shadows_outer_binding() {
        let mut scope = ScopeTable::new();
        scope.enter();
        let (outer_offset, _) = scope.declare("x").unwrap();
        scope.enter();
        let (inner_offset, _) = scope.declare("x").unwrap();
        assert_eq!(scope.resolve("x"), Some(inner_offset));
        scope.exit(true);
        assert_eq!(scope.resolve("x"), Some(outer_offset));
    }

    #[test]
    fn sibling_block_reuses_space_freed_by_a_popped_frame() {
        let mut scope = ScopeTable::new();
        scope.enter(); // function frame, no locals of its own

        scope.enter(); // first sibling block
        let (offset_a, emit_a) = scope.declare("a").unwrap();
        let exit_a = scope.exit(true);

        scope.enter(); // second sibling block, same base offset as the first
        let (offset_b, emit_b) = scope.declare("b").unwrap();

        assert_eq!(offset_a, offset_b);
        assert!(emit_a.is_some());
        assert!(exit_a.is_some());
        assert!(emit_b.is_some(), "space was released on exit, so it must be re-reserved");
    }

    #[test]
    fn exit_without_clearing_emits_nothing() {
        let mut scope = ScopeTable::new();
        scope.enter();
        scope.declare("x").unwrap();
        assert_eq!(scope.exit(false), None);
    }

    #[test]
    fn resolve_returns_none_for_undeclared_name() {
        let mut scope = ScopeTable::new();
        scope.enter();
        assert_eq!(scope.resolve("missing"), None);
    }
}
