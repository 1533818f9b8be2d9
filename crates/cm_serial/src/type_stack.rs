use alloc::vec::Vec;
use core::fmt::{Debug, Formatter};

use cm_reflect::info::TypePath;

/// The types of the values being visited, outermost first.
///
/// Attached to error logs in debug builds, so a failure deep inside a
/// graph can be traced back to the root.
#[derive(Default, Clone)]
pub(crate) struct TypeStack {
    stack: Vec<TypePath>,
}

impl TypeStack {
    pub const fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn push(&mut self, path: TypePath) {
        self.stack.push(path);
    }

    pub fn pop(&mut self) {
        self.stack.pop();
    }
}

impl Debug for TypeStack {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let mut iter = self.stack.iter();

        if let Some(first) = iter.next() {
            writeln!(f, "`{first}`")?;
        }

        for path in iter {
            writeln!(f, " -> `{path}`")?;
        }

        Ok(())
    }
}
