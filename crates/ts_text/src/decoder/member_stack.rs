use alloc::vec::Vec;
use core::fmt::{Debug, Formatter};

/// The members being read, outermost first.
///
/// Only kept with the `debug` feature, where a failed decode logs it.
#[derive(Default, Clone)]
pub(crate) struct MemberStack {
    stack: Vec<(&'static str, &'static str)>,
}

impl MemberStack {
    pub const fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Push a `(type path, member name)` pair.
    pub fn push(&mut self, type_path: &'static str, member: &'static str) {
        self.stack.push((type_path, member));
    }

    pub fn pop(&mut self) {
        self.stack.pop();
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

impl Debug for MemberStack {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let mut iter = self.stack.iter();

        if let Some((type_path, member)) = iter.next() {
            write!(f, "`{type_path}`.{member}")?;
        }

        for (type_path, member) in iter {
            write!(f, " -> `{type_path}`.{member}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemberStack;
    use alloc::format;

    #[test]
    fn breadcrumbs() {
        let mut stack = MemberStack::new();
        assert!(stack.is_empty());
        stack.push("demo::Scene", "root");
        stack.push("demo::Node", "children");
        assert_eq!(format!("{stack:?}"), "`demo::Scene`.root -> `demo::Node`.children");
        stack.pop();
        assert_eq!(format!("{stack:?}"), "`demo::Scene`.root");
    }
}
