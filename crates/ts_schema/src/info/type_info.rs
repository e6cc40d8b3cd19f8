use alloc::boxed::Box;

use crate::error::{NotationError, SchemaReason};
use crate::info::{MemberDescriptor, ObjectKind, TypeHandle};

/// The ordered member list of one described type, as cached by the
/// [`SchemaRegistry`](crate::SchemaRegistry).
///
/// Members keep declaration order, which is also the order they are written
/// and expected in.
#[derive(Debug)]
pub struct TypeDescriptor {
    handle: TypeHandle,
    type_path: &'static str,
    object_kind: ObjectKind,
    members: Box<[MemberDescriptor]>,
}

impl TypeDescriptor {
    /// Enumerates the members of `handle`'s type.
    pub fn new(handle: TypeHandle) -> Self {
        let members = handle.members().into_boxed_slice();

        #[cfg(feature = "debug")]
        for (index, member) in members.iter().enumerate() {
            if members[..index].iter().any(|m| m.name() == member.name()) {
                log::warn!(
                    "`{}` lists the wire name `{}` more than once, only the first can be decoded",
                    handle.type_path(),
                    member.name(),
                );
            }
        }

        Self {
            handle,
            type_path: handle.type_path(),
            object_kind: handle.object_kind(),
            members,
        }
    }

    #[inline]
    pub fn handle(&self) -> TypeHandle {
        self.handle
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.handle.type_name()
    }

    #[inline]
    pub fn object_kind(&self) -> ObjectKind {
        self.object_kind
    }

    #[inline]
    pub fn is_class(&self) -> bool {
        self.object_kind == ObjectKind::Class
    }

    #[inline]
    pub fn members(&self) -> &[MemberDescriptor] {
        &self.members
    }

    /// Finds a member by wire name.
    pub fn member(&self, name: &str) -> Option<&MemberDescriptor> {
        self.members.iter().find(|member| member.name() == name)
    }

    /// Position of a member by wire name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.members.iter().position(|member| member.name() == name)
    }

    /// Fails if a member's wire name equals the class tag name.
    pub fn check_class_tag(&self, tag: &str) -> Result<(), NotationError> {
        match self.member(tag) {
            Some(member) => Err(NotationError::schema(SchemaReason::TagCollision {
                type_path: self.type_path,
                member: member.name(),
            })),
            None => Ok(()),
        }
    }
}
