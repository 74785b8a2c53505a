//! Operation signatures.

use std::fmt;

use smallvec::SmallVec;
use tessera_types::TypeId;

/// One overload of an operation: its source kinds and the kinds of the
/// static arguments it expects.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct OperationSignature {
    name: &'static str,
    argument_type_ids: SmallVec<[TypeId; 2]>,
    static_argument_type_ids: SmallVec<[TypeId; 1]>,
}

impl OperationSignature {
    pub fn new(
        name: &'static str,
        argument_type_ids: &[TypeId],
        static_argument_type_ids: &[TypeId],
    ) -> Self {
        OperationSignature {
            name,
            argument_type_ids: SmallVec::from_slice(argument_type_ids),
            static_argument_type_ids: SmallVec::from_slice(static_argument_type_ids),
        }
    }

    /// A unary signature without static arguments.
    pub fn unary(name: &'static str, source: TypeId) -> Self {
        Self::new(name, &[source], &[])
    }

    /// A binary signature without static arguments.
    pub fn binary(name: &'static str, left: TypeId, right: TypeId) -> Self {
        Self::new(name, &[left, right], &[])
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn argument_type_ids(&self) -> &[TypeId] {
        &self.argument_type_ids
    }

    #[inline]
    pub fn static_argument_type_ids(&self) -> &[TypeId] {
        &self.static_argument_type_ids
    }

    #[inline]
    pub fn num_arguments(&self) -> usize {
        self.argument_type_ids.len()
    }

    #[inline]
    pub fn num_static_arguments(&self) -> usize {
        self.static_argument_type_ids.len()
    }

    /// Whether the source kinds match exactly, in order.
    pub fn matches(&self, argument_type_ids: &[TypeId]) -> bool {
        self.argument_type_ids.as_slice() == argument_type_ids
    }
}

impl fmt::Display for OperationSignature {
    /// `Cast(Int; VarChar)`, `Add(Int, Long)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, id) in self.argument_type_ids.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{id}")?;
        }
        if !self.static_argument_type_ids.is_empty() {
            f.write_str(";")?;
            for id in &self.static_argument_type_ids {
                write!(f, " {id}")?;
            }
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests;
