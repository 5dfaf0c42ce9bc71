use crate::{RdfError, Term};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Identifies the context that minted a [`BlankNode`].
///
/// A scope is a random salt. Blank nodes created from the same label are equal iff they were
/// created in the same scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(Uuid);

impl ScopeId {
    /// Creates a scope from an existing salt, e.g., one that has been persisted.
    pub const fn from_uuid(salt: Uuid) -> Self {
        Self(salt)
    }

    /// Creates a scope from 128 random bits.
    pub fn from_random_bits(bits: u128) -> Self {
        Self(Uuid::from_u128(bits))
    }

    /// Returns the salt of this scope.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Derives the unique reference of the blank node labeled `label` in this scope.
    pub fn reference_for_label(&self, label: &str) -> Uuid {
        Uuid::new_v5(&self.0, label.as_bytes())
    }

    /// Derives the unique reference of `foreign`, a blank node of another scope, in this scope.
    ///
    /// The derivation input starts with a byte that never occurs in UTF-8, so the result never
    /// equals the reference of a labeled blank node.
    pub fn reference_for_foreign(&self, foreign: &BlankNode) -> Uuid {
        let mut name = [0xFF_u8; 33];
        name[1..17].copy_from_slice(foreign.scope.as_uuid().as_bytes());
        name[17..].copy_from_slice(foreign.reference.as_bytes());
        Uuid::new_v5(&self.0, &name)
    }
}

impl Display for ScopeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0.hyphenated(), f)
    }
}

impl FromStr for ScopeId {
    type Err = RdfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|error| RdfError::invalid_argument(format!("'{s}' is not a scope: {error}")))
    }
}

/// An RDF [blank node](https://www.w3.org/TR/rdf11-concepts/#dfn-blank-node).
///
/// A blank node is identified by its scope and by a unique reference within that scope. Two blank
/// nodes are equal iff both match.
///
/// The default string formatter returns an N-Triples compatible representation. The label is the
/// hexadecimal unique reference, so labels supplied by callers never leak into the encoding:
/// ```
/// use rdf_kernel_model::{BlankNode, ScopeId};
///
/// let scope = ScopeId::from_random_bits(1);
/// let node = BlankNode::labeled(scope, "with:colon");
/// assert_eq!(node, BlankNode::labeled(scope, "with:colon"));
/// assert!(!node.to_string().contains("colon"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlankNode {
    scope: ScopeId,
    reference: Uuid,
}

impl BlankNode {
    /// Creates a blank node from its parts.
    ///
    /// Intended for [`TermFactory`](crate::TermFactory) implementations. The caller is responsible
    /// for the uniqueness of `reference` within `scope`.
    pub const fn new_scoped(scope: ScopeId, reference: Uuid) -> Self {
        Self { scope, reference }
    }

    /// Creates the blank node labeled `label` in `scope`.
    pub fn labeled(scope: ScopeId, label: &str) -> Self {
        Self::new_scoped(scope, scope.reference_for_label(label))
    }

    pub fn scope(&self) -> ScopeId {
        self.scope
    }

    pub fn unique_reference(&self) -> Uuid {
        self.reference
    }

    /// Returns the label used in the canonical encoding (without the `_:` prefix).
    pub fn label(&self) -> String {
        self.reference.simple().to_string()
    }
}

impl Display for BlankNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "_:{}", self.reference.simple())
    }
}

impl TryFrom<Term> for BlankNode {
    type Error = RdfError;

    fn try_from(term: Term) -> Result<Self, Self::Error> {
        match term {
            Term::BlankNode(node) => Ok(node),
            other => Err(RdfError::invalid_argument(format!(
                "{other} is not a blank node"
            ))),
        }
    }
}
