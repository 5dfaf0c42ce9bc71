//! Contexts create terms, triples and graphs.
//!
//! Usage example:
//! ```
//! use rdf_kernel::model::{Subject, TermFactory};
//! use rdf_kernel::{RdfContext, SimpleRdfContext};
//!
//! let context = SimpleRdfContext::new();
//! let graph = context.create_graph()?;
//!
//! let ex = context.create_iri("http://example.com")?;
//! let node = context.create_blank_node_with_label("b1")?;
//! graph.add(node, ex.clone(), context.create_literal("Example")?);
//!
//! // The same label yields the same blank node.
//! let again = context.create_blank_node_with_label("b1")?;
//! assert_eq!(graph.triples_for_pattern(Some(&Subject::from(again)), None, None).count(), 1);
//! # Result::<_, Box<dyn std::error::Error>>::Ok(())
//! ```

use rand::random;
use rdf_kernel_model::{
    BlankNode, Iri, Literal, RdfError, RdfResult, ScopeId, Term, TermFactory, Triple,
};
use rdf_kernel_storage::Graph;
use std::sync::Arc;
use uuid::Uuid;

/// A [`TermFactory`] that can also create graphs.
///
/// [`RdfContext::create_graph`] fails with [`RdfError::CapabilityUnsupported`] unless the
/// implementation overrides it.
pub trait RdfContext: TermFactory {
    /// Creates an empty graph bound to this context.
    fn create_graph(&self) -> RdfResult<Graph> {
        Err(RdfError::unsupported("create_graph"))
    }
}

/// The default context. It implements every operation.
///
/// Each context owns a random scope. Blank nodes created from the same label are equal iff they
/// come from contexts with the same scope. Cloning a context keeps its scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimpleRdfContext {
    scope: ScopeId,
}

impl SimpleRdfContext {
    /// Creates a context with a fresh random scope.
    pub fn new() -> Self {
        Self::with_scope(ScopeId::from_random_bits(random()))
    }

    /// Creates a context with a known scope, e.g., to reproduce the blank nodes of a previous
    /// session from their labels.
    pub fn with_scope(scope: ScopeId) -> Self {
        tracing::trace!(%scope, "Creating RDF context");
        Self { scope }
    }
}

impl Default for SimpleRdfContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TermFactory for SimpleRdfContext {
    fn scope(&self) -> Option<ScopeId> {
        Some(self.scope)
    }

    fn create_blank_node(&self) -> RdfResult<BlankNode> {
        Ok(BlankNode::new_scoped(self.scope, Uuid::from_u128(random())))
    }

    /// Any non-empty label is accepted.
    fn create_blank_node_with_label(&self, label: &str) -> RdfResult<BlankNode> {
        if label.is_empty() {
            return Err(RdfError::invalid_argument("Blank node labels must not be empty"));
        }
        Ok(BlankNode::labeled(self.scope, label))
    }

    fn create_iri(&self, iri: &str) -> RdfResult<Iri> {
        Iri::new(iri)
    }

    fn create_literal(&self, lexical_form: &str) -> RdfResult<Literal> {
        Ok(Literal::new_simple(lexical_form))
    }

    fn create_typed_literal(&self, lexical_form: &str, datatype: &Iri) -> RdfResult<Literal> {
        Literal::new_typed(lexical_form, datatype.clone())
    }

    fn create_language_tagged_literal(
        &self,
        lexical_form: &str,
        language: &str,
    ) -> RdfResult<Literal> {
        Literal::new_language_tagged(lexical_form, language)
    }

    fn create_triple(&self, subject: Term, predicate: Term, object: Term) -> RdfResult<Triple> {
        Triple::try_from_terms(subject, predicate, object)
    }
}

impl RdfContext for SimpleRdfContext {
    fn create_graph(&self) -> RdfResult<Graph> {
        Ok(Graph::new(Arc::new(self.clone())))
    }
}
