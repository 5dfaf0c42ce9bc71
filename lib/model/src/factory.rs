use crate::xsd::native_date_time;
use crate::{
    BlankNode, Iri, Literal, LocalDate, LocalDateTime, OffsetDateTime, RdfError, RdfResult,
    ScopeId, Subject, Term, Triple, XsdValue,
};
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use oxsdatatypes::{Date, DateTime, Time};
use std::any::Any;

/// Creates terms and triples within one blank node scope.
///
/// Every operation of this trait may fail with [`RdfError::CapabilityUnsupported`] if an
/// implementation chooses not to provide it. The default implementations of the core operations
/// do exactly that. The convenience operations are defined in terms of the core operations and
/// fail in the same way if those are unsupported.
pub trait TermFactory: Send + Sync {
    /// The scope of the blank nodes minted by this factory, if it mints any.
    fn scope(&self) -> Option<ScopeId> {
        None
    }

    /// Creates a blank node that is distinct from every other blank node of this factory.
    fn create_blank_node(&self) -> RdfResult<BlankNode> {
        Err(RdfError::unsupported("create_blank_node"))
    }

    /// Creates the blank node labeled `label`.
    ///
    /// Calling this twice with the same label returns equal blank nodes. The label is not part of
    /// the canonical encoding of the blank node.
    fn create_blank_node_with_label(&self, label: &str) -> RdfResult<BlankNode> {
        let _ = label;
        Err(RdfError::unsupported("create_blank_node_with_label"))
    }

    /// Returns the blank node of this factory that stands for `foreign` when importing data.
    ///
    /// Blank nodes of this factory's scope are returned unchanged. Others are mapped to a blank
    /// node of this scope derived from their scope and reference, which never equals a blank node
    /// created from a label. Fails with [`RdfError::CapabilityUnsupported`] if the factory has no
    /// scope.
    fn adopt_blank_node(&self, foreign: &BlankNode) -> RdfResult<BlankNode> {
        match self.scope() {
            Some(scope) if scope == foreign.scope() => Ok(*foreign),
            Some(scope) => Ok(BlankNode::new_scoped(
                scope,
                scope.reference_for_foreign(foreign),
            )),
            None => Err(RdfError::unsupported("adopt_blank_node")),
        }
    }

    /// Validates `iri` and creates an IRI term.
    fn create_iri(&self, iri: &str) -> RdfResult<Iri> {
        let _ = iri;
        Err(RdfError::unsupported("create_iri"))
    }

    /// Creates an `xsd:string` literal.
    fn create_literal(&self, lexical_form: &str) -> RdfResult<Literal> {
        let _ = lexical_form;
        Err(RdfError::unsupported("create_literal"))
    }

    /// Creates a typed literal. The lexical form is not checked against the datatype.
    fn create_typed_literal(&self, lexical_form: &str, datatype: &Iri) -> RdfResult<Literal> {
        let _ = (lexical_form, datatype);
        Err(RdfError::unsupported("create_typed_literal"))
    }

    /// Creates an `rdf:langString` literal.
    fn create_language_tagged_literal(
        &self,
        lexical_form: &str,
        language: &str,
    ) -> RdfResult<Literal> {
        let _ = (lexical_form, language);
        Err(RdfError::unsupported("create_language_tagged_literal"))
    }

    /// Creates a triple from terms of any kind.
    ///
    /// Fails with [`RdfError::InvalidArgument`] if `subject` is a literal or `predicate` is not
    /// an IRI.
    fn create_triple(&self, subject: Term, predicate: Term, object: Term) -> RdfResult<Triple> {
        let _ = (subject, predicate, object);
        Err(RdfError::unsupported("create_triple"))
    }

    /// Creates the literal of a native value with its canonical lexical form and XSD datatype.
    fn create_native_literal(&self, value: &dyn XsdValue) -> RdfResult<Literal> {
        self.create_typed_literal(&value.lexical_form(), &value.datatype())
    }

    /// Creates a literal from a value whose type is only known at runtime.
    ///
    /// Strings become `xsd:string` literals and native values with an XSD counterpart go through
    /// [`TermFactory::create_native_literal`]. A bare [`DateTime`] or [`Date`] is wrapped into
    /// the matching local or offset type first. Other values, and temporal values without a
    /// wrapper, are rejected with [`RdfError::InvalidArgument`].
    fn create_literal_dynamic(&self, value: &dyn Any) -> RdfResult<Literal> {
        if let Some(value) = value.downcast_ref::<String>() {
            return self.create_literal(value);
        }
        if let Some(value) = value.downcast_ref::<&str>() {
            return self.create_literal(value);
        }
        if let Some(value) = value.downcast_ref::<DateTime>() {
            return self.create_native_literal(native_date_time(*value)?.as_ref());
        }
        if let Some(value) = value.downcast_ref::<Date>() {
            return self.create_native_literal(&LocalDate::try_from(*value)?);
        }
        match as_xsd_value(value) {
            Some(value) => self.create_native_literal(value),
            None => Err(RdfError::invalid_argument(
                "Cannot interpret a value of this type as an RDF literal",
            )),
        }
    }

    /// Creates a triple whose object is the literal of a native value.
    fn create_triple_with_value(
        &self,
        subject: Subject,
        predicate: Iri,
        value: &dyn XsdValue,
    ) -> RdfResult<Triple> {
        let object = self.create_native_literal(value)?;
        self.create_triple(subject.into(), predicate.into(), object.into())
    }

    /// Creates a triple whose object is an `xsd:string` literal.
    fn create_triple_with_literal(
        &self,
        subject: Subject,
        predicate: Iri,
        lexical_form: &str,
    ) -> RdfResult<Triple> {
        let object = self.create_literal(lexical_form)?;
        self.create_triple(subject.into(), predicate.into(), object.into())
    }

    /// Creates a triple whose object is an `rdf:langString` literal.
    fn create_triple_with_language_tagged_literal(
        &self,
        subject: Subject,
        predicate: Iri,
        lexical_form: &str,
        language: &str,
    ) -> RdfResult<Triple> {
        let object = self.create_language_tagged_literal(lexical_form, language)?;
        self.create_triple(subject.into(), predicate.into(), object.into())
    }

    /// Creates a triple whose object is a typed literal. The lexical form is not checked.
    fn create_triple_with_typed_literal(
        &self,
        subject: Subject,
        predicate: Iri,
        lexical_form: &str,
        datatype: &Iri,
    ) -> RdfResult<Triple> {
        let object = self.create_typed_literal(lexical_form, datatype)?;
        self.create_triple(subject.into(), predicate.into(), object.into())
    }

    /// Creates a triple whose object is built by [`TermFactory::create_literal_dynamic`].
    fn create_triple_dynamic(
        &self,
        subject: Subject,
        predicate: Iri,
        value: &dyn Any,
    ) -> RdfResult<Triple> {
        let object = self.create_literal_dynamic(value)?;
        self.create_triple(subject.into(), predicate.into(), object.into())
    }

    /// Brings an [`oxrdf`] term into this factory.
    ///
    /// Blank node identifiers are used as labels, so importing the same blank node twice yields
    /// the same blank node.
    fn import_term(&self, term: &oxrdf::Term) -> RdfResult<Term> {
        Ok(match term {
            oxrdf::Term::NamedNode(node) => self.create_iri(node.as_str())?.into(),
            oxrdf::Term::BlankNode(node) => {
                self.create_blank_node_with_label(node.as_str())?.into()
            }
            oxrdf::Term::Literal(literal) => {
                let literal = match literal.language() {
                    Some(language) => {
                        self.create_language_tagged_literal(literal.value(), language)?
                    }
                    None => {
                        let datatype = self.create_iri(literal.datatype().as_str())?;
                        self.create_typed_literal(literal.value(), &datatype)?
                    }
                };
                literal.into()
            }
        })
    }

    /// Brings an [`oxrdf`] triple into this factory. See [`TermFactory::import_term`].
    fn import_triple(&self, triple: &oxrdf::Triple) -> RdfResult<Triple> {
        let subject = self.import_term(&triple.subject.clone().into())?;
        let predicate = self.create_iri(triple.predicate.as_str())?;
        let object = self.import_term(&triple.object)?;
        self.create_triple(subject, predicate.into(), object)
    }
}

fn as_xsd_value(value: &dyn Any) -> Option<&dyn XsdValue> {
    macro_rules! try_downcast {
        ($($ty:ty),*) => {
            $(
                if let Some(value) = value.downcast_ref::<$ty>() {
                    return Some(value as &dyn XsdValue);
                }
            )*
        };
    }

    try_downcast!(
        i8,
        i16,
        i32,
        i64,
        u8,
        u16,
        u32,
        u64,
        BigInt,
        BigDecimal,
        f32,
        f64,
        bool,
        LocalDateTime,
        OffsetDateTime,
        LocalDate,
        Time
    );
    None
}
