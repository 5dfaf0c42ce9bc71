use crate::vocab::{rdf, xsd};
use crate::{Iri, RdfError, RdfResult, Term};
use std::fmt::{Display, Formatter, Write};
use std::sync::Arc;

static XSD_STRING: Iri = xsd::STRING;
static RDF_LANG_STRING: Iri = rdf::LANG_STRING;

/// An owned RDF [literal](https://www.w3.org/TR/rdf11-concepts/#dfn-literal).
///
/// Two literals are equal iff their lexical forms, datatypes and language tags are equal.
/// Language tags are lowercased on construction.
///
/// The default string formatter returns the canonical N-Triples encoding:
/// ```
/// use rdf_kernel_model::vocab::xsd;
/// use rdf_kernel_model::Literal;
///
/// assert_eq!("\"foo\\nbar\"", Literal::new_simple("foo\nbar").to_string());
/// assert_eq!(
///     "\"1999-01-01\"^^<http://www.w3.org/2001/XMLSchema#date>",
///     Literal::new_typed("1999-01-01", xsd::DATE)?.to_string()
/// );
/// assert_eq!(
///     "\"foo\"@en",
///     Literal::new_language_tagged("foo", "EN")?.to_string()
/// );
/// # Result::<_, rdf_kernel_model::RdfError>::Ok(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal(LiteralContent);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum LiteralContent {
    String(Arc<str>),
    LanguageTagged { value: Arc<str>, language: Arc<str> },
    Typed { value: Arc<str>, datatype: Iri },
}

impl Literal {
    /// Builds an `xsd:string` literal.
    pub fn new_simple(value: impl Into<String>) -> Self {
        Self(LiteralContent::String(Arc::from(value.into())))
    }

    /// Builds a literal with a datatype.
    ///
    /// The lexical form is not checked against the datatype. A literal typed `xsd:string` is the
    /// same as a simple literal. Fails if `datatype` is `rdf:langString`, as such a literal needs a
    /// language tag.
    pub fn new_typed(value: impl Into<String>, datatype: impl Into<Iri>) -> RdfResult<Self> {
        let value = value.into();
        let datatype = datatype.into();
        if datatype == xsd::STRING {
            return Ok(Self::new_simple(value));
        }
        if datatype == rdf::LANG_STRING {
            return Err(RdfError::invalid_argument(
                "rdf:langString literals require a language tag",
            ));
        }
        Ok(Self(LiteralContent::Typed {
            value: Arc::from(value),
            datatype,
        }))
    }

    /// Builds a typed literal for a datatype that is known to be neither `xsd:string` nor
    /// `rdf:langString`.
    pub(crate) fn new_typed_unchecked(value: impl Into<String>, datatype: Iri) -> Self {
        Self(LiteralContent::Typed {
            value: Arc::from(value.into()),
            datatype,
        })
    }

    /// Builds an `rdf:langString` literal.
    ///
    /// Fails if `language` is not a syntactically valid BCP47 language tag.
    pub fn new_language_tagged(
        value: impl Into<String>,
        language: impl AsRef<str>,
    ) -> RdfResult<Self> {
        let language = normalize_language_tag(language.as_ref())?;
        Ok(Self(LiteralContent::LanguageTagged {
            value: Arc::from(value.into()),
            language: Arc::from(language),
        }))
    }

    /// The literal's lexical form, unescaped.
    pub fn lexical_form(&self) -> &str {
        match &self.0 {
            LiteralContent::String(value)
            | LiteralContent::LanguageTagged { value, .. }
            | LiteralContent::Typed { value, .. } => value,
        }
    }

    /// The lowercased language tag, if this is a language-tagged literal.
    pub fn language(&self) -> Option<&str> {
        match &self.0 {
            LiteralContent::LanguageTagged { language, .. } => Some(language),
            _ => None,
        }
    }

    /// The datatype. `xsd:string` for simple literals and `rdf:langString` for language-tagged
    /// ones.
    pub fn datatype(&self) -> &Iri {
        match &self.0 {
            LiteralContent::String(_) => &XSD_STRING,
            LiteralContent::LanguageTagged { .. } => &RDF_LANG_STRING,
            LiteralContent::Typed { datatype, .. } => datatype,
        }
    }

    /// Checks if this literal is a simple `xsd:string` literal.
    pub fn is_plain(&self) -> bool {
        matches!(self.0, LiteralContent::String(_))
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write_literal(f, self.lexical_form(), self.datatype().as_str(), self.language())
    }
}

impl TryFrom<Term> for Literal {
    type Error = RdfError;

    fn try_from(term: Term) -> Result<Self, Self::Error> {
        match term {
            Term::Literal(literal) => Ok(literal),
            other => Err(RdfError::invalid_argument(format!(
                "{other} is not a literal"
            ))),
        }
    }
}

/// Writes the canonical N-Triples encoding of a literal given by its parts.
pub(crate) fn write_literal(
    f: &mut impl Write,
    lexical_form: &str,
    datatype: &str,
    language: Option<&str>,
) -> std::fmt::Result {
    f.write_char('"')?;
    for c in lexical_form.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')?;
    if let Some(language) = language {
        write!(f, "@{language}")
    } else if datatype != xsd::STRING.as_str() {
        write!(f, "^^<{datatype}>")
    } else {
        Ok(())
    }
}

/// Validates the shape of a BCP47 tag and returns its lowercase form.
///
/// Only the subtag structure is checked: a primary subtag of 1 to 8 letters followed by any
/// number of `-`-separated subtags of 1 to 8 letters or digits.
fn normalize_language_tag(tag: &str) -> RdfResult<String> {
    let invalid = || RdfError::invalid_argument(format!("'{tag}' is not a valid language tag"));

    let mut subtags = tag.split('-');
    let primary = subtags.next().ok_or_else(invalid)?;
    if !is_subtag(primary) || !primary.bytes().all(|b| b.is_ascii_alphabetic()) {
        return Err(invalid());
    }
    if !subtags.all(|subtag| is_subtag(subtag)) {
        return Err(invalid());
    }
    Ok(tag.to_ascii_lowercase())
}

fn is_subtag(subtag: &str) -> bool {
    (1..=8).contains(&subtag.len()) && subtag.bytes().all(|b| b.is_ascii_alphanumeric())
}
