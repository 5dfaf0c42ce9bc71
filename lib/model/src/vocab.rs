//! Well-known IRIs.
//!
//! All IRIs in this module are backed by static strings. [`Iri::new`] returns these instances
//! whenever it is given one of their IRI strings, so frequently used datatypes are never
//! allocated twice.

use crate::Iri;
use rustc_hash::FxHashMap;
use std::sync::LazyLock;

/// [RDF](https://www.w3.org/TR/rdf11-concepts/) vocabulary.
pub mod rdf {
    use crate::Iri;

    /// The datatype of language-tagged string literals.
    pub const LANG_STRING: Iri =
        Iri::from_static("http://www.w3.org/1999/02/22-rdf-syntax-ns#langString");
    /// The class of plain literals.
    pub const PLAIN_LITERAL: Iri =
        Iri::from_static("http://www.w3.org/1999/02/22-rdf-syntax-ns#PlainLiteral");
    /// The subject is an instance of a class.
    pub const TYPE: Iri = Iri::from_static("http://www.w3.org/1999/02/22-rdf-syntax-ns#type");
    /// The datatype of XML literal values.
    pub const XML_LITERAL: Iri =
        Iri::from_static("http://www.w3.org/1999/02/22-rdf-syntax-ns#XMLLiteral");
}

/// [XML Schema](https://www.w3.org/TR/xmlschema11-2/) datatypes.
pub mod xsd {
    use crate::Iri;

    pub const ANY_URI: Iri = Iri::from_static("http://www.w3.org/2001/XMLSchema#anyURI");
    pub const BOOLEAN: Iri = Iri::from_static("http://www.w3.org/2001/XMLSchema#boolean");
    pub const BYTE: Iri = Iri::from_static("http://www.w3.org/2001/XMLSchema#byte");
    pub const DATE: Iri = Iri::from_static("http://www.w3.org/2001/XMLSchema#date");
    pub const DATE_TIME: Iri = Iri::from_static("http://www.w3.org/2001/XMLSchema#dateTime");
    pub const DECIMAL: Iri = Iri::from_static("http://www.w3.org/2001/XMLSchema#decimal");
    pub const DOUBLE: Iri = Iri::from_static("http://www.w3.org/2001/XMLSchema#double");
    pub const DURATION: Iri = Iri::from_static("http://www.w3.org/2001/XMLSchema#duration");
    pub const FLOAT: Iri = Iri::from_static("http://www.w3.org/2001/XMLSchema#float");
    pub const INT: Iri = Iri::from_static("http://www.w3.org/2001/XMLSchema#int");
    pub const INTEGER: Iri = Iri::from_static("http://www.w3.org/2001/XMLSchema#integer");
    pub const LANGUAGE: Iri = Iri::from_static("http://www.w3.org/2001/XMLSchema#language");
    pub const LONG: Iri = Iri::from_static("http://www.w3.org/2001/XMLSchema#long");
    pub const NEGATIVE_INTEGER: Iri =
        Iri::from_static("http://www.w3.org/2001/XMLSchema#negativeInteger");
    pub const NON_NEGATIVE_INTEGER: Iri =
        Iri::from_static("http://www.w3.org/2001/XMLSchema#nonNegativeInteger");
    pub const NON_POSITIVE_INTEGER: Iri =
        Iri::from_static("http://www.w3.org/2001/XMLSchema#nonPositiveInteger");
    pub const NORMALIZED_STRING: Iri =
        Iri::from_static("http://www.w3.org/2001/XMLSchema#normalizedString");
    pub const POSITIVE_INTEGER: Iri =
        Iri::from_static("http://www.w3.org/2001/XMLSchema#positiveInteger");
    pub const SHORT: Iri = Iri::from_static("http://www.w3.org/2001/XMLSchema#short");
    pub const STRING: Iri = Iri::from_static("http://www.w3.org/2001/XMLSchema#string");
    pub const TIME: Iri = Iri::from_static("http://www.w3.org/2001/XMLSchema#time");
    pub const TOKEN: Iri = Iri::from_static("http://www.w3.org/2001/XMLSchema#token");
    pub const UNSIGNED_BYTE: Iri = Iri::from_static("http://www.w3.org/2001/XMLSchema#unsignedByte");
    pub const UNSIGNED_INT: Iri = Iri::from_static("http://www.w3.org/2001/XMLSchema#unsignedInt");
    pub const UNSIGNED_LONG: Iri = Iri::from_static("http://www.w3.org/2001/XMLSchema#unsignedLong");
    pub const UNSIGNED_SHORT: Iri =
        Iri::from_static("http://www.w3.org/2001/XMLSchema#unsignedShort");
}

/// Read-only after initialization.
static WELL_KNOWN: LazyLock<FxHashMap<&'static str, Iri>> = LazyLock::new(|| {
    [
        rdf::LANG_STRING,
        rdf::PLAIN_LITERAL,
        rdf::TYPE,
        rdf::XML_LITERAL,
        xsd::ANY_URI,
        xsd::BOOLEAN,
        xsd::BYTE,
        xsd::DATE,
        xsd::DATE_TIME,
        xsd::DECIMAL,
        xsd::DOUBLE,
        xsd::DURATION,
        xsd::FLOAT,
        xsd::INT,
        xsd::INTEGER,
        xsd::LANGUAGE,
        xsd::LONG,
        xsd::NEGATIVE_INTEGER,
        xsd::NON_NEGATIVE_INTEGER,
        xsd::NON_POSITIVE_INTEGER,
        xsd::NORMALIZED_STRING,
        xsd::POSITIVE_INTEGER,
        xsd::SHORT,
        xsd::STRING,
        xsd::TIME,
        xsd::TOKEN,
        xsd::UNSIGNED_BYTE,
        xsd::UNSIGNED_INT,
        xsd::UNSIGNED_LONG,
        xsd::UNSIGNED_SHORT,
    ]
    .into_iter()
    .filter_map(|iri| iri.static_str().map(|key| (key, iri)))
    .collect()
});

/// Returns the shared instance of a well-known IRI, if `iri` is one.
pub fn lookup(iri: &str) -> Option<Iri> {
    WELL_KNOWN.get(iri).cloned()
}
