use crate::rdf::write_literal;
use crate::vocab::xsd;
use crate::xsd::{is_fixed_width_integer_datatype, is_unbounded_integer_datatype};
use crate::{CoercionResult, LexicalValue, Temporal};
use bigdecimal::BigDecimal;
use num_bigint::BigInt;

/// How [`LexicalValue::as_dynamic_with`] decodes `xsd:date`, `xsd:time` and `xsd:dateTime`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TemporalDecoding {
    /// Parse the lexical form as a double, which fails for every valid temporal lexical form.
    /// Kept for compatibility.
    #[default]
    AsDouble,
    /// Decode with [`LexicalValue::as_temporal`].
    AsTemporal,
}

/// Options for [`LexicalValue::as_dynamic_with`].
///
/// The default options reproduce [`LexicalValue::as_dynamic`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoercionOptions {
    temporal_decoding: TemporalDecoding,
}

impl CoercionOptions {
    #[must_use]
    pub fn with_temporal_decoding(mut self, temporal_decoding: TemporalDecoding) -> Self {
        self.temporal_decoding = temporal_decoding;
        self
    }

    pub fn temporal_decoding(&self) -> TemporalDecoding {
        self.temporal_decoding
    }
}

/// The result of [`LexicalValue::as_dynamic`].
#[derive(Debug, Clone, PartialEq)]
pub enum DynamicValue {
    BigInteger(BigInt),
    Long(i64),
    BigDecimal(BigDecimal),
    Float(f32),
    Double(f64),
    Temporal(Temporal),
    String(String),
}

/// The result of [`LexicalValue::as_object`].
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectValue {
    String(String),
    Float(f32),
    Double(f64),
    /// The canonical N-Triples encoding of the literal.
    Encoded(String),
}

impl LexicalValue<'_> {
    /// Decodes the lexical form according to the datatype with the default [`CoercionOptions`].
    pub fn as_dynamic(&self) -> CoercionResult<DynamicValue> {
        self.as_dynamic_with(&CoercionOptions::default())
    }

    /// Decodes the lexical form according to the datatype.
    ///
    /// Integer datatypes without a width limit become [`DynamicValue::BigInteger`], the other
    /// integer datatypes [`DynamicValue::Long`]. `xsd:decimal`, `xsd:float` and `xsd:double` map
    /// to their natural counterparts. Unknown datatypes fall back to the raw lexical form.
    ///
    /// By default, `xsd:date`, `xsd:time` and `xsd:dateTime` are parsed as doubles. This is a
    /// known gap that is only kept for compatibility. Use [`TemporalDecoding::AsTemporal`] to
    /// decode them properly.
    pub fn as_dynamic_with(&self, options: &CoercionOptions) -> CoercionResult<DynamicValue> {
        let datatype = self.datatype();
        if is_unbounded_integer_datatype(datatype) {
            return self.as_big_integer().map(DynamicValue::BigInteger);
        }
        if is_fixed_width_integer_datatype(datatype) {
            return self.as_long().map(DynamicValue::Long);
        }
        if datatype == xsd::DECIMAL.as_str() {
            return self.as_big_decimal().map(DynamicValue::BigDecimal);
        }
        if datatype == xsd::FLOAT.as_str() {
            return self.as_float().map(DynamicValue::Float);
        }
        if datatype == xsd::DOUBLE.as_str() {
            return self.as_double().map(DynamicValue::Double);
        }
        if is_temporal_datatype(datatype) {
            return match options.temporal_decoding {
                TemporalDecoding::AsDouble => self.as_double().map(DynamicValue::Double),
                TemporalDecoding::AsTemporal => self.as_temporal().map(DynamicValue::Temporal),
            };
        }
        Ok(DynamicValue::String(self.as_raw_string().to_owned()))
    }

    /// Decodes strings and floating point numbers. Everything else is returned as its canonical
    /// N-Triples encoding.
    pub fn as_object(&self) -> CoercionResult<ObjectValue> {
        let datatype = self.datatype();
        if datatype == xsd::STRING.as_str() {
            Ok(ObjectValue::String(self.as_raw_string().to_owned()))
        } else if datatype == xsd::FLOAT.as_str() {
            self.as_float().map(ObjectValue::Float)
        } else if datatype == xsd::DOUBLE.as_str() {
            self.as_double().map(ObjectValue::Double)
        } else {
            Ok(ObjectValue::Encoded(self.to_ntriples()))
        }
    }

    fn to_ntriples(&self) -> String {
        let mut encoded = String::with_capacity(self.lexical_form().len() + 2);
        // Writing into a String cannot fail.
        write_literal(
            &mut encoded,
            self.lexical_form(),
            self.datatype(),
            self.language(),
        )
        .ok();
        encoded
    }
}

fn is_temporal_datatype(datatype: &str) -> bool {
    [xsd::DATE, xsd::TIME, xsd::DATE_TIME]
        .iter()
        .any(|iri| iri.as_str() == datatype)
}
