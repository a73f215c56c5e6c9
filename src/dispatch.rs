//! Discriminator dispatch tables.
//!
//! A [`DispatchTable`] maps the literal found in a discriminator member
//! (`type`, `actionType`) to the parser of the matching variant. Lookup is a
//! single hash probe; the parsers are never tried in sequence.
//!
//! ```text
//!   {"type": "rx", ...} ──lookup "rx"──→ parse Rx ──→ Instruction::Rx
//!   {"type": "foo"}     ──lookup "foo"─→ UnsupportedVariant("foo")
//!   {}                  ──────────────→ Missing("type")
//! ```

use rustc_hash::FxHashMap;
use serde_json::Value;
use tracing::debug;

use crate::error::ErrorKind;
use crate::validation::{Fields, Validator};

/// Parser for one variant of a family.
pub type Parser<T> = fn(&Value, &mut Validator) -> Option<T>;

/// Static map from discriminator literal to variant parser.
pub struct DispatchTable<T> {
    key: &'static str,
    family: &'static str,
    parsers: FxHashMap<&'static str, Parser<T>>,
}

impl<T> DispatchTable<T> {
    /// Build a table reading discriminator member `key`.
    ///
    /// # Panics
    ///
    /// Panics if a literal appears twice. Tables are built once at startup.
    pub fn new(
        key: &'static str,
        family: &'static str,
        entries: &[(&'static str, Parser<T>)],
    ) -> Self {
        let mut parsers = FxHashMap::default();
        parsers.reserve(entries.len());
        for &(literal, parser) in entries {
            if parsers.insert(literal, parser).is_some() {
                panic!("duplicate {family} discriminator `{literal}`");
            }
        }
        debug!("Built {} dispatch table with {} variants", family, parsers.len());
        Self {
            key,
            family,
            parsers,
        }
    }

    /// Discriminator member name.
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Number of variants.
    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    /// Check whether the table has no variants.
    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }

    /// Check whether `literal` names a variant.
    pub fn contains(&self, literal: &str) -> bool {
        self.parsers.contains_key(literal)
    }

    /// Iterate over the known literals, in no particular order.
    pub fn literals(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.parsers.keys().copied()
    }

    /// Read the discriminator of `value` and run the matching parser.
    pub fn parse(&self, value: &Value, v: &mut Validator) -> Option<T> {
        let fields = Fields::of(value, v)?;
        let Some(raw) = fields.get(self.key) else {
            v.at_key(self.key, |v| v.report(ErrorKind::Missing, "field required"));
            return None;
        };
        let Some(literal) = raw.as_str() else {
            v.at_key(self.key, |v| v.wrong_type("a string", raw));
            return None;
        };
        match self.parsers.get(literal) {
            Some(parse) => parse(value, v),
            None => {
                v.at_key(self.key, |v| {
                    v.report(
                        ErrorKind::UnsupportedVariant,
                        format!("unsupported {} `{literal}`", self.family),
                    )
                });
                None
            }
        }
    }
}
