//! This module defines the canonical, type-safe registry of the fields that
//! make up one fixed-width snapshot record.
//!
//! The registry replaces a fragile string-based type description (tags like
//! `"int16[5]"`) with typed [`FieldDescriptor`]s that are validated once, at
//! schema construction, instead of being re-parsed per field per call. The
//! schema is built exactly once per process and shared read-only; byte
//! offsets are derived from declaration order with no implicit padding.

use std::sync::OnceLock;

use crate::error::CodecError;

//==================================================================================
// 1. Width Classes
//==================================================================================

/// The primitive storage class of a field element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidthClass {
    Bool,
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
}

impl WidthClass {
    /// Storage width of one element in bytes.
    pub fn byte_width(self) -> usize {
        match self {
            WidthClass::Bool | WidthClass::U8 | WidthClass::I8 => 1,
            WidthClass::U16 | WidthClass::I16 => 2,
            WidthClass::U32 | WidthClass::I32 => 4,
            WidthClass::U64 | WidthClass::I64 => 8,
        }
    }
}

//==================================================================================
// 2. Field Descriptors
//==================================================================================

/// One field of the record layout. Declaration order is significant: it
/// defines the byte offsets of the wire format.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub class: WidthClass,
    /// Element count: 1 for scalars, 5 for the quote-level arrays.
    pub arity: usize,
    /// Whether the field participates in differential encoding.
    pub differential: bool,
}

/// The L1 snapshot record layout. 54 bytes total, no padding.
pub const SNAPSHOT_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor { name: "sync", class: WidthClass::Bool, arity: 1, differential: false },
    FieldDescriptor { name: "date", class: WidthClass::U8, arity: 1, differential: true },
    FieldDescriptor { name: "time_s", class: WidthClass::U16, arity: 1, differential: true },
    FieldDescriptor { name: "latest_price_tick", class: WidthClass::I16, arity: 1, differential: true },
    FieldDescriptor { name: "trade_count", class: WidthClass::U8, arity: 1, differential: false },
    FieldDescriptor { name: "turnover", class: WidthClass::U32, arity: 1, differential: false },
    FieldDescriptor { name: "volume", class: WidthClass::U16, arity: 1, differential: false },
    FieldDescriptor { name: "bid_price_ticks", class: WidthClass::I16, arity: 5, differential: true },
    FieldDescriptor { name: "bid_volumes", class: WidthClass::U16, arity: 5, differential: false },
    FieldDescriptor { name: "ask_price_ticks", class: WidthClass::I16, arity: 5, differential: true },
    FieldDescriptor { name: "ask_volumes", class: WidthClass::U16, arity: 5, differential: false },
    FieldDescriptor { name: "direction", class: WidthClass::U8, arity: 1, differential: false },
];

//==================================================================================
// 3. FieldSchema
//==================================================================================

/// Immutable registry of the record layout: per-field byte offsets and the
/// total record width. Constructed once and shared by reference across all
/// encode/decode calls; never mutated afterwards.
#[derive(Debug)]
pub struct FieldSchema {
    fields: Vec<FieldDescriptor>,
    offsets: Vec<usize>,
    record_width: usize,
}

impl FieldSchema {
    /// Validates the descriptor list and computes offsets and total width.
    /// Fails if any declared arity is unrecognized.
    pub fn build(fields: &[FieldDescriptor]) -> Result<Self, CodecError> {
        let mut offsets = Vec::with_capacity(fields.len());
        let mut cursor = 0usize;
        for field in fields {
            if field.arity != 1 && field.arity != 5 {
                return Err(CodecError::SchemaInit(format!(
                    "field '{}' has unsupported arity {}",
                    field.name, field.arity
                )));
            }
            offsets.push(cursor);
            cursor += field.class.byte_width() * field.arity;
        }
        Ok(Self {
            fields: fields.to_vec(),
            offsets,
            record_width: cursor,
        })
    }

    /// The process-wide snapshot schema. Built on first use; any defect in
    /// the static field table fails here, at initialization.
    pub fn shared() -> &'static FieldSchema {
        static SCHEMA: OnceLock<FieldSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            FieldSchema::build(SNAPSHOT_FIELDS).expect("static snapshot field table is valid")
        })
    }

    /// Total byte width of one serialized record.
    pub fn record_width(&self) -> usize {
        self.record_width
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Byte offset of a field within the serialized record.
    pub fn offset_of(&self, name: &str) -> Option<usize> {
        self.fields
            .iter()
            .position(|f| f.name == name)
            .map(|i| self.offsets[i])
    }

    /// The fields that participate in differential encoding, in layout order.
    pub fn differential_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.differential)
    }
}

//==================================================================================
// 4. Unit Tests
//==================================================================================
