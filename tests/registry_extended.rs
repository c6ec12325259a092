//! Integration tests exercising the registry/`BsonExternal` seam itself:
//! the only place in the suite that implements a real, non-`NoopRegistry`
//! `Registry` and a real `BsonExternal` value, rather than only covering
//! `NoopRegistry`'s decline/error paths.

use bson::registry::{DecodeMode, DecodeOptions};
use bson::value::tag;
use bson::{Bson, BsonExternal, Buffer, Document, Error, Registry, Result};

/// A non-native value with its own tag byte, standing in for something
/// like Binary or Timestamp: a fixed-size byte payload with no further
/// structure the core understands.
#[derive(Debug, Clone, PartialEq)]
struct CustomId([u8; 12]);

const CUSTOM_ID_TAG: u8 = 0x07;

impl BsonExternal for CustomId {
    fn bson_type(&self) -> u8 {
        CUSTOM_ID_TAG
    }

    fn to_bson(&self, buf: &mut Buffer, _validate_keys: bool) -> Result<()> {
        buf.put_bytes(&self.0);
        Ok(())
    }

    fn clone_box(&self) -> Box<dyn BsonExternal> {
        Box::new(self.clone())
    }
}

/// The `mode: "bson"` raw-symbol wrapper SPEC_FULL.md §4.8 asks the
/// registry to produce in place of a bare host string.
#[derive(Debug, Clone, PartialEq)]
struct RawSymbol(String);

impl BsonExternal for RawSymbol {
    fn bson_type(&self) -> u8 {
        tag::SYMBOL
    }

    fn to_bson(&self, buf: &mut Buffer, _validate_keys: bool) -> Result<()> {
        buf.put_symbol(&self.0)
    }

    fn clone_box(&self) -> Box<dyn BsonExternal> {
        Box::new(self.clone())
    }
}

/// A lifted DBRef: only ever produced by `Registry::dbref`, never written
/// directly (so `bson_type`/`to_bson` are unreachable in this test).
#[derive(Debug, Clone, PartialEq)]
struct DbRef {
    collection: String,
    id: i32,
}

impl BsonExternal for DbRef {
    fn bson_type(&self) -> u8 {
        unreachable!("DbRef is produced only by Registry::dbref's decode-side lift")
    }

    fn to_bson(&self, _buf: &mut Buffer, _validate_keys: bool) -> Result<()> {
        unreachable!("DbRef is produced only by Registry::dbref's decode-side lift")
    }

    fn clone_box(&self) -> Box<dyn BsonExternal> {
        Box::new(self.clone())
    }
}

struct TestRegistry;

impl Registry for TestRegistry {
    fn decode(&self, tag_byte: u8, buf: &mut Buffer, _opts: &DecodeOptions) -> Result<Bson> {
        match tag_byte {
            CUSTOM_ID_TAG => {
                let bytes = buf.get_bytes(12)?;
                let array: [u8; 12] = bytes.try_into().expect("get_bytes(12) returns exactly 12 bytes");
                Ok(Bson::Extended(Box::new(CustomId(array))))
            }
            t if t == tag::SYMBOL => {
                let s = buf.get_string()?;
                Ok(Bson::Extended(Box::new(RawSymbol(s))))
            }
            other => Err(Error::decode(format!("TestRegistry has no mapping for tag 0x{:02X}", other))),
        }
    }

    fn dbref(&self, doc: Document) -> Bson {
        let collection = match doc.get("$ref") {
            Some(Bson::String(s)) => s.clone(),
            _ => return Bson::Document(doc),
        };
        let id = match doc.get("$id") {
            Some(Bson::Int32(v)) => *v,
            _ => return Bson::Document(doc),
        };
        Bson::Extended(Box::new(DbRef { collection, id }))
    }
}

fn as_extended(value: &Bson) -> &dyn BsonExternal {
    match value {
        Bson::Extended(ext) => ext.as_ref(),
        other => panic!("expected an Extended value, got {:?}", other),
    }
}

#[test]
fn extended_value_round_trips_through_encode_and_a_real_registry() {
    let mut doc = Document::new();
    doc.insert("id", Bson::Extended(Box::new(CustomId([1; 12]))));
    doc.insert("name", "widget");

    let mut buf = Buffer::new();
    buf.put_hash(&doc, true).unwrap();
    let encoded = buf.to_bytes();

    // The tag byte for the Extended field must be the one `bson_type()`
    // reports, not one of the eight native tags.
    assert!(encoded.contains(&CUSTOM_ID_TAG));

    let mut reader = Buffer::from_bytes(&encoded);
    let decoded = reader.get_document(&TestRegistry, &DecodeOptions::default()).unwrap();
    let fields = match decoded {
        Bson::Document(d) => d,
        other => panic!("expected a document, got {:?}", other),
    };
    assert_eq!(fields.get("name"), Some(&Bson::String("widget".to_string())));
    assert_eq!(format!("{:?}", as_extended(fields.get("id").unwrap())), format!("{:?}", CustomId([1; 12])));

    // Re-encoding the decoded document through `to_bson` must reproduce
    // the original bytes exactly.
    let mut re_encoded = Buffer::new();
    re_encoded.put_hash(&fields, true).unwrap();
    assert_eq!(re_encoded.to_bytes(), encoded);
}

#[test]
fn decode_mode_bson_wraps_symbols_through_the_registry() {
    let mut doc = Document::new();
    doc.insert("s", Bson::Symbol("a-symbol".to_string()));
    let mut buf = Buffer::new();
    buf.put_hash(&doc, true).unwrap();
    let encoded = buf.to_bytes();

    // Default mode: a bare string-backed symbol, no registry involvement.
    let mut default_reader = Buffer::from_bytes(&encoded);
    let default_decoded = default_reader.get_document(&TestRegistry, &DecodeOptions::default()).unwrap();
    match default_decoded {
        Bson::Document(d) => assert_eq!(d.get("s"), Some(&Bson::Symbol("a-symbol".to_string()))),
        other => panic!("expected a document, got {:?}", other),
    }

    // `mode: "bson"`: the registry wraps it in a dedicated raw-symbol type.
    let bson_opts = DecodeOptions::new(DecodeMode::Bson);
    let mut bson_reader = Buffer::from_bytes(&encoded);
    let bson_decoded = bson_reader.get_document(&TestRegistry, &bson_opts).unwrap();
    match bson_decoded {
        Bson::Document(d) => {
            let wrapped = as_extended(d.get("s").unwrap());
            assert_eq!(format!("{:?}", wrapped), format!("{:?}", RawSymbol("a-symbol".to_string())));
        }
        other => panic!("expected a document, got {:?}", other),
    }
}

#[test]
fn dbref_shaped_document_is_lifted_by_a_real_registry() {
    let mut doc = Document::new();
    doc.insert("$ref", "widgets");
    doc.insert("$id", 42i32);
    let mut buf = Buffer::new();
    buf.put_hash(&doc, true).unwrap();

    let mut reader = Buffer::from_bytes(&buf.to_bytes());
    let decoded = reader.get_document(&TestRegistry, &DecodeOptions::default()).unwrap();
    let lifted = as_extended(&decoded);
    assert_eq!(
        format!("{:?}", lifted),
        format!(
            "{:?}",
            DbRef { collection: "widgets".to_string(), id: 42 }
        )
    );
}
