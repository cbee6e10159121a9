//! Transformation trait definition.

use serde_json::Value;

use crate::types::RawRecord;

/// A named computation that derives one output value from a record.
///
/// Implementations return `None` when they cannot produce a value (missing
/// source field, unparsable input, wrong parameter shape). The mapper then
/// omits the output field; a transformation never fails a whole record.
pub trait Transformation: Send + Sync {
    /// Compute the value for `record` using the rule's `params`.
    fn apply(&self, record: &RawRecord, params: &Value) -> Option<Value>;
}

impl<F> Transformation for F
where
    F: Fn(&RawRecord, &Value) -> Option<Value> + Send + Sync,
{
    fn apply(&self, record: &RawRecord, params: &Value) -> Option<Value> {
        self(record, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GenericValue;

    struct Constant(&'static str);

    impl Transformation for Constant {
        fn apply(&self, _record: &RawRecord, _params: &Value) -> Option<Value> {
            Some(Value::from(self.0))
        }
    }

    #[test]
    fn test_struct_transformation() {
        let record = RawRecord::new();
        assert_eq!(
            Constant("hello").apply(&record, &Value::Null),
            Some(Value::from("hello"))
        );
    }

    #[test]
    fn test_closure_transformation() {
        let upper = |record: &RawRecord, params: &Value| {
            let field = params.as_str()?;
            record
                .get(field)
                .and_then(GenericValue::as_leaf)
                .map(|text| Value::from(text.to_uppercase()))
        };

        let mut record = RawRecord::new();
        record.insert("Name", GenericValue::leaf("doe"));

        assert_eq!(
            upper.apply(&record, &Value::from("Name")),
            Some(Value::from("DOE"))
        );
        assert_eq!(upper.apply(&record, &Value::from(1)), None);
    }
}
