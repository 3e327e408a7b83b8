//! Column type classification

use crate::models::{Aggregation, Classification, DataType, SemanticRole, StorageKind};

/// Map a column's storage kind to its document type tag, semantic role and
/// default aggregation.
///
/// Numeric columns become summed measures; everything else is an attribute.
/// The mapping is total, so unrecognised content (booleans, categorical text)
/// lands on the `VARCHAR` attribute case.
pub fn classify(kind: StorageKind) -> Classification {
    match kind {
        StorageKind::Int64 => measure(DataType::Int64),
        StorageKind::Double => measure(DataType::Double),
        StorageKind::Date => attribute(DataType::Date),
        StorageKind::Text | StorageKind::Boolean => attribute(DataType::Varchar),
    }
}

fn measure(data_type: DataType) -> Classification {
    Classification {
        data_type,
        role: SemanticRole::Measure,
        aggregation: Some(Aggregation::Sum),
    }
}

fn attribute(data_type: DataType) -> Classification {
    Classification {
        data_type,
        role: SemanticRole::Attribute,
        aggregation: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_is_summed_measure() {
        let c = classify(StorageKind::Int64);
        assert_eq!(c.data_type, DataType::Int64);
        assert_eq!(c.role, SemanticRole::Measure);
        assert_eq!(c.aggregation, Some(Aggregation::Sum));
    }

    #[test]
    fn test_float_is_summed_measure() {
        let c = classify(StorageKind::Double);
        assert_eq!(c.data_type, DataType::Double);
        assert_eq!(c.aggregation, Some(Aggregation::Sum));
    }

    #[test]
    fn test_date_is_attribute() {
        let c = classify(StorageKind::Date);
        assert_eq!(c.data_type, DataType::Date);
        assert_eq!(c.role, SemanticRole::Attribute);
        assert_eq!(c.aggregation, None);
    }

    #[test]
    fn test_text_and_boolean_are_varchar_attributes() {
        for kind in [StorageKind::Text, StorageKind::Boolean] {
            let c = classify(kind);
            assert_eq!(c.data_type, DataType::Varchar);
            assert_eq!(c.role, SemanticRole::Attribute);
            assert!(c.aggregation.is_none());
        }
    }

    #[test]
    fn test_aggregation_iff_measure() {
        for kind in [
            StorageKind::Int64,
            StorageKind::Double,
            StorageKind::Text,
            StorageKind::Boolean,
            StorageKind::Date,
        ] {
            let c = classify(kind);
            assert_eq!(c.aggregation.is_some(), c.role == SemanticRole::Measure);
        }
    }
}
