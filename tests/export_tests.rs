//! Export module tests

use dataset_model_sdk::config::ModelConfig;
use dataset_model_sdk::export::model_document::ModelDocument;
use dataset_model_sdk::export::table_document::TableDocument;
use dataset_model_sdk::export::{ModelDocumentExporter, TableDocumentBuilder};
use dataset_model_sdk::import::RecordImporter;
use dataset_model_sdk::inference::{JoinStrategy, ModelAssembler};
use dataset_model_sdk::models::{Cardinality, Dataset, JoinType, SemanticRole};
use uuid::Uuid;

const DATASET: &str = r#"{
    "customers_df": [
        {"CUSTOMER_ID": 1, "NAME": "Ada", "SIGNUP": "2024-01-02"},
        {"CUSTOMER_ID": 2, "NAME": "Grace", "SIGNUP": "2024-02-03"}
    ],
    "orders_df": [
        {"ORDER_ID": 10, "CUSTOMER_ID": 1, "AMOUNT": 12.5, "DAY_OFFSET": 3},
        {"ORDER_ID": 11, "CUSTOMER_ID": 1, "AMOUNT": 7, "DAY_OFFSET": 4},
        {"ORDER_ID": 12, "CUSTOMER_ID": 2, "AMOUNT": 3.25, "DAY_OFFSET": 4}
    ]
}"#;

fn dataset() -> Dataset {
    RecordImporter::new().import_dataset_str(DATASET).unwrap()
}

fn config() -> ModelConfig {
    ModelConfig::builder()
        .table_prefix("shop")
        .database("SHOP")
        .build()
}

mod model_document_tests {
    use super::*;

    #[test]
    fn test_model_document_contents() {
        let config = config();
        let model = ModelAssembler::new(&config).assemble(&dataset(), "Shop Model", &JoinStrategy::Inferred);
        let result = ModelDocumentExporter::new()
            .export_with_guid(&model, Uuid::nil())
            .unwrap();
        assert_eq!(result.format, "model");

        let doc = ModelDocument::from_yaml(&result.content).unwrap();
        assert_eq!(doc.model.name, "Shop Model");

        let names: Vec<&str> = doc.model.model_tables.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["SHOP_CUSTOMERS", "SHOP_ORDERS", "DATE_DIM"]);

        let customers = doc.table("SHOP_CUSTOMERS").unwrap();
        assert_eq!(customers.joins.len(), 1);
        let join = &customers.joins[0];
        assert_eq!(join.with, "SHOP_ORDERS");
        assert_eq!(join.on, "[SHOP_CUSTOMERS::CUSTOMER_ID] = [SHOP_ORDERS::CUSTOMER_ID]");
        assert_eq!(join.join_type, JoinType::Inner);
        assert_eq!(join.cardinality, Cardinality::OneToMany);

        let orders = doc.table("SHOP_ORDERS").unwrap();
        assert_eq!(orders.joins[0].with, "DATE_DIM");
        assert_eq!(orders.joins[0].cardinality, Cardinality::ManyToOne);

        let signup = doc
            .model
            .columns
            .iter()
            .find(|c| c.column_id == "SHOP_CUSTOMERS::SIGNUP")
            .unwrap();
        assert_eq!(signup.name, "Signup");
        assert_eq!(signup.properties.column_type, SemanticRole::Attribute);

        let amount = doc
            .model
            .columns
            .iter()
            .find(|c| c.column_id == "SHOP_ORDERS::AMOUNT")
            .unwrap();
        assert_eq!(amount.properties.column_type, SemanticRole::Measure);

        assert!(!doc.model.properties.is_bypass_rls);
        assert!(doc.model.properties.join_progressive);
        assert!(doc.model.properties.sage_config.is_sage_enabled);
    }

    #[test]
    fn test_properties_follow_config() {
        let mut config = config();
        config.properties.semantic_search = false;
        let model = ModelAssembler::new(&config).assemble(&dataset(), "M", &JoinStrategy::Inferred);
        let doc = ModelDocumentExporter::new().document(&model, Uuid::nil());
        assert!(!doc.model.properties.sage_config.is_sage_enabled);
    }
}

mod table_document_tests {
    use super::*;

    #[test]
    fn test_table_identifier_matches_model() {
        let config = config();
        let dataset = dataset();
        let model = ModelAssembler::new(&config).assemble(&dataset, "M", &JoinStrategy::Inferred);
        let builder = TableDocumentBuilder::new(&config);

        for (table, table_ref) in dataset.tables().iter().zip(&model.tables) {
            let result = builder.export(table).unwrap();
            let doc = TableDocument::from_yaml(&result.content).unwrap();
            assert_eq!(doc.table.name, table_ref.name);
            assert_eq!(doc.table.db_table, table_ref.name);
            assert_eq!(doc.table.db, "SHOP");
            assert_eq!(doc.guid, result.guid.to_string());
        }
    }

    #[test]
    fn test_table_columns_keep_raw_names() {
        let config = config();
        let dataset = dataset();
        let orders = dataset.table("orders_df").unwrap();
        let doc = TableDocumentBuilder::new(&config).build_for(orders, Uuid::nil());

        let names: Vec<&str> = doc.table.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["ORDER_ID", "CUSTOMER_ID", "AMOUNT", "DAY_OFFSET"]);
        assert!(doc.table.columns.iter().all(|c| c.name == c.db_column_name));
    }
}
