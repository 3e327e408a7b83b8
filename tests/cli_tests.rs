//! CLI command tests
#![cfg(feature = "cli")]

use std::fs;

use dataset_model_sdk::cli::CliError;
use dataset_model_sdk::cli::commands::{InferArgs, OverrideMode, handle_infer};
use dataset_model_sdk::export::model_document::ModelDocument;
use dataset_model_sdk::export::table_document::TableDocument;
use tempfile::TempDir;

const DATASET: &str = r#"{
    "customers_df": [{"CUSTOMER_ID": 1, "NAME": "Ada"}],
    "orders_df": [
        {"ORDER_ID": 1, "CUSTOMER_ID": 1, "DAY_OFFSET": 2},
        {"ORDER_ID": 2, "CUSTOMER_ID": 1, "DAY_OFFSET": 3}
    ]
}"#;

fn args(dir: &TempDir) -> InferArgs {
    let input = dir.path().join("dataset.json");
    fs::write(&input, DATASET).unwrap();
    InferArgs {
        input: input.display().to_string(),
        config: None,
        model_name: "Test Model".to_string(),
        overrides: None,
        override_mode: OverrideMode::Replace,
        tables_dir: None,
        output: Some(dir.path().join("model.yaml")),
    }
}

mod infer_command_tests {
    use super::*;

    #[test]
    fn test_infer_writes_model_and_table_documents() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("model.toml");
        fs::write(&config_path, "table_prefix = \"shop\"\ndatabase = \"SHOP\"\n").unwrap();

        let mut args = args(&dir);
        args.config = Some(config_path);
        args.tables_dir = Some(dir.path().join("tables"));
        handle_infer(&args).unwrap();

        let model = ModelDocument::from_yaml(&fs::read_to_string(dir.path().join("model.yaml")).unwrap())
            .unwrap();
        assert_eq!(model.model.name, "Test Model");
        assert_eq!(
            model.table("SHOP_CUSTOMERS").unwrap().joins[0].with,
            "SHOP_ORDERS"
        );
        assert!(model.table("DATE_DIM").is_some());

        let orders = TableDocument::from_yaml(
            &fs::read_to_string(dir.path().join("tables/SHOP_ORDERS.table.yaml")).unwrap(),
        )
        .unwrap();
        assert_eq!(orders.table.db, "SHOP");
        assert_eq!(orders.table.columns.len(), 3);
    }

    #[test]
    fn test_infer_with_replacing_overrides() {
        let dir = TempDir::new().unwrap();
        let overrides = dir.path().join("joins.yaml");
        fs::write(
            &overrides,
            "- from_table: orders\n  to_table: customers\n  join_column: customer_id\n  cardinality: MANY_TO_ONE\n",
        )
        .unwrap();

        let mut args = args(&dir);
        args.overrides = Some(overrides);
        handle_infer(&args).unwrap();

        let model = ModelDocument::from_yaml(&fs::read_to_string(dir.path().join("model.yaml")).unwrap())
            .unwrap();
        assert!(model.table("CUSTOMERS").unwrap().joins.is_empty());
        let joins = &model.table("ORDERS").unwrap().joins;
        assert_eq!(joins.len(), 1);
        assert_eq!(joins[0].on, "[ORDERS::CUSTOMER_ID] = [CUSTOMERS::CUSTOMER_ID]");
        assert!(model.table("DATE_DIM").is_none());
    }

    #[test]
    fn test_infer_with_merging_overrides() {
        let dir = TempDir::new().unwrap();
        let overrides = dir.path().join("joins.yaml");
        fs::write(
            &overrides,
            "- from_table: CUSTOMERS\n  to_table: ORDERS\n  join_column: CUSTOMER_ID\n  cardinality: ONE_TO_MANY\n",
        )
        .unwrap();

        let mut args = args(&dir);
        args.overrides = Some(overrides);
        args.override_mode = OverrideMode::Merge;
        handle_infer(&args).unwrap();

        let model = ModelDocument::from_yaml(&fs::read_to_string(dir.path().join("model.yaml")).unwrap())
            .unwrap();
        assert_eq!(model.table("ORDERS").unwrap().joins[0].with, "DATE_DIM");
    }

    #[test]
    fn test_missing_input_reported() {
        let dir = TempDir::new().unwrap();
        let mut args = args(&dir);
        args.input = dir.path().join("missing.json").display().to_string();
        let err = handle_infer(&args).unwrap_err();
        assert!(matches!(err, CliError::FileReadError(..)));
    }

    #[test]
    fn test_invalid_config_reported() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("model.toml");
        fs::write(&config_path, "id_suffix = \"\"\n").unwrap();

        let mut args = args(&dir);
        args.config = Some(config_path);
        let err = handle_infer(&args).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }
}
