use std::collections::HashSet;
use std::path::Path;

use approx::assert_relative_eq;
use serde::Deserialize;

use lp_format::data::linear_program::elements::{
    Objective, RangedConstraintRelation, RangedConstraintRelationKind, VariableType,
};
use lp_format::data::linear_program::general_form::{Difference, GeneralForm};
use lp_format::io::{export, import, import_general_form};
use lp_format::io::error::Import;
use lp_format::io::lp::parse;
use lp_format::io::lp::write::to_string;
use lp_format::io::options::{ConstantRow, ExportOptions, ImportOptions};

use super::get_test_file_path;

const FIXTURES: [&str; 3] = ["linear_transformer", "storage_investment", "chp_with_status"];

fn to_general_form(name: &str) -> GeneralForm<f64> {
    let options = ImportOptions { strict_labels: true, ..ImportOptions::default() };
    import_general_form(&get_test_file_path(name), &options).unwrap()
}

fn b_of(general_form: &GeneralForm<f64>, constraint: &str) -> f64 {
    general_form.b()[general_form.constraint_index(constraint).unwrap()]
}

#[test]
fn all_fixtures_parse() {
    for name in FIXTURES {
        let lp = import::<f64>(&get_test_file_path(name)).unwrap();
        assert_eq!(lp.name(), Some("Model"));
        assert_eq!(lp.objective(), Objective::Minimize);
        assert_eq!(lp.objective_name(), Some("objective"));
        assert!(lp.variables().iter().any(|variable| variable == "ONE_VAR_CONSTANT"));
    }
}

#[test]
fn linear_transformer() {
    let general_form = to_general_form("linear_transformer");

    assert_eq!(general_form.nr_constraints(), 6);
    assert_eq!(general_form.nr_variables(), 9);
    assert_eq!(general_form.fixed_cost(), &0_f64);
    let statistics = general_form.statistics();
    assert_eq!(statistics.constraints[RangedConstraintRelationKind::Equal], 6);
    assert_eq!(statistics.variables[VariableType::Continuous], 9);
    assert_eq!(statistics.non_zeros, 12);

    let row = general_form
        .constraint_index("Transformer_relation(powerplantGas_gasBus_electricityBus_1)_")
        .unwrap();
    let column = general_form.variable_index("flow(gasBus_powerplantGas_1)").unwrap();
    assert_relative_eq!(*general_form.constraints().get(row, column).unwrap(), 0.58);

    let column = general_form.variable_index("flow(powerplantGas_electricityBus_2)").unwrap();
    let variable = &general_form.variables()[column];
    assert_eq!(variable.cost, 50_f64);
    assert_eq!(variable.lower_bound, Some(0_f64));
    assert_relative_eq!(variable.upper_bound.unwrap(), 1e11);

    let time_indices = general_form.variable_identifiers().iter()
        .map(|identifier| identifier.time_index())
        .collect::<HashSet<_>>();
    assert_eq!(time_indices, HashSet::from([Some(0), Some(1), Some(2)]));
}

#[test]
fn storage_investment() {
    let general_form = to_general_form("storage_investment");

    assert_eq!(general_form.nr_constraints(), 7);
    assert_eq!(general_form.nr_variables(), 7);
    assert_eq!(general_form.fixed_cost(), &12_f64);
    assert_eq!(general_form.statistics().non_zeros, 15);

    assert_eq!(b_of(&general_form, "Bus_balance(electricityBus_1)_"), -30_f64);
    // The constant moved to the right-hand side
    let capacity = b_of(&general_form, "GenericInvestmentStorageBlock_max_capacity(storage)_");
    assert_eq!(capacity, 150_f64);
    assert_eq!(general_form.constraint_types(), &[
        RangedConstraintRelation::Equal,
        RangedConstraintRelation::Equal,
        RangedConstraintRelation::Equal,
        RangedConstraintRelation::Equal,
        RangedConstraintRelation::Less,
        RangedConstraintRelation::Range(10_f64),
        RangedConstraintRelation::Greater,
    ]);
    let content = b_of(&general_form, "GenericInvestmentStorageBlock_content_range(storage_1)_");
    assert_eq!(content, 5_f64);

    let row = general_form
        .constraint_index("GenericInvestmentStorageBlock_balance(storage_0)_")
        .unwrap();
    let column = general_form.variable_index("flow(storage_electricityBus_0)").unwrap();
    assert_relative_eq!(*general_form.constraints().get(row, column).unwrap(), -1.1);

    let invest = general_form
        .variable_index("GenericInvestmentStorageBlock_invest(storage)")
        .unwrap();
    let identifiers = general_form.variable_identifiers();
    assert_eq!(identifiers[invest].base(), "GenericInvestmentStorageBlock_invest");
    assert_eq!(identifiers[invest].time_index(), None);
}

#[test]
fn chp_with_status() {
    let general_form = to_general_form("chp_with_status");

    assert_eq!(general_form.nr_constraints(), 5);
    assert_eq!(general_form.nr_variables(), 6);
    let statistics = general_form.statistics();
    assert_eq!(statistics.constraints[RangedConstraintRelationKind::Equal], 1);
    assert_eq!(statistics.constraints[RangedConstraintRelationKind::Less], 2);
    assert_eq!(statistics.constraints[RangedConstraintRelationKind::Greater], 2);
    assert_eq!(statistics.constraints[RangedConstraintRelationKind::Range], 0);
    assert_eq!(statistics.variables[VariableType::Integer], 3);
    assert_eq!(statistics.non_zeros, 10);

    let binary = general_form.variables().iter()
        .filter(|variable| variable.is_binary())
        .map(|variable| variable.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(binary, vec![
        "NonConvexFlow_startup(chp_electricityBus_0)",
        "NonConvexFlow_status(chp_electricityBus_0)",
    ]);

    let invest = general_form.variable_index("InvestmentFlow_invest(boiler_heatBus)").unwrap();
    let invest = &general_form.variables()[invest];
    assert_eq!(invest.variable_type, VariableType::Integer);
    assert_eq!((invest.lower_bound, invest.upper_bound), (Some(0_f64), Some(10_f64)));

    let boiler = general_form.variable_index("flow(boiler_heatBus_0)").unwrap();
    let boiler = &general_form.variables()[boiler];
    assert!(boiler.is_free());
    let startup = b_of(&general_form, "NonConvexFlow_startup_constr(chp_electricityBus_0)_");
    assert_eq!(startup, -1_f64);
}

/// Writing a fixture and reading it again gives an equivalent program, also when the constant
/// variable was kept as an ordinary variable.
#[test]
fn read_after_write() {
    for name in FIXTURES {
        for fold_one_var_constant in [true, false] {
            let import_options = ImportOptions { strict_labels: true, fold_one_var_constant };
            let path = get_test_file_path(name);
            let original = import_general_form::<f64>(&path, &import_options).unwrap();

            for constant_row in [ConstantRow::Always, ConstantRow::WhenNeeded] {
                let options = ExportOptions { source_comment: true, constant_row };
                let text = to_string(&original, &options).unwrap();
                assert!(text.matches("c_e_ONE_VAR_CONSTANT:").count() <= 1);

                let read = parse::<f64>(&text).unwrap()
                    .into_general_form(&import_options)
                    .unwrap();
                assert_eq!(read.difference(&original), None, "{name}");
                assert_eq!(read.name(), Some("Model"));
            }
        }
    }
}

#[test]
fn export_and_import() {
    let original = to_general_form("storage_investment");
    let path = std::env::temp_dir().join(format!("lp_format_export_{}.lp", std::process::id()));

    export(&original, &path, &ExportOptions::default()).unwrap();
    let read = import_general_form::<f64>(&path, &ImportOptions::default()).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(read.difference(&original), None);
    assert_eq!(read.statistics(), original.statistics());
}

#[test]
fn differences_are_found() {
    let left = to_general_form("linear_transformer");
    let right = to_general_form("storage_investment");
    assert_eq!(left.difference(&right), Some(Difference::FixedCost));
}

#[test]
fn import_errors() {
    let result = import::<f64>(Path::new("tests/oemof/linear_transformer.mps"));
    assert!(matches!(result, Err(Import::FileExtension(_))));

    let result = import::<f64>(Path::new("tests/oemof/does_not_exist.lp"));
    assert!(matches!(result, Err(Import::IO(_))));

    let result = parse::<f64>("min\nobjective:\n+1 x\ns.t.\nc_e_a:\n+1 x\n= +inf\nend");
    match result {
        Err(Import::Parse(error)) => assert_eq!(error.line_number(), Some(7)),
        _ => panic!("expected a parse error"),
    }
}

/// The options can be part of a larger configuration file.
#[test]
fn options_in_configuration() {
    #[derive(Deserialize)]
    struct Configuration {
        import: ImportOptions,
        export: ExportOptions,
    }

    let configuration: Configuration = toml::from_str("
        [import]
        strict_labels = true

        [export]
        source_comment = false
        constant_row = \"when_needed\"
    ").unwrap();
    assert!(configuration.import.strict_labels);
    assert!(configuration.import.fold_one_var_constant);
    assert_eq!(
        configuration.export,
        ExportOptions { source_comment: false, constant_row: ConstantRow::WhenNeeded },
    );

    let text = to_string(&to_general_form("chp_with_status"), &configuration.export).unwrap();
    assert!(text.starts_with("min"));
    assert!(!text.contains("ONE_VAR_CONSTANT"));
}
