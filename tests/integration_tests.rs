//! Whole-line round trips through the public pipeline: source text ->
//! `ProgramModel::update` -> encoded words, and source text -> RPN ->
//! `recreate`, grounded in `original_source/main.cpp`'s batch-mode use of
//! the same components.

use ibcp::parser::Parser;
use ibcp::program_model::ProgramModel;
use ibcp::recreator::recreate;
use ibcp::table::Table;
use ibcp::translator::Translator;
use pretty_assertions::assert_eq;

fn recreate_line(table: &Table, line: &str) -> String {
    let translator = Translator::new(table);
    let mut parser = Parser::new(table, line);
    let rpn = translator.translate_line(&mut parser).expect("line should translate");
    recreate(&rpn)
}

#[test]
fn a_small_program_translates_every_line_without_error() {
    let table = Table::build().unwrap();
    let mut model = ProgramModel::new(&table);
    let report = model.update(0, 0, &["LET A = 1 + 2", "PRINT A", "INPUT B", "LET C$ = \"hi\""]);

    assert_eq!(model.line_count(), 4);
    for line_index in 0..model.line_count() {
        assert!(model.error(line_index).is_none(), "line {line_index} failed to translate");
        assert!(!model.line_words(line_index).is_empty());
    }
    assert_eq!(report.new_line_count, Some(4));
}

#[test]
fn editing_a_line_in_place_keeps_the_other_lines_untouched() {
    let table = Table::build().unwrap();
    let mut model = ProgramModel::new(&table);
    model.update(0, 0, &["LET A = 1", "PRINT A"]);
    let original_second_line = model.line_words(1).to_vec();

    model.update(0, 1, &["LET A = 2"]);

    assert_eq!(model.line_count(), 2);
    assert_eq!(model.line_words(1).to_vec(), original_second_line);
}

#[test]
fn a_syntax_error_is_reported_at_the_failing_column() {
    let table = Table::build().unwrap();
    let mut model = ProgramModel::new(&table);
    model.update(0, 0, &["LET A = "]);
    let error = model.error(0).expect("missing operand should be an error");
    assert!(error.column > 0);
}

#[test]
fn variable_names_are_case_insensitive_across_lines() {
    let table = Table::build().unwrap();
    let mut model = ProgramModel::new(&table);
    model.update(0, 0, &["LET foo = 1", "PRINT FOO"]);
    assert_eq!(model.doubles().len(), 1, "foo and FOO must share one dictionary slot");
}

#[test]
fn string_constants_keep_their_exact_casing() {
    let table = Table::build().unwrap();
    let mut model = ProgramModel::new(&table);
    model.update(0, 0, &["PRINT \"Hello\"", "PRINT \"HELLO\""]);
    assert_eq!(model.strings().len(), 2, "differently-cased string literals are distinct constants");
}

#[test]
fn recreate_round_trips_a_representative_program() {
    let table = Table::build().unwrap();
    let lines = ["LET A = 1 + 2 * 3", "PRINT A; \"done\"", "INPUT PROMPT \"value? \"; B"];
    for line in lines {
        assert_eq!(recreate_line(&table, line), line);
    }
}

#[test]
fn function_call_arguments_recreate_with_comma_space() {
    let table = Table::build().unwrap();
    assert_eq!(recreate_line(&table, "LET A = ABS(1.5)"), "LET A = ABS(1.5)");
}
