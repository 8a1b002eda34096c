use std::fs;
use std::process::ExitCode;

use clap::Parser;
use log::{debug, info};

use ibcp::config::Config;
use ibcp::program_model::ProgramModel;
use ibcp::recreator::recreate;
use ibcp::table::Table;

fn main() -> ExitCode {
    env_logger::init();
    let config = Config::parse();

    let Some(path) = config.source.as_deref() else {
        eprintln!("usage: ibcp <file.bas> [--tp] [--te] [--tt] [--tc] [--tr] [--to]");
        return ExitCode::FAILURE;
    };

    let source = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("failed to read {path}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let table = match Table::build() {
        Ok(table) => table,
        Err(err) => {
            eprintln!("internal error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let lines: Vec<&str> = source.lines().collect();
    info!("translating {} line(s) from {path}", lines.len());

    let mut model = ProgramModel::new(&table);
    let report = model.update(0, 0, &lines);
    if config.trace_model {
        debug!("update report: {} change(s), new_line_count={:?}", report.changes.len(), report.new_line_count);
    }

    let mut had_error = false;
    for line_index in 0..model.line_count() {
        if let Some(error) = model.error(line_index) {
            had_error = true;
            println!("line {}: {} at column {}", line_index + 1, error.status, error.column);
            continue;
        }

        if config.trace_parser || config.trace_translator || config.trace_table {
            for word in model.line_words(line_index) {
                debug!("line {}: word {:#06x}", line_index + 1, word.raw());
            }
        }
        if config.trace_encoder {
            debug!(
                "line {}: doubles={} integers={} strings={} remarks={}",
                line_index + 1,
                model.doubles().len(),
                model.integers().len(),
                model.strings().len(),
                model.remarks().len(),
            );
        }
    }

    if config.trace_recreator {
        for line_index in 0..model.line_count() {
            if model.error(line_index).is_none() {
                // recreate() consumes a translated RpnList, not the encoded
                // word stream; re-translating here keeps main.rs a thin
                // consumer instead of giving ProgramModel a decode path it
                // has no other use for.
                let translator = ibcp::translator::Translator::new(&table);
                let mut parser = ibcp::parser::Parser::new(&table, lines[line_index]);
                if let Ok(rpn) = translator.translate_line(&mut parser) {
                    debug!("line {}: recreated as `{}`", line_index + 1, recreate(&rpn));
                }
            }
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
