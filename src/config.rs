//! Command-line configuration (§10), grounded in the teacher's own
//! `clap::Parser`-derived `Config` plus the original's trace-flag set
//! (`-tp`/`-te`/`-tt`/`-tc`/`-tr`/`-to`).

use clap::Parser;
use serde::{Deserialize, Serialize};

/// Which internal stage's trace output to print while translating a file,
/// one flag per stage so a caller can isolate just the part they're
/// debugging.
#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[command(name = "ibcp", version, about = "Translation core for an interactive BASIC compiler")]
pub struct Config {
    /// BASIC source file to translate, one statement per line
    pub source: Option<String>,

    /// trace each token the Parser reads
    #[arg(long = "tp")]
    pub trace_parser: bool,

    /// trace each RPN item the Translator emits
    #[arg(long = "te")]
    pub trace_translator: bool,

    /// trace table lookups (primary entry + resolved alternate)
    #[arg(long = "tt")]
    pub trace_table: bool,

    /// trace dictionary interning (new/reused/exists) during encoding
    #[arg(long = "tc")]
    pub trace_encoder: bool,

    /// trace the Recreator's per-piece precedence decisions
    #[arg(long = "tr")]
    pub trace_recreator: bool,

    /// trace ProgramModel::update's line-change report
    #[arg(long = "to")]
    pub trace_model: bool,
}

impl Config {
    pub fn any_trace_enabled(&self) -> bool {
        self.trace_parser || self.trace_translator || self.trace_table || self.trace_encoder || self.trace_recreator || self.trace_model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_parses_to_all_traces_disabled() {
        let config = Config::parse_from(["ibcp"]);
        assert!(!config.any_trace_enabled());
    }

    #[test]
    fn trace_flags_parse_independently() {
        let config = Config::parse_from(["ibcp", "--te", "--tc", "program.bas"]);
        assert!(config.trace_translator);
        assert!(config.trace_encoder);
        assert!(!config.trace_parser);
        assert_eq!(config.source.as_deref(), Some("program.bas"));
    }
}
