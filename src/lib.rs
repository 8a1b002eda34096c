//! # ibcp
//!
//! Translation core for an interactive BASIC compiler.
//!
//! A line of BASIC source is never interpreted directly: it is parsed into
//! [`token::Token`]s, translated into a postfix [`rpn::RpnList`] the way a
//! shunting-yard expression compiler would, then either encoded into the
//! packed word form a [`program_model::ProgramModel`] keeps resident, or
//! recreated back into canonical source text.
//!
//! ## Pipeline
//!
//! 1. **Table** ([`table`]) - the static catalog of every BASIC command,
//!    operator and internal function, with precedence and type signatures
//! 2. **Parser** ([`parser`]) - turns one line of source into a stream of
//!    classified tokens
//! 3. **Translator** ([`translator`]) - a shunting-yard pass from tokens to
//!    an [`rpn::RpnList`], inserting type conversions and resolving operator
//!    overloads along the way
//! 4. **Encoder**/**Recreator** ([`encoder`], [`recreator`]) - the RPN list's
//!    two consumers: pack it into [`program_code::ProgramWord`]s interned
//!    against a [`program_model::ProgramModel`]'s dictionaries, or rebuild
//!    the source line it came from
//!
//! ## Example
//!
//! ```rust,no_run
//! use ibcp::table::Table;
//! use ibcp::program_model::ProgramModel;
//!
//! let table = Table::build().unwrap();
//! let mut model = ProgramModel::new(&table);
//! let report = model.update(0, 0, &["LET A = 1 + 2"]);
//! println!("{} line(s) changed", report.changes.len());
//! ```

pub mod config;
pub mod dictionary;
pub mod encoder;
pub mod error;
pub mod parser;
pub mod program_code;
pub mod program_model;
pub mod recreator;
pub mod rpn;
pub mod table;
pub mod token;
pub mod translator;
pub mod types;
