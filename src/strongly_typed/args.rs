use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "strongly-typed")]
#[command(about = "Declare typed attributes and coerce values into them", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding config.json (defaults to the user config dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub config: Option<PathBuf>,

    /// Offset times are normalized to: local, Z or +HH:MM
    #[arg(long, global = true, value_name = "OFFSET", allow_hyphen_values = true)]
    pub utc_offset: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Coerce a single value into a type
    #[command(alias = "c")]
    Coerce {
        /// The literal to convert
        #[arg(allow_hyphen_values = true)]
        value: String,

        /// Target type name (e.g. Integer, date_time, bool)
        #[arg(long, value_name = "TYPE")]
        to: String,

        /// How to read VALUE (inferred when omitted)
        #[arg(long = "as", value_enum, value_name = "KIND")]
        kind: Option<LiteralKind>,
    },

    /// Declare a record type and build one instance of it
    #[command(alias = "b")]
    Build {
        /// Attribute declaration, NAME or NAME:TYPE (repeatable, in order)
        #[arg(long = "attr", value_name = "NAME[:TYPE]", required = true)]
        attrs: Vec<String>,

        /// Treat VALUES as positional instead of key=value pairs
        #[arg(long)]
        positional: bool,

        /// Record name used in messages
        #[arg(long, default_value = "Record")]
        name: String,

        /// key=value pairs, or plain values with --positional
        #[arg(num_args = 0.., allow_hyphen_values = true)]
        values: Vec<String>,
    },

    /// List accepted type names
    Types,
}

/// How a command-line literal is read before coercion.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LiteralKind {
    Nil,
    String,
    Bool,
    Integer,
    Float,
    Rational,
    Complex,
    Symbol,
    Time,
    Date,
}
