//! Series and parallel RLC circuit calculator.
//!
//! Raw text tokens such as `4.7k`, `100nF` or `30l` are parsed into magnitudes with a
//! role hint ([`parser`]), routed into a normalized quantity set ([`inputs`]), and
//! solved for a single R/L/C combination in series or parallel ([`solver`]). Missing
//! quantities are filled in by an ordered set of derivation [`rules`].
//!
//! ```
//! use rlc_solve::inputs::{CircuitInputs, RawInputs};
//! use rlc_solve::solver::{solve, Topology};
//!
//! let raw = RawInputs {
//!     voltage: "10".into(),
//!     resistance: "100".into(),
//!     inductance: "0.1".into(),
//!     frequency: "60".into(),
//!     ..RawInputs::default()
//! };
//! let inputs = CircuitInputs::parse(&raw).unwrap();
//! let result = solve(&inputs, Topology::Series).unwrap();
//! assert!((result.impedance - 106.87).abs() < 0.01);
//! ```

pub mod errors;
pub mod format;
pub mod inputs;
pub mod parser;
pub mod result;
pub mod rules;
pub mod solver;
pub mod units;

pub use errors::{CircuitError, ParseError};
pub use format::format_value;
pub use inputs::{CircuitInputs, Quantity, RawInputs};
pub use parser::{Field, ParsedQuantity, RoleHint, parse_value, try_parse_value};
pub use result::{Breakdown, CircuitResult};
pub use solver::{Topology, solve};
pub use units::UnitKind;
