//! # logic-nets: Multi-representation Boolean networks
//!
//! **`logic-nets`** is the core of a logic-synthesis workbench. It holds the same Boolean
//! functions in several representations, converts between them without ever approximating,
//! and extracts exact semantics and structural statistics.
//!
//! ## Representations
//!
//! - **Graphs**: [`Network`][crate::network::Network] of kind AIG (AND gates), MIG (majority
//!   gates) or mixed (AND, OR, XOR, majority). Inverters live on the edges, in the polarity bit
//!   of a [`Signal`][crate::signal::Signal]. Gates are normalized and hash-consed on insertion.
//! - **Truth tables**: [`TruthTableSet`][crate::truth_table::TruthTableSet], bit-packed with `bitvec`.
//! - **Expressions**: [`Expression`][crate::expr::Expression], a hash-consed operator arena.
//! - **Function sets**: [`BooleanFunctionSet`][crate::function::BooleanFunctionSet], a
//!   [`Bdd`][crate::bdd::Bdd] manager together with one handle per output.
//!
//! ## Basic Usage
//!
//! ```rust
//! use logic_nets::analysis::{depth, size};
//! use logic_nets::convert::ConvertConfig;
//! use logic_nets::network::{Network, NetworkKind};
//! use logic_nets::store::{Kind, Object, Stores};
//!
//! // 1. Build a XOR out of AND gates
//! let mut aig = Network::new(NetworkKind::Aig);
//! let a = aig.add_input("a");
//! let b = aig.add_input("b");
//! let f = aig.create_xor(a, b);
//! aig.add_output("f", f);
//! assert_eq!(size(&aig), 3);
//! assert_eq!(depth(&aig), 2);
//!
//! // 2. Keep it in a store and derive its exact semantics
//! let mut stores = Stores::new();
//! stores.push(Object::Network(aig));
//! stores.convert(Kind::Aig, Kind::Functions, &ConvertConfig::default())?;
//! assert_eq!(stores.functions.current()?.minterm_count(0), 2.0);
//! # Ok::<(), logic_nets::error::Error>(())
//! ```
//!
//! ## Core Components
//!
//! - **[`network`]**: Graph forms, builders and structural hashing.
//! - **[`convert`]**: Conversions between every pair of kinds, with majority and XOR recognition.
//! - **[`simulate`]**: Topological simulation into decision diagrams, truth tables or single patterns.
//! - **[`analysis`]**: Size, depth, complemented edges, inverters, minterm and path counts.
//! - **[`store`]**: Per-kind histories of objects.
//! - **[`bdd`]**: The decision-diagram manager behind [`function`].

pub mod analysis;
pub mod bdd;
pub mod cache;
pub mod compare;
pub mod config;
pub mod convert;
pub mod error;
pub mod expr;
pub mod function;
pub mod gate;
pub mod isop;
pub mod network;
pub mod reference;
pub mod sat;
pub mod signal;
pub mod simulate;
pub mod store;
pub mod table;
pub mod truth_table;
pub mod utils;

pub use crate::error::{Error, Result};
pub use crate::network::{Network, NetworkKind};
pub use crate::signal::Signal;
pub use crate::store::{Kind, Object, ObjectRef, Stores};
