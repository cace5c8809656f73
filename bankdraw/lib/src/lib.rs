//! Bankdraw generates sequences (or row-major matrices) of numbers by drawing values from a
//! [`Bank`]: a multiset of allowed values, each of which can be used at most some fixed number of
//! times.  Every value drawn is checked against a [`Rule`], which can look at the whole sequence
//! built so far before deciding whether or not to accept it.
//!
//! # Generators
//!
//! There are two ways to generate a sequence:
//!
//! 1. [`generate_random`] repeatedly draws random values from the bank, throwing away any which
//!    are used up or rejected by the [`Rule`].  This is fast, but gives up (returning a partial
//!    sequence) if no value is accepted after [`Config::draw_limit`] draws.
//! 2. [`generate_ordered`] runs a randomised depth-first search which additionally guarantees
//!    that every row is strictly ascending.  This will find a solution if one exists (given
//!    enough attempts), but can take exponential time for larger or tightly constrained requests.
//!
//! Neither generator treats 'no valid sequence exists' as an error.  Instead, the returned
//! [`Generation`] carries an [`Outcome`] which says whether or not the full request was met (and
//! the failure is also reported through the `log` crate).
//!
//! # Example
//!
//! ```
//! use bankdraw::{rules, Bank, Config, Dims, Rule};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let bank = Bank::uniform(1..=6, 3);
//! let rule = rules::and(vec![rules::only_even().boxed(), rules::in_range(2, 4).boxed()]);
//! let mut rng = StdRng::seed_from_u64(0);
//! let generation = bankdraw::generate_random(
//!     &bank,
//!     Dims::Flat(4),
//!     Some(&rule),
//!     &Config::default(),
//!     &mut rng,
//! );
//! assert!(generation.values.flatten().iter().all(|v| *v == 2 || *v == 4));
//! ```

#![deny(clippy::all)]
#![deny(rustdoc::broken_intra_doc_links, rustdoc::private_intra_doc_links)]

mod bank;
pub mod codec;
mod error;
pub mod formula;
mod generate;
pub mod rules;
mod shape;
mod utils;

pub use bank::{Bank, Usage};
pub use error::{Error, Result};
pub use generate::{generate_ordered, generate_random, Config, Generation, Outcome};
pub use rules::{BoxedRule, Rule};
pub use shape::{fold_rows, Dims, Shaped};
